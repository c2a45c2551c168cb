mod feed;

pub use feed::ExchangeRates;
pub use feed::RateFeed;
