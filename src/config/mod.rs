mod tables;
mod types;

pub use tables::IssuerTable;
pub use tables::RateTable;
pub use types::load_config;
pub use types::Config;
