mod address;
mod convert;
mod format;

pub use address::is_valid_address;
pub use convert::drops_to_xrp;
pub use convert::parse_amount;
pub use convert::parse_drops;
pub use convert::xrp_to_drops;
pub use convert::DROPS_PER_XRP;
pub use convert::MAX_XRP;
pub use format::format_address;
