pub mod config;
pub mod models;
pub mod rates;
pub mod utils;
pub mod xrpl;
