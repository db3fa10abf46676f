//! geonorm: normalize free-text location strings into canonical country names.

pub mod batch;
pub mod config;
pub mod country;
pub mod server;
