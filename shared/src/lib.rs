pub mod adapters;
pub mod core;
pub mod cursor;
pub mod metrics;
pub mod utils;
