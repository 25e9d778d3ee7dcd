//! Configuration types
//!
//! Sign configuration stored as postcard binary data.

pub mod sign;

pub use sign::*;
