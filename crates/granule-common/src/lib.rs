//! Common types shared across the granule-fetch services.

pub mod granule;

pub use granule::{GranuleRequest, PathLayout};
