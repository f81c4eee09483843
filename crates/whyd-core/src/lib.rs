//! Whyd core: configuration and the shared error type.

pub mod config;
pub mod error;

pub use config::{ConsentSources, WhydConfig};
pub use error::{Error, Result};
