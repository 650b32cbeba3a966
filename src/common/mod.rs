//! Common utilities shared by the registry, runner and entry points

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};
