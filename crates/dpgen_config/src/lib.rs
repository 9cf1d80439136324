//! Configuration for the random datapath generator.
//!
//! A [`GeneratorConfig`] carries the seed, module shape, operator weights,
//! and control-flow switches of one run. [`GeneratorConfig::validate`]
//! rejects unusable settings before any randomness is drawn.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config_from_str, MAX_WIDTH};
pub use types::*;
