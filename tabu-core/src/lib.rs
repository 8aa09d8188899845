//! Tabu catalog pipeline
//!
//! Builds, curates and checks the bundled card catalog of the Tabu word
//! game and its provenance manifest.

pub mod alignment;
pub mod catalog;
pub mod config;
pub mod curator;
pub mod difficulty;
pub mod distractors;
pub mod error;
pub mod generator;
pub mod text;
pub mod validator;

pub use error::{PipelineError, Result};
