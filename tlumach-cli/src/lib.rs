//! Tlumach CLI library
//!
//! Command-line front end for the tlumach chunking and translation
//! pipeline: split text, translate it through a backend and print the
//! delivery units.

pub mod backend;
pub mod commands;
pub mod config;
pub mod delivery;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
