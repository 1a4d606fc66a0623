//! Command line host for the Ketch resource lifecycle

pub mod commands;
pub mod display;
pub mod manifest;
pub mod resource;

pub use commands::{CliArgs, Commands};
