//! Command line interface for canard.

pub mod args;
pub mod commands;
pub mod output;
