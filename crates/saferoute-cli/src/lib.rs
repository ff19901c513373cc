//! SafeRoute CLI library.
//!
//! This crate provides command-line interface utilities for the SafeRoute
//! planner, including terminal styling and output formatting.

pub mod output;
pub mod terminal;
