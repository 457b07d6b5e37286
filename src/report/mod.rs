//! Report generation modules.
//!
//! This module renders joined records as Markdown or JSON documents.

pub mod generator;

pub use generator::*;
