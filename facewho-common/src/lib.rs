//! # facewho common library
//!
//! Shared code for facewho services:
//! - Error and result types
//! - TOML configuration discovery and loading
//! - Credential validation helpers

pub mod config;
pub mod error;

pub use error::{Error, Result};
