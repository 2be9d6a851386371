//! # CRAI Common Library
//!
//! Shared code for the CRAI comment-review services:
//! - Error types
//! - Configuration loading

pub mod config;
pub mod error;

pub use config::ServiceConfig;
pub use error::{Error, Result};
