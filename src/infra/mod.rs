//! Infrastructure layer for cross-cutting concerns.
//!
//! Provides foundational infrastructure including:
//! - Tool configuration file management
//! - Error handling and result types

pub mod config;
pub mod error;
