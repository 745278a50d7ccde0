// ABOUTME: Configuration management for the MacroMeter server
// ABOUTME: Environment-driven settings for HTTP, upstream API, and storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management

/// Environment-based configuration for production deployment
pub mod environment;

pub use environment::{
    ResolutionConfig, ServerConfig, StorageConfig, UsdaConfig, UsdaCredentials,
};
