//! OneSky localization puller
//!
//! This library authenticates against a OneSky project, lists its
//! configured languages and downloads every per-language localization file
//! into the Xcode-style `<locale>.lproj` tree the consuming app expects.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::OneSkyClient,
    config::PullConfig,
    errors::PullError,
    models::{ExportTarget, Language},
    signer::Signature,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
