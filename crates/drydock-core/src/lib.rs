//! Core types and change detection for drydock.
//!
//! This crate defines the `drydock.toml` schema ([`DrydockConfig`]), the
//! ignore-aware directory fingerprinter ([`fingerprint_dir`]), the persisted
//! fingerprint store ([`FingerprintStore`]), and the change detector that
//! combines the two ([`detect_changes`]).

pub mod config;
pub mod detect;
pub mod error;
pub mod fingerprint;
pub mod ignore;
pub mod store;

pub use config::{DeployConfig, DrydockConfig, ProjectConfig, ServiceTarget, ServicesConfig};
pub use detect::{ServiceStatus, detect_changes};
pub use error::{Error, Result};
pub use fingerprint::fingerprint_dir;
pub use ignore::IgnoreRules;
pub use store::{FingerprintStore, Fingerprints};
