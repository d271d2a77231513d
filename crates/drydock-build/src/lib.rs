//! Docker build and push operations for drydock.
//!
//! # Build stage
//!
//! ```text
//! drydock release
//!   1. validate ── service directory + Dockerfile present
//!   2. build    ── docker build -t <registry>/<dir>:<tag> <dir>
//!   3. push     ── docker push <registry>/<dir>:<tag>
//! ```
//!
//! Builds run one directory at a time: the local layer cache is a shared
//! resource, and the release pipeline needs every build outcome before it
//! finalizes anything.

pub mod client;
pub mod context;
pub mod docker;
pub mod executor;

pub use client::{BuildError, DockerClient, PreflightError};
pub use context::{ContextError, validate_context};
pub use docker::DockerError;
pub use executor::{DockerExecutor, RealExecutor};
