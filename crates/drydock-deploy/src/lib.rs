//! Kubernetes rollout operations for drydock.
//!
//! Two calls per released service: `kubectl set image` points the deployment
//! at the freshly pushed image, then `kubectl rollout status` waits for
//! convergence under a bounded timeout. A wait that runs out is a warning,
//! not a failure: the rollout may still complete on its own.

pub mod client;
pub mod executor;
pub mod kubectl;

pub use client::{DeployError, KubectlClient, PreflightError, RolloutStatus};
pub use executor::{KubectlExecutor, RealExecutor};
pub use kubectl::KubectlError;
