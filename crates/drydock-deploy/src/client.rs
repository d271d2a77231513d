use tracing::debug;

use crate::executor::{KubectlExecutor, RealExecutor};
use crate::kubectl::KubectlError;

/// Kubernetes operations client, parameterized over the executor for
/// testability.
pub struct KubectlClient<E: KubectlExecutor = RealExecutor> {
    executor: E,
}

impl KubectlClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for KubectlClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: KubectlExecutor> KubectlClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Verify the kubectl CLI is reachable, returning its client version line.
    pub async fn check_available(&self) -> Result<String, PreflightError> {
        self.executor
            .exec(&args(["version", "--client"]))
            .await
            .map(|v| v.lines().next().unwrap_or("").trim().to_owned())
            .map_err(|_| PreflightError::KubectlNotAvailable)
    }

    /// Point a deployment at a freshly pushed image.
    ///
    /// The container name follows the deployment name.
    pub async fn set_image(
        &self,
        deployment: &str,
        image_ref: &str,
        namespace: &str,
    ) -> Result<(), DeployError> {
        let workload = format!("deployment/{deployment}");
        let assignment = format!("{deployment}={image_ref}");
        debug!(deployment, image = image_ref, namespace, "kubectl set image");
        self.executor
            .exec(&args([
                "set",
                "image",
                &workload,
                &assignment,
                "--namespace",
                namespace,
            ]))
            .await
            .map(|_| ())
            .map_err(|e| DeployError::Apply {
                deployment: deployment.to_owned(),
                source: e,
            })
    }

    /// Wait for a rollout to converge, bounded by `timeout_secs`.
    ///
    /// kubectl exiting non-zero here means the wait ran out, not that the
    /// deployment is broken. It may still converge afterward, so the result
    /// is [`RolloutStatus::TimedOut`] for the caller to report as a warning.
    pub async fn rollout_status(
        &self,
        deployment: &str,
        namespace: &str,
        timeout_secs: u64,
    ) -> Result<RolloutStatus, DeployError> {
        let workload = format!("deployment/{deployment}");
        let timeout = format!("--timeout={timeout_secs}s");
        match self
            .executor
            .exec_streaming(&args([
                "rollout",
                "status",
                &workload,
                "--namespace",
                namespace,
                &timeout,
            ]))
            .await
        {
            Ok(()) => Ok(RolloutStatus::Converged),
            Err(KubectlError::CommandFailed { .. }) => Ok(RolloutStatus::TimedOut),
            Err(e) => Err(DeployError::Apply {
                deployment: deployment.to_owned(),
                source: e,
            }),
        }
    }
}

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

/// Outcome of a bounded rollout wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutStatus {
    Converged,
    TimedOut,
}

#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("kubectl CLI not available — install: https://kubernetes.io/docs/tasks/tools/")]
    KubectlNotAvailable,
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("failed to update deployment '{deployment}'")]
    Apply {
        deployment: String,
        source: KubectlError,
    },
}
