use std::path::Path;

use tracing::debug;

use crate::docker::DockerError;
use crate::executor::{DockerExecutor, RealExecutor};

/// Docker operations client, parameterized over the executor for testability.
pub struct DockerClient<E: DockerExecutor = RealExecutor> {
    executor: E,
}

impl DockerClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for DockerClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DockerExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Verify the docker CLI is reachable, returning its client version.
    pub async fn check_available(&self) -> Result<String, PreflightError> {
        self.executor
            .exec(&args(["version", "--format", "{{.Client.Version}}"]))
            .await
            .map(|v| v.trim().to_owned())
            .map_err(|_| PreflightError::DockerNotAvailable)
    }

    /// Build the image for one service directory, streaming build output.
    pub async fn build(&self, context_dir: &Path, image_ref: &str) -> Result<(), BuildError> {
        let context = context_dir
            .to_str()
            .ok_or_else(|| BuildError::InvalidPath(context_dir.to_path_buf()))?;
        debug!(image = image_ref, context, "docker build");
        self.executor
            .exec_streaming(&args(["build", "-t", image_ref, context]))
            .await
            .map_err(|e| BuildError::Build { source: e })
    }

    /// Push a built image to the registry, streaming output.
    pub async fn push(&self, image_ref: &str) -> Result<(), BuildError> {
        debug!(image = image_ref, "docker push");
        self.executor
            .exec_streaming(&args(["push", image_ref]))
            .await
            .map_err(|e| BuildError::Push { source: e })
    }
}

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("docker CLI not available — install: https://docs.docker.com/get-docker/")]
    DockerNotAvailable,
}

/// Build and push failures sequence identically: the directory's processing
/// aborts, and with it the run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("context path is not valid UTF-8: {0}")]
    InvalidPath(std::path::PathBuf),

    #[error("image build failed")]
    Build { source: DockerError },

    #[error("image push failed")]
    Push { source: DockerError },
}
