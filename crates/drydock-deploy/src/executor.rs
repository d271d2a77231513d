use crate::kubectl::KubectlError;

/// Abstraction over kubectl CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait KubectlExecutor: Send + Sync {
    /// Execute a kubectl command and capture stdout.
    async fn exec(&self, args: &[String]) -> Result<String, KubectlError>;

    /// Execute a kubectl command, streaming output to the terminal.
    async fn exec_streaming(&self, args: &[String]) -> Result<(), KubectlError>;
}

/// Real kubectl CLI executor.
pub struct RealExecutor;

impl KubectlExecutor for RealExecutor {
    async fn exec(&self, args: &[String]) -> Result<String, KubectlError> {
        use std::process::Stdio;

        let output = tokio::process::Command::new("kubectl")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| KubectlError::NotFound { source: e })?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| KubectlError::InvalidUtf8 { source: e })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(KubectlError::CommandFailed {
                args: args.to_vec(),
                stderr,
            })
        }
    }

    async fn exec_streaming(&self, args: &[String]) -> Result<(), KubectlError> {
        use std::process::Stdio;

        let status = tokio::process::Command::new("kubectl")
            .args(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| KubectlError::NotFound { source: e })?;

        if status.success() {
            Ok(())
        } else {
            Err(KubectlError::CommandFailed {
                args: args.to_vec(),
                stderr: format!("exit code: {status}"),
            })
        }
    }
}
