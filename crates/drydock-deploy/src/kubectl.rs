#[derive(Debug, thiserror::Error)]
pub enum KubectlError {
    #[error("kubectl CLI not found — install: https://kubernetes.io/docs/tasks/tools/")]
    NotFound { source: std::io::Error },

    #[error("kubectl command failed: {args:?}\n{stderr}")]
    CommandFailed { args: Vec<String>, stderr: String },

    #[error("kubectl output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },
}
