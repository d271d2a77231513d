use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "service lists are misaligned: {dirs} dirs but {deployments} deployments — every entry in [services].dirs needs a matching entry in [services].deployments"
    )]
    ServiceMapMismatch { dirs: usize, deployments: usize },

    // ── Fingerprinting ──
    #[error("failed to read ignore file {path}")]
    IgnoreRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to walk {dir}")]
    Walk { dir: PathBuf, source: walkdir::Error },

    #[error("failed to read {path} while fingerprinting")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Store ──
    #[error("failed to encode fingerprint store for {path}")]
    StoreEncode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write fingerprint store at {path}")]
    StoreWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
