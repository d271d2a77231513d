use std::path::Path;

use serde::{Deserialize, Serialize};

/// drydock.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrydockConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Image registry prefix, e.g. "registry.example.com/acme"
    pub registry: Option<String>,
    /// Kubernetes namespace the deployments live in
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// The two lists are positionally correlated: `dirs[i]` is rolled out to
/// `deployments[i]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Service directories, relative to the project root
    #[serde(default)]
    pub dirs: Vec<String>,
    /// Deployment names, one per service directory
    #[serde(default)]
    pub deployments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Upper bound on each rollout wait, in seconds
    #[serde(default = "default_rollout_timeout")]
    pub rollout_timeout_secs: u64,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            registry: None,
            namespace: default_namespace(),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            rollout_timeout_secs: default_rollout_timeout(),
        }
    }
}

/// One service directory and the deployment it rolls out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTarget {
    pub dir: String,
    pub deployment: String,
}

impl DrydockConfig {
    /// Load from drydock.toml at the given root, or return defaults if not found.
    pub fn load(root: &Path) -> crate::Result<Self> {
        let config_path = root.join("drydock.toml");
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Zip the parallel dirs/deployments lists into targets, in configured
    /// order. Fails when the lists are misaligned.
    pub fn resolve_targets(&self) -> crate::Result<Vec<ServiceTarget>> {
        if self.services.dirs.len() != self.services.deployments.len() {
            return Err(crate::Error::ServiceMapMismatch {
                dirs: self.services.dirs.len(),
                deployments: self.services.deployments.len(),
            });
        }
        Ok(self
            .services
            .dirs
            .iter()
            .zip(&self.services.deployments)
            .map(|(dir, deployment)| ServiceTarget {
                dir: dir.clone(),
                deployment: deployment.clone(),
            })
            .collect())
    }
}

fn default_namespace() -> String {
    "default".to_owned()
}

fn default_rollout_timeout() -> u64 {
    300
}
