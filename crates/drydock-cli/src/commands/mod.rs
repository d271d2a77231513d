mod doctor;
mod release;
mod status;

pub use doctor::doctor;
pub use release::{ReleaseOptions, release};
pub use status::status;

use drydock_core::DrydockConfig;

/// Resolve the registry from the CLI override or config, pointing at both
/// knobs when neither is set.
pub(crate) fn require_registry(
    config: &DrydockConfig,
    override_: Option<&str>,
) -> anyhow::Result<String> {
    override_
        .map(str::to_owned)
        .or_else(|| config.project.registry.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "registry not set — pass --registry or set [project].registry in drydock.toml"
            )
        })
}
