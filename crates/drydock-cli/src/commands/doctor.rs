use std::path::PathBuf;

use drydock_build::{DockerClient, validate_context};
use drydock_core::DrydockConfig;
use drydock_deploy::KubectlClient;

/// Diagnose local tooling and project layout without touching anything.
///
/// Every check runs; failures are counted rather than short-circuiting, so
/// one report covers the whole setup.
pub async fn doctor() -> anyhow::Result<()> {
    let mut failures = 0usize;
    let mut check = |label: &str, result: Result<String, String>| match result {
        Ok(detail) => println!("OK  {label}: {detail}"),
        Err(detail) => {
            failures += 1;
            println!("NG  {label}: {detail}");
        }
    };

    let docker = DockerClient::new();
    check(
        "docker",
        docker.check_available().await.map_err(|e| e.to_string()),
    );

    let kubectl = KubectlClient::new();
    check(
        "kubectl",
        kubectl.check_available().await.map_err(|e| e.to_string()),
    );

    let root = PathBuf::from(".");
    match DrydockConfig::load(&root) {
        Ok(config) => {
            check("drydock.toml", Ok("loaded".to_owned()));
            check(
                "registry",
                super::require_registry(&config, None).map_err(|e| e.to_string()),
            );
            match config.resolve_targets() {
                Ok(targets) => {
                    check("service map", Ok(format!("{} service(s)", targets.len())));
                    for target in &targets {
                        check(
                            &format!("service {}", target.dir),
                            validate_context(&root.join(&target.dir))
                                .map(|()| "ready".to_owned())
                                .map_err(|e| e.to_string()),
                        );
                    }
                }
                Err(e) => check("service map", Err(e.to_string())),
            }
        }
        Err(e) => check("drydock.toml", Err(e.to_string())),
    }

    if failures > 0 {
        anyhow::bail!("{failures} check(s) failed — see above for details");
    }
    Ok(())
}
