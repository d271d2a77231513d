use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::warn;

use drydock_build::{DockerClient, DockerExecutor, validate_context};
use drydock_core::{
    DrydockConfig, FingerprintStore, ServiceStatus, ServiceTarget, detect_changes, fingerprint_dir,
};
use drydock_deploy::{KubectlClient, KubectlExecutor, RolloutStatus};

pub struct ReleaseOptions {
    pub registry: Option<String>,
    pub namespace: Option<String>,
    pub force: bool,
    pub reset: bool,
}

/// A service that built and pushed successfully, awaiting deploy.
struct BuiltService {
    target: ServiceTarget,
    image: String,
}

/// Terminal state of a release run. Failures surface as errors instead.
#[derive(Debug)]
enum RunStatus {
    /// Nothing changed: no builds, no deploys, no store writes.
    AllSkipped,
    Completed {
        released: Vec<String>,
        timed_out: Vec<String>,
    },
}

/// Execute the full release pipeline with the real docker and kubectl CLIs.
pub async fn release(opts: ReleaseOptions) -> anyhow::Result<()> {
    let root = PathBuf::from(".");
    let docker = DockerClient::new();
    let kubectl = KubectlClient::new();

    match run(&root, &docker, &kubectl, &opts).await? {
        RunStatus::AllSkipped => {
            println!("All services up to date — nothing to do.");
        }
        RunStatus::Completed {
            released,
            timed_out,
        } => {
            println!();
            println!("Released: {}", released.join(", "));
            for deployment in &timed_out {
                println!(
                    "Warning: rollout of '{deployment}' did not converge within the wait budget — it may still complete."
                );
            }
        }
    }
    Ok(())
}

/// Run the release pipeline: validate → detect → build → persist → deploy.
///
/// Builds run strictly sequentially in configured order. Fingerprint updates
/// are staged in memory and written exactly once, after every build has
/// succeeded: a failed build leaves the store untouched, so the next run
/// retries everything this one attempted (already-pushed images stay pushed).
/// Deploys follow in the same order; an apply failure stops the loop with the
/// saved store standing, while a rollout that outlives its wait budget is
/// only a warning.
async fn run<D, K>(
    root: &Path,
    docker: &DockerClient<D>,
    kubectl: &KubectlClient<K>,
    opts: &ReleaseOptions,
) -> anyhow::Result<RunStatus>
where
    D: DockerExecutor,
    K: KubectlExecutor,
{
    let config = DrydockConfig::load(root)?;
    let registry = super::require_registry(&config, opts.registry.as_deref())?;
    let namespace = opts
        .namespace
        .clone()
        .unwrap_or_else(|| config.project.namespace.clone());
    let targets = config.resolve_targets()?;

    // Every prerequisite is checked before anything builds or mutates.
    for target in &targets {
        validate_context(&root.join(&target.dir))?;
    }
    docker.check_available().await?;
    kubectl.check_available().await?;

    let store = FingerprintStore::new(root);
    if opts.reset {
        store.clear()?;
    }
    let known = store.load();

    let statuses = detect_changes(root, &targets, &known, opts.force)?;
    let (to_build, unchanged): (Vec<ServiceStatus>, Vec<ServiceStatus>) =
        statuses.into_iter().partition(|s| s.changed);
    for skipped in &unchanged {
        println!("unchanged: {}", skipped.target.dir);
    }
    if to_build.is_empty() {
        return Ok(RunStatus::AllSkipped);
    }

    // One tag for every image built this run.
    let tag = run_tag();
    println!("Releasing {} service(s) with tag {tag}", to_build.len());

    let mut staged = known.clone();
    let mut built = Vec::with_capacity(to_build.len());
    for status in &to_build {
        let dir = &status.target.dir;
        let image = format!("{registry}/{dir}:{tag}");

        println!("Building {dir} → {image}");
        docker
            .build(&root.join(dir), &image)
            .await
            .with_context(|| format!("build failed for service '{dir}'"))?;
        docker
            .push(&image)
            .await
            .with_context(|| format!("push failed for service '{dir}'"))?;

        // Recompute so the staged digest reflects the tree as of the
        // successful build, not as of detection.
        let digest = fingerprint_dir(&root.join(dir))
            .with_context(|| format!("failed to re-fingerprint service '{dir}' after build"))?;
        staged.set(dir, &digest);
        built.push(BuiltService {
            target: status.target.clone(),
            image,
        });
    }

    // All builds succeeded: persist the staged mapping in a single write.
    store.save(&staged)?;

    let mut released = Vec::with_capacity(built.len());
    let mut timed_out = Vec::new();
    for service in &built {
        let deployment = &service.target.deployment;
        println!("Deploying {deployment} ← {}", service.image);
        kubectl
            .set_image(deployment, &service.image, &namespace)
            .await?;
        match kubectl
            .rollout_status(deployment, &namespace, config.deploy.rollout_timeout_secs)
            .await?
        {
            RolloutStatus::Converged => {}
            RolloutStatus::TimedOut => {
                warn!(%deployment, "rollout did not converge within the wait budget");
                timed_out.push(deployment.clone());
            }
        }
        released.push(service.target.dir.clone());
    }

    Ok(RunStatus::Completed {
        released,
        timed_out,
    })
}

/// UTC timestamp shared by every image built in one run.
fn run_tag() -> String {
    chrono::Utc::now().format("%Y%m%d-%H%M%S").to_string()
}
