use std::path::PathBuf;

use drydock_core::{DrydockConfig, FingerprintStore, detect_changes};

/// Read-only change report: what would `drydock release` rebuild?
pub fn status() -> anyhow::Result<()> {
    let root = PathBuf::from(".");
    let config = DrydockConfig::load(&root)?;
    let targets = config.resolve_targets()?;

    if targets.is_empty() {
        println!("No services configured — add [services] to drydock.toml");
        return Ok(());
    }

    let known = FingerprintStore::new(&root).load();
    let statuses = detect_changes(&root, &targets, &known, false)?;

    for service in &statuses {
        let marker = if service.changed { "changed  " } else { "unchanged" };
        println!("{marker}  {} → {}", service.target.dir, service.target.deployment);
    }

    let changed = statuses.iter().filter(|s| s.changed).count();
    println!();
    println!("{changed} of {} service(s) would be rebuilt", statuses.len());
    Ok(())
}
