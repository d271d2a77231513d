use std::path::Path;

use crate::config::ServiceTarget;
use crate::error::Result;
use crate::fingerprint::fingerprint_dir;
use crate::store::Fingerprints;

/// One service's change-detection verdict.
#[derive(Debug, Clone)]
pub struct ServiceStatus {
    pub target: ServiceTarget,
    pub digest: String,
    pub changed: bool,
}

/// Decide, per configured service, whether a rebuild is needed.
///
/// Read-only: the current tree is fingerprinted and compared against the
/// stored mapping, which is not touched. A service with no stored entry has
/// never been built and counts as changed. `force` marks every service
/// changed without skipping the fingerprint computation, since the digests
/// are still needed to stage store updates after a successful build.
pub fn detect_changes(
    root: &Path,
    targets: &[ServiceTarget],
    known: &Fingerprints,
    force: bool,
) -> Result<Vec<ServiceStatus>> {
    let mut statuses = Vec::with_capacity(targets.len());
    for target in targets {
        let digest = fingerprint_dir(&root.join(&target.dir))?;
        let changed = force || known.get(&target.dir) != Some(digest.as_str());
        statuses.push(ServiceStatus {
            target: target.clone(),
            digest,
            changed,
        });
    }
    Ok(statuses)
}
