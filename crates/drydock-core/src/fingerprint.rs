use std::fs;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ignore::IgnoreRules;

/// Compute the content fingerprint of one service directory.
///
/// Every regular file under `dir` contributes its relative path and SHA-256
/// digest; ignore-rule exclusions are pruned without being visited. Entries
/// are ordered lexicographically by full relative path so the result is
/// independent of filesystem enumeration order. A directory with no eligible
/// files hashes to the digest of empty input.
pub fn fingerprint_dir(dir: &Path) -> Result<String> {
    let rules = IgnoreRules::load(dir)?;

    let mut entries: Vec<(String, String)> = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let rel = e.path().strip_prefix(dir).unwrap_or_else(|_| e.path());
            rel.as_os_str().is_empty() || !rules.excluded(rel)
        });

    for entry in walker {
        let entry = entry.map_err(|e| Error::Walk {
            dir: dir.to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or_else(|_| entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let digest = hash_file(entry.path())?;
        entries.push((rel, digest));
    }

    // sort_by_file_name only orders siblings; the fingerprint contract is
    // lexicographic over full relative paths.
    entries.sort();

    let mut hasher = Sha256::new();
    for (rel, digest) in &entries {
        hasher.update(rel.as_bytes());
        hasher.update(b":");
        hasher.update(digest.as_bytes());
        hasher.update(b"\n");
    }
    let fingerprint = format!("{:x}", hasher.finalize());
    debug!(dir = %dir.display(), files = entries.len(), %fingerprint, "fingerprinted directory");
    Ok(fingerprint)
}

/// Streaming SHA-256 of one file, as lowercase hex.
fn hash_file(path: &Path) -> Result<String> {
    let read_err = |e: std::io::Error| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    };

    let mut file = fs::File::open(path).map_err(read_err)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file.read(&mut buffer).map_err(read_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
