use std::path::Path;

use crate::error::{Error, Result};

/// Per-directory ignore file consulted before fingerprinting.
pub const IGNORE_FILE: &str = ".dockerignore";

/// Path components that are never fingerprinted, regardless of ignore-file
/// content.
const ALWAYS_EXCLUDED: &[&str] = &[".git", ".drydock"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    /// `name/`: this component and everything beneath it.
    Prune(String),
    /// `.ext`: a component named exactly this, or ending with it.
    Dotted(String),
    /// An exact file or directory base name, at any depth.
    Name(String),
}

/// Exclusion rules for one service directory.
///
/// A deliberately small subset of the `.dockerignore` format, with no glob
/// or negation support. Comment and blank lines are never rules. Rules are
/// parsed fresh for every fingerprint computation and immutable once built.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<Rule>,
}

impl IgnoreRules {
    /// Read `<dir>/.dockerignore`. A missing file yields an empty rule set.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(IGNORE_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::IgnoreRead { path, source: e }),
        }
    }

    pub fn parse(content: &str) -> Self {
        let mut rules = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let rule = if let Some(name) = line.strip_suffix('/') {
                Rule::Prune(name.to_owned())
            } else if line.starts_with('.') {
                Rule::Dotted(line.to_owned())
            } else {
                Rule::Name(line.to_owned())
            };
            rules.push(rule);
        }
        Self { rules }
    }

    /// Walk predicate: is this root-relative path excluded?
    ///
    /// Matching is per path component, so an excluded directory excludes
    /// everything beneath it and the walk can prune without descending.
    pub fn excluded(&self, rel: &Path) -> bool {
        rel.components()
            .any(|c| self.component_excluded(&c.as_os_str().to_string_lossy()))
    }

    fn component_excluded(&self, name: &str) -> bool {
        if ALWAYS_EXCLUDED.contains(&name) {
            return true;
        }
        self.rules.iter().any(|rule| match rule {
            Rule::Prune(n) | Rule::Name(n) => name == n.as_str(),
            Rule::Dotted(pat) => name == pat.as_str() || name.ends_with(pat.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn comments_and_blanks_are_not_rules() {
        let rules = IgnoreRules::parse("# a comment\n\n   \n# build/\n");
        assert!(!rules.excluded(Path::new("build")));
        assert!(!rules.excluded(Path::new("a comment")));
    }

    #[test]
    fn trailing_slash_prunes_the_whole_subtree() {
        let rules = IgnoreRules::parse("build/\n");
        assert!(rules.excluded(Path::new("build")));
        assert!(rules.excluded(Path::new("build/out/artifact.bin")));
        assert!(rules.excluded(Path::new("src/build/cache")));
        assert!(!rules.excluded(Path::new("builder")));
        assert!(!rules.excluded(Path::new("src/main.rs")));
    }

    #[test]
    fn dotted_pattern_matches_name_or_suffix() {
        let rules = IgnoreRules::parse(".env\n.log\n");
        assert!(rules.excluded(Path::new(".env")));
        assert!(rules.excluded(Path::new("prod.env")));
        assert!(rules.excluded(Path::new("logs/debug.log")));
        assert!(!rules.excluded(Path::new("environment")));
        assert!(!rules.excluded(Path::new("logger.rs")));
    }

    #[test]
    fn plain_pattern_matches_exact_base_name_at_any_depth() {
        let rules = IgnoreRules::parse("notes.txt\ntarget\n");
        assert!(rules.excluded(Path::new("notes.txt")));
        assert!(rules.excluded(Path::new("docs/notes.txt")));
        assert!(rules.excluded(Path::new("target")));
        assert!(rules.excluded(Path::new("target/debug/app")));
        assert!(!rules.excluded(Path::new("notes.txt.bak")));
        assert!(!rules.excluded(Path::new("target2")));
    }

    #[test]
    fn leading_and_trailing_whitespace_is_trimmed() {
        let rules = IgnoreRules::parse("  tmp/  \n\t vendor \n");
        assert!(rules.excluded(Path::new("tmp/scratch")));
        assert!(rules.excluded(Path::new("vendor")));
    }

    #[test]
    fn version_control_metadata_always_excluded() {
        let rules = IgnoreRules::parse("");
        assert!(rules.excluded(Path::new(".git")));
        assert!(rules.excluded(Path::new(".git/objects/ab/cd")));
        assert!(rules.excluded(Path::new(".drydock/fingerprints.json")));
        assert!(!rules.excluded(Path::new("src/main.rs")));
    }

    #[test]
    fn dotted_rule_with_trailing_slash_is_a_prune_rule() {
        let rules = IgnoreRules::parse(".cache/\n");
        assert!(rules.excluded(Path::new(".cache")));
        assert!(rules.excluded(Path::new(".cache/pkg/index")));
        // Prune rules match whole component names, not suffixes.
        assert!(!rules.excluded(Path::new("http.cache")));
    }
}
