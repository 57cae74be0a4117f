//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;

use crate::patterns::PatternSet;

/// Configuration for a tree scan.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root directory to scan.
    pub root: PathBuf,

    /// Snapshot of entry names to leave out.
    #[builder(default)]
    pub patterns: PatternSet,

    /// Maximum depth to descend below the root (None = unlimited).
    #[builder(default)]
    pub max_depth: Option<u32>,

    /// Recurse into directories reached through symbolic links.
    #[builder(default = "false")]
    pub descend_symlinks: bool,
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a config for scanning a path with the given patterns.
    pub fn new(root: impl Into<PathBuf>, patterns: PatternSet) -> Self {
        Self {
            root: root.into(),
            patterns,
            max_depth: None,
            descend_symlinks: false,
        }
    }

    /// Whether children at `depth` (root = 0) should still be listed.
    pub fn allows_depth(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .patterns(PatternSet::builtin())
            .max_depth(2u32)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.max_depth, Some(2));
        assert!(config.patterns.matches(".git"));
        assert!(!config.descend_symlinks);
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_allows_depth() {
        let mut config = ScanConfig::new("/x", PatternSet::new());
        assert!(config.allows_depth(1000));

        config.max_depth = Some(1);
        assert!(config.allows_depth(0));
        assert!(!config.allows_depth(1));
    }
}
