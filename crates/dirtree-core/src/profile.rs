//! JSON-backed store of named exclusion profiles.
//!
//! The file is a single JSON object mapping profile names to arrays of
//! pattern strings. Every mutation rewrites the whole file synchronously.
//! The [`DEFAULT_PROFILE`] entry always exists and can never be saved over
//! or deleted.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::ProfileError;
use crate::patterns::PatternSet;

/// Name of the reserved, read-only profile.
pub const DEFAULT_PROFILE: &str = "Default";

/// File name of the profile store inside the config directory.
pub const PROFILES_FILE: &str = "profiles.json";

type ProfileMap = IndexMap<String, Vec<String>>;

/// Persistent mapping of profile name to pattern set.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: ProfileMap,
}

impl ProfileStore {
    /// Default location: `<config dir>/dirtree/profiles.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("dirtree").join(PROFILES_FILE))
    }

    /// Load the store from `path`.
    ///
    /// A missing or unparsable file resets the store to just the default
    /// profile and writes that back out. A failed write-back is logged; the
    /// in-memory store is usable either way. Patterns found under the
    /// default profile are dropped.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<ProfileMap>(&content).map_err(|e| e.to_string())
            });

        match loaded {
            Ok(mut profiles) => {
                match profiles.get_mut(DEFAULT_PROFILE) {
                    Some(stored) if !stored.is_empty() => {
                        tracing::warn!(
                            count = stored.len(),
                            "ignoring patterns stored under the read-only {DEFAULT_PROFILE} profile"
                        );
                        stored.clear();
                    }
                    Some(_) => {}
                    None => {
                        profiles.shift_insert(0, DEFAULT_PROFILE.to_string(), Vec::new());
                    }
                }
                tracing::debug!(path = %path.display(), count = profiles.len(), "loaded profiles");
                Self { path, profiles }
            }
            Err(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    %reason,
                    "profile store unreadable, resetting to defaults"
                );
                let store = Self::with_defaults(path);
                if let Err(e) = store.persist() {
                    tracing::warn!("could not write default profile store: {e}");
                }
                store
            }
        }
    }

    /// An in-memory store holding only the default profile.
    pub fn with_defaults(path: impl Into<PathBuf>) -> Self {
        let mut profiles = ProfileMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), Vec::new());
        Self {
            path: path.into(),
            profiles,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Profile names in stored order.
    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Patterns stored under `name`; empty for unknown profiles.
    pub fn get(&self, name: &str) -> PatternSet {
        self.profiles
            .get(name)
            .map(|patterns| patterns.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Insert or replace a profile and persist the whole store.
    pub fn save(&mut self, name: &str, patterns: &PatternSet) -> Result<(), ProfileError> {
        check_writable(name)?;
        let previous = self
            .profiles
            .insert(name.to_string(), patterns.to_vec());
        if let Err(e) = self.persist() {
            match previous {
                Some(old) => {
                    self.profiles.insert(name.to_string(), old);
                }
                None => {
                    self.profiles.shift_remove(name);
                }
            }
            return Err(e);
        }
        tracing::info!(profile = name, patterns = patterns.len(), "saved profile");
        Ok(())
    }

    /// Remove a profile and persist. Removing an unknown name is a no-op.
    pub fn delete(&mut self, name: &str) -> Result<(), ProfileError> {
        check_writable(name)?;
        let Some(index) = self.profiles.get_index_of(name) else {
            return Ok(());
        };
        let removed = self.profiles.shift_remove_index(index);
        if let Err(e) = self.persist() {
            if let Some((key, value)) = removed {
                self.profiles.shift_insert(index, key, value);
            }
            return Err(e);
        }
        tracing::info!(profile = name, "deleted profile");
        Ok(())
    }

    fn persist(&self) -> Result<(), ProfileError> {
        let io_err = |source| ProfileError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&self.profiles)?;
        std::fs::write(&self.path, content).map_err(io_err)
    }
}

fn check_writable(name: &str) -> Result<(), ProfileError> {
    if name == DEFAULT_PROFILE {
        return Err(ProfileError::ReadOnly {
            name: name.to_string(),
        });
    }
    if name.trim().is_empty() {
        return Err(ProfileError::EmptyName);
    }
    Ok(())
}
