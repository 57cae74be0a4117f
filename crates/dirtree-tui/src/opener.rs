//! Opening directories with the system file manager.

use std::path::Path;

/// Open `path` with the platform's default handler for directories.
///
/// The opener is spawned detached so the TUI keeps running.
pub fn open_directory(path: &Path) -> std::io::Result<()> {
    tracing::info!(path = %path.display(), "opening in file manager");
    open::that_detached(path)
}
