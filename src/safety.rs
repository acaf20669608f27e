//! Safety checks for the paths written back to records.
//!
//! The stored image path is resolved by the web app against its media root,
//! so it must stay relative and inside that root.

use anyhow::{bail, Result};
use std::path::{Component, Path};

/// Validates the subdirectory prefix stored in front of matched filenames.
///
/// Checks:
/// - Must not be empty
/// - Must be relative (no leading `/`, no drive prefix)
/// - Must not climb out with `..`
///
/// # Returns
/// * `Ok(())` if the prefix is safe to persist
/// * `Err` with a descriptive message if the check fails
pub fn validate_media_subdir(subdir: &str) -> Result<()> {
    let trimmed = subdir.trim_matches('/');
    if trimmed.is_empty() {
        bail!("Safety check failed: media subdirectory must not be empty");
    }

    let path = Path::new(subdir);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => bail!(
                "Safety check failed: media subdirectory '{}' must not contain '..'",
                subdir
            ),
            Component::RootDir | Component::Prefix(_) => bail!(
                "Safety check failed: media subdirectory '{}' must be relative",
                subdir
            ),
        }
    }

    Ok(())
}

/// Join the media subdirectory and a filename with `/`, whatever the host OS.
pub fn relative_image_path(subdir: &str, file_name: &str) -> String {
    format!("{}/{}", subdir.trim_end_matches('/'), file_name)
}
