//! Calendar actions: open links, save the .ics file.

use std::path::{Path, PathBuf};

use jamcal_core::{Augmentation, CalendarTarget};
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

/// File name used when the title leaves nothing usable.
const FALLBACK_FILE_NAME: &str = "jam.ics";

/// Opens the link for `target` with the system handler.
///
/// The `.ics` file has no URL to open, so the file is opened instead: the
/// one already `saved`, or a fresh copy written to `ics_dir`.
pub fn open_target(
    aug: &Augmentation,
    target: CalendarTarget,
    ics_dir: &Path,
    saved: Option<&Path>,
) -> ClientResult<()> {
    let button = aug.button(target).ok_or_else(|| {
        ClientError::Action(format!("no {} button was built", target))
    })?;

    if let Some(url) = button.url() {
        info!(url = %url, target = %target, "opening calendar link");
        open::that(url.as_str())
            .map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))?;
        return Ok(());
    }

    let path = ics_path_to_open(aug, ics_dir, saved)?;
    info!(path = %path.display(), "opening calendar file");
    open::that(&path).map_err(|e| ClientError::Action(format!("failed to open file: {}", e)))?;

    Ok(())
}

/// Reuses an already saved file, else saves one into `ics_dir`.
fn ics_path_to_open(
    aug: &Augmentation,
    ics_dir: &Path,
    saved: Option<&Path>,
) -> ClientResult<PathBuf> {
    match saved {
        Some(path) => Ok(path.to_path_buf()),
        None => save_ics(aug, ics_dir),
    }
}

/// Writes the `.ics` file into `dir` and returns its path.
pub fn save_ics(aug: &Augmentation, dir: &Path) -> ClientResult<PathBuf> {
    let file = aug
        .button(CalendarTarget::IcsFile)
        .and_then(|b| b.file())
        .ok_or_else(|| ClientError::Action("no calendar file was built".into()))?;

    if !dir.exists() {
        debug!(dir = %dir.display(), "creating output directory");
        std::fs::create_dir_all(dir)?;
    }

    let path = dir.join(safe_file_name(&file.filename));
    std::fs::write(&path, &file.body)?;
    info!(path = %path.display(), "saved calendar file");

    Ok(path)
}

/// Makes a title-derived file name safe to write to disk.
pub fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim().trim_start_matches('.');
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("ics") {
        FALLBACK_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
