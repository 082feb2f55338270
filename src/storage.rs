use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use crate::progress::Progress;

/// Loads saved progress; an unreadable or corrupt file starts fresh.
pub fn load_progress(path: &Path) -> Progress {
    let Ok(s) = fs::read_to_string(path) else {
        return Progress::default();
    };
    match serde_json::from_str::<Progress>(&s) {
        Ok(p) => p,
        Err(e) => {
            warn!("ignoring corrupt progress file {}: {e}", path.display());
            Progress::default()
        }
    }
}

pub fn save_progress(path: &Path, progress: &Progress) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(progress)?;
    fs::write(&tmp, data)
        .with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)
}

/// Replaces `to` in one step; the old file stays in place if this fails.
fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to)
        .with_context(|| format!("replacing {}", to.display()))
}
