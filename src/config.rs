use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::chase::ChaseRules;
use crate::content;
use crate::crossword::Clue;
use crate::tiles;

const DEFAULT_REFRESH_MS: u64 = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub password: String,
    pub target: DateTime<FixedOffset>,
    pub puzzle_size: usize,
    pub refresh_ms: u64,
    pub chase: ChaseRules,
    pub clues: Vec<Clue>,
    pub memory_symbols: Vec<String>,
    pub maze: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            password: content::DEFAULT_PASSWORD.to_string(),
            target: DateTime::parse_from_rfc3339(content::DEFAULT_TARGET)
                .unwrap_or_else(|_| DateTime::UNIX_EPOCH.fixed_offset()),
            puzzle_size: tiles::MIN_SIZE,
            refresh_ms: DEFAULT_REFRESH_MS,
            chase: ChaseRules::default(),
            clues: content::default_clues(),
            memory_symbols: content::default_symbols(),
            maze: content::default_maze(),
        }
    }
}

pub struct Paths {
    pub settings_path: PathBuf,
    pub progress_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "giftbox", "Giftbox")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating {}", dir.display()))?;
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        progress_path: dir.join("progress.json"),
        log_path: dir.join("giftbox.log"),
    })
}

/// Reads settings, falling back to defaults when the file does not exist.
/// A file that exists but does not parse is an error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let settings = match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str::<Settings>(&s)
            .with_context(|| format!("parsing {}", path.display()))?,
        Err(e) if e.kind() == ErrorKind::NotFound => Settings::default(),
        Err(e) => return Err(e).context(format!("reading {}", path.display())),
    };
    let settings = apply_env_overrides(settings, |k| std::env::var(k).ok());
    Ok(sanitize(settings))
}

/// `GIFTBOX_PASSWORD`, `GIFTBOX_REFRESH_MS` and `GIFTBOX_PUZZLE_SIZE` win over the file.
pub fn apply_env_overrides(
    mut settings: Settings,
    var: impl Fn(&str) -> Option<String>,
) -> Settings {
    if let Some(pw) = var("GIFTBOX_PASSWORD").filter(|v| !v.is_empty()) {
        settings.password = pw;
    }
    if let Some(ms) = var("GIFTBOX_REFRESH_MS")
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
    {
        settings.refresh_ms = ms;
    }
    if let Some(n) = var("GIFTBOX_PUZZLE_SIZE").and_then(|v| v.parse().ok()) {
        settings.puzzle_size = n;
    }
    settings
}

fn sanitize(mut settings: Settings) -> Settings {
    let clamped = settings.puzzle_size.clamp(tiles::MIN_SIZE, tiles::MAX_SIZE);
    if clamped != settings.puzzle_size {
        warn!(
            "puzzle size {} out of range, using {}",
            settings.puzzle_size, clamped
        );
        settings.puzzle_size = clamped;
    }
    settings.refresh_ms = settings.refresh_ms.max(1);
    settings
}
