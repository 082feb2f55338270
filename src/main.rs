use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::event::{self, Event};
use crossterm::terminal;
use log::{error, info};

use giftbox::app::{App, Content};
use giftbox::config::{load_settings, project_paths};
use giftbox::input::map_key;
use giftbox::progress::Progress;
use giftbox::render::{frame, Painter};
use giftbox::storage::{load_progress, save_progress};
use giftbox::term::TermGuard;

fn main() -> Result<()> {
    let paths = project_paths()?;
    init_logging(&paths.log_path)?;

    let settings_path = &paths.settings_path;
    let settings = load_settings(settings_path)?;
    let content = Content::from_settings(&settings)
        .with_context(|| format!("invalid content in {}", settings_path.display()))?;
    let progress = load_progress(&paths.progress_path);
    info!(
        "starting with {} crossword entries, solved rooms {:?}",
        content.layout.entries().count(),
        progress.solved
    );
    let refresh = Duration::from_millis(settings.refresh_ms);

    let mut guard = TermGuard::new(io::stdout())?;
    let result = run(
        guard.out(),
        content,
        progress,
        &paths.progress_path,
        refresh,
    );
    drop(guard);
    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(
    stdout: &mut Stdout,
    content: Content,
    progress: Progress,
    progress_path: &Path,
    refresh: Duration,
) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut app = App::new(content, progress, &mut rng);
    let mut painter = Painter::new();

    loop {
        let view = frame(&app, Utc::now());
        painter.draw(stdout, &view, terminal::size()?)?;
        if !event::poll(refresh)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                let Some(action) = map_key(&app, key) else {
                    continue;
                };
                let before = app.progress.solved;
                app = app.update(action, &mut rng);
                if app.quit {
                    return Ok(());
                }
                if app.progress.solved != before {
                    save_progress(progress_path, &app.progress)?;
                }
            }
            Event::Resize(_, _) => painter.invalidate(),
            _ => {}
        }
    }
}
