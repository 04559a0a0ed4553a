//! Terminal output: status lines and the job progress bar.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::job::Stage;

/// Apply `--no-color` and `NO_COLOR` to every styled line.
pub fn init_colors(no_color: bool) {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

fn colored() -> bool {
    console::colors_enabled_stderr()
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    if colored() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {message}");
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if colored() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}

/// Progress bar mirroring a job's 0-100 progress.
///
/// Hidden when quiet, in CI, or without an attended terminal.
pub struct JobProgress {
    bar: ProgressBar,
}

impl JobProgress {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet || !Self::should_show() {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(100);
            if let Ok(style) =
                ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            {
                bar.set_style(style.progress_chars("█▓▒░"));
            }
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { bar }
    }

    pub fn stage(&self, stage: Stage) {
        self.bar.set_position(u64::from(stage.progress()));
        self.bar.set_message(stage.label());
    }

    pub fn finish(&self, message: &str) {
        self.bar.set_position(100);
        self.bar.finish_with_message(message.to_string());
    }

    pub fn fail(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }

    pub fn should_show() -> bool {
        console::user_attended_stderr() && !is_ci()
    }
}

impl Drop for JobProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
