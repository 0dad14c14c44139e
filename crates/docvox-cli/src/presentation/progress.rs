//! Terminal progress bar for synthesis rounds.

use std::sync::Mutex;

use docvox_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {msg:<14} [{bar:40.cyan/blue}] {pos}/{len} chunks";

/// CLI progress reporter with one bar per round.
pub struct CliProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    pub const fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn create_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }

    /// Print a line without tearing the active bar.
    pub fn println(&self, msg: &str) {
        let guard = self.bar.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match *guard {
            Some(ref pb) if !pb.is_finished() => pb.println(msg),
            _ => eprintln!("{msg}"),
        }
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CliProgress {
    fn start(&self, message: &str, total: u64) {
        let pb = Self::create_bar(total);
        pb.set_message(message.to_string());
        let mut guard = self.bar.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = guard.replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn inc(&self, delta: u64) {
        let guard = self.bar.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(ref pb) = *guard {
            pb.inc(delta);
        }
    }

    fn finish(&self, message: &str) {
        let guard = self.bar.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(ref pb) = *guard {
            pb.finish_with_message(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_position_across_rounds() {
        let progress = CliProgress::new();
        progress.start("first", 3);
        progress.inc(2);
        {
            let guard = progress.bar.lock().unwrap();
            assert_eq!(guard.as_ref().unwrap().position(), 2);
        }
        progress.finish("done");

        progress.start("second", 1);
        let guard = progress.bar.lock().unwrap();
        assert_eq!(guard.as_ref().unwrap().position(), 0);
        assert_eq!(guard.as_ref().unwrap().length(), Some(1));
    }
}
