//! Progress reporting for question turns

use assistant_application::TurnProgress;
use assistant_domain::Document;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner that follows a turn through search and completion
pub struct SpinnerProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut bar) = self.bar.lock() {
            f(&mut bar);
        }
    }

    pub fn document_summary(documents: &[Document]) -> String {
        match documents.len() {
            0 => "no matching documents".to_string(),
            1 => format!("1 document: {}", documents[0].name),
            n => format!(
                "{} documents: {}",
                n,
                documents
                    .iter()
                    .map(|d| d.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgress for SpinnerProgress {
    fn on_search_start(&self, _query: &str) {
        self.with_bar(|slot| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_prefix("Search");
            pb.set_message("Searching your documents...");
            pb.enable_steady_tick(Duration::from_millis(100));
            *slot = Some(pb);
        });
    }

    fn on_search_complete(&self, documents: &[Document]) {
        self.with_bar(|slot| {
            if let Some(pb) = slot.as_ref() {
                pb.set_message(Self::document_summary(documents));
            }
        });
    }

    fn on_completion_start(&self) {
        self.with_bar(|slot| {
            if let Some(pb) = slot.as_ref() {
                pb.set_prefix("Answer");
                pb.set_message("Generating an answer...");
            }
        });
    }

    fn on_turn_complete(&self, _success: bool) {
        self.with_bar(|slot| {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        });
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl TurnProgress for SimpleProgress {
    fn on_search_start(&self, _query: &str) {
        eprintln!("{} {}", "->".cyan(), "Searching documents".bold());
    }

    fn on_search_complete(&self, documents: &[Document]) {
        eprintln!("   {}", SpinnerProgress::document_summary(documents).dimmed());
    }

    fn on_completion_start(&self) {
        eprintln!("{} {}", "->".cyan(), "Generating answer".bold());
    }

    fn on_turn_complete(&self, success: bool) {
        if !success {
            eprintln!("   {}", "x request failed".red());
        }
    }
}
