// HTML reporting - model, renderer and on-disk layout
//
// The report is assembled from scenario/step lifecycle events (the bdd
// crate's writer feeds it), rendered to a single self-contained HTML file
// and flushed once at run end. Screenshots and captured browser logs are
// written next to it and linked by relative path. Everything here is
// best-effort from the caller's point of view: an error while writing
// artifacts must be logged by the caller, never propagated into a
// scenario.

pub mod html;
pub mod model;

pub use model::{
    FeatureReport, RunReport, ScenarioReport, StepReport, StepStatus,
};

use crate::error::Result;
use std::path::{Path, PathBuf};

/// On-disk layout of one run's report.
///
/// Fixed layout relative to the run's working directory:
///
/// ```text
/// report/
///   index.html
///   screenshots/<timestamp>_<scenario>.png
///   logs/<timestamp>_<scenario>.txt
/// ```
#[derive(Debug, Clone)]
pub struct ReportPaths {
    root: PathBuf,
}

impl ReportPaths {
    /// Report layout rooted at `<base>/report`.
    pub fn new(base: impl AsRef<Path>) -> Self {
        ReportPaths {
            root: base.as_ref().join("report"),
        }
    }

    /// Report layout under the current working directory.
    pub fn in_working_dir() -> Self {
        ReportPaths::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// The report directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the HTML report file.
    pub fn index_html(&self) -> PathBuf {
        self.root.join("index.html")
    }

    /// Absolute path and index-relative link for a scenario screenshot.
    pub fn screenshot_file(&self, scenario: &str) -> (PathBuf, String) {
        let name = format!("{}_{}.png", timestamp(), sanitize_file_name(scenario));
        let relative = format!("screenshots/{name}");
        (self.root.join(&relative), relative)
    }

    /// Absolute path and index-relative link for a browser-log capture.
    pub fn log_file(&self, scenario: &str) -> (PathBuf, String) {
        let name = format!("{}_{}.txt", timestamp(), sanitize_file_name(scenario));
        let relative = format!("logs/{name}");
        (self.root.join(&relative), relative)
    }

    /// Creates the report directory tree.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(self.root.join("screenshots"))?;
        std::fs::create_dir_all(self.root.join("logs"))?;
        Ok(())
    }

    /// Renders the report and writes `index.html`.
    pub fn flush(&self, report: &RunReport) -> Result<PathBuf> {
        self.ensure_dirs()?;
        let path = self.index_html();
        std::fs::write(&path, html::render(report))?;
        Ok(path)
    }
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S%3f").to_string()
}

/// Strips characters that are not safe in file names.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_fixed_relative_to_the_base() {
        let paths = ReportPaths::new("/tmp/run");
        assert_eq!(paths.index_html(), PathBuf::from("/tmp/run/report/index.html"));
    }

    #[test]
    fn screenshot_names_are_filesystem_safe() {
        let paths = ReportPaths::new("/tmp/run");
        let (path, relative) = paths.screenshot_file("Login: with \"quotes\"/slashes");
        assert!(relative.starts_with("screenshots/"));
        assert!(relative.ends_with(".png"));
        assert!(!relative.contains('"'));
        assert!(!relative.contains(' '));
        assert!(path.ends_with(&relative));
    }

    #[test]
    fn sanitized_names_keep_word_characters() {
        assert_eq!(sanitize_file_name("GET health-check_2"), "GET_health-check_2");
    }
}
