// Report model - features, scenarios, steps

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
}

/// One executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Gherkin keyword as written in the feature ("Given ", "When ", ...)
    pub keyword: String,
    pub text: String,
    pub status: StepStatus,
    pub duration_ms: u64,
    /// Data table rows (header first), when the step carried one
    pub table: Option<Vec<Vec<String>>>,
    /// Index-relative link to the attached screenshot
    pub screenshot: Option<String>,
    /// Index-relative link to captured browser logs
    pub browser_log: Option<String>,
    /// Failure message, when the step failed
    pub error: Option<String>,
}

impl StepReport {
    pub fn passed(keyword: impl Into<String>, text: impl Into<String>, duration_ms: u64) -> Self {
        StepReport {
            keyword: keyword.into(),
            text: text.into(),
            status: StepStatus::Passed,
            duration_ms,
            table: None,
            screenshot: None,
            browser_log: None,
            error: None,
        }
    }

    pub fn failed(
        keyword: impl Into<String>,
        text: impl Into<String>,
        duration_ms: u64,
        error: impl Into<String>,
    ) -> Self {
        StepReport {
            error: Some(error.into()),
            status: StepStatus::Failed,
            ..StepReport::passed(keyword, text, duration_ms)
        }
    }

    pub fn skipped(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        StepReport {
            status: StepStatus::Skipped,
            ..StepReport::passed(keyword, text, 0)
        }
    }
}

/// One executed scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub tags: Vec<String>,
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    pub fn new(name: impl Into<String>, tags: Vec<String>) -> Self {
        ScenarioReport {
            name: name.into(),
            tags,
            steps: Vec::new(),
        }
    }

    /// A scenario fails when any of its steps failed.
    pub fn failed(&self) -> bool {
        self.steps
            .iter()
            .any(|step| step.status == StepStatus::Failed)
    }
}

/// One feature and its scenarios.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport {
    pub name: String,
    pub scenarios: Vec<ScenarioReport>,
}

/// The whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub title: String,
    /// Build label shown in the header ({branch}_{number} or host name)
    pub build_label: String,
    pub environment: Option<String>,
    pub started: DateTime<Utc>,
    pub finished: Option<DateTime<Utc>>,
    pub features: Vec<FeatureReport>,
}

impl RunReport {
    pub fn new(
        title: impl Into<String>,
        build_label: impl Into<String>,
        environment: Option<String>,
    ) -> Self {
        RunReport {
            title: title.into(),
            build_label: build_label.into(),
            environment,
            started: Utc::now(),
            finished: None,
            features: Vec::new(),
        }
    }

    /// The feature node with this name, created on first use.
    ///
    /// Features keep arrival order so the rendered report matches the
    /// execution order.
    pub fn feature_mut(&mut self, name: &str) -> &mut FeatureReport {
        if let Some(i) = self.features.iter().position(|f| f.name == name) {
            return &mut self.features[i];
        }
        self.features.push(FeatureReport {
            name: name.to_owned(),
            scenarios: Vec::new(),
        });
        self.features.last_mut().expect("feature was just pushed")
    }

    /// Marks the run complete.
    pub fn finish(&mut self) {
        self.finished = Some(Utc::now());
    }

    pub fn scenario_count(&self) -> usize {
        self.features.iter().map(|f| f.scenarios.len()).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.features
            .iter()
            .flat_map(|f| &f.scenarios)
            .filter(|s| s.failed())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_mut_creates_then_reuses_nodes() {
        let mut report = RunReport::new("run", "local", None);
        report
            .feature_mut("Search")
            .scenarios
            .push(ScenarioReport::new("first", vec![]));
        report
            .feature_mut("Search")
            .scenarios
            .push(ScenarioReport::new("second", vec![]));
        assert_eq!(report.features.len(), 1);
        assert_eq!(report.features[0].scenarios.len(), 2);
        assert_eq!(report.scenario_count(), 2);
    }

    #[test]
    fn a_failing_step_fails_the_scenario() {
        let mut scenario = ScenarioReport::new("health", vec!["API".into()]);
        scenario
            .steps
            .push(StepReport::passed("When ", "I send the request", 12));
        assert!(!scenario.failed());
        scenario.steps.push(StepReport::failed(
            "Then ",
            "I receive response with status code 200",
            3,
            "assertion failed: expected 200, got 404",
        ));
        assert!(scenario.failed());
    }

    #[test]
    fn failed_count_spans_features() {
        let mut report = RunReport::new("run", "local", None);
        let mut bad = ScenarioReport::new("bad", vec![]);
        bad.steps
            .push(StepReport::failed("Then ", "it works", 1, "it did not"));
        report.feature_mut("A").scenarios.push(bad);
        report
            .feature_mut("B")
            .scenarios
            .push(ScenarioReport::new("good", vec![]));
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.scenario_count(), 2);
    }
}
