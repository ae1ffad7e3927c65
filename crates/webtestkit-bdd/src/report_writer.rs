// HtmlReportWriter - cucumber lifecycle events into the HTML report
//
// Wrapped in writer::Normalize by the runner, so events arrive ordered
// and one scenario at a time; a single current-scenario slot is enough.
// Report and artifact writing is best-effort throughout: every failure
// here is logged and swallowed, never surfaced into a scenario.

use crate::run_context::RunContext;
use cucumber::event as ev;
use cucumber::{Event, World, Writer, cli, parser, writer};
use std::fmt::Debug;
use std::time::Instant;
use tracing::{error, info, warn};
use webtestkit::browser::BrowserSession;
use webtestkit::report::{ReportPaths, RunReport, ScenarioReport, StepReport};

/// Access the report writer needs into a scenario's world: the browser
/// session, when one is active, for failure screenshots and log capture.
pub trait BrowserWorld {
    fn browser_session(&self) -> Option<&BrowserSession>;
}

impl BrowserWorld for crate::world::HarnessWorld {
    fn browser_session(&self) -> Option<&BrowserSession> {
        self.browser.as_ref()
    }
}

/// Collects scenario/step results and writes the HTML report at run end.
pub struct HtmlReportWriter {
    context: &'static RunContext,
    enabled: bool,
    capture_browser_logs: bool,
    paths: ReportPaths,
    report: RunReport,
    current_feature: Option<String>,
    current_scenario: Option<ScenarioReport>,
    step_timer: Option<Instant>,
    passed: usize,
    failed: usize,
    skipped: usize,
    parsing_errors: usize,
    hook_errors: usize,
}

impl HtmlReportWriter {
    pub fn new(context: &'static RunContext) -> Self {
        let config = &context.config;
        HtmlReportWriter {
            context,
            enabled: config.report_mode,
            capture_browser_logs: config.capture_browser_logs,
            paths: context.report_paths.clone(),
            report: RunReport::new(
                "Test Automation Report",
                config.build_label(),
                config.current_env.clone(),
            ),
            current_feature: None,
            current_scenario: None,
            step_timer: None,
            passed: 0,
            failed: 0,
            skipped: 0,
            parsing_errors: 0,
            hook_errors: 0,
        }
    }

    async fn handle_feature<W: BrowserWorld>(
        &mut self,
        feature: &cucumber::gherkin::Feature,
        event: ev::Feature<W>,
    ) {
        match event {
            ev::Feature::Started => info!(feature = %feature.name, "feature started"),
            ev::Feature::Scenario(scenario, retryable) => {
                self.handle_scenario(feature, &scenario, retryable.event)
                    .await;
            }
            _ => {}
        }
    }

    async fn handle_scenario<W: BrowserWorld>(
        &mut self,
        feature: &cucumber::gherkin::Feature,
        scenario: &cucumber::gherkin::Scenario,
        event: ev::Scenario<W>,
    ) {
        match event {
            ev::Scenario::Started => {
                info!(scenario = %scenario.name, "scenario started");
                self.current_feature = Some(feature.name.clone());
                self.current_scenario = Some(ScenarioReport::new(
                    scenario.name.clone(),
                    crate::hooks::effective_tags(feature, scenario),
                ));
            }
            ev::Scenario::Hook(hook_type, ev::Hook::Failed(_, info)) => {
                self.hook_errors += 1;
                let message = panic_message(&info);
                error!(scenario = %scenario.name, ?hook_type, %message, "hook failed");
                if let Some(current) = self.current_scenario.as_mut() {
                    current.steps.push(StepReport::failed(
                        "Hook",
                        format!("{hook_type:?} hook"),
                        0,
                        message,
                    ));
                }
            }
            ev::Scenario::Background(step, step_event)
            | ev::Scenario::Step(step, step_event) => {
                self.handle_step(scenario, &step, step_event).await;
            }
            ev::Scenario::Finished => {
                self.finish_scenario();
                info!(scenario = %scenario.name, "scenario finished");
            }
            _ => {}
        }
    }

    async fn handle_step<W: BrowserWorld>(
        &mut self,
        scenario: &cucumber::gherkin::Scenario,
        step: &cucumber::gherkin::Step,
        event: ev::Step<W>,
    ) {
        match event {
            ev::Step::Started => {
                self.step_timer = Some(Instant::now());
            }
            ev::Step::Passed(_, _) => {
                self.passed += 1;
                let mut entry =
                    StepReport::passed(step.keyword.clone(), step.value.clone(), self.elapsed_ms());
                entry.table = step.table.as_ref().map(|table| table.rows.clone());
                self.push_step(entry);
            }
            ev::Step::Skipped => {
                self.skipped += 1;
                warn!(step = %step.value, "step skipped (no matching definition?)");
                self.push_step(StepReport::skipped(step.keyword.clone(), step.value.clone()));
            }
            ev::Step::Failed(_, _, world, err) => {
                self.failed += 1;
                let message = err.to_string();
                error!(scenario = %scenario.name, step = %step.value, %message, "step failed");
                let mut entry = StepReport::failed(
                    step.keyword.clone(),
                    step.value.clone(),
                    self.elapsed_ms(),
                    message,
                );
                entry.table = step.table.as_ref().map(|table| table.rows.clone());
                if self.enabled && self.scenario_is_ui() {
                    self.attach_failure_artifacts(&mut entry, &scenario.name, world.as_deref())
                        .await;
                }
                self.push_step(entry);
            }
            _ => {}
        }
    }

    /// Best-effort screenshot and browser-log capture on a failed step.
    /// A missing session leaves the entry without an image and only logs.
    async fn attach_failure_artifacts<W: BrowserWorld>(
        &self,
        entry: &mut StepReport,
        scenario_name: &str,
        world: Option<&W>,
    ) {
        let Some(session) = world.and_then(BrowserWorld::browser_session) else {
            warn!(
                scenario = scenario_name,
                "no active browser session; the report entry will have no screenshot"
            );
            return;
        };
        if session.is_closed() {
            warn!(
                scenario = scenario_name,
                "browser session already closed; the report entry will have no screenshot"
            );
            return;
        }

        let (path, relative) = self.paths.screenshot_file(scenario_name);
        let written = async {
            let bytes = session.screenshot().await?;
            self.paths.ensure_dirs()?;
            std::fs::write(&path, bytes)?;
            Ok::<_, webtestkit::Error>(())
        }
        .await;
        match written {
            Ok(()) => entry.screenshot = Some(relative),
            Err(err) => warn!(scenario = scenario_name, %err, "could not capture failure screenshot"),
        }

        if self.capture_browser_logs {
            let logs = session.console_logs();
            let (path, relative) = self.paths.log_file(scenario_name);
            let written = self
                .paths
                .ensure_dirs()
                .and_then(|()| Ok(std::fs::write(&path, logs.join("\n"))?));
            match written {
                Ok(()) => entry.browser_log = Some(relative),
                Err(err) => warn!(scenario = scenario_name, %err, "could not save browser logs"),
            }
        }
    }

    fn scenario_is_ui(&self) -> bool {
        self.current_scenario
            .as_ref()
            .is_some_and(|scenario| scenario.tags.iter().any(|tag| tag == crate::hooks::UI_TAG))
    }

    fn elapsed_ms(&self) -> u64 {
        self.step_timer
            .map(|started| started.elapsed().as_millis() as u64)
            .unwrap_or_default()
    }

    fn push_step(&mut self, entry: StepReport) {
        if let Some(scenario) = self.current_scenario.as_mut() {
            scenario.steps.push(entry);
        }
    }

    /// Moves the completed scenario into the report, attaching any
    /// end-of-scenario screenshot the teardown hook captured.
    fn finish_scenario(&mut self) {
        let Some(mut scenario) = self.current_scenario.take() else {
            return;
        };

        if let Some(relative) = self.context.pending_screenshots.lock().remove(&scenario.name) {
            if let Some(step) = scenario
                .steps
                .iter_mut()
                .rev()
                .find(|step| step.screenshot.is_none())
            {
                step.screenshot = Some(relative);
            }
        }

        let feature = self.current_feature.clone().unwrap_or_default();
        self.report.feature_mut(&feature).scenarios.push(scenario);
    }

    fn finish_run(&mut self) {
        self.report.finish();
        if !self.enabled {
            info!("HTML report disabled (EXTENT_REPORT_MODE=false)");
            return;
        }
        match self.paths.flush(&self.report) {
            Ok(path) => info!(report = %path.display(), "HTML report written"),
            Err(err) => warn!(%err, "could not write the HTML report"),
        }
    }
}

impl<W: World + BrowserWorld + Debug> Writer<W> for HtmlReportWriter {
    type Cli = cli::Empty;

    async fn handle_event(
        &mut self,
        event: parser::Result<Event<ev::Cucumber<W>>>,
        _cli: &Self::Cli,
    ) {
        match event.map(|event| event.value) {
            Err(err) => {
                self.parsing_errors += 1;
                error!(%err, "feature parsing error");
            }
            Ok(ev::Cucumber::Feature(feature, event)) => {
                self.handle_feature(&feature, event).await;
            }
            Ok(ev::Cucumber::Finished) => self.finish_run(),
            Ok(_) => {}
        }
    }
}

impl<W: World + BrowserWorld + Debug> writer::Stats<W> for HtmlReportWriter {
    fn passed_steps(&self) -> usize {
        self.passed
    }

    fn skipped_steps(&self) -> usize {
        self.skipped
    }

    fn failed_steps(&self) -> usize {
        self.failed
    }

    fn retried_steps(&self) -> usize {
        0
    }

    fn parsing_errors(&self) -> usize {
        self.parsing_errors
    }

    fn hook_errors(&self) -> usize {
        self.hook_errors
    }
}

impl writer::NonTransforming for HtmlReportWriter {}

fn panic_message(info: &ev::Info) -> String {
    if let Some(message) = info.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = info.downcast_ref::<&str>() {
        (*message).to_owned()
    } else {
        "hook panicked".to_owned()
    }
}

impl Debug for HtmlReportWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlReportWriter")
            .field("enabled", &self.enabled)
            .field("passed", &self.passed)
            .field("failed", &self.failed)
            .field("skipped", &self.skipped)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_context;
    use webtestkit::config::HarnessConfig;

    #[derive(Debug)]
    struct NoBrowser;

    impl BrowserWorld for NoBrowser {
        fn browser_session(&self) -> Option<&BrowserSession> {
            None
        }
    }

    #[tokio::test]
    async fn missing_browser_session_leaves_the_entry_without_a_screenshot() {
        let writer = HtmlReportWriter::new(run_context::init(HarnessConfig::default()));
        let mut entry = StepReport::failed("Then ", "the page shows the result", 5, "boom");

        writer
            .attach_failure_artifacts(&mut entry, "Some scenario", Some(&NoBrowser))
            .await;

        // Capture is best-effort: no image, no error, nothing written.
        assert!(entry.screenshot.is_none());
        assert!(entry.browser_log.is_none());

        writer
            .attach_failure_artifacts::<NoBrowser>(&mut entry, "Some scenario", None)
            .await;
        assert!(entry.screenshot.is_none());
    }
}
