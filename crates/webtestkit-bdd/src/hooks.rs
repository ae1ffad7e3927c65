// Scenario lifecycle hooks
//
// Setup and teardown for the tag-gated resources: `@UI` scenarios get a
// browser session selected by their `@Browser:<Name>` tag, `@API`
// scenarios get a request context bound to BASE_API_URL. Teardown runs
// whether the scenario passed, failed or panicked, and both teardown
// paths are idempotent.

use crate::run_context;
use crate::world::HarnessWorld;
use cucumber::event::ScenarioFinished;
use cucumber::gherkin::{Feature, Rule, Scenario};
use futures::FutureExt as _;
use futures::future::LocalBoxFuture;
use tracing::{debug, info, warn};
use webtestkit::api::RestClient;
use webtestkit::browser::BrowserFactory;

/// Tag that routes a scenario through the browser hooks.
pub const UI_TAG: &str = "UI";
/// Tag that routes a scenario through the REST hooks.
pub const API_TAG: &str = "API";

/// Feature tags apply to every scenario in the feature.
pub fn effective_tags(feature: &Feature, scenario: &Scenario) -> Vec<String> {
    merge_tags(&feature.tags, &scenario.tags)
}

fn merge_tags(feature_tags: &[String], scenario_tags: &[String]) -> Vec<String> {
    feature_tags
        .iter()
        .chain(scenario_tags.iter())
        .cloned()
        .collect()
}

fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t == tag)
}

/// Before-scenario hook: initializes the tag-gated resources.
///
/// A failure here panics, which cucumber records as a scenario failure -
/// core setup problems must fail the scenario, not be papered over.
pub fn scenario_setup<'a>(
    feature: &'a Feature,
    _rule: Option<&'a Rule>,
    scenario: &'a Scenario,
    world: &'a mut HarnessWorld,
) -> LocalBoxFuture<'a, ()> {
    async move {
        let tags = effective_tags(feature, scenario);

        if has_tag(&tags, UI_TAG) {
            let session = BrowserFactory::launch_for_tags(&tags, &world.config)
                .await
                .unwrap_or_else(|err| panic!("could not initialize browser: {err}"));
            match session.version().await {
                Ok(version) => info!(browser = session.name(), %version, "browser launched"),
                Err(_) => info!(browser = session.name(), "browser launched"),
            }
            world.browser = Some(session);
        }

        if has_tag(&tags, API_TAG) {
            let base_url = world
                .config
                .require_base_api_url()
                .unwrap_or_else(|err| panic!("{err}"))
                .clone();
            world.rest = Some(
                RestClient::new(base_url)
                    .unwrap_or_else(|err| panic!("could not initialize request context: {err}")),
            );
            debug!("request context initialized");
        }
    }
    .boxed_local()
}

/// After-scenario hook: releases the scenario's resources and, when
/// configured, captures the end-of-scenario screenshot for the report.
pub fn scenario_teardown<'a>(
    _feature: &'a Feature,
    _rule: Option<&'a Rule>,
    scenario: &'a Scenario,
    _finished: &'a ScenarioFinished,
    world: Option<&'a mut HarnessWorld>,
) -> LocalBoxFuture<'a, ()> {
    async move {
        let Some(world) = world else {
            return;
        };

        if let Some(mut session) = world.browser.take() {
            if world.config.screenshot_on_each_step {
                capture_final_screenshot(&session, &scenario.name).await;
            }
            let browser = session.name();
            debug!(%browser, "closing browser");
            if let Err(err) = session.close().await {
                warn!(%browser, %err, "browser did not shut down cleanly");
            }
        }

        if let Some(mut rest) = world.rest.take() {
            rest.dispose();
            debug!("request context disposed");
        }
    }
    .boxed_local()
}

/// Best-effort end-of-scenario screenshot; failures are logged, never
/// propagated.
async fn capture_final_screenshot(
    session: &webtestkit::browser::BrowserSession,
    scenario_name: &str,
) {
    let context = run_context::get();
    let (path, relative) = context.report_paths.screenshot_file(scenario_name);

    let result = async {
        let bytes = session.screenshot().await?;
        context.report_paths.ensure_dirs()?;
        std::fs::write(&path, bytes)?;
        Ok::<_, webtestkit::Error>(())
    }
    .await;

    match result {
        Ok(()) => {
            context
                .pending_screenshots
                .lock()
                .insert(scenario_name.to_owned(), relative);
        }
        Err(err) => warn!(scenario = scenario_name, %err, "could not capture scenario screenshot"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn feature_tags_apply_to_every_scenario() {
        let merged = merge_tags(&tags(&["UI", "Browser:Chromium"]), &tags(&["smoke"]));
        assert_eq!(merged, ["UI", "Browser:Chromium", "smoke"]);
        assert!(has_tag(&merged, UI_TAG));
        assert!(!has_tag(&merged, API_TAG));
    }

    #[test]
    fn scenario_tags_alone_are_enough() {
        let merged = merge_tags(&[], &tags(&["API"]));
        assert!(has_tag(&merged, API_TAG));
    }
}
