// HTML rendering of a RunReport
//
// One self-contained file: inline CSS, no external assets beyond the
// screenshot/log files linked by relative path.

use crate::report::model::{RunReport, ScenarioReport, StepReport, StepStatus};
use std::fmt::Write;

/// Escapes text for embedding in HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "\
body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; margin: 2rem; color: #1c1e21; }\n\
h1 { margin-bottom: 0; }\n\
.meta { color: #666; margin-bottom: 1.5rem; }\n\
.summary { margin: 1rem 0; }\n\
.summary .failed { color: #c0392b; font-weight: 600; }\n\
.summary .passed { color: #27ae60; font-weight: 600; }\n\
.feature { margin-top: 2rem; }\n\
.scenario { border: 1px solid #ddd; border-radius: 6px; margin: 1rem 0; padding: 0.75rem 1rem; }\n\
.scenario.failed { border-color: #c0392b; }\n\
.scenario h3 { margin: 0 0 0.5rem 0; }\n\
.tags { color: #888; font-size: 0.85rem; }\n\
.step { padding: 0.25rem 0; border-bottom: 1px solid #f0f0f0; }\n\
.step .keyword { font-weight: 700; }\n\
.step.failed { background: #fdf0ef; }\n\
.step.skipped { color: #999; }\n\
.duration { float: right; color: #888; font-size: 0.85rem; }\n\
.error { color: #c0392b; white-space: pre-wrap; margin: 0.25rem 0 0.25rem 1.5rem; }\n\
.attachments { margin-left: 1.5rem; font-size: 0.85rem; }\n\
table.data { border-collapse: collapse; margin: 0.25rem 0 0.25rem 1.5rem; }\n\
table.data td, table.data th { border: 1px solid #ccc; padding: 0.15rem 0.5rem; }\n";

/// Renders the report as a complete HTML document.
pub fn render(report: &RunReport) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n",
        title = escape(&report.title),
    );

    let _ = write!(
        html,
        "<div class=\"meta\">Build: {build}",
        build = escape(&report.build_label),
    );
    if let Some(environment) = &report.environment {
        let _ = write!(html, " &middot; Environment: {}", escape(environment));
    }
    let _ = write!(
        html,
        " &middot; Started: {}",
        report.started.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    if let Some(finished) = &report.finished {
        let _ = write!(
            html,
            " &middot; Finished: {}",
            finished.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }
    html.push_str("</div>\n");

    let failed = report.failed_count();
    let total = report.scenario_count();
    let _ = write!(
        html,
        "<div class=\"summary\"><span class=\"passed\">{} passed</span> / \
         <span class=\"failed\">{} failed</span> / {} total</div>\n",
        total - failed,
        failed,
        total,
    );

    for feature in &report.features {
        let _ = write!(
            html,
            "<div class=\"feature\">\n<h2>{}</h2>\n",
            escape(&feature.name)
        );
        for scenario in &feature.scenarios {
            render_scenario(&mut html, scenario);
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_scenario(html: &mut String, scenario: &ScenarioReport) {
    let class = if scenario.failed() {
        "scenario failed"
    } else {
        "scenario"
    };
    let _ = write!(
        html,
        "<div class=\"{class}\">\n<h3>{}</h3>\n",
        escape(&scenario.name)
    );
    if !scenario.tags.is_empty() {
        let tags: Vec<String> = scenario
            .tags
            .iter()
            .map(|tag| format!("@{}", escape(tag)))
            .collect();
        let _ = write!(html, "<div class=\"tags\">{}</div>\n", tags.join(" "));
    }
    for step in &scenario.steps {
        render_step(html, step);
    }
    html.push_str("</div>\n");
}

fn render_step(html: &mut String, step: &StepReport) {
    let class = match step.status {
        StepStatus::Passed => "step",
        StepStatus::Failed => "step failed",
        StepStatus::Skipped => "step skipped",
    };
    let _ = write!(
        html,
        "<div class=\"{class}\"><span class=\"duration\">{} ms</span>\
         <span class=\"keyword\">{}</span>{}",
        step.duration_ms,
        escape(step.keyword.trim_end()),
        escape(&format!(" {}", step.text)),
    );

    if let Some(table) = &step.table {
        html.push_str("\n<table class=\"data\">");
        for (i, row) in table.iter().enumerate() {
            let cell = if i == 0 { "th" } else { "td" };
            html.push_str("<tr>");
            for value in row {
                let _ = write!(html, "<{cell}>{}</{cell}>", escape(value));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
    }

    if let Some(error) = &step.error {
        let _ = write!(html, "\n<div class=\"error\">{}</div>", escape(error));
    }

    let mut attachments = Vec::new();
    if let Some(screenshot) = &step.screenshot {
        attachments.push(format!(
            "<a href=\"{0}\">screenshot</a>",
            escape(screenshot)
        ));
    }
    if let Some(log) = &step.browser_log {
        attachments.push(format!("<a href=\"{0}\">browser logs</a>", escape(log)));
    }
    if !attachments.is_empty() {
        let _ = write!(
            html,
            "\n<div class=\"attachments\">{}</div>",
            attachments.join(" &middot; ")
        );
    }

    html.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::{RunReport, ScenarioReport, StepReport};

    fn sample_report() -> RunReport {
        let mut report = RunReport::new("TA Report", "main_42", Some("staging".into()));
        let mut scenario =
            ScenarioReport::new("Health endpoint responds", vec!["API".into()]);
        scenario
            .steps
            .push(StepReport::passed("When ", "I send GET request to endpoint \"/health\"", 12));
        let mut failed = StepReport::failed(
            "Then ",
            "I receive response with status code 200",
            3,
            "assertion failed: expected 200, got 404",
        );
        failed.screenshot = Some("screenshots/001_Health.png".into());
        scenario.steps.push(failed);
        report.feature_mut("Service health").scenarios.push(scenario);
        report.finish();
        report
    }

    #[test]
    fn render_contains_names_statuses_and_counts() {
        let html = render(&sample_report());
        assert!(html.contains("TA Report"));
        assert!(html.contains("main_42"));
        assert!(html.contains("staging"));
        assert!(html.contains("Service health"));
        assert!(html.contains("Health endpoint responds"));
        assert!(html.contains("0 passed"));
        assert!(html.contains("1 failed"));
    }

    #[test]
    fn failure_message_and_screenshot_are_linked() {
        let html = render(&sample_report());
        assert!(html.contains("assertion failed: expected 200, got 404"));
        assert!(html.contains("href=\"screenshots/001_Health.png\""));
    }

    #[test]
    fn step_text_is_html_escaped() {
        let html = render(&sample_report());
        assert!(html.contains("I send GET request to endpoint &quot;/health&quot;"));
        assert!(!html.contains("endpoint \"/health\""));
    }

    #[test]
    fn data_tables_render_header_and_rows() {
        let mut report = RunReport::new("r", "b", None);
        let mut scenario = ScenarioReport::new("tabled", vec![]);
        let mut step = StepReport::passed("Given ", "the following users", 1);
        step.table = Some(vec![
            vec!["email".into(), "role".into()],
            vec!["a@test.com".into(), "admin".into()],
        ]);
        scenario.steps.push(step);
        report.feature_mut("F").scenarios.push(scenario);

        let html = render(&report);
        assert!(html.contains("<th>email</th>"));
        assert!(html.contains("<td>a@test.com</td>"));
    }

    #[test]
    fn escape_covers_the_five_entities() {
        assert_eq!(escape(r#"<a href="x">&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
    }
}
