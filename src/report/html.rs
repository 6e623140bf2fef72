use crate::aggregator::AggregationTree;
use crate::events::{RunSummary, TestStatus};
use crate::utils::config::MetaPair;

/// Render the run report as a Confluence storage-format fragment.
///
/// Returns `None` when no run summary exists, meaning run end was never
/// reached and there is nothing to publish. Output is a pure function of
/// the inputs: rows follow the arrival order of completion events, never
/// a sort order.
pub fn render(
    summary: Option<&RunSummary>,
    tree: &AggregationTree,
    metadata: &[MetaPair],
) -> Option<String> {
    let Some(summary) = summary else {
        log::warn!("no run summary recorded, nothing to render");
        return None;
    };

    let mut html = format!(
        "<p><strong>Status:</strong> {}</p><p><strong>Duration:</strong> {} sec.</p>",
        summary.status.as_str(),
        format_seconds(summary.duration_ms),
    );

    for pair in metadata {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>",
            html_escape(&pair.key),
            html_escape(&pair.value)
        ));
    }

    html.push_str(
        "<table><thead><tr><th>Suite</th><th>Test</th><th>Project</th>\
         <th>Status</th><th>Duration</th><th>Steps</th></tr></thead><tbody>",
    );

    for (suite, tests) in tree {
        for (test, projects) in tests {
            for (project, record) in projects {
                // anything that is not a pass renders as a failure,
                // skipped and timed-out included
                let glyph = if record.status == TestStatus::Passed {
                    "✅"
                } else {
                    "❌"
                };
                let steps: String = record
                    .steps
                    .iter()
                    .map(|step| format!("<h6>{}</h6>", html_escape(step)))
                    .collect();

                html.push_str(&format!(
                    "<tr><td><h6>{}</h6></td><td><h6>{}</h6></td><td><h6>{}</h6></td>\
                     <td><h6>{}</h6></td><td><h6>{} sec.</h6></td><td>{}</td></tr>",
                    html_escape(suite),
                    html_escape(test),
                    html_escape(project),
                    glyph,
                    format_seconds(record.duration_ms),
                    steps,
                ));

                if let Some(error) = record.error.as_deref().filter(|e| !e.is_empty()) {
                    html.push_str(&format!(
                        r#"<tr><td colspan="6"><h6 style="color: red;">{}</h6></td></tr>"#,
                        html_escape(error)
                    ));
                }
            }
        }
    }

    html.push_str("</tbody></table>");
    Some(html)
}

fn format_seconds(ms: u64) -> String {
    format!("{:.1}", ms as f64 / 1000.0)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::ResultAggregator;
    use crate::events::{RunStatus, StepCategory, StepEvent, TestCompletion, TestError};
    use chrono::{TimeZone, Utc};

    fn summary(status: RunStatus, duration_ms: u64) -> RunSummary {
        RunSummary {
            status,
            started_at: Utc.with_ymd_and_hms(2024, 1, 15, 15, 45, 0).unwrap(),
            duration_ms,
        }
    }

    fn completion(status: TestStatus) -> TestCompletion {
        TestCompletion {
            suite: "Login".to_string(),
            title: "valid user".to_string(),
            project: Some("chromium".to_string()),
            status,
            duration_ms: 1500,
            steps: vec![
                StepEvent::new(StepCategory::TestStep, "open page"),
                StepEvent::new(StepCategory::TestStep, "submit form"),
            ],
            error: None,
        }
    }

    #[test]
    fn renders_header_even_for_empty_run() {
        let tree = AggregationTree::new();
        let html = render(Some(&summary(RunStatus::Passed, 1500)), &tree, &[]).unwrap();

        assert!(html.contains("<p><strong>Status:</strong> passed</p>"));
        assert!(html.contains("<p><strong>Duration:</strong> 1.5 sec.</p>"));
        assert!(html.contains("<tbody></tbody>"));
    }

    #[test]
    fn returns_none_without_run_summary() {
        let tree = AggregationTree::new();
        assert!(render(None, &tree, &[]).is_none());
    }

    #[test]
    fn renders_passed_outcome_with_steps() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(completion(TestStatus::Passed));

        let html = render(
            Some(&summary(RunStatus::Passed, 1500)),
            aggregator.tree(),
            &[],
        )
        .unwrap();

        assert!(html.contains("<h6>Login</h6>"));
        assert!(html.contains("<h6>valid user</h6>"));
        assert!(html.contains("<h6>chromium</h6>"));
        assert!(html.contains("✅"));
        assert!(html.contains("<h6>1.5 sec.</h6>"));
        assert!(html.contains("<h6>open page</h6><h6>submit form</h6>"));
        assert!(!html.contains("color: red"));
    }

    #[test]
    fn error_row_follows_failed_outcome() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(completion(TestStatus::Passed));
        let mut rerun = completion(TestStatus::Failed);
        rerun.error = Some(TestError {
            message: "Timeout".to_string(),
        });
        aggregator.record(rerun);

        let html = render(
            Some(&summary(RunStatus::Failed, 1500)),
            aggregator.tree(),
            &[],
        )
        .unwrap();

        assert!(html.contains("❌"));
        assert!(!html.contains("✅"));
        let row = html.find("<h6>chromium</h6>").unwrap();
        let error_row = html
            .find(r#"<tr><td colspan="6"><h6 style="color: red;">Timeout</h6></td></tr>"#)
            .unwrap();
        assert!(error_row > row);
        assert_eq!(html.matches("color: red").count(), 1);
    }

    #[test]
    fn non_passed_statuses_all_render_the_failure_glyph() {
        for status in [
            TestStatus::Failed,
            TestStatus::Skipped,
            TestStatus::TimedOut,
            TestStatus::Interrupted,
        ] {
            let mut aggregator = ResultAggregator::new();
            aggregator.record(completion(status));
            let html = render(
                Some(&summary(RunStatus::Failed, 1500)),
                aggregator.tree(),
                &[],
            )
            .unwrap();
            assert!(html.contains("❌"), "{:?} should render as failure", status);
        }
    }

    #[test]
    fn renders_metadata_pairs_in_supplied_order() {
        let tree = AggregationTree::new();
        let metadata = vec![
            MetaPair::new("Branch", "main"),
            MetaPair::new("Commit", "abc123"),
        ];
        let html = render(Some(&summary(RunStatus::Passed, 1500)), &tree, &metadata).unwrap();

        let branch = html.find("<p><strong>Branch:</strong> main</p>").unwrap();
        let commit = html.find("<p><strong>Commit:</strong> abc123</p>").unwrap();
        assert!(branch < commit);
    }

    #[test]
    fn escapes_runner_supplied_markup() {
        let mut aggregator = ResultAggregator::new();
        let mut event = completion(TestStatus::Failed);
        event.suite = "<Login & Co>".to_string();
        event.error = Some(TestError {
            message: "expected \"a\" < \"b\"".to_string(),
        });
        aggregator.record(event);

        let html = render(
            Some(&summary(RunStatus::Failed, 1500)),
            aggregator.tree(),
            &[],
        )
        .unwrap();

        assert!(html.contains("&lt;Login &amp; Co&gt;"));
        assert!(html.contains("expected &quot;a&quot; &lt; &quot;b&quot;"));
    }

    #[test]
    fn output_is_deterministic() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(completion(TestStatus::Passed));
        let metadata = vec![MetaPair::new("Branch", "main")];
        let run = summary(RunStatus::Passed, 1500);

        let first = render(Some(&run), aggregator.tree(), &metadata);
        let second = render(Some(&run), aggregator.tree(), &metadata);
        assert_eq!(first, second);
    }

    #[test]
    fn rounds_duration_to_one_decimal() {
        let tree = AggregationTree::new();
        let html = render(Some(&summary(RunStatus::Passed, 1234)), &tree, &[]).unwrap();
        assert!(html.contains("<p><strong>Duration:</strong> 1.2 sec.</p>"));
    }
}
