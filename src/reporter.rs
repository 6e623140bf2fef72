use colored::Colorize;

use crate::aggregator::{AggregationTree, ResultAggregator};
use crate::events::{RunSummary, TestCompletion};
use crate::publish::{ConfluenceClient, CreatePageRequest, PageTransport};
use crate::report;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::config::ReporterConfig;

/// Collects outcomes for one test run and publishes the rendered report as
/// a Confluence page when the run ends.
///
/// One instance covers exactly one run; construct a fresh reporter per run.
/// Reporting is best-effort throughout: every failure ends in a console
/// diagnostic and the run's own verdict is never affected.
pub struct ConfluenceReporter {
    config: ReporterConfig,
    aggregator: ResultAggregator,
    summary: Option<RunSummary>,
    transport: Box<dyn PageTransport>,
    clock: Box<dyn Clock>,
}

impl ConfluenceReporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self::with_parts(
            config,
            Box::new(ConfluenceClient::new()),
            Box::new(SystemClock),
        )
    }

    /// Build a reporter with an explicit transport and clock
    pub fn with_parts(
        config: ReporterConfig,
        transport: Box<dyn PageTransport>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config,
            aggregator: ResultAggregator::new(),
            summary: None,
            transport,
            clock,
        }
    }

    /// Fold one completed test into the run results.
    /// Safe to call in any order across logically parallel workers.
    pub fn on_test_end(&mut self, completion: TestCompletion) {
        self.aggregator.record(completion);
    }

    /// Accumulated results so far
    pub fn results(&self) -> &AggregationTree {
        self.aggregator.tree()
    }

    /// Finish the run: render the report and create the Confluence page
    pub async fn on_run_end(&mut self, summary: RunSummary) {
        if !self.config.is_complete() {
            println!("{} Missing Confluence configuration", "✗".red());
            return;
        }

        self.summary = Some(summary);

        if !self.config.generate_page {
            println!("{} Skipping Confluence page generation", "○".yellow());
            return;
        }

        log::debug!(
            "rendering report for {} recorded outcomes",
            self.aggregator.outcome_count()
        );

        let title = self.resolve_title();
        let Some(body) = report::render(
            self.summary.as_ref(),
            self.aggregator.tree(),
            &self.config.metadata,
        ) else {
            println!("{} Failed to generate test report", "✗".red());
            return;
        };

        self.publish(&title, body).await;
    }

    /// Create one page with the given title and storage-format body.
    ///
    /// The configuration is re-checked here since `publish` can also be
    /// driven directly by a host, not only through [`Self::on_run_end`].
    pub async fn publish(&self, title: &str, body: String) {
        if !self.config.is_complete() {
            println!("{} Missing Confluence configuration", "✗".red());
            return;
        }

        let request = CreatePageRequest::new(&self.config, title, body);
        match self.transport.create_page(&self.config, &request).await {
            Ok(response) => {
                println!(
                    "{} Confluence page created: {}",
                    "✓".green(),
                    response.page_url()
                );
            }
            Err(err) => {
                println!("{} Failed to create Confluence page: {:#}", "✗".red(), err);
            }
        }
    }

    fn resolve_title(&self) -> String {
        match self.config.page_title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self
                .clock
                .now()
                .format("%-m/%-d/%y, %-I:%M %p")
                .to_string(),
        }
    }
}
