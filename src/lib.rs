//! Confluence test reporter.
//!
//! Collects per-test outcomes from a host test runner, aggregates them
//! per suite, test and project, renders an HTML summary and publishes it
//! as a page through the Confluence REST v2 API at the end of the run.

pub mod aggregator;
pub mod events;
pub mod publish;
pub mod report;
pub mod reporter;
pub mod utils;

// Re-export common items
pub use aggregator::{AggregationTree, OutcomeRecord, ResultAggregator};
pub use events::{
    RunStatus, RunSummary, StepCategory, StepEvent, TestCompletion, TestError, TestStatus,
};
pub use publish::{ConfluenceClient, PageTransport};
pub use reporter::ConfluenceReporter;
pub use utils::config::{MetaPair, ReporterConfig};
