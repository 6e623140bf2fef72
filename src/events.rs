use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal status of a single test execution
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    Passed,
    Failed,
    TimedOut,
    Skipped,
    Interrupted,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::TimedOut => "timedOut",
            TestStatus::Skipped => "skipped",
            TestStatus::Interrupted => "interrupted",
        }
    }
}

/// Category tag carried by every sub-event the runner attaches to a test.
///
/// Only `TestStep` entries end up in the report; hooks, fixtures and
/// assertion bookkeeping are dropped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepCategory {
    Hook,
    Fixture,
    #[serde(rename = "test.step")]
    TestStep,
    Expect,
    #[serde(other)]
    Other,
}

/// One named sub-event of a test
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepEvent {
    pub category: StepCategory,
    pub title: String,
}

impl StepEvent {
    pub fn new(category: StepCategory, title: &str) -> Self {
        Self {
            category,
            title: title.to_string(),
        }
    }
}

/// Error attached to a failed test
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestError {
    pub message: String,
}

/// Completion event for one test execution, emitted by the host runner
/// once per (suite, test, project) run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestCompletion {
    /// Title of the enclosing suite (file or describe-block)
    pub suite: String,
    /// Test title within the suite
    pub title: String,
    /// Execution environment label, e.g. a browser name
    pub project: Option<String>,
    pub status: TestStatus,
    pub duration_ms: u64,
    #[serde(default)]
    pub steps: Vec<StepEvent>,
    pub error: Option<TestError>,
}

/// Overall verdict of a finished run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    Passed,
    Failed,
    TimedOut,
    Interrupted,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Passed => "passed",
            RunStatus::Failed => "failed",
            RunStatus::TimedOut => "timedOut",
            RunStatus::Interrupted => "interrupted",
        }
    }
}

/// Run-level summary supplied by the runner at run end
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}
