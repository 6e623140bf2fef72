use indexmap::IndexMap;

use crate::events::{StepCategory, TestCompletion, TestStatus};

/// Project label used when the runner supplies none
pub const UNKNOWN_PROJECT: &str = "unknown";

/// Recorded outcome for one (suite, test, project) leaf
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRecord {
    pub status: TestStatus,
    pub duration_ms: u64,
    /// Titles of the named test steps, in execution order
    pub steps: Vec<String>,
    pub error: Option<String>,
}

/// project name -> outcome
pub type ProjectOutcomes = IndexMap<String, OutcomeRecord>;
/// test title -> per-project outcomes
pub type TestOutcomes = IndexMap<String, ProjectOutcomes>;
/// suite name -> per-test outcomes, insertion ordered at every level
pub type AggregationTree = IndexMap<String, TestOutcomes>;

/// Collects completion events for a single test run.
///
/// One aggregator covers exactly one run; the tree it builds is read-only
/// once handed to rendering.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    tree: AggregationTree,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completion event into the tree.
    ///
    /// Intermediate levels are created on first reference. A repeated
    /// (suite, test, project) triple silently overwrites the earlier
    /// record: the last completion wins, reruns included. Identifier
    /// strings are stored as-is, the runner is trusted to supply them.
    pub fn record(&mut self, completion: TestCompletion) {
        let TestCompletion {
            suite,
            title,
            project,
            status,
            duration_ms,
            steps,
            error,
        } = completion;

        let project = project.unwrap_or_else(|| UNKNOWN_PROJECT.to_string());
        let steps = steps
            .into_iter()
            .filter(|step| step.category == StepCategory::TestStep)
            .map(|step| step.title)
            .collect();

        let record = OutcomeRecord {
            status,
            duration_ms,
            steps,
            error: error.map(|e| e.message).filter(|m| !m.is_empty()),
        };

        self.tree
            .entry(suite)
            .or_default()
            .entry(title)
            .or_default()
            .insert(project, record);
    }

    pub fn tree(&self) -> &AggregationTree {
        &self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of recorded leaf outcomes
    pub fn outcome_count(&self) -> usize {
        self.tree
            .values()
            .flat_map(|tests| tests.values())
            .map(|projects| projects.len())
            .sum()
    }
}
