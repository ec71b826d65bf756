//! Per-step outcomes, per-repository results and the aggregate batch report

use std::time::Duration;

use crate::core::discovery::RepoRef;

/// The workflow steps the engine can run against one repository.
///
/// Whether a step is fatal is declared here, not inferred from control
/// flow: a failing fatal step marks the repository failed and aborts the
/// remaining fatal steps, while informational steps never affect the
/// verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    DetectBranch,
    Pull,
    NormalizeIgnore,
    PurgeJunk,
    CommitTool,
    StageAndCommit,
    Push,
}

impl StepKind {
    /// Returns the step name used in reports and rendered output
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::DetectBranch => "detect-branch",
            StepKind::Pull => "pull",
            StepKind::NormalizeIgnore => "normalize-ignore",
            StepKind::PurgeJunk => "purge-junk",
            StepKind::CommitTool => "commit-tool",
            StepKind::StageAndCommit => "stage-and-commit",
            StepKind::Push => "push",
        }
    }

    /// Returns true when a failure of this step fails the whole repository
    pub fn is_fatal(&self) -> bool {
        match self {
            StepKind::DetectBranch
            | StepKind::Pull
            | StepKind::CommitTool
            | StepKind::StageAndCommit
            | StepKind::Push => true,
            StepKind::NormalizeIgnore | StepKind::PurgeJunk => false,
        }
    }
}

/// Result of one workflow step against one repository
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub kind: StepKind,
    pub succeeded: bool,
    /// Human-readable detail: branch name, commit summary, error text, ...
    pub message: String,
}

impl StepOutcome {
    /// Creates a successful outcome
    pub fn ok(kind: StepKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            succeeded: true,
            message: message.into(),
        }
    }

    /// Creates a failed outcome
    pub fn failed(kind: StepKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            succeeded: false,
            message: message.into(),
        }
    }

    /// Returns the emoji symbol for this outcome
    pub fn symbol(&self) -> &str {
        if self.succeeded {
            "🟢"
        } else if self.kind.is_fatal() {
            "🔴"
        } else {
            "🟠"
        }
    }
}

/// Outcome of processing one repository: the ordered step outcomes, the
/// overall verdict and the elapsed wall-clock time
#[derive(Clone, Debug)]
pub struct RepositoryResult {
    pub repo: RepoRef,
    outcomes: Vec<StepOutcome>,
    overall_succeeded: bool,
    elapsed_seconds: f64,
}

impl RepositoryResult {
    pub fn new(repo: RepoRef) -> Self {
        Self {
            repo,
            outcomes: Vec::new(),
            overall_succeeded: true,
            elapsed_seconds: 0.0,
        }
    }

    /// Appends a step outcome; a failed fatal step flips the verdict
    pub fn record(&mut self, outcome: StepOutcome) {
        if !outcome.succeeded && outcome.kind.is_fatal() {
            self.overall_succeeded = false;
        }
        self.outcomes.push(outcome);
    }

    /// Seals the result with the measured processing time
    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed_seconds = elapsed.as_secs_f64();
    }

    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    pub fn overall_succeeded(&self) -> bool {
        self.overall_succeeded
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Returns the outcome of the given step, if it ran
    pub fn outcome_of(&self, kind: StepKind) -> Option<&StepOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}

/// Aggregate of one batch run, in processing order
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    results: Vec<RepositoryResult>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: RepositoryResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[RepositoryResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.overall_succeeded())
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.total() - self.success_count()
    }
}
