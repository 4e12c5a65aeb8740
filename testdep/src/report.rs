// Copyright 2026 the Testdep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured run reporting.
//!
//! These types record what a [`DependencyGraph::run`](crate::DependencyGraph::run) call did. The
//! reporting context sees the same outcomes as they happen; the report is the after-the-fact
//! bookkeeping, including which tests were skipped and why.

use alloc::vec::Vec;

use crate::identity::TestId;

/// Lifecycle state of a registered test.
///
/// A test starts [`Pending`](Self::Pending) and moves to exactly one terminal state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TestState {
    /// Not yet executed or skipped.
    #[default]
    Pending,
    /// Executed and reported success.
    Passed,
    /// Executed and reported failure.
    Failed,
    /// Not executed because a prerequisite failed or was skipped.
    Skipped,
}

impl TestState {
    /// Returns `true` once the test has been executed or skipped.
    #[must_use]
    #[inline]
    pub const fn is_done(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns `true` if the test failed or was skipped.
    ///
    /// Dependents of a test in either state are skipped.
    #[must_use]
    #[inline]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed | Self::Skipped)
    }
}

/// Outcome of one test within a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestOutcome {
    /// The test that finished.
    pub test: TestId,
    /// Its terminal state.
    pub state: TestState,
    /// For skipped tests, the first failed prerequisite in declaration order.
    pub because_of: Option<TestId>,
}

/// Cheap counts for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tests executed that reported success.
    pub passed: usize,
    /// Tests executed that reported failure.
    pub failed: usize,
    /// Tests skipped because a prerequisite failed.
    pub skipped: usize,
}

impl RunSummary {
    /// Total number of tests processed.
    #[must_use]
    #[inline]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

/// Report for a graph run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Per-test outcomes in execution order.
    pub outcomes: Vec<TestOutcome>,
}

impl RunReport {
    /// Counts outcomes by state.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for outcome in &self.outcomes {
            match outcome.state {
                TestState::Passed => summary.passed += 1,
                TestState::Failed => summary.failed += 1,
                TestState::Skipped => summary.skipped += 1,
                TestState::Pending => {}
            }
        }
        summary
    }

    /// Returns `true` if nothing failed or was skipped.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| !o.state.is_failed())
    }

    /// Returns the outcome recorded for `test`, if it was processed in this run.
    #[must_use]
    pub fn outcome_of(&self, test: TestId) -> Option<&TestOutcome> {
        self.outcomes.iter().find(|o| o.test == test)
    }

    /// Returns the tests in the order they were processed.
    pub fn order(&self) -> impl Iterator<Item = TestId> + '_ {
        self.outcomes.iter().map(|o| o.test)
    }
}
