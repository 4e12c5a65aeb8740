// Copyright 2026 the Testdep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency graph between tests, validation and execution.

use core::fmt;

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::context::TestContext;
use crate::identity::{TestFn, TestId, resolve};
use crate::report::{RunReport, TestOutcome, TestState};
use crate::topo;

/// Errors returned by [`DependencyGraph`] operations.
///
/// These are caller errors and can be recovered from, e.g. by fixing the declarations and
/// trying again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// A test argument was absent.
    NilFunction,
    /// The declared requirements are not acyclic.
    CyclicDependency {
        /// Tests that could not be ordered: members of a cycle and everything that (transitively)
        /// requires one. Sorted by id.
        involved: Box<[TestId]>,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NilFunction => write!(f, "test function is missing"),
            Self::CyclicDependency { involved } => {
                write!(
                    f,
                    "graph has a cyclic dependency: {} tests could not be ordered",
                    involved.len()
                )
            }
        }
    }
}

impl core::error::Error for GraphError {}

/// Broken internal invariants. These abort via `panic!` and are never returned to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InvariantViolation {
    FunctionAlreadyPresent { test: TestId },
    FunctionNotExecuted { test: TestId, prerequisite: TestId },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FunctionAlreadyPresent { test } => {
                write!(f, "internal error: {test} is already present in this graph")
            }
            Self::FunctionNotExecuted { test, prerequisite } => {
                write!(
                    f,
                    "internal error: prerequisite {prerequisite} of {test} was not executed"
                )
            }
        }
    }
}

struct Node<C: ?Sized> {
    test: TestFn<C>,
    name: Box<str>,
    // Indices into `DependencyGraph::nodes`, in declaration order, without duplicates.
    requires: Vec<usize>,
    state: TestState,
}

impl<C: ?Sized> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("test", &self.test.id())
            .field("name", &self.name)
            .field("requires", &self.requires)
            .field("state", &self.state)
            .finish()
    }
}

/// A graph of tests connected by "requires" edges.
///
/// `C` is the reporting context tests run under, usually a type implementing [`TestContext`]
/// such as [`Harness`](crate::Harness).
///
/// ## Semantics
///
/// - Tests are identified by [`TestFn::id`]. Registering the same test (or a clone of it) any
///   number of times, through any operation, refers to one node.
/// - [`require`](Self::require) adds edges; duplicate edges are stored once. There is no way to
///   remove a test or an edge.
/// - [`run`](Self::run) executes tests so that every test runs after all of its prerequisites.
///   A test whose prerequisite failed (or was itself skipped) is not executed; it is marked
///   [`TestState::Skipped`] instead.
/// - Each test is processed at most once. Calling [`run`](Self::run) again only processes tests
///   registered since the previous run; finished tests keep their outcome and still gate any
///   new dependents.
pub struct DependencyGraph<C: ?Sized> {
    index: HashMap<TestId, usize>,
    nodes: Vec<Node<C>>,
    order: Vec<usize>,
    validated: bool,
}

impl<C: ?Sized> fmt::Debug for DependencyGraph<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("nodes", &self.nodes)
            .field("order", &self.order)
            .field("validated", &self.validated)
            .finish_non_exhaustive()
    }
}

impl<C: ?Sized> Default for DependencyGraph<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> DependencyGraph<C> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            nodes: Vec::new(),
            order: Vec::new(),
            validated: false,
        }
    }

    /// Registers `test` without adding any requirement, and returns its id.
    pub fn add<'a>(
        &mut self,
        test: impl Into<Option<&'a TestFn<C>>>,
    ) -> Result<TestId, GraphError>
    where
        C: 'a,
    {
        let test = resolve(test.into())?;
        let _ = self.node_for(test);
        Ok(test.id())
    }

    /// Declares that `test` requires every test in `prerequisites`.
    ///
    /// Tests not yet in the graph are added. Prerequisites `test` already requires are ignored.
    ///
    /// Fails with [`GraphError::NilFunction`] if `test` or any prerequisite is `None`; in that
    /// case the graph is left unchanged.
    ///
    /// If `test` has already been executed or skipped by a previous [`run`](Self::run), no
    /// edges are added: its outcome is final and cannot be gated retroactively. The
    /// prerequisites are still registered as tests.
    pub fn require<'a, P>(
        &mut self,
        test: impl Into<Option<&'a TestFn<C>>>,
        prerequisites: P,
    ) -> Result<(), GraphError>
    where
        C: 'a,
        P: IntoIterator,
        P::Item: Into<Option<&'a TestFn<C>>>,
    {
        let test = resolve(test.into())?;
        let prerequisites = prerequisites
            .into_iter()
            .map(|p| resolve(p.into()))
            .collect::<Result<Vec<_>, _>>()?;

        let node = self.node_for(test);
        let finished = self.nodes[node].state.is_done();
        if finished {
            tracing::warn!(
                test = test.id().as_u64(),
                name = &*self.nodes[node].name,
                "ignoring requirements declared on a finished test"
            );
        }

        for prerequisite in prerequisites {
            let req = self.node_for(prerequisite);
            if finished {
                continue;
            }
            let requires = &mut self.nodes[node].requires;
            if !requires.contains(&req) {
                requires.push(req);
            }
        }

        self.validated = false;
        Ok(())
    }

    /// Sets the name `test` is run under. Tests that are never named run under `""`.
    ///
    /// Adds `test` to the graph if needed. Fails with [`GraphError::NilFunction`] if `test` is
    /// `None`.
    pub fn name<'a>(
        &mut self,
        test: impl Into<Option<&'a TestFn<C>>>,
        name: impl Into<Box<str>>,
    ) -> Result<(), GraphError>
    where
        C: 'a,
    {
        let test = resolve(test.into())?;
        let node = self.node_for(test);
        self.nodes[node].name = name.into();
        Ok(())
    }

    /// Calls [`name`](Self::name) for every `(test, name)` pair.
    ///
    /// If any test is `None`, fails with [`GraphError::NilFunction`] before naming anything.
    pub fn name_all<'a, I, T, N>(&mut self, pairs: I) -> Result<(), GraphError>
    where
        C: 'a,
        I: IntoIterator<Item = (T, N)>,
        T: Into<Option<&'a TestFn<C>>>,
        N: Into<Box<str>>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(test, name)| resolve(test.into()).map(|test| (test, name.into())))
            .collect::<Result<Vec<(_, Box<str>)>, _>>()?;

        for (test, name) in pairs {
            let node = self.node_for(test);
            self.nodes[node].name = name;
        }
        Ok(())
    }

    /// Returns the number of registered tests.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no test has been registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `test` is registered.
    #[must_use]
    #[inline]
    pub fn contains(&self, test: TestId) -> bool {
        self.index.contains_key(&test)
    }

    /// Returns the name `test` runs under, if registered.
    #[must_use]
    pub fn name_of(&self, test: TestId) -> Option<&str> {
        Some(&self.node(test)?.name)
    }

    /// Returns the direct prerequisites of `test` in declaration order, if registered.
    pub fn requirements_of(&self, test: TestId) -> Option<impl Iterator<Item = TestId> + '_> {
        let node = self.node(test)?;
        Some(
            node.requires
                .iter()
                .map(move |&req| self.nodes[req].test.id()),
        )
    }

    /// Returns the state of `test`, if registered.
    #[must_use]
    pub fn state_of(&self, test: TestId) -> Option<TestState> {
        Some(self.node(test)?.state)
    }

    /// Returns `true` if the cached order is current.
    #[must_use]
    #[inline]
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Returns the cached execution order, or `None` if the graph is not validated.
    pub fn order(&self) -> Option<impl Iterator<Item = TestId> + '_> {
        if !self.validated {
            return None;
        }
        Some(self.order.iter().map(move |&i| self.nodes[i].test.id()))
    }

    /// Computes and caches an execution order in which every test follows its prerequisites.
    ///
    /// [`run`](Self::run) calls this automatically when the graph changed since the last
    /// successful validation.
    ///
    /// Fails with [`GraphError::CyclicDependency`] if some test (indirectly) requires itself. A
    /// failed validation leaves no order cached.
    pub fn validate(&mut self) -> Result<(), GraphError> {
        self.validated = false;
        self.order.clear();

        match topo::sort(self.nodes.iter().map(|n| n.requires.as_slice())) {
            Ok(order) => {
                self.order = order;
                self.validated = true;
                tracing::debug!(tests = self.nodes.len(), "validated test graph");
                Ok(())
            }
            Err(unordered) => {
                let mut involved: Vec<TestId> = unordered
                    .into_iter()
                    .map(|i| self.nodes[i].test.id())
                    .collect();
                involved.sort_unstable();
                tracing::debug!(
                    unordered = involved.len(),
                    "test graph has a cyclic dependency"
                );
                Err(GraphError::CyclicDependency {
                    involved: involved.into_boxed_slice(),
                })
            }
        }
    }

    /// Runs every pending test through `ctx`, prerequisites first.
    ///
    /// Each test is handed to [`TestContext::run`] under its name. A test with a failed or
    /// skipped prerequisite is not run; the skip is logged through [`TestContext::log`].
    ///
    /// Test failures are not errors: they are reported through `ctx` and recorded in the
    /// returned [`RunReport`]. The only error is [`GraphError::CyclicDependency`] from
    /// validation, in which case no test runs.
    pub fn run(&mut self, ctx: &mut C) -> Result<RunReport, GraphError>
    where
        C: TestContext,
    {
        if !self.validated {
            self.validate()?;
        }

        let mut report = RunReport::default();

        for &index in &self.order {
            let node = &self.nodes[index];
            if node.state.is_done() {
                continue;
            }
            let id = node.test.id();

            let mut because_of = None;
            for &req in &node.requires {
                let prerequisite = &self.nodes[req];
                if !prerequisite.state.is_done() {
                    panic!(
                        "{}",
                        InvariantViolation::FunctionNotExecuted {
                            test: id,
                            prerequisite: prerequisite.test.id(),
                        }
                    );
                }
                if because_of.is_none() && prerequisite.state.is_failed() {
                    because_of = Some(prerequisite.test.id());
                }
            }

            let state = if let Some(failed) = because_of {
                tracing::info!(
                    test = id.as_u64(),
                    name = &*node.name,
                    prerequisite = failed.as_u64(),
                    "skipping test: a prerequisite failed"
                );
                ctx.log(&format!(
                    "test {:?} ({id}) had requirements fail: {failed} did not pass",
                    node.name
                ));
                TestState::Skipped
            } else {
                tracing::debug!(test = id.as_u64(), name = &*node.name, "running test");
                if ctx.run(&node.name, node.test.as_dyn()) {
                    TestState::Passed
                } else {
                    TestState::Failed
                }
            };

            self.nodes[index].state = state;
            report.outcomes.push(TestOutcome {
                test: id,
                state,
                because_of,
            });
        }

        let summary = report.summary();
        tracing::debug!(
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            "test graph run finished"
        );
        Ok(report)
    }

    fn node(&self, test: TestId) -> Option<&Node<C>> {
        let &index = self.index.get(&test)?;
        self.nodes.get(index)
    }

    /// Returns the node index for `test`, creating the node if needed.
    fn node_for(&mut self, test: &TestFn<C>) -> usize {
        if let Some(&index) = self.index.get(&test.id()) {
            return index;
        }
        self.blank(test)
    }

    /// Creates a node for `test`, which must not be registered yet.
    fn blank(&mut self, test: &TestFn<C>) -> usize {
        let id = test.id();
        if self.index.contains_key(&id) {
            panic!("{}", InvariantViolation::FunctionAlreadyPresent { test: id });
        }

        let index = self.nodes.len();
        self.nodes.push(Node {
            test: test.clone(),
            name: Box::from(""),
            requires: Vec::new(),
            state: TestState::Pending,
        });
        self.index.insert(id, index);

        // The cached order must cover every node.
        self.validated = false;
        index
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::context::Harness;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    type Calls = Rc<RefCell<Vec<&'static str>>>;

    /// A test that records `label` when it runs and fails unless `pass`.
    fn recording(calls: &Calls, label: &'static str, pass: bool) -> TestFn<Harness> {
        let calls = Rc::clone(calls);
        TestFn::new(move |t: &mut Harness| {
            calls.borrow_mut().push(label);
            if !pass {
                t.error(format!("{label} failed"));
            }
        })
    }

    fn noop() -> TestFn<Harness> {
        TestFn::new(|_: &mut Harness| {})
    }

    fn position(order: &[TestId], test: &TestFn<Harness>) -> usize {
        order.iter().position(|&id| id == test.id()).unwrap()
    }

    #[test]
    fn require_is_idempotent() {
        let (a, b) = (noop(), noop());
        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        g.require(&a, [&b, &b]).unwrap();

        let reqs: Vec<_> = g.requirements_of(a.id()).unwrap().collect();
        assert_eq!(reqs, vec![b.id()]);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn every_operation_resolves_to_one_node_per_test() {
        let (a, b) = (noop(), noop());
        let mut g = DependencyGraph::new();
        g.name(&b, "b").unwrap();
        g.require(&a, [&b.clone()]).unwrap();
        g.add(&b).unwrap();

        assert_eq!(g.len(), 2);
        let req = g.requirements_of(a.id()).unwrap().next().unwrap();
        assert_eq!(g.name_of(req), Some("b"));
    }

    #[test]
    fn missing_prerequisite_leaves_graph_unchanged() {
        let (a, b, c) = (noop(), noop(), noop());
        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        g.validate().unwrap();

        assert_eq!(
            g.require(&a, [Some(&c), None]),
            Err(GraphError::NilFunction)
        );
        assert_eq!(g.require(None, [&c]), Err(GraphError::NilFunction));

        assert_eq!(g.len(), 2);
        assert!(!g.contains(c.id()));
        assert!(g.is_validated());
        let reqs: Vec<_> = g.requirements_of(a.id()).unwrap().collect();
        assert_eq!(reqs, vec![b.id()]);
    }

    #[test]
    fn name_all_rejects_missing_test_before_naming() {
        let a = noop();
        let mut g = DependencyGraph::new();
        assert_eq!(
            g.name_all([(Some(&a), "a"), (None, "missing")]),
            Err(GraphError::NilFunction)
        );
        assert!(g.is_empty());

        g.name_all([(&a, "a")]).unwrap();
        assert_eq!(g.name_of(a.id()), Some("a"));
    }

    #[test]
    fn unnamed_tests_default_to_empty_name() {
        let a = noop();
        let mut g = DependencyGraph::new();
        g.add(&a).unwrap();
        assert_eq!(g.name_of(a.id()), Some(""));
    }

    #[test]
    fn validation_state_tracks_structure_not_names() {
        let (a, b, c) = (noop(), noop(), noop());
        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        assert!(g.order().is_none());

        g.validate().unwrap();
        g.name(&a, "renamed").unwrap();
        assert!(g.is_validated());

        g.name(&c, "new").unwrap();
        assert!(!g.is_validated());

        g.validate().unwrap();
        g.require(&a, [&b]).unwrap();
        assert!(!g.is_validated());
    }

    #[test]
    fn chain_orders_leaf_first() {
        let (a, b, c, d) = (noop(), noop(), noop(), noop());
        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        g.require(&b, [&c]).unwrap();
        g.require(&c, [&d]).unwrap();

        g.validate().unwrap();
        let order: Vec<_> = g.order().unwrap().collect();
        assert_eq!(order, vec![d.id(), c.id(), b.id(), a.id()]);
    }

    #[test]
    fn acyclic_tables_validate_consistently() {
        let tests: Vec<_> = (0..5).map(|_| noop()).collect();
        let tables: [&[&[usize]]; 2] = [
            &[&[0, 1, 2], &[1, 2, 3], &[2, 3, 4]],
            &[&[0, 1, 2], &[1, 3, 4], &[2, 3, 4]],
        ];

        for table in tables {
            let mut g = DependencyGraph::new();
            for row in table {
                g.require(&tests[row[0]], row[1..].iter().map(|&i| &tests[i]))
                    .unwrap();
            }
            g.validate().unwrap();

            let order: Vec<_> = g.order().unwrap().collect();
            for row in table {
                for &req in &row[1..] {
                    assert!(
                        position(&order, &tests[req]) < position(&order, &tests[row[0]]),
                        "{req} must precede {}",
                        row[0]
                    );
                }
            }
        }
    }

    #[test]
    fn cyclic_tables_fail_validation() {
        let tests: Vec<_> = (0..5).map(|_| noop()).collect();
        let tables: [&[&[usize]]; 3] = [
            &[&[0, 2, 3], &[1, 2, 3], &[2, 0]],
            &[&[0, 1, 2], &[1, 2, 3], &[2, 3, 4], &[3, 0, 1]],
            &[&[4, 4]],
        ];

        for table in tables {
            let mut g = DependencyGraph::new();
            for row in table {
                g.require(&tests[row[0]], row[1..].iter().map(|&i| &tests[i]))
                    .unwrap();
            }
            assert!(matches!(
                g.validate(),
                Err(GraphError::CyclicDependency { .. })
            ));
            assert!(!g.is_validated());
            assert!(g.order().is_none());
        }
    }

    #[test]
    fn cycle_reports_involved_tests() {
        let (a, b, c) = (noop(), noop(), noop());
        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        g.require(&b, [&a]).unwrap();
        g.add(&c).unwrap();

        let Err(GraphError::CyclicDependency { involved }) = g.validate() else {
            panic!("expected a cycle");
        };
        let mut expected = vec![a.id(), b.id()];
        expected.sort_unstable();
        assert_eq!(&*involved, expected.as_slice());
    }

    #[test]
    fn cycle_aborts_run_before_any_test() {
        let calls = Calls::default();
        let a = recording(&calls, "a", true);
        let b = recording(&calls, "b", true);
        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        g.require(&b, [&a]).unwrap();

        let mut h = Harness::new();
        assert!(matches!(
            g.run(&mut h),
            Err(GraphError::CyclicDependency { .. })
        ));
        assert!(calls.borrow().is_empty());
        assert_eq!(g.state_of(a.id()), Some(TestState::Pending));
    }

    #[test]
    fn failure_skips_transitive_dependents_only() {
        let calls = Calls::default();
        let a = recording(&calls, "a", true);
        let b = recording(&calls, "b", true);
        let c = recording(&calls, "c", false);
        let d = recording(&calls, "d", true);
        let x = recording(&calls, "x", true);

        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        g.require(&b, [&c]).unwrap();
        g.require(&c, [&d]).unwrap();
        g.add(&x).unwrap();

        let mut h = Harness::new();
        let report = g.run(&mut h).unwrap();

        assert_eq!(*calls.borrow(), vec!["d", "x", "c"]);
        assert_eq!(g.state_of(d.id()), Some(TestState::Passed));
        assert_eq!(g.state_of(c.id()), Some(TestState::Failed));
        assert_eq!(g.state_of(b.id()), Some(TestState::Skipped));
        assert_eq!(g.state_of(a.id()), Some(TestState::Skipped));
        assert_eq!(g.state_of(x.id()), Some(TestState::Passed));

        assert_eq!(report.outcome_of(b.id()).unwrap().because_of, Some(c.id()));
        assert_eq!(report.outcome_of(a.id()).unwrap().because_of, Some(b.id()));
        assert_eq!(report.outcome_of(d.id()).unwrap().because_of, None);
        assert_eq!(report.summary().total(), 5);
        assert!(h.failed());
    }

    #[test]
    fn skips_are_logged_through_the_context() {
        let calls = Calls::default();
        let a = recording(&calls, "a", true);
        let b = recording(&calls, "b", false);
        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        g.name_all([(&a, "a"), (&b, "b")]).unwrap();

        let mut h = Harness::new();
        g.run(&mut h).unwrap();

        assert_eq!(h.logs().len(), 1);
        assert!(h.logs()[0].contains("\"a\""));
        assert!(h.result_of("a").is_none());
        assert!(!h.result_of("b").unwrap().passed);
    }

    #[test]
    fn diamond_runs_shared_prerequisite_once() {
        let calls = Calls::default();
        let a = recording(&calls, "a", true);
        let b = recording(&calls, "b", true);
        let c = recording(&calls, "c", true);
        let d = recording(&calls, "d", true);

        let mut g = DependencyGraph::new();
        g.require(&a, [&b, &c]).unwrap();
        g.require(&b, [&d]).unwrap();
        g.require(&c, [&d]).unwrap();

        let mut h = Harness::new();
        let report = g.run(&mut h).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.iter().filter(|&&l| l == "d").count(), 1);
        assert_eq!(calls.first(), Some(&"d"));
        assert_eq!(calls.last(), Some(&"a"));
        assert!(report.is_success());
        assert!(!h.failed());
    }

    #[test]
    fn tests_run_under_their_names() {
        let a = noop();
        let b = noop();
        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        g.name(&a, "second").unwrap();

        let mut h = Harness::named("suite");
        g.run(&mut h).unwrap();

        let names: Vec<_> = h.results().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["suite/#00", "suite/second"]);
    }

    #[test]
    fn rerun_only_processes_new_tests() {
        let calls = Calls::default();
        let a = recording(&calls, "a", false);
        let b = recording(&calls, "b", true);
        let c = recording(&calls, "c", true);

        let mut g = DependencyGraph::new();
        g.add(&a).unwrap();
        g.add(&b).unwrap();

        let mut h = Harness::new();
        let first = g.run(&mut h).unwrap();
        assert_eq!(first.summary().total(), 2);

        // No new tests: nothing runs.
        let second = g.run(&mut h).unwrap();
        assert!(second.outcomes.is_empty());

        // A new dependent of the failed test is skipped without re-running `a`.
        g.require(&c, [&a, &b]).unwrap();
        let third = g.run(&mut h).unwrap();
        assert_eq!(
            third.outcomes,
            vec![TestOutcome {
                test: c.id(),
                state: TestState::Skipped,
                because_of: Some(a.id()),
            }]
        );
        assert_eq!(*calls.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn requirements_on_finished_test_are_ignored() {
        let calls = Calls::default();
        let a = recording(&calls, "a", true);
        let f = recording(&calls, "f", false);

        let mut g = DependencyGraph::new();
        g.add(&a).unwrap();
        let mut h = Harness::new();
        g.run(&mut h).unwrap();

        g.require(&a, [&f]).unwrap();
        assert!(g.contains(f.id()));
        assert_eq!(g.requirements_of(a.id()).unwrap().count(), 0);

        let report = g.run(&mut h).unwrap();
        assert_eq!(
            report.outcomes,
            vec![TestOutcome {
                test: f.id(),
                state: TestState::Failed,
                because_of: None,
            }]
        );
        assert_eq!(g.state_of(a.id()), Some(TestState::Passed));
        assert_eq!(*calls.borrow(), vec!["a", "f"]);
    }

    #[test]
    #[should_panic(expected = "is already present in this graph")]
    fn blank_rejects_registered_test() {
        let a = noop();
        let mut g = DependencyGraph::<Harness>::new();
        let _ = g.blank(&a);
        let _ = g.blank(&a);
    }

    #[test]
    #[should_panic(expected = "was not executed")]
    fn run_rejects_order_with_unfinished_prerequisite() {
        let (a, b) = (noop(), noop());
        let mut g = DependencyGraph::new();
        g.require(&a, [&b]).unwrap();
        g.validate().unwrap();

        // Corrupt the cached order so `a` comes before its prerequisite.
        g.order.reverse();
        let _ = g.run(&mut Harness::new());
    }
}
