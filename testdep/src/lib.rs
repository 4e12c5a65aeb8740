// Copyright 2026 the Testdep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency graphs between tests.
//!
//! Some tests are only meaningful once others have passed: there is no point exercising a
//! feature whose building blocks are broken. This crate lets a suite declare those relationships,
//! runs prerequisites first, and skips (marking as failed, without executing) every test that
//! depends on a failure.
//!
//! ## Usage
//!
//! ```
//! use testdep::{DependencyGraph, Harness, TestFn, TestState};
//!
//! let parse = TestFn::new(|_: &mut Harness| {});
//! let eval = TestFn::new(|t: &mut Harness| t.error("eval is broken"));
//! let repl = TestFn::new(|_: &mut Harness| {});
//!
//! let mut graph = DependencyGraph::new();
//! // `repl` requires `parse` and `eval`; `eval` requires `parse`.
//! graph.require(&repl, [&parse, &eval])?;
//! graph.require(&eval, [&parse])?;
//! graph.name_all([(&parse, "parse"), (&eval, "eval"), (&repl, "repl")])?;
//!
//! let mut harness = Harness::named("suite");
//! let report = graph.run(&mut harness)?;
//!
//! assert_eq!(graph.state_of(parse.id()), Some(TestState::Passed));
//! assert_eq!(graph.state_of(eval.id()), Some(TestState::Failed));
//! assert_eq!(graph.state_of(repl.id()), Some(TestState::Skipped));
//! assert_eq!(report.summary().skipped, 1);
//! # Ok::<(), testdep::GraphError>(())
//! ```
//!
//! ## Identity
//!
//! Tests are identified by the [`TestFn`] they are registered with, not by what the wrapped
//! closure does. Keep one `TestFn` per test (clone it freely) and pass it to every declaration.
//!
//! ## Reporting contexts
//!
//! Tests are run through a [`TestContext`], which decides how a named sub-test is executed and
//! whether it passed. [`Harness`] is a small in-memory implementation; embedders with their own
//! harness implement the trait instead.
//!
//! ## Features
//!
//! - `std`: [`Harness`] catches panics in sub-tests and records them as failures.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod context;
mod graph;
mod identity;
mod report;
mod topo;

pub use context::{Harness, TestContext, TestResult};
pub use graph::{DependencyGraph, GraphError};
pub use identity::{TestFn, TestId};
pub use report::{RunReport, RunSummary, TestOutcome, TestState};
