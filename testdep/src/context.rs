// Copyright 2026 the Testdep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reporting contexts.
//!
//! A [`DependencyGraph`](crate::DependencyGraph) never decides on its own whether a test passed.
//! It hands each test to a [`TestContext`], which runs it as a named sub-test and reports a
//! boolean outcome. Embedders with their own harness implement the trait; [`Harness`] is a small
//! self-contained implementation.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Capability to run a named unit of work and learn whether it passed.
pub trait TestContext {
    /// Runs `test` as a sub-test called `name` and returns `true` if it passed.
    ///
    /// `name` may be empty.
    fn run(&mut self, name: &str, test: &dyn Fn(&mut Self)) -> bool;

    /// Records an informational message against this context.
    fn log(&mut self, message: &str) {
        let _ = message;
    }
}

/// Result of one finished sub-test recorded by a [`Harness`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestResult {
    /// Full slash-separated name, e.g. `suite/login`.
    pub name: String,
    /// Whether the sub-test passed.
    pub passed: bool,
    /// Messages logged by the sub-test.
    pub log: Vec<String>,
}

/// A minimal [`TestContext`] that records results in memory.
///
/// Sub-test names nest like paths: running `"b"` inside `"a"` produces `"a/b"`. Unnamed sub-tests
/// are called `#00`, `#01`, ... in the order they start, and a name used again within the same
/// parent gets the next free suffix (`x`, `x#01`, `x#02`, ...), so full names are unique. A failed
/// sub-test fails its parent.
///
/// With the `std` feature enabled, a sub-test that panics is recorded as failed and the panic
/// message is logged. Without it, panics propagate to the caller.
#[derive(Debug, Default)]
pub struct Harness {
    name: String,
    failed: bool,
    log: Vec<String>,
    results: Vec<TestResult>,
    // Sub-test names started under this context, with how often each was used.
    seen: BTreeMap<String, usize>,
}

impl Harness {
    /// Creates an unnamed top-level harness.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a top-level harness whose sub-tests are prefixed with `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Marks this (sub-)test failed and keeps running it.
    #[inline]
    pub fn fail(&mut self) {
        self.failed = true;
    }

    /// Logs `message` and marks this (sub-)test failed.
    pub fn error(&mut self, message: impl Into<String>) {
        self.log.push(message.into());
        self.failed = true;
    }

    /// Returns `true` if this (sub-)test or any of its sub-tests failed.
    #[must_use]
    #[inline]
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Returns the full name of this (sub-)test.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns messages logged directly against this context.
    #[must_use]
    #[inline]
    pub fn logs(&self) -> &[String] {
        &self.log
    }

    /// Returns every finished sub-test, nested ones included, in completion order.
    #[must_use]
    #[inline]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Returns the result recorded under the full name `name`.
    #[must_use]
    pub fn result_of(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.name == name)
    }

    fn child(&mut self, name: &str) -> Self {
        let uses = self.seen.entry(name.into()).or_insert(0);
        let leaf = match (name.is_empty(), *uses) {
            (true, n) => format!("#{n:02}"),
            (false, 0) => name.into(),
            (false, n) => format!("{name}#{n:02}"),
        };
        *uses += 1;
        let name = if self.name.is_empty() {
            leaf
        } else {
            format!("{}/{leaf}", self.name)
        };
        Self {
            name,
            ..Self::default()
        }
    }
}

impl TestContext for Harness {
    fn run(&mut self, name: &str, test: &dyn Fn(&mut Self)) -> bool {
        let mut child = self.child(name);
        invoke(&mut child, test);

        let passed = !child.failed;
        if !passed {
            self.failed = true;
        }

        let Self {
            name, log, results, ..
        } = child;
        self.results.extend(results);
        self.results.push(TestResult {
            name,
            passed,
            log,
        });
        passed
    }

    fn log(&mut self, message: &str) {
        self.log.push(message.into());
    }
}

#[cfg(feature = "std")]
fn invoke(harness: &mut Harness, test: &dyn Fn(&mut Harness)) {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    let Err(payload) = catch_unwind(AssertUnwindSafe(|| test(harness))) else {
        return;
    };
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| String::from(*s))
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| String::from("non-string panic payload"));
    harness.error(format!("panicked: {message}"));
}

#[cfg(not(feature = "std"))]
fn invoke(harness: &mut Harness, test: &dyn Fn(&mut Harness)) {
    test(harness);
}
