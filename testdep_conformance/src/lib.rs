// Copyright 2026 the Testdep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conformance suite for `testdep`.
//!
//! The tests live in `tests/`; this library only hosts shared fixtures.

use std::cell::RefCell;
use std::rc::Rc;

use testdep::{Harness, TestFn};

/// Shared record of which tests ran, in order.
#[derive(Clone, Debug, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a test that appends `label` to this log and passes.
    #[must_use]
    pub fn passing(&self, label: &str) -> TestFn<Harness> {
        self.test(label, true)
    }

    /// Builds a test that appends `label` to this log and then fails.
    #[must_use]
    pub fn failing(&self, label: &str) -> TestFn<Harness> {
        self.test(label, false)
    }

    /// Returns the labels recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Returns the position of `label` in the log, if it ran.
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.0.borrow().iter().position(|l| l == label)
    }

    fn test(&self, label: &str, pass: bool) -> TestFn<Harness> {
        let log = Rc::clone(&self.0);
        let label = label.to_owned();
        TestFn::new(move |t: &mut Harness| {
            log.borrow_mut().push(label.clone());
            if !pass {
                t.error(format!("{label} failed"));
            }
        })
    }
}
