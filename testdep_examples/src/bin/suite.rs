// Copyright 2026 the Testdep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small runnable `testdep` example.
//!
//! Shows:
//! - Declaring requirements between tests of a toy key-value store
//! - Prerequisites running first
//! - Dependents of a failing test being skipped instead of run
//!
//! Pass `--break-storage` to make the storage test fail. Set `RUST_LOG=testdep=debug` to see the
//! scheduling events.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use testdep::{DependencyGraph, GraphError, Harness, TestFn, TestState};
use tracing_subscriber::EnvFilter;

type Store = Rc<RefCell<BTreeMap<String, String>>>;

fn main() -> Result<(), GraphError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let break_storage = std::env::args().skip(1).any(|arg| arg == "--break-storage");
    let store: Store = Rc::default();

    let storage = {
        let store = store.clone();
        TestFn::new(move |t: &mut Harness| {
            if break_storage {
                t.error("storage backend unavailable");
                return;
            }
            store.borrow_mut().clear();
        })
    };

    let put = {
        let store = store.clone();
        TestFn::new(move |t: &mut Harness| {
            store.borrow_mut().insert("answer".into(), "42".into());
            if store.borrow().len() != 1 {
                t.error("put did not store exactly one entry");
            }
        })
    };

    let get = {
        let store = store.clone();
        TestFn::new(move |t: &mut Harness| {
            let value = store.borrow().get("answer").cloned();
            if value.as_deref() != Some("42") {
                t.error(format!("get returned {value:?}"));
            }
        })
    };

    let delete = {
        let store = store.clone();
        TestFn::new(move |t: &mut Harness| {
            if store.borrow_mut().remove("answer").is_none() {
                t.error("delete found nothing to remove");
            }
        })
    };

    let formatting = TestFn::new(|t: &mut Harness| {
        if format!("{}={}", "k", "v") != "k=v" {
            t.fail();
        }
    });

    let mut g = DependencyGraph::new();
    g.require(&put, [&storage])?;
    g.require(&get, [&put])?;
    g.require(&delete, [&put, &get])?;
    g.add(&formatting)?;
    g.name_all([
        (&storage, "storage"),
        (&put, "put"),
        (&get, "get"),
        (&delete, "delete"),
        (&formatting, "formatting"),
    ])?;

    let mut harness = Harness::named("kv");
    let report = g.run(&mut harness)?;

    for outcome in &report.outcomes {
        let name = g.name_of(outcome.test).unwrap_or("?");
        let status = match outcome.state {
            TestState::Passed => "ok",
            TestState::Failed => "FAILED",
            TestState::Skipped => "skipped",
            TestState::Pending => "pending",
        };
        match outcome.because_of.and_then(|p| g.name_of(p)) {
            Some(cause) => println!("{name:<12} {status} (requires {cause})"),
            None => println!("{name:<12} {status}"),
        }
    }

    for result in harness.results() {
        for line in &result.log {
            println!("  {}: {line}", result.name);
        }
    }

    let summary = report.summary();
    println!(
        "\n{} passed, {} failed, {} skipped",
        summary.passed, summary.failed, summary.skipped
    );

    Ok(())
}
