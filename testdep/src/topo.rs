// Copyright 2026 the Testdep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topological ordering of tests over the "requires" relation.
//!
//! This is Kahn's algorithm run over the inverted relation: edges are treated as flowing from a
//! prerequisite to its dependents, so a test becomes ready once every test it requires has been
//! emitted.
//!
//! The ready queue is seeded and drained in index order (FIFO). For a given sequence of
//! registrations the produced order is therefore deterministic, but callers must not rely on the
//! relative order of tests that are independent of each other.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

/// Sorts node indices so every node follows all of its requirements.
///
/// `requires` yields, for each node index `i` in turn, the indices node `i` requires. Each
/// requirement list is expected to be duplicate-free.
///
/// On failure, returns the indices that could not be ordered (members of a cycle plus everything
/// downstream of one), in ascending order.
pub(crate) fn sort<'a, I>(requires: I) -> Result<Vec<usize>, Vec<usize>>
where
    I: IntoIterator<Item = &'a [usize]>,
    I::IntoIter: ExactSizeIterator,
{
    let requires = requires.into_iter();
    let len = requires.len();

    // remaining[i]: requirements of `i` not yet emitted.
    let mut remaining = vec![0_usize; len];
    // dependents[p]: nodes that require `p`.
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); len];

    for (node, reqs) in requires.enumerate() {
        remaining[node] = reqs.len();
        for &req in reqs {
            dependents[req].push(node);
        }
    }

    let mut ready: VecDeque<usize> = (0..len).filter(|&i| remaining[i] == 0).collect();
    let mut order = Vec::with_capacity(len);

    while let Some(node) = ready.pop_front() {
        order.push(node);
        for &dependent in &dependents[node] {
            remaining[dependent] -= 1;
            if remaining[dependent] == 0 {
                ready.push_back(dependent);
            }
        }
    }

    if order.len() == len {
        Ok(order)
    } else {
        Err((0..len).filter(|&i| remaining[i] > 0).collect())
    }
}
