// Copyright 2026 the Testdep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test identities.
//!
//! A [`TestFn`] pairs a callable with a [`TestId`] allocated when the `TestFn` is constructed.
//! Clones share the id, so registering the same `TestFn` (or any clone of it) with a
//! [`DependencyGraph`](crate::DependencyGraph) always resolves to the same node.
//!
//! Identity is deliberately *not* derived from the wrapped closure: two `TestFn`s built from the
//! same function item are two different tests.

use alloc::rc::Rc;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::graph::GraphError;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier for a test registered with a [`DependencyGraph`](crate::DependencyGraph).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TestId(u64);

impl TestId {
    /// Creates a test id from a raw value.
    ///
    /// This is mostly useful for building expected values in tests; ids handed out by
    /// [`TestFn::new`] are unique for the lifetime of the process.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer backing this id.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    fn next() -> Self {
        // Relaxed is enough: only uniqueness matters, not ordering relative to other memory.
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "test#{}", self.0)
    }
}

/// A test callable with a stable identity.
///
/// `C` is the reporting context the test receives when it runs (see
/// [`TestContext`](crate::TestContext)). The test reports failure through that context; its
/// return value carries nothing.
pub struct TestFn<C: ?Sized> {
    id: TestId,
    func: Rc<dyn Fn(&mut C)>,
}

impl<C: ?Sized> TestFn<C> {
    /// Wraps `func` and assigns it a fresh [`TestId`].
    pub fn new(func: impl Fn(&mut C) + 'static) -> Self {
        Self {
            id: TestId::next(),
            func: Rc::new(func),
        }
    }

    /// Returns this test's identity.
    #[inline]
    pub fn id(&self) -> TestId {
        self.id
    }

    #[inline]
    pub(crate) fn as_dyn(&self) -> &dyn Fn(&mut C) {
        &*self.func
    }
}

impl<C: ?Sized> Clone for TestFn<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            func: Rc::clone(&self.func),
        }
    }
}

impl<C: ?Sized> PartialEq for TestFn<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C: ?Sized> Eq for TestFn<C> {}

impl<C: ?Sized> fmt::Debug for TestFn<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestFn")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Resolves an optional test reference, rejecting an absent one.
///
/// `None` stands in for an absent callable and is rejected with [`GraphError::NilFunction`].
/// The key for a present test is [`TestFn::id`].
#[inline]
pub(crate) fn resolve<C: ?Sized>(test: Option<&TestFn<C>>) -> Result<&TestFn<C>, GraphError> {
    test.ok_or(GraphError::NilFunction)
}
