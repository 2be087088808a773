// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Cooperative cancellation for long-running algorithms.
//!
//! Algorithms poll a [`CancellationToken`] once per iteration of their dominant
//! loops and return early with whatever they have computed so far. Cancellation
//! is never reported as an error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A pollable "has cancellation been requested" flag.
pub trait CancellationToken {
    fn is_cancelled(&self) -> bool;
}

/// Token that never requests cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancelled;

impl CancellationToken for NeverCancelled {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Shared flag that can be flipped from another thread or from a callback.
///
/// # Examples
///
/// ```
/// use digraph_common::{CancelFlag, CancellationToken};
///
/// let flag = CancelFlag::new();
/// let handle = flag.clone();
/// assert!(!flag.is_cancelled());
/// handle.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl CancellationToken for CancelFlag {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl CancellationToken for AtomicBool {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<F> CancellationToken for F
where
    F: Fn() -> bool,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}
