// AttrMap
// Copyright (C) 2025 AttrMap contributors

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Per-mapper analysis context
//!
//! Threads the immutable snapshot and registry, the cancellation flag, and the
//! ancestor chain through every recursion frame. The ancestor chain is an
//! explicit stack checked before each descent, so termination never depends on
//! call-stack depth or a deadline.

use crate::diagnostics::DiagnosticResult;
use crate::registry::MapperRegistry;
use crate::typegraph::{TypeId, TypeSnapshot};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// The generation pass was cancelled by the host build system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("generation pass cancelled")]
pub struct Cancelled;

/// Cloneable cancellation signal, checked per member and per recursion frame.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of one analysis step. The outer error aborts the whole pass; the
/// inner one is a per-member diagnostic to be aggregated.
pub type StepResult<T> = Result<DiagnosticResult<T>, Cancelled>;

/// The set of model types currently being expanded, in descent order.
///
/// Seeded with the root mapper's own model type. Membership is checked before
/// any descent; push on entry, pop on return.
#[derive(Debug, Clone)]
pub struct AncestorChain {
    stack: Vec<TypeId>,
    seen: HashSet<TypeId>,
}

impl AncestorChain {
    pub fn seeded(root: TypeId) -> Self {
        let mut chain = Self { stack: Vec::new(), seen: HashSet::new() };
        chain.push(root);
        chain
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.seen.contains(id)
    }

    pub fn push(&mut self, id: TypeId) {
        debug_assert!(!self.seen.contains(&id), "descending into a type already on the chain");
        self.seen.insert(id.clone());
        self.stack.push(id);
    }

    pub fn pop(&mut self) {
        if let Some(id) = self.stack.pop() {
            self.seen.remove(&id);
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Render the chain for a cycle diagnostic, root first.
    pub fn render(&self) -> String {
        self.stack.iter().map(TypeId::as_str).collect::<Vec<_>>().join(" -> ")
    }
}

/// Everything one mapper analysis reads and the one piece of state it mutates
/// (the ancestor chain).
pub struct AnalysisContext<'a> {
    pub snapshot: &'a TypeSnapshot,
    pub registry: &'a MapperRegistry,
    pub ancestors: AncestorChain,
    cancel: CancelFlag,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(snapshot: &'a TypeSnapshot, registry: &'a MapperRegistry, cancel: CancelFlag, root: TypeId) -> Self {
        Self {
            snapshot,
            registry,
            ancestors: AncestorChain::seeded(root),
            cancel,
        }
    }

    pub fn check_cancelled(&self) -> Result<(), Cancelled> {
        if self.cancel.is_cancelled() { Err(Cancelled) } else { Ok(()) }
    }
}
