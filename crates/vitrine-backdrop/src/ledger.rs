//! Accounting of acquired render resources.

use std::cell::Cell;
use std::rc::Rc;

/// Kind of resource a backdrop holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Surface,
    Geometry,
    Material,
}

impl ResourceKind {
    const fn slot(self) -> usize {
        match self {
            ResourceKind::Surface => 0,
            ResourceKind::Geometry => 1,
            ResourceKind::Material => 2,
        }
    }
}

#[derive(Debug, Default)]
struct Counts([Cell<usize>; 3]);

/// Shared counter of live resources.
///
/// Every acquired resource is represented by a [`ResourceGuard`]; dropping
/// the guard releases the resource. A ledger that reads zero after every
/// backdrop has been released proves nothing leaked.
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    counts: Rc<Counts>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one acquired resource.
    pub fn track(&self, kind: ResourceKind) -> ResourceGuard {
        let cell = &self.counts.0[kind.slot()];
        cell.set(cell.get() + 1);
        ResourceGuard {
            counts: self.counts.clone(),
            kind,
        }
    }

    /// Live resources of every kind.
    pub fn live(&self) -> usize {
        self.counts.0.iter().map(Cell::get).sum()
    }

    /// Live resources of one kind.
    pub fn live_of(&self, kind: ResourceKind) -> usize {
        self.counts.0[kind.slot()].get()
    }
}

/// One live resource; released on drop.
#[derive(Debug)]
pub struct ResourceGuard {
    counts: Rc<Counts>,
    kind: ResourceKind,
}

impl ResourceGuard {
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        let cell = &self.counts.0[self.kind.slot()];
        cell.set(cell.get().saturating_sub(1));
    }
}
