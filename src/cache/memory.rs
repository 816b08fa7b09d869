//! Memory Ledger Module
//!
//! Approximate byte accounting for the cache state.

use serde::{Deserialize, Serialize};

use crate::cache::{BASE_OVERHEAD, ENTRY_HEADER_SIZE, INDEX_ENTRY_OVERHEAD, STORED_ENTRY_OVERHEAD};

// == Memory Accounting ==
/// How an entry is charged against the memory budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryAccounting {
    /// Every entry costs the same constant, whatever its payload
    #[default]
    Fixed,
    /// Entries are charged their real payload length plus header overhead
    Exact,
}

impl MemoryAccounting {
    /// Returns the accounted cost of an entry holding `value_len` bytes.
    pub fn entry_cost(self, value_len: usize) -> usize {
        match self {
            MemoryAccounting::Fixed => INDEX_ENTRY_OVERHEAD + STORED_ENTRY_OVERHEAD,
            MemoryAccounting::Exact => {
                INDEX_ENTRY_OVERHEAD + ENTRY_HEADER_SIZE + value_len
            }
        }
    }
}

// == Memory Ledger ==
/// Running total of accounted bytes.
///
/// Starts at [`BASE_OVERHEAD`] and never drops below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLedger {
    used: usize,
    budget: usize,
}

impl MemoryLedger {
    /// Creates a ledger holding only the base overhead.
    pub fn new(budget: usize) -> Self {
        Self {
            used: BASE_OVERHEAD,
            budget,
        }
    }

    /// Currently accounted bytes.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Configured ceiling.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Total that would result from releasing `freed` bytes and charging
    /// `added` bytes.
    pub fn projected(&self, freed: usize, added: usize) -> usize {
        self.used.saturating_sub(freed).max(BASE_OVERHEAD) + added
    }

    /// Returns true if the projected total would exceed the budget.
    pub fn would_exceed(&self, freed: usize, added: usize) -> bool {
        self.projected(freed, added) > self.budget
    }

    pub fn charge(&mut self, bytes: usize) {
        self.used += bytes;
    }

    pub fn release(&mut self, bytes: usize) {
        self.used = self.used.saturating_sub(bytes).max(BASE_OVERHEAD);
    }

    /// Drops every entry charge.
    pub fn reset(&mut self) {
        self.used = BASE_OVERHEAD;
    }
}
