//! Ledger domain module (chart of accounts + double-entry journal).
//!
//! This crate contains the business rules of the ledger core, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage backend).

pub mod account;
pub mod chart;
pub mod journal;

pub use account::{Account, AccountKind, AccountRole, AccountUpdate, NewAccount};
pub use chart::{ChartOfAccounts, RoleBindings};
pub use journal::{
    Journal, JournalEntry, JournalPage, Line, NewJournalEntry, Pagination,
};
