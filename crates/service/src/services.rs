//! Service facade: shared ledger state behind one lock.
//!
//! All operations are synchronous request/response calls. A posting takes
//! the write guard for the whole validate+append, which gives per-entry
//! atomicity; report reads take the read guard and therefore never observe a
//! partially-written entry.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::info;

use tallyerp_core::{AccountId, DomainError, DomainResult, EntryId};
use tallyerp_ledger::{
    Account, AccountUpdate, ChartOfAccounts, Journal, JournalEntry, JournalPage, NewAccount,
    NewJournalEntry, Pagination,
};
use tallyerp_posting::{BusinessEvent, EventPoster, PostingStatus};
use tallyerp_reports::{balance_sheet, income_statement, trial_balance, BalanceSheet, IncomeStatement, TrialBalance};

struct LedgerState {
    chart: ChartOfAccounts,
    journal: Journal,
}

/// The ledger core as one shared service.
pub struct LedgerServices {
    state: RwLock<LedgerState>,
    poster: EventPoster,
}

impl LedgerServices {
    /// Seed the system accounts, resolve the role bindings (hard failure if
    /// a required role cannot be resolved) and build the event poster.
    pub fn bootstrap() -> DomainResult<Self> {
        Self::bootstrap_with(ChartOfAccounts::new())
    }

    /// Bootstrap on top of an existing chart (e.g. restored from storage).
    pub fn bootstrap_with(mut chart: ChartOfAccounts) -> DomainResult<Self> {
        let bindings = chart.seed_system_accounts()?;
        info!(accounts = chart.len(), "ledger bootstrapped");
        Ok(Self {
            state: RwLock::new(LedgerState {
                chart,
                journal: Journal::new(),
            }),
            poster: EventPoster::new(bindings),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().expect("ledger state lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().expect("ledger state lock poisoned")
    }

    // Chart of accounts.

    pub fn create_account(&self, new: NewAccount) -> DomainResult<Account> {
        self.write().chart.create(new)
    }

    pub fn update_account(&self, id: AccountId, update: AccountUpdate) -> DomainResult<Account> {
        self.write().chart.update(id, update)
    }

    pub fn delete_account(&self, id: AccountId) -> DomainResult<()> {
        self.write().chart.delete(id)
    }

    pub fn get_account(&self, id: AccountId) -> DomainResult<Account> {
        self.read().chart.get(id).cloned()
    }

    pub fn list_accounts(&self) -> Vec<Account> {
        self.read().chart.list()
    }

    // Journal.

    /// Post a manual journal entry through the validator.
    pub fn post_journal_entry(&self, candidate: NewJournalEntry) -> DomainResult<JournalEntry> {
        let mut state = self.write();
        let LedgerState { chart, journal } = &mut *state;
        journal.post(chart, candidate)
    }

    pub fn get_journal_entry(&self, id: EntryId) -> DomainResult<JournalEntry> {
        self.read().journal.get(id).cloned()
    }

    pub fn list_journal_entries(&self, pagination: Pagination) -> JournalPage {
        self.read().journal.page(pagination)
    }

    // Event-driven posting.

    /// Apply a business event's accounting side effect.
    ///
    /// Best effort by design: the returned status reports whether the books
    /// were updated, but the triggering business operation never fails here.
    pub fn record_event(&self, event: &BusinessEvent) -> PostingStatus {
        let mut state = self.write();
        let LedgerState { chart, journal } = &mut *state;
        self.poster.apply(chart, journal, event)
    }

    // Reports.

    pub fn trial_balance(&self) -> TrialBalance {
        let state = self.read();
        trial_balance(&state.chart, &state.journal)
    }

    pub fn income_statement(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DomainResult<IncomeStatement> {
        let start = start.ok_or_else(|| DomainError::validation("start date is required"))?;
        let end = end.ok_or_else(|| DomainError::validation("end date is required"))?;
        let state = self.read();
        income_statement(&state.chart, &state.journal, start, end)
    }

    pub fn balance_sheet(&self, as_of: Option<NaiveDate>) -> DomainResult<BalanceSheet> {
        let as_of = as_of.ok_or_else(|| DomainError::validation("as-of date is required"))?;
        let state = self.read();
        Ok(balance_sheet(&state.chart, &state.journal, as_of))
    }
}
