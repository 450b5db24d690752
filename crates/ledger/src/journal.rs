//! Append-only journal of balanced transactions.
//!
//! The journal offers exactly one write operation: `post`. Accepted entries
//! are immutable; there is no update or delete surface at all. Corrections
//! are new entries, optionally tagged with the original via `correction_of`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use tallyerp_core::{AccountId, DomainError, DomainResult, EntryId, Money, UserId};

use crate::chart::ChartOfAccounts;

/// One debit-or-credit movement against one account.
///
/// Exactly one of `debit`, `credit` is strictly positive on an accepted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub account_id: AccountId,
    pub debit: Money,
    pub credit: Money,
}

impl Line {
    pub fn debit(account_id: AccountId, amount: Money) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Money::ZERO,
        }
    }

    pub fn credit(account_id: AccountId, amount: Money) -> Self {
        Self {
            account_id,
            debit: Money::ZERO,
            credit: amount,
        }
    }
}

/// Candidate journal entry, not yet validated or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJournalEntry {
    pub date: NaiveDate,
    pub description: String,
    /// Free-form correlation id (invoice number, PO number, payment id).
    pub reference_number: Option<String>,
    /// Set when this entry corrects or reverses an earlier one.
    pub correction_of: Option<EntryId>,
    pub lines: Vec<Line>,
    pub created_by: UserId,
}

/// One accepted, balanced, immutable transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub description: String,
    pub reference_number: Option<String>,
    pub correction_of: Option<EntryId>,
    pub lines: Vec<Line>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn total_debit(&self) -> Money {
        self.lines.iter().map(|l| l.debit).sum()
    }

    pub fn total_credit(&self) -> Money {
        self.lines.iter().map(|l| l.credit).sum()
    }
}

/// Pagination parameters for journal reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    /// Maximum number of entries to return.
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 50 }
    }
}

impl Pagination {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(50).clamp(1, 1000),
        }
    }
}

/// One page of journal entries, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalPage {
    pub entries: Vec<JournalEntry>,
    /// Total number of entries in the journal (across all pages).
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

/// Append-only journal store.
#[derive(Debug, Default, Clone)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a candidate entry.
    ///
    /// The entry is persisted as a whole (all lines together) on success; on
    /// any rejection nothing is written and the first violated rule is
    /// returned as a `Validation` error naming the offending line.
    pub fn post(
        &mut self,
        chart: &ChartOfAccounts,
        candidate: NewJournalEntry,
    ) -> DomainResult<JournalEntry> {
        validate(chart, &candidate)?;

        let entry = JournalEntry {
            id: EntryId::new(),
            date: candidate.date,
            description: candidate.description,
            reference_number: candidate.reference_number,
            correction_of: candidate.correction_of,
            lines: candidate.lines,
            created_by: candidate.created_by,
            created_at: Utc::now(),
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn get(&self, id: EntryId) -> DomainResult<&JournalEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(DomainError::NotFound)
    }

    /// All entries in insertion order (oldest first).
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paginated read, newest first by business date then creation order.
    pub fn page(&self, pagination: Pagination) -> JournalPage {
        // Reverse insertion order first so a stable sort on date keeps the
        // most recently posted entry first within a day.
        let mut ordered: Vec<&JournalEntry> = self.entries.iter().rev().collect();
        ordered.sort_by(|a, b| b.date.cmp(&a.date));

        let start = (pagination.page.max(1) as usize - 1).saturating_mul(pagination.limit as usize);
        let entries = ordered
            .into_iter()
            .skip(start)
            .take(pagination.limit as usize)
            .cloned()
            .collect();

        JournalPage {
            entries,
            total: self.entries.len(),
            page: pagination.page,
            limit: pagination.limit,
        }
    }
}

/// Posting validator: gatekeeper between candidate entries and the journal.
fn validate(chart: &ChartOfAccounts, candidate: &NewJournalEntry) -> DomainResult<()> {
    if candidate.lines.len() < 2 {
        return Err(DomainError::validation(
            "journal entry must have at least 2 lines",
        ));
    }
    if candidate.description.trim().is_empty() {
        return Err(DomainError::validation("description is required"));
    }

    for (idx, line) in candidate.lines.iter().enumerate() {
        let n = idx + 1;
        let account = chart.find(line.account_id).ok_or_else(|| {
            DomainError::validation(format!("line {n}: account does not exist"))
        })?;
        if !account.is_active {
            return Err(DomainError::validation(format!(
                "line {n}: account '{}' is inactive",
                account.name
            )));
        }
        if line.debit.is_negative() || line.credit.is_negative() {
            return Err(DomainError::validation(format!(
                "line {n}: amounts must not be negative"
            )));
        }
        if line.debit.is_positive() && line.credit.is_positive() {
            return Err(DomainError::validation(format!(
                "line {n}: a line cannot be both debit and credit"
            )));
        }
        if line.debit.is_zero() && line.credit.is_zero() {
            return Err(DomainError::validation(format!(
                "line {n}: a line must carry a debit or a credit amount"
            )));
        }
    }

    let total_debit: Money = candidate.lines.iter().map(|l| l.debit).sum();
    let total_credit: Money = candidate.lines.iter().map(|l| l.credit).sum();
    if total_debit != total_credit {
        return Err(DomainError::validation(format!(
            "debits ({total_debit}) must equal credits ({total_credit})"
        )));
    }
    if !total_debit.is_positive() {
        return Err(DomainError::validation(
            "journal entry total must be greater than zero",
        ));
    }
    Ok(())
}
