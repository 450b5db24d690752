//! Per-account debit/credit aggregation with kind-dependent sign convention.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tallyerp_core::{AccountId, Money};
use tallyerp_ledger::{Account, AccountKind, ChartOfAccounts, Journal};

/// Date restriction applied when aggregating journal lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    /// No restriction (trial balance).
    AllTime,
    /// Half-open range `[from, to)` (income statement).
    Range { from: NaiveDate, to: NaiveDate },
    /// Everything up to and including the whole day (balance sheet).
    AsOf(NaiveDate),
}

impl DateFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            DateFilter::AllTime => true,
            DateFilter::Range { from, to } => date >= from && date < to,
            DateFilter::AsOf(as_of) => date <= as_of,
        }
    }
}

/// Net debit/credit position of one account under a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountActivity {
    pub account: Account,
    pub total_debit: Money,
    pub total_credit: Money,
}

impl AccountActivity {
    /// Signed balance under the account kind's normal-balance convention:
    /// debit-positive for Asset/Expense, credit-positive for the rest.
    pub fn balance(&self) -> Money {
        if self.account.kind.increases_on_debit() {
            self.total_debit - self.total_credit
        } else {
            self.total_credit - self.total_debit
        }
    }
}

/// Aggregate journal lines per account.
///
/// Returns one `AccountActivity` for every account touched by at least one
/// matching line, optionally restricted to the given account kinds, sorted
/// by account code. Lines whose account has since been deleted from the
/// chart cannot be attributed and are excluded.
pub fn account_balances(
    chart: &ChartOfAccounts,
    journal: &Journal,
    filter: DateFilter,
    kinds: Option<&[AccountKind]>,
) -> Vec<AccountActivity> {
    let mut totals: HashMap<AccountId, (Money, Money)> = HashMap::new();
    for entry in journal.entries() {
        if !filter.matches(entry.date) {
            continue;
        }
        for line in &entry.lines {
            let slot = totals.entry(line.account_id).or_default();
            slot.0 += line.debit;
            slot.1 += line.credit;
        }
    }

    let mut activities: Vec<AccountActivity> = totals
        .into_iter()
        .filter_map(|(account_id, (total_debit, total_credit))| {
            let account = chart.find(account_id)?;
            if let Some(kinds) = kinds {
                if !kinds.contains(&account.kind) {
                    return None;
                }
            }
            Some(AccountActivity {
                account: account.clone(),
                total_debit,
                total_credit,
            })
        })
        .collect();
    activities.sort_by(|a, b| a.account.code.cmp(&b.account.code));
    activities
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tallyerp_core::UserId;
    use tallyerp_ledger::{Line, NewAccount, NewJournalEntry};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn post(
        chart: &ChartOfAccounts,
        journal: &mut Journal,
        day: NaiveDate,
        debit: AccountId,
        credit: AccountId,
        amount: Money,
    ) {
        journal
            .post(
                chart,
                NewJournalEntry {
                    date: day,
                    description: "test".to_string(),
                    reference_number: None,
                    correction_of: None,
                    lines: vec![Line::debit(debit, amount), Line::credit(credit, amount)],
                    created_by: UserId::new(),
                },
            )
            .unwrap();
    }

    fn small_chart() -> (ChartOfAccounts, AccountId, AccountId) {
        let mut chart = ChartOfAccounts::new();
        let ar = chart
            .create(NewAccount {
                name: "Accounts Receivable".to_string(),
                code: "1200".to_string(),
                kind: AccountKind::Asset,
                description: String::new(),
                is_active: true,
            })
            .unwrap()
            .id;
        let revenue = chart
            .create(NewAccount {
                name: "Sales Revenue".to_string(),
                code: "4000".to_string(),
                kind: AccountKind::Revenue,
                description: String::new(),
                is_active: true,
            })
            .unwrap()
            .id;
        (chart, ar, revenue)
    }

    #[test]
    fn range_filter_is_half_open_and_as_of_includes_the_day() {
        let range = DateFilter::Range {
            from: date(10),
            to: date(20),
        };
        assert!(!range.matches(date(9)));
        assert!(range.matches(date(10)));
        assert!(range.matches(date(19)));
        assert!(!range.matches(date(20)));

        let as_of = DateFilter::AsOf(date(15));
        assert!(as_of.matches(date(15)));
        assert!(as_of.matches(date(1)));
        assert!(!as_of.matches(date(16)));
    }

    #[test]
    fn balances_apply_the_kind_sign_convention() {
        let (chart, ar, revenue) = small_chart();
        let mut journal = Journal::new();
        post(&chart, &mut journal, date(1), ar, revenue, Money::from_major(100));

        let balances = account_balances(&chart, &journal, DateFilter::AllTime, None);
        assert_eq!(balances.len(), 2);
        // Sorted by code: 1200 before 4000.
        assert_eq!(balances[0].account.code, "1200");
        assert_eq!(balances[0].balance(), Money::from_major(100));
        assert_eq!(balances[1].account.code, "4000");
        assert_eq!(balances[1].balance(), Money::from_major(100));
    }

    #[test]
    fn kind_filter_restricts_accounts() {
        let (chart, ar, revenue) = small_chart();
        let mut journal = Journal::new();
        post(&chart, &mut journal, date(1), ar, revenue, Money::from_major(40));

        let revenue_only = account_balances(
            &chart,
            &journal,
            DateFilter::AllTime,
            Some(&[AccountKind::Revenue]),
        );
        assert_eq!(revenue_only.len(), 1);
        assert_eq!(revenue_only[0].account.kind, AccountKind::Revenue);
    }

    #[test]
    fn date_filter_restricts_entries() {
        let (chart, ar, revenue) = small_chart();
        let mut journal = Journal::new();
        post(&chart, &mut journal, date(5), ar, revenue, Money::from_major(10));
        post(&chart, &mut journal, date(25), ar, revenue, Money::from_major(7));

        let filtered = account_balances(
            &chart,
            &journal,
            DateFilter::Range {
                from: date(1),
                to: date(20),
            },
            None,
        );
        assert_eq!(filtered[0].total_debit, Money::from_major(10));
    }

    #[test]
    fn untouched_accounts_do_not_appear() {
        let (chart, _, _) = small_chart();
        let journal = Journal::new();
        assert!(account_balances(&chart, &journal, DateFilter::AllTime, None).is_empty());
    }
}
