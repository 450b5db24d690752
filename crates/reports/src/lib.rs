//! Derived financial reports.
//!
//! Nothing in this crate is persisted: every report is a pure function of the
//! chart of accounts, the journal and a date filter, recomputed on demand.

pub mod balance;
pub mod cell;
pub mod report;

pub use balance::{account_balances, AccountActivity, DateFilter};
pub use cell::{Alignment, Cell, CellStyle};
pub use report::{
    balance_sheet, income_statement, trial_balance, BalanceSheet, IncomeStatement, ReportRow,
    TrialBalance, TrialBalanceRow,
};
