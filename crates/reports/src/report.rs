//! The three standard reports, compiled from aggregator output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tallyerp_core::{DomainError, DomainResult, Money};
use tallyerp_ledger::{AccountKind, ChartOfAccounts, Journal};

use crate::balance::{account_balances, DateFilter};
use crate::cell::Cell;

/// One account row of the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account_code: String,
    pub account_name: String,
    pub debit_balance: Money,
    pub credit_balance: Money,
}

/// Trial balance: every touched account's net debit or credit balance,
/// all time, sorted by account code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub grand_total_debit: Money,
    pub grand_total_credit: Money,
}

pub fn trial_balance(chart: &ChartOfAccounts, journal: &Journal) -> TrialBalance {
    let mut rows = Vec::new();
    let mut grand_total_debit = Money::ZERO;
    let mut grand_total_credit = Money::ZERO;

    for activity in account_balances(chart, journal, DateFilter::AllTime, None) {
        let debit_balance = (activity.total_debit - activity.total_credit).max(Money::ZERO);
        let credit_balance = (activity.total_credit - activity.total_debit).max(Money::ZERO);
        grand_total_debit += debit_balance;
        grand_total_credit += credit_balance;
        rows.push(TrialBalanceRow {
            account_code: activity.account.code,
            account_name: activity.account.name,
            debit_balance,
            credit_balance,
        });
    }

    TrialBalance {
        rows,
        grand_total_debit,
        grand_total_credit,
    }
}

impl TrialBalance {
    /// Render as a uniform cell grid for external report renderers.
    pub fn cells(&self) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![
            Cell::header("Code"),
            Cell::header("Account"),
            Cell::header("Debit"),
            Cell::header("Credit"),
        ]];
        for row in &self.rows {
            grid.push(vec![
                Cell::text(&row.account_code),
                Cell::text(&row.account_name),
                Cell::amount(row.debit_balance),
                Cell::amount(row.credit_balance),
            ]);
        }
        grid.push(vec![
            Cell::header(""),
            Cell::header("Total"),
            Cell::total(self.grand_total_debit),
            Cell::total(self.grand_total_credit),
        ]);
        grid
    }
}

/// One named balance line of a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub account_code: String,
    pub account_name: String,
    pub amount: Money,
}

/// Income statement over a half-open period `[from, to)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub revenue: Vec<ReportRow>,
    pub expenses: Vec<ReportRow>,
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub net_income: Money,
}

pub fn income_statement(
    chart: &ChartOfAccounts,
    journal: &Journal,
    from: NaiveDate,
    to: NaiveDate,
) -> DomainResult<IncomeStatement> {
    if from > to {
        return Err(DomainError::validation(
            "income statement start date must not be after end date",
        ));
    }
    let filter = DateFilter::Range { from, to };
    let (revenue, total_revenue) = section(chart, journal, filter, AccountKind::Revenue);
    let (expenses, total_expenses) = section(chart, journal, filter, AccountKind::Expense);

    Ok(IncomeStatement {
        from,
        to,
        revenue,
        expenses,
        total_revenue,
        total_expenses,
        net_income: total_revenue - total_expenses,
    })
}

impl IncomeStatement {
    pub fn cells(&self) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![Cell::header("Account"), Cell::header("Amount")]];
        grid.push(vec![Cell::header("Revenue"), Cell::header("")]);
        for row in &self.revenue {
            grid.push(vec![Cell::text(&row.account_name), Cell::amount(row.amount)]);
        }
        grid.push(vec![Cell::header("Total Revenue"), Cell::total(self.total_revenue)]);
        grid.push(vec![Cell::header("Expenses"), Cell::header("")]);
        for row in &self.expenses {
            grid.push(vec![Cell::text(&row.account_name), Cell::amount(row.amount)]);
        }
        grid.push(vec![
            Cell::header("Total Expenses"),
            Cell::total(self.total_expenses),
        ]);
        grid.push(vec![Cell::header("Net Income"), Cell::total(self.net_income)]);
        grid
    }
}

/// Balance sheet as of a date (inclusive of the whole day).
///
/// Current-period net income is derived with the income-statement logic over
/// everything up to the as-of date and injected as a synthetic equity line,
/// so `total_assets == total_liabilities + total_equity` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub as_of: NaiveDate,
    pub assets: Vec<ReportRow>,
    pub liabilities: Vec<ReportRow>,
    pub equity: Vec<ReportRow>,
    pub current_period_net_income: Money,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub total_equity: Money,
}

pub fn balance_sheet(chart: &ChartOfAccounts, journal: &Journal, as_of: NaiveDate) -> BalanceSheet {
    let filter = DateFilter::AsOf(as_of);
    let (assets, total_assets) = section(chart, journal, filter, AccountKind::Asset);
    let (liabilities, total_liabilities) = section(chart, journal, filter, AccountKind::Liability);
    let (mut equity, explicit_equity) = section(chart, journal, filter, AccountKind::Equity);

    let (_, revenue) = section(chart, journal, filter, AccountKind::Revenue);
    let (_, expenses) = section(chart, journal, filter, AccountKind::Expense);
    let current_period_net_income = revenue - expenses;

    equity.push(ReportRow {
        account_code: String::new(),
        account_name: "Current Period Net Income".to_string(),
        amount: current_period_net_income,
    });

    BalanceSheet {
        as_of,
        assets,
        liabilities,
        equity,
        current_period_net_income,
        total_assets,
        total_liabilities,
        total_equity: explicit_equity + current_period_net_income,
    }
}

impl BalanceSheet {
    pub fn cells(&self) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![Cell::header("Account"), Cell::header("Amount")]];
        for (title, rows, total) in [
            ("Assets", &self.assets, self.total_assets),
            ("Liabilities", &self.liabilities, self.total_liabilities),
            ("Equity", &self.equity, self.total_equity),
        ] {
            grid.push(vec![Cell::header(title), Cell::header("")]);
            for row in rows {
                grid.push(vec![Cell::text(&row.account_name), Cell::amount(row.amount)]);
            }
            grid.push(vec![
                Cell::header(format!("Total {title}")),
                Cell::total(total),
            ]);
        }
        grid
    }
}

fn section(
    chart: &ChartOfAccounts,
    journal: &Journal,
    filter: DateFilter,
    kind: AccountKind,
) -> (Vec<ReportRow>, Money) {
    let mut total = Money::ZERO;
    let rows = account_balances(chart, journal, filter, Some(&[kind]))
        .into_iter()
        .map(|activity| {
            let amount = activity.balance();
            total += amount;
            ReportRow {
                account_code: activity.account.code,
                account_name: activity.account.name,
                amount,
            }
        })
        .collect();
    (rows, total)
}
