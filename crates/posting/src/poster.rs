//! Translation of business events into journal postings.

use serde::{Deserialize, Serialize};
use tracing::warn;

use tallyerp_core::{EntryId, Money};
use tallyerp_ledger::{
    AccountRole, ChartOfAccounts, Journal, Line, NewJournalEntry, RoleBindings,
};

use crate::event::BusinessEvent;

/// Outcome of applying one business event to the ledger.
///
/// Surfaced to the caller so a skipped posting is visible on the response of
/// the triggering business operation instead of disappearing into a log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PostingStatus {
    /// A balanced entry was accepted by the validator.
    Posted { entry_id: EntryId },
    /// The event carries nothing to post (zero receipt, zero-total sale,
    /// unchanged payment amount).
    NotApplicable,
    /// The posting could not be made. The business operation still succeeds;
    /// the books diverge until an operator fixes the cause.
    Skipped { reason: String },
}

impl PostingStatus {
    pub fn is_posted(&self) -> bool {
        matches!(self, PostingStatus::Posted { .. })
    }
}

/// Event-driven poster bound to the well-known role accounts.
#[derive(Debug, Clone)]
pub struct EventPoster {
    bindings: RoleBindings,
}

/// A translated candidate: description, lines, optional correction tag.
struct Translation {
    description: String,
    lines: Vec<Line>,
    correction_of: Option<EntryId>,
}

impl EventPoster {
    pub fn new(bindings: RoleBindings) -> Self {
        Self { bindings }
    }

    /// Apply one event: translate, validate, append.
    ///
    /// Never returns an error. A failed translation or a rejected entry is
    /// logged as a warning and reported as `Skipped`.
    pub fn apply(
        &self,
        chart: &ChartOfAccounts,
        journal: &mut Journal,
        event: &BusinessEvent,
    ) -> PostingStatus {
        let translation = match self.translate(event) {
            Ok(Some(t)) => t,
            Ok(None) => return PostingStatus::NotApplicable,
            Err(reason) => {
                warn!(event = event.event_type(), %reason, "ledger posting skipped");
                return PostingStatus::Skipped { reason };
            }
        };

        let candidate = NewJournalEntry {
            date: event.date(),
            description: translation.description,
            reference_number: event.reference().map(str::to_string),
            correction_of: translation.correction_of,
            lines: translation.lines,
            created_by: event.actor(),
        };

        match journal.post(chart, candidate) {
            Ok(entry) => PostingStatus::Posted { entry_id: entry.id },
            Err(e) => {
                let reason = e.to_string();
                warn!(event = event.event_type(), %reason, "ledger posting skipped");
                PostingStatus::Skipped { reason }
            }
        }
    }

    fn account(&self, role: AccountRole) -> Result<tallyerp_core::AccountId, String> {
        self.bindings
            .account(role)
            .ok_or_else(|| format!("required account '{role}' is not bound"))
    }

    fn translate(&self, event: &BusinessEvent) -> Result<Option<Translation>, String> {
        match event {
            BusinessEvent::GoodsReceived(e) => {
                let amount: Money = e
                    .lines
                    .iter()
                    .map(|l| l.unit_price.times(l.quantity_received))
                    .sum();
                if !amount.is_positive() {
                    return Ok(None);
                }
                let inventory = self.account(AccountRole::Inventory)?;
                let payable = self.account(AccountRole::AccountsPayable)?;
                Ok(Some(Translation {
                    description: match &e.reference {
                        Some(po) => format!("Goods received against PO {po}"),
                        None => "Goods received".to_string(),
                    },
                    lines: vec![Line::debit(inventory, amount), Line::credit(payable, amount)],
                    correction_of: None,
                }))
            }
            BusinessEvent::SaleRecorded(e) => {
                if !e.grand_total.is_positive() {
                    return Ok(None);
                }
                let receivable = self.account(AccountRole::AccountsReceivable)?;
                let revenue = self.account(AccountRole::SalesRevenue)?;
                let cogs = e.cost_of_goods_sold();

                let mut lines = vec![Line::debit(receivable, e.grand_total)];
                if e.sub_total.is_positive() {
                    lines.push(Line::credit(revenue, e.sub_total));
                }
                if cogs.is_positive() {
                    let inventory = self.account(AccountRole::Inventory)?;
                    let cogs_account = self.account(AccountRole::CostOfGoodsSold)?;
                    lines.push(Line::credit(inventory, cogs));
                    lines.push(Line::debit(cogs_account, cogs));
                }
                if e.tax_amount.is_positive() {
                    let tax = self.account(AccountRole::SalesTaxPayable)?;
                    lines.push(Line::credit(tax, e.tax_amount));
                }
                Ok(Some(Translation {
                    description: match &e.reference {
                        Some(inv) => format!("Sale recorded for invoice {inv}"),
                        None => "Sale recorded".to_string(),
                    },
                    lines,
                    correction_of: None,
                }))
            }
            BusinessEvent::PaymentRecorded(e) => {
                let cash = self.account(AccountRole::Cash)?;
                let receivable = self.account(AccountRole::AccountsReceivable)?;
                Ok(Some(Translation {
                    description: match &e.reference {
                        Some(r) => format!("Payment received ({r})"),
                        None => "Payment received".to_string(),
                    },
                    lines: vec![
                        Line::debit(cash, e.amount),
                        Line::credit(receivable, e.amount),
                    ],
                    correction_of: None,
                }))
            }
            BusinessEvent::PaymentAmountChanged(e) => {
                let delta = e.new_amount - e.old_amount;
                if delta.is_zero() {
                    return Ok(None);
                }
                let cash = self.account(AccountRole::Cash)?;
                let receivable = self.account(AccountRole::AccountsReceivable)?;
                let lines = if delta.is_positive() {
                    vec![Line::debit(cash, delta), Line::credit(receivable, delta)]
                } else {
                    vec![
                        Line::debit(receivable, delta.abs()),
                        Line::credit(cash, delta.abs()),
                    ]
                };
                Ok(Some(Translation {
                    description: match &e.reference {
                        Some(r) => format!("Payment amount corrected ({r})"),
                        None => "Payment amount corrected".to_string(),
                    },
                    lines,
                    correction_of: e.correction_of,
                }))
            }
            BusinessEvent::PaymentDeleted(e) => {
                let cash = self.account(AccountRole::Cash)?;
                let receivable = self.account(AccountRole::AccountsReceivable)?;
                Ok(Some(Translation {
                    description: match &e.reference {
                        Some(r) => format!("Payment deleted ({r})"),
                        None => "Payment deleted".to_string(),
                    },
                    lines: vec![
                        Line::debit(receivable, e.amount),
                        Line::credit(cash, e.amount),
                    ],
                    correction_of: e.correction_of,
                }))
            }
        }
    }
}
