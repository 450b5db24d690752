//! Business events consumed from the surrounding subsystems.
//!
//! Events carry only what the ledger needs: a business date, the monetary
//! figures, a free-form correlation reference, and the acting user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tallyerp_core::{EntryId, Money, UserId};

/// One received line of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Quantity newly received (not the cumulative received total).
    pub quantity_received: i64,
    pub unit_price: Money,
}

/// One line item of a recorded sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub quantity: i64,
    /// Unit cost of the sold product. `None` when the product could not be
    /// resolved; such lines contribute nothing to cost of goods sold.
    pub purchase_price: Option<Money>,
}

/// Goods received against a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsReceived {
    pub date: NaiveDate,
    /// Purchase order number.
    pub reference: Option<String>,
    pub lines: Vec<ReceiptLine>,
    pub actor: UserId,
}

/// Sale recorded (invoice finalized, not draft).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecorded {
    pub date: NaiveDate,
    /// Invoice number.
    pub reference: Option<String>,
    pub sub_total: Money,
    pub tax_amount: Money,
    pub grand_total: Money,
    pub lines: Vec<SaleLine>,
    pub actor: UserId,
}

impl SaleRecorded {
    /// Cost of goods sold over the resolvable line items.
    pub fn cost_of_goods_sold(&self) -> Money {
        self.lines
            .iter()
            .filter_map(|l| l.purchase_price.map(|p| p.times(l.quantity)))
            .sum()
    }
}

/// Payment recorded against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecorded {
    pub date: NaiveDate,
    /// Payment or invoice identifier.
    pub reference: Option<String>,
    pub amount: Money,
    pub actor: UserId,
}

/// Payment amount corrected after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAmountChanged {
    pub date: NaiveDate,
    pub reference: Option<String>,
    pub old_amount: Money,
    pub new_amount: Money,
    /// The ledger entry posted for the original payment, when known.
    pub correction_of: Option<EntryId>,
    pub actor: UserId,
}

/// Payment deleted; its posting is reversed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDeleted {
    pub date: NaiveDate,
    pub reference: Option<String>,
    pub amount: Money,
    pub correction_of: Option<EntryId>,
    pub actor: UserId,
}

/// Domain events with an accounting side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusinessEvent {
    GoodsReceived(GoodsReceived),
    SaleRecorded(SaleRecorded),
    PaymentRecorded(PaymentRecorded),
    PaymentAmountChanged(PaymentAmountChanged),
    PaymentDeleted(PaymentDeleted),
}

impl BusinessEvent {
    /// Stable event name/type identifier.
    pub fn event_type(&self) -> &'static str {
        match self {
            BusinessEvent::GoodsReceived(_) => "purchasing.goods_received",
            BusinessEvent::SaleRecorded(_) => "invoicing.sale_recorded",
            BusinessEvent::PaymentRecorded(_) => "invoicing.payment_recorded",
            BusinessEvent::PaymentAmountChanged(_) => "invoicing.payment_amount_changed",
            BusinessEvent::PaymentDeleted(_) => "invoicing.payment_deleted",
        }
    }

    /// Business date the derived entry is posted under.
    pub fn date(&self) -> NaiveDate {
        match self {
            BusinessEvent::GoodsReceived(e) => e.date,
            BusinessEvent::SaleRecorded(e) => e.date,
            BusinessEvent::PaymentRecorded(e) => e.date,
            BusinessEvent::PaymentAmountChanged(e) => e.date,
            BusinessEvent::PaymentDeleted(e) => e.date,
        }
    }

    pub fn actor(&self) -> UserId {
        match self {
            BusinessEvent::GoodsReceived(e) => e.actor,
            BusinessEvent::SaleRecorded(e) => e.actor,
            BusinessEvent::PaymentRecorded(e) => e.actor,
            BusinessEvent::PaymentAmountChanged(e) => e.actor,
            BusinessEvent::PaymentDeleted(e) => e.actor,
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            BusinessEvent::GoodsReceived(e) => e.reference.as_deref(),
            BusinessEvent::SaleRecorded(e) => e.reference.as_deref(),
            BusinessEvent::PaymentRecorded(e) => e.reference.as_deref(),
            BusinessEvent::PaymentAmountChanged(e) => e.reference.as_deref(),
            BusinessEvent::PaymentDeleted(e) => e.reference.as_deref(),
        }
    }
}
