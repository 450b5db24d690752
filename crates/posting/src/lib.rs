//! Event-driven posting: business events → balanced journal entries.
//!
//! The poster translates events from the surrounding subsystems (purchasing,
//! invoicing, payments) into candidate journal entries and submits them to
//! the posting validator. Posting is a best-effort side effect of the
//! triggering business operation: it never fails that operation, it only
//! reports its own outcome.

pub mod event;
pub mod poster;

pub use event::{
    BusinessEvent, GoodsReceived, PaymentAmountChanged, PaymentDeleted, PaymentRecorded,
    ReceiptLine, SaleLine, SaleRecorded,
};
pub use poster::{EventPoster, PostingStatus};
