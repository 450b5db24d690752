//! `tallyerp-service` — synchronous facade over the ledger core.
//!
//! Exposes the operations the surrounding application consumes: chart of
//! accounts CRUD, journal posting and reads, business-event posting, and the
//! three derived reports. HTTP routing, authentication and rendering live in
//! the collaborators, not here.

pub mod services;
pub mod telemetry;


pub use services::LedgerServices;
