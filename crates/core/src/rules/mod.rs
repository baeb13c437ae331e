//! Pure decision rules.
//!
//! Nothing in here performs I/O or reads the clock; callers pass the local
//! time and the matched zone in.

mod effective;
mod gateways;
mod payments;
mod registry;
mod schedule;
mod temporal;

pub use effective::effective_store;
pub use gateways::filter_gateways;
pub use payments::{PaymentRules, Reconciliation, normalize_titles, reconcile};
pub use registry::{StoreRegistry, default_catalog};
pub use schedule::CutoffSchedule;
pub use temporal::{
    ScheduledDateError, TemporalFlags, classify, is_future_date, parse_scheduled_date,
};
