//! Payroll computation core.
//!
//! Everything in here is pure: no I/O, no shared state. The HTTP handlers and
//! the slip repository call into these functions and persist what comes back.

pub(crate) mod macros;

pub mod aggregate;
pub mod error;
pub mod line;
pub mod money;
pub mod month;
pub mod proration;
pub mod record;
pub mod slip;

pub use aggregate::{SlipSummary, aggregate};
pub use error::PayrollError;
pub use line::{LineAmount, LineKind, resolve_line_amount};
pub use money::{money_or_zero, parse_money_or_zero, round_money};
pub use month::PayrollMonth;
pub use proration::{TaskRates, prorate, prorate_assignees};
pub use record::{AssigneeRateConfig, JobType, PayType, WorkRecord, WorkerRates};
pub use slip::{PayStatus, PayrollSlip, SlipDraft, SlipLine, finalize, format_slip_no, net_amount};
