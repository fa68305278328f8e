//! Logger instances and their output
//!
//! Records are formatted into aligned columns and written to a console sink,
//! a file sink, or both, each with its own minimum severity.

mod format;
mod logger;
mod sink;
mod tracking;

pub use format::{Record, RecordFormatter};
pub use logger::{Logger, LoggerId, MonitoringState};
pub use sink::{forward_to_tracing, Sink};
pub use tracking::{format_tracked_time, parse_tracked_time, TimeGuard};
