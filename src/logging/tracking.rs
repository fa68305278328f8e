//! Timing and call records
//!
//! A [`TimeGuard`] logs how long a scope took when it is dropped. Timing
//! records share one message shape so they can be pulled back out of a log
//! file with [`parse_tracked_time`].

use std::panic::Location;
use std::time::{Duration, Instant};

use super::logger::Logger;

const TRACK_TIME_PREFIX: &str = "Time tracker: '";
const TRACK_TIME_INFIX: &str = "' finished in ";

/// Render the message of a timing record
pub fn format_tracked_time(name: &str, elapsed: Duration) -> String {
    format!(
        "{}{}{}{:.6}s",
        TRACK_TIME_PREFIX,
        name,
        TRACK_TIME_INFIX,
        elapsed.as_secs_f64()
    )
}

/// Extract the name and duration from a line holding a timing record
///
/// Accepts a bare message or a full formatted log line.
pub fn parse_tracked_time(line: &str) -> Option<(String, Duration)> {
    let start = line.find(TRACK_TIME_PREFIX)? + TRACK_TIME_PREFIX.len();
    let rest = &line[start..];
    let split = rest.rfind(TRACK_TIME_INFIX)?;

    let name = &rest[..split];
    let seconds = rest[split + TRACK_TIME_INFIX.len()..]
        .trim_end()
        .strip_suffix('s')?
        .parse::<f64>()
        .ok()?;

    Duration::try_from_secs_f64(seconds)
        .ok()
        .map(|elapsed| (name.to_string(), elapsed))
}

/// Logs the time elapsed since its creation when dropped
///
/// Created by [`Logger::time_guard`]; the record carries the location of
/// that call.
#[must_use = "the elapsed time is logged when the guard is dropped"]
pub struct TimeGuard {
    logger: Logger,
    name: String,
    start: Instant,
    location: &'static Location<'static>,
}

impl TimeGuard {
    pub(super) fn new(logger: Logger, name: String, location: &'static Location<'static>) -> Self {
        Self {
            logger,
            name,
            start: Instant::now(),
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time elapsed so far
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for TimeGuard {
    fn drop(&mut self) {
        let message = format_tracked_time(&self.name, self.start.elapsed());
        let level = self.logger.decorator_level();
        self.logger.emit(level, self.location, &message);
    }
}
