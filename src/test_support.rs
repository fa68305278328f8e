//! Test helpers for asserting on internal diagnostics

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Events recorded by [`capture`]
#[derive(Debug, Clone, Default)]
pub struct CapturedEvents(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedEvents {
    /// All recorded events with their level
    pub fn all(&self) -> Vec<(Level, String)> {
        self.0.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Messages recorded at WARN
    pub fn warnings(&self) -> Vec<String> {
        self.at(Level::WARN)
    }

    /// Messages recorded at the given level
    pub fn at(&self, level: Level) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0.insert_str(0, &format!("{:?}", value));
        } else {
            self.0.push_str(&format!(" {}={:?}", field.name(), value));
        }
    }
}

struct CaptureLayer {
    events: CapturedEvents,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        if let Ok(mut events) = self.events.0.lock() {
            events.push((*event.metadata().level(), visitor.0));
        }
    }
}

/// Run `f` with a subscriber that records every event on this thread
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, CapturedEvents) {
    let events = CapturedEvents::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        events: events.clone(),
    });
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, events)
}
