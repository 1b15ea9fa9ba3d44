//! Test capture mode for deterministic logging assertions
//!
//! Installs a process-wide subscriber that records events in memory so
//! tests can assert which operation boundaries were logged.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use envx_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP, FIELD_REQUEST_ID};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// A captured log event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub request_id: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Field value rendered as text, if the event carried it
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Collects every field as text; numbers and bools print the same via `Debug`
#[derive(Default)]
struct TextFields(HashMap<String, String>);

impl Visit for TextFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl CapturedEvent {
    fn from_event(event: &tracing::Event<'_>) -> Self {
        let mut visitor = TextFields::default();
        event.record(&mut visitor);
        let fields = visitor.0;
        let text = |key: &str| fields.get(key).cloned();

        Self {
            level: *event.metadata().level(),
            component: text(FIELD_COMPONENT),
            op: text(FIELD_OP),
            event: text(FIELD_EVENT),
            request_id: text(FIELD_REQUEST_ID),
            fields,
        }
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer(EventLog);

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let captured = CapturedEvent::from_event(event);
        if let Ok(mut log) = self.0.lock() {
            log.push(captured);
        }
    }
}

/// Handle for accessing captured events in tests
#[derive(Clone)]
pub struct TestCapture {
    events: EventLog,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events recorded for a single operation, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// # Panics
    ///
    /// Panics unless `op` logged `event` at least once
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event));
        assert!(
            found,
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    /// Count events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Initialize test capture mode
///
/// Returns the shared capture handle. The subscriber is global to the test
/// binary, so tests should filter by a unique op name.
///
/// # Example
///
/// ```
/// use envx_core::logging_facility::test_capture::init_test_capture;
/// use envx_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("render_value");
/// capture.assert_event_exists("render_value", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = EventLog::default();
            // Another subscriber may already own the global slot in this binary
            let _ = tracing_subscriber::registry()
                .with(CaptureLayer(Arc::clone(&events)))
                .try_init();
            TestCapture { events }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_event_field_lookup() {
        let mut fields = HashMap::new();
        fields.insert("org".to_string(), "acme".to_string());
        let event = CapturedEvent {
            level: Level::INFO,
            component: Some("envx_core::render".to_string()),
            op: Some("render_value".to_string()),
            event: Some("start".to_string()),
            request_id: None,
            fields,
        };

        assert_eq!(event.field("org"), Some("acme"));
        assert_eq!(event.field("env"), None);
        assert_eq!(event.clone().op, event.op);
    }
}
