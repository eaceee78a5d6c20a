//! In-memory capture of log events for test assertions

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use revstore_core_types::schema;

/// One recorded event with its fields rendered as strings
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: String) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

/// Handle onto the captured events
///
/// The handle is itself the capture layer: clones share one buffer.
#[derive(Clone, Default)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for TestCapture
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let fields = visitor.fields;
        let lookup = |key: &str| fields.get(key).cloned();

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: lookup(schema::FIELD_COMPONENT),
            op: lookup(schema::FIELD_OP),
            event: lookup(schema::FIELD_EVENT),
            fields: fields.clone(),
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.op.as_deref() == Some(op))
    }

    /// Most recent event of `op` with lifecycle `event`
    pub fn find_event(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        self.filtered(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event))
            .pop()
    }

    /// # Panics
    /// Panics if no event with `op` and `event` was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        if self.find_event(op, event).is_none() {
            panic!(
                "no {} event for op {} among {} captured",
                event,
                op,
                self.events().len()
            );
        }
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    pub fn count_events(&self, predicate: impl Fn(&CapturedEvent) -> bool) -> usize {
        self.filtered(predicate).len()
    }

    fn filtered(&self, predicate: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| predicate(e)).collect()
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber and return its handle
///
/// Every call returns a handle onto the same buffer. Tests sharing a binary
/// see each other's events, so filter by op or by a unique field.
///
/// ```
/// use revstore_core::log_op_start;
/// use revstore_core::logging_facility::init_test_capture;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let capture = TestCapture::default();
            let _ = tracing_subscriber::registry()
                .with(capture.clone())
                .try_init();
            capture
        })
        .clone()
}
