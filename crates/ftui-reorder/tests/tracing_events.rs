#![forbid(unsafe_code)]

//! Structured tracing emitted by the reorder engine.
//!
//! Run:
//!   cargo test -p ftui-reorder --test tracing_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ftui_reorder::{ItemRect, Point, ReorderEngine, StaticHost};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

/// Layer recording every event and the name of every span it sees.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

struct CaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

impl CaptureHandle {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn spans(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }

    fn with_message(&self, message: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.message == message)
            .collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
            parent_span_name,
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> CaptureHandle {
    let events = Arc::new(Mutex::new(Vec::new()));
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { events, spans }
}

fn measured_column(n: u32) -> ReorderEngine<u32> {
    let mut engine = ReorderEngine::new();
    engine.sync_items(0..n).unwrap();
    for i in 0..n {
        engine.layout_completed(&i, ItemRect::new(0.0, i as f32 * 50.0, 50.0, 50.0));
    }
    engine
}

#[test]
fn sync_logs_membership_counts() {
    let handle = with_captured_events(|| {
        let mut engine = measured_column(3);
        engine.sync_items([2, 0, 7]).unwrap();
    });

    let syncs = handle.with_message("reorder.sync");
    assert_eq!(syncs.len(), 2);
    let last = &syncs[1];
    assert_eq!(last.level, tracing::Level::DEBUG);
    assert_eq!(last.fields["added"], "1");
    assert_eq!(last.fields["retained"], "2");
    assert_eq!(last.fields["removed"], "1");
    assert_eq!(last.fields["len"], "3");
}

#[test]
fn duplicate_keys_log_a_warning() {
    let handle = with_captured_events(|| {
        let mut engine = ReorderEngine::<u32>::new();
        assert!(engine.sync_items([4, 4]).is_err());
    });

    let rejected = handle.with_message("reorder.sync.rejected");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].level, tracing::Level::WARN);
    assert!(rejected[0].fields["error"].contains("duplicate item key 4"));
}

#[test]
fn collisions_and_commit_are_logged_inside_drag_end_span() {
    let handle = with_captured_events(|| {
        let mut engine = measured_column(4);
        let host = StaticHost::new();
        engine.start_drag(&0, &host).unwrap();
        engine.drag_move(&0, Point::new(5.0, 120.0), &host);
        engine.end_drag();
    });

    let start = handle.with_message("reorder.drag_start");
    assert_eq!(start.len(), 1);
    assert_eq!(start[0].fields["order"], "0");

    let swaps = handle.with_message("reorder.swap");
    assert_eq!(swaps.len(), 2);
    assert!(swaps.iter().all(|event| event.level == tracing::Level::TRACE));

    let collisions = handle.with_message("reorder.collision");
    assert_eq!(collisions.len(), 1);
    assert!(collisions[0].fields["outcome"].contains("Shifted"));

    assert!(handle.spans().iter().any(|name| name == "reorder.drag_end"));
    let commit = handle.with_message("reorder.commit");
    assert_eq!(commit.len(), 1);
    assert_eq!(commit[0].fields["old_index"], "0");
    assert_eq!(commit[0].fields["new_index"], "2");
    assert_eq!(
        commit[0].parent_span_name.as_deref(),
        Some("reorder.drag_end")
    );
}

#[test]
fn unknown_layout_key_is_logged_not_fatal() {
    let handle = with_captured_events(|| {
        let mut engine = measured_column(1);
        assert!(!engine.layout_completed(&99, ItemRect::new(0.0, 0.0, 1.0, 1.0)));
    });

    let unknown = handle.with_message("reorder.layout.unknown_key");
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].fields["key"], "99");
}
