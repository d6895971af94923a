#![forbid(unsafe_code)]

//! Structured log events emitted by the submission path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use contact_core::{FieldEdit, QueryType};
use contact_runtime::form::{ContactForm, FormMsg};
use contact_runtime::simulator::ProgramSimulator;

use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    fn new() -> (Self, Arc<Mutex<Vec<CapturedEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: events.clone(),
            },
            events,
        )
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

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

fn with_capture(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let (layer, events) = EventCapture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> Option<&'a CapturedEvent> {
    events.iter().find(|e| e.message == message)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn accepted_submit_logs_success_at_info() {
    let events = with_capture(|| {
        let mut sim = ProgramSimulator::new(ContactForm::default());
        for edit in [
            FieldEdit::FirstName("Ada".into()),
            FieldEdit::LastName("Lovelace".into()),
            FieldEdit::Email("ada@example.com".into()),
            FieldEdit::QueryType(Some(QueryType::Support)),
            FieldEdit::Message("Engines".into()),
            FieldEdit::Consent(true),
        ] {
            sim.send(FormMsg::Edit(edit));
        }
        sim.send(FormMsg::Submit);
    });

    let ok = find(&events, "validation successful").expect("success event");
    assert_eq!(ok.level, tracing::Level::INFO);
    assert_eq!(ok.fields.get("query_type").map(String::as_str), Some("support"));
    assert_eq!(ok.fields.get("attempt").map(String::as_str), Some("1"));
    assert!(find(&events, "notice shown").is_some());
    assert!(find(&events, "validation failed").is_none());
}

#[test]
fn rejected_submit_logs_failed_fields() {
    let events = with_capture(|| {
        let mut sim = ProgramSimulator::new(ContactForm::default());
        sim.send(FormMsg::Edit(FieldEdit::FirstName("Ada".into())));
        sim.send(FormMsg::Submit);
    });

    let failed = find(&events, "validation failed").expect("failure event");
    assert_eq!(failed.level, tracing::Level::DEBUG);
    assert_eq!(
        failed.fields.get("failed").map(String::as_str),
        Some("lastName,email,queryType,message,consent")
    );
    assert!(find(&events, "validation successful").is_none());
}

#[test]
fn edits_log_field_name() {
    let events = with_capture(|| {
        let mut sim = ProgramSimulator::new(ContactForm::default());
        sim.send(FormMsg::Edit(FieldEdit::Consent(true)));
    });

    let edit = find(&events, "field edited").expect("edit event");
    assert_eq!(edit.fields.get("field").map(String::as_str), Some("consent"));
}
