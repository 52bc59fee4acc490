//! Tests for controller-to-controller forwarding
//!
//! # Test Coverage
//!
//! - Position-keyed binding with declared-default fallback
//! - Forward by instance and by class identifier
//! - The forward path's error surface: factory failures propagate
//!   unmodified, bad calls are argument errors, broken declarations are
//!   inspection failures — none of them narrow to "not found"
//! - Pre-forward is the only event a forward emits
//! - A full dispatch that forwards internally emits all four lifecycle
//!   events in pipeline order

use frontroute::{
    ArgumentError, ControllerFactory, EventBroker, EventKind, ForwardError, ForwardTarget,
    Forwarder, FrontController, HttpRequest,
};
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{MyController, RelayController};
use tracing_util::TestTracing;

fn forwarder() -> Forwarder {
    Forwarder::new(Arc::new(common::factory()), Arc::new(EventBroker::new()))
}

#[test]
fn test_forward_by_instance() {
    let _tracing = TestTracing::init();
    let target = MyController::new();
    let response = forwarder()
        .forward(ForwardTarget::Instance(&target), "foo", &[json!("bar")])
        .unwrap();
    // baz falls back to its declared default ""
    assert_eq!(response.content(), "bar");
}

#[test]
fn test_forward_by_identifier_binds_both_positions() {
    let response = forwarder()
        .forward(
            ForwardTarget::Identifier("my"),
            "foo",
            &[json!("bar"), json!("baz2")],
        )
        .unwrap();
    assert_eq!(response.content(), "barbaz2");
}

#[test]
fn test_forward_unknown_identifier_propagates_factory_failure() {
    let err = forwarder()
        .forward(ForwardTarget::Identifier("nope"), "foo", &[json!("bar")])
        .unwrap_err();

    // not translated into a not-found condition
    match err {
        ForwardError::ClassNotFound(inner) => assert_eq!(inner.identifier, "nope"),
        other => panic!("expected ClassNotFound, got {other:?}"),
    }
}

#[test]
fn test_forward_unknown_action_is_argument_error() {
    let err = forwarder()
        .forward(ForwardTarget::Identifier("my"), "baz", &[])
        .unwrap_err();

    match &err {
        ForwardError::Argument(ArgumentError::NotCallable { controller, action }) => {
            assert_eq!(controller, "my");
            assert_eq!(action, "baz");
        }
        other => panic!("expected NotCallable, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "controller [my] does not define a callable action [baz]"
    );
}

#[test]
fn test_forward_missing_required_argument() {
    let err = forwarder()
        .forward(ForwardTarget::Identifier("my"), "foo", &[])
        .unwrap_err();

    match err {
        ForwardError::Argument(ArgumentError::MissingArgument { ref name, .. }) => {
            assert_eq!(name, "bar");
        }
        other => panic!("expected MissingArgument, got {other:?}"),
    }
}

#[test]
fn test_forward_broken_declaration_is_inspection_failure() {
    let err = forwarder()
        .forward(ForwardTarget::Identifier("broken"), "bad", &[json!("x")])
        .unwrap_err();

    match err {
        ForwardError::Inspection(inner) => {
            assert!(inner.to_string().contains("duplicate parameter"));
        }
        other => panic!("expected Inspection, got {other:?}"),
    }
}

#[test]
fn test_forward_fires_pre_forward_only() {
    let mut broker = EventBroker::new();
    let seen = common::record_events(&mut broker);
    let forwarder = Forwarder::new(Arc::new(common::factory()), Arc::new(broker));

    forwarder
        .forward(ForwardTarget::Identifier("my"), "foo", &[json!("bar")])
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![EventKind::PreForward]);
}

#[test]
fn test_failing_pre_forward_subscriber_aborts() {
    let mut broker = EventBroker::new();
    broker.subscribe(EventKind::PreForward, |_| anyhow::bail!("listener down"));
    let forwarder = Forwarder::new(Arc::new(common::factory()), Arc::new(broker));

    let err = forwarder
        .forward(ForwardTarget::Identifier("my"), "foo", &[json!("bar")])
        .unwrap_err();
    match err {
        ForwardError::Subscriber(inner) => assert_eq!(inner.event, EventKind::PreForward),
        other => panic!("expected Subscriber, got {other:?}"),
    }
}

#[test]
fn test_dispatch_with_internal_forward_emits_all_lifecycle_events() {
    let _tracing = TestTracing::init();
    let mut broker = EventBroker::new();
    let seen = common::record_events(&mut broker);
    let broker = Arc::new(broker);

    let forwarder = Arc::new(Forwarder::new(
        Arc::new(common::factory()),
        Arc::clone(&broker),
    ));
    let mut factory = common::factory();
    factory.register("relay", move || {
        Box::new(RelayController::new(Arc::clone(&forwarder)))
    });

    let front = FrontController::new(common::routing_table(), Arc::new(factory), broker);
    let response = front.dispatch(&HttpRequest::get("/relay")).unwrap();

    assert_eq!(response.content(), "bar");
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            EventKind::PreDispatch,
            EventKind::PostRoute,
            EventKind::PreForward,
            EventKind::PostDispatch
        ]
    );
}

#[test]
fn test_forward_target_constructed_fresh_per_resolution() {
    let mut factory = ControllerFactory::new();
    factory.register("my", || Box::new(MyController::new()));
    let factory = Arc::new(factory);
    assert!(factory.contains("my"));

    let forwarder = Forwarder::new(Arc::clone(&factory), Arc::new(EventBroker::new()));
    for _ in 0..2 {
        let response = forwarder
            .forward(ForwardTarget::Identifier("my"), "foo", &[json!("x")])
            .unwrap();
        assert_eq!(response.content(), "x");
    }
}
