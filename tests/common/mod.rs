//! Shared fixtures for the integration test-suite: test controllers, the
//! routing table they are wired into, and an event recorder.

#![allow(dead_code)]

use frontroute::{
    ActionTable, Controller, ControllerFactory, EventBroker, EventKind, ForwardTarget, Forwarder,
    FrontController, ParamSpec, Response, Route, RouteTable,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

fn text_arg(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Controller with a no-arg action and a two-arg action, mirroring the
/// dispatch scenarios: `default()` and `hello_world(foo, bar = "baz")`.
pub struct HelloWorldController {
    actions: ActionTable,
}

impl HelloWorldController {
    pub fn new() -> Self {
        let actions = ActionTable::new()
            .action("default", Vec::new(), |_| Response::text(200, "default"))
            .action(
                "hello_world",
                vec![ParamSpec::required("foo"), ParamSpec::optional("bar", "baz")],
                |args| {
                    Response::text(200, &format!("{}-{}", text_arg(&args[0]), text_arg(&args[1])))
                },
            );
        Self { actions }
    }
}

impl Controller for HelloWorldController {
    fn identifier(&self) -> &str {
        "hello"
    }

    fn actions(&self) -> &ActionTable {
        &self.actions
    }
}

/// Forward-target controller: `foo(bar, baz = "")`.
pub struct MyController {
    actions: ActionTable,
}

impl MyController {
    pub fn new() -> Self {
        let actions = ActionTable::new().action(
            "foo",
            vec![ParamSpec::required("bar"), ParamSpec::optional("baz", "")],
            |args| Response::text(200, &format!("{}{}", text_arg(&args[0]), text_arg(&args[1]))),
        );
        Self { actions }
    }
}

impl Controller for MyController {
    fn identifier(&self) -> &str {
        "my"
    }

    fn actions(&self) -> &ActionTable {
        &self.actions
    }
}

/// Controller whose `bad` action carries a structurally broken declaration
/// (duplicate parameter names).
pub struct BrokenController {
    actions: ActionTable,
}

impl BrokenController {
    pub fn new() -> Self {
        let actions = ActionTable::new().action(
            "bad",
            vec![ParamSpec::required("a"), ParamSpec::required("a")],
            |_| Response::text(200, "unreachable"),
        );
        Self { actions }
    }
}

impl Controller for BrokenController {
    fn identifier(&self) -> &str {
        "broken"
    }

    fn actions(&self) -> &ActionTable {
        &self.actions
    }
}

/// Controller whose `relay` action forwards to `my.foo("bar")`.
pub struct RelayController {
    actions: ActionTable,
}

impl RelayController {
    pub fn new(forwarder: Arc<Forwarder>) -> Self {
        let actions = ActionTable::new().action("relay", Vec::new(), move |_| {
            forwarder
                .forward(ForwardTarget::Identifier("my"), "foo", &[json!("bar")])
                .unwrap_or_else(|err| Response::error(500, &err.to_string()))
        });
        Self { actions }
    }
}

impl Controller for RelayController {
    fn identifier(&self) -> &str {
        "relay"
    }

    fn actions(&self) -> &ActionTable {
        &self.actions
    }
}

fn route(name: &str, path: &str) -> Route {
    Route::build(name, path)
        .default("controller", "hello")
        .default("action", "default")
        .finish()
        .expect("route fixture compiles")
}

/// The routing table the dispatch scenarios run against.
pub fn routing_table() -> RouteTable {
    let mut table = RouteTable::new();
    table.add(route("default", "/default"));
    table.add(
        Route::build("with-args", "/with-args/{foo}/{bar}")
            .default("controller", "hello")
            .default("action", "hello_world")
            .finish()
            .expect("route fixture compiles"),
    );
    table.add(
        Route::build("omitted-args", "/omitted-args/{foo}/{bar}")
            .default("controller", "hello")
            .default("action", "hello_world")
            .default("bar", "bar")
            .finish()
            .expect("route fixture compiles"),
    );
    table.add(
        Route::build("declared-default", "/declared-default/{foo}")
            .default("controller", "hello")
            .default("action", "hello_world")
            .finish()
            .expect("route fixture compiles"),
    );
    table.add(
        Route::build("missing-controller", "/missing-controller")
            .default("action", "default")
            .finish()
            .expect("route fixture compiles"),
    );
    table.add(
        Route::build("missing-action", "/missing-action")
            .default("controller", "hello")
            .finish()
            .expect("route fixture compiles"),
    );
    table.add(
        Route::build("unknown-controller", "/unknown-controller")
            .default("controller", "unknown")
            .default("action", "default")
            .finish()
            .expect("route fixture compiles"),
    );
    table.add(
        Route::build("unknown-action", "/unknown-action")
            .default("controller", "hello")
            .default("action", "unknown")
            .finish()
            .expect("route fixture compiles"),
    );
    table.add(
        Route::build("missing-arg", "/missing-arg")
            .default("controller", "hello")
            .default("action", "hello_world")
            .finish()
            .expect("route fixture compiles"),
    );
    table.add(
        Route::build("broken-signature", "/broken-signature")
            .default("controller", "broken")
            .default("action", "bad")
            .finish()
            .expect("route fixture compiles"),
    );
    table.add(
        Route::build("relay", "/relay")
            .default("controller", "relay")
            .default("action", "relay")
            .finish()
            .expect("route fixture compiles"),
    );
    table
}

/// Factory knowing the fixture controllers (except `relay`, which needs a
/// forwarder and is registered per-test).
pub fn factory() -> ControllerFactory {
    let mut factory = ControllerFactory::new();
    factory.register("hello", || Box::new(HelloWorldController::new()));
    factory.register("my", || Box::new(MyController::new()));
    factory.register("broken", || Box::new(BrokenController::new()));
    factory
}

/// Front controller over the fixture table with a silent event broker.
pub fn front() -> FrontController {
    FrontController::new(
        routing_table(),
        Arc::new(factory()),
        Arc::new(EventBroker::new()),
    )
}

/// Front controller over the fixture table with the given broker.
pub fn front_with_events(events: Arc<EventBroker>) -> FrontController {
    FrontController::new(routing_table(), Arc::new(factory()), events)
}

/// Subscribe a recording listener to every lifecycle point.
pub fn record_events(broker: &mut EventBroker) -> Arc<Mutex<Vec<EventKind>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    for kind in [
        EventKind::PreDispatch,
        EventKind::PostRoute,
        EventKind::PreForward,
        EventKind::PostDispatch,
    ] {
        let seen = Arc::clone(&seen);
        broker.subscribe(kind, move |event| {
            seen.lock().unwrap().push(event.kind());
            Ok(())
        });
    }
    seen
}

/// Build the named-args map `build_path` takes.
pub fn named_args<const N: usize>(pairs: [(&str, Value); N]) -> HashMap<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
