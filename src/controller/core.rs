use crate::binder::ParamSpec;
use crate::server::Response;
use serde_json::Value;
use std::collections::HashMap;

/// Closure invoked with the bound argument list of an action call.
pub type ActionFn = Box<dyn Fn(&[Value]) -> Response + Send + Sync>;

/// A named, invocable action: its declared parameter list plus the closure
/// that runs it.
pub struct Action {
    params: Vec<ParamSpec>,
    handler: ActionFn,
}

impl Action {
    /// Create an action from its parameter declaration and handler.
    #[must_use]
    pub fn new(params: Vec<ParamSpec>, handler: ActionFn) -> Self {
        Self { params, handler }
    }

    /// The declared parameters, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Invoke the action with an already-bound argument list.
    #[must_use]
    pub fn invoke(&self, args: &[Value]) -> Response {
        (self.handler)(args)
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action").field("params", &self.params).finish_non_exhaustive()
    }
}

/// The actions a controller defines, keyed by name.
#[derive(Debug, Default)]
pub struct ActionTable {
    actions: HashMap<String, Action>,
}

impl ActionTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action, builder style.
    #[must_use]
    pub fn action<F>(mut self, name: impl Into<String>, params: Vec<ParamSpec>, handler: F) -> Self
    where
        F: Fn(&[Value]) -> Response + Send + Sync + 'static,
    {
        self.actions
            .insert(name.into(), Action::new(params, Box::new(handler)));
        self
    }

    /// Look up an action by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Whether an action with the given name is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }
}

/// A dispatchable controller.
///
/// Implementations build their [`ActionTable`] at construction; the
/// dispatcher and forwarder only ever see this trait.
pub trait Controller: Send + Sync {
    /// The class identifier this controller is registered under, used in
    /// error messages and event payloads.
    fn identifier(&self) -> &str;

    /// The controller's action table.
    fn actions(&self) -> &ActionTable;
}
