use crate::binder::{bind_args, inspect_action, BindError, PositionalLookup};
use crate::controller::{Controller, ControllerFactory};
use crate::events::{Event, EventBroker};
use crate::server::Response;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use super::error::{ArgumentError, ForwardError};

/// Target of a forward: an already-constructed controller, or a class
/// identifier the factory resolves to a fresh instance.
#[derive(Clone, Copy)]
pub enum ForwardTarget<'a> {
    /// Forward to this controller instance
    Instance(&'a dyn Controller),
    /// Resolve the identifier through the factory, then forward
    Identifier(&'a str),
}

/// Invokes one controller action from another, bypassing routing.
///
/// Arguments are supplied by the caller in declaration order and bound by
/// position; trailing optional parameters fall back to their declared
/// defaults. Forwarding is a sub-call, not a top-level dispatch: it fires
/// the pre-forward event only, and factory failures propagate unmodified
/// rather than narrowing to "not found".
pub struct Forwarder {
    factory: Arc<ControllerFactory>,
    events: Arc<EventBroker>,
}

impl Forwarder {
    /// Create a forwarder over the shared factory and event broker.
    #[must_use]
    pub fn new(factory: Arc<ControllerFactory>, events: Arc<EventBroker>) -> Self {
        Self { factory, events }
    }

    /// Forward to another controller action.
    ///
    /// # Errors
    ///
    /// An unregistered identifier fails with [`ForwardError::ClassNotFound`];
    /// an unknown action or missing required argument with
    /// [`ForwardError::Argument`]; a structurally broken action declaration
    /// with [`ForwardError::Inspection`]; a failing pre-forward subscriber
    /// with [`ForwardError::Subscriber`].
    pub fn forward(
        &self,
        target: ForwardTarget<'_>,
        action: &str,
        args: &[Value],
    ) -> Result<Response, ForwardError> {
        let resolved;
        let controller: &dyn Controller = match target {
            ForwardTarget::Instance(instance) => instance,
            ForwardTarget::Identifier(identifier) => {
                resolved = self.factory.create(identifier)?;
                resolved.as_ref()
            }
        };

        info!(
            controller = %controller.identifier(),
            action = %action,
            arg_count = args.len(),
            "forward started"
        );

        self.events.fire(&Event::PreForward {
            controller,
            action,
            args,
        })?;

        if !controller.actions().contains(action) {
            error!(
                controller = %controller.identifier(),
                action = %action,
                "forward target action not callable"
            );
            return Err(ArgumentError::NotCallable {
                controller: controller.identifier().to_string(),
                action: action.to_string(),
            }
            .into());
        }

        let target_action = inspect_action(controller, action)?;
        let bound =
            bind_args(target_action.params(), &PositionalLookup(args)).map_err(|err| match err {
                BindError::MissingArgument { name } => {
                    error!(
                        controller = %controller.identifier(),
                        action = %action,
                        argument = %name,
                        "required forward argument missing"
                    );
                    ArgumentError::MissingArgument {
                        name,
                        action: action.to_string(),
                        controller: controller.identifier().to_string(),
                    }
                }
            })?;

        Ok(target_action.invoke(&bound))
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder").finish_non_exhaustive()
    }
}
