use crate::binder::InspectionError;
use crate::controller::ClassNotFoundError;
use crate::events::SubscriberError;
use crate::router::IncompleteRouteError;
use std::fmt;

/// A dispatched request could not be served.
///
/// Deliberately unifies several distinct causes — no matching route, an
/// unresolvable controller identifier, an unresolvable action, a missing
/// required route-bound argument — into one externally observable "not
/// found" condition. The underlying cause stays reachable through
/// [`std::error::Error::source`] for logging.
#[derive(Debug)]
pub enum ResourceNotFoundError {
    /// No route matched the request path
    Route {
        /// The unmatched request path
        path: String,
    },
    /// The matched route's controller identifier is not registered
    Controller {
        /// The unresolvable class identifier
        controller: String,
        /// The factory failure that triggered this
        source: ClassNotFoundError,
    },
    /// The resolved controller does not define the routed action
    Action {
        /// The unresolvable action name
        action: String,
        /// Identifier of the resolved controller
        controller: String,
        /// The inspection failure that triggered this
        source: InspectionError,
    },
    /// A required action parameter was absent from the route-bound arguments
    Argument {
        /// The missing parameter name
        name: String,
        /// The action that declared it
        action: String,
        /// Identifier of the resolved controller
        controller: String,
    },
}

impl fmt::Display for ResourceNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceNotFoundError::Route { path } => {
                write!(f, "no route found for request [{path}]")
            }
            ResourceNotFoundError::Controller { controller, .. } => {
                write!(f, "controller [{controller}] not found")
            }
            ResourceNotFoundError::Action {
                action, controller, ..
            } => {
                write!(f, "action [{action}] not found in controller [{controller}]")
            }
            ResourceNotFoundError::Argument {
                name,
                action,
                controller,
            } => {
                write!(
                    f,
                    "missing required argument [{name}] for action [{action}] of controller [{controller}]"
                )
            }
        }
    }
}

impl std::error::Error for ResourceNotFoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceNotFoundError::Controller { source, .. } => Some(source),
            ResourceNotFoundError::Action { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure of a route-driven dispatch.
#[derive(Debug)]
pub enum DispatchError {
    /// The request could not be served; render as 404
    ResourceNotFound(ResourceNotFoundError),
    /// A matched route is misconfigured; propagated unmodified
    IncompleteRoute(IncompleteRouteError),
    /// A lifecycle event subscriber failed and aborted the dispatch
    Subscriber(SubscriberError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::ResourceNotFound(err) => err.fmt(f),
            DispatchError::IncompleteRoute(err) => err.fmt(f),
            DispatchError::Subscriber(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::ResourceNotFound(err) => Some(err),
            DispatchError::IncompleteRoute(err) => Some(err),
            DispatchError::Subscriber(err) => Some(err),
        }
    }
}

impl From<ResourceNotFoundError> for DispatchError {
    fn from(err: ResourceNotFoundError) -> Self {
        DispatchError::ResourceNotFound(err)
    }
}

impl From<IncompleteRouteError> for DispatchError {
    fn from(err: IncompleteRouteError) -> Self {
        DispatchError::IncompleteRoute(err)
    }
}

impl From<SubscriberError> for DispatchError {
    fn from(err: SubscriberError) -> Self {
        DispatchError::Subscriber(err)
    }
}

/// A forward call was made incorrectly.
///
/// Programmer errors on the trusted forward path; never translated into
/// "not found".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// The target controller does not define the requested action
    NotCallable {
        /// Identifier of the target controller
        controller: String,
        /// The requested action name
        action: String,
    },
    /// A required parameter was absent from the positional arguments
    MissingArgument {
        /// The missing parameter name
        name: String,
        /// The action that declared it
        action: String,
        /// Identifier of the target controller
        controller: String,
    },
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::NotCallable { controller, action } => {
                write!(
                    f,
                    "controller [{controller}] does not define a callable action [{action}]"
                )
            }
            ArgumentError::MissingArgument {
                name,
                action,
                controller,
            } => {
                write!(
                    f,
                    "missing required argument [{name}] for action [{action}] of controller [{controller}]"
                )
            }
        }
    }
}

impl std::error::Error for ArgumentError {}

/// Failure of a forward call. Causes surface as-is; see the module docs
/// for the dispatch/forward asymmetry.
#[derive(Debug)]
pub enum ForwardError {
    /// The target identifier is not registered with the factory
    ClassNotFound(ClassNotFoundError),
    /// The call itself was wrong: unknown action or missing argument
    Argument(ArgumentError),
    /// The target action's declaration is structurally broken
    Inspection(InspectionError),
    /// A lifecycle event subscriber failed and aborted the forward
    Subscriber(SubscriberError),
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardError::ClassNotFound(err) => err.fmt(f),
            ForwardError::Argument(err) => err.fmt(f),
            ForwardError::Inspection(err) => err.fmt(f),
            ForwardError::Subscriber(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ForwardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForwardError::ClassNotFound(err) => Some(err),
            ForwardError::Argument(err) => Some(err),
            ForwardError::Inspection(err) => Some(err),
            ForwardError::Subscriber(err) => Some(err),
        }
    }
}

impl From<ClassNotFoundError> for ForwardError {
    fn from(err: ClassNotFoundError) -> Self {
        ForwardError::ClassNotFound(err)
    }
}

impl From<ArgumentError> for ForwardError {
    fn from(err: ArgumentError) -> Self {
        ForwardError::Argument(err)
    }
}

impl From<InspectionError> for ForwardError {
    fn from(err: InspectionError) -> Self {
        ForwardError::Inspection(err)
    }
}

impl From<SubscriberError> for ForwardError {
    fn from(err: SubscriberError) -> Self {
        ForwardError::Subscriber(err)
    }
}
