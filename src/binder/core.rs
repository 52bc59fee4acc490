use crate::controller::{Action, Controller};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Declared parameter of a controller action: a name plus an optional
/// default value. A parameter without a default is required.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: String,
    default: Option<Value>,
}

impl ParamSpec {
    /// Declare a required parameter.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// Declare an optional parameter with its default value.
    #[must_use]
    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    /// The declared parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the parameter may be omitted.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    /// The declared default value, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Strategy seam for argument resolution: route dispatch looks values up by
/// parameter name, forwarding by declaration index.
pub trait ArgLookup {
    /// Resolve the value for the parameter at `index` named `name`.
    fn get(&self, index: usize, name: &str) -> Option<&Value>;
}

/// Name-keyed lookup over extracted route arguments.
pub struct NamedLookup<'a>(pub &'a HashMap<String, Value>);

impl ArgLookup for NamedLookup<'_> {
    fn get(&self, _index: usize, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// Position-keyed lookup over caller-supplied forward arguments.
pub struct PositionalLookup<'a>(pub &'a [Value]);

impl ArgLookup for PositionalLookup<'_> {
    fn get(&self, index: usize, _name: &str) -> Option<&Value> {
        self.0.get(index)
    }
}

/// Build the positional argument list for an action invocation.
///
/// Walks the declared parameters in order. A parameter the lookup cannot
/// resolve falls back to its declared default; without one the bind fails
/// with [`BindError::MissingArgument`] naming the parameter.
pub fn bind_args(params: &[ParamSpec], lookup: &dyn ArgLookup) -> Result<Vec<Value>, BindError> {
    let mut bound = Vec::with_capacity(params.len());
    for (index, param) in params.iter().enumerate() {
        match lookup.get(index, param.name()) {
            Some(value) => bound.push(value.clone()),
            None => match param.default_value() {
                Some(default) => bound.push(default.clone()),
                None => {
                    return Err(BindError::MissingArgument {
                        name: param.name().to_string(),
                    })
                }
            },
        }
    }
    debug!(arg_count = bound.len(), "action arguments bound");
    Ok(bound)
}

/// Resolve an action's declaration on a controller and validate its shape.
///
/// Fails with [`InspectionError::UnknownAction`] when the controller does
/// not define the action, and with [`InspectionError::InvalidSignature`]
/// when the declaration itself is broken: duplicate parameter names, or a
/// required parameter declared after an optional one.
pub fn inspect_action<'c>(
    controller: &'c dyn Controller,
    action: &str,
) -> Result<&'c Action, InspectionError> {
    let Some(found) = controller.actions().get(action) else {
        return Err(InspectionError::UnknownAction {
            action: action.to_string(),
            controller: controller.identifier().to_string(),
        });
    };

    let params = found.params();
    let mut seen_optional = false;
    for (i, param) in params.iter().enumerate() {
        if params[..i].iter().any(|p| p.name() == param.name()) {
            return Err(InspectionError::InvalidSignature {
                action: action.to_string(),
                controller: controller.identifier().to_string(),
                reason: format!("duplicate parameter [{}]", param.name()),
            });
        }
        if param.is_optional() {
            seen_optional = true;
        } else if seen_optional {
            return Err(InspectionError::InvalidSignature {
                action: action.to_string(),
                controller: controller.identifier().to_string(),
                reason: format!(
                    "required parameter [{}] declared after an optional one",
                    param.name()
                ),
            });
        }
    }

    Ok(found)
}

/// Binding failed for a declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A required parameter was absent from the supplied arguments
    MissingArgument {
        /// The declared parameter name
        name: String,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::MissingArgument { name } => {
                write!(f, "missing required argument [{name}]")
            }
        }
    }
}

impl std::error::Error for BindError {}

/// An action's declaration could not be resolved or is structurally broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionError {
    /// The controller does not define the action
    UnknownAction {
        /// The requested action name
        action: String,
        /// Identifier of the inspected controller
        controller: String,
    },
    /// The action's declared parameter list is invalid
    InvalidSignature {
        /// The inspected action name
        action: String,
        /// Identifier of the inspected controller
        controller: String,
        /// What is wrong with the declaration
        reason: String,
    },
}

impl fmt::Display for InspectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectionError::UnknownAction { action, controller } => {
                write!(
                    f,
                    "action [{action}] is not defined by controller [{controller}]"
                )
            }
            InspectionError::InvalidSignature {
                action,
                controller,
                reason,
            } => {
                write!(
                    f,
                    "invalid signature for action [{action}] of controller [{controller}]: {reason}"
                )
            }
        }
    }
}

impl std::error::Error for InspectionError {}
