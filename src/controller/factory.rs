use super::Controller;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

type Constructor = Box<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Registry mapping controller class identifiers to construction closures.
///
/// Populated at startup; every [`create`](Self::create) call runs the
/// closure again, so controller instances are fresh per resolution and
/// never shared between requests.
#[derive(Default)]
pub struct ControllerFactory {
    constructors: HashMap<String, Constructor>,
}

impl ControllerFactory {
    /// Create an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under a class identifier, replacing any
    /// earlier registration for the same identifier.
    pub fn register<F>(&mut self, identifier: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        if self
            .constructors
            .insert(identifier.clone(), Box::new(constructor))
            .is_some()
        {
            warn!(controller = %identifier, "replacing existing controller registration");
        }
    }

    /// Construct a fresh controller instance for the identifier.
    pub fn create(&self, identifier: &str) -> Result<Box<dyn Controller>, ClassNotFoundError> {
        match self.constructors.get(identifier) {
            Some(constructor) => {
                debug!(controller = %identifier, "controller constructed");
                Ok(constructor())
            }
            None => Err(ClassNotFoundError {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Whether an identifier has a registered constructor.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.constructors.contains_key(identifier)
    }
}

impl fmt::Debug for ControllerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerFactory")
            .field("identifiers", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// No constructor is registered for a controller class identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNotFoundError {
    /// The unresolvable class identifier
    pub identifier: String,
}

impl fmt::Display for ClassNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no controller registered for identifier [{}]",
            self.identifier
        )
    }
}

impl std::error::Error for ClassNotFoundError {}
