use crate::controller::Controller;
use crate::server::{Request, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// The four lifecycle points of the dispatch and forward pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Dispatch is about to begin, before route matching
    PreDispatch,
    /// Routing resolved and arguments extracted, before invocation
    PostRoute,
    /// A forward is about to be invoked
    PreForward,
    /// Dispatch completed, response in hand
    PostDispatch,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::PreDispatch => "pre_dispatch",
            EventKind::PostRoute => "post_route",
            EventKind::PreForward => "pre_forward",
            EventKind::PostDispatch => "post_dispatch",
        };
        write!(f, "{name}")
    }
}

/// Immutable snapshot fired at a lifecycle point.
///
/// Payloads are borrowed from the pipeline state of the enclosing call;
/// subscribers observe, they do not mutate.
pub enum Event<'a> {
    /// Carries the inbound request
    PreDispatch {
        /// The request being dispatched
        request: &'a dyn Request,
    },
    /// Carries the routing outcome before invocation
    PostRoute {
        /// The request being dispatched
        request: &'a dyn Request,
        /// The resolved controller
        controller: &'a dyn Controller,
        /// The action about to be invoked
        action: &'a str,
        /// Named arguments extracted from the matched route
        args: &'a HashMap<String, Value>,
    },
    /// Carries the forward target before invocation
    PreForward {
        /// The forward target controller
        controller: &'a dyn Controller,
        /// The action about to be invoked
        action: &'a str,
        /// Caller-supplied positional arguments
        args: &'a [Value],
    },
    /// Carries the completed dispatch outcome
    PostDispatch {
        /// The response about to be returned
        response: &'a Response,
        /// The controller that produced it
        controller: &'a dyn Controller,
        /// The invoked action
        action: &'a str,
        /// The bound positional arguments the action ran with
        args: &'a [Value],
    },
}

impl Event<'_> {
    /// The lifecycle point this event belongs to.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PreDispatch { .. } => EventKind::PreDispatch,
            Event::PostRoute { .. } => EventKind::PostRoute,
            Event::PreForward { .. } => EventKind::PreForward,
            Event::PostDispatch { .. } => EventKind::PostDispatch,
        }
    }
}

/// Subscriber callback. Returning an error aborts the enclosing dispatch
/// or forward call.
pub type Subscriber = Box<dyn Fn(&Event<'_>) -> anyhow::Result<()> + Send + Sync>;

/// Synchronous publish/subscribe broker for lifecycle events.
///
/// Subscribers run inline, in subscription order, before control returns to
/// the pipeline. The broker is wired into the dispatcher and forwarder at
/// construction and shared via `Arc`.
#[derive(Default)]
pub struct EventBroker {
    subscribers: HashMap<EventKind, Vec<Subscriber>>,
}

impl EventBroker {
    /// Create a broker with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a callback to one lifecycle point.
    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> &mut Self
    where
        F: Fn(&Event<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribers
            .entry(kind)
            .or_default()
            .push(Box::new(callback));
        self
    }

    /// Fire an event to its subscribers.
    ///
    /// The first subscriber error stops the fan-out and is returned as a
    /// [`SubscriberError`]; remaining subscribers do not run.
    pub fn fire(&self, event: &Event<'_>) -> Result<(), SubscriberError> {
        let kind = event.kind();
        let Some(subscribers) = self.subscribers.get(&kind) else {
            return Ok(());
        };
        debug!(event = %kind, subscriber_count = subscribers.len(), "event fired");
        for subscriber in subscribers {
            subscriber(event).map_err(|source| SubscriberError { event: kind, source })?;
        }
        Ok(())
    }
}

impl fmt::Debug for EventBroker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<String, usize> = self
            .subscribers
            .iter()
            .map(|(k, v)| (k.to_string(), v.len()))
            .collect();
        f.debug_struct("EventBroker")
            .field("subscribers", &counts)
            .finish()
    }
}

/// A subscriber failed while handling a lifecycle event.
#[derive(Debug)]
pub struct SubscriberError {
    /// The lifecycle point whose fan-out failed
    pub event: EventKind,
    source: anyhow::Error,
}

impl fmt::Display for SubscriberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subscriber failed during {} event: {}",
            self.event, self.source
        )
    }
}

impl std::error::Error for SubscriberError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::HttpRequest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_fire_without_subscribers_is_noop() {
        let broker = EventBroker::new();
        let request = HttpRequest::get("/");
        broker
            .fire(&Event::PreDispatch { request: &request })
            .unwrap();
    }

    #[test]
    fn test_subscribers_run_in_subscription_order() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut broker = EventBroker::new();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            broker.subscribe(EventKind::PreDispatch, move |_| {
                seen.lock().unwrap().push(tag);
                Ok(())
            });
        }

        let request = HttpRequest::get("/");
        broker
            .fire(&Event::PreDispatch { request: &request })
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_failing_subscriber_stops_fanout() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut broker = EventBroker::new();
        broker.subscribe(EventKind::PreDispatch, |_| anyhow::bail!("boom"));
        {
            let calls = Arc::clone(&calls);
            broker.subscribe(EventKind::PreDispatch, move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        let request = HttpRequest::get("/");
        let err = broker
            .fire(&Event::PreDispatch { request: &request })
            .unwrap_err();
        assert_eq!(err.event, EventKind::PreDispatch);
        assert!(err.to_string().contains("boom"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscription_is_per_kind() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut broker = EventBroker::new();
        {
            let calls = Arc::clone(&calls);
            broker.subscribe(EventKind::PostDispatch, move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        let request = HttpRequest::get("/");
        broker
            .fire(&Event::PreDispatch { request: &request })
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
