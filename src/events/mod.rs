//! # Events Module
//!
//! Lifecycle notifications fired at defined points of the dispatch and
//! forward pipelines.
//!
//! ## Overview
//!
//! Four lifecycle points exist: before dispatch begins, after routing
//! resolves but before invocation, before a forward is invoked, and after
//! dispatch completes. Each fires an [`Event`] carrying an immutable
//! borrowed snapshot of the state at that point.
//!
//! The [`EventBroker`] is an explicit collaborator handed to the dispatcher
//! and forwarder at construction — not ambient global state. Fan-out is
//! synchronous and in subscription order; the first subscriber error aborts
//! the enclosing dispatch or forward call.

mod core;

pub use core::{Event, EventBroker, EventKind, Subscriber, SubscriberError};
