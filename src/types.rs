//! Common type aliases used throughout the crate.

use crate::core::Sink;
use crate::notification::Subscriber;
use std::sync::Arc;

pub type SharedSink = Arc<dyn Sink>;
pub type SharedSubscriber = Arc<dyn Subscriber>;
