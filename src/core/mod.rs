//! Core engine module - alarm rules, listener dispatch and the event bus

mod engine;
mod event_bus;
mod listener;
mod status;
pub mod rules;

pub use engine::AlarmEngine;
pub use event_bus::{Event, EventBus, EventPayload, EventType};
pub use listener::StatusListener;
pub use status::{AlarmStatus, ArmingStatus};
