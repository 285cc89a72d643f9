// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Event bus that republishes engine notifications

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::{AlarmStatus, StatusListener};
use crate::error::Result;

/// Event types in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    AlarmStatus,
    SensorCount,
    CameraScan,
    SensorActivity,
}

/// Generic event wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    Alarm(AlarmStatus),
    SensorCount(usize),
    Threat(bool),
    SensorsChanged,
}

/// Fan-out of engine notifications onto broadcast channels.
///
/// Register it with the engine like any other listener; publishing never
/// fails, an event with no subscribers is simply dropped.
pub struct EventBus {
    alarm_tx: broadcast::Sender<AlarmStatus>,
    event_tx: broadcast::Sender<Event>,
    event_counter: AtomicU64,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (alarm_tx, _) = broadcast::channel(capacity);
        let (event_tx, _) = broadcast::channel(capacity);

        Self {
            alarm_tx,
            event_tx,
            event_counter: AtomicU64::new(0),
        }
    }

    pub fn subscribe_alarms(&self) -> broadcast::Receiver<AlarmStatus> {
        self.alarm_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Number of events published so far
    pub fn published(&self) -> u64 {
        self.event_counter.load(Ordering::Relaxed)
    }

    fn publish_event(&self, event_type: EventType, payload: EventPayload) {
        let id = self.event_counter.fetch_add(1, Ordering::Relaxed);
        let event = Event {
            id,
            event_type,
            timestamp: Utc::now(),
            payload,
        };
        let _ = self.event_tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl StatusListener for EventBus {
    fn on_alarm_status_changed(&self, status: AlarmStatus) -> Result<()> {
        let _ = self.alarm_tx.send(status);
        self.publish_event(EventType::AlarmStatus, EventPayload::Alarm(status));
        Ok(())
    }

    fn on_sensor_count_changed(&self, count: usize) -> Result<()> {
        self.publish_event(EventType::SensorCount, EventPayload::SensorCount(count));
        Ok(())
    }

    fn on_threat_detected(&self, threat: bool) -> Result<()> {
        self.publish_event(EventType::CameraScan, EventPayload::Threat(threat));
        Ok(())
    }

    fn on_sensors_changed(&self) -> Result<()> {
        self.publish_event(EventType::SensorActivity, EventPayload::SensorsChanged);
        Ok(())
    }
}
