// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Status listener contract and the ordered listener set

use std::sync::Arc;

use super::AlarmStatus;
use crate::error::Result;

/// Observer of engine state changes.
///
/// Callbacks run synchronously on the caller's thread. An error returned from a
/// callback stops dispatch and is handed back to whoever invoked the engine.
pub trait StatusListener: Send + Sync {
    /// The alarm status moved to `status`.
    fn on_alarm_status_changed(&self, status: AlarmStatus) -> Result<()>;

    /// The sensor registry now holds `count` sensors.
    fn on_sensor_count_changed(&self, count: usize) -> Result<()>;

    /// A camera scan finished.
    fn on_threat_detected(&self, _threat: bool) -> Result<()> {
        Ok(())
    }

    /// One or more sensors changed activation state.
    fn on_sensors_changed(&self) -> Result<()> {
        Ok(())
    }
}

/// Ordered set of listeners keyed by reference identity.
#[derive(Default, Clone)]
pub(crate) struct ListenerSet {
    listeners: Vec<Arc<dyn StatusListener>>,
}

impl ListenerSet {
    /// Returns false if the same listener was already registered.
    pub fn add(&mut self, listener: Arc<dyn StatusListener>) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    pub fn remove(&mut self, listener: &Arc<dyn StatusListener>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
        self.listeners.len() != before
    }

    pub fn contains(&self, listener: &Arc<dyn StatusListener>) -> bool {
        self.listeners.iter().any(|l| Arc::ptr_eq(l, listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call `f` on every listener in registration order, stopping at the first error.
    pub fn dispatch<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&dyn StatusListener) -> Result<()>,
    {
        for listener in &self.listeners {
            f(listener.as_ref())?;
        }
        Ok(())
    }
}
