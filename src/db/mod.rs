// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Security repository - the single source of truth for alarm state

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::core::{AlarmStatus, ArmingStatus};
use crate::error::Result;
use crate::sensors::Sensor;

/// Durable store of alarm status, arming status and the sensor set.
///
/// Implementations use interior mutability so one handle can be shared between
/// the engine and whoever inspects the state. Sensor membership is by identity.
pub trait SecurityRepository: Send + Sync {
    fn alarm_status(&self) -> Result<AlarmStatus>;

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()>;

    fn arming_status(&self) -> Result<ArmingStatus>;

    fn set_arming_status(&self, status: ArmingStatus) -> Result<()>;

    fn sensors(&self) -> Result<Vec<Sensor>>;

    /// Insert `sensor` unless a sensor with the same identity is already present.
    fn add_sensor(&self, sensor: &Sensor) -> Result<()>;

    /// Remove the sensor with the same identity. Absent sensors are ignored.
    fn remove_sensor(&self, sensor: &Sensor) -> Result<()>;

    /// Persist the current `active` flag of `sensor`, inserting it if unknown.
    fn update_sensor(&self, sensor: &Sensor) -> Result<()>;
}

/// Serializable view of a repository at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub alarm_status: AlarmStatus,
    pub arming_status: ArmingStatus,
    pub sensors: Vec<Sensor>,
}

impl RepositorySnapshot {
    pub fn capture(repository: &dyn SecurityRepository) -> Result<Self> {
        let mut sensors = repository.sensors()?;
        sensors.sort();

        Ok(Self {
            alarm_status: repository.alarm_status()?,
            arming_status: repository.arming_status()?,
            sensors,
        })
    }

    pub fn active_sensors(&self) -> usize {
        self.sensors.iter().filter(|s| s.is_active()).count()
    }
}

#[derive(Debug, Default)]
struct StoredState {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: HashMap<Uuid, Sensor>,
}

/// In-process repository. State lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<StoredState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known state, e.g. one captured earlier.
    pub fn from_snapshot(snapshot: RepositorySnapshot) -> Self {
        let sensors = snapshot
            .sensors
            .into_iter()
            .map(|s| (s.id(), s))
            .collect();

        Self {
            state: RwLock::new(StoredState {
                alarm_status: snapshot.alarm_status,
                arming_status: snapshot.arming_status,
                sensors,
            }),
        }
    }

    pub fn sensor_count(&self) -> usize {
        self.state.read().sensors.len()
    }

    pub fn get_sensor(&self, id: Uuid) -> Option<Sensor> {
        self.state.read().sensors.get(&id).cloned()
    }
}

impl SecurityRepository for MemoryRepository {
    fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.state.read().alarm_status)
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.state.write().alarm_status = status;
        debug!("Stored alarm status {}", status);
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.state.read().arming_status)
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        self.state.write().arming_status = status;
        debug!("Stored arming status {}", status);
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>> {
        Ok(self.state.read().sensors.values().cloned().collect())
    }

    fn add_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.state
            .write()
            .sensors
            .entry(sensor.id())
            .or_insert_with(|| sensor.clone());
        Ok(())
    }

    fn remove_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.state.write().sensors.remove(&sensor.id());
        Ok(())
    }

    fn update_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.state.write().sensors.insert(sensor.id(), sensor.clone());
        Ok(())
    }
}
