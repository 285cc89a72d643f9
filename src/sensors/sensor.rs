// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Sensor entity and sensor events

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AlarmError, Result};

/// Kind of contact or presence detector. Display only, never used by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorType::Door => "door",
            SensorType::Window => "window",
            SensorType::Motion => "motion",
        };
        f.write_str(name)
    }
}

/// A binary sensor with a stable identity and a mutable `active` flag.
///
/// Equality and hashing only look at the synthetic `id`, so a sensor stays the
/// same set member while its `active` flag changes. Ordering follows display
/// order: name, then type, then id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SensorRecord")]
pub struct Sensor {
    id: Uuid,
    name: String,
    sensor_type: SensorType,
    active: bool,
}

impl Sensor {
    /// Create an inactive sensor with a fresh identity.
    pub fn new(name: &str, sensor_type: SensorType) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: checked_name(name)?,
            sensor_type,
            active: false,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Copy of this sensor with a different `active` flag and the same identity.
    pub fn with_active(&self, active: bool) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }
}

fn checked_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AlarmError::invalid("sensor name must not be blank"));
    }
    Ok(name.to_string())
}

/// Serialized form of a [`Sensor`], validated before it becomes one.
#[derive(Deserialize)]
struct SensorRecord {
    id: Uuid,
    name: String,
    sensor_type: SensorType,
    active: bool,
}

impl TryFrom<SensorRecord> for Sensor {
    type Error = AlarmError;

    fn try_from(record: SensorRecord) -> Result<Self> {
        Ok(Self {
            id: record.id,
            name: checked_name(&record.name)?,
            sensor_type: record.sensor_type,
            active: record.active,
        })
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.sensor_type.cmp(&other.sensor_type))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.active { "active" } else { "inactive" };
        write!(f, "{} ({}, {})", self.name, self.sensor_type, state)
    }
}

/// Request to move a sensor into a new activation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorEvent {
    pub sensor: Sensor,
    pub active: bool,
}

impl SensorEvent {
    pub fn new(sensor: Sensor, active: bool) -> Self {
        Self { sensor, active }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            Sensor::new("   ", SensorType::Door),
            Err(AlarmError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_identity_survives_activation() {
        let sensor = Sensor::new("Front door", SensorType::Door).unwrap();
        let active = sensor.with_active(true);

        assert_eq!(sensor, active);
        assert!(active.is_active());

        let mut set = HashSet::new();
        set.insert(sensor.clone());
        set.insert(active);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_name_distinct_identity() {
        let a = Sensor::new("Hall", SensorType::Motion).unwrap();
        let b = Sensor::new("Hall", SensorType::Motion).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_deserialize_checks_name() {
        let sensor = Sensor::new("Porch", SensorType::Motion).unwrap().with_active(true);
        let json = serde_json::to_string(&sensor).unwrap();

        let restored: Sensor = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, sensor);
        assert!(restored.is_active());

        let blank = json.replace("\"Porch\"", "\"  \"");
        assert!(serde_json::from_str::<Sensor>(&blank).is_err());
    }

    #[test]
    fn test_display_ordering() {
        let window = Sensor::new("Kitchen", SensorType::Window).unwrap();
        let door = Sensor::new("Kitchen", SensorType::Door).unwrap();
        let attic = Sensor::new("Attic", SensorType::Motion).unwrap();

        let mut sensors = vec![window.clone(), door.clone(), attic.clone()];
        sensors.sort();
        assert_eq!(sensors, vec![attic, door, window]);
    }
}
