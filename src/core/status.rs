// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Alarm and arming status enums

use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-level danger indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    pub fn description(&self) -> &'static str {
        match self {
            AlarmStatus::NoAlarm => "All clear",
            AlarmStatus::PendingAlarm => "Sensor tripped, alarm pending",
            AlarmStatus::Alarm => "Alarm triggered",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlarmStatus::NoAlarm => "no-alarm",
            AlarmStatus::PendingAlarm => "pending-alarm",
            AlarmStatus::Alarm => "alarm",
        };
        f.write_str(name)
    }
}

/// Whether monitoring is off, or on in one of two modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub fn is_armed(&self) -> bool {
        !matches!(self, ArmingStatus::Disarmed)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ArmingStatus::Disarmed => "Disarmed",
            ArmingStatus::ArmedHome => "Armed - At Home",
            ArmingStatus::ArmedAway => "Armed - Away",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArmingStatus::Disarmed => "disarmed",
            ArmingStatus::ArmedHome => "armed-home",
            ArmingStatus::ArmedAway => "armed-away",
        };
        f.write_str(name)
    }
}
