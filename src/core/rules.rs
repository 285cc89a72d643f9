// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Alarm transition table
//!
//! Pure functions from the observed state to the alarm status the engine should
//! write. `None` means "leave the alarm status alone". The engine owns all I/O;
//! nothing in here touches the repository or the listeners.

use super::{AlarmStatus, ArmingStatus};

/// Everything the sensor rule needs to know about one activation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorChange {
    pub was_active: bool,
    pub active: bool,
    /// Whether any *other* registered sensor is still active.
    pub others_active: bool,
}

/// Alarm status after a single sensor changes activation state.
///
/// Rules are checked in order and the first match wins. An active alarm is
/// sticky: no sensor movement clears or re-raises it.
pub fn on_sensor_change(
    alarm: AlarmStatus,
    arming: ArmingStatus,
    change: SensorChange,
) -> Option<AlarmStatus> {
    let SensorChange {
        was_active,
        active,
        others_active,
    } = change;

    if alarm == AlarmStatus::Alarm {
        return None;
    }

    match (was_active, active) {
        // re-triggering a tripped sensor while pending escalates
        (true, true) if alarm == AlarmStatus::PendingAlarm => Some(AlarmStatus::Alarm),
        (false, true) if arming.is_armed() => Some(escalate(alarm)),
        (true, false) if alarm == AlarmStatus::PendingAlarm && !others_active => {
            Some(AlarmStatus::NoAlarm)
        }
        _ => None,
    }
}

/// Alarm status after the camera image has been classified.
pub fn on_image_scan(
    threat: bool,
    arming: ArmingStatus,
    any_sensor_active: bool,
) -> Option<AlarmStatus> {
    if threat && arming == ArmingStatus::ArmedHome {
        Some(AlarmStatus::Alarm)
    } else if !threat && !any_sensor_active {
        Some(AlarmStatus::NoAlarm)
    } else {
        None
    }
}

/// Alarm status after the arming mode changes.
///
/// `threat_detected` is the outcome of the most recent scan, which may predate
/// the arming change.
pub fn on_arming_change(arming: ArmingStatus, threat_detected: bool) -> Option<AlarmStatus> {
    match arming {
        ArmingStatus::Disarmed => Some(AlarmStatus::NoAlarm),
        ArmingStatus::ArmedHome if threat_detected => Some(AlarmStatus::Alarm),
        ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => None,
    }
}

fn escalate(alarm: AlarmStatus) -> AlarmStatus {
    match alarm {
        AlarmStatus::NoAlarm => AlarmStatus::PendingAlarm,
        AlarmStatus::PendingAlarm | AlarmStatus::Alarm => AlarmStatus::Alarm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARMED: [ArmingStatus; 2] = [ArmingStatus::ArmedHome, ArmingStatus::ArmedAway];
    const ALL_ARMING: [ArmingStatus; 3] = [
        ArmingStatus::Disarmed,
        ArmingStatus::ArmedHome,
        ArmingStatus::ArmedAway,
    ];

    fn change(was_active: bool, active: bool, others_active: bool) -> SensorChange {
        SensorChange {
            was_active,
            active,
            others_active,
        }
    }

    #[test]
    fn test_activation_escalates_when_armed() {
        for arming in ARMED {
            assert_eq!(
                on_sensor_change(AlarmStatus::NoAlarm, arming, change(false, true, false)),
                Some(AlarmStatus::PendingAlarm)
            );
            assert_eq!(
                on_sensor_change(AlarmStatus::PendingAlarm, arming, change(false, true, true)),
                Some(AlarmStatus::Alarm)
            );
        }
    }

    #[test]
    fn test_activation_ignored_when_disarmed() {
        for alarm in [AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm] {
            assert_eq!(
                on_sensor_change(alarm, ArmingStatus::Disarmed, change(false, true, false)),
                None
            );
        }
    }

    #[test]
    fn test_alarm_is_sticky() {
        for arming in ALL_ARMING {
            for (was, now) in [(false, true), (true, true), (true, false), (false, false)] {
                assert_eq!(
                    on_sensor_change(AlarmStatus::Alarm, arming, change(was, now, false)),
                    None
                );
            }
        }
    }

    #[test]
    fn test_retrigger_while_pending() {
        for arming in ALL_ARMING {
            assert_eq!(
                on_sensor_change(AlarmStatus::PendingAlarm, arming, change(true, true, false)),
                Some(AlarmStatus::Alarm)
            );
        }
        assert_eq!(
            on_sensor_change(AlarmStatus::NoAlarm, ArmingStatus::ArmedAway, change(true, true, false)),
            None
        );
    }

    #[test]
    fn test_last_deactivation_clears_pending() {
        assert_eq!(
            on_sensor_change(AlarmStatus::PendingAlarm, ArmingStatus::ArmedHome, change(true, false, false)),
            Some(AlarmStatus::NoAlarm)
        );
        assert_eq!(
            on_sensor_change(AlarmStatus::PendingAlarm, ArmingStatus::ArmedHome, change(true, false, true)),
            None
        );
    }

    #[test]
    fn test_idempotent_deactivation() {
        for alarm in [AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm, AlarmStatus::Alarm] {
            assert_eq!(
                on_sensor_change(alarm, ArmingStatus::ArmedAway, change(false, false, false)),
                None
            );
        }
    }

    #[test]
    fn test_image_scan() {
        assert_eq!(on_image_scan(true, ArmingStatus::ArmedHome, false), Some(AlarmStatus::Alarm));
        assert_eq!(on_image_scan(true, ArmingStatus::ArmedHome, true), Some(AlarmStatus::Alarm));
        assert_eq!(on_image_scan(true, ArmingStatus::ArmedAway, false), None);
        assert_eq!(on_image_scan(true, ArmingStatus::Disarmed, false), None);
        assert_eq!(on_image_scan(false, ArmingStatus::ArmedAway, false), Some(AlarmStatus::NoAlarm));
        assert_eq!(on_image_scan(false, ArmingStatus::ArmedAway, true), None);
    }

    #[test]
    fn test_arming_change() {
        assert_eq!(on_arming_change(ArmingStatus::Disarmed, true), Some(AlarmStatus::NoAlarm));
        assert_eq!(on_arming_change(ArmingStatus::ArmedHome, true), Some(AlarmStatus::Alarm));
        assert_eq!(on_arming_change(ArmingStatus::ArmedHome, false), None);
        assert_eq!(on_arming_change(ArmingStatus::ArmedAway, true), None);
    }
}
