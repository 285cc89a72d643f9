// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Alarm engine - applies the transition table and notifies listeners

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};
use tracing::{debug, info, warn};

use super::listener::{ListenerSet, StatusListener};
use super::rules::{self, SensorChange};
use super::{AlarmStatus, ArmingStatus};
use crate::config::EngineConfig;
use crate::db::{RepositorySnapshot, SecurityRepository};
use crate::detection::{validate_threshold, Image, ImageClassifier};
use crate::error::Result;
use crate::sensors::{Sensor, SensorEvent};

/// State owned by the engine itself rather than the repository.
struct EngineState {
    /// Outcome of the most recent camera scan, not persisted.
    threat_detected: bool,
    listeners: ListenerSet,
}

/// One sensor write together with what the repository held before it.
struct SensorWrite {
    updated: Sensor,
    previous: Option<Sensor>,
}

/// Every repository write one operation will make, computed up front.
#[derive(Default)]
struct Transition {
    sensors: Vec<SensorWrite>,
    arming: Option<ArmingStatus>,
    alarm: Option<AlarmStatus>,
}

enum Undo<'a> {
    Sensor(&'a SensorWrite),
    Arming(ArmingStatus),
    Alarm(AlarmStatus),
}

/// What listeners must hear about once a transition is committed.
#[derive(Default)]
struct Notice {
    alarm: Option<AlarmStatus>,
    threat: Option<bool>,
    sensors_changed: bool,
    sensor_count: Option<usize>,
}

impl Notice {
    fn count(count: usize) -> Self {
        Self {
            sensor_count: Some(count),
            ..Self::default()
        }
    }
}

/// Committed notices waiting for delivery, in commit order.
#[derive(Default)]
struct Outbox {
    queue: VecDeque<(ListenerSet, Notice)>,
    draining: bool,
}

/// Alarm decision engine.
///
/// Holds no alarm state of its own: every operation reads the repository,
/// runs the rule table, commits the result and then notifies listeners in
/// registration order before returning.
///
/// Operations are serialised from the first read until their notices are
/// delivered, so listeners hear transitions in the order the repository
/// recorded them. A listener may call back into the engine from a callback:
/// the nested operation commits at once, but its notices are queued behind
/// the ones being delivered and any listener error they raise is returned to
/// the outermost caller.
pub struct AlarmEngine {
    repository: Arc<dyn SecurityRepository>,
    classifier: Arc<dyn ImageClassifier>,
    confidence_threshold: f32,
    /// Taken before `state` by every operation that notifies.
    outbox: ReentrantMutex<RefCell<Outbox>>,
    state: Mutex<EngineState>,
}

impl AlarmEngine {
    pub fn new(
        repository: Arc<dyn SecurityRepository>,
        classifier: Arc<dyn ImageClassifier>,
        config: &EngineConfig,
    ) -> Result<Self> {
        validate_threshold(config.confidence_threshold)?;

        Ok(Self {
            repository,
            classifier,
            confidence_threshold: config.confidence_threshold,
            outbox: ReentrantMutex::new(RefCell::new(Outbox::default())),
            state: Mutex::new(EngineState {
                threat_detected: false,
                listeners: ListenerSet::default(),
            }),
        })
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    /// Result of the last camera scan, `false` until the first scan.
    pub fn threat_detected(&self) -> bool {
        self.state.lock().threat_detected
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.repository.alarm_status()
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.repository.arming_status()
    }

    /// Registered sensors in display order.
    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        let mut sensors = self.repository.sensors()?;
        sensors.sort();
        Ok(sensors)
    }

    pub fn snapshot(&self) -> Result<RepositorySnapshot> {
        let _guard = self.state.lock();
        RepositorySnapshot::capture(self.repository.as_ref())
    }

    pub fn add_status_listener(&self, listener: Arc<dyn StatusListener>) {
        if !self.state.lock().listeners.add(listener) {
            debug!("Listener already registered");
        }
    }

    pub fn remove_status_listener(&self, listener: &Arc<dyn StatusListener>) {
        if !self.state.lock().listeners.remove(listener) {
            debug!("Listener was not registered");
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }

    /// Move `sensor` into the `active` state and apply the sensor rules.
    ///
    /// `sensor.is_active()` is taken as the state before this call. On success
    /// the caller's copy is updated to match what was stored. A sensor the
    /// repository does not know yet is registered by the write, and listeners
    /// hear the new sensor count.
    pub fn change_sensor_activation(&self, sensor: &mut Sensor, active: bool) -> Result<()> {
        self.transact(|_state| {
            let alarm = self.repository.alarm_status()?;
            let arming = self.repository.arming_status()?;
            let stored = self.repository.sensors()?;

            let id = sensor.id();
            let previous = stored.iter().find(|s| s.id() == id).cloned();
            let others_active = stored.iter().any(|s| s.id() != id && s.is_active());
            let change = SensorChange {
                was_active: sensor.is_active(),
                active,
                others_active,
            };

            let registers = previous.is_none();
            let target = rules::on_sensor_change(alarm, arming, change).filter(|t| *t != alarm);
            let plan = Transition {
                sensors: vec![SensorWrite {
                    updated: sensor.with_active(active),
                    previous,
                }],
                arming: None,
                alarm: target,
            };
            self.commit(&plan, alarm, arming)?;

            if let Some(status) = target {
                info!(sensor = %sensor.name(), "Alarm status {} -> {}", alarm, status);
            }
            if registers {
                info!("Registered unknown sensor {} on activation change", sensor);
            }
            debug!(sensor = %sensor.name(), "Sensor active {} -> {}", change.was_active, active);
            sensor.set_active(active);

            let notice = Notice {
                alarm: target,
                sensors_changed: change.was_active != active,
                sensor_count: registers.then_some(stored.len() + 1),
                ..Notice::default()
            };
            Ok(((), notice))
        })
    }

    /// Apply a sensor event and hand back the updated sensor.
    pub fn apply_event(&self, event: SensorEvent) -> Result<Sensor> {
        let SensorEvent { mut sensor, active } = event;
        self.change_sensor_activation(&mut sensor, active)?;
        Ok(sensor)
    }

    /// Classify a camera frame and apply the image rules.
    ///
    /// Returns whether a threat was detected. The result is remembered so a
    /// later switch to armed-home can raise the alarm without a new scan.
    pub fn process_image(&self, image: &Image) -> Result<bool> {
        let threat = self
            .classifier
            .contains_threat(image, self.confidence_threshold)?;

        self.transact(|state| {
            let alarm = self.repository.alarm_status()?;
            let arming = self.repository.arming_status()?;
            let any_active = self.repository.sensors()?.iter().any(Sensor::is_active);

            let target = rules::on_image_scan(threat, arming, any_active).filter(|t| *t != alarm);
            let plan = Transition {
                alarm: target,
                ..Transition::default()
            };
            self.commit(&plan, alarm, arming)?;
            state.threat_detected = threat;

            info!(threat, "Camera scan complete");
            if let Some(status) = target {
                info!("Alarm status {} -> {}", alarm, status);
            }

            let notice = Notice {
                alarm: target,
                threat: Some(threat),
                ..Notice::default()
            };
            Ok((threat, notice))
        })
    }

    /// Change the arming mode.
    ///
    /// Disarming always writes NO_ALARM, even over NO_ALARM. Arming first
    /// resets every sensor to inactive without running the sensor rules, then
    /// raises the alarm when arming at home while the last scan saw a threat.
    pub fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        self.transact(|state| {
            let alarm = self.repository.alarm_status()?;
            let arming = self.repository.arming_status()?;

            let sensors = if status.is_armed() {
                self.repository
                    .sensors()?
                    .into_iter()
                    .filter(Sensor::is_active)
                    .map(|s| SensorWrite {
                        updated: s.with_active(false),
                        previous: Some(s),
                    })
                    .collect()
            } else {
                Vec::new()
            };

            let target = rules::on_arming_change(status, state.threat_detected);
            let plan = Transition {
                sensors,
                arming: Some(status),
                alarm: target,
            };
            self.commit(&plan, alarm, arming)?;

            info!("Arming status {} -> {}", arming, status);
            if !plan.sensors.is_empty() {
                info!("Reset {} active sensor(s) on arming", plan.sensors.len());
            }
            if let Some(new_alarm) = target {
                info!("Alarm status {} -> {}", alarm, new_alarm);
            }

            let notice = Notice {
                alarm: target,
                sensors_changed: !plan.sensors.is_empty(),
                ..Notice::default()
            };
            Ok(((), notice))
        })
    }

    /// Register a sensor. Adding a known sensor changes nothing but still
    /// reports the count.
    pub fn add_sensor(&self, sensor: &Sensor) -> Result<usize> {
        self.transact(|_state| {
            self.repository.add_sensor(sensor)?;
            let count = self.repository.sensors()?.len();
            info!("Added sensor {} ({} registered)", sensor, count);
            Ok((count, Notice::count(count)))
        })
    }

    /// Unregister a sensor. Unknown sensors are ignored.
    pub fn remove_sensor(&self, sensor: &Sensor) -> Result<usize> {
        self.transact(|_state| {
            self.repository.remove_sensor(sensor)?;
            let count = self.repository.sensors()?.len();
            info!("Removed sensor {} ({} registered)", sensor, count);
            Ok((count, Notice::count(count)))
        })
    }

    /// Run one state-changing operation and deliver what it produced.
    ///
    /// `op` runs under the state lock. Its notice is queued together with the
    /// listeners registered at commit time. The outermost call on a thread
    /// drains the queue; nested calls made from inside a listener only queue.
    fn transact<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut EngineState) -> Result<(T, Notice)>,
    {
        let outbox = self.outbox.lock();

        let value = {
            let mut state = self.state.lock();
            let (value, notice) = op(&mut state)?;
            if !state.listeners.is_empty() {
                outbox
                    .borrow_mut()
                    .queue
                    .push_back((state.listeners.clone(), notice));
            }
            value
        };

        if outbox.borrow().draining {
            return Ok(value);
        }
        outbox.borrow_mut().draining = true;

        let mut first_error = None;
        loop {
            let next = outbox.borrow_mut().queue.pop_front();
            let Some((listeners, notice)) = next else {
                break;
            };
            if let Err(e) = Self::notify(&listeners, &notice) {
                warn!("Listener failed: {}", e);
                first_error.get_or_insert(e);
            }
        }

        outbox.borrow_mut().draining = false;
        match first_error {
            Some(e) => Err(e),
            None => Ok(value),
        }
    }

    /// Write `plan` to the repository, undoing applied writes if one fails.
    fn commit(&self, plan: &Transition, alarm: AlarmStatus, arming: ArmingStatus) -> Result<()> {
        let mut applied = Vec::new();

        let outcome = (|| -> Result<()> {
            for write in &plan.sensors {
                self.repository.update_sensor(&write.updated)?;
                applied.push(Undo::Sensor(write));
            }
            if let Some(status) = plan.arming {
                self.repository.set_arming_status(status)?;
                applied.push(Undo::Arming(arming));
            }
            if let Some(status) = plan.alarm {
                self.repository.set_alarm_status(status)?;
                applied.push(Undo::Alarm(alarm));
            }
            Ok(())
        })();

        if let Err(e) = outcome {
            warn!("Repository write failed, rolling back {} write(s): {}", applied.len(), e);
            for undo in applied.into_iter().rev() {
                if let Err(rollback) = self.rollback(undo) {
                    warn!("Rollback incomplete: {}", rollback);
                }
            }
            return Err(e);
        }

        Ok(())
    }

    fn rollback(&self, undo: Undo<'_>) -> Result<()> {
        match undo {
            Undo::Sensor(SensorWrite {
                previous: Some(previous),
                ..
            }) => self.repository.update_sensor(previous),
            Undo::Sensor(SensorWrite {
                updated,
                previous: None,
            }) => self.repository.remove_sensor(updated),
            Undo::Arming(status) => self.repository.set_arming_status(status),
            Undo::Alarm(status) => self.repository.set_alarm_status(status),
        }
    }

    fn notify(listeners: &ListenerSet, notice: &Notice) -> Result<()> {
        if let Some(status) = notice.alarm {
            listeners.dispatch(|l| l.on_alarm_status_changed(status))?;
        }
        if let Some(threat) = notice.threat {
            listeners.dispatch(|l| l.on_threat_detected(threat))?;
        }
        if notice.sensors_changed {
            listeners.dispatch(|l| l.on_sensors_changed())?;
        }
        if let Some(count) = notice.sensor_count {
            listeners.dispatch(|l| l.on_sensor_count_changed(count))?;
        }
        Ok(())
    }
}
