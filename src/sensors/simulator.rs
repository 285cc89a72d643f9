// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Sensor simulator for demo/testing

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::{Sensor, SensorEvent};
use crate::detection::Image;
use crate::error::Result;

/// Produces plausible sensor traffic for a fixed set of sensors.
///
/// Tracks what it has told the engine so every event carries the sensor's
/// previous `active` flag, the way a real front end would.
pub struct SensorSimulator {
    sensors: Vec<Sensor>,
    rng: ChaCha8Rng,
    sequence: u64,

    // Simulation state
    trip_probability: f64,
    frame_size: (u32, u32),
}

impl SensorSimulator {
    pub fn new(sensors: Vec<Sensor>, seed: u64) -> Self {
        Self {
            sensors,
            rng: ChaCha8Rng::seed_from_u64(seed),
            sequence: 0,
            trip_probability: 0.6,
            frame_size: (64, 48),
        }
    }

    /// Probability that a picked sensor trips rather than settles
    pub fn with_trip_probability(mut self, probability: f64) -> Self {
        self.trip_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Next event, or `None` if there are no sensors to drive.
    pub fn next_event(&mut self) -> Option<SensorEvent> {
        if self.sensors.is_empty() {
            return None;
        }

        let index = self.rng.gen_range(0..self.sensors.len());
        let active = self.rng.gen_bool(self.trip_probability);
        self.sequence += 1;

        Some(SensorEvent::new(self.sensors[index].clone(), active))
    }

    /// Record the sensor as the engine stored it.
    pub fn acknowledge(&mut self, sensor: &Sensor) {
        if let Some(known) = self.sensors.iter_mut().find(|s| s.id() == sensor.id()) {
            known.set_active(sensor.is_active());
        }
    }

    /// Forget any activity, as happens when the system is armed.
    pub fn reset(&mut self) {
        for sensor in &mut self.sensors {
            sensor.set_active(false);
        }
    }

    /// Noise frame from the simulated camera
    pub fn capture_frame(&mut self) -> Result<Image> {
        let (width, height) = self.frame_size;
        let mut pixels = vec![0u8; width as usize * height as usize * crate::detection::CHANNELS];
        self.rng.fill_bytes(&mut pixels);
        Image::from_rgb(width, height, pixels)
    }
}
