//! Sensor module - sensor entities and simulated sensor traffic

mod sensor;
mod simulator;

pub use sensor::{Sensor, SensorEvent, SensorType};
pub use simulator::SensorSimulator;
