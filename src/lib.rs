// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Vigil - Premises Alarm Decision Engine
//!
//! Decides whether a premises is safe, pending danger, or in alarm from:
//! - door, window and motion sensor activity
//! - the arming mode (disarmed, armed at home, armed away)
//! - threat classification of camera frames
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Alarm Engine                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────┐   ┌──────────────┐   ┌─────────────────────┐   │
//! │  │ Sensor  │ → │  Transition  │ → │  Status listeners   │   │
//! │  │ events  │   │    rules     │   │  (event bus, UI..)  │   │
//! │  └─────────┘   └──────────────┘   └─────────────────────┘   │
//! │       ↑               ↕                                     │
//! │  ┌─────────┐   ┌──────────────┐                             │
//! │  │ Image   │   │  Security    │                             │
//! │  │ classif.│   │  repository  │                             │
//! │  └─────────┘   └──────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod db;
pub mod detection;
pub mod error;
pub mod sensors;

// Re-exports for convenience
pub use config::{Config, EngineConfig};
pub use core::{AlarmEngine, AlarmStatus, ArmingStatus, EventBus, StatusListener};
pub use db::{MemoryRepository, RepositorySnapshot, SecurityRepository};
pub use detection::{Image, ImageClassifier, RandomImageClassifier};
pub use error::{AlarmError, Result};
pub use sensors::{Sensor, SensorEvent, SensorSimulator, SensorType};

/// Vigil version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Vigil name
pub const NAME: &str = "Vigil";
