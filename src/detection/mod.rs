//! Detection module - camera frames and threat classification

mod classification;

pub use classification::*;

use serde::{Deserialize, Serialize};

use crate::error::{AlarmError, Result};

/// Bytes per RGB pixel
pub const CHANNELS: usize = 3;

/// A single RGB camera frame. The engine never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap raw RGB pixels, row-major.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AlarmError::invalid(format!(
                "image must not be empty ({}x{})",
                width, height
            )));
        }

        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(AlarmError::invalid(format!(
                "image {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// All-black frame
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        let len = width as usize * height as usize * CHANNELS;
        Self::from_rgb(width, height, vec![0; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
