// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/vigil

//! Threat classification of camera frames

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use super::Image;
use crate::error::{AlarmError, Result};

/// Highest accepted confidence threshold, in percent
pub const MAX_CONFIDENCE: f32 = 100.0;

/// Decides whether a frame shows a threat.
pub trait ImageClassifier: Send + Sync {
    /// `confidence_threshold` is a percentage in `0.0..=100.0`; the classifier
    /// reports a threat only when it is at least that confident.
    fn contains_threat(&self, image: &Image, confidence_threshold: f32) -> Result<bool>;
}

/// Reject thresholds that are not a finite percentage.
pub fn validate_threshold(threshold: f32) -> Result<()> {
    if !threshold.is_finite() || !(0.0..=MAX_CONFIDENCE).contains(&threshold) {
        return Err(AlarmError::invalid(format!(
            "confidence threshold must be within 0..={}, got {}",
            MAX_CONFIDENCE, threshold
        )));
    }
    Ok(())
}

/// Stand-in classifier that draws a random confidence for every frame.
///
/// Seeded runs are reproducible, which keeps demos and tests deterministic.
pub struct RandomImageClassifier {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomImageClassifier {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomImageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageClassifier for RandomImageClassifier {
    fn contains_threat(&self, image: &Image, confidence_threshold: f32) -> Result<bool> {
        validate_threshold(confidence_threshold)?;

        let confidence: f32 = self.rng.lock().gen_range(0.0..MAX_CONFIDENCE);
        trace!(
            width = image.width(),
            height = image.height(),
            "Classified frame at {:.1}% confidence",
            confidence
        );
        Ok(confidence >= confidence_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_validation() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(50.0).is_ok());
        assert!(validate_threshold(100.0).is_ok());
        assert!(validate_threshold(-1.0).is_err());
        assert!(validate_threshold(100.5).is_err());
        assert!(validate_threshold(f32::NAN).is_err());
    }

    #[test]
    fn test_seeded_classifier_is_reproducible() {
        let image = Image::blank(8, 8).unwrap();
        let a = RandomImageClassifier::with_seed(7);
        let b = RandomImageClassifier::with_seed(7);

        let run_a: Vec<bool> = (0..16).map(|_| a.contains_threat(&image, 50.0).unwrap()).collect();
        let run_b: Vec<bool> = (0..16).map(|_| b.contains_threat(&image, 50.0).unwrap()).collect();
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn test_threshold_extremes() {
        let image = Image::blank(8, 8).unwrap();
        let classifier = RandomImageClassifier::with_seed(1);

        assert!((0..32).all(|_| classifier.contains_threat(&image, 0.0).unwrap()));
        assert!((0..32).all(|_| !classifier.contains_threat(&image, MAX_CONFIDENCE).unwrap()));
    }
}
