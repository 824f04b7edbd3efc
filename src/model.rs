//! Local digit classifier behind a minimal capability interface
//!
//! The benchmark loop only needs a synchronous `evaluate` capability, so the
//! model is a trait; tests substitute a stub without loading real weights.
//! The bundled implementation is a two-layer dense classifier (784 inputs,
//! one hidden ReLU layer, 10 softmax outputs) loaded from a JSON weight
//! dump. Training and graph export are out of scope.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CotejarError, Result};
use crate::payload::{PixelSample, PIXEL_COUNT};

/// Number of output classes (digits 0-9)
pub const CLASS_COUNT: usize = 10;

/// Output of a single inference call
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Softmax probability per class, summing to 1
    pub scores: Vec<f32>,
    /// Class with the highest probability
    pub predicted_digit: u8,
    /// Probability of the predicted class (0-1)
    pub confidence: f32,
}

/// Synchronous evaluate capability for a loaded classifier
pub trait InferenceModel {
    /// Run one forward pass over the sample
    ///
    /// # Errors
    /// Returns `CotejarError::Inference` if the model cannot produce output
    /// for the sample. Fatal for the run; never retried.
    fn evaluate(&self, sample: &PixelSample) -> Result<Evaluation>;
}

/// Serialized dense-classifier weights
///
/// Row-major: `hidden_weights[i]` holds the 784 input weights of hidden
/// unit `i`; `output_weights[j]` holds one row per class over the hidden
/// units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelWeights {
    /// Hidden layer weights, `[hidden][784]`
    pub hidden_weights: Vec<Vec<f32>>,
    /// Hidden layer bias, `[hidden]`
    pub hidden_bias: Vec<f32>,
    /// Output layer weights, `[10][hidden]`
    pub output_weights: Vec<Vec<f32>>,
    /// Output layer bias, `[10]`
    pub output_bias: Vec<f32>,
}

/// Two-layer dense digit classifier (784 -> hidden ReLU -> 10 softmax)
#[derive(Debug, Clone)]
pub struct DenseClassifier {
    weights: ModelWeights,
}

impl DenseClassifier {
    /// Create a classifier from validated weights
    ///
    /// # Errors
    /// Returns `CotejarError::Format` if any layer shape is inconsistent.
    pub fn new(weights: ModelWeights) -> Result<Self> {
        let hidden = weights.hidden_weights.len();
        if hidden == 0 {
            return Err(CotejarError::Format {
                reason: "Hidden layer has no units".to_string(),
            });
        }
        if let Some(row) = weights
            .hidden_weights
            .iter()
            .find(|row| row.len() != PIXEL_COUNT)
        {
            return Err(CotejarError::Format {
                reason: format!(
                    "Hidden weight row has {} inputs, expected {}",
                    row.len(),
                    PIXEL_COUNT
                ),
            });
        }
        if weights.hidden_bias.len() != hidden {
            return Err(CotejarError::Format {
                reason: format!(
                    "Hidden bias has {} entries, expected {}",
                    weights.hidden_bias.len(),
                    hidden
                ),
            });
        }
        if weights.output_weights.len() != CLASS_COUNT {
            return Err(CotejarError::Format {
                reason: format!(
                    "Output layer has {} rows, expected {}",
                    weights.output_weights.len(),
                    CLASS_COUNT
                ),
            });
        }
        if let Some(row) = weights
            .output_weights
            .iter()
            .find(|row| row.len() != hidden)
        {
            return Err(CotejarError::Format {
                reason: format!(
                    "Output weight row has {} inputs, expected {}",
                    row.len(),
                    hidden
                ),
            });
        }
        if weights.output_bias.len() != CLASS_COUNT {
            return Err(CotejarError::Format {
                reason: format!(
                    "Output bias has {} entries, expected {}",
                    weights.output_bias.len(),
                    CLASS_COUNT
                ),
            });
        }
        Ok(Self { weights })
    }

    /// Load a classifier from a JSON weight dump
    ///
    /// # Errors
    /// Returns `CotejarError::Io` if the file cannot be read,
    /// `CotejarError::Format` if parsing or shape validation fails.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let weights: ModelWeights =
            serde_json::from_str(&raw).map_err(|e| CotejarError::Format {
                reason: format!("Failed to parse {}: {}", path.display(), e),
            })?;
        Self::new(weights)
    }

    /// Number of hidden units
    #[must_use]
    pub fn hidden_units(&self) -> usize {
        self.weights.hidden_weights.len()
    }

    fn forward(&self, pixels: &[f32]) -> Vec<f32> {
        let hidden: Vec<f32> = self
            .weights
            .hidden_weights
            .iter()
            .zip(&self.weights.hidden_bias)
            .map(|(row, bias)| {
                let sum: f32 = row.iter().zip(pixels).map(|(w, x)| w * x).sum();
                (sum + bias).max(0.0)
            })
            .collect();

        let logits: Vec<f32> = self
            .weights
            .output_weights
            .iter()
            .zip(&self.weights.output_bias)
            .map(|(row, bias)| {
                let sum: f32 = row.iter().zip(&hidden).map(|(w, h)| w * h).sum();
                sum + bias
            })
            .collect();

        softmax(&logits)
    }
}

impl InferenceModel for DenseClassifier {
    fn evaluate(&self, sample: &PixelSample) -> Result<Evaluation> {
        let scores = self.forward(sample.pixels());

        let (predicted, confidence) = scores
            .iter()
            .enumerate()
            .fold((0usize, f32::NEG_INFINITY), |(best, max), (i, &s)| {
                if s > max {
                    (i, s)
                } else {
                    (best, max)
                }
            });

        if !confidence.is_finite() {
            return Err(CotejarError::Inference(
                "Model produced non-finite scores".to_string(),
            ));
        }

        Ok(Evaluation {
            scores,
            predicted_digit: predicted as u8,
            confidence,
        })
    }
}

/// Numerically stable softmax over logits
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_logit = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exp_logits: Vec<f32> = logits.iter().map(|x| (x - max_logit).exp()).collect();
    let sum: f32 = exp_logits.iter().sum();
    exp_logits.iter().map(|x| x / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tiny valid weight set: two hidden units, class 3 dominates
    fn test_weights() -> ModelWeights {
        ModelWeights {
            hidden_weights: vec![vec![0.0; PIXEL_COUNT]; 2],
            hidden_bias: vec![0.0, 1.0],
            output_weights: {
                let mut rows = vec![vec![0.0, 0.0]; CLASS_COUNT];
                rows[3] = vec![0.0, 5.0];
                rows
            },
            output_bias: vec![0.0; CLASS_COUNT],
        }
    }

    fn test_sample() -> PixelSample {
        PixelSample::new(vec![0.0; PIXEL_COUNT]).expect("valid sample")
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0, 4.0]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_softmax_numerical_stability() {
        let probs = softmax(&[1000.0, 1001.0, 1002.0]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(probs.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_evaluate_picks_dominant_class() {
        let model = DenseClassifier::new(test_weights()).expect("valid weights");
        let eval = model.evaluate(&test_sample()).expect("inference");

        assert_eq!(eval.predicted_digit, 3);
        assert!(eval.confidence > 0.9);
        let sum: f32 = eval.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_confidence_matches_scores() {
        let model = DenseClassifier::new(test_weights()).expect("valid weights");
        let eval = model.evaluate(&test_sample()).expect("inference");

        let max_score = eval.scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!((eval.confidence - max_score).abs() < 1e-7);
    }

    #[test]
    fn test_rejects_wrong_hidden_row_width() {
        let mut weights = test_weights();
        weights.hidden_weights[0] = vec![0.0; 10];
        let err = DenseClassifier::new(weights).unwrap_err();
        assert!(matches!(err, CotejarError::Format { .. }));
    }

    #[test]
    fn test_rejects_wrong_output_row_count() {
        let mut weights = test_weights();
        weights.output_weights.pop();
        let err = DenseClassifier::new(weights).unwrap_err();
        assert!(matches!(err, CotejarError::Format { .. }));
    }

    #[test]
    fn test_rejects_mismatched_bias() {
        let mut weights = test_weights();
        weights.hidden_bias = vec![0.0; 5];
        let err = DenseClassifier::new(weights).unwrap_err();
        assert!(matches!(err, CotejarError::Format { .. }));
    }

    #[test]
    fn test_rejects_empty_hidden_layer() {
        let weights = ModelWeights {
            hidden_weights: vec![],
            hidden_bias: vec![],
            output_weights: vec![vec![]; CLASS_COUNT],
            output_bias: vec![0.0; CLASS_COUNT],
        };
        let err = DenseClassifier::new(weights).unwrap_err();
        assert!(matches!(err, CotejarError::Format { .. }));
    }

    #[test]
    fn test_weights_json_round_trip() {
        let weights = test_weights();
        let json = serde_json::to_string(&weights).expect("serialize");
        let parsed: ModelWeights = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.hidden_weights.len(), weights.hidden_weights.len());
        assert_eq!(parsed.output_bias.len(), CLASS_COUNT);
    }
}
