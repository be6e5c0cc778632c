//! Logistic model stored as safetensors, evaluated with Candle.
//!
//! Expected tensors: `weight` with shape `[1, 8]` and `bias` with shape `[1]`.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use tracing::debug;

use renalyx_common::{InferenceError, FEATURE_COUNT};

use crate::{Classifier, LoadError};

pub struct LogisticModel {
    weight: Tensor,
    bias: Tensor,
    device: Device,
}

impl std::fmt::Debug for LogisticModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogisticModel")
            .field("weight", &self.weight.shape())
            .field("bias", &self.bias.shape())
            .finish()
    }
}

impl LogisticModel {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let device = Device::Cpu;
        let mut tensors = candle_core::safetensors::load(path, &device)?;
        let weight = tensors
            .remove("weight")
            .ok_or_else(|| LoadError::Invalid("missing tensor `weight`".to_string()))?;
        let bias = tensors
            .remove("bias")
            .ok_or_else(|| LoadError::Invalid("missing tensor `bias`".to_string()))?;
        Self::from_tensors(weight, bias, device)
    }

    pub fn from_parts(weights: &[f64], bias: f64) -> Result<Self, LoadError> {
        let device = Device::Cpu;
        let weight = Tensor::from_slice(weights, (1, weights.len()), &device)?;
        let bias = Tensor::from_slice(&[bias], 1, &device)?;
        Self::from_tensors(weight, bias, device)
    }

    fn from_tensors(weight: Tensor, bias: Tensor, device: Device) -> Result<Self, LoadError> {
        if weight.dims() != [1, FEATURE_COUNT] {
            return Err(LoadError::Invalid(format!(
                "`weight` has shape {:?}, expected [1, {FEATURE_COUNT}]",
                weight.dims()
            )));
        }
        if bias.dims() != [1] {
            return Err(LoadError::Invalid(format!(
                "`bias` has shape {:?}, expected [1]",
                bias.dims()
            )));
        }
        let weight = weight.to_dtype(DType::F64)?;
        let bias = bias.to_dtype(DType::F64)?;
        debug!("Logistic model loaded: weight {:?}", weight.shape());
        Ok(Self { weight, bias, device })
    }

    /// Decision function `x · wᵀ + b`.
    pub fn logit(&self, row: &[f64]) -> Result<f64, InferenceError> {
        if row.len() != FEATURE_COUNT {
            return Err(InferenceError::Shape {
                expected: FEATURE_COUNT,
                actual: row.len(),
            });
        }
        let eval = || -> candle_core::Result<f64> {
            let x = Tensor::from_slice(row, (1, row.len()), &self.device)?;
            let logits = x.matmul(&self.weight.t()?)?.broadcast_add(&self.bias)?;
            let values = logits.flatten_all()?.to_vec1::<f64>()?;
            Ok(values[0])
        };
        eval().map_err(|e| InferenceError::Evaluation(e.to_string()))
    }
}

impl Classifier for LogisticModel {
    fn name(&self) -> &str {
        "logistic"
    }

    fn predict(&self, row: &[f64]) -> Result<f64, InferenceError> {
        Ok(if self.logit(row)? > 0.0 { 1.0 } else { 0.0 })
    }
}
