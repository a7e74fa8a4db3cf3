use serde::Deserialize;
use serde_json::Value;

use crate::error::{LoaderError, Result};
use crate::geom::bbox::BoundingBox;

pub const DEFAULT_ALPHA: f64 = 0.2;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AlphaValue {
    Number(f64),
    Text(String),
}

// keys the loader understands, everything else in the object is ignored
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    transform_to_box: Option<Vec<f64>>,
    #[serde(default)]
    alpha: Option<AlphaValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    transform_to_box: Option<BoundingBox>,
    alpha: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            transform_to_box: None,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl LoaderConfig {
    pub fn new(transform_to_box: Option<BoundingBox>, alpha: f64) -> Result<Self> {
        Ok(LoaderConfig {
            transform_to_box,
            alpha: check_alpha(alpha)?,
        })
    }

    pub fn with_transform_to_box(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.transform_to_box = Some(BoundingBox::from_bounds(x, y, width, height));
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        self.alpha = check_alpha(alpha)?;
        Ok(self)
    }

    /// Reads `{"transform_to_box": [x, y, w, h], "alpha": a}`; both keys optional.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| LoaderError::Config(format!("invalid json: {}", e)))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let raw: RawConfig = serde_json::from_value(value.clone())
            .map_err(|e| LoaderError::Config(e.to_string()))?;

        let mut config = LoaderConfig::default();
        if let Some(b) = raw.transform_to_box {
            if b.len() != 4 {
                return Err(LoaderError::Config(format!(
                    "transform_to_box needs 4 values [x, y, w, h], got {}",
                    b.len()
                )));
            }
            config = config.with_transform_to_box(b[0], b[1], b[2], b[3]);
        }
        match raw.alpha {
            Some(AlphaValue::Number(a)) => config = config.with_alpha(a)?,
            Some(AlphaValue::Text(s)) => {
                let a = s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| LoaderError::Config(format!("alpha is not a number: {:?}", s)))?;
                config = config.with_alpha(a)?;
            }
            None => {}
        }
        Ok(config)
    }

    pub fn transform_to_box(&self) -> Option<&BoundingBox> {
        self.transform_to_box.as_ref()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

fn check_alpha(alpha: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(LoaderError::Config(format!(
            "alpha must be within [0, 1], got {}",
            alpha
        )));
    }
    Ok(alpha)
}
