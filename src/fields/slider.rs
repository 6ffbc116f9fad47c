use serde_json::Value;

use crate::fields::{FieldAdapter, FieldEvent, unsupported};
use crate::foundation::error::FormResult;
use crate::schema::model::FieldDescriptor;
use crate::state::values::number_value;
use crate::view::tree::Control;

/// Numeric range input.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderField {
    min: f64,
    max: f64,
    step: f64,
}

impl SliderField {
    /// Mount for a descriptor.
    pub fn new(descriptor: &FieldDescriptor) -> Self {
        Self {
            min: descriptor.minimum,
            max: descriptor.maximum,
            step: descriptor.step,
        }
    }

    /// Value shown by the slider: the current number, or `min` when unset.
    pub fn displayed(&self, current: Option<&Value>) -> f64 {
        let parsed = match current {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite()).unwrap_or(self.min)
    }

    /// Clamp into `[min, max]` and snap to the step grid anchored at `min`.
    pub fn snap(&self, raw: f64) -> f64 {
        if self.min.is_nan() || self.max.is_nan() || self.min > self.max {
            return raw;
        }
        let clamped = raw.clamp(self.min, self.max);
        if self.step <= 0.0 || !self.step.is_finite() {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).min(self.max);
        // Drop float noise from repeated step multiplication (0.1 * 3 -> 0.3).
        let scaled = snapped * 1e9;
        if !scaled.is_finite() {
            return snapped;
        }
        scaled.round() / 1e9
    }
}

impl FieldAdapter for SliderField {
    fn handle(&mut self, _current: Option<&Value>, event: FieldEvent) -> FormResult<Option<Value>> {
        match event {
            FieldEvent::Slide { value } if value.is_finite() => {
                Ok(Some(number_value(self.snap(value))))
            }
            FieldEvent::Slide { value } => {
                tracing::debug!(value, "ignoring non-finite slider position");
                Ok(None)
            }
            other => Err(unsupported("slider", &other)),
        }
    }

    fn view(&self, current: Option<&Value>) -> Control {
        Control::Slider {
            value: self.displayed(current),
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }
}
