pub mod classify;

use crate::types::score::{CanonicalField, CanonicalHouseScore};
use classify::classify;
use serde_json::{Map, Value};

/// The shapes a single house's raw score can take across form versions.
#[derive(Debug, Clone, Copy)]
pub enum RawScore<'a> {
    Absent,
    Number(f64),
    Fields(&'a Map<String, Value>),
}

impl<'a> RawScore<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Object(map) if map.is_empty() => Self::Absent,
            Value::Object(map) => Self::Fields(map),
            other => coerce_number(other).map_or(Self::Absent, Self::Number),
        }
    }
}

pub fn normalize(value: &Value) -> CanonicalHouseScore {
    normalize_raw(RawScore::from_value(value))
}

pub fn normalize_raw(raw: RawScore<'_>) -> CanonicalHouseScore {
    match raw {
        RawScore::Absent => CanonicalHouseScore::default(),
        RawScore::Number(total) => CanonicalHouseScore::total_only(total),
        RawScore::Fields(map) => normalize_fields(map),
    }
}

/// Running state for one mapping. Top-level criteria overwrite, nested ones add.
#[derive(Default)]
struct Accumulator {
    score: CanonicalHouseScore,
    assigned_total: Option<f64>,
    nested_total: f64,
    saw_total: bool,
    unclassified: f64,
}

impl Accumulator {
    fn assign(&mut self, field: Option<CanonicalField>, number: f64) {
        match field {
            Some(CanonicalField::Total) => {
                self.assigned_total = Some(number);
                self.saw_total = true;
            }
            Some(field) => *self.score.slot_mut(field) = number,
            None => self.unclassified += number,
        }
    }

    fn accumulate(&mut self, field: Option<CanonicalField>, number: f64) {
        match field {
            Some(CanonicalField::Total) => {
                self.nested_total += number;
                self.saw_total = true;
            }
            Some(field) => *self.score.slot_mut(field) += number,
            None => self.unclassified += number,
        }
    }

    fn finish(mut self) -> CanonicalHouseScore {
        self.score.total = if self.saw_total {
            self.assigned_total.unwrap_or(0.0) + self.nested_total + self.unclassified
        } else {
            round2(self.score.criteria_sum() + self.unclassified)
        };
        self.score
    }
}

fn normalize_fields(map: &Map<String, Value>) -> CanonicalHouseScore {
    let mut acc = Accumulator::default();
    for (key, value) in map {
        match value {
            // one level only; anything nested deeper is ignored
            Value::Object(inner) => {
                for (inner_key, inner_value) in inner {
                    if let Some(number) = coerce_number(inner_value) {
                        acc.accumulate(classify(inner_key), number);
                    }
                }
            }
            other => {
                if let Some(number) = coerce_number(other) {
                    acc.assign(classify(key), number);
                }
            }
        }
    }
    acc.finish()
}

/// Numbers and numeric strings; negatives and non-finite values become zero.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if number.is_finite() && number > 0.0 {
        Some(number)
    } else {
        Some(0.0)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
