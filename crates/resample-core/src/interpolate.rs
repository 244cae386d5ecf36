//! Scalar and field-wise record interpolation.

use std::collections::BTreeSet;

use serde_json::Value;

use telegrid_record_model::record::{number_value, Record, TIMESTAMP_FIELD};

/// Linear interpolation: `a + (b - a) * t`.
///
/// `t` outside `[0, 1]` extrapolates.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse of [`lerp`]: the fraction at which `v` sits between `a` and `b`.
///
/// Non-finite when `a == b`; callers must handle that case.
pub fn unlerp(a: f64, b: f64, v: f64) -> f64 {
    (v - a) / (b - a)
}

/// Field names that are never interpolated, even when numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    fields: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>) {
        self.fields.insert(field.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Blend two records field by field.
///
/// The result starts as a clone of `a`. A field is replaced by
/// `lerp(a[f], b[f], t)` only when it is numeric in both records and not
/// excluded; everything else keeps `a`'s value, so identifiers and discrete
/// states never blend. Fields that only `b` has are not added.
pub fn interpolate_record(a: &Record, b: &Record, t: f64, excluded: &ExclusionSet) -> Record {
    let mut result = a.clone();

    if !excluded.contains(TIMESTAMP_FIELD) {
        result.timestamp_ms = lerp(a.timestamp_ms, b.timestamp_ms, t);
    }

    for (name, value) in result.fields.iter_mut() {
        if excluded.contains(name) {
            continue;
        }
        let (Some(va), Some(vb)) = (value.as_f64(), b.get(name).and_then(Value::as_f64)) else {
            continue;
        };
        *value = number_value(lerp(va, vb, t));
    }

    result
}
