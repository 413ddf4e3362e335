//! String-keyed draft field surface

use serde::Serialize;

/// A locally mutable copy of one entity's editable fields.
///
/// Fields are addressed by wire name so edit sessions and server-side
/// validation errors speak the same vocabulary. Values are form-input
/// strings; the server coerces types on submission. `Default` yields the
/// empty creation defaults.
pub trait Draft: Clone + Default + Serialize + Send + Sync + 'static {
    /// Editable field names, in display order.
    const FIELDS: &'static [&'static str];

    /// Fields that must be non-empty before a create is submitted.
    const REQUIRED: &'static [&'static str];

    /// Returns the current value of `field`, or `None` for an unknown name.
    fn get(&self, field: &str) -> Option<&str>;

    /// Replaces the value of exactly one field, leaving all others untouched.
    /// Returns `false` for an unknown name.
    fn set(&mut self, field: &str, value: &str) -> bool;

    /// Required fields that are currently empty.
    fn missing_required(&self) -> Vec<&'static str> {
        Self::REQUIRED
            .iter()
            .copied()
            .filter(|field| self.get(field).is_none_or(|value| value.trim().is_empty()))
            .collect()
    }
}
