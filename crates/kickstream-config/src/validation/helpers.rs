//! Shared range-validation helpers used by all section validators.

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is outside `[min, max]` (float). NaN is rejected.
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if value.is_nan() || value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if the list is empty or holds a blank entry.
pub(crate) fn validate_aliases(errors: &mut Vec<String>, name: &str, values: &[String]) {
    if values.is_empty() {
        errors.push(format!("{name} must not be empty"));
        return;
    }
    if values.iter().any(|v| v.trim().is_empty()) {
        errors.push(format!("{name} contains a blank alias"));
    }
}
