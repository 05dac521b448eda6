//! Validation for the dispatch and simulation sections.

use crate::schema::KickstreamConfig;

use super::helpers::{validate_range, validate_range_f64};

/// Validate combo queue pacing.
pub(crate) fn validate_dispatch(errors: &mut Vec<String>, config: &KickstreamConfig) {
    validate_range_f64(
        errors,
        "dispatch.pacing_delay_secs",
        config.dispatch.pacing_delay_secs,
        0.0,
        60.0,
    );
    validate_range(
        errors,
        "dispatch.tick_rate_hz",
        config.dispatch.tick_rate_hz,
        1,
        240,
    );
}

/// Validate simulation settings.
pub(crate) fn validate_simulation(errors: &mut Vec<String>, config: &KickstreamConfig) {
    validate_range_f64(
        errors,
        "simulation.combo_resolve_secs",
        config.simulation.combo_resolve_secs,
        0.0,
        60.0,
    );
}
