use crate::schema::KickstreamConfig;

use super::helpers::{validate_aliases, validate_range};

/// Validate gift alias lists. A blank alias would match every gift name.
pub(crate) fn validate_gifts(errors: &mut Vec<String>, config: &KickstreamConfig) {
    validate_aliases(errors, "gifts.rose_aliases", &config.gifts.rose_aliases);
    validate_aliases(errors, "gifts.perfume_aliases", &config.gifts.perfume_aliases);
}

/// Validate heart accumulator constraints.
pub(crate) fn validate_hearts(errors: &mut Vec<String>, config: &KickstreamConfig) {
    validate_range(errors, "hearts.capacity", config.hearts.capacity, 1, 10_000);
}
