//! Wire format of the audience-event feed and the typed events derived from it.
//!
//! The feed server pushes one JSON object per text frame. Only the fields of
//! [`FeedFrame`] are read; anything else in the object is ignored.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Event type names
// ---------------------------------------------------------------------------

/// Values of the `type` discriminator understood by the parser.
pub mod event_types {
    pub const LIKE: &str = "like";
    pub const GIFT: &str = "gift";
}

// ---------------------------------------------------------------------------
// Raw frame
// ---------------------------------------------------------------------------

/// One raw frame as sent by the feed server. Every field is optional at
/// this level; the parser decides what is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedFrame {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub user_name: Option<String>,
    pub like_count: Option<i64>,
    pub gift_name: Option<String>,
    pub gift_id: Option<i64>,
    pub repeat_count: Option<i64>,
}

/// Map an optional wire count to a count of at least one.
pub(crate) fn normalize_count(raw: Option<i64>) -> u32 {
    match raw {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

// ---------------------------------------------------------------------------
// Typed events
// ---------------------------------------------------------------------------

/// Normalized gift classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GiftKind {
    Rose,
    Perfume,
    Unrecognized,
}

impl GiftKind {
    pub fn label(self) -> &'static str {
        match self {
            GiftKind::Rose => "rose",
            GiftKind::Perfume => "perfume",
            GiftKind::Unrecognized => "unrecognized",
        }
    }
}

/// A gift sent by a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftEvent {
    pub subject: String,
    /// Gift name exactly as received.
    pub gift_name: String,
    pub kind: GiftKind,
    /// Combo size, at least 1.
    pub repeat_count: u32,
    pub gift_id: Option<i64>,
}

/// A validated audience event. `subject` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudienceEvent {
    Like { subject: String, count: u32 },
    Gift(GiftEvent),
}

impl AudienceEvent {
    /// The viewer who caused this event.
    pub fn subject(&self) -> &str {
        match self {
            AudienceEvent::Like { subject, .. } => subject,
            AudienceEvent::Gift(gift) => &gift.subject,
        }
    }
}
