//! Frame parser and validator.
//!
//! Turns one raw text frame into at most one [`AudienceEvent`]. Nothing in
//! here is fatal: rejected frames are logged and dropped.

use tracing::{debug, info, warn};

use crate::protocol::{
    event_types, normalize_count, AudienceEvent, FeedFrame, GiftEvent, GiftKind,
};

// ---------------------------------------------------------------------------
// Gift catalog
// ---------------------------------------------------------------------------

/// Alias lists used to classify gift names.
#[derive(Debug, Clone)]
pub struct GiftCatalog {
    rose: Vec<String>,
    perfume: Vec<String>,
}

impl GiftCatalog {
    /// Build a catalog. Aliases are stored lowercased; blank aliases are
    /// skipped because they would match every gift.
    pub fn new(rose_aliases: &[String], perfume_aliases: &[String]) -> Self {
        Self {
            rose: normalize_aliases(rose_aliases),
            perfume: normalize_aliases(perfume_aliases),
        }
    }

    /// Case-insensitive containment match, rose aliases first.
    pub fn classify(&self, gift_name: &str) -> GiftKind {
        let name = gift_name.to_lowercase();
        if self.rose.iter().any(|alias| name.contains(alias.as_str())) {
            GiftKind::Rose
        } else if self.perfume.iter().any(|alias| name.contains(alias.as_str())) {
            GiftKind::Perfume
        } else {
            GiftKind::Unrecognized
        }
    }
}

impl Default for GiftCatalog {
    fn default() -> Self {
        Self::new(
            &["Rose".to_string(), "Hoa hồng".to_string()],
            &["Perfume".to_string(), "Nước hoa".to_string()],
        )
    }
}

fn normalize_aliases(aliases: &[String]) -> Vec<String> {
    aliases
        .iter()
        .map(|alias| alias.trim().to_lowercase())
        .filter(|alias| !alias.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why a frame produced no event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameRejection {
    #[error("malformed frame: {0}")]
    Malformed(String),

    #[error("unknown event type: {0:?}")]
    UnknownType(Option<String>),

    #[error("{0} event without userName")]
    MissingSubject(&'static str),

    #[error("gift event without giftName")]
    MissingGiftName,

    #[error("gift {0:?} is not mapped to an action")]
    UnrecognizedGift(String),
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct EventParser {
    catalog: GiftCatalog,
}

impl EventParser {
    pub fn new(catalog: GiftCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &GiftCatalog {
        &self.catalog
    }

    /// Parse one frame, logging and dropping anything that is rejected.
    pub fn parse(&self, raw: &str) -> Option<AudienceEvent> {
        match self.decode(raw) {
            Ok(event) => Some(event),
            Err(rejection) => {
                match &rejection {
                    FrameRejection::Malformed(_) => {
                        warn!(error = %rejection, raw = %raw, "dropping frame");
                    }
                    FrameRejection::MissingSubject(_) | FrameRejection::MissingGiftName => {
                        warn!(reason = %rejection, "dropping incomplete event");
                    }
                    FrameRejection::UnknownType(_) | FrameRejection::UnrecognizedGift(_) => {
                        info!(reason = %rejection, "ignoring event");
                    }
                }
                None
            }
        }
    }

    /// Parse one frame, returning the reason when it yields no event.
    pub fn decode(&self, raw: &str) -> Result<AudienceEvent, FrameRejection> {
        let frame: FeedFrame =
            serde_json::from_str(raw).map_err(|e| FrameRejection::Malformed(e.to_string()))?;

        match frame.kind.as_deref() {
            Some(event_types::LIKE) => {
                let subject = required(frame.user_name)
                    .ok_or(FrameRejection::MissingSubject(event_types::LIKE))?;
                let count = normalize_count(frame.like_count);
                debug!(subject = %subject, count, "like");
                Ok(AudienceEvent::Like { subject, count })
            }
            Some(event_types::GIFT) => {
                let subject = required(frame.user_name)
                    .ok_or(FrameRejection::MissingSubject(event_types::GIFT))?;
                let gift_name = required(frame.gift_name).ok_or(FrameRejection::MissingGiftName)?;
                let kind = self.catalog.classify(&gift_name);
                if kind == GiftKind::Unrecognized {
                    return Err(FrameRejection::UnrecognizedGift(gift_name));
                }
                Ok(AudienceEvent::Gift(GiftEvent {
                    subject,
                    gift_name,
                    kind,
                    repeat_count: normalize_count(frame.repeat_count),
                    gift_id: frame.gift_id,
                }))
            }
            _ => Err(FrameRejection::UnknownType(frame.kind)),
        }
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> EventParser {
        EventParser::default()
    }

    #[test]
    fn like_without_user_is_dropped() {
        assert_eq!(
            parser().decode(r#"{"type":"like"}"#),
            Err(FrameRejection::MissingSubject("like"))
        );
        assert!(parser().parse(r#"{"type":"like","userName":""}"#).is_none());
    }

    #[test]
    fn like_count_defaults_to_one() {
        let event = parser().parse(r#"{"type":"like","userName":"an"}"#).unwrap();
        assert_eq!(
            event,
            AudienceEvent::Like {
                subject: "an".into(),
                count: 1
            }
        );

        let event = parser()
            .parse(r#"{"type":"like","userName":"an","likeCount":-2}"#)
            .unwrap();
        assert!(matches!(event, AudienceEvent::Like { count: 1, .. }));

        let event = parser()
            .parse(r#"{"type":"like","userName":"an","likeCount":15}"#)
            .unwrap();
        assert!(matches!(event, AudienceEvent::Like { count: 15, .. }));
    }

    #[test]
    fn gift_name_matches_case_insensitively() {
        let event = parser()
            .parse(r#"{"type":"gift","userName":"x","giftName":"ROSE"}"#)
            .unwrap();
        match event {
            AudienceEvent::Gift(gift) => {
                assert_eq!(gift.kind, GiftKind::Rose);
                assert_eq!(gift.gift_name, "ROSE");
                assert_eq!(gift.repeat_count, 1);
            }
            other => panic!("expected gift, got {other:?}"),
        }
    }

    #[test]
    fn gift_name_matches_by_substring() {
        let event = parser()
            .parse(r#"{"type":"gift","userName":"x","giftName":"Golden Perfume Bottle","repeatCount":4,"giftId":5658}"#)
            .unwrap();
        match event {
            AudienceEvent::Gift(gift) => {
                assert_eq!(gift.kind, GiftKind::Perfume);
                assert_eq!(gift.repeat_count, 4);
                assert_eq!(gift.gift_id, Some(5658));
            }
            other => panic!("expected gift, got {other:?}"),
        }
    }

    #[test]
    fn localized_alias_matches() {
        let event = parser()
            .parse(r#"{"type":"gift","userName":"x","giftName":"Hoa Hồng"}"#)
            .unwrap();
        assert!(matches!(event, AudienceEvent::Gift(GiftEvent { kind: GiftKind::Rose, .. })));
    }

    #[test]
    fn rose_aliases_win_over_perfume_aliases() {
        let catalog = GiftCatalog::new(&["rose".into()], &["rose perfume".into()]);
        assert_eq!(catalog.classify("Rose Perfume"), GiftKind::Rose);
    }

    #[test]
    fn blank_aliases_are_skipped() {
        let catalog = GiftCatalog::new(&["".into(), "  ".into()], &["Perfume".into()]);
        assert_eq!(catalog.classify("Galaxy"), GiftKind::Unrecognized);
    }

    #[test]
    fn unmapped_gift_is_dropped() {
        assert_eq!(
            parser().decode(r#"{"type":"gift","userName":"x","giftName":"Galaxy"}"#),
            Err(FrameRejection::UnrecognizedGift("Galaxy".into()))
        );
    }

    #[test]
    fn gift_requires_name_and_subject() {
        assert_eq!(
            parser().decode(r#"{"type":"gift","userName":"x"}"#),
            Err(FrameRejection::MissingGiftName)
        );
        assert_eq!(
            parser().decode(r#"{"type":"gift","giftName":"Rose"}"#),
            Err(FrameRejection::MissingSubject("gift"))
        );
    }

    #[test]
    fn unknown_type_is_dropped() {
        assert_eq!(
            parser().decode(r#"{"type":"dance","userName":"x"}"#),
            Err(FrameRejection::UnknownType(Some("dance".into())))
        );
        assert!(parser().parse(r#"{"userName":"x"}"#).is_none());
    }

    #[test]
    fn type_match_is_case_sensitive() {
        assert!(parser().parse(r#"{"type":"LIKE","userName":"x"}"#).is_none());
    }

    #[test]
    fn malformed_payload_is_dropped() {
        assert!(matches!(
            parser().decode("not json at all"),
            Err(FrameRejection::Malformed(_))
        ));
        assert!(matches!(
            parser().decode(r#"{"type":"like","userName":"x","likeCount":"many"}"#),
            Err(FrameRejection::Malformed(_))
        ));
    }
}
