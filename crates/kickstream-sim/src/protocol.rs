//! Frames produced by the test feed. Field names match what a live client
//! expects: a `type` tag plus camelCase fields.

use rand::Rng;
use serde::Serialize;

pub const ROSE_GIFT_ID: u32 = 5655;
pub const PERFUME_GIFT_ID: u32 = 5658;

/// Viewers the feed pretends to hear from.
pub const TEST_USERS: [&str; 5] = [
    "TestUser_A",
    "TestUser_B",
    "TestUser_C",
    "TestUser_D",
    "TestUser_E",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum FeedMessage {
    #[serde(rename = "system")]
    System { message: String },

    #[serde(rename = "like", rename_all = "camelCase")]
    Like { user_name: String, like_count: u32 },

    #[serde(rename = "gift", rename_all = "camelCase")]
    Gift {
        user_name: String,
        gift_name: String,
        gift_id: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        repeat_count: Option<u32>,
    },
}

impl FeedMessage {
    pub fn welcome() -> Self {
        FeedMessage::System {
            message: "Connected to kickstream test feed. Sending random events...".into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Pick a random event: 50% like, 30% rose, 20% perfume.
///
/// Roses carry a `repeatCount` in `1..=max_combo` when `max_combo > 1`.
pub fn random_message(rng: &mut impl Rng, max_combo: u32) -> FeedMessage {
    let user_name = TEST_USERS[rng.gen_range(0..TEST_USERS.len())].to_string();
    let roll: f64 = rng.gen();

    if roll < 0.5 {
        FeedMessage::Like {
            user_name,
            like_count: 1,
        }
    } else if roll < 0.8 {
        let repeat_count = (max_combo > 1).then(|| rng.gen_range(1..=max_combo));
        FeedMessage::Gift {
            user_name,
            gift_name: "Rose".into(),
            gift_id: ROSE_GIFT_ID,
            repeat_count,
        }
    } else {
        FeedMessage::Gift {
            user_name,
            gift_name: "Perfume".into(),
            gift_id: PERFUME_GIFT_ID,
            repeat_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickstream_live::{AudienceEvent, EventParser, GiftKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn like_uses_camel_case_fields() {
        let json = FeedMessage::Like {
            user_name: "TestUser_A".into(),
            like_count: 1,
        }
        .to_json()
        .unwrap();
        assert_eq!(json, r#"{"type":"like","userName":"TestUser_A","likeCount":1}"#);
    }

    #[test]
    fn gift_omits_missing_repeat_count() {
        let json = FeedMessage::Gift {
            user_name: "TestUser_B".into(),
            gift_name: "Rose".into(),
            gift_id: ROSE_GIFT_ID,
            repeat_count: None,
        }
        .to_json()
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"gift","userName":"TestUser_B","giftName":"Rose","giftId":5655}"#
        );
    }

    #[test]
    fn welcome_is_ignored_by_live_parser() {
        let json = FeedMessage::welcome().to_json().unwrap();
        assert!(json.starts_with(r#"{"type":"system""#));
        assert!(EventParser::default().parse(&json).is_none());
    }

    #[test]
    fn random_messages_are_accepted_by_live_parser() {
        let parser = EventParser::default();
        let mut rng = StdRng::seed_from_u64(11);
        let (mut likes, mut roses, mut perfumes) = (0, 0, 0);

        for _ in 0..500 {
            let json = random_message(&mut rng, 4).to_json().unwrap();
            match parser.parse(&json).expect("generated frame must parse") {
                AudienceEvent::Like { subject, .. } => {
                    assert!(TEST_USERS.contains(&subject.as_str()));
                    likes += 1;
                }
                AudienceEvent::Gift(gift) => {
                    assert!((1..=4).contains(&gift.repeat_count));
                    match gift.kind {
                        GiftKind::Rose => roses += 1,
                        GiftKind::Perfume => perfumes += 1,
                        GiftKind::Unrecognized => panic!("unmapped gift {}", gift.gift_name),
                    }
                }
            }
        }

        assert!(likes > roses && roses > perfumes / 2);
        assert!(perfumes > 0);
    }

    #[test]
    fn single_combo_roses_have_no_repeat_count() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            if let FeedMessage::Gift { repeat_count, .. } = random_message(&mut rng, 1) {
                assert!(repeat_count.is_none());
            }
        }
    }
}
