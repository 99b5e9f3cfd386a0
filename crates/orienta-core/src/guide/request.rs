//! Guide generation request model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Prior knowledge the learner declares for a topic.
///
/// Serialized with the backend's wire values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum KnowledgeLevel {
    #[default]
    #[serde(rename = "zero")]
    #[strum(to_string = "zero", serialize = "none")]
    Zero,
    #[serde(rename = "iniciante")]
    #[strum(to_string = "iniciante", serialize = "beginner")]
    Beginner,
    #[serde(rename = "intermediario")]
    #[strum(to_string = "intermediario", serialize = "intermediate")]
    Intermediate,
}

/// Request to generate a new guide.
///
/// Forwarded verbatim to the backend, which owns all validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideRequest {
    pub title: String,
    pub topic: String,
    pub knowledge: KnowledgeLevel,
    /// Minutes of study per day
    pub focus_time: u32,
    pub days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_request_serializes_wire_values() {
        let request = GuideRequest {
            title: "Rust in 7 days".to_string(),
            topic: "Ownership and borrowing".to_string(),
            knowledge: KnowledgeLevel::Beginner,
            focus_time: 45,
            days: 7,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["knowledge"], "iniciante");
        assert_eq!(value["focus_time"], 45);
        assert_eq!(value["days"], 7);
    }

    #[test]
    fn test_knowledge_level_accepts_english_aliases() {
        assert_eq!(
            KnowledgeLevel::from_str("intermediate").unwrap(),
            KnowledgeLevel::Intermediate
        );
        assert_eq!(
            KnowledgeLevel::from_str("iniciante").unwrap(),
            KnowledgeLevel::Beginner
        );
        assert_eq!(KnowledgeLevel::Zero.to_string(), "zero");
    }
}
