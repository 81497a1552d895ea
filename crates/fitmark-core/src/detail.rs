//! Resolved detail payloads for mentioned entities.
//!
//! A resolver turns `(entity_type, entity_id)` into one of these. Each
//! variant has a closed field set so drawers can render them without
//! probing an open map of keys.

use crate::models::{EntityReference, EntityType};
use serde::{Deserialize, Serialize};

/// Detail payload for an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub primary_muscles: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub video_ids: Vec<String>,
}

/// Detail payload for an anatomy part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnatomyDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub related_exercises: Vec<EntityReference>,
}

/// Detail payload for a guide. `body` is fitmark document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideDetail {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub body: String,
}

/// Detail payload for a section of a guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDetail {
    pub id: String,
    pub guide_id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Resolved detail for a mention, tagged by entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entityType", rename_all = "lowercase")]
pub enum MentionDetail {
    Exercise(ExerciseDetail),
    Anatomy(AnatomyDetail),
    Guide(GuideDetail),
    Section(SectionDetail),
}

impl MentionDetail {
    /// Entity type this payload describes
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Exercise(_) => EntityType::Exercise,
            Self::Anatomy(_) => EntityType::Anatomy,
            Self::Guide(_) => EntityType::Guide,
            Self::Section(_) => EntityType::Section,
        }
    }

    /// Id of the described entity
    pub fn entity_id(&self) -> &str {
        match self {
            Self::Exercise(d) => &d.id,
            Self::Anatomy(d) => &d.id,
            Self::Guide(d) => &d.id,
            Self::Section(d) => &d.id,
        }
    }

    /// Current title of the entity (may differ from a mention's snapshot name)
    pub fn title(&self) -> &str {
        match self {
            Self::Exercise(d) => &d.name,
            Self::Anatomy(d) => &d.name,
            Self::Guide(d) => &d.title,
            Self::Section(d) => &d.title,
        }
    }

    /// Whether this payload answers a request for `(entity_type, entity_id)`
    pub fn matches(&self, entity_type: &EntityType, entity_id: &str) -> bool {
        &self.entity_type() == entity_type && self.entity_id() == entity_id
    }
}

/// Outcome of a resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum Resolution {
    Found(MentionDetail),
    NotFound,
}

impl Resolution {
    pub fn detail(&self) -> Option<&MentionDetail> {
        match self {
            Self::Found(detail) => Some(detail),
            Self::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_tagged_by_entity_type() {
        let detail = MentionDetail::Exercise(ExerciseDetail {
            id: "ex_123".to_string(),
            name: "Bicep Curl".to_string(),
            description: None,
            primary_muscles: vec!["biceps_brachii".to_string()],
            equipment: vec![],
            video_ids: vec!["v1".to_string()],
        });

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["entityType"], "exercise");
        assert_eq!(json["primaryMuscles"][0], "biceps_brachii");

        let back: MentionDetail = serde_json::from_value(json).unwrap();
        assert_eq!(back, detail);
        assert!(back.matches(&EntityType::Exercise, "ex_123"));
        assert!(!back.matches(&EntityType::Anatomy, "ex_123"));
    }

    #[test]
    fn test_detail_rejects_unknown_type() {
        let json = serde_json::json!({ "entityType": "workout", "id": "w1" });
        assert!(serde_json::from_value::<MentionDetail>(json).is_err());
    }

    #[test]
    fn test_section_defaults() {
        let json = serde_json::json!({
            "entityType": "section",
            "id": "s1",
            "guideId": "g1",
            "title": "Warmup",
        });
        let detail: MentionDetail = serde_json::from_value(json).unwrap();
        assert_eq!(detail.title(), "Warmup");
        assert_eq!(detail.entity_type(), EntityType::Section);
        if let MentionDetail::Section(section) = detail {
            assert!(section.body.is_empty());
        } else {
            panic!("Expected Section detail");
        }
    }

    #[test]
    fn test_resolution_accessors() {
        assert!(Resolution::NotFound.detail().is_none());
    }
}
