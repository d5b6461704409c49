//! Library, user and action payload types
//!
//! Wire names follow the host's camelCase JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of media a library item holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Book,
    Podcast,
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Book => "book",
            MediaType::Podcast => "podcast",
            MediaType::Other(s) => s,
        }
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "book" => MediaType::Book,
            "podcast" => MediaType::Podcast,
            _ => MediaType::Other(value),
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media record attached to a library item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub title: String,

    /// Ordered tags; absent until first written
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub description: Option<String>,
}

impl Media {
    /// Tags as a slice, empty when none were ever set
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// A catalogued library entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub id: String,
    pub media_type: MediaType,
    pub media: Media,
}

/// A host user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// Why an item was reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportReason {
    Explicit,
    IncorrectMetadata,
    Mismatched,
    AudioIssue,
    Other(String),
}

impl ReportReason {
    /// Reasons offered by the report prompt
    pub const KNOWN: [ReportReason; 4] = [
        ReportReason::Explicit,
        ReportReason::IncorrectMetadata,
        ReportReason::Mismatched,
        ReportReason::AudioIssue,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ReportReason::Explicit => "explicit",
            ReportReason::IncorrectMetadata => "incorrectMetadata",
            ReportReason::Mismatched => "mismatched",
            ReportReason::AudioIssue => "audioIssue",
            ReportReason::Other(s) => s,
        }
    }
}

impl From<String> for ReportReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "explicit" => ReportReason::Explicit,
            "incorrectMetadata" => ReportReason::IncorrectMetadata,
            "mismatched" => ReportReason::Mismatched,
            "audioIssue" => ReportReason::AudioIssue,
            _ => ReportReason::Other(value),
        }
    }
}

impl From<ReportReason> for String {
    fn from(value: ReportReason) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers from the report prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptData {
    #[serde(default)]
    pub reason: Option<ReportReason>,

    #[serde(default)]
    pub comments: Option<String>,
}

impl PromptData {
    /// Reason as shown in tags and annotations
    pub fn reason_label(&self) -> &str {
        self.reason.as_ref().map_or("unspecified", ReportReason::as_str)
    }

    /// Comments, empty when none were given
    pub fn comments_label(&self) -> &str {
        self.comments.as_deref().unwrap_or("")
    }
}

/// Payload the host passes with an action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    pub entity_id: String,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub prompt_data: Option<PromptData>,
}

/// Body POSTed to the configured webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    pub user: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReportReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_data_wire_names() {
        let data: ActionData = serde_json::from_value(json!({
            "entityId": "li_1",
            "userId": "u_1",
            "promptData": { "reason": "audioIssue", "comments": "skips at 3:10" }
        }))
        .unwrap();

        assert_eq!(data.entity_id, "li_1");
        assert_eq!(data.user_id.as_deref(), Some("u_1"));
        let prompt = data.prompt_data.unwrap();
        assert_eq!(prompt.reason, Some(ReportReason::AudioIssue));
        assert_eq!(prompt.comments_label(), "skips at 3:10");
    }

    #[test]
    fn test_unknown_reason_preserved() {
        let reason: ReportReason = serde_json::from_value(json!("wrongCover")).unwrap();
        assert_eq!(reason, ReportReason::Other("wrongCover".to_string()));
        assert_eq!(serde_json::to_value(&reason).unwrap(), json!("wrongCover"));
    }

    #[test]
    fn test_prompt_labels_default() {
        let prompt = PromptData::default();
        assert_eq!(prompt.reason_label(), "unspecified");
        assert_eq!(prompt.comments_label(), "");
    }

    #[test]
    fn test_media_without_tags() {
        let item: LibraryItem = serde_json::from_value(json!({
            "id": "li_1",
            "mediaType": "book",
            "media": { "title": "Dune", "tags": null }
        }))
        .unwrap();

        assert_eq!(item.media_type, MediaType::Book);
        assert!(item.media.tags().is_empty());
        assert!(item.media.description.is_none());
    }

    #[test]
    fn test_report_request_omits_missing_fields() {
        let request = ReportRequest {
            user: "alice".to_string(),
            title: "Dune".to_string(),
            reason: Some(ReportReason::Explicit),
            comments: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "user": "alice", "title": "Dune", "reason": "explicit" })
        );
    }
}
