//! Tag and description mutations for reported items
//!
//! A reported item carries `Needs Review` plus a `Report <reason>` tag. When
//! description updates are enabled, the description is prefixed with an
//! annotation block ending in [`SEPARATOR`]; the original text always follows
//! the last separator.

use crate::model::{Media, PromptData};

/// Tag added to every reported item
pub const NEEDS_REVIEW_TAG: &str = "Needs Review";

/// Marker that identifies an annotated description
pub const REPORT_MARKER: &str = "Reported for review";

/// Line separating the annotation from the original description
pub const SEPARATOR: &str = "\n=======\n";

/// Tags cleared when an item is marked fixed
pub const KNOWN_REVIEW_TAGS: [&str; 5] = [
    NEEDS_REVIEW_TAG,
    "Report explicit",
    "Report incorrectMetadata",
    "Report mismatched",
    "Report audioIssue",
];

/// Tag label for a report reason
pub fn report_tag(reason: &str) -> String {
    format!("Report {}", reason)
}

/// Tags a report adds, in order
pub fn report_tags(prompt: &PromptData) -> Vec<String> {
    vec![
        NEEDS_REVIEW_TAG.to_string(),
        report_tag(prompt.reason_label()),
    ]
}

/// Append each tag not already present. Returns whether any tag was added.
pub fn add_tags(media: &mut Media, tags: &[String]) -> bool {
    let current = media.tags.get_or_insert_with(Vec::new);
    let mut changed = false;
    for tag in tags {
        if !current.contains(tag) {
            current.push(tag.clone());
            changed = true;
        }
    }
    changed
}

/// Drop every occurrence of each tag. Returns whether any tag was removed.
pub fn remove_tags(media: &mut Media, tags: &[&str]) -> bool {
    let current = media.tags.get_or_insert_with(Vec::new);
    let before = current.len();
    current.retain(|t| !tags.contains(&t.as_str()));
    current.len() != before
}

/// Whether the description carries a report annotation
pub fn is_annotated(media: &Media) -> bool {
    media
        .description
        .as_deref()
        .is_some_and(|d| d.contains(REPORT_MARKER))
}

/// Prefix the description with a report annotation unless one is present.
/// Returns whether the description changed.
pub fn annotate_description(media: &mut Media, username: &str, prompt: &PromptData) -> bool {
    if is_annotated(media) {
        return false;
    }

    let original = media.description.as_deref().unwrap_or("");
    media.description = Some(format!(
        "{} by \"{}\" with reason \"{}\" and comments \"{}\"{}{}",
        REPORT_MARKER,
        username,
        prompt.reason_label(),
        prompt.comments_label(),
        SEPARATOR,
        original
    ));
    true
}

/// Restore the text after the last separator of an annotated description.
/// Returns whether the description changed.
pub fn strip_annotation(media: &mut Media) -> bool {
    if !is_annotated(media) {
        return false;
    }

    if let Some(description) = media.description.as_mut() {
        let original = description
            .rsplit(SEPARATOR)
            .next()
            .unwrap_or_default()
            .to_string();
        *description = original;
    }
    true
}
