//! Extraction model: labels, groups and content types
//!
//! These are the read-only inputs produced by the upstream extraction step.
//! Identifier fields accept either strings or integers when deserialized,
//! since extraction output numbers documents and sentences freely.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// Which side of the graph a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Noun-phrase concepts
    Concept,
    /// Verb predicates
    Predicate,
}

impl ContentType {
    /// Lowercase name used in index documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Predicate => "predicate",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concept" => Ok(Self::Concept),
            "predicate" => Ok(Self::Predicate),
            _ => Err(RecordError::UnknownContentType(s.to_string())),
        }
    }
}

/// One mention of a concept or predicate in a sentence
///
/// Fields are kept as they arrived from extraction. Absent text fields read
/// as empty strings and absent numbers or flags as `None`; [`Label::validate`]
/// reports either as missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Surface text as it appeared
    #[serde(default)]
    pub idiom: String,
    /// Canonical (lemmatized) form
    #[serde(default)]
    pub label: String,
    /// Token length of the mention
    pub length: Option<usize>,
    /// Start offset within the sentence
    pub start: Option<usize>,
    /// End offset within the sentence
    pub end: Option<usize>,
    /// Source document identifier
    #[serde(rename = "docid", default, deserialize_with = "identifier")]
    pub doc_id: String,
    /// Sentence identifier within the document
    #[serde(rename = "sentenceid", default, deserialize_with = "identifier")]
    pub sentence_id: String,
    /// Mention is the grammatical subject of its sentence
    #[serde(rename = "subjectOf")]
    pub subject_of: Option<bool>,
    /// Mention is the grammatical object of its sentence
    #[serde(rename = "objectOf")]
    pub object_of: Option<bool>,
}

/// Span and grammatical role of a label that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mention {
    /// Token length
    pub length: usize,
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
    /// Grammatical subject
    pub subject_of: bool,
    /// Grammatical object
    pub object_of: bool,
}

impl Label {
    /// Check that every attribute needed to build a record is present
    ///
    /// Fields are checked in document order and the first missing one is
    /// reported. `group_key` is only used to give the error some context.
    pub fn validate(&self, group_key: &str) -> Result<Mention, RecordError> {
        const ENTITY: &str = "label";

        required_text(&self.idiom, ENTITY, "idiom", group_key)?;
        required_text(&self.label, ENTITY, "label", group_key)?;
        let length = required(self.length, ENTITY, "length", group_key)?;
        let start = required(self.start, ENTITY, "start", group_key)?;
        let end = required(self.end, ENTITY, "end", group_key)?;
        required_text(&self.doc_id, ENTITY, "docid", group_key)?;
        required_text(&self.sentence_id, ENTITY, "sentenceid", group_key)?;

        Ok(Mention {
            length,
            start,
            end,
            subject_of: required(self.subject_of, ENTITY, "subjectOf", group_key)?,
            object_of: required(self.object_of, ENTITY, "objectOf", group_key)?,
        })
    }

    /// Composite identifier of the sentence this mention occurs in
    pub fn snippet_id(&self) -> String {
        format!("{}_{}", self.doc_id, self.sentence_id)
    }
}

/// A cluster of mentions sharing one canonical key
///
/// As with [`Label`], absent counts and an absent `labels` key are kept as
/// `None` and rejected by [`Group::validate`]. An empty `labels` list is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Canonical key, unique per cluster
    #[serde(default)]
    pub key: String,
    /// Preferred display label
    #[serde(default)]
    pub preflabel: String,
    /// Occurrences of the preferred label
    pub prefcount: Option<u64>,
    /// Occurrences across all labels in the group
    pub total: Option<u64>,
    /// Member mentions, in extraction order
    pub labels: Option<Vec<Label>>,
}

/// Aggregate counts of a group that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupCounts {
    /// Occurrences of the preferred label
    pub prefcount: u64,
    /// Occurrences across all labels in the group
    pub total: u64,
}

impl Group {
    /// Check the group-level attributes needed to build records
    pub fn validate(&self) -> Result<GroupCounts, RecordError> {
        const ENTITY: &str = "group";

        required_text(&self.key, ENTITY, "key", &self.preflabel)?;
        required_text(&self.preflabel, ENTITY, "preflabel", &self.key)?;
        let prefcount = required(self.prefcount, ENTITY, "prefcount", &self.key)?;
        let total = required(self.total, ENTITY, "total", &self.key)?;
        required(self.labels.as_ref(), ENTITY, "labels", &self.key)?;

        Ok(GroupCounts { prefcount, total })
    }

    /// Member mentions; empty when the `labels` key was absent
    pub fn labels(&self) -> &[Label] {
        self.labels.as_deref().unwrap_or_default()
    }
}

fn required<T>(
    value: Option<T>,
    entity: &'static str,
    field: &'static str,
    key: &str,
) -> Result<T, RecordError> {
    value.ok_or_else(|| RecordError::missing_field(entity, field, key))
}

fn required_text(
    value: &str,
    entity: &'static str,
    field: &'static str,
    key: &str,
) -> Result<(), RecordError> {
    if value.is_empty() {
        return Err(RecordError::missing_field(entity, field, key));
    }
    Ok(())
}

/// Output of one extraction run: concept and predicate groups side by side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphBundle {
    /// Concept clusters
    #[serde(rename = "conceptgroups", alias = "concept_groups", default)]
    pub concept_groups: Vec<Group>,
    /// Predicate clusters
    #[serde(rename = "predicategroups", alias = "predicate_groups", default)]
    pub predicate_groups: Vec<Group>,
}

impl GraphBundle {
    /// Parse a bundle from extraction JSON
    pub fn from_json_str(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Total number of labels across both sides
    pub fn label_count(&self) -> usize {
        self.concept_groups
            .iter()
            .chain(&self.predicate_groups)
            .map(|group| group.labels().len())
            .sum()
    }
}

fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Signed(n) => n.to_string(),
        Raw::Unsigned(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn label(doc_id: &str, sentence_id: &str) -> Label {
        Label {
            idiom: "cats".into(),
            label: "cat".into(),
            length: Some(1),
            start: Some(0),
            end: Some(4),
            doc_id: doc_id.into(),
            sentence_id: sentence_id.into(),
            subject_of: Some(true),
            object_of: Some(false),
        }
    }

    #[test_case("concept", ContentType::Concept)]
    #[test_case("Predicate", ContentType::Predicate)]
    #[test_case(" CONCEPT ", ContentType::Concept)]
    fn content_type_parses_case_insensitively(raw: &str, expected: ContentType) {
        assert_eq!(raw.parse::<ContentType>().unwrap(), expected);
    }

    #[test]
    fn unknown_content_type_is_a_caller_error() {
        let err = "relation".parse::<ContentType>().unwrap_err();
        assert!(matches!(err, RecordError::UnknownContentType(ref s) if s == "relation"));
    }

    #[test]
    fn snippet_id_joins_doc_and_sentence() {
        assert_eq!(label("d1", "s1").snippet_id(), "d1_s1");
    }

    #[test]
    fn label_validation_names_first_missing_field() {
        let mut mention = label("d1", "s1");
        mention.sentence_id.clear();

        let err = mention.validate("k1").unwrap_err();
        assert_eq!(
            err,
            RecordError::missing_field("label", "sentenceid", "k1")
        );
    }

    #[test]
    fn deserializes_numeric_identifiers() {
        let mention: Label = serde_json::from_str(
            r#"{"idiom": "cats", "label": "cat", "length": 1, "start": 0, "end": 4,
                "docid": 42, "sentenceid": 7, "subjectOf": true, "objectOf": false}"#,
        )
        .unwrap();

        assert_eq!(mention.doc_id, "42");
        assert_eq!(mention.sentence_id, "7");
        assert_eq!(mention.subject_of, Some(true));
    }

    #[test]
    fn validated_label_exposes_span_and_role() {
        let mention = label("d1", "s1").validate("k1").unwrap();
        assert_eq!(
            mention,
            Mention {
                length: 1,
                start: 0,
                end: 4,
                subject_of: true,
                object_of: false,
            }
        );
    }

    const FULL_LABEL: &str = r#"{"idiom": "cats", "label": "cat", "length": 1, "start": 0, "end": 4,
        "docid": "d1", "sentenceid": "s1", "subjectOf": true, "objectOf": false}"#;

    #[test_case("docid" ; "identifier")]
    #[test_case("start" ; "span offset")]
    #[test_case("length" ; "token length")]
    #[test_case("subjectOf" ; "subject flag")]
    #[test_case("objectOf" ; "object flag")]
    fn absent_label_attribute_fails_validation(field: &'static str) {
        let mut raw: serde_json::Value = serde_json::from_str(FULL_LABEL).unwrap();
        raw.as_object_mut().unwrap().remove(field);
        let mention: Label = serde_json::from_value(raw).unwrap();

        assert_eq!(
            mention.validate("k1"),
            Err(RecordError::missing_field("label", field, "k1"))
        );
    }

    #[test]
    fn null_offset_counts_as_missing() {
        let mut raw: serde_json::Value = serde_json::from_str(FULL_LABEL).unwrap();
        raw["end"] = serde_json::Value::Null;
        let mention: Label = serde_json::from_value(raw).unwrap();

        assert_eq!(
            mention.validate("k1"),
            Err(RecordError::missing_field("label", "end", "k1"))
        );
    }

    #[test_case(r#"{"key": "k1", "preflabel": "Cat", "total": 3, "labels": []}"#, "prefcount" ; "prefcount")]
    #[test_case(r#"{"key": "k1", "preflabel": "Cat", "prefcount": 3, "labels": []}"#, "total" ; "total")]
    #[test_case(r#"{"key": "k1", "preflabel": "Cat", "prefcount": 3, "total": 3}"#, "labels" ; "labels")]
    fn absent_group_attribute_fails_validation(json: &str, field: &'static str) {
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(
            group.validate(),
            Err(RecordError::missing_field("group", field, "k1"))
        );
    }

    #[test]
    fn empty_label_list_is_valid() {
        let group: Group = serde_json::from_str(
            r#"{"key": "k1", "preflabel": "Cat", "prefcount": 0, "total": 0, "labels": []}"#,
        )
        .unwrap();

        assert_eq!(group.validate(), Ok(GroupCounts { prefcount: 0, total: 0 }));
        assert!(group.labels().is_empty());
    }

    #[test]
    fn bundle_parses_extraction_output() {
        let bundle = GraphBundle::from_json_str(
            r#"{
                "conceptgroups": [{"key": "k1", "preflabel": "Cat", "prefcount": 3, "total": 3,
                    "labels": [{"idiom": "cats", "label": "cat", "length": 1, "start": 0, "end": 4,
                                "docid": "d1", "sentenceid": "s1", "subjectOf": true, "objectOf": false}]}],
                "predicategroups": []
            }"#,
        )
        .unwrap();

        assert_eq!(bundle.concept_groups.len(), 1);
        assert!(bundle.predicate_groups.is_empty());
        assert_eq!(bundle.label_count(), 1);
    }
}
