//! Flat index documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::model::{ContentType, Group, GroupCounts, Label};

/// The content-specific label field of a record
///
/// Serialized flattened into the record, so a concept record carries
/// `"contenttype": "concept", "conceptlabel": ...` and never a
/// `predicatelabel` key, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "contenttype", rename_all = "lowercase")]
pub enum RecordLabel {
    /// Concept record
    Concept {
        /// Canonical concept label, used by concept autosuggest
        conceptlabel: String,
    },
    /// Predicate record
    Predicate {
        /// Canonical predicate label, used by predicate autosuggest
        predicatelabel: String,
    },
}

impl RecordLabel {
    /// Build the label field for `content_type`
    pub fn new(content_type: ContentType, label: impl Into<String>) -> Self {
        match content_type {
            ContentType::Concept => Self::Concept {
                conceptlabel: label.into(),
            },
            ContentType::Predicate => Self::Predicate {
                predicatelabel: label.into(),
            },
        }
    }

    /// Content type this label belongs to
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Concept { .. } => ContentType::Concept,
            Self::Predicate { .. } => ContentType::Predicate,
        }
    }

    /// The label text, whichever side it is on
    pub fn text(&self) -> &str {
        match self {
            Self::Concept { conceptlabel } => conceptlabel,
            Self::Predicate { predicatelabel } => predicatelabel,
        }
    }
}

/// Group-level aggregates copied onto every record of the group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Preferred display label of the group
    pub preflabel: String,
    /// Occurrences of the preferred label
    pub prefcount: u64,
    /// Occurrences across the whole group
    pub total: u64,
}

impl GroupSummary {
    /// Summary of `group` from its validated counts
    pub fn new(group: &Group, counts: GroupCounts) -> Self {
        Self {
            preflabel: group.preflabel.clone(),
            prefcount: counts.prefcount,
            total: counts.total,
        }
    }
}

/// One backend-indexable document, derived from a single label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// `key_docid_sentenceid`; the upsert key in the backend
    pub id: String,
    /// Key of the owning group
    pub key: String,
    /// Surface text of the mention
    pub idiom: String,
    /// Canonical label of the mention
    pub label: String,
    /// Token length
    pub length: usize,
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
    /// Source document identifier
    #[serde(rename = "docid")]
    pub doc_id: String,
    /// Sentence identifier as stored in the index
    #[serde(rename = "sentenceid")]
    pub sentence_id: String,
    /// Raw sentence number, when the sentence id is a composite snippet id
    #[serde(rename = "sentencenum_s", default, skip_serializing_if = "Option::is_none")]
    pub sentence_num: Option<String>,
    /// Mention is a grammatical object
    #[serde(rename = "objectof")]
    pub object_of: bool,
    /// Mention is a grammatical subject
    #[serde(rename = "subjectof")]
    pub subject_of: bool,
    /// Batch timestamp shared by every record built in one pass
    #[serde(rename = "createtime")]
    pub created_at: DateTime<Utc>,
    /// Denormalized group aggregates; absent on legacy label-only records
    #[serde(flatten)]
    pub group: Option<GroupSummary>,
    /// `contenttype` plus the matching `conceptlabel` / `predicatelabel`
    #[serde(flatten)]
    pub content: RecordLabel,
}

impl Record {
    /// Build the record for one label of a group
    ///
    /// Fails with [`RecordError::MissingField`] if the group or the label
    /// lacks an attribute the record needs.
    pub fn from_group_label(
        group: &Group,
        label: &Label,
        content_type: ContentType,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RecordError> {
        let counts = group.validate()?;
        let mention = label.validate(&group.key)?;
        let snippet_id = label.snippet_id();

        Ok(Self {
            id: record_id(&group.key, &label.doc_id, &label.sentence_id),
            key: group.key.clone(),
            idiom: label.idiom.clone(),
            label: label.label.clone(),
            length: mention.length,
            start: mention.start,
            end: mention.end,
            doc_id: label.doc_id.clone(),
            sentence_id: snippet_id,
            sentence_num: Some(label.sentence_id.clone()),
            object_of: mention.object_of,
            subject_of: mention.subject_of,
            created_at,
            group: Some(GroupSummary::new(group, counts)),
            content: RecordLabel::new(content_type, label.label.clone()),
        })
    }

    /// Content type of this record
    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    /// The concept label, if this is a concept record
    pub fn concept_label(&self) -> Option<&str> {
        match &self.content {
            RecordLabel::Concept { conceptlabel } => Some(conceptlabel),
            RecordLabel::Predicate { .. } => None,
        }
    }

    /// The predicate label, if this is a predicate record
    pub fn predicate_label(&self) -> Option<&str> {
        match &self.content {
            RecordLabel::Predicate { predicatelabel } => Some(predicatelabel),
            RecordLabel::Concept { .. } => None,
        }
    }
}

/// Deterministic record id: `key_docid_sentenceid`
///
/// The parts are joined with `_` and not escaped, so ids are only unique
/// when keys and document ids contain no `_` themselves: key `a_b` with
/// docid `c` and key `a` with docid `b_c` both give `a_b_c_...`. The
/// format is what existing collections are keyed on and is kept as is.
pub fn record_id(key: &str, doc_id: &str, sentence_id: &str) -> String {
    format!("{key}_{doc_id}_{sentence_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn cat_group() -> Group {
        Group {
            key: "k1".into(),
            preflabel: "Cat".into(),
            prefcount: Some(3),
            total: Some(3),
            labels: Some(vec![Label {
                idiom: "cats".into(),
                label: "cat".into(),
                length: Some(1),
                start: Some(0),
                end: Some(4),
                doc_id: "d1".into(),
                sentence_id: "s1".into(),
                subject_of: Some(true),
                object_of: Some(false),
            }]),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn concept_record_serializes_flat() {
        let group = cat_group();
        let record =
            Record::from_group_label(&group, &group.labels()[0], ContentType::Concept, fixed_time())
                .unwrap();

        let doc = serde_json::to_value(&record).unwrap();
        assert_eq!(
            doc,
            json!({
                "id": "k1_d1_s1",
                "key": "k1",
                "idiom": "cats",
                "label": "cat",
                "length": 1,
                "start": 0,
                "end": 4,
                "docid": "d1",
                "sentenceid": "d1_s1",
                "sentencenum_s": "s1",
                "objectof": false,
                "subjectof": true,
                "createtime": "2024-05-01T12:00:00Z",
                "preflabel": "Cat",
                "prefcount": 3,
                "total": 3,
                "contenttype": "concept",
                "conceptlabel": "cat"
            })
        );
    }

    #[test]
    fn predicate_record_has_no_concept_label() {
        let group = cat_group();
        let record = Record::from_group_label(
            &group,
            &group.labels()[0],
            ContentType::Predicate,
            fixed_time(),
        )
        .unwrap();

        let doc = serde_json::to_value(&record).unwrap();
        assert_eq!(doc["contenttype"], "predicate");
        assert_eq!(doc["predicatelabel"], "cat");
        assert!(doc.get("conceptlabel").is_none());
        assert_eq!(record.predicate_label(), Some("cat"));
        assert_eq!(record.concept_label(), None);
    }

    #[test]
    fn record_documents_deserialize_back() {
        let group = cat_group();
        let record =
            Record::from_group_label(&group, &group.labels()[0], ContentType::Concept, fixed_time())
                .unwrap();

        let text = serde_json::to_string(&record).unwrap();
        let parsed: Record = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn missing_group_count_is_not_defaulted() {
        let mut group = cat_group();
        group.prefcount = None;

        let err = Record::from_group_label(
            &group,
            &group.labels()[0],
            ContentType::Concept,
            fixed_time(),
        )
        .unwrap_err();
        assert_eq!(err, RecordError::missing_field("group", "prefcount", "k1"));
    }

    #[test]
    fn missing_role_flag_is_not_defaulted() {
        let mut group = cat_group();
        if let Some(labels) = group.labels.as_mut() {
            labels[0].subject_of = None;
        }

        let err = Record::from_group_label(
            &group,
            &group.labels()[0],
            ContentType::Concept,
            fixed_time(),
        )
        .unwrap_err();
        assert_eq!(err, RecordError::missing_field("label", "subjectOf", "k1"));
    }

    #[test]
    fn underscores_in_parts_can_collide() {
        assert_eq!(record_id("a_b", "c", "1"), record_id("a", "b_c", "1"));
        assert_ne!(record_id("a", "b", "1"), record_id("a", "b", "2"));
    }
}
