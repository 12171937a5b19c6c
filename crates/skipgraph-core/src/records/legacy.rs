//! Label-only record generation
//!
//! Older extraction output was a flat `key -> labels` mapping with no group
//! wrapper. Records built here carry no group aggregates (`group` is always
//! `None`), and `sentenceid` holds the raw sentence id rather than the
//! composite snippet id. [`crate::GraphQuery::index`] does not use this path.

use chrono::{DateTime, Utc};
use std::iter::FusedIterator;

use super::record::{record_id, Record, RecordLabel};
use super::batch_timestamp;
use crate::error::RecordError;
use crate::model::{ContentType, Label};

/// Build records from a `key -> labels` mapping
///
/// Keys are visited in the mapping's iteration order; pass an ordered map
/// when the output order matters.
pub fn build_label_records<'a, I>(labels: I, content_type: ContentType) -> LabelRecordStream<'a>
where
    I: IntoIterator<Item = (&'a String, &'a Vec<Label>)>,
    I::IntoIter: 'a,
{
    let mentions = labels
        .into_iter()
        .flat_map(|(key, labels)| labels.iter().map(move |label| (key.as_str(), label)));

    LabelRecordStream {
        mentions: Box::new(mentions),
        content_type,
        created_at: batch_timestamp(),
        failed: false,
    }
}

/// Lazy record stream over a flat label mapping
pub struct LabelRecordStream<'a> {
    mentions: Box<dyn Iterator<Item = (&'a str, &'a Label)> + 'a>,
    content_type: ContentType,
    created_at: DateTime<Utc>,
    failed: bool,
}

impl LabelRecordStream<'_> {
    /// Timestamp stamped on every record of this batch
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl std::fmt::Debug for LabelRecordStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelRecordStream")
            .field("content_type", &self.content_type)
            .field("created_at", &self.created_at)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl Iterator for LabelRecordStream<'_> {
    type Item = Result<Record, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let (key, label) = self.mentions.next()?;
        let checked = if key.is_empty() {
            Err(RecordError::missing_field("label", "key", key))
        } else {
            label.validate(key)
        };
        let mention = match checked {
            Ok(mention) => mention,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };

        Some(Ok(Record {
            id: record_id(key, &label.doc_id, &label.sentence_id),
            key: key.to_string(),
            idiom: label.idiom.clone(),
            label: label.label.clone(),
            length: mention.length,
            start: mention.start,
            end: mention.end,
            doc_id: label.doc_id.clone(),
            sentence_id: label.sentence_id.clone(),
            sentence_num: None,
            object_of: mention.object_of,
            subject_of: mention.subject_of,
            created_at: self.created_at,
            group: None,
            content: RecordLabel::new(self.content_type, label.label.clone()),
        }))
    }
}

impl FusedIterator for LabelRecordStream<'_> {}
