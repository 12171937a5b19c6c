//! Record generation
//!
//! Turns extraction groups into a lazy stream of flat [`Record`]s, the way a
//! bulk indexer consumes documents: one pass, nothing materialized up front.
//!
//! ```rust
//! use skipgraph_core::model::{ContentType, Group, Label};
//! use skipgraph_core::records::build_records;
//!
//! let groups = vec![Group {
//!     key: "k1".into(),
//!     preflabel: "Cat".into(),
//!     prefcount: Some(3),
//!     total: Some(3),
//!     labels: Some(vec![Label {
//!         idiom: "cats".into(),
//!         label: "cat".into(),
//!         length: Some(1),
//!         start: Some(0),
//!         end: Some(4),
//!         doc_id: "d1".into(),
//!         sentence_id: "s1".into(),
//!         subject_of: Some(true),
//!         object_of: Some(false),
//!     }]),
//! }];
//!
//! let records: Vec<_> = build_records(&groups, ContentType::Concept)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(records[0].id, "k1_d1_s1");
//! assert_eq!(records[0].concept_label(), Some("cat"));
//! ```

pub mod legacy;
mod record;

pub use record::{record_id, GroupSummary, Record, RecordLabel};

use chrono::{DateTime, Utc};
use std::iter::FusedIterator;
use std::slice;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::RecordError;
use crate::model::{ContentType, Group, Label};

static LAST_BATCH_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Timestamp for a new generation batch
///
/// Never earlier than any timestamp previously handed out in this process,
/// even if the wall clock steps backwards.
pub fn batch_timestamp() -> DateTime<Utc> {
    let now = Utc::now().timestamp_micros();
    let micros = LAST_BATCH_MICROS.fetch_max(now, Ordering::SeqCst).max(now);
    DateTime::from_timestamp_micros(micros).unwrap_or_else(Utc::now)
}

/// Build records for every label of every group, in order
///
/// The returned stream is lazy and finite. To regenerate, call this again.
pub fn build_records(groups: &[Group], content_type: ContentType) -> RecordStream<'_> {
    RecordStream::new(groups, content_type)
}

/// Lazy record stream over a slice of groups
///
/// Yields `Err` once if a group or label fails validation and then ends.
/// Records yielded before the error stay valid; whether to keep a partial
/// batch is up to the caller.
#[derive(Debug, Clone)]
pub struct RecordStream<'a> {
    groups: slice::Iter<'a, Group>,
    current: Option<(&'a Group, slice::Iter<'a, Label>)>,
    content_type: ContentType,
    created_at: DateTime<Utc>,
    failed: bool,
}

impl<'a> RecordStream<'a> {
    fn new(groups: &'a [Group], content_type: ContentType) -> Self {
        Self {
            groups: groups.iter(),
            current: None,
            content_type,
            created_at: batch_timestamp(),
            failed: false,
        }
    }

    /// Timestamp stamped on every record of this batch
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Content type of the records in this batch
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    fn fail(&mut self, err: RecordError) -> Option<Result<Record, RecordError>> {
        self.failed = true;
        self.current = None;
        Some(Err(err))
    }
}

impl Iterator for RecordStream<'_> {
    type Item = Result<Record, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            if let Some((group, labels)) = &mut self.current {
                if let Some(label) = labels.next() {
                    let group = *group;
                    return match Record::from_group_label(
                        group,
                        label,
                        self.content_type,
                        self.created_at,
                    ) {
                        Ok(record) => Some(Ok(record)),
                        Err(err) => self.fail(err),
                    };
                }
            }

            let group = self.groups.next()?;
            if let Err(err) = group.validate() {
                return self.fail(err);
            }
            self.current = Some((group, group.labels().iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let in_group = self
            .current
            .as_ref()
            .map_or(0, |(_, labels)| labels.len());
        let remaining: usize = self.groups.clone().map(|g| g.labels().len()).sum();
        (0, Some(in_group + remaining))
    }
}

impl FusedIterator for RecordStream<'_> {}
