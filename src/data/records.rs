//! Feedback records and batch validation.
//!
//! Batches arrive either as CSV exports of the feedback table or as JSON
//! arrays of row objects. Validation happens here, up front, so a malformed
//! batch is rejected before any model is invoked.

use std::{
    collections::{BTreeMap, HashSet},
    fs::File,
    io::Read,
    path::Path,
};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::BatchError;

const COURSE: &str = "course";
const RATING: &str = "rating";
const FEEDBACK_TEXT: &str = "feedback_text";
const DATE_SUBMITTED: &str = "date_submitted";
const REQUIRED_COLUMNS: [&str; 4] = [COURSE, FEEDBACK_TEXT, RATING, DATE_SUBMITTED];
const TOPIC_COLUMNS: [&str; 2] = [COURSE, FEEDBACK_TEXT];

/// One submitted piece of course feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub course: String,
    pub rating: i64,
    /// Free text as submitted; `None` when the source value was missing or not a string.
    pub feedback_text: Option<String>,
    pub date_submitted: NaiveDate,
}

impl FeedbackRecord {
    pub fn new(
        course: impl Into<String>,
        rating: i64,
        feedback_text: impl Into<String>,
        date_submitted: NaiveDate,
    ) -> Self {
        Self {
            course: course.into(),
            rating,
            feedback_text: Some(feedback_text.into()),
            date_submitted,
        }
    }

    /// Month bucket in `YYYY-MM` form.
    pub fn month(&self) -> String {
        self.date_submitted.format("%Y-%m").to_string()
    }

    pub fn text(&self) -> Option<&str> {
        self.feedback_text.as_deref()
    }
}

/// A validated batch of feedback records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackBatch {
    records: Vec<FeedbackRecord>,
}

/// A batch read from disk along with any request parameters stored beside it.
#[derive(Debug, Clone)]
pub struct BatchFile {
    pub batch: FeedbackBatch,
    pub min_feedback_count: Option<usize>,
}

impl FeedbackBatch {
    pub fn new(records: Vec<FeedbackRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Group records by course, preserving submission order within a course.
    pub fn by_course(&self) -> BTreeMap<&str, Vec<&FeedbackRecord>> {
        let mut grouped: BTreeMap<&str, Vec<&FeedbackRecord>> = BTreeMap::new();
        for record in &self.records {
            grouped.entry(record.course.as_str()).or_default().push(record);
        }
        grouped
    }

    /// Validate a JSON array of row objects.
    pub fn from_json_rows(rows: &[Value]) -> Result<Self, BatchError> {
        let objects = row_objects(rows)?;
        require_columns(&objects, &REQUIRED_COLUMNS)?;
        let records = objects
            .into_iter()
            .enumerate()
            .map(|(idx, obj)| parse_json_row(idx + 1, obj))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Validate a JSON document: either an array of rows or an object holding a
    /// `feedback` array and an optional `min_feedback_count`.
    pub fn from_json_value(value: &Value) -> Result<BatchFile, BatchError> {
        let (rows, min_feedback_count) = split_payload(value)?;
        Ok(BatchFile {
            batch: Self::from_json_rows(rows)?,
            min_feedback_count,
        })
    }

    /// Validate a CSV export with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, BatchError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        let position = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(BatchError::MissingColumn(name))
        };
        let course_idx = position(COURSE)?;
        let text_idx = position(FEEDBACK_TEXT)?;
        let rating_idx = position(RATING)?;
        let date_idx = position(DATE_SUBMITTED)?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            let line = idx + 1;
            let field = |i: usize| row.get(i).unwrap_or("");

            let course = field(course_idx).trim();
            if course.is_empty() {
                return Err(BatchError::InvalidCourse { row: line });
            }
            let text = field(text_idx);
            records.push(FeedbackRecord {
                course: course.to_string(),
                rating: parse_rating_str(field(rating_idx)).ok_or_else(|| {
                    BatchError::InvalidRating {
                        row: line,
                        value: field(rating_idx).to_string(),
                    }
                })?,
                feedback_text: (!text.is_empty()).then(|| text.to_string()),
                date_submitted: parse_date(field(date_idx)).ok_or_else(|| {
                    BatchError::InvalidDate {
                        row: line,
                        value: field(date_idx).to_string(),
                    }
                })?,
            });
        }
        debug!(rows = records.len(), "parsed csv batch");
        Ok(Self { records })
    }

    /// Load a batch from a `.csv` or `.json` file.
    pub fn load(path: &Path) -> Result<BatchFile, BatchError> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        let loaded = match extension.as_deref() {
            Some("csv") => BatchFile {
                batch: Self::from_csv_reader(File::open(path)?)?,
                min_feedback_count: None,
            },
            Some("json") => {
                let value: Value = serde_json::from_reader(File::open(path)?)?;
                Self::from_json_value(&value)?
            }
            other => {
                return Err(BatchError::Malformed(format!(
                    "unsupported input format {other:?}; expected .csv or .json"
                )))
            }
        };
        info!(path = %path.display(), rows = loaded.batch.len(), "loaded feedback batch");
        Ok(loaded)
    }
}

impl From<Vec<FeedbackRecord>> for FeedbackBatch {
    fn from(records: Vec<FeedbackRecord>) -> Self {
        Self::new(records)
    }
}

/// A feedback text and its course; all topic discovery needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDocument {
    pub course: String,
    pub feedback_text: Option<String>,
}

/// Feedback submitted for topic discovery. Unlike [`FeedbackBatch`] it needs
/// no rating or submission date, but it must not be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicBatch {
    documents: Vec<TopicDocument>,
}

/// A topic batch read from disk along with its stored threshold.
#[derive(Debug, Clone)]
pub struct TopicBatchFile {
    pub batch: TopicBatch,
    pub min_feedback_count: Option<usize>,
}

impl TopicBatch {
    pub fn new(documents: Vec<TopicDocument>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[TopicDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Texts grouped by course, in submission order.
    pub fn by_course(&self) -> BTreeMap<&str, Vec<Option<&str>>> {
        let mut grouped: BTreeMap<&str, Vec<Option<&str>>> = BTreeMap::new();
        for doc in &self.documents {
            grouped
                .entry(doc.course.as_str())
                .or_default()
                .push(doc.feedback_text.as_deref());
        }
        grouped
    }

    /// Validate a non-empty JSON array of `{course, feedback_text}` objects.
    pub fn from_json_rows(rows: &[Value]) -> Result<Self, BatchError> {
        if rows.is_empty() {
            return Err(BatchError::EmptyFeedback);
        }
        let objects = row_objects(rows)?;
        require_columns(&objects, &TOPIC_COLUMNS)?;
        let documents = objects
            .into_iter()
            .enumerate()
            .map(|(idx, obj)| {
                Ok(TopicDocument {
                    course: parse_course(idx + 1, obj)?,
                    feedback_text: json_text(obj),
                })
            })
            .collect::<Result<Vec<_>, BatchError>>()?;
        Ok(Self { documents })
    }

    /// Validate a topics request: `{"feedback": [...], "min_feedback_count": n}`
    /// or a bare array of rows.
    pub fn from_json_value(value: &Value) -> Result<TopicBatchFile, BatchError> {
        let (rows, min_feedback_count) = split_payload(value)?;
        Ok(TopicBatchFile {
            batch: Self::from_json_rows(rows)?,
            min_feedback_count,
        })
    }

    /// Validate a CSV export that has at least `course` and `feedback_text`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, BatchError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        let position = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(BatchError::MissingColumn(name))
        };
        let course_idx = position(COURSE)?;
        let text_idx = position(FEEDBACK_TEXT)?;

        let mut documents = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            let course = row.get(course_idx).unwrap_or("").trim();
            if course.is_empty() {
                return Err(BatchError::InvalidCourse { row: idx + 1 });
            }
            let text = row.get(text_idx).unwrap_or("");
            documents.push(TopicDocument {
                course: course.to_string(),
                feedback_text: (!text.is_empty()).then(|| text.to_string()),
            });
        }
        if documents.is_empty() {
            return Err(BatchError::EmptyFeedback);
        }
        Ok(Self { documents })
    }

    /// Load a topics request from a `.csv` or `.json` file.
    pub fn load(path: &Path) -> Result<TopicBatchFile, BatchError> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        let loaded = match extension.as_deref() {
            Some("csv") => TopicBatchFile {
                batch: Self::from_csv_reader(File::open(path)?)?,
                min_feedback_count: None,
            },
            Some("json") => {
                let value: Value = serde_json::from_reader(File::open(path)?)?;
                Self::from_json_value(&value)?
            }
            other => {
                return Err(BatchError::Malformed(format!(
                    "unsupported input format {other:?}; expected .csv or .json"
                )))
            }
        };
        info!(path = %path.display(), rows = loaded.batch.len(), "loaded topics request");
        Ok(loaded)
    }
}

impl From<&FeedbackBatch> for TopicBatch {
    fn from(batch: &FeedbackBatch) -> Self {
        Self::new(
            batch
                .records()
                .iter()
                .map(|r| TopicDocument {
                    course: r.course.clone(),
                    feedback_text: r.feedback_text.clone(),
                })
                .collect(),
        )
    }
}

fn row_objects(rows: &[Value]) -> Result<Vec<&Map<String, Value>>, BatchError> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            row.as_object()
                .ok_or_else(|| BatchError::Malformed(format!("row {} is not an object", idx + 1)))
        })
        .collect()
}

/// Columns count as present when at least one row carries them.
fn require_columns(
    objects: &[&Map<String, Value>],
    columns: &[&'static str],
) -> Result<(), BatchError> {
    if objects.is_empty() {
        return Ok(());
    }
    let present: HashSet<&str> = objects
        .iter()
        .flat_map(|obj| obj.keys().map(String::as_str))
        .collect();
    match columns.iter().find(|c| !present.contains(*c)) {
        Some(missing) => Err(BatchError::MissingColumn(*missing)),
        None => Ok(()),
    }
}

fn split_payload(value: &Value) -> Result<(&[Value], Option<usize>), BatchError> {
    match value {
        Value::Array(rows) => Ok((rows.as_slice(), None)),
        Value::Object(obj) => {
            let rows = obj
                .get("feedback")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    BatchError::Malformed(
                        "expected a 'feedback' key containing a list of objects".into(),
                    )
                })?;
            let min_feedback_count = match obj.get("min_feedback_count") {
                None | Some(Value::Null) => None,
                Some(v) => Some(v.as_u64().map(|n| n as usize).ok_or_else(|| {
                    BatchError::Malformed("min_feedback_count must be a positive integer".into())
                })?),
            };
            Ok((rows.as_slice(), min_feedback_count))
        }
        _ => Err(BatchError::Malformed("expected a JSON array or object".into())),
    }
}

fn parse_course(row: usize, obj: &Map<String, Value>) -> Result<String, BatchError> {
    match obj.get(COURSE) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(BatchError::InvalidCourse { row }),
    }
}

fn json_text(obj: &Map<String, Value>) -> Option<String> {
    obj.get(FEEDBACK_TEXT)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn parse_json_row(row: usize, obj: &Map<String, Value>) -> Result<FeedbackRecord, BatchError> {
    let course = parse_course(row, obj)?;

    let rating_value = obj.get(RATING).unwrap_or(&Value::Null);
    let rating = match rating_value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => parse_rating_str(s),
        _ => None,
    }
    .ok_or_else(|| BatchError::InvalidRating {
        row,
        value: rating_value.to_string(),
    })?;

    let date_value = obj.get(DATE_SUBMITTED).unwrap_or(&Value::Null);
    let date_submitted = date_value
        .as_str()
        .and_then(parse_date)
        .ok_or_else(|| BatchError::InvalidDate {
            row,
            value: date_value.to_string(),
        })?;

    Ok(FeedbackRecord {
        course,
        rating,
        feedback_text: json_text(obj),
        date_submitted,
    })
}

fn parse_rating_str(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DD HH:MM:SS` forms.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
