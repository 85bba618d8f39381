//! Gradebook patching (`grades.csv`)
//!
//! The gradebook is downloaded from, and uploaded back to, an external
//! learning-management system. It starts with free-form metadata rows,
//! followed by a header row whose first cell is the student-ID sentinel and
//! which names a grade column. Only one cell is ever rewritten: the grade of
//! the matched student. Every other byte of the file is copied through.

use std::fs;
use std::ops::Range;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SaitenError};
use crate::store::io::write_atomic;
use crate::trace_time;

const UTF8_BOM: char = '\u{feff}';

/// Header labels used to find the student-ID row and grade column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradebookColumns {
    /// First cell of the header row
    #[serde(default = "default_id_header")]
    pub id_header: String,
    /// Header of the column holding the final grade
    #[serde(default = "default_grade_header")]
    pub grade_header: String,
}

fn default_id_header() -> String {
    "StudentID".to_string()
}

fn default_grade_header() -> String {
    "Grade".to_string()
}

impl Default for GradebookColumns {
    fn default() -> Self {
        Self {
            id_header: default_id_header(),
            grade_header: default_grade_header(),
        }
    }
}

/// What `update` did to the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The cell was rewritten; `previous` is its old contents
    Updated { row: usize, previous: String },
    /// The cell already held the new value; the file was not written
    Unchanged { row: usize },
}

/// Rewrites a single student's grade cell in a gradebook
#[derive(Debug, Clone, Default)]
pub struct GradeSheetPatcher {
    columns: GradebookColumns,
}

struct Row {
    cells: StringRecord,
    /// Byte range from the start of this record to the start of the next one
    span: Range<usize>,
}

struct Sheet {
    bytes: Vec<u8>,
    rows: Vec<Row>,
}

struct Located {
    grade_col: usize,
    student_row: Option<usize>,
}

impl GradeSheetPatcher {
    pub fn new(columns: GradebookColumns) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &GradebookColumns {
        &self.columns
    }

    /// Set `student_id`'s grade cell to `total`.
    ///
    /// Fails without writing anything when the header row, the grade column
    /// or the student row cannot be found. Writing the same total twice
    /// leaves the file untouched the second time.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub fn update(&self, path: &Path, student_id: &str, total: u64) -> Result<PatchOutcome> {
        let sheet = read_sheet(path)?;
        let located = self.locate(path, &sheet, student_id)?;
        let row_idx = located.student_row.ok_or_else(|| SaitenError::StudentNotFound {
            path: path.to_path_buf(),
            student_id: student_id.to_string(),
        })?;

        let row = &sheet.rows[row_idx];
        let new_value = total.to_string();
        let previous = row.cells.get(located.grade_col).unwrap_or("").to_string();
        if previous == new_value {
            tracing::debug!(row = row_idx, "grade unchanged, skipping write");
            return Ok(PatchOutcome::Unchanged { row: row_idx });
        }

        let start = Instant::now();
        let patched = splice_field(&sheet.bytes, &row.span, located.grade_col, &new_value);
        write_atomic(path, &patched)?;

        trace_time!(start, "gradebook_write", row = row_idx);
        tracing::debug!(row = row_idx, %previous, total, "gradebook_patched");
        Ok(PatchOutcome::Updated {
            row: row_idx,
            previous,
        })
    }

    /// Current grade cell for `student_id`, or `None` if the student has no row
    pub fn read_grade(&self, path: &Path, student_id: &str) -> Result<Option<String>> {
        let sheet = read_sheet(path)?;
        let located = self.locate(path, &sheet, student_id)?;
        Ok(located.student_row.map(|idx| {
            sheet.rows[idx]
                .cells
                .get(located.grade_col)
                .unwrap_or("")
                .to_string()
        }))
    }

    fn locate(&self, path: &Path, sheet: &Sheet, student_id: &str) -> Result<Located> {
        let header_row = sheet
            .rows
            .iter()
            .position(|row| first_cell(&row.cells) == Some(self.columns.id_header.as_str()))
            .ok_or_else(|| SaitenError::HeaderNotFound {
                path: path.to_path_buf(),
                header: self.columns.id_header.clone(),
            })?;

        let grade_col = sheet.rows[header_row]
            .cells
            .iter()
            .position(|cell| cell == self.columns.grade_header)
            .ok_or_else(|| SaitenError::HeaderNotFound {
                path: path.to_path_buf(),
                header: self.columns.grade_header.clone(),
            })?;

        let student_row = sheet.rows[header_row + 1..]
            .iter()
            .position(|row| first_cell(&row.cells) == Some(student_id))
            .map(|offset| header_row + 1 + offset);

        Ok(Located {
            grade_col,
            student_row,
        })
    }
}

fn first_cell(record: &StringRecord) -> Option<&str> {
    record.get(0).map(|cell| cell.trim_start_matches(UTF8_BOM))
}

fn read_sheet(path: &Path) -> Result<Sheet> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SaitenError::not_found("gradebook", path.display())
        } else {
            SaitenError::io_operation("read", path.display(), e)
        }
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut starts = Vec::new();
    let mut records = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let start = record.position().map(|p| p.byte() as usize).unwrap_or(0);
        starts.push(start);
        records.push(record.clone());
    }

    let rows = records
        .into_iter()
        .enumerate()
        .map(|(i, cells)| {
            let end = starts.get(i + 1).copied().unwrap_or(bytes.len());
            Row {
                cells,
                span: starts[i]..end,
            }
        })
        .collect();

    Ok(Sheet { bytes, rows })
}

/// Byte ranges of the fields in one raw record, relative to `content`
fn field_spans(content: &[u8]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, &b) in content.iter().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                spans.push(start..i);
                start = i + 1;
            }
            _ => {}
        }
    }
    spans.push(start..content.len());
    spans
}

/// Rewrite field `col` of the record inside `span` to `value`.
///
/// Only that field's bytes change. A quoted field stays quoted; a record too
/// short to have the field gets empty fields and the value appended.
fn splice_field(bytes: &[u8], span: &Range<usize>, col: usize, value: &str) -> Vec<u8> {
    let raw = &bytes[span.clone()];
    let is_break = |b: &&u8| **b == b'\r' || **b == b'\n';
    let lead = raw.iter().take_while(is_break).count();
    let trail = raw[lead..].iter().rev().take_while(is_break).count();
    let content_start = span.start + lead;
    let content_end = span.end - trail;
    let spans = field_spans(&bytes[content_start..content_end]);

    let mut out = Vec::with_capacity(bytes.len() + value.len() + col);
    match spans.get(col) {
        Some(field) => {
            let old = &bytes[content_start + field.start..content_start + field.end];
            out.extend_from_slice(&bytes[..content_start + field.start]);
            if old.first() == Some(&b'"') {
                out.push(b'"');
                out.extend_from_slice(value.as_bytes());
                out.push(b'"');
            } else {
                out.extend_from_slice(value.as_bytes());
            }
            out.extend_from_slice(&bytes[content_start + field.end..]);
        }
        None => {
            out.extend_from_slice(&bytes[..content_end]);
            out.extend_from_slice(&vec![b','; col + 1 - spans.len()]);
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(&bytes[content_end..]);
        }
    }
    out
}
