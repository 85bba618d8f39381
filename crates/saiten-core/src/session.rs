//! Grading session
//!
//! A session holds everything needed to grade one assignment: the schema,
//! the student list, the ledger, and which student is currently selected.
//! Saving a student writes the ledger first and the gradebook second; the two
//! writes are reported separately.

use indexmap::IndexMap;

use crate::allocation::{AllocationSchema, ScoringMode};
use crate::bail_usage;
use crate::error::{Result, SaitenError};
use crate::gradebook::{GradeSheetPatcher, GradebookColumns, PatchOutcome};
use crate::ledger::GradeLedger;
use crate::scoring::{aggregate, LeafInput, ScoreSet};
use crate::store::{Assignment, Student};

/// Outcome of saving one student's grade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub student: String,
    pub student_id: String,
    pub scores: ScoreSet,
    pub total: u64,
    pub gradebook: PatchOutcome,
}

#[derive(Debug)]
pub struct GradingSession {
    assignment: Assignment,
    schema: AllocationSchema,
    students: Vec<Student>,
    ledger: GradeLedger,
    patcher: GradeSheetPatcher,
    index: usize,
}

impl GradingSession {
    /// Load schema, students and ledger for `assignment`
    #[tracing::instrument(skip_all, fields(assignment = %assignment.root().display()))]
    pub fn open(assignment: Assignment, columns: GradebookColumns) -> Result<Self> {
        let schema = AllocationSchema::load(&assignment.allocation_path())?;
        let students = assignment.students()?;
        let ledger = GradeLedger::load(&assignment.ledger_path())?;

        tracing::debug!(
            criteria = schema.len(),
            students = students.len(),
            graded = ledger.graded_count(),
            "session_opened"
        );

        Ok(Self {
            assignment,
            schema,
            students,
            ledger,
            patcher: GradeSheetPatcher::new(columns),
            index: 0,
        })
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn schema(&self) -> &AllocationSchema {
        &self.schema
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn ledger(&self) -> &GradeLedger {
        &self.ledger
    }

    pub fn patcher(&self) -> &GradeSheetPatcher {
        &self.patcher
    }

    /// Currently selected student
    pub fn current(&self) -> Option<&Student> {
        self.students.get(self.index)
    }

    /// Select a student by directory name, ID or display name
    pub fn select(&mut self, query: &str) -> Result<&Student> {
        let wanted = self.assignment.student(query)?;
        self.index = self
            .students
            .iter()
            .position(|s| s.dir_name() == wanted.dir_name())
            .ok_or_else(|| SaitenError::not_found("student", query))?;
        Ok(&self.students[self.index])
    }

    /// Move to the next student, wrapping around after the last one
    pub fn advance(&mut self) -> Option<&Student> {
        if self.students.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.students.len();
        self.current()
    }

    /// Scores previously saved for the current student
    pub fn saved_scores(&self) -> Option<&ScoreSet> {
        self.current()
            .and_then(|student| self.ledger.get(student.dir_name()))
    }

    /// Fill criteria the grader left blank with the current student's saved
    /// values, so re-grading one criterion keeps the others.
    ///
    /// A saved full-or-zero value that is neither 0 nor the maximum is passed
    /// through as points, so `commit` rejects it instead of zeroing it.
    pub fn prefill(&self, inputs: &mut IndexMap<String, LeafInput>) {
        let Some(saved) = self.saved_scores() else {
            return;
        };
        for (path, criterion) in self.schema.flatten() {
            let key = path.flat_key();
            if inputs.contains_key(&key) {
                continue;
            }
            if let Some(&value) = saved.get(&key) {
                let input = match criterion.mode {
                    ScoringMode::FullOrZero if value == 0 || value == criterion.max_score => {
                        LeafInput::Flag(value == criterion.max_score)
                    }
                    ScoringMode::FullOrZero => LeafInput::Points(i64::from(value)),
                    ScoringMode::Partial => LeafInput::Points(i64::from(value)),
                };
                inputs.insert(key, input);
            }
        }
    }

    /// Score the current student and persist the result.
    ///
    /// The gradebook row is located before anything is written, so a missing
    /// header or student aborts with both files untouched. If the gradebook
    /// write itself fails after the ledger was saved, the returned error says
    /// so; re-running the commit is safe.
    pub fn commit(&mut self, inputs: &IndexMap<String, LeafInput>) -> Result<CommitReport> {
        if self.schema.is_empty() {
            bail_usage!(format!(
                "allocation schema {} has no criteria",
                self.assignment.allocation_path().display()
            ));
        }
        let student = self
            .current()
            .cloned()
            .ok_or_else(|| SaitenError::not_found("student", self.assignment.root().display()))?;

        let result = aggregate(&self.schema, inputs)?;

        let gradebook_path = self.assignment.gradebook_path();
        if self
            .patcher
            .read_grade(&gradebook_path, student.id())?
            .is_none()
        {
            return Err(SaitenError::StudentNotFound {
                path: gradebook_path,
                student_id: student.id().to_string(),
            });
        }

        let ledger_path = self.assignment.ledger_path();
        GradeLedger::save(&ledger_path, student.dir_name(), &result.scores)?;
        self.ledger.insert(student.dir_name(), result.scores.clone());

        let outcome = self
            .patcher
            .update(&gradebook_path, student.id(), result.total)
            .map_err(|e| {
                e.chain(format!(
                    "scores for {} were saved to {} but {} was not updated",
                    student.dir_name(),
                    ledger_path.display(),
                    gradebook_path.display()
                ))
            })?;

        tracing::info!(
            student = student.dir_name(),
            total = result.total,
            "grade_committed"
        );

        Ok(CommitReport {
            student: student.dir_name().to_string(),
            student_id: student.id().to_string(),
            scores: result.scores,
            total: result.total,
            gradebook: outcome,
        })
    }

    /// (graded students, all students)
    pub fn progress(&self) -> (usize, usize) {
        let graded = self
            .students
            .iter()
            .filter(|s| self.ledger.get(s.dir_name()).is_some())
            .count();
        (graded, self.students.len())
    }
}
