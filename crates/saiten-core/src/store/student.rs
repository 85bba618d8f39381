//! Student submission directories
//!
//! Each student directory is named `<display name>(<student id>)`, as produced
//! by the archive download of the learning-management system.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SaitenError};
use crate::store::io::write_atomic;
use crate::store::paths::{ATTACHMENTS_DIR, COMMENT_FILE, SUBMISSION_TEXT_SUFFIX};

/// One student's submission directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    dir_name: String,
    display_name: String,
    id: String,
    root: PathBuf,
}

/// Split `Name(1234567)` into (`Name`, `1234567`).
///
/// Without parentheses the whole name is used for both parts.
pub fn parse_dir_name(dir_name: &str) -> (String, String) {
    let display = dir_name.split('(').next().unwrap_or(dir_name).trim();
    let id = dir_name
        .rsplit('(')
        .next()
        .unwrap_or(dir_name)
        .trim_end_matches(')')
        .trim();
    (display.to_string(), id.to_string())
}

impl Student {
    pub fn from_dir(root: PathBuf) -> Result<Self> {
        let dir_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| SaitenError::not_found("student directory", root.display()))?;
        let (display_name, id) = parse_dir_name(&dir_name);
        Ok(Self {
            dir_name,
            display_name,
            id,
            root,
        })
    }

    /// Directory name; the ledger key for this student
    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Student ID; the gradebook row key
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Grader comment, verbatim, if one was written
    pub fn comment(&self) -> Result<Option<String>> {
        let path = self.root.join(COMMENT_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| SaitenError::io_operation("read", path.display(), e))
    }

    /// Replace the grader comment wholesale
    pub fn set_comment(&self, text: &str) -> Result<()> {
        write_atomic(&self.root.join(COMMENT_FILE), text.as_bytes())
    }

    /// Files the student handed in
    pub fn submissions(&self) -> Result<Submissions> {
        let mut submissions = Submissions::default();

        let mut texts = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(SUBMISSION_TEXT_SUFFIX) && entry.file_type()?.is_file() {
                texts.push(entry.path());
            }
        }
        texts.sort();
        submissions.text = texts.into_iter().next();

        let attachments_dir = self.root.join(ATTACHMENTS_DIR);
        if attachments_dir.is_dir() {
            let mut files: Vec<PathBuf> = fs::read_dir(&attachments_dir)?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .collect();
            files.sort();
            for file in files {
                match AttachmentKind::of(&file) {
                    AttachmentKind::Pdf => submissions.pdfs.push(file),
                    AttachmentKind::Image => submissions.images.push(file),
                    AttachmentKind::Other => submissions.others.push(file),
                }
            }
        }

        Ok(submissions)
    }
}

/// How an attachment is presented to the grader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Pdf,
    Image,
    Other,
}

impl AttachmentKind {
    pub fn of(path: &Path) -> Self {
        let Some(mime) = mime_guess::from_path(path).first() else {
            return AttachmentKind::Other;
        };
        if mime == mime_guess::mime::APPLICATION_PDF {
            AttachmentKind::Pdf
        } else if mime == mime_guess::mime::IMAGE_JPEG || mime == mime_guess::mime::IMAGE_PNG {
            AttachmentKind::Image
        } else {
            AttachmentKind::Other
        }
    }
}

/// A student's submitted files, grouped for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submissions {
    /// Inline submission text (HTML)
    pub text: Option<PathBuf>,
    pub pdfs: Vec<PathBuf>,
    pub images: Vec<PathBuf>,
    pub others: Vec<PathBuf>,
}

impl Submissions {
    /// True when nothing was handed in
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.pdfs.is_empty() && self.images.is_empty() && self.others.is_empty()
    }
}
