//! Assignment workspace
//!
//! Submissions live under a base directory laid out as
//! `<base>/<subject>/<assignment>/<student dir>/`. Each assignment directory
//! also holds its allocation schema, the grade ledger and the gradebook.

pub mod io;
pub mod paths;
pub mod student;

use std::fs;
use std::path::{Path, PathBuf};

use crate::bail_usage;
use crate::error::{Result, SaitenError};
use paths::{ALLOCATION_FILE, APP_FILES, GRADEBOOK_FILE, LEDGER_FILE};
pub use student::{AttachmentKind, Student, Submissions};

/// Root of all subjects and assignments
#[derive(Debug, Clone)]
pub struct Workspace {
    base_dir: PathBuf,
}

impl Workspace {
    /// Open an existing workspace
    pub fn open(base_dir: &Path) -> Result<Self> {
        if !base_dir.is_dir() {
            return Err(SaitenError::not_found("base directory", base_dir.display()));
        }
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// Open the workspace at `base_dir`, creating the directory if needed
    pub fn create(base_dir: &Path) -> Result<Self> {
        fs::create_dir_all(base_dir)
            .map_err(|e| SaitenError::io_operation("create", base_dir.display(), e))?;
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn subjects(&self) -> Result<Vec<String>> {
        io::list_subdirs(&self.base_dir)
    }

    pub fn assignments(&self, subject: &str) -> Result<Vec<String>> {
        let dir = self.base_dir.join(subject);
        if !dir.is_dir() {
            return Err(SaitenError::not_found("subject", subject));
        }
        io::list_subdirs(&dir)
    }

    pub fn assignment(&self, subject: &str, name: &str) -> Result<Assignment> {
        if !self.base_dir.join(subject).is_dir() {
            return Err(SaitenError::not_found("subject", subject));
        }
        let root = self.base_dir.join(subject).join(name);
        if !root.is_dir() {
            return Err(SaitenError::not_found(
                "assignment",
                format!("{}/{}", subject, name),
            ));
        }
        Ok(Assignment {
            subject: subject.to_string(),
            name: name.to_string(),
            root,
        })
    }

    /// Copy every subject into `new_base`; returns the number of files copied
    pub fn copy_into(&self, new_base: &Path) -> Result<usize> {
        if new_base == self.base_dir {
            return Ok(0);
        }
        if new_base.starts_with(&self.base_dir) {
            bail_usage!(format!(
                "{} is inside the current base directory {}",
                new_base.display(),
                self.base_dir.display()
            ));
        }
        io::copy_tree(&self.base_dir, new_base, |name| name.starts_with('.'))
    }
}

/// One assignment directory
#[derive(Debug, Clone)]
pub struct Assignment {
    subject: String,
    name: String,
    root: PathBuf,
}

impl Assignment {
    /// Open an assignment directory directly
    pub fn at(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(SaitenError::not_found("assignment", root.display()));
        }
        let name_of = |p: Option<&Path>| {
            p.and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        Ok(Self {
            subject: name_of(root.parent()),
            name: name_of(Some(root)),
            root: root.to_path_buf(),
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn allocation_path(&self) -> PathBuf {
        self.root.join(ALLOCATION_FILE)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.root.join(LEDGER_FILE)
    }

    pub fn gradebook_path(&self) -> PathBuf {
        self.root.join(GRADEBOOK_FILE)
    }

    /// Student directories, sorted by directory name
    pub fn students(&self) -> Result<Vec<Student>> {
        io::list_subdirs(&self.root)?
            .into_iter()
            .map(|name| Student::from_dir(self.root.join(name)))
            .collect()
    }

    /// Find a student by directory name, student ID or display name
    pub fn student(&self, query: &str) -> Result<Student> {
        let students = self.students()?;

        if let Some(s) = students
            .iter()
            .find(|s| s.dir_name() == query || s.id() == query)
        {
            return Ok(s.clone());
        }

        let by_name: Vec<&Student> = students
            .iter()
            .filter(|s| s.display_name() == query)
            .collect();
        match by_name.as_slice() {
            [] => Err(SaitenError::not_found("student", query)),
            [one] => Ok((*one).clone()),
            _ => bail_usage!(format!(
                "{:?} matches {} students; use the student ID",
                query,
                by_name.len()
            )),
        }
    }

    /// Copy the assignment tree to `dest`.
    ///
    /// Without `include_app_files` the ledger and allocation schema are left
    /// out, which is the form the learning-management system accepts back.
    #[tracing::instrument(skip(self, dest), fields(dest = %dest.display()))]
    pub fn export(&self, dest: &Path, include_app_files: bool) -> Result<usize> {
        if dest.starts_with(&self.root) {
            bail_usage!("export destination must be outside the assignment directory");
        }
        io::copy_tree(&self.root, dest, |name| {
            !include_app_files && APP_FILES.contains(&name)
        })
    }
}
