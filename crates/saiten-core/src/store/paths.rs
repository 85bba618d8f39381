//! File and directory names inside an assignment directory

/// Default base directory holding `<subject>/<assignment>/` trees
pub const DEFAULT_BASE_DIR: &str = "assignments";

/// Allocation schema for an assignment
pub const ALLOCATION_FILE: &str = "allocation.json";

/// Application-owned per-criterion ledger
pub const LEDGER_FILE: &str = "detailed_grades.json";

/// Gradebook shared with the learning-management system
pub const GRADEBOOK_FILE: &str = "grades.csv";

/// Per-student grader comment
pub const COMMENT_FILE: &str = "comments.txt";

/// Per-student directory holding uploaded attachments
pub const ATTACHMENTS_DIR: &str = "提出物の添付ファイル";

/// Suffix of the inline submission text file
pub const SUBMISSION_TEXT_SUFFIX: &str = "_submissionText.html";

/// Files that only this application understands; left out of uploads
pub const APP_FILES: [&str; 2] = [LEDGER_FILE, ALLOCATION_FILE];
