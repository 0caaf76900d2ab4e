//! Embedded documentation for `--explain`.
//!
//! Each code has a markdown file in this directory explaining the fault,
//! with an example and, where one exists, a fix. The files are embedded
//! at compile time.
//!
//! # Adding New Documentation
//!
//! 1. Create `E0XX.md` / `W0XX.md` in this directory
//! 2. Add an entry to the `DOCS` array below

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Get the documentation for a code.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// Get all documented codes.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    // Errors
    (ErrorCode::E001, include_str!("E001.md")),
    (ErrorCode::E002, include_str!("E002.md")),
    (ErrorCode::E003, include_str!("E003.md")),
    (ErrorCode::E004, include_str!("E004.md")),
    (ErrorCode::E005, include_str!("E005.md")),
    (ErrorCode::E006, include_str!("E006.md")),
    (ErrorCode::E007, include_str!("E007.md")),
    (ErrorCode::E008, include_str!("E008.md")),
    (ErrorCode::E009, include_str!("E009.md")),
    (ErrorCode::E010, include_str!("E010.md")),
    (ErrorCode::E011, include_str!("E011.md")),
    (ErrorCode::E012, include_str!("E012.md")),
    (ErrorCode::E013, include_str!("E013.md")),
    (ErrorCode::E014, include_str!("E014.md")),
    (ErrorCode::E015, include_str!("E015.md")),
    (ErrorCode::E016, include_str!("E016.md")),
    (ErrorCode::E017, include_str!("E017.md")),
    (ErrorCode::E018, include_str!("E018.md")),
    (ErrorCode::E019, include_str!("E019.md")),
    (ErrorCode::E020, include_str!("E020.md")),
    (ErrorCode::E021, include_str!("E021.md")),
    (ErrorCode::E022, include_str!("E022.md")),
    (ErrorCode::E023, include_str!("E023.md")),
    (ErrorCode::E024, include_str!("E024.md")),
    (ErrorCode::E025, include_str!("E025.md")),
    // Warnings
    (ErrorCode::W001, include_str!("W001.md")),
    (ErrorCode::W002, include_str!("W002.md")),
    (ErrorCode::W003, include_str!("W003.md")),
    (ErrorCode::W004, include_str!("W004.md")),
    (ErrorCode::W005, include_str!("W005.md")),
    (ErrorCode::W006, include_str!("W006.md")),
    (ErrorCode::W007, include_str!("W007.md")),
    (ErrorCode::W008, include_str!("W008.md")),
    (ErrorCode::W009, include_str!("W009.md")),
    (ErrorCode::W010, include_str!("W010.md")),
    (ErrorCode::W011, include_str!("W011.md")),
    (ErrorCode::W012, include_str!("W012.md")),
    (ErrorCode::W013, include_str!("W013.md")),
    (ErrorCode::W014, include_str!("W014.md")),
    (ErrorCode::W015, include_str!("W015.md")),
    (ErrorCode::W016, include_str!("W016.md")),
    (ErrorCode::W017, include_str!("W017.md")),
    (ErrorCode::W018, include_str!("W018.md")),
    (ErrorCode::W019, include_str!("W019.md")),
    (ErrorCode::W020, include_str!("W020.md")),
];
