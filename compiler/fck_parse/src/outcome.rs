//! Parse results that remember whether input was consumed.
//!
//! A production that fails before taking any token reports `EmptyErr`, and
//! its caller may try another alternative. Once a token is taken the
//! production is committed, so a later failure is `ConsumedErr` and ends the
//! parse. `statements()` stops at the first `EmptyErr` from `statement()`
//! and reports any `ConsumedErr` as a malformed statement.

use fck_diagnostic::Diagnostic;

#[derive(Debug)]
pub enum ParseOutcome<T> {
    ConsumedOk { value: T },
    /// Succeeded without taking a token, e.g. an absent optional part.
    EmptyOk { value: T },
    /// Committed, then failed.
    ConsumedErr { error: Diagnostic },
    /// Nothing taken; `error` names what the current token should have been.
    EmptyErr { error: Diagnostic },
}

impl<T> ParseOutcome<T> {
    #[inline]
    pub fn consumed_ok(value: T) -> Self {
        Self::ConsumedOk { value }
    }

    #[inline]
    pub fn empty_ok(value: T) -> Self {
        Self::EmptyOk { value }
    }

    #[inline]
    pub fn consumed_err(error: Diagnostic) -> Self {
        Self::ConsumedErr { error }
    }

    #[inline]
    pub fn empty_err(error: Diagnostic) -> Self {
        Self::EmptyErr { error }
    }
}

/// Take the value of a sub-production, returning its failure as is. Use it
/// before the enclosing production has taken a token.
#[macro_export]
macro_rules! chain {
    ($parser:expr) => {
        match $parser {
            $crate::ParseOutcome::ConsumedOk { value }
            | $crate::ParseOutcome::EmptyOk { value } => value,
            $crate::ParseOutcome::ConsumedErr { error } => {
                return $crate::ParseOutcome::ConsumedErr { error };
            }
            $crate::ParseOutcome::EmptyErr { error } => {
                return $crate::ParseOutcome::EmptyErr { error };
            }
        }
    };
}

/// Take the value of a sub-production the enclosing one has committed to;
/// any failure returns as `ConsumedErr`.
#[macro_export]
macro_rules! require {
    ($parser:expr) => {
        match $parser {
            $crate::ParseOutcome::ConsumedOk { value }
            | $crate::ParseOutcome::EmptyOk { value } => value,
            $crate::ParseOutcome::ConsumedErr { error }
            | $crate::ParseOutcome::EmptyErr { error } => {
                return $crate::ParseOutcome::ConsumedErr { error };
            }
        }
    };
}

/// `require!` for a plain `Result`.
#[macro_export]
macro_rules! commit {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(error) => return $crate::ParseOutcome::ConsumedErr { error },
        }
    };
}
