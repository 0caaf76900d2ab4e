//! The `--explain` command: documentation for error and warning codes.

use fck_diagnostic::{ErrorCode, ErrorDocs};

use crate::DriverError;

/// Look up the documentation for a code such as `E022` or `w001`.
pub fn explain(code_str: &str) -> Result<&'static str, DriverError> {
    let well_formed = code_str.len() == 4
        && code_str.starts_with(['E', 'e', 'W', 'w'])
        && code_str[1..].bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(DriverError::Usage(format!(
            "'{code_str}' is not a valid code: expected the form E000 or W000"
        )));
    }
    if &code_str[1..] == "000" {
        return Err(DriverError::Usage("codes start at E001 and W001".to_string()));
    }

    let Ok(code) = code_str.parse::<ErrorCode>() else {
        let warning = code_str.starts_with(['W', 'w']);
        let last = ErrorCode::ALL
            .iter()
            .rev()
            .find(|code| code.is_warning() == warning)
            .map_or("", |code| code.as_str());
        return Err(DriverError::Usage(format!(
            "unknown code '{code_str}': {} codes go up to {last}",
            if warning { "warning" } else { "error" }
        )));
    };

    ErrorDocs::get(code)
        .ok_or_else(|| DriverError::Usage(format!("no documentation for {code}")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::explain;

    #[test]
    fn codes_are_case_insensitive() {
        let upper = explain("E022").unwrap_or_else(|e| panic!("{e}"));
        let lower = explain("e022").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(upper, lower);
        assert!(explain("w001").is_ok());
    }

    #[test]
    fn malformed_and_unknown_codes() {
        let message = |code: &str| match explain(code) {
            Ok(_) => panic!("{code} should not have documentation"),
            Err(e) => e.to_string(),
        };
        assert_eq!(
            message("X001"),
            "'X001' is not a valid code: expected the form E000 or W000"
        );
        assert_eq!(
            message("E1"),
            "'E1' is not a valid code: expected the form E000 or W000"
        );
        assert_eq!(message("e000"), "codes start at E001 and W001");
        assert_eq!(message("E099"), "unknown code 'E099': error codes go up to E025");
        assert_eq!(message("W999"), "unknown code 'W999': warning codes go up to W020");
    }
}
