//! Error and warning codes.
//!
//! Every fault has a stable code (`E001`, `W001`, ...) used for `--explain`
//! lookups, a short title, and a message template with `{0}`, `{1}`, ...
//! placeholders filled from the diagnostic's arguments.
//!
//! Code order is stable: new kinds are appended, never inserted.

use std::fmt;

/// Declares the code table once and derives `ErrorCode`, `ErrorKind` and
/// `WarningKind` from it.
macro_rules! define_codes {
    (
        errors { $($ecode:ident => $ekind:ident, $etitle:literal, $etemplate:literal;)* }
        warnings { $($wcode:ident => $wkind:ident, $wtitle:literal, $wtemplate:literal;)* }
    ) => {
        /// Stable code of every fault kind.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum ErrorCode {
            $($ecode,)*
            $($wcode,)*
        }

        impl ErrorCode {
            /// All codes, errors first, each group in code order.
            pub const ALL: &'static [ErrorCode] = &[
                $(ErrorCode::$ecode,)*
                $(ErrorCode::$wcode,)*
            ];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(ErrorCode::$ecode => stringify!($ecode),)*
                    $(ErrorCode::$wcode => stringify!($wcode),)*
                }
            }

            /// Kind name, e.g. `DivideByZero`.
            pub fn kind_name(self) -> &'static str {
                match self {
                    $(ErrorCode::$ecode => stringify!($ekind),)*
                    $(ErrorCode::$wcode => stringify!($wkind),)*
                }
            }

            /// Short human title, e.g. `Divide by zero`.
            pub fn title(self) -> &'static str {
                match self {
                    $(ErrorCode::$ecode => $etitle,)*
                    $(ErrorCode::$wcode => $wtitle,)*
                }
            }

            /// Message template with `{N}` placeholders.
            pub fn template(self) -> &'static str {
                match self {
                    $(ErrorCode::$ecode => $etemplate,)*
                    $(ErrorCode::$wcode => $wtemplate,)*
                }
            }

            pub fn is_warning(self) -> bool {
                match self {
                    $(ErrorCode::$ecode => false,)*
                    $(ErrorCode::$wcode => true,)*
                }
            }
        }

        /// Fatal fault kinds.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum ErrorKind {
            $($ekind,)*
        }

        impl ErrorKind {
            pub fn code(self) -> ErrorCode {
                match self {
                    $(ErrorKind::$ekind => ErrorCode::$ecode,)*
                }
            }
        }

        /// Non-fatal fault kinds; evaluation continues with a substituted value.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum WarningKind {
            $($wkind,)*
        }

        impl WarningKind {
            pub fn code(self) -> ErrorCode {
                match self {
                    $(WarningKind::$wkind => ErrorCode::$wcode,)*
                }
            }
        }
    };
}

define_codes! {
    errors {
        E001 => ExpectedChar, "Expected character", "Expected {0}";
        E002 => ExpectedExpr, "Expected expression", "Expected an expression, found {0}";
        E003 => ExpectedType, "Expected type", "Expected a type, found {0}";
        E004 => ExpectedIdentifier, "Expected identifier", "Expected an identifier, found {0}";
        E005 => ExpectedLoopIdentifier, "Expected loop identifier", "Expected a loop name after '@', found {0}";
        E006 => ExpectedAssignmentOperator, "Expected assignment operator", "Expected an assignment operator, found {0}";
        E007 => ExpectedAttribute, "Expected attribute", "Expected an attribute name after '.', found {0}";
        E008 => IllegalChar, "Illegal character", "Illegal character {0} at {1}";
        E009 => IllegalValueType, "Illegal value type", "A value of type {0} cannot be used {1}";
        E010 => UnexpectedToken, "Unexpected token", "Unexpected {0}";
        E011 => UnmatchedBracket, "Unmatched bracket", "Bracket {0} has no matching {1}";
        E012 => IllegalCastType, "Illegal cast type", "Cannot cast {0} to {1}";
        E013 => IllegalVariableValue, "Illegal variable value", "Cannot assign a value of type {0} to {1} variable '{2}'";
        E014 => UndefinedLoopIdentifier, "Undefined loop identifier", "No enclosing loop is named '@{0}'";
        E015 => InvalidIterable, "Invalid iterable", "Cannot iterate over a value of type {0}";
        E016 => IllegalValue, "Illegal value", "{0}";
        E017 => IllegalOperation, "Illegal operation", "Operation '{0}' is not supported for {1}";
        E018 => ArgumentType, "Illegal argument casting", "Argument '{0}' of {1} expects {2}, got {3}";
        E019 => TooArgument, "Wrong number of arguments", "{0}: {1}";
        E020 => IllegalArgumentValue, "Illegal argument value", "Illegal value for argument '{0}' of {1}: {2}";
        E021 => UnknownAttribute, "Unknown attribute", "{0} has no attribute or parameter named '{1}'";
        E022 => UnknownIdentifier, "Unknown identifier", "'{0}' is not defined";
        E023 => NumberOverflow, "Number overflow", "Integer overflow in '{0}'";
        E024 => NotCallable, "Not callable", "A value of type {0} cannot be called";
        E025 => ReturnOutsideFunction, "Return outside function", "'return' used outside of a function";
    }
    warnings {
        W001 => DivideByZero, "Divide by zero", "{0} divided by zero, result is infinity";
        W002 => ModByZero, "Modulo by zero", "{0} modulo zero, result is 0";
        W003 => ValueMultString, "Value multiplied by string", "Number multiplied by a string, repeating the string {0} times";
        W004 => StringMultFloat, "String multiplied by float", "String multiplied by float {0}, repeat count rounded to {1}";
        W005 => InfinityDivValue, "Infinity divided by value", "Infinity divided by {0} is still infinity";
        W006 => ValueDivInfinity, "Value divided by infinity", "{0} divided by infinity, result is 0";
        W007 => InfinityDivInfinity, "Infinity divided by infinity", "Infinity divided by infinity, result is 0";
        W008 => ListFromValue, "List from value", "Value of type {0} assigned to list '{1}' was wrapped in a list";
        W009 => ListIndexOutOfRange, "List index out of range", "Index {0} is out of range for a list of length {1}, using {2}";
        W010 => ListIndexFloat, "List index was float", "Float index {0} was rounded to {1}";
        W011 => IterateStepLoop, "Iterate step loop", "Step {0} never reaches {1} from {2}, loop skipped";
        W012 => IterateStepZero, "Iterate step zero", "Step of zero never reaches {0}, loop skipped";
        W013 => ValueFromList, "Value from list", "Single-element list assigned to {0} '{1}' was unwrapped";
        W014 => ValueFromString, "Value from string", "String assigned to {0} '{1}' was parsed as a number";
        W015 => StringFromValue, "String from value", "Value of type {0} assigned to str '{1}' was converted to text";
        W016 => NoStringEnd, "No string end", "String opened with {0} has no closing delimiter on the same line";
        W017 => FuncArgRet, "Function argument return", "Default for parameter '{0}' uses ':>', treated as '::'";
        W018 => FuncAssignOperator, "Function assignment operator", "Named argument '{0}' uses ':>', treated as '::'";
        W019 => ArgCastError, "Argument cast error", "Argument '{0}' could not be cast to {1}, using its default";
        W020 => UnknownGlobalOpt, "Unknown global option", "Unknown option '#!{0}'";
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().kind_name())
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().kind_name())
    }
}

/// Parse a code string like `"E001"` or `"w016"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
