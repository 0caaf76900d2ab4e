//! Indexing (`a[i]`, `a[1 to 3]`, `a[0, 2]`) and attributes (`.len`,
//! `.type`).

use fck_diagnostic::{Diagnostic, WarningKind};
use fck_ir::{ExprId, IndexSpec, IndexSpecRange, Name, Span};

use super::Interpreter;
use crate::errors::{illegal_value, illegal_value_type, unknown_attribute, EvalResult};
use crate::value::float_to_int;
use crate::Value;

/// Elements of a list or the characters of a string.
enum Sequence<'v> {
    List(&'v [Value]),
    Chars(Vec<char>),
}

impl Sequence<'_> {
    fn len(&self) -> usize {
        match self {
            Sequence::List(items) => items.len(),
            Sequence::Chars(chars) => chars.len(),
        }
    }

    fn item(&self, index: usize) -> Value {
        match self {
            Sequence::List(items) => items[index].clone(),
            Sequence::Chars(chars) => Value::string(chars[index].to_string()),
        }
    }

    fn slice(&self, start: usize, end: usize) -> Value {
        match self {
            Sequence::List(items) => Value::list(items[start..end].to_vec()),
            Sequence::Chars(chars) => Value::string(chars[start..end].iter().collect::<String>()),
        }
    }
}

fn len_as_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

impl Interpreter {
    pub(super) fn eval_index(&mut self, target: ExprId, specs: IndexSpecRange) -> EvalResult {
        let arena = self.arena.clone();
        let target_span = arena.get_expr(target).span;
        let value = self.eval(target)?;
        let sequence = match &value {
            Value::List(items) => Sequence::List(items),
            Value::Str(s) => Sequence::Chars(s.chars().collect()),
            other => {
                return Err(illegal_value_type(target_span, other, "as an indexed value").into())
            }
        };

        let mut selected = Vec::new();
        for spec in arena.get_index_specs(specs) {
            match *spec {
                IndexSpec::Single(index) => {
                    let span = arena.get_expr(index).span;
                    let index = self.eval(index)?;
                    let position = self.resolve_index(&index, sequence.len(), span)?;
                    selected.push(sequence.item(position));
                }
                IndexSpec::Range { start, end } => {
                    let start_span = arena.get_expr(start).span;
                    let end_span = arena.get_expr(end).span;
                    let start = self.eval(start)?;
                    let end = self.eval(end)?;
                    let from = self.range_bound(&start, sequence.len(), start_span)?;
                    let to = self.range_bound(&end, sequence.len(), end_span)?;
                    selected.push(sequence.slice(from, to.max(from)));
                }
            }
        }

        Ok(if selected.len() == 1 {
            selected.swap_remove(0)
        } else {
            Value::list(selected)
        })
    }

    /// An index value as an integer. Floats are rounded with a warning.
    fn index_number(&self, index: &Value, span: Span) -> Result<i64, Diagnostic> {
        match index {
            Value::Int(i) => Ok(*i),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Float(f) => {
                let rounded = float_to_int(f.round(), span)?;
                self.warn(
                    Diagnostic::warning(WarningKind::ListIndexFloat, span)
                        .with_arg(index)
                        .with_arg(rounded),
                );
                Ok(rounded)
            }
            other => Err(illegal_value_type(span, other, "as a list index")),
        }
    }

    /// Resolve a single index. Negative indexes count from the end; indexes
    /// outside the sequence are clamped with a warning.
    fn resolve_index(&self, index: &Value, len: usize, span: Span) -> Result<usize, Diagnostic> {
        let raw = self.index_number(index, span)?;
        if len == 0 {
            return Err(illegal_value(span, "Cannot index into an empty sequence"));
        }
        let len_i = len_as_i64(len);
        let adjusted = if raw < 0 { raw.saturating_add(len_i) } else { raw };
        let clamped = adjusted.clamp(0, len_i - 1);
        if clamped != adjusted {
            self.warn(
                Diagnostic::warning(WarningKind::ListIndexOutOfRange, span)
                    .with_arg(raw)
                    .with_arg(len)
                    .with_arg(clamped),
            );
        }
        Ok(usize::try_from(clamped).unwrap_or(0))
    }

    /// Resolve one end of a range, clamped to `0..=len`.
    fn range_bound(&self, bound: &Value, len: usize, span: Span) -> Result<usize, Diagnostic> {
        let raw = self.index_number(bound, span)?;
        let len_i = len_as_i64(len);
        let adjusted = if raw < 0 { raw.saturating_add(len_i) } else { raw };
        Ok(usize::try_from(adjusted.clamp(0, len_i)).unwrap_or(0))
    }

    pub(super) fn eval_attribute(&mut self, target: ExprId, attr: Name, span: Span) -> EvalResult {
        let value = self.eval(target)?;
        let attr = self.interner.lookup(attr);
        match attr {
            "type" => Ok(Value::string(value.type_name())),
            "len" => match value.len() {
                Some(len) => Ok(Value::Int(len_as_i64(len))),
                None => Err(illegal_value_type(span, &value, "with '.len'").into()),
            },
            _ => Err(unknown_attribute(span, value.type_name(), attr).into()),
        }
    }
}
