//! `iterate` and `while`.
//!
//! A `break` or `continue` without a label, or with this loop's label, is
//! consumed here. A signal naming another label keeps propagating to the
//! enclosing loop.

use std::cmp::Ordering;

use fck_diagnostic::{Diagnostic, WarningKind};
use fck_ir::{ExprId, Name, Span, VarType};

use super::Interpreter;
use crate::errors::{
    illegal_value, illegal_value_type, invalid_iterable, number_overflow, ControlAction, EvalError,
    EvalResult,
};
use crate::value::Number;
use crate::Value;

/// Parts of an `iterate` expression.
#[derive(Copy, Clone, Debug)]
pub(super) struct IterateLoop {
    pub label: Option<Name>,
    pub start: Option<ExprId>,
    pub end: ExprId,
    pub step: Option<ExprId>,
    pub binding: Option<Name>,
    pub body: ExprId,
}

/// What a loop does after one run of its body.
enum Flow {
    Next,
    Stop,
}

/// Whether a signal carrying `signal` is aimed at a loop labelled `label`.
#[inline]
fn targets(label: Option<Name>, signal: Option<Name>) -> bool {
    signal.is_none() || signal == label
}

fn compare(a: Number, b: Number) -> Option<Ordering> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => Some(x.cmp(&y)),
        _ => a.to_f64().partial_cmp(&b.to_f64()),
    }
}

impl Interpreter {
    fn run_body(&mut self, label: Option<Name>, body: ExprId) -> Result<Flow, EvalError> {
        match self.eval(body) {
            Ok(_) => Ok(Flow::Next),
            Err(EvalError::Control(ControlAction::Break(signal))) if targets(label, signal) => {
                Ok(Flow::Stop)
            }
            Err(EvalError::Control(ControlAction::Continue(signal))) if targets(label, signal) => {
                Ok(Flow::Next)
            }
            Err(error) => Err(error),
        }
    }

    pub(super) fn eval_while(
        &mut self,
        label: Option<Name>,
        cond: ExprId,
        body: ExprId,
    ) -> EvalResult {
        while self.eval(cond)?.is_true() {
            if let Flow::Stop = self.run_body(label, body)? {
                break;
            }
        }
        Ok(Value::Null)
    }

    /// Loop bounds as numbers. An infinite end never stops on its own.
    fn loop_number(&mut self, expr: ExprId, usage: &str) -> Result<Number, EvalError> {
        let span = self.arena.get_expr(expr).span;
        let value = self.eval(expr)?;
        match value {
            Value::Infinity(dividend) if dividend.is_negative() => {
                Ok(Number::Float(f64::NEG_INFINITY))
            }
            Value::Infinity(_) => Ok(Number::Float(f64::INFINITY)),
            ref other => other
                .as_number()
                .ok_or_else(|| illegal_value_type(span, other, usage).into()),
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub(super) fn eval_iterate(&mut self, parts: IterateLoop, span: Span) -> EvalResult {
        let end_span = self.arena.get_expr(parts.end).span;
        let end = self.eval(parts.end)?;

        // The loop scope holds the binding and disappears with the loop.
        let mut scoped = self.scoped();

        if let Value::List(items) = &end {
            if parts.start.is_some() || parts.step.is_some() {
                return Err(illegal_value(
                    span,
                    "A start or step cannot be combined with iterating over a list",
                )
                .into());
            }
            for item in items.iter() {
                if let Some(binding) = parts.binding {
                    scoped
                        .env
                        .borrow_mut()
                        .set(binding, item.clone(), VarType::Auto);
                }
                if let Flow::Stop = scoped.run_body(parts.label, parts.body)? {
                    break;
                }
            }
            return Ok(Value::Null);
        }

        let end = match end {
            Value::Infinity(dividend) if dividend.is_negative() => Number::Float(f64::NEG_INFINITY),
            Value::Infinity(_) => Number::Float(f64::INFINITY),
            ref other => other
                .as_number()
                .ok_or_else(|| invalid_iterable(end_span, other))?,
        };
        let start = match parts.start {
            Some(start) => scoped.loop_number(start, "as a loop start")?,
            None => Number::Int(0),
        };
        let step = match parts.step {
            Some(step) => scoped.loop_number(step, "as a loop step")?,
            None => Number::Int(1),
        };

        if step.is_zero() {
            scoped.warn(Diagnostic::warning(WarningKind::IterateStepZero, span).with_arg(end));
            return Ok(Value::Null);
        }
        let forward = !step.is_negative();
        let wanted = if forward {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        if compare(start, end) == Some(wanted.reverse()) {
            scoped.warn(
                Diagnostic::warning(WarningKind::IterateStepLoop, span)
                    .with_arg(step)
                    .with_arg(end)
                    .with_arg(start),
            );
            return Ok(Value::Null);
        }

        let mut counter = start;
        while compare(counter, end) == Some(wanted) {
            if let Some(binding) = parts.binding {
                scoped
                    .env
                    .borrow_mut()
                    .set(binding, Value::from(counter), VarType::Auto);
            }
            let flow = scoped.run_body(parts.label, parts.body)?;

            // The body may have changed the binding.
            if let Some(binding) = parts.binding {
                let current = scoped.env.borrow().get(binding).map(|(value, _)| value);
                counter = match current.as_ref().and_then(Value::as_number) {
                    Some(n) => n,
                    None => {
                        let current = current.unwrap_or_default();
                        return Err(illegal_value_type(span, &current, "as a loop counter").into());
                    }
                };
            }
            if let Flow::Stop = flow {
                break;
            }
            counter = advance(counter, step, span)?;
        }
        Ok(Value::Null)
    }
}

fn advance(counter: Number, step: Number, span: Span) -> Result<Number, Diagnostic> {
    match (counter, step) {
        (Number::Int(a), Number::Int(b)) => a
            .checked_add(b)
            .map(Number::Int)
            .ok_or_else(|| number_overflow(span, "iterate")),
        _ => Ok(Number::Float(counter.to_f64() + step.to_f64())),
    }
}
