//! Standard builtins.
//!
//! Installed through `Session::register_builtin`, the same path an embedding
//! host uses for its own functions. Arguments arrive already bound and cast
//! to the declared parameter types, with defaults filled in.

use std::io::{self, BufRead};
use std::rc::Rc;

use fck_diagnostic::sink::GatedWarningSink;
use fck_eval::errors::{illegal_argument_value, illegal_value, illegal_value_type};
use fck_eval::{CallContext, ControlAction, EvalResult, NativeParam, Value};
use fck_ir::{SourceFile, TypeKind, VarType};

use crate::session::{compile, Session};

/// `print`, `log`, `input`, `clear`, `type`, `len` and `run`.
pub fn install_std(session: &mut Session) {
    session.register_builtin("print", vec![value_param().with_default(Value::Null)], print);
    session.register_builtin("log", vec![value_param().with_default(Value::Null)], log);
    session.register_builtin(
        "input",
        vec![NativeParam::new("prompt", VarType::Typed(TypeKind::Str))
            .with_default(Value::string(""))],
        input,
    );
    session.register_builtin("clear", Vec::new(), clear);
    session.register_builtin("type", vec![value_param()], type_of);
    session.register_builtin("len", vec![value_param()], len);

    let gate = session.warning_gate();
    session.register_builtin(
        "run",
        vec![NativeParam::new("path", VarType::Typed(TypeKind::Str))],
        move |ctx: &mut CallContext<'_>, args: &[Value]| -> EvalResult {
            run_script(ctx, args, &gate)
        },
    );
}

/// `quit(code)`: stop the host with an exit status. Only the command line
/// installs it; embedding hosts decide for themselves how a program ends.
pub fn install_quit(session: &mut Session) {
    session.register_builtin(
        "quit",
        vec![NativeParam::new("code", VarType::Typed(TypeKind::Int)).with_default(Value::Int(0))],
        quit,
    );
}

fn value_param() -> NativeParam {
    NativeParam::new("value", VarType::Auto)
}

fn first(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Null)
}

fn print(ctx: &mut CallContext<'_>, args: &[Value]) -> EvalResult {
    let value = first(args);
    if !matches!(value, Value::Null) {
        ctx.print_handler().println(&value.display_value());
    }
    Ok(Value::Null)
}

fn log(ctx: &mut CallContext<'_>, args: &[Value]) -> EvalResult {
    ctx.print_handler().println(&first(args).to_string());
    Ok(Value::Null)
}

fn input(ctx: &mut CallContext<'_>, args: &[Value]) -> EvalResult {
    let prompt = first(args).display_value();
    if !prompt.is_empty() {
        ctx.print_handler().print(&prompt);
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| illegal_value(ctx.span(), format_args!("cannot read input: {e}")))?;
    Ok(Value::string(line.trim_end_matches(['\n', '\r'])))
}

fn clear(ctx: &mut CallContext<'_>, _args: &[Value]) -> EvalResult {
    ctx.print_handler().clear();
    Ok(Value::Null)
}

fn type_of(_ctx: &mut CallContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::string(first(args).type_name()))
}

fn len(ctx: &mut CallContext<'_>, args: &[Value]) -> EvalResult {
    let value = first(args);
    let Some(len) = value.len() else {
        return Err(illegal_value_type(ctx.span(), &value, "with 'len'").into());
    };
    let len = i64::try_from(len).map_err(|_| {
        illegal_value(ctx.span(), format_args!("length {len} does not fit in an int"))
    })?;
    Ok(Value::Int(len))
}

fn quit(ctx: &mut CallContext<'_>, args: &[Value]) -> EvalResult {
    let code = match first(args) {
        Value::Int(code) => code,
        _ => 0,
    };
    let code = i32::try_from(code).map_err(|_| {
        illegal_argument_value(
            ctx.span(),
            "code",
            "quit",
            format_args!("{code} is not an exit status"),
        )
    })?;
    Err(ControlAction::Exit(code).into())
}

/// Run a script file in the root scope of the calling session.
fn run_script(ctx: &mut CallContext<'_>, args: &[Value], gate: &GatedWarningSink) -> EvalResult {
    let path = first(args).display_value();
    let text = std::fs::read_to_string(&path).map_err(|e| {
        illegal_argument_value(
            ctx.span(),
            "path",
            "run",
            format_args!("cannot read '{path}': {e}"),
        )
    })?;
    tracing::debug!(path = %path, "running script");

    let source = Rc::new(SourceFile::new(path, text));
    let (arena, root) = compile(&source, ctx.interner(), gate)?;
    ctx.eval_program(arena, root, source)
}

#[cfg(test)]
mod tests;
