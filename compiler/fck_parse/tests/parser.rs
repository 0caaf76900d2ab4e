//! Parser tests over lexed source, checked through a compact s-expression
//! rendering of the tree.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use fck_diagnostic::sink::SilentWarningSink;
use fck_diagnostic::{ErrorKind, WarningKind};
use fck_ir::{ExprArena, ExprId, ExprKind, IndexSpec, SourceFile, StringInterner};
use fck_parse::{parse, ParseOutput};
use pretty_assertions::assert_eq;

struct Parsed {
    output: ParseOutput,
    interner: StringInterner,
}

fn parse_text(text: &str) -> Parsed {
    let interner = StringInterner::new();
    let source = SourceFile::new("<test>", text);
    let tokens = fck_lexer::tokenize(&source, &interner, &SilentWarningSink).expect("lexes");
    let output = parse(&tokens, &interner);
    Parsed { output, interner }
}

/// Render the program, one statement per line.
fn render(text: &str) -> String {
    let parsed = parse_text(text);
    if let Some(error) = &parsed.output.error {
        panic!("parse error in {text:?}: {error}");
    }
    let ExprKind::Block(list) = parsed.output.arena.get_expr(parsed.output.root).kind else {
        panic!("root is not a block");
    };
    parsed
        .output
        .arena
        .get_expr_list(list)
        .iter()
        .map(|&id| sexpr(&parsed.output.arena, &parsed.interner, id))
        .collect::<Vec<_>>()
        .join("\n")
}

fn error_message(text: &str) -> String {
    let parsed = parse_text(text);
    parsed.output.error.expect("parse should fail").message()
}

fn sexpr(arena: &ExprArena, interner: &StringInterner, id: ExprId) -> String {
    let s = |id| sexpr(arena, interner, id);
    let opt = |id: Option<ExprId>| id.map_or_else(|| "_".to_string(), s);
    let name = |n| interner.lookup(n).to_string();
    let label = |l: Option<_>| l.map_or_else(String::new, |l| format!("@{} ", interner.lookup(l)));
    match arena.get_expr(id).kind {
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Float(v) => format!("{v:?}"),
        ExprKind::Str(n) => format!("{:?}", interner.lookup(n)),
        ExprKind::Ident(n) => name(n),
        ExprKind::List(list) => format!(
            "[{}]",
            arena.get_expr_list(list).iter().map(|&e| s(e)).collect::<Vec<_>>().join(" ")
        ),
        ExprKind::Index { target, specs } => {
            let specs: Vec<_> = arena
                .get_index_specs(specs)
                .iter()
                .map(|spec| match *spec {
                    IndexSpec::Single(e) => s(e),
                    IndexSpec::Range { start, end } => format!("{}..{}", s(start), s(end)),
                })
                .collect();
            format!("(index {} {})", s(target), specs.join(" "))
        }
        ExprKind::Attribute { target, attr } => format!("(. {} {})", s(target), name(attr)),
        ExprKind::Cast { expr, ty } => format!("(as {} {ty})", s(expr)),
        ExprKind::Binary { op, left, right } => format!("({op} {} {})", s(left), s(right)),
        ExprKind::Unary { op, operand } => format!("({op} {})", s(operand)),
        ExprKind::Ternary {
            cond,
            then_branch,
            else_branch,
        } => format!("(? {} {} {})", s(cond), opt(then_branch), opt(else_branch)),
        ExprKind::VarDecl {
            ty,
            name: n,
            value,
            yields,
        } => format!(
            "({} {} {} {})",
            ty.as_str(),
            name(n),
            if yields { ":>" } else { "::" },
            opt(value)
        ),
        ExprKind::Reassign {
            name: n,
            op,
            value,
            yields,
        } => {
            let symbol = if yields { op.yield_symbol() } else { op.set_symbol() };
            format!("({symbol} {} {})", name(n), s(value))
        }
        ExprKind::If {
            branches,
            else_branch,
        } => {
            let branches: Vec<_> = arena
                .get_if_branches(branches)
                .iter()
                .map(|b| format!("{} {}", s(b.cond), s(b.body)))
                .collect();
            format!("(if {} else {})", branches.join(" elif "), opt(else_branch))
        }
        ExprKind::Case {
            subject,
            arms,
            default,
        } => {
            let arms: Vec<_> = arena
                .get_case_arms(arms)
                .iter()
                .map(|a| format!("{} {}", s(a.pattern), s(a.body)))
                .collect();
            format!("(case {} {} default {})", s(subject), arms.join(" "), opt(default))
        }
        ExprKind::Iterate {
            label: l,
            start,
            end,
            step,
            binding,
            body,
        } => format!(
            "({}iterate {} {} {} {} {})",
            label(l),
            opt(start),
            s(end),
            opt(step),
            binding.map_or_else(|| "_".to_string(), name),
            s(body)
        ),
        ExprKind::While { label: l, cond, body } => {
            format!("({}while {} {})", label(l), s(cond), s(body))
        }
        ExprKind::FuncDef {
            name: n,
            params,
            body,
        } => {
            let params: Vec<_> = arena
                .get_params(params)
                .iter()
                .map(|p| format!("{} {} {}", p.ty.as_str(), name(p.name), opt(p.default)))
                .collect();
            format!(
                "(def {} ({}) {})",
                n.map_or_else(|| "_".to_string(), name),
                params.join(", "),
                s(body)
            )
        }
        ExprKind::Call { callee, args } => {
            let args: Vec<_> = arena
                .get_call_args(args)
                .iter()
                .map(|a| match a.name {
                    Some(n) => format!("{}={}", name(n), s(a.value)),
                    None => s(a.value),
                })
                .collect();
            format!("(call {} {})", s(callee), args.join(" "))
        }
        ExprKind::Return { value, guard } => format!("(return {} if {})", opt(value), opt(guard)),
        ExprKind::Break { label: l, guard } => format!("({}break if {})", label(l), opt(guard)),
        ExprKind::Continue { label: l, guard } => {
            format!("({}continue if {})", label(l), opt(guard))
        }
        ExprKind::Block(list) => format!(
            "{{{}}}",
            arena.get_expr_list(list).iter().map(|&e| s(e)).collect::<Vec<_>>().join("; ")
        ),
    }
}

// ─── Statements ───

#[test]
fn statements_split_on_newlines_and_semicolons() {
    assert_eq!(render("a\n\nb; c"), "a\nb\nc");
    assert_eq!(render(""), "");
}

#[test]
fn assignment_family() {
    assert_eq!(
        render("int x :: 1 + 2\nx :+: 3\nx :*> 2\nlist l"),
        "(int x :: (+ 1 2))\n(:+: x 3)\n(:*> x 2)\n(list l :: _)"
    );
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(render("a :: b :> 2"), "(:: a (:> b 2))");
}

#[test]
fn postfix_chains() {
    assert_eq!(
        render("f(1, n :: 2)[0 to 2, 3].size as str"),
        "(as (. (index (call f 1 n=2) 0..2 3) size) str)"
    );
}

#[test]
fn empty_index_is_the_target() {
    assert_eq!(render("a[]"), "a");
}

#[test]
fn list_literals_span_lines() {
    assert_eq!(render("[1,\n 2.5,\n \"x\"]"), "[1 2.5 \"x\"]");
}

#[test]
fn parentheses_group() {
    assert_eq!(render("(1 + 2) * 3"), "(* (+ 1 2) 3)");
}

// ─── Conditionals ───

#[test]
fn if_elif_else_across_lines() {
    assert_eq!(
        render("if a { 1 }\nelif b { 2 }\nelse { 3 }"),
        "(if a {1} elif b {2} else {3})"
    );
}

#[test]
fn if_without_else_leaves_next_statement_alone() {
    assert_eq!(render("if a { 1 }\nb"), "(if a {1} else _)\nb");
}

#[test]
fn case_with_default() {
    assert_eq!(
        render("case x {\n option 1 { a }\n option -2 { b }\n default { c }\n}"),
        "(case x 1 {a} (- 2) {b} default {c})"
    );
}

// ─── Loops ───

#[test]
fn iterate_forms() {
    assert_eq!(render("iterate 5 { x }"), "(iterate _ 5 _ _ {x})");
    assert_eq!(
        render("iterate 1 to n + 1 step 2 :: i { i }"),
        "(iterate 1 (+ n 1) 2 i {i})"
    );
}

#[test]
fn labelled_loops_and_control() {
    assert_eq!(
        render("@outer while a {\n iterate 3 { break @outer if b\n continue } }"),
        "(@outer while a {(iterate _ 3 _ _ {(@outer break if b); (continue if _)})})"
    );
}

#[test]
fn unknown_label() {
    let parsed = parse_text("@a while x { break @b }");
    let error = parsed.output.error.expect("unknown label");
    assert_eq!(error.code, ErrorKind::UndefinedLoopIdentifier.code());
    assert_eq!(error.message(), "No enclosing loop is named '@b'");
}

#[test]
fn break_outside_loop() {
    assert_eq!(error_message("break"), "Unexpected 'break' outside of a loop");
}

#[test]
fn labels_do_not_reach_into_functions() {
    assert_eq!(
        error_message("@l while x { def f() { break @l } }"),
        "Unexpected 'break' outside of a loop"
    );
}

#[test]
fn label_needs_a_loop() {
    assert_eq!(
        error_message("@l x"),
        "Unexpected identifier 'x' after a loop label"
    );
}

// ─── Functions ───

#[test]
fn function_literals() {
    assert_eq!(
        render("def add(int a, float b :: 1.5) { return a + b if a }"),
        "(def add (int a _, float b 1.5) {(return (+ a b) if a)})"
    );
    assert_eq!(render("auto f :: def () { return }"), "(auto f :: (def _ () {(return _ if _)}))");
}

#[test]
fn parameter_requires_type() {
    assert_eq!(error_message("def f(x) {}"), "Expected a type, found identifier 'x'");
}

#[test]
fn yield_operators_in_signatures_warn() {
    let parsed = parse_text("def f(int a :> 1) { a }\nf(a :> 2)");
    assert!(parsed.output.error.is_none());
    let codes: Vec<_> = parsed.output.warnings.iter().map(|w| w.code).collect();
    assert_eq!(
        codes,
        vec![
            WarningKind::FuncArgRet.code(),
            WarningKind::FuncAssignOperator.code()
        ]
    );
}

// ─── Errors ───

#[test]
fn unclosed_brace_points_at_opener() {
    let parsed = parse_text("if a {\n print(1)\n");
    let error = parsed.output.error.expect("unclosed");
    assert_eq!(error.code, ErrorKind::UnmatchedBracket.code());
    assert_eq!(error.message(), "Bracket '{' has no matching '}'");
    assert_eq!(error.span.start.line, 0);
}

#[test]
fn stray_closer() {
    assert_eq!(error_message("a)"), "Bracket ')' has no matching '('");
}

#[test]
fn junk_after_statement() {
    assert_eq!(error_message("a b"), "Unexpected identifier 'b'");
}

#[test]
fn missing_operand() {
    assert_eq!(
        error_message("1 +\n2"),
        "Expected an expression, found newline"
    );
}

#[test]
fn failed_parse_still_has_a_block_root() {
    let parsed = parse_text("a\nb c");
    assert!(parsed.output.error.is_some());
    let ExprKind::Block(list) = parsed.output.arena.get_expr(parsed.output.root).kind else {
        panic!("root is not a block");
    };
    assert!(list.is_empty());
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 5_000;
    let text = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(render(&text), "1");
}
