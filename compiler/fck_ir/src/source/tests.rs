use super::*;

#[test]
fn lines_are_split_without_newlines() {
    let file = SourceFile::new("<test>", "int a :: 1\nprint(a)\n");
    assert_eq!(file.line(0), Some("int a :: 1"));
    assert_eq!(file.line(1), Some("print(a)"));
    assert_eq!(file.line(2), Some(""));
    assert_eq!(file.line(3), None);
}

#[test]
fn position_at_finds_line_and_column() {
    let file = SourceFile::new("<test>", "ab\ncdé\nf");
    assert_eq!(file.position_at(0), Position::new(0, 0, 0));
    assert_eq!(file.position_at(4), Position::new(4, 1, 1));
    // `f` sits after the two-byte `é`
    assert_eq!(file.position_at(8), Position::new(8, 2, 0));
    assert_eq!(file.position_at(100), Position::new(9, 2, 1));
}

#[test]
fn snippet_slices_the_span() {
    let file = SourceFile::new("<test>", "print(42)");
    let span = Span::new(file.position_at(6), file.position_at(8));
    assert_eq!(file.snippet(span), "42");
    assert_eq!(file.name(), "<test>");
}
