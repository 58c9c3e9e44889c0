//! End-to-end tests for the highlighting pipeline

use linelight::{BlockState, Highlighter, StyleTag, StyledSpan};
use pretty_assertions::assert_eq;

fn span(start: usize, len: usize, tag: StyleTag) -> StyledSpan {
    StyledSpan::new(start, len, tag)
}

#[test]
fn def_line_gets_keyword_name_self_and_comment_spans() {
    let hl = Highlighter::python().unwrap();
    let (spans, state) = hl.highlight_block("def foo(self):  # comment", BlockState::None);

    assert_eq!(
        spans,
        vec![
            span(0, 3, StyleTag::Keyword),
            span(4, 3, StyleTag::DefClass),
            span(7, 1, StyleTag::Brace),
            span(8, 4, StyleTag::SelfRef),
            span(12, 1, StyleTag::Brace),
            span(16, 9, StyleTag::Comment),
        ]
    );
    assert_eq!(state, BlockState::None);
}

#[test]
fn triple_quoted_string_is_one_span() {
    let hl = Highlighter::python().unwrap();
    let (spans, state) = hl.highlight_block("'''x'''", BlockState::None);
    assert_eq!(spans, vec![span(0, 7, StyleTag::String2)]);
    assert_eq!(state, BlockState::None);
}

#[test]
fn keyword_inside_string_is_not_styled_as_keyword() {
    let hl = Highlighter::python().unwrap();
    let (spans, _) = hl.highlight_block("x = \"class\"", BlockState::None);

    assert!(!spans.iter().any(|s| s.tag == StyleTag::Keyword));
    assert!(!spans.iter().any(|s| s.tag == StyleTag::DefClass));
    assert_eq!(
        spans,
        vec![span(2, 1, StyleTag::Operator), span(4, 7, StyleTag::String)]
    );
}

#[test]
fn escaped_quotes_do_not_split_the_string() {
    let hl = Highlighter::python().unwrap();
    let (spans, _) = hl.highlight_block(r#"s = "a \"b\" c" + 1"#, BlockState::None);
    assert!(spans.contains(&span(4, 11, StyleTag::String)));
    assert!(spans.contains(&span(18, 1, StyleTag::Number)));
}

#[test]
fn docstring_spans_two_lines() {
    let hl = Highlighter::python().unwrap();

    let (spans, state) = hl.highlight_block("x = '''start", BlockState::None);
    assert_eq!(
        spans,
        vec![span(2, 1, StyleTag::Operator), span(4, 8, StyleTag::String2)]
    );
    assert_eq!(state, BlockState::InTripleSingle);

    let (spans, state) = hl.highlight_block("end'''", state);
    assert_eq!(spans, vec![span(0, 6, StyleTag::String2)]);
    assert_eq!(state, BlockState::None);
}

#[test]
fn highlighting_is_idempotent() {
    let hl = Highlighter::python().unwrap();
    let text = "while x >= 0:  # count 'down'";
    let first = hl.highlight_block(text, BlockState::None);
    let second = hl.highlight_block(text, BlockState::None);
    assert_eq!(first, second);
}

#[test]
fn spans_never_overlap() {
    let hl = Highlighter::python().unwrap();
    let lines = [
        "def foo(self):  # comment",
        "x = '''a''' + \"b\" # c'd",
        "y = 0xFF + 3.14 - 'q # r'",
        "class C: pass",
        "'''''' + ''",
    ];
    for text in lines {
        let (spans, _) = hl.highlight_block(text, BlockState::None);
        let len = text.chars().count();
        for offset in 0..len {
            let covering = spans
                .iter()
                .filter(|s| s.start <= offset && offset < s.end())
                .count();
            assert!(covering <= 1, "offset {offset} of {text:?} covered {covering} times");
        }
        for s in &spans {
            assert!(s.end() <= len, "span {s:?} overruns {text:?}");
        }
    }
}

#[test]
fn unterminated_docstring_cascades_to_end_of_buffer() {
    let mut hl = Highlighter::python().unwrap();
    let doc = vec![
        "x = '''open".to_string(),
        "a = 1".to_string(),
        "b = 2".to_string(),
        "c = 3".to_string(),
        "d = 4".to_string(),
    ];

    hl.invalidate(0);
    let mut emitted = Vec::new();
    hl.process(&doc, |index, _| emitted.push(index));

    // Every block is reprocessed exactly once and the pass halts at the
    // end of the buffer.
    assert_eq!(emitted, vec![0, 1, 2, 3, 4]);
    for block in 0..5 {
        assert_eq!(hl.state_of(block), BlockState::InTripleSingle);
    }

    // Nothing left pending: a second pass does no work.
    emitted.clear();
    hl.process(&doc, |index, _| emitted.push(index));
    assert!(emitted.is_empty());
}

#[test]
fn continuation_lines_are_styled_as_docstring() {
    let mut hl = Highlighter::python().unwrap();
    let doc = vec![
        "s = '''first".to_string(),
        "def not_a_def(self):".to_string(),
        "last'''".to_string(),
    ];

    hl.invalidate(0);
    let mut all_spans = Vec::new();
    hl.process(&doc, |index, spans| all_spans.push((index, spans.to_vec())));

    // The middle line is string content from edge to edge; no keyword or
    // self spans leak through.
    let (_, middle) = &all_spans[1];
    assert_eq!(middle, &vec![span(0, 20, StyleTag::String2)]);

    let (_, last) = &all_spans[2];
    assert_eq!(last, &vec![span(0, 7, StyleTag::String2)]);
    assert_eq!(hl.state_of(2), BlockState::None);
}

#[test]
fn closing_a_docstring_reprocesses_only_until_state_settles() {
    let mut hl = Highlighter::python().unwrap();
    let mut doc = vec![
        "s = '''first".to_string(),
        "middle".to_string(),
        "last'''".to_string(),
        "x = 1".to_string(),
    ];

    hl.invalidate(0);
    hl.process(&doc, |_, _| {});
    assert_eq!(hl.state_of(3), BlockState::None);

    // Edit line 1 without changing its outgoing state: still inside the
    // docstring afterwards, so the cascade stops immediately.
    doc[1] = "middle edited".to_string();
    hl.notify_insertion(1, 1, 6, " edited");
    let mut emitted = Vec::new();
    hl.process(&doc, |index, _| emitted.push(index));
    assert_eq!(emitted, vec![1]);
}

#[test]
fn empty_lines_inside_a_docstring_stay_open() {
    let mut hl = Highlighter::python().unwrap();
    let doc = vec!["'''".to_string(), String::new(), "'''".to_string()];

    hl.invalidate(0);
    hl.process(&doc, |_, _| {});
    assert_eq!(hl.state_of(0), BlockState::InTripleSingle);
    assert_eq!(hl.state_of(1), BlockState::InTripleSingle);
    assert_eq!(hl.state_of(2), BlockState::None);
}

#[test]
fn inserting_a_closing_line_restyles_the_following_block() {
    let mut hl = Highlighter::python().unwrap();
    let mut doc = vec!["s = '''open".to_string(), "x = 1".to_string()];

    hl.invalidate(0);
    let mut passes = Vec::new();
    hl.process(&doc, |index, spans| passes.push((index, spans.to_vec())));
    // While the docstring is open, the second line is all string content.
    assert_eq!(passes[1].1, vec![span(0, 5, StyleTag::String2)]);
    assert_eq!(hl.state_of(1), BlockState::InTripleSingle);

    // Insert the closing delimiter between the two lines.
    doc.insert(1, "'''".to_string());
    hl.blocks_inserted(1, 1);
    let mut passes = Vec::new();
    hl.process(&doc, |index, spans| passes.push((index, spans.to_vec())));

    // The inserted line closes the docstring and the cascade reaches the
    // moved-down line, which is plain code again.
    let indices: Vec<usize> = passes.iter().map(|(index, _)| *index).collect();
    assert_eq!(indices, vec![1, 2]);
    assert_eq!(
        passes[1].1,
        vec![span(2, 1, StyleTag::Operator), span(4, 1, StyleTag::Number)]
    );
    assert_eq!(hl.state_of(1), BlockState::None);
    assert_eq!(hl.state_of(2), BlockState::None);
}

#[test]
fn swap_config_schedules_a_full_repass() {
    let mut hl = Highlighter::python().unwrap();
    let doc = vec!["def foo():".to_string(), "x = 1".to_string()];

    hl.invalidate(0);
    hl.process(&doc, |_, _| {});

    hl.swap_config(
        linelight::RuleSet::python().unwrap(),
        linelight::StyleRegistry::python_default(),
    )
    .unwrap();

    let mut emitted = Vec::new();
    hl.process(&doc, |index, _| emitted.push(index));
    assert_eq!(emitted, vec![0, 1]);
}
