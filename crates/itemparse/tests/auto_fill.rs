use insta::assert_snapshot;
use itemparse::app::render::{Emit, OutputFormat, RenderOptions, render, render_items};
use itemparse::app::sequencer::{WrapFallback, WrapSource};
use itemparse::domain::model::HighlightSet;
use itemparse::{
    AutoFillOptions, AutoFiller, EditSession, ItemRecord, ParseError, Role, Span, reduce_to_items,
    run_auto_fill,
};

fn item(title: Option<&str>, body: Option<&str>) -> ItemRecord {
    ItemRecord {
        title: title.map(str::to_owned),
        body: body.map(str::to_owned),
    }
}

fn assert_partition(text: &str, titles: &[Span], bodies: &[Span]) {
    let len = text.chars().count();
    let mut all: Vec<Span> = titles.iter().chain(bodies).copied().collect();
    all.sort_by_key(|span| span.location);
    for span in &all {
        assert!(!span.is_empty(), "empty span {span}");
        assert!(span.end() <= len, "span {span} past end {len}");
    }
    for pair in all.windows(2) {
        assert!(pair[0].end() <= pair[1].location, "{} overlaps {}", pair[0], pair[1]);
    }
}

#[test]
fn title_and_body_example_extends_to_every_line() {
    let text = "Apple: a fruit\nCarrot: a vegetable";
    let result = run_auto_fill(text, &[Span::new(0, 5)], &[Span::new(7, 7)]).unwrap();

    assert_eq!(
        result.items(),
        vec![
            item(Some("Apple"), Some("a fruit")),
            item(Some("Carrot"), Some("a vegetable")),
        ]
    );
    assert_eq!(result.report.wrap(), Some(WrapSource::TrailingGap));
    assert_partition(&result.text, &result.title_spans, &result.body_spans);
}

#[test]
fn single_body_example_covers_the_text() {
    let text = "Just one block of text";
    let result = run_auto_fill(text, &[], &[Span::new(0, 22)]).unwrap();

    assert_eq!(result.text, text);
    assert_eq!(result.body_spans, vec![Span::new(0, 22)]);
    assert!(result.title_spans.is_empty());
    assert_eq!(result.items(), vec![item(None, Some(text))]);
}

#[test]
fn no_examples_leaves_the_session_alone() {
    let mut session = EditSession::new("Apple: a fruit");
    let before = session.snapshot();

    let err = session.auto_fill(&AutoFiller::default()).unwrap_err();

    assert_eq!(err, ParseError::DegenerateParse);
    assert_eq!(session.snapshot(), before);
}

#[test]
fn repeated_titles_each_start_a_record() {
    let text = "aaaa bbbb cccc dddd";
    let titles = [Span::new(0, 4), Span::new(10, 4), Span::new(15, 4)];
    let bodies = [Span::new(5, 4)];

    assert_eq!(
        reduce_to_items(text, &titles, &bodies),
        vec![
            item(Some("aaaa"), Some("bbbb")),
            item(Some("cccc"), None),
            item(Some("dddd"), None),
        ]
    );
}

#[test]
fn complete_cycle_examples_pair_counters() {
    let text = "Apple: sweet | tree\nPear: juicy | bush\nFig: soft | vine\nPlum: tart | tree";
    let result = run_auto_fill(
        text,
        &[Span::new(0, 5)],
        &[Span::new(7, 5), Span::new(15, 4)],
    )
    .unwrap();

    assert_eq!(result.report.sequence.patterns, 3);
    assert_eq!(result.report.wrap(), Some(WrapSource::TrailingGap));
    assert_eq!(result.title_spans.len(), 4);
    assert_eq!(result.body_spans.len(), 8);
    assert_partition(&result.text, &result.title_spans, &result.body_spans);
}

#[test]
fn first_delimiter_policy_reuses_the_pair_separator() {
    let options = AutoFillOptions {
        wrap_fallback: WrapFallback::FirstDelimiter,
        ..AutoFillOptions::default()
    };
    let text = "Apple: a fruit\nCarrot: a vegetable";
    let result = AutoFiller::new(options)
        .run(text, &[Span::new(0, 5)], &[Span::new(7, 7)])
        .unwrap();

    assert_eq!(result.report.wrap(), Some(WrapSource::FirstDelimiter));
    assert_eq!(
        result.items(),
        vec![
            item(Some("Apple"), Some("a fruit\nCarrot")),
            item(Some("a vegetable"), None),
        ]
    );
}

#[test]
fn strict_policy_reports_missing_wrap() {
    let options = AutoFillOptions {
        wrap_fallback: WrapFallback::Strict,
        ..AutoFillOptions::default()
    };
    let err = AutoFiller::new(options)
        .run("Apple: a fruit\nCarrot: a vegetable", &[Span::new(0, 5)], &[Span::new(7, 7)])
        .unwrap_err();
    assert_eq!(
        err,
        ParseError::WrapDelimiterUnavailable {
            from: Role::Body,
            to: Role::Title,
        }
    );
}

#[test]
fn indented_input_is_trimmed_and_partitioned() {
    let text = "  Rust: systems language\n  Go: cloud language  \n\tZig: small language\n";
    let result = run_auto_fill(text, &[Span::new(2, 4)], &[Span::new(8, 16)]).unwrap();

    assert_eq!(
        result.text,
        "Rust: systems language\nGo: cloud language\nZig: small language\n"
    );
    assert_partition(&result.text, &result.title_spans, &result.body_spans);
    assert_snapshot!(render_items(&result.items(), OutputFormat::Plain).unwrap(), @r"
title: Rust
body: systems language

title: Go
body: cloud language

title: Zig
body: small language
");
}

#[test]
fn session_flow_renders_json() {
    let mut session = EditSession::new("Apple: a fruit\nCarrot: a vegetable");
    assert!(session.add_highlight(Role::Title, Span::new(0, 5)));
    assert!(session.add_highlight(Role::Body, Span::new(7, 7)));
    session.auto_fill(&AutoFiller::default()).unwrap();

    let highlights = HighlightSet::new(
        session.title_spans().to_vec(),
        session.body_spans().to_vec(),
    );
    let options = RenderOptions {
        format: OutputFormat::Json,
        emit: Emit::Items,
    };
    assert_snapshot!(render(session.text(), &highlights, &options).unwrap(), @r#"
[
  {
    "title": "Apple",
    "body": "a fruit"
  },
  {
    "title": "Carrot",
    "body": "a vegetable"
  }
]
"#);
}

#[test]
fn accented_titles_keep_their_first_letter() {
    let text = "Apple: a fruit\nÉclair: a pastry";
    let result = run_auto_fill(text, &[Span::new(0, 5)], &[Span::new(7, 7)]).unwrap();

    assert_eq!(
        result.items(),
        vec![
            item(Some("Apple"), Some("a fruit")),
            item(Some("Éclair"), Some("a pastry")),
        ]
    );
}

#[test]
fn bullet_prefixed_list_with_accents() {
    let text = "• Crème brûlée: a custard\n• Éclair: a pastry\n• Madeleine: a small cake";
    let result = run_auto_fill(text, &[Span::new(0, 14)], &[Span::new(16, 9)]).unwrap();

    assert_eq!(result.report.wrap(), Some(WrapSource::TrailingGap));
    assert_partition(&result.text, &result.title_spans, &result.body_spans);
    assert_eq!(
        result.items(),
        vec![
            item(Some("• Crème brûlée"), Some("a custard")),
            item(Some("• Éclair"), Some("a pastry")),
            item(Some("• Madeleine"), Some("a small cake")),
        ]
    );
}
