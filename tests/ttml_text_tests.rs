use ttml_lyric_text::{
    Alignment, LineKind, TtmlTextError, TtmlTextOptions, TtmlTextOptionsBuilder, TtmlTime,
    is_pure_center, parse_marked_text, parse_ttml, ttml_to_text,
};

const REAL_WORLD_TTML: &str = include_str!("test_data/real_world.ttml");

fn document(head: &str, body: &str) -> String {
    format!(
        r#"<tt xmlns="http://www.w3.org/ns/ttml" xmlns:itunes="http://music.apple.com/lyric-ttml-internal" xmlns:ttm="http://www.w3.org/ns/ttml#metadata"><head>{head}</head><body>{body}</body></tt>"#
    )
}

fn render(content: &str) -> String {
    ttml_to_text(content, &TtmlTextOptions::default()).unwrap()
}

#[test]
fn test_real_world_render() {
    let text = render(REAL_WORLD_TTML);
    insta::assert_snapshot!(text, @r"
    [:_:]作词：佐藤、鈴木
    [-]Verse
    [:-]夜明けが来る
    [:_]黎明来临
    [-:]一緒に歌おう
    [_:](ああ)
    [_:]我们一起唱
    [_:](啊啊)
    [-]Chorus
    [:-]光の 中へ
    [:_]向着光
    [-:]もう一度
    [_:]再一次
    ");
}

#[test]
fn test_real_world_structure() {
    let document = parse_ttml(REAL_WORLD_TTML, &TtmlTextOptions::default()).unwrap();

    assert_eq!(document.language(), "ja");
    assert!(document.has_duet());
    assert_eq!(document.selected_language(), Some("zh-Hans"));
    assert_eq!(document.songwriters(), ["佐藤", "鈴木"]);

    let names: Vec<&str> = document.parts().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Verse", "Chorus"]);
    let total: usize = document.parts().iter().map(|p| p.count).sum();
    assert_eq!(total, document.lines().len());

    let keys: Vec<&str> = document.lines().iter().map(|l| l.key()).collect();
    assert_eq!(keys, ["L1", "L2", "L3", "L4"]);

    let background = document.lines()[1].background().unwrap();
    assert_eq!(background.original_text(), "ああ");
    assert_eq!(background.translation(), Some("啊啊"));
    assert!(background.is_duet());

    assert_eq!(document.warnings().len(), 1);
    assert!(document.warnings()[0].contains("L99"));
}

#[test]
fn test_single_verse_scenario() {
    let content = document(
        "",
        r#"<div itunes:song-part="Verse"><p itunes:key="L1">Hello</p></div>"#,
    );
    assert_eq!(render(&content), "[-]Verse\n[:-:]Hello");
}

#[test]
fn test_container_translation_splits_background() {
    let content = document(
        r#"<translation xml:lang="zh-Hans"><text for="L1">你好 (背景)</text></translation>"#,
        r#"<div><p itunes:key="L1">Hello<span ttm:role="x-bg">(bg)</span></p></div>"#,
    );
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();
    let line = &document.lines()[0];

    assert_eq!(line.original_text(), "Hello");
    assert_eq!(line.translation(), Some("你好"));
    let background = line.background().unwrap();
    assert_eq!(background.original_text(), "bg");
    assert_eq!(background.translation(), Some("背景"));
}

#[test]
fn test_truncated_input_is_malformed_xml() {
    let err = parse_ttml("<tt><body></body>", &TtmlTextOptions::default()).unwrap_err();
    assert!(matches!(err, TtmlTextError::MalformedXml { .. }), "{err:?}");
}

#[test]
fn test_missing_body_is_malformed_structure() {
    let err = parse_ttml("<tt><head></head></tt>", &TtmlTextOptions::default()).unwrap_err();
    assert!(matches!(err, TtmlTextError::MalformedStructure(_)), "{err:?}");
}

#[test]
fn test_other_malformed_inputs() {
    let options = TtmlTextOptions::default();
    for content in [
        "",
        "   \n  ",
        "<tt><body></div></tt>",
        "<tt><body/></tt>trailing",
        "<tt><body/></tt><tt><body/></tt>",
    ] {
        let err = parse_ttml(content, &options).unwrap_err();
        assert!(
            matches!(err, TtmlTextError::MalformedXml { .. }),
            "{content:?} -> {err:?}"
        );
    }
}

#[test]
fn test_render_is_idempotent() {
    let document = parse_ttml(REAL_WORLD_TTML, &TtmlTextOptions::default()).unwrap();
    assert_eq!(document.render(), document.render());
    assert_eq!(document.to_string(), document.render());
}

#[test]
fn test_inline_translation_language_selection() {
    let content = document(
        "",
        r#"<div><p>Hello<span ttm:role="x-translation" xml:lang="en">Hi</span><span ttm:role="x-translation" xml:lang="zh-Hant">妳好</span><span ttm:role="x-translation" xml:lang="ja">やあ</span></p></div>"#,
    );
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();
    assert_eq!(document.selected_language(), Some("zh-Hant"));
    assert_eq!(document.render(), "[-]\n[:-:]Hello\n[:_:]妳好");
}

#[test]
fn test_missing_translation_language_uses_default() {
    let content = document(
        "",
        r#"<div><p>Hello<span ttm:role="x-translation">Salut</span></p></div>"#,
    );
    let options = TtmlTextOptionsBuilder::default()
        .default_language("fr")
        .build()
        .unwrap();
    let document = parse_ttml(&content, &options).unwrap();

    assert_eq!(document.language(), "fr");
    assert_eq!(document.selected_language(), Some("fr"));
    assert_eq!(document.lines()[0].translation(), Some("Salut"));
}

#[test]
fn test_no_translations() {
    let content = document("", "<div><p>Hello</p></div>");
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();
    assert_eq!(document.selected_language(), None);
    assert_eq!(document.lines()[0].translation(), None);
}

#[test]
fn test_songwriter_options() {
    let content = document(
        r#"<metadata><songwriter>Paul</songwriter><meta key="Songwriter">John</meta><meta key="composer" value="George"/></metadata>"#,
        "<div><p>Hello</p></div>",
    );

    let first_seen = render(&content);
    assert_eq!(first_seen, "[:_:]Songwriters: Paul, John\n[-]\n[:-:]Hello");

    let sorted = TtmlTextOptions {
        sort_songwriters: true,
        ..Default::default()
    };
    assert_eq!(
        ttml_to_text(&content, &sorted).unwrap(),
        "[:_:]Songwriters: John, Paul\n[-]\n[:-:]Hello"
    );

    let without = TtmlTextOptions {
        include_songwriters: false,
        ..Default::default()
    };
    let document = parse_ttml(&content, &without).unwrap();
    assert!(document.songwriters().is_empty());
    assert_eq!(document.render(), "[-]\n[:-:]Hello");
}

#[test]
fn test_nested_division_reopens_outer_part() {
    let content = document(
        "",
        r#"<div itunes:song-part="Outer"><p>A</p><div itunes:song-part="Inner"><p>B</p></div><p>C</p></div><div itunes:songPart="Outro"></div>"#,
    );
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();

    let parts: Vec<(&str, usize)> = document
        .parts()
        .iter()
        .map(|p| (p.name.as_str(), p.count))
        .collect();
    assert_eq!(
        parts,
        [("Outer", 1), ("Inner", 1), ("Outer", 1), ("Outro", 0)]
    );
    assert_eq!(
        document.render(),
        "[-]Outer\n[:-:]A\n[-]Inner\n[:-:]B\n[-]Outer\n[:-:]C\n[-]Outro"
    );
}

#[test]
fn test_line_outside_division_is_discarded() {
    let content = document("", "<p>stray</p><div><p>kept</p></div>");
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();

    assert_eq!(document.lines().len(), 1);
    assert_eq!(document.lines()[0].original_text(), "kept");
    assert_eq!(document.lines()[0].key(), "L1");
    assert_eq!(document.warnings().len(), 1);
}

#[test]
fn test_synthesized_keys_receive_container_translations() {
    let content = document(
        r#"<translation><text for="L2">第二行</text></translation>"#,
        "<div><p>one</p><p>two</p></div>",
    );
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();
    assert_eq!(document.lines()[1].key(), "L2");
    assert_eq!(document.lines()[1].translation(), Some("第二行"));
    assert_eq!(document.lines()[0].translation(), None);
}

#[test]
fn test_entities_and_unknown_roles() {
    let content = document(
        "",
        r#"<div><p>Rock &amp; Roll &#x2764;&unknown;<span ttm:role="x-roman">ro</span>!</p></div>"#,
    );
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();
    assert_eq!(document.lines()[0].original_text(), "Rock & Roll \u{2764}!");
    assert_eq!(document.warnings().len(), 1);
}

#[test]
fn test_plain_child_contributes_direct_text_only() {
    let content = document(
        "",
        "<div><p>a<span>b<span>hidden</span>c</span>d</p></div>",
    );
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();
    assert_eq!(document.lines()[0].original_text(), "abcd");
}

#[test]
fn test_normalize_whitespace_option() {
    let content = document(
        "",
        "<div><p>  Hello \n   world <span ttm:role=\"x-bg\"> ( ooh \n ) </span></p></div>",
    );
    let options = TtmlTextOptions {
        normalize_whitespace: true,
        ..Default::default()
    };
    let document = parse_ttml(&content, &options).unwrap();
    let line = &document.lines()[0];
    assert_eq!(line.original_text(), "Hello world");
    assert_eq!(line.background().unwrap().original_text(), "ooh");
}

#[test]
fn test_background_ignores_its_own_agent() {
    let content = document(
        "",
        r#"<div><p ttm:agent="v2">A<span ttm:role="x-bg" ttm:agent="v1">(a)</span></p><p ttm:agent="v1">B<span ttm:role="x-bg" ttm:agent="v2">(b)</span></p></div>"#,
    );
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();

    let duet_background = document.lines()[0].background().unwrap();
    assert!(duet_background.is_duet());
    let lead_background = document.lines()[1].background().unwrap();
    assert!(!lead_background.is_duet());
    assert_eq!(document.render(), "[-]\n[-:]A\n[_:](a)\n[:-]B\n[:_](b)");
}

#[test]
fn test_multiline_background_is_unwrapped() {
    let content = document(
        "",
        "<div><p>Hello<span ttm:role=\"x-bg\">(multi\nline)</span></p></div>",
    );
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();
    let background = document.lines()[0].background().unwrap();
    assert_eq!(background.original_text(), "multi\nline");
}

#[test]
fn test_inline_translation_collects_direct_text() {
    let content = document(
        "",
        r#"<div><p>Hello<span ttm:role="x-translation" xml:lang="zh-Hans">x<span>y</span>z</span></p></div>"#,
    );
    let document = parse_ttml(&content, &TtmlTextOptions::default()).unwrap();
    assert_eq!(document.lines()[0].translation(), Some("xz"));
}

#[test]
fn test_unprefixed_agent_and_undeclared_prefixes() {
    let content = "<tt><body><div><p agent=\"v2\">A</p><p itunes:key=\"X\" ttm:agent=\"v1\">B</p></div></body></tt>";
    let document = parse_ttml(content, &TtmlTextOptions::default()).unwrap();

    assert!(document.has_duet());
    assert_eq!(document.lines()[1].key(), "X");
    assert_eq!(document.render(), "[-]\n[-:]A\n[:-]B");
}

#[test]
fn test_rendered_text_reads_back() {
    let text = render(REAL_WORLD_TTML);
    let marked = parse_marked_text(&text);

    assert_eq!(marked.len(), text.lines().count());
    assert_eq!(marked[1].kind, LineKind::Section);
    assert_eq!(marked[1].text, "Verse");
    let LineKind::Lyric(marker) = marked[4].kind else {
        panic!("expected a lyric row, got {:?}", marked[4]);
    };
    assert_eq!(marker.alignment, Alignment::Other);
    assert!(!marker.secondary);
    assert!(!is_pure_center(&marked));

    let centered = parse_marked_text(&render(&document("", "<div><p>Hello</p></div>")));
    assert!(is_pure_center(&centered));
}

#[test]
fn test_time_difference_is_symmetric() {
    let a: TtmlTime = "1:02.5".parse().unwrap();
    let b: TtmlTime = "00:59.250".parse().unwrap();
    assert_eq!(a - b, b - a);
    assert_eq!(a - b, 3_250);
    assert!(a > b);
}
