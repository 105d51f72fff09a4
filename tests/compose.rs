use typeline::bidi::Direction;
use typeline::*;

fn run(text: &str, advance: f32) -> TextRun {
    let glyphs = text
        .chars()
        .map(|ch| Glyph { codepoint: ch as u32, advance: Pt(advance) })
        .collect();
    TextRun::from_glyphs(glyphs, Pt(8.0), Pt(-2.0))
}

fn text_of(item: &Item) -> String {
    let Item::Text(run) = item else { panic!("expected a text item") };
    run.codepoints().map(|cp| char::from_u32(cp).unwrap()).collect()
}

fn compose(line: Line, width: f32) -> LineLayoutResult {
    let fonts = Fonts::new();
    let ctx = LayoutContext {
        fonts: &fonts,
        area: Rect::new(Pt(0.0), Pt(0.0), Pt(width), Pt(100.0)),
    };
    line.layout(&ctx).unwrap()
}

#[test]
fn explicit_stop_positions_the_next_run() {
    let mut line = Line::new();
    for position in [10.0, 30.0, 50.0] {
        line.properties.tab_stops.add(TabStop::new(Pt(position)));
    }
    line.push(run("a", 5.0));
    line.push(TabItem::new());
    line.push(run("b", 5.0));
    let result = compose(line, 100.0);
    assert_eq!(result.status, LayoutStatus::Full);

    let placed = result.split.unwrap();
    let Item::Tab(tab) = &placed.items()[1] else { panic!("expected a tab") };
    assert_eq!(tab.width(), Pt(5.0));
    assert_eq!(placed.items()[2].occupied().unwrap().x1, Pt(10.0));
}

#[test]
fn default_interval_positions_the_next_run() {
    let mut line = Line::new();
    line.properties.tab_default = Pt(8.0);
    line.push(run("a", 5.0));
    line.push(TabItem::new());
    line.push(run("b", 5.0));
    let result = compose(line, 100.0);

    let placed = result.split.unwrap();
    let Item::Tab(tab) = &placed.items()[1] else { panic!("expected a tab") };
    assert_eq!(tab.width(), Pt(3.0));
    assert_eq!(placed.items()[2].occupied().unwrap().x1, Pt(8.0));
}

#[test]
fn right_aligned_stop_ends_content_at_the_stop() {
    let mut line = Line::new();
    line.properties
        .tab_stops
        .add(TabStop::new(Pt(60.0)).with_alignment(TabAlignment::Right));
    line.push(TabItem::new());
    line.push(run("abcd", 10.0));
    let result = compose(line, 100.0);

    let placed = result.split.unwrap();
    let text = placed.items()[1].occupied().unwrap();
    assert_eq!(text.x1, Pt(20.0));
    assert_eq!(text.x2, Pt(60.0));
}

#[test]
fn centered_stop_straddles_the_stop() {
    let mut line = Line::new();
    line.properties
        .tab_stops
        .add(TabStop::new(Pt(50.0)).with_alignment(TabAlignment::Center));
    line.push(TabItem::new());
    line.push(run("ab", 10.0));
    let result = compose(line, 100.0);

    let text = result.split.unwrap().items()[1].occupied().unwrap();
    assert_eq!(text.x1, Pt(40.0));
    assert_eq!(text.x2, Pt(60.0));
}

#[test]
fn anchor_stop_places_the_anchor_at_the_stop() {
    let mut line = Line::new();
    line.properties.tab_stops.add(TabStop::new(Pt(50.0)).with_anchor('.'));
    line.push(TabItem::new());
    line.push(run("12.5", 10.0));
    let result = compose(line, 100.0);

    let text = result.split.unwrap().items()[1].occupied().unwrap();
    // two digits sit before the stop, the anchor begins at it
    assert_eq!(text.x1, Pt(30.0));
    assert_eq!(text.x2, Pt(70.0));
}

#[test]
fn consecutive_tabs_materialize_the_first() {
    let mut line = Line::new();
    line.properties
        .tab_stops
        .add(TabStop::new(Pt(30.0)).with_alignment(TabAlignment::Right));
    line.properties
        .tab_stops
        .add(TabStop::new(Pt(60.0)).with_alignment(TabAlignment::Right));
    line.push(TabItem::new());
    line.push(TabItem::new());
    line.push(run("ab", 10.0));
    let result = compose(line, 100.0);

    let placed = result.split.unwrap();
    let Item::Tab(first) = &placed.items()[0] else { panic!("expected a tab") };
    assert_eq!(first.width(), Pt(30.0));
    assert_eq!(first.occupied().unwrap().x1, Pt(0.0));
    let Item::Tab(second) = &placed.items()[1] else { panic!("expected a tab") };
    assert_eq!(second.width(), Pt(10.0));
    let text = placed.items()[2].occupied().unwrap();
    assert_eq!(text.x1, Pt(40.0));
    assert_eq!(text.x2, Pt(60.0));
}

#[test]
fn trailing_tab_keeps_its_provisional_width() {
    let mut line = Line::new();
    line.properties
        .tab_stops
        .add(TabStop::new(Pt(60.0)).with_alignment(TabAlignment::Right));
    line.push(run("ab", 10.0));
    line.push(TabItem::new());
    let result = compose(line, 100.0);
    assert_eq!(result.status, LayoutStatus::Full);

    let placed = result.split.unwrap();
    let Item::Tab(tab) = &placed.items()[1] else { panic!("expected a tab") };
    assert_eq!(tab.width(), Pt(40.0));
    assert_eq!(result.occupied.x2, Pt(60.0));
}

#[test]
fn tab_leader_survives_resolution() {
    let mut line = Line::new();
    line.properties.tab_stops.add(
        TabStop::new(Pt(60.0))
            .with_alignment(TabAlignment::Right)
            .with_leader(TabLeader::Dotted),
    );
    line.push(TabItem::new());
    line.push(run("ab", 10.0));
    let result = compose(line, 100.0);

    let placed = result.split.unwrap();
    let Item::Tab(tab) = &placed.items()[0] else { panic!("expected a tab") };
    assert_eq!(tab.leader(), TabLeader::Dotted);
}

#[test]
fn justification_fills_the_width_exactly() {
    let mut line = Line::new();
    line.push(run("aa bb", 10.0));
    let result = compose(line, 200.0);
    let mut placed = result.split.unwrap();
    assert_eq!(placed.occupied().unwrap().width(), Pt(50.0));

    placed.justify(Pt(100.0));
    assert_eq!(placed.occupied().unwrap().width(), Pt(100.0));
    let last = placed.items().last().unwrap().occupied().unwrap();
    assert!((last.x2.0 - 100.0).abs() < 1e-3);
}

#[test]
fn justification_spreads_across_items() {
    let mut line = Line::new();
    line.push(run("aa ", 10.0));
    line.push(run("bb", 10.0));
    let result = compose(line, 200.0);
    let mut placed = result.split.unwrap();

    placed.justify(Pt(120.0));
    assert_eq!(placed.occupied().unwrap().width(), Pt(120.0));
    let first = placed.items()[0].occupied().unwrap();
    let second = placed.items()[1].occupied().unwrap();
    // the second run starts where the widened first run ends
    assert!((second.x1.0 - first.x2.0).abs() < 1e-3);
    assert!((second.x2.0 - 120.0).abs() < 1e-3);
}

#[test]
fn justification_without_stretch_room_is_a_noop() {
    let mut line = Line::new();
    line.push(run("a", 10.0));
    let result = compose(line, 100.0);
    let mut placed = result.split.unwrap();

    placed.justify(Pt(100.0));
    // one base character and no spaces leaves nothing to stretch
    assert_eq!(placed.occupied().unwrap().width(), Pt(10.0));
}

#[test]
fn latin_text_keeps_logical_order() {
    let mut line = Line::new();
    line.properties.base_direction = Some(Direction::LeftToRight);
    line.push(run("ab cd", 10.0));
    let result = compose(line, 100.0);

    let placed = result.split.unwrap();
    assert_eq!(placed.items().len(), 1);
    let Item::Text(text) = &placed.items()[0] else { panic!("expected text") };
    assert!(text.reversed_ranges().is_empty());
}

#[test]
fn hebrew_text_is_marked_reversed() {
    let mut line = Line::new();
    line.properties.base_direction = Some(Direction::RightToLeft);
    line.push(run("אבג", 10.0));
    let result = compose(line, 100.0);

    let placed = result.split.unwrap();
    assert_eq!(placed.items().len(), 1);
    let Item::Text(text) = &placed.items()[0] else { panic!("expected text") };
    assert_eq!(text.reversed_ranges(), &[ReversedRange { start: 0, end: 3 }]);
    assert_eq!(text.occupied().unwrap().x1, Pt(0.0));
}

#[test]
fn mixed_direction_text_regroups_into_visual_runs() {
    let mut line = Line::new();
    line.properties.base_direction = Some(Direction::LeftToRight);
    line.push(run("ab אבג cd", 10.0));
    let result = compose(line, 200.0);

    let placed = result.split.unwrap();
    assert_eq!(placed.items().len(), 3);
    assert_eq!(text_of(&placed.items()[0]), "ab ");
    assert_eq!(text_of(&placed.items()[1]), "אבג");
    assert_eq!(text_of(&placed.items()[2]), " cd");

    let Item::Text(middle) = &placed.items()[1] else { panic!("expected text") };
    assert_eq!(middle.reversed_ranges(), &[ReversedRange { start: 0, end: 3 }]);

    // visual placement is contiguous left to right
    let mut x = Pt(0.0);
    for item in placed.items() {
        let rect = item.occupied().unwrap();
        assert!((rect.x1.0 - x.0).abs() < 1e-3);
        x = rect.x2;
    }
}

#[test]
fn bidi_levels_carry_into_the_overflow_line() {
    let fonts = Fonts::new();
    let ctx = LayoutContext {
        fonts: &fonts,
        area: Rect::new(Pt(0.0), Pt(0.0), Pt(35.0), Pt(100.0)),
    };

    let mut line = Line::new();
    line.properties.base_direction = Some(Direction::RightToLeft);
    line.push(run("אבגדהו", 10.0));
    let result = line.layout(&ctx).unwrap();
    assert_eq!(result.status, LayoutStatus::Partial);

    let placed = result.split.unwrap();
    let Item::Text(head) = &placed.items()[0] else { panic!("expected text") };
    assert_eq!(head.reversed_ranges(), &[ReversedRange { start: 0, end: 3 }]);

    let overflow = result.overflow.unwrap().layout(&ctx).unwrap();
    assert_eq!(overflow.status, LayoutStatus::Full);
    let rest = overflow.split.unwrap();
    let Item::Text(tail) = &rest.items()[0] else { panic!("expected text") };
    assert_eq!(tail.line_length(), 3);
    assert_eq!(tail.reversed_ranges(), &[ReversedRange { start: 0, end: 3 }]);
}

#[test]
fn whole_words_move_to_the_next_line() {
    let mut line = Line::new();
    line.push(run("aaa ", 10.0));
    line.push(run("bbbbb", 10.0));
    let result = compose(line, 60.0);
    assert_eq!(result.status, LayoutStatus::Partial);

    // the second word would fit on a line of its own, so it is not split
    let placed = result.split.unwrap();
    assert_eq!(placed.length(), 3);
    assert_eq!(result.overflow.unwrap().length(), 5);
}

#[test]
fn unbreakable_text_splits_where_it_must() {
    let fonts = Fonts::new();
    let ctx = LayoutContext {
        fonts: &fonts,
        area: Rect::new(Pt(0.0), Pt(0.0), Pt(70.0), Pt(100.0)),
    };

    let mut line = Line::new();
    line.push(run(&"a".repeat(20), 10.0));

    let mut placed_glyphs = 0;
    let mut widths = Vec::new();
    let mut next = Some(line);
    while let Some(line) = next.take() {
        let result = line.layout(&ctx).unwrap();
        let placed = result.split.expect("every pass places something");
        placed_glyphs += placed.length();
        widths.push(placed.occupied().unwrap().width());
        next = result.overflow;
    }
    assert_eq!(placed_glyphs, 20);
    assert_eq!(widths, vec![Pt(70.0), Pt(70.0), Pt(60.0)]);
}

#[test]
fn oversized_image_first_in_line_lays_out_nothing() {
    let mut line = Line::new();
    line.push(ImageItem::with_size(Pt(200.0), Pt(20.0)));
    line.push(run("ab", 10.0));
    let result = compose(line, 100.0);
    assert_eq!(result.status, LayoutStatus::Nothing);
    assert!(result.split.is_none());

    // the image comes back scaled to the area, ready to fit a line of its own
    let overflow = result.overflow.unwrap();
    assert_eq!(overflow.items().len(), 2);
    let Item::Image(image) = &overflow.items()[0] else { panic!("expected an image") };
    assert_eq!(image.width(), Pt(100.0));
    assert_eq!(image.height(), Pt(10.0));
}

#[test]
fn flowing_a_paragraph_conserves_the_words() {
    let fonts = Fonts::new();
    let ctx = LayoutContext {
        fonts: &fonts,
        area: Rect::new(Pt(0.0), Pt(0.0), Pt(300.0), Pt(100.0)),
    };

    let text = lipsum::lipsum(40);
    let original: Vec<u32> = text.chars().map(|ch| ch as u32).collect();

    let mut line = Line::new();
    line.push(run(&text, 10.0));

    let mut placed_codepoints = Vec::new();
    let mut next = Some(line);
    while let Some(line) = next.take() {
        let result = line.layout(&ctx).unwrap();
        let placed = result.split.expect("every pass places something");
        let rect = result.occupied;
        assert!(rect.width().0 <= 300.0 + 1e-3);
        for item in placed.items() {
            if let Item::Text(run) = item {
                placed_codepoints.extend(run.codepoints());
            }
        }
        next = result.overflow;
    }

    // every glyph survives the flow except spaces consumed at line breaks
    let mut placed = placed_codepoints.iter();
    let mut cursor = placed.next();
    for &cp in &original {
        match cursor {
            Some(&p) if p == cp => cursor = placed.next(),
            _ => assert_eq!(cp, ' ' as u32, "lost a non-space codepoint"),
        }
    }
    assert!(cursor.is_none());
}
