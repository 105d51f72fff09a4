use typeline::*;

fn mono(text: &str, size: f32) -> TextRun {
    let glyphs = text
        .chars()
        .map(|ch| Glyph { codepoint: ch as u32, advance: Pt(size * 0.6) })
        .collect();
    TextRun::from_glyphs(glyphs, Pt(size * 0.8), Pt(-size * 0.2))
}

fn main() {
    let fonts = Fonts::new();
    let ctx = LayoutContext {
        fonts: &fonts,
        area: Rect::new(Pt(0.0), Pt(0.0), Pt(300.0), Pt(24.0)),
    };

    // name | right-aligned quantity | prices lined up on the decimal point
    let mut properties = LineProperties::default();
    properties.tab_stops.add(TabStop::new(Pt(80.0)));
    properties
        .tab_stops
        .add(TabStop::new(Pt(160.0)).with_alignment(TabAlignment::Right));
    properties.tab_stops.add(
        TabStop::new(Pt(220.0))
            .with_anchor('.')
            .with_leader(TabLeader::Dotted),
    );

    let rows = [
        ("widgets", "12", "3.50"),
        ("grommets", "7", "11.25"),
        ("flanges", "1038", "0.99"),
    ];

    for (name, quantity, price) in rows {
        let mut line = Line::with_properties(properties.clone());
        line.push(mono(name, 12.0));
        line.push(TabItem::new());
        line.push(mono(quantity, 12.0));
        line.push(TabItem::new());
        line.push(mono(price, 12.0));

        let result = line.layout(&ctx).expect("row lays out");
        let placed = result.split.expect("row fits");
        for item in placed.items() {
            let rect = item.occupied().expect("placed items have an area");
            match item {
                Item::Text(_) => print!("[{:.0}..{:.0}] ", rect.x1.0, rect.x2.0),
                Item::Tab(tab) => print!("tab({:.0}, {:?}) ", tab.width().0, tab.leader()),
                Item::Image(_) => {}
            }
        }
        println!();
    }
}
