use typeline::bidi::Direction;
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
        area: Rect::new(Pt(0.0), Pt(0.0), Pt(400.0), Pt(24.0)),
    };

    let mut line = Line::new();
    line.properties.base_direction = Some(Direction::LeftToRight);
    line.push(mono("The title שלום עולם appears inline.", 12.0));

    let result = line.layout(&ctx).expect("line lays out");
    let placed = result.split.expect("line fits");

    println!("visual order, left to right:");
    for item in placed.items() {
        let Item::Text(run) = item else { continue };
        let rect = run.occupied().expect("placed runs have an area");
        let text: String = run.codepoints().filter_map(char::from_u32).collect();
        let direction = if run.reversed_ranges().is_empty() { "ltr" } else { "rtl" };
        println!("  {:>6.1} .. {:<6.1} {} {:?}", rect.x1.0, rect.x2.0, direction, text);
    }
}
