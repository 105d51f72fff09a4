use typeline::*;

// a monospaced stand-in for shaping; real applications shape against a Font
fn mono(text: &str, size: f32) -> TextRun {
    let glyphs = text
        .chars()
        .map(|ch| Glyph { codepoint: ch as u32, advance: Pt(size * 0.6) })
        .collect();
    TextRun::from_glyphs(glyphs, Pt(size * 0.8), Pt(-size * 0.2))
}

fn text_of(run: &TextRun) -> String {
    run.codepoints().filter_map(char::from_u32).collect()
}

fn main() {
    let fonts = Fonts::new();
    let ctx = LayoutContext {
        fonts: &fonts,
        area: Rect::new(Pt(0.0), Pt(0.0), Pt(240.0), Pt(24.0)),
    };

    let mut line = Line::new();
    line.push(mono(&lipsum::lipsum(24), 12.0));

    let mut next = Some(line);
    while let Some(line) = next.take() {
        let result = line.layout(&ctx).expect("line lays out");
        if let Some(mut placed) = result.split {
            // justify every line that broke because it ran out of room
            if result.status == LayoutStatus::Partial && !result.forced_by_newline {
                placed.justify(Pt(240.0));
            }
            for item in placed.items() {
                if let Item::Text(run) = item {
                    let rect = run.occupied().expect("placed runs have an area");
                    println!("{:>8.2} .. {:<8.2} {:?}", rect.x1.0, rect.x2.0, text_of(run));
                }
            }
            println!("--- line width {}", placed.occupied().expect("placed").width());
        }
        next = result.overflow;
    }
}
