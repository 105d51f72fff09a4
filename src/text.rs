//! Text runs: spans of uniformly-styled text, shaped into glyphs and broken across
//! lines by the composer.
//!
//! A run starts out holding text, which [TextRun::shape] turns into a glyph buffer
//! using a font's character map. Callers doing their own shaping (ligatures, kerning,
//! OTF features) can build a run from finished glyphs with [TextRun::from_glyphs]
//! instead. Splitting a run never copies glyphs: the buffer is shared behind an [Rc]
//! and each piece holds a view into it.

use crate::bidi::{self, Direction};
use crate::font::{FontId, Fonts};
use crate::item::{Item, ItemLayout, LayoutStatus};
use crate::{LayoutError, Pt, Rect};
use std::rc::Rc;

/// A single shaped glyph: the codepoint it came from and its horizontal advance at
/// the run's font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub codepoint: u32,
    pub advance: Pt,
}

/// A range of glyphs, relative to the run's view, that is stored in logical order but
/// rendered right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReversedRange {
    pub start: usize,
    pub end: usize,
}

/// A run of text sharing one font, size, and direction.
#[derive(Debug, Clone)]
pub struct TextRun {
    /// Text not yet shaped into glyphs. Consumed by [TextRun::shape].
    text: Option<String>,
    glyphs: Rc<[Glyph]>,
    start: usize,
    end: usize,
    reversed_ranges: Vec<ReversedRange>,
    font: Option<FontId>,
    font_size: Pt,
    ascent: Pt,
    descent: Pt,
    /// The base direction this run asks for; the first run in a line that sets one
    /// decides the whole line's direction.
    pub base_direction: Option<Direction>,
    /// Horizontal scaling applied to every advance, 1.0 being unscaled
    pub horizontal_scale: f32,
    pub(crate) tab_anchor: Option<char>,
    char_spacing: Pt,
    word_spacing: Pt,
    occupied: Option<Rect>,
}

const SPACE: u32 = ' ' as u32;
const NEWLINE: u32 = '\n' as u32;
const HYPHEN: u32 = '-' as u32;

impl TextRun {
    /// Create a run from text that still needs shaping against a font
    pub fn new(text: impl Into<String>, font: FontId, font_size: Pt) -> TextRun {
        TextRun {
            text: Some(text.into()),
            glyphs: Rc::from(Vec::new()),
            start: 0,
            end: 0,
            reversed_ranges: Vec::new(),
            font: Some(font),
            font_size,
            ascent: Pt(0.0),
            descent: Pt(0.0),
            base_direction: None,
            horizontal_scale: 1.0,
            tab_anchor: None,
            char_spacing: Pt(0.0),
            word_spacing: Pt(0.0),
            occupied: None,
        }
    }

    /// Create a run from glyphs shaped elsewhere. `ascent` and `descent` are the
    /// vertical metrics of the font the glyphs were shaped with, at their size.
    pub fn from_glyphs(glyphs: Vec<Glyph>, ascent: Pt, descent: Pt) -> TextRun {
        let end = glyphs.len();
        TextRun {
            text: None,
            glyphs: Rc::from(glyphs),
            start: 0,
            end,
            reversed_ranges: Vec::new(),
            font: None,
            font_size: Pt(0.0),
            ascent,
            descent,
            base_direction: None,
            horizontal_scale: 1.0,
            tab_anchor: None,
            char_spacing: Pt(0.0),
            word_spacing: Pt(0.0),
            occupied: None,
        }
    }

    /// Shape the run's text into glyphs using the font's character map. Does nothing
    /// if the run was already shaped.
    pub fn shape(&mut self, fonts: &Fonts) -> Result<(), LayoutError> {
        let Some(text) = self.text.take() else {
            return Ok(());
        };
        let font_id = self.font.ok_or(LayoutError::UnshapedText)?;
        let font = &fonts[font_id];

        let glyphs: Vec<Glyph> = text
            .chars()
            .map(|ch| Glyph {
                codepoint: ch as u32,
                advance: font.advance(ch, self.font_size),
            })
            .collect();
        self.start = 0;
        self.end = glyphs.len();
        self.glyphs = Rc::from(glyphs);
        self.ascent = font.ascent(self.font_size);
        self.descent = font.descent(self.font_size);
        Ok(())
    }

    pub fn is_shaped(&self) -> bool {
        self.text.is_none()
    }

    /// The glyphs in this run's view, in logical order
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs[self.start..self.end]
    }

    /// Ranges of the view that render right-to-left
    pub fn reversed_ranges(&self) -> &[ReversedRange] {
        &self.reversed_ranges
    }

    pub fn font(&self) -> Option<FontId> {
        self.font
    }

    pub fn font_size(&self) -> Pt {
        self.font_size
    }

    pub fn ascent(&self) -> Pt {
        self.ascent
    }

    pub fn descent(&self) -> Pt {
        self.descent
    }

    pub fn occupied(&self) -> Option<Rect> {
        self.occupied
    }

    /// The number of glyphs in the view
    pub fn line_length(&self) -> usize {
        self.end - self.start
    }

    /// The number of space glyphs in the view
    pub fn number_of_spaces(&self) -> usize {
        self.glyphs().iter().filter(|g| g.codepoint == SPACE).count()
    }

    /// The number of glyphs that take up horizontal space of their own, excluding
    /// combining marks
    pub fn base_character_count(&self) -> usize {
        self.codepoints()
            .filter(|&cp| char::from_u32(cp).map(bidi::is_base_character).unwrap_or(true))
            .count()
    }

    /// The codepoints of the view, in logical order
    pub fn codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.glyphs().iter().map(|g| g.codepoint)
    }

    /// Apply inter-character and inter-word spacing, replacing any previous values
    pub fn set_spacing(&mut self, character: Pt, word: Pt) {
        self.char_spacing = character;
        self.word_spacing = word;
    }

    pub fn char_spacing(&self) -> Pt {
        self.char_spacing
    }

    pub fn word_spacing(&self) -> Pt {
        self.word_spacing
    }

    fn glyph_width(&self, glyph: &Glyph) -> Pt {
        let mut width = glyph.advance * self.horizontal_scale;
        width += self.char_spacing * self.horizontal_scale;
        if glyph.codepoint == SPACE {
            width += self.word_spacing * self.horizontal_scale;
        }
        width
    }

    /// The total width of the view with the current spacing applied
    pub fn width(&self) -> Pt {
        self.glyphs().iter().map(|g| self.glyph_width(g)).sum()
    }

    /// Drop a single leading space from the view
    pub fn trim_first(&mut self) {
        if self.start < self.end && self.glyphs[self.start].codepoint == SPACE {
            self.start += 1;
        }
    }

    /// Drop a single trailing space from the view, shrinking the occupied area to
    /// match. Returns the width that was removed.
    pub fn trim_last(&mut self) -> Pt {
        if self.start < self.end && self.glyphs[self.end - 1].codepoint == SPACE {
            let trimmed = self.glyph_width(&self.glyphs[self.end - 1]);
            self.end -= 1;
            if let Some(occupied) = self.occupied.as_mut() {
                occupied.x2 -= trimmed;
            }
            return trimmed;
        }
        Pt(0.0)
    }

    /// The distance from the start of the view to the run's tab anchor character, if
    /// the view contains it
    pub(crate) fn tab_anchor_offset(&self) -> Option<Pt> {
        let anchor = self.tab_anchor? as u32;
        let mut offset = Pt(0.0);
        for glyph in self.glyphs() {
            if glyph.codepoint == anchor {
                return Some(offset);
            }
            offset += self.glyph_width(glyph);
        }
        None
    }

    pub(crate) fn move_by(&mut self, dx: Pt, dy: Pt) {
        if let Some(occupied) = self.occupied.as_mut() {
            occupied.translate(dx, dy);
        }
    }

    pub(crate) fn set_occupied(&mut self, occupied: Rect) {
        self.occupied = Some(occupied);
    }

    /// A new run viewing `start..end` of the shared glyph buffer, with spacing and
    /// placement reset
    fn slice(&self, start: usize, end: usize) -> TextRun {
        TextRun {
            text: None,
            glyphs: Rc::clone(&self.glyphs),
            start,
            end,
            reversed_ranges: Vec::new(),
            font: self.font,
            font_size: self.font_size,
            ascent: self.ascent,
            descent: self.descent,
            base_direction: self.base_direction,
            horizontal_scale: self.horizontal_scale,
            tab_anchor: self.tab_anchor,
            char_spacing: Pt(0.0),
            word_spacing: Pt(0.0),
            occupied: None,
        }
    }

    /// A run viewing `start..end` of this run's view, marked reversed when the
    /// glyphs render right-to-left. Used when regrouping a line into visual order.
    pub(crate) fn regrouped(&self, start: usize, end: usize, reversed: bool) -> TextRun {
        let mut run = self.slice(self.start + start, self.start + end);
        run.char_spacing = self.char_spacing;
        run.word_spacing = self.word_spacing;
        if reversed {
            run.reversed_ranges.push(ReversedRange { start: 0, end: end - start });
        }
        run
    }

    /// Fit as much of the run as possible into `area`, preferring to break after a
    /// space or hyphen. A newline forces a break regardless of remaining width; the
    /// newline itself lands in neither piece.
    pub fn layout(&self, area: &Rect) -> Result<ItemLayout, LayoutError> {
        if !self.is_shaped() {
            return Err(LayoutError::UnshapedText);
        }
        let available = area.width();

        // measure with bare scaled advances; split pieces carry no spacing
        let mut width = Pt(0.0);
        let mut split_at = None;
        let mut forced_by_newline = false;
        let mut word_split = false;
        let mut last_break = None;
        let glyphs = self.glyphs();
        for (i, glyph) in glyphs.iter().enumerate() {
            if glyph.codepoint == NEWLINE {
                split_at = Some(i);
                forced_by_newline = true;
                break;
            }
            let advance = glyph.advance * self.horizontal_scale;
            if width + advance > available {
                match last_break {
                    Some(at) => split_at = Some(at),
                    None if i == 0 => {
                        // not even one glyph fits
                        let overflow = self.slice(self.start, self.end);
                        return Ok(ItemLayout {
                            status: LayoutStatus::Nothing,
                            occupied: Rect::new(area.x1, area.y2, area.x1, area.y2),
                            split: None,
                            overflow: Some(Item::Text(overflow)),
                            word_split: false,
                            forced_by_newline: false,
                        });
                    }
                    None => {
                        split_at = Some(i);
                        word_split = true;
                    }
                }
                break;
            }
            width += advance;
            if glyph.codepoint == SPACE || glyph.codepoint == HYPHEN {
                last_break = Some(i + 1);
            }
        }

        let (status, head_end) = match split_at {
            Some(at) => (LayoutStatus::Partial, at),
            None => (LayoutStatus::Full, glyphs.len()),
        };

        let head = self.slice(self.start, self.start + head_end);
        let head_width = head.width();
        let mut placed = head;
        placed.set_occupied(Rect::new(
            area.x1,
            area.y2 - (self.ascent - self.descent),
            area.x1 + head_width,
            area.y2,
        ));

        let overflow_start = self.start + head_end + usize::from(forced_by_newline);
        let overflow = (overflow_start < self.end).then(|| {
            Item::Text(self.slice(overflow_start, self.end))
        });

        Ok(ItemLayout {
            status,
            occupied: placed.occupied.unwrap(),
            split: Some(Item::Text(placed)),
            overflow,
            word_split,
            forced_by_newline,
        })
    }
}
