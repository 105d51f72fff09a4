//! Bidirectional text support, backed by the Unicode bidi algorithm.
//!
//! The composer works with per-character embedding levels: [compute_levels] assigns one
//! level per logical codepoint, and [reorder_visual] turns a level slice into the
//! permutation that maps visual positions back to logical indices. Glyph buffers are
//! never touched here; callers regroup their own views from the permutation.

use crate::LayoutError;
use unicode_bidi::{bidi_class, BidiClass, BidiInfo, Level};

/// The base paragraph direction driving bidi analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    fn level(self) -> Level {
        match self {
            Direction::LeftToRight => Level::ltr(),
            Direction::RightToLeft => Level::rtl(),
        }
    }
}

/// Compute one embedding level per input codepoint, resolved against the given base
/// direction. Codepoints that are not valid Unicode scalars are an error.
pub fn compute_levels(base: Direction, codepoints: &[u32]) -> Result<Vec<Level>, LayoutError> {
    let mut text = String::with_capacity(codepoints.len());
    for &cp in codepoints {
        let ch = char::from_u32(cp).ok_or(LayoutError::InvalidCodepoint(cp))?;
        text.push(ch);
    }

    let info = BidiInfo::new(&text, Some(base.level()));

    // BidiInfo levels are per utf-8 byte; sample one per character
    let mut levels = Vec::with_capacity(codepoints.len());
    for (i, _) in text.char_indices() {
        levels.push(info.levels[i]);
    }
    Ok(levels)
}

/// Compute the permutation mapping visual position to logical index for a run of
/// characters with the given levels. Returns `None` when the text is already in
/// visual order and no reordering is needed.
pub fn reorder_visual(levels: &[Level]) -> Option<Vec<usize>> {
    if levels.iter().all(|level| !level.is_rtl()) {
        return None;
    }
    let map = BidiInfo::reorder_visual(levels);
    if map.iter().enumerate().all(|(visual, &logical)| visual == logical) {
        return None;
    }
    Some(map)
}

/// True when the character takes up horizontal space of its own rather than combining
/// with the preceding base character.
pub fn is_base_character(ch: char) -> bool {
    bidi_class(ch) != BidiClass::NSM
}
