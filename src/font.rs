use crate::{LayoutError, Pt};
use derive_more::{Deref, DerefMut};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, OwnedFace};

/// A parsed font face. Fonts can be TTF or OTF fonts; only the metrics tables are
/// consulted here — character-to-glyph mapping and horizontal advances — while full
/// shaping (ligatures, kerning, OTF features) is left to the caller, which can build
/// runs from pre-shaped glyphs instead.
///
/// Typically, fonts are referred to throughout user applications by their [FontId]
/// within a [Fonts] collection, and not by any typed references.
pub struct Font {
    pub face: OwnedFace,
}

/// Identifies a [Font] within a [Fonts] collection
pub type FontId = Id<Font>;

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LayoutError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Obtain the full name of the font. Panics if the font does not have a name
    pub fn name(&self) -> String {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
            .expect("font face has a name")
    }

    /// Obtain the family name of the font. Panics if the font does not have a font family
    pub fn family(&self) -> String {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
            .expect("font face has a family")
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.face.as_face_ref().units_per_em() as f32;
        scaling * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.face.as_face_ref().units_per_em() as f32;
        scaling * self.face.as_face_ref().descender() as f32
    }

    /// Calculate the leading (extra space between lines) for the given font size
    pub fn leading(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.face.as_face_ref().units_per_em() as f32;
        scaling * self.face.as_face_ref().line_gap() as f32
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.face.as_face_ref().units_per_em() as f32;
        let leading: Pt = scaling * self.face.as_face_ref().line_gap() as f32;
        let ascent: Pt = scaling * self.face.as_face_ref().ascender() as f32;
        let descent: Pt = scaling * self.face.as_face_ref().descender() as f32;
        leading + ascent - descent
    }

    /// Look up the glyph for a character in the font's character map
    pub fn glyph_id(&self, ch: char) -> Option<owned_ttf_parser::GlyphId> {
        self.face.as_face_ref().glyph_index(ch)
    }

    /// Calculate the horizontal advance of a character at the given font size. Characters
    /// missing from the font measure as zero.
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let face = self.face.as_face_ref();
        let scaling: Pt = size / face.units_per_em() as f32;
        let advance = face
            .glyph_index(ch)
            .and_then(|id| face.glyph_hor_advance(id))
            .unwrap_or(0);
        scaling * advance as f32
    }
}

/// The set of fonts available to a layout pass. Dereferences to the underlying
/// [Arena], so a font can be fetched with `fonts[id]`.
#[derive(Default, Deref, DerefMut)]
pub struct Fonts(Arena<Font>);

impl Fonts {
    pub fn new() -> Fonts {
        Fonts(Arena::new())
    }

    /// Add a font to the collection, returning the id used to refer to it from runs
    pub fn add(&mut self, font: Font) -> FontId {
        self.0.alloc(font)
    }
}
