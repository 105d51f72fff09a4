use crate::item::{Item, ItemLayout, LayoutStatus};
use crate::{LayoutError, Pt, Rect};
use image::GenericImageView;
use std::io::Cursor;

/// An inline image, occupying a fixed width and height on the line. The image sits on
/// the baseline: its full height counts as ascent and it has no descent.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    width: Pt,
    height: Pt,
    occupied: Option<Rect>,
}

impl ImageItem {
    /// Create an image item with an explicit size in points
    pub fn with_size(width: Pt, height: Pt) -> ImageItem {
        ImageItem { width, height, occupied: None }
    }

    /// Create an image item sized from encoded image data, one point per pixel. The
    /// format is guessed from the data.
    pub fn from_bytes(bytes: &[u8]) -> Result<ImageItem, LayoutError> {
        let reader = image::io::Reader::new(Cursor::new(bytes)).with_guessed_format()?;
        let (width, height) = reader.into_dimensions()?;
        Ok(ImageItem::with_size(Pt(width as f32), Pt(height as f32)))
    }

    /// Create an image item sized from a decoded image, one point per pixel
    pub fn from_image(image: &image::DynamicImage) -> ImageItem {
        let (width, height) = image.dimensions();
        ImageItem::with_size(Pt(width as f32), Pt(height as f32))
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn height(&self) -> Pt {
        self.height
    }

    pub fn occupied(&self) -> Option<Rect> {
        self.occupied
    }

    pub fn ascent(&self) -> Pt {
        self.height
    }

    pub fn descent(&self) -> Pt {
        Pt(0.0)
    }

    /// Shrink the image, preserving its aspect ratio, until it fits the area. Images
    /// already inside the area are left alone.
    pub fn scale_to_fit(&mut self, area: &Rect) {
        if self.width <= Pt(0.0) || self.height <= Pt(0.0) {
            return;
        }
        let scale = (area.width() / self.width)
            .min(area.height() / self.height)
            .min(Pt(1.0));
        self.width = self.width * scale.0;
        self.height = self.height * scale.0;
    }

    /// Place the image at the cursor, or report that it does not fit. Images never
    /// split.
    pub fn layout(&self, area: &Rect) -> ItemLayout {
        if self.width > area.width() {
            return ItemLayout {
                status: LayoutStatus::Nothing,
                occupied: Rect::new(area.x1, area.y2, area.x1, area.y2),
                split: None,
                overflow: Some(Item::Image(self.clone())),
                word_split: false,
                forced_by_newline: false,
            };
        }
        let occupied = Rect::new(area.x1, area.y2 - self.height, area.x1 + self.width, area.y2);
        let mut placed = self.clone();
        placed.occupied = Some(occupied);
        ItemLayout {
            status: LayoutStatus::Full,
            occupied,
            split: Some(Item::Image(placed)),
            overflow: None,
            word_split: false,
            forced_by_newline: false,
        }
    }

    pub(crate) fn move_by(&mut self, dx: Pt, dy: Pt) {
        if let Some(occupied) = self.occupied.as_mut() {
            occupied.translate(dx, dy);
        }
    }
}
