use crate::image::ImageItem;
use crate::tab::TabItem;
use crate::text::TextRun;
use crate::{LayoutError, Pt, Rect};
use derive_more::From;

/// How much of an item fit into the area it was offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStatus {
    /// The whole item was placed
    Full,
    /// A leading piece was placed and the rest overflows
    Partial,
    /// Nothing was placed
    Nothing,
}

/// A piece of inline content on a line
#[derive(Debug, Clone, From)]
pub enum Item {
    Text(TextRun),
    Image(ImageItem),
    Tab(TabItem),
}

/// The outcome of laying out a single item
#[derive(Debug, Clone)]
pub struct ItemLayout {
    pub status: LayoutStatus,
    /// The area the placed piece covers; zero-sized when nothing was placed
    pub occupied: Rect,
    /// The placed piece, when anything fit
    pub split: Option<Item>,
    /// The remainder that did not fit, to be carried to the next line
    pub overflow: Option<Item>,
    /// True when text was split mid-word because no space or hyphen fit
    pub word_split: bool,
    /// True when a newline in the text ended the line early
    pub forced_by_newline: bool,
}

impl Item {
    /// Fit the item into the area, producing the placed piece and any overflow
    pub fn layout(&self, area: &Rect) -> Result<ItemLayout, LayoutError> {
        match self {
            Item::Text(run) => run.layout(area),
            Item::Image(image) => Ok(image.layout(area)),
            Item::Tab(tab) => Ok(tab.layout(area)),
        }
    }

    /// The distance the item extends above the baseline
    pub fn ascent(&self) -> Pt {
        match self {
            Item::Text(run) => run.ascent(),
            Item::Image(image) => image.ascent(),
            Item::Tab(tab) => tab.ascent(),
        }
    }

    /// The distance the item extends below the baseline, usually negative for text
    pub fn descent(&self) -> Pt {
        match self {
            Item::Text(run) => run.descent(),
            Item::Image(image) => image.descent(),
            Item::Tab(tab) => tab.descent(),
        }
    }

    /// Where the item was placed, if it has been laid out
    pub fn occupied(&self) -> Option<Rect> {
        match self {
            Item::Text(run) => run.occupied(),
            Item::Image(image) => image.occupied(),
            Item::Tab(tab) => tab.occupied(),
        }
    }

    pub fn width(&self) -> Pt {
        match self {
            Item::Text(run) => run.width(),
            Item::Image(image) => image.width(),
            Item::Tab(tab) => tab.width(),
        }
    }

    pub(crate) fn move_by(&mut self, dx: Pt, dy: Pt) {
        match self {
            Item::Text(run) => run.move_by(dx, dy),
            Item::Image(image) => image.move_by(dx, dy),
            Item::Tab(tab) => tab.move_by(dx, dy),
        }
    }
}

impl TabItem {
    /// Tabs always place in full; their width was already resolved by the composer
    pub fn layout(&self, area: &Rect) -> ItemLayout {
        let occupied = Rect::new(
            area.x1,
            area.y2 - self.height(),
            area.x1 + self.width(),
            area.y2,
        );
        let mut placed = self.clone();
        placed.place(area.x1, area);
        ItemLayout {
            status: LayoutStatus::Full,
            occupied,
            split: Some(Item::Tab(placed)),
            overflow: None,
            word_split: false,
            forced_by_newline: false,
        }
    }
}
