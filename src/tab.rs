use crate::{Pt, Rect};

/// How content following a tab is aligned against the tab stop position
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TabAlignment {
    /// Content starts at the stop position
    #[default]
    Left,
    /// Content ends at the stop position
    Right,
    /// Content is centred on the stop position
    Center,
    /// Content is aligned so its anchor character sits at the stop position
    Anchor,
}

/// The fill drawn across the span a tab occupies
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TabLeader {
    #[default]
    None,
    Dotted,
    Dashed,
    Solid,
}

/// A single tab stop at an absolute position from the left edge of the line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabStop {
    pub position: Pt,
    pub alignment: TabAlignment,
    pub leader: TabLeader,
    /// The character that right-aligns against the stop when the alignment is
    /// [TabAlignment::Anchor]. Falls back to right alignment when the following
    /// text does not contain it.
    pub anchor: Option<char>,
}

impl TabStop {
    pub fn new(position: Pt) -> TabStop {
        TabStop {
            position,
            alignment: TabAlignment::default(),
            leader: TabLeader::default(),
            anchor: None,
        }
    }

    pub fn with_alignment(mut self, alignment: TabAlignment) -> TabStop {
        self.alignment = alignment;
        self
    }

    pub fn with_leader(mut self, leader: TabLeader) -> TabStop {
        self.leader = leader;
        self
    }

    pub fn with_anchor(mut self, anchor: char) -> TabStop {
        self.alignment = TabAlignment::Anchor;
        self.anchor = Some(anchor);
        self
    }
}

/// An ordered collection of tab stops, kept sorted by position
#[derive(Debug, Default, Clone)]
pub struct TabStops {
    stops: Vec<TabStop>,
}

impl TabStops {
    pub fn new() -> TabStops {
        TabStops::default()
    }

    /// Insert a stop, keeping the collection ordered by position
    pub fn add(&mut self, stop: TabStop) {
        let at = self
            .stops
            .partition_point(|existing| existing.position.0 <= stop.position.0);
        self.stops.insert(at, stop);
    }

    /// The first stop strictly past the given line offset, if any
    pub fn next_after(&self, width: Pt) -> Option<&TabStop> {
        self.stops.iter().find(|stop| stop.position.0 > width.0)
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// A tab in a line of content. Tabs start out with no extent; the composer resolves
/// their width against the line's tab stops while laying the line out.
#[derive(Debug, Clone, Default)]
pub struct TabItem {
    width: Pt,
    height: Pt,
    leader: TabLeader,
    occupied: Option<Rect>,
}

impl TabItem {
    pub fn new() -> TabItem {
        TabItem::default()
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn height(&self) -> Pt {
        self.height
    }

    pub fn leader(&self) -> TabLeader {
        self.leader
    }

    pub fn occupied(&self) -> Option<Rect> {
        self.occupied
    }

    pub fn ascent(&self) -> Pt {
        Pt(0.0)
    }

    pub fn descent(&self) -> Pt {
        Pt(0.0)
    }

    pub(crate) fn resolve(&mut self, width: Pt, height: Pt, leader: TabLeader) {
        self.width = width;
        self.height = height;
        self.leader = leader;
    }

    pub(crate) fn place(&mut self, x: Pt, area: &Rect) {
        self.occupied = Some(Rect::new(x, area.y2 - self.height, x + self.width, area.y2));
    }

    pub(crate) fn move_by(&mut self, dx: Pt, dy: Pt) {
        if let Some(occupied) = self.occupied.as_mut() {
            occupied.translate(dx, dy);
        }
    }
}

/// The width of a tab resolved against the default tab interval: the distance to the
/// next multiple of the interval, clipped to the end of the line.
pub(crate) fn default_tab_width(cur_width: Pt, line_width: Pt, interval: Pt) -> Pt {
    let mut width = interval - cur_width % interval;
    if cur_width + width > line_width {
        width = line_width - cur_width;
    }
    width.max(Pt(0.0))
}

/// The width of a tab resolved against an explicit stop, accounting for the extent of
/// the content that follows it. `item_width` is the width of the following item and
/// `anchor_offset` the distance from its start to its anchor character, when one was
/// found.
pub(crate) fn deferred_tab_width(
    stop: &TabStop,
    cur_width: Pt,
    item_width: Pt,
    anchor_offset: Option<Pt>,
    line_width: Pt,
) -> Pt {
    let mut width = match stop.alignment {
        TabAlignment::Right => stop.position - cur_width - item_width,
        TabAlignment::Center => stop.position - cur_width - item_width / 2.0,
        TabAlignment::Anchor => stop.position - cur_width - anchor_offset.unwrap_or(item_width),
        TabAlignment::Left => stop.position - cur_width,
    };
    width = width.max(Pt(0.0));
    if cur_width + width + item_width > line_width {
        width = line_width - cur_width - item_width;
    }
    width
}
