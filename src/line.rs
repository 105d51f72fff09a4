//! The line composer: fits a sequence of inline items into a rectangular area,
//! producing the placed line and whatever overflows to the next one.
//!
//! Layout is greedy. Each item is offered the space to the right of the cursor; text
//! splits at word boundaries when it must, tabs advance the cursor to their resolved
//! stop, and anything that does not fit is carried into the overflow line along with
//! the bidi levels it will need when it is laid out again.

use crate::bidi::{self, Direction};
use crate::font::Fonts;
use crate::item::{Item, ItemLayout, LayoutStatus};
use crate::tab::{self, TabAlignment, TabLeader, TabStops};
use crate::{LayoutError, Pt, Rect};
use log::{debug, trace};
use unicode_bidi::Level;

/// How much vertical space a line asks for below the previous one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Leading {
    /// A fixed distance between baselines
    Fixed(Pt),
    /// A multiple of the line's own height
    Multiplied(f32),
}

/// Styling and behaviour shared by a line and every line split off from it
#[derive(Debug, Clone)]
pub struct LineProperties {
    /// The base paragraph direction. When unset, the first run that declares one
    /// decides for the whole line; with no declaration the line stays in logical
    /// order.
    pub base_direction: Option<Direction>,
    /// Explicit tab stops, used before falling back to the default interval
    pub tab_stops: TabStops,
    /// The interval tabs advance by when no explicit stop applies
    pub tab_default: Pt,
    /// How justification distributes free space between word gaps and characters:
    /// 1.0 stretches only spaces, 0.0 only inter-character gaps
    pub spacing_ratio: f32,
    pub leading: Leading,
}

impl Default for LineProperties {
    fn default() -> LineProperties {
        LineProperties {
            base_direction: None,
            tab_stops: TabStops::new(),
            tab_default: Pt(50.0),
            spacing_ratio: 0.75,
            leading: Leading::Multiplied(1.0),
        }
    }
}

/// Everything a layout pass needs besides the line itself
pub struct LayoutContext<'a> {
    pub fonts: &'a Fonts,
    pub area: Rect,
}

/// A line of inline content. Push items in logical order, then call [Line::layout]
/// to fit the line into an area; the result carries the placed line and an overflow
/// line ready to be laid out into the next area.
#[derive(Debug, Clone, Default)]
pub struct Line {
    items: Vec<Item>,
    occupied: Option<Rect>,
    max_ascent: Pt,
    min_descent: Pt,
    levels: Option<Vec<Level>>,
    pub properties: LineProperties,
}

/// The outcome of laying out a line
#[derive(Debug)]
pub struct LineLayoutResult {
    pub status: LayoutStatus,
    pub occupied: Rect,
    /// The placed line, when anything fit
    pub split: Option<Line>,
    /// The remainder to lay out into the next area
    pub overflow: Option<Line>,
    /// True when the line ended at a newline rather than running out of room
    pub forced_by_newline: bool,
}

enum LineBreak {
    Partial { piece: Option<Item>, overflow: Option<Item> },
    Nothing,
}

impl Line {
    pub fn new() -> Line {
        Line::with_properties(LineProperties::default())
    }

    pub fn with_properties(properties: LineProperties) -> Line {
        Line {
            items: Vec::new(),
            occupied: None,
            max_ascent: Pt(0.0),
            min_descent: Pt(0.0),
            levels: None,
            properties,
        }
    }

    pub fn push(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn occupied(&self) -> Option<Rect> {
        self.occupied
    }

    pub fn max_ascent(&self) -> Pt {
        self.max_ascent
    }

    pub fn min_descent(&self) -> Pt {
        self.min_descent
    }

    /// The y-coordinate of the line's baseline, once laid out
    pub fn y_line(&self) -> Option<Pt> {
        self.occupied.map(|rect| rect.y1 - self.min_descent)
    }

    /// The vertical distance this line asks for, per its leading
    pub fn leading_value(&self) -> Pt {
        match self.properties.leading {
            Leading::Fixed(value) => value,
            Leading::Multiplied(factor) => {
                self.occupied.map(|rect| rect.height()).unwrap_or(Pt(0.0)) * factor
            }
        }
    }

    /// The number of glyphs across all text runs
    pub fn length(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                Item::Text(run) => run.line_length(),
                _ => 0,
            })
            .sum()
    }

    /// The number of space glyphs across all text runs
    pub fn number_of_spaces(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                Item::Text(run) => run.number_of_spaces(),
                _ => 0,
            })
            .sum()
    }

    /// The number of glyphs that occupy horizontal space of their own
    pub fn base_character_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                Item::Text(run) => run.base_character_count(),
                _ => 0,
            })
            .sum()
    }

    pub fn contains_image(&self) -> bool {
        self.items.iter().any(|item| matches!(item, Item::Image(_)))
    }

    /// Fit the line into the context's area. Consumes the line; the placed portion
    /// comes back in [LineLayoutResult::split] and anything that did not fit in
    /// [LineLayoutResult::overflow], ready to be laid out into the next area.
    pub fn layout(mut self, ctx: &LayoutContext) -> Result<LineLayoutResult, LayoutError> {
        let area = ctx.area;

        for item in self.items.iter_mut() {
            if let Item::Text(run) = item {
                run.shape(ctx.fonts)?;
            }
        }

        if self.properties.base_direction.is_none() {
            self.properties.base_direction = self.items.iter().find_map(|item| match item {
                Item::Text(run) => run.base_direction,
                _ => None,
            });
        }

        // drop a leading space before levels are computed, so glyphs and levels
        // stay in step across re-layouts
        for item in self.items.iter_mut() {
            let Item::Text(run) = item else { break };
            run.trim_first();
            if run.line_length() > 0 {
                break;
            }
        }

        if self.levels.is_none() {
            if let Some(base) = self.properties.base_direction {
                let codepoints: Vec<u32> = self
                    .items
                    .iter()
                    .flat_map(|item| match item {
                        Item::Text(run) => run.codepoints().collect(),
                        _ => Vec::new(),
                    })
                    .collect();
                self.levels = Some(bidi::compute_levels(base, &codepoints)?);
            }
        }

        let len = self.items.len();
        let mut pos = 0;
        let mut cur_width = Pt(0.0);
        let mut max_ascent = self.max_ascent;
        let mut min_descent = self.min_descent;
        let mut anything_placed = false;
        let mut pending_tab = None;
        let mut forced_by_newline = false;
        let mut line_break: Option<(usize, LineBreak)> = None;

        while pos < len {
            if let Item::Tab(_) = self.items[pos] {
                // a second tab materializes the deferred one with its provisional width
                if pending_tab.take().is_some() {
                    if let Item::Tab(prev) = &mut self.items[pos - 1] {
                        prev.place(area.x1 + cur_width, &area);
                        cur_width += prev.width();
                    }
                }
                let stop = self.properties.tab_stops.next_after(cur_width).copied();
                let deferred = match stop {
                    None => {
                        let width =
                            tab::default_tab_width(cur_width, area.width(), self.properties.tab_default);
                        if let Item::Tab(tab) = &mut self.items[pos] {
                            tab.resolve(width, max_ascent - min_descent, TabLeader::None);
                        }
                        None
                    }
                    Some(stop) => {
                        if let Item::Tab(tab) = &mut self.items[pos] {
                            tab.resolve(stop.position - cur_width, max_ascent - min_descent, stop.leader);
                        }
                        // a trailing tab has no content to align, so it keeps the
                        // provisional width
                        (stop.alignment != TabAlignment::Left && pos != len - 1).then_some(stop)
                    }
                };
                if let Some(stop) = deferred {
                    pending_tab = Some(stop);
                    pos += 1;
                    continue;
                }
            }

            if let Some(stop) = &pending_tab {
                if stop.alignment == TabAlignment::Anchor {
                    if let Item::Text(run) = &mut self.items[pos] {
                        run.tab_anchor = stop.anchor;
                    }
                }
            }

            let bbox = Rect::new(area.x1 + cur_width, area.y1, area.x2, area.y2);
            let mut result = self.items[pos].layout(&bbox)?;

            // a mid-word split only stands when the item cannot break any better on
            // a line of its own
            if result.word_split && result.status == LayoutStatus::Partial {
                let retry = self.items[pos].layout(&area)?;
                if !retry.word_split {
                    result = ItemLayout {
                        status: LayoutStatus::Nothing,
                        occupied: Rect::new(bbox.x1, bbox.y2, bbox.x1, bbox.y2),
                        split: None,
                        overflow: None,
                        word_split: false,
                        forced_by_newline: false,
                    };
                }
            }

            // a deferred tab resolves once the item after it has taken its measure
            let mut tab_awaiting = false;
            if let Some(stop) = pending_tab.take() {
                if result.status != LayoutStatus::Nothing {
                    if let Some(piece) = result.split.as_mut() {
                        let piece_width = piece.width();
                        let anchor_offset = match &*piece {
                            Item::Text(run) if stop.alignment == TabAlignment::Anchor => {
                                run.tab_anchor_offset()
                            }
                            _ => None,
                        };
                        let tab_width = tab::deferred_tab_width(
                            &stop,
                            cur_width,
                            piece_width,
                            anchor_offset,
                            area.width(),
                        );
                        if let Item::Tab(tab) = &mut self.items[pos - 1] {
                            tab.resolve(tab_width, max_ascent - min_descent, stop.leader);
                            tab.place(area.x1 + cur_width, &area);
                        }
                        piece.move_by(tab_width, Pt(0.0));
                        cur_width += tab_width;
                        anything_placed = true;
                    }
                } else {
                    // nothing fit after the tab, so the tab overflows with it
                    tab_awaiting = true;
                }
            }

            match &self.items[pos] {
                Item::Text(run) => {
                    max_ascent = max_ascent.max(run.ascent());
                    min_descent = min_descent.min(run.descent());
                }
                Item::Image(_) if result.status != LayoutStatus::Nothing => {
                    max_ascent = max_ascent.max(result.occupied.height());
                }
                _ => {}
            }

            match result.status {
                LayoutStatus::Full => {
                    if let Some(piece) = result.split {
                        cur_width += piece.width();
                        self.items[pos] = piece;
                    }
                    anything_placed = true;
                    pos += 1;
                }
                LayoutStatus::Partial => {
                    if let Some(piece) = &result.split {
                        cur_width += piece.width();
                    }
                    anything_placed = true;
                    forced_by_newline = result.forced_by_newline;
                    line_break = Some((
                        pos,
                        LineBreak::Partial { piece: result.split, overflow: result.overflow },
                    ));
                    break;
                }
                LayoutStatus::Nothing => {
                    let split_pos = if tab_awaiting { pos - 1 } else { pos };
                    // a rejected image shrinks to the area before it overflows, so
                    // it can fit on a line of its own
                    if let Item::Image(image) = &mut self.items[pos] {
                        image.scale_to_fit(&area);
                    }
                    line_break = Some((split_pos, LineBreak::Nothing));
                    break;
                }
            }
        }

        if !anything_placed {
            let occupied = Rect::new(area.x1, area.y2, area.x1, area.y2);
            let overflow = (!self.items.is_empty()).then(|| Line {
                items: std::mem::take(&mut self.items),
                occupied: None,
                max_ascent: Pt(0.0),
                min_descent: Pt(0.0),
                levels: self.levels.take(),
                properties: self.properties.clone(),
            });
            return Ok(LineLayoutResult {
                status: LayoutStatus::Nothing,
                occupied,
                split: None,
                overflow,
                forced_by_newline: false,
            });
        }

        let mut head_items = std::mem::take(&mut self.items);
        let tail_items = match line_break {
            None => Vec::new(),
            Some((break_pos, LineBreak::Nothing)) => head_items.split_off(break_pos),
            Some((break_pos, LineBreak::Partial { piece, overflow })) => {
                let mut tail = head_items.split_off(break_pos + 1);
                head_items.pop();
                if let Some(overflow) = overflow {
                    tail.insert(0, overflow);
                }
                match piece {
                    Some(Item::Text(run)) if run.line_length() == 0 => {}
                    Some(piece) => head_items.push(piece),
                    None => {}
                }
                tail
            }
        };

        let placed_glyphs: usize = head_items
            .iter()
            .map(|item| match item {
                Item::Text(run) => run.line_length(),
                _ => 0,
            })
            .sum();
        let (head_levels, overflow_levels) = match self.levels.take() {
            Some(levels) => {
                // the newline glyph landed in neither piece but still has a level
                let skip = placed_glyphs + usize::from(forced_by_newline);
                let tail_levels = (skip < levels.len()).then(|| levels[skip..].to_vec());
                let head = levels[..placed_glyphs.min(levels.len())].to_vec();
                (Some(head), tail_levels)
            }
            None => (None, None),
        };

        if let Some(levels) = &head_levels {
            self.reorder(&mut head_items, levels, &area, &mut cur_width);
        }

        let mut occupied = Rect::new(
            area.x1,
            area.y2 - (max_ascent - min_descent),
            area.x1 + cur_width,
            area.y2,
        );

        let baseline = occupied.y2 - max_ascent;
        for item in head_items.iter_mut() {
            let Some(item_rect) = item.occupied() else { continue };
            let dy = match item {
                Item::Text(run) => (baseline + run.ascent()) - item_rect.y2,
                Item::Image(_) => baseline - item_rect.y1,
                Item::Tab(_) => occupied.y1 - item_rect.y1,
            };
            item.move_by(Pt(0.0), dy);
        }

        if let Some(Item::Text(run)) = head_items.last_mut() {
            occupied.x2 -= run.trim_last();
        }

        trace!(
            "composed line of {} items, {} wide, {} overflowing",
            head_items.len(),
            occupied.width(),
            tail_items.len()
        );

        self.items = head_items;
        self.occupied = Some(occupied);
        self.max_ascent = max_ascent;
        self.min_descent = min_descent;
        self.levels = head_levels;

        let overflow = (!tail_items.is_empty()).then(|| Line {
            items: tail_items,
            occupied: None,
            max_ascent: Pt(0.0),
            min_descent: Pt(0.0),
            levels: overflow_levels,
            properties: self.properties.clone(),
        });
        let status = if overflow.is_some() { LayoutStatus::Partial } else { LayoutStatus::Full };

        Ok(LineLayoutResult {
            status,
            occupied,
            split: Some(self),
            overflow,
            forced_by_newline,
        })
    }

    /// Regroup the placed items into visual order when their bidi levels call for
    /// reordering. Only text survives regrouping; runs are re-placed left to right.
    fn reorder(&self, items: &mut Vec<Item>, levels: &[Level], area: &Rect, cur_width: &mut Pt) {
        let mut flat: Vec<(usize, usize)> = Vec::new();
        for (owner, item) in items.iter().enumerate() {
            if let Item::Text(run) = item {
                flat.extend((0..run.line_length()).map(|glyph| (owner, glyph)));
            }
        }
        if flat.len() != levels.len() {
            debug!(
                "bidi levels out of step with line content ({} levels, {} glyphs), skipping reorder",
                levels.len(),
                flat.len()
            );
            return;
        }
        let Some(map) = bidi::reorder_visual(levels) else { return };

        if items.iter().any(|item| !matches!(item, Item::Text(_))) {
            debug!("dropping non-text items while reordering a bidirectional line");
        }

        let mut reordered = Vec::new();
        let mut visual = 0;
        while visual < map.len() {
            let (owner, _) = flat[map[visual]];
            // a reversed stretch walks logical positions backwards
            let reversed = visual + 1 < map.len()
                && flat[map[visual + 1]].0 == owner
                && map[visual + 1] + 1 == map[visual];
            let mut end = visual + 1;
            while end < map.len() && flat[map[end]].0 == owner {
                let step_back = map[end] + 1 == map[end - 1];
                let step_forward = map[end] == map[end - 1] + 1;
                if (reversed && !step_back) || (!reversed && !step_forward) {
                    break;
                }
                end += 1;
            }
            let first = flat[map[if reversed { end - 1 } else { visual }]].1;
            let last = flat[map[if reversed { visual } else { end - 1 }]].1;
            if let Item::Text(run) = &items[owner] {
                reordered.push(Item::Text(run.regrouped(first, last + 1, reversed)));
            }
            visual = end;
        }

        let mut x = area.x1;
        for item in reordered.iter_mut() {
            if let Item::Text(run) = item {
                let width = run.width();
                run.set_occupied(Rect::new(
                    x,
                    area.y2 - (run.ascent() - run.descent()),
                    x + width,
                    area.y2,
                ));
                x += width;
            }
        }
        *cur_width = x - area.x1;
        *items = reordered;
    }

    /// Stretch the laid-out line to exactly `width` by widening word gaps and
    /// inter-character spacing according to the line's spacing ratio.
    pub fn justify(&mut self, width: Pt) {
        let Some(occupied) = self.occupied else { return };
        let Some(last_right) = self.items.last().and_then(|item| item.occupied()).map(|r| r.x2)
        else {
            return;
        };

        let ratio = self.properties.spacing_ratio;
        let free_width = occupied.x1 + width - last_right;
        let spaces = self.number_of_spaces() as f32;
        let base_characters = self.base_character_count() as f32;
        let denominator = ratio * spaces + (1.0 - ratio) * (base_characters - 1.0);
        if denominator <= 0.0 {
            return;
        }
        let base_factor = free_width / denominator;
        let word_spacing = base_factor * ratio;
        let char_spacing = base_factor * (1.0 - ratio);

        let last = self.items.len() - 1;
        let mut last_right_pos = occupied.x1;
        for (idx, item) in self.items.iter_mut().enumerate() {
            let Some(item_rect) = item.occupied() else { continue };
            item.move_by(last_right_pos - item_rect.x1, Pt(0.0));
            if let Item::Text(run) = item {
                run.set_spacing(
                    char_spacing / run.horizontal_scale,
                    word_spacing / run.horizontal_scale,
                );
                // no spacing hangs past the final glyph of the line
                let spacing_count = if idx == last {
                    run.line_length().saturating_sub(1)
                } else {
                    run.line_length()
                };
                let addition = char_spacing * spacing_count as f32
                    + word_spacing * run.number_of_spaces() as f32;
                let mut rect = run.occupied().unwrap_or(item_rect);
                rect.x2 += addition;
                run.set_occupied(rect);
            }
            last_right_pos = item.occupied().map(|r| r.x2).unwrap_or(last_right_pos);
        }

        let mut occupied = occupied;
        occupied.set_width(width);
        self.occupied = Some(occupied);
    }
}
