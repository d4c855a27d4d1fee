use std::collections::HashMap;

/// Scroll position of a list: the first visible row and how far it is
/// scrolled out of view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub first: usize,
    pub offset: f32,
    /// Whether rows remain below the viewport.
    pub before_end: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Jump {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedRow {
    pub index: usize,
    pub y: f32,
    pub height: f32,
}

/// Thumb extent as fractions of the viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListLayout {
    pub rows: Vec<PlacedRow>,
    pub scrollbar: Option<Thumb>,
}

/// Vertical list state kept between frames. Scroll requests are queued and
/// applied on the next layout, when the viewport and row heights are known.
#[derive(Debug, Clone, Default)]
pub struct List {
    position: Position,
    pending_px: f32,
    pending_pages: f32,
    jump: Option<Jump>,
}

impl List {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn scroll_by(&mut self, px: f32) {
        if px.is_finite() {
            self.pending_px += px;
        }
    }

    pub fn scroll_pages(&mut self, pages: f32) {
        if pages.is_finite() {
            self.pending_pages += pages;
        }
    }

    pub fn scroll_to_start(&mut self) {
        self.clear_pending();
        self.jump = Some(Jump::Start);
    }

    pub fn scroll_to_end(&mut self) {
        self.clear_pending();
        self.jump = Some(Jump::End);
    }

    fn clear_pending(&mut self) {
        self.pending_px = 0.0;
        self.pending_pages = 0.0;
    }

    /// Places the rows of a `len` row list in a `viewport` tall area.
    /// `height_of` is only called for rows near the viewport.
    pub fn layout(
        &mut self,
        viewport: f32,
        len: usize,
        height_of: impl FnMut(usize) -> f32,
    ) -> ListLayout {
        let viewport = viewport.max(0.0);
        let jump = self.jump.take();
        let delta = self.pending_px + self.pending_pages * viewport;
        self.clear_pending();

        if len == 0 {
            self.position = Position::default();
            return ListLayout::default();
        }

        let mut heights = Heights::new(height_of);
        let mut first = self.position.first.min(len - 1);
        let mut offset = self.position.offset;
        match jump {
            Some(Jump::Start) => {
                first = 0;
                offset = 0.0;
            }
            Some(Jump::End) => {
                first = len - 1;
                offset = heights.get(first);
            }
            None => {}
        }
        offset += delta;

        normalize(&mut heights, len, &mut first, &mut offset);
        let (mut rows, mut bottom) = place(&mut heights, len, viewport, first, offset);

        // Pull the last row up to the bottom edge rather than leave a gap.
        let reached_end = rows.last().map_or(true, |row| row.index == len - 1);
        if reached_end && bottom < viewport && (first > 0 || offset > 0.0) {
            offset -= viewport - bottom;
            normalize(&mut heights, len, &mut first, &mut offset);
            let placed = place(&mut heights, len, viewport, first, offset);
            rows = placed.0;
            bottom = placed.1;
        }

        let last = rows.last().map_or(0, |row| row.index);
        let before_end = last + 1 < len || bottom > viewport;
        self.position = Position {
            first,
            offset,
            before_end,
        };

        let scrollbar = if before_end || first > 0 || offset > 0.0 {
            thumb(&rows, len, viewport, first, offset)
        } else {
            None
        };

        ListLayout { rows, scrollbar }
    }
}

struct Heights<F> {
    height_of: F,
    cache: HashMap<usize, f32>,
}

impl<F: FnMut(usize) -> f32> Heights<F> {
    fn new(height_of: F) -> Self {
        Heights {
            height_of,
            cache: HashMap::new(),
        }
    }

    fn get(&mut self, index: usize) -> f32 {
        let height_of = &mut self.height_of;
        *self
            .cache
            .entry(index)
            .or_insert_with(|| height_of(index).max(0.0))
    }
}

/// Moves `first` until `offset` lies within it. The offset never goes
/// negative.
fn normalize<F: FnMut(usize) -> f32>(
    heights: &mut Heights<F>,
    len: usize,
    first: &mut usize,
    offset: &mut f32,
) {
    while *offset < 0.0 && *first > 0 {
        *first -= 1;
        *offset += heights.get(*first);
    }
    if *offset < 0.0 {
        *offset = 0.0;
    }
    while *first + 1 < len {
        let height = heights.get(*first);
        if *offset < height {
            break;
        }
        *offset -= height;
        *first += 1;
    }
}

fn place<F: FnMut(usize) -> f32>(
    heights: &mut Heights<F>,
    len: usize,
    viewport: f32,
    first: usize,
    offset: f32,
) -> (Vec<PlacedRow>, f32) {
    let mut rows = Vec::new();
    let mut y = -offset;
    let mut index = first;
    while index < len && (y < viewport || rows.is_empty()) {
        let height = heights.get(index);
        rows.push(PlacedRow { index, y, height });
        y += height;
        index += 1;
    }
    (rows, y)
}

/// Estimates the thumb from the average height of the rows on screen.
fn thumb(
    rows: &[PlacedRow],
    len: usize,
    viewport: f32,
    first: usize,
    offset: f32,
) -> Option<Thumb> {
    if rows.is_empty() || viewport <= 0.0 {
        return None;
    }
    let average = rows.iter().map(|row| row.height).sum::<f32>() / rows.len() as f32;
    let total = average * len as f32;
    if total <= viewport || total <= 0.0 {
        return None;
    }
    let start = ((first as f32 * average + offset) / total).min(1.0);
    let end = (start + viewport / total).min(1.0);
    Some(Thumb { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: f32 = 20.0;

    fn fixed(_: usize) -> f32 {
        ROW
    }

    fn indices(layout: &ListLayout) -> Vec<usize> {
        layout.rows.iter().map(|row| row.index).collect()
    }

    #[test]
    fn places_only_visible_rows() {
        let mut list = List::default();
        let mut measured = Vec::new();
        let layout = list.layout(50.0, 100, |i| {
            measured.push(i);
            ROW
        });

        assert_eq!(indices(&layout), vec![0, 1, 2]);
        assert_eq!(layout.rows[2].y, 40.0);
        assert!(measured.iter().all(|&i| i < 3));
        assert!(list.position().before_end);
    }

    #[test]
    fn scrolling_moves_first_row() {
        let mut list = List::default();
        list.layout(50.0, 100, fixed);

        list.scroll_by(45.0);
        let layout = list.layout(50.0, 100, fixed);
        assert_eq!(list.position().first, 2);
        assert_eq!(list.position().offset, 5.0);
        assert_eq!(layout.rows[0].index, 2);
        assert_eq!(layout.rows[0].y, -5.0);
    }

    #[test]
    fn cannot_scroll_above_start() {
        let mut list = List::default();
        list.scroll_by(30.0);
        list.layout(50.0, 100, fixed);
        list.scroll_by(-1000.0);
        let layout = list.layout(50.0, 100, fixed);
        assert_eq!(list.position().first, 0);
        assert_eq!(list.position().offset, 0.0);
        assert_eq!(layout.rows[0].y, 0.0);
    }

    #[test]
    fn cannot_scroll_past_end() {
        let mut list = List::default();
        list.scroll_by(10_000.0);
        let layout = list.layout(50.0, 10, fixed);

        let last = layout.rows.last().unwrap();
        assert_eq!(last.index, 9);
        assert_eq!(last.y + last.height, 50.0);
        assert!(!list.position().before_end);
        assert_eq!(list.position().first, 7);
        assert_eq!(list.position().offset, 10.0);
    }

    #[test]
    fn jumps_to_end_and_back() {
        let mut list = List::default();
        list.scroll_to_end();
        let layout = list.layout(50.0, 10, fixed);
        assert_eq!(layout.rows.last().unwrap().index, 9);
        assert!(!list.position().before_end);

        list.scroll_to_start();
        let layout = list.layout(50.0, 10, fixed);
        assert_eq!(indices(&layout), vec![0, 1, 2]);
        assert_eq!(
            list.position(),
            Position {
                first: 0,
                offset: 0.0,
                before_end: true,
            }
        );
    }

    #[test]
    fn pages_scroll_by_viewport() {
        let mut list = List::default();
        list.scroll_pages(1.0);
        list.layout(60.0, 100, fixed);
        assert_eq!(list.position().first, 3);
        assert_eq!(list.position().offset, 0.0);
    }

    #[test]
    fn short_content_does_not_scroll() {
        let mut list = List::default();
        list.scroll_by(100.0);
        let layout = list.layout(200.0, 3, fixed);
        assert_eq!(indices(&layout), vec![0, 1, 2]);
        assert_eq!(layout.rows[0].y, 0.0);
        assert_eq!(layout.scrollbar, None);
        assert!(!list.position().before_end);
    }

    #[test]
    fn shrinking_list_clamps_position() {
        let mut list = List::default();
        list.scroll_by(500.0);
        list.layout(50.0, 100, fixed);
        let layout = list.layout(50.0, 4, fixed);
        assert_eq!(indices(&layout), vec![1, 2, 3]);
        assert_eq!(layout.rows.last().unwrap().y + ROW, 50.0);

        let layout = list.layout(50.0, 0, fixed);
        assert!(layout.rows.is_empty());
        assert_eq!(list.position(), Position::default());
    }

    #[test]
    fn thumb_tracks_position() {
        let mut list = List::default();
        let layout = list.layout(50.0, 10, fixed);
        assert_eq!(layout.scrollbar, Some(Thumb { start: 0.0, end: 0.25 }));

        list.scroll_to_end();
        let layout = list.layout(50.0, 10, fixed);
        let thumb = layout.scrollbar.unwrap();
        assert!((thumb.start - 0.75).abs() < 1e-6);
        assert!((thumb.end - 1.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_scroll_is_ignored() {
        let mut list = List::default();
        list.scroll_by(f32::NAN);
        list.scroll_pages(f32::INFINITY);
        list.layout(50.0, 100, fixed);
        assert_eq!(list.position().first, 0);
        assert_eq!(list.position().offset, 0.0);
    }
}
