use crate::{
    layout::{DrawOp, Measure, Point, Rect, Size},
    rectangle_brush::RectangleBrush,
    text::TextBlock,
};
use wgpu_glyph::{GlyphBrush, GlyphCruncher};

impl Measure for GlyphBrush<()> {
    fn measure(&mut self, block: &TextBlock, max_width: f32) -> Size {
        match self.glyph_bounds(block.section(Point::default(), max_width)) {
            Some(bounds) => Size::new(bounds.width(), bounds.height().max(block.line_height)),
            None => Size::new(0.0, block.line_height),
        }
    }
}

/// Sorts draw ops into the brushes. Text with a clip rect is held back so it
/// can be drawn in its own scissored pass.
pub struct RenderContext<'a> {
    pub glyph_brush: &'a mut GlyphBrush<()>,
    pub rectangle_brush: &'a mut RectangleBrush,
    pub clipped: Vec<(Rect, TextBlock, Point, f32)>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        glyph_brush: &'a mut GlyphBrush<()>,
        rectangle_brush: &'a mut RectangleBrush,
    ) -> Self {
        RenderContext {
            glyph_brush,
            rectangle_brush,
            clipped: Vec::new(),
        }
    }

    pub fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::Text {
                block,
                origin,
                width,
                clip: None,
            } => self.draw_text(&block, origin, width),
            DrawOp::Text {
                block,
                origin,
                width,
                clip: Some(clip),
            } => self.clipped.push((clip, block, origin, width)),
            DrawOp::Rect { rect, color } => self.draw_rect(rect, color),
        }
    }

    pub fn draw_text(&mut self, block: &TextBlock, origin: Point, width: f32) {
        self.glyph_brush.queue(block.section(origin, width));
    }

    pub fn draw_rect(&mut self, rect: Rect, color: [f32; 4]) {
        self.rectangle_brush.queue_rectangle(
            rect.x.round() as i32,
            rect.y.round() as i32,
            rect.width.round() as i32,
            rect.height.round() as i32,
            color,
        );
    }

    /// Removes the held back text, grouped by clip rect in draw order.
    pub fn take_clipped(&mut self) -> Vec<(Rect, Vec<(TextBlock, Point, f32)>)> {
        let mut groups: Vec<(Rect, Vec<(TextBlock, Point, f32)>)> = Vec::new();
        for (clip, block, origin, width) in self.clipped.drain(..) {
            match groups.last_mut() {
                Some((rect, texts)) if *rect == clip => texts.push((block, origin, width)),
                _ => groups.push((clip, vec![(block, origin, width)])),
            }
        }
        groups
    }
}

/// Scissor region for `clip`, limited to the target. `None` when nothing of
/// it is visible.
pub fn scissor(clip: Rect, size: (u32, u32)) -> Option<wgpu_glyph::Region> {
    let x0 = clip.x.max(0.0).floor() as u32;
    let y0 = clip.y.max(0.0).floor() as u32;
    let x1 = ((clip.x + clip.width).max(0.0).ceil() as u32).min(size.0);
    let y1 = ((clip.y + clip.height).max(0.0).ceil() as u32).min(size.1);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(wgpu_glyph::Region {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    })
}
