use crate::{fonts::Run, layout::Point};
use wgpu_glyph::{FontId, HorizontalAlign, Layout, Section, Text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    Middle,
    End,
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Start
    }
}

/// Text ready to be measured and queued: the string, its font runs and how
/// to paint it. Sizes are in physical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub runs: Vec<Run>,
    pub scale: f32,
    pub color: [f32; 4],
    pub alignment: Alignment,
    pub line_height: f32,
}

impl TextBlock {
    /// Section anchored inside the box starting at `origin`, wrapping at
    /// `width`.
    pub fn section(&self, origin: Point, width: f32) -> Section<'_> {
        let (x, h_align) = match self.alignment {
            Alignment::Start => (origin.x, HorizontalAlign::Left),
            Alignment::Middle => (origin.x + width / 2.0, HorizontalAlign::Center),
            Alignment::End => (origin.x + width, HorizontalAlign::Right),
        };

        let text = self
            .runs
            .iter()
            .map(|run| {
                Text::new(&self.text[run.range.clone()])
                    .with_scale(self.scale)
                    .with_color(self.color)
                    .with_font_id(run.font)
            })
            .collect();

        Section::default()
            .with_screen_position((x, origin.y))
            .with_bounds((width.max(0.0), f32::INFINITY))
            .with_layout(Layout::default_wrap().h_align(h_align))
            .with_text(text)
    }

    pub fn primary_font(&self) -> FontId {
        self.runs.first().map_or(FontId(0), |run| run.font)
    }
}
