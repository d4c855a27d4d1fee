use crate::{
    error::{Error, Result},
    fonts::{Font, FontCollection},
    text::{Alignment, TextBlock},
    unit::{Metric, Sp},
};

pub struct Theme {
    pub fonts: FontCollection,
    pub fg: [f32; 4],
    pub bg: wgpu::Color,
    pub text_size: Sp,
    pub scrollbar_track: [f32; 4],
    pub scrollbar_thumb: [f32; 4],
}

impl Theme {
    pub fn new(fonts: FontCollection) -> Result<Theme> {
        if fonts.is_empty() {
            return Err(Error::NoFonts);
        }
        Ok(Theme {
            fonts,
            fg: [0.0, 0.0, 0.0, 1.0],
            bg: wgpu::Color::WHITE,
            text_size: Sp(16.0),
            scrollbar_track: [0.0, 0.0, 0.0, 0.05],
            scrollbar_thumb: [0.0, 0.0, 0.0, 0.35],
        })
    }

    pub fn h2<'a>(&'a self, text: &str) -> LabelStyle<'a> {
        self.label(3.75, text)
    }

    pub fn h6<'a>(&'a self, text: &str) -> LabelStyle<'a> {
        self.label(1.25, text)
    }

    pub fn body1<'a>(&'a self, text: &str) -> LabelStyle<'a> {
        self.label(1.0, text)
    }

    fn label<'a>(&'a self, scale: f32, text: &str) -> LabelStyle<'a> {
        LabelStyle {
            theme: self,
            text: text.to_owned(),
            font: Font::default(),
            size: Sp(self.text_size.0 * scale),
            color: self.fg,
            alignment: Alignment::Start,
        }
    }
}

pub struct LabelStyle<'a> {
    theme: &'a Theme,
    pub text: String,
    pub font: Font,
    pub size: Sp,
    pub color: [f32; 4],
    pub alignment: Alignment,
}

impl LabelStyle<'_> {
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn build(self, metric: &Metric) -> TextBlock {
        let fonts = &self.theme.fonts;
        let scale = metric.sp(self.size);
        let runs = fonts.segment(&self.text, &self.font);
        let line_height = match fonts.resolve(&self.font) {
            Some(id) => fonts.line_height(id, scale),
            None => scale,
        };
        TextBlock {
            text: self.text,
            runs,
            scale,
            color: self.color,
            alignment: self.alignment,
            line_height,
        }
    }
}
