use crate::{
    config::Config,
    layout::{Constraints, DrawOp, LayoutContext, Measure, Size},
    list::List,
    page::{page, PageSpacing},
    theme::Theme,
    unit::{Dp, Metric, Sp},
};
use winit::{
    dpi::PhysicalSize,
    event::MouseScrollDelta,
    keyboard::{Key, NamedKey},
};

pub struct Demo {
    theme: Theme,
    greetings: Vec<String>,
    list: List,
    spacing: PageSpacing,
    line_scroll: Dp,
    metric: Metric,
    size: PhysicalSize<u32>,
}

impl Demo {
    pub fn new(config: &Config, theme: Theme, size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        Demo {
            theme,
            greetings: config.greetings.clone(),
            list: List::default(),
            spacing: PageSpacing {
                page_inset: Dp(config.page_inset),
                heading_gap: Sp(config.heading_gap),
                list_inset: Sp(config.list_inset),
                ..PageSpacing::default()
            },
            line_scroll: Dp(config.line_scroll),
            metric: Metric::new(scale_factor),
            size,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn update_size(&mut self, size: PhysicalSize<u32>) {
        self.size = size;
    }

    pub fn update_scale_factor(&mut self, scale_factor: f64) {
        self.metric = Metric::new(scale_factor);
    }

    pub fn scroll(&mut self, delta: f32) {
        self.list.scroll_by(delta);
    }

    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        // Positive wheel deltas mean "show earlier content".
        let px = match delta {
            MouseScrollDelta::LineDelta(_, lines) => -lines * self.metric.dp(self.line_scroll),
            MouseScrollDelta::PixelDelta(position) => -position.y as f32,
        };
        self.scroll(px);
    }

    /// Returns whether the key changed what is on screen.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        let line = self.metric.dp(self.line_scroll);
        match key {
            Key::Named(NamedKey::ArrowDown) => self.list.scroll_by(line),
            Key::Named(NamedKey::ArrowUp) => self.list.scroll_by(-line),
            Key::Named(NamedKey::PageDown) | Key::Named(NamedKey::Space) => {
                self.list.scroll_pages(1.0)
            }
            Key::Named(NamedKey::PageUp) => self.list.scroll_pages(-1.0),
            Key::Named(NamedKey::Home) => self.list.scroll_to_start(),
            Key::Named(NamedKey::End) => self.list.scroll_to_end(),
            _ => return false,
        }
        true
    }

    /// Lays out the page for the current surface size.
    pub fn layout(&mut self, measure: &mut dyn Measure) -> Vec<DrawOp> {
        let size = Size::new(self.size.width as f32, self.size.height as f32);
        let mut cx = LayoutContext::new(measure);
        page(
            &self.theme,
            &self.metric,
            &self.spacing,
            &mut self.list,
            &self.greetings,
        )
        .layout(&mut cx, Constraints::tight(size));
        log::trace!("list position {:?}", self.list.position());
        cx.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layout::tests::FixedAdvance, theme::tests::theme};
    use winit::dpi::PhysicalPosition;

    fn demo() -> Demo {
        Demo::new(&Config::default(), theme(), PhysicalSize::new(800, 700), 1.0)
    }

    fn first_row(demo: &mut Demo) -> String {
        demo.layout(&mut FixedAdvance)
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::Text { block, clip: Some(_), .. } => Some(block.text),
                _ => None,
            })
            .next()
            .unwrap()
    }

    #[test]
    fn wheel_down_moves_list_forward() {
        let mut demo = demo();
        assert_eq!(first_row(&mut demo), "• 👋🗺 🎉");

        demo.handle_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -3.0));
        first_row(&mut demo);
        assert!(demo.list.position().first > 0);

        demo.handle_mouse_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(
            0.0, 10_000.0,
        )));
        assert_eq!(first_row(&mut demo), "• 👋🗺 🎉");
    }

    #[test]
    fn navigation_keys_scroll() {
        let mut demo = demo();
        assert!(demo.handle_key(&Key::Named(NamedKey::End)));
        demo.layout(&mut FixedAdvance);
        assert!(!demo.list.position().before_end);

        assert!(demo.handle_key(&Key::Named(NamedKey::Home)));
        demo.layout(&mut FixedAdvance);
        assert_eq!(demo.list.position().first, 0);

        assert!(!demo.handle_key(&Key::Character("x".into())));
    }

    /// Pixels scrolled past the top of the list, and the viewport height.
    fn scrolled(demo: &mut Demo) -> (f32, f32) {
        let ops = demo.layout(&mut FixedAdvance);
        let (row, viewport) = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text {
                    block,
                    clip: Some(clip),
                    ..
                } => Some((block.line_height, clip.height)),
                _ => None,
            })
            .unwrap();
        let position = demo.list.position();
        (position.first as f32 * row + position.offset, viewport)
    }

    #[test]
    fn lines_and_pages_scroll_by_their_size() {
        let config = Config {
            greetings: (0..200).map(|i| format!("• row {}", i)).collect(),
            ..Config::default()
        };
        let mut demo = Demo::new(&config, theme(), PhysicalSize::new(800, 700), 1.0);
        let close = |a: f32, b: f32| assert!((a - b).abs() < 0.01, "{} != {}", a, b);

        let (top, viewport) = scrolled(&mut demo);
        close(top, 0.0);
        assert!(viewport > 0.0);

        demo.handle_key(&Key::Named(NamedKey::ArrowDown));
        demo.handle_key(&Key::Named(NamedKey::ArrowDown));
        close(scrolled(&mut demo).0, 80.0);
        demo.handle_key(&Key::Named(NamedKey::ArrowUp));
        close(scrolled(&mut demo).0, 40.0);

        demo.handle_key(&Key::Named(NamedKey::PageDown));
        close(scrolled(&mut demo).0, 40.0 + viewport);
        demo.handle_key(&Key::Named(NamedKey::Space));
        close(scrolled(&mut demo).0, 40.0 + 2.0 * viewport);
        demo.handle_key(&Key::Named(NamedKey::PageUp));
        close(scrolled(&mut demo).0, 40.0 + viewport);

        demo.handle_key(&Key::Named(NamedKey::ArrowUp));
        demo.handle_key(&Key::Named(NamedKey::PageUp));
        demo.handle_key(&Key::Named(NamedKey::ArrowUp));
        close(scrolled(&mut demo).0, 0.0);
    }

    #[test]
    fn layout_follows_surface_size() {
        let mut demo = demo();
        demo.update_size(PhysicalSize::new(400, 300));
        let ops = demo.layout(&mut FixedAdvance);
        match &ops[0] {
            DrawOp::Text { width, .. } => assert_eq!(*width, 340.0),
            op => panic!("unexpected op {:?}", op),
        }

        demo.update_scale_factor(2.0);
        let ops = demo.layout(&mut FixedAdvance);
        match &ops[0] {
            DrawOp::Text { width, block, .. } => {
                assert_eq!(*width, 280.0);
                assert_eq!(block.scale, 120.0);
            }
            op => panic!("unexpected op {:?}", op),
        }
    }
}
