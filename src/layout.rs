use crate::{
    list::List,
    text::{Alignment, TextBlock},
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    fn translate(self, offset: Point) -> Rect {
        Rect {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }
}

/// Bounds a widget's size must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Size,
    pub max: Size,
}

impl Constraints {
    pub fn tight(size: Size) -> Self {
        Constraints {
            min: size,
            max: size,
        }
    }

    pub fn loose(max: Size) -> Self {
        Constraints {
            min: Size::default(),
            max,
        }
    }

    pub fn constrain(&self, size: Size) -> Size {
        Size {
            width: size.width.max(self.min.width).min(self.max.width),
            height: size.height.max(self.min.height).min(self.max.height),
        }
    }
}

/// Text measurement, provided by whatever owns the glyph cache.
pub trait Measure {
    fn measure(&mut self, block: &TextBlock, max_width: f32) -> Size;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        block: TextBlock,
        origin: Point,
        width: f32,
        clip: Option<Rect>,
    },
    Rect {
        rect: Rect,
        color: [f32; 4],
    },
}

impl DrawOp {
    fn translate(&mut self, offset: Point) {
        match self {
            DrawOp::Text { origin, clip, .. } => {
                origin.x += offset.x;
                origin.y += offset.y;
                if let Some(clip) = clip {
                    *clip = clip.translate(offset);
                }
            }
            DrawOp::Rect { rect, .. } => *rect = rect.translate(offset),
        }
    }
}

pub struct LayoutContext<'a> {
    pub measure: &'a mut dyn Measure,
    pub ops: Vec<DrawOp>,
}

impl<'a> LayoutContext<'a> {
    pub fn new(measure: &'a mut dyn Measure) -> Self {
        LayoutContext {
            measure,
            ops: Vec::new(),
        }
    }

    /// Runs `f`, then shifts everything it drew by `offset`.
    fn offset<R>(&mut self, offset: Point, f: impl FnOnce(&mut Self) -> R) -> R {
        let start = self.ops.len();
        let result = f(self);
        for op in &mut self.ops[start..] {
            op.translate(offset);
        }
        result
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const fn uniform(v: f32) -> Self {
        Insets {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub const fn top(v: f32) -> Self {
        Insets {
            top: v,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }
}

pub enum FlexChild<'a> {
    Rigid(Widget<'a>),
    Flexed(f32, Widget<'a>),
}

pub struct ListStyle {
    pub scrollbar_width: f32,
    pub track: [f32; 4],
    pub thumb: [f32; 4],
}

pub struct ListView<'a> {
    pub state: &'a mut List,
    pub len: usize,
    pub row: Box<dyn Fn(usize) -> TextBlock + 'a>,
    pub style: ListStyle,
}

pub enum Widget<'a> {
    Label(TextBlock),
    Inset(Insets, Box<Widget<'a>>),
    /// Vertical flex.
    Flex(Vec<FlexChild<'a>>),
    List(ListView<'a>),
}

impl<'a> Widget<'a> {
    pub fn inset(insets: Insets, child: Widget<'a>) -> Self {
        Widget::Inset(insets, Box::new(child))
    }

    pub fn layout(self, cx: &mut LayoutContext<'_>, constraints: Constraints) -> Size {
        match self {
            Widget::Label(block) => layout_label(cx, constraints, block),
            Widget::Inset(insets, child) => layout_inset(cx, constraints, insets, *child),
            Widget::Flex(children) => layout_flex(cx, constraints, children),
            Widget::List(list) => layout_list(cx, constraints, list),
        }
    }
}

fn layout_label(cx: &mut LayoutContext<'_>, constraints: Constraints, block: TextBlock) -> Size {
    let width = constraints.max.width;
    let measured = cx.measure.measure(&block, width);
    let size = match block.alignment {
        Alignment::Start => constraints.constrain(measured),
        Alignment::Middle | Alignment::End => {
            constraints.constrain(Size::new(width, measured.height))
        }
    };
    cx.ops.push(DrawOp::Text {
        block,
        origin: Point::default(),
        width,
        clip: None,
    });
    size
}

fn layout_inset(
    cx: &mut LayoutContext<'_>,
    constraints: Constraints,
    insets: Insets,
    child: Widget<'_>,
) -> Size {
    let horizontal = insets.left + insets.right;
    let vertical = insets.top + insets.bottom;
    let shrink = |size: Size| Size {
        width: (size.width - horizontal).max(0.0),
        height: (size.height - vertical).max(0.0),
    };
    let inner = Constraints {
        min: shrink(constraints.min),
        max: shrink(constraints.max),
    };

    let child_size = cx.offset(Point::new(insets.left, insets.top), |cx| {
        child.layout(cx, inner)
    });
    constraints.constrain(Size::new(
        child_size.width + horizontal,
        child_size.height + vertical,
    ))
}

fn layout_flex(
    cx: &mut LayoutContext<'_>,
    constraints: Constraints,
    children: Vec<FlexChild<'_>>,
) -> Size {
    let max_height = constraints.max.height;
    let total_weight: f32 = children
        .iter()
        .map(|child| match child {
            FlexChild::Flexed(weight, _) => weight.max(0.0),
            FlexChild::Rigid(_) => 0.0,
        })
        .sum();

    // Each child draws into its own op list so children can be placed in
    // order once every height is known.
    let mut laid_out: Vec<Option<(Size, Vec<DrawOp>)>> =
        (0..children.len()).map(|_| None).collect();
    let mut flexed = Vec::new();
    let mut used = 0.0;

    for (index, child) in children.into_iter().enumerate() {
        match child {
            FlexChild::Rigid(widget) => {
                let remaining = (max_height - used).max(0.0);
                let child_constraints =
                    Constraints::loose(Size::new(constraints.max.width, remaining));
                let (size, ops) = layout_detached(cx, widget, child_constraints);
                used += size.height;
                laid_out[index] = Some((size, ops));
            }
            FlexChild::Flexed(weight, widget) => flexed.push((index, weight.max(0.0), widget)),
        }
    }

    let free = (max_height - used).max(0.0);
    for (index, weight, widget) in flexed {
        let height = if total_weight > 0.0 {
            free * weight / total_weight
        } else {
            0.0
        };
        let child_constraints = Constraints {
            min: Size::new(0.0, height),
            max: Size::new(constraints.max.width, height),
        };
        laid_out[index] = Some(layout_detached(cx, widget, child_constraints));
    }

    let mut y = 0.0;
    let mut width: f32 = 0.0;
    for (size, mut ops) in laid_out.into_iter().flatten() {
        for op in &mut ops {
            op.translate(Point::new(0.0, y));
        }
        cx.ops.append(&mut ops);
        y += size.height;
        width = width.max(size.width);
    }

    constraints.constrain(Size::new(width, y))
}

fn layout_detached(
    cx: &mut LayoutContext<'_>,
    widget: Widget<'_>,
    constraints: Constraints,
) -> (Size, Vec<DrawOp>) {
    let start = cx.ops.len();
    let size = widget.layout(cx, constraints);
    let ops = cx.ops.split_off(start);
    (size, ops)
}

fn layout_list(cx: &mut LayoutContext<'_>, constraints: Constraints, list: ListView<'_>) -> Size {
    let ListView {
        state,
        len,
        row,
        style,
    } = list;
    let viewport = constraints.max;
    let row_width = (viewport.width - style.scrollbar_width).max(0.0);

    let mut blocks = HashMap::new();
    let measure = &mut *cx.measure;
    let placed = state.layout(viewport.height, len, |index| {
        let block = row(index);
        let height = measure.measure(&block, row_width).height.max(block.line_height);
        blocks.insert(index, block);
        height
    });

    let clip = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    for row in &placed.rows {
        let block = match blocks.remove(&row.index) {
            Some(block) => block,
            None => continue,
        };
        cx.ops.push(DrawOp::Text {
            block,
            origin: Point::new(0.0, row.y),
            width: row_width,
            clip: Some(clip),
        });
    }

    if let Some(thumb) = placed.scrollbar {
        let x = viewport.width - style.scrollbar_width;
        cx.ops.push(DrawOp::Rect {
            rect: Rect::new(x, 0.0, style.scrollbar_width, viewport.height),
            color: style.track,
        });
        cx.ops.push(DrawOp::Rect {
            rect: Rect::new(
                x,
                thumb.start * viewport.height,
                style.scrollbar_width,
                (thumb.end - thumb.start) * viewport.height,
            ),
            color: style.thumb,
        });
    }

    constraints.constrain(viewport)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fonts::Run;
    use wgpu_glyph::FontId;

    /// Every char advances half the scale; lines are `line_height` tall.
    pub(crate) struct FixedAdvance;

    impl Measure for FixedAdvance {
        fn measure(&mut self, block: &TextBlock, max_width: f32) -> Size {
            let advance = block.scale / 2.0;
            let width = block.text.chars().count() as f32 * advance;
            let lines = if max_width > 0.0 {
                (width / max_width).ceil().max(1.0)
            } else {
                1.0
            };
            Size::new(width.min(max_width), lines * block.line_height)
        }
    }

    pub(crate) fn block(text: &str, alignment: Alignment) -> TextBlock {
        TextBlock {
            text: text.to_owned(),
            runs: vec![Run {
                range: 0..text.len(),
                font: FontId(0),
            }],
            scale: 20.0,
            color: [0.0, 0.0, 0.0, 1.0],
            alignment,
            line_height: 25.0,
        }
    }

    fn text_origins(ops: &[DrawOp]) -> Vec<(String, Point)> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { block, origin, .. } => Some((block.text.clone(), *origin)),
                DrawOp::Rect { .. } => None,
            })
            .collect()
    }

    #[test]
    fn label_uses_measured_size() {
        let mut measure = FixedAdvance;
        let mut cx = LayoutContext::new(&mut measure);
        let size = Widget::Label(block("hello", Alignment::Start))
            .layout(&mut cx, Constraints::loose(Size::new(400.0, 400.0)));
        assert_eq!(size, Size::new(50.0, 25.0));
        assert_eq!(cx.ops.len(), 1);
    }

    #[test]
    fn centered_label_takes_full_width() {
        let mut measure = FixedAdvance;
        let mut cx = LayoutContext::new(&mut measure);
        let size = Widget::Label(block("Fonts", Alignment::Middle))
            .layout(&mut cx, Constraints::loose(Size::new(400.0, 400.0)));
        assert_eq!(size, Size::new(400.0, 25.0));
        match &cx.ops[0] {
            DrawOp::Text { width, .. } => assert_eq!(*width, 400.0),
            op => panic!("unexpected op {:?}", op),
        }
    }

    #[test]
    fn inset_offsets_and_shrinks() {
        let mut measure = FixedAdvance;
        let mut cx = LayoutContext::new(&mut measure);
        let size = Widget::inset(
            Insets::uniform(30.0),
            Widget::Label(block("hello", Alignment::Middle)),
        )
        .layout(&mut cx, Constraints::loose(Size::new(400.0, 400.0)));

        assert_eq!(size, Size::new(400.0, 85.0));
        match &cx.ops[0] {
            DrawOp::Text { origin, width, .. } => {
                assert_eq!(*origin, Point::new(30.0, 30.0));
                assert_eq!(*width, 340.0);
            }
            op => panic!("unexpected op {:?}", op),
        }
    }

    #[test]
    fn inset_never_goes_negative() {
        let mut measure = FixedAdvance;
        let mut cx = LayoutContext::new(&mut measure);
        let size = Widget::inset(Insets::uniform(30.0), Widget::Flex(Vec::new()))
            .layout(&mut cx, Constraints::tight(Size::new(40.0, 40.0)));
        assert_eq!(size, Size::new(40.0, 40.0));
    }

    #[test]
    fn flex_stacks_rigid_and_gives_rest_to_flexed() {
        let mut measure = FixedAdvance;
        let mut cx = LayoutContext::new(&mut measure);
        let mut list = List::default();
        let rows = ListView {
            state: &mut list,
            len: 2,
            row: Box::new(|i| block(&format!("row {}", i), Alignment::Start)),
            style: ListStyle {
                scrollbar_width: 0.0,
                track: [0.0; 4],
                thumb: [0.0; 4],
            },
        };

        let size = Widget::Flex(vec![
            FlexChild::Rigid(Widget::Label(block("title", Alignment::Start))),
            FlexChild::Flexed(1.0, Widget::List(rows)),
            FlexChild::Rigid(Widget::Label(block("footer", Alignment::Start))),
        ])
        .layout(&mut cx, Constraints::tight(Size::new(300.0, 200.0)));

        assert_eq!(size, Size::new(300.0, 200.0));
        assert_eq!(
            text_origins(&cx.ops),
            vec![
                ("title".to_owned(), Point::new(0.0, 0.0)),
                ("row 0".to_owned(), Point::new(0.0, 25.0)),
                ("row 1".to_owned(), Point::new(0.0, 50.0)),
                ("footer".to_owned(), Point::new(0.0, 175.0)),
            ]
        );
        match &cx.ops[1] {
            DrawOp::Text { clip, .. } => {
                assert_eq!(*clip, Some(Rect::new(0.0, 25.0, 300.0, 150.0)))
            }
            op => panic!("unexpected op {:?}", op),
        }
    }

    #[test]
    fn overflowing_list_draws_scrollbar() {
        let mut measure = FixedAdvance;
        let mut cx = LayoutContext::new(&mut measure);
        let mut list = List::default();
        let view = ListView {
            state: &mut list,
            len: 20,
            row: Box::new(|i| block(&format!("row {}", i), Alignment::Start)),
            style: ListStyle {
                scrollbar_width: 6.0,
                track: [0.0, 0.0, 0.0, 0.1],
                thumb: [0.0, 0.0, 0.0, 0.5],
            },
        };

        Widget::List(view).layout(&mut cx, Constraints::tight(Size::new(300.0, 100.0)));

        let texts = text_origins(&cx.ops);
        assert_eq!(texts.len(), 4);
        let rects: Vec<Rect> = cx
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { rect, .. } => Some(*rect),
                DrawOp::Text { .. } => None,
            })
            .collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(294.0, 0.0, 6.0, 100.0));
        assert_eq!(rects[1].y, 0.0);
        assert!((rects[1].height - 20.0).abs() < 0.001);
    }
}
