use crate::{
    fonts::{Font, HACK, NOTO},
    layout::{FlexChild, Insets, ListStyle, ListView, Widget},
    list::List,
    text::Alignment,
    theme::Theme,
    unit::{Dp, Metric, Sp},
};

/// Spacing of the page, in dp and sp as configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpacing {
    pub page_inset: Dp,
    pub heading_gap: Sp,
    pub list_inset: Sp,
    pub scrollbar_width: Dp,
}

impl Default for PageSpacing {
    fn default() -> Self {
        PageSpacing {
            page_inset: Dp(30.0),
            heading_gap: Sp(20.0),
            list_inset: Sp(20.0),
            scrollbar_width: Dp(6.0),
        }
    }
}

/// Builds the page: a bold centred title, one heading per typeface and the
/// greeting list filling the remaining height.
pub fn page<'a>(
    theme: &'a Theme,
    metric: &'a Metric,
    spacing: &PageSpacing,
    list: &'a mut List,
    greetings: &'a [String],
) -> Widget<'a> {
    let heading_gap = Insets::top(metric.sp(spacing.heading_gap));

    let title = theme
        .h2("Fonts")
        .font(Font::bold())
        .alignment(Alignment::Middle)
        .build(metric);
    let system = theme
        .h6("System: the platform's default sans-serif family")
        .build(metric);
    let hack = theme
        .h6("Hack: a typeface designed for source code")
        .font(Font::typeface(HACK))
        .build(metric);
    let noto = theme
        .h6("Noto: a font family with broad unicode coverage:")
        .font(Font::typeface(NOTO))
        .build(metric);

    let greetings = ListView {
        state: list,
        len: greetings.len(),
        row: Box::new(move |index| {
            theme
                .body1(&greetings[index])
                .font(Font::typeface(NOTO))
                .build(metric)
        }),
        style: ListStyle {
            scrollbar_width: metric.dp(spacing.scrollbar_width),
            track: theme.scrollbar_track,
            thumb: theme.scrollbar_thumb,
        },
    };

    Widget::inset(
        Insets::uniform(metric.dp(spacing.page_inset)),
        Widget::Flex(vec![
            FlexChild::Rigid(Widget::Label(title)),
            FlexChild::Rigid(Widget::inset(heading_gap, Widget::Label(system))),
            FlexChild::Rigid(Widget::inset(heading_gap, Widget::Label(hack))),
            FlexChild::Rigid(Widget::inset(heading_gap, Widget::Label(noto))),
            FlexChild::Flexed(
                1.0,
                Widget::inset(
                    Insets::uniform(metric.sp(spacing.list_inset)),
                    Widget::List(greetings),
                ),
            ),
        ]),
    )
}
