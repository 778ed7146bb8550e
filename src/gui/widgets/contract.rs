use iced::{
    Element, Length,
    widget::{column, scrollable, scrollable::Viewport, text},
};

use crate::core::{catalog::CONTRACT_SECTIONS, gate::ScrollMetrics};

fn metrics(viewport: Viewport) -> ScrollMetrics {
    ScrollMetrics {
        offset: viewport.absolute_offset().y,
        content_height: viewport.content_bounds().height,
        viewport_height: viewport.bounds().height,
    }
}

/// The tokenization agreement in a fixed-height scroll area.
pub fn contract_text<'a, Message: 'a>(
    on_scroll: fn(ScrollMetrics) -> Message,
) -> Element<'a, Message> {
    let clauses = column(CONTRACT_SECTIONS.iter().map(|section| {
        column![text(section.title).size(18), text(section.body)]
            .spacing(6)
            .into()
    }))
    .spacing(16)
    .padding([0, 16]);

    scrollable(clauses)
        .height(400)
        .width(Length::Fill)
        .on_scroll(move |viewport| on_scroll(metrics(viewport)))
        .into()
}
