use iced::{
    Element, Length,
    widget::{button, column, container, row, space, text},
};

use super::{PenEvent, contract_text, signature_pad};
use crate::core::gate::{ReadGate, ScrollMetrics, SignatureGate};

fn frame<'a, Message: 'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .style(container::rounded_box)
        .padding(24)
        .max_width(720)
        .into()
}

pub struct ContractDialog<Message> {
    pub on_scroll: fn(ScrollMetrics) -> Message,
    pub on_confirm: Message,
    pub on_close: Message,
}

/// Contract terms; confirming is only offered once the text was read to the end.
pub fn contract_dialog<'a, Message>(
    gate: &ReadGate,
    dialog: ContractDialog<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let read = gate.has_scrolled_to_bottom();
    let hint = if read {
        text("Thanks for reading the full agreement.").style(text::success)
    } else {
        text("Scroll to the end of the agreement to continue.").style(text::warning)
    };
    frame(
        column![
            text("Asset Tokenization Agreement").size(24),
            contract_text(dialog.on_scroll),
            hint,
            row![
                button("Cancel")
                    .style(button::secondary)
                    .on_press(dialog.on_close),
                space::horizontal(),
                button("I have read and agree").on_press_maybe(read.then_some(dialog.on_confirm)),
            ],
        ]
        .spacing(16),
    )
}

pub struct SignatureDialog<Message> {
    pub on_pen: fn(PenEvent) -> Message,
    pub on_auto_fill: Message,
    pub on_clear: Message,
    pub on_confirm: Message,
    pub on_close: Message,
}

pub fn signature_dialog<'a, Message>(
    gate: &'a SignatureGate,
    dialog: SignatureDialog<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let signed = gate.has_signed();
    frame(
        column![
            text("Sign the agreement").size(24),
            text("Draw your signature below, or sign electronically.").style(text::secondary),
            container(signature_pad(gate, dialog.on_pen))
                .style(container::bordered_box)
                .width(Length::Fill),
            row![
                button("Cancel")
                    .style(button::secondary)
                    .on_press(dialog.on_close),
                button("Clear")
                    .style(button::secondary)
                    .on_press(dialog.on_clear),
                button("Sign electronically")
                    .style(button::secondary)
                    .on_press(dialog.on_auto_fill),
                space::horizontal(),
                button("Confirm signature").on_press_maybe(signed.then_some(dialog.on_confirm)),
            ]
            .spacing(8),
        ]
        .spacing(16),
    )
}
