mod contract;
mod dialog;
mod signature;

pub use contract::contract_text;
pub use dialog::{ContractDialog, SignatureDialog, contract_dialog, signature_dialog};
pub use signature::{PenEvent, signature_pad};

use iced::{
    Alignment::Center,
    Color, Element, Length, Theme, border,
    widget::{
        button, center, column, container, container::Style, mouse_area, opaque, row, space,
        stack, text,
    },
};
use iced_widget::container::bordered_box;

use crate::core::{Notice, NoticeLevel, StepStatus, Stepper};

fn step_style(status: StepStatus) -> impl Fn(&Theme) -> Style {
    move |theme: &Theme| {
        let style = bordered_box(theme).border(border::width(5));
        let palette = theme.palette();
        match status {
            // done steps are grayed out
            StepStatus::Completed => {
                let mut rgba = palette.background.into_rgba8();
                rgba[0] /= 2;
                rgba[1] /= 2;
                rgba[2] /= 2;
                style.background(Color::from_rgb8(rgba[0], rgba[1], rgba[2]))
            }
            StepStatus::Active => style
                .background(palette.background)
                .border(border::width(5).color(palette.primary)),
            StepStatus::Upcoming => style.background(palette.background),
        }
    }
}

fn step_marker(index: usize, status: StepStatus) -> String {
    match status {
        StepStatus::Completed => "✓".to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Progress indicator of a multi-step flow.
pub fn steps<'a, Message: 'a>(stepper: &Stepper) -> Element<'a, Message> {
    column(stepper.iter().map(|(i, label, status)| {
        container(text(format!("{}  {}", step_marker(i, status), label)))
            .style(step_style(status))
            .width(Length::Fill)
            .padding(10)
            .into()
    }))
    .into()
}

/// Flow page: step list and `sidebar` on the left, `main_content` on the right.
pub fn layout<'a, Message>(
    stepper: &Stepper,
    sidebar: impl Into<Element<'a, Message>>,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(row![
        container(column![
            steps(stepper),
            container(sidebar.into()).height(Length::Fill),
        ])
        .width(Length::FillPortion(1)),
        container(main_content.into())
            .width(Length::FillPortion(4))
            .padding(20),
    ])
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

/// Standalone page with a title bar and an optional back button.
pub fn page<'a, Message>(
    title: &'a str,
    back: Option<Message>,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let header = row![
        button(text("←")).style(button::text).on_press_maybe(back),
        text(title).size(26),
    ]
    .spacing(12)
    .align_y(Center);

    container(
        column![header, content.into()]
            .spacing(20)
            .max_width(900),
    )
    .padding(24)
    .center_x(Length::Fill)
    .into()
}

pub fn card<'a, Message: 'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .style(bordered_box)
        .padding(16)
        .width(Length::Fill)
        .into()
}

/// A `label ... value` line.
pub fn field<'a, Message: 'a>(
    label: impl text::IntoFragment<'a>,
    value: impl text::IntoFragment<'a>,
) -> Element<'a, Message> {
    row![text(label).style(text::secondary), space::horizontal(), text(value)]
        .align_y(Center)
        .into()
}

/// Draw `dialog` above `base`. Clicking outside the dialog sends `on_blur`.
pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    dialog: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(dialog)).style(|_theme| {
                Style::default().background(Color {
                    a: 0.8,
                    ..Color::BLACK
                })
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

fn notice_style(level: NoticeLevel) -> fn(&Theme) -> Style {
    match level {
        NoticeLevel::Info => container::secondary,
        NoticeLevel::Success => container::success,
        NoticeLevel::Error => container::danger,
    }
}

/// Stack transient notices in the bottom right corner of `base`.
pub fn with_notices<'a, Message>(
    base: Element<'a, Message>,
    notices: &'a [(u64, Notice)],
    on_dismiss: fn(u64) -> Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    if notices.is_empty() {
        return base;
    }
    let toasts = column(notices.iter().map(|(id, notice)| {
        container(
            row![
                column![text(&notice.title).size(16), text(&notice.description).size(14)]
                    .spacing(4)
                    .width(Length::Fill),
                button(text("×")).style(button::text).on_press(on_dismiss(*id)),
            ]
            .align_y(Center),
        )
        .style(notice_style(notice.level))
        .padding(12)
        .width(360)
        .into()
    }))
    .spacing(8);

    stack![
        base,
        container(toasts)
            .align_right(Length::Fill)
            .align_bottom(Length::Fill)
            .padding(20),
    ]
    .into()
}
