use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, progress_bar, row, text},
};
use time::OffsetDateTime;

use crate::{
    core::{
        catalog::{LoanRecord, LoanStatus, my_loans},
        money::format_amount,
        route::{NavPayload, Route},
    },
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, back, navigate},
        widgets::{card, field, page},
    },
};

#[derive(Debug, Clone)]
pub struct MyLoansScreen {
    loans: Vec<LoanRecord>,
}

#[derive(Debug, Clone)]
pub enum MyLoansMessage {
    Back,
    MyAssets,
}

impl MyLoansScreen {
    pub fn new() -> Self {
        Self { loans: my_loans() }
    }
}

fn loan_card(loan: &LoanRecord, now: OffsetDateTime) -> Element<'_, MyLoansMessage> {
    let days = loan.days_remaining(now);
    let remaining = if days < 0 {
        text(format!("Overdue by {} days", -days)).style(text::danger)
    } else if loan.is_urgent(now) {
        text(format!("{days} days left")).style(text::warning)
    } else {
        text(format!("{days} days left")).style(text::secondary)
    };
    let status = match loan.status {
        LoanStatus::Active => container(text("Active")).style(container::success),
        LoanStatus::Repaid => container(text("Repaid")).style(container::secondary),
    }
    .padding([2, 8]);

    card(
        column![
            row![
                text(&loan.asset.name).size(20).width(Length::Fill),
                status,
            ]
            .align_y(Center),
            field("Principal", format_amount(loan.principal)),
            field("Received", format_amount(loan.received)),
            field("Interest", format_amount(loan.interest)),
            field("Start", loan.start.to_string()),
            field("Due", loan.due.to_string()),
            row![
                progress_bar(0.0..=100.0, loan.progress(now) as f32),
                remaining,
            ]
            .spacing(12)
            .align_y(Center),
        ]
        .spacing(6),
    )
}

impl Screen for MyLoansScreen {
    type Message = MyLoansMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let now = OffsetDateTime::now_utc();
        let loans: Element<'_, MyLoansMessage> = if self.loans.is_empty() {
            text("No active loans").style(text::secondary).into()
        } else {
            column(self.loans.iter().map(|loan| loan_card(loan, now)))
                .spacing(12)
                .into()
        };
        let content = column![
            loans,
            button("Back to my assets")
                .style(button::secondary)
                .on_press(MyLoansMessage::MyAssets),
        ]
        .spacing(16);

        page("My Loans", Some(MyLoansMessage::Back), content).map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            MyLoansMessage::Back => back(),
            MyLoansMessage::MyAssets => navigate(Route::MyAssets, NavPayload::None),
        }
    }
}
