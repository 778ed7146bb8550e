use iced::{
    Element, Task,
    widget::{button, column, row, text},
};
use time::OffsetDateTime;

use crate::{
    core::{
        money::format_amount,
        route::{LoanPayload, NavPayload, Route},
    },
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, navigate},
        widgets::{card, field, page},
    },
};

#[derive(Debug, Clone)]
pub struct LoanSuccessScreen {
    loan: LoanPayload,
}

#[derive(Debug, Clone)]
pub enum LoanSuccessMessage {
    MyLoans,
    MyAssets,
}

impl LoanSuccessScreen {
    pub fn new(loan: LoanPayload) -> Self {
        Self { loan }
    }
}

impl Screen for LoanSuccessScreen {
    type Message = LoanSuccessMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let quote = &self.loan.quote;
        let wallet = state
            .session
            .wallet
            .as_ref()
            .map(|wallet| wallet.short_address())
            .unwrap_or_else(|| "your wallet".to_string());
        let due = quote.due_date(OffsetDateTime::now_utc().date());
        let content = column![
            text("Your loan was approved").size(22).style(text::success),
            text(format!(
                "{} has been sent to {wallet}.",
                format_amount(quote.net_disbursed)
            )),
            card(
                column![
                    field("Collateral", self.loan.asset.name.as_str()),
                    field("Principal", format_amount(quote.principal)),
                    field("Interest", format_amount(quote.interest)),
                    field("Term", quote.term.to_string()),
                    field("Due", due.to_string()),
                ]
                .spacing(6)
            ),
            row![
                button("View my loans").on_press(LoanSuccessMessage::MyLoans),
                button("Back to my assets")
                    .style(button::secondary)
                    .on_press(LoanSuccessMessage::MyAssets),
            ]
            .spacing(12),
        ]
        .spacing(16);

        page::<LoanSuccessMessage>("Loan Approved", None, content)
            .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LoanSuccessMessage::MyLoans => navigate(Route::MyLoans, NavPayload::None),
            LoanSuccessMessage::MyAssets => navigate(Route::MyAssets, NavPayload::None),
        }
    }
}
