use iced::{
    Element, Task,
    widget::{button, checkbox, column, row, text},
};
use time::OffsetDateTime;

use crate::{
    core::{
        Notice,
        loan::Agreement,
        money::{format_amount, format_percent},
        route::{LoanPayload, NavPayload, Route},
    },
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, back, navigate},
        widgets::{card, field, page},
    },
};

#[derive(Debug, Clone)]
pub struct LoanConfirmScreen {
    loan: LoanPayload,
    agreement: Agreement,
}

#[derive(Debug, Clone)]
pub enum LoanConfirmMessage {
    Back,
    Agree(bool),
    Confirm,
}

impl LoanConfirmScreen {
    pub fn new(loan: LoanPayload) -> Self {
        Self {
            loan,
            agreement: Agreement::default(),
        }
    }
}

impl Screen for LoanConfirmScreen {
    type Message = LoanConfirmMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let LoanPayload { asset, quote } = &self.loan;
        let due = quote.due_date(OffsetDateTime::now_utc().date());
        let content = column![
            card(
                column![
                    text("Collateral").size(18),
                    field("Asset", asset.name.as_str()),
                    field("Token", asset.token_id.as_str()),
                    field("Valuation", format_amount(asset.valuation)),
                ]
                .spacing(6)
            ),
            card(
                column![
                    text("Loan").size(18),
                    field("Principal", format_amount(quote.principal)),
                    field("Term", quote.term.to_string()),
                    field("Annual rate", format_percent(quote.annual_rate * 100.0)),
                    field("Interest", format_amount(quote.interest)),
                    field("You receive", format_amount(quote.net_disbursed)),
                    field("Due", due.to_string()),
                ]
                .spacing(6)
            ),
            text(
                "If the loan is not repaid by the due date the collateral NFT may be liquidated."
            )
            .style(text::warning),
            checkbox(self.agreement.is_agreed())
                .label("I have read and agree to the loan terms")
                .on_toggle(LoanConfirmMessage::Agree),
            row![
                button("Back")
                    .style(button::secondary)
                    .on_press(LoanConfirmMessage::Back),
                button("Confirm loan").on_press_maybe(
                    self.agreement
                        .is_agreed()
                        .then_some(LoanConfirmMessage::Confirm)
                ),
            ]
            .spacing(12),
        ]
        .spacing(16);

        page("Confirm Loan", Some(LoanConfirmMessage::Back), content)
            .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LoanConfirmMessage::Back => back(),
            LoanConfirmMessage::Agree(agreed) => {
                self.agreement.set(agreed);
                Task::none()
            }
            LoanConfirmMessage::Confirm => match self.agreement.confirm() {
                Ok(()) => {
                    tracing::info!(
                        asset = %self.loan.asset.id,
                        principal = self.loan.quote.principal,
                        "loan confirmed"
                    );
                    navigate(Route::LoanProcessing, NavPayload::Loan(self.loan.clone()))
                }
                Err(err) => {
                    state.notify(Notice::rejected("Agreement required", &err));
                    Task::none()
                }
            },
        }
    }
}
