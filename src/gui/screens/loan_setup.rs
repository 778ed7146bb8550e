use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, row, slider, space, text},
};

use crate::{
    core::{
        Notice,
        catalog::{AssetRecord, default_loan_asset},
        loan::{LoanCalculator, LoanQuote, LoanTerm},
        money::{format_amount, format_percent},
        route::{LoanPayload, NavPayload, Route},
    },
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, back, navigate, resolve_asset},
        widgets::{card, field, page},
    },
};

#[derive(Debug, Clone)]
pub struct LoanSetupScreen {
    asset: AssetRecord,
    /// `None` when the asset is worth too little to borrow against.
    calculator: Option<LoanCalculator>,
    quote: Option<LoanQuote>,
}

#[derive(Debug, Clone)]
pub enum LoanSetupMessage {
    Back,
    Principal(f64),
    Term(LoanTerm),
    Continue,
}

impl LoanSetupScreen {
    pub fn new(asset_id: &str, payload: &NavPayload, state: &AppState) -> Self {
        let asset = resolve_asset(asset_id, payload, default_loan_asset);
        let calculator = match LoanCalculator::new(asset.valuation, &state.config.lending) {
            Ok(calculator) => Some(calculator),
            Err(err) => {
                tracing::warn!(asset = %asset.id, %err, "asset not eligible for a loan");
                None
            }
        };
        Self {
            quote: calculator.as_ref().map(LoanCalculator::default_quote),
            asset,
            calculator,
        }
    }

    fn terms(
        &self,
        calculator: &LoanCalculator,
        quote: &LoanQuote,
    ) -> Element<'_, LoanSetupMessage> {
        let principal = slider(
            calculator.range().min() as f64..=calculator.range().top() as f64,
            quote.principal as f64,
            LoanSetupMessage::Principal,
        )
        .step(calculator.range().step() as f64);

        let terms = row(LoanTerm::ALL.into_iter().map(|term| {
            button(text(term.to_string()))
                .style(if term == quote.term {
                    button::primary
                } else {
                    button::secondary
                })
                .on_press(LoanSetupMessage::Term(term))
                .into()
        }))
        .spacing(8);

        column![
            card(
                column![
                    row![
                        text("Loan amount").width(Length::Fill),
                        text(format_amount(quote.principal)).size(22),
                    ]
                    .align_y(Center),
                    principal,
                    row![
                        text(format_amount(calculator.range().min())).style(text::secondary),
                        space::horizontal(),
                        text(format_amount(calculator.max_principal())).style(text::secondary),
                    ],
                ]
                .spacing(8)
            ),
            card(column![text("Term"), terms].spacing(8)),
            card(
                column![
                    field("Annual rate", format_percent(quote.annual_rate * 100.0)),
                    field("Interest", format_amount(quote.interest)),
                    field("You receive", format_amount(quote.net_disbursed)),
                    field("Repay at maturity", format_amount(quote.principal)),
                ]
                .spacing(6)
            ),
            button("Continue").on_press(LoanSetupMessage::Continue),
        ]
        .spacing(16)
        .into()
    }
}

impl Screen for LoanSetupScreen {
    type Message = LoanSetupMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let header = card(
            column![
                text(&self.asset.name).size(20),
                field("Valuation", format_amount(self.asset.valuation)),
            ]
            .spacing(6),
        );
        let body = match (&self.calculator, &self.quote) {
            (Some(calculator), Some(quote)) => self.terms(calculator, quote),
            _ => text("This asset is not eligible for a loan: its valuation is below the minimum.")
                .style(text::danger)
                .into(),
        };
        page(
            "Loan Setup",
            Some(LoanSetupMessage::Back),
            column![header, body].spacing(16),
        )
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LoanSetupMessage::Back => return back(),
            LoanSetupMessage::Principal(value) => {
                if let (Some(calculator), Some(quote)) = (&self.calculator, &mut self.quote) {
                    *quote = calculator.quote(value.round() as u64, quote.term);
                }
            }
            LoanSetupMessage::Term(term) => {
                if let (Some(calculator), Some(quote)) = (&self.calculator, &mut self.quote) {
                    *quote = calculator.quote(quote.principal, term);
                }
            }
            LoanSetupMessage::Continue => {
                let Some(quote) = self.quote else {
                    state.notify(Notice::error(
                        "Not eligible",
                        "This asset cannot be used as collateral",
                    ));
                    return Task::none();
                };
                return navigate(
                    Route::LoanConfirm,
                    NavPayload::Loan(LoanPayload {
                        asset: self.asset.clone(),
                        quote,
                    }),
                );
            }
        }
        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, catalog::my_assets};

    #[test]
    fn unknown_asset_falls_back_to_default() {
        let asset = resolve_asset("nft-999", &NavPayload::None, default_loan_asset);
        assert_eq!(asset, default_loan_asset());

        let watch = resolve_asset("nft-002", &NavPayload::None, default_loan_asset);
        assert_eq!(watch.valuation, 800_000);
    }

    #[test]
    fn slider_and_term_requote() {
        let mut state = AppState::new(Config::default());
        let mut screen = LoanSetupScreen::new("nft-001", &NavPayload::None, &state);
        let _ = screen.update(LoanSetupMessage::Principal(5_040_000.0), &mut state);
        let _ = screen.update(LoanSetupMessage::Term(LoanTerm::Days180), &mut state);

        let quote = screen.quote.expect("eligible");
        assert_eq!(quote.principal, 5_000_000);
        assert_eq!(quote.interest, 123_288);
        assert_eq!(quote.net_disbursed, 4_876_712);
    }

    #[test]
    fn handed_over_asset_wins() {
        let state = AppState::new(Config::default());
        let asset = my_assets().remove(2);
        let screen = LoanSetupScreen::new(&asset.id, &NavPayload::Asset(asset.clone()), &state);
        assert_eq!(screen.asset, asset);
        assert_eq!(screen.calculator.map(|c| c.max_principal()), Some(3_900_000));
    }
}
