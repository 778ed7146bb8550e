use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, progress_bar, row, slider, space, text},
};

use crate::{
    core::{
        Notice,
        catalog::{AssetRecord, default_fraction_asset},
        fraction::{FractionCalculator, FractionPlan},
        money::{format_amount, format_decimal, format_percent},
        route::{FractionPayload, NavPayload, Route},
    },
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, back, navigate, resolve_asset},
        widgets::{card, field, page},
    },
};

#[derive(Debug, Clone)]
pub struct FractionalizationScreen {
    asset: AssetRecord,
    calculator: Option<FractionCalculator>,
    plan: Option<FractionPlan>,
}

#[derive(Debug, Clone)]
pub enum FractionalizationMessage {
    Back,
    FragmentValue(f64),
    Continue,
}

impl FractionalizationScreen {
    pub fn new(asset_id: &str, payload: &NavPayload, state: &AppState) -> Self {
        let asset = resolve_asset(asset_id, payload, || default_fraction_asset(asset_id));
        let calculator = match FractionCalculator::new(asset.valuation, &state.config.lending) {
            Ok(calculator) => Some(calculator),
            Err(err) => {
                tracing::warn!(asset = %asset.id, %err, "asset cannot be fractionalized");
                None
            }
        };
        Self {
            plan: calculator.as_ref().map(FractionCalculator::default_plan),
            asset,
            calculator,
        }
    }

    fn planner(
        &self,
        calculator: &FractionCalculator,
        plan: &FractionPlan,
    ) -> Element<'_, FractionalizationMessage> {
        let range = calculator.range();
        column![
            card(
                column![
                    row![
                        text("Value to fractionalize").width(Length::Fill),
                        text(format_amount(plan.fragment_value)).size(22),
                    ]
                    .align_y(Center),
                    slider(
                        range.min() as f64..=range.top() as f64,
                        plan.fragment_value as f64,
                        FractionalizationMessage::FragmentValue,
                    )
                    .step(range.step() as f64),
                    row![
                        text(format_amount(range.min())).style(text::secondary),
                        space::horizontal(),
                        text(format!(
                            "{} (max {:.0}% LTV)",
                            format_amount(calculator.max_fragment_value()),
                            calculator.max_ltv() * 100.0
                        ))
                        .style(text::secondary),
                    ],
                ]
                .spacing(8)
            ),
            card(
                column![
                    field("Fragments", plan.fragment_count.to_string()),
                    field("Value per fragment", format_decimal(plan.value_per_fragment)),
                    field("Remaining value", format_amount(plan.remaining_value)),
                    progress_bar(0.0..=100.0, plan.used_percentage() as f32),
                    row![
                        text(format!("Fractionalized {}", format_percent(plan.used_percentage()))),
                        space::horizontal(),
                        text(format!("Kept {}", format_percent(plan.remaining_percentage())))
                            .style(text::secondary),
                    ],
                ]
                .spacing(6)
            ),
            button("Continue").on_press(FractionalizationMessage::Continue),
        ]
        .spacing(16)
        .into()
    }
}

impl Screen for FractionalizationScreen {
    type Message = FractionalizationMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let header = card(
            column![
                text(&self.asset.name).size(20),
                field("Token", self.asset.token_id.as_str()),
                field("Asset value", format_amount(self.asset.valuation)),
            ]
            .spacing(6),
        );
        let body = match (&self.calculator, &self.plan) {
            (Some(calculator), Some(plan)) => self.planner(calculator, plan),
            _ => text("This asset is worth too little to be fractionalized.")
                .style(text::danger)
                .into(),
        };
        page(
            "Fractionalization",
            Some(FractionalizationMessage::Back),
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
            FractionalizationMessage::Back => back(),
            FractionalizationMessage::FragmentValue(value) => {
                if let Some(calculator) = &self.calculator {
                    self.plan = Some(calculator.plan(value.round() as u64));
                }
                Task::none()
            }
            FractionalizationMessage::Continue => match &self.plan {
                Some(plan) => navigate(
                    Route::FractionalizationProcessing,
                    NavPayload::Fraction(FractionPayload {
                        asset: self.asset.clone(),
                        plan: plan.clone(),
                    }),
                ),
                None => {
                    state.notify(Notice::error(
                        "Not eligible",
                        "This asset cannot be fractionalized",
                    ));
                    Task::none()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    #[test]
    fn unknown_id_uses_default_asset_with_that_id() {
        let state = AppState::new(Config::default());
        let screen = FractionalizationScreen::new("nft-777", &NavPayload::None, &state);
        assert_eq!(screen.asset.id, "nft-777");
        assert_eq!(screen.asset.valuation, 6_400_000);

        let plan = screen.plan.expect("eligible");
        assert_eq!(plan.fragment_value, 2_000_000);
        assert_eq!(plan.fragment_count, 100);
        assert_eq!(plan.remaining_value, 4_400_000);
    }

    #[test]
    fn slider_is_capped_by_ltv() {
        let mut state = AppState::new(Config::default());
        let mut screen = FractionalizationScreen::new("nft-777", &NavPayload::None, &state);
        let _ = screen.update(FractionalizationMessage::FragmentValue(9e9), &mut state);
        let plan = screen.plan.expect("eligible");
        assert_eq!(plan.fragment_value, 5_100_000);
        assert_eq!(plan.fragment_count, 255);
    }
}
