use iced::{
    Element, Task,
    widget::{button, column, row, text},
};

use crate::{
    core::{
        money::{format_amount, format_decimal},
        route::{FractionPayload, NavPayload, Route},
    },
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, navigate},
        widgets::{card, field, page},
    },
};

#[derive(Debug, Clone)]
pub struct FractionSuccessScreen {
    fraction: FractionPayload,
}

#[derive(Debug, Clone)]
pub enum FractionSuccessMessage {
    MyAssets,
    StartLoan,
}

impl FractionSuccessScreen {
    pub fn new(fraction: FractionPayload) -> Self {
        Self { fraction }
    }
}

impl Screen for FractionSuccessScreen {
    type Message = FractionSuccessMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let FractionPayload { asset, plan } = &self.fraction;
        let content = column![
            text("Fractionalization complete").size(22).style(text::success),
            text(format!("{} fNFTs were issued to your wallet.", plan.fragment_count)),
            card(
                column![
                    field("Asset", asset.name.as_str()),
                    field("Original token", asset.token_id.as_str()),
                    field("Fractionalized value", format_amount(plan.fragment_value)),
                    field("Value per fragment", format_decimal(plan.value_per_fragment)),
                    field("Value kept", format_amount(plan.remaining_value)),
                ]
                .spacing(6)
            ),
            row![
                button("Back to my assets").on_press(FractionSuccessMessage::MyAssets),
                button("Borrow against this asset")
                    .style(button::secondary)
                    .on_press(FractionSuccessMessage::StartLoan),
            ]
            .spacing(12),
        ]
        .spacing(16);

        page::<FractionSuccessMessage>("Fractionalization Complete", None, content)
            .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            FractionSuccessMessage::MyAssets => navigate(Route::MyAssets, NavPayload::None),
            FractionSuccessMessage::StartLoan => {
                let asset = self.fraction.asset.clone();
                navigate(
                    Route::LoanSetup {
                        asset_id: asset.id.clone(),
                    },
                    NavPayload::Asset(asset),
                )
            }
        }
    }
}
