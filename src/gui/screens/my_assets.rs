use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, row, space, text},
};

use crate::{
    core::{
        catalog::{AssetRecord, my_assets},
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
pub struct MyAssetsScreen {
    assets: Vec<AssetRecord>,
}

#[derive(Debug, Clone)]
pub enum MyAssetsMessage {
    Back,
    StartLoan(usize),
    Fractionalize(usize),
    MyLoans,
    TokenizeAnother,
}

impl MyAssetsScreen {
    pub fn new() -> Self {
        Self {
            assets: my_assets(),
        }
    }
}

fn asset_card(index: usize, asset: &AssetRecord) -> Element<'_, MyAssetsMessage> {
    let mut body = column![
        row![
            text(&asset.name).size(20).width(Length::Fill),
            text(asset.kind.label()).style(text::secondary),
        ]
        .align_y(Center),
        field("Token", asset.token_id.as_str()),
        field("Valuation", format_amount(asset.valuation)),
    ]
    .spacing(6);
    if let Some(count) = asset.fragment_count {
        body = body.push(field("Fragments", count.to_string()));
    }
    body = body.push(
        row![
            button("Start loan").on_press(MyAssetsMessage::StartLoan(index)),
            button("Fractionalize")
                .style(button::secondary)
                .on_press(MyAssetsMessage::Fractionalize(index)),
        ]
        .spacing(8),
    );
    card(body)
}

impl Screen for MyAssetsScreen {
    type Message = MyAssetsMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let account = match &state.session.wallet {
            Some(wallet) => text(format!(
                "{} · {}",
                state.session.profile.username,
                wallet.short_address()
            )),
            None => text("Wallet not connected").style(text::warning),
        };
        let content = column![
            row![
                account,
                space::horizontal(),
                button("My loans")
                    .style(button::secondary)
                    .on_press(MyAssetsMessage::MyLoans),
                button("Tokenize another asset")
                    .style(button::secondary)
                    .on_press(MyAssetsMessage::TokenizeAnother),
            ]
            .spacing(8)
            .align_y(Center),
            column(
                self.assets
                    .iter()
                    .enumerate()
                    .map(|(i, asset)| asset_card(i, asset)),
            )
            .spacing(12),
        ]
        .spacing(16);

        page("My Assets", Some(MyAssetsMessage::Back), content).map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            MyAssetsMessage::Back => back(),
            MyAssetsMessage::StartLoan(index) => match self.assets.get(index) {
                Some(asset) => navigate(
                    Route::LoanSetup {
                        asset_id: asset.id.clone(),
                    },
                    NavPayload::Asset(asset.clone()),
                ),
                None => Task::none(),
            },
            MyAssetsMessage::Fractionalize(index) => match self.assets.get(index) {
                Some(asset) => navigate(
                    Route::Fractionalization {
                        asset_id: asset.id.clone(),
                    },
                    NavPayload::Asset(asset.clone()),
                ),
                None => Task::none(),
            },
            MyAssetsMessage::MyLoans => navigate(Route::MyLoans, NavPayload::None),
            MyAssetsMessage::TokenizeAnother => {
                navigate(Route::AssetTokenization, NavPayload::None)
            }
        }
    }
}
