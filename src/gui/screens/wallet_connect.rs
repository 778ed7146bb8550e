use iced::{
    Element, Length, Task,
    task::Handle,
    widget::{button, column, text},
};

use crate::{
    core::{
        Notice,
        route::{NavPayload, Route},
        session::{WalletConnection, WalletEvent, WalletKind},
    },
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, navigate, play},
        widgets::{card, page},
    },
};

#[derive(Debug, Clone, Default)]
pub struct WalletConnectScreen {
    connection: WalletConnection,
    timer: Option<Handle>,
}

#[derive(Debug, Clone)]
pub enum WalletConnectMessage {
    Connect(WalletKind),
    Wallet(WalletEvent),
}

impl WalletConnectScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn wallet_button(&self, kind: WalletKind) -> Element<'_, WalletConnectMessage> {
        let label = if self.connection.connecting() == Some(kind) {
            "Connecting...".to_string()
        } else {
            kind.name().to_string()
        };
        button(column![text(label).size(20), text(kind.description()).style(text::secondary)].spacing(4))
            .width(Length::Fill)
            .padding(16)
            .style(button::secondary)
            .on_press_maybe(
                (!self.connection.is_busy()).then_some(WalletConnectMessage::Connect(kind)),
            )
            .into()
    }
}

impl Screen for WalletConnectScreen {
    type Message = WalletConnectMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let status: Element<'_, WalletConnectMessage> = match &state.session.wallet {
            Some(wallet) => card(column![
                text(format!("Connected with {}", wallet.kind)).style(text::success),
                text(wallet.short_address()),
            ]),
            None => text("Choose a wallet to sign in. No keys ever leave this app.")
                .style(text::secondary)
                .into(),
        };
        let content = column(WalletKind::ALL.into_iter().map(|kind| self.wallet_button(kind)))
            .spacing(12)
            .push(status);

        page::<WalletConnectMessage>("Connect Wallet", None, content)
            .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            WalletConnectMessage::Connect(kind) => {
                let Some(timeline) = self.connection.begin(kind, &state.config.timings) else {
                    return Task::none();
                };
                let (task, handle) = play::<Self, _>(timeline, WalletConnectMessage::Wallet);
                self.timer = Some(handle);
                task
            }
            WalletConnectMessage::Wallet(WalletEvent::Connected) => {
                if let Some(wallet) = self.connection.complete() {
                    state.notify(Notice::success(
                        "Wallet connected",
                        format!("{} {}", wallet.kind, wallet.short_address()),
                    ));
                    state.session.wallet = Some(wallet);
                }
                Task::none()
            }
            WalletConnectMessage::Wallet(WalletEvent::Redirect) => {
                self.timer = None;
                navigate(Route::KycVerification, NavPayload::None)
            }
        }
    }
}
