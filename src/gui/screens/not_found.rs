use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, text},
};

use crate::{
    core::route::{NavPayload, Route},
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, navigate},
    },
};

#[derive(Debug, Clone)]
pub struct NotFoundScreen {
    path: String,
}

#[derive(Debug, Clone)]
pub enum NotFoundMessage {
    Home,
}

impl NotFoundScreen {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

impl Screen for NotFoundScreen {
    type Message = NotFoundMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let content = column![
            text("404").size(48),
            text(format!("Nothing lives at {}", self.path)).style(text::secondary),
            button("Home").on_press(ScreenMessage::ScreenMessage(NotFoundMessage::Home)),
        ]
        .spacing(20)
        .align_x(Center);

        container(content)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            NotFoundMessage::Home => navigate(Route::WalletConnect, NavPayload::None),
        }
    }
}
