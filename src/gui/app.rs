use anyhow::Context;
use iced::{Element, Task, Theme};

use crate::{
    core::{Config, config::millis},
    gui::{
        AppState, Message,
        screens::{Screen, ScreenData, ScreenMessage},
        widgets::with_notices,
    },
};

pub struct RwaApp {
    screen: ScreenData,
    state: AppState,
}

impl RwaApp {
    pub fn new(config: Config) -> (Self, Task<Message>) {
        let state = AppState::new(config);
        let (screen, task) = ScreenData::open(state.router.current(), &state);
        (Self { screen, state }, task)
    }

    pub fn title(&self) -> String {
        format!("RWA Lend - {}", self.state.router.current().route.title())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = self
            .screen
            .update(message, &mut self.state)
            .map(|message| match message {
                ScreenMessage::ScreenMessage(message) => message,
                ScreenMessage::ParentMessage(never) => match never {},
            });

        // every notice expires on its own
        let ttl = millis(self.state.config.timings.notice_ttl_ms);
        let expiries = self.state.drain_fresh().into_iter().map(|id| {
            Task::perform(tokio::time::sleep(ttl), move |()| Message::DismissNotice(id))
        });
        Task::batch(std::iter::once(task).chain(expiries))
    }

    pub fn view(&self) -> Element<'_, Message> {
        let screen = self.screen.view(&self.state).map(|message| match message {
            ScreenMessage::ScreenMessage(message) => message,
            ScreenMessage::ParentMessage(never) => match never {},
        });
        with_notices(screen, self.state.notices(), Message::DismissNotice)
    }
}

/// Open the desktop window and block until it is closed.
pub fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!("starting gui");
    iced::application(
        move || RwaApp::new(config.clone()),
        RwaApp::update,
        RwaApp::view,
    )
    .title(RwaApp::title)
    .theme(Theme::Dark)
    .window_size((1100.0, 760.0))
    .run()
    .context("gui event loop failed")
}
