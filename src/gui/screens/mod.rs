pub mod fraction_processing;
pub mod fraction_success;
pub mod fractionalization;
pub mod kyc;
pub mod loan_confirm;
pub mod loan_processing;
pub mod loan_setup;
pub mod loan_success;
pub mod my_assets;
pub mod my_loans;
pub mod not_found;
pub mod tokenization;
pub mod wallet_connect;

use iced::{Element, Task, task};

use crate::{
    core::{
        catalog::{AssetRecord, find_asset},
        route::{NavPayload, Navigation, Route},
        sim::Timeline,
    },
    gui::{AppState, Message},
};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone;
    type ParentMessage: std::fmt::Debug + Clone;
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

/// What a page may ask of the app.
#[derive(Debug, Clone)]
pub enum Request {
    Navigate(Route, NavPayload),
    Back,
}

pub fn navigate<S>(route: Route, payload: NavPayload) -> Task<ScreenMessage<S>>
where
    S: Screen<ParentMessage = Request> + 'static,
    S::Message: Send + 'static,
{
    Task::done(ScreenMessage::ParentMessage(Request::Navigate(route, payload)))
}

pub fn back<S>() -> Task<ScreenMessage<S>>
where
    S: Screen<ParentMessage = Request> + 'static,
    S::Message: Send + 'static,
{
    Task::done(ScreenMessage::ParentMessage(Request::Back))
}

/// Play `timeline` as a task. The task is aborted once the returned handle
/// (and every clone of it) is dropped, so it dies with the screen holding it.
pub fn play<S, E>(
    timeline: Timeline<E>,
    on_event: fn(E) -> S::Message,
) -> (Task<ScreenMessage<S>>, task::Handle)
where
    S: Screen + 'static,
    S::Message: Send + 'static,
    S::ParentMessage: Send + 'static,
    E: Send + 'static,
{
    let (task, handle) = Task::run(timeline.into_stream(), move |event| {
        ScreenMessage::ScreenMessage(on_event(event))
    })
    .abortable();
    (task, handle.abort_on_drop())
}

/// The asset a page was opened for: the one handed over, else the catalog
/// entry with that id, else `fallback`.
pub fn resolve_asset(
    asset_id: &str,
    payload: &NavPayload,
    fallback: impl FnOnce() -> AssetRecord,
) -> AssetRecord {
    match payload {
        NavPayload::Asset(asset) if asset.id == asset_id => asset.clone(),
        _ => find_asset(asset_id).unwrap_or_else(|| {
            tracing::debug!(asset_id, "unknown asset, using the default one");
            fallback()
        }),
    }
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    WalletConnect(wallet_connect::WalletConnectScreen),
    Kyc(kyc::KycScreen),
    Tokenization(tokenization::TokenizationScreen),
    MyAssets(my_assets::MyAssetsScreen),
    LoanSetup(loan_setup::LoanSetupScreen),
    LoanConfirm(loan_confirm::LoanConfirmScreen),
    LoanProcessing(loan_processing::LoanProcessingScreen),
    LoanSuccess(loan_success::LoanSuccessScreen),
    MyLoans(my_loans::MyLoansScreen),
    Fractionalization(fractionalization::FractionalizationScreen),
    FractionProcessing(fraction_processing::FractionProcessingScreen),
    FractionSuccess(fraction_success::FractionSuccessScreen),
    NotFound(not_found::NotFoundScreen),
}

impl ScreenData {
    /// Build the screen for `navigation`, with any task it starts on entry.
    pub fn open(navigation: &Navigation, state: &AppState) -> (Self, Task<Message>) {
        let payload = &navigation.payload;
        let screen = match (&navigation.route, payload) {
            (Route::WalletConnect, _) => {
                ScreenData::WalletConnect(wallet_connect::WalletConnectScreen::new())
            }
            (Route::KycVerification, _) => ScreenData::Kyc(kyc::KycScreen::new(state)),
            (Route::AssetTokenization, _) => {
                ScreenData::Tokenization(tokenization::TokenizationScreen::new(state))
            }
            (Route::MyAssets, _) => ScreenData::MyAssets(my_assets::MyAssetsScreen::new()),
            (Route::LoanSetup { asset_id }, _) => {
                ScreenData::LoanSetup(loan_setup::LoanSetupScreen::new(asset_id, payload, state))
            }
            (Route::LoanConfirm, NavPayload::Loan(loan)) => {
                ScreenData::LoanConfirm(loan_confirm::LoanConfirmScreen::new(loan.clone()))
            }
            (Route::LoanProcessing, NavPayload::Loan(loan)) => {
                let (screen, task) =
                    loan_processing::LoanProcessingScreen::start(loan.clone(), state);
                return (
                    ScreenData::LoanProcessing(screen),
                    task.map(Message::LoanProcessing),
                );
            }
            (Route::LoanSuccess, NavPayload::Loan(loan)) => {
                ScreenData::LoanSuccess(loan_success::LoanSuccessScreen::new(loan.clone()))
            }
            (Route::MyLoans, _) => ScreenData::MyLoans(my_loans::MyLoansScreen::new()),
            (Route::Fractionalization { asset_id }, _) => ScreenData::Fractionalization(
                fractionalization::FractionalizationScreen::new(asset_id, payload, state),
            ),
            (Route::FractionalizationProcessing, NavPayload::Fraction(fraction)) => {
                ScreenData::FractionProcessing(
                    fraction_processing::FractionProcessingScreen::new(fraction.clone(), state),
                )
            }
            (Route::FractionalizationSuccess, NavPayload::Fraction(fraction)) => {
                ScreenData::FractionSuccess(fraction_success::FractionSuccessScreen::new(
                    fraction.clone(),
                ))
            }
            (Route::NotFound { path }, _) => {
                ScreenData::NotFound(not_found::NotFoundScreen::new(path.clone()))
            }
            // Router::resolve already redirects these; keep a safe landing page anyway.
            (
                Route::LoanConfirm
                | Route::LoanProcessing
                | Route::LoanSuccess
                | Route::FractionalizationProcessing
                | Route::FractionalizationSuccess,
                _,
            ) => ScreenData::MyAssets(my_assets::MyAssetsScreen::new()),
        };
        (screen, Task::none())
    }

    fn enter(&mut self, navigation: Navigation, state: &AppState) -> Task<ScreenMessage<Self>> {
        let (screen, task) = ScreenData::open(&navigation, state);
        *self = screen;
        task.map(ScreenMessage::ScreenMessage)
    }
}

/// Route a child screen's message: its own messages go to its `update`,
/// its requests come back to [`ScreenData`] as app messages.
fn forward<S>(
    screen: &mut S,
    message: ScreenMessage<S>,
    state: &mut AppState,
    wrap: fn(ScreenMessage<S>) -> Message,
) -> Task<ScreenMessage<ScreenData>>
where
    S: Screen<ParentMessage = Request> + 'static,
    S::Message: Send + 'static,
{
    match message {
        ScreenMessage::ScreenMessage(msg) => screen
            .update(msg, state)
            .map(wrap)
            .map(ScreenMessage::ScreenMessage),
        ScreenMessage::ParentMessage(request) => {
            Task::done(ScreenMessage::ScreenMessage(match request {
                Request::Navigate(route, payload) => Message::Navigate(route, payload),
                Request::Back => Message::Back,
            }))
        }
    }
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = std::convert::Infallible;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        match self {
            ScreenData::WalletConnect(screen) => screen.view(state).map(Message::WalletConnect),
            ScreenData::Kyc(screen) => screen.view(state).map(Message::Kyc),
            ScreenData::Tokenization(screen) => screen.view(state).map(Message::Tokenization),
            ScreenData::MyAssets(screen) => screen.view(state).map(Message::MyAssets),
            ScreenData::LoanSetup(screen) => screen.view(state).map(Message::LoanSetup),
            ScreenData::LoanConfirm(screen) => screen.view(state).map(Message::LoanConfirm),
            ScreenData::LoanProcessing(screen) => screen.view(state).map(Message::LoanProcessing),
            ScreenData::LoanSuccess(screen) => screen.view(state).map(Message::LoanSuccess),
            ScreenData::MyLoans(screen) => screen.view(state).map(Message::MyLoans),
            ScreenData::Fractionalization(screen) => {
                screen.view(state).map(Message::Fractionalization)
            }
            ScreenData::FractionProcessing(screen) => {
                screen.view(state).map(Message::FractionProcessing)
            }
            ScreenData::FractionSuccess(screen) => screen.view(state).map(Message::FractionSuccess),
            ScreenData::NotFound(screen) => screen.view(state).map(Message::NotFound),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::Navigate(route, payload)) => {
                let navigation = state.router.push(route, payload).clone();
                x.enter(navigation, state)
            }
            (x, Message::Back) => match state.router.back() {
                Ok(navigation) => {
                    let navigation = navigation.clone();
                    x.enter(navigation, state)
                }
                Err(err) => {
                    tracing::debug!(%err, "back ignored");
                    Task::none()
                }
            },
            (_, Message::DismissNotice(id)) => {
                state.dismiss(id);
                Task::none()
            }
            (ScreenData::WalletConnect(page), Message::WalletConnect(msg)) => {
                forward(page, msg, state, Message::WalletConnect)
            }
            (ScreenData::Kyc(page), Message::Kyc(msg)) => forward(page, msg, state, Message::Kyc),
            (ScreenData::Tokenization(page), Message::Tokenization(msg)) => {
                forward(page, msg, state, Message::Tokenization)
            }
            (ScreenData::MyAssets(page), Message::MyAssets(msg)) => {
                forward(page, msg, state, Message::MyAssets)
            }
            (ScreenData::LoanSetup(page), Message::LoanSetup(msg)) => {
                forward(page, msg, state, Message::LoanSetup)
            }
            (ScreenData::LoanConfirm(page), Message::LoanConfirm(msg)) => {
                forward(page, msg, state, Message::LoanConfirm)
            }
            (ScreenData::LoanProcessing(page), Message::LoanProcessing(msg)) => {
                forward(page, msg, state, Message::LoanProcessing)
            }
            (ScreenData::LoanSuccess(page), Message::LoanSuccess(msg)) => {
                forward(page, msg, state, Message::LoanSuccess)
            }
            (ScreenData::MyLoans(page), Message::MyLoans(msg)) => {
                forward(page, msg, state, Message::MyLoans)
            }
            (ScreenData::Fractionalization(page), Message::Fractionalization(msg)) => {
                forward(page, msg, state, Message::Fractionalization)
            }
            (ScreenData::FractionProcessing(page), Message::FractionProcessing(msg)) => {
                forward(page, msg, state, Message::FractionProcessing)
            }
            (ScreenData::FractionSuccess(page), Message::FractionSuccess(msg)) => {
                forward(page, msg, state, Message::FractionSuccess)
            }
            (ScreenData::NotFound(page), Message::NotFound(msg)) => {
                forward(page, msg, state, Message::NotFound)
            }
            // late message from a screen that is no longer shown
            (_, message) => {
                tracing::debug!(?message, "dropped message for inactive screen");
                Task::none()
            }
        }
    }
}
