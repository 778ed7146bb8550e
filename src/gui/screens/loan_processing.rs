use iced::{
    Element, Task,
    task::Handle,
    widget::{column, progress_bar, text},
};

use crate::{
    core::{
        money::format_amount,
        processing::{ProcessingEvent, ProcessingPlan, ProcessingState},
        route::{LoanPayload, NavPayload, Route},
    },
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, navigate, play},
        widgets::{layout, page},
    },
};

#[derive(Debug, Clone)]
pub struct LoanProcessingScreen {
    loan: LoanPayload,
    processing: ProcessingState,
    timer: Option<Handle>,
}

#[derive(Debug, Clone)]
pub enum LoanProcessingMessage {
    Processing(ProcessingEvent),
}

impl LoanProcessingScreen {
    /// Open the screen with its processing timeline already running.
    pub fn start(loan: LoanPayload, state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let plan = ProcessingPlan::loan(&state.config.timings);
        let (task, handle) = play::<Self, _>(plan.timeline(), LoanProcessingMessage::Processing);
        let screen = Self {
            loan,
            processing: ProcessingState::new(&plan),
            timer: Some(handle),
        };
        (screen, task)
    }
}

impl Screen for LoanProcessingScreen {
    type Message = LoanProcessingMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let label = self.processing.stepper().current_label().unwrap_or_default();
        let main = column![
            text(label).size(22),
            progress_bar(0.0..=100.0, self.processing.progress()),
            text(format!("{:.0}%", self.processing.progress())).style(text::secondary),
            text(format!(
                "{} will be sent to your wallet",
                format_amount(self.loan.quote.net_disbursed)
            )),
        ]
        .spacing(16);
        let sidebar = text("Please keep the app open.").style(text::secondary);

        page::<LoanProcessingMessage>(
            "Processing Loan",
            None,
            layout(self.processing.stepper(), sidebar, main),
        )
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        let LoanProcessingMessage::Processing(event) = message;
        if self.processing.apply(event) {
            self.timer = None;
            return navigate(Route::LoanSuccess, NavPayload::Loan(self.loan.clone()));
        }
        Task::none()
    }
}
