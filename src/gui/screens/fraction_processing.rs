use iced::{
    Element, Task,
    task::Handle,
    widget::{button, column, container, progress_bar, row, space, text},
};

use crate::{
    core::{
        money::{format_amount, format_percent},
        processing::{ProcessingEvent, ProcessingPlan, ProcessingState},
        route::{FractionPayload, NavPayload, Route},
    },
    gui::{
        AppState,
        screens::{Request, Screen, ScreenMessage, back, navigate, play},
        widgets::{field, layout, modal, page},
    },
};

#[derive(Debug, Clone)]
pub struct FractionProcessingScreen {
    fraction: FractionPayload,
    plan: ProcessingPlan,
    processing: ProcessingState,
    /// Set once the user confirmed; the timeline only runs after that.
    timer: Option<Handle>,
}

#[derive(Debug, Clone)]
pub enum FractionProcessingMessage {
    Confirm,
    Cancel,
    Processing(ProcessingEvent),
}

impl FractionProcessingScreen {
    pub fn new(fraction: FractionPayload, state: &AppState) -> Self {
        let plan = ProcessingPlan::fraction(&state.config.timings);
        Self {
            fraction,
            processing: ProcessingState::new(&plan),
            plan,
            timer: None,
        }
    }

    fn confirm_dialog(&self) -> Element<'_, FractionProcessingMessage> {
        let FractionPayload { asset, plan } = &self.fraction;
        container(
            column![
                text("Confirm fractionalization").size(22),
                field("Asset", asset.name.as_str()),
                field("Value to fractionalize", format_amount(plan.fragment_value)),
                field("Share of the asset", format_percent(plan.used_percentage())),
                field("Fragments to mint", plan.fragment_count.to_string()),
                text("The original NFT stays locked until every fragment is redeemed.")
                    .style(text::warning),
                row![
                    button("Cancel")
                        .style(button::secondary)
                        .on_press(FractionProcessingMessage::Cancel),
                    space::horizontal(),
                    button("Confirm").on_press(FractionProcessingMessage::Confirm),
                ],
            ]
            .spacing(10),
        )
        .style(container::rounded_box)
        .padding(24)
        .max_width(520)
        .into()
    }
}

impl Screen for FractionProcessingScreen {
    type Message = FractionProcessingMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let label = self.processing.stepper().current_label().unwrap_or_default();
        let main = column![
            text(label).size(22),
            progress_bar(0.0..=100.0, self.processing.progress()),
            text(format!("{:.0}%", self.processing.progress())).style(text::secondary),
        ]
        .spacing(16);
        let sidebar = text(format!(
            "Minting {} fNFTs",
            self.fraction.plan.fragment_count
        ))
        .style(text::secondary);
        let base = page::<FractionProcessingMessage>(
            "Fractionalizing",
            None,
            layout(self.processing.stepper(), sidebar, main),
        );

        let content = if self.timer.is_none() && !self.processing.is_finished() {
            modal(base, self.confirm_dialog(), FractionProcessingMessage::Cancel)
        } else {
            base
        };
        content.map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            FractionProcessingMessage::Confirm => {
                if self.timer.is_some() {
                    return Task::none();
                }
                tracing::info!(
                    asset = %self.fraction.asset.id,
                    fragments = self.fraction.plan.fragment_count,
                    "fractionalization confirmed"
                );
                let (task, handle) =
                    play::<Self, _>(self.plan.timeline(), FractionProcessingMessage::Processing);
                self.timer = Some(handle);
                task
            }
            FractionProcessingMessage::Cancel => back(),
            FractionProcessingMessage::Processing(event) => {
                if !self.processing.apply(event) {
                    return Task::none();
                }
                let FractionPayload { asset, plan } = &self.fraction;
                let fraction = FractionPayload {
                    asset: asset.clone().fractionalized(plan),
                    plan: plan.clone(),
                };
                navigate(
                    Route::FractionalizationSuccess,
                    NavPayload::Fraction(fraction),
                )
            }
        }
    }
}
