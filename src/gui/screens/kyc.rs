use iced::{
    Element, Length, Task,
    task::Handle,
    widget::{button, column, pick_list, row, text, text_input},
};

use crate::{
    core::{
        Notice,
        asset::UploadedFile,
        kyc::{IdType, KycEvent, KycFlow, KycStatus},
        route::{NavPayload, Route},
    },
    gui::{
        AppState,
        files::{self, Pick},
        screens::{Request, Screen, ScreenMessage, navigate, play},
        widgets::{card, field, layout},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    IdDocument,
    Selfie,
}

#[derive(Debug, Clone)]
pub struct KycScreen {
    flow: KycFlow,
    timer: Option<Handle>,
}

#[derive(Debug, Clone)]
pub enum KycMessage {
    FullName(String),
    IdType(IdType),
    IdNumber(String),
    BirthDate(String),
    Next,
    Pick(Slot),
    Picked(Slot, Result<Vec<UploadedFile>, String>),
    Submit,
    Review(KycEvent),
}

impl KycScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            flow: KycFlow::new(&state.config.timings),
            timer: None,
        }
    }

    fn basic_info(&self) -> Element<'_, KycMessage> {
        let form = &self.flow.form;
        column![
            text("Basic information").size(22),
            text_input("Full name", &form.full_name).on_input(KycMessage::FullName),
            pick_list(IdType::ALL, form.id_type, KycMessage::IdType)
                .placeholder("ID type")
                .width(Length::Fill),
            text_input("ID number", &form.id_number).on_input(KycMessage::IdNumber),
            text_input("Birth date (YYYY-MM-DD)", &form.birth_date)
                .on_input(KycMessage::BirthDate),
            button("Next").on_press(KycMessage::Next),
        ]
        .spacing(12)
        .into()
    }

    fn documents(&self) -> Element<'_, KycMessage> {
        let form = &self.flow.form;
        let submitting = self.flow.is_submitting();
        let slot = |label: &'static str, file: &Option<UploadedFile>, slot: Slot| {
            let picked = match file {
                Some(file) => text(file.name.clone()).style(text::success),
                None => text("Not uploaded").style(text::secondary),
            };
            card(
                row![
                    column![text(label), picked].spacing(4).width(Length::Fill),
                    button("Upload")
                        .style(button::secondary)
                        .on_press_maybe((!submitting).then_some(KycMessage::Pick(slot))),
                ]
                .spacing(12),
            )
        };
        column![
            text("Identity documents").size(22),
            slot("ID document", &form.id_document, Slot::IdDocument),
            slot("Selfie holding the document", &form.selfie, Slot::Selfie),
            button(if submitting { "Reviewing..." } else { "Submit" })
                .on_press_maybe((!submitting).then_some(KycMessage::Submit)),
        ]
        .spacing(12)
        .into()
    }

    fn verified(&self) -> Element<'_, KycMessage> {
        let form = &self.flow.form;
        column![
            text("Documents received").size(22).style(text::success),
            text("Your identity is being verified. Continuing to asset tokenization..."),
            field("Name", form.full_name.as_str()),
            field(
                "ID type",
                form.id_type.map(|t| t.to_string()).unwrap_or_default(),
            ),
        ]
        .spacing(12)
        .into()
    }
}

impl Screen for KycScreen {
    type Message = KycMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let main = match self.flow.stepper().current() {
            0 => self.basic_info(),
            1 => self.documents(),
            _ => self.verified(),
        };
        let sidebar = text("Identity verification is required before tokenizing assets.")
            .style(text::secondary);
        layout(self.flow.stepper(), sidebar, main).map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        let form = &mut self.flow.form;
        match message {
            KycMessage::FullName(value) => form.full_name = value,
            KycMessage::IdType(value) => form.id_type = Some(value),
            KycMessage::IdNumber(value) => form.id_number = value,
            KycMessage::BirthDate(value) => form.birth_date = value,
            KycMessage::Next => {
                if let Err(err) = self.flow.next_from_basic_info() {
                    state.notify(Notice::rejected("Incomplete information", &err));
                }
            }
            KycMessage::Pick(slot) => {
                return Task::perform(files::pick(Pick::Photo), move |picked| {
                    ScreenMessage::ScreenMessage(KycMessage::Picked(slot, picked))
                });
            }
            KycMessage::Picked(slot, Ok(picked)) => {
                let policy = state.upload_policy();
                let Some(file) = picked.into_iter().next() else {
                    return Task::none();
                };
                if let Err(rejection) = policy.check(&file) {
                    state.notify(Notice::rejected("Upload rejected", &rejection));
                    return Task::none();
                }
                match slot {
                    Slot::IdDocument => form.id_document = Some(file),
                    Slot::Selfie => form.selfie = Some(file),
                }
            }
            KycMessage::Picked(_, Err(err)) => {
                state.notify(Notice::error("Upload failed", err));
            }
            KycMessage::Submit => match self.flow.submit() {
                Ok(timeline) => {
                    state.session.kyc = KycStatus::UnderReview;
                    let (task, handle) = play::<Self, _>(timeline, KycMessage::Review);
                    self.timer = Some(handle);
                    return task;
                }
                Err(err) => {
                    state.notify(Notice::rejected("Cannot submit", &err));
                }
            },
            KycMessage::Review(event) => {
                let leave = self.flow.apply(event);
                if leave {
                    self.timer = None;
                    return navigate(Route::AssetTokenization, NavPayload::None);
                }
                state.session.kyc = self.flow.status();
                state.notify(Notice::success(
                    "Documents submitted",
                    "We will notify you once the verification completes",
                ));
            }
        }
        Task::none()
    }
}
