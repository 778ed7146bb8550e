use iced::{
    Alignment::Center,
    Element, Length, Task,
    task::Handle,
    widget::{button, column, pick_list, progress_bar, row, text, text_input},
};

use crate::{
    core::{
        Notice, StepStatus, Stepper,
        asset::{
            AssetDraft, AssetKind, ReviewState, TOKENIZATION_STEPS, UploadedFile, review_stages,
        },
        catalog::{MINTED_LTV, VALUATION_ESTIMATE, default_fraction_asset, nft_preview},
        config::millis,
        custody::{
            CustodyEvent, CustodyKind, CustodyMethod, CustodyProcess, CustodyStage,
            TrackingStatus,
        },
        gate::{ReadGate, ScrollMetrics, SignatureGate},
        money::format_amount,
        route::{NavPayload, Route},
        sim::Timeline,
    },
    gui::{
        AppState,
        files::{self, Pick},
        screens::{Request, Screen, ScreenMessage, navigate, play},
        widgets::{
            ContractDialog, PenEvent, SignatureDialog, card, contract_dialog, field, layout, modal,
            signature_dialog,
        },
    },
};

/// Id the freshly minted asset is listed under.
const MINTED_ASSET_ID: &str = "nft-004";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialog {
    Contract,
    Signature,
}

#[derive(Debug, Clone)]
pub struct TokenizationScreen {
    stepper: Stepper,
    draft: AssetDraft,
    submitting: bool,
    read_gate: ReadGate,
    signature: SignatureGate,
    dialog: Option<Dialog>,
    custody: Option<CustodyProcess>,
    timer: Option<Handle>,
}

#[derive(Debug, Clone)]
pub enum TokenizationMessage {
    Kind(AssetKind),
    Name(String),
    Description(String),
    PickFiles,
    Picked(Result<Vec<UploadedFile>, String>),
    RemoveFile(usize),
    Submit,
    Submitted,
    OpenContract,
    Scrolled(ScrollMetrics),
    AcceptContract,
    Pen(PenEvent),
    AutoSign,
    ClearSignature,
    ConfirmSignature,
    CloseDialog,
    StartCustody,
    SelectMethod(CustodyMethod),
    Custody(CustodyEvent),
    Mint,
    ViewAssets,
    ApplyForLoan,
}

use TokenizationMessage as Msg;

impl TokenizationScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            stepper: Stepper::new(TOKENIZATION_STEPS),
            draft: AssetDraft::new(),
            submitting: false,
            read_gate: ReadGate::new(state.config.gates.scroll_threshold_px),
            signature: SignatureGate::new(),
            dialog: None,
            custody: None,
            timer: None,
        }
    }

    fn submission(&self) -> Element<'_, Msg> {
        let draft = &self.draft;
        let files = column(draft.files.iter().enumerate().map(|(i, file)| {
            row![
                text(&file.name).width(Length::Fill),
                text(format!("{:.1} KiB", file.size as f64 / 1024.0)).style(text::secondary),
                button("Remove")
                    .style(button::text)
                    .on_press_maybe((!self.submitting).then_some(Msg::RemoveFile(i))),
            ]
            .spacing(8)
            .align_y(Center)
            .into()
        }))
        .spacing(4);

        column![
            text("Submit an asset").size(22),
            pick_list(AssetKind::ALL, draft.kind, Msg::Kind)
                .placeholder("Asset type")
                .width(Length::Fill),
            text_input("Asset name", &draft.name).on_input(Msg::Name),
            text_input("Description", &draft.description).on_input(Msg::Description),
            card(column![
                row![
                    text("Supporting documents").width(Length::Fill),
                    button("Upload")
                        .style(button::secondary)
                        .on_press_maybe((!self.submitting).then_some(Msg::PickFiles)),
                ]
                .align_y(Center),
                text("JPG, PNG or PDF, up to 10 MiB each").style(text::secondary),
                files,
            ]
            .spacing(8)),
            button(if self.submitting { "Submitting..." } else { "Submit for review" })
                .on_press_maybe((!self.submitting).then_some(Msg::Submit)),
        ]
        .spacing(12)
        .into()
    }

    fn valuation(&self) -> Element<'_, Msg> {
        let stages = column(review_stages(VALUATION_ESTIMATE).into_iter().map(|stage| {
            let state = match stage.state {
                ReviewState::Completed => text(stage.state.label()).style(text::success),
                ReviewState::InProgress => text(stage.state.label()).style(text::warning),
                ReviewState::Pending => text(stage.state.label()).style(text::secondary),
            };
            let mut body = column![
                row![text(stage.name).width(Length::Fill), state],
                text(stage.description).style(text::secondary),
            ]
            .spacing(4);
            if let Some(value) = stage.estimated_value {
                body = body.push(field("Estimated value", format_amount(value)));
            }
            card(body)
        }))
        .spacing(8);

        column![
            text("Valuation").size(22),
            stages,
            button("Accept valuation and review contract").on_press(Msg::OpenContract),
        ]
        .spacing(12)
        .into()
    }

    fn custody(&self) -> Element<'_, Msg> {
        let Some(custody) = &self.custody else {
            return text("Preparing custody...").into();
        };
        let body: Element<'_, Msg> = match custody.stage() {
            CustodyStage::Intro => {
                let intro = match custody.kind() {
                    CustodyKind::RealEstate => {
                        "The title deed is registered with the custodian bank."
                    }
                    CustodyKind::Valuables => {
                        "The item is kept in an insured vault until the loan is repaid."
                    }
                };
                column![text(intro), button("Start custody").on_press(Msg::StartCustody)]
                    .spacing(12)
                    .into()
            }
            CustodyStage::MethodSelection => column(
                CustodyMethod::ALL
                    .into_iter()
                    .map(|method| {
                        button(text(method.label()))
                            .width(Length::Fill)
                            .padding(12)
                            .style(button::secondary)
                            .on_press(Msg::SelectMethod(method))
                            .into()
                    }),
            )
            .spacing(8)
            .into(),
            CustodyStage::Tracking | CustodyStage::Complete => {
                let rows = column(TrackingStatus::ALL.into_iter().enumerate().map(
                    |(i, status)| {
                        let marker = match custody.step_status(i) {
                            StepStatus::Completed => text("✓").style(text::success),
                            StepStatus::Active => text("•").style(text::warning),
                            StepStatus::Upcoming => {
                                text("○").style(text::secondary)
                            }
                        };
                        row![marker, text(status.label())].spacing(10).into()
                    },
                ))
                .spacing(6);
                let mut body = column![rows].spacing(12);
                if let Some(method) = custody.method() {
                    body = body.push(text(method.confirmation()).style(text::secondary));
                }
                if custody.is_complete() {
                    body = body.push(text("Custody complete").style(text::success));
                }
                body.into()
            }
        };
        column![text("Custody").size(22), card(body)].spacing(12).into()
    }

    fn preview(&self) -> Element<'_, Msg> {
        let nft = nft_preview();
        column![
            text("NFT preview").size(22),
            card(
                column![
                    field("Token", nft.token_id),
                    field("Name", nft.name),
                    field("Type", nft.kind.label()),
                    field("Estimated value", format_amount(nft.estimated_value)),
                    field("Location", nft.location),
                    field("Size", nft.size),
                    field("Completed", nft.completion),
                    field("Contract", nft.contract_hash),
                ]
                .spacing(6)
            ),
            button("Mint NFT").on_press(Msg::Mint),
        ]
        .spacing(12)
        .into()
    }

    fn minted(&self) -> Element<'_, Msg> {
        let nft = nft_preview();
        let borrowable = (nft.estimated_value as f64 * MINTED_LTV).round() as u64;
        column![
            text("NFT minted").size(22).style(text::success),
            card(
                column![
                    field("Token", nft.token_id),
                    field("Estimated value", format_amount(nft.estimated_value)),
                    field(
                        "Borrowable",
                        format!("{} ({:.0}% LTV)", format_amount(borrowable), MINTED_LTV * 100.0)
                    ),
                ]
                .spacing(6)
            ),
            progress_bar(0.0..=100.0, 100.0),
            row![
                button("View my assets")
                    .style(button::secondary)
                    .on_press(Msg::ViewAssets),
                button("Apply for a loan").on_press(Msg::ApplyForLoan),
            ]
            .spacing(12),
        ]
        .spacing(12)
        .into()
    }

    fn sidebar(&self) -> Element<'_, Msg> {
        let kind = self.draft.kind.map(AssetKind::label).unwrap_or("-");
        let name = if self.draft.name.trim().is_empty() {
            "-"
        } else {
            self.draft.name.as_str()
        };
        column![field("Asset", name), field("Type", kind)]
            .spacing(6)
            .padding(10)
            .into()
    }

    fn start_custody(&mut self, state: &AppState) {
        let kind = self
            .draft
            .kind
            .map(CustodyKind::from)
            .unwrap_or(CustodyKind::RealEstate);
        self.custody = Some(CustodyProcess::new(kind, &state.config.timings));
    }

    fn track(&mut self, timeline: Option<Timeline<CustodyEvent>>) -> Task<ScreenMessage<Self>> {
        let Some(timeline) = timeline else {
            return Task::none();
        };
        let (task, handle) = play::<Self, _>(timeline, Msg::Custody);
        self.timer = Some(handle);
        task
    }
}

impl Screen for TokenizationScreen {
    type Message = TokenizationMessage;
    type ParentMessage = Request;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let main = match self.stepper.current() {
            0 => self.submission(),
            1 => self.valuation(),
            2 => self.custody(),
            3 => self.preview(),
            _ => self.minted(),
        };
        let base = layout(&self.stepper, self.sidebar(), main);
        let content = match self.dialog {
            None => base,
            Some(Dialog::Contract) => modal(
                base,
                contract_dialog(
                    &self.read_gate,
                    ContractDialog {
                        on_scroll: Msg::Scrolled,
                        on_confirm: Msg::AcceptContract,
                        on_close: Msg::CloseDialog,
                    },
                ),
                Msg::CloseDialog,
            ),
            Some(Dialog::Signature) => modal(
                base,
                signature_dialog(
                    &self.signature,
                    SignatureDialog {
                        on_pen: Msg::Pen,
                        on_auto_fill: Msg::AutoSign,
                        on_clear: Msg::ClearSignature,
                        on_confirm: Msg::ConfirmSignature,
                        on_close: Msg::CloseDialog,
                    },
                ),
                Msg::CloseDialog,
            ),
        };
        content.map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            Msg::Kind(kind) => self.draft.select_kind(kind),
            Msg::Name(name) => self.draft.name = name,
            Msg::Description(description) => self.draft.description = description,
            Msg::PickFiles => {
                return Task::perform(files::pick(Pick::Documents), |picked| {
                    ScreenMessage::ScreenMessage(Msg::Picked(picked))
                });
            }
            Msg::Picked(Ok(picked)) => {
                let intake = self.draft.add_files(picked, &state.upload_policy());
                if intake.has_rejections() {
                    state.notify(Notice::error(
                        "Some files were rejected",
                        format!(
                            "{} file(s) were larger than 10 MiB or not JPG, PNG or PDF",
                            intake.rejected.len()
                        ),
                    ));
                }
            }
            Msg::Picked(Err(err)) => {
                state.notify(Notice::error("Upload failed", err));
            }
            Msg::RemoveFile(index) => {
                self.draft.remove_file(index);
            }
            Msg::Submit => {
                if self.submitting {
                    return Task::none();
                }
                match self.draft.validate(&state.upload_policy()) {
                    Ok(kind) => {
                        tracing::info!(draft = %self.draft.id, %kind, "asset submitted");
                        self.submitting = true;
                        let delay = Timeline::new()
                            .at(millis(state.config.timings.asset_submit_ms), ());
                        let (task, handle) = play::<Self, _>(delay, |()| Msg::Submitted);
                        self.timer = Some(handle);
                        return task;
                    }
                    Err(err) => {
                        state.notify(Notice::rejected("Incomplete submission", &err));
                    }
                }
            }
            Msg::Submitted => {
                self.submitting = false;
                self.timer = None;
                self.stepper.advance();
                state.notify(Notice::success(
                    "Asset submitted",
                    "Your asset entered professional valuation",
                ));
            }
            Msg::OpenContract => {
                self.read_gate.open();
                self.dialog = Some(Dialog::Contract);
            }
            Msg::Scrolled(metrics) => {
                if self.read_gate.on_scroll(metrics) {
                    state.notify(Notice::info(
                        "Thanks for reading",
                        "You can now accept the agreement",
                    ));
                }
            }
            Msg::AcceptContract => match self.read_gate.confirm() {
                Ok(()) => {
                    self.signature.open();
                    self.dialog = Some(Dialog::Signature);
                }
                Err(err) => {
                    state.notify(Notice::rejected("Contract not read", &err));
                }
            },
            Msg::Pen(PenEvent::Down(at)) => self.signature.pen_down(at),
            Msg::Pen(PenEvent::Move(to)) => self.signature.pen_move(to),
            Msg::Pen(PenEvent::Up) => {
                self.signature.pen_up();
            }
            Msg::AutoSign => self.signature.auto_fill(),
            Msg::ClearSignature => self.signature.clear(),
            Msg::ConfirmSignature => match self.signature.confirm() {
                Ok(()) => {
                    self.dialog = None;
                    self.stepper.advance();
                    self.start_custody(state);
                    state.notify(Notice::success(
                        "Contract signed",
                        "Hand the asset over to custody to continue",
                    ));
                }
                Err(err) => {
                    state.notify(Notice::rejected("Signature missing", &err));
                }
            },
            Msg::CloseDialog => self.dialog = None,
            Msg::StartCustody => {
                let timeline = self.custody.as_mut().and_then(CustodyProcess::start);
                return self.track(timeline);
            }
            Msg::SelectMethod(method) => {
                let timeline = self
                    .custody
                    .as_mut()
                    .and_then(|custody| custody.select_method(method));
                if timeline.is_some() {
                    state.notify(Notice::success(method.confirmation(), method.label()));
                }
                return self.track(timeline);
            }
            Msg::Custody(event) => {
                let Some(custody) = self.custody.as_mut() else {
                    return Task::none();
                };
                custody.apply(event);
                if custody.is_complete() && self.stepper.current() == 2 {
                    self.timer = None;
                    self.stepper.advance();
                    state.notify(Notice::success(
                        "Custody complete",
                        "Your asset is ready to be minted",
                    ));
                }
            }
            Msg::Mint => {
                if self.stepper.advance() {
                    let nft = nft_preview();
                    tracing::info!(token = nft.token_id, "nft minted");
                    state.notify(Notice::success(
                        "NFT minted",
                        format!("{} is now on chain", nft.token_id),
                    ));
                }
            }
            Msg::ViewAssets => return navigate(Route::MyAssets, NavPayload::None),
            Msg::ApplyForLoan => {
                let asset = default_fraction_asset(MINTED_ASSET_ID);
                return navigate(
                    Route::LoanSetup {
                        asset_id: asset.id.clone(),
                    },
                    NavPayload::Asset(asset),
                );
            }
        }
        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, asset::SubmissionError, gate::Point};

    fn screen() -> (TokenizationScreen, AppState) {
        let state = AppState::new(Config::default());
        (TokenizationScreen::new(&state), state)
    }

    #[test]
    fn invalid_submission_stays_on_first_step() {
        let (mut screen, mut state) = screen();
        screen.draft.select_kind(AssetKind::RealEstate);
        screen.draft.name = "Taipei Xinyi luxury residence".to_string();
        let _ = screen.update(Msg::Submit, &mut state);
        assert_eq!(screen.stepper.current(), 0);
        assert!(!screen.submitting);
        assert!(state.notices().iter().any(|(_, n)| n.is_error()));
        assert_eq!(
            screen.draft.validate(&state.upload_policy()),
            Err(SubmissionError::MissingDescription)
        );
    }

    #[test]
    fn contract_then_signature_leads_to_custody() {
        let (mut screen, mut state) = screen();
        screen.draft.select_kind(AssetKind::Art);
        screen.stepper.advance();

        let _ = screen.update(Msg::OpenContract, &mut state);
        let _ = screen.update(Msg::AcceptContract, &mut state);
        assert_eq!(screen.dialog, Some(Dialog::Contract));

        let bottom = ScrollMetrics {
            offset: 600.0,
            content_height: 1000.0,
            viewport_height: 400.0,
        };
        let _ = screen.update(Msg::Scrolled(bottom), &mut state);
        let _ = screen.update(Msg::AcceptContract, &mut state);
        assert_eq!(screen.dialog, Some(Dialog::Signature));

        let _ = screen.update(Msg::ConfirmSignature, &mut state);
        assert_eq!(screen.dialog, Some(Dialog::Signature));

        let _ = screen.update(Msg::Pen(PenEvent::Down(Point::new(1.0, 1.0))), &mut state);
        let _ = screen.update(Msg::Pen(PenEvent::Move(Point::new(5.0, 5.0))), &mut state);
        let _ = screen.update(Msg::Pen(PenEvent::Up), &mut state);
        let _ = screen.update(Msg::ConfirmSignature, &mut state);

        assert_eq!(screen.dialog, None);
        assert_eq!(screen.stepper.current(), 2);
        let custody = screen.custody.as_ref().map(CustodyProcess::kind);
        assert_eq!(custody, Some(CustodyKind::Valuables));
    }

    #[test]
    fn reopening_the_contract_resets_the_read_gate() {
        let (mut screen, mut state) = screen();
        let bottom = ScrollMetrics {
            offset: 600.0,
            content_height: 1000.0,
            viewport_height: 400.0,
        };
        let _ = screen.update(Msg::OpenContract, &mut state);
        let _ = screen.update(Msg::Scrolled(bottom), &mut state);
        assert!(screen.read_gate.has_scrolled_to_bottom());

        let _ = screen.update(Msg::CloseDialog, &mut state);
        let _ = screen.update(Msg::OpenContract, &mut state);
        assert!(!screen.read_gate.has_scrolled_to_bottom());
    }
}
