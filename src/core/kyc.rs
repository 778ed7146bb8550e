use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, macros::format_description};

use crate::core::{
    asset::UploadedFile,
    config::{Timings, millis},
    sim::Timeline,
    stepper::Stepper,
};

pub const KYC_STEPS: &[&str] = &["Basic Info", "Documents", "Verified"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdType {
    IdCard,
    Passport,
    DriverLicense,
}

impl IdType {
    pub const ALL: [IdType; 3] = [IdType::IdCard, IdType::Passport, IdType::DriverLicense];
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdType::IdCard => "National ID card",
            IdType::Passport => "Passport",
            IdType::DriverLicense => "Driver's license",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KycError {
    #[error("Please fill in all required fields")]
    MissingBasicInfo,
    #[error("Birth date {0:?} is not a valid YYYY-MM-DD date")]
    InvalidBirthDate(String),
    #[error("Please upload both the ID document and the selfie")]
    MissingDocuments,
    #[error("Verification is already under review")]
    AlreadySubmitted,
}

/// Parse a `YYYY-MM-DD` birth date.
pub fn parse_birth_date(raw: &str) -> Result<Date, KycError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw.trim(), &format).map_err(|_| KycError::InvalidBirthDate(raw.to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KycForm {
    pub full_name: String,
    pub id_type: Option<IdType>,
    pub id_number: String,
    /// Raw text as typed; parsed on validation.
    pub birth_date: String,
    pub id_document: Option<UploadedFile>,
    pub selfie: Option<UploadedFile>,
}

impl KycForm {
    pub fn validate_basic_info(&self) -> Result<Date, KycError> {
        if self.full_name.trim().is_empty()
            || self.id_type.is_none()
            || self.id_number.trim().is_empty()
            || self.birth_date.trim().is_empty()
        {
            return Err(KycError::MissingBasicInfo);
        }
        parse_birth_date(&self.birth_date)
    }

    pub fn validate_documents(&self) -> Result<(), KycError> {
        if self.id_document.is_none() || self.selfie.is_none() {
            return Err(KycError::MissingDocuments);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KycStatus {
    #[default]
    NotStarted,
    UnderReview,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KycEvent {
    /// Review finished; the user is told the documents were received.
    Reviewed,
    /// Leave for the tokenization flow.
    Redirect,
}

pub fn review_timeline(timings: &Timings) -> Timeline<KycEvent> {
    Timeline::new()
        .at(millis(timings.kyc_review_ms), KycEvent::Reviewed)
        .at(
            millis(timings.kyc_review_ms + timings.kyc_redirect_ms),
            KycEvent::Redirect,
        )
}

/// The two-page KYC form with its verification step.
#[derive(Debug, Clone, PartialEq)]
pub struct KycFlow {
    pub form: KycForm,
    stepper: Stepper,
    status: KycStatus,
    timings: Timings,
}

impl KycFlow {
    pub fn new(timings: &Timings) -> Self {
        Self {
            form: KycForm::default(),
            stepper: Stepper::new(KYC_STEPS),
            status: KycStatus::NotStarted,
            timings: timings.clone(),
        }
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn status(&self) -> KycStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == KycStatus::UnderReview
    }

    pub fn next_from_basic_info(&mut self) -> Result<(), KycError> {
        let birth_date = self.form.validate_basic_info()?;
        tracing::debug!(%birth_date, "kyc basic info accepted");
        self.stepper.advance_to(1);
        Ok(())
    }

    /// Submit the documents; returns the simulated review.
    pub fn submit(&mut self) -> Result<Timeline<KycEvent>, KycError> {
        if self.status != KycStatus::NotStarted {
            return Err(KycError::AlreadySubmitted);
        }
        self.form.validate_basic_info()?;
        self.form.validate_documents()?;
        self.status = KycStatus::UnderReview;
        tracing::info!(id_type = ?self.form.id_type, "kyc submitted for review");
        Ok(review_timeline(&self.timings))
    }

    /// Returns `true` when the event asks to leave the page.
    pub fn apply(&mut self, event: KycEvent) -> bool {
        match event {
            KycEvent::Reviewed => {
                self.status = KycStatus::Submitted;
                self.stepper.advance_to(2);
                false
            }
            KycEvent::Redirect => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn filled() -> KycForm {
        KycForm {
            full_name: "Zoe Shih".into(),
            id_type: Some(IdType::Passport),
            id_number: "A123456789".into(),
            birth_date: "1990-05-17".into(),
            id_document: Some(UploadedFile::new("passport.jpg", 1024, "image/jpeg")),
            selfie: Some(UploadedFile::new("selfie.png", 1024, "image/png")),
        }
    }

    #[test]
    fn basic_info_requires_every_field() {
        let mut form = filled();
        form.id_number = " ".into();
        assert_eq!(form.validate_basic_info(), Err(KycError::MissingBasicInfo));
        form.id_number = "A1".into();
        form.birth_date = "17/05/1990".into();
        assert!(matches!(
            form.validate_basic_info(),
            Err(KycError::InvalidBirthDate(_))
        ));
        form.birth_date = "1990-05-17".into();
        assert_eq!(form.validate_basic_info(), Ok(date!(1990 - 05 - 17)));
    }

    #[test]
    fn submit_requires_both_documents() {
        let mut flow = KycFlow::new(&Timings::default());
        flow.form = filled();
        flow.form.selfie = None;
        assert_eq!(flow.submit(), Err(KycError::MissingDocuments));
        assert_eq!(flow.status(), KycStatus::NotStarted);
    }

    #[test]
    fn review_then_redirect() {
        let mut flow = KycFlow::new(&Timings::default());
        flow.form = filled();
        flow.next_from_basic_info().unwrap();
        assert_eq!(flow.stepper().current(), 1);

        let timeline = flow.submit().unwrap();
        assert!(flow.is_submitting());
        assert_eq!(flow.submit(), Err(KycError::AlreadySubmitted));
        assert_eq!(timeline.duration(), millis(3500));

        assert!(!flow.apply(KycEvent::Reviewed));
        assert_eq!(flow.status(), KycStatus::Submitted);
        assert!(flow.stepper().is_terminal());
        assert!(flow.apply(KycEvent::Redirect));
    }
}
