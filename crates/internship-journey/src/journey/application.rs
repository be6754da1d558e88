//! Three-step application wizard bound to a single candidate.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, Availability, Candidate, CandidateId,
    FileReference, ResumeRef, UserProfile, WorkHours, WorkMode,
};
use super::error::{DocumentError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStep {
    PersonalInfo,
    Documents,
    Preferences,
}

impl ApplicationStep {
    pub const TOTAL: u8 = 3;

    pub const fn number(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::Documents => 2,
            Self::Preferences => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::Documents => "Documents",
            Self::Preferences => "Availability & Preferences",
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::PersonalInfo => Some(Self::Documents),
            Self::Documents => Some(Self::Preferences),
            Self::Preferences => None,
        }
    }

    const fn previous(self) -> Option<Self> {
        match self {
            Self::PersonalInfo => None,
            Self::Documents => Some(Self::PersonalInfo),
            Self::Preferences => Some(Self::Documents),
        }
    }
}

/// Where a back press inside the application wizard leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationBack {
    /// Leave the wizard; navigation returns to the candidate details.
    Exit,
    Step(ApplicationStep),
}

/// Source of the four-digit suffix appended to generated application ids.
pub trait ApplicationIdSource {
    /// Returns a value in `0..10_000`.
    fn suffix(&self) -> u16;
}

/// Draws suffixes from a v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSuffix;

impl ApplicationIdSource for RandomSuffix {
    fn suffix(&self) -> u16 {
        let bytes = uuid::Uuid::new_v4().into_bytes();
        let value = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) % 10_000;
        u16::try_from(value).unwrap_or(0)
    }
}

/// Builds `<company prefix>-<title prefix>-<nnnn>`.
pub fn application_id_for(candidate: &Candidate, suffix: u16) -> ApplicationId {
    ApplicationId(format!(
        "{}-{}-{:04}",
        upper_prefix(&candidate.company, 2),
        upper_prefix(&candidate.title, 3),
        suffix % 10_000
    ))
}

fn upper_prefix(value: &str, len: usize) -> String {
    value.chars().take(len).collect::<String>().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedResume {
    pub name: String,
    pub handle: ResumeRef,
}

/// Mutable application fields while the wizard is live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub resume: Option<UploadedResume>,
    pub cover_letter: String,
    pub availability: Availability,
    pub work_hours: WorkHours,
    pub work_mode: WorkMode,
}

impl ApplicationDraft {
    pub fn has_resume(&self) -> bool {
        self.resume.is_some()
    }

    fn personal_info_complete(&self) -> bool {
        [&self.full_name, &self.email, &self.phone]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    candidate: Candidate,
    step: ApplicationStep,
    draft: ApplicationDraft,
}

impl ApplicationBuilder {
    /// Starts a wizard, pre-filling name and email from the profile when present.
    pub fn new(candidate: Candidate, profile: Option<&UserProfile>) -> Self {
        let draft = ApplicationDraft {
            full_name: profile
                .and_then(|profile| profile.name.clone())
                .unwrap_or_default(),
            email: profile
                .map(|profile| profile.email.clone())
                .unwrap_or_default(),
            ..ApplicationDraft::default()
        };

        Self {
            candidate,
            step: ApplicationStep::PersonalInfo,
            draft,
        }
    }

    pub fn candidate_id(&self) -> &CandidateId {
        &self.candidate.id
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn step(&self) -> ApplicationStep {
        self.step
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.draft.full_name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.draft.phone = value.into();
    }

    /// Accepts only `application/pdf`; any other declared type leaves the draft untouched.
    pub fn attach_resume(&mut self, file: FileReference) -> Result<(), DocumentError> {
        if !is_pdf(&file.declared_type) {
            warn!(
                file = %file.name,
                declared = %file.declared_type,
                "resume upload rejected"
            );
            return Err(DocumentError::InvalidFileType {
                declared: file.declared_type,
            });
        }

        self.draft.resume = Some(UploadedResume {
            name: file.name,
            handle: file.handle,
        });
        Ok(())
    }

    pub fn remove_resume(&mut self) {
        self.draft.resume = None;
    }

    pub fn set_cover_letter(&mut self, value: impl Into<String>) {
        self.draft.cover_letter = value.into();
    }

    pub fn set_availability(&mut self, value: Availability) {
        self.draft.availability = value;
    }

    pub fn set_work_hours(&mut self, value: WorkHours) {
        self.draft.work_hours = value;
    }

    pub fn set_work_mode(&mut self, value: WorkMode) {
        self.draft.work_mode = value;
    }

    pub fn can_proceed(&self) -> bool {
        match self.step {
            ApplicationStep::PersonalInfo => self.draft.personal_info_complete(),
            ApplicationStep::Documents => self.draft.has_resume(),
            ApplicationStep::Preferences => true,
        }
    }

    pub fn advance(&mut self) -> Result<ApplicationStep, ValidationError> {
        if !self.can_proceed() {
            return Err(ValidationError::ApplicationStepIncomplete(self.step));
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> ApplicationBack {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                ApplicationBack::Step(previous)
            }
            None => ApplicationBack::Exit,
        }
    }

    /// Finalizes the wizard into an immutable, stamped record. The draft is left intact so a
    /// refused submission can be corrected.
    pub fn submit(
        &self,
        submitted_at: DateTime<Utc>,
        ids: &dyn ApplicationIdSource,
    ) -> Result<ApplicationRecord, ValidationError> {
        if self.step != ApplicationStep::Preferences {
            return Err(ValidationError::WrongStep {
                action: "submit",
                expected: ApplicationStep::Preferences.label(),
            });
        }
        if !self.draft.personal_info_complete() {
            return Err(ValidationError::ApplicationStepIncomplete(
                ApplicationStep::PersonalInfo,
            ));
        }
        let resume = self
            .draft
            .resume
            .clone()
            .ok_or(ValidationError::ApplicationStepIncomplete(
                ApplicationStep::Documents,
            ))?;

        let application_id = application_id_for(&self.candidate, ids.suffix());
        info!(
            application_id = %application_id,
            internship_id = %self.candidate.id,
            "application submitted"
        );

        let draft = &self.draft;
        Ok(ApplicationRecord {
            application_id,
            internship_id: self.candidate.id.clone(),
            internship_title: self.candidate.title.clone(),
            company: self.candidate.company.clone(),
            full_name: draft.full_name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            has_resume: true,
            resume_ref: resume.handle,
            resume_name: resume.name,
            cover_letter: draft.cover_letter.clone(),
            availability: draft.availability,
            work_hours: draft.work_hours,
            work_mode: draft.work_mode,
            submitted_at,
            status: ApplicationStatus::Submitted,
        })
    }
}

fn is_pdf(declared: &str) -> bool {
    declared
        .trim()
        .parse::<mime::Mime>()
        .map(|parsed| {
            parsed
                .essence_str()
                .eq_ignore_ascii_case(mime::APPLICATION_PDF.essence_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedSuffix(u16);

    impl ApplicationIdSource for FixedSuffix {
        fn suffix(&self) -> u16 {
            self.0
        }
    }

    fn candidate() -> Candidate {
        Candidate {
            id: CandidateId::new("niti-data"),
            title: "Data Analyst".to_string(),
            company: "Niti Aayog".to_string(),
            company_initials: "NA".to_string(),
            location: "New Delhi".to_string(),
            mode: "Hybrid".to_string(),
            duration: "6 months".to_string(),
            stipend: "₹15,000/month".to_string(),
            match_score: 92,
            description: "Support policy research with data.".to_string(),
            skills: vec!["Python".to_string(), "Excel".to_string()],
            requirements: vec!["Undergraduate degree".to_string()],
            verified: true,
        }
    }

    fn pdf(name: &str) -> FileReference {
        FileReference {
            name: name.to_string(),
            declared_type: "application/pdf".to_string(),
            handle: ResumeRef(format!("blob:{name}")),
        }
    }

    fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 24, 10, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn builder_at_preferences() -> ApplicationBuilder {
        let mut builder = ApplicationBuilder::new(candidate(), None);
        builder.set_full_name("Asha Verma");
        builder.set_email("asha@example.com");
        builder.set_phone("+91 98765 43210");
        builder.advance().expect("personal info complete");
        builder.attach_resume(pdf("resume.pdf")).expect("pdf accepted");
        builder.advance().expect("documents complete");
        builder
    }

    #[test]
    fn personal_info_requires_all_three_fields() {
        let mut builder = ApplicationBuilder::new(candidate(), None);
        builder.set_full_name("Asha Verma");
        builder.set_email("asha@example.com");
        assert!(!builder.can_proceed());
        assert_eq!(
            builder.advance(),
            Err(ValidationError::ApplicationStepIncomplete(
                ApplicationStep::PersonalInfo
            ))
        );

        builder.set_phone("   ");
        assert!(!builder.can_proceed());

        builder.set_phone("+91 98765 43210");
        assert_eq!(builder.advance(), Ok(ApplicationStep::Documents));
    }

    #[test]
    fn profile_prefills_name_and_email() {
        let profile = UserProfile {
            email: "student@example.com".to_string(),
            education: "Undergraduate".to_string(),
            skills: ["Python".to_string()].into_iter().collect(),
            sectors: ["Technology".to_string()].into_iter().collect(),
            location: "Remote".to_string(),
            name: Some("Student".to_string()),
        };

        let builder = ApplicationBuilder::new(candidate(), Some(&profile));
        assert_eq!(builder.draft().full_name, "Student");
        assert_eq!(builder.draft().email, "student@example.com");
        assert!(builder.draft().phone.is_empty());
    }

    #[test]
    fn docx_upload_is_rejected_without_mutation() {
        let mut builder = ApplicationBuilder::new(candidate(), None);
        builder.set_full_name("Asha");
        builder.set_email("asha@example.com");
        builder.set_phone("123");
        builder.advance().expect("personal info");

        let result = builder.attach_resume(FileReference {
            name: "resume.docx".to_string(),
            declared_type:
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
            handle: ResumeRef("blob:docx".to_string()),
        });

        assert!(matches!(result, Err(DocumentError::InvalidFileType { .. })));
        assert!(!builder.draft().has_resume());
        assert!(!builder.can_proceed());
    }

    #[test]
    fn removing_resume_blocks_documents_step() {
        let mut builder = ApplicationBuilder::new(candidate(), None);
        builder.set_full_name("Asha");
        builder.set_email("asha@example.com");
        builder.set_phone("123");
        builder.advance().expect("personal info");
        builder.attach_resume(pdf("cv.pdf")).expect("pdf accepted");
        assert!(builder.can_proceed());

        builder.remove_resume();
        assert!(!builder.can_proceed());
    }

    #[test]
    fn pdf_with_parameters_is_accepted() {
        let mut builder = ApplicationBuilder::new(candidate(), None);
        let mut file = pdf("cv.pdf");
        file.declared_type = "Application/PDF; name=cv.pdf".to_string();
        builder.attach_resume(file).expect("pdf with parameters");
        assert!(builder.draft().has_resume());
    }

    #[test]
    fn back_from_first_step_exits_and_later_steps_decrement() {
        let mut builder = builder_at_preferences();
        assert_eq!(builder.back(), ApplicationBack::Step(ApplicationStep::Documents));
        assert_eq!(
            builder.back(),
            ApplicationBack::Step(ApplicationStep::PersonalInfo)
        );
        assert_eq!(builder.back(), ApplicationBack::Exit);
        assert_eq!(builder.step(), ApplicationStep::PersonalInfo);
    }

    #[test]
    fn submit_stamps_record_with_generated_id() {
        let mut builder = builder_at_preferences();
        builder.set_work_mode(WorkMode::Remote);
        builder.set_cover_letter("Keen to learn.");

        let record = builder
            .submit(submitted_at(), &FixedSuffix(42))
            .expect("submission succeeds");

        assert_eq!(record.application_id.0, "NI-DAT-0042");
        assert_eq!(record.internship_id, CandidateId::new("niti-data"));
        assert_eq!(record.status, ApplicationStatus::Submitted);
        assert_eq!(record.submitted_at, submitted_at());
        assert!(record.has_resume);
        assert_eq!(record.availability, Availability::Immediately);
        assert_eq!(record.work_hours, WorkHours::Forty);
        assert_eq!(record.work_mode, WorkMode::Remote);
        assert_eq!(record.company, "Niti Aayog");
    }

    #[test]
    fn random_ids_follow_company_title_digits_pattern() {
        let record = builder_at_preferences()
            .submit(submitted_at(), &RandomSuffix)
            .expect("submission succeeds");

        let id = record.application_id.0;
        assert!(id.starts_with("NI-DAT-"), "unexpected id {id}");
        let digits = &id["NI-DAT-".len()..];
        assert_eq!(digits.len(), 4);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn random_suffixes_spread_evenly_across_four_digits() {
        let draws = 20_000;
        let low = (0..draws)
            .map(|_| RandomSuffix.suffix())
            .inspect(|suffix| assert!(*suffix < 10_000))
            .filter(|suffix| *suffix < 5_536)
            .count();

        // 0.5536 when uniform; folding a u16 would push this to about 0.59.
        let share = low as f64 / draws as f64;
        assert!(share < 0.575, "suffixes skew low: {share:.3}");
    }

    #[test]
    fn last_step_number_matches_total() {
        assert_eq!(ApplicationStep::Preferences.number(), ApplicationStep::TOTAL);
        assert_eq!(ApplicationStep::Preferences.next(), None);
    }

    #[test]
    fn submit_outside_preferences_step_is_refused() {
        let builder = ApplicationBuilder::new(candidate(), None);
        assert!(matches!(
            builder.submit(submitted_at(), &FixedSuffix(1)),
            Err(ValidationError::WrongStep { action: "submit", .. })
        ));
    }

    #[test]
    fn short_names_do_not_panic_when_prefixing() {
        let mut short = candidate();
        short.company = "X".to_string();
        short.title = "QA".to_string();
        assert_eq!(application_id_for(&short, 7).0, "X-QA-0007");
    }
}
