use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::journey::{
    ApplicationIdSource, CandidateCatalog, CandidateId, FileReference, JourneySession,
    MockAuthenticator, OptionLists, ProfileIdentity, ResumeRef, Screen,
};

pub(super) const LOGIN_EMAIL: &str = "asha.verma@example.in";

pub(super) struct FixedSuffix(pub(super) u16);

impl ApplicationIdSource for FixedSuffix {
    fn suffix(&self) -> u16 {
        self.0
    }
}

pub(super) fn session() -> JourneySession {
    JourneySession::new(
        Arc::new(CandidateCatalog::standard()),
        Arc::new(OptionLists::standard()),
        ProfileIdentity::default(),
    )
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 10, 15, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn pdf_resume() -> FileReference {
    FileReference {
        name: "asha-cv.pdf".to_string(),
        declared_type: "application/pdf".to_string(),
        handle: ResumeRef("upload:asha-cv".to_string()),
    }
}

pub(super) fn niti() -> CandidateId {
    CandidateId::new("niti-data-analyst")
}

pub(super) fn logged_in() -> JourneySession {
    let mut session = session();
    let decision = session
        .login(&MockAuthenticator, LOGIN_EMAIL, "secret123")
        .expect("login screen active");
    assert!(decision.is_accepted());
    session
}

/// Walks the onboarding wizard to the confirmation step.
pub(super) fn fill_onboarding(session: &mut JourneySession) {
    let wizard = session.onboarding_mut().expect("onboarding live");
    let hint = wizard
        .select_education("Undergraduate")
        .expect("known education");
    assert!(wizard.apply_auto_advance(hint));
    wizard.toggle_skill("Excel").expect("known skill");
    wizard.toggle_skill("Python").expect("known skill");
    wizard.advance().expect("skills chosen");
    wizard.toggle_sector("Finance").expect("known sector");
    wizard.advance().expect("sectors chosen");
    let hint = wizard.select_location("Mumbai").expect("known location");
    assert!(wizard.apply_auto_advance(hint));
}

pub(super) fn on_recommendations() -> JourneySession {
    let mut session = logged_in();
    fill_onboarding(&mut session);
    let ticket = session.complete_onboarding().expect("profile completes");
    session.matching_complete(ticket).expect("matching completes");
    assert_eq!(session.screen(), Screen::Recommendations);
    session
}

pub(super) fn on_apply() -> JourneySession {
    let mut session = on_recommendations();
    session.select_candidate(niti()).expect("candidate exists");
    session.start_application().expect("apply from details");
    session
}
