use super::common::*;
use crate::journey::{
    ApplicationBack, ApplicationStep, DocumentError, FileReference, JourneyError, OnboardingStep,
    ResumeRef, Screen, ValidationError,
};

#[test]
fn auto_advance_is_dropped_after_manual_navigation() {
    let mut session = logged_in();
    let wizard = session.onboarding_mut().expect("onboarding live");
    let hint = wizard.select_education("Diploma").expect("known education");

    wizard.advance().expect("education chosen");
    wizard.back();
    wizard.back();
    assert_eq!(wizard.step(), OnboardingStep::Education);
    wizard.advance().expect("still chosen");

    assert!(!wizard.apply_auto_advance(hint));
    assert_eq!(wizard.step(), OnboardingStep::Skills);
}

#[test]
fn completing_before_confirmation_is_refused() {
    let mut session = logged_in();
    match session.complete_onboarding() {
        Err(JourneyError::Validation(ValidationError::WrongStep { action, .. })) => {
            assert_eq!(action, "complete")
        }
        other => panic!("expected wrong step, got {other:?}"),
    }
    assert_eq!(session.screen(), Screen::Onboarding);
}

#[test]
fn non_pdf_resume_is_rejected_and_blocks_documents_step() {
    let mut session = on_apply();
    let wizard = session.application_mut().expect("application live");
    wizard.set_phone("12345");
    wizard.advance().expect("personal info");

    let image = FileReference {
        name: "photo.png".to_string(),
        declared_type: "image/png".to_string(),
        handle: ResumeRef("upload:photo".to_string()),
    };
    assert_eq!(
        wizard.attach_resume(image),
        Err(DocumentError::InvalidFileType {
            declared: "image/png".to_string()
        })
    );
    assert!(!wizard.can_proceed());
    assert_eq!(
        wizard.advance(),
        Err(ValidationError::ApplicationStepIncomplete(
            ApplicationStep::Documents
        ))
    );
}

#[test]
fn submit_before_preferences_keeps_the_draft() {
    let mut session = on_apply();
    session
        .application_mut()
        .expect("application live")
        .set_phone("12345");

    match session.submit_application(submitted_at(), &FixedSuffix(9)) {
        Err(JourneyError::Validation(ValidationError::WrongStep { action, .. })) => {
            assert_eq!(action, "submit")
        }
        other => panic!("expected wrong step, got {other:?}"),
    }
    assert_eq!(session.screen(), Screen::Apply);
    assert_eq!(
        session.application().map(|wizard| wizard.draft().phone.as_str()),
        Some("12345")
    );
}

#[test]
fn leaving_the_application_discards_the_draft() {
    let mut session = on_apply();
    session
        .application_mut()
        .expect("application live")
        .set_phone("12345");

    assert_eq!(
        session.application_back().expect("wizard live"),
        ApplicationBack::Exit
    );
    assert_eq!(session.screen(), Screen::Details);
    assert!(session.application().is_none());
    assert!(session.state().selected_candidate().is_some());

    let wizard = session.start_application().expect("apply again");
    assert_eq!(wizard.step(), ApplicationStep::PersonalInfo);
    assert!(wizard.draft().phone.is_empty());
}
