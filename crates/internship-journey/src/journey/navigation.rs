//! Screen state machine for the applicant journey.
//!
//! Forward moves are driven by events that carry their payload; back moves follow a fixed
//! parent table so leaving a screen always lands on the same place regardless of the route
//! that led there.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info};

use super::catalog::CandidateCatalog;
use super::domain::{ApplicationRecord, CandidateId, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Login,
    Onboarding,
    Loading,
    Recommendations,
    Details,
    Apply,
    Status,
}

impl Screen {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Onboarding => "onboarding",
            Self::Loading => "loading",
            Self::Recommendations => "recommendations",
            Self::Details => "details",
            Self::Apply => "apply",
            Self::Status => "status",
        }
    }

    /// Conceptual parent used by back navigation; `None` on the login screen.
    pub const fn back_target(self) -> Option<Self> {
        match self {
            Self::Login => None,
            Self::Onboarding => Some(Self::Login),
            Self::Loading => Some(Self::Onboarding),
            Self::Recommendations => Some(Self::Onboarding),
            Self::Details => Some(Self::Recommendations),
            Self::Apply => Some(Self::Details),
            Self::Status => Some(Self::Recommendations),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Token handed to the loading collaborator; only the most recent one completes matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchTicket {
    epoch: u64,
}

#[derive(Debug, Clone)]
pub enum NavigationEvent {
    CredentialsAccepted,
    ProfileFinalized(UserProfile),
    MatchingComplete(MatchTicket),
    CandidateChosen(CandidateId),
    ApplyRequested,
    ApplicationFinalized(ApplicationRecord),
    Back,
}

impl NavigationEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CredentialsAccepted => "credentials_accepted",
            Self::ProfileFinalized(_) => "profile_finalized",
            Self::MatchingComplete(_) => "matching_complete",
            Self::CandidateChosen(_) => "candidate_chosen",
            Self::ApplyRequested => "apply_requested",
            Self::ApplicationFinalized(_) => "application_finalized",
            Self::Back => "back",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardViolation {
    #[error("`{event}` is not a valid event on the {screen} screen")]
    UnexpectedEvent { screen: Screen, event: &'static str },
    #[error("candidate `{0}` is not in the catalog")]
    UnknownCandidate(CandidateId),
    #[error("no candidate is selected")]
    MissingSelection,
    #[error("no finalized profile is available")]
    MissingProfile,
    #[error("application targets `{actual}` but `{expected}` is selected")]
    ApplicationMismatch {
        expected: CandidateId,
        actual: CandidateId,
    },
}

/// Outcome of a successfully evaluated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Screen, to: Screen },
    /// Back on the login screen.
    Stayed,
    /// A matching signal that no longer applies to the active screen.
    IgnoredStale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    screen: Screen,
    selected_candidate: Option<CandidateId>,
    profile: Option<UserProfile>,
    application: Option<ApplicationRecord>,
    loading_epoch: u64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            screen: Screen::Login,
            selected_candidate: None,
            profile: None,
            application: None,
            loading_epoch: 0,
        }
    }
}

impl NavigationState {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_candidate(&self) -> Option<&CandidateId> {
        self.selected_candidate.as_ref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn application(&self) -> Option<&ApplicationRecord> {
        self.application.as_ref()
    }

    /// Ticket for the in-flight match computation while on the loading screen.
    pub fn pending_match(&self) -> Option<MatchTicket> {
        (self.screen == Screen::Loading).then_some(MatchTicket {
            epoch: self.loading_epoch,
        })
    }

    pub fn satisfies_invariants(&self, catalog: &CandidateCatalog) -> bool {
        let selection_ok = match self.screen {
            Screen::Details | Screen::Apply => self
                .selected_candidate
                .as_ref()
                .is_some_and(|id| catalog.contains(id)),
            _ => true,
        };
        let application_ok = self.application.is_some() == (self.screen == Screen::Status);
        let profile_ok = match self.screen {
            Screen::Login | Screen::Onboarding => true,
            _ => self.profile.is_some(),
        };

        selection_ok && application_ok && profile_ok
    }

    fn moved_to(&self, screen: Screen) -> Self {
        Self {
            screen,
            ..self.clone()
        }
    }
}

/// Pure transition function over the screen state.
pub fn transition(
    state: &NavigationState,
    event: NavigationEvent,
    catalog: &CandidateCatalog,
) -> Result<(NavigationState, Transition), GuardViolation> {
    let from = state.screen;

    let next = match (from, event) {
        (_, NavigationEvent::Back) => return Ok(back(state)),
        (Screen::Loading, NavigationEvent::MatchingComplete(ticket)) => {
            if ticket.epoch != state.loading_epoch {
                return Ok((state.clone(), Transition::IgnoredStale));
            }
            if state.profile.is_none() {
                return Err(GuardViolation::MissingProfile);
            }
            state.moved_to(Screen::Recommendations)
        }
        (_, NavigationEvent::MatchingComplete(_)) => {
            return Ok((state.clone(), Transition::IgnoredStale));
        }
        (Screen::Login, NavigationEvent::CredentialsAccepted) => NavigationState {
            profile: None,
            selected_candidate: None,
            application: None,
            ..state.moved_to(Screen::Onboarding)
        },
        (Screen::Onboarding, NavigationEvent::ProfileFinalized(profile)) => NavigationState {
            profile: Some(profile),
            loading_epoch: state.loading_epoch + 1,
            ..state.moved_to(Screen::Loading)
        },
        (Screen::Recommendations, NavigationEvent::CandidateChosen(id)) => {
            if !catalog.contains(&id) {
                return Err(GuardViolation::UnknownCandidate(id));
            }
            if state.profile.is_none() {
                return Err(GuardViolation::MissingProfile);
            }
            NavigationState {
                selected_candidate: Some(id),
                ..state.moved_to(Screen::Details)
            }
        }
        (Screen::Details, NavigationEvent::ApplyRequested) => {
            let selected = state
                .selected_candidate
                .as_ref()
                .ok_or(GuardViolation::MissingSelection)?;
            if !catalog.contains(selected) {
                return Err(GuardViolation::UnknownCandidate(selected.clone()));
            }
            state.moved_to(Screen::Apply)
        }
        (Screen::Apply, NavigationEvent::ApplicationFinalized(record)) => {
            let selected = state
                .selected_candidate
                .as_ref()
                .ok_or(GuardViolation::MissingSelection)?;
            if &record.internship_id != selected {
                return Err(GuardViolation::ApplicationMismatch {
                    expected: selected.clone(),
                    actual: record.internship_id,
                });
            }
            NavigationState {
                application: Some(record),
                ..state.moved_to(Screen::Status)
            }
        }
        (screen, event) => {
            return Err(GuardViolation::UnexpectedEvent {
                screen,
                event: event.name(),
            })
        }
    };

    let to = next.screen;
    Ok((next, Transition::Moved { from, to }))
}

fn back(state: &NavigationState) -> (NavigationState, Transition) {
    let from = state.screen;
    let Some(to) = from.back_target() else {
        return (state.clone(), Transition::Stayed);
    };

    let mut next = state.moved_to(to);
    match to {
        Screen::Login => {}
        Screen::Onboarding => {
            // A new onboarding session discards the previous profile and any pending match.
            next.profile = None;
            next.selected_candidate = None;
            next.loading_epoch += 1;
        }
        Screen::Recommendations => {
            next.selected_candidate = None;
            next.application = None;
        }
        Screen::Details => {}
        Screen::Loading | Screen::Apply | Screen::Status => {}
    }

    (next, Transition::Moved { from, to })
}

/// Owns the navigation state and applies events against the session catalog.
#[derive(Debug)]
pub struct NavigationController {
    state: NavigationState,
    catalog: Arc<CandidateCatalog>,
}

impl NavigationController {
    pub fn new(catalog: Arc<CandidateCatalog>) -> Self {
        Self {
            state: NavigationState::default(),
            catalog,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    pub fn catalog(&self) -> &CandidateCatalog {
        &self.catalog
    }

    pub fn dispatch(&mut self, event: NavigationEvent) -> Result<Transition, GuardViolation> {
        let event_name = event.name();
        let (next, outcome) = match transition(&self.state, event, &self.catalog) {
            Ok(result) => result,
            Err(violation) => {
                error!(screen = %self.state.screen, event = event_name, %violation, "navigation guard violated");
                return Err(violation);
            }
        };

        match outcome {
            Transition::Moved { from, to } => {
                info!(%from, %to, event = event_name, "screen transition")
            }
            Transition::Stayed => debug!(screen = %next.screen, "back ignored on root screen"),
            Transition::IgnoredStale => {
                debug!(screen = %next.screen, "stale matching signal ignored")
            }
        }

        debug_assert!(next.satisfies_invariants(&self.catalog));
        self.state = next;
        Ok(outcome)
    }

    pub fn back(&mut self) -> Result<Transition, GuardViolation> {
        self.dispatch(NavigationEvent::Back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::domain::{
        ApplicationId, ApplicationStatus, Availability, ResumeRef, WorkHours, WorkMode,
    };
    use chrono::{TimeZone, Utc};

    fn catalog() -> Arc<CandidateCatalog> {
        Arc::new(CandidateCatalog::standard())
    }

    fn profile() -> UserProfile {
        UserProfile {
            email: "user@example.com".to_string(),
            education: "Undergraduate".to_string(),
            skills: ["Python".to_string()].into_iter().collect(),
            sectors: ["Technology".to_string()].into_iter().collect(),
            location: "Remote".to_string(),
            name: Some("User".to_string()),
        }
    }

    fn record(internship: &str) -> ApplicationRecord {
        ApplicationRecord {
            application_id: ApplicationId("NI-DAT-0001".to_string()),
            internship_id: CandidateId::new(internship),
            internship_title: "Data Analyst".to_string(),
            company: "Niti Aayog".to_string(),
            full_name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "123".to_string(),
            has_resume: true,
            resume_ref: ResumeRef("blob:1".to_string()),
            resume_name: "cv.pdf".to_string(),
            cover_letter: String::new(),
            availability: Availability::Immediately,
            work_hours: WorkHours::Forty,
            work_mode: WorkMode::Hybrid,
            submitted_at: Utc
                .with_ymd_and_hms(2025, 9, 24, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
            status: ApplicationStatus::Submitted,
        }
    }

    fn controller_on_recommendations() -> NavigationController {
        let mut controller = NavigationController::new(catalog());
        controller
            .dispatch(NavigationEvent::CredentialsAccepted)
            .expect("login");
        controller
            .dispatch(NavigationEvent::ProfileFinalized(profile()))
            .expect("profile");
        let ticket = controller.state().pending_match().expect("ticket issued");
        controller
            .dispatch(NavigationEvent::MatchingComplete(ticket))
            .expect("matching");
        controller
    }

    fn controller_on_status() -> NavigationController {
        let mut controller = controller_on_recommendations();
        controller
            .dispatch(NavigationEvent::CandidateChosen(CandidateId::new(
                "niti-data-analyst",
            )))
            .expect("choose");
        controller
            .dispatch(NavigationEvent::ApplyRequested)
            .expect("apply");
        controller
            .dispatch(NavigationEvent::ApplicationFinalized(record(
                "niti-data-analyst",
            )))
            .expect("submit");
        controller
    }

    #[test]
    fn initial_screen_is_login_and_back_is_a_no_op() {
        let mut controller = NavigationController::new(catalog());
        assert_eq!(controller.screen(), Screen::Login);
        assert_eq!(controller.back(), Ok(Transition::Stayed));
        assert_eq!(controller.screen(), Screen::Login);
    }

    #[test]
    fn forward_path_reaches_status_with_payload() {
        let controller = controller_on_status();
        let state = controller.state();

        assert_eq!(state.screen(), Screen::Status);
        assert_eq!(
            state.application().map(|record| record.internship_id.as_str()),
            Some("niti-data-analyst")
        );
        assert!(state.profile().is_some());
        assert!(state.satisfies_invariants(controller.catalog()));
    }

    #[test]
    fn back_from_status_lands_on_recommendations_and_clears_application() {
        let mut controller = controller_on_status();
        assert_eq!(
            controller.back(),
            Ok(Transition::Moved {
                from: Screen::Status,
                to: Screen::Recommendations
            })
        );
        assert!(controller.state().application().is_none());
        assert!(controller.state().selected_candidate().is_none());
    }

    #[test]
    fn back_table_follows_conceptual_parents() {
        let expected = [
            (Screen::Status, Some(Screen::Recommendations)),
            (Screen::Apply, Some(Screen::Details)),
            (Screen::Details, Some(Screen::Recommendations)),
            (Screen::Recommendations, Some(Screen::Onboarding)),
            (Screen::Loading, Some(Screen::Onboarding)),
            (Screen::Onboarding, Some(Screen::Login)),
            (Screen::Login, None),
        ];
        for (screen, parent) in expected {
            assert_eq!(screen.back_target(), parent, "parent of {screen}");
        }
    }

    #[test]
    fn apply_without_selection_is_a_guard_violation() {
        let catalog = CandidateCatalog::standard();
        let state = NavigationState {
            screen: Screen::Details,
            profile: Some(profile()),
            ..NavigationState::default()
        };

        assert_eq!(
            transition(&state, NavigationEvent::ApplyRequested, &catalog).unwrap_err(),
            GuardViolation::MissingSelection
        );
    }

    #[test]
    fn choosing_unknown_candidate_is_refused() {
        let mut controller = controller_on_recommendations();
        let result = controller.dispatch(NavigationEvent::CandidateChosen(CandidateId::new(
            "does-not-exist",
        )));

        assert!(matches!(result, Err(GuardViolation::UnknownCandidate(_))));
        assert_eq!(controller.screen(), Screen::Recommendations);
    }

    #[test]
    fn application_for_other_candidate_is_refused() {
        let mut controller = controller_on_recommendations();
        controller
            .dispatch(NavigationEvent::CandidateChosen(CandidateId::new(
                "niti-data-analyst",
            )))
            .expect("choose");
        controller
            .dispatch(NavigationEvent::ApplyRequested)
            .expect("apply");

        let result =
            controller.dispatch(NavigationEvent::ApplicationFinalized(record("isro-web-developer")));
        assert!(matches!(
            result,
            Err(GuardViolation::ApplicationMismatch { .. })
        ));
        assert_eq!(controller.screen(), Screen::Apply);
    }

    #[test]
    fn events_out_of_order_are_guard_violations() {
        let mut controller = NavigationController::new(catalog());
        assert_eq!(
            controller.dispatch(NavigationEvent::ApplyRequested),
            Err(GuardViolation::UnexpectedEvent {
                screen: Screen::Login,
                event: "apply_requested"
            })
        );
    }

    #[test]
    fn stale_match_signal_is_ignored_after_leaving_loading() {
        let mut controller = NavigationController::new(catalog());
        controller
            .dispatch(NavigationEvent::CredentialsAccepted)
            .expect("login");
        controller
            .dispatch(NavigationEvent::ProfileFinalized(profile()))
            .expect("profile");
        let stale = controller.state().pending_match().expect("ticket issued");

        controller.back().expect("back to onboarding");
        controller
            .dispatch(NavigationEvent::ProfileFinalized(profile()))
            .expect("profile again");

        assert_eq!(
            controller.dispatch(NavigationEvent::MatchingComplete(stale)),
            Ok(Transition::IgnoredStale)
        );
        assert_eq!(controller.screen(), Screen::Loading);

        let fresh = controller.state().pending_match().expect("fresh ticket");
        assert_ne!(fresh, stale);
        controller
            .dispatch(NavigationEvent::MatchingComplete(fresh))
            .expect("fresh ticket completes");
        assert_eq!(controller.screen(), Screen::Recommendations);
    }

    #[test]
    fn match_signal_outside_loading_is_ignored() {
        let mut controller = controller_on_recommendations();
        let ticket = MatchTicket { epoch: 1 };
        assert_eq!(
            controller.dispatch(NavigationEvent::MatchingComplete(ticket)),
            Ok(Transition::IgnoredStale)
        );
        assert_eq!(controller.screen(), Screen::Recommendations);
    }

    #[test]
    fn returning_to_onboarding_discards_profile() {
        let mut controller = controller_on_recommendations();
        controller.back().expect("back to onboarding");

        assert_eq!(controller.screen(), Screen::Onboarding);
        assert!(controller.state().profile().is_none());
    }
}
