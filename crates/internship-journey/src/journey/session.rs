use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::application::{ApplicationBack, ApplicationBuilder, ApplicationIdSource};
use super::auth::{AuthDecision, Authenticator};
use super::catalog::CandidateCatalog;
use super::details::CandidateDetails;
use super::domain::{ApplicationRecord, CandidateId};
use super::error::{DocumentError, ValidationError};
use super::navigation::{
    GuardViolation, MatchTicket, NavigationController, NavigationEvent, NavigationState, Screen,
    Transition,
};
use super::options::OptionLists;
use super::profile::{OnboardingBack, ProfileBuilder, ProfileIdentity};
use super::recommendations::{
    Filter, RecommendationEngine, RecommendationView, SavedCandidates, SortKey,
};
use super::status::ApplicationStatusView;

#[derive(Debug, thiserror::Error)]
pub enum JourneyError {
    #[error(transparent)]
    Navigation(#[from] GuardViolation),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("{action} requires the {expected} screen (currently on {actual})")]
    WrongScreen {
        action: &'static str,
        expected: Screen,
        actual: Screen,
    },
    #[error("candidate `{0}` is not in the catalog")]
    UnknownCandidate(CandidateId),
}

/// One applicant's pass through the journey.
///
/// Wraps the navigation controller together with whichever wizard the current screen owns,
/// so at most one draft is live and a draft disappears as soon as its screen is left.
#[derive(Debug)]
pub struct JourneySession {
    navigation: NavigationController,
    catalog: Arc<CandidateCatalog>,
    options: Arc<OptionLists>,
    identity: ProfileIdentity,
    onboarding: Option<ProfileBuilder>,
    application: Option<ApplicationBuilder>,
    recommendations: RecommendationEngine,
}

impl JourneySession {
    pub fn new(
        catalog: Arc<CandidateCatalog>,
        options: Arc<OptionLists>,
        identity: ProfileIdentity,
    ) -> Self {
        Self {
            navigation: NavigationController::new(Arc::clone(&catalog)),
            catalog,
            options,
            identity,
            onboarding: None,
            application: None,
            recommendations: RecommendationEngine::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.navigation.screen()
    }

    pub fn state(&self) -> &NavigationState {
        self.navigation.state()
    }

    pub fn catalog(&self) -> &CandidateCatalog {
        &self.catalog
    }

    pub fn identity(&self) -> &ProfileIdentity {
        &self.identity
    }

    /// Rejected credentials leave the session on the login screen.
    pub fn login(
        &mut self,
        authenticator: &dyn Authenticator,
        email: &str,
        password: &str,
    ) -> Result<AuthDecision, JourneyError> {
        self.require("login", Screen::Login)?;

        let decision = authenticator.authenticate(email, password);
        match &decision {
            AuthDecision::Accepted { email } => {
                self.identity.email = email.clone();
                self.navigation
                    .dispatch(NavigationEvent::CredentialsAccepted)?;
                self.sync_wizards();
            }
            AuthDecision::Rejected(issues) => {
                debug!(issues = issues.len(), "login rejected");
            }
        }

        Ok(decision)
    }

    pub fn onboarding(&self) -> Option<&ProfileBuilder> {
        self.onboarding.as_ref()
    }

    pub fn onboarding_mut(&mut self) -> Result<&mut ProfileBuilder, JourneyError> {
        let error = self.wrong_screen("onboarding", Screen::Onboarding);
        self.onboarding.as_mut().ok_or(error)
    }

    /// Steps back inside the wizard, leaving for login from the first step.
    pub fn onboarding_back(&mut self) -> Result<OnboardingBack, JourneyError> {
        let outcome = self.onboarding_mut()?.back();
        if outcome == OnboardingBack::Exit {
            self.back()?;
        }
        Ok(outcome)
    }

    /// Finalizes the profile and moves to the loading screen. The returned ticket must be
    /// handed back through [`JourneySession::matching_complete`].
    pub fn complete_onboarding(&mut self) -> Result<MatchTicket, JourneyError> {
        let builder = self
            .onboarding
            .as_ref()
            .ok_or_else(|| self.wrong_screen("complete onboarding", Screen::Onboarding))?;
        let profile = builder.complete(&self.identity)?;
        self.navigation
            .dispatch(NavigationEvent::ProfileFinalized(profile))?;
        self.sync_wizards();

        self.navigation
            .state()
            .pending_match()
            .ok_or_else(|| self.wrong_screen("complete onboarding", Screen::Loading))
    }

    pub fn matching_complete(&mut self, ticket: MatchTicket) -> Result<Transition, JourneyError> {
        Ok(self
            .navigation
            .dispatch(NavigationEvent::MatchingComplete(ticket))?)
    }

    pub fn recommendations(&self) -> RecommendationView<'_> {
        self.recommendations.view(self.catalog.candidates())
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.recommendations
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.recommendations.set_filter(filter);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.recommendations.set_sort(sort);
    }

    pub fn toggle_saved(&mut self, id: &CandidateId) -> Result<bool, JourneyError> {
        if !self.catalog.contains(id) {
            return Err(JourneyError::UnknownCandidate(id.clone()));
        }
        Ok(self.recommendations.toggle_saved(id))
    }

    pub fn saved(&self) -> &SavedCandidates {
        self.recommendations.saved()
    }

    pub fn select_candidate(&mut self, id: CandidateId) -> Result<Transition, JourneyError> {
        Ok(self
            .navigation
            .dispatch(NavigationEvent::CandidateChosen(id))?)
    }

    /// Details for the selected candidate, if any.
    pub fn candidate_details(&self) -> Option<CandidateDetails<'_>> {
        let state = self.navigation.state();
        let id = state.selected_candidate()?;
        let candidate = self.catalog.get(id)?;

        Some(CandidateDetails::new(
            candidate,
            state.profile(),
            self.recommendations.saved().contains(id),
        ))
    }

    pub fn start_application(&mut self) -> Result<&mut ApplicationBuilder, JourneyError> {
        self.navigation.dispatch(NavigationEvent::ApplyRequested)?;
        self.sync_wizards();
        self.application_mut()
    }

    pub fn application(&self) -> Option<&ApplicationBuilder> {
        self.application.as_ref()
    }

    pub fn application_mut(&mut self) -> Result<&mut ApplicationBuilder, JourneyError> {
        let error = self.wrong_screen("application", Screen::Apply);
        self.application.as_mut().ok_or(error)
    }

    /// Steps back inside the wizard, returning to the details screen from the first step.
    pub fn application_back(&mut self) -> Result<ApplicationBack, JourneyError> {
        let outcome = self.application_mut()?.back();
        if outcome == ApplicationBack::Exit {
            self.back()?;
        }
        Ok(outcome)
    }

    pub fn submit_application(
        &mut self,
        submitted_at: DateTime<Utc>,
        ids: &dyn ApplicationIdSource,
    ) -> Result<&ApplicationRecord, JourneyError> {
        let record = self.application_mut()?.submit(submitted_at, ids)?;
        self.navigation
            .dispatch(NavigationEvent::ApplicationFinalized(record))?;
        self.sync_wizards();

        self.navigation
            .state()
            .application()
            .ok_or_else(|| self.wrong_screen("submit application", Screen::Status))
    }

    pub fn status(&self) -> Option<ApplicationStatusView<'_>> {
        self.navigation
            .state()
            .application()
            .map(ApplicationStatusView::new)
    }

    /// Screen-level back navigation.
    pub fn back(&mut self) -> Result<Transition, JourneyError> {
        let outcome = self.navigation.back()?;
        self.sync_wizards();
        Ok(outcome)
    }

    fn require(&self, action: &'static str, expected: Screen) -> Result<(), JourneyError> {
        if self.screen() == expected {
            Ok(())
        } else {
            Err(self.wrong_screen(action, expected))
        }
    }

    fn wrong_screen(&self, action: &'static str, expected: Screen) -> JourneyError {
        JourneyError::WrongScreen {
            action,
            expected,
            actual: self.screen(),
        }
    }

    /// Keeps the live wizard in step with the current screen.
    fn sync_wizards(&mut self) {
        match self.screen() {
            Screen::Onboarding => {
                if self.onboarding.is_none() {
                    info!("onboarding session started");
                    self.onboarding = Some(ProfileBuilder::new(Arc::clone(&self.options)));
                }
                self.application = None;
            }
            Screen::Apply => {
                self.onboarding = None;
                if self.application.is_none() {
                    let state = self.navigation.state();
                    let candidate = state
                        .selected_candidate()
                        .and_then(|id| self.catalog.get(id));
                    if let Some(candidate) = candidate {
                        self.application =
                            Some(ApplicationBuilder::new(candidate.clone(), state.profile()));
                    }
                }
            }
            _ => {
                if self.onboarding.take().is_some() {
                    debug!("onboarding draft discarded");
                }
                if self.application.take().is_some() {
                    debug!("application draft discarded");
                }
            }
        }
    }
}
