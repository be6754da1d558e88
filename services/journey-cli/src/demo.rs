use crate::infra::{file_reference, load_catalog, pick_file, FixedSuffix};
use chrono::Utc;
use clap::Args;
use internship_journey::config::JourneyConfig;
use internship_journey::error::AppError;
use internship_journey::journey::{
    rank, ApplicationIdSource, ApplicationStatusView, ApplicationStep, AuthDecision,
    CandidateDetails, Filter, JourneyError, JourneySession, MatchTicket, MilestoneState,
    MilestoneTiming, MockAuthenticator, OnboardingStep, OptionLists, RandomSuffix,
    RecommendationView, Screen, SkillMatch, SortKey, Toggle,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const DEMO_PASSWORD: &str = "journey123";
const DEMO_PHONE: &str = "+91 98100 00000";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Login email (defaults to the configured identity email).
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Login password.
    #[arg(long)]
    pub(crate) password: Option<String>,
    /// Education level chosen during onboarding.
    #[arg(long)]
    pub(crate) education: Option<String>,
    /// Comma-separated skills chosen during onboarding.
    #[arg(long, value_delimiter = ',')]
    pub(crate) skills: Vec<String>,
    /// Comma-separated sectors (at most three are kept).
    #[arg(long, value_delimiter = ',')]
    pub(crate) sectors: Vec<String>,
    /// Preferred location; values outside the option list are typed in as a city.
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Active filter chip on the recommendations screen.
    #[arg(long, value_parser = crate::infra::parse_filter)]
    pub(crate) filter: Option<Filter>,
    /// Sort key on the recommendations screen (match or stipend).
    #[arg(long, value_parser = crate::infra::parse_sort)]
    pub(crate) sort: Option<SortKey>,
    /// CSV or JSON catalog to rank instead of the built-in candidates.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Resume to upload; must exist on disk.
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
    /// Override the simulated matching delay in milliseconds.
    #[arg(long)]
    pub(crate) matching_delay_ms: Option<u64>,
    /// Fixed four-digit application id suffix.
    #[arg(long)]
    pub(crate) application_suffix: Option<u16>,
    /// Print the submitted application record as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// Filter chip: all, best_match, remote, delhi_ncr or part_time.
    #[arg(long, value_parser = crate::infra::parse_filter)]
    pub(crate) filter: Option<Filter>,
    /// Sort key: match or stipend.
    #[arg(long, value_parser = crate::infra::parse_sort)]
    pub(crate) sort: Option<SortKey>,
    /// CSV or JSON catalog to rank instead of the built-in candidates.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_demo(args: DemoArgs, config: &JourneyConfig) -> Result<(), AppError> {
    let DemoArgs {
        email,
        password,
        education,
        skills,
        sectors,
        location,
        filter,
        sort,
        catalog,
        resume,
        matching_delay_ms,
        application_suffix,
        json,
    } = args;

    let catalog = load_catalog(config, catalog)?;
    let mut session = JourneySession::new(
        Arc::new(catalog),
        Arc::new(OptionLists::standard()),
        config.identity(),
    );
    println!("Internship journey demo");
    announce(session.screen());

    let email = email.unwrap_or_else(|| config.identity().email);
    let password = password.unwrap_or_else(|| DEMO_PASSWORD.to_string());
    match session.login(&MockAuthenticator, &email, &password)? {
        AuthDecision::Accepted { email } => println!("- Signed in as {email}"),
        AuthDecision::Rejected(issues) => {
            for issue in issues {
                println!("- {:?}: {}", issue.field, issue.message);
            }
            return Ok(());
        }
    }
    announce(session.screen());

    onboard(
        &mut session,
        config.auto_advance_delay,
        education.as_deref().unwrap_or("Undergraduate"),
        &defaulted(skills, &["Python", "Data Analysis"]),
        &defaulted(sectors, &["Technology", "Public Policy"]),
        location.as_deref().unwrap_or("Delhi NCR"),
    )
    .await?;

    let ticket = session.complete_onboarding()?;
    announce(session.screen());
    let delay = matching_delay_ms
        .map(Duration::from_millis)
        .unwrap_or(config.matching_delay);
    println!("- Matching your profile ({} ms)", delay.as_millis());
    let signal = matching_signal(ticket, delay).await;
    session.matching_complete(signal)?;
    announce(session.screen());

    session.set_filter(filter.unwrap_or_default());
    session.set_sort(sort.unwrap_or_default());
    let view = session.recommendations();
    render_recommendations(&view);
    let Some(top) = view.entries.first().map(|entry| entry.candidate.id.clone()) else {
        return Ok(());
    };

    session.toggle_saved(&top)?;
    let saved: Vec<&str> = session.saved().iter().map(|id| id.as_str()).collect();
    println!("- Saved ({}): {}", session.saved().len(), saved.join(", "));
    session.select_candidate(top)?;
    announce(session.screen());
    if let Some(details) = session.candidate_details() {
        render_details(&details);
    }

    let upload = match resume {
        Some(path) => pick_file(&path)?,
        None => file_reference(Path::new("resume.pdf")),
    };
    let ids: Box<dyn ApplicationIdSource> = match application_suffix {
        Some(suffix) => Box::new(FixedSuffix(suffix)),
        None => Box::new(RandomSuffix),
    };

    {
        let wizard = session.start_application()?;
        announce(Screen::Apply);
        application_header(wizard.step());
        wizard.set_phone(DEMO_PHONE);
        wizard.advance().map_err(JourneyError::from)?;
        application_header(wizard.step());
        println!("  Uploading {} ({})", upload.name, upload.declared_type);
        if let Err(err) = wizard.attach_resume(upload) {
            warn!(%err, "demo upload refused");
            return Err(JourneyError::from(err).into());
        }
        wizard.advance().map_err(JourneyError::from)?;
        application_header(wizard.step());
        wizard.advance().map_err(JourneyError::from)?;
    }

    let record = session
        .submit_application(Utc::now(), ids.as_ref())?
        .clone();
    announce(session.screen());
    if let Some(status) = session.status() {
        render_status(&status);
    }

    if json {
        let body = serde_json::to_string_pretty(&record).map_err(std::io::Error::from)?;
        println!("{body}");
    }

    info!(application_id = %record.application_id, "demo journey finished");
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs, config: &JourneyConfig) -> Result<(), AppError> {
    let RankArgs {
        filter,
        sort,
        catalog,
        json,
    } = args;

    let catalog = load_catalog(config, catalog)?;
    let filter = filter.unwrap_or_default();
    let sort = sort.unwrap_or_default();
    let ranked = rank(catalog.candidates(), filter, sort);

    if json {
        let body = serde_json::to_string_pretty(&ranked).map_err(std::io::Error::from)?;
        println!("{body}");
        return Ok(());
    }

    println!(
        "{} of {} candidates | filter {} | sort by {}",
        ranked.len(),
        catalog.len(),
        filter.label(),
        sort.label()
    );
    for candidate in ranked {
        println!(
            "  {:>3}%  {:<28} {:<18} {:<12} {}",
            candidate.match_score,
            candidate.title,
            candidate.company,
            candidate.location,
            candidate.stipend
        );
    }
    Ok(())
}

pub(crate) fn run_options() {
    let options = OptionLists::standard();
    for step in OnboardingStep::ordered() {
        println!("{} {}", onboarding_header(step), options.prompts.for_step(step));
        for value in options.choices(step) {
            println!("  - {value}");
        }
    }
}

async fn onboard(
    session: &mut JourneySession,
    auto_advance: Duration,
    education: &str,
    skills: &[String],
    sectors: &[String],
    location: &str,
) -> Result<(), AppError> {
    let wizard = session.onboarding_mut()?;

    let hint = wizard.select_education(education).map_err(JourneyError::from)?;
    tokio::time::sleep(auto_advance).await;
    wizard.apply_auto_advance(hint);
    println!("- {} {education}", onboarding_header(OnboardingStep::Education));

    for skill in skills {
        wizard.toggle_skill(skill).map_err(JourneyError::from)?;
    }
    wizard.advance().map_err(JourneyError::from)?;
    println!("- {} {}", onboarding_header(OnboardingStep::Skills), skills.join(", "));

    for sector in sectors {
        if wizard.toggle_sector(sector).map_err(JourneyError::from)? == Toggle::Rejected {
            println!("  (skipping {sector}: sector limit reached)");
        }
    }
    wizard.advance().map_err(JourneyError::from)?;
    println!(
        "- {} {}",
        onboarding_header(OnboardingStep::Sectors),
        wizard.summary().sectors.join(", ")
    );

    if wizard.options().has_location(location) {
        let hint = wizard.select_location(location).map_err(JourneyError::from)?;
        tokio::time::sleep(auto_advance).await;
        wizard.apply_auto_advance(hint);
    } else {
        wizard.set_city_input(location);
        wizard.advance().map_err(JourneyError::from)?;
    }
    println!("- {} {location}", onboarding_header(OnboardingStep::Location));

    Ok(())
}

/// Stands in for the recommender: completes after `delay` with the ticket it was given.
async fn matching_signal(ticket: MatchTicket, delay: Duration) -> MatchTicket {
    tokio::time::sleep(delay).await;
    ticket
}

fn defaulted(values: Vec<String>, fallback: &[&str]) -> Vec<String> {
    if values.is_empty() {
        fallback.iter().map(|value| value.to_string()).collect()
    } else {
        values
    }
}

fn announce(screen: Screen) {
    println!("\n[{}]", screen.label());
}

fn onboarding_header(step: OnboardingStep) -> String {
    format!(
        "Step {}/{} {}:",
        step.number(),
        OnboardingStep::TOTAL,
        step.label()
    )
}

fn application_header(step: ApplicationStep) {
    println!(
        "- Step {}/{} {}",
        step.number(),
        ApplicationStep::TOTAL,
        step.label()
    );
}

fn render_recommendations(view: &RecommendationView<'_>) {
    println!(
        "{} recommendations | filter {} | sort by {}",
        view.entries.len(),
        view.filter.label(),
        view.sort.label()
    );
    if view.suggests_reset() {
        println!("  No internships match this filter. Reset to \"All\" to see everything.");
    }
    for entry in &view.entries {
        let candidate = entry.candidate;
        println!(
            "  {:>3}%  {} @ {} ({}, {}) {}{}",
            candidate.match_score,
            candidate.title,
            candidate.company,
            candidate.location,
            candidate.mode,
            candidate.stipend,
            if entry.saved { " [saved]" } else { "" }
        );
    }
}

fn render_details(details: &CandidateDetails<'_>) {
    let candidate = details.candidate;
    println!(
        "- {} at {} | {} | {}",
        candidate.title, candidate.company, candidate.duration, candidate.stipend
    );
    for badge in &details.skills {
        let marker = match badge.matched {
            SkillMatch::Have => "+",
            SkillMatch::Develop => "~",
            SkillMatch::Optional => " ",
        };
        println!("  [{marker}] {} ({})", badge.skill, badge.matched.label());
    }
}

fn render_status(status: &ApplicationStatusView<'_>) {
    let record = status.record;
    println!(
        "- Application {} for {} at {} -> {}",
        record.application_id,
        record.internship_title,
        record.company,
        record.status.label()
    );
    for milestone in &status.timeline {
        let state = match milestone.state {
            MilestoneState::Completed => "done",
            MilestoneState::InProgress => "now",
            MilestoneState::Pending => "next",
        };
        let timing = match &milestone.timing {
            MilestoneTiming::On(date) => date.format("%Y-%m-%d").to_string(),
            MilestoneTiming::Estimate(estimate) => estimate.to_string(),
        };
        println!("  [{state:<4}] {} ({timing})", milestone.title);
    }
    println!("  Expected review time: {}", status.expected_review);
}
