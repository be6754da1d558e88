//! Post-submission status view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::ApplicationRecord;

pub const EXPECTED_REVIEW: &str = "5-7 business days";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneState {
    Completed,
    InProgress,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MilestoneTiming {
    On(NaiveDate),
    Estimate(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub title: &'static str,
    pub description: &'static str,
    pub state: MilestoneState,
    pub timing: MilestoneTiming,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView<'a> {
    pub record: &'a ApplicationRecord,
    pub timeline: Vec<Milestone>,
    pub expected_review: &'static str,
}

impl<'a> ApplicationStatusView<'a> {
    pub fn new(record: &'a ApplicationRecord) -> Self {
        Self {
            record,
            timeline: timeline(record.submitted_at),
            expected_review: EXPECTED_REVIEW,
        }
    }

    pub fn current(&self) -> Option<&Milestone> {
        self.timeline
            .iter()
            .find(|milestone| milestone.state == MilestoneState::InProgress)
    }
}

pub fn timeline(submitted_at: DateTime<Utc>) -> Vec<Milestone> {
    vec![
        Milestone {
            title: "Application Submitted",
            description: "Your application has been received",
            state: MilestoneState::Completed,
            timing: MilestoneTiming::On(submitted_at.date_naive()),
        },
        Milestone {
            title: "AI + Department Screening",
            description: "Reviewing your profile and resume",
            state: MilestoneState::InProgress,
            timing: MilestoneTiming::Estimate("Est. 2-3 days"),
        },
        Milestone {
            title: "Interview Slot",
            description: "If selected, interview will be scheduled",
            state: MilestoneState::Pending,
            timing: MilestoneTiming::Estimate("Est. 5-7 days"),
        },
        Milestone {
            title: "Final Decision",
            description: "Selection result will be communicated",
            state: MilestoneState::Pending,
            timing: MilestoneTiming::Estimate("Est. 10-14 days"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timeline_starts_with_completed_submission() {
        let submitted = Utc
            .with_ymd_and_hms(2025, 9, 24, 18, 30, 0)
            .single()
            .expect("valid timestamp");
        let steps = timeline(submitted);

        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].state, MilestoneState::Completed);
        assert_eq!(
            steps[0].timing,
            MilestoneTiming::On(NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid date"))
        );
        assert_eq!(
            steps
                .iter()
                .filter(|step| step.state == MilestoneState::InProgress)
                .count(),
            1
        );
        assert_eq!(steps[3].timing, MilestoneTiming::Estimate("Est. 10-14 days"));
    }
}
