use serde::Serialize;

use super::profile::OnboardingStep;

/// Prompts shown by the conversational onboarding wizard, one per step.
#[derive(Debug, Clone, Serialize)]
pub struct ChatPrompts {
    pub education: &'static str,
    pub skills: &'static str,
    pub sectors: &'static str,
    pub location: &'static str,
    pub confirmation: &'static str,
}

impl ChatPrompts {
    pub fn for_step(&self, step: OnboardingStep) -> &'static str {
        match step {
            OnboardingStep::Education => self.education,
            OnboardingStep::Skills => self.skills,
            OnboardingStep::Sectors => self.sectors,
            OnboardingStep::Location => self.location,
            OnboardingStep::Confirmation => self.confirmation,
        }
    }
}

/// Read-only option lists offered during onboarding.
#[derive(Debug, Clone, Serialize)]
pub struct OptionLists {
    pub education: Vec<&'static str>,
    pub skills: Vec<&'static str>,
    pub sectors: Vec<&'static str>,
    pub locations: Vec<&'static str>,
    pub prompts: ChatPrompts,
}

impl OptionLists {
    pub fn standard() -> Self {
        Self {
            education: vec![
                "Class 10",
                "Class 12",
                "Diploma",
                "ITI",
                "Undergraduate",
                "Postgraduate",
            ],
            skills: vec![
                "Python",
                "JavaScript",
                "React",
                "Data Analysis",
                "Excel",
                "Communication",
                "Content Writing",
                "Graphic Design",
                "Digital Marketing",
                "Public Speaking",
            ],
            sectors: vec![
                "Technology",
                "Healthcare",
                "Education",
                "Finance",
                "Agriculture",
                "Public Policy",
                "Manufacturing",
                "Media",
            ],
            locations: vec![
                "Delhi NCR",
                "Mumbai",
                "Bengaluru",
                "Hyderabad",
                "Chennai",
                "Remote",
            ],
            prompts: ChatPrompts {
                education: "Hi! Let's set up your profile. What's your highest education level?",
                skills: "Great! Which skills do you have? Pick as many as apply.",
                sectors: "Which sectors interest you the most?",
                location: "Where would you like to work?",
                confirmation: "Here's your profile. Does everything look right?",
            },
        }
    }

    /// Selectable values for a step; the confirmation step has none.
    pub fn choices(&self, step: OnboardingStep) -> &[&'static str] {
        match step {
            OnboardingStep::Education => &self.education,
            OnboardingStep::Skills => &self.skills,
            OnboardingStep::Sectors => &self.sectors,
            OnboardingStep::Location => &self.locations,
            OnboardingStep::Confirmation => &[],
        }
    }

    pub fn has_education(&self, value: &str) -> bool {
        self.education.contains(&value)
    }

    pub fn has_skill(&self, value: &str) -> bool {
        self.skills.contains(&value)
    }

    pub fn has_sector(&self, value: &str) -> bool {
        self.sectors.contains(&value)
    }

    pub fn has_location(&self, value: &str) -> bool {
        self.locations.contains(&value)
    }
}

impl Default for OptionLists {
    fn default() -> Self {
        Self::standard()
    }
}
