//! Fixed onboarding and progress content

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Hex accent colour
    pub color: &'static str,
}

pub const ONBOARDING_STEPS: [OnboardingStep; 4] = [
    OnboardingStep {
        title: "Who are you protecting?",
        description: "You aren't lazy. You're just protecting an old version of yourself \
                      that feels safe. It's time to bloom.",
        icon: "sparkles",
        color: "#FFB300",
    },
    OnboardingStep {
        title: "The Anti-Vision",
        description: "Define the future you refuse to live. Growth happens when you stop \
                      settling for 'okay'.",
        icon: "cloud-rain",
        color: "#3F51B5",
    },
    OnboardingStep {
        title: "Identity First",
        description: "Don't just change your habits. Change your roots. Everything else \
                      will grow from there.",
        icon: "leaf",
        color: "#43A047",
    },
    OnboardingStep {
        title: "New Horizons",
        description: "Turn your progress into a game. When the path is fun, discipline \
                      becomes effortless.",
        icon: "sun",
        color: "#FF7043",
    },
];

/// A level on the campaign map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub level: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub locked: bool,
}

const MILESTONES: [(&str, &str); 12] = [
    ("Origin", "The journey begins."),
    ("Awakening", "Eyes open to potential."),
    ("Momentum", "Acceleration begins."),
    ("Clarity", "The path is fully visible."),
    ("Resilience", "Unshakable core strength."),
    ("Harmony", "Systematic alignment."),
    ("Breakthrough", "Breaking old boundaries."),
    ("Mastery", "Flow state is baseline."),
    ("Influence", "Your impact ripples out."),
    ("Legacy", "Building something lasting."),
    ("Ascension", "Approaching the peak."),
    ("Transcendence", "The vision is now reality."),
];

/// Levels unlocked at the start of every session
pub const UNLOCKED_LEVELS: u32 = 1;

/// Milestones from the top of the map (level 12) down to Origin
pub fn milestones() -> Vec<Milestone> {
    MILESTONES
        .iter()
        .enumerate()
        .rev()
        .map(|(i, &(title, description))| {
            let level = i as u32 + 1;
            Milestone {
                level,
                title,
                description,
                locked: level > UNLOCKED_LEVELS,
            }
        })
        .collect()
}
