//! Seed data for a fresh session

use super::types::{DossierCategory, DossierItem, Quest};

/// Prompt pool for new journal entries
pub const JOURNAL_PROMPTS: [&str; 3] = [
    "What did I learn about my future self today?",
    "Which old habit tried to speak for me today?",
    "Who am I becoming in this exact moment?",
];

/// Prompt and reflection of the entry every session starts with
pub const WELCOME_PROMPT: &str = "What am I avoiding right now by doing what I'm doing?";
pub const WELCOME_RESPONSE: &str = "Creating the demo video is taking longer than expected. \
I keep re-recording because I want it to be perfect for the buildathon submission.";
pub const WELCOME_TIME: &str = "11:00 AM";

pub fn quests() -> Vec<Quest> {
    [
        ("Define Core Loop", "+15 Clarity", "target", "blue"),
        ("Engagement Micro-Habit", "+10 Focus", "zap", "orange"),
        ("Weekly User Review", "+20 Empathy", "smile", "pink"),
        ("Streamline Roadmap", "+5 Momentum", "wind", "cyan"),
        ("Polish Visual Signature", "+12 Aesthetic", "sparkles", "purple"),
    ]
    .into_iter()
    .map(|(title, reward, icon, color)| Quest {
        title: title.to_string(),
        reward: reward.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        completed: false,
    })
    .collect()
}

pub fn dossier() -> Vec<DossierCategory> {
    let category = |title: &str, color: &str, prompts: &[&str]| DossierCategory {
        title: title.to_string(),
        color: color.to_string(),
        items: prompts.iter().map(|p| DossierItem::new(p)).collect(),
    };

    vec![
        category(
            "Pain Awareness",
            "red",
            &[
                "TOLERATED DISSATISFACTION",
                "REPEATED COMPLAINTS",
                "WHAT BEHAVIOR REVEALS",
                "THE UNBEARABLE TRUTH",
            ],
        ),
        category(
            "Anti-Vision",
            "orange",
            &[
                "5-YEAR TUESDAY",
                "10-YEAR COST",
                "END OF LIFE COST",
                "TRAJECTORY MIRROR",
                "IDENTITY TO RELEASE",
                "THE EMBARRASSING REASON",
            ],
        ),
        category(
            "Vision MVP",
            "emerald",
            &[
                "3-YEAR TUESDAY (NO LIMITS)",
                "TARGET IDENTITY STATEMENT",
                "WEEKLY LEVER",
            ],
        ),
        category(
            "Synthesis",
            "blue",
            &[
                "CORE STUCK REASON",
                "ACTUAL ENEMY",
                "REFUSAL SENTENCE",
                "BUILDING SENTENCE",
            ],
        ),
        category(
            "Goal Lenses",
            "indigo",
            &[
                "1-YEAR CONCRETE LENS",
                "1-MONTH REQUIREMENT",
                "DAILY ACTIONS",
            ],
        ),
        category(
            "Game Setup",
            "slate",
            &["RULES & CONSTRAINTS", "PRIORITY XP NODES"],
        ),
    ]
}
