//! Prompt builders for the gateway and judges

use serde_json::Value;

/// Dossier JSON is cut to this many characters
const DOSSIER_EXCERPT_CHARS: usize = 200;

/// Recent journal excerpts included in the vision prompt
const VISION_JOURNAL_ENTRIES: usize = 2;
const VISION_JOURNAL_CHARS: usize = 50;

/// Entries sent for journal analysis
pub const ANALYSIS_ENTRIES: usize = 5;
const ANALYSIS_ENTRY_CHARS: usize = 100;

const NOT_SET: &str = "Not set";

/// First `max` characters of `text` (char-safe)
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn or_not_set(text: &str) -> &str {
    if text.trim().is_empty() {
        NOT_SET
    } else {
        text
    }
}

pub fn combined_visions(directive: &str) -> String {
    format!(
        "Based on this identity directive: \"{}\", generate a JSON object with \"vision\" \
         and \"antiVision\" paragraphs. Return ONLY JSON.",
        directive
    )
}

pub fn vision(directive: &str, dossier: &Value, journal: &[String]) -> String {
    let dossier_json = dossier.to_string();
    let themes: Vec<&str> = journal
        .iter()
        .take(VISION_JOURNAL_ENTRIES)
        .map(|r| truncate_chars(r, VISION_JOURNAL_CHARS))
        .collect();
    let themes = if themes.is_empty() {
        "None".to_string()
    } else {
        themes.join("; ")
    };

    format!(
        "You are an identity transformation coach. Generate an inspiring 2-sentence vision of \
         who this person is becoming (not what they're doing).\n\n\
         Context:\n\
         - Directive: {}\n\
         - Dossier: {}\n\
         - Recent themes: {}\n\n\
         Vision (2 sentences, identity-focused):",
        or_not_set(directive),
        truncate_chars(&dossier_json, DOSSIER_EXCERPT_CHARS),
        themes
    )
}

pub fn anti_vision(directive: &str, current_vision: &str) -> String {
    format!(
        "Generate a cautionary 2-sentence anti-vision of who they'll become if they DON'T \
         change.\n\n\
         Context:\n\
         - Directive: {}\n\
         - Vision: {}\n\n\
         Anti-Vision (2 sentences, sobering but not cruel):",
        or_not_set(directive),
        or_not_set(current_vision)
    )
}

pub fn journal_analysis(responses: &[String]) -> String {
    let lines: Vec<String> = responses
        .iter()
        .take(ANALYSIS_ENTRIES)
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, truncate_chars(r, ANALYSIS_ENTRY_CHARS)))
        .collect();

    format!(
        "Analyze these journal entries:\n{}\n\n\
         Respond in JSON:\n\
         {{\n  \"themes\": [\"theme1\", \"theme2\"],\n  \"emotionalTrend\": \"description\",\n  \
         \"suggestions\": [\"prompt1\", \"prompt2\"]\n}}",
        lines.join("\n")
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Judge rubrics
// ─────────────────────────────────────────────────────────────────────────────

pub fn vision_judge(context: &Value, output: &str) -> String {
    let context_json = context.to_string();
    format!(
        "Evaluate this AI-generated vision (1-5 scale):\n\n\
         User Context: {}\n\
         Generated Vision: {}\n\n\
         Rate on:\n\
         1. Specificity: References actual user context?\n\
         2. Inspiration: Motivating without being generic?\n\
         3. Identity-Focus: WHO they're becoming, not WHAT they're doing?\n\n\
         JSON response:\n\
         {{\n  \"specificity\": 1-5,\n  \"inspiration\": 1-5,\n  \"identityFocus\": 1-5,\n  \
         \"reasoning\": \"brief explanation\"\n}}",
        truncate_chars(&context_json, DOSSIER_EXCERPT_CHARS),
        output
    )
}

pub fn journal_judge(entry_count: usize, analysis: &Value) -> String {
    format!(
        "Evaluate this journal analysis (1-5 scale):\n\n\
         Entry Count: {}\n\
         Analysis: {}\n\n\
         Rate on:\n\
         1. Relevance: Themes match actual entries?\n\
         2. Depth: Insights are meaningful?\n\
         3. Actionability: Suggestions are useful?\n\n\
         JSON response:\n\
         {{\n  \"relevance\": 1-5,\n  \"depth\": 1-5,\n  \"actionability\": 1-5,\n  \
         \"reasoning\": \"brief explanation\"\n}}",
        entry_count, analysis
    )
}
