//! Plain-text rendering for the command-line submit mode.

use std::fmt::Write;

use crate::client::SubmissionState;
use crate::domain::CoffeeSuggestion;

/// `0.853` -> `85.3%`
pub fn format_confidence(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

pub fn render_suggestion(suggestion: &CoffeeSuggestion) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Morning Greeting\n  {}", suggestion.greeting);
    let _ = writeln!(out, "Recommended Coffee\n  {}", suggestion.suggested_coffee);
    let _ = writeln!(out, "Why This Coffee?\n  {}", suggestion.reasoning);
    let _ = writeln!(out, "Health Fact\n  {}", suggestion.health_fact);
    let _ = write!(
        out,
        "Confidence Score\n  {} - {}",
        format_confidence(suggestion.confidence_score),
        suggestion.tier().label()
    );
    out
}

pub fn render_state(state: &SubmissionState) -> String {
    match state {
        SubmissionState::Idle => String::new(),
        SubmissionState::Pending => "Brewing your suggestion...".to_string(),
        SubmissionState::Succeeded(suggestion) => render_suggestion(suggestion),
        SubmissionState::Failed { message, details } => match details {
            Some(details) => format!("Error: {}\n  {}", message, details),
            None => format!("Error: {}", message),
        },
    }
}
