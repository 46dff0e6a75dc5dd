// intent classification - is this a store question, and if so, what sql

use super::ai::{Gemini, extract_text};
use super::prompt;
use tracing::debug;

/// Verdict for one inbound message. `Candidate` text is untrusted model
/// output and means nothing until the guard has passed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    NotApplicable,
    Candidate(String),
}

/// Classifies one user message.
///
/// Never errors: a failed completion call or an unusable envelope comes back
/// as a diagnostic string from the extractor, which doesn't match the
/// sentinel and therefore falls through as a candidate the guard will throw
/// out. Unsafety is caught downstream, the session stays alive.
pub async fn classify(gemini: &Gemini, message: &str, user_id: Option<i64>) -> Classification {
    let prompt = prompt::render(message, user_id);
    let raw = gemini.ask(&prompt).await;
    let text = extract_text(&raw);
    let verdict = parse(&text);
    debug!(?verdict, "classified message");
    verdict
}

// sentinel check plus cleanup of the usual markdown wrapping
fn parse(text: &str) -> Classification {
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case(prompt::NOT_APPLICABLE) {
        return Classification::NotApplicable;
    }

    // gemini sometimes fences sql in code blocks despite the instructions
    let sql = trimmed
        .trim_start_matches("```sql")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    Classification::Candidate(sql.to_string())
}
