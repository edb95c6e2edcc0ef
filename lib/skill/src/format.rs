//! Spoken answer formatting.

use crate::error::SkillError;
use crate::handler::HandlerInput;
use crate::response::Ssml;
use voxgpt_core::Result;

/// Pause between the answer and the suggestions.
const SUGGESTION_PAUSE_MS: u32 = 500;

const DEFAULT_CONJUNCTION: &str = "or";

/// The answer followed, when there are any, by the suggested questions.
///
/// # Errors
///
/// Returns [`SkillError::Text`] if the suggestion intro or closer is missing.
pub fn answer_speech(
    input: &HandlerInput,
    answer: &str,
    suggestions: &[String],
) -> Result<Ssml, SkillError> {
    let mut speech = Ssml::text(answer);
    if suggestions.is_empty() {
        return Ok(speech);
    }

    let conjunction = input.texts.text_or("suggestions_conjunction", DEFAULT_CONJUNCTION);
    speech
        .push_text(" ")
        .push_break(SUGGESTION_PAUSE_MS)
        .push_text(" ")
        .push_text(input.text("suggestions_intro")?)
        .push_text(&join_suggestions(suggestions, conjunction))
        .push_text(input.text("suggestions_closer")?);
    Ok(speech)
}

/// Quotes each suggestion and joins them as `'a', 'b', or 'c'`.
#[must_use]
pub fn join_suggestions(suggestions: &[String], conjunction: &str) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!("'{only}'"),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|s| format!("'{s}'"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{head}, {conjunction} '{last}'")
        }
    }
}

/// The reprompt matching whether suggestions were offered.
///
/// # Errors
///
/// Returns [`SkillError::Text`] if the reprompt text is missing.
pub fn reprompt(input: &HandlerInput, has_suggestions: bool) -> Result<&str, SkillError> {
    if has_suggestions {
        input.text("reprompt_with_suggestions")
    } else {
        input.text("reprompt_default")
    }
}
