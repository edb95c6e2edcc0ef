use crate::answer::{Answer, AnswerGenerator, failure_speech};
use crate::error::SkillError;
use crate::format;
use crate::handler::{HandlerInput, RequestHandler};
use crate::response::{Response, ResponseBuilder};
use crate::suggest::{FollowUpSuggester, FollowUps};
use async_trait::async_trait;
use voxgpt_conversation::{FollowUpClassifier, Turn};
use voxgpt_core::Result;
use voxgpt_locale::TextTable;

/// Intents that carry a free-form question.
pub const QUERY_INTENTS: [&str; 12] = [
    "AIPersonIntent",
    "AIHowIntent",
    "AIWhatIntent",
    "AIWhoIntent",
    "AIWhichIntent",
    "AIExplainIntent",
    "AITellMeAboutIntent",
    "AIDefineIntent",
    "AIWhenIntent",
    "AIWhereIntent",
    "AIWhyIntent",
    "AICompareIntent",
];

/// Slots checked for the question, in order.
const QUERY_SLOTS: [&str; 2] = ["query", "searchquery"];

/// Which intent names the query handler accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntents {
    /// The [`QUERY_INTENTS`] set.
    Standard,
    /// Exactly one configured intent.
    Single(String),
}

impl QueryIntents {
    #[must_use]
    pub fn from_config(single_query_intent: Option<&str>) -> Self {
        match single_query_intent.map(str::trim) {
            Some(name) if !name.is_empty() => Self::Single(name.to_string()),
            _ => Self::Standard,
        }
    }

    #[must_use]
    pub fn contains(&self, intent: &str) -> bool {
        match self {
            Self::Standard => QUERY_INTENTS.contains(&intent),
            Self::Single(name) => name == intent,
        }
    }
}

/// Turns the raw slot value into the question to ask.
///
/// Returns `None` for an empty value. Otherwise prepends the intent's
/// prefix unless the value already starts with it (case-insensitively).
#[must_use]
pub fn prepare_query(texts: &TextTable, intent: &str, raw: Option<&str>) -> Option<String> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;

    match texts.intent_prefix(intent) {
        Some(prefix) if !value.to_lowercase().starts_with(&prefix.to_lowercase()) => {
            Some(format!("{prefix} {value}"))
        }
        _ => Some(value.to_string()),
    }
}

/// Answers a question, offers follow-ups and records the exchange.
pub struct QueryIntentHandler {
    intents: QueryIntents,
    answers: AnswerGenerator,
    suggester: Option<FollowUpSuggester>,
}

impl QueryIntentHandler {
    #[must_use]
    pub fn new(
        intents: QueryIntents,
        answers: AnswerGenerator,
        suggester: Option<FollowUpSuggester>,
    ) -> Self {
        Self {
            intents,
            answers,
            suggester,
        }
    }

    fn slot_query<'a>(&self, input: &'a HandlerInput) -> Option<&'a str> {
        QUERY_SLOTS
            .iter()
            .filter_map(|slot| input.slot_value(slot))
            .find(|value| !value.trim().is_empty())
    }
}

#[async_trait]
impl RequestHandler for QueryIntentHandler {
    fn name(&self) -> &'static str {
        "query"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        input
            .intent_name()
            .is_some_and(|intent| self.intents.contains(intent))
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let intent = input.intent_name().unwrap_or_default();
        let Some(query) = prepare_query(&input.texts, intent, self.slot_query(input)) else {
            tracing::debug!("Empty query, reprompting");
            let reprompt = input.text("reprompt_default")?;
            return Ok(ResponseBuilder::new().speak(reprompt).ask(reprompt).build());
        };

        let is_follow_up = {
            let patterns = input.texts.list("followup_patterns").map_err(|report| {
                report.context(SkillError::Text {
                    key: "followup_patterns".to_string(),
                })
            })?;
            FollowUpClassifier::from_patterns(&patterns).is_follow_up(&query)
        };
        tracing::debug!(%query, is_follow_up, "Answering query");

        let answer = match self.answers.answer(input, &query, is_follow_up).await? {
            Answer::Generated(answer) => answer,
            Answer::Failed(category) => {
                let speech = failure_speech(input, category)?;
                let reprompt = input.text("reprompt_default")?.to_string();
                input.session.followup_questions.clear();
                return Ok(ResponseBuilder::new()
                    .speak(speech)
                    .ask(reprompt)
                    .build());
            }
        };

        let follow_ups = match &self.suggester {
            Some(suggester) => {
                suggester
                    .suggest(input, input.session.last_turn(), &query, &answer)
                    .await
            }
            None => FollowUps::Unavailable,
        };
        let suggestions = follow_ups.questions();

        let speech = format::answer_speech(input, &answer, suggestions)?;
        let reprompt = format::reprompt(input, !suggestions.is_empty())?.to_string();

        input.session.followup_questions = suggestions.to_vec();
        input.session.record_turn(Turn::new(query, answer));

        Ok(ResponseBuilder::new().speak(speech).ask(reprompt).build())
    }
}
