//! Spoken responses and SSML assembly.

use std::fmt;

/// An SSML fragment. Plain text pushed into it is escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ssml(String);

impl Ssml {
    /// Creates an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fragment holding escaped `text`.
    #[must_use]
    pub fn text(text: &str) -> Self {
        let mut ssml = Self::new();
        ssml.push_text(text);
        ssml
    }

    /// Appends escaped text.
    pub fn push_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            match c {
                '&' => self.0.push_str("&amp;"),
                '<' => self.0.push_str("&lt;"),
                '>' => self.0.push_str("&gt;"),
                _ => self.0.push(c),
            }
        }
        self
    }

    /// Appends a pause of the given length in milliseconds.
    pub fn push_break(&mut self, millis: u32) -> &mut Self {
        let secs = f64::from(millis) / 1000.0;
        self.0.push_str(&format!("<break time=\"{secs}s\"/>"));
        self
    }

    /// The fragment's markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether nothing has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_document(self) -> String {
        format!("<speak>{}</speak>", self.0)
    }
}

impl fmt::Display for Ssml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ssml {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Ssml {
    fn from(text: String) -> Self {
        Self::text(&text)
    }
}

/// What a handler wants spoken back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    speech: Option<String>,
    reprompt: Option<String>,
    should_end_session: Option<bool>,
}

impl Response {
    /// A response with no speech, used to acknowledge a session end.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The `<speak>` document to say now.
    #[must_use]
    pub fn speech(&self) -> Option<&str> {
        self.speech.as_deref()
    }

    /// The `<speak>` document to say if the user stays silent.
    #[must_use]
    pub fn reprompt(&self) -> Option<&str> {
        self.reprompt.as_deref()
    }

    #[must_use]
    pub fn should_end_session(&self) -> Option<bool> {
        self.should_end_session
    }
}

/// Builds a [`Response`].
///
/// A response with a reprompt keeps the session open; one with speech only
/// ends it.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    speech: Option<Ssml>,
    reprompt: Option<Ssml>,
}

impl ResponseBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn speak(mut self, speech: impl Into<Ssml>) -> Self {
        self.speech = Some(speech.into());
        self
    }

    #[must_use]
    pub fn ask(mut self, reprompt: impl Into<Ssml>) -> Self {
        self.reprompt = Some(reprompt.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Response {
        let should_end_session = match (&self.speech, &self.reprompt) {
            (_, Some(_)) => Some(false),
            (Some(_), None) => Some(true),
            (None, None) => None,
        };
        Response {
            speech: self.speech.map(Ssml::into_document),
            reprompt: self.reprompt.map(Ssml::into_document),
            should_end_session,
        }
    }
}
