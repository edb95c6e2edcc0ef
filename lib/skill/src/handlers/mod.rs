//! The skill's request handlers and its catch-all exception handler.

mod cancel_stop;
mod catch_all;
mod clear_context;
mod help;
mod launch;
mod query;
mod session_ended;

pub use cancel_stop::CancelOrStopIntentHandler;
pub use catch_all::CatchAllExceptionHandler;
pub use clear_context::ClearContextIntentHandler;
pub use help::HelpIntentHandler;
pub use launch::LaunchRequestHandler;
pub use query::{QUERY_INTENTS, QueryIntentHandler, QueryIntents, prepare_query};
pub use session_ended::SessionEndedRequestHandler;
