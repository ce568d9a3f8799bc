//! Terminal front end: a prompt that turns typed commands into intents and
//! redraws from the store afterwards.
mod app;
mod args;

pub use app::*;
pub use args::*;
