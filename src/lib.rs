//! Sectioned note organizer library
//!
//! This library keeps a workspace of named sections holding categorized
//! notes, derives grouped and relative-time views of them, and saves or
//! restores the whole workspace as a single JSON document.

pub mod codec;
mod cli;
mod config;
mod errors;
mod format;
mod helper;
mod id_gen;
mod intent;
mod naming;
mod note;
mod types;
mod workspace;

// Re-export key components
pub use cli::*;
pub use codec::WorkspaceDocument;
pub use config::*;
pub use errors::*;
pub use format::*;
pub use helper::*;
pub use id_gen::*;
pub use intent::*;
pub use naming::*;
pub use note::*;
pub use types::*;
pub use workspace::*;
