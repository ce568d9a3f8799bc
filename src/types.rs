//! Shared result and outcome types, plus the commands understood by the
//! terminal shell.
use std::path::PathBuf;

use clap::Subcommand;

use crate::NotesError;

/// A specialized Result type for secnotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// What happened when a section was deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRemoval {
    /// No section had that id
    NotPresent,
    /// The section was removed
    Removed,
    /// The section was removed and it was the selected one; the view must go
    /// back to its "choose a section" state
    RemovedSelected,
}

/// Summary of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of sections in the imported workspace
    pub sections: usize,
    /// Number of notes across all imported sections
    pub notes: usize,
    /// Restored selection, if the document named an existing section
    pub selected_section_id: Option<u64>,
}

/// Commands accepted at the shell prompt
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List all sections
    Sections,

    /// Add a section (uses the suggested name when none is given)
    AddSection {
        /// Name of the new section
        name: Option<String>,
    },

    /// Open a section and move it to the top of the list
    Select {
        /// ID of the section
        id: u64,
    },

    /// Close the current section
    Back,

    /// Delete a section and all of its notes
    DeleteSection {
        /// ID of the section
        id: u64,
    },

    /// Add a note to the current section
    AddNote {
        /// Category label
        category: String,

        /// Note text
        content: String,
    },

    /// Delete a note from the current section
    DeleteNote {
        /// ID of the note
        id: u64,
    },

    /// List notes of the current section
    Notes,

    /// Show notes of the current section grouped by category
    View,

    /// Save the workspace to a file
    Export {
        /// Destination (defaults to the configured export path)
        path: Option<PathBuf>,
    },

    /// Replace the workspace with the contents of a file
    Import {
        /// File previously written by `export`
        path: PathBuf,
    },

    /// Leave the shell
    #[clap(alias = "exit")]
    Quit,
}
