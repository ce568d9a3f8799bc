//! Requests from the view layer and what it should redraw afterwards.
use std::fmt;

use log::warn;

use crate::{ImportSummary, NotesError, Result, SectionRemoval, WorkspaceStore};

/// A user action forwarded by the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CreateSection { name: String },
    SelectSection { id: u64 },
    ClearSelection,
    DeleteSection { id: u64 },
    CreateNote { category: String, content: String },
    DeleteNote { id: u64 },
    ExportWorkspace,
    ImportWorkspace { contents: String },
}

/// What the view layer has to do after an intent was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    /// Nothing changed (declined or idempotent no-op)
    Unchanged,
    /// The section list changed
    Sections,
    /// A section was opened; redraw the section list and its notes
    SectionOpened { id: u64 },
    /// No section is selected any more; show the "choose a section" state
    SelectionCleared,
    /// The notes of the selected section changed
    Notes,
    /// The export document, ready to be written out
    Exported { document: String },
    /// The workspace was replaced; redraw everything
    Imported { summary: ImportSummary, notice: Notice },
    /// Import failed and the workspace is unchanged
    ImportFailed { notice: Notice },
}

/// User-facing messages for import results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Loaded,
    LoadFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Loaded => write!(f, "Workspace loaded."),
            Notice::LoadFailed => write!(f, "Failed to load. Please choose a valid workspace file."),
        }
    }
}

impl WorkspaceStore {
    /// Applies one intent.
    ///
    /// Only selecting a missing section is an error. A document that fails
    /// to decode is reported as [`ViewUpdate::ImportFailed`] so the view can
    /// show the notice.
    pub fn apply(&mut self, intent: Intent) -> Result<ViewUpdate> {
        let update = match intent {
            Intent::CreateSection { name } => match self.add_section(&name) {
                Some(_) => ViewUpdate::Sections,
                None => ViewUpdate::Unchanged,
            },
            Intent::SelectSection { id } => {
                self.select_section(id)?;
                ViewUpdate::SectionOpened { id }
            }
            Intent::ClearSelection => {
                self.clear_selection();
                ViewUpdate::SelectionCleared
            }
            Intent::DeleteSection { id } => match self.delete_section(id) {
                SectionRemoval::NotPresent => ViewUpdate::Unchanged,
                SectionRemoval::Removed => ViewUpdate::Sections,
                SectionRemoval::RemovedSelected => ViewUpdate::SelectionCleared,
            },
            Intent::CreateNote { category, content } => {
                match self.add_note(&category, &content) {
                    Some(_) => ViewUpdate::Notes,
                    None => ViewUpdate::Unchanged,
                }
            }
            Intent::DeleteNote { id } => {
                if self.delete_note(id) {
                    ViewUpdate::Notes
                } else {
                    ViewUpdate::Unchanged
                }
            }
            Intent::ExportWorkspace => ViewUpdate::Exported {
                document: self.export_document()?,
            },
            Intent::ImportWorkspace { contents } => match self.import_document(&contents) {
                Ok(summary) => ViewUpdate::Imported {
                    summary,
                    notice: Notice::Loaded,
                },
                Err(NotesError::Decode(e)) => {
                    warn!("Import rejected: {}", e);
                    ViewUpdate::ImportFailed {
                        notice: Notice::LoadFailed,
                    }
                }
                Err(e) => return Err(e),
            },
        };
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(store: &mut WorkspaceStore, name: &str) -> ViewUpdate {
        store
            .apply(Intent::CreateSection {
                name: name.to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_section_intents() {
        let mut store = WorkspaceStore::new();
        assert_eq!(create(&mut store, "Work"), ViewUpdate::Sections);
        assert_eq!(create(&mut store, " "), ViewUpdate::Unchanged);

        let update = store.apply(Intent::SelectSection { id: 1 }).unwrap();
        assert_eq!(update, ViewUpdate::SectionOpened { id: 1 });

        let update = store.apply(Intent::DeleteSection { id: 1 }).unwrap();
        assert_eq!(update, ViewUpdate::SelectionCleared);
        let update = store.apply(Intent::DeleteSection { id: 1 }).unwrap();
        assert_eq!(update, ViewUpdate::Unchanged);
    }

    #[test]
    fn test_select_missing_is_reported() {
        let mut store = WorkspaceStore::new();
        let err = store.apply(Intent::SelectSection { id: 3 }).unwrap_err();
        assert!(matches!(err, NotesError::SectionNotFound { id: 3 }));
    }

    #[test]
    fn test_note_intents() {
        let mut store = WorkspaceStore::new();
        create(&mut store, "Work");
        let note = Intent::CreateNote {
            category: "todo".into(),
            content: "ship it".into(),
        };

        assert_eq!(store.apply(note.clone()).unwrap(), ViewUpdate::Unchanged);
        store.apply(Intent::SelectSection { id: 1 }).unwrap();
        assert_eq!(store.apply(note).unwrap(), ViewUpdate::Notes);
        assert_eq!(store.apply(Intent::DeleteNote { id: 2 }).unwrap(), ViewUpdate::Notes);
        assert_eq!(store.apply(Intent::DeleteNote { id: 2 }).unwrap(), ViewUpdate::Unchanged);
    }

    #[test]
    fn test_export_then_import() {
        let mut store = WorkspaceStore::new();
        create(&mut store, "Work");
        store.apply(Intent::SelectSection { id: 1 }).unwrap();
        let ViewUpdate::Exported { document } = store.apply(Intent::ExportWorkspace).unwrap() else {
            panic!("Expected Exported");
        };

        let mut other = WorkspaceStore::new();
        let update = other
            .apply(Intent::ImportWorkspace { contents: document })
            .unwrap();
        match update {
            ViewUpdate::Imported { summary, notice } => {
                assert_eq!(summary.sections, 1);
                assert_eq!(summary.selected_section_id, Some(1));
                assert_eq!(notice, Notice::Loaded);
            }
            other => panic!("Expected Imported, got {:?}", other),
        }
        assert_eq!(other.workspace(), store.workspace());
    }

    #[test]
    fn test_failed_import_keeps_workspace() {
        let mut store = WorkspaceStore::new();
        create(&mut store, "Work");
        let before = store.workspace().clone();

        let update = store
            .apply(Intent::ImportWorkspace {
                contents: "{ broken".into(),
            })
            .unwrap();
        assert_eq!(
            update,
            ViewUpdate::ImportFailed {
                notice: Notice::LoadFailed
            }
        );
        assert_eq!(store.workspace(), &before);
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::Loaded.to_string(), "Workspace loaded.");
        assert!(Notice::LoadFailed.to_string().starts_with("Failed to load"));
    }
}
