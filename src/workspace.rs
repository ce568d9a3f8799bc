//! The workspace and the store that owns it.
//!
//! Every mutation and query the view layer needs goes through
//! [`WorkspaceStore`]. Empty names and empty note fields are declined
//! silently: the operation returns `None` and nothing changes.
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::{
    codec, group_by_category, CategoryGroup, IdGenerator, ImportSummary, NamingPolicy, Note,
    NotesError, Result, Section, SectionRemoval,
};

/// Source of note timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Sections in display order plus the counters and the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Workspace {
    sections: Vec<Section>,
    ids: IdGenerator,
    naming: NamingPolicy,
    selected: Option<u64>,
}

impl Workspace {
    /// Assembles a workspace from persisted parts.
    ///
    /// `selected` is kept only if it names one of `sections`. `next_id` is
    /// trusted; a value that does not exceed every id in use is logged but
    /// accepted.
    pub fn from_parts(
        sections: Vec<Section>,
        next_id: u64,
        section_name_counter: u64,
        selected: Option<u64>,
    ) -> Self {
        let selected = selected.filter(|id| sections.iter().any(|s| s.id == *id));

        let max_id = sections
            .iter()
            .flat_map(|s| std::iter::once(s.id).chain(s.notes.iter().map(|n| n.id)))
            .max();
        if let Some(max_id) = max_id {
            if next_id <= max_id {
                warn!(
                    "Persisted nextId {} does not exceed largest id in use {}; new ids may collide",
                    next_id, max_id
                );
            }
        }

        Self {
            sections,
            ids: IdGenerator::starting_at(next_id),
            naming: NamingPolicy::starting_at(section_name_counter),
            selected,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: u64) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn next_id(&self) -> u64 {
        self.ids.peek()
    }

    pub fn section_name_counter(&self) -> u64 {
        self.naming.counter()
    }

    pub fn selected_section_id(&self) -> Option<u64> {
        self.selected
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.selected.and_then(|id| self.section(id))
    }

    /// Total number of notes across all sections
    pub fn note_count(&self) -> usize {
        self.sections.iter().map(|s| s.notes.len()).sum()
    }

    fn selected_section_mut(&mut self) -> Option<&mut Section> {
        let id = self.selected?;
        self.sections.iter_mut().find(|s| s.id == id)
    }
}

/// Owns the session's workspace and applies the view layer's requests to it.
pub struct WorkspaceStore {
    workspace: Workspace,
    clock: Box<dyn Clock>,
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceStore {
    /// Creates a store with an empty workspace and the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            workspace: Workspace::default(),
            clock,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn sections(&self) -> &[Section] {
        self.workspace.sections()
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.workspace.selected_section()
    }

    /// Notes of the selected section, newest first. Empty when nothing is
    /// selected.
    pub fn selected_notes(&self) -> &[Note] {
        self.selected_section()
            .map(|s| s.notes.as_slice())
            .unwrap_or(&[])
    }

    /// Category groups of the selected section's notes.
    pub fn grouped_notes(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(self.selected_notes())
    }

    /// Default name for the next section; never equal to an existing name.
    pub fn suggest_section_name(&self) -> String {
        self.workspace.naming.suggest(&self.workspace.sections)
    }

    /// The current time as the store sees it
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Appends a new section. Declined when `name` is blank or no ids are
    /// left.
    pub fn add_section(&mut self, name: &str) -> Option<&Section> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring section with empty name");
            return None;
        }

        let ws = &mut self.workspace;
        let Some(id) = ws.ids.next_id() else {
            warn!("Id counter exhausted, section '{}' not created", name);
            return None;
        };
        let section = Section::new(id, name.to_string());
        debug!("Adding section {} '{}'", section.id, section.name);
        ws.naming.record(name);
        ws.sections.push(section);
        ws.sections.last()
    }

    /// Removes a section if it exists. Deleting twice is harmless.
    pub fn delete_section(&mut self, id: u64) -> SectionRemoval {
        let ws = &mut self.workspace;
        let Some(index) = ws.sections.iter().position(|s| s.id == id) else {
            debug!("Section {} not present, nothing to delete", id);
            return SectionRemoval::NotPresent;
        };

        ws.sections.remove(index);
        debug!("Deleted section {}", id);
        if ws.selected == Some(id) {
            ws.selected = None;
            SectionRemoval::RemovedSelected
        } else {
            SectionRemoval::Removed
        }
    }

    /// Selects a section and moves it to the front of the list.
    pub fn select_section(&mut self, id: u64) -> Result<&Section> {
        let ws = &mut self.workspace;
        let index = ws
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or(NotesError::SectionNotFound { id })?;

        let section = ws.sections.remove(index);
        ws.sections.insert(0, section);
        ws.selected = Some(id);
        debug!("Selected section {}", id);
        Ok(&ws.sections[0])
    }

    /// Leaves the selected section without changing the section order.
    pub fn clear_selection(&mut self) {
        self.workspace.selected = None;
    }

    /// Adds a note at the top of the selected section. Declined when nothing
    /// is selected, either field is blank or no ids are left.
    pub fn add_note(&mut self, category: &str, content: &str) -> Option<&Note> {
        let (category, content) = (category.trim(), content.trim());
        if category.is_empty() || content.is_empty() {
            debug!("Ignoring note with empty category or content");
            return None;
        }

        let date = self.clock.now();
        let ws = &mut self.workspace;
        if ws.selected_section().is_none() {
            debug!("Ignoring note, no section selected");
            return None;
        }

        let Some(id) = ws.ids.next_id() else {
            warn!("Id counter exhausted, note not created");
            return None;
        };
        let note = Note::new(id, category.to_string(), content.to_string(), date);
        let section = ws.selected_section_mut()?;
        debug!("Adding note {} to section {}", note.id, section.id);
        section.notes.insert(0, note);
        section.notes.first()
    }

    /// Removes a note from the selected section. Returns whether a note was
    /// removed.
    pub fn delete_note(&mut self, id: u64) -> bool {
        let Some(section) = self.workspace.selected_section_mut() else {
            return false;
        };

        let before = section.notes.len();
        section.notes.retain(|n| n.id != id);
        let removed = section.notes.len() != before;
        if removed {
            debug!("Deleted note {} from section {}", id, section.id);
        }
        removed
    }

    /// Pretty-printed export document for the whole workspace.
    pub fn export_document(&self) -> Result<String> {
        codec::to_json(&self.workspace)
    }

    /// Replaces the workspace with the one decoded from `text`.
    ///
    /// On a decode error the current workspace is left exactly as it was.
    pub fn import_document(&mut self, text: &str) -> Result<ImportSummary> {
        let workspace = codec::from_json(text)?;
        let summary = ImportSummary {
            sections: workspace.sections().len(),
            notes: workspace.note_count(),
            selected_section_id: workspace.selected_section_id(),
        };
        self.workspace = workspace;
        info!(
            "Imported workspace with {} sections and {} notes",
            summary.sections, summary.notes
        );
        Ok(summary)
    }
}
