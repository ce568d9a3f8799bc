//! The export document: the whole workspace as one JSON object.
//!
//! ```json
//! {
//!   "sections": [{ "id": 1, "name": "Work", "notes": [
//!     { "id": 2, "category": "todo", "content": "...", "date": "2024-01-15T09:00:00.000Z" }
//!   ]}],
//!   "nextId": 3,
//!   "sectionNameCounter": 1,
//!   "currentSection": 1
//! }
//! ```
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::{Result, Section, Workspace};

/// Wire form of a [`Workspace`].
///
/// Every top-level field may be absent or `null` when reading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDocument {
    pub sections: Option<Vec<Section>>,
    pub next_id: Option<u64>,
    /// Older exports call this `sectionCounter`
    #[serde(alias = "sectionCounter")]
    pub section_name_counter: Option<u64>,
    /// Id of the selected section
    pub current_section: Option<u64>,
}

/// Captures the full workspace, selection included.
pub fn serialize(workspace: &Workspace) -> WorkspaceDocument {
    WorkspaceDocument {
        sections: Some(workspace.sections().to_vec()),
        next_id: Some(workspace.next_id()),
        section_name_counter: Some(workspace.section_name_counter()),
        current_section: workspace.selected_section_id(),
    }
}

/// Rebuilds a workspace, filling in defaults for missing fields.
///
/// Counters that are missing or zero start at 1. The selection survives only
/// if it names one of the decoded sections.
pub fn deserialize(document: WorkspaceDocument) -> Workspace {
    let next_id = document.next_id.filter(|n| *n > 0).unwrap_or(1);
    let counter = document.section_name_counter.filter(|n| *n > 0).unwrap_or(1);

    Workspace::from_parts(
        document.sections.unwrap_or_default(),
        next_id,
        counter,
        document.current_section,
    )
}

/// Pretty-printed JSON text of the workspace.
pub fn to_json(workspace: &Workspace) -> Result<String> {
    let json = serde_json::to_string_pretty(&serialize(workspace)).map_err(|e| {
        error!("Failed to serialize workspace: {}", e);
        e
    })?;
    Ok(json)
}

/// Decodes JSON text into a new workspace without touching any existing one.
pub fn from_json(text: &str) -> Result<Workspace> {
    let document: WorkspaceDocument = serde_json::from_str(text).map_err(|e| {
        error!("Failed to decode workspace document: {}", e);
        e
    })?;
    debug!(
        "Decoded document with {} sections",
        document.sections.as_ref().map_or(0, Vec::len)
    );
    Ok(deserialize(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::fixtures::ManualClock;
    use crate::WorkspaceStore;
    use chrono::Duration;
    use serde_json::{json, Value};

    fn sample_store() -> WorkspaceStore {
        let clock = ManualClock::new();
        let mut store = WorkspaceStore::with_clock(Box::new(clock.clone()));
        store.add_section("Work");
        store.add_section("Section3");
        store.add_section("Home");
        store.select_section(1).unwrap();
        store.add_note("todo", "write report");
        clock.advance(Duration::milliseconds(1500));
        store.add_note("idea", "rewrite it in Rust");
        store.select_section(3).unwrap();
        store.add_note("errand", "milk");
        store
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let store = sample_store();
        let text = to_json(store.workspace()).unwrap();
        let restored = from_json(&text).unwrap();
        assert_eq!(&restored, store.workspace());
        assert_eq!(restored.selected_section_id(), Some(3));
        assert_eq!(restored.next_id(), 7);
        assert_eq!(restored.section_name_counter(), 4);
    }

    #[test]
    fn test_document_shape() {
        let store = sample_store();
        let value: Value = serde_json::from_str(&to_json(store.workspace()).unwrap()).unwrap();
        assert_eq!(value["nextId"], 7);
        assert_eq!(value["sectionNameCounter"], 4);
        assert_eq!(value["currentSection"], 3);
        assert_eq!(value["sections"][0]["name"], "Home");
        assert_eq!(value["sections"][1]["notes"][0]["content"], "rewrite it in Rust");
        assert_eq!(
            value["sections"][1]["notes"][1]["date"],
            "2024-01-15T09:00:00.000Z"
        );
    }

    #[test]
    fn test_no_selection_serializes_as_null() {
        let value = serde_json::to_value(serialize(&Workspace::default())).unwrap();
        assert_eq!(
            value,
            json!({"sections": [], "nextId": 1, "sectionNameCounter": 1, "currentSection": null})
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let ws = from_json("{}").unwrap();
        assert!(ws.sections().is_empty());
        assert_eq!(ws.next_id(), 1);
        assert_eq!(ws.section_name_counter(), 1);
        assert_eq!(ws.selected_section_id(), None);

        let ws = from_json(r#"{"sections": null, "nextId": null, "sectionNameCounter": 0}"#).unwrap();
        assert_eq!(ws.next_id(), 1);
        assert_eq!(ws.section_name_counter(), 1);
    }

    #[test]
    fn test_missing_next_id_with_sections() {
        let ws = from_json(r#"{"sections": [{"id": 4, "name": "Old", "notes": []}]}"#).unwrap();
        assert_eq!(ws.next_id(), 1);
        assert_eq!(ws.sections()[0].name, "Old");
    }

    #[test]
    fn test_dangling_selection_is_cleared() {
        let ws = from_json(
            r#"{"sections": [{"id": 1, "name": "A", "notes": []}], "nextId": 2, "currentSection": 9}"#,
        )
        .unwrap();
        assert_eq!(ws.selected_section_id(), None);
    }

    #[test]
    fn test_accepts_browser_export() {
        let text = r#"{
          "sections": [
            { "id": 1, "name": "Section1", "notes": [
              { "id": 2, "category": "memo", "content": "hello", "date": "2024-05-01T03:04:05.678Z" }
            ]}
          ],
          "nextId": 3,
          "sectionCounter": 2,
          "currentSection": 1
        }"#;
        let ws = from_json(text).unwrap();
        assert_eq!(ws.sections()[0].notes[0].date.timestamp_subsec_millis(), 678);
        assert_eq!(ws.selected_section().unwrap().name, "Section1");
        assert_eq!(ws.section_name_counter(), 2);
    }

    #[test]
    fn test_counters_at_limit_import_without_panicking() {
        let mut store = WorkspaceStore::new();
        store
            .import_document(
                r#"{"sections": [{"id": 1, "name": "Section18446744073709551615"}],
                    "nextId": 18446744073709551615,
                    "sectionNameCounter": 18446744073709551615}"#,
            )
            .unwrap();

        assert_eq!(store.suggest_section_name(), "Section18446744073709551616");
        assert!(store.add_section("A").is_none());
        assert_eq!(store.sections().len(), 1);
    }

    #[test]
    fn test_malformed_documents_fail() {
        for text in [
            "",
            "not json",
            "[]",
            "42",
            "null",
            r#"{"sections": {}}"#,
            r#"{"nextId": -1}"#,
            r#"{"nextId": "3"}"#,
            r#"{"sections": [{"name": "no id"}]}"#,
            r#"{"sections": [{"id": 1, "name": "A", "notes": [{"id": 2, "category": "c", "content": "x"}]}]}"#,
        ] {
            let err = from_json(text).unwrap_err();
            assert!(err.is_decode(), "expected decode error for {:?}", text);
        }
    }
}
