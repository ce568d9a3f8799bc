//! CLI module for the secnotes application
//!
//! This module reads commands from the prompt, forwards them to the
//! workspace store and renders the result.
use std::{io::Write, path::Path};

use clap::Parser;
use console::style;
use log::{debug, error, info};
use shell_words::split;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    export_workspace, format_relative_time_in, import_workspace, preview_content, Commands,
    Config, Intent, Notice, NotesError, Result, ShellLine, ViewUpdate, WorkspaceStore,
};

const PROMPT: &str = "secnotes> ";

/// Prompt handler - owns the session's store and renders it
pub struct App {
    /// The session's workspace
    store: WorkspaceStore,

    /// Application configuration
    config: Config,
}

impl App {
    /// Create an application around a fresh, empty workspace
    pub fn new(config: Config) -> Self {
        Self::with_store(WorkspaceStore::new(), config)
    }

    pub fn with_store(store: WorkspaceStore, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &WorkspaceStore {
        &self.store
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        info!("Session started");
        self.render_sections(out)?;
        let mut lines = input.lines();

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_line(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            };

            match self.execute(command, out).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => writeln!(out, "{}", style(e).red())?,
            }
        }

        info!("Session ended");
        Ok(())
    }

    /// Runs one command. Returns `false` when the session should end.
    pub async fn execute<W: Write>(&mut self, command: Commands, out: &mut W) -> Result<bool> {
        debug!("Executing {:?}", command);
        let intent = match command {
            Commands::Quit => return Ok(false),
            Commands::Sections => {
                self.render_sections(out)?;
                return Ok(true);
            }
            Commands::Notes => {
                self.render_notes(out)?;
                return Ok(true);
            }
            Commands::View => {
                self.render_grouped(out)?;
                return Ok(true);
            }
            Commands::Export { path } => {
                let path = path.unwrap_or_else(|| self.config.export_path());
                self.export(&path, out).await?;
                return Ok(true);
            }
            Commands::Import { path } => {
                self.import(&path, out).await?;
                return Ok(true);
            }
            Commands::AddSection { name } => Intent::CreateSection {
                name: name.unwrap_or_else(|| self.store.suggest_section_name()),
            },
            Commands::Select { id } => Intent::SelectSection { id },
            Commands::Back => Intent::ClearSelection,
            Commands::DeleteSection { id } => Intent::DeleteSection { id },
            Commands::AddNote { category, content } => Intent::CreateNote { category, content },
            Commands::DeleteNote { id } => Intent::DeleteNote { id },
        };

        let update = self.store.apply(intent)?;
        self.render_update(&update, out)?;
        Ok(true)
    }

    /// Writes the workspace to `path`
    pub async fn export<W: Write>(&self, path: &Path, out: &mut W) -> Result<()> {
        export_workspace(&self.store, path).await?;
        writeln!(out, "Exported to {}", path.display())?;
        Ok(())
    }

    /// Loads the workspace at `path`, reporting the outcome either way
    pub async fn import<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<()> {
        let update = match import_workspace(&mut self.store, path).await {
            Ok(update) => update,
            Err(e) => {
                error!("Import from {} failed: {}", path.display(), e);
                ViewUpdate::ImportFailed {
                    notice: Notice::LoadFailed,
                }
            }
        };
        self.render_update(&update, out)
    }

    fn render_update<W: Write>(&self, update: &ViewUpdate, out: &mut W) -> Result<()> {
        match update {
            ViewUpdate::Unchanged => {}
            ViewUpdate::Sections | ViewUpdate::SelectionCleared => self.render_sections(out)?,
            ViewUpdate::SectionOpened { .. } | ViewUpdate::Notes => self.render_notes(out)?,
            ViewUpdate::Exported { document } => writeln!(out, "{}", document)?,
            ViewUpdate::Imported { notice, .. } => {
                writeln!(out, "{}", style(notice).green())?;
                self.render_sections(out)?;
                if self.store.selected_section().is_some() {
                    self.render_notes(out)?;
                }
            }
            ViewUpdate::ImportFailed { notice } => writeln!(out, "{}", style(notice).red())?,
        }
        Ok(())
    }

    fn render_sections<W: Write>(&self, out: &mut W) -> Result<()> {
        let sections = self.store.sections();
        if sections.is_empty() {
            writeln!(out, "No sections yet. Use `add-section [name]`.")?;
            return Ok(());
        }

        let selected = self.store.workspace().selected_section_id();
        writeln!(out, "{}", style("Sections").bold())?;
        for section in sections {
            let marker = if Some(section.id) == selected { "*" } else { " " };
            writeln!(
                out,
                "{} [{}] {} ({} notes)",
                marker,
                section.id,
                section.name,
                section.notes.len()
            )?;
        }
        Ok(())
    }

    fn render_notes<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(section) = self.store.selected_section() else {
            writeln!(out, "Choose a section first.")?;
            return Ok(());
        };

        writeln!(out, "{}", style(&section.name).bold())?;
        if section.notes.is_empty() {
            writeln!(out, "  (no notes)")?;
        }
        for note in &section.notes {
            writeln!(
                out,
                "  [{}] {}: {}  {}",
                note.id,
                style(&note.category).cyan(),
                preview_content(&note.content, self.config.preview_length),
                style(self.time_label(note.date)).dim()
            )?;
        }
        Ok(())
    }

    fn render_grouped<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(section) = self.store.selected_section() else {
            writeln!(out, "Choose a section first.")?;
            return Ok(());
        };

        writeln!(out, "{}", style(&section.name).bold())?;
        for group in self.store.grouped_notes() {
            writeln!(out, "{}", style(group.category).cyan().bold())?;
            for note in group.notes {
                writeln!(
                    out,
                    "  - {}  {}",
                    note.content,
                    style(self.time_label(note.date)).dim()
                )?;
            }
        }
        Ok(())
    }

    fn time_label(&self, date: chrono::DateTime<chrono::Utc>) -> String {
        format_relative_time_in(
            date,
            self.store.now(),
            &chrono::Local,
            &self.config.date_format,
        )
    }
}

/// Splits a prompt line like a shell would and parses it as a command.
pub fn parse_line(line: &str) -> Result<Commands> {
    let words = split(line).map_err(|e| NotesError::InvalidCommand {
        message: format!("Failed to parse input: {}", e),
    })?;
    ShellLine::try_parse_from(words)
        .map(|l| l.command)
        .map_err(|e| NotesError::InvalidCommand {
            message: e.to_string(),
        })
}
