use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use tempfile::NamedTempFile;

use crate::{Intent, NotesError, Result, ViewUpdate, WorkspaceStore};

/// Reads a workspace file chosen by the user.
pub async fn read_workspace_file(path: &Path) -> Result<String> {
    debug!("Reading workspace file: {}", path.display());
    tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("Failed to read workspace file {}: {}", path.display(), e);
        if e.kind() == io::ErrorKind::NotFound {
            NotesError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            NotesError::Io(e)
        }
    })
}

/// Writes `contents` to `path` through a temp file in the same directory so
/// a failed write never leaves a truncated export behind.
pub async fn write_workspace_file(path: &Path, contents: String) -> Result<()> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomic(&path, contents.as_bytes()))
        .await
        .map_err(|e| NotesError::Io(io::Error::other(e)))?
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        debug!("Creating export directory: {}", dir.display());
        std::fs::create_dir_all(&dir).map_err(|e| {
            error!("Failed to create directory {}: {}", dir.display(), e);
            NotesError::Io(e)
        })?;
    }

    let mut temp_file = NamedTempFile::new_in(&dir).map_err(|e| {
        error!("Failed to create temporary file: {}", e);
        NotesError::Io(e)
    })?;
    temp_file.write_all(contents)?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        error!("Failed to move export into place at {}: {}", path.display(), e.error);
        NotesError::Io(e.error)
    })?;
    Ok(())
}

/// Exports the store's workspace to `path`.
pub async fn export_workspace(store: &WorkspaceStore, path: &Path) -> Result<()> {
    let document = store.export_document()?;
    write_workspace_file(path, document).await?;
    info!("Exported workspace to {}", path.display());
    Ok(())
}

/// Imports the workspace stored at `path`.
///
/// The store stays mutably borrowed until the file has been read and
/// decoded, so nothing else can change it in the meantime. Read failures are
/// returned as errors; decode failures come back as
/// [`ViewUpdate::ImportFailed`] with the workspace untouched.
pub async fn import_workspace(store: &mut WorkspaceStore, path: &Path) -> Result<ViewUpdate> {
    let contents = read_workspace_file(path).await?;
    store.apply(Intent::ImportWorkspace { contents })
}
