//! File system document store

use cs_core::error::{CommentServiceError, Result};
use cs_core::store::{assign_id, validate_collection_name, Document, DocumentStore, Filter};
use cs_core::types::DocumentId;
use serde_json::Value;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Stores each document as `<base>/<collection>/<id>.json`
pub struct FileSystemStore {
    /// Base directory holding one subdirectory per collection
    base_dir: PathBuf,
    /// Serializes writers so duplicate-key checks hold
    write_lock: Mutex<()>,
}

impl FileSystemStore {
    /// Create a new file system store
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();

        if !base_dir.exists() {
            fs::create_dir_all(&base_dir).map_err(|e| {
                CommentServiceError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create data directory {:?}: {}", base_dir, e),
                ))
            })?;
            debug!("Created data directory: {:?}", base_dir);
        }

        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Create a store in the platform data directory (~/.comment-service as fallback)
    pub fn default_location() -> Result<Self> {
        Self::new(Self::default_dir())
    }

    /// The platform data directory used by [`FileSystemStore::default_location`]
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "comment-service", "comment-service")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".comment-service")
            })
    }

    /// Get base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        validate_collection_name(collection)?;
        Ok(self.base_dir.join(collection))
    }

    fn document_path(dir: &Path, id: &DocumentId) -> PathBuf {
        dir.join(format!("{}.json", id))
    }

    fn temp_path(dir: &Path, id: &DocumentId) -> PathBuf {
        dir.join(format!(".{}.json.tmp", id))
    }

    /// Write a document atomically (write to temp, then rename)
    fn atomic_write(dir: &Path, id: &DocumentId, document: &Document) -> Result<()> {
        let temp_path = Self::temp_path(dir, id);
        let final_path = Self::document_path(dir, id);

        let result = Self::write_temp(&temp_path, document).and_then(|()| {
            fs::rename(&temp_path, &final_path).map_err(|e| {
                CommentServiceError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to rename temp file: {}", e),
                ))
            })
        });
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result?;

        debug!("Saved document to {:?}", final_path);
        Ok(())
    }

    /// Serialize into the temp file and flush it to disk
    fn write_temp(temp_path: &Path, document: &Document) -> Result<()> {
        let temp_file = fs::File::create(temp_path).map_err(|e| {
            CommentServiceError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }

    fn read_document(path: &Path) -> Result<Document> {
        let reader = BufReader::new(fs::File::open(path)?);
        match serde_json::from_reader::<_, Value>(reader)? {
            Value::Object(map) => Ok(map),
            _ => Err(CommentServiceError::Store(format!(
                "{:?} does not hold a JSON object",
                path
            ))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| CommentServiceError::Store("file store lock poisoned".to_string()))
    }
}

/// Document files are `<id>.json`; temp files start with a dot
fn is_document_file(path: &Path) -> bool {
    let is_json = path.extension().map(|e| e == "json").unwrap_or(false);
    let is_hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false);
    is_json && !is_hidden
}

impl DocumentStore for FileSystemStore {
    fn insert_one(&self, collection: &str, mut document: Document) -> Result<DocumentId> {
        let dir = self.collection_dir(collection)?;
        let id = assign_id(&mut document)?;

        let _guard = self.lock()?;
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!("Created collection directory: {:?}", dir);
        }
        if Self::document_path(&dir, &id).exists() {
            return Err(CommentServiceError::DuplicateKey {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        Self::atomic_write(&dir, &id, &document)?;
        Ok(id)
    }

    fn find_one(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>> {
        let path = Self::document_path(&self.collection_dir(collection)?, id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_document(&path).map(Some)
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let dir = self.collection_dir(collection)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|e| {
            CommentServiceError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read collection directory: {}", e),
            ))
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !is_document_file(&path) {
                continue;
            }

            match Self::read_document(&path) {
                Ok(doc) if filter.matches(&doc) => documents.push(doc),
                Ok(_) => {}
                Err(e) => warn!("Failed to read document file {:?}: {}", path, e),
            }
        }

        Ok(documents)
    }

    fn delete_one(&self, collection: &str, id: &DocumentId) -> Result<bool> {
        let path = Self::document_path(&self.collection_dir(collection)?, id);

        let _guard = self.lock()?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted document {:?}", path);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CommentServiceError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete document file: {}", e),
            ))),
        }
    }

    fn exists(&self, collection: &str, id: &DocumentId) -> Result<bool> {
        Ok(Self::document_path(&self.collection_dir(collection)?, id).exists())
    }
}
