//! Settings-file collections: search paths, enumeration, and read/write
//! entry points bridging files on disk to the core engines.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use xmlsettings_core::{SettingsSchema, deserialize, serialize};

use crate::error::{Result, StoreError};

/// A registered settings-file type.
#[derive(Debug, Clone)]
pub struct FileType {
    /// Human-readable description, e.g. for file pickers.
    pub description: String,
    /// File extension including the leading dot, e.g. `.xml` or `.ds.xml`.
    pub extension: String,
}

impl FileType {
    /// Creates a file type.
    #[must_use]
    pub fn new(description: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            extension: extension.into(),
        }
    }
}

/// A settings file found on disk, with its detected extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    full_path: PathBuf,
    extension: String,
}

impl FileEntry {
    /// Wraps a path, detecting the extension from the file name.
    ///
    /// Compound extensions like `.ds.xml` (a second dot with a short inner
    /// segment right before the final extension) are detected whole, so
    /// `backup.ds.xml` splits into name `backup` and extension `.ds.xml`.
    #[must_use]
    pub fn new(full_path: impl Into<PathBuf>) -> Self {
        let full_path = full_path.into();
        let extension = full_path
            .file_name()
            .and_then(OsStr::to_str)
            .map(detect_extension)
            .unwrap_or_default();
        Self {
            full_path,
            extension,
        }
    }

    /// The full path of the file.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// The detected extension, including the leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The file name including its extension.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.full_path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
    }

    /// The file name with the detected extension removed.
    #[must_use]
    pub fn name(&self) -> &str {
        let leaf = self.file_name();
        &leaf[..leaf.len() - self.extension.len()]
    }
}

/// Detects the extension of a leaf file name, keeping compound extensions
/// (inner segment of 4 chars or fewer) whole.
fn detect_extension(file_name: &str) -> String {
    let Some(last) = file_name.rfind('.') else {
        return String::new();
    };
    if last == 0 {
        // dotfile: the whole leaf is the extension
        return file_name.to_string();
    }
    if let Some(pen) = file_name[..last].rfind('.')
        && pen > 0
        && pen + 5 > last
    {
        return file_name[pen..].to_string();
    }
    file_name[last..].to_string()
}

/// A collection of settings files, resolved from registered file types and
/// search directories.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    file_types: Vec<FileType>,
    search_dirs: Vec<PathBuf>,
}

impl SettingsStore {
    /// Creates a store with the default file type (`.xml`) and the default
    /// search directory (`Settings` under the platform documents folder).
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_types: vec![FileType::new("XML Settings", ".xml")],
            search_dirs: vec![default_root()],
        }
    }

    /// Creates a store for a single file type and search directory.
    #[must_use]
    pub fn for_file_type(
        description: impl Into<String>,
        extension: impl Into<String>,
        search_dir: impl Into<PathBuf>,
    ) -> Self {
        Self::with_search_dirs(
            vec![FileType::new(description, extension)],
            vec![search_dir.into()],
        )
    }

    /// Creates a store from explicit file types and search directories.
    ///
    /// Relative directories are resolved under the default settings root
    /// (`Settings` in the platform documents folder); absolute directories
    /// are kept as given.
    #[must_use]
    pub fn with_search_dirs(file_types: Vec<FileType>, search_dirs: Vec<PathBuf>) -> Self {
        let search_dirs = search_dirs
            .into_iter()
            .map(|dir| {
                if dir.is_absolute() {
                    dir
                } else {
                    default_root().join(dir)
                }
            })
            .collect();
        Self {
            file_types,
            search_dirs,
        }
    }

    /// The registered file types.
    #[must_use]
    pub fn file_types(&self) -> &[FileType] {
        &self.file_types
    }

    /// The resolved search directories.
    #[must_use]
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Creates every search directory that does not exist yet.
    ///
    /// # Errors
    /// Returns `StoreError::Io` if a directory cannot be created.
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in &self.search_dirs {
            if !dir.is_dir() {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }

    /// Resolves a settings name to a full path in the first search
    /// directory, appending the primary extension when it is missing.
    ///
    /// # Errors
    /// Returns an error when the store has no search directory or no file
    /// type to resolve against.
    pub fn full_path_for(&self, name: &str) -> Result<PathBuf> {
        let dir = self
            .search_dirs
            .first()
            .ok_or(StoreError::NoSearchDirectories)?;
        let file_type = self.file_types.first().ok_or(StoreError::NoFileTypes)?;

        let file_name = if name
            .to_lowercase()
            .ends_with(&file_type.extension.to_lowercase())
        {
            name.to_string()
        } else {
            format!("{name}{}", file_type.extension)
        };

        Ok(dir.join(file_name))
    }

    /// Enumerates the settings files in the search directories that match a
    /// registered file type. Missing directories are skipped, not errors.
    ///
    /// # Errors
    /// Returns `StoreError::Io` if an existing directory cannot be read.
    pub fn settings_files(&self) -> Result<Vec<FileEntry>> {
        let mut files = Vec::new();

        for dir in &self.search_dirs {
            if !dir.is_dir() {
                continue;
            }
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                if !path.is_file() {
                    continue;
                }
                let Some(leaf) = path.file_name().and_then(OsStr::to_str) else {
                    continue;
                };
                let lower = leaf.to_lowercase();
                if self
                    .file_types
                    .iter()
                    .any(|t| lower.ends_with(&t.extension.to_lowercase()))
                {
                    files.push(FileEntry::new(path));
                }
            }
        }

        Ok(files)
    }

    /// Serializes `host` through `schema` into the named settings file in
    /// the first search directory, creating directories as needed. Returns
    /// the path written.
    ///
    /// # Errors
    /// Returns `StoreError` on serialization or filesystem failure.
    pub fn save<T, P>(
        &self,
        schema: &SettingsSchema<T, P>,
        host: &mut T,
        name: &str,
    ) -> Result<PathBuf> {
        self.ensure_directories()?;
        let path = self.full_path_for(name)?;
        let xml = serialize(schema, host)?;
        fs::write(&path, xml)?;
        Ok(path)
    }

    /// Populates `host` through `schema` from a settings file.
    ///
    /// # Errors
    /// Returns `StoreError` on deserialization or filesystem failure.
    pub fn load<T, P>(
        &self,
        schema: &SettingsSchema<T, P>,
        host: &mut T,
        entry: &FileEntry,
    ) -> Result<()> {
        let xml = fs::read_to_string(entry.full_path())?;
        deserialize(schema, host, &xml)?;
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The default settings root: `Settings` under the platform documents
/// folder, falling back to the home directory, then the current directory.
fn default_root() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Settings")
}
