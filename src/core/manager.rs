//! Gradebook persistence - the keyed course collection and its JSON file.
//!
//! The whole gradebook lives in one pretty-printed JSON object keyed by course
//! name. Loading never fails: a missing file is a first run, and an unusable file
//! is copied aside and replaced by an empty gradebook so the user can always
//! start. Saving goes through a temporary file that is renamed over the real
//! one, so an interrupted write leaves the previous contents intact.

use crate::{
    core::{course::Course, schema},
    errors::{Error, Result},
};
use chrono::Utc;
use indexmap::IndexMap;
use serde_json::Value;
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Default name of the storage file inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "grades.json";

const DOCUMENT: &str = "gradebook";

/// Result of reading the storage file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No storage file yet; the gradebook starts empty.
    Empty,
    /// The storage file was read successfully.
    Loaded {
        /// Number of courses read
        courses: usize,
    },
    /// The storage file could not be used; the gradebook starts empty.
    Degraded {
        /// Why the file was rejected
        reason: String,
        /// Copy of the rejected file, if one could be made
        backup: Option<PathBuf>,
    },
}

impl LoadOutcome {
    /// Whether stored data had to be discarded.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// All courses of one user, backed by a single JSON file.
#[derive(Debug)]
pub struct GradeManager {
    storage_path: PathBuf,
    courses: IndexMap<String, Course>,
    load_outcome: LoadOutcome,
}

impl GradeManager {
    /// Opens the gradebook stored at `storage_path`.
    ///
    /// The parent directory is created when missing, then the file is loaded;
    /// see [`GradeManager::load_outcome`] for how that went.
    ///
    /// # Errors
    /// Returns `Error::Storage` if the parent directory cannot be created.
    pub fn new(storage_path: impl Into<PathBuf>) -> Result<Self> {
        let storage_path = storage_path.into();

        if let Some(dir) = storage_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
        {
            fs::create_dir_all(dir).map_err(|e| Error::storage(dir, e))?;
        }

        let mut manager = Self {
            storage_path,
            courses: IndexMap::new(),
            load_outcome: LoadOutcome::Empty,
        };
        manager.load();
        Ok(manager)
    }

    /// Location of the storage file.
    #[must_use]
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Outcome of the most recent [`GradeManager::load`].
    #[must_use]
    pub const fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Adds an empty course. Returns `false` if the name is already taken.
    #[must_use = "a duplicate name is reported through the return value"]
    pub fn add_course(&mut self, name: &str) -> bool {
        if self.courses.contains_key(name) {
            return false;
        }

        self.courses.insert(name.to_string(), Course::new(name));
        true
    }

    /// Deletes a course and all its entries. Returns `false` if it does not exist.
    #[must_use = "an unknown name is reported through the return value"]
    pub fn remove_course(&mut self, name: &str) -> bool {
        self.courses.shift_remove(name).is_some()
    }

    /// Looks up a course by name.
    #[must_use]
    pub fn get_course(&self, name: &str) -> Option<&Course> {
        self.courses.get(name)
    }

    /// Looks up a course by name for modification.
    pub fn get_course_mut(&mut self, name: &str) -> Option<&mut Course> {
        self.courses.get_mut(name)
    }

    /// Course names in the order the courses were added.
    pub fn course_names(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }

    /// Courses in the order they were added.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Number of courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the gradebook has no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Writes every course to the storage file, replacing its previous contents.
    ///
    /// # Errors
    /// Returns `Error::NonFiniteValue` if an entry holds NaN or an infinity, and
    /// `Error::Storage` if the temporary file cannot be written or renamed over
    /// the storage file. The previous file is left untouched in both cases.
    pub fn save(&self) -> Result<()> {
        self.check_finite()?;

        let contents = serde_json::to_string_pretty(&self.courses)?;
        let temp_path = temporary_path(&self.storage_path);
        debug!("Writing gradebook to temporary file {:?}", temp_path);

        write_synced(&temp_path, contents.as_bytes()).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            Error::storage(&temp_path, e)
        })?;

        fs::rename(&temp_path, &self.storage_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            Error::storage(&self.storage_path, e)
        })?;

        info!(
            "Saved {} courses to {:?}",
            self.courses.len(),
            self.storage_path
        );
        Ok(())
    }

    /// JSON has no NaN or infinity; serde_json would write them as `null`, which
    /// the loader then rejects along with every other course.
    fn check_finite(&self) -> Result<()> {
        for course in self.courses.values() {
            for entry in course.entries() {
                if let Some(field) = entry.non_finite_field() {
                    return Err(Error::NonFiniteValue {
                        course: course.name().to_string(),
                        entry: entry.description().to_string(),
                        field,
                    });
                }
            }
        }
        Ok(())
    }

    /// Replaces the in-memory courses with the contents of the storage file.
    ///
    /// Never fails: a missing file yields [`LoadOutcome::Empty`], an unreadable or
    /// invalid file yields [`LoadOutcome::Degraded`] and an empty gradebook.
    pub fn load(&mut self) -> LoadOutcome {
        self.courses.clear();

        let outcome = match read_courses(&self.storage_path) {
            Ok(None) => {
                debug!(
                    "No gradebook at {:?}, starting empty",
                    self.storage_path
                );
                LoadOutcome::Empty
            }
            Ok(Some(courses)) => {
                let count = courses.len();
                self.courses = courses;
                info!("Loaded {} courses from {:?}", count, self.storage_path);
                LoadOutcome::Loaded { courses: count }
            }
            Err(e) => {
                warn!(
                    "Error loading gradebook from {:?}: {}. Starting with an empty gradebook.",
                    self.storage_path, e
                );
                LoadOutcome::Degraded {
                    reason: e.to_string(),
                    backup: back_up_unreadable(&self.storage_path),
                }
            }
        };

        self.load_outcome = outcome.clone();
        outcome
    }
}

/// Reads and decodes the storage file; `Ok(None)` when it does not exist.
fn read_courses(path: &Path) -> Result<Option<IndexMap<String, Course>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::storage(path, e)),
    };

    let document: Value = serde_json::from_str(&contents)?;
    parse_document(&document).map(Some)
}

/// Decodes a whole gradebook document. Top-level keys become the course keys;
/// the nested `name` is taken as stored.
fn parse_document(document: &Value) -> Result<IndexMap<String, Course>> {
    schema::as_object(document, DOCUMENT)?
        .iter()
        .map(|(key, value)| Ok((key.clone(), Course::from_value(value)?)))
        .collect()
}

fn write_synced(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Copies a rejected storage file next to itself so a later save cannot destroy it.
fn back_up_unreadable(path: &Path) -> Option<PathBuf> {
    let mut name = path.file_name()?.to_os_string();
    name.push(format!(".corrupt-{}", Utc::now().format("%Y%m%dT%H%M%SZ")));
    let backup = path.with_file_name(name);

    match fs::copy(path, &backup) {
        Ok(_) => {
            warn!("Unreadable gradebook preserved at {:?}", backup);
            Some(backup)
        }
        Err(e) => {
            warn!("Could not preserve unreadable gradebook {:?}: {}", path, e);
            None
        }
    }
}
