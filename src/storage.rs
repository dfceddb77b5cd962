//! This module provides a persistent key-value storage for sets of IDs
//!
//! It plays the role a browser's local storage plays for a web page: it remembers which calendar events
//! and emails have already been dealt with, so that they are not suggested again.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// The sets of IDs that are persisted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExclusionSet {
    /// Calendar events currently shown in the task list
    CurrentEventIds,
    /// Calendar events the user deleted
    DeletedEventIds,
    /// Emails whose suggestion has been accepted or dismissed
    ProcessedEmails,
}

impl ExclusionSet {
    pub const ALL: [ExclusionSet; 3] = [
        ExclusionSet::CurrentEventIds,
        ExclusionSet::DeletedEventIds,
        ExclusionSet::ProcessedEmails,
    ];

    /// The storage key of this set
    pub fn key(&self) -> &'static str {
        match self {
            ExclusionSet::CurrentEventIds => "currentEventIds",
            ExclusionSet::DeletedEventIds => "deletedEventIds",
            ExclusionSet::ProcessedEmails => "processedEmails",
        }
    }
}

impl Display for ExclusionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}


/// A storage that keeps every set in a JSON file (an array of strings) in a backing folder.
///
/// Sets never shrink: IDs can be added, never removed.
/// An in-memory storage (without backing folder) is also available.
#[derive(Debug, PartialEq)]
pub struct Storage {
    backing_folder: Option<PathBuf>,
    data: HashMap<String, Vec<String>>,
}

impl Storage {
    /// Initialize a storage from the content of a valid backing folder if it exists.
    /// Returns an error otherwise.
    ///
    /// A set whose file cannot be read or decoded is skipped (and starts empty); the other sets are still loaded.
    pub fn from_folder(folder: &Path) -> Result<Self, Box<dyn Error>> {
        if folder.is_dir() == false {
            return Err(format!("Storage folder {:?} does not exist", folder).into());
        }

        let mut data = HashMap::new();
        for set in ExclusionSet::ALL.iter() {
            let path = file_for_key(folder, set.key());
            if path.exists() == false {
                continue;
            }
            match load_ids(&path) {
                Ok(ids) => { data.insert(set.key().to_string(), dedup(ids)); },
                Err(err) => {
                    // Left on disk until this set is saved again
                    log::warn!("Skipping {}: {}", set, err);
                },
            }
        }

        Ok(Self{
            backing_folder: Some(PathBuf::from(folder)),
            data,
        })
    }

    /// Initialize an empty storage, that will be saved to `folder`
    pub fn new(folder: &Path) -> Self {
        Self{
            backing_folder: Some(PathBuf::from(folder)),
            data: HashMap::new(),
        }
    }

    /// Initialize an empty storage that is never saved
    pub fn in_memory() -> Self {
        Self{
            backing_folder: None,
            data: HashMap::new(),
        }
    }

    pub fn backing_folder(&self) -> Option<&Path> {
        self.backing_folder.as_deref()
    }

    /// Returns the IDs of a set, in insertion order
    pub fn get(&self, set: ExclusionSet) -> &[String] {
        self.get_key(set.key())
    }

    /// Returns the IDs stored under any key
    pub fn get_key(&self, key: &str) -> &[String] {
        self.data.get(key)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, set: ExclusionSet, id: &str) -> bool {
        self.get(set).iter().any(|stored| stored == id)
    }

    /// Add an ID to a set, and save the set.
    /// Returns `false` (and changes nothing) if the ID was already there.
    pub fn insert(&mut self, set: ExclusionSet, id: &str) -> bool {
        self.insert_into_key(set.key(), id)
    }

    pub fn insert_into_key(&mut self, key: &str, id: &str) -> bool {
        let ids = self.data.entry(key.to_string()).or_insert_with(Vec::new);
        if ids.iter().any(|stored| stored == id) {
            return false;
        }
        ids.push(id.to_string());
        self.save_key(key);
        true
    }

    /// Add several IDs to a set, and save the set once.
    /// Returns how many of them were new.
    pub fn extend<I, S>(&mut self, set: ExclusionSet, new_ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = self.data.entry(set.key().to_string()).or_insert_with(Vec::new);
        let mut n_added = 0;
        for id in new_ids {
            let id = id.as_ref();
            if ids.iter().any(|stored| stored == id) {
                continue;
            }
            ids.push(id.to_string());
            n_added += 1;
        }
        if n_added > 0 {
            self.save_key(set.key());
        }
        n_added
    }

    /// Store a set to its backing file
    fn save_key(&self, key: &str) {
        let folder = match &self.backing_folder {
            None => return,
            Some(folder) => folder,
        };

        if let Err(err) = std::fs::create_dir_all(folder) {
            log::warn!("Unable to create folder {:?}: {}", folder, err);
            return;
        }

        let path = file_for_key(folder, key);
        let file = match std::fs::File::create(&path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            },
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, self.get_key(key)) {
            log::warn!("Unable to serialize: {}", err);
        };
    }
}

fn file_for_key(folder: &Path, key: &str) -> PathBuf {
    let file_name = sanitize_filename::sanitize(key) + ".json";
    folder.join(file_name)
}

fn load_ids(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Unable to read file {:?}: {}", path, err))?;
    let ids = serde_json::from_str(&content)
        .map_err(|err| format!("Invalid content in {:?}: {}", path, err))?;
    Ok(ids)
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if result.contains(&id) == false {
            result.push(id);
        }
    }
    result
}
