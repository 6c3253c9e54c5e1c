//! dv-save: persistence for Delve
//!
//! Stores the per-participant save book between sessions, and full world
//! snapshots so a replica can be handed the exact state of a running game.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dv_core::World;
use dv_core::world::SaveBook;

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// What a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveKind {
    Book,
    Snapshot,
}

/// Save file header for versioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveHeader {
    pub magic: String,
    pub version: u32,
    pub kind: SaveKind,
    /// Participants with at least one slot, or joined players for snapshots
    pub participants: usize,
    /// Deepest level recorded
    pub deepest_level: u32,
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "DLVS";

    fn new(kind: SaveKind, participants: usize, deepest_level: u32) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            kind,
            participants,
            deepest_level,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn for_book(book: &SaveBook) -> Self {
        let deepest = book
            .names()
            .flat_map(|name| book.slots(name))
            .map(|slot| slot.level)
            .max()
            .unwrap_or(0);
        Self::new(SaveKind::Book, book.names().count(), deepest)
    }

    pub fn for_world(world: &World) -> Self {
        let deepest = world.dungeons.iter().map(|d| d.level).max().unwrap_or(0);
        Self::new(SaveKind::Snapshot, world.players.len(), deepest)
    }

    pub fn validate(&self, kind: SaveKind) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC || self.kind != kind {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct BookFile {
    header: SaveHeader,
    book: SaveBook,
}

#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    header: SaveHeader,
    world: World,
}

/// Write the save book to a file
pub fn save_book(book: &SaveBook, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let file = BookFile {
        header: SaveHeader::for_book(book),
        book: book.clone(),
    };
    let writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(writer, &file)?;
    log::debug!("wrote save book to {}", path.as_ref().display());
    Ok(())
}

/// Read a save book, or an empty one if the file does not exist yet
pub fn load_book_or_default(path: impl AsRef<Path>) -> Result<SaveBook, SaveError> {
    match load_book(path) {
        Err(SaveError::NotFound) => Ok(SaveBook::new()),
        other => other,
    }
}

/// Open a save for reading; only a missing file is [`SaveError::NotFound`]
fn open_save(path: &Path) -> Result<File, SaveError> {
    File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => SaveError::NotFound,
        _ => SaveError::Io(err),
    })
}

pub fn load_book(path: impl AsRef<Path>) -> Result<SaveBook, SaveError> {
    let file = open_save(path.as_ref())?;
    let saved: BookFile = serde_json::from_reader(BufReader::new(file))?;
    saved.header.validate(SaveKind::Book)?;
    Ok(saved.book)
}

/// Snapshot the whole world, compact
pub fn save_world(world: &World, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let file = SnapshotFile {
        header: SaveHeader::for_world(world),
        world: world.clone(),
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, &file)?;
    Ok(())
}

pub fn load_world(path: impl AsRef<Path>) -> Result<World, SaveError> {
    let file = open_save(path.as_ref())?;
    let saved: SnapshotFile = serde_json::from_reader(BufReader::new(file))?;
    saved.header.validate(SaveKind::Snapshot)?;
    Ok(saved.world)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Default location of a host's save book
pub fn default_save_path(host: &str) -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("delve");
    path.push("saves");
    std::fs::create_dir_all(&path).ok();
    path.push(format!("{}.json", host));
    path
}
