//! Session persistence: a small key-value interface over JSON values.
//!
//! The viewer itself only needs load/save. [`MemoryStore`] is for tests and embedding;
//! [`JsonDirStore`] keeps one `<key>.json` file per key in a directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::foundation::core::Coord;
use crate::foundation::error::{MazeViewError, MazeViewResult};
use crate::grid::model::{Endpoints, Grid};

/// The fixed set of persisted slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionKey {
    /// Most recently generated grid.
    LastGenerated,
    /// Grid being solved, with the chosen endpoints applied.
    SolveSession,
    GenPrefs,
    SolvePrefs,
}

impl SessionKey {
    pub const ALL: [SessionKey; 4] = [
        SessionKey::LastGenerated,
        SessionKey::SolveSession,
        SessionKey::GenPrefs,
        SessionKey::SolvePrefs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastGenerated => "last_generated",
            Self::SolveSession => "solve_session",
            Self::GenPrefs => "gen_prefs",
            Self::SolvePrefs => "solve_prefs",
        }
    }
}

/// Load/save contract for session data. A missing key loads as `None`.
pub trait SessionStore {
    fn load(&self, key: SessionKey) -> MazeViewResult<Option<serde_json::Value>>;
    fn save(&mut self, key: SessionKey, value: serde_json::Value) -> MazeViewResult<()>;
    fn remove(&mut self, key: SessionKey) -> MazeViewResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<SessionKey, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, key: SessionKey) -> MazeViewResult<Option<serde_json::Value>> {
        Ok(self.entries.get(&key).cloned())
    }

    fn save(&mut self, key: SessionKey, value: serde_json::Value) -> MazeViewResult<()> {
        self.entries.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: SessionKey) -> MazeViewResult<()> {
        self.entries.remove(&key);
        Ok(())
    }
}

/// One pretty-printed `<key>.json` file per key under `root`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> MazeViewResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create session dir '{}'", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: SessionKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

impl SessionStore for JsonDirStore {
    fn load(&self, key: SessionKey) -> MazeViewResult<Option<serde_json::Value>> {
        let path = self.path_for(key);
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read session file '{}'", path.display()))
                    .into());
            }
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&mut self, key: SessionKey, value: serde_json::Value) -> MazeViewResult<()> {
        let path = self.path_for(key);
        let bytes = serde_json::to_vec_pretty(&value)?;
        // Write then rename so a crash never leaves a half-written slot behind.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)
            .with_context(|| format!("write session file '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("replace session file '{}'", path.display()))?;
        Ok(())
    }

    fn remove(&mut self, key: SessionKey) -> MazeViewResult<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove session file '{}'", path.display()))
                .into()),
        }
    }
}

/// Persisted solve setup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvePrefs {
    pub solve_type: String,
    #[serde(default)]
    pub start_point: Option<Coord>,
    #[serde(default)]
    pub end_point: Option<Coord>,
    #[serde(default)]
    pub maze_id: Option<String>,
}

impl SolvePrefs {
    /// Endpoints clamped into the grid, when both are set.
    pub fn endpoints_for(&self, grid: &Grid) -> Option<Endpoints> {
        let (start, end) = (self.start_point?, self.end_point?);
        Some(Endpoints {
            start: start.clamp_to(grid.rows, grid.cols),
            end: end.clamp_to(grid.rows, grid.cols),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

/// Persisted generator setup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenPrefs {
    pub gen_type: String,
    pub dims: GridDims,
}

pub fn save_typed<T: Serialize>(
    store: &mut dyn SessionStore,
    key: SessionKey,
    value: &T,
) -> MazeViewResult<()> {
    store.save(key, serde_json::to_value(value)?)
}

pub fn load_typed<T: DeserializeOwned>(
    store: &dyn SessionStore,
    key: SessionKey,
) -> MazeViewResult<Option<T>> {
    store
        .load(key)?
        .map(|v| serde_json::from_value(v).map_err(MazeViewError::from))
        .transpose()
}

pub fn save_generated(store: &mut dyn SessionStore, grid: &Grid) -> MazeViewResult<()> {
    grid.validate()?;
    save_typed(store, SessionKey::LastGenerated, grid)
}

/// Load the last generated grid. A stored grid that no longer validates is an error.
pub fn load_generated(store: &dyn SessionStore) -> MazeViewResult<Option<Grid>> {
    load_grid(store, SessionKey::LastGenerated)
}

/// Persist the grid being solved with the chosen endpoints stored in it.
pub fn save_solve_session(
    store: &mut dyn SessionStore,
    grid: &Grid,
    endpoints: Option<Endpoints>,
) -> MazeViewResult<()> {
    let grid = match endpoints {
        Some(ep) => grid.with_endpoints(ep)?,
        None => grid.clone(),
    };
    save_typed(store, SessionKey::SolveSession, &grid)
}

pub fn load_solve_session(store: &dyn SessionStore) -> MazeViewResult<Option<Grid>> {
    load_grid(store, SessionKey::SolveSession)
}

fn load_grid(store: &dyn SessionStore, key: SessionKey) -> MazeViewResult<Option<Grid>> {
    let Some(grid) = load_typed::<Grid>(store, key)? else {
        return Ok(None);
    };
    if let Err(e) = grid.validate() {
        tracing::warn!(key = key.as_str(), error = %e, "stored grid rejected");
        return Err(e);
    }
    Ok(Some(grid))
}

#[cfg(test)]
#[path = "../../tests/unit/session/store.rs"]
mod tests;
