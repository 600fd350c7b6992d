//! Directory of `<map>.json` files in the legacy memory shape.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use waymem_core::errors::{StorageError, WaymemResult};
use waymem_core::models::PersistedMemorySet;
use waymem_core::traits::IMemoryStore;

use crate::{to_io_err, validate_map_id};

#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, map_id: &str) -> PathBuf {
        self.dir.join(format!("{map_id}.json"))
    }
}

impl IMemoryStore for JsonStore {
    fn load(&self, map_id: &str) -> WaymemResult<Option<PersistedMemorySet>> {
        validate_map_id(map_id)?;
        let path = self.path_for(map_id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(to_io_err(e)),
        };
        let set: PersistedMemorySet =
            serde_json::from_str(&text).map_err(|e| StorageError::CorruptRecord {
                map_id: map_id.to_string(),
                details: e.to_string(),
            })?;
        debug!(map_id, path = %path.display(), nodes = set.nodes.len(), "loaded memory file");
        Ok(Some(set))
    }

    /// Write to `<map>.json.tmp`, then rename over the target.
    fn save(&self, map_id: &str, set: &PersistedMemorySet) -> WaymemResult<()> {
        validate_map_id(map_id)?;
        fs::create_dir_all(&self.dir).map_err(to_io_err)?;

        let mut stored = set.clone();
        stored.total_nodes = stored.nodes.len();
        let body = serde_json::to_string_pretty(&stored)?;

        let target = self.path_for(map_id);
        let tmp = self.dir.join(format!("{map_id}.json.tmp"));
        {
            let mut file = fs::File::create(&tmp).map_err(to_io_err)?;
            file.write_all(body.as_bytes()).map_err(to_io_err)?;
            file.sync_all().map_err(to_io_err)?;
        }
        fs::rename(&tmp, &target).map_err(to_io_err)?;
        debug!(map_id, path = %target.display(), "saved memory file");
        Ok(())
    }

    fn list_maps(&self) -> WaymemResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(to_io_err(e)),
        };
        let mut maps = Vec::new();
        for entry in entries {
            let path = entry.map_err(to_io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    maps.push(stem.to_string());
                }
            }
        }
        maps.sort();
        Ok(maps)
    }
}
