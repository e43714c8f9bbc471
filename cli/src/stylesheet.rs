//! Style host backed by a directory of `<id>.css` files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use swatch_theme::StyleHost;
use tracing::{debug, warn};

/// One file per style id; a directory holds at most one element per id.
#[derive(Debug)]
pub struct StylesheetDir {
    dir: PathBuf,
    styles: BTreeMap<String, String>,
}

impl StylesheetDir {
    /// Load every `*.css` file already in `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let mut styles = BTreeMap::new();
        for entry in fs::read_dir(&dir)?.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "css") {
                if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                    styles.insert(id.to_string(), fs::read_to_string(&path)?);
                }
            }
        }

        debug!(dir = %dir.display(), count = styles.len(), "Opened stylesheet directory");
        Ok(Self { dir, styles })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.css", id))
    }
}

impl StyleHost for StylesheetDir {
    fn remove_style(&mut self, id: &str) -> bool {
        if self.styles.remove(id).is_none() {
            return false;
        }
        if let Err(e) = fs::remove_file(self.path_for(id)) {
            warn!(id, error = %e, "Failed to remove stylesheet file");
        }
        true
    }

    fn insert_style(&mut self, id: &str, css: String) {
        if let Err(e) = fs::write(self.path_for(id), &css) {
            warn!(id, error = %e, "Failed to write stylesheet file");
        }
        self.styles.insert(id.to_string(), css);
    }

    fn style(&self, id: &str) -> Option<&str> {
        self.styles.get(id).map(String::as_str)
    }

    fn style_count(&self, id: &str) -> usize {
        usize::from(self.styles.contains_key(id))
    }
}
