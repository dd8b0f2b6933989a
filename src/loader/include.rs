// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Loader, Resolution};
use crate::ast::Document;
use crate::utils;
use crate::{ConfigError, Value};

impl Loader {
    /// Load `relative` (resolved against `base_dir`) as its own document and
    /// return its resolved root.
    ///
    /// The included document gets its own base directory, the directory of
    /// the included file. Include cycles are not detected unless a maximum
    /// include depth was configured.
    pub fn include(&self, relative: &str, base_dir: &Path) -> Result<Value, ConfigError> {
        self.include_at(relative, base_dir, 1)
    }

    pub(crate) fn include_at(
        &self,
        relative: &str,
        base_dir: &Path,
        depth: usize,
    ) -> Result<Value, ConfigError> {
        let path = resolve_include_path(relative, base_dir).map_err(|source| {
            ConfigError::IncludeNotFound {
                path: PathBuf::from(relative),
                source,
            }
        })?;

        if let Some(limit) = self.max_include_depth {
            if depth > limit {
                return Err(ConfigError::IncludeDepthExceeded { limit, path });
            }
        }

        debug!("Including {:?} (depth {})", path, depth);

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::IncludeNotFound {
            path: path.clone(),
            source,
        })?;
        let document = Document::parse(&text, Some(&path))?;

        Resolution::new(self, &document, depth).run()
    }
}

/// Expand `~/`, resolve relative paths against `base_dir`, and make the
/// result absolute.
fn resolve_include_path(raw_path: &str, base_dir: &Path) -> io::Result<PathBuf> {
    let path = match utils::expand_home(raw_path)? {
        Some(expanded) => expanded,
        None => PathBuf::from(raw_path),
    };
    let path = if path.is_relative() {
        base_dir.join(path)
    } else {
        path
    };
    utils::absolutize(&path)
}
