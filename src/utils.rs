// Author: Dustin Pilgrim
// License: MIT

use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` and let `..` pop a preceding
/// component. Symlinks are not consulted and the path need not exist.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Make `path` absolute against the current directory, then normalize it.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    Ok(normalize(&joined))
}

/// Expand a leading `~/` to the home directory.
///
/// Returns `Ok(None)` when `raw` has no `~/` prefix.
pub fn expand_home(raw: &str) -> io::Result<Option<PathBuf>> {
    let Some(rest) = raw.strip_prefix("~/") else {
        return Ok(None);
    };
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "could not determine home directory for ~ expansion",
        )
    })?;
    Ok(Some(home.join(rest)))
}
