use crate::error::Res;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Create a directory and any missing parents.
pub(crate) fn make_dir(p: &Path) -> Res<()> {
    std::fs::create_dir_all(p)
        .with_context(|| format!("Unable to create directory at {}", p.to_string_lossy()))
}

pub(crate) fn canonicalize(p: &Path) -> Res<PathBuf> {
    std::fs::canonicalize(p)
        .with_context(|| format!("Unable to canonicalize the path {}", p.to_string_lossy()))
}

/// Read a file to a `String`.
pub(crate) fn read(path: &Path) -> Res<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Deserialize a JSON file into type `T`.
pub(crate) fn deserialize<T>(path: &Path) -> Res<T>
where
    T: DeserializeOwned,
{
    let content = read(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}

/// Serialize `data` as pretty JSON and atomically replace the file at `path` with it.
pub(crate) fn serialize<T>(path: &Path, data: &T) -> Res<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")?;
    write_atomic(path, json)
}

/// Writes `contents` to a temporary file next to `path`, then renames it over `path`. A crash
/// mid-write leaves the previous file intact.
pub(crate) fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Res<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Unable to create a temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_ref())
        .with_context(|| format!("Unable to write to {}", tmp.path().display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("Unable to flush {}", tmp.path().display()))?;
    tmp.persist(path)
        .with_context(|| format!("Unable to replace {}", path.display()))?;
    Ok(())
}
