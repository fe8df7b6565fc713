//! Protected media file resolution

use std::path::{Path, PathBuf};

use anyhow::Context;

pub const MEDIA_CONTENT_TYPE: &str = "video/mp4";

/// The single protected resource, resolved once at startup.
#[derive(Clone, Debug)]
pub struct MediaFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl MediaFile {
    /// Use the configured file name, or fall back to the first `.mp4` in the
    /// media directory.
    pub fn resolve(dir: &Path, name: Option<&str>) -> anyhow::Result<Self> {
        let file_name = match name {
            Some(n) => n.to_string(),
            None => first_mp4(dir)?,
        };
        let path = dir.join(&file_name);
        anyhow::ensure!(path.is_file(), "media file not found: {}", path.display());
        Ok(Self { path, file_name })
    }
}

fn first_mp4(dir: &Path) -> anyhow::Result<String> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read media dir {}", dir.display()))?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".mp4"))
        .collect();
    names.sort();
    names
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no .mp4 file in {}", dir.display()))
}
