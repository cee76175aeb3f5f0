use std::fs;
use std::path::{Path, PathBuf};
use crate::drivers::PlotError;
/// Returns the first of `base.ext`, `base_1.ext`, `base_2.ext`, ... that does
/// not exist in `folder`, creating `folder` first if needed.
///
/// The filesystem is checked again on every call, starting from the unsuffixed
/// name, so a removed file frees its slot for the next call.
pub fn next_path(folder: &Path, base: &str, ext: &str) -> Result<PathBuf, PlotError> {
    fs::create_dir_all(folder)?;
    let mut i = 0usize;
    loop {
        let name = if i == 0 {
            format!("{base}.{ext}")
        } else {
            format!("{base}_{i}.{ext}")
        };
        let candidate = folder.join(name);
        if !candidate.try_exists()? {
            return Ok(candidate);
        }
        i += 1;
    }
}
/// Where finished plots go and how they are named.
#[derive(Clone, Debug)]
pub struct SnapshotNamer {
    pub folder: PathBuf,
    pub base: String,
    pub ext: String,
}
impl SnapshotNamer {
    pub fn new(
        folder: impl Into<PathBuf>,
        base: impl Into<String>,
        ext: impl Into<String>,
    ) -> Self {
        Self {
            folder: folder.into(),
            base: base.into(),
            ext: ext.into(),
        }
    }
    pub fn next_path(&self) -> Result<PathBuf, PlotError> {
        next_path(&self.folder, &self.base, &self.ext)
    }
}
