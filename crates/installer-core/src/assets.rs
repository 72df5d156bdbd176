//! Copy-in files shipped with the installer
//!
//! Files are embedded in the binary. A local directory with the same layout
//! can stand in for them (`--assets-dir`), which is handy while editing
//! theme templates.

use crate::error::InstallError;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Bower settings copied into every new project as `.bowerrc`
pub const BOWERRC: &str = "bowerrc";

/// Laravel Mix configuration for the AdminLTE theme
pub const ADMINLTE_MIX: &str = "laravel/adminlte/webpack.mix.js";

/// AdminLTE versions of the Laravel auth views
pub const ADMINLTE_AUTH_VIEWS: &str = "laravel/adminlte/views/auth";

#[derive(RustEmbed)]
#[folder = "assets/"]
struct EmbeddedAssets;

/// Where asset files are read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssetSource {
    #[default]
    Embedded,
    Local(PathBuf),
}

impl AssetSource {
    /// Read one asset by its `/`-separated relative path
    pub fn read(&self, rel: &str) -> Result<Vec<u8>, InstallError> {
        match self {
            AssetSource::Embedded => EmbeddedAssets::get(rel)
                .map(|file| file.data.into_owned())
                .ok_or_else(|| missing_asset(rel)),
            AssetSource::Local(root) => {
                let path = root.join(rel);
                std::fs::read(&path)
                    .map_err(|e| InstallError::io(format!("Failed to read {}", path.display()), e))
            }
        }
    }

    /// Files under `rel_dir`, relative to it, sorted
    pub fn list_dir(&self, rel_dir: &str) -> Result<Vec<String>, InstallError> {
        let mut files: Vec<String> = match self {
            AssetSource::Embedded => {
                let prefix = format!("{}/", rel_dir.trim_end_matches('/'));
                EmbeddedAssets::iter()
                    .filter_map(|path| path.strip_prefix(prefix.as_str()).map(str::to_string))
                    .collect()
            }
            AssetSource::Local(root) => {
                let dir = root.join(rel_dir);
                let mut files = Vec::new();
                for entry in WalkDir::new(&dir) {
                    let entry = entry.map_err(|e| {
                        let context = format!("Failed to list {}", dir.display());
                        InstallError::io(context, e.into())
                    })?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if let Ok(relative) = entry.path().strip_prefix(&dir) {
                        let parts: Vec<String> = relative
                            .components()
                            .map(|c| c.as_os_str().to_string_lossy().into_owned())
                            .collect();
                        files.push(parts.join("/"));
                    }
                }
                files
            }
        };
        files.sort();
        Ok(files)
    }

    /// Write one asset to `dest`, creating parents and overwriting
    pub fn copy_file(&self, rel: &str, dest: &Path) -> Result<(), InstallError> {
        let content = self.read(rel)?;
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                InstallError::io(format!("Failed to create directory: {}", parent.display()), e)
            })?;
        }
        std::fs::write(dest, content)
            .map_err(|e| InstallError::io(format!("Failed to write file: {}", dest.display()), e))
    }

    /// Copy every file under `rel_dir` into `dest_dir`, keeping subdirectories.
    /// Returns the written paths.
    pub fn copy_tree(&self, rel_dir: &str, dest_dir: &Path) -> Result<Vec<PathBuf>, InstallError> {
        let files = self.list_dir(rel_dir)?;
        if files.is_empty() {
            return Err(missing_asset(rel_dir));
        }

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let dest = file
                .split('/')
                .fold(dest_dir.to_path_buf(), |path, part| path.join(part));
            self.copy_file(&format!("{}/{}", rel_dir, file), &dest)?;
            written.push(dest);
        }
        Ok(written)
    }
}

fn missing_asset(rel: &str) -> InstallError {
    InstallError::io(
        format!("Installer asset not found: {}", rel),
        std::io::Error::from(std::io::ErrorKind::NotFound),
    )
}
