//! `.env` database settings rewriting
//!
//! The generated project ships an `.env` file. Lines mentioning one of the
//! six `DB_*` keys are replaced wholesale; everything else is written back
//! byte for byte. Keys absent from the file are never appended.

use crate::error::InstallError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Relative locations searched for the environment file, in order
pub const ENV_FILE_CANDIDATES: &[&str] = &[".env", "laravel/.env"];

/// Database keys recognized in the environment file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKey {
    Connection,
    Host,
    Port,
    Database,
    Username,
    Password,
}

impl EnvKey {
    /// Match order when a line mentions more than one key
    pub const ALL: [EnvKey; 6] = [
        EnvKey::Connection,
        EnvKey::Host,
        EnvKey::Port,
        EnvKey::Database,
        EnvKey::Username,
        EnvKey::Password,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnvKey::Connection => "DB_CONNECTION",
            EnvKey::Host => "DB_HOST",
            EnvKey::Port => "DB_PORT",
            EnvKey::Database => "DB_DATABASE",
            EnvKey::Username => "DB_USERNAME",
            EnvKey::Password => "DB_PASSWORD",
        }
    }

    /// First key mentioned anywhere in `line`, ignoring ASCII case
    fn find_in(line: &[u8]) -> Option<EnvKey> {
        let upper = line.to_ascii_uppercase();
        Self::ALL.into_iter().find(|key| {
            let name = key.name().as_bytes();
            upper.windows(name.len()).any(|window| window == name)
        })
    }
}

impl fmt::Display for EnvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Connection settings collected from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub driver: String,
    pub host: String,
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: "mysql".to_string(),
            host: "127.0.0.1".to_string(),
            port: "3306".to_string(),
            database: "homestead".to_string(),
            username: "homestead".to_string(),
            password: "secret".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn value(&self, key: EnvKey) -> &str {
        match key {
            EnvKey::Connection => &self.driver,
            EnvKey::Host => &self.host,
            EnvKey::Port => &self.port,
            EnvKey::Database => &self.database,
            EnvKey::Username => &self.username,
            EnvKey::Password => &self.password,
        }
    }
}

/// What a rewrite touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteReport {
    pub path: PathBuf,
    /// Keys that matched at least one line
    pub rewritten: Vec<EnvKey>,
    /// Keys with no line in the file; their values were dropped
    pub missing: Vec<EnvKey>,
}

/// Find the environment file of a generated project
pub fn locate(project_dir: &Path) -> Result<PathBuf, InstallError> {
    ENV_FILE_CANDIDATES
        .iter()
        .map(|candidate| project_dir.join(candidate))
        .find(|path| path.is_file())
        .ok_or_else(|| InstallError::EnvFileNotFound {
            dir: project_dir.to_path_buf(),
        })
}

/// Rewrite the database lines of `content`.
///
/// Works on raw bytes so lines in any encoding pass through untouched.
/// Returns the new content and the keys that matched, in match order.
pub fn rewrite_content(content: &[u8], config: &DatabaseConfig) -> (Vec<u8>, Vec<EnvKey>) {
    let mut rewritten = Vec::with_capacity(content.len());
    let mut matched: Vec<EnvKey> = Vec::new();

    for line in content.split_inclusive(|b| *b == b'\n') {
        match EnvKey::find_in(line) {
            Some(key) => {
                rewritten.extend_from_slice(key.name().as_bytes());
                rewritten.push(b'=');
                rewritten.extend_from_slice(config.value(key).as_bytes());
                rewritten.extend_from_slice(line_ending(line));
                if !matched.contains(&key) {
                    matched.push(key);
                }
            }
            None => rewritten.extend_from_slice(line),
        }
    }

    (rewritten, matched)
}

fn line_ending(line: &[u8]) -> &'static [u8] {
    if line.ends_with(b"\r\n") {
        b"\r\n"
    } else if line.ends_with(b"\n") {
        b"\n"
    } else {
        b""
    }
}

/// Locate the project's environment file and rewrite its database settings in place
pub fn rewrite(project_dir: &Path, config: &DatabaseConfig) -> Result<RewriteReport, InstallError> {
    let path = locate(project_dir)?;

    let content = std::fs::read(&path)
        .map_err(|e| InstallError::io(format!("Failed to read {}", path.display()), e))?;

    let (updated, rewritten) = rewrite_content(&content, config);

    std::fs::write(&path, updated)
        .map_err(|e| InstallError::io(format!("Failed to write {}", path.display()), e))?;

    let missing = EnvKey::ALL
        .into_iter()
        .filter(|key| !rewritten.contains(key))
        .collect();

    Ok(RewriteReport {
        path,
        rewritten,
        missing,
    })
}
