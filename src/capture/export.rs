//! File export to a download directory.

use super::host::FileExporter;
use super::ArtifactPayload;
use crate::config::PrompterConfig;
use crate::studio_constants::FALLBACK_FILE_NAME;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Characters that cannot appear in a portable file name
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Upper bound on " (n)" suffixes tried before giving up on a unique name
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Strip path separators and reserved characters from a user file name
///
/// Returns the fallback name when nothing usable remains.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('.').trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '-') {
        FALLBACK_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Download name for a recording: configured name plus container extension
pub fn download_file_name(config: &PrompterConfig, extension: &str) -> String {
    format!("{}.{}", sanitize_file_name(&config.file_name), extension)
}

/// Exporter that writes recordings into a directory
///
/// Existing files are never overwritten; a " (n)" suffix is added instead.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Exporter for the user's downloads directory
    ///
    /// Falls back to the home directory, then the working directory.
    pub fn downloads() -> Self {
        let dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn unique_path(&self, file_name: &str) -> std::io::Result<PathBuf> {
        let candidate = self.dir.join(file_name);
        if !tokio::fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }

        let path = Path::new(file_name);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(FALLBACK_FILE_NAME);
        let extension = path.extension().and_then(|e| e.to_str());

        for n in 1..=MAX_NAME_ATTEMPTS {
            let name = match extension {
                Some(ext) => format!("{} ({}).{}", stem, n, ext),
                None => format!("{} ({})", stem, n),
            };
            let candidate = self.dir.join(name);
            if !tokio::fs::try_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("no free file name for {}", file_name),
        ))
    }
}

#[async_trait]
impl FileExporter for DirectoryExporter {
    async fn save(
        &self,
        payload: &ArtifactPayload,
        file_name: &str,
    ) -> Result<PathBuf, std::io::Error> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.unique_path(file_name).await?;
        tokio::fs::write(&path, &payload.data).await?;
        crate::info!(
            "Saved {} bytes ({}) to {:?}",
            payload.data.len(),
            payload.mime_type,
            path
        );
        Ok(path)
    }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
