//! Profile picture storage on the local filesystem, served under `/uploads`.

use std::io;
use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;

use crate::domain::user::DEFAULT_PROFILE_PIC;

/// URL prefix the upload directory is mounted at.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy an uploaded picture into the store and return its public URL.
    pub fn save_profile_pic(&self, file: &TempFile) -> io::Result<String> {
        std::fs::create_dir_all(&self.dir)?;

        let original = file.file_name.as_deref().unwrap_or("profile");
        let stored_name = format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            clean_file_name(original)
        );

        std::fs::copy(file.file.path(), self.dir.join(&stored_name))?;
        log::debug!("stored profile picture {stored_name}");

        Ok(format!("{UPLOADS_URL_PREFIX}/{stored_name}"))
    }

    /// Delete a previously stored picture. The shared default picture and
    /// URLs outside the store are left alone.
    pub fn remove(&self, url: &str) {
        if url == DEFAULT_PROFILE_PIC {
            return;
        }
        let Some(name) = url
            .strip_prefix(UPLOADS_URL_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return;
        };
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return;
        }

        match std::fs::remove_file(self.dir.join(name)) {
            Ok(()) => log::debug!("removed profile picture {name}"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => log::warn!("failed to remove profile picture {name}: {err}"),
        }
    }
}

fn clean_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "profile".to_string()
    } else {
        cleaned
    }
}
