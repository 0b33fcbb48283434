//! Image storage on local disk, served back under [`PUBLIC_PREFIX`].

use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// URL prefix under which stored images are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        UploadStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` as `<unix millis><extension of original_name>` and return its public path.
    /// A name already taken within the same millisecond gets a `-<n>` suffix. The file is
    /// synced to disk before returning.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let stamp = chrono::Utc::now().timestamp_millis();
        let ext = extension_of(original_name);
        let mut attempt = 0u32;
        loop {
            let file_name = match attempt {
                0 => format!("{}{}", stamp, ext),
                n => format!("{}-{}{}", stamp, n, ext),
            };
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&file_name))
                .await;
            match opened {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.sync_all().await?;
                    tracing::debug!(file = %file_name, size = bytes.len(), "image stored");
                    return Ok(format!("{}/{}", PUBLIC_PREFIX, file_name));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e),
            }
        }
    }

    /// Remove the file behind a public path. Paths outside the upload prefix are ignored.
    pub async fn remove(&self, public_path: &str) -> io::Result<()> {
        match self.local_path(public_path) {
            Some(path) => tokio::fs::remove_file(path).await,
            None => Ok(()),
        }
    }

    fn local_path(&self, public_path: &str) -> Option<PathBuf> {
        let name = public_path.strip_prefix(PUBLIC_PREFIX)?.strip_prefix('/')?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        Some(self.dir.join(name))
    }
}

/// `".png"` for `"photo.png"`, empty when the name has no extension.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}
