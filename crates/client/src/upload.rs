//! Bulk image upload into a gallery album.

use std::sync::Mutex;

use futures::future::join_all;
use parish_core::types::DbId;

use crate::types::GalleryImage;
use crate::{ClientResult, Session};

/// A file waiting to be uploaded.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Per-file upload state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadProgress {
    Pending,
    Uploading,
    Done(String),
    Failed(String),
}

impl UploadProgress {
    pub fn url(&self) -> Option<&str> {
        match self {
            UploadProgress::Done(url) => Some(url),
            _ => None,
        }
    }
}

/// Result of [`upload_to_album`]: final per-file states plus the rows created
/// by the linking call.
#[derive(Debug)]
pub struct AlbumUpload {
    pub progress: Vec<UploadProgress>,
    pub linked: Vec<GalleryImage>,
}

impl AlbumUpload {
    pub fn failed(&self) -> usize {
        self.progress
            .iter()
            .filter(|p| matches!(p, UploadProgress::Failed(_)))
            .count()
    }
}

/// Successful URLs in file order.
pub fn uploaded_urls(progress: &[UploadProgress]) -> Vec<String> {
    progress
        .iter()
        .filter_map(|p| p.url().map(str::to_string))
        .collect()
}

/// Upload every file concurrently, then link the successful ones to the album
/// in a single call. `on_progress(index, state)` fires on every state change.
///
/// Failed uploads are reported, not retried. The linking call is skipped when
/// nothing uploaded.
pub async fn upload_to_album<F>(
    session: &Session,
    album_id: DbId,
    files: Vec<UploadFile>,
    on_progress: F,
) -> ClientResult<AlbumUpload>
where
    F: Fn(usize, &UploadProgress) + Sync,
{
    let states = Mutex::new(vec![UploadProgress::Pending; files.len()]);
    let set = |index: usize, state: UploadProgress| {
        on_progress(index, &state);
        if let Ok(mut states) = states.lock() {
            states[index] = state;
        }
    };

    let uploads = files.into_iter().enumerate().map(|(index, file)| {
        let set = &set;
        async move {
            set(index, UploadProgress::Uploading);
            match session.upload_file(&file.name, file.bytes).await {
                Ok(url) => set(index, UploadProgress::Done(url)),
                Err(e) => {
                    tracing::warn!(file = %file.name, error = %e, "Upload failed");
                    set(index, UploadProgress::Failed(e.to_string()));
                }
            }
        }
    });
    join_all(uploads).await;

    let progress = states
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let urls = uploaded_urls(&progress);

    let linked = if urls.is_empty() {
        Vec::new()
    } else {
        session.link_album_images(album_id, &urls).await?
    };

    Ok(AlbumUpload { progress, linked })
}
