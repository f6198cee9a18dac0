use std::path::{Path, PathBuf};

use tracing::info;

use crate::client::ResumeBackend;
use crate::errors::SubmitError;
use crate::page::PageHandles;

/// Fetches every visible download link into `dir`, as `resume.pdf` and
/// `resume.docx`. Hidden links are skipped, so nothing is fetched after a
/// failed submission.
pub async fn save_downloads(
    backend: &dyn ResumeBackend,
    page: &PageHandles,
    dir: &Path,
) -> Result<Vec<PathBuf>, SubmitError> {
    let mut saved = Vec::new();

    for link in page.links().into_iter().filter(|link| link.is_visible()) {
        let bytes = backend.download(link.href()).await?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(link.kind().file_name());
        tokio::fs::write(&path, &bytes).await?;

        info!("Saved {} ({} bytes)", path.display(), bytes.len());
        saved.push(path);
    }

    Ok(saved)
}
