//! Document loading and saving

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a PDF document from disk
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    log::debug!(
        "Loaded {} ({} pages)",
        path.display(),
        doc.get_pages().len()
    );
    Ok(doc)
}

/// Serialize `doc` and write it to disk
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, BookletError>(writer)
    })
    .await??;
    tokio::fs::write(&path, &bytes).await?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
