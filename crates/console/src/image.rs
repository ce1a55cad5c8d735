//! File to data-URL conversion for menu images and the restaurant logo.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::ConsoleError;

/// `data:<mime>;base64,<payload>`
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file and inline it; the mime type is guessed from the extension.
pub async fn encode_image_file(path: &Path) -> Result<String, ConsoleError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ConsoleError::Image { path: path.to_path_buf(), source })?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(to_data_url(mime.essence_str(), &bytes))
}
