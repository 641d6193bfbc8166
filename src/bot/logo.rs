//! Logo encoding: picked image files become self-contained data URIs.
//!
//! Encoding is local; the picked file is never uploaded anywhere. Reads are
//! asynchronous and can finish out of order, so every read is tagged with an
//! [`UploadTicket`] and only the most recently issued ticket may write into
//! the form.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

use super::form::FormState;

/// MIME type used when neither the browser nor the file name tells us one
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Error, PartialEq)]
pub enum LogoError {
    #[error("failed to read logo file: {0}")]
    Read(String),
    #[error("not a data URI")]
    NotDataUri,
    #[error("data URI is not base64 encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Payload(String),
}

/// Decoded contents of a data URI
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLogo {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encode raw image bytes as `data:<mime>;base64,<payload>`
pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Pick the MIME type for a logo file: the declared content type when the
/// host provides one, otherwise a guess from the file name.
pub fn logo_mime(file_name: &str, declared: Option<&str>) -> String {
    match declared.map(str::trim) {
        Some(mime) if !mime.is_empty() => mime.to_string(),
        _ => mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or(FALLBACK_MIME)
            .to_string(),
    }
}

/// Encode a picked file into the inline image reference stored in the form
pub fn encode_logo(file_name: &str, declared_mime: Option<&str>, bytes: &[u8]) -> String {
    encode_data_uri(bytes, &logo_mime(file_name, declared_mime))
}

/// Decode a base64 data URI back into its MIME type and bytes
pub fn decode_data_uri(uri: &str) -> Result<DecodedLogo, LogoError> {
    let rest = uri.strip_prefix("data:").ok_or(LogoError::NotDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(LogoError::NotDataUri)?;
    let mime = header.strip_suffix(";base64").ok_or(LogoError::NotBase64)?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| LogoError::Payload(e.to_string()))?;

    Ok(DecodedLogo {
        mime: mime.to_string(),
        bytes,
    })
}

/// Identifies one logo read
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadTicket(u64);

/// Issues tickets for logo reads and decides which results may land
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogoUploads {
    issued: u64,
}

impl LogoUploads {
    /// Start a new read; every earlier ticket becomes stale
    pub fn begin(&mut self) -> UploadTicket {
        self.issued += 1;
        UploadTicket(self.issued)
    }

    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply the outcome of a read to the form.
    ///
    /// Returns `true` only when the logo field changed. Stale results are
    /// dropped, and a failed read leaves the field as it was.
    pub fn resolve(
        &self,
        ticket: UploadTicket,
        result: Result<String, LogoError>,
        form: &mut FormState,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Discarding stale logo read {:?} (latest is {})",
                ticket,
                self.issued
            );
            return false;
        }

        match result {
            Ok(data_uri) => {
                form.set_logo(data_uri);
                true
            }
            Err(e) => {
                tracing::warn!("Logo not updated: {}", e);
                false
            }
        }
    }
}
