use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::Path,
};

use sha2::{Digest, Sha256};

use crate::{
    OllamaClient,
    error::{OllamaError, OllamaResult},
    transport::error::ClientError,
};

impl OllamaClient {
    /// Whether the server already holds the blob `digest` (`sha256:<hex>`).
    pub fn check_blob_exists(&self, digest: &str) -> OllamaResult<bool> {
        validate_digest(digest)?;
        match self.transport.head(&blob_path(digest))? {
            200 => Ok(true),
            404 => Ok(false),
            code => Err(ClientError::Remote {
                code,
                message: format!("unexpected status code: {code}"),
            }
            .into()),
        }
    }

    /// Uploads `content` as the blob `digest`. The server verifies the
    /// digest and answers 201 on success.
    pub fn push_blob(&self, digest: &str, mut content: impl Read) -> OllamaResult<()> {
        validate_digest(digest)?;
        let (code, body) = self.transport.upload(&blob_path(digest), &mut content)?;
        if code != 201 {
            return Err(ClientError::remote(code, &body).into());
        }
        crate::debug!(digest, "blob pushed");
        Ok(())
    }

    /// Hashes the file at `path`, uploads it unless the server already has
    /// it, and returns its digest for use in
    /// [`CreateModelRequest::files`](crate::api::create::CreateModelRequest::files).
    pub fn push_blob_file(&self, path: impl AsRef<Path>) -> OllamaResult<String> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| OllamaError::file_system("open blob", path, e))?;
        let digest =
            file_digest(&mut file).map_err(|e| OllamaError::file_system("hash blob", path, e))?;

        if self.check_blob_exists(&digest)? {
            crate::debug!(digest, "blob already present");
            return Ok(digest);
        }

        file.seek(SeekFrom::Start(0))
            .map_err(|e| OllamaError::file_system("rewind blob", path, e))?;
        self.push_blob(&digest, file)?;
        Ok(digest)
    }
}

/// `sha256:<hex>` of everything `reader` yields.
pub fn file_digest(reader: &mut impl Read) -> io::Result<String> {
    let mut hasher = Sha256::new();
    io::copy(reader, &mut hasher)?;
    Ok(format!("sha256:{:x}", hasher.finalize()))
}

fn blob_path(digest: &str) -> String {
    format!("/api/blobs/{digest}")
}

/// Digests go into the URL path verbatim, so only the characters a digest
/// can hold are accepted.
fn validate_digest(digest: &str) -> OllamaResult<()> {
    if digest.is_empty() {
        return Err(OllamaError::invalid_request("digest", "cannot be empty"));
    }
    if digest.contains('/') || digest.contains("..") {
        return Err(OllamaError::invalid_request(
            "digest",
            format!("invalid digest: {digest}"),
        ));
    }
    if let Some(c) = digest
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | '_' | '-')))
    {
        return Err(OllamaError::invalid_request(
            "digest",
            format!("invalid character {c:?} in digest: {digest}"),
        ));
    }
    Ok(())
}
