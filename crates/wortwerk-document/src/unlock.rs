// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Credential probing for encrypted PDFs.
//
// The candidate list is built up front (password, then username, then the
// empty string) and tried in order. Some PDFs are "encrypted" with a blank
// user password, which is why the empty string always comes last.

use std::path::Path;

use tracing::{error, info, instrument, warn};
use wortwerk_core::Credentials;
use wortwerk_core::error::{Result, WortwerkError};

use crate::pdf::{PdfBackend, SourceDocument};

/// Ordered, de-duplicated secrets to try against an encrypted document.
///
/// Trimmed `password`, then trimmed `username` (both only when non-empty),
/// then `""` unconditionally.
pub fn candidate_secrets(credentials: &Credentials) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::with_capacity(3);

    for value in [&credentials.password, &credentials.username]
        .into_iter()
        .flatten()
    {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !candidates.iter().any(|seen| seen == trimmed) {
            candidates.push(trimmed.to_string());
        }
    }

    candidates.push(String::new());
    candidates
}

/// Open `path`, unlocking it with the first candidate secret that works.
///
/// Unencrypted documents are returned without consulting `credentials`.
#[instrument(skip(backend, credentials), fields(path = %path.display()))]
pub fn open_document<B: PdfBackend>(
    backend: &B,
    path: &Path,
    credentials: &Credentials,
) -> Result<B::Document> {
    if !path.exists() {
        return Err(WortwerkError::NotFound(path.to_path_buf()));
    }

    let mut document = backend.open(path)?;
    if !document.needs_password() {
        info!("Opened unencrypted PDF: {}", path.display());
        return Ok(document);
    }

    for (attempt, candidate) in candidate_secrets(credentials).iter().enumerate() {
        match document.authenticate(candidate) {
            Ok(true) => {
                info!(attempt = attempt + 1, "Unlocked PDF {} with provided credentials.", path.display());
                return Ok(document);
            }
            Ok(false) => {}
            Err(err) => {
                error!(attempt = attempt + 1, %err, "Unexpected error while authenticating {}", path.display());
            }
        }
    }

    drop(document);
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    warn!(%file, "no candidate secret unlocked the PDF");
    Err(WortwerkError::Unlock { file })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(username: Option<&str>, password: Option<&str>) -> Credentials {
        Credentials::new(username.map(String::from), password.map(String::from))
    }

    #[test]
    fn password_then_username_then_empty() {
        let list = candidate_secrets(&creds(Some("bob"), Some("s3cret")));
        assert_eq!(list, vec!["s3cret", "bob", ""]);
    }

    #[test]
    fn values_are_trimmed_and_deduplicated() {
        let list = candidate_secrets(&creds(Some("  same "), Some("same")));
        assert_eq!(list, vec!["same", ""]);
    }

    #[test]
    fn blank_values_are_skipped() {
        let list = candidate_secrets(&creds(Some("   "), Some("")));
        assert_eq!(list, vec![""]);
    }

    #[test]
    fn no_credentials_still_tries_empty() {
        assert_eq!(candidate_secrets(&Credentials::none()), vec![""]);
    }

    #[test]
    fn username_alone_comes_before_empty() {
        let list = candidate_secrets(&creds(Some("owner"), None));
        assert_eq!(list, vec!["owner", ""]);
    }
}
