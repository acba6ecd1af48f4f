// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open, unlock, and extract page text from existing PDF
// documents using the `lopdf` crate.
//
// lopdf only parses the objects of an encrypted file when the empty user
// password opens it. For every other file it keeps just the `/Encrypt`
// dictionary, so unlocking re-parses the remaining objects from the xref
// table before decrypting them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use image::DynamicImage;
use lopdf::encryption::{DecryptionError, PasswordAlgorithm};
use lopdf::xref::XrefEntry;
use lopdf::{Document, Reader};
use wortwerk_core::error::{Result, WortwerkError};
use tracing::{debug, info, instrument, warn};

use super::source::{PdfBackend, SourceDocument};

/// [`PdfBackend`] that opens files with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    type Document = PdfReader;

    fn open(&self, path: &Path) -> Result<PdfReader> {
        PdfReader::open(path)
    }
}

/// Reads an existing PDF file.
///
/// Wraps `lopdf::Document` and keeps the original bytes so an encrypted file
/// can be re-decrypted with each candidate secret and handed to the
/// rasteriser.
pub struct PdfReader {
    /// The underlying lopdf document (decrypted once a secret succeeded).
    document: Document,
    /// Raw file contents.
    bytes: Vec<u8>,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
    /// Secret that unlocked the document, if one was needed.
    secret: Option<String>,
    /// pdfium binding, made on the first render.
    #[cfg(feature = "pdfium")]
    rasterizer: super::raster::Rasterizer,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(WortwerkError::NotFound(path_ref.to_path_buf()));
        }

        let bytes = std::fs::read(path_ref)?;
        let mut reader = Self::from_bytes(bytes)?;
        reader.source_path = Some(path_ref.display().to_string());
        Ok(reader)
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let document = Document::load_mem(&data).map_err(|err| {
            WortwerkError::Pdf(format!("failed to load PDF: {}", err))
        })?;

        debug!(
            pages = document.get_pages().len(),
            encrypted = document.is_encrypted(),
            "PDF loaded"
        );

        Ok(Self {
            document,
            bytes: data,
            source_path: None,
            secret: None,
            #[cfg(feature = "pdfium")]
            rasterizer: super::raster::Rasterizer::default(),
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Whether the file carries an `/Encrypt` dictionary at all, locked or not.
    pub fn is_encrypted(&self) -> bool {
        self.document.is_encrypted()
    }

    fn display_name(&self) -> &str {
        self.source_path.as_deref().unwrap_or("<memory>")
    }
}

impl SourceDocument for PdfReader {
    fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    fn needs_password(&self) -> bool {
        // lopdf already tries the empty user password while loading; a
        // populated encryption state means that attempt worked.
        self.secret.is_none()
            && self.document.is_encrypted()
            && self.document.encryption_state.is_none()
    }

    fn authenticate(&mut self, secret: &str) -> Result<bool> {
        let mut candidate = Document::load_mem(&self.bytes).map_err(|err| {
            WortwerkError::Pdf(format!(
                "failed to reload {} for decryption: {}",
                self.display_name(),
                err
            ))
        })?;

        match check_user_password(&candidate, secret) {
            Ok(()) => {}
            Err(lopdf::Error::Decryption(DecryptionError::IncorrectPassword)) => return Ok(false),
            Err(err) => {
                return Err(WortwerkError::Pdf(format!(
                    "checking a secret for {} failed: {}",
                    self.display_name(),
                    err
                )));
            }
        }

        // Already decrypted on load when the empty user password works.
        if candidate.encryption_state.is_none() {
            load_encrypted_objects(&self.bytes, &mut candidate);
            candidate.decrypt(secret).map_err(|err| {
                WortwerkError::Pdf(format!("decrypting {} failed: {}", self.display_name(), err))
            })?;
        }

        if candidate.catalog().is_err() {
            return Err(WortwerkError::Pdf(format!(
                "{} decrypted but has no readable page tree",
                self.display_name()
            )));
        }

        info!(
            path = self.display_name(),
            pages = candidate.get_pages().len(),
            "PDF decrypted"
        );
        self.document = candidate;
        self.secret = Some(secret.to_string());
        Ok(true)
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let page_count = self.page_count();
        if index >= page_count {
            return Err(WortwerkError::Pdf(format!(
                "page index {} out of range (document has {} pages)",
                index, page_count
            )));
        }

        // lopdf pages are keyed by 1-indexed page number.
        let page_number = (index + 1) as u32;
        self.document.extract_text(&[page_number]).map_err(|err| {
            WortwerkError::Pdf(format!(
                "text extraction failed on page {}: {}",
                page_number, err
            ))
        })
    }

    #[cfg(feature = "pdfium")]
    fn render_page(&self, index: usize, dpi: u32) -> Result<DynamicImage> {
        let password = self.secret.as_deref().filter(|secret| !secret.is_empty());
        self.rasterizer.render_page(&self.bytes, password, index, dpi)
    }

    #[cfg(not(feature = "pdfium"))]
    fn render_page(&self, index: usize, _dpi: u32) -> Result<DynamicImage> {
        Err(WortwerkError::Render(format!(
            "cannot rasterise page {}: built without the `pdfium` feature",
            index + 1
        )))
    }
}

/// Accept `secret` only as the user password: lopdf derives the file key
/// from it, so an owner password would decrypt to garbage.
fn check_user_password(document: &Document, secret: &str) -> lopdf::Result<()> {
    let algorithm = PasswordAlgorithm::try_from(document)?;
    let password = algorithm.sanitize_password(secret)?;
    algorithm.authenticate_user_password(document, &password)?;
    Ok(())
}

/// Parse every top-level object `document` is missing, still encrypted, from
/// the xref table lopdf already read. Objects inside object streams appear
/// once `Document::decrypt` unpacks their containers.
fn load_encrypted_objects(bytes: &[u8], document: &mut Document) {
    // Xref offsets count from the `%PDF-` header, as lopdf's own reader does.
    let start = bytes.windows(5).position(|w| w == b"%PDF-").unwrap_or(0);

    let mut index = Document::new();
    index.reference_table = document.reference_table.clone();
    let reader = Reader {
        buffer: &bytes[start..],
        document: index,
        encryption_state: None,
        raw_objects: BTreeMap::new(),
    };

    let mut loaded = 0usize;
    for (&number, entry) in &document.reference_table.entries {
        let XrefEntry::Normal { generation, .. } = *entry else {
            continue;
        };
        let id = (number, generation);
        if document.objects.contains_key(&id) {
            continue;
        }
        match reader.get_object(id, &mut HashSet::new()) {
            Ok(object) => {
                document.objects.insert(id, object);
                loaded += 1;
            }
            Err(err) => warn!(object = number, %err, "skipping unreadable object"),
        }
    }
    debug!(loaded, "encrypted objects parsed");
}
