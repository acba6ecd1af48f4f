// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory PDF backend, scripted OCR engine and a lopdf fixture builder
// shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream, dictionary};
use wortwerk_core::error::{Result, WortwerkError};
use wortwerk_document::{PdfBackend, SourceDocument, TextRecognizer};

/// Shared record of what the pipeline did to a fake document.
#[derive(Debug, Default)]
pub struct Journal {
    pub opens: AtomicUsize,
    pub attempts: Mutex<Vec<String>>,
    pub released: AtomicBool,
}

impl Journal {
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

/// Backend that hands out [`FakeDocument`]s with the configured pages.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    pub pages: Vec<String>,
    /// `Some(secret)` makes the document encrypted with that secret.
    pub secret: Option<String>,
    /// Secrets whose attempt fails with an error instead of `Ok(false)`.
    pub broken_secrets: Vec<String>,
    pub journal: Arc<Journal>,
}

impl FakeBackend {
    pub fn with_pages(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|page| page.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn encrypted(mut self, secret: &str) -> Self {
        self.secret = Some(secret.to_string());
        self
    }

    pub fn breaking_on(mut self, secret: &str) -> Self {
        self.broken_secrets.push(secret.to_string());
        self
    }
}

impl PdfBackend for FakeBackend {
    type Document = FakeDocument;

    fn open(&self, _path: &Path) -> Result<FakeDocument> {
        self.journal.opens.fetch_add(1, Ordering::SeqCst);
        Ok(FakeDocument {
            pages: self.pages.clone(),
            secret: self.secret.clone(),
            broken_secrets: self.broken_secrets.clone(),
            unlocked: false,
            journal: Arc::clone(&self.journal),
        })
    }
}

pub struct FakeDocument {
    pages: Vec<String>,
    secret: Option<String>,
    broken_secrets: Vec<String>,
    unlocked: bool,
    journal: Arc<Journal>,
}

impl SourceDocument for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn needs_password(&self) -> bool {
        self.secret.is_some() && !self.unlocked
    }

    fn authenticate(&mut self, secret: &str) -> Result<bool> {
        self.journal.attempts.lock().unwrap().push(secret.to_string());
        if self.broken_secrets.iter().any(|broken| broken == secret) {
            return Err(WortwerkError::Pdf("security handler exploded".into()));
        }
        self.unlocked = self.secret.as_deref() == Some(secret);
        Ok(self.unlocked)
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| WortwerkError::Pdf(format!("no page {index}")))
    }

    fn render_page(&self, _index: usize, _dpi: u32) -> Result<DynamicImage> {
        Ok(DynamicImage::new_rgb8(8, 8))
    }
}

impl Drop for FakeDocument {
    fn drop(&mut self) {
        self.journal.released.store(true, Ordering::SeqCst);
    }
}

/// OCR engine that returns a fixed reply (or fails) and counts calls.
#[derive(Debug, Default)]
pub struct ScriptedOcr {
    reply: Option<String>,
    pub languages: Mutex<Vec<String>>,
}

impl ScriptedOcr {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            ..Default::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.languages.lock().unwrap().len()
    }
}

impl TextRecognizer for ScriptedOcr {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn recognize(&self, _image: &DynamicImage, language: &str) -> Result<String> {
        self.languages.lock().unwrap().push(language.to_string());
        self.reply
            .clone()
            .ok_or_else(|| WortwerkError::Ocr("tesseract not installed".into()))
    }
}

/// Create an (empty) file so path validation succeeds for fake backends.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"%PDF-1.5\n").unwrap();
    path
}

/// A real PDF with one Helvetica text line per page.
pub fn text_pdf(pages: &[&str]) -> Vec<u8> {
    save(text_document(pages))
}

/// [`text_pdf`] encrypted with RC4-128. The owner password is `owner-secret`.
pub fn locked_pdf(pages: &[&str], user_password: &str) -> Vec<u8> {
    let mut doc = text_document(pages);
    let state = EncryptionState::try_from(EncryptionVersion::V2 {
        document: &doc,
        owner_password: "owner-secret",
        user_password,
        key_length: 128,
        permissions: Permissions::all(),
    })
    .unwrap();
    doc.encrypt(&state).unwrap();
    save(doc)
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn text_document(pages: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    // Encryption keys are derived from the first file identifier.
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::string_literal(b"wortwerk-fixture"),
            Object::string_literal(b"wortwerk-fixture"),
        ]),
    );
    doc
}
