// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterisation via pdfium, used to feed OCR. The document is loaded
// from the in-memory bytes for each page; the library binding is kept.
//
// pdfium is bound dynamically: `./libpdfium` next to the working directory is
// tried first, then the system library path.

use std::cell::OnceCell;

use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::{debug, instrument, warn};
use wortwerk_core::error::{Result, WortwerkError};

/// PDF user-space units per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Bind the pdfium shared library.
pub fn create_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|err| {
            WortwerkError::Render(format!("failed to load the pdfium library: {}", err))
        })?;
    Ok(Pdfium::new(bindings))
}

/// Renders pages of one PDF, binding pdfium on first use.
///
/// A failed bind is remembered too, so a machine without pdfium pays for the
/// lookup once per document rather than once per page.
#[derive(Default)]
pub struct Rasterizer {
    pdfium: OnceCell<std::result::Result<Pdfium, String>>,
}

impl Rasterizer {
    fn pdfium(&self) -> Result<&Pdfium> {
        self.pdfium
            .get_or_init(|| {
                create_pdfium().map_err(|err| {
                    warn!(%err, "pdfium unavailable; pages cannot be rasterised");
                    err.to_string()
                })
            })
            .as_ref()
            .map_err(|reason| WortwerkError::Render(reason.clone()))
    }

    /// Render the 0-based page `index` of the PDF in `bytes` at `dpi`.
    #[instrument(skip(self, bytes, password), fields(bytes_len = bytes.len()))]
    pub fn render_page(
        &self,
        bytes: &[u8],
        password: Option<&str>,
        index: usize,
        dpi: u32,
    ) -> Result<DynamicImage> {
        let document = self
            .pdfium()?
            .load_pdf_from_byte_slice(bytes, password)
            .map_err(|err| WortwerkError::Render(format!("pdfium could not open PDF: {}", err)))?;

        let page_index = PdfPageIndex::try_from(index).map_err(|_| {
            WortwerkError::Render(format!("page index {} exceeds pdfium's range", index))
        })?;
        let page = document.pages().get(page_index).map_err(|err| {
            WortwerkError::Render(format!("page {} not available: {}", index + 1, err))
        })?;

        let scale = dpi as f32 / POINTS_PER_INCH;
        let pixel_width = (page.width().value * scale) as i32;
        let pixel_height = (page.height().value * scale) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(pixel_width)
                    .set_target_height(pixel_height)
                    .render_form_data(true)
                    .render_annotations(true),
            )
            .map_err(|err| {
                WortwerkError::Render(format!("rendering page {} failed: {}", index + 1, err))
            })?;

        debug!(page = index + 1, pixel_width, pixel_height, dpi, "page rasterised");
        Ok(bitmap.as_image())
    }
}
