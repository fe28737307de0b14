#![forbid(unsafe_code)]

//! `boardpack` turns a switchboard order form into a factory packet: one set of PDF pages per
//! section showing every reference diagram the shop floor needs, with quantities.
//!
//! - [`boardpack_core`] (re-exported at the root): form parsing and the diagram resolver
//! - [`render`]: page layout and the PDF canvas
//! - [`PacketGenerator`]: the end-to-end entry point

pub use boardpack_core::*;

pub mod config;
pub mod filename;

pub use config::PacketConfig;
pub use filename::{packet_filename, sanitize_filename_part};

pub mod render {
    pub use boardpack_render::{
        CanvasCall, CanvasError, DocumentPlan, DrawOp, Font, FsImageCatalog, ImageAsset,
        ImageCatalog, LayoutOptions, LayoutOutcome, LayoutWarning, PageCanvas, PageSize,
        PdfCanvas, RecordingCanvas, layout, plan_document, render_pdf, render_plan,
    };
}

use boardpack_render::{FsImageCatalog, ImageCatalog, LayoutWarning};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Form(#[from] boardpack_core::Error),
    #[error(transparent)]
    Render(#[from] boardpack_render::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// A finished packet, ready to be written or streamed.
#[derive(Debug, Clone)]
pub struct GeneratedPacket {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub warnings: Vec<LayoutWarning>,
}

impl GeneratedPacket {
    /// Writes the PDF into `dir` under its generated filename.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Bundles the packet configuration for repeated generation calls.
///
/// Every call builds its own canvas and plan; the generator itself is read-only and can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct PacketGenerator {
    pub config: PacketConfig,
}

impl PacketGenerator {
    pub fn new(config: PacketConfig) -> Self {
        Self { config }
    }

    pub fn catalog(&self) -> FsImageCatalog {
        FsImageCatalog::new(&self.config.assets_dir)
    }

    /// Resolves the form without rendering: one diagram list per section.
    pub fn resolve(
        &self,
        fields: &FormFields,
    ) -> Result<Vec<(SectionSpec, Vec<DiagramRequirement>)>> {
        let request = DocumentRequest::from_form(fields)?;
        Ok(request
            .sections
            .into_iter()
            .map(|section| {
                let diagrams = resolve(&section.spec, &self.config.resolve);
                (section.spec, diagrams)
            })
            .collect())
    }

    pub fn generate(&self, fields: &FormFields) -> Result<GeneratedPacket> {
        let now = chrono::Local::now().naive_local();
        self.generate_with(fields, &self.catalog(), now)
    }

    pub fn generate_with(
        &self,
        fields: &FormFields,
        catalog: &dyn ImageCatalog,
        now: NaiveDateTime,
    ) -> Result<GeneratedPacket> {
        let request = DocumentRequest::from_form(fields)?;
        request.validate()?;
        let (bytes, outcome) = boardpack_render::render_pdf(
            &request,
            catalog,
            &self.config.resolve,
            &self.config.layout,
        )?;
        let filename = packet_filename(now, &request.header);
        tracing::info!(
            %filename,
            pages = outcome.pages,
            warnings = outcome.warnings.len(),
            "packet generated"
        );
        Ok(GeneratedPacket {
            filename,
            bytes,
            pages: outcome.pages,
            warnings: outcome.warnings,
        })
    }
}
