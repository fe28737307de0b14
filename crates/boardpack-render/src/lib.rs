#![forbid(unsafe_code)]

//! Headless packet layout: diagrams are packed into letter pages and drawn through a
//! [`PageCanvas`]. [`PdfCanvas`] writes the result as PDF.

pub mod canvas;
pub mod catalog;
mod chrome;
pub mod layout;
pub mod options;
pub mod pdf;
pub mod sizing;
pub mod warning;

pub use canvas::{CanvasCall, CanvasError, Font, PageCanvas, PageSize, RecordingCanvas};
pub use catalog::{AssetError, FsImageCatalog, ImageAsset, ImageCatalog};
pub use layout::{
    DocumentPlan, DrawOp, LayoutItem, LayoutOutcome, PagePlan, PageState, Placement, layout,
    place_next_image, plan_document, render_plan,
};
pub use options::LayoutOptions;
pub use pdf::PdfCanvas;
pub use warning::LayoutWarning;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Lays `request` out onto a fresh [`PdfCanvas`] and returns the PDF bytes.
pub fn render_pdf(
    request: &boardpack_core::DocumentRequest,
    catalog: &dyn ImageCatalog,
    resolve_options: &boardpack_core::ResolveOptions,
    options: &LayoutOptions,
) -> Result<(Vec<u8>, LayoutOutcome)> {
    let mut canvas = PdfCanvas::new();
    let outcome = layout(request, catalog, resolve_options, options, &mut canvas)?;
    let bytes = canvas.save()?;
    tracing::info!(
        sections = request.sections.len(),
        pages = outcome.pages,
        diagrams = outcome.diagrams_placed,
        warnings = outcome.warnings.len(),
        bytes = bytes.len(),
        "packet rendered"
    );
    Ok((bytes, outcome))
}
