//! The drawing surface the layout engine writes to.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner of the page. Image
//! positions name the lower-left corner of the image box.

use crate::catalog::ImageAsset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const LETTER: Self = Self {
        width: 612.0,
        height: 792.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Recoverable: the layout engine skips the image and records a warning.
    #[error("failed to decode image {}: {message}", .path.display())]
    ImageDecode { path: PathBuf, message: String },
    #[error("no page is open")]
    PageNotOpen,
}

pub trait PageCanvas {
    fn begin_document(&mut self, size: PageSize) -> Result<(), CanvasError>;

    fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        text: &str,
    ) -> Result<(), CanvasError>;

    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
    ) -> Result<(), CanvasError>;

    #[allow(clippy::too_many_arguments)]
    fn draw_image(
        &mut self,
        asset: &ImageAsset,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        preserve_aspect_ratio: bool,
    ) -> Result<(), CanvasError>;

    /// Closes the current page, if any, and opens a fresh one.
    fn new_page(&mut self) -> Result<(), CanvasError>;

    fn save(self) -> Result<Vec<u8>, CanvasError>
    where
        Self: Sized;
}

/// One call received by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CanvasCall {
    BeginDocument {
        size: PageSize,
    },
    NewPage,
    Text {
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        text: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
    },
    Image {
        id: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        preserve_aspect_ratio: bool,
    },
}

/// In-memory canvas that records every call. `save` returns the call log as JSON.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<CanvasCall>,
    page_open: bool,
    failing_images: BTreeSet<String>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `draw_image` fail with [`CanvasError::ImageDecode`] for the given diagram id.
    pub fn with_failing_image(mut self, id: impl Into<String>) -> Self {
        self.failing_images.insert(id.into());
        self
    }

    pub fn page_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, CanvasCall::NewPage))
            .count()
    }

    /// Calls grouped per page, without the `NewPage` markers.
    pub fn pages(&self) -> Vec<&[CanvasCall]> {
        let mut out = Vec::new();
        let mut start = None;
        for (i, call) in self.calls.iter().enumerate() {
            if matches!(call, CanvasCall::NewPage) {
                if let Some(s) = start {
                    out.push(&self.calls[s..i]);
                }
                start = Some(i + 1);
            }
        }
        if let Some(s) = start {
            out.push(&self.calls[s..]);
        }
        out
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            CanvasCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn require_page(&self) -> Result<(), CanvasError> {
        if self.page_open {
            Ok(())
        } else {
            Err(CanvasError::PageNotOpen)
        }
    }
}

impl PageCanvas for RecordingCanvas {
    fn begin_document(&mut self, size: PageSize) -> Result<(), CanvasError> {
        self.calls.push(CanvasCall::BeginDocument { size });
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        text: &str,
    ) -> Result<(), CanvasError> {
        self.require_page()?;
        self.calls.push(CanvasCall::Text {
            x,
            y,
            font,
            size,
            text: text.to_string(),
        });
        Ok(())
    }

    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
    ) -> Result<(), CanvasError> {
        self.require_page()?;
        self.calls.push(CanvasCall::Line {
            x1,
            y1,
            x2,
            y2,
            width,
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        asset: &ImageAsset,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        preserve_aspect_ratio: bool,
    ) -> Result<(), CanvasError> {
        self.require_page()?;
        if self.failing_images.contains(&asset.id) {
            return Err(CanvasError::ImageDecode {
                path: asset.path.clone(),
                message: "rejected by recording canvas".to_string(),
            });
        }
        self.calls.push(CanvasCall::Image {
            id: asset.id.clone(),
            x,
            y,
            width,
            height,
            preserve_aspect_ratio,
        });
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), CanvasError> {
        self.page_open = true;
        self.calls.push(CanvasCall::NewPage);
        Ok(())
    }

    fn save(self) -> Result<Vec<u8>, CanvasError> {
        Ok(serde_json::to_vec_pretty(&self.calls).map_err(std::io::Error::from)?)
    }
}
