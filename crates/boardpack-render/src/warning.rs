use serde::Serialize;
use std::path::PathBuf;

/// A recoverable problem met while laying out the packet. The document is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    #[error("section {section}: diagram {diagram_id} is missing ({})", .path.display())]
    MissingAsset {
        section: u32,
        diagram_id: String,
        path: PathBuf,
    },
    #[error("section {section}: diagram {diagram_id} could not be read: {message}")]
    UnreadableAsset {
        section: u32,
        diagram_id: String,
        message: String,
    },
    #[error("section {section}: diagram {diagram_id} has a zero-sized image")]
    DegenerateAsset { section: u32, diagram_id: String },
    #[error("section {section}: page limit of {max_pages} reached, {dropped} diagram(s) dropped")]
    PageCapReached {
        section: u32,
        max_pages: u32,
        dropped: usize,
    },
    #[error("section {section}: diagram {diagram_id} could not be embedded: {message}")]
    ImageEmbedFailed {
        section: u32,
        diagram_id: String,
        message: String,
    },
}

impl LayoutWarning {
    pub fn section(&self) -> u32 {
        match self {
            LayoutWarning::MissingAsset { section, .. }
            | LayoutWarning::UnreadableAsset { section, .. }
            | LayoutWarning::DegenerateAsset { section, .. }
            | LayoutWarning::PageCapReached { section, .. }
            | LayoutWarning::ImageEmbedFailed { section, .. } => *section,
        }
    }

    pub(crate) fn emit(&self) {
        tracing::warn!(section = self.section(), "{}", self);
    }
}
