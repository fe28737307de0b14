#![forbid(unsafe_code)]

//! Switchboard packet model and reference-diagram resolution (no I/O).
//!
//! - [`DocumentRequest::from_form`] turns the flat form fields into per-section specs
//! - [`resolve`] maps one section to its ordered list of catalog diagrams and quantities

pub mod error;
pub mod form;
pub mod labels;
pub mod model;
pub mod resolve;

pub use error::{Error, Result};
pub use form::{FormFields, MAX_SECTIONS};
pub use model::{
    Amperage, AmperageBucket, Depth, DiagramRequirement, DocumentRequest, PacketHeader,
    SectionRequest, SectionSpec, SectionType, Width,
};
pub use resolve::{BusBarScaling, ResolveOptions, resolve, resolve_default};

#[cfg(test)]
mod tests;
