pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Missing form field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for form field {field}: {value:?}")]
    InvalidField { field: String, value: String },

    #[error("Packet request has no sections")]
    NoSections,

    #[error("No section has a section type")]
    NoSectionTypes,

    #[error("Section index {index} is outside 1..={total}")]
    SectionIndex { index: u32, total: u32 },
}
