mod resolve;

use crate::*;

pub(crate) fn spectra(
    index: u32,
    total: u32,
    width: &str,
    amperage: &str,
    depth: &str,
) -> SectionSpec {
    SectionSpec::new(
        index,
        total,
        SectionType::Spectra,
        Width::parse(width),
        Amperage::parse(amperage),
        Depth::parse(depth),
    )
    .unwrap()
}

pub(crate) fn ids(list: &[DiagramRequirement]) -> Vec<&str> {
    list.iter().map(|d| d.diagram_id.as_str()).collect()
}
