//! Header and footer bands repeated on every page.

use crate::canvas::{Font, PageSize};
use crate::layout::DrawOp;
use crate::options::LayoutOptions;
use boardpack_core::{PacketHeader, SectionRequest, SectionType};

const TITLE_Y: f64 = 756.0;
const TOP_RULE_Y: f64 = 734.4;
const SECTION_TITLE_Y: f64 = 705.6;
const DETAILS_Y: f64 = 684.0;
const BOTTOM_RULE_Y: f64 = 86.4;
const FOOTER_UPPER_Y: f64 = 68.4;
const FOOTER_LOWER_Y: f64 = 54.0;
const FOOTER_RIGHT_X: f64 = 288.0;
const COUNTER_X: f64 = 475.2;
const COUNTER_Y: f64 = 36.0;
const RULE_WIDTH: f64 = 0.75;

pub(crate) const NO_DIAGRAMS_NOTE: &str = "No reference diagrams apply to this section.";

fn text(x: f64, y: f64, font: Font, size: f64, text: impl Into<String>) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        font,
        size,
        text: text.into(),
    }
}

fn rule(y: f64, options: &LayoutOptions) -> DrawOp {
    DrawOp::Line {
        x1: options.margin_left,
        y1: y,
        x2: PageSize::LETTER.width - options.margin_right,
        y2: y,
        width: RULE_WIDTH,
    }
}

pub(crate) fn section_title(header: &PacketHeader, section: &SectionRequest) -> String {
    let spec = &section.spec;
    let kind = match &spec.section_type {
        SectionType::Other(raw) if raw.is_empty() => "Unspecified",
        other => other.as_str(),
    };
    let title = format!(
        "Section {} of {}: {kind}",
        spec.index(),
        spec.total_sections()
    );
    if header.switchboard_name.is_empty() {
        title
    } else {
        format!("{} - {title}", header.switchboard_name)
    }
}

pub(crate) fn section_details(section: &SectionRequest) -> String {
    let spec = &section.spec;
    let mut parts = Vec::new();
    if !spec.width.as_str().is_empty() {
        parts.push(format!("Width: {}\"", spec.width));
    }
    if !spec.depth.as_str().is_empty() {
        parts.push(format!("Depth: {}\"", spec.depth));
    }
    if let Some(height) = &section.height {
        parts.push(format!("Height: {height}\""));
    }
    if !spec.amperage.as_str().is_empty() {
        parts.push(format!("Amperage: {}A", spec.amperage));
    }
    if let Some(bus) = &section.bus_size {
        parts.push(format!("Bus: {bus}"));
    }
    parts.join("    ")
}

pub(crate) fn page_counter(section: u32, page_number: u32, page_count: u32) -> String {
    format!("Section {section} \u{b7} Page {page_number} of {page_count}")
}

pub(crate) fn page_chrome(
    header: &PacketHeader,
    section: &SectionRequest,
    page_number: u32,
    page_count: u32,
    options: &LayoutOptions,
) -> Vec<DrawOp> {
    let left = options.margin_left;
    let mut ops = vec![
        text(
            left,
            TITLE_Y,
            Font::HelveticaBold,
            14.0,
            options.packet_title.as_str(),
        ),
        rule(TOP_RULE_Y, options),
        text(
            left,
            SECTION_TITLE_Y,
            Font::HelveticaBold,
            16.0,
            section_title(header, section),
        ),
    ];
    let details = section_details(section);
    if !details.is_empty() {
        ops.push(text(left, DETAILS_Y, Font::Helvetica, 10.0, details));
    }
    ops.extend([
        rule(BOTTOM_RULE_Y, options),
        text(
            left,
            FOOTER_UPPER_Y,
            Font::Helvetica,
            9.0,
            format!("Sales Order: {}", header.sales_order),
        ),
        text(
            left,
            FOOTER_LOWER_Y,
            Font::Helvetica,
            9.0,
            format!("Customer: {}", header.customer_name),
        ),
        text(
            FOOTER_RIGHT_X,
            FOOTER_UPPER_Y,
            Font::Helvetica,
            9.0,
            format!("Job: {}", header.job_address),
        ),
        text(
            FOOTER_RIGHT_X,
            FOOTER_LOWER_Y,
            Font::Helvetica,
            9.0,
            format!("Switchboard: {}", header.switchboard_name),
        ),
        text(
            COUNTER_X,
            COUNTER_Y,
            Font::Helvetica,
            8.0,
            page_counter(section.spec.index(), page_number, page_count),
        ),
    ]);
    ops
}

pub(crate) fn no_diagrams_note(options: &LayoutOptions) -> DrawOp {
    text(
        options.margin_left,
        options.body_top - 14.0,
        Font::Helvetica,
        11.0,
        NO_DIAGRAMS_NOTE,
    )
}
