use serde::{Deserialize, Serialize};

/// Page geometry and diagram sizing, in PDF points (1/72 in).
///
/// Header and footer bands sit at fixed positions on a letter page; these options describe the
/// body area between them and how diagrams are scaled into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub packet_title: String,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Top of the body area; the first diagram on a page starts here.
    pub body_top: f64,
    /// Lowest y a caption may reach.
    pub body_bottom: f64,
    pub max_image_height: f64,
    pub min_image_height: f64,
    pub min_image_width: f64,
    pub max_image_width: f64,
    /// Vertical room reserved under each image for the quantity and label lines.
    pub caption_height: f64,
    pub image_spacing: f64,
    /// Inset applied on every side of a full-page diagram.
    pub full_page_margin: f64,
    pub max_pages_per_section: u32,
    /// A diagram whose id contains one of these markers gets a page of its own.
    pub full_page_markers: Vec<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            packet_title: "FACTORY SWITCHBOARD PACKET".to_string(),
            margin_left: 72.0,
            margin_right: 72.0,
            body_top: 662.4,
            body_bottom: 100.8,
            max_image_height: 234.0,
            min_image_height: 54.0,
            min_image_width: 144.0,
            max_image_width: 468.0,
            caption_height: 30.0,
            image_spacing: 12.0,
            full_page_margin: 18.0,
            max_pages_per_section: 10,
            full_page_markers: vec!["InnerSteel".to_string()],
        }
    }
}

impl LayoutOptions {
    pub fn content_width(&self, page_width: f64) -> f64 {
        (page_width - self.margin_left - self.margin_right).max(0.0)
    }

    pub fn is_full_page(&self, diagram_id: &str) -> bool {
        self.full_page_markers
            .iter()
            .any(|marker| !marker.is_empty() && diagram_id.contains(marker.as_str()))
    }
}
