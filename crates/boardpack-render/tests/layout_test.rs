use boardpack_core::{DocumentRequest, FormFields, ResolveOptions, resolve_default};
use boardpack_render::{
    AssetError, CanvasCall, ImageAsset, ImageCatalog, LayoutOptions, LayoutWarning, PageCanvas,
    RecordingCanvas, layout, plan_document,
};
use std::collections::HashMap;
use std::path::PathBuf;

/// Catalog of fake images keyed by id; unknown ids are missing.
#[derive(Default)]
struct MemoryCatalog {
    sizes: HashMap<String, (u32, u32)>,
    unreadable: Vec<String>,
}

impl MemoryCatalog {
    /// Every diagram `request` can resolve to, at a typical drawing size.
    fn covering(request: &DocumentRequest) -> Self {
        let mut catalog = Self::default();
        for section in &request.sections {
            for d in resolve_default(&section.spec) {
                let size = if d.diagram_id.contains("InnerSteel") {
                    (1000, 1400)
                } else {
                    (800, 300)
                };
                catalog.sizes.insert(d.diagram_id, size);
            }
        }
        catalog
    }

    fn resize_all(mut self, width: u32, height: u32) -> Self {
        for size in self.sizes.values_mut() {
            *size = (width, height);
        }
        self
    }
}

impl ImageCatalog for MemoryCatalog {
    fn probe(&self, id: &str) -> Result<ImageAsset, AssetError> {
        let path = PathBuf::from(format!("memory/{id}.png"));
        if self.unreadable.iter().any(|u| u == id) {
            return Err(AssetError::Unreadable {
                id: id.to_string(),
                message: "truncated".to_string(),
            });
        }
        let Some(&(pixel_width, pixel_height)) = self.sizes.get(id) else {
            return Err(AssetError::Missing {
                id: id.to_string(),
                path,
            });
        };
        Ok(ImageAsset {
            id: id.to_string(),
            path,
            pixel_width,
            pixel_height,
        })
    }
}

fn two_spectra_sections() -> DocumentRequest {
    let fields: FormFields = [
        ("sales_order", "SO-1042"),
        ("customer_name", "Acme Electric"),
        ("job_address", "12 Main St"),
        ("switchboard_name", "MSB-1"),
        ("num_sections", "2"),
        ("common_depth", "30"),
        ("common_amperage", "4000"),
        ("common_height", "90"),
        ("section_type_1", "Spectra"),
        ("width_1", "44"),
        ("section_type_2", "Spectra"),
        ("width_2", "44"),
    ]
    .into_iter()
    .collect();
    DocumentRequest::from_form(&fields).expect("valid form")
}

fn image_ids(calls: &[CanvasCall]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|c| match c {
            CanvasCall::Image { id, .. } => Some(id.as_str()),
            _ => None,
        })
        .collect()
}

fn texts(calls: &[CanvasCall]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|c| match c {
            CanvasCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn run(
    request: &DocumentRequest,
    catalog: &MemoryCatalog,
    options: &LayoutOptions,
    mut canvas: RecordingCanvas,
) -> (RecordingCanvas, boardpack_render::LayoutOutcome) {
    let outcome = layout(
        request,
        catalog,
        &ResolveOptions::default(),
        options,
        &mut canvas,
    )
    .expect("layout");
    (canvas, outcome)
}

#[test]
fn two_edge_sections_place_every_diagram_in_order() {
    let request = two_spectra_sections();
    let catalog = MemoryCatalog::covering(&request);
    let (canvas, outcome) = run(
        &request,
        &catalog,
        &LayoutOptions::default(),
        RecordingCanvas::new(),
    );

    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    assert_eq!(outcome.diagrams_placed, 18);
    assert_eq!(outcome.pages, canvas.page_count());

    let expected = [
        "38x4spectraHorizontalABC",
        "38x4spectraHorizontalNeutral",
        "95x4spectraBLink",
        "115x4spectraACLink1",
        "115x4spectraACLink2",
        "675x4SpectraHorizontalConnection4BarStack30deep",
        "1225x4spectraACPhaseVerticalLink4in",
        "44375SpectraInnerSteel44Wide",
        "44375SpectraInnerSteel44WideSideView",
    ];
    let all = image_ids(&canvas.calls);
    assert_eq!(&all[..9], expected);
    assert_eq!(&all[9..], expected);

    let quantities: Vec<&str> = texts(&canvas.calls)
        .into_iter()
        .filter(|t| t.starts_with("QTY: "))
        .collect();
    assert_eq!(
        &quantities[..9],
        [
            "QTY: 12", "QTY: 4", "QTY: 2", "QTY: 2", "QTY: 2", "QTY: 6", "QTY: 4", "QTY: 2",
            "QTY: 1"
        ]
    );
}

#[test]
fn every_page_carries_header_footer_and_counter() {
    let request = two_spectra_sections();
    let catalog = MemoryCatalog::covering(&request);
    let (canvas, _) = run(
        &request,
        &catalog,
        &LayoutOptions::default(),
        RecordingCanvas::new(),
    );

    let pages = canvas.pages();
    let per_section = pages.len() / 2;
    assert_eq!(pages.len(), per_section * 2);
    for (i, page) in pages.iter().enumerate() {
        let section = i / per_section + 1;
        let page_number = i % per_section + 1;
        let t = texts(page);
        assert_eq!(t[0], "FACTORY SWITCHBOARD PACKET");
        assert_eq!(t[1], format!("MSB-1 - Section {section} of 2: Spectra"));
        assert!(t.contains(&"Sales Order: SO-1042"));
        assert!(t.contains(&"Customer: Acme Electric"));
        let counter = format!("Section {section} \u{b7} Page {page_number} of {per_section}");
        assert!(t.contains(&counter.as_str()), "page {i}: {t:?}");
    }
}

#[test]
fn full_page_diagrams_get_their_own_pages() {
    let request = two_spectra_sections();
    let catalog = MemoryCatalog::covering(&request);
    let (canvas, _) = run(
        &request,
        &catalog,
        &LayoutOptions::default(),
        RecordingCanvas::new(),
    );

    let mut steel_pages = 0;
    for page in canvas.pages() {
        let ids = image_ids(page);
        if ids.iter().any(|id| id.contains("InnerSteel")) {
            assert_eq!(ids.len(), 1, "{ids:?}");
            steel_pages += 1;
        }
    }
    assert_eq!(steel_pages, 4);
}

#[test]
fn images_stay_inside_the_body() {
    let request = two_spectra_sections();
    let catalog = MemoryCatalog::covering(&request);
    let options = LayoutOptions::default();
    let (canvas, _) = run(&request, &catalog, &options, RecordingCanvas::new());

    for call in &canvas.calls {
        if let CanvasCall::Image {
            x,
            y,
            width,
            height,
            ..
        } = call
        {
            assert!(*x >= options.margin_left - 1e-9);
            assert!(x + width <= 612.0 - options.margin_right + 1e-9);
            assert!(y + height <= options.body_top + 1e-9);
            assert!(*y - options.caption_height >= options.body_bottom - 1e-9);
        }
    }
}

#[test]
fn missing_asset_is_skipped_with_a_warning() {
    let request = two_spectra_sections();
    let mut catalog = MemoryCatalog::covering(&request);
    catalog.sizes.remove("95x4spectraBLink");
    catalog
        .unreadable
        .push("1225x4spectraACPhaseVerticalLink4in".to_string());

    let (canvas, outcome) = run(
        &request,
        &catalog,
        &LayoutOptions::default(),
        RecordingCanvas::new(),
    );

    let ids = image_ids(&canvas.calls);
    assert_eq!(ids.len(), 14);
    assert!(!ids.contains(&"95x4spectraBLink"));
    assert_eq!(outcome.warnings.len(), 4);
    assert_eq!(
        outcome.warnings[0],
        LayoutWarning::MissingAsset {
            section: 1,
            diagram_id: "95x4spectraBLink".to_string(),
            path: PathBuf::from("memory/95x4spectraBLink.png"),
        }
    );
    assert!(matches!(
        &outcome.warnings[1],
        LayoutWarning::UnreadableAsset { section: 1, diagram_id, .. }
            if diagram_id == "1225x4spectraACPhaseVerticalLink4in"
    ));
    assert_eq!(outcome.warnings[2].section(), 2);
}

#[test]
fn degenerate_images_still_terminate_with_one_page_per_section() {
    let request = two_spectra_sections();
    let catalog = MemoryCatalog::covering(&request).resize_all(0, 0);
    let (canvas, outcome) = run(
        &request,
        &catalog,
        &LayoutOptions::default(),
        RecordingCanvas::new(),
    );

    assert_eq!(canvas.page_count(), 2);
    assert_eq!(outcome.diagrams_placed, 0);
    assert_eq!(outcome.warnings.len(), 18);
    assert!(
        outcome
            .warnings
            .iter()
            .all(|w| matches!(w, LayoutWarning::DegenerateAsset { .. }))
    );
    for page in canvas.pages() {
        assert!(texts(page).contains(&"No reference diagrams apply to this section."));
    }
}

#[test]
fn oversized_images_respect_the_page_cap() {
    let request = two_spectra_sections();
    let catalog = MemoryCatalog::covering(&request).resize_all(10, 4000);
    let options = LayoutOptions {
        max_pages_per_section: 3,
        ..LayoutOptions::default()
    };
    let (canvas, outcome) = run(&request, &catalog, &options, RecordingCanvas::new());

    assert_eq!(canvas.page_count(), 6);
    let capped: Vec<_> = outcome
        .warnings
        .iter()
        .filter(|w| matches!(w, LayoutWarning::PageCapReached { .. }))
        .collect();
    assert_eq!(capped.len(), 2);
    assert_eq!(
        capped[0],
        &LayoutWarning::PageCapReached {
            section: 1,
            max_pages: 3,
            dropped: 6,
        }
    );

    let mut drawn = 0;
    for call in &canvas.calls {
        if let CanvasCall::Image { width, height, .. } = call {
            drawn += 1;
            assert!(
                *width >= options.min_image_width - 1e-9
                    && *width <= options.max_image_width + 1e-9,
                "width {width} outside bounds"
            );
            assert!((height / width - 400.0).abs() < 1e-6, "{width}x{height}");
        }
    }
    assert_eq!(drawn, 6);
}

#[test]
fn drawn_boxes_keep_width_bounds_and_aspect_for_any_shape() {
    let request = two_spectra_sections();
    let options = LayoutOptions::default();
    for (w, h) in [(4000, 40), (800, 300), (300, 800), (200, 1000), (10, 4000)] {
        let catalog = MemoryCatalog::covering(&request).resize_all(w, h);
        let (canvas, _) = run(&request, &catalog, &options, RecordingCanvas::new());
        let aspect = f64::from(h) / f64::from(w);
        for call in &canvas.calls {
            if let CanvasCall::Image { width, height, .. } = call {
                assert!(
                    *width >= options.min_image_width - 1e-9
                        && *width <= options.max_image_width + 1e-9,
                    "{w}x{h}: width {width}"
                );
                assert!(
                    (height / width - aspect).abs() < 1e-6 * aspect,
                    "{w}x{h}: {width}x{height}"
                );
            }
        }
    }
}

#[test]
fn embed_failures_become_warnings() {
    let request = two_spectra_sections();
    let catalog = MemoryCatalog::covering(&request);
    let canvas = RecordingCanvas::new().with_failing_image("115x4spectraACLink2");
    let (canvas, outcome) = run(&request, &catalog, &LayoutOptions::default(), canvas);

    assert_eq!(outcome.diagrams_placed, 16);
    assert_eq!(image_ids(&canvas.calls).len(), 16);
    let failed: Vec<u32> = outcome
        .warnings
        .iter()
        .filter_map(|w| match w {
            LayoutWarning::ImageEmbedFailed { section, .. } => Some(*section),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec![1, 2]);

    let captions = texts(&canvas.calls)
        .into_iter()
        .filter(|t| t.starts_with("QTY: "))
        .count();
    assert_eq!(captions, 16);
}

#[test]
fn unknown_section_type_gets_a_placeholder_page() {
    let fields: FormFields = [
        ("num_sections", "1"),
        ("section_type_1", "PRL4"),
        ("width_1", "36"),
    ]
    .into_iter()
    .collect();
    let request = DocumentRequest::from_form(&fields).expect("valid form");
    let (canvas, outcome) = run(
        &request,
        &MemoryCatalog::default(),
        &LayoutOptions::default(),
        RecordingCanvas::new(),
    );
    assert_eq!(canvas.page_count(), 1);
    assert!(outcome.warnings.is_empty());
    assert!(
        canvas
            .texts()
            .any(|t| t == "Section 1 of 1: PRL4")
    );
}

#[test]
fn plan_and_recorded_calls_agree() {
    let request = two_spectra_sections();
    let catalog = MemoryCatalog::covering(&request);
    let options = LayoutOptions::default();
    let plan = plan_document(&request, &catalog, &ResolveOptions::default(), &options);
    let (canvas, _) = run(&request, &catalog, &options, RecordingCanvas::new());

    assert_eq!(plan.pages.len(), canvas.page_count());
    for (planned, recorded) in plan.pages.iter().zip(canvas.pages()) {
        assert_eq!(planned.ops.len(), recorded.len());
    }

    let log = canvas.save().expect("save");
    let json: serde_json::Value = serde_json::from_slice(&log).expect("json call log");
    assert_eq!(json[0]["op"], "begin_document");
    assert_eq!(json[1]["op"], "new_page");
}
