//! Paginated layout of resolved diagrams.
//!
//! Layout runs in two steps. [`plan_document`] resolves each section, probes the catalog and packs
//! the diagrams into pages, producing a list of [`DrawOp`]s per page. [`render_plan`] replays that
//! plan onto a [`PageCanvas`]. Page chrome is added only after a section has been paginated, so
//! the footer can print the section's page count.

use crate::Result;
use crate::canvas::{CanvasError, Font, PageCanvas, PageSize};
use crate::catalog::{AssetError, ImageAsset, ImageCatalog};
use crate::chrome;
use crate::options::LayoutOptions;
use crate::sizing::{ImageBox, full_page_box, shared_box};
use crate::warning::LayoutWarning;
use boardpack_core::{
    DiagramRequirement, DocumentRequest, PacketHeader, ResolveOptions, SectionRequest, resolve,
};
use serde::Serialize;

const QTY_BASELINE_OFFSET: f64 = 13.0;
const LABEL_BASELINE_OFFSET: f64 = 26.0;
/// Text ops that follow every `DrawOp::Image`.
const CAPTION_OPS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
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
    /// `x`/`y` is the lower-left corner of the image box.
    Image {
        asset: ImageAsset,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// A probed diagram waiting to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem {
    pub requirement: DiagramRequirement,
    pub asset: ImageAsset,
    /// Pixel height over pixel width; always finite and positive.
    pub aspect: f64,
    pub full_page: bool,
}

/// Where the next diagram on the current page goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageState {
    /// Top edge for the next image.
    pub cursor_y: f64,
    pub page_number: u32,
    pub placed_on_page: usize,
    /// Diagrams placed so far in this section.
    pub diagrams_emitted: usize,
}

impl PageState {
    pub fn first(options: &LayoutOptions) -> Self {
        Self {
            cursor_y: options.body_top,
            page_number: 1,
            placed_on_page: 0,
            diagrams_emitted: 0,
        }
    }

    pub fn next_page(self, options: &LayoutOptions) -> Self {
        Self {
            cursor_y: options.body_top,
            page_number: self.page_number + 1,
            placed_on_page: 0,
            ..self
        }
    }

    pub fn remaining(&self, options: &LayoutOptions) -> f64 {
        self.cursor_y - options.body_bottom
    }

    pub fn is_empty(&self) -> bool {
        self.placed_on_page == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Placed {
        state: PageState,
        ops: Vec<DrawOp>,
        break_after: bool,
    },
    /// The item does not fit; open a new page and retry it there.
    PageFull,
}

fn image_ops(item: &LayoutItem, x: f64, top: f64, image: ImageBox) -> (Vec<DrawOp>, f64) {
    let bottom = top - image.height;
    let ops = vec![
        DrawOp::Image {
            asset: item.asset.clone(),
            x,
            y: bottom,
            width: image.width,
            height: image.height,
        },
        DrawOp::Text {
            x,
            y: bottom - QTY_BASELINE_OFFSET,
            font: Font::HelveticaBold,
            size: 11.0,
            text: format!("QTY: {}", item.requirement.quantity),
        },
        DrawOp::Text {
            x,
            y: bottom - LABEL_BASELINE_OFFSET,
            font: Font::Helvetica,
            size: 10.0,
            text: item.requirement.label.clone(),
        },
    ];
    (ops, bottom)
}

fn placed(
    state: PageState,
    item: &LayoutItem,
    x: f64,
    top: f64,
    image: ImageBox,
    break_after: bool,
    options: &LayoutOptions,
) -> Placement {
    let (ops, bottom) = image_ops(item, x, top, image);
    Placement::Placed {
        state: PageState {
            cursor_y: bottom - options.caption_height - options.image_spacing,
            placed_on_page: state.placed_on_page + 1,
            diagrams_emitted: state.diagrams_emitted + 1,
            ..state
        },
        ops,
        break_after,
    }
}

/// Places one diagram on the current page, or reports that it needs a fresh page.
///
/// A diagram too tall for even an empty page is still placed there at its clamped size and runs
/// past the body; the next diagram then starts a new page.
pub fn place_next_image(state: PageState, item: &LayoutItem, options: &LayoutOptions) -> Placement {
    let content_width = options.content_width(PageSize::LETTER.width);

    if item.full_page {
        if !state.is_empty() {
            return Placement::PageFull;
        }
        let inset = options.full_page_margin;
        let image = full_page_box(
            item.aspect,
            content_width - 2.0 * inset,
            options.body_top - options.body_bottom - options.caption_height - 2.0 * inset,
            options,
        );
        let x = options.margin_left + (content_width - image.width) / 2.0;
        let top = state.cursor_y - inset;
        return placed(state, item, x, top, image, true, options);
    }

    let remaining = state.remaining(options);
    let image = shared_box(item.aspect, remaining, options);
    if image.height + options.caption_height > remaining {
        if !state.is_empty() {
            return Placement::PageFull;
        }
        tracing::debug!(
            diagram = %item.requirement.diagram_id,
            width = image.width,
            height = image.height,
            "diagram overflows an empty page"
        );
    }
    placed(
        state,
        item,
        options.margin_left,
        state.cursor_y,
        image,
        false,
        options,
    )
}

/// Probes every diagram; problems become warnings and the diagram is skipped.
pub fn collect_items(
    section: u32,
    diagrams: Vec<DiagramRequirement>,
    catalog: &dyn ImageCatalog,
    options: &LayoutOptions,
    warnings: &mut Vec<LayoutWarning>,
) -> Vec<LayoutItem> {
    let mut items = Vec::with_capacity(diagrams.len());
    for requirement in diagrams {
        let warning = match catalog.probe(&requirement.diagram_id) {
            Ok(asset) => match asset.aspect_ratio() {
                Some(aspect) => {
                    let full_page = options.is_full_page(&requirement.diagram_id);
                    items.push(LayoutItem {
                        requirement,
                        asset,
                        aspect,
                        full_page,
                    });
                    continue;
                }
                None => LayoutWarning::DegenerateAsset {
                    section,
                    diagram_id: requirement.diagram_id,
                },
            },
            Err(AssetError::Missing { path, .. }) => LayoutWarning::MissingAsset {
                section,
                diagram_id: requirement.diagram_id,
                path,
            },
            Err(AssetError::Unreadable { message, .. }) => LayoutWarning::UnreadableAsset {
                section,
                diagram_id: requirement.diagram_id,
                message,
            },
        };
        warning.emit();
        warnings.push(warning);
    }
    items
}

/// Packs items into page bodies, honouring the per-section page cap.
pub fn paginate(
    section: u32,
    items: &[LayoutItem],
    options: &LayoutOptions,
    warnings: &mut Vec<LayoutWarning>,
) -> Vec<Vec<DrawOp>> {
    let max_pages = options.max_pages_per_section.max(1);
    let mut pages: Vec<Vec<DrawOp>> = vec![Vec::new()];
    let mut state = PageState::first(options);
    let mut next = 0;

    while next < items.len() {
        let needs_page = match place_next_image(state, &items[next], options) {
            Placement::Placed {
                state: after,
                ops,
                break_after,
            } => {
                if let Some(body) = pages.last_mut() {
                    body.extend(ops);
                }
                state = after;
                next += 1;
                break_after && next < items.len()
            }
            Placement::PageFull => true,
        };
        if !needs_page {
            continue;
        }
        if pages.len() as u32 >= max_pages {
            let warning = LayoutWarning::PageCapReached {
                section,
                max_pages,
                dropped: items.len() - next,
            };
            warning.emit();
            warnings.push(warning);
            break;
        }
        pages.push(Vec::new());
        state = state.next_page(options);
    }
    pages
}

/// One output page: chrome followed by the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePlan {
    pub section: u32,
    pub page_number: u32,
    pub page_count: u32,
    pub ops: Vec<DrawOp>,
}

impl PagePlan {
    pub fn images(&self) -> impl Iterator<Item = &ImageAsset> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image { asset, .. } => Some(asset),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentPlan {
    pub pages: Vec<PagePlan>,
    pub warnings: Vec<LayoutWarning>,
}

pub fn plan_section(
    header: &PacketHeader,
    section: &SectionRequest,
    catalog: &dyn ImageCatalog,
    resolve_options: &ResolveOptions,
    options: &LayoutOptions,
    warnings: &mut Vec<LayoutWarning>,
) -> Vec<PagePlan> {
    let index = section.spec.index();
    let diagrams = resolve(&section.spec, resolve_options);
    let resolved = diagrams.len();
    let items = collect_items(index, diagrams, catalog, options, warnings);

    let bodies = if items.is_empty() {
        vec![vec![chrome::no_diagrams_note(options)]]
    } else {
        paginate(index, &items, options, warnings)
    };
    let page_count = bodies.len() as u32;
    tracing::debug!(
        section = index,
        resolved,
        placeable = items.len(),
        pages = page_count,
        "section planned"
    );

    bodies
        .into_iter()
        .enumerate()
        .map(|(i, body)| {
            let page_number = i as u32 + 1;
            let mut ops = chrome::page_chrome(header, section, page_number, page_count, options);
            ops.extend(body);
            PagePlan {
                section: index,
                page_number,
                page_count,
                ops,
            }
        })
        .collect()
}

pub fn plan_document(
    request: &DocumentRequest,
    catalog: &dyn ImageCatalog,
    resolve_options: &ResolveOptions,
    options: &LayoutOptions,
) -> DocumentPlan {
    let mut plan = DocumentPlan::default();
    for section in &request.sections {
        let pages = plan_section(
            &request.header,
            section,
            catalog,
            resolve_options,
            options,
            &mut plan.warnings,
        );
        plan.pages.extend(pages);
    }
    plan
}

/// Replays a plan onto `canvas`, one `new_page` per planned page.
///
/// An image the canvas cannot decode is skipped along with its caption, with an
/// `ImageEmbedFailed` warning; every other canvas error aborts.
pub fn render_plan<C: PageCanvas + ?Sized>(
    plan: &DocumentPlan,
    canvas: &mut C,
) -> Result<Vec<LayoutWarning>> {
    let mut warnings = Vec::new();
    canvas.begin_document(PageSize::LETTER)?;
    for page in &plan.pages {
        canvas.new_page()?;
        let mut orphaned = 0;
        for op in &page.ops {
            match op {
                DrawOp::Text { .. } if orphaned > 0 => orphaned -= 1,
                DrawOp::Text {
                    x,
                    y,
                    font,
                    size,
                    text,
                } => canvas.draw_text(*x, *y, *font, *size, text)?,
                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    width,
                } => canvas.draw_line(*x1, *y1, *x2, *y2, *width)?,
                DrawOp::Image {
                    asset,
                    x,
                    y,
                    width,
                    height,
                } => match canvas.draw_image(asset, *x, *y, *width, *height, true) {
                    Ok(()) => {}
                    Err(CanvasError::ImageDecode { message, .. }) => {
                        orphaned = CAPTION_OPS;
                        let warning = LayoutWarning::ImageEmbedFailed {
                            section: page.section,
                            diagram_id: asset.id.clone(),
                            message,
                        };
                        warning.emit();
                        warnings.push(warning);
                    }
                    Err(err) => return Err(err.into()),
                },
            }
        }
    }
    Ok(warnings)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutOutcome {
    pub pages: usize,
    pub diagrams_placed: usize,
    pub warnings: Vec<LayoutWarning>,
}

/// Plans `request` and draws it onto `canvas`. The caller saves the canvas afterwards.
pub fn layout<C: PageCanvas + ?Sized>(
    request: &DocumentRequest,
    catalog: &dyn ImageCatalog,
    resolve_options: &ResolveOptions,
    options: &LayoutOptions,
    canvas: &mut C,
) -> Result<LayoutOutcome> {
    let mut plan = plan_document(request, catalog, resolve_options, options);
    let embed_warnings = render_plan(&plan, canvas)?;
    let diagrams_placed =
        plan.pages.iter().map(|p| p.images().count()).sum::<usize>() - embed_warnings.len();
    plan.warnings.extend(embed_warnings);
    Ok(LayoutOutcome {
        pages: plan.pages.len(),
        diagrams_placed,
        warnings: plan.warnings,
    })
}
