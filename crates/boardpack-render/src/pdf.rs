//! [`PageCanvas`] backed by `pdf-writer`.
//!
//! Text uses the standard Helvetica faces with WinAnsi encoding, so no font program is embedded.
//! Raster images are decoded once per path and shared across pages as image XObjects.

use crate::canvas::{CanvasError, Font, PageCanvas, PageSize};
use crate::catalog::ImageAsset;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

const DEFLATE_LEVEL: u8 = 6;
const RULE_GRAY: f32 = 0.45;

#[derive(Debug, Clone, Copy)]
struct EmbeddedImage {
    xobject: Ref,
    index: usize,
    pixel_width: u32,
    pixel_height: u32,
}

impl EmbeddedImage {
    fn resource_name(&self) -> String {
        format!("Im{}", self.index)
    }
}

struct PageContent {
    content: Content,
    images: BTreeMap<String, Ref>,
}

pub struct PdfCanvas {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    regular_font_id: Ref,
    bold_font_id: Ref,
    size: PageSize,
    started: bool,
    pages: Vec<PageContent>,
    images: HashMap<PathBuf, EmbeddedImage>,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    pub fn new() -> Self {
        let mut canvas = Self {
            pdf: Pdf::new(),
            next_id: 1,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(1),
            regular_font_id: Ref::new(1),
            bold_font_id: Ref::new(1),
            size: PageSize::LETTER,
            started: false,
            pages: Vec::new(),
            images: HashMap::new(),
        };
        canvas.catalog_id = canvas.alloc();
        canvas.pages_id = canvas.alloc();
        canvas.regular_font_id = canvas.alloc();
        canvas.bold_font_id = canvas.alloc();
        canvas
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }

    fn current_page(&mut self) -> Result<&mut PageContent, CanvasError> {
        self.pages.last_mut().ok_or(CanvasError::PageNotOpen)
    }

    fn embed(&mut self, asset: &ImageAsset) -> Result<EmbeddedImage, CanvasError> {
        if let Some(found) = self.images.get(&asset.path) {
            return Ok(*found);
        }

        let decoded = image::open(&asset.path).map_err(|err| CanvasError::ImageDecode {
            path: asset.path.clone(),
            message: err.to_string(),
        })?;
        let rgba = decoded.to_rgba8();
        let (w, h) = (rgba.width(), rgba.height());
        if w == 0 || h == 0 {
            return Err(CanvasError::ImageDecode {
                path: asset.path.clone(),
                message: "image has no pixels".to_string(),
            });
        }
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let rgb: Vec<u8> = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb, DEFLATE_LEVEL);

        let smask = if has_alpha {
            let alpha: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
            let compressed_alpha =
                miniz_oxide::deflate::compress_to_vec_zlib(&alpha, DEFLATE_LEVEL);
            let mask_id = self.alloc();
            let mut mask = self.pdf.image_xobject(mask_id, &compressed_alpha);
            mask.filter(Filter::FlateDecode);
            mask.width(w as i32);
            mask.height(h as i32);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
            Some(mask_id)
        } else {
            None
        };

        let xobject = self.alloc();
        let mut xobj = self.pdf.image_xobject(xobject, &compressed_rgb);
        xobj.filter(Filter::FlateDecode);
        xobj.width(w as i32);
        xobj.height(h as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
        if let Some(mask_id) = smask {
            xobj.s_mask(mask_id);
        }
        drop(xobj);

        let embedded = EmbeddedImage {
            xobject,
            index: self.images.len() + 1,
            pixel_width: w,
            pixel_height: h,
        };
        self.images.insert(asset.path.clone(), embedded);
        Ok(embedded)
    }
}

fn font_resource(font: Font) -> &'static [u8] {
    match font {
        Font::Helvetica => b"F1",
        Font::HelveticaBold => b"F2",
    }
}

/// Encodes text for a WinAnsi simple font. Characters WinAnsi cannot represent print as `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x20..=0x7e | 0xa0..=0xff => c as u8,
            _ => win_ansi_extra(c).unwrap_or(b'?'),
        })
        .collect()
}

/// The 0x80..=0x9f block, where WinAnsi departs from Latin-1.
fn win_ansi_extra(c: char) -> Option<u8> {
    let byte = match c {
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => return None,
    };
    Some(byte)
}

/// Largest box with the image's aspect ratio that fits in `width` x `height`, centred.
fn contain(
    pixel_width: u32,
    pixel_height: u32,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> (f64, f64, f64, f64) {
    let ratio = f64::from(pixel_height) / f64::from(pixel_width);
    let (w, h) = if width * ratio <= height {
        (width, width * ratio)
    } else {
        (height / ratio, height)
    };
    (x + (width - w) / 2.0, y + (height - h) / 2.0, w, h)
}

impl PageCanvas for PdfCanvas {
    fn begin_document(&mut self, size: PageSize) -> Result<(), CanvasError> {
        self.size = size;
        self.started = true;
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
        let bytes = encode_win_ansi(text);
        let page = self.current_page()?;
        page.content
            .begin_text()
            .set_font(Name(font_resource(font)), size as f32)
            .next_line(x as f32, y as f32)
            .show(Str(&bytes))
            .end_text();
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
        let page = self.current_page()?;
        page.content
            .save_state()
            .set_stroke_gray(RULE_GRAY)
            .set_line_width(width as f32)
            .move_to(x1 as f32, y1 as f32)
            .line_to(x2 as f32, y2 as f32)
            .stroke()
            .restore_state();
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
        self.current_page()?;
        let embedded = self.embed(asset)?;
        let (x, y, w, h) = if preserve_aspect_ratio {
            contain(
                embedded.pixel_width,
                embedded.pixel_height,
                x,
                y,
                width,
                height,
            )
        } else {
            (x, y, width, height)
        };

        let name = embedded.resource_name();
        let page = self.current_page()?;
        page.content
            .save_state()
            .transform([w as f32, 0.0, 0.0, h as f32, x as f32, y as f32])
            .x_object(Name(name.as_bytes()))
            .restore_state();
        page.images.insert(name, embedded.xobject);
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), CanvasError> {
        if !self.started {
            return Err(CanvasError::PageNotOpen);
        }
        self.pages.push(PageContent {
            content: Content::new(),
            images: BTreeMap::new(),
        });
        Ok(())
    }

    fn save(mut self) -> Result<Vec<u8>, CanvasError> {
        if self.pages.is_empty() {
            self.started = true;
            self.new_page()?;
        }

        let pages = std::mem::take(&mut self.pages);
        let page_ids: Vec<Ref> = pages.iter().map(|_| self.alloc()).collect();
        let content_ids: Vec<Ref> = pages.iter().map(|_| self.alloc()).collect();

        self.pdf
            .type1_font(self.regular_font_id)
            .base_font(Name(Font::Helvetica.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        self.pdf
            .type1_font(self.bold_font_id)
            .base_font(Name(Font::HelveticaBold.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        for (i, page_content) in pages.into_iter().enumerate() {
            let raw = page_content.content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, DEFLATE_LEVEL);
            self.pdf
                .stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);

            let mut page = self.pdf.page(page_ids[i]);
            page.media_box(Rect::new(
                0.0,
                0.0,
                self.size.width as f32,
                self.size.height as f32,
            ))
            .parent(self.pages_id)
            .contents(content_ids[i]);
            let mut resources = page.resources();
            {
                let mut fonts = resources.fonts();
                fonts.pair(Name(font_resource(Font::Helvetica)), self.regular_font_id);
                fonts.pair(Name(font_resource(Font::HelveticaBold)), self.bold_font_id);
            }
            if !page_content.images.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobject) in &page_content.images {
                    xobjects.pair(Name(name.as_bytes()), *xobject);
                }
            }
        }

        tracing::debug!(
            pages = page_ids.len(),
            images = self.images.len(),
            "pdf document assembled"
        );
        Ok(self.pdf.finish())
    }
}
