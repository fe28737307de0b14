//! Image box sizing.
//!
//! `aspect` is always pixel height over pixel width, so `height == width * aspect` holds for every
//! box returned here.

use crate::options::LayoutOptions;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageBox {
    pub width: f64,
    pub height: f64,
}

/// Box for a diagram that shares the page with others.
///
/// Height starts at half the remaining body space, capped at the maximum and floored at the
/// minimum. Width follows from the aspect ratio and is then clamped to the width floor and ceiling;
/// each width clamp recomputes the height.
pub fn shared_box(aspect: f64, remaining: f64, options: &LayoutOptions) -> ImageBox {
    let mut height = (remaining / 2.0)
        .min(options.max_image_height)
        .max(options.min_image_height);
    let mut width = height / aspect;
    if width < options.min_image_width {
        width = options.min_image_width;
        height = width * aspect;
    }
    if width > options.max_image_width {
        width = options.max_image_width;
        height = width * aspect;
    }
    ImageBox { width, height }
}

/// Largest box with the image's aspect ratio inside `max_width` x `max_height`.
pub fn contain_box(aspect: f64, max_width: f64, max_height: f64) -> ImageBox {
    let width = max_width.max(0.0);
    let height = width * aspect;
    if height <= max_height {
        return ImageBox { width, height };
    }
    let height = max_height.max(0.0);
    ImageBox {
        width: height / aspect,
        height,
    }
}

/// Box for a diagram that gets a page to itself: the largest fit inside `max_width` x
/// `max_height`, kept within the width bounds. A very tall image may end up taller than
/// `max_height`.
pub fn full_page_box(
    aspect: f64,
    max_width: f64,
    max_height: f64,
    options: &LayoutOptions,
) -> ImageBox {
    let image = contain_box(aspect, max_width.min(options.max_image_width), max_height);
    if image.width >= options.min_image_width {
        return image;
    }
    ImageBox {
        width: options.min_image_width,
        height: options.min_image_width * aspect,
    }
}
