//! Avatar thumbnailing.
//!
//! Profile photos are downsampled to a small square bound and shipped inline
//! as a base64 data URI, so the destination never needs to fetch them.

use std::{io::Cursor, path::Path};

use {
    base64::Engine,
    image::{ImageFormat, ImageReader},
};

use crate::error::Result;

/// Default square bound (width and height) for avatar thumbnails, in pixels.
pub const AVATAR_BOUND: u32 = 75;

/// Load an image from disk, downsample it to fit within `bound`×`bound`
/// preserving aspect ratio, and return it PNG-encoded as a base64 data URI.
pub fn thumbnail_data_uri(path: &Path, bound: u32) -> Result<String> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let thumb = img.thumbnail(bound, bound);

    let mut out = Cursor::new(Vec::new());
    thumb.write_to(&mut out, ImageFormat::Png)?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(out.into_inner());
    Ok(format!("data:image/png;base64,{encoded}"))
}
