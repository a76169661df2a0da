//! Font discovery and registration for chart text
//!
//! Text is rasterized with ab_glyph, which has no access to system font
//! lookup, so a font file is located on disk and registered once per process
//! under the `sans-serif` family.

use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use plotters::style::FontStyle;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Family name every chart style refers to
pub const FONT_FAMILY: &str = "sans-serif";

const CANDIDATES: [&str; 9] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceCell<PathBuf> = OnceCell::new();

/// Find a usable font file: the configured one, else the first system font found
pub fn locate_font(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        return path.is_file().then(|| path.to_path_buf());
    }
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Register the chart font, once per process
///
/// Later calls return the path registered first, whatever they are passed.
pub fn ensure_font(configured: Option<&Path>) -> Result<&'static Path> {
    let path = REGISTERED.get_or_try_init(|| {
        let path = locate_font(configured).ok_or_else(|| Error::FontUnavailable {
            message: match configured {
                Some(p) => format!("{} is not a readable file", p.display()),
                None => "no system sans-serif font found; set MOVIE_INSIGHTS_FONT".to_string(),
            },
        })?;

        let bytes: &'static [u8] = Box::leak(std::fs::read(&path)?.into_boxed_slice());
        plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| {
            Error::FontUnavailable {
                message: format!("{} is not a valid font", path.display()),
            }
        })?;

        debug!("Registered chart font {}", path.display());
        Ok::<_, Error>(path)
    })?;
    Ok(path.as_path())
}
