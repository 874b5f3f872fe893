mod color;
mod debug;
mod error;
mod font;
mod geom;
mod pdf;
mod raster;
mod types;

pub use color::Color;
pub use debug::DebugLogger;
pub use error::PdfEmitError;
pub use font::{BUILTIN_FONTS, BuiltinFont};
pub use geom::{ARC_SEGMENTS, ArcSegment, arc_segment};
pub use pdf::{PageWriter, PdfWriter, page_object_ids};
pub use raster::{PixelBuffer, Subsampling, decode as decode_raster};
pub use types::{Point, Size};
