use crate::color::Color;
use crate::debug::{DebugLogger, json_escape};
use crate::error::PdfEmitError;
use crate::font;
use crate::geom::{self, ARC_SEGMENTS};
use crate::raster::{self, PixelBuffer};
use crate::types::Size;
use std::io::Write;
use std::path::Path;

const PDF_CATALOG_ID: usize = 1;
const PDF_RESOURCES_ID: usize = 2;
const PDF_FIRST_PAGE_ID: usize = 3;

fn pdf_header_bytes() -> &'static [u8] {
    b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n"
}

/// Object ids for page `index` (zero-based): the page dictionary and its
/// content stream. Objects 1 and 2 are the catalog and the resource
/// dictionary, so page ids start at 3 and advance in pairs. The catalog kid
/// list and every page object derive from this one function; there is no
/// second counter to drift against.
pub fn page_object_ids(index: usize) -> (usize, usize) {
    let page_id = 2 * index + PDF_FIRST_PAGE_ID;
    (page_id, page_id + 1)
}

/// Streaming PDF 1.7 writer. Every operation writes directly to the sink
/// and returns once the write completes; nothing is buffered or seeked, so
/// the sink only needs sequential writes.
///
/// The session is linear: `begin` once, then for each declared page
/// `new_page` followed by drawing calls on the returned [`PageWriter`] and
/// `PageWriter::finish`, then `end` once. Drawing methods live on
/// `PageWriter` only, so drawing without an open page does not compile;
/// the remaining sequence rules are enforced as [`PdfEmitError::Contract`]
/// errors.
pub struct PdfWriter<'a, W: Write> {
    writer: &'a mut W,
    offset: usize,
    page_size: Size,
    page_count: usize,
    object_count: usize,
    pages_opened: usize,
    pages_closed: usize,
    begun: bool,
    page_open: bool,
    debug: Option<DebugLogger>,
}

impl<'a, W: Write> PdfWriter<'a, W> {
    pub fn new(writer: &'a mut W, page_size: Size) -> Self {
        Self {
            writer,
            offset: 0,
            page_size,
            page_count: 0,
            object_count: 0,
            pages_opened: 0,
            pages_closed: 0,
            begun: false,
            page_open: false,
            debug: None,
        }
    }

    pub fn with_debug(writer: &'a mut W, page_size: Size, debug: DebugLogger) -> Self {
        let mut s = Self::new(writer, page_size);
        s.debug = Some(debug);
        s
    }

    /// Bytes written to the sink so far.
    pub fn bytes_written(&self) -> usize {
        self.offset
    }

    /// Writes the header, the catalog (object 1) with one kid reference per
    /// declared page, and the resource dictionary (object 2) naming the
    /// built-in fonts. Must be called exactly once, before any page.
    pub fn begin(&mut self, page_count: usize) -> Result<(), PdfEmitError> {
        if self.begun {
            return Err(PdfEmitError::Contract("begin called twice".to_string()));
        }
        if page_count == 0 {
            return Err(PdfEmitError::Contract(
                "document must declare at least one page".to_string(),
            ));
        }
        self.begun = true;
        self.page_count = page_count;
        self.write_bytes(pdf_header_bytes())?;

        let mut catalog = format!(
            "<</Type /Catalog /Pages {} 0 R /Kids [",
            PDF_FIRST_PAGE_ID
        );
        for index in 0..page_count {
            catalog.push_str(&format!("{} 0 R ", page_object_ids(index).0));
        }
        catalog.push_str(&format!(
            "] /Count {} /MediaBox [0 0 {} {}]>>",
            page_count,
            fmt_coord(self.page_size.width),
            fmt_coord(self.page_size.height)
        ));
        self.write_object(PDF_CATALOG_ID, &catalog)?;

        let mut resources = String::from("<</Font <<");
        for builtin in font::BUILTIN_FONTS {
            resources.push_str(&format!(
                " /{name} <</Type /Font /Subtype /Type1 /BaseFont /{name}>>",
                name = builtin.base_name()
            ));
        }
        resources.push_str(" >> >>");
        self.write_object(PDF_RESOURCES_ID, &resources)?;

        if let Some(logger) = &self.debug {
            logger.log_json(&format!("{{\"type\":\"emit.begin\",\"pages\":{page_count}}}"));
        }
        Ok(())
    }

    /// Writes the page object for `index` and opens its content stream.
    /// Indices must be consecutive from zero and stay below the declared
    /// page count. The returned [`PageWriter`] borrows this writer until
    /// the page is finished.
    pub fn new_page(&mut self, index: usize) -> Result<PageWriter<'_, 'a, W>, PdfEmitError> {
        if !self.begun {
            return Err(PdfEmitError::Contract(
                "page opened before begin".to_string(),
            ));
        }
        if self.page_open {
            return Err(PdfEmitError::Contract(
                "previous page was not finished".to_string(),
            ));
        }
        if index >= self.page_count {
            return Err(PdfEmitError::Contract(format!(
                "page index {} exceeds declared page count {}",
                index, self.page_count
            )));
        }
        if index != self.pages_opened {
            return Err(PdfEmitError::Contract(format!(
                "page index {} out of order, expected {}",
                index, self.pages_opened
            )));
        }

        let (page_id, content_id) = page_object_ids(index);
        self.write_object(
            page_id,
            &format!(
                "<</Type /Page /Parent {} 0 R /Resources {} 0 R /Contents {} 0 R>>",
                PDF_CATALOG_ID, PDF_RESOURCES_ID, content_id
            ),
        )?;
        // The sink is sequential-only, so the stream length cannot be
        // backpatched; it stays a placeholder, as readers tolerate.
        self.write_str(&format!("{content_id} 0 obj\n<</Length 0>>\nstream\n"))?;
        self.page_open = true;
        self.pages_opened += 1;

        if let Some(logger) = &self.debug {
            logger.log_json(&format!(
                "{{\"type\":\"emit.page\",\"index\":{index},\"page_id\":{page_id},\"content_id\":{content_id}}}"
            ));
        }
        Ok(PageWriter { doc: self })
    }

    /// Writes the trailer declaring the final object tally and the root
    /// reference. Consumes the writer, so a second call does not compile.
    /// Returns the total bytes written.
    pub fn end(self) -> Result<usize, PdfEmitError> {
        if !self.begun {
            return Err(PdfEmitError::Contract("end called before begin".to_string()));
        }
        if self.page_open {
            return Err(PdfEmitError::Contract(
                "end called with a page still open".to_string(),
            ));
        }
        if self.pages_closed != self.page_count {
            return Err(PdfEmitError::Contract(format!(
                "{} of {} declared pages were written",
                self.pages_closed, self.page_count
            )));
        }
        let mut s = self;
        let trailer = format!(
            "trailer\n<</Size {} /Root {} 0 R >>\n%%EOF\n",
            s.object_count, PDF_CATALOG_ID
        );
        s.write_str(&trailer)?;

        if let Some(logger) = &s.debug {
            logger.log_json(&format!(
                "{{\"type\":\"emit.end\",\"objects\":{},\"bytes\":{}}}",
                s.object_count, s.offset
            ));
            logger.flush();
        }
        Ok(s.offset)
    }

    fn write_object(&mut self, obj_id: usize, body: &str) -> Result<(), PdfEmitError> {
        self.write_str(&format!("{obj_id} 0 obj\n"))?;
        self.write_str(body)?;
        self.write_str("\nendobj\n")?;
        self.object_count += 1;
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), PdfEmitError> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    fn write_str(&mut self, data: &str) -> Result<(), PdfEmitError> {
        self.write_bytes(data.as_bytes())
    }
}

/// An open page. Each method emits one syntactically complete operator
/// group, newline-terminated, into the page's content stream. Colors are
/// symbolic names resolved through the SVG table (unknown names paint
/// black); coordinates are PDF points with the origin at the lower left.
pub struct PageWriter<'d, 'w, W: Write> {
    doc: &'d mut PdfWriter<'w, W>,
}

impl<W: Write> core::fmt::Debug for PageWriter<'_, '_, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageWriter").finish_non_exhaustive()
    }
}

impl<W: Write> PageWriter<'_, '_, W> {
    /// Filled rectangle with its origin at (x, y).
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) -> Result<(), PdfEmitError> {
        let op = format!(
            "{} {} {} {} {} re f\n",
            fill_op(Color::named(color)),
            fmt_coord(x),
            fmt_coord(y),
            fmt_coord(w),
            fmt_coord(h)
        );
        self.doc.write_str(&op)
    }

    /// Filled square with its origin at (x, y).
    pub fn square(&mut self, x: f64, y: f64, w: f64, color: &str) -> Result<(), PdfEmitError> {
        self.rect(x, y, w, w, color)
    }

    /// Stroked segment from (x1, y1) to (x2, y2).
    pub fn line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke_width: f64,
        color: &str,
    ) -> Result<(), PdfEmitError> {
        let op = format!(
            "{} w {} {} {} m {} {} l S\n",
            fmt_coord(stroke_width),
            stroke_op(Color::named(color)),
            fmt_coord(x1),
            fmt_coord(y1),
            fmt_coord(x2),
            fmt_coord(y2)
        );
        self.doc.write_str(&op)
    }

    /// Closed filled path through the given vertices. The coordinate lists
    /// must be the same non-zero length; a mismatch is a caller-contract
    /// violation and nothing is written.
    pub fn polygon(&mut self, xs: &[f64], ys: &[f64], color: &str) -> Result<(), PdfEmitError> {
        if xs.len() != ys.len() {
            return Err(PdfEmitError::PolygonMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(PdfEmitError::Contract(
                "polygon requires at least one vertex".to_string(),
            ));
        }
        let mut op = format!(
            "{} {} {} m",
            fill_op(Color::named(color)),
            fmt_coord(xs[0]),
            fmt_coord(ys[0])
        );
        for i in 1..xs.len() {
            op.push_str(&format!(" {} {} l", fmt_coord(xs[i]), fmt_coord(ys[i])));
        }
        op.push_str(&format!(" {} {} l f\n", fmt_coord(xs[0]), fmt_coord(ys[0])));
        self.doc.write_str(&op)
    }

    /// Stroked Bezier from (x1, y1) to (x3, y3) with control point (x2, y2).
    #[allow(clippy::too_many_arguments)]
    pub fn curve(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        stroke_width: f64,
        color: &str,
    ) -> Result<(), PdfEmitError> {
        let op = format!(
            "{} w {} {} {} m {} {} {} {} v S\n",
            fmt_coord(stroke_width),
            stroke_op(Color::named(color)),
            fmt_coord(x1),
            fmt_coord(y1),
            fmt_coord(x2),
            fmt_coord(y2),
            fmt_coord(x3),
            fmt_coord(y3)
        );
        self.doc.write_str(&op)
    }

    /// Filled circle of radius `r` centered at (x, y).
    pub fn circle(&mut self, x: f64, y: f64, r: f64, color: &str) -> Result<(), PdfEmitError> {
        self.fill_arc(x, y, r, r, 0.0, 360.0, color)
    }

    /// Filled ellipse with radii (w, h) centered at (x, y).
    pub fn ellipse(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) -> Result<(), PdfEmitError> {
        self.fill_arc(x, y, w, h, 0.0, 360.0, color)
    }

    /// Filled elliptical arc from `angle1` to `angle2` degrees, emitted as
    /// 16 wedges from the center.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_arc(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        angle1: f64,
        angle2: f64,
        color: &str,
    ) -> Result<(), PdfEmitError> {
        let resolved = Color::named(color);
        let stroke = stroke_op(resolved);
        let fill = fill_op(resolved);
        for i in 0..ARC_SEGMENTS {
            let seg = geom::arc_segment(i, x, y, w, h, angle1, angle2);
            let op = format!(
                "0 w {} {} {} {} m {} {} l {} {} {} {} v b\n",
                stroke,
                fill,
                fmt_coord(x),
                fmt_coord(y),
                fmt_coord(seg.start.x),
                fmt_coord(seg.start.y),
                fmt_coord(seg.control.x),
                fmt_coord(seg.control.y),
                fmt_coord(seg.end.x),
                fmt_coord(seg.end.y)
            );
            self.doc.write_str(&op)?;
        }
        Ok(())
    }

    /// Stroked elliptical arc from `angle1` to `angle2` degrees, emitted as
    /// 16 Bezier segments.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        angle1: f64,
        angle2: f64,
        stroke_width: f64,
        color: &str,
    ) -> Result<(), PdfEmitError> {
        self.doc.write_str(&format!(
            "{} {} w\n",
            stroke_op(Color::named(color)),
            fmt_coord(stroke_width)
        ))?;
        for i in 0..ARC_SEGMENTS {
            let seg = geom::arc_segment(i, x, y, w, h, angle1, angle2);
            let op = format!(
                "{} {} m {} {} {} {} v S\n",
                fmt_coord(seg.start.x),
                fmt_coord(seg.start.y),
                fmt_coord(seg.control.x),
                fmt_coord(seg.control.y),
                fmt_coord(seg.end.x),
                fmt_coord(seg.end.y)
            );
            self.doc.write_str(&op)?;
        }
        Ok(())
    }

    /// Places `text` at (x, y) in the named font family (`sans`, `serif`,
    /// `mono`, `symbol`). Unknown families emit an undefined font reference
    /// rather than failing the document.
    pub fn text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        font_alias: &str,
        size: f64,
        color: &str,
    ) -> Result<(), PdfEmitError> {
        let op = format!(
            "BT /{} {} Tf {} {} Td {} ({}) Tj ET\n",
            font::base_font(font_alias),
            fmt_coord(size),
            fmt_coord(x),
            fmt_coord(y),
            fill_op(Color::named(color)),
            escape_pdf_string(text)
        );
        self.doc.write_str(&op)
    }

    /// Reads, decodes, and places the raster at `path`, scaled by
    /// `scale` percent. The file handle is held only for this call.
    pub fn image(
        &mut self,
        x: f64,
        y: f64,
        scale: f64,
        path: impl AsRef<Path>,
    ) -> Result<(), PdfEmitError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|err| PdfEmitError::Image(format!("{}: {}", path.display(), err)))?;
        let buffer = raster::decode(&data).map_err(|err| match err {
            PdfEmitError::Image(message) => {
                PdfEmitError::Image(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;
        if let Some(logger) = &self.doc.debug {
            logger.log_json(&format!(
                "{{\"type\":\"emit.image.file\",\"source\":\"{}\"}}",
                json_escape(&path.display().to_string())
            ));
        }
        self.raster(x, y, scale, &buffer)
    }

    /// Places an already-decoded raster at (x, y), scaled by `scale`
    /// percent of its pixel size, as an inline image. The pixel bytes are
    /// normalized before any block byte reaches the sink, so a bad raster
    /// can never leave an unterminated inline-image block behind.
    pub fn raster(
        &mut self,
        x: f64,
        y: f64,
        scale: f64,
        buffer: &PixelBuffer,
    ) -> Result<(), PdfEmitError> {
        let rgb = buffer.rgb_bytes();
        let width = buffer.width();
        let height = buffer.height();
        let fw = width as f64 * (scale / 100.0);
        let fh = height as f64 * (scale / 100.0);

        let mut block = Vec::with_capacity(rgb.len() + 96);
        block.extend_from_slice(
            format!(
                "q {} 0 0 {} {} {} cm\nBI /W {} /H {} /CS /RGB /BPC 8\nID ",
                fmt_coord(fw),
                fmt_coord(fh),
                fmt_coord(x),
                fmt_coord(y),
                width,
                height
            )
            .as_bytes(),
        );
        block.extend_from_slice(&rgb);
        block.extend_from_slice(b" EI\nQ\n");
        self.doc.write_bytes(&block)?;

        if let Some(logger) = &self.doc.debug {
            logger.log_json(&format!(
                "{{\"type\":\"emit.image\",\"width\":{width},\"height\":{height},\"bytes\":{}}}",
                rgb.len()
            ));
        }
        Ok(())
    }

    /// Terminates the content stream and closes the page. Must be called
    /// exactly once per `new_page`.
    pub fn finish(self) -> Result<(), PdfEmitError> {
        self.doc.write_str("endstream\nendobj\n")?;
        self.doc.object_count += 1;
        self.doc.page_open = false;
        self.doc.pages_closed += 1;
        Ok(())
    }
}

fn fill_op(color: Color) -> String {
    format!(
        "{} {} {} rg",
        fmt_unit(color.r as f64 / 255.0),
        fmt_unit(color.g as f64 / 255.0),
        fmt_unit(color.b as f64 / 255.0)
    )
}

fn stroke_op(color: Color) -> String {
    format!(
        "{} {} {} RG",
        fmt_unit(color.r as f64 / 255.0),
        fmt_unit(color.g as f64 / 255.0),
        fmt_unit(color.b as f64 / 255.0)
    )
}

// Coordinates carry up to 2 decimals, unit-range color components up to 3;
// trailing zeros are trimmed either way so `10.0` prints as `10`.
fn fmt_coord(value: f64) -> String {
    format_fixed(value, 100, 2)
}

fn fmt_unit(value: f64) -> String {
    format_fixed(value, 1000, 3)
}

fn format_fixed(value: f64, denom: i64, places: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let scaled = (value * denom as f64).round();
    let scaled = scaled.clamp(i64::MIN as f64, i64::MAX as f64) as i64;
    if scaled == 0 {
        return "0".to_string();
    }
    let sign = if scaled < 0 { "-" } else { "" };
    let abs = scaled.abs();
    let int_part = abs / denom;
    let frac_part = abs % denom;
    if frac_part == 0 {
        return format!("{}{}", sign, int_part);
    }
    let mut s = format!("{}{}.{:0width$}", sign, int_part, frac_part, width = places);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Escapes a string for embedding in a PDF literal: backslashes,
/// parentheses, and carriage returns would otherwise terminate the literal
/// early or read as nested structure.
fn escape_pdf_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}
