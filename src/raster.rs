use crate::error::PdfEmitError;

/// Chroma subsampling ratio of a decoded luma/chroma raster: the chroma
/// planes hold one sample per pixel, per 2x1 block, or per 2x2 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsampling {
    Full,
    Horizontal,
    Both,
}

/// A decoded raster tagged with its in-memory pixel encoding. Produced by
/// an external decoder and consumed exactly once per image placement.
///
/// `rgb_bytes` is total over every variant: whatever the input encoding,
/// the output is `3 * width * height` bytes, row-major, R,G,B order, with
/// alpha removed. Zero-alpha pixels normalize to opaque black everywhere so
/// the output is deterministic.
#[derive(Debug, Clone)]
pub enum PixelBuffer {
    /// RGBA, 8 bits per channel, straight (non-premultiplied) alpha.
    Straight {
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
    /// RGBA, 8 bits per channel, color channels pre-scaled by alpha.
    Premultiplied {
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
    /// Planar luma/chroma. The luma plane is full resolution; the chroma
    /// planes are indexed at `x/2` and/or `y/2` per the subsampling ratio.
    YCbCr {
        width: u32,
        height: u32,
        luma: Vec<u8>,
        cb: Vec<u8>,
        cr: Vec<u8>,
        luma_stride: usize,
        chroma_stride: usize,
        subsampling: Subsampling,
    },
    /// RGBA normalized to 0-65535 per channel, premultiplied. Fallback for
    /// any pixel layout the specialized variants do not cover.
    Generic {
        width: u32,
        height: u32,
        data: Vec<u16>,
    },
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        match self {
            PixelBuffer::Straight { width, .. }
            | PixelBuffer::Premultiplied { width, .. }
            | PixelBuffer::YCbCr { width, .. }
            | PixelBuffer::Generic { width, .. } => *width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            PixelBuffer::Straight { height, .. }
            | PixelBuffer::Premultiplied { height, .. }
            | PixelBuffer::YCbCr { height, .. }
            | PixelBuffer::Generic { height, .. } => *height,
        }
    }

    /// Packs the raster into `3 * width * height` RGB bytes.
    pub fn rgb_bytes(&self) -> Vec<u8> {
        match self {
            PixelBuffer::Straight { width, height, data } => {
                straight_rgb(*width, *height, data)
            }
            PixelBuffer::Premultiplied { width, height, data } => {
                premultiplied_rgb(*width, *height, data)
            }
            PixelBuffer::YCbCr {
                width,
                height,
                luma,
                cb,
                cr,
                luma_stride,
                chroma_stride,
                subsampling,
            } => ycbcr_rgb(
                *width,
                *height,
                luma,
                cb,
                cr,
                *luma_stride,
                *chroma_stride,
                *subsampling,
            ),
            PixelBuffer::Generic { width, height, data } => {
                generic_rgb(*width, *height, data)
            }
        }
    }
}

fn straight_rgb(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let pixels = (width as usize) * (height as usize);
    let mut out = vec![0u8; pixels * 3];
    for (src, dst) in data.chunks_exact(4).zip(out.chunks_exact_mut(3)) {
        dst[0] = src[0];
        dst[1] = src[1];
        dst[2] = src[2];
    }
    out
}

fn premultiplied_rgb(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let pixels = (width as usize) * (height as usize);
    let mut out = vec![0u8; pixels * 3];
    for (src, dst) in data.chunks_exact(4).zip(out.chunks_exact_mut(3)) {
        let a = src[3] as u16;
        if a != 0 {
            dst[0] = (src[0] as u16 * 0xff / a) as u8;
            dst[1] = (src[1] as u16 * 0xff / a) as u8;
            dst[2] = (src[2] as u16 * 0xff / a) as u8;
        }
    }
    out
}

fn generic_rgb(width: u32, height: u32, data: &[u16]) -> Vec<u8> {
    let pixels = (width as usize) * (height as usize);
    let mut out = vec![0u8; pixels * 3];
    for (src, dst) in data.chunks_exact(4).zip(out.chunks_exact_mut(3)) {
        let a = src[3] as u32;
        if a != 0 {
            dst[0] = ((src[0] as u32 * 65535 / a) >> 8) as u8;
            dst[1] = ((src[1] as u32 * 65535 / a) >> 8) as u8;
            dst[2] = ((src[2] as u32 * 65535 / a) >> 8) as u8;
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn ycbcr_rgb(
    width: u32,
    height: u32,
    luma: &[u8],
    cb: &[u8],
    cr: &[u8],
    luma_stride: usize,
    chroma_stride: usize,
    subsampling: Subsampling,
) -> Vec<u8> {
    let mut out = vec![0u8; (width as usize) * (height as usize) * 3];
    let mut index = 0;
    for y in 0..height as usize {
        for x in 0..width as usize {
            let (cx, cy) = match subsampling {
                Subsampling::Full => (x, y),
                Subsampling::Horizontal => (x / 2, y),
                Subsampling::Both => (x / 2, y / 2),
            };
            let yy = luma[y * luma_stride + x];
            let chroma_index = cy * chroma_stride + cx;
            let (r, g, b) = ycbcr_to_rgb(yy, cb[chroma_index], cr[chroma_index]);
            out[index] = r;
            out[index + 1] = g;
            out[index + 2] = b;
            index += 3;
        }
    }
    out
}

/// JFIF luma/chroma to RGB, in 16.16 fixed point so results are exact and
/// platform-independent.
fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> (u8, u8, u8) {
    let yy = (y as i32) * 0x10101;
    let cb = (cb as i32) - 128;
    let cr = (cr as i32) - 128;

    let r = yy + 91881 * cr;
    let g = yy - 22554 * cb - 46802 * cr;
    let b = yy + 116130 * cb;
    (clamp_16_16(r), clamp_16_16(g), clamp_16_16(b))
}

// Scales a 16.16 fixed-point value down to u8, saturating on both ends.
fn clamp_16_16(v: i32) -> u8 {
    if (v as u32) & 0xff00_0000 == 0 {
        (v >> 16) as u8
    } else {
        (!(v >> 31)) as u8
    }
}

/// Adapts the external decoder's output into a [`PixelBuffer`]. Format
/// sniffing and decompression stay inside the `image` crate; decoded pixels
/// arrive with straight alpha.
pub fn decode(data: &[u8]) -> Result<PixelBuffer, PdfEmitError> {
    let decoded =
        image::load_from_memory(data).map_err(|err| PdfEmitError::Image(err.to_string()))?;
    let rgba = decoded.into_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    Ok(PixelBuffer::Straight {
        width,
        height,
        data: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn straight_alpha_copies_channels_and_drops_alpha() {
        let buf = PixelBuffer::Straight {
            width: 2,
            height: 1,
            data: vec![10, 20, 30, 40, 50, 60, 70, 80],
        };
        assert_eq!(buf.rgb_bytes(), vec![10, 20, 30, 50, 60, 70]);
    }

    #[test]
    fn premultiplied_full_alpha_is_a_no_op() {
        let buf = PixelBuffer::Premultiplied {
            width: 1,
            height: 1,
            data: vec![128, 0, 0, 255],
        };
        assert_eq!(buf.rgb_bytes(), vec![128, 0, 0]);
    }

    #[test]
    fn premultiplied_half_alpha_scales_back_up() {
        let buf = PixelBuffer::Premultiplied {
            width: 1,
            height: 1,
            data: vec![64, 64, 64, 128],
        };
        // 64 * 255 / 128 = 127.
        assert_eq!(buf.rgb_bytes(), vec![127, 127, 127]);
    }

    #[test]
    fn zero_alpha_normalizes_to_black_in_every_variant() {
        let premultiplied = PixelBuffer::Premultiplied {
            width: 2,
            height: 2,
            data: (0..16)
                .map(|i| if i % 4 == 3 { 0u8 } else { 200 })
                .collect(),
        };
        assert_eq!(premultiplied.rgb_bytes(), vec![0u8; 12]);

        let generic = PixelBuffer::Generic {
            width: 2,
            height: 2,
            data: (0..16u16)
                .map(|i| if i % 4 == 3 { 0 } else { 50_000 })
                .collect(),
        };
        assert_eq!(generic.rgb_bytes(), vec![0u8; 12]);
    }

    #[test]
    fn generic_path_unpremultiplies_16_bit_samples() {
        let buf = PixelBuffer::Generic {
            width: 1,
            height: 1,
            data: vec![32768, 0, 65535, 65535],
        };
        // 32768 * 65535 / 65535 >> 8 = 128; 65535 >> 8 = 255.
        assert_eq!(buf.rgb_bytes(), vec![128, 0, 255]);
    }

    #[test]
    fn output_length_is_always_three_per_pixel() {
        let buf = PixelBuffer::Straight {
            width: 7,
            height: 5,
            data: vec![0; 7 * 5 * 4],
        };
        assert_eq!(buf.rgb_bytes().len(), 3 * 7 * 5);
    }

    #[test]
    fn ycbcr_neutral_chroma_is_grayscale() {
        let buf = PixelBuffer::YCbCr {
            width: 2,
            height: 1,
            luma: vec![0, 255],
            cb: vec![128, 128],
            cr: vec![128, 128],
            luma_stride: 2,
            chroma_stride: 2,
            subsampling: Subsampling::Full,
        };
        assert_eq!(buf.rgb_bytes(), vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn ycbcr_both_axes_subsampling_shares_one_chroma_sample() {
        // 2x2 luma, one chroma sample for the whole block.
        let buf = PixelBuffer::YCbCr {
            width: 2,
            height: 2,
            luma: vec![100, 150, 200, 250],
            cb: vec![128],
            cr: vec![128],
            luma_stride: 2,
            chroma_stride: 1,
            subsampling: Subsampling::Both,
        };
        assert_eq!(
            buf.rgb_bytes(),
            vec![100, 100, 100, 150, 150, 150, 200, 200, 200, 250, 250, 250]
        );
    }

    #[test]
    fn ycbcr_horizontal_subsampling_halves_x_only() {
        // 2x2 luma, chroma plane is 1 wide by 2 tall. Push the second row's
        // chroma far from neutral so a row-index mixup would show.
        let buf = PixelBuffer::YCbCr {
            width: 2,
            height: 2,
            luma: vec![128, 128, 128, 128],
            cb: vec![128, 255],
            cr: vec![128, 128],
            luma_stride: 2,
            chroma_stride: 1,
            subsampling: Subsampling::Horizontal,
        };
        let rgb = buf.rgb_bytes();
        // Row 0 stays neutral gray.
        assert_eq!(&rgb[0..6], &[128, 128, 128, 128, 128, 128]);
        // Row 1 picks up the strong blue chroma sample.
        assert_eq!(rgb[6..9], rgb[9..12]);
        assert!(rgb[8] > rgb[6]);
    }

    #[test]
    fn ycbcr_saturates_instead_of_wrapping() {
        // Max luma with strong red chroma would overflow without the clamp.
        let (r, g, b) = ycbcr_to_rgb(255, 128, 255);
        assert_eq!(r, 255);
        assert!(g < 255);
        assert_eq!(b, 255);

        // Min luma with strong negative chroma clamps at zero.
        let (r2, _, _) = ycbcr_to_rgb(0, 128, 0);
        assert_eq!(r2, 0);
    }

    #[test]
    fn decode_adapts_png_bytes_to_straight_rgba() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 0, 255, 255]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .expect("encode png");

        let buf = decode(&png).expect("decode");
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.height(), 1);
        assert_eq!(buf.rgb_bytes(), vec![255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn decode_rejects_garbage_bytes() {
        let err = decode(b"not an image").expect_err("must fail");
        assert!(matches!(err, PdfEmitError::Image(_)));
    }
}
