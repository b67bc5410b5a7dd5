use std::{
    io::{Cursor, Read},
    path::Path,
};

use anyhow::{ensure, Context, Result};
use byteorder::{ReadBytesExt, LE};
use log::debug;

use crate::common::Color;

// Size of BITMAPINFOHEADER, the only DIB header variant supported.
const INFO_HEADER_SIZE: u32 = 40;

// Decoded true-color image. Row 0 is the topmost visual row.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<Color>>,
}

pub fn load_pixels(path: &Path) -> Result<PixelGrid> {
    let data = std::fs::read(path)
        .with_context(|| format!("Unable to read bitmap {}", path.display()))?;
    decode(&data).with_context(|| format!("Unable to decode bitmap {}", path.display()))
}

/// Decodes an uncompressed 24-bit BMP with a BITMAPINFOHEADER.
///
/// Header fields are checked before any pixel data is touched, so an
/// unsupported variant is never partially interpreted.
pub fn decode(data: &[u8]) -> Result<PixelGrid> {
    let mut cursor = Cursor::new(data);

    let mut signature = [0u8; 2];
    cursor.read_exact(&mut signature).context("Not a BMP file")?;
    ensure!(&signature == b"BM", "Not a BMP file");
    skip(&mut cursor, 4); // bfSize
    skip(&mut cursor, 4); // bfReserved1, bfReserved2
    let pixel_offset = cursor.read_u32::<LE>().context("Truncated file header")?;

    let header_size = cursor.read_u32::<LE>().context("Truncated DIB header")?;
    ensure!(
        header_size == INFO_HEADER_SIZE,
        "Unsupported DIB header size: {}",
        header_size
    );
    let width = cursor.read_i32::<LE>().context("Truncated DIB header")?;
    let height = cursor.read_i32::<LE>().context("Truncated DIB header")?;
    let planes = cursor.read_u16::<LE>().context("Truncated DIB header")?;
    let bits_per_pixel = cursor.read_u16::<LE>().context("Truncated DIB header")?;
    let compression = cursor.read_u32::<LE>().context("Truncated DIB header")?;
    skip(&mut cursor, 12); // biSizeImage, biXPelsPerMeter, biYPelsPerMeter
    skip(&mut cursor, 8); // biClrUsed, biClrImportant

    ensure!(
        planes == 1 && bits_per_pixel == 24 && compression == 0,
        "Only 24-bit uncompressed BMP supported (planes={}, bpp={}, compression={})",
        planes,
        bits_per_pixel,
        compression
    );
    ensure!(width >= 0, "Unsupported negative width: {}", width);
    ensure!(height != 0, "Bitmap has no rows");

    let width = width as usize;
    let row_count = height.unsigned_abs() as usize;
    // Rows are padded to a multiple of 4 bytes.
    let row_padding = (4 - (width * 3) % 4) % 4;
    // A positive height means rows are stored bottom-to-top.
    let top_down = height < 0;
    debug!(
        "BMP {}x{}, pixel data at {:#x}, {}",
        width,
        row_count,
        pixel_offset,
        if top_down { "top-down" } else { "bottom-up" }
    );

    cursor.set_position(pixel_offset as u64);

    let mut rows = vec![];
    for y in 0..row_count {
        let mut row = vec![];
        for x in 0..width {
            let mut bgr = [0u8; 3];
            cursor
                .read_exact(&mut bgr)
                .with_context(|| format!("Truncated pixel data at row {}, column {}", y, x))?;
            let [b, g, r] = bgr;
            row.push(Color::from_rgb(r, g, b));
        }
        skip(&mut cursor, row_padding);
        rows.push(row);
    }

    if !top_down {
        rows.reverse();
    }

    Ok(PixelGrid {
        width,
        height: row_count,
        rows,
    })
}

fn skip(cursor: &mut Cursor<&[u8]>, n: usize) {
    cursor.set_position(cursor.position() + n as u64);
}
