use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::{
    bitmap::PixelGrid,
    common::{PaletteIdx, ALPHA},
    palette::Palette,
};

// Directive placed at the top of the generated data file.
pub const SOURCE_HEADER: &str = "#include <gui.h>";

// One bitmap translated to palette indices, ready to be rendered as C.
pub struct Asset {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub alpha: u8,
    pub rows: Vec<Vec<u8>>,
}

impl Asset {
    pub fn from_grid(name: &str, grid: &PixelGrid, palette: &Palette) -> Result<Self> {
        let mut rows = Vec::with_capacity(grid.rows.len());
        for row in &grid.rows {
            let mut indices = Vec::with_capacity(row.len());
            for &color in row {
                let idx: PaletteIdx = *palette
                    .get(&color)
                    .with_context(|| format!("Missing color: {}", color))?;
                let idx = u8::try_from(idx).with_context(|| {
                    format!("Palette index {:#x} for color {} does not fit in a byte", idx, color)
                })?;
                indices.push(idx);
            }
            rows.push(indices);
        }
        Ok(Asset {
            name: name.to_string(),
            width: grid.width,
            height: grid.height,
            alpha: ALPHA,
            rows,
        })
    }

    pub fn render(&self) -> String {
        let pixel_lines = self.rows.iter().map(|row| {
            let pixels = row.iter().map(|idx| format!("\\x{:02x}", idx)).join("");
            format!("        \"{}\" \\", pixels)
        });
        [
            format!("bitmap_st bitmap_{} = {{", self.name),
            format!(
                "    .size = {{ .width = {}, .height = {} }},",
                self.width, self.height
            ),
            format!("    .alpha = {:#x},", self.alpha),
            "    .pixels = (uint8_t *)".to_string(),
        ]
        .into_iter()
        .chain(pixel_lines)
        .chain(["};".to_string(), String::new()])
        .join("\n")
    }
}

pub fn render_bitmap(name: &str, grid: &PixelGrid, palette: &Palette) -> Result<String> {
    Ok(Asset::from_grid(name, grid, palette)?.render())
}

pub fn render_source(blocks: &[String]) -> String {
    [SOURCE_HEADER, ""]
        .into_iter()
        .chain(blocks.iter().map(String::as_str))
        .join("\n")
}

// Companion header declaring every emitted bitmap.
pub fn render_proto(source_path: &Path, names: &[String]) -> String {
    let mut out = format!("/* {} */\n", source_path.display());
    for name in names {
        out += &format!("extern bitmap_st bitmap_{};\n", name);
    }
    out
}
