use std::path::Path;

use anyhow::{bail, Context, Result};
use hashbrown::{hash_map::Entry, HashMap};
use log::{debug, info};

use crate::common::{Color, ColorValue, PaletteIdx};

// Header and comment lines of a GIMP palette file.
const IGNORED_PREFIXES: [&str; 4] = ["GIMP Palette", "Name:", "Columns:", "#"];

pub type Palette = HashMap<Color, PaletteIdx>;

pub fn load_palette(path: &Path) -> Result<Palette> {
    info!("Loading palette {}", path.display());
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read palette {}", path.display()))?;
    parse_palette(&text).with_context(|| format!("Invalid palette {}", path.display()))
}

pub fn parse_palette(text: &str) -> Result<Palette> {
    let mut palette = Palette::new();
    for line in text.lines() {
        if IGNORED_PREFIXES.iter().any(|p| line.starts_with(p)) {
            continue;
        }

        let cols: Vec<&str> = line.split_whitespace().collect();
        let [r, g, b, idx] = cols.as_slice() else {
            bail!("Invalid line: {}", line);
        };

        let color = Color::from_rgb(
            parse_channel(r, line)?,
            parse_channel(g, line)?,
            parse_channel(b, line)?,
        );
        let idx = parse_index(idx)
            .with_context(|| format!("Invalid index in line: {}", line))?;

        // Swatch files may repeat a color under several slots; the first slot is kept.
        match palette.entry(color) {
            Entry::Vacant(e) => {
                e.insert(idx);
            }
            Entry::Occupied(e) => {
                debug!("Ignoring duplicate color {:?} at index {:#x} (kept {:#x})", color.rgb(), idx, e.get());
            }
        }
    }
    Ok(palette)
}

// Hexadecimal index, optionally written as `$1a` or `0x1a`.
fn parse_index(s: &str) -> Result<PaletteIdx> {
    let s = s.replace('$', "");
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(&s);
    Ok(PaletteIdx::from_str_radix(digits, 16)?)
}

fn parse_channel(s: &str, line: &str) -> Result<ColorValue> {
    s.parse::<ColorValue>()
        .with_context(|| format!("Invalid color value {:?} in line: {}", s, line))
}
