use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_PALETTE_PATH: &str = "misc/vga-256.gpl";
pub const DEFAULT_BITMAP_DIR: &str = "bitmaps";
pub const DEFAULT_OUTPUT_PATH: &str = "data/data_bitmaps.c";

// Input and output locations of a conversion run. Fields missing from a
// config file fall back to the well-known project locations.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub palette_path: PathBuf,
    pub bitmap_dir: PathBuf,
    pub output_path: PathBuf,
    pub proto_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            palette_path: DEFAULT_PALETTE_PATH.into(),
            bitmap_dir: DEFAULT_BITMAP_DIR.into(),
            output_path: DEFAULT_OUTPUT_PATH.into(),
            proto_path: None,
        }
    }
}
