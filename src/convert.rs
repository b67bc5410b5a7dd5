use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    bitmap::load_pixels,
    config::Config,
    emit::{render_bitmap, render_proto, render_source},
    helpers::{asset_name, is_c_identifier},
    palette::{load_palette, Palette},
    persist::{create_parent_dir, find_bitmaps, save_text},
};

pub struct Converter<'a> {
    config: &'a Config,
    palette: Palette,
    names: Vec<String>,
    blocks: Vec<String>,
}

impl<'a> Converter<'a> {
    // Runs the whole batch. Output files are only written once every bitmap
    // has been converted, so a failure leaves existing outputs untouched.
    pub fn convert(config: &'a Config) -> Result<()> {
        info!("Converting bitmaps in {}", config.bitmap_dir.display());
        let mut converter = Self::new(config)?;
        converter.convert_all()?;
        converter.save()?;
        Ok(())
    }

    fn new(config: &'a Config) -> Result<Self> {
        let palette = load_palette(&config.palette_path)?;
        info!("Palette has {} colors", palette.len());
        Ok(Self {
            config,
            palette,
            names: vec![],
            blocks: vec![],
        })
    }

    fn convert_all(&mut self) -> Result<()> {
        for path in find_bitmaps(&self.config.bitmap_dir)? {
            self.convert_bitmap(&path)?;
        }
        if self.blocks.is_empty() {
            warn!("No bitmaps found in {}", self.config.bitmap_dir.display());
        }
        Ok(())
    }

    fn convert_bitmap(&mut self, path: &Path) -> Result<()> {
        info!("Loading bitmap: {}", path.display());
        let name = asset_name(path)?;
        if !is_c_identifier(&name) {
            warn!("bitmap_{} is not a valid C identifier", name);
        }
        let grid = load_pixels(path)?;
        let block = render_bitmap(&name, &grid, &self.palette)
            .with_context(|| format!("Unable to convert {}", path.display()))?;
        self.names.push(name);
        self.blocks.push(block);
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let mut outputs = vec![(self.config.output_path.as_path(), render_source(&self.blocks))];
        if let Some(proto_path) = &self.config.proto_path {
            outputs.push((proto_path.as_path(), render_proto(&self.config.output_path, &self.names)));
        }
        // Every destination must be writable before any existing file is replaced.
        for (path, _) in &outputs {
            create_parent_dir(path)?;
        }
        for (path, text) in &outputs {
            save_text(path, text)?;
        }
        info!("Wrote {} bitmaps", self.blocks.len());
        Ok(())
    }
}
