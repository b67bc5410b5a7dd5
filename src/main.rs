use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use config::Config;
use convert::Converter;

mod bitmap;
mod common;
mod config;
mod convert;
mod emit;
mod helpers;
mod palette;
mod persist;

/// Converts 24-bit BMP files into C bitmap declarations using a 256-color palette.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file providing any of the locations below
    #[arg(long)]
    config: Option<PathBuf>,

    /// GIMP palette file mapping colors to palette indices
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Directory scanned for *.bmp files
    #[arg(long)]
    bitmaps: Option<PathBuf>,

    /// Generated C source file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Generated header declaring every bitmap
    #[arg(long)]
    proto: Option<PathBuf>,
}

// Command-line flags take precedence over the config file, which takes
// precedence over the well-known defaults.
fn resolve_config(args: Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => persist::load_config(path)?,
        None => Config::default(),
    };
    if let Some(path) = args.palette {
        config.palette_path = path;
    }
    if let Some(dir) = args.bitmaps {
        config.bitmap_dir = dir;
    }
    if let Some(path) = args.output {
        config.output_path = path;
    }
    if args.proto.is_some() {
        config.proto_path = args.proto;
    }
    Ok(config)
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = resolve_config(args)?;
    Converter::convert(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["bitmap_assets"]).unwrap();
        let config = resolve_config(args).unwrap();
        assert_eq!(config.palette_path, PathBuf::from("misc/vga-256.gpl"));
        assert_eq!(config.bitmap_dir, PathBuf::from("bitmaps"));
        assert_eq!(config.output_path, PathBuf::from("data/data_bitmaps.c"));
        assert_eq!(config.proto_path, None);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = std::env::temp_dir().join(format!("bitmap_assets_args_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("bitmaps.json");
        fs::write(
            &config_path,
            r#"{ "palette_path": "pal.gpl", "bitmap_dir": "icons", "proto_path": "p.h" }"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "bitmap_assets",
            "--config",
            config_path.to_str().unwrap(),
            "--bitmaps",
            "sprites",
            "--output",
            "gen/out.c",
        ])
        .unwrap();
        let config = resolve_config(args).unwrap();
        assert_eq!(config.palette_path, PathBuf::from("pal.gpl"));
        assert_eq!(config.bitmap_dir, PathBuf::from("sprites"));
        assert_eq!(config.output_path, PathBuf::from("gen/out.c"));
        assert_eq!(config.proto_path, Some(PathBuf::from("p.h")));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::try_parse_from(["bitmap_assets", "--config", "/nonexistent/bitmaps.json"]).unwrap();
        assert!(resolve_config(args).is_err());
    }
}
