use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::MatchOptions;
use log::info;
use serde::de::DeserializeOwned;

use crate::config::Config;

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("Loading {}", path.display());
    let data_bytes = fs::read(path)?;
    let data: T = serde_json::from_slice(&data_bytes)?;
    Ok(data)
}

pub fn load_config(path: &Path) -> Result<Config> {
    load_json(path).with_context(|| format!("Unable to load config {}", path.display()))
}

// Every `*.bmp` directly under `dir`, in filesystem enumeration order.
// Hidden files are skipped.
pub fn find_bitmaps(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.bmp", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut paths = vec![];
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };
    for entry in glob::glob_with(&pattern, options)? {
        paths.push(entry?);
    }
    Ok(paths)
}

pub fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Unable to create directory for {}", path.display()))?;
    }
    Ok(())
}

pub fn save_text(path: &Path, text: &str) -> Result<()> {
    info!("Saving {}", path.display());
    create_parent_dir(path)?;
    fs::write(path, text).with_context(|| format!("Unable to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bitmap_assets_persist_{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_bitmaps_by_extension() {
        let dir = test_dir("find");
        for name in ["a.bmp", "b.bmp", ".hidden.bmp", "notes.txt", "c.png"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested").join("d.bmp"), b"").unwrap();

        let mut found = find_bitmaps(&dir).unwrap();
        found.sort();
        assert_eq!(found, vec![dir.join("a.bmp"), dir.join("b.bmp")]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_find_bitmaps_empty_dir() {
        let dir = test_dir("empty");
        assert!(find_bitmaps(&dir).unwrap().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_text_creates_parent_and_overwrites() {
        let dir = test_dir("save");
        let path = dir.join("data").join("out.c");
        save_text(&path, "first").unwrap();
        save_text(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_create_parent_dir_blocked_by_file() {
        let dir = test_dir("blocked");
        fs::write(dir.join("blocker"), "").unwrap();
        assert!(create_parent_dir(&dir.join("blocker").join("out.h")).is_err());
        create_parent_dir(&dir.join("gen").join("out.h")).unwrap();
        assert!(dir.join("gen").is_dir());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_config() {
        let dir = test_dir("config");
        let path = dir.join("bitmaps.json");
        fs::write(&path, r#"{ "output_path": "gen/bitmaps.c", "proto_path": "gen/bitmaps.h" }"#).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.output_path, PathBuf::from("gen/bitmaps.c"));
        assert_eq!(config.proto_path, Some(PathBuf::from("gen/bitmaps.h")));

        fs::write(&path, "not json").unwrap();
        assert!(load_config(&path).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
