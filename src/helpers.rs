use std::path::Path;

use anyhow::{Context, Result};

// Asset name used in the generated identifier: the file name without extension.
pub fn asset_name(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .with_context(|| format!("No file name in {}", path.display()))?;
    Ok(stem.to_string_lossy().into_owned())
}

pub fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
