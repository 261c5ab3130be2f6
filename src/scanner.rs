use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Result, bail};
use ignore::WalkBuilder;

use crate::model::item::{Item, ItemType};

/// Expand dropped paths into a batch of items.
///
/// Every input path must exist. Directories are walked `depth` levels deep
/// (0 = the path itself only, negative = unlimited) and are included as
/// items only when `include_directories` is set. Files are kept when the
/// extension set is empty or contains their extension. The result is
/// de-duplicated and sorted by source path.
pub fn scan_items(
    paths: &[PathBuf],
    depth: i32,
    include_directories: bool,
    extensions: &[String],
) -> Result<Vec<Item>> {
    let extensions: HashSet<&str> = extensions
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .collect();

    let mut seen = HashSet::<String>::new();
    let mut items = Vec::new();

    for path in paths {
        if !path.exists() {
            bail!("path {} does not exist", path.display());
        }

        let mut builder = WalkBuilder::new(path);
        builder.standard_filters(false);
        if depth >= 0 {
            builder.max_depth(Some(depth as usize));
        }

        for entry in builder.build() {
            let entry = entry?;
            let entry_path = entry.path();
            let Some(path_str) = entry_path.to_str() else {
                tracing::warn!("skipping non-UTF-8 path: {}", entry_path.display());
                continue;
            };

            if entry_path.is_dir() {
                if include_directories && seen.insert(path_str.to_string()) {
                    items.push(Item::new(path_str, ItemType::Directory));
                }
            } else if entry_path.is_file() {
                let extension_included = extensions.is_empty()
                    || entry_path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| extensions.contains(ext))
                        // Files without a readable extension pass the filter.
                        .unwrap_or(true);
                if extension_included && seen.insert(path_str.to_string()) {
                    items.push(Item::new(path_str, ItemType::File));
                }
            } else if seen.insert(path_str.to_string()) {
                tracing::warn!("unclassified entry: {path_str}");
                items.push(Item::new(path_str, ItemType::Unknown));
            }
        }
    }

    items.sort_by(|a, b| a.source_path.cmp(&b.source_path));
    Ok(items)
}
