use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::model::item::Item;
use crate::plugin::contract::{Bundle, OptionValues, Plugin, SourceItem, TargetItem};
use crate::plugin::descriptor::{OptionValue, PluginDescriptor};
use crate::plugin::paths::PathModule;

/// Split an edited target-path buffer into lines: trimmed, blanks dropped.
pub fn parse_target_paths(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Run one plugin over the whole batch.
///
/// The current target paths arrive as a newline-joined text buffer (the form
/// the editor hands back). The buffer is parsed and validated against the
/// item count before any plugin code runs; on success the rewritten target
/// paths are returned as a fresh newline-joined buffer. Errors leave the
/// batch untouched; there is no partial commit.
pub fn run_plugin(
    routine: &dyn Plugin,
    descriptor: &PluginDescriptor,
    overrides: &BTreeMap<String, OptionValue>,
    items: &[Item],
    target_paths_text: &str,
) -> Result<String, EngineError> {
    let lines = parse_target_paths(target_paths_text);
    if lines.len() != items.len() {
        return Err(EngineError::CountMismatch {
            lines: lines.len(),
            items: items.len(),
        });
    }

    tracing::info!(
        plugin = %descriptor.name,
        items = items.len(),
        "running plugin"
    );

    let source_items: Vec<SourceItem> = items
        .iter()
        .map(|item| SourceItem {
            source_path: item.source_path.clone(),
        })
        .collect();
    let mut target_items: Vec<TargetItem> = lines
        .iter()
        .map(|line| TargetItem {
            target_path: line.to_string(),
        })
        .collect();
    let options = OptionValues::merge(&descriptor.options, overrides)?;
    let path = PathModule::native();

    routine
        .apply(Bundle {
            source_items: &source_items,
            target_items: &mut target_items,
            options: &options,
            path: &path,
        })
        .map_err(|source| EngineError::Plugin {
            name: descriptor.name.clone(),
            source,
        })?;

    Ok(target_items
        .iter()
        .map(|target_item| target_item.target_path.as_str())
        .collect::<Vec<_>>()
        .join("\n"))
}
