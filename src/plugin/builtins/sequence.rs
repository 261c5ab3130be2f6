use anyhow::Result;

use crate::plugin::contract::{Bundle, Plugin};

/// Replace every file name with a sequence number derived from its position
/// in the batch: `prefix + pad(startAt + stepBy * index) + suffix`. The
/// extension and the parent directory are carried over verbatim.
pub struct ToSequence;

impl Plugin for ToSequence {
    fn apply(&self, bundle: Bundle<'_>) -> Result<()> {
        let prefix = bundle.options.get_string("prefix")?.to_string();
        let suffix = bundle.options.get_string("suffix")?.to_string();
        let start_at = bundle.options.get_integer("startAt")?;
        let step_by = bundle.options.get_integer("stepBy")?;
        let pad_width = bundle.options.get_integer("padStart")?;
        let pad_string = bundle.options.get_string("padString")?.to_string();
        let path = bundle.path;

        for (index, target_item) in bundle.target_items.iter_mut().enumerate() {
            let target_path = target_item.target_path.clone();
            let base_name = path.basename(&target_path);
            if base_name.is_empty() {
                continue;
            }
            let parent_path = path.dirname(&target_path);
            let ext = path.extname(&target_path);

            let sequence = start_at + step_by * index as i64;
            let rendered = sequence.to_string();
            let padded = if pad_width > 0 {
                pad_start(&rendered, pad_width as usize, &pad_string)
            } else {
                rendered
            };

            target_item.target_path =
                path.join(&[parent_path, &format!("{prefix}{padded}{suffix}{ext}")]);
        }

        Ok(())
    }
}

/// Left-pad `value` to `width` characters. The fill string repeats and is
/// truncated from the left, the same way `String.prototype.padStart` fills.
fn pad_start(value: &str, width: usize, fill: &str) -> String {
    let value_len = value.chars().count();
    if value_len >= width || fill.is_empty() {
        return value.to_string();
    }

    let needed = width - value_len;
    let mut padded: String = fill.chars().cycle().take(needed).collect();
    padded.push_str(value);
    padded
}
