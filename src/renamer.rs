use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Result, bail};
use uuid::Uuid;

use crate::model::item::Item;

const IS_WINDOWS: bool = cfg!(target_os = "windows");

/// Apply a finished batch to disk. Returns the number of rename operations
/// performed (conflict resolution counts its intermediate hops).
///
/// Validation runs to completion before the first rename: duplicated source
/// or target paths, missing sources, and already-existing targets are all
/// rejected up front. Targets that collide with another item's source are
/// legal; such items first move to a UUID-named temporary sibling and reach
/// their real target in a second pass, so swaps and rotations work.
pub fn rename_items(items: &[Item]) -> Result<usize> {
    let items: Vec<&Item> = items
        .iter()
        .filter(|item| item.source_path != item.target_path)
        .collect();
    if items.is_empty() {
        return Ok(0);
    }

    let mut source_path_set: HashSet<&str> = HashSet::new();
    for item in &items {
        if !source_path_set.insert(item.source_path.as_str()) {
            bail!("source path {} is duplicated", item.source_path);
        }
    }
    let mut target_path_set: HashSet<&str> = HashSet::new();
    for item in &items {
        if !target_path_set.insert(item.target_path.as_str()) {
            bail!("target path {} is duplicated", item.target_path);
        }
    }

    for item in &items {
        let source_path = Path::new(&item.source_path);
        if !source_path.exists() {
            bail!("source path {} does not exist", source_path.display());
        }
        let target_path = Path::new(&item.target_path);
        // A target may exist when it is another item's source (swap), or on
        // Windows when only the letter case changes.
        if target_path.exists()
            && !source_path_set.contains(item.target_path.as_str())
            && (!IS_WINDOWS
                || item.source_path.to_lowercase() != item.target_path.to_lowercase())
        {
            bail!("target path {} exists", target_path.display());
        }
    }

    let mut pass_1: Vec<(String, String)> = Vec::new();
    let mut pass_2: Vec<(String, String)> = Vec::new();
    for item in &items {
        if source_path_set.contains(item.target_path.as_str()) {
            let Some(parent_path) = Path::new(&item.target_path).parent() else {
                bail!("target path {} cannot be resolved", item.target_path);
            };
            let temp_path = parent_path.join(Uuid::new_v4().to_string());
            let Some(temp_path) = temp_path.to_str() else {
                bail!("target path {} cannot be resolved", item.target_path);
            };
            pass_1.push((item.source_path.clone(), temp_path.to_string()));
            pass_2.push((temp_path.to_string(), item.target_path.clone()));
        } else {
            pass_1.push((item.source_path.clone(), item.target_path.clone()));
        }
    }

    let mut count = 0;
    for (source, target) in pass_1.iter().chain(pass_2.iter()) {
        let target_path = Path::new(target);
        if let Some(parent_path) = target_path.parent()
            && !parent_path.as_os_str().is_empty()
            && !parent_path.exists()
        {
            fs::create_dir_all(parent_path)?;
        }
        tracing::debug!(%source, %target, "rename");
        fs::rename(source, target_path)?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::ItemType;
    use std::fs;
    use std::path::Path;

    fn item(dir: &Path, source: &str, target: &str) -> Item {
        let mut item = Item::new(dir.join(source).to_str().unwrap(), ItemType::File);
        item.target_path = dir.join(target).to_str().unwrap().to_string();
        item
    }

    #[test]
    fn renames_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let items = vec![
            item(dir.path(), "a.txt", "one.txt"),
            item(dir.path(), "b.txt", "two.txt"),
        ];
        assert_eq!(rename_items(&items).unwrap(), 2);
        assert_eq!(fs::read_to_string(dir.path().join("one.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dir.path().join("two.txt")).unwrap(), "b");
        assert!(!dir.path().join("a.txt").exists());
    }

    #[test]
    fn unchanged_items_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let items = vec![item(dir.path(), "a.txt", "a.txt")];
        assert_eq!(rename_items(&items).unwrap(), 0);
        assert!(dir.path().join("a.txt").exists());
    }

    #[test]
    fn swapping_two_files_goes_through_temporaries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let items = vec![
            item(dir.path(), "a.txt", "b.txt"),
            item(dir.path(), "b.txt", "a.txt"),
        ];
        // Each file hops through a temporary: four renames in total.
        assert_eq!(rename_items(&items).unwrap(), 4);
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "b");
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "a");
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let items = vec![item(dir.path(), "a.txt", "nested/deeper/a.txt")];
        assert_eq!(rename_items(&items).unwrap(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("nested/deeper/a.txt")).unwrap(),
            "a"
        );
    }

    #[test]
    fn duplicate_target_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let items = vec![
            item(dir.path(), "a.txt", "same.txt"),
            item(dir.path(), "b.txt", "same.txt"),
        ];
        let err = rename_items(&items).unwrap_err();
        assert!(err.to_string().contains("duplicated"));
        // Nothing moved.
        assert!(dir.path().join("a.txt").exists());
        assert!(dir.path().join("b.txt").exists());
    }

    #[test]
    fn missing_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let items = vec![item(dir.path(), "ghost.txt", "real.txt")];
        let err = rename_items(&items).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn existing_unrelated_target_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("taken.txt"), "t").unwrap();

        let items = vec![item(dir.path(), "a.txt", "taken.txt")];
        let err = rename_items(&items).unwrap_err();
        assert!(err.to_string().contains("exists"));
        assert_eq!(
            fs::read_to_string(dir.path().join("taken.txt")).unwrap(),
            "t"
        );
    }
}
