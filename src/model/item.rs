/// One source/target path pair under transformation.
///
/// Identity is positional: item *i* in the source list always corresponds to
/// item *i* in the target list. A batch is an ordered `Vec<Item>`; plugins
/// only ever rewrite `target_path` fields, never the order or the length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub source_path: String,
    pub target_path: String,
    pub item_type: ItemType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    File,
    Directory,
    Unknown,
}

impl Item {
    /// A fresh item whose target starts out equal to its source.
    pub fn new(path: impl Into<String>, item_type: ItemType) -> Self {
        let source_path = path.into();
        Self {
            target_path: source_path.clone(),
            source_path,
            item_type,
        }
    }
}

impl ItemType {
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::File => "file",
            ItemType::Directory => "dir",
            ItemType::Unknown => "?",
        }
    }
}
