use crate::plugin::descriptor::OptionType;

/// Errors produced by the plugin engine. Everything here surfaces to the
/// user verbatim; nothing is retried or recovered.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("the number of target paths {lines} does not match the number of items {items}")]
    CountMismatch { lines: usize, items: usize },

    #[error("plugin {name} failed: {source}")]
    Plugin {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("option {name} expects a {expected} value, got {supplied}")]
    OptionType {
        name: String,
        expected: OptionType,
        supplied: String,
    },

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("missing option: {0}")]
    MissingOption(String),

    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),

    #[error("plugin {0} has no native implementation")]
    UnsupportedPlugin(String),
}
