use std::collections::BTreeMap;

use anyhow::Result;

use crate::error::EngineError;
use crate::plugin::descriptor::{OptionType, OptionValue, PluginOption};
use crate::plugin::paths::PathModule;

/// Read-only view of one source entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub source_path: String,
}

/// One mutable target entry. Plugins reassign `target_path` in place; the
/// surrounding slice fixes length and order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetItem {
    pub target_path: String,
}

/// The capability bundle handed to a transformation routine: its sole
/// interface to host state. Sources are read-only, targets are mutable in
/// place, and both slices are parallel and equal-length by construction.
pub struct Bundle<'a> {
    pub source_items: &'a [SourceItem],
    pub target_items: &'a mut [TargetItem],
    pub options: &'a OptionValues,
    pub path: &'a PathModule,
}

/// A native transformation routine. The effect of `apply` is observed purely
/// through in-place mutation of `bundle.target_items`.
pub trait Plugin {
    fn apply(&self, bundle: Bundle<'_>) -> Result<()>;
}

impl<F> Plugin for F
where
    F: for<'a> Fn(Bundle<'a>) -> Result<()>,
{
    fn apply(&self, bundle: Bundle<'_>) -> Result<()> {
        self(bundle)
    }
}

/// Option values for one invocation: declared defaults merged with caller
/// overrides, immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionValues(BTreeMap<String, OptionValue>);

impl OptionValues {
    /// Merge declared options with overrides. Every override must name a
    /// declared option and fit its declared type (after string coercion);
    /// anything else is rejected before the plugin runs.
    pub fn merge(
        declared: &[PluginOption],
        overrides: &BTreeMap<String, OptionValue>,
    ) -> Result<Self, EngineError> {
        for name in overrides.keys() {
            if !declared.iter().any(|option| option.name == *name) {
                return Err(EngineError::UnknownOption(name.clone()));
            }
        }

        let mut values = BTreeMap::new();
        for option in declared {
            let value = match overrides.get(&option.name) {
                Some(supplied) => supplied.coerce(option.option_type).ok_or_else(|| {
                    EngineError::OptionType {
                        name: option.name.clone(),
                        expected: option.option_type,
                        supplied: supplied.describe(),
                    }
                })?,
                None => option.default_value.clone(),
            };
            values.insert(option.name.clone(), value);
        }

        Ok(Self(values))
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, EngineError> {
        match self.require(name)? {
            OptionValue::Boolean(value) => Ok(*value),
            other => Err(self.type_error(name, OptionType::Boolean, other)),
        }
    }

    pub fn get_integer(&self, name: &str) -> Result<i64, EngineError> {
        match self.require(name)? {
            OptionValue::Integer(value) => Ok(*value),
            other => Err(self.type_error(name, OptionType::Integer, other)),
        }
    }

    pub fn get_double(&self, name: &str) -> Result<f64, EngineError> {
        match self.require(name)? {
            OptionValue::Double(value) => Ok(*value),
            OptionValue::Integer(value) => Ok(*value as f64),
            other => Err(self.type_error(name, OptionType::Double, other)),
        }
    }

    pub fn get_string(&self, name: &str) -> Result<&str, EngineError> {
        match self.require(name)? {
            OptionValue::String(text) => Ok(text),
            other => Err(self.type_error(name, OptionType::String, other)),
        }
    }

    fn require(&self, name: &str) -> Result<&OptionValue, EngineError> {
        self.0
            .get(name)
            .ok_or_else(|| EngineError::MissingOption(name.to_string()))
    }

    fn type_error(&self, name: &str, expected: OptionType, supplied: &OptionValue) -> EngineError {
        EngineError::OptionType {
            name: name.to_string(),
            expected,
            supplied: supplied.describe(),
        }
    }
}
