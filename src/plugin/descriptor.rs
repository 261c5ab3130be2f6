use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, typed configuration knob a plugin may read.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PluginOption {
    pub name: String,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    #[serde(rename = "default")]
    pub default_value: OptionValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum OptionType {
    Boolean,
    Double,
    Integer,
    String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

/// Describes one transformation routine: identity, documentation, and the
/// options it declares. Built-in descriptors are bound to native routines in
/// the registry; descriptors loaded from config resolve against that table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PluginDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: Vec<PluginOption>,
}

impl PluginOption {
    pub fn new(
        name: impl Into<String>,
        option_type: OptionType,
        default_value: OptionValue,
    ) -> Self {
        Self {
            name: name.into(),
            option_type,
            default_value,
        }
    }
}

impl OptionValue {
    /// Convert this value to the declared option type, or `None` if the
    /// value does not fit. Exact matches pass through; strings parse to the
    /// scalar types (overrides arrive as strings from the CLI, and the
    /// boolean-valued-string convention dates back to the script plugins).
    pub fn coerce(&self, option_type: OptionType) -> Option<OptionValue> {
        match (self, option_type) {
            (OptionValue::Boolean(_), OptionType::Boolean)
            | (OptionValue::Integer(_), OptionType::Integer)
            | (OptionValue::Double(_), OptionType::Double)
            | (OptionValue::String(_), OptionType::String) => Some(self.clone()),
            (OptionValue::Integer(value), OptionType::Double) => {
                Some(OptionValue::Double(*value as f64))
            }
            (OptionValue::String(text), OptionType::Boolean) => {
                text.trim().parse().ok().map(OptionValue::Boolean)
            }
            (OptionValue::String(text), OptionType::Integer) => {
                text.trim().parse().ok().map(OptionValue::Integer)
            }
            (OptionValue::String(text), OptionType::Double) => {
                text.trim().parse().ok().map(OptionValue::Double)
            }
            _ => None,
        }
    }

    /// Short human-readable rendering for error messages.
    pub fn describe(&self) -> String {
        match self {
            OptionValue::Boolean(value) => value.to_string(),
            OptionValue::Integer(value) => value.to_string(),
            OptionValue::Double(value) => value.to_string(),
            OptionValue::String(text) => format!("\"{text}\""),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OptionType::Boolean => "Boolean",
            OptionType::Double => "Double",
            OptionType::Integer => "Integer",
            OptionType::String => "String",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_types_pass_through() {
        assert_eq!(
            OptionValue::Boolean(true).coerce(OptionType::Boolean),
            Some(OptionValue::Boolean(true))
        );
        assert_eq!(
            OptionValue::Integer(3).coerce(OptionType::Integer),
            Some(OptionValue::Integer(3))
        );
    }

    #[test]
    fn strings_parse_to_scalars() {
        assert_eq!(
            OptionValue::String("true".into()).coerce(OptionType::Boolean),
            Some(OptionValue::Boolean(true))
        );
        assert_eq!(
            OptionValue::String("42".into()).coerce(OptionType::Integer),
            Some(OptionValue::Integer(42))
        );
        assert_eq!(
            OptionValue::String("1.5".into()).coerce(OptionType::Double),
            Some(OptionValue::Double(1.5))
        );
    }

    #[test]
    fn integer_widens_to_double() {
        assert_eq!(
            OptionValue::Integer(2).coerce(OptionType::Double),
            Some(OptionValue::Double(2.0))
        );
    }

    #[test]
    fn mismatches_are_rejected() {
        assert_eq!(OptionValue::Boolean(true).coerce(OptionType::Integer), None);
        assert_eq!(
            OptionValue::String("maybe".into()).coerce(OptionType::Boolean),
            None
        );
        assert_eq!(OptionValue::Double(1.5).coerce(OptionType::Integer), None);
    }

    #[test]
    fn descriptor_round_trips_through_toml() {
        let descriptor = PluginDescriptor {
            id: "test-id".into(),
            name: "Test".into(),
            description: "A test plugin.".into(),
            options: vec![
                PluginOption::new("startAt", OptionType::Integer, OptionValue::Integer(1)),
                PluginOption::new(
                    "includeName",
                    OptionType::Boolean,
                    OptionValue::Boolean(true),
                ),
            ],
        };
        let raw = toml::to_string(&descriptor).unwrap();
        let parsed: PluginDescriptor = toml::from_str(&raw).unwrap();
        assert_eq!(parsed, descriptor);
    }
}
