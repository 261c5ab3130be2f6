use crate::error::EngineError;
use crate::plugin::builtins::{DotCase, ToLowerCase, ToSequence, ToUpperCase};
use crate::plugin::contract::Plugin;
use crate::plugin::descriptor::{OptionType, OptionValue, PluginDescriptor, PluginOption};

/// A descriptor bound to its native routine.
pub struct RegisteredPlugin {
    descriptor: PluginDescriptor,
    routine: Box<dyn Plugin>,
}

impl RegisteredPlugin {
    pub fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    pub fn routine(&self) -> &dyn Plugin {
        self.routine.as_ref()
    }
}

/// The closed table of built-in plugins: id → native implementation,
/// constructed once at startup and never mutated afterwards.
pub struct PluginRegistry {
    plugins: Vec<RegisteredPlugin>,
}

impl PluginRegistry {
    pub fn built_in() -> Self {
        let plugins = vec![
            RegisteredPlugin {
                descriptor: PluginDescriptor {
                    id: "4eec0c65-8267-4824-a8c0-1851b9858a81".to_string(),
                    name: "Dot.Case".to_string(),
                    description: "Capitalize every word of the file name and replace special \
                                  characters with a given separator. The default separator is dot."
                        .to_string(),
                    options: vec![PluginOption::new(
                        "separator",
                        OptionType::String,
                        OptionValue::String(".".to_string()),
                    )],
                },
                routine: Box::new(DotCase),
            },
            RegisteredPlugin {
                descriptor: PluginDescriptor {
                    id: "7c857ca3-d26e-45bb-adf7-a1800f3691b1".to_string(),
                    name: "To lower case".to_string(),
                    description: "Convert all characters of the file name to lowercase."
                        .to_string(),
                    options: case_options(),
                },
                routine: Box::new(ToLowerCase),
            },
            RegisteredPlugin {
                descriptor: PluginDescriptor {
                    id: "2dd17cfc-ecb3-4aad-bcbb-c8f59cf3dfe3".to_string(),
                    name: "To Sequence".to_string(),
                    description: "Convert the file name to a sequence with prefix and suffix."
                        .to_string(),
                    options: vec![
                        PluginOption::new(
                            "prefix",
                            OptionType::String,
                            OptionValue::String(String::new()),
                        ),
                        PluginOption::new(
                            "suffix",
                            OptionType::String,
                            OptionValue::String(String::new()),
                        ),
                        PluginOption::new("startAt", OptionType::Integer, OptionValue::Integer(1)),
                        PluginOption::new("stepBy", OptionType::Integer, OptionValue::Integer(1)),
                        PluginOption::new("padStart", OptionType::Integer, OptionValue::Integer(2)),
                        PluginOption::new(
                            "padString",
                            OptionType::String,
                            OptionValue::String("0".to_string()),
                        ),
                    ],
                },
                routine: Box::new(ToSequence),
            },
            RegisteredPlugin {
                descriptor: PluginDescriptor {
                    id: "afa82b1a-43de-439e-9f47-b6a666e40511".to_string(),
                    name: "To UPPER CASE".to_string(),
                    description: "Convert all characters of the file name to uppercase."
                        .to_string(),
                    options: case_options(),
                },
                routine: Box::new(ToUpperCase),
            },
        ];

        Self { plugins }
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.plugins.iter().map(RegisteredPlugin::descriptor)
    }

    /// Look a plugin up by exact id, or by name ignoring case.
    pub fn find(&self, key: &str) -> Option<&RegisteredPlugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.descriptor.id == key)
            .or_else(|| {
                self.plugins
                    .iter()
                    .find(|plugin| plugin.descriptor.name.eq_ignore_ascii_case(key))
            })
    }

    /// Resolve a descriptor (typically loaded from config) to its native
    /// routine. Descriptors with no native counterpart are script plugins
    /// this build does not execute.
    pub fn routine_for(&self, descriptor: &PluginDescriptor) -> Result<&dyn Plugin, EngineError> {
        self.plugins
            .iter()
            .find(|plugin| {
                plugin.descriptor.id == descriptor.id || plugin.descriptor.name == descriptor.name
            })
            .map(RegisteredPlugin::routine)
            .ok_or_else(|| EngineError::UnsupportedPlugin(descriptor.name.clone()))
    }
}

fn case_options() -> Vec<PluginOption> {
    vec![
        PluginOption::new(
            "includeName",
            OptionType::Boolean,
            OptionValue::Boolean(true),
        ),
        PluginOption::new(
            "includeExtension",
            OptionType::Boolean,
            OptionValue::Boolean(false),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_built_ins() {
        let registry = PluginRegistry::built_in();
        assert_eq!(registry.plugin_count(), 4);

        let names: Vec<&str> = registry
            .descriptors()
            .map(|descriptor| descriptor.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Dot.Case", "To lower case", "To Sequence", "To UPPER CASE"]
        );
    }

    #[test]
    fn find_by_id_and_by_name() {
        let registry = PluginRegistry::built_in();
        let by_id = registry.find("2dd17cfc-ecb3-4aad-bcbb-c8f59cf3dfe3").unwrap();
        assert_eq!(by_id.descriptor().name, "To Sequence");

        let by_name = registry.find("to sequence").unwrap();
        assert_eq!(by_name.descriptor().id, by_id.descriptor().id);

        assert!(registry.find("No Such Plugin").is_none());
    }

    #[test]
    fn script_descriptor_has_no_routine() {
        let registry = PluginRegistry::built_in();
        let descriptor = PluginDescriptor {
            id: "custom".to_string(),
            name: "User Script".to_string(),
            description: String::new(),
            options: Vec::new(),
        };
        assert!(matches!(
            registry.routine_for(&descriptor),
            Err(EngineError::UnsupportedPlugin(name)) if name == "User Script"
        ));
    }

    #[test]
    fn every_descriptor_resolves_to_its_routine() {
        let registry = PluginRegistry::built_in();
        let descriptors: Vec<PluginDescriptor> = registry.descriptors().cloned().collect();
        for descriptor in &descriptors {
            assert!(registry.routine_for(descriptor).is_ok());
        }
    }
}
