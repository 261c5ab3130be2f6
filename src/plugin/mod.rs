pub mod builtins;
pub mod contract;
pub mod descriptor;
pub mod paths;
pub mod registry;
pub mod runner;

pub use registry::PluginRegistry;
