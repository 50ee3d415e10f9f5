//! OpenFarm Codegen — module descriptors to embedded firmware source
//!
//! This library takes declarative "module type" descriptors (sensor and
//! actuator drivers) and "module instance" descriptors (their concrete
//! wiring) and deterministically emits a single `setup()`/`loop()` source
//! file for an embedded toolchain:
//!
//! - **Descriptors** — JSON records validated into tagged structs (see
//!   [`descriptor`])
//! - **Synthesis** — instance + type merged into a fully-resolved module,
//!   with argument defaulting/coercion, port-name mappings and category
//!   pruning (see [`synth`])
//! - **Generation** — an ordered plugin chain writes code fragments into
//!   an indentation-tracked writer (see [`generator`], [`plugin`],
//!   [`plugins`])
//!
//! The core performs no I/O and never logs; every failure aborts the
//! generation call with a [`CodegenError`].
//!
//! # Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use openfarm_codegen::{
//!     generate, plugin_by_name, prune, synthesize, Category, ModuleInstance, ModuleType,
//!     RESERVED_WORDS,
//! };
//!
//! let mut types = BTreeMap::new();
//! types.insert(
//!     "grow_light".to_string(),
//!     ModuleType::from_json_str(
//!         r#"{
//!             "header_file": "grow_light.h",
//!             "class_name": "GrowLight",
//!             "arguments": [{"name": "pin", "type": "int"}],
//!             "outputs": {"is_on": {"type": "std_msgs/Bool"}}
//!         }"#,
//!     )
//!     .unwrap(),
//! );
//!
//! let mut instances = BTreeMap::new();
//! instances.insert(
//!     "light_1".to_string(),
//!     ModuleInstance::from_json_str(r#"{"type": "grow_light", "arguments": [13]}"#).unwrap(),
//! );
//!
//! let mut modules = synthesize(&instances, &types, RESERVED_WORDS).unwrap();
//! prune(&mut modules, &[Category::Sensors, Category::Actuators]);
//!
//! let plugins = vec![plugin_by_name("csv").unwrap()];
//! let source = generate(&modules, &plugins).unwrap();
//! assert!(source.contains("GrowLight light_1(13);"));
//! assert!(source.contains("void setup() {"));
//! ```

pub mod descriptor;
pub mod error;
pub mod generator;
pub mod plugin;
pub mod plugins;
pub mod synth;
pub mod writer;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use descriptor::{
    ArgSpec, ArgType, ArgValue, Category, InputSpec, ModuleInstance, ModuleType, OutputSpec,
    PortOverride, Repository,
};
pub use error::{CodegenError, CodegenResult};
pub use generator::{generate, Scaffold, RESERVED_WORDS};
pub use plugin::Plugin;
pub use plugins::{plugin_by_name, CsvPlugin, RosPlugin};
pub use synth::{prune, sanitize_identifier, synthesize, ResolvedModule, ResolvedPort};
pub use writer::CodeWriter;
