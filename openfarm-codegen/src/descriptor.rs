//! Raw module descriptors and their validation boundary
//!
//! Deserialises module type / module instance records (JSON) into tagged
//! structs, applying the defaulting rules: missing `arguments` → empty
//! sequence, missing `inputs`/`outputs` → empty mapping, missing per-port
//! `categories` → the port-kind default (`actuators` for inputs, `sensors`
//! for outputs). Unknown fields are silently dropped for forward
//! compatibility.
//!
//! This layer performs no cross-referencing between types and instances —
//! that is [`crate::synth`]'s job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, CodegenResult};

// ── Categories ───────────────────────────────────────────────────────────────

/// Feature-group tag used to selectively enable ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sensors,
    Actuators,
    Calibration,
}

impl Category {
    /// Every category. Pruning with this set removes nothing.
    pub const ALL: [Category; 3] = [Category::Sensors, Category::Actuators, Category::Calibration];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sensors => "sensors",
            Category::Actuators => "actuators",
            Category::Calibration => "calibration",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sensors" => Ok(Category::Sensors),
            "actuators" => Ok(Category::Actuators),
            "calibration" => Ok(Category::Calibration),
            other => Err(CodegenError::validation(format!(
                "unknown category \"{other}\" (expected sensors, actuators or calibration)"
            ))),
        }
    }
}

fn default_input_categories() -> Vec<Category> {
    vec![Category::Actuators]
}

fn default_output_categories() -> Vec<Category> {
    vec![Category::Sensors]
}

// ── Argument specs and literal values ────────────────────────────────────────

/// Declared type of a constructor argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    Int,
    Float,
    Bool,
    Str,
}

impl ArgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Bool => "bool",
            ArgType::Str => "str",
        }
    }
}

/// A literal argument value supplied by a module instance.
///
/// Variant order matters for untagged deserialisation: `Bool` before the
/// numeric variants so JSON `true` stays a bool, `Int` before `Float` so
/// whole numbers stay integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ArgValue {
    /// Render this value as a literal in the generated source.
    ///
    /// Booleans are lowercased, strings double-quoted with escapes.
    pub fn render(&self) -> String {
        match self {
            ArgValue::Bool(b) => b.to_string(),
            ArgValue::Int(i) => i.to_string(),
            ArgValue::Float(f) => f.to_string(),
            ArgValue::Str(s) => format!("{s:?}"),
        }
    }
}

/// One entry of a module type's `arguments` sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub arg_type: Option<ArgType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default: Option<ArgValue>,
}

// ── Port specs ───────────────────────────────────────────────────────────────

/// Declared metadata for one input port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSpec {
    /// Message/payload type, e.g. `std_msgs/Bool`.
    #[serde(rename = "type")]
    pub payload_type: String,
    #[serde(default = "default_input_categories")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Declared metadata for one output port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Message/payload type, e.g. `std_msgs/Bool`.
    #[serde(rename = "type")]
    pub payload_type: String,
    #[serde(default = "default_output_categories")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub description: Option<String>,
    /// Maximum error of the output values.
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// Partial per-port override supplied by a module instance.
///
/// Instances may redefine individual attributes of a port their type
/// declares; fields left `None` fall through to the type's values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortOverride {
    #[serde(rename = "type", default)]
    pub payload_type: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

// ── External package references (pass-through) ───────────────────────────────

/// Source repository reference. Not interpreted by the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

// ── Module type ──────────────────────────────────────────────────────────────

/// A reusable driver/class definition for a sensor or actuator.
///
/// Keyed externally by an opaque id string; never mutated after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleType {
    /// Include target for generated code.
    pub header_file: String,
    /// The class instantiated once per module instance.
    pub class_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered constructor arguments. All entries with a `default` must
    /// appear after all entries without one.
    #[serde(default)]
    pub arguments: Vec<ArgSpec>,
    #[serde(default)]
    pub inputs: BTreeMap<String, InputSpec>,
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputSpec>,
    /// External package-manager id (pass-through).
    #[serde(default)]
    pub pio_id: Option<i64>,
    #[serde(default)]
    pub repository: Option<Repository>,
    /// External package references (pass-through).
    #[serde(default)]
    pub dependencies: Vec<serde_json::Value>,
}

impl ModuleType {
    /// Parse and validate a module type record from a JSON value.
    pub fn from_json(value: serde_json::Value) -> CodegenResult<Self> {
        let parsed: ModuleType =
            serde_json::from_value(value).map_err(CodegenError::validation)?;
        parsed.check_argument_order()?;
        Ok(parsed)
    }

    /// Parse and validate a module type record from a JSON string.
    pub fn from_json_str(s: &str) -> CodegenResult<Self> {
        let parsed: ModuleType = serde_json::from_str(s).map_err(CodegenError::validation)?;
        parsed.check_argument_order()?;
        Ok(parsed)
    }

    /// Arguments with defaults must all come after arguments without —
    /// later indices fill from defaults during synthesis.
    fn check_argument_order(&self) -> CodegenResult<()> {
        let mut seen_default = false;
        for arg in &self.arguments {
            if arg.default.is_some() {
                seen_default = true;
            } else if seen_default {
                return Err(CodegenError::validation(format!(
                    "argument \"{}\" without a default follows an argument with one",
                    arg.name
                )));
            }
        }
        Ok(())
    }
}

// ── Module instance ──────────────────────────────────────────────────────────

/// One concrete use of a [`ModuleType`].
///
/// Keyed externally by an opaque id string, unique within a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInstance {
    /// References a [`ModuleType`] id.
    #[serde(rename = "type")]
    pub type_id: String,
    /// Environment this peripheral acts on (pass-through; the generator
    /// ignores it).
    #[serde(default)]
    pub environment: Option<String>,
    /// Positional literal values for the type's constructor arguments.
    #[serde(default)]
    pub arguments: Vec<ArgValue>,
    /// Type-declared port name → instance-local port name override.
    #[serde(default)]
    pub mappings: BTreeMap<String, String>,
    /// Per-port attribute overrides; instance values win over the type's.
    #[serde(default)]
    pub inputs: BTreeMap<String, PortOverride>,
    #[serde(default)]
    pub outputs: BTreeMap<String, PortOverride>,
}

impl ModuleInstance {
    /// Parse a module instance record from a JSON value.
    pub fn from_json(value: serde_json::Value) -> CodegenResult<Self> {
        serde_json::from_value(value).map_err(CodegenError::validation)
    }

    /// Parse a module instance record from a JSON string.
    pub fn from_json_str(s: &str) -> CodegenResult<Self> {
        serde_json::from_str(s).map_err(CodegenError::validation)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
