//! Synthesis resolver
//!
//! Merges each module instance with its module type into a fully-resolved
//! module: constructor arguments are coerced and default-filled, port
//! metadata is overlaid with instance overrides and name mappings, and the
//! instance id is rewritten into a legal identifier for the emission
//! backend. Category pruning is a separate, later pass so that category
//! selection can be re-applied without re-resolving arguments.

use std::collections::BTreeMap;

use crate::descriptor::{
    ArgSpec, ArgType, ArgValue, Category, InputSpec, ModuleInstance, ModuleType, OutputSpec,
    PortOverride, Repository,
};
use crate::error::{CodegenError, CodegenResult};

// ── Resolved structures ──────────────────────────────────────────────────────

/// Fully-resolved metadata for one port of a synthesized module.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPort {
    /// Message/payload type, e.g. `std_msgs/Bool`.
    pub payload_type: String,
    /// The instance mapping for this port if present, else the port's own
    /// name. Assigned independent of categories.
    pub mapped_name: String,
    pub categories: Vec<Category>,
    pub description: Option<String>,
    pub accuracy: Option<f64>,
}

/// The result of merging a module instance with its module type.
///
/// Created fresh per generation run and discarded after code emission.
#[derive(Debug, Clone)]
pub struct ResolvedModule {
    /// Identifier used in emitted code — the instance id, `_`-prefixed if
    /// it collides with a reserved word or starts with a digit.
    pub id: String,
    pub type_id: String,
    pub header_file: String,
    pub class_name: String,
    /// Exactly as many entries as the type declares, coerced literals.
    pub arguments: Vec<ArgValue>,
    pub inputs: BTreeMap<String, ResolvedPort>,
    pub outputs: BTreeMap<String, ResolvedPort>,
    /// Pass-through package references from the type.
    pub repository: Option<Repository>,
    pub dependencies: Vec<serde_json::Value>,
}

// ── Identifier resolution ────────────────────────────────────────────────────

/// Rewrite `raw` into a legal identifier for the emission backend.
///
/// The reserved-word set is supplied by the backend (see
/// [`crate::generator::RESERVED_WORDS`]); ids that collide with it or
/// start with a digit get a `_` prefix.
pub fn sanitize_identifier(raw: &str, reserved_words: &[&str]) -> String {
    let starts_with_digit = raw.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit || reserved_words.contains(&raw) {
        format!("_{raw}")
    } else {
        raw.to_string()
    }
}

// ── Synthesis ────────────────────────────────────────────────────────────────

/// Merge every instance with its type, in the iteration order of
/// `instances`.
///
/// Fails with [`CodegenError::UnknownType`] when an instance references a
/// type id absent from `types`; argument errors carry the module id and
/// both counts.
pub fn synthesize(
    instances: &BTreeMap<String, ModuleInstance>,
    types: &BTreeMap<String, ModuleType>,
    reserved_words: &[&str],
) -> CodegenResult<Vec<ResolvedModule>> {
    let mut resolved = Vec::with_capacity(instances.len());
    for (id, instance) in instances {
        let ty = types
            .get(&instance.type_id)
            .ok_or_else(|| CodegenError::UnknownType {
                module: id.clone(),
                type_id: instance.type_id.clone(),
            })?;
        resolved.push(synthesize_one(id, instance, ty, reserved_words)?);
    }
    Ok(resolved)
}

fn synthesize_one(
    id: &str,
    instance: &ModuleInstance,
    ty: &ModuleType,
    reserved_words: &[&str],
) -> CodegenResult<ResolvedModule> {
    let arguments = resolve_arguments(id, &instance.arguments, &ty.arguments)?;

    let inputs = ty
        .inputs
        .iter()
        .map(|(name, spec)| {
            let port = resolve_input(name, spec, instance.inputs.get(name), &instance.mappings);
            (name.clone(), port)
        })
        .collect();
    let outputs = ty
        .outputs
        .iter()
        .map(|(name, spec)| {
            let port = resolve_output(name, spec, instance.outputs.get(name), &instance.mappings);
            (name.clone(), port)
        })
        .collect();

    Ok(ResolvedModule {
        id: sanitize_identifier(id, reserved_words),
        type_id: instance.type_id.clone(),
        header_file: ty.header_file.clone(),
        class_name: ty.class_name.clone(),
        arguments,
        inputs,
        outputs,
        repository: ty.repository.clone(),
        dependencies: ty.dependencies.clone(),
    })
}

// ── Argument resolution ──────────────────────────────────────────────────────

fn resolve_arguments(
    id: &str,
    supplied: &[ArgValue],
    specs: &[ArgSpec],
) -> CodegenResult<Vec<ArgValue>> {
    if supplied.len() > specs.len() {
        return Err(CodegenError::TooManyArguments {
            module: id.to_string(),
            supplied: supplied.len(),
            expected: specs.len(),
        });
    }
    let mut out = Vec::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        let value = match supplied.get(i).or(spec.default.as_ref()) {
            Some(v) => coerce_argument(id, i, v, spec)?,
            None => {
                return Err(CodegenError::MissingArgument {
                    module: id.to_string(),
                    supplied: supplied.len(),
                    expected: specs.len(),
                });
            }
        };
        out.push(value);
    }
    Ok(out)
}

/// Coerce one literal against the declared argument type.
///
/// This is the single canonical coercion point — no caller sees
/// un-coerced values. Untyped arguments pass through unchanged.
fn coerce_argument(
    id: &str,
    index: usize,
    value: &ArgValue,
    spec: &ArgSpec,
) -> CodegenResult<ArgValue> {
    let Some(arg_type) = spec.arg_type else {
        return Ok(value.clone());
    };
    let coerced = match (arg_type, value) {
        (ArgType::Int, ArgValue::Int(i)) => Some(ArgValue::Int(*i)),
        (ArgType::Int, ArgValue::Str(s)) => s.parse::<i64>().ok().map(ArgValue::Int),
        (ArgType::Float, ArgValue::Float(f)) => Some(ArgValue::Float(*f)),
        (ArgType::Float, ArgValue::Int(i)) => Some(ArgValue::Float(*i as f64)),
        (ArgType::Float, ArgValue::Str(s)) => s.parse::<f64>().ok().map(ArgValue::Float),
        (ArgType::Bool, ArgValue::Bool(b)) => Some(ArgValue::Bool(*b)),
        (ArgType::Bool, ArgValue::Str(s)) => match s.to_lowercase().as_str() {
            "true" => Some(ArgValue::Bool(true)),
            "false" => Some(ArgValue::Bool(false)),
            _ => None,
        },
        (ArgType::Str, ArgValue::Str(s)) => Some(ArgValue::Str(s.clone())),
        (ArgType::Str, ArgValue::Int(i)) => Some(ArgValue::Str(i.to_string())),
        (ArgType::Str, ArgValue::Float(f)) => Some(ArgValue::Str(f.to_string())),
        (ArgType::Str, ArgValue::Bool(b)) => Some(ArgValue::Str(b.to_string())),
        _ => None,
    };
    coerced.ok_or_else(|| {
        CodegenError::validation(format!(
            "module \"{id}\": argument {index} (\"{}\") expects type {}, got {:?}",
            spec.name,
            arg_type.as_str(),
            value
        ))
    })
}

// ── Port resolution ──────────────────────────────────────────────────────────

fn mapped_name(name: &str, mappings: &BTreeMap<String, String>) -> String {
    mappings.get(name).cloned().unwrap_or_else(|| name.to_string())
}

fn resolve_input(
    name: &str,
    spec: &InputSpec,
    over: Option<&PortOverride>,
    mappings: &BTreeMap<String, String>,
) -> ResolvedPort {
    let over = over.cloned().unwrap_or_default();
    ResolvedPort {
        payload_type: over.payload_type.unwrap_or_else(|| spec.payload_type.clone()),
        mapped_name: mapped_name(name, mappings),
        categories: over.categories.unwrap_or_else(|| spec.categories.clone()),
        description: over.description.or_else(|| spec.description.clone()),
        accuracy: over.accuracy,
    }
}

fn resolve_output(
    name: &str,
    spec: &OutputSpec,
    over: Option<&PortOverride>,
    mappings: &BTreeMap<String, String>,
) -> ResolvedPort {
    let over = over.cloned().unwrap_or_default();
    ResolvedPort {
        payload_type: over.payload_type.unwrap_or_else(|| spec.payload_type.clone()),
        mapped_name: mapped_name(name, mappings),
        categories: over.categories.unwrap_or_else(|| spec.categories.clone()),
        description: over.description.or_else(|| spec.description.clone()),
        accuracy: over.accuracy.or(spec.accuracy),
    }
}

// ── Category pruning ─────────────────────────────────────────────────────────

/// Remove every port whose category set has no overlap with
/// `enabled_categories`. Idempotent; pruning with [`Category::ALL`]
/// removes nothing.
pub fn prune(modules: &mut [ResolvedModule], enabled_categories: &[Category]) {
    let keep = |port: &ResolvedPort| {
        port.categories
            .iter()
            .any(|c| enabled_categories.contains(c))
    };
    for module in modules {
        module.inputs.retain(|_, p| keep(p));
        module.outputs.retain(|_, p| keep(p));
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
