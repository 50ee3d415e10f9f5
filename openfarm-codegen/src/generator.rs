//! Code generator orchestrator
//!
//! Drives every plugin through the fixed emission sequence and assembles
//! the final `setup()`/`loop()` source file. The built-in [`Scaffold`]
//! plugin is always present, first in plugin order, and provides the core
//! device lifecycle: includes, object declarations, input callbacks,
//! output payload holders, `begin()` calls and the guarded per-output
//! handling blocks.
//!
//! Generation is a pure function of (resolved modules, ordered plugin
//! list) to an output string — no I/O, no shared state across calls.

use std::collections::BTreeSet;

use crate::error::CodegenResult;
use crate::plugin::Plugin;
use crate::synth::{ResolvedModule, ResolvedPort};
use crate::writer::CodeWriter;

/// Reserved words of the emission backend (Arduino C++).
///
/// Supplied to [`crate::synth::synthesize`] so instance ids that collide
/// get rewritten before any code references them.
pub const RESERVED_WORDS: &[&str] = &[
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char", "class",
    "const", "constexpr", "continue", "default", "delete", "do", "double", "else", "enum",
    "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if", "inline",
    "int", "long", "mutable", "namespace", "new", "noexcept", "not", "nullptr", "operator", "or",
    "private", "protected", "public", "register", "return", "short", "signed", "sizeof", "static",
    "struct", "switch", "template", "this", "throw", "true", "try", "typedef", "typeid",
    "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "while",
    // Arduino core globals
    "setup", "loop", "Serial", "String", "HIGH", "LOW", "INPUT", "OUTPUT",
];

/// Translate a payload type like `std_msgs/Bool` into the emitted C++
/// class name `std_msgs::Bool`.
pub(crate) fn cpp_type(payload_type: &str) -> String {
    payload_type.split('/').collect::<Vec<_>>().join("::")
}

/// Name of the global payload holder for one output port.
pub(crate) fn msg_name(module: &ResolvedModule, output_name: &str) -> String {
    format!("{}_{}_msg", module.id, output_name)
}

/// Name of the input callback bound to one input port.
pub(crate) fn callback_name(module: &ResolvedModule, input_name: &str) -> String {
    format!("{}_{}_callback", module.id, input_name)
}

// ── Orchestration ────────────────────────────────────────────────────────────

/// Generate the complete source file.
///
/// `modules` must already be synthesized and category-pruned; `plugins`
/// run after the implicit [`Scaffold`] in the order given. Any hook
/// failure aborts the call — a partially generated file is never valid
/// output.
pub fn generate(modules: &[ResolvedModule], plugins: &[Box<dyn Plugin>]) -> CodegenResult<String> {
    let scaffold = Scaffold;
    let mut chain: Vec<&dyn Plugin> = Vec::with_capacity(plugins.len() + 1);
    chain.push(&scaffold);
    for plugin in plugins {
        chain.push(plugin.as_ref());
    }

    let mut w = CodeWriter::new();

    // Includes: the union over all plugins, deduped and ordered.
    let mut deps = BTreeSet::new();
    for plugin in &chain {
        deps.extend(plugin.dependencies(modules));
    }
    for dep in &deps {
        w.writeln(&format!("#include <{dep}>"));
    }
    w.blank();

    // Global declarations, one block per plugin in order.
    for plugin in &chain {
        plugin.write_declarations(modules, &mut w)?;
    }
    w.blank();

    // setup(): plugin-global setup, then per-module hooks. Post-hooks run
    // in reverse registration order so the last plugin's setup nests
    // innermost.
    w.begin_block("void setup() {");
    for plugin in &chain {
        plugin.setup_plugin(modules, &mut w)?;
    }
    for module in modules {
        for plugin in &chain {
            plugin.pre_setup_module(module, &mut w)?;
        }
        for plugin in &chain {
            plugin.setup_module(module, &mut w)?;
        }
        for plugin in chain.iter().rev() {
            plugin.post_setup_module(module, &mut w)?;
        }
    }
    w.end_block("}")?;
    w.blank();

    // loop(): plugin-global update, per-module update, then per-output
    // handling for every resolved output.
    w.begin_block("void loop() {");
    for plugin in &chain {
        plugin.update_plugin(modules, &mut w)?;
    }
    for module in modules {
        for plugin in &chain {
            plugin.pre_update_module(module, &mut w)?;
        }
        for plugin in &chain {
            plugin.update_module(module, &mut w)?;
        }
        for plugin in chain.iter().rev() {
            plugin.post_update_module(module, &mut w)?;
        }
        for (output_name, port) in &module.outputs {
            for plugin in &chain {
                plugin.pre_output(module, output_name, port, &mut w)?;
            }
            for plugin in &chain {
                plugin.on_output(module, output_name, port, &mut w)?;
            }
            for plugin in chain.iter().rev() {
                plugin.post_output(module, output_name, port, &mut w)?;
            }
        }
    }
    w.end_block("}")?;

    Ok(w.into_string())
}

// ── Base plugin ──────────────────────────────────────────────────────────────

/// The built-in base plugin providing core device lifecycle codegen.
pub struct Scaffold;

impl Plugin for Scaffold {
    fn name(&self) -> &'static str {
        "scaffold"
    }

    /// One header per module type plus one per distinct payload type.
    fn dependencies(&self, modules: &[ResolvedModule]) -> BTreeSet<String> {
        let mut deps = BTreeSet::new();
        for module in modules {
            deps.insert(module.header_file.clone());
            for port in module.inputs.values().chain(module.outputs.values()) {
                deps.insert(format!("{}.h", port.payload_type));
            }
        }
        deps
    }

    fn write_declarations(
        &self,
        modules: &[ResolvedModule],
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        for module in modules {
            // The module object itself. No parens for a zero-argument
            // constructor — `Module m();` would declare a function.
            let args = module
                .arguments
                .iter()
                .map(|a| a.render())
                .collect::<Vec<_>>()
                .join(", ");
            let args = if args.is_empty() {
                String::new()
            } else {
                format!("({args})")
            };
            w.writeln(&format!("{} {}{};", module.class_name, module.id, args));

            // One callback binding per input port.
            for (input_name, port) in &module.inputs {
                w.begin_block(&format!(
                    "void {}(const {} &msg) {{",
                    callback_name(module, input_name),
                    cpp_type(&port.payload_type)
                ));
                w.writeln(&format!("{}.set_{}(msg);", module.id, input_name));
                w.end_block("}")?;
            }

            // One payload holder per output port.
            for (output_name, port) in &module.outputs {
                w.writeln(&format!(
                    "{} {};",
                    cpp_type(&port.payload_type),
                    msg_name(module, output_name)
                ));
            }
        }
        Ok(())
    }

    fn setup_module(&self, module: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        w.writeln(&format!("{}.begin();", module.id));
        Ok(())
    }

    fn update_module(&self, module: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        w.writeln(&format!("{}.update();", module.id));
        Ok(())
    }

    /// Open the "new data available" guard around output handling.
    fn pre_output(
        &self,
        module: &ResolvedModule,
        output_name: &str,
        _port: &ResolvedPort,
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        w.begin_block(&format!(
            "if ({}.get_{}({})) {{",
            module.id,
            output_name,
            msg_name(module, output_name)
        ));
        Ok(())
    }

    fn post_output(
        &self,
        _module: &ResolvedModule,
        _output_name: &str,
        _port: &ResolvedPort,
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        w.end_block("}")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
