//! Plugin extension protocol
//!
//! A [`Plugin`] contributes code fragments at fixed points of the emission
//! sequence. Every hook defaults to a no-op so a plugin implements only
//! the points it cares about; the orchestrator calls all of them
//! unconditionally on every plugin and owns the ordering guarantees (see
//! [`crate::generator::generate`]).
//!
//! Plugins are stateless with respect to the writer: they receive the
//! writer and the synthesized module context and write fragments directly.
//! They must not re-derive anything from raw type/instance data.

use std::collections::BTreeSet;

use crate::error::CodegenResult;
use crate::synth::{ResolvedModule, ResolvedPort};
use crate::writer::CodeWriter;

/// A code-emitting extension.
///
/// A hook that cannot support a requested construct (e.g. a payload type
/// the protocol cannot serialize) returns a fatal
/// [`crate::error::CodegenError::UnsupportedPayload`], aborting the whole
/// generation run.
pub trait Plugin {
    /// Registry name, used in error messages.
    fn name(&self) -> &'static str;

    /// Header files this plugin's generated code requires.
    fn dependencies(&self, modules: &[ResolvedModule]) -> BTreeSet<String> {
        let _ = modules;
        BTreeSet::new()
    }

    /// Global-scope declarations required by this plugin.
    fn write_declarations(
        &self,
        modules: &[ResolvedModule],
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        let _ = (modules, w);
        Ok(())
    }

    /// Statements that set up plugin-global state, at the top of `setup()`.
    fn setup_plugin(&self, modules: &[ResolvedModule], w: &mut CodeWriter) -> CodegenResult<()> {
        let _ = (modules, w);
        Ok(())
    }

    /// Statements placed right before `module` is set up.
    fn pre_setup_module(&self, module: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        let _ = (module, w);
        Ok(())
    }

    /// Statements that set up `module`.
    fn setup_module(&self, module: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        let _ = (module, w);
        Ok(())
    }

    /// Statements placed right after `module` is set up.
    /// Runs in reverse plugin order so effects nest like a stack.
    fn post_setup_module(&self, module: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        let _ = (module, w);
        Ok(())
    }

    /// Statements that update plugin-global state, once per tick at the
    /// top of `loop()`.
    fn update_plugin(&self, modules: &[ResolvedModule], w: &mut CodeWriter) -> CodegenResult<()> {
        let _ = (modules, w);
        Ok(())
    }

    /// Statements placed right before `module` is updated.
    fn pre_update_module(&self, module: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        let _ = (module, w);
        Ok(())
    }

    /// Statements that update `module` each tick.
    fn update_module(&self, module: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        let _ = (module, w);
        Ok(())
    }

    /// Statements placed right after `module` is updated.
    /// Runs in reverse plugin order.
    fn post_update_module(&self, module: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        let _ = (module, w);
        Ok(())
    }

    /// Statements placed right before an output message on
    /// `module`/`output_name` is processed.
    fn pre_output(
        &self,
        module: &ResolvedModule,
        output_name: &str,
        port: &ResolvedPort,
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        let _ = (module, output_name, port, w);
        Ok(())
    }

    /// Statements that handle an output message on `module`/`output_name`.
    fn on_output(
        &self,
        module: &ResolvedModule,
        output_name: &str,
        port: &ResolvedPort,
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        let _ = (module, output_name, port, w);
        Ok(())
    }

    /// Statements placed right after an output message on
    /// `module`/`output_name` is processed. Runs in reverse plugin order.
    fn post_output(
        &self,
        module: &ResolvedModule,
        output_name: &str,
        port: &ResolvedPort,
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        let _ = (module, output_name, port, w);
        Ok(())
    }
}
