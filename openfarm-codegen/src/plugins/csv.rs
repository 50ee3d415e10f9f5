//! Line-oriented serial CSV protocol plugin
//!
//! Each tick, if a line is available on the serial transport, parses a
//! `module,port,value` triple and dispatches a typed setter call; each
//! output event prints a `data,module,port,value` line. Only boolean
//! payloads can be parsed from the wire — other input payload types fail
//! generation up front (types are inspected statically, not at runtime).

use crate::error::{CodegenError, CodegenResult};
use crate::generator::{cpp_type, msg_name};
use crate::plugin::Plugin;
use crate::synth::{ResolvedModule, ResolvedPort};
use crate::writer::CodeWriter;

const BOOL_PAYLOAD: &str = "std_msgs/Bool";

/// Serial CSV communication plugin.
pub struct CsvPlugin;

impl Plugin for CsvPlugin {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn setup_plugin(&self, _modules: &[ResolvedModule], w: &mut CodeWriter) -> CodegenResult<()> {
        w.writeln("Serial.begin(9600);");
        Ok(())
    }

    fn update_plugin(&self, modules: &[ResolvedModule], w: &mut CodeWriter) -> CodegenResult<()> {
        w.begin_block("if (Serial.available()) {");
        w.writeln("String in_str = Serial.readString();");
        for module in modules {
            for (input_name, port) in &module.inputs {
                if port.payload_type != BOOL_PAYLOAD {
                    return Err(CodegenError::UnsupportedPayload {
                        plugin: self.name().to_string(),
                        module: module.id.clone(),
                        port: input_name.clone(),
                        payload_type: port.payload_type.clone(),
                    });
                }
                // Commands address the instance-local (mapped) port name;
                // the setter uses the type-declared name.
                w.begin_block(&format!(
                    "if (in_str.startsWith(\"{},{},\")) {{",
                    module.id, port.mapped_name
                ));
                w.writeln(&format!("{} val;", cpp_type(&port.payload_type)));
                w.begin_block("if (in_str.endsWith(\"true\")) {");
                w.writeln("val.data = true;");
                w.writeln(&format!("{}.set_{}(val);", module.id, input_name));
                w.end_block("}")?;
                w.begin_block("else if (in_str.endsWith(\"false\")) {");
                w.writeln("val.data = false;");
                w.writeln(&format!("{}.set_{}(val);", module.id, input_name));
                w.end_block("}")?;
                w.end_block("}")?;
            }
        }
        w.end_block("}")?;
        Ok(())
    }

    fn on_output(
        &self,
        module: &ResolvedModule,
        output_name: &str,
        port: &ResolvedPort,
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        w.writeln(&format!(
            "Serial.print(\"data,{},{},\");",
            module.id, port.mapped_name
        ));
        w.writeln(&format!(
            "Serial.println({}.data);",
            msg_name(module, output_name)
        ));
        Ok(())
    }
}
