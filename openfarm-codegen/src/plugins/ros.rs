//! Pub/sub message-bus protocol plugin (rosserial idiom)
//!
//! Declares one subscriber per input and one publisher per output, with
//! message types derived from the port's declared payload type. Topic
//! names are the instance-local (mapped) port names. Per-output handling
//! publishes the held payload object.

use std::collections::BTreeSet;

use crate::error::CodegenResult;
use crate::generator::{callback_name, cpp_type, msg_name};
use crate::plugin::Plugin;
use crate::synth::{ResolvedModule, ResolvedPort};
use crate::writer::CodeWriter;

/// ROS (rosserial) communication plugin.
pub struct RosPlugin;

fn sub_name(module: &ResolvedModule, input_name: &str) -> String {
    format!("{}_{}_sub", module.id, input_name)
}

fn pub_name(module: &ResolvedModule, output_name: &str) -> String {
    format!("{}_{}_pub", module.id, output_name)
}

impl Plugin for RosPlugin {
    fn name(&self) -> &'static str {
        "ros"
    }

    fn dependencies(&self, _modules: &[ResolvedModule]) -> BTreeSet<String> {
        let mut deps = BTreeSet::new();
        deps.insert("ros.h".to_string());
        deps
    }

    fn write_declarations(
        &self,
        modules: &[ResolvedModule],
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        w.writeln("ros::NodeHandle nh;");
        for module in modules {
            for (input_name, port) in &module.inputs {
                w.writeln(&format!(
                    "ros::Subscriber<{}> {}(\"{}\", &{});",
                    cpp_type(&port.payload_type),
                    sub_name(module, input_name),
                    port.mapped_name,
                    callback_name(module, input_name)
                ));
            }
            for (output_name, port) in &module.outputs {
                w.writeln(&format!(
                    "ros::Publisher {}(\"{}\", &{});",
                    pub_name(module, output_name),
                    port.mapped_name,
                    msg_name(module, output_name)
                ));
            }
        }
        Ok(())
    }

    /// One subscribe/advertise binding per input/output pair.
    fn setup_plugin(&self, modules: &[ResolvedModule], w: &mut CodeWriter) -> CodegenResult<()> {
        w.writeln("nh.initNode();");
        for module in modules {
            for input_name in module.inputs.keys() {
                w.writeln(&format!("nh.subscribe({});", sub_name(module, input_name)));
            }
            for output_name in module.outputs.keys() {
                w.writeln(&format!("nh.advertise({});", pub_name(module, output_name)));
            }
        }
        Ok(())
    }

    fn update_plugin(&self, _modules: &[ResolvedModule], w: &mut CodeWriter) -> CodegenResult<()> {
        w.writeln("nh.spinOnce();");
        Ok(())
    }

    fn on_output(
        &self,
        module: &ResolvedModule,
        output_name: &str,
        _port: &ResolvedPort,
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        w.writeln(&format!(
            "{}.publish(&{});",
            pub_name(module, output_name),
            msg_name(module, output_name)
        ));
        Ok(())
    }
}
