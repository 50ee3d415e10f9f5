//! End-to-end generation scenarios over the public API.

use std::collections::BTreeMap;

use openfarm_codegen::{
    generate, plugin_by_name, prune, synthesize, Category, CodeWriter, CodegenError,
    CodegenResult, ModuleInstance, ModuleType, Plugin, ResolvedModule, ResolvedPort,
    RESERVED_WORDS,
};

fn types_from(pairs: &[(&str, &str)]) -> BTreeMap<String, ModuleType> {
    pairs
        .iter()
        .map(|(id, json)| (id.to_string(), ModuleType::from_json_str(json).unwrap()))
        .collect()
}

fn instances_from(pairs: &[(&str, &str)]) -> BTreeMap<String, ModuleInstance> {
    pairs
        .iter()
        .map(|(id, json)| (id.to_string(), ModuleInstance::from_json_str(json).unwrap()))
        .collect()
}

#[test]
fn unused_types_produce_empty_lifecycle_bodies() {
    let types = types_from(&[(
        "float_switch",
        r#"{
            "header_file": "float_switch.h",
            "class_name": "FloatSwitch",
            "outputs": {"is_high": {"type": "std_msgs/Bool"}}
        }"#,
    )]);
    let instances = BTreeMap::new();

    let mut modules = synthesize(&instances, &types, RESERVED_WORDS).unwrap();
    prune(&mut modules, &[Category::Sensors, Category::Actuators]);
    let out = generate(&modules, &[]).unwrap();

    assert!(out.contains("void setup() {\n}"), "{out}");
    assert!(out.contains("void loop() {\n}"), "{out}");
    assert!(
        !out.contains("float_switch.h"),
        "unused type must not be included: {out}"
    );
}

#[test]
fn single_sensor_full_pipeline() {
    let types = types_from(&[(
        "module",
        r#"{
            "header_file": "module.h",
            "class_name": "Module",
            "outputs": {"output": {"type": "std_msgs/Bool"}}
        }"#,
    )]);
    let instances = instances_from(&[("sensor1", r#"{"type": "module"}"#)]);

    let mut modules = synthesize(&instances, &types, RESERVED_WORDS).unwrap();
    prune(&mut modules, &[Category::Sensors]);
    let out = generate(&modules, &[]).unwrap();

    assert!(out.contains("#include <module.h>"), "{out}");
    assert!(out.contains("Module sensor1;"), "{out}");
    assert!(out.contains("  sensor1.begin();"), "{out}");
    assert!(out.contains("  sensor1.update();"), "{out}");
    assert!(
        out.contains("  if (sensor1.get_output(sensor1_output_msg)) {"),
        "{out}"
    );
}

#[test]
fn argument_surplus_aborts_before_generation() {
    let types = types_from(&[(
        "pump",
        r#"{
            "header_file": "pump.h",
            "class_name": "Pump",
            "arguments": [
                {"name": "pin", "type": "int"},
                {"name": "active_low", "type": "bool", "default": false}
            ]
        }"#,
    )]);
    let instances = instances_from(&[("pump_1", r#"{"type": "pump", "arguments": [8, true, 99]}"#)]);

    let err = synthesize(&instances, &types, RESERVED_WORDS).unwrap_err();
    match err {
        CodegenError::TooManyArguments {
            module,
            supplied,
            expected,
        } => {
            assert_eq!(module, "pump_1");
            assert_eq!(supplied, 3);
            assert_eq!(expected, 2);
        }
        other => panic!("expected TooManyArguments, got {other:?}"),
    }
}

#[test]
fn reserved_instance_id_is_rewritten_consistently() {
    let types = types_from(&[(
        "relay",
        r#"{
            "header_file": "relay.h",
            "class_name": "Relay",
            "inputs": {"state": {"type": "std_msgs/Bool"}},
            "outputs": {"is_on": {"type": "std_msgs/Bool"}}
        }"#,
    )]);
    let instances = instances_from(&[("for", r#"{"type": "relay"}"#)]);

    let mut modules = synthesize(&instances, &types, RESERVED_WORDS).unwrap();
    prune(&mut modules, &[Category::Sensors, Category::Actuators]);
    let out = generate(&modules, &[plugin_by_name("csv").unwrap()]).unwrap();

    // Every emitted reference uses the rewritten id; the raw id never
    // appears as an identifier.
    assert!(out.contains("Relay _for;"), "{out}");
    assert!(out.contains("_for.begin();"), "{out}");
    assert!(out.contains("_for.set_state(msg);"), "{out}");
    assert!(out.contains("if (_for.get_is_on(_for_is_on_msg)) {"), "{out}");
    assert!(!out.contains("Relay for;"), "{out}");
}

#[test]
fn csv_and_ros_compose_in_registration_order() {
    let types = types_from(&[(
        "grow_light",
        r#"{
            "header_file": "grow_light.h",
            "class_name": "GrowLight",
            "arguments": [{"name": "pin", "type": "int"}],
            "inputs": {"state": {"type": "std_msgs/Bool"}},
            "outputs": {"is_on": {"type": "std_msgs/Bool"}}
        }"#,
    )]);
    let instances = instances_from(&[("light_1", r#"{"type": "grow_light", "arguments": [13]}"#)]);

    let mut modules = synthesize(&instances, &types, RESERVED_WORDS).unwrap();
    prune(&mut modules, &[Category::Sensors, Category::Actuators]);
    let plugins = vec![
        plugin_by_name("csv").unwrap(),
        plugin_by_name("ros").unwrap(),
    ];
    let out = generate(&modules, &plugins).unwrap();

    // Both protocols appear, each wired to the same resolved module.
    assert!(out.contains("Serial.begin(9600);"), "{out}");
    assert!(out.contains("nh.initNode();"), "{out}");
    assert!(out.contains("Serial.print(\"data,light_1,is_on,\");"), "{out}");
    assert!(
        out.contains("light_1_is_on_pub.publish(&light_1_is_on_msg);"),
        "{out}"
    );
    // CSV registered first, so its output line precedes the publish call.
    let csv_at = out.find("Serial.print(\"data,light_1,is_on,\");").unwrap();
    let ros_at = out.find("light_1_is_on_pub.publish").unwrap();
    assert!(csv_at < ros_at, "{out}");
}

#[test]
fn category_selection_drops_calibration_ports() {
    let types = types_from(&[(
        "ec_sensor",
        r#"{
            "header_file": "ec_sensor.h",
            "class_name": "EcSensor",
            "inputs": {
                "calibrate": {"type": "std_msgs/Bool", "categories": ["calibration"]}
            },
            "outputs": {
                "ec": {"type": "std_msgs/Float32"},
                "raw": {"type": "std_msgs/Float32", "categories": ["calibration"]}
            }
        }"#,
    )]);
    let instances = instances_from(&[("ec_1", r#"{"type": "ec_sensor"}"#)]);

    let mut modules = synthesize(&instances, &types, RESERVED_WORDS).unwrap();
    prune(&mut modules, &[Category::Sensors, Category::Actuators]);
    let out = generate(&modules, &[]).unwrap();

    assert!(out.contains("ec_1_ec_msg"), "{out}");
    assert!(!out.contains("ec_1_raw_msg"), "{out}");
    assert!(!out.contains("calibrate"), "{out}");
}

// ── Hook ordering ────────────────────────────────────────────────────────────

/// Writes a marker comment from every hook so the emission order is
/// observable in the output text.
struct Tracer(&'static str);

impl Tracer {
    fn mark(&self, w: &mut CodeWriter, hook: &str) {
        w.writeln(&format!("// {}:{}", self.0, hook));
    }
}

impl Plugin for Tracer {
    fn name(&self) -> &'static str {
        self.0
    }

    fn pre_setup_module(&self, _m: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        self.mark(w, "pre_setup");
        Ok(())
    }

    fn post_setup_module(&self, _m: &ResolvedModule, w: &mut CodeWriter) -> CodegenResult<()> {
        self.mark(w, "post_setup");
        Ok(())
    }

    fn pre_output(
        &self,
        _m: &ResolvedModule,
        _name: &str,
        _port: &ResolvedPort,
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        self.mark(w, "pre_output");
        Ok(())
    }

    fn post_output(
        &self,
        _m: &ResolvedModule,
        _name: &str,
        _port: &ResolvedPort,
        w: &mut CodeWriter,
    ) -> CodegenResult<()> {
        self.mark(w, "post_output");
        Ok(())
    }
}

#[test]
fn post_hooks_run_in_reverse_registration_order() {
    let types = types_from(&[(
        "module",
        r#"{
            "header_file": "module.h",
            "class_name": "Module",
            "outputs": {"output": {"type": "std_msgs/Bool"}}
        }"#,
    )]);
    let instances = instances_from(&[("m1", r#"{"type": "module"}"#)]);
    let modules = synthesize(&instances, &types, RESERVED_WORDS).unwrap();

    let plugins: Vec<Box<dyn Plugin>> =
        vec![Box::new(Tracer("a")), Box::new(Tracer("b")), Box::new(Tracer("c"))];
    let out = generate(&modules, &plugins).unwrap();

    let order = |needle: &str| out.find(needle).unwrap_or_else(|| panic!("missing {needle}"));

    // Pre-hooks in registration order, post-hooks reversed: proper nesting.
    assert!(order("a:pre_setup") < order("b:pre_setup"), "{out}");
    assert!(order("b:pre_setup") < order("c:pre_setup"), "{out}");
    assert!(order("c:post_setup") < order("b:post_setup"), "{out}");
    assert!(order("b:post_setup") < order("a:post_setup"), "{out}");

    assert!(order("a:pre_output") < order("c:pre_output"), "{out}");
    assert!(order("c:post_output") < order("a:post_output"), "{out}");
    // The base guard closes after every registered plugin's post hook.
    let closing_brace = out.rfind("  }").unwrap();
    assert!(order("a:post_output") < closing_brace, "{out}");
}
