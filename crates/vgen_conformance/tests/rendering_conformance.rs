//! Extraction-to-rendering round-trip tests.
//!
//! These tests render real module headers through the bundled templates and
//! custom inline templates and check the generated Verilog text.

use vgen_conformance::{generate, generate_with};
use vgen_template::{render, GenerationKind};
use vgen_verilog::ModuleInfo;

const ADDER: &str = r#"
module adder #(parameter WIDTH = 8) (
    input  [WIDTH-1:0] a,
    input  [WIDTH-1:0] b,
    output [WIDTH:0]   sum
);
    assign sum = a + b;
endmodule
"#;

#[test]
fn adder_instance_round_trip() {
    let out = generate(ADDER, GenerationKind::Instance).unwrap();
    assert!(out.starts_with("adder #(\n"));
    let params = &out[..out.find("\n)").unwrap()];
    assert_eq!(params.matches('.').count(), 1);
    assert!(params.contains(".WIDTH(WIDTH)"));
    assert_eq!(
        out,
        "adder #(\n    .WIDTH(WIDTH)\n) u_adder (\n    .a  (a  ),\n    .b  (b  ),\n\n    .sum(sum)\n);\n"
    );
}

#[test]
fn adder_testbench_round_trip() {
    let out = generate(ADDER, GenerationKind::Testbench).unwrap();
    let expected = "\
`timescale 1ns / 1ps

module tb_adder;

// Parameters
parameter WIDTH = 8;

// Inputs
reg  [WIDTH-1:0] a = 0;
reg  [WIDTH-1:0] b = 0;

// Outputs
wire [WIDTH:0] sum;

// Inouts

adder #(
    .WIDTH(WIDTH)
) u_adder (
    .a  (a  ),
    .b  (b  ),

    .sum(sum)
);

initial begin
    $dumpfile(\"tb_adder.vcd\");
    $dumpvars(0, tb_adder);
end

initial begin
    #1000;
    $finish;
end

endmodule
";
    assert_eq!(out, expected);
}

#[test]
fn escaped_port_names_stay_separate_tokens() {
    let out = generate_with(
        "module m(input \\a+b , input c, output y); endmodule",
        "m u0 (\n${PORT_CONNECTION}\n);",
    )
    .unwrap();
    assert!(!out.contains("\\a+b("));
    assert!(out.contains("    .\\a+b (\\a+b ),"));
}

#[test]
fn escaped_module_name_is_terminated() {
    let out = generate_with(
        "module \\top+x (input a); endmodule",
        "${MODULE_NAME}${PARAMETER_DEFINITION}inst (.a(a));",
    )
    .unwrap();
    assert_eq!(out, "\\top+x inst (.a(a));");
}

#[test]
fn template_without_placeholders_is_identity() {
    let template = "// fixed text\n\nmodule keep;\nendmodule\n";
    assert_eq!(generate_with(ADDER, template).unwrap(), template);
}

#[test]
fn module_without_parameters_has_no_override_block() {
    let out = generate("module inv(input a, output y); endmodule", GenerationKind::Instance).unwrap();
    assert_eq!(out, "inv  u_inv (\n    .a(a),\n\n    .y(y)\n);\n");
    assert!(!out.contains("#("));
}

#[test]
fn empty_parameter_placeholders() {
    let info = ModuleInfo::new("m");
    assert_eq!(render("${PARAMETER_DECLARATION}", &info), "");
    assert_eq!(render("${PARAMETER_DEFINITION}", &info), "");
}

#[test]
fn portless_module_testbench() {
    let out = generate("module tb_only; endmodule", GenerationKind::Testbench).unwrap();
    assert!(out.contains("tb_only  u_tb_only (\n\n);"));
    assert!(!out.contains("\n\n\n"));
}

#[test]
fn placeholders_are_order_independent() {
    let src = "module m #(parameter P = 1) (input i, output o, inout io); endmodule";
    let forward = generate_with(src, "${INPUT_DECLARATION}|${OUTPUT_DECLARATION}").unwrap();
    let backward = generate_with(src, "${OUTPUT_DECLARATION}|${INPUT_DECLARATION}").unwrap();
    let (f_in, f_out) = forward.split_once('|').unwrap();
    let (b_out, b_in) = backward.split_once('|').unwrap();
    assert_eq!(f_in, b_in);
    assert_eq!(f_out, b_out);
}

#[test]
fn inout_ports_are_wires() {
    let out = generate_with(
        "module pads(inout [3:0] gpio, inout scl); endmodule",
        "${INOUT_DECLARATION}",
    )
    .unwrap();
    assert_eq!(out, "wire [3:0] gpio;\nwire       scl ;");
}

#[test]
fn unknown_placeholders_survive_rendering() {
    let out = generate_with(ADDER, "// ${AUTHOR} ${MODULE_NAME}").unwrap();
    assert_eq!(out, "// ${AUTHOR} adder");
}

#[test]
fn rendering_twice_is_stable() {
    let once = generate(ADDER, GenerationKind::Testbench).unwrap();
    let info = vgen_verilog::extract(ADDER).unwrap();
    assert_eq!(render(&once, &info), once);
}

#[test]
fn parameter_declaration_alignment() {
    let out = generate_with(
        "module m #(parameter W = 8, parameter DEPTH_LOG2 = $clog2(256)) (); endmodule",
        "${PARAMETER_DECLARATION}",
    )
    .unwrap();
    assert_eq!(
        out,
        "parameter W          = 8          ;\nparameter DEPTH_LOG2 = $clog2(256);"
    );
}
