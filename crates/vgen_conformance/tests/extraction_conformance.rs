//! Signature extraction conformance tests.
//!
//! Each test feeds a small Verilog-2001 or SystemVerilog header through
//! extraction and checks the resulting module signature.

use vgen_conformance::extract;
use vgen_verilog::{codes, ExtractError, Parameter, Port};

fn names(ports: &[Port]) -> Vec<&str> {
    ports.iter().map(|p| p.name.as_str()).collect()
}

// ============================================================================
// Names and parameters
// ============================================================================

#[test]
fn name_is_identifier_after_module() {
    let r = extract("module\n  fifo_sync\n#(parameter D = 4) (input clk); endmodule");
    assert_eq!(r.info().name, "fifo_sync");
}

#[test]
fn escaped_module_name() {
    let r = extract("module \\top$core (input a); endmodule");
    assert_eq!(r.info().name, "\\top$core");
    assert!(r.has_code(codes::ESCAPED_MODULE_NAME));
    assert_eq!(r.warning_count, 1);
}

#[test]
fn single_parameter() {
    let r = extract("module m; parameter X = 8; endmodule");
    assert_eq!(r.info().parameters, vec![Parameter::new("X", "8")]);
}

#[test]
fn header_and_body_parameters_in_order() {
    let r = extract(
        "module m #(
            parameter A = 1,
            parameter B = \"str, with comma\"
        ) (input clk);
            parameter C = A + 1, D = {A, B};
            localparam HIDDEN = 3;
        endmodule",
    );
    assert_eq!(
        r.info().parameters,
        vec![
            Parameter::new("A", "1"),
            Parameter::new("B", "\"str, with comma\""),
            Parameter::new("C", "A + 1"),
            Parameter::new("D", "{A, B}"),
        ]
    );
}

#[test]
fn typed_parameters() {
    let r = extract(
        "module m #(
            parameter integer COUNT = 10,
            parameter real RATIO = 0.5,
            parameter [7:0] INIT = 8'hA5,
            parameter signed [3:0] OFFSET = -4'sd2
        ) ();
        endmodule",
    );
    assert_eq!(
        r.info().parameters,
        vec![
            Parameter::new("COUNT", "10"),
            Parameter::new("RATIO", "0.5"),
            Parameter::new("INIT", "8'hA5"),
            Parameter::new("OFFSET", "-4'sd2"),
        ]
    );
}

// ============================================================================
// Ports
// ============================================================================

#[test]
fn shared_range_three_ports() {
    let r = extract("module m(a, b, c); input [W-1:0] a, b, c; endmodule");
    let info = r.info();
    assert_eq!(names(&info.inputs), vec!["a", "b", "c"]);
    assert!(info.inputs.iter().all(|p| p.range == "[W-1:0]"));
}

#[test]
fn ansi_and_non_ansi_mixed_directions() {
    let r = extract(
        "module io_cell(pad, din, dout, oe);
            inout pad;
            input din, oe;
            output dout;
            assign pad = oe ? din : 1'bz;
            assign dout = pad;
        endmodule",
    );
    let info = r.info();
    assert_eq!(names(&info.inputs), vec!["din", "oe"]);
    assert_eq!(names(&info.outputs), vec!["dout"]);
    assert_eq!(names(&info.inouts), vec!["pad"]);
}

#[test]
fn ports_inside_function_are_not_extracted() {
    let r = extract(
        "module parity(input [7:0] data, output p);
            function calc;
                input [7:0] d;
                integer i;
                begin
                    calc = 0;
                    for (i = 0; i < 8; i = i + 1) calc = calc ^ d[i];
                end
            endfunction
            assign p = calc(data);
        endmodule",
    );
    let info = r.info();
    assert_eq!(names(&info.inputs), vec!["data"]);
    assert_eq!(names(&info.outputs), vec!["p"]);
}

#[test]
fn ports_inside_task_are_not_extracted() {
    let r = extract(
        "module tb_drv(output reg clk);
            task tick;
                input integer n;
                output reg [3:0] count;
                repeat (n) #5 clk = ~clk;
            endtask
        endmodule",
    );
    let info = r.info();
    assert!(info.inputs.is_empty());
    assert_eq!(names(&info.outputs), vec!["clk"]);
}

#[test]
fn block_comments_spanning_ports() {
    let r = extract(
        "module m(
            input a,
            /* input b,
               input c, */
            output y // , output z
        );
        endmodule",
    );
    let info = r.info();
    assert_eq!(names(&info.inputs), vec!["a"]);
    assert_eq!(names(&info.outputs), vec!["y"]);
}

#[test]
fn conditional_compilation_directives_are_skipped() {
    let r = extract(
        "`define W 8
        module m(
            input [`W-1:0] a,
        `ifdef DEBUG
            output dbg,
        `endif
            output y
        );
        endmodule",
    );
    let info = r.info();
    assert_eq!(info.inputs, vec![Port::new("a", "[`W-1:0]")]);
    assert_eq!(names(&info.outputs), vec!["dbg", "y"]);
}

// ============================================================================
// Not found
// ============================================================================

#[test]
fn no_module_is_not_found() {
    let r = extract("// just a comment\nwire x;\n");
    assert_eq!(r.result, Err(ExtractError::NoModule));
    assert!(r.result.as_ref().unwrap_err().is_not_found());
    assert!(r.has_code(codes::NO_MODULE));
}

#[test]
fn missing_endmodule_is_not_found() {
    let r = extract("module half(input a);\n  assign b = a;\n");
    assert!(matches!(r.result, Err(ExtractError::MissingEndmodule { .. })));
    assert_eq!(r.error_count, 1);
}

#[test]
fn not_found_is_deterministic() {
    let src = "endmodule module";
    assert_eq!(extract(src).result, extract(src).result);
}

#[test]
fn module_in_comment_only_is_not_found() {
    let r = extract("/* module ghost(input a); endmodule */");
    assert_eq!(r.result, Err(ExtractError::NoModule));
}

#[test]
fn module_keyword_inside_string_is_ignored() {
    let r = extract("initial $display(\"module x; endmodule\");");
    assert_eq!(r.result, Err(ExtractError::NoModule));
}
