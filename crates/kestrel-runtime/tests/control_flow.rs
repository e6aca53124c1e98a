//! Branching, loops and block scoping

mod common;

use common::*;

// === If ===

#[test]
fn test_if_picks_the_truthy_branch() {
    assert_eq!(run_capture("if (1 < 2) print \"yes\"; else print \"no\";"), "yes\n");
    assert_eq!(run_capture("if (1 > 2) print \"yes\"; else print \"no\";"), "no\n");
}

#[test]
fn test_if_without_else_skips_quietly() {
    assert_eq!(run_capture("if (false) print \"skipped\"; print \"after\";"), "after\n");
}

#[test]
fn test_if_condition_uses_truthiness() {
    // Zero and the empty string are truthy; only false and nil are not.
    assert_eq!(run_capture("if (0) print \"zero\";"), "zero\n");
    assert_eq!(run_capture("if (\"\") print \"empty\";"), "empty\n");
    assert_eq!(run_capture("if (nil) print \"a\"; else print \"b\";"), "b\n");
}

#[test]
fn test_else_binds_to_nearest_if() {
    let source = "\
if (false)
  if (true) print 1;
  else print 2;
else
  print 3;";
    assert_eq!(run_capture(source), "3\n");
}

#[test]
fn test_chained_else_if() {
    let source = "\
var grade = 75;
if (grade > 90) print \"A\";
else if (grade > 70) print \"B\";
else print \"C\";";
    assert_eq!(run_capture(source), "B\n");
}

// === While ===

#[test]
fn test_while_counts_down() {
    let source = "\
var n = 3;
while (n > 0) {
  print n;
  n = n - 1;
}";
    assert_eq!(run_capture(source), "3\n2\n1\n");
}

#[test]
fn test_while_with_falsy_condition_never_runs() {
    assert_eq!(run_capture("while (false) print \"never\"; print \"done\";"), "done\n");
    assert_eq!(run_capture("while (nil) print \"never\"; print \"done\";"), "done\n");
}

#[test]
fn test_while_condition_reevaluates_each_pass() {
    let source = "\
var total = 0;
var n = 0;
while (n < 4) {
  n = n + 1;
  total = total + n;
}
total;";
    assert_eval_number(source, 10.0);
}

// === For (sugar for while) ===

#[test]
fn test_for_loop_full_header() {
    assert_eq!(
        run_capture("for (var i = 0; i < 3; i = i + 1) print i;"),
        "0\n1\n2\n"
    );
}

#[test]
fn test_for_loop_with_existing_variable() {
    let source = "\
var i = 10;
for (i = 0; i < 2; i = i + 1) print i;
print i;";
    assert_eq!(run_capture(source), "0\n1\n2\n");
}

#[test]
fn test_for_loop_without_increment() {
    let source = "\
for (var n = 3; n > 0;) {
  print n;
  n = n - 1;
}";
    assert_eq!(run_capture(source), "3\n2\n1\n");
}

#[test]
fn test_for_header_variable_stays_local() {
    let source = "\
for (var i = 0; i < 1; i = i + 1) print i;
i;";
    assert!(matches!(
        runtime_err(source),
        kestrel_runtime::RuntimeError::NameError { .. }
    ));
}

#[test]
fn test_for_loop_body_runs_before_increment() {
    let source = "\
var log = \"\";
for (var x = 0; x < 6; x = x + 2) log = log + \"a\";
log;";
    assert_eval_string(source, "aaa");
}

// === Blocks and scoping ===

#[test]
fn test_block_shadows_and_restores() {
    let source = "\
var x = 1;
{
  var x = 2;
  print x;
}
print x;";
    assert_eq!(run_capture(source), "2\n1\n");
}

#[test]
fn test_block_assignment_writes_the_outer_binding() {
    let source = "\
var x = 1;
{
  x = 2;
}
x;";
    assert_eval_number(source, 2.0);
}

#[test]
fn test_block_locals_do_not_leak() {
    let source = "\
{
  var hidden = 1;
}
hidden;";
    assert!(matches!(
        runtime_err(source),
        kestrel_runtime::RuntimeError::NameError { .. }
    ));
}

#[test]
fn test_nested_blocks_resolve_outwards() {
    let source = "\
var a = \"outer\";
{
  var b = \"middle\";
  {
    print a + \" \" + b;
  }
}";
    assert_eq!(run_capture(source), "outer middle\n");
}

#[test]
fn test_error_in_loop_body_aborts() {
    let source = "\
var n = 0;
while (n < 3) {
  n = n + 1;
  print n;
  print boom;
}";
    let kestrel = kestrel_runtime::Kestrel::with_printer(kestrel_runtime::Printer::buffer());
    assert!(kestrel.eval(source).is_err());
    // The first pass printed its value before the failure stopped the walk.
    assert_eq!(kestrel.printer().output(), "1\n");
}
