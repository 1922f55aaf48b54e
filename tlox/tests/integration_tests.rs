use tlox::{interpret, new_interpreter, run, RunError, EXIT_DATA_ERR, EXIT_SOFTWARE};

/// Runs `source`, panicking on any error. Returns what the program printed.
fn output(source: &str) -> String {
    match interpret(source) {
        Ok(output) => output,
        Err(err) => panic!("unexpected error:\n{}", err),
    }
}

/// Runs `source`, expecting it to fail. Returns the rendered error and the output printed before it.
fn failure(source: &str) -> (RunError, String) {
    let mut interpreter = new_interpreter(Vec::new());
    let err = run(source, &mut interpreter).expect_err("program should fail");
    let printed = String::from_utf8(interpreter.output().clone()).expect("valid utf-8");
    (err, printed)
}

#[test]
fn variables() {
    assert_eq!(output("var x = 1; print x + 2;"), "3\n");
    assert_eq!(
        output(
            r#"
            var x = 1;
            var y = x + 1;
            print y;
            x = 10;
            print x;"#,
        ),
        "2\n10\n"
    );
}

#[test]
fn comments() {
    assert_eq!(
        output(
            r#"
            var x = 1; // a comment
            // print 2;
            print x;"#,
        ),
        "1\n"
    );
}

#[test]
fn if_else() {
    assert_eq!(
        output(r#"if (1 < 2) print "a"; else print "b";"#),
        "a\n"
    );
}

#[test]
fn shadowing_is_restored_after_block() {
    assert_eq!(
        output(
            r#"
            var a = "outer";
            {
                var a = "inner";
                print a;
            }
            print a;"#,
        ),
        "inner\nouter\n"
    );
}

#[test]
fn number_formatting() {
    assert_eq!(
        output("print 100; print 1.5; print 10 / 4; print -0.5; print 1 + 2;"),
        "100\n1.5\n2.5\n-0.5\n3\n"
    );
}

#[test]
fn equality() {
    assert_eq!(
        output("print 1 == 1; print 1 != 1; print nil == nil; print \"a\" == \"a\"; print 1 == \"1\";"),
        "true\nfalse\ntrue\ntrue\nfalse\n"
    );
}

#[test]
fn logical_operators_return_operands() {
    assert_eq!(
        output(r#"print false or "x"; print nil and undefinedVariable; print 1 and 2;"#),
        "x\nnil\n2\n"
    );
}

#[test]
fn globals_persist_between_runs() {
    let mut interpreter = new_interpreter(Vec::new());
    run("var a = 1;", &mut interpreter).expect("first run");
    run("a = a + 1; print a;", &mut interpreter).expect("second run");
    assert_eq!(interpreter.output(), b"2\n");
}

#[test]
fn clock_is_defined() {
    assert_eq!(output("print clock() > 0;"), "true\n");
    assert_eq!(output("print clock;"), "<native fn>\n");
}

mod functions {
    use super::*;

    #[test]
    fn functions() {
        assert_eq!(
            output(
                r#"
                fun foo() {
                    return 1;
                }
                print foo();"#,
            ),
            "1\n"
        );
    }

    #[test]
    fn functions_with_params() {
        assert_eq!(
            output(
                r#"
                fun double(x) {
                    var result = x * 2;
                    return result;
                }
                print double(10);
                print double(-2);"#,
            ),
            "20\n-4\n"
        );
    }

    #[test]
    fn functions_implicit_return() {
        assert_eq!(output("fun foo() { } print foo();"), "nil\n");
    }

    #[test]
    fn higher_order_function() {
        assert_eq!(
            output(
                r#"
                fun twice(f, v) {
                    return f(f(v));
                }
                fun double(x) {
                    return x * 2;
                }
                print twice(double, 10);
                print twice(double, -2);"#,
            ),
            "40\n-8\n"
        );
    }

    #[test]
    fn closures() {
        assert_eq!(
            output(
                r#"
                fun createAdder(x) {
                    fun adder(y) {
                        return x + y;
                    }
                    return adder;
                }
                var addTwo = createAdder(2);
                print addTwo(1);"#,
            ),
            "3\n"
        );
        assert_eq!(
            output(
                r#"
                fun compose(f, g) {
                    fun func(x) {
                        return f(g(x));
                    }
                    return func;
                }
                fun addOne(x) { return x + 1; }
                fun addTwo(x) { return x + 2; }
                print compose(addOne, addTwo)(2);"#,
            ),
            "5\n"
        );
    }

    #[test]
    fn wrong_arity() {
        let (err, _) = failure("fun f(a, b) {}\nf(1);");
        assert_eq!(err.to_string(), "[line 2] Expected 2 arguments but got 1.");
    }
}

mod errors {
    use super::*;

    #[test]
    fn runtime_error_stops_execution() {
        let (err, printed) = failure(
            r#"print "before";
print "1" + 1;
print "after";"#,
        );
        assert_eq!(printed, "before\n");
        assert_eq!(err.exit_code(), EXIT_SOFTWARE);
        assert_eq!(
            err.to_string(),
            "[line 2] Operands must be two numbers or two strings."
        );
    }

    #[test]
    fn syntax_errors_prevent_evaluation() {
        let (err, printed) = failure("print \"never\";\nprint 1 +;\nvar ok = 1;\nvar = 2;");
        assert_eq!(printed, "");
        assert_eq!(err.exit_code(), EXIT_DATA_ERR);
        assert_eq!(
            err.to_string(),
            "[line 2] Error at ';': Expect expression.\n\
             [line 4] Error at '=': Expect variable name."
        );
    }

    #[test]
    fn lexical_errors_prevent_evaluation() {
        let (err, printed) = failure("print 1;\nprint \"unterminated;");
        assert_eq!(printed, "");
        // the string is dropped, so the parser then misses the printed expression
        assert_eq!(
            err.to_string(),
            "[line 2] Error: Unterminated string.\n\
             [line 2] Error at end: Expect expression."
        );
    }

    #[test]
    fn top_level_return() {
        let (err, printed) = failure("print 1;\nreturn;");
        assert_eq!(printed, "");
        assert_eq!(
            err.to_string(),
            "[line 2] Error at 'return': Can't return from top-level code."
        );
    }

    #[test]
    fn invalid_assignment_target() {
        let (err, _) = failure("var a; var b; a + b = 1;");
        assert_eq!(
            err.to_string(),
            "[line 1] Error at '=': Invalid assignment target."
        );
    }

    #[test]
    fn deep_nesting_is_a_syntax_error() {
        let source = format!("print {}1{};", "(".repeat(3_000), ")".repeat(3_000));
        let (err, _) = failure(&source);
        assert_eq!(err.exit_code(), EXIT_DATA_ERR);
        assert_eq!(err.to_string(), "[line 1] Error at '(': Too much nesting.");
    }

    #[test]
    fn unbounded_recursion() {
        let (err, _) = failure("fun f(n) { return f(n + 1); } f(0);");
        assert_eq!(err.exit_code(), EXIT_SOFTWARE);
        assert_eq!(err.to_string(), "[line 1] Stack overflow.");
    }

    #[test]
    fn undefined_variable() {
        let (err, _) = failure("{\n  print missing;\n}");
        assert_eq!(err.to_string(), "[line 2] Undefined variable 'missing'.");
    }
}
