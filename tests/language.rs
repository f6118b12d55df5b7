use std::{cell::RefCell, fs, rc::Rc};

use lectern::{Error, error::RuntimeFault, run_source};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

/// Runs a program through the whole pipeline, capturing what it prints.
fn run(source: &str) -> (Result<i32, Error>, String) {
    let buffer = Rc::new(RefCell::new(Vec::<u8>::new()));
    let result = run_source(source, buffer.clone());
    let printed = String::from_utf8(buffer.borrow().clone()).unwrap();
    (result, printed)
}

#[test]
fn sample_programs_work() {
    let mut count = 0;

    for entry in WalkDir::new("tests/programs").into_iter()
                                               .filter_map(Result::ok)
                                               .filter(|e| {
                                                   e.path().extension().is_some_and(|ext| ext == "lct")
                                               })
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out")).unwrap_or_default();

        let (result, printed) = run(&source);
        match result {
            Ok(0) => assert_eq!(printed, expected, "output of {path:?}"),
            Ok(code) => panic!("{path:?} exited with code {code}"),
            Err(e) => panic!("{path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn assert_success(src: &str) {
    match run(src).0 {
        Ok(0) => {},
        Ok(code) => panic!("Script exited with code {code}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match run(src).0 {
        Ok(code) => panic!("Script succeeded with code {code} but was expected to fail"),
        Err(e) => e,
    }
}

/// Wraps statements into a `main` that returns 0.
fn program(body: &str) -> String {
    format!("DEF main(): Integer DO {body} RETURN 0; END")
}

#[test]
fn end_to_end_scenario() {
    let source = r#"
LET x: Integer = 5;
DEF main(): Integer DO
    IF x > 3 DO
        print("big");
    ELSE
        print("small");
    END
    RETURN 0;
END
"#;
    let (result, printed) = run(source);

    assert_eq!(result.unwrap(), 0);
    assert_eq!(printed, "big\n");

    let (_, printed) = run(&source.replace("= 5", "= 2"));
    assert_eq!(printed, "small\n");
}

#[test]
fn exit_code_is_mains_result() {
    assert_eq!(run("DEF main(): Integer DO RETURN 42; END").0.unwrap(), 42);
    assert_eq!(run("DEF main(): Integer DO RETURN 2 - 3; END").0.unwrap(), -1);
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success(&program("LET x = 1 + 2; IF x != 3 DO RETURN 1; END"));
    assert_success(&program("LET x = 7 * 9; IF x != 63 DO RETURN 1; END"));
    assert_success(&program("LET x = 8 - 5; IF x != 3 DO RETURN 1; END"));
    assert_success(&program("LET x = 10 / 3; IF x != 3 DO RETURN 1; END"));
    assert_success(&program("LET d = 1.0 / 3.0; IF d != 0.3 DO RETURN 1; END"));
}

#[test]
fn every_phase_reports_its_errors() {
    assert!(matches!(assert_failure("DEF main(): Integer DO RETURN 05; END"), Error::Lex(_)));
    assert!(matches!(assert_failure("DEF main(): Integer DO RETURN 5 END"), Error::Parse(_)));
    assert!(matches!(assert_failure("DEF main(): Integer DO RETURN 5.0; END"), Error::Type(_)));
    assert!(matches!(assert_failure("DEF main(): Integer DO RETURN 1 / 0; END"),
                     Error::Runtime(RuntimeFault::DivisionByZero)));
}

#[test]
fn nothing_runs_when_the_check_fails() {
    let (result, printed) = run(r#"DEF main(): Integer DO print("side effect"); RETURN "no"; END"#);

    assert!(matches!(result, Err(Error::Type(_))));
    assert!(printed.is_empty());
}

#[test]
fn constants_are_protected() {
    assert!(matches!(assert_failure("LET CONST x: Integer = 1; DEF main(): Integer DO x = 2; RETURN 0; END"),
                     Error::Type(_)));
    assert_success("LET CONST x: Integer = 1; DEF main(): Integer DO LET y = x; y = 2; RETURN 0; END");
}

#[test]
fn scopes_shadow_and_end() {
    let (result, printed) = run(r#"
LET x: String = "global";
DEF main(): Integer DO
    LET x = 1;
    IF TRUE DO
        LET x = 'c';
        print(x);
    END
    print(x);
    RETURN 0;
END
"#);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(printed, "c\n1\n");

    assert!(matches!(assert_failure(&program("WHILE FALSE DO LET y = 1; END print(y);")),
                     Error::Type(_)));
}

#[test]
fn loops() {
    let (_, printed) = run(&program("FOR (i = 0; i < 3; i = i + 1) print(i); END"));
    assert_eq!(printed, "0\n1\n2\n");

    let (_, printed) = run(&program("LET n = 3; WHILE n > 0 DO print(n); n = n - 1; END"));
    assert_eq!(printed, "3\n2\n1\n");

    let (_, printed) = run(&program("FOR (; FALSE;) print(1); END"));
    assert!(printed.is_empty());
}

#[test]
fn recursion() {
    let source = r"
DEF fib(n: Integer): Integer DO
    IF n < 2 DO
        RETURN n;
    END
    RETURN fib(n - 1) + fib(n - 2);
END
DEF main(): Integer DO
    print(fib(20));
    RETURN 0;
END
";
    let (result, printed) = run(source);

    assert_eq!(result.unwrap(), 0);
    assert_eq!(printed, "6765\n");
}

#[test]
fn log_returns_its_argument() {
    let (_, printed) = run(&program(r#"print(log("logged") + "!");"#));

    assert_eq!(printed, "logged!\n");
}

#[test]
fn field_named_like_a_method() {
    let (result, _) = run(r"
LET count: Integer = 1;
DEF count(): Integer DO RETURN 2; END
DEF main(): Integer DO RETURN count; END
");

    assert_eq!(result.unwrap(), 1);
}
