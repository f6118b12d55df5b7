use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use lectern::{
    ast::{BinaryOperator, Expression, Literal},
    error::{NameError, RuntimeFault},
    interpreter::{
        evaluator::core::{Flow, Interpreter},
        lexer::tokenize,
        parser::{core::parse, statement::parse_statement, utils::TokenStream},
        prelude::{Output, global_scope, global_scope_with_output},
        scope::{Callable, Function, Scope},
        types::Type,
        value::Value,
    },
};
use pretty_assertions::assert_eq;

/// A global scope with an `explode()` function that always faults and counts
/// how often it was called.
fn exploding_scope() -> (Rc<Scope>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let scope = global_scope();
    scope.define_function(Function::native("explode", Vec::new(), Type::Boolean, move |_| {
             counter.set(counter.get() + 1);
             Err(RuntimeFault::NotInvocable { name: "explode".to_string() })
         }));
    (scope, calls)
}

fn boolean(value: bool) -> Expression {
    Expression::literal(Literal::Boolean(value), 0)
}

fn explode() -> Expression {
    Expression::function(None, "explode", Vec::new(), 0)
}

/// Runs an unchecked program and returns its result and printed output.
fn execute(source: &str) -> (Result<Value, RuntimeFault>, String) {
    let buffer = Rc::new(RefCell::new(Vec::<u8>::new()));
    let output: Output = buffer.clone();
    let program = parse(&tokenize(source).unwrap()).unwrap();
    let result = Interpreter::new(&global_scope_with_output(output)).execute(&program);
    let printed = String::from_utf8(buffer.borrow().clone()).unwrap();
    (result, printed)
}

#[test]
fn and_short_circuits() {
    let (scope, calls) = exploding_scope();
    let interpreter = Interpreter::new(&scope);

    let expression = Expression::binary(BinaryOperator::And, boolean(false), explode());
    assert_eq!(interpreter.evaluate(&expression, interpreter.scope()).unwrap(),
               Value::Boolean(false));
    assert_eq!(calls.get(), 0);

    let expression = Expression::binary(BinaryOperator::And, boolean(true), explode());
    assert!(interpreter.evaluate(&expression, interpreter.scope()).is_err());
    assert_eq!(calls.get(), 1);
}

#[test]
fn or_short_circuits() {
    let (scope, calls) = exploding_scope();
    let interpreter = Interpreter::new(&scope);

    let expression = Expression::binary(BinaryOperator::Or, boolean(true), explode());
    assert_eq!(interpreter.evaluate(&expression, interpreter.scope()).unwrap(),
               Value::Boolean(true));
    assert_eq!(calls.get(), 0);
}

#[test]
fn logical_operands_must_be_booleans() {
    let interpreter = Interpreter::new(&global_scope());
    let expression = Expression::binary(BinaryOperator::Or,
                                        Expression::literal(Literal::Integer(1.into()), 0),
                                        boolean(true));

    assert!(matches!(interpreter.evaluate(&expression, interpreter.scope()).unwrap_err(),
                     RuntimeFault::ExpectedBoolean { found: "Integer" }));
}

#[test]
fn while_body_declarations_do_not_outlive_the_loop() {
    let interpreter = Interpreter::new(&global_scope());
    let outer = interpreter.scope().child();
    outer.define_variable("i", Type::Any, false, Value::from(0));

    let tokens = tokenize("WHILE i < 3 DO LET y = i; i = i + 1; END").unwrap();
    let statement = parse_statement(&mut TokenStream::new(&tokens)).unwrap();

    assert_eq!(interpreter.execute_statement(&statement, &outer).unwrap(), Flow::Next);
    assert_eq!(outer.lookup_variable("i").unwrap().value(), Value::from(3));
    assert_eq!(outer.lookup_variable("y").unwrap_err(),
               NameError::Variable { name: "y".to_string() });
}

#[test]
fn return_unwinds_through_loops() {
    let (result, printed) = execute(r"
        DEF find(limit: Integer): Integer DO
            FOR (i = 0; i < limit; i = i + 1)
                WHILE TRUE DO
                    IF i * i > 10 DO
                        RETURN i;
                    END
                    print(i);
                    RETURN -1;
                END
            END
            RETURN 0;
        END
        DEF main(): Integer DO RETURN find(100); END
    ");

    assert_eq!(result.unwrap(), Value::from(-1));
    assert_eq!(printed, "0\n");
}

#[test]
fn methods_without_return_yield_nil() {
    let (result, printed) = execute(r#"
        DEF greet(name: String) DO print("hi " + name); END
        DEF main() DO RETURN greet("you"); END
    "#);

    assert_eq!(result.unwrap(), Value::Nil);
    assert_eq!(printed, "hi you\n");
}

#[test]
fn methods_see_fields_through_their_closure() {
    let (result, _) = execute(r"
        LET counter: Integer = 0;
        DEF bump(): Integer DO counter = counter + 1; RETURN counter; END
        DEF main(): Integer DO bump(); bump(); RETURN bump(); END
    ");

    assert_eq!(result.unwrap(), Value::from(3));
}

#[test]
fn method_names_hold_function_references() {
    let (result, printed) = execute(r"
        DEF main(): Integer DO
            LET f = main;
            print(f);
            RETURN 0;
        END
    ");

    assert_eq!(result.unwrap(), Value::from(0));
    assert_eq!(printed, "<function main/0>\n");
}

#[test]
fn runtime_faults() {
    let fault = |body: &str| execute(&format!("DEF main() DO {body} END")).0.unwrap_err();

    assert!(matches!(fault("RETURN 1 / 0;"), RuntimeFault::DivisionByZero));
    assert!(matches!(fault("RETURN 1.5 / 0.0;"), RuntimeFault::DivisionByZero));
    assert!(matches!(fault("RETURN 1 + 1.0;"),
                     RuntimeFault::OperandMismatch { operator: "+",
                                                     left: "Integer",
                                                     right: "Decimal" }));
    assert!(matches!(fault("RETURN 1 < 'a';"), RuntimeFault::OperandMismatch { .. }));
    assert!(matches!(fault("RETURN TRUE < FALSE;"), RuntimeFault::OperandMismatch { .. }));
    assert!(matches!(fault("IF 1 DO END"), RuntimeFault::ExpectedBoolean { .. }));
    assert!(matches!(fault("RETURN missing;"),
                     RuntimeFault::Unresolved(NameError::Variable { .. })));
    assert!(matches!(fault("main = 1;"), RuntimeFault::ConstantAssignment { .. }));
    assert!(matches!(fault("1 = 1;"), RuntimeFault::InvalidAssignmentTarget));
}

#[test]
fn constants_cannot_be_reassigned_at_run_time() {
    let (result, _) = execute("LET CONST x: Integer = 1; DEF main() DO x = 2; END");

    assert!(matches!(result.unwrap_err(),
                     RuntimeFault::ConstantAssignment { ref name } if name == "x"));
}

#[test]
fn equality_is_kind_agnostic() {
    let (result, _) = execute(r#"
        DEF main() DO
            RETURN 1 == 'a' OR 1 == 1.0 OR "1" == 1 OR NIL != NIL;
        END
    "#);
    assert_eq!(result.unwrap(), Value::Boolean(false));

    let (result, _) = execute("DEF main() DO RETURN 1.0 == 1.00 AND 'a' < 'b' AND \"ab\" < \"b\"; END");
    assert_eq!(result.unwrap(), Value::Boolean(true));
}

#[test]
fn arithmetic() {
    let (result, printed) = execute(r#"
        DEF main() DO
            print(7 / 2);
            print(-7 / 2);
            print(10.0 / 4.0);
            print(1.25 / 2.0);
            print(1.5 * 2.0);
            print("x" + 'y' + 1 + 2.50 + TRUE + NIL);
            RETURN 2147483647 + 1;
        END
    "#);

    assert_eq!(printed, "3\n-3\n2.5\n0.62\n3.00\nxy12.50truenil\n");
    assert_eq!(result.unwrap(), Value::from(2_147_483_648_i64));
}

#[test]
fn exit_codes() {
    let run = |source: &str| {
        let program = parse(&tokenize(source).unwrap()).unwrap();
        Interpreter::new(&global_scope()).run(&program)
    };

    assert_eq!(run("DEF main(): Integer DO RETURN 3; END").unwrap(), 3);
    assert_eq!(run("DEF main(): Integer DO RETURN -1; END").unwrap(), -1);
    assert!(matches!(run("DEF main(): Integer DO RETURN 2147483647 + 1; END").unwrap_err(),
                     RuntimeFault::InvalidExitCode { ref found } if found == "2147483648"));
    assert!(matches!(run("DEF main() DO END").unwrap_err(),
                     RuntimeFault::InvalidExitCode { ref found } if found == "nil"));
    assert!(matches!(run("DEF other(): Integer DO RETURN 0; END").unwrap_err(),
                     RuntimeFault::Unresolved(NameError::Function { .. })));
}

#[test]
fn invocation_checks() {
    let interpreter = Interpreter::new(&global_scope());
    let print = interpreter.scope().lookup_function("print", 1).unwrap();

    assert!(matches!(interpreter.invoke(&print, Vec::new()).unwrap_err(),
                     RuntimeFault::ArgumentCount { expected: 1,
                                                   found: 0,
                                                   .. }));

    let signature = Function::new("sig", Vec::new(), Type::Nil, Callable::Signature);
    assert!(matches!(interpreter.invoke(&signature, Vec::new()).unwrap_err(),
                     RuntimeFault::NotInvocable { .. }));
}

#[test]
fn function_references_expire_with_their_scope() {
    let program = parse(&tokenize("DEF main(): Integer DO RETURN 0; END").unwrap()).unwrap();
    let main = {
        let interpreter = Interpreter::new(&global_scope());
        interpreter.execute(&program).unwrap();
        let main = interpreter.scope().lookup_function("main", 0).unwrap();
        main
    };

    let interpreter = Interpreter::new(&global_scope());
    assert!(matches!(interpreter.invoke(&main, Vec::new()).unwrap_err(),
                     RuntimeFault::ScopeExpired { .. }));
}

#[test]
fn member_calls_pass_the_receiver_first() {
    let scope = global_scope();
    let members = Scope::root();
    members.define_function(Function::native("repeat",
                                             vec![Type::String, Type::Integer],
                                             Type::String,
                                             |args| match args {
                                                 [Value::String(s), Value::Integer(n)] => {
                                                     let n = usize::try_from(n).unwrap_or(0);
                                                     Ok(Value::from(s.repeat(n)))
                                                 },
                                                 _ => Ok(Value::Nil),
                                             }));
    members.define_variable("empty", Type::String, true, Value::from(""));
    scope.define_members(Type::String, members);

    let program = parse(&tokenize(r#"DEF main() DO RETURN "ab".repeat(3) + "ab".empty; END"#).unwrap()).unwrap();
    let result = Interpreter::new(&scope).execute(&program).unwrap();

    assert_eq!(result, Value::from("ababab"));
}

#[test]
fn small_decimals_print_in_plain_notation() {
    let (result, printed) = execute(r#"
        DEF main() DO
            print(0.0000001);
            print(0.00000000000000000000001);
            print(0.001 * 0.001);
            RETURN "d = " + 0.00000010;
        END
    "#);

    assert_eq!(printed, "0.0000001\n0.00000000000000000000001\n0.000001\n");
    assert_eq!(result.unwrap(), Value::from("d = 0.00000010"));
}

#[test]
fn fields_keep_their_name_next_to_a_method() {
    let (result, _) = execute(r"
        LET count: Integer = 1;
        DEF count(): Integer DO RETURN 2; END
        DEF main(): Integer DO RETURN count + count(); END
    ");

    assert_eq!(result.unwrap(), Value::from(3));
}
