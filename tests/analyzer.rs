use std::rc::Rc;

use lectern::{
    ast::{Source, Statement},
    error::{NameError, TypeError},
    interpreter::{
        analyzer::core::Analyzer,
        lexer::tokenize,
        parser::core::parse,
        prelude::global_scope,
        scope::{Function, Scope},
        types::{Type, require_assignable},
        value::Value,
    },
};
use pretty_assertions::assert_eq;

const MAIN: &str = "DEF main(): Integer DO RETURN 0; END";

fn check_in(source: &str, scope: &Rc<Scope>) -> Result<Source, TypeError> {
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();
    Analyzer::new(scope).check(&program)?;
    Ok(program)
}

fn check(source: &str) -> Result<Source, TypeError> {
    check_in(source, &global_scope())
}

/// Checks `body` as the statements of an integer-returning `main`.
fn check_main(body: &str) -> Result<Source, TypeError> {
    check(&format!("DEF main(): Integer DO {body} END"))
}

fn assert_valid(body: &str) {
    if let Err(e) = check_main(body) {
        panic!("{body:?} was rejected: {e}");
    }
}

#[test]
fn assignability_lattice() {
    assert!(require_assignable(Type::Comparable, Type::Integer, 0).is_ok());
    assert!(require_assignable(Type::Any, Type::Nil, 0).is_ok());
    assert!(require_assignable(Type::Any, Type::Comparable, 0).is_ok());
    assert!(require_assignable(Type::String, Type::String, 0).is_ok());
    assert_eq!(require_assignable(Type::Integer, Type::Decimal, 7),
               Err(TypeError::NotAssignable { expected: Type::Integer,
                                              found:    Type::Decimal,
                                              offset:   7, }));
    assert!(require_assignable(Type::Boolean, Type::Integer, 0).is_err());
    assert!(require_assignable(Type::Comparable, Type::Boolean, 0).is_err());
    assert!(require_assignable(Type::Integer, Type::Any, 0).is_err());
}

#[test]
fn decorates_the_tree() {
    let source = check(r#"
        LET x: Integer = 5;
        DEF main(): Integer DO
            IF x > 3 DO
                print("big");
            ELSE
                print("small");
            END
            RETURN 0;
        END
    "#).unwrap();

    assert_eq!(source.fields[0].variable.get().unwrap().ty(), Type::Integer);

    let method = &source.methods[0];
    assert_eq!(method.function.get().unwrap().return_type(), Type::Integer);
    let Statement::If { condition, .. } = &method.body[0] else {
        panic!("expected an if statement");
    };
    assert_eq!(condition.resolved_type(), Some(Type::Boolean));
}

#[test]
fn declarations_take_the_initializer_type_when_untyped() {
    let source = check_main("LET d = 1.5; LET s: Any = 'c'; RETURN 0;").unwrap();
    let types = source.methods[0].body[..2].iter()
                                           .map(|statement| match statement {
                                               Statement::Declaration(declaration) => {
                                                   declaration.variable.get().unwrap().ty()
                                               },
                                               other => panic!("unexpected {other:?}"),
                                           })
                                           .collect::<Vec<_>>();

    assert_eq!(types, [Type::Decimal, Type::Any]);
}

#[test]
fn unknown_types_are_rejected() {
    assert_eq!(check(&format!("LET x: Float = 1; {MAIN}")).unwrap_err(),
               TypeError::UnknownType { name:   "Float".to_string(),
                                        offset: 4, });
    assert!(matches!(check_main("LET y: integer = 1; RETURN 0;").unwrap_err(),
                     TypeError::UnknownType { .. }));
}

#[test]
fn initializers_must_be_assignable() {
    assert_eq!(check(&format!("LET x: Integer = 1.5; {MAIN}")).unwrap_err(),
               TypeError::NotAssignable { expected: Type::Integer,
                                          found:    Type::Decimal,
                                          offset:   17, });
    assert!(check(&format!("LET x: Comparable = \"s\"; {MAIN}")).is_ok());
    assert!(check(&format!("LET x: Any = NIL; {MAIN}")).is_ok());
    // NIL is typed Any, which is not assignable to a concrete type.
    assert!(check(&format!("LET x: String = NIL; {MAIN}")).is_err());
}

#[test]
fn constants_need_an_initializer() {
    assert_eq!(check(&format!("LET CONST x: Integer; {MAIN}")).unwrap_err(),
               TypeError::UninitializedConstant { name:   "x".to_string(),
                                                  offset: 10, });
}

#[test]
fn declarations_need_a_type_or_an_initializer() {
    assert!(matches!(check_main("LET y; RETURN 0;").unwrap_err(),
                     TypeError::UntypedDeclaration { .. }));
    assert_valid("LET y: Integer; RETURN 0;");
}

#[test]
fn operator_typing() {
    assert_valid("LET b: Boolean = 1 < 2 AND 'a' != 'b' OR \"x\" == \"y\"; RETURN 0;");
    assert_valid("LET s: String = \"n = \" + 1; LET t: String = 2.5 + \"!\"; RETURN 0;");
    assert_valid("LET d: Decimal = 1.5 * 2.0 - 0.5 / 1.0; RETURN 7 / 2;");

    assert!(matches!(check_main("RETURN 1 + 1.0;").unwrap_err(),
                     TypeError::ArithmeticMismatch { operator: "+",
                                                     left: Type::Integer,
                                                     right: Type::Decimal,
                                                     .. }));
    assert!(matches!(check_main("RETURN 'a' * 2;").unwrap_err(),
                     TypeError::ArithmeticMismatch { .. }));
    assert!(matches!(check_main("IF 1 AND TRUE DO RETURN 1; END RETURN 0;").unwrap_err(),
                     TypeError::NotAssignable { expected: Type::Boolean,
                                                found: Type::Integer,
                                                .. }));
    assert!(matches!(check_main("IF TRUE < FALSE DO RETURN 1; END RETURN 0;").unwrap_err(),
                     TypeError::NotAssignable { expected: Type::Comparable,
                                                found: Type::Boolean,
                                                .. }));
}

#[test]
fn literal_ranges() {
    assert_valid("LET min = -2147483648; RETURN 2147483647;");
    assert!(matches!(check_main("RETURN 2147483648;").unwrap_err(),
                     TypeError::IntegerOutOfRange { .. }));
    assert!(matches!(check_main("RETURN -2147483649;").unwrap_err(),
                     TypeError::IntegerOutOfRange { .. }));

    let huge = format!("1{}.0", "0".repeat(309));
    assert!(matches!(check_main(&format!("LET d = {huge}; RETURN 0;")).unwrap_err(),
                     TypeError::DecimalOutOfRange { .. }));
    assert_valid("LET d = 0.000000000000000000000000000001; RETURN 0;");
}

#[test]
fn assignment_rules() {
    assert_valid("LET x = 1; x = x + 1; RETURN x;");

    assert_eq!(check_main("1 = 2; RETURN 0;").unwrap_err(),
               TypeError::InvalidAssignmentTarget { offset: 23 });
    assert!(matches!(check_main("LET d = 1.0; d = 1; RETURN 0;").unwrap_err(),
                     TypeError::AssignmentMismatch { target: Type::Decimal,
                                                     value: Type::Integer,
                                                     .. }));
    // Assignment requires identical types, not just assignable ones.
    assert!(matches!(check_main("LET a: Any = 1; a = 2; RETURN 0;").unwrap_err(),
                     TypeError::AssignmentMismatch { .. }));

    let error = check("LET CONST limit: Integer = 1; DEF main(): Integer DO limit = 2; RETURN 0; END").unwrap_err();
    assert!(matches!(error, TypeError::ConstantAssignment { ref name, .. } if name == "limit"));
}

#[test]
fn returns_are_checked_against_the_method() {
    assert!(matches!(check(&format!("DEF f() DO RETURN 1; END {MAIN}")).unwrap_err(),
                     TypeError::MissingReturnType { ref method, .. } if method == "f"));
    assert!(matches!(check_main("RETURN \"0\";").unwrap_err(),
                     TypeError::NotAssignable { expected: Type::Integer,
                                                found: Type::String,
                                                .. }));
    // Nested returns are checked too.
    assert!(check_main("WHILE TRUE DO IF TRUE DO RETURN 1.0; END END RETURN 0;").is_err());
    assert!(check(&format!("DEF f(): Any DO RETURN 'x'; END {MAIN}")).is_ok());
}

#[test]
fn if_needs_a_then_branch() {
    assert!(matches!(check_main("IF TRUE DO ELSE RETURN 1; END RETURN 0;").unwrap_err(),
                     TypeError::EmptyThenBranch { .. }));
}

#[test]
fn blocks_introduce_scopes() {
    assert_valid("LET x = 1; IF TRUE DO LET x = \"shadow\"; print(x); END RETURN x;");
    assert!(matches!(check_main("IF TRUE DO LET y = 1; END RETURN y;").unwrap_err(),
                     TypeError::Unresolved { source: NameError::Variable { .. },
                                             .. }));
    assert!(check_main("WHILE FALSE DO LET y = 1; END RETURN y;").is_err());
    assert_valid("FOR (i = 0; i < 3; i = i + 1) LET j = i * 2; print(j); END RETURN 0;");
    assert!(check_main("FOR (i = 0; i < 3; i = i + 1) END RETURN i;").is_err());
    // The loop variable takes the type of its initial value.
    assert!(check_main("FOR (i = 0; i < 3; i = 0.5) END RETURN 0;").is_err());
}

#[test]
fn functions_resolve_by_name_and_arity() {
    assert_valid("print(1); RETURN 0;");
    assert_eq!(check_main("print(1, 2); RETURN 0;").unwrap_err(),
               TypeError::Unresolved { source: NameError::Function { name:  "print".to_string(),
                                                                     arity: 2, },
                                       offset: 23, });

    let source = r#"
        DEF twice(n: Integer): Integer DO RETURN n * 2; END
        DEF twice(s: String, n: Integer): String DO RETURN s + n; END
        DEF main(): Integer DO print(twice("x", 1)); RETURN twice(2); END
    "#;
    assert!(check(source).is_ok());
    assert!(matches!(check(&source.replace("twice(2)", "twice(2.0)")).unwrap_err(),
                     TypeError::NotAssignable { expected: Type::Integer,
                                                found: Type::Decimal,
                                                .. }));
}

#[test]
fn methods_may_call_themselves_and_each_other() {
    let source = r"
        DEF even(n: Integer): Boolean DO
            IF n == 0 DO RETURN TRUE; END
            RETURN odd(n - 1);
        END
        DEF odd(n: Integer): Boolean DO
            IF n == 0 DO RETURN FALSE; END
            RETURN even(n - 1);
        END
        DEF main(): Integer DO RETURN 0; END
    ";
    // `odd` is declared after `even`, so the first reference is unresolved.
    assert!(matches!(check(source).unwrap_err(),
                     TypeError::Unresolved { source: NameError::Function { .. },
                                             .. }));

    let recursive = "DEF fact(n: Integer): Integer DO IF n < 2 DO RETURN 1; END RETURN n * fact(n - 1); END";
    assert!(check(&format!("{recursive} {MAIN}")).is_ok());
}

#[test]
fn main_is_required() {
    assert_eq!(check("LET x: Integer = 1;").unwrap_err(), TypeError::MissingMain);
    assert_eq!(check("DEF main(): String DO RETURN \"0\"; END").unwrap_err(),
               TypeError::MissingMain);
    assert_eq!(check("DEF main() DO END").unwrap_err(), TypeError::MissingMain);
    assert_eq!(check("DEF main(code: Integer): Integer DO RETURN code; END").unwrap_err(),
               TypeError::MissingMain);
}

#[test]
fn members_of_host_types() {
    let global = global_scope();
    let members = Scope::root();
    members.define_variable("size", Type::Integer, true, Value::Nil);
    members.define_function(Function::native("repeat",
                                             vec![Type::String, Type::Integer],
                                             Type::String,
                                             |_| Ok(Value::Nil)));
    global.define_members(Type::String, members);

    let valid = r#"DEF main(): Integer DO LET s: String = "ab".repeat(2); RETURN s.size; END"#;
    assert!(check_in(valid, &global).is_ok());

    let wrong_arity = r#"DEF main(): Integer DO print("ab".repeat()); RETURN 0; END"#;
    assert!(matches!(check_in(wrong_arity, &global).unwrap_err(),
                     TypeError::Unresolved { source: NameError::Function { arity: 1, .. },
                                             .. }));

    let constant = r#"DEF main(): Integer DO "ab".size = 1; RETURN 0; END"#;
    assert!(matches!(check_in(constant, &global).unwrap_err(),
                     TypeError::ConstantAssignment { .. }));

    let no_members = "DEF main(): Integer DO RETURN TRUE.size; END";
    assert!(matches!(check_in(no_members, &global).unwrap_err(),
                     TypeError::Unresolved { source: NameError::Members { .. },
                                             .. }));
}

#[test]
fn fields_and_methods_may_share_a_name() {
    let source = check(r"
        LET count: Integer = 1;
        DEF count(): Integer DO RETURN 2; END
        DEF main(): Integer DO RETURN count + count(); END
    ").unwrap();

    assert_eq!(source.fields[0].variable.get().unwrap().ty(), Type::Integer);

    // Without a field of that name the method name is a constant reference.
    let error = check_main("main = 1; RETURN 0;").unwrap_err();
    assert!(matches!(error, TypeError::ConstantAssignment { ref name, .. } if name == "main"));
}
