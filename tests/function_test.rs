mod common;
use basic::lang::ErrorCode;
use common::*;

#[test]
fn test_string_functions() {
    let src = r#"
LET s$ = "Hello, World"
PRINT LEFT$(s$, 5)
PRINT RIGHT$(s$, 5)
PRINT MID$(s$, 8, 3)
PRINT MID$(s$, 8)
PRINT LEN(s$)
PRINT UCASE$("abc"); LCASE$("DEF")
PRINT INSTR(s$, "o"); INSTR(6, s$, "o")
PRINT ASC("A"); CHR$(66)
PRINT STR$(12) + "!"
PRINT VAL("42abc") + 1"#;
    assert_eq!(
        run(src),
        "Hello\nWorld\nWor\nWorld\n12\nABCdef\n59\n65B\n12!\n43\n"
    );
}

#[test]
fn test_math_functions() {
    let src = "
PRINT ABS(-3); \" \"; ABS(-2.5)
PRINT SQR(16)
PRINT INT(2.7); \" \"; INT(-2.5)
PRINT SGN(-4); SGN(0); SGN(9)
PRINT 2 ** 10
PRINT 7 / 2
PRINT 6 / 3
PRINT 7 MOD 3";
    assert_eq!(run(src), "3 2.5\n4\n2 -3\n-101\n1024\n3.5\n2\n1\n");
}

#[test]
fn test_complex_numbers() {
    let src = "
LET z& = SQR(-4)
PRINT z&
LET w& = 3+4i
PRINT ABS(w&)
PRINT RE(w&); \" \"; IM(w&)
PRINT CMPLX(1, -2)
PRINT (1+1i) * (1+1i)";
    assert_eq!(run(src), "2i\n5\n3 4\n1-2i\n2i\n");
}

#[test]
fn test_rnd() {
    let src = "
RANDOMIZE 42
LET a = RND(100)
RANDOMIZE 42
LET b = RND(100)
PRINT a = b
LET bad = 0
FOR i = 1 TO 200
  LET r = RND(6)
  IF r < 1 OR r > 6 THEN
    LET bad = bad + 1
  END IF
  LET f = RND
  IF f < 0 OR f >= 1 THEN
    LET bad = bad + 1
  END IF
NEXT
PRINT bad";
    assert_eq!(run(src), "TRUE\n0\n");
}

#[test]
fn test_seeded_runs_repeat() {
    let src = "FOR i = 1 TO 5\nPRINT RND(1000);\nNEXT\nPRINT";
    assert_eq!(run(src), run(src));
}

#[test]
fn test_clock_functions() {
    let src = "
LET t = TIMER
PRINT t >= 0 AND t < 86400
PRINT LEN(TIME$); LEN(DATE$)";
    assert_eq!(run(src), "TRUE\n810\n");
}

#[test]
fn test_function_errors() {
    let e = run_error("PRINT LEFT$(\"abc\")");
    assert_eq!(e.code(), ErrorCode::IllegalFunctionCall);
    assert!(e.text().starts_with("LEFT$ expects 2 argument(s), got 1"));
    let e = run_error("PRINT FROB(1)");
    assert!(e.text().starts_with("unknown function: FROB"));
    let e = run_error("PRINT RND(0)");
    assert_eq!(e.code(), ErrorCode::IllegalFunctionCall);
    let e = run_error("PRINT LEN(5)");
    assert_eq!(e.code(), ErrorCode::TypeMismatch);
    let e = run_error("PRINT 1 / 0");
    assert_eq!(e.code(), ErrorCode::DivisionByZero);
    let e = run_error("PRINT 9223372036854775807 + 1");
    assert_eq!(e.code(), ErrorCode::Overflow);
}
