use basic::lang::ErrorCode;
use basic::mach::{Event, KeyState, Runtime};

fn direct(r: &mut Runtime, line: &str) -> String {
    match r.step_line(&KeyState::new(), line) {
        Event::Print(s) => s,
        Event::Running => String::new(),
        Event::Errors(e) => format!("{}\n", e[0]),
        event => panic!("{:?}", event),
    }
}

#[test]
fn test_precedence() {
    let mut r = Runtime::default();
    assert_eq!(direct(&mut r, "PRINT 1+2*3"), "7\n");
    assert_eq!(direct(&mut r, "PRINT (1+2)*3"), "9\n");
    assert_eq!(direct(&mut r, "PRINT -2 ** 2"), "-4\n");
    assert_eq!(direct(&mut r, "PRINT 2 ** 3 ** 2"), "512\n");
}

#[test]
fn test_left_assoc() {
    let mut r = Runtime::default();
    assert_eq!(direct(&mut r, "PRINT 1.5/2*3"), "2.25\n");
    assert_eq!(direct(&mut r, "PRINT 1.5/(2.0*3)"), "0.25\n");
    assert_eq!(direct(&mut r, "PRINT 10-4-3"), "3\n");
}

#[test]
fn test_variables() {
    let mut r = Runtime::default();
    direct(&mut r, "LET a = 1+2*3");
    assert_eq!(direct(&mut r, "PRINT a*2"), "14\n");
    let e = match r.step_line(&KeyState::new(), "LET big% = 3000000000 * 3000000000") {
        Event::Errors(e) => e[0].clone(),
        event => panic!("{:?}", event),
    };
    assert_eq!(e.code(), ErrorCode::Overflow);
}

#[test]
fn test_comparisons() {
    let mut r = Runtime::default();
    assert_eq!(direct(&mut r, "PRINT 1 < 2; 2 <= 1; \"a\" < \"b\"; 3 <> 3"), "TRUEFALSETRUEFALSE\n");
    assert_eq!(direct(&mut r, "PRINT 1 = 1.0"), "TRUE\n");
}

#[test]
fn test_strings() {
    let mut r = Runtime::default();
    assert_eq!(direct(&mut r, "PRINT \"ab\" + \"cd\""), "abcd\n");
    assert!(direct(&mut r, "PRINT \"ab\" - \"cd\"").starts_with("TYPE MISMATCH"));
    assert!(direct(&mut r, "PRINT \"ab\" + 1").starts_with("TYPE MISMATCH"));
}

#[test]
fn test_logic_and_bits() {
    let mut r = Runtime::default();
    assert_eq!(direct(&mut r, "PRINT TRUE AND FALSE; TRUE OR FALSE; TRUE XOR TRUE"), "FALSETRUEFALSE\n");
    assert_eq!(direct(&mut r, "PRINT 12 AND 10; 12 OR 3; NOT 0"), "815-1\n");
}
