mod common;
use common::*;

#[test]
fn test_for_next() {
    let src = "FOR i = 1 TO 3\nPRINT i;\nNEXT i\nPRINT\nPRINT i";
    assert_eq!(run(src), "123\n4\n");
}

#[test]
fn test_for_step() {
    let src = "FOR i = 10 TO 1 STEP -3\nPRINT i;\nNEXT\nPRINT";
    assert_eq!(run(src), "10741\n");
    let src = "FOR x# = 0 TO 1 STEP 0.5\nPRINT x#; \" \";\nNEXT\nPRINT";
    assert_eq!(run(src), "0 0.5 1 \n");
}

#[test]
fn test_for_zero_iterations() {
    let src = "FOR i = 5 TO 1\nPRINT \"never\"\nNEXT\nPRINT \"done\"";
    assert_eq!(run(src), "done\n");
}

#[test]
fn test_nested_for() {
    let src = "
FOR i = 1 TO 2
  FOR j = 1 TO 3
    PRINT i * j;
  NEXT j
  PRINT
NEXT i";
    assert_eq!(run(src), "123\n246\n");
}

#[test]
fn test_while_wend() {
    let src = "LET n = 0\nWHILE n < 3\nLET n = n + 1\nWEND\nPRINT n";
    assert_eq!(run(src), "3\n");
    let src = "WHILE FALSE\nPRINT \"never\"\nWEND\nPRINT \"done\"";
    assert_eq!(run(src), "done\n");
}

#[test]
fn test_do_loop() {
    let src = "LET n = 0\nDO\nLET n = n + 1\nLOOP UNTIL n >= 5\nPRINT n";
    assert_eq!(run(src), "5\n");
    let src = "LET n = 10\nDO WHILE n < 3\nLET n = n + 1\nLOOP\nPRINT n";
    assert_eq!(run(src), "10\n");
    let src = "LET n = 0\nDO UNTIL n = 4\nLET n = n + 2\nLOOP\nPRINT n";
    assert_eq!(run(src), "4\n");
    let src = "LET n = 0\nDO\nLET n = n + 1\nLOOP WHILE n < 7\nPRINT n";
    assert_eq!(run(src), "7\n");
}

#[test]
fn test_until_uend() {
    let src = "UNTIL k% = 3\nLET k% = k% + 1\nUEND\nPRINT k%";
    assert_eq!(run(src), "3\n");
}

#[test]
fn test_exit_for() {
    let src = "
FOR i = 1 TO 10
  IF i = 3 THEN
    EXIT FOR
  END IF
  PRINT i;
NEXT i
PRINT
PRINT i";
    assert_eq!(run(src), "12\n3\n");
}

#[test]
fn test_continue_for() {
    let src = "
FOR i = 1 TO 5
  IF i MOD 2 = 0 THEN
    CONTINUE FOR
  END IF
  PRINT i;
NEXT
PRINT";
    assert_eq!(run(src), "135\n");
}

#[test]
fn test_exit_and_continue_while() {
    let src = "
LET n = 0
WHILE TRUE
  LET n = n + 1
  IF n = 2 THEN
    CONTINUE WHILE
  END IF
  IF n > 4 THEN
    EXIT WHILE
  END IF
  PRINT n;
WEND
PRINT";
    assert_eq!(run(src), "134\n");
}

#[test]
fn test_exit_do_from_nested_for() {
    let src = "
DO
  FOR i = 1 TO 3
    IF i = 2 THEN
      EXIT DO
    END IF
    PRINT i;
  NEXT
LOOP
PRINT \"out\"";
    assert_eq!(run(src), "1out\n");
}

#[test]
fn test_goto_loop() {
    let src = "
LET n = 0
LABEL top
LET n = n + 1
IF n < 3 THEN
  GOTO top
END IF
PRINT n";
    assert_eq!(run(src), "3\n");
}

#[test]
fn test_endless_loop_hits_step_limit() {
    let mut r = runtime("DO\nLOOP");
    assert_eq!(exec_n(&mut r, 100), "\n100 steps exceeded.\n");
}

#[test]
fn test_end_stops() {
    assert_eq!(run("PRINT 1\nEND\nPRINT 2"), "1\n");
}
