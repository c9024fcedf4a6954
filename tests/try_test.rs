mod common;
use basic::lang::ErrorCode;
use common::*;

#[test]
fn test_throw_catch_finally() {
    let src = "
TRY
  THROW \"boom\"
  PRINT \"skipped\"
CATCH e$
  PRINT \"caught \"; e$
FINALLY
  PRINT \"cleanup\"
END TRY
PRINT \"after\"";
    assert_eq!(run(src), "caught boom\ncleanup\nafter\n");
}

#[test]
fn test_finally_runs_without_error() {
    let src = "
TRY
  PRINT \"body\"
CATCH
  PRINT \"never\"
FINALLY
  PRINT \"cleanup\"
END TRY";
    assert_eq!(run(src), "body\ncleanup\n");
}

#[test]
fn test_catch_runtime_error() {
    let src = "
TRY
  LET x = 1 / 0
CATCH e$
  PRINT e$
END TRY";
    assert_eq!(run(src), "DIVISION BY ZERO\n");
}

#[test]
fn test_finally_reraises() {
    let src = "
TRY
  TRY
    THROW \"inner\"
  FINALLY
    PRINT \"inner finally\"
  END TRY
  PRINT \"skipped\"
CATCH e$
  PRINT \"outer \"; e$
END TRY";
    assert_eq!(run(src), "inner finally\nouter inner\n");
}

#[test]
fn test_error_in_catch_goes_to_finally() {
    let src = "
TRY
  TRY
    THROW \"first\"
  CATCH
    THROW \"second\"
  FINALLY
    PRINT \"finally\"
  END TRY
CATCH e$
  PRINT e$
END TRY";
    assert_eq!(run(src), "finally\nsecond\n");
}

#[test]
fn test_catch_unwinds_loops_and_calls() {
    let src = "
SUB fail(n)
  FOR i = 1 TO 3
    IF i = n THEN
      THROW \"stop at \" + STR$(i)
    END IF
  NEXT
END SUB
TRY
  CALL fail(2)
CATCH e$
  PRINT e$
END TRY
FOR k = 1 TO 2
  PRINT k;
NEXT
PRINT";
    assert_eq!(run(src), "stop at 2\n12\n");
}

#[test]
fn test_try_in_loop() {
    let src = "
FOR i = 1 TO 3
  TRY
    IF i = 2 THEN
      THROW \"two\"
    END IF
    PRINT i;
  CATCH e$
    PRINT e$;
  END TRY
NEXT
PRINT";
    assert_eq!(run(src), "1two3\n");
}

#[test]
fn test_uncaught_throw() {
    let e = run_error("PRINT \"start\"\nTHROW \"boom\"");
    assert_eq!(e.code(), ErrorCode::UserThrow);
    assert_eq!(e.to_string(), "EXCEPTION IN 1; boom [THROW \"boom\"]");
}

#[test]
fn test_catch_without_try_is_structural() {
    let out = run("CATCH\nPRINT 1");
    assert!(out.contains("CATCH without TRY"));
    assert!(!out.contains("1\n"));
}

#[test]
fn test_exit_for_leaves_try() {
    let src = "
FOR i = 1 TO 3
  TRY
    EXIT FOR
  CATCH
    PRINT \"stale catch\"
  END TRY
NEXT
THROW \"later\"";
    assert_eq!(run(src), "EXCEPTION IN 8; later [THROW \"later\"]\n");
}

#[test]
fn test_goto_leaves_try() {
    let src = "
TRY
  GOTO out
CATCH
  PRINT \"stale catch\"
END TRY
LABEL out
THROW \"later\"";
    assert_eq!(run(src), "EXCEPTION IN 7; later [THROW \"later\"]\n");
}

#[test]
fn test_return_leaves_try() {
    let src = "
GOSUB work
THROW \"later\"
LABEL work
TRY
  RETURN
CATCH
  PRINT \"stale catch\"
END TRY";
    assert_eq!(run(src), "EXCEPTION IN 2; later [THROW \"later\"]\n");
}

#[test]
fn test_exit_sub_leaves_try() {
    let src = "
SUB s
  TRY
    EXIT SUB
  CATCH
    PRINT \"stale catch\"
  END TRY
END SUB
CALL s
THROW \"later\"";
    assert_eq!(run(src), "EXCEPTION IN 9; later [THROW \"later\"]\n");
}

#[test]
fn test_continue_leaves_inner_try() {
    let src = "
TRY
  FOR i = 1 TO 2
    TRY
      CONTINUE FOR
    CATCH
      PRINT \"inner\"
    END TRY
  NEXT
  THROW \"later\"
CATCH e$
  PRINT \"outer \"; e$
END TRY";
    assert_eq!(run(src), "outer later\n");
}

#[test]
fn test_try_in_recursive_sub() {
    let src = "
SUB t(n)
  TRY
    IF n > 0 THEN
      CALL t(n - 1)
    END IF
    THROW n
  CATCH e$
    PRINT \"depth \"; e$
  END TRY
END SUB
CALL t(1)";
    assert_eq!(run(src), "depth 0\ndepth 1\n");
}
