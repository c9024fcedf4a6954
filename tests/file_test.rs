mod common;
use basic::lang::ErrorCode;
use common::*;

#[test]
fn test_write_then_read_lines() {
    let src = "
OPEN \"notes.txt\" FOR OVERWRITE AS h%
WRITELINE h%, \"first\"
WRITELINE h%, \"second\"
CLOSE h%
OPEN \"notes.txt\" FOR READ AS h%
WHILE NOT EOF(h%)
  READLINE h%, l$
  PRINT l$
WEND
CLOSE h%";
    assert_eq!(run(src), "first\nsecond\n");
}

#[test]
fn test_append_seek_and_tell() {
    let src = "
OPEN \"log.txt\" FOR OVERWRITE AS h%
WRITE h%, 12
WRITE h%, \"ab\"
CLOSE h%
OPEN \"log.txt\" FOR APPEND AS h%
PRINT TELL(h%)
WRITE h%, \"!\"
CLOSE h%
READFILE s$ FROM \"log.txt\"
PRINT s$
OPEN \"log.txt\" FOR READ AS h%
SEEK h%, 2
READLINE h%, rest$
PRINT rest$
READLINE h%, gone$
PRINT \"[\"; gone$; \"]\"
CLOSE h%";
    assert_eq!(run(src), "4\n12ab!\nab!\n[]\n");
}

#[test]
fn test_whole_files_and_directories() {
    let src = "
MKDIR \"docs\"
WRITEFILE \"hello\" TO \"docs/a.txt\"
COPY \"docs/a.txt\" TO \"docs/b.txt\"
MOVE \"docs/b.txt\" TO \"c.txt\"
MKDIR \"docs/old\"
LISTDIR names$[] FROM \"docs\"
FOR i = 0 TO UBOUND(names$[])
  PRINT names$[i]
NEXT
READFILE t$ FROM \"c.txt\"
PRINT t$
DELETE \"c.txt\"
RMDIR \"docs/old\"
LISTDIR names$[] FROM \"/\"
PRINT UBOUND(names$[]); \" \"; names$[0]";
    assert_eq!(run(src), "a.txt\nold/\nhello\n0 docs/\n");
}

#[test]
fn test_file_errors() {
    let e = run_error("OPEN \"missing.txt\" FOR READ AS h%");
    assert_eq!(e.code(), ErrorCode::FileNotFound);
    let e = run_error("CLOSE 99");
    assert_eq!(e.code(), ErrorCode::BadFileHandle);
    let e = run_error("OPEN \"a.txt\" FOR OVERWRITE AS h%\nWRITE h%, \"x\"\nSEEK h%, 0\nREADLINE h%, l$");
    assert_eq!(e.code(), ErrorCode::BadFileMode);
    let e = run_error("MKDIR \"d\"\nMKDIR \"d\"");
    assert_eq!(e.code(), ErrorCode::FileAlreadyExists);
}

#[test]
fn test_file_errors_can_be_caught() {
    let src = "
TRY
  READFILE s$ FROM \"nope.txt\"
CATCH e$
  PRINT e$
END TRY";
    assert_eq!(run(src), "/nope.txt not found\n");
}
