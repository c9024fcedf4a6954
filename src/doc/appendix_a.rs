/*!
# Error Messages

Errors are reported with their line and, for syntax errors, the columns
at fault. Lines count from 0 in error reports.

```text
TYPE MISMATCH IN 1; SLEEP: milliseconds must be a number [SLEEP "x"]
```

## Before the program runs
| Error | Meaning |
|-|-|
| SYNTAX ERROR | The line is not a statement. |
| UNTERMINATED STRING | A string has no closing quote. |
| ILLEGAL CHARACTER | A character that is not part of the language. |
| BLOCK MISMATCH | A closing statement without its opener, such as `WEND` without `WHILE`. |
| MISSING TERMINATOR | A block that is never closed. |
| DUPLICATE LABEL | Two `LABEL` or `SUB` lines with the same name. |
| UNDEFINED LABEL | `GOTO`, `GOSUB` or `CALL` to a name that does not exist. |
| ILLEGAL EXIT | `EXIT` or `CONTINUE` outside the loop it names. |
| NEXT MISMATCH | `NEXT` names a different variable. The program still runs. |

## While the program runs
| Error | Meaning |
|-|-|
| TYPE MISMATCH | A value of the wrong kind, such as text in a number variable. |
| DIVISION BY ZERO | |
| OVERFLOW | An integer result too large to hold. |
| SUBSCRIPT OUT OF RANGE | An array index past its bound. |
| REDIMENSIONED ARRAY | `DIM` of an array that already exists. |
| ILLEGAL FUNCTION CALL | A function or SUB given the wrong arguments. |
| RETURN WITHOUT GOSUB | |
| STACK OVERFLOW | Too many nested calls. |
| EXCEPTION | Raised by `THROW`. |
| FILE NOT FOUND, BAD FILE HANDLE, BAD FILE MODE, DISK I/O ERROR, FILE ALREADY EXISTS | File statements. |

Any runtime error inside `TRY` can be caught.
*/
