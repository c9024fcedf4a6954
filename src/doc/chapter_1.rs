/*!
# Statements

Every line holds one statement and every statement starts with its
keyword. Assignment is no exception: write `LET x = 1`, not `x = 1`.
*/

pub mod LET {
    /*!
    ## `LET target = expression`
    Stores a value in a variable, an array element or a member.
    ```text
    LET count% = 3.7
    LET grid#[1, 2] = 0.5
    LET player.x = player.x + 1
    PRINT count%
    3
    ```
    Storing a real in an integer variable truncates toward zero. Storing a
    number in a string variable is a `TYPE MISMATCH`.
    */
}

pub mod DIM {
    /*!
    ## `DIM a[n] [, b[n, m]]`
    Creates arrays with upper bounds n and m. Indexes count from 0, so
    `DIM a%[3]` has four elements. An array used before any `DIM` gets a
    bound of 10 in each dimension. Dimensioning the same array twice is a
    `REDIMENSIONED ARRAY` error; `ERASE a[]` first.
    */
}

pub mod PRINT {
    /*!
    ## `PRINT [item {; item | , item}] [;|,]`
    A `;` joins items with nothing between them. A `,` moves to the next
    print zone of 14 columns. A trailing `;` or `,` keeps the cursor on the
    line.
    ```text
    PRINT "a"; 1, "b"
    a1            b
    ```
    */
}

pub mod INPUT {
    /*!
    ## `INPUT ["prompt";] v [, v]`
    Waits for a line of text. Fields are separated by commas and stored in
    order. Without a prompt the program asks with `? `.
    */
}

pub mod IF {
    /*!
    ## `IF c THEN ... [ELSEIF c THEN ...] [ELSE ...] END IF`
    Runs the first branch whose condition holds. Numbers other than zero
    are true.
    ```text
    IF score > 90 THEN
        PRINT "A"
    ELSEIF score > 80 THEN
        PRINT "B"
    ELSE
        PRINT "keep going"
    END IF
    ```
    `UNLESS c THEN ... END UNLESS` runs its body when the condition is
    false.
    */
}

pub mod SELECT {
    /*!
    ## `SELECT CASE e ... END SELECT`
    Compares one value against each `CASE` in turn. A case lists values,
    ranges `a TO b` and comparisons `IS > x`. `CASE ELSE` catches the rest
    and must come last.
    ```text
    SELECT CASE n%
    CASE 1
        PRINT "one"
    CASE 2 TO 4, 9
        PRINT "a few"
    CASE IS > 10
        PRINT "many"
    CASE ELSE
        PRINT "some"
    END SELECT
    ```
    */
}

pub mod FOR {
    /*!
    ## `FOR v = a TO b [STEP s] ... NEXT [v]`
    Counts v from a to b. The loop is skipped entirely when a is already
    past b. After the loop v holds the first value past b.
    ```text
    FOR i = 10 TO 1 STEP -3
        PRINT i;
    NEXT i
    10741
    ```
    A `NEXT` naming a different variable than its `FOR` is reported when
    the program is listed, but the program still runs.
    */
}

pub mod WHILE {
    /*!
    ## Condition loops
    ```text
    WHILE c ... WEND
    DO [WHILE c | UNTIL c] ... LOOP [WHILE c | UNTIL c]
    UNTIL c ... UEND
    ```
    `WHILE` tests before each pass. `DO` may test at the top, at the
    bottom, or not at all. `UNTIL` runs its body and then stops once the
    condition holds.

    `EXIT FOR`, `EXIT WHILE`, `EXIT DO` and `EXIT UNTIL` leave the named
    loop; `CONTINUE` with the same words starts its next pass.
    */
}

pub mod SUB {
    /*!
    ## `SUB name[(p, BYREF q, a%[])] ... END SUB`
    Defines a subroutine that `CALL name(args)` runs. Parameters receive
    copies of their arguments unless marked `BYREF`, in which case the
    subroutine works on the caller's variable. `LOCAL` names inside a SUB
    shadow globals; arrays from `DIM` inside a SUB are local too. `EXIT SUB`
    returns early.
    ```text
    SUB add(a, b, BYREF total)
        LET total = a + b
    END SUB
    CALL add(2, 3, t)
    PRINT t
    5
    ```
    `GOSUB label ... RETURN` and `GOTO label` jump to a `LABEL` line.
    */
}

pub mod TRY {
    /*!
    ## `TRY ... [CATCH [v$] ...] [FINALLY ...] END TRY`
    A runtime error inside `TRY` jumps to `CATCH`, storing the message in
    v$. `FINALLY` runs whether or not an error happened; an error that
    reached it without being caught is raised again at `END TRY`.
    `THROW e` raises an error of your own.
    ```text
    TRY
        THROW "boom"
    CATCH e$
        PRINT "caught "; e$
    FINALLY
        PRINT "cleanup"
    END TRY
    caught boom
    cleanup
    ```
    */
}

pub mod GRAPHICS {
    /*!
    ## Graphics
    ```text
    CLS
    COLOR fg [, bg]
    PSET x, y [WITH c]
    LINE FROM x1, y1 TO x2, y2 [WITH c]
    RECTANGLE FROM x1, y1 TO x2, y2 [WITH c] [FILLED]
    OVAL AT x, y RADII rx, ry [WITH c] [FILLED]
    CIRCLE AT x, y RADIUS r [WITH c] [FILLED]
    TRIANGLE x1, y1, x2, y2, x3, y3 [WITH c] [FILLED]
    ARC AT x, y RADIUS r FROM a1 TO a2 [WITH c]
    PAINT AT x, y WITH c
    GET s$ FROM x1, y1 TO x2, y2
    PUT s$ AT x, y
    TURTLE commands$
    SET LINE SPACING ON|OFF
    SET TEXT WRAP ON|OFF
    ```
    Drawing switches the display to the graphics tab.
    */
}

pub mod AUDIO {
    /*!
    ## Audio
    ```text
    TEMPO bpm
    VOLUME level
    VOICE i, preset [WITH attack, decay, sustain, release]
    PLAY voice, macro$
    SET AUDIO ON|OFF
    ```
    */
}

pub mod FILES {
    /*!
    ## Files
    ```text
    OPEN path FOR READ|APPEND|OVERWRITE AS h%
    WRITE h%, e
    WRITELINE h%, e
    READLINE h%, v$
    SEEK h%, position
    CLOSE h%
    READFILE v$ FROM path
    WRITEFILE e TO path
    LISTDIR names$[] FROM path
    MKDIR path
    RMDIR path
    COPY from TO to
    MOVE from TO to
    DELETE path
    ```
    `EOF(h%)` is true once a handle has nothing left to read and `TELL(h%)`
    gives its position.
    */
}

pub mod MISC {
    /*!
    ## Everything else
    `END` stops the program. `SLEEP ms` pauses. `RANDOMIZE [seed]` restarts
    the random numbers. `SWAP a, b` exchanges two values. `SORT a[]
    [DESCENDING]` sorts a one-dimensional array. `CONSOLE e` writes to the
    debug console and `HELP [keyword]` shows a statement's syntax.
    */
}
