/*!
# Functions

Function names are followed by parentheses. `RND`, `TIMER`, `TIME$` and
`DATE$` may also be written without them.
*/

pub mod ABS {
    /*!
    ## `ABS(X)` Returns the absolute value of X. For complex X, its magnitude.
    ```text
    PRINT ABS(3+4i)
    5
    ```
    */
}

pub mod ASC {
    /*!
    ## `ASC(X$)` Returns the unicode value of the first character of X$.
    ```text
    PRINT ASC("A")
    65
    ```
    */
}

pub mod CHR {
    /*!
    ## `CHR$(X)` Returns the character with unicode value X.
    */
}

pub mod CMPLX {
    /*!
    ## `CMPLX(X, Y)` Returns the complex number X+Yi.
    `RE(Z)` and `IM(Z)` take it apart again.
    */
}

pub mod INSTR {
    /*!
    ## `INSTR([N,] X$, Y$)` Finds Y$ in X$.
    Returns the position of the first match at or after position N, or 0.
    ```text
    PRINT INSTR("Hello", "l")
    3
    ```
    */
}

pub mod INT {
    /*!
    ## `INT(X)` Returns the largest integer not greater than X.
    ```text
    PRINT INT(-2.5)
    -3
    ```
    */
}

pub mod LEFT {
    /*!
    ## `LEFT$(X$, N)` Returns the first N characters of X$.
    `RIGHT$(X$, N)` returns the last N and `MID$(X$, P [, N])` returns N
    characters starting at position P.
    */
}

pub mod LEN {
    /*!
    ## `LEN(X$)` Returns the number of characters in X$.
    */
}

pub mod LOG {
    /*!
    ## `LOG(X)` Returns the natural logarithm of X.
    Negative X gives a complex result. `LOG(0)` is an error.
    */
}

pub mod RND {
    /*!
    ## `RND` or `RND(N)` Random numbers.
    Without an argument, a real number from 0 up to but not including 1.
    With one, a whole number from 1 to N.
    ```text
    RANDOMIZE 42
    PRINT RND(6)
    ```
    */
}

pub mod SQR {
    /*!
    ## `SQR(X)` Returns the square root of X.
    ```text
    PRINT SQR(-4)
    2i
    ```
    */
}

pub mod STR {
    /*!
    ## `STR$(X)` Returns X as text. `VAL(X$)` reads the number at the start of X$.
    */
}

pub mod TIMER {
    /*!
    ## `TIMER` Returns the seconds since midnight.
    `TIME$` is the time as `HH:MM:SS` and `DATE$` the date as `YYYY-MM-DD`.
    */
}

pub mod UBOUND {
    /*!
    ## `UBOUND(A[] [, D])` Returns the upper bound of dimension D of A.
    */
}

pub mod KEYDOWN {
    /*!
    ## `KEYDOWN(K$)` True while key K$ is held.
    `KEYUP(K$)` is true once K$ has been released.
    */
}
