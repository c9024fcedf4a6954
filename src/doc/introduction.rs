/*!
# Introductory Tutorial for EduBASIC

Run the executable with no arguments to start the editor. Type CTRL-D to
exit. Stop a running program with CTRL-C.
<pre><code>&nbsp;  EduBASIC
&nbsp;> █
</code></pre>

A statement typed on its own runs immediately. This is called direct mode.

<pre><code>&nbsp;> print "Hello World"
&nbsp;  Hello World
</code></pre>

To build a program, put a line number in front of the statement. Lines
count from 1 and the number only says where the line goes; it is not part
of the program. `LIST` shows the program in canonical form with blocks
indented, and `RUN` starts it from the top.

<pre><code>&nbsp;> 1 for i=1 to 3
&nbsp;> 2 print "Hello"; i
&nbsp;> 3 next i
&nbsp;> list
&nbsp;     1 FOR i = 1 TO 3
&nbsp;     2     PRINT "Hello"; i
&nbsp;     3 NEXT i
&nbsp;> run
&nbsp;  Hello1
&nbsp;  Hello2
&nbsp;  Hello3
</code></pre>

Typing a number alone deletes that line. `NEW` clears the program.
`SAVE "file.bas"` and `LOAD "file.bas"` move it to and from disk. A file
given on the command line runs straight away:

<pre><code>&nbsp;$ edubasic --seed 42 game.bas
</code></pre>

## Variables

A variable's last character decides what it holds. `count%` holds whole
numbers, `total#` holds real numbers, `name$` holds text and `z&` holds
complex numbers. A name without a mark holds anything. Names are not case
sensitive, so `Count%` and `COUNT%` are the same variable.

<pre><code>&nbsp;> let z& = sqr(-4)
&nbsp;> print z&
&nbsp;  2i
</code></pre>

Arrays use square brackets and count from 0. `DIM a%[10]` makes eleven
elements, `a%[0]` through `a%[10]`. Functions use parentheses.

## Blocks

Every block has a closing statement. The editor reports a block that is
never closed, or closed by the wrong statement, before the program runs.

<pre><code>&nbsp;  SUB greet(name$, BYREF count%)
&nbsp;      PRINT "Hello, "; name$
&nbsp;      LET count% = count% + 1
&nbsp;  END SUB
&nbsp;
&nbsp;  TRY
&nbsp;      THROW "out of paper"
&nbsp;  CATCH problem$
&nbsp;      PRINT "Caught: "; problem$
&nbsp;  FINALLY
&nbsp;      PRINT "Done"
&nbsp;  END TRY
</code></pre>

`HELP` lists every statement and `HELP FOR` shows the form of one.

*/
