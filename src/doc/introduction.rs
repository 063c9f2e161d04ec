/*!
# Introductory Tutorial for NanoBASIC

Begin by opening a terminal and running the executable. If you get the
following, you have achieved success and are ready for this tutorial.
Type CTRL-D to exit NanoBASIC.
<pre><code>&nbsp;  NanoBASIC Ver 0.14
&nbsp;  OK
&nbsp;> █
</code></pre>

Stop a running program with CTRL-C. You can continue an interrupted
program with `RESUME`.

When you see the `OK` prompt, NanoBASIC is ready to accept a statement.
For this tutorial, lines that you type are marked with a "`>`". Go ahead
and try your first statement. Type in the marked line followed by ENTER.

<pre><code>&nbsp;  OK
&nbsp;> ? 120+3
&nbsp;  123
&nbsp;  OK
</code></pre>

A statement typed at the prompt executes immediately. To build a program,
enter `PROG` mode and type the lines one by one. Finish with a `#` on its
own line. A decimal number at the start of a line is a label for `GOTO`
and `GOSUB`; lines without labels are fine too.

<pre><code>&nbsp;> PROG
&nbsp;> A=0
&nbsp;> 10 A++:? A
&nbsp;> IF A<3 THEN 10 ENDIF
&nbsp;> #
&nbsp;> RUN
&nbsp;  1
&nbsp;  2
&nbsp;  3
&nbsp;  OK
</code></pre>

`LIST` prints the stored program back, `SAVE` keeps it across power
cycles, `SAVE !` makes it start by itself at boot, and `NEW` wipes it.
That is the whole machine; the [language summary](super::__Language)
covers every statement and function.
*/
