/*!
# Language Summary

All values are signed integers, 16 bits wide unless the `int32` build is
used. Variables are the letters `A` through `Z`, plus one array `@[i]`.

## Statements

| Statement | Effect |
|---|---|
| `? e` or `PRINT e` | Print items separated by `,` (tab) or `;` (nothing). A trailing `;` holds the line. |
| `INPUT v` | Read a number from the console into `v`. A `0x` prefix reads hex. |
| `GOTO e` / `GOSUB e` / `RETURN` | Jump to the line labelled `e`; subroutines return. |
| `FOR v=a TO b` [`STEP s`] ... `NEXT` | Counted loop. |
| `DO` ... `LOOP` [`WHILE e`] | Loop; the tail test reruns while `e` is true. |
| `WHILE e` ... `LOOP` | Head-tested loop. |
| `EXIT` / `CONTINUE` | Leave or restart the innermost loop. |
| `IF e THEN` ... [`ELSEIF e THEN` ...] [`ELSE` ...] `ENDIF` | Conditional block. `THEN` followed by a number is a `GOTO`. |
| `DATA`, `READ v`, `RESTORE` | Inline constants and the read cursor. |
| `RUN`, `END`, `STOP`, `RESUME` | Start, finish, break, continue. |
| `NEW`, `LIST`, `PROG` | Wipe, show, or enter the stored program. |
| `SAVE` [`!`\|`0`], `LOAD` | Snapshot to persistent storage. `!` arms auto-run, `0` erases. |
| `DELAY e`, `PAUSE` | Wait milliseconds, or wait for any key. |
| `OUTP p,v`, `PWM p,v` | Drive a pin. |
| `RANDOMIZE e` | Seed the random source; 0 picks an arbitrary seed. |
| `RESET` | Soft-reset the machine. |

Assignments accept `=`, `+=`, `-=`, `*=`, `/=`, `%=`, `|=`, `&=`, `^=`,
`<<=`, `>>=`, and the statement forms `v++` and `v--`.

## Expressions

Four precedence tiers, low to high, all left-associative:

1. `&` `|` `^` `&&` `||`
2. `=` `==` `<>` `!=` `<` `<=` `>` `>=` `<<` `>>`
3. `+` `-`
4. `*` `/` `%`

Leaves are literals (decimal or `0x` hex), variables, `@[e]`, `(e)`, the
prefixes `-` `!` `~`, and the functions below. Comparisons yield 1 or 0;
`&&` and `||` evaluate both sides.

## Functions and system variables

| Form | Value |
|---|---|
| `RND(n)` | Random value in `0..n`. |
| `ABS(e)` | Magnitude. |
| `INP(p)` / `ADC(c)` | Digital or analog input. |
| `INKEY()` | Pending key, or -1. `INKEY(0)` waits; `INKEY(t)` waits up to `t` ms. |
| `TICK` | Milliseconds since boot. |

`CHR(e)`, `DEC(e[,w])`, and `HEX(e[,w])` are print items: a raw byte, and
width-formatted decimal or hex. Negative `w` zero-pads; a hundreds digit
in `w` places a decimal point that many digits from the right.
*/
