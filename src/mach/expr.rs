//! The expression evaluator: four precedence tiers over the bytecode
//! cursor, plus the leaf. Every tier charges one unit of depth on entry,
//! so runaway nesting stops at `Expr too deep` instead of the host
//! stack.

use super::runtime::Runtime;
use super::EXPR_DEPTH_MAX;
use crate::error;
use crate::host::Host;
use crate::lang::token::{self, Keyword, Opcode};
use crate::lang::{Int, Result};

impl<H: Host> Runtime<H> {
    fn nested(
        &mut self,
        body: fn(&mut Runtime<H>) -> Result<Int>,
    ) -> Result<Int> {
        if self.expr_depth >= EXPR_DEPTH_MAX {
            return Err(error!(ExprTooDeep));
        }
        self.expr_depth += 1;
        let result = body(self);
        self.expr_depth -= 1;
        result
    }

    /// Tier 1: bitwise and logical connectives. The logical forms
    /// evaluate both operands; there is no short circuit.
    pub(super) fn expr(&mut self) -> Result<Int> {
        self.nested(Self::expr_tier1)
    }

    fn expr_tier1(&mut self) -> Result<Int> {
        let mut acc = self.expr_cmp()?;
        loop {
            match self.fetch() {
                b'&' => {
                    if self.peek() == b'&' {
                        self.skip(1);
                        let rhs = self.expr_cmp()?;
                        acc = Int::from(acc != 0 && rhs != 0);
                    } else {
                        acc &= self.expr_cmp()?;
                    }
                }
                b'|' => {
                    if self.peek() == b'|' {
                        self.skip(1);
                        let rhs = self.expr_cmp()?;
                        acc = Int::from(acc != 0 || rhs != 0);
                    } else {
                        acc |= self.expr_cmp()?;
                    }
                }
                b'^' => acc ^= self.expr_cmp()?,
                _ => {
                    self.unfetch();
                    return Ok(acc);
                }
            }
        }
    }

    /// Tier 2: comparisons and shifts, distinguished by their second
    /// character.
    fn expr_cmp(&mut self) -> Result<Int> {
        self.nested(Self::expr_tier2)
    }

    fn expr_tier2(&mut self) -> Result<Int> {
        let mut acc = self.expr_add()?;
        loop {
            match self.fetch() {
                b'>' => {
                    let second = self.fetch();
                    if second == b'=' {
                        acc = Int::from(acc >= self.expr_add()?);
                    } else if second == b'>' {
                        acc = acc.wrapping_shr(self.expr_add()? as u32);
                    } else {
                        self.unfetch();
                        acc = Int::from(acc > self.expr_add()?);
                    }
                }
                b'<' => {
                    let second = self.fetch();
                    if second == b'=' {
                        acc = Int::from(acc <= self.expr_add()?);
                    } else if second == b'>' {
                        acc = Int::from(acc != self.expr_add()?);
                    } else if second == b'<' {
                        acc = acc.wrapping_shl(self.expr_add()? as u32);
                    } else {
                        self.unfetch();
                        acc = Int::from(acc < self.expr_add()?);
                    }
                }
                b'=' => {
                    if self.peek() == b'=' {
                        self.skip(1);
                    }
                    acc = Int::from(acc == self.expr_add()?);
                }
                b'!' => {
                    if self.peek() != b'=' {
                        self.unfetch();
                        return Ok(acc);
                    }
                    self.skip(1);
                    acc = Int::from(acc != self.expr_add()?);
                }
                _ => {
                    self.unfetch();
                    return Ok(acc);
                }
            }
        }
    }

    /// Tier 3: sums.
    fn expr_add(&mut self) -> Result<Int> {
        self.nested(Self::expr_tier3)
    }

    fn expr_tier3(&mut self) -> Result<Int> {
        let mut acc = self.expr_mul()?;
        loop {
            match self.fetch() {
                b'+' => acc = acc.wrapping_add(self.expr_mul()?),
                b'-' => acc = acc.wrapping_sub(self.expr_mul()?),
                _ => {
                    self.unfetch();
                    return Ok(acc);
                }
            }
        }
    }

    /// Tier 4: products, quotients, remainders.
    fn expr_mul(&mut self) -> Result<Int> {
        self.nested(Self::expr_tier4)
    }

    fn expr_tier4(&mut self) -> Result<Int> {
        let mut acc = self.value()?;
        loop {
            match self.fetch() {
                b'*' => acc = acc.wrapping_mul(self.value()?),
                b'/' => {
                    let rhs = self.value()?;
                    if rhs == 0 {
                        return Err(error!(DivisionByZero));
                    }
                    acc = acc.wrapping_div(rhs);
                }
                b'%' => {
                    let rhs = self.value()?;
                    if rhs == 0 {
                        return Err(error!(DivisionByZero));
                    }
                    acc = acc.wrapping_rem(rhs);
                }
                _ => {
                    self.unfetch();
                    return Ok(acc);
                }
            }
        }
    }

    /// The leaf: literals, variables, parens, unary operators, function
    /// calls, system variables.
    fn value(&mut self) -> Result<Int> {
        self.nested(Self::value_inner)
    }

    fn value_inner(&mut self) -> Result<Int> {
        match Opcode::from_byte(self.fetch()) {
            Opcode::Var(v) => Ok(self.vars[usize::from(v - b'A')]),
            Opcode::ArrayMark => {
                let slot = self.array_ref()?;
                Ok(self.load(slot))
            }
            Opcode::Digit(d) => Ok(Int::from(d)),
            Opcode::Value { hex, width } => Ok(self.fetch_payload(width, hex)),
            Opcode::Char(b'(') => {
                let v = self.expr()?;
                self.expect(b')')?;
                Ok(v)
            }
            Opcode::Char(b'-') => Ok(self.value()?.wrapping_neg()),
            Opcode::Char(b'!') => Ok(Int::from(self.value()? == 0)),
            Opcode::Char(b'~') => Ok(!self.value()?),
            Opcode::Word(Keyword::Rnd) => {
                let bound = self.paren_arg()?;
                if bound <= 0 {
                    Ok(0)
                } else {
                    Ok(self.host.random(bound))
                }
            }
            Opcode::Word(Keyword::Abs) => Ok(self.paren_arg()?.wrapping_abs()),
            Opcode::Word(Keyword::Inp) => {
                let pin = self.paren_arg()?;
                self.host.gpio_read(pin).ok_or_else(|| error!(Parameter))
            }
            Opcode::Word(Keyword::Adc) => {
                let channel = self.paren_arg()?;
                self.host.adc_read(channel).ok_or_else(|| error!(Parameter))
            }
            Opcode::Word(Keyword::Inkey) => self.inkey(),
            Opcode::Word(Keyword::Tick) => Ok(self.host.tick_ms()),
            _ => Err(error!(Syntax)),
        }
    }

    fn fetch_payload(&mut self, width: usize, hex: bool) -> Int {
        let start = self.pc.addr;
        self.skip(width);
        let code = self.code();
        let end = (start + width).min(code.len());
        token::decode_value(&code[start..end], hex)
    }

    pub(super) fn paren_arg(&mut self) -> Result<Int> {
        self.expect(b'(')?;
        let v = self.expr()?;
        self.expect(b')')?;
        Ok(v)
    }

    /// `INKEY()` polls once and answers -1 when idle. `INKEY(0)` waits
    /// for a key. `INKEY(t)` with t > 0 gives up after t milliseconds.
    fn inkey(&mut self) -> Result<Int> {
        self.expect(b'(')?;
        let timeout = if self.peek() == b')' {
            None
        } else {
            Some(self.expr()?)
        };
        self.expect(b')')?;
        match timeout {
            Some(0) => self.wait_char().map(Int::from),
            Some(t) if t > 0 => {
                let start = self.host.tick_ms();
                loop {
                    if let Some(ch) = self.poll_char()? {
                        return Ok(Int::from(ch));
                    }
                    if self.host.tick_ms().wrapping_sub(start) >= t {
                        return Ok(-1);
                    }
                }
            }
            _ => Ok(self.poll_char()?.map_or(-1, Int::from)),
        }
    }
}
