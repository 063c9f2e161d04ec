use super::token::{self, Keyword};
use super::{Int, Result, UInt};
use crate::error;

/// Compiles one raw console line into a bytecode line.
///
/// `code[0]` receives the length byte; the opcodes follow, ending with
/// [`token::EOL`]. Returns the opcode byte count including the EOL, so an
/// all-whitespace line (or a `''` meta-comment) comes back as 1.
pub fn encode(src: &str, code: &mut [u8]) -> Result<usize> {
    let mut lexer = Lexer {
        src: src.as_bytes(),
        pos: 0,
        code,
        len: 0,
        last: Emitted::None,
        prev: Emitted::None,
    };
    lexer.run()?;
    Ok(lexer.len)
}

fn is_basic_whitespace(b: u8) -> bool {
    b <= b' '
}

/// The literal bytes a line may carry besides the forms the lexer knows:
/// operators, brackets, and punctuation.
fn is_permitted(b: u8) -> bool {
    (0x21..=0x3e).contains(&b) || matches!(b, b'^' | b'|' | b'~' | b'[' | b']')
}

/// What the previous emit was, for deciding whether a sign is unary.
#[derive(Clone, Copy, PartialEq)]
enum Emitted {
    None,
    /// Something a binary operator could follow: a literal, a variable,
    /// `TICK`, or a closing bracket.
    Value,
    /// A bare `+` or `-`.
    Sign,
    Other,
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    code: &'a mut [u8],
    len: usize,
    last: Emitted,
    prev: Emitted,
}

impl<'a> Lexer<'a> {
    fn run(&mut self) -> Result<()> {
        loop {
            while self.pos < self.src.len() && is_basic_whitespace(self.src[self.pos]) {
                self.pos += 1;
            }
            let b = match self.src.get(self.pos) {
                Some(b) => *b,
                None => break,
            };
            if b == b'?' {
                self.pos += 1;
                self.emit(Keyword::Print as u8, Emitted::Other)?;
            } else if b.is_ascii_alphabetic() {
                self.alphabetic()?;
            } else if b.is_ascii_digit() {
                self.number()?;
            } else if b == token::STRING_MARK {
                self.string()?;
            } else if b == token::COMMENT_MARK {
                if self.comment()? {
                    return Ok(());
                }
            } else if b == token::ARRAY_MARK {
                if self.src.get(self.pos + 1) != Some(&b'[') {
                    return Err(error!(Syntax));
                }
                self.pos += 2;
                self.emit(token::ARRAY_MARK, Emitted::Other)?;
                self.emit(b'[', Emitted::Other)?;
            } else if is_permitted(b) {
                self.pos += 1;
                let kind = match b {
                    b'+' | b'-' => Emitted::Sign,
                    b')' | b']' => Emitted::Value,
                    _ => Emitted::Other,
                };
                self.emit(b, kind)?;
            } else {
                return Err(error!(Syntax));
            }
        }
        self.emit(token::EOL, Emitted::Other)?;
        self.code[0] = self.len as u8;
        Ok(())
    }

    fn emit(&mut self, b: u8, kind: Emitted) -> Result<()> {
        // The length prefix and the closing EOL each hold a slot.
        if b != token::EOL && self.len + 2 >= self.code.len() {
            return Err(error!(PgAreaOverflow));
        }
        self.code[1 + self.len] = b;
        self.len += 1;
        self.prev = self.last;
        self.last = kind;
        Ok(())
    }

    /// A keyword, or a single-letter variable. An alphabetic run that
    /// matches nothing in the table falls back to taking its first letter
    /// as a variable and rescanning from the second.
    fn alphabetic(&mut self) -> Result<()> {
        let start = self.pos;
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        let run = &self.src[start..self.pos];
        if run.len() > 1 {
            if let Some(word) = Keyword::lookup(run) {
                let kind = if word == Keyword::Tick {
                    Emitted::Value
                } else {
                    Emitted::Other
                };
                return self.emit(word as u8, kind);
            }
        }
        self.pos = start + 1;
        self.emit(run[0].to_ascii_uppercase(), Emitted::Value)
    }

    /// An integer literal, decimal or `0x` hex, folded to its smallest
    /// encoding. A `+` or `-` emitted just before folds in when it could
    /// only have been unary.
    fn number(&mut self) -> Result<()> {
        if self.src[self.pos] == b'0'
            && matches!(self.src.get(self.pos + 1), Some(&b'x') | Some(&b'X'))
            && self
                .src
                .get(self.pos + 2)
                .map_or(false, u8::is_ascii_hexdigit)
        {
            self.pos += 2;
            let mut val: UInt = 0;
            while let Some(d) = self.src.get(self.pos).and_then(hex_digit) {
                val = val.wrapping_shl(4).wrapping_add(UInt::from(d));
                self.pos += 1;
            }
            return self.emit_hex(val);
        }
        let mut val: Int = 0;
        while let Some(b) = self.src.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            val = val.wrapping_mul(10).wrapping_add(Int::from(*b - b'0'));
            self.pos += 1;
        }
        if self.last == Emitted::Sign && self.prev != Emitted::Value {
            let sign = self.code[self.len];
            self.len -= 1;
            self.last = self.prev;
            if sign == b'-' {
                val = val.wrapping_neg();
            }
        }
        self.emit_decimal(val)
    }

    fn emit_decimal(&mut self, val: Int) -> Result<()> {
        if (0..=9).contains(&val) {
            return self.emit(b'0' + val as u8, Emitted::Value);
        }
        let width = token::decimal_width(val);
        self.emit(token::value_tag(false, width as u8), Emitted::Other)?;
        let bytes = token::value_bytes(val);
        for b in &bytes[..width] {
            self.emit(*b, Emitted::Other)?;
        }
        self.last = Emitted::Value;
        Ok(())
    }

    fn emit_hex(&mut self, val: UInt) -> Result<()> {
        let width = token::hex_width(val);
        self.emit(token::value_tag(true, width as u8), Emitted::Other)?;
        let bytes = token::value_bytes(val as Int);
        for b in &bytes[..width] {
            self.emit(*b, Emitted::Other)?;
        }
        self.last = Emitted::Value;
        Ok(())
    }

    /// Copies a string body through verbatim. A `\` keeps its next byte,
    /// so `\"` does not close the string; PRINT resolves the escapes.
    fn string(&mut self) -> Result<()> {
        self.emit(token::STRING_MARK, Emitted::Other)?;
        self.pos += 1;
        loop {
            let b = match self.src.get(self.pos) {
                Some(b) if *b >= b' ' => *b,
                _ => return Err(error!(Syntax)),
            };
            self.pos += 1;
            self.emit(b, Emitted::Other)?;
            if b == token::STRING_ESCAPE {
                match self.src.get(self.pos) {
                    Some(e) if *e >= b' ' => {
                        self.emit(*e, Emitted::Other)?;
                        self.pos += 1;
                    }
                    _ => return Err(error!(Syntax)),
                }
            } else if b == token::STRING_MARK {
                self.last = Emitted::Other;
                return Ok(());
            }
        }
    }

    /// A `'` comment is kept through to end of line; `''` marks the whole
    /// line as editor-only, dropped from the stored form.
    fn comment(&mut self) -> Result<bool> {
        if self.src.get(self.pos + 1) == Some(&token::COMMENT_MARK) {
            self.len = 1;
            self.code[0] = 1;
            self.code[1] = token::EOL;
            return Ok(true);
        }
        while let Some(b) = self.src.get(self.pos) {
            if *b < b' ' {
                break;
            }
            self.emit(*b, Emitted::Other)?;
            self.pos += 1;
        }
        Ok(false)
    }
}

fn hex_digit(b: &u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
