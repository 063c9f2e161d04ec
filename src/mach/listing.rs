//! Renders stored bytecode back to source text. The text is canonical:
//! feeding a rendered line through the tokenizer reproduces the stored
//! bytes, which is what makes LIST safe for read-back editing.

use super::val;
use crate::lang::token::{self, Opcode};

/// Renders one line's opcodes (EOL included) onto `out`.
pub fn render_line(body: &[u8], out: &mut String) {
    let mut pos = 0;
    let mut first = true;
    loop {
        let b = match body.get(pos) {
            Some(b) => *b,
            None => return,
        };
        pos += 1;
        match Opcode::from_byte(b) {
            Opcode::Eol => return,
            Opcode::Value { hex, width } => {
                let end = (pos + width).min(body.len());
                let payload = &body[pos..end];
                pos = end;
                if hex {
                    let mut v: u32 = 0;
                    for (i, byte) in payload.iter().enumerate() {
                        v |= u32::from(*byte) << (8 * i);
                    }
                    out.push_str("0x");
                    out.push_str(&format!("{:X}", v));
                } else {
                    out.push_str(&val::to_plain(token::decode_value(payload, false)));
                    if first {
                        out.push(' ');
                    }
                }
            }
            Opcode::StringMark => {
                out.push('"');
                while let Some(c) = body.get(pos) {
                    pos += 1;
                    out.push(*c as char);
                    if *c == token::STRING_ESCAPE {
                        if let Some(e) = body.get(pos) {
                            out.push(*e as char);
                            pos += 1;
                        }
                    } else if *c == token::STRING_MARK {
                        break;
                    }
                }
            }
            Opcode::CommentMark => {
                out.push('\'');
                while let Some(c) = body.get(pos) {
                    if *c == token::EOL {
                        break;
                    }
                    out.push(*c as char);
                    pos += 1;
                }
            }
            Opcode::Word(word) => {
                if !first && word.wants_leading_space() {
                    out.push(' ');
                }
                out.push_str(word.text());
                if word.wants_trailing_space()
                    && !token::is_delimiter(*body.get(pos).unwrap_or(&token::EOL))
                {
                    out.push(' ');
                }
            }
            _ => out.push(b as char),
        }
        first = false;
    }
}
