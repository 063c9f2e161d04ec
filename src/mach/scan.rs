//! Forward scans over bytecode: the block scanner behind IF/ELSE/ENDIF,
//! EXIT, DATA, and the loop-balanced variant behind WHILE.
//!
//! Both walk opcode by opcode, stepping over value payloads, string
//! bodies (honoring the `\` escape), and comments, and both ignore
//! anything inside a nested `IF`/`ENDIF`. Crossing an EOL moves to the
//! next stored line unless the scan started in direct mode (`line == 0`),
//! which stops at the first EOL.

use super::Address;
use crate::lang::token::{self, Keyword, Opcode};

fn byte(code: &[u8], pos: usize) -> u8 {
    *code.get(pos).unwrap_or(&token::EOL)
}

/// Finds the next opcode from `targets` at the current IF depth.
/// Returns the position just past it, the line it sits on, and the
/// opcode itself.
pub fn find_st(
    code: &[u8],
    start: Address,
    start_line: u16,
    targets: &[u8],
) -> Option<(Address, u16, u8)> {
    let mut pos = start;
    let mut line = start_line;
    let mut depth_if = 0u16;
    loop {
        loop {
            let b = byte(code, pos);
            pos += 1;
            let mut closed_nest = false;
            match Opcode::from_byte(b) {
                Opcode::Eol => break,
                Opcode::Value { width, .. } => pos += width,
                Opcode::CommentMark => {
                    while byte(code, pos) != token::EOL {
                        pos += 1;
                    }
                }
                Opcode::StringMark => pos = skip_string(code, pos),
                Opcode::Word(Keyword::If) => depth_if += 1,
                Opcode::Word(Keyword::Endif) if depth_if > 0 => {
                    depth_if -= 1;
                    closed_nest = true;
                }
                _ => {}
            }
            if depth_if == 0 && !closed_nest && b != token::EOL && targets.contains(&b) {
                return Some((pos, line, b));
            }
        }
        if line == 0 {
            return None;
        }
        line += 1;
        let len = byte(code, pos);
        pos += 1;
        if len == token::EOL {
            return None;
        }
    }
}

/// Finds the `LOOP` matching the current position, balancing `DO` and
/// `WHILE` openers seen along the way. A `WHILE` right behind a `LOOP`
/// is that loop's exit condition, not an opener. Returns the position
/// just past the `LOOP` and its line.
pub fn find_next_loop(code: &[u8], start: Address, start_line: u16) -> Option<(Address, u16)> {
    let mut pos = start;
    let mut line = start_line;
    let mut depth_if = 0u16;
    let mut depth_loop = 0u16;
    let mut after_loop = false;
    loop {
        loop {
            let b = byte(code, pos);
            pos += 1;
            let was_after_loop = after_loop;
            after_loop = false;
            match Opcode::from_byte(b) {
                Opcode::Eol => break,
                Opcode::Value { width, .. } => pos += width,
                Opcode::CommentMark => {
                    while byte(code, pos) != token::EOL {
                        pos += 1;
                    }
                }
                Opcode::StringMark => pos = skip_string(code, pos),
                Opcode::Blank => after_loop = was_after_loop,
                Opcode::Word(Keyword::If) => depth_if += 1,
                Opcode::Word(Keyword::Endif) if depth_if > 0 => depth_if -= 1,
                Opcode::Word(Keyword::Do) if depth_if == 0 => depth_loop += 1,
                Opcode::Word(Keyword::While) if depth_if == 0 => {
                    if !was_after_loop {
                        depth_loop += 1;
                    }
                }
                Opcode::Word(Keyword::Loop) if depth_if == 0 => {
                    if depth_loop == 0 {
                        return Some((pos, line));
                    }
                    depth_loop -= 1;
                    after_loop = true;
                }
                _ => {}
            }
        }
        if line == 0 {
            return None;
        }
        line += 1;
        let len = byte(code, pos);
        pos += 1;
        if len == token::EOL {
            return None;
        }
    }
}

fn skip_string(code: &[u8], mut pos: usize) -> usize {
    loop {
        let c = byte(code, pos);
        if c == token::EOL {
            return pos;
        }
        pos += 1;
        if c == token::STRING_ESCAPE && byte(code, pos) != token::EOL {
            pos += 1;
        } else if c == token::STRING_MARK {
            return pos;
        }
    }
}
