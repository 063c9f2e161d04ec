use super::{Address, CODE_LINE_SIZE, PROGRAM_AREA_SIZE};
use crate::error;
use crate::lang::token::{self, Opcode};
use crate::lang::{Int, Result};

/// The program store: bytecode lines back to back, then a zero length
/// byte. The first byte is always a length byte, so offset 0 is the top.
pub struct Program {
    area: [u8; PROGRAM_AREA_SIZE],
    length: usize,
}

impl Default for Program {
    fn default() -> Program {
        Program::new()
    }
}

impl Program {
    pub fn new() -> Program {
        Program {
            area: [token::EOL; PROGRAM_AREA_SIZE],
            length: 0,
        }
    }

    pub fn clear(&mut self) {
        self.area = [token::EOL; PROGRAM_AREA_SIZE];
        self.length = 0;
    }

    /// The whole area; execution and scans index into this.
    pub fn area(&self) -> &[u8] {
        &self.area
    }

    /// Bytes holding stored lines, length prefixes included, terminator
    /// excluded. This is what SAVE snapshots.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn image(&self) -> &[u8] {
        &self.area[..self.length]
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends one line (`[len] opcodes.. EOL`), keeping the terminator
    /// byte in place behind it.
    pub fn append(&mut self, line: &[u8]) -> Result<()> {
        debug_assert_eq!(line.len(), line[0] as usize + 1);
        if self.length + line.len() + 1 > PROGRAM_AREA_SIZE {
            return Err(error!(PgAreaOverflow));
        }
        self.area[self.length..self.length + line.len()].copy_from_slice(line);
        self.length += line.len();
        self.area[self.length] = token::EOL;
        Ok(())
    }

    /// Finds the line whose label equals `label`. Only a decimal literal
    /// right after the length byte counts. Returns the address of the
    /// length byte and the 1-based line number.
    pub fn find_label(&self, label: Int) -> Option<(Address, u16)> {
        let mut line = 0u16;
        for (addr, body) in self.lines_with_addr() {
            line += 1;
            let found = match Opcode::from_byte(body[0]) {
                Opcode::Digit(d) => Int::from(d) == label,
                Opcode::Value { hex: false, width } if body.len() > width => {
                    token::decode_value(&body[1..=width], false) == label
                }
                _ => false,
            };
            if found {
                return Some((addr, line));
            }
        }
        None
    }

    /// The opcode bytes of each stored line, EOL included.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.lines_with_addr().map(|(_, body)| body)
    }

    fn lines_with_addr(&self) -> impl Iterator<Item = (Address, &[u8])> + '_ {
        let mut pos = 0;
        std::iter::from_fn(move || {
            let len = *self.area.get(pos)? as usize;
            if len == 0 || pos + 1 + len > self.area.len() {
                return None;
            }
            let line = (pos, &self.area[pos + 1..pos + 1 + len]);
            pos += 1 + len;
            Some(line)
        })
    }

    /// Installs a persisted image, validating it first: every length byte
    /// must pace out exactly, every line must close with EOL, and every
    /// value payload must stay inside its line and inside the runtime
    /// integer width.
    pub fn load_image(&mut self, image: &[u8]) -> Result<()> {
        if image.len() + 1 > PROGRAM_AREA_SIZE {
            return Err(error!(PgAreaOverflow));
        }
        validate_image(image)?;
        self.clear();
        self.area[..image.len()].copy_from_slice(image);
        self.length = image.len();
        Ok(())
    }
}

fn validate_image(image: &[u8]) -> Result<()> {
    let int_width = std::mem::size_of::<Int>();
    let mut pos = 0;
    while pos < image.len() {
        let len = image[pos] as usize;
        if len == 0 || len >= CODE_LINE_SIZE || pos + 1 + len > image.len() {
            return Err(error!(PgEmpty));
        }
        if image[pos + len] != token::EOL {
            return Err(error!(PgEmpty));
        }
        let end = pos + len;
        let mut p = pos + 1;
        while p < end {
            let b = image[p];
            p += 1;
            match Opcode::from_byte(b) {
                Opcode::Eol => return Err(error!(PgEmpty)),
                Opcode::Value { width, .. } => {
                    if width > int_width || p + width > end {
                        return Err(error!(PgEmpty));
                    }
                    p += width;
                }
                Opcode::StringMark => loop {
                    if p >= end {
                        return Err(error!(PgEmpty));
                    }
                    let c = image[p];
                    p += 1;
                    if c == token::STRING_ESCAPE {
                        p += 1;
                    } else if c == token::STRING_MARK {
                        break;
                    }
                },
                Opcode::CommentMark => p = end,
                _ => {}
            }
        }
        pos += 1 + len;
    }
    Ok(())
}
