//! The persistence adapter: one snapshot of the program area in the
//! host's block store, behind a small header.
//!
//! Layout at offset 0: magic `'n' 'B'`, version major/minor, program
//! length as little-endian i16, the auto-run flag, one reserved byte.
//! The payload follows, copied verbatim from the program store top.

use super::program::Program;
use super::PROGRAM_AREA_SIZE;
use crate::error;
use crate::host::Host;
use crate::lang::Result;

pub const EEPROM_SIZE: usize = 1024;
pub const HEADER_SIZE: usize = 8;
const MAGIC: [u8; 2] = [b'n', b'B'];
const VERSION_MAJOR: u8 = 0;
const VERSION_MINOR: u8 = 14;

/// Writes the header and payload. Refuses an empty program.
pub fn save<H: Host>(host: &mut H, program: &Program, autorun: bool) -> Result<()> {
    if program.is_empty() {
        return Err(error!(PgEmpty));
    }
    let length = program.length() as u16;
    let header = [
        MAGIC[0],
        MAGIC[1],
        VERSION_MAJOR,
        VERSION_MINOR,
        length as u8,
        (length >> 8) as u8,
        autorun as u8,
        0,
    ];
    host.eep_erase(0, (HEADER_SIZE + program.length()) as u16);
    host.eep_write(0, &header);
    host.eep_write(HEADER_SIZE as u16, program.image());
    Ok(())
}

/// Erases just the header, leaving nothing recognizable behind.
pub fn erase<H: Host>(host: &mut H) {
    host.eep_erase(0, HEADER_SIZE as u16);
}

/// Reads the header back. `Some((length, autorun))` only when the magic
/// bytes are present and the length could possibly hold a program.
pub fn probe<H: Host>(host: &mut H) -> Option<(usize, bool)> {
    let mut header = [0u8; HEADER_SIZE];
    host.eep_read(0, &mut header);
    if header[..2] != MAGIC {
        return None;
    }
    let length = usize::from(u16::from_le_bytes([header[4], header[5]]));
    if length < 2 || length > EEPROM_SIZE - HEADER_SIZE {
        return None;
    }
    Some((length, header[6] == 1))
}

/// Replaces the program area with the stored snapshot. The image is
/// validated before anything is overwritten.
pub fn load<H: Host>(host: &mut H, program: &mut Program) -> Result<()> {
    let (length, _) = probe(host).ok_or_else(|| error!(PgEmpty))?;
    let mut image = [0u8; PROGRAM_AREA_SIZE];
    if length >= image.len() {
        return Err(error!(PgAreaOverflow));
    }
    host.eep_read(HEADER_SIZE as u16, &mut image[..length]);
    program.load_image(&image[..length])
}
