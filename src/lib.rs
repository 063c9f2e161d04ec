//! # NanoBASIC
//!
//! Modern BASIC for very small computers.
//! ```text
//! NanoBASIC Ver 0.14
//! OK
//! █
//! ```
//!
//! The interpreter compiles each console line to a compact bytecode and
//! executes it immediately, or stores it through `PROG` and runs the
//! whole program with `RUN`. The core is sized for a couple of kilobytes
//! of RAM: 26 integer variables, one small array, a shared eight-frame
//! control stack, and a program area under a kilobyte.
//!
//! The core never touches a platform directly; everything it needs is
//! behind [`host::Host`]. The [`term`] module is the PC port: a raw-mode
//! terminal with a file standing in for the EEPROM.
//!

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/language.rs"]
#[allow(non_snake_case)]
pub mod __Language;

pub mod host;
pub mod lang;
pub mod mach;
pub mod term;
