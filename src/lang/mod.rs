/*!
## Language module

Lexical analysis for NanoBASIC: the opcode space, the keyword table, and
the tokenizer that compiles one raw console line into a bytecode line.

*/

/// The runtime integer. Sixteen bits by default, matching the smallest
/// targets; the `int32` feature widens every value and variable.
#[cfg(feature = "int32")]
pub type Int = i32;
#[cfg(not(feature = "int32"))]
pub type Int = i16;

#[cfg(feature = "int32")]
pub type UInt = u32;
#[cfg(not(feature = "int32"))]
pub type UInt = u16;

mod error;
mod lex;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::encode;

pub type Result<T> = std::result::Result<T, Error>;
