//! Virtual machine for a tagged 64-bit word bytecode.
//!
//! Every slot in a program image is one signed 64-bit word. The least
//! significant bit tags the word: odd words are opcodes from the shared
//! [`Opcode`] table, even words push their upper 63 bits onto the data
//! stack. [`Memory`] exposes the flat address space (the writable program
//! image plus a managed heap above it) and [`Processor`] drives the
//! fetch-execute loop against it.
//!
//! [`Opcode`]: enum.Opcode.html
//! [`Memory`]: struct.Memory.html
//! [`Processor`]: struct.Processor.html

pub mod constants;
mod instructions;
mod memory;
mod processor;

pub use crate::instructions::*;
pub use crate::memory::{Error, Memory};
pub use crate::processor::{ExitCode, Processor};
pub use util::Endian;

/// Machine word: stack entries, addresses and instruction slots alike.
pub type Word = i64;

/// Packs words into the little-endian byte form used by program images.
pub fn image_from_words(words: &[Word]) -> Vec<u8> {
    use byteorder::ByteOrder;

    let mut bytes = vec![0; words.len() * constants::WORD_BYTES];
    Endian::write_i64_into(words, &mut bytes);
    bytes
}
