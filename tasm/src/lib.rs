//! Assembler for the [tvm](../tvm/index.html) virtual machine.
//!
//! The main function provided by this crate is [`assemble`](fn.assemble.html),
//! which accepts a program written in the machine's assembly language and
//! returns the executable [`Image`](../tvifile/struct.Image.html) from the
//! [tvifile](../tvifile/index.html) crate.
//!
//! Parsing is implemented with [pest]; the crate's [`Error`](type.Error.html)
//! type is an alias of `pest::error::Error`, so every diagnostic (including
//! the semantic ones raised after parsing) carries a source line and
//! column and pretty-prints through pest.
//!
//! # Assembly Language
//!
//! A program is a flat sequence of tokens separated by whitespace. Each
//! token assembles to exactly one 8-byte word in the output image; labels
//! assemble to nothing and name the current output offset instead.
//!
//! Token      | Syntax         | Emitted word
//! -----------|----------------|--------------------------------------------
//! mnemonic   | `add`          | the opcode value, executed when fetched
//! literal    | `-42`          | the raw value (decimal only)
//! push       | `push(x)`      | the word for `x`, shifted left once
//! label      | `name:`        | nothing; defines `name` as the next word offset
//! reference  | `name`         | the value of `name`, shifted once per enclosing `push(`
//!
//! ## Push and the tag bit
//!
//! The machine tags every image word with its least significant bit: odd
//! words execute as opcodes, even words push their upper 63 bits. The
//! assembler exposes that encoding directly. A bare literal or mnemonic
//! lands in the image unshifted, while `push(x)` shifts `x` one bit left,
//! producing an even word the machine pushes at fetch time.
//!
//! `push(...)` nests: each surrounding level adds one more shift. The inner
//! word of `push(push(3))` is `3 << 2`, which the machine pushes as the
//! value `3 << 1`, the image word of `push(3)`. Writing that value into
//! program space and jumping to it executes it, which is how self-modifying
//! programs are built.
//!
//! ## Labels and references
//!
//! A label may be referenced before or after its definition; all references
//! are patched in a second phase once the whole program has been read.
//! Label offsets are always multiples of eight (the assembler pads with
//! zero bytes before defining one). A reference at the top level places the
//! offset directly in the instruction slot, so the fetched word is executed;
//! use `push(name)` to treat a code address as data. Opcode mnemonics and
//! labels share one namespace, and no symbol can be defined twice.
//!
//! ## Mnemonics
//!
//! Group      | Mnemonics
//! -----------|---------------------------------------------------------
//! Memory     | `load`, `store`, `loadbyte`, `storebyte`, `exit`
//! Arithmetic | `add`, `sub`, `mul`, `div`, `mod`, `negate`
//! Stack      | `dup`, `swap`, `pop`
//! Bitwise    | `band`, `bor`, `bnot`, `xor`, `shr`, `shl`, `sar`, `sal`
//! Boolean    | `and`, `or`, `not`
//! Comparison | `eq`, `ne`, `gt`, `lt`, `gte`, `lte`
//! Control    | `jmp`, `jmpz`
//! Built-in   | `malloc`, `free`, `write`, `read`, `memcpy`
//!
//! # Example
//!
//! ```text
//! push(10)
//! loop:
//!     push(1) sub
//!     dup push(loop) jmpz
//! exit
//! ```
//!
//! [pest]: https://docs.rs/pest/

mod emit;
mod parser;
mod symbols;


use pest::iterators::Pair;
use pest::{Parser, Span};
use tvifile::Image;

use parser::AsmParser;
pub use parser::Rule;

pub type Error = pest::error::Error<Rule>;

pub type Result<T> = std::result::Result<T, Error>;

/// Assembles a complete program into an executable image.
pub fn assemble(input: &str) -> Result<Image> {
    Ok(Image::from(emit::process_program(parse(input)?)?))
}

fn new_parser_error(span: Span, message: String) -> Error {
    Error::new_from_span(pest::error::ErrorVariant::CustomError { message }, span)
}

fn parse(input: &str) -> Result<Pair<Rule>> {
    Ok(AsmParser::parse(Rule::program, input)?.next().unwrap())
}
