use std::fmt;
use std::str::FromStr;

use num::FromPrimitive;
use num_derive::{FromPrimitive, ToPrimitive};
use util::ParseEnumError;

use crate::constants;
use crate::Word;

/// Generates the opcode table.
///
/// The single invocation below is the authority shared by the assembler
/// (which seeds its symbol table from the mnemonics) and the processor
/// (which dispatches on the values): the enum, the mnemonic lookup and the
/// mnemonic parser all come out of the same list.
macro_rules! opcodes {
    ( $( $(#[$docs:meta])* $name:ident = $value:expr => $mnemonic:literal, )* ) => {
        /// Operation codes of the virtual machine.
        ///
        /// Every value is odd: the least significant bit is the tag that
        /// separates opcode words from push words in the instruction
        /// stream, so the two kinds can never alias.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, FromPrimitive, ToPrimitive)]
        pub enum Opcode {
            $( $(#[$docs])* $name = $value, )*
        }

        impl Opcode {
            /// All opcodes, in table order.
            pub const ALL: &'static [Opcode] = &[$(Opcode::$name,)*];

            /// The textual name understood by the assembler.
            pub fn mnemonic(self) -> &'static str {
                match self {
                    $(Opcode::$name => $mnemonic,)*
                }
            }
        }

        impl FromStr for Opcode {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Opcode, ParseEnumError> {
                match s {
                    $($mnemonic => Ok(Opcode::$name),)*
                    _ => Err(ParseEnumError {
                        value: s.to_string(),
                        enum_name: "Opcode",
                    }),
                }
            }
        }
    };
}

opcodes! {
    /// `(a)` → word read from address `a`.
    LOAD = 0x01 => "load",
    /// `(b a)` → `()`; writes word `a` at address `b`.
    STORE = 0x03 => "store",
    /// `(a)` → halt with status `a` (the status is not popped).
    EXIT = 0x05 => "exit",
    /// `(a)` → sign-extended byte read from address `a`.
    LOADBYTE = 0x07 => "loadbyte",
    /// `(b a)` → `()`; writes the low 8 bits of `a` at address `b`.
    STOREBYTE = 0x09 => "storebyte",

    /// `(b a)` → `(b + a)`, wrapping.
    ADD = 0x11 => "add",
    /// `(b a)` → `(b - a)`, wrapping.
    SUB = 0x13 => "sub",
    /// `(b a)` → `(b * a)`, wrapping.
    MUL = 0x15 => "mul",
    /// `(b a)` → `(b / a)`, truncating; a zero divisor is fatal.
    DIV = 0x17 => "div",
    /// `(b a)` → `(b % a)`, truncating; a zero divisor is fatal.
    MOD = 0x19 => "mod",
    /// `(a)` → `(-a)`, wrapping.
    NEGATE = 0x1B => "negate",

    /// `(a)` → `(a a)`.
    DUP = 0x21 => "dup",
    /// `(b a)` → `(a b)`.
    SWAP = 0x23 => "swap",
    /// `(a)` → `()`.
    POP = 0x25 => "pop",

    /// `(b a)` → `(b & a)`.
    BAND = 0x31 => "band",
    /// `(b a)` → `(b | a)`.
    BOR = 0x33 => "bor",
    /// `(a)` → `(!a)`, bitwise complement.
    BNOT = 0x35 => "bnot",
    /// `(b a)` → `(b ^ a)`.
    XOR = 0x37 => "xor",

    /// `(b a)` → `(b >> a)`, logical (zero-filling).
    SHR = 0x39 => "shr",
    /// `(b a)` → `(b << a)`, logical.
    SHL = 0x3B => "shl",
    /// `(b a)` → `(b >> a)`, arithmetic (sign-filling).
    SAR = 0x3D => "sar",
    /// `(b a)` → `(b << a)`, arithmetic.
    SAL = 0x3F => "sal",

    /// `(b a)` → `(1)` if both are nonzero, else `(0)`.
    AND = 0x41 => "and",
    /// `(b a)` → `(1)` if either is nonzero, else `(0)`.
    OR = 0x43 => "or",
    /// `(a)` → `(1)` if `a` is zero, else `(0)`.
    NOT = 0x45 => "not",

    /// `(b a)` → `(b == a)` as 1 or 0.
    EQ = 0x47 => "eq",
    /// `(b a)` → `(b != a)` as 1 or 0.
    NE = 0x49 => "ne",
    /// `(b a)` → `(b > a)` as 1 or 0, signed.
    GT = 0x4B => "gt",
    /// `(b a)` → `(b < a)` as 1 or 0, signed.
    LT = 0x4D => "lt",
    /// `(b a)` → `(b >= a)` as 1 or 0, signed.
    GTE = 0x4F => "gte",
    /// `(b a)` → `(b <= a)` as 1 or 0, signed.
    LTE = 0x51 => "lte",

    /// `(a)` → `()`; continues execution at address `a`.
    JMP = 0x61 => "jmp",
    /// `(b a)` → `()`; continues at address `a` when `b` is nonzero.
    JMPZ = 0x63 => "jmpz",

    /// `(a)` → heap address of a fresh allocation of `a` bytes.
    MALLOC = 0xA1 => "malloc",
    /// `(a)` → `()`; releases the allocation at heap address `a`.
    FREE = 0xA3 => "free",
    /// `(b a)` → `()`; writes `a` bytes starting at address `b` to the
    /// output stream.
    WRITE = 0xA5 => "write",
    /// `(b a)` → `()`; reads exactly `a` bytes from the input stream into
    /// address `b`.
    READ = 0xA7 => "read",
    /// `(c b a)` → `()`; copies `a` bytes from address `b` to address `c`.
    MEMCPY = 0xA9 => "memcpy",
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A decoded image word.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instruction {
    /// An opcode word (tag bit set).
    Op(Opcode),
    /// A push word (tag bit clear); the payload is the signed upper 63
    /// bits.
    Push(Word),
}

/// Decodes a raw image word.
///
/// Returns `None` for a word that carries the tag bit but is not in the
/// opcode table.
///
/// # Examples
/// ```
/// use tvm::{decode, Instruction, Opcode};
///
/// assert_eq!(decode(0x05), Some(Instruction::Op(Opcode::EXIT)));
/// assert_eq!(decode(84), Some(Instruction::Push(42)));
/// assert_eq!(decode(0x0B), None);
/// ```
pub fn decode(word: Word) -> Option<Instruction> {
    if word & constants::TAG_MASK == 0 {
        Some(Instruction::Push(word >> 1))
    } else {
        Opcode::from_i64(word).map(Instruction::Op)
    }
}

/// Encodes an instruction into its image word. Inverse of [`decode`].
///
/// [`decode`]: fn.decode.html
pub fn encode(instruction: Instruction) -> Word {
    match instruction {
        Instruction::Op(opcode) => opcode as Word,
        Instruction::Push(value) => value << 1,
    }
}

/// Image word that pushes `value`.
#[inline]
pub fn push_word(value: Word) -> Word {
    value << 1
}

/// Image word that executes `opcode`.
#[inline]
pub fn op_word(opcode: Opcode) -> Word {
    opcode as Word
}
