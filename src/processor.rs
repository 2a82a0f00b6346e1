mod logic;

use std::fmt;
use std::io::{Read, Write};

use crate::constants;
use crate::memory::Memory;
use crate::Word;

use self::logic::TickResult;

/// Reason the fetch-execute loop stopped.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ExitCode {
    Exited(Word),          // exit was executed with this status
    InvalidOpcode(Word),   // word carries the tag bit but is not in the opcode table
    DivisionByZero,        // div or mod with a zero divisor
    BadMemoryAccess(Word), // access outside program and heap space
    StackUnderflow,        // an operation needed more operands than the stack holds
    IoError,               // read or write on the host streams failed
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ExitCode::Exited(status) => write!(f, "exited with status {}", status),
            ExitCode::InvalidOpcode(word) => {
                write!(f, "unrecognized instruction word {:#x}", word)
            }
            ExitCode::DivisionByZero => f.write_str("division by zero"),
            ExitCode::BadMemoryAccess(addr) => {
                write!(f, "invalid memory access at address {:#x}", addr)
            }
            ExitCode::StackUnderflow => f.write_str("data stack underflow"),
            ExitCode::IoError => f.write_str("i/o on the host streams failed"),
        }
    }
}

/// Executes images against a [`Memory`].
///
/// The processor owns nothing but the data stack; program memory and the
/// two byte streams backing the `read` and `write` instructions are
/// supplied to [`run`].
///
/// [`Memory`]: struct.Memory.html
/// [`run`]: #method.run
#[derive(Default)]
pub struct Processor {
    stack: Vec<Word>,
}

impl Processor {
    pub fn new() -> Processor {
        Processor { stack: Vec::new() }
    }

    /// Current contents of the data stack, bottom first.
    pub fn stack(&self) -> &[Word] {
        &self.stack
    }

    /// Runs the fetch-execute loop from address zero until the program
    /// stops.
    ///
    /// Fetching goes through [`Memory`], so a jump outside the address
    /// space stops with [`ExitCode::BadMemoryAccess`] instead of reading
    /// past the image.
    ///
    /// [`Memory`]: struct.Memory.html
    /// [`ExitCode::BadMemoryAccess`]: enum.ExitCode.html
    pub fn run<R: Read, W: Write>(
        &mut self,
        memory: &mut Memory,
        input: &mut R,
        output: &mut W,
    ) -> ExitCode {
        let mut ip: Word = 0;

        loop {
            let word = match memory.read_word(ip) {
                Ok(word) => word,
                Err(()) => return ExitCode::BadMemoryAccess(ip),
            };
            ip += constants::WORD_BYTES as Word;

            match logic::tick(&mut self.stack, memory, input, output, word) {
                TickResult::Next => {}
                TickResult::Jump(target) => ip = target,
                TickResult::Stop(code) => return code,
            }
        }
    }
}
