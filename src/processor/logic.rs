use std::io::{Read, Write};

use crate::memory::Memory;
use crate::{decode, Instruction, Opcode, Word};

use super::ExitCode;

pub(crate) enum TickResult {
    Next,
    Jump(Word),
    Stop(ExitCode),
}

macro_rules! arg {
    ($stack:expr) => {
        match $stack.pop() {
            Some(value) => value,
            None => return TickResult::Stop(ExitCode::StackUnderflow),
        }
    };
}

macro_rules! access {
    ($result:expr, $addr:expr) => {
        match $result {
            Ok(value) => value,
            Err(()) => return TickResult::Stop(ExitCode::BadMemoryAccess($addr)),
        }
    };
}

fn bool_word(condition: bool) -> Word {
    if condition {
        1
    } else {
        0
    }
}

fn unary<F: FnOnce(Word) -> Word>(stack: &mut Vec<Word>, op: F) -> TickResult {
    let a = arg!(stack);
    stack.push(op(a));
    TickResult::Next
}

fn binary<F: FnOnce(Word, Word) -> Word>(stack: &mut Vec<Word>, op: F) -> TickResult {
    let a = arg!(stack);
    let b = arg!(stack);
    stack.push(op(b, a));
    TickResult::Next
}

fn division<F: FnOnce(Word, Word) -> Word>(stack: &mut Vec<Word>, op: F) -> TickResult {
    let a = arg!(stack);
    let b = arg!(stack);
    if a == 0 {
        return TickResult::Stop(ExitCode::DivisionByZero);
    }
    stack.push(op(b, a));
    TickResult::Next
}

/// Executes one fetched word. Operand convention for binary operations:
/// `b` sits below `a`, the top, so `push x; push y; sub` leaves `x - y`.
pub(crate) fn tick<R: Read, W: Write>(
    stack: &mut Vec<Word>,
    memory: &mut Memory,
    input: &mut R,
    output: &mut W,
    word: Word,
) -> TickResult {
    let opcode = match decode(word) {
        Some(Instruction::Push(value)) => {
            stack.push(value);
            return TickResult::Next;
        }
        Some(Instruction::Op(opcode)) => opcode,
        None => return TickResult::Stop(ExitCode::InvalidOpcode(word)),
    };

    match opcode {
        Opcode::LOAD => {
            let addr = arg!(stack);
            stack.push(access!(memory.read_word(addr), addr));
            TickResult::Next
        }
        Opcode::STORE => {
            let value = arg!(stack);
            let addr = arg!(stack);
            access!(memory.write_word(addr, value), addr);
            TickResult::Next
        }
        Opcode::LOADBYTE => {
            let addr = arg!(stack);
            let byte = access!(memory.read_byte(addr), addr);
            stack.push(Word::from(byte as i8));
            TickResult::Next
        }
        Opcode::STOREBYTE => {
            let value = arg!(stack);
            let addr = arg!(stack);
            access!(memory.write_byte(addr, value as u8), addr);
            TickResult::Next
        }
        Opcode::EXIT => match stack.last() {
            Some(&status) => TickResult::Stop(ExitCode::Exited(status)),
            None => TickResult::Stop(ExitCode::StackUnderflow),
        },

        Opcode::ADD => binary(stack, |b, a| b.wrapping_add(a)),
        Opcode::SUB => binary(stack, |b, a| b.wrapping_sub(a)),
        Opcode::MUL => binary(stack, |b, a| b.wrapping_mul(a)),
        Opcode::DIV => division(stack, |b, a| b.wrapping_div(a)),
        Opcode::MOD => division(stack, |b, a| b.wrapping_rem(a)),
        Opcode::NEGATE => unary(stack, |a| a.wrapping_neg()),

        Opcode::DUP => {
            let a = arg!(stack);
            stack.push(a);
            stack.push(a);
            TickResult::Next
        }
        Opcode::SWAP => {
            let a = arg!(stack);
            let b = arg!(stack);
            stack.push(a);
            stack.push(b);
            TickResult::Next
        }
        Opcode::POP => {
            arg!(stack);
            TickResult::Next
        }

        Opcode::BAND => binary(stack, |b, a| b & a),
        Opcode::BOR => binary(stack, |b, a| b | a),
        Opcode::BNOT => unary(stack, |a| !a),
        Opcode::XOR => binary(stack, |b, a| b ^ a),

        // Shift amounts are taken modulo the word width.
        Opcode::SHR => binary(stack, |b, a| ((b as u64).wrapping_shr(a as u32)) as Word),
        Opcode::SHL => binary(stack, |b, a| ((b as u64).wrapping_shl(a as u32)) as Word),
        Opcode::SAR => binary(stack, |b, a| b.wrapping_shr(a as u32)),
        Opcode::SAL => binary(stack, |b, a| b.wrapping_shl(a as u32)),

        Opcode::AND => binary(stack, |b, a| bool_word(b != 0 && a != 0)),
        Opcode::OR => binary(stack, |b, a| bool_word(b != 0 || a != 0)),
        Opcode::NOT => unary(stack, |a| bool_word(a == 0)),

        Opcode::EQ => binary(stack, |b, a| bool_word(b == a)),
        Opcode::NE => binary(stack, |b, a| bool_word(b != a)),
        Opcode::GT => binary(stack, |b, a| bool_word(b > a)),
        Opcode::LT => binary(stack, |b, a| bool_word(b < a)),
        Opcode::GTE => binary(stack, |b, a| bool_word(b >= a)),
        Opcode::LTE => binary(stack, |b, a| bool_word(b <= a)),

        Opcode::JMP => {
            let target = arg!(stack);
            TickResult::Jump(target)
        }
        Opcode::JMPZ => {
            let target = arg!(stack);
            let condition = arg!(stack);
            if condition != 0 {
                TickResult::Jump(target)
            } else {
                TickResult::Next
            }
        }

        Opcode::MALLOC => {
            let size = arg!(stack);
            let addr = access!(memory.alloc(size), size);
            stack.push(addr);
            TickResult::Next
        }
        Opcode::FREE => {
            let addr = arg!(stack);
            access!(memory.free(addr), addr);
            TickResult::Next
        }
        Opcode::WRITE => {
            let len = arg!(stack);
            let addr = arg!(stack);
            let bytes = access!(memory.slice(addr, len), addr);
            if output.write_all(bytes).is_err() {
                return TickResult::Stop(ExitCode::IoError);
            }
            TickResult::Next
        }
        Opcode::READ => {
            let len = arg!(stack);
            let addr = arg!(stack);
            let buffer = access!(memory.slice_mut(addr, len), addr);
            if input.read_exact(buffer).is_err() {
                return TickResult::Stop(ExitCode::IoError);
            }
            TickResult::Next
        }
        Opcode::MEMCPY => {
            let len = arg!(stack);
            let src = arg!(stack);
            let dest = arg!(stack);
            // Copying through a buffer keeps overlapping ranges well
            // defined.
            let bytes = access!(memory.slice(src, len), src).to_vec();
            access!(memory.slice_mut(dest, len), dest).copy_from_slice(&bytes);
            TickResult::Next
        }
    }
}
