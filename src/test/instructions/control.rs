use super::super::run;
use crate::*;

#[test]
fn jmp_continues_at_the_popped_address() {
    // 0: push 32; 8: jmp; 16: push 1; 24: exit; 32: push 0; 40: exit
    exits!(
        [
            push_word(32),
            op_word(Opcode::JMP),
            push_word(1),
            op_word(Opcode::EXIT),
            push_word(0),
            op_word(Opcode::EXIT)
        ],
        0
    );
}

#[test]
fn jmpz_branches_on_nonzero() {
    // 0: push 1; 8: push 40; 16: jmpz; 24: push 7; 32: exit; 40: push 9; 48: exit
    exits!(
        [
            push_word(1),
            push_word(40),
            op_word(Opcode::JMPZ),
            push_word(7),
            op_word(Opcode::EXIT),
            push_word(9),
            op_word(Opcode::EXIT)
        ],
        9
    );
}

#[test]
fn jmpz_falls_through_on_zero() {
    exits!(
        [
            push_word(0),
            push_word(40),
            op_word(Opcode::JMPZ),
            push_word(7),
            op_word(Opcode::EXIT),
            push_word(9),
            op_word(Opcode::EXIT)
        ],
        7
    );
}

#[test]
fn jmp_backward() {
    // Counts to three: the counter is incremented at offset 8, compared
    // against 3, and the loop jumps back until jmpz takes the branch to
    // the exit at offset 80.
    exits!(
        [
            push_word(0),           //  0: counter
            push_word(1),           //  8: loop head
            op_word(Opcode::ADD),   // 16
            op_word(Opcode::DUP),   // 24
            push_word(3),           // 32
            op_word(Opcode::EQ),    // 40
            push_word(80),          // 48
            op_word(Opcode::JMPZ),  // 56
            push_word(8),           // 64
            op_word(Opcode::JMP),   // 72
            op_word(Opcode::EXIT)   // 80
        ],
        3
    );
}

#[test]
fn jmp_outside_the_address_space_is_fatal() {
    exits_with!(
        [push_word(800), op_word(Opcode::JMP)],
        ExitCode::BadMemoryAccess(800)
    );
    exits_with!(
        [push_word(-8), op_word(Opcode::JMP)],
        ExitCode::BadMemoryAccess(-8)
    );
}
