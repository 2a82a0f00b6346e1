use super::super::run;
use crate::*;

#[test]
fn load_reads_a_program_word() {
    // The word at offset 24 is plain data, never executed.
    exits!(
        [push_word(24), op_word(Opcode::LOAD), op_word(Opcode::EXIT), 4660],
        4660
    );
}

#[test]
fn store_modifies_program_space() {
    // 48 holds 0 until the program overwrites it with 77.
    exits!(
        [
            push_word(48),
            push_word(77),
            op_word(Opcode::STORE),
            push_word(48),
            op_word(Opcode::LOAD),
            op_word(Opcode::EXIT),
            0
        ],
        77
    );
}

#[test]
fn loadbyte_sign_extends() {
    exits!(
        [push_word(24), op_word(Opcode::LOADBYTE), op_word(Opcode::EXIT), 0x80],
        -128
    );
}

#[test]
fn loadbyte_reads_single_bytes() {
    // Byte 25 of the data word 0x4142 is 0x41.
    exits!(
        [push_word(25), op_word(Opcode::LOADBYTE), op_word(Opcode::EXIT), 0x4142],
        0x41
    );
}

#[test]
fn storebyte_keeps_the_low_eight_bits() {
    exits!(
        [
            push_word(48),
            push_word(0x1FF),
            op_word(Opcode::STOREBYTE),
            push_word(48),
            op_word(Opcode::LOAD),
            op_word(Opcode::EXIT),
            0
        ],
        0xFF
    );
}

#[test]
fn access_straddling_the_space_boundary_is_fatal() {
    // The image is 24 bytes; a word read at 20 would cross into heap
    // space.
    exits_with!(
        [push_word(20), op_word(Opcode::LOAD), op_word(Opcode::EXIT)],
        ExitCode::BadMemoryAccess(20)
    );
}

#[test]
fn negative_addresses_are_fatal() {
    exits_with!(
        [push_word(-8), op_word(Opcode::LOAD), op_word(Opcode::EXIT)],
        ExitCode::BadMemoryAccess(-8)
    );
}
