use super::super::{run, run_io};
use crate::*;
use byteorder::ByteOrder;

#[test]
fn malloc_store_load_round_trip() {
    exits!(
        [
            push_word(8),
            op_word(Opcode::MALLOC),
            op_word(Opcode::DUP),
            push_word(0x1234),
            op_word(Opcode::STORE),
            op_word(Opcode::LOAD),
            op_word(Opcode::EXIT)
        ],
        0x1234
    );
}

#[test]
fn malloc_addresses_start_at_program_size() {
    // Three words of program, so the first allocation lands at 24.
    exits!([push_word(1), op_word(Opcode::MALLOC), op_word(Opcode::EXIT)], 24);
}

#[test]
fn free_releases_an_allocation() {
    // The address survives on the stack after dup; free consumes one
    // copy and exit reports the other.
    exits!(
        [
            push_word(8),
            op_word(Opcode::MALLOC),
            op_word(Opcode::DUP),
            op_word(Opcode::FREE),
            op_word(Opcode::EXIT)
        ],
        40
    );
}

#[test]
fn double_free_is_fatal() {
    exits_with!(
        [
            push_word(8),
            op_word(Opcode::MALLOC),
            op_word(Opcode::DUP),
            op_word(Opcode::DUP),
            op_word(Opcode::FREE),
            op_word(Opcode::FREE)
        ],
        ExitCode::BadMemoryAccess(48)
    );
}

#[test]
fn freeing_program_space_is_fatal() {
    exits_with!(
        [push_word(0), op_word(Opcode::FREE), op_word(Opcode::EXIT)],
        ExitCode::BadMemoryAccess(0)
    );
}

#[test]
fn write_sends_program_bytes_to_the_output() {
    let text = Endian::read_i64(b"hi there");
    let (code, _, _, output) = run(&[
        push_word(40),
        push_word(8),
        op_word(Opcode::WRITE),
        push_word(0),
        op_word(Opcode::EXIT),
        text,
    ]);

    assert_eq!(code, ExitCode::Exited(0));
    assert_eq!(output, b"hi there");
}

#[test]
fn read_fills_program_bytes_from_the_input() {
    let (code, ..) = run_io(
        &[
            push_word(48),
            push_word(8),
            op_word(Opcode::READ),
            push_word(48),
            op_word(Opcode::LOAD),
            op_word(Opcode::EXIT),
            0,
        ],
        b"abcdefgh",
    );

    assert_eq!(code, ExitCode::Exited(Endian::read_i64(b"abcdefgh")));
}

#[test]
fn read_past_end_of_input_is_fatal() {
    let (code, ..) = run_io(
        &[push_word(32), push_word(8), op_word(Opcode::READ), op_word(Opcode::EXIT), 0],
        b"abc",
    );

    assert_eq!(code, ExitCode::IoError);
}

#[test]
fn memcpy_copies_between_spaces() {
    let data = 0x0123_4567_89AB_CDEF;
    exits!(
        [
            push_word(8),
            op_word(Opcode::MALLOC),
            op_word(Opcode::DUP),
            push_word(64),
            push_word(8),
            op_word(Opcode::MEMCPY),
            op_word(Opcode::LOAD),
            op_word(Opcode::EXIT),
            data
        ],
        data
    );
}

#[test]
fn heap_reads_and_writes_route_past_the_image() {
    let (_, _, memory, _) = run(&[
        push_word(8),
        op_word(Opcode::MALLOC),
        push_word(-1),
        op_word(Opcode::STORE),
        push_word(0),
        op_word(Opcode::EXIT),
    ]);

    // The image itself is untouched; the store landed in the heap.
    assert_eq!(memory.read_word(memory.program_size()), Ok(-1));
}
