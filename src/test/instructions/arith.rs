use super::super::run;
use crate::*;

#[test]
fn add() {
    exits!([push_word(2), push_word(3), op_word(Opcode::ADD), op_word(Opcode::EXIT)], 5);
}

#[test]
fn add_wraps() {
    // Push words carry 63 bits, so i64::MAX is built on the stack first:
    // (2^62 - 1) * 2 + 1, then one more add wraps to i64::MIN.
    exits!(
        [
            push_word(i64::max_value() >> 1),
            op_word(Opcode::DUP),
            op_word(Opcode::ADD),
            push_word(1),
            op_word(Opcode::ADD),
            push_word(1),
            op_word(Opcode::ADD),
            op_word(Opcode::EXIT)
        ],
        i64::min_value()
    );
}

#[test]
fn sub_takes_the_top_as_right_operand() {
    // push 2; push 3; sub computes 2 - 3.
    exits!([push_word(2), push_word(3), op_word(Opcode::SUB), op_word(Opcode::EXIT)], -1);
}

#[test]
fn mul() {
    exits!([push_word(-6), push_word(7), op_word(Opcode::MUL), op_word(Opcode::EXIT)], -42);
}

#[test]
fn div_truncates_towards_zero() {
    exits!([push_word(7), push_word(2), op_word(Opcode::DIV), op_word(Opcode::EXIT)], 3);
    exits!([push_word(-7), push_word(2), op_word(Opcode::DIV), op_word(Opcode::EXIT)], -3);
}

#[test]
fn div_by_zero_is_fatal() {
    exits_with!(
        [push_word(7), push_word(0), op_word(Opcode::DIV), op_word(Opcode::EXIT)],
        ExitCode::DivisionByZero
    );
}

#[test]
fn modulo() {
    exits!([push_word(7), push_word(3), op_word(Opcode::MOD), op_word(Opcode::EXIT)], 1);
    exits!([push_word(-7), push_word(3), op_word(Opcode::MOD), op_word(Opcode::EXIT)], -1);
}

#[test]
fn modulo_by_zero_is_fatal() {
    exits_with!(
        [push_word(7), push_word(0), op_word(Opcode::MOD), op_word(Opcode::EXIT)],
        ExitCode::DivisionByZero
    );
}

#[test]
fn negate() {
    exits!([push_word(5), op_word(Opcode::NEGATE), op_word(Opcode::EXIT)], -5);
    exits!([push_word(0), op_word(Opcode::NEGATE), op_word(Opcode::EXIT)], 0);
}

#[test]
fn negate_is_self_inverse() {
    for &value in &[0, 1, -1, 42, i64::min_value() >> 1, i64::max_value() >> 1] {
        exits!(
            [
                push_word(value),
                op_word(Opcode::NEGATE),
                op_word(Opcode::NEGATE),
                op_word(Opcode::EXIT)
            ],
            value
        );
    }
}
