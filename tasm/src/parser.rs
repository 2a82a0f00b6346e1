use pest_derive::Parser;

/// Parser for the assembly language, generated from `grammar.pest`.
#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct AsmParser;
