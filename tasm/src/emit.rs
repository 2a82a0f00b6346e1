use byteorder::ByteOrder;
use matches::debug_assert_matches;
use pest::iterators::Pair;
use tvm::{constants, Word};
use util::Endian;

use crate::symbols::SymbolTable;
use crate::{new_parser_error, Result, Rule};

/// Append-only image buffer with word-level patching.
pub struct Emitter {
    image: Vec<u8>,
}

impl Emitter {
    pub fn new() -> Emitter {
        Emitter { image: Vec::new() }
    }

    /// Current output offset in bytes.
    pub fn offset(&self) -> usize {
        self.image.len()
    }

    pub fn write_word(&mut self, word: Word) {
        let start = self.image.len();
        self.image.resize(start + constants::WORD_BYTES, 0);
        Endian::write_i64(&mut self.image[start..], word);
    }

    /// Pads with zero bytes up to the next word boundary.
    pub fn align_to_word(&mut self) {
        while self.image.len() % constants::WORD_BYTES != 0 {
            self.image.push(0);
        }
    }

    pub fn patch_word(&mut self, offset: usize, word: Word) {
        Endian::write_i64(
            &mut self.image[offset..offset + constants::WORD_BYTES],
            word,
        );
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.image
    }
}

/// Assembles a parsed program: one pass over the tokens, then symbol
/// resolution over the collected reference sites.
pub fn process_program(pair: Pair<Rule>) -> Result<Vec<u8>> {
    debug_assert_matches!(pair.as_rule(), Rule::program);

    let mut emitter = Emitter::new();
    let mut symbols = SymbolTable::new();

    for element in pair.into_inner() {
        if element.as_rule() == Rule::EOI {
            break;
        }
        process_element(element, 0, &mut emitter, &mut symbols)?;
    }

    symbols.resolve(&mut emitter)?;

    Ok(emitter.into_bytes())
}

fn process_element<'i>(
    pair: Pair<'i, Rule>,
    depth: u32,
    emitter: &mut Emitter,
    symbols: &mut SymbolTable<'i>,
) -> Result<()> {
    match pair.as_rule() {
        Rule::label => {
            let span = pair.as_span();
            if depth > 0 {
                return Err(new_parser_error(
                    span,
                    "Labels cannot be defined inside push arguments".to_owned(),
                ));
            }

            let name = pair.into_inner().next().unwrap();
            emitter.align_to_word();
            symbols.define(name.as_span(), emitter.offset() as Word)
        }
        Rule::int => {
            let span = pair.as_span();
            let value: Word = span
                .as_str()
                .parse()
                .map_err(|err| new_parser_error(span, format!("Parsing integer failed: {}", err)))?;
            emitter.write_word(value << depth);
            Ok(())
        }
        Rule::push => {
            let span = pair.as_span();
            let depth = depth + 1;
            if depth >= constants::WORD_WIDTH {
                return Err(new_parser_error(
                    span,
                    "Push nesting exceeds the word width".to_owned(),
                ));
            }
            for inner in pair.into_inner() {
                process_element(inner, depth, emitter, symbols)?;
            }
            Ok(())
        }
        Rule::identifier => {
            let span = pair.as_span();
            if span.as_str() == "push" {
                return Err(new_parser_error(
                    span,
                    "The `push` instruction takes a parenthesized argument".to_owned(),
                ));
            }

            // The slot is patched during resolution; until then it holds
            // the push depth of the reference site.
            emitter.align_to_word();
            symbols.reference(span, emitter.offset(), depth);
            emitter.write_word(Word::from(depth));
            Ok(())
        }
        _ => unreachable!(),
    }
}
