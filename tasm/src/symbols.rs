use std::collections::HashMap;

use pest::Span;
use tvm::{op_word, Opcode, Word};

use crate::emit::Emitter;
use crate::{new_parser_error, Result};

/// A textual reference emitted before its symbol was resolvable.
struct PendingRef<'i> {
    offset: usize,
    depth: u32,
    span: Span<'i>,
}

/// Two-phase symbol table.
///
/// `defined` starts out holding every opcode mnemonic and grows by one
/// entry per label; `pending` collects every reference site until the end
/// of input, when [`resolve`] patches them all.
///
/// [`resolve`]: #method.resolve
pub struct SymbolTable<'i> {
    defined: HashMap<&'i str, Word>,
    pending: HashMap<&'i str, Vec<PendingRef<'i>>>,
}

impl<'i> SymbolTable<'i> {
    pub fn new() -> SymbolTable<'i> {
        let mut defined = HashMap::new();
        for opcode in Opcode::ALL {
            defined.insert(opcode.mnemonic(), op_word(*opcode));
        }

        SymbolTable {
            defined,
            pending: HashMap::new(),
        }
    }

    /// Defines the symbol named by `span`. Mnemonics and labels share one
    /// namespace, so a label may neither repeat nor shadow an opcode.
    pub fn define(&mut self, span: Span<'i>, value: Word) -> Result<()> {
        let name = span.as_str();
        if self.defined.contains_key(name) {
            return Err(new_parser_error(
                span,
                format!("Symbol `{}` is already defined", name),
            ));
        }
        self.defined.insert(name, value);
        Ok(())
    }

    /// Records a reference to `span` at image `offset`, emitted under
    /// `depth` levels of `push(`.
    pub fn reference(&mut self, span: Span<'i>, offset: usize, depth: u32) {
        self.pending
            .entry(span.as_str())
            .or_insert_with(Vec::new)
            .push(PendingRef {
                offset,
                depth,
                span,
            });
    }

    /// Patches every pending site with `value << depth`.
    pub fn resolve(&self, emitter: &mut Emitter) -> Result<()> {
        for (name, sites) in &self.pending {
            let value = match self.defined.get(name) {
                Some(&value) => value,
                None => {
                    return Err(new_parser_error(
                        sites[0].span.clone(),
                        format!("Undeclared symbol `{}`", name),
                    ));
                }
            };

            for site in sites {
                emitter.patch_word(site.offset, value << site.depth);
            }
        }
        Ok(())
    }
}
