//! One lexical scope as seen by the resolver.

use std::rc::Rc;

use bitflags::bitflags;
use lox_ir::Span;
use rustc_hash::FxHashMap;

use crate::Binding;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub(super) struct Status: u8 {
        /// Inside the declaration's own initialiser.
        const INITIALISING = 1 << 0;
        const DEFINED = 1 << 1;
        const USED = 1 << 2;
    }
}

#[derive(Copy, Clone, Debug)]
pub(super) struct Declared {
    pub binding: Binding,
    pub status: Status,
}

/// Names declared in a scope, plus uses of names that had not been declared
/// when they were seen.
#[derive(Debug, Default)]
pub(super) struct Scope {
    decls: FxHashMap<Rc<str>, Declared>,
    undeclared_uses: FxHashMap<Rc<str>, Vec<Span>>,
}

impl Scope {
    pub fn declare(&mut self, name: &Rc<str>, binding: Binding) {
        let mut status = Status::empty();
        if self.undeclared_uses.contains_key(name) {
            status |= Status::USED;
        }
        self.decls.insert(Rc::clone(name), Declared { binding, status });
    }

    pub fn get(&self, name: &str) -> Option<&Declared> {
        self.decls.get(name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    pub fn is_initialising(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|d| d.status.contains(Status::INITIALISING))
    }

    /// Set or clear `flag` on a declared name. Unknown names are ignored.
    pub fn mark(&mut self, name: &str, flag: Status, on: bool) {
        if let Some(decl) = self.decls.get_mut(name) {
            decl.status.set(flag, on);
        }
    }

    pub fn use_undeclared(&mut self, name: &Rc<str>, span: Span) {
        self.undeclared_uses
            .entry(Rc::clone(name))
            .or_default()
            .push(span);
    }

    /// Declarations never marked used, as `(name, binding)`.
    pub fn unused(&self) -> impl Iterator<Item = (&str, Binding)> + '_ {
        self.decls
            .iter()
            .filter(|(_, d)| !d.status.contains(Status::USED))
            .map(|(name, d)| (&**name, d.binding))
    }

    /// Early uses, each with whether the name was declared later on.
    pub fn early_uses(&self) -> impl Iterator<Item = (&str, Span, bool)> + '_ {
        self.undeclared_uses.iter().flat_map(move |(name, spans)| {
            let declared = self.is_declared(name);
            spans.iter().map(move |&span| (&**name, span, declared))
        })
    }
}
