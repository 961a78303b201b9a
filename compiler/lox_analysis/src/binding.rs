//! What identifier uses resolve to.

use lox_ir::{IdentId, Span};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Kind of declaration a [`Binding`] points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Var,
    Fun,
    Class,
    Param,
    Method,
    /// A `obj.name = value` assignment, which creates a field.
    PropertySet,
    Builtin,
    /// The implicit `this` of a class body.
    This,
}

/// A declaration, identified by the identifier it binds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Binding {
    pub kind: BindingKind,
    /// Identifier bound by the declaration.
    pub ident: IdentId,
    /// Span of that identifier, `Span::DUMMY` for implicit declarations.
    pub span: Span,
}

impl Binding {
    pub fn new(kind: BindingKind, ident: IdentId, span: Span) -> Self {
        Binding { kind, ident, span }
    }

    /// A declaration with no source text.
    pub fn implicit(kind: BindingKind) -> Self {
        Binding::new(kind, IdentId::fresh(), Span::DUMMY)
    }
}

/// Identifier → the declarations it may refer to.
///
/// Most identifiers have exactly one binding. Property names used on
/// objects of unknown class can have several.
#[derive(Clone, Debug, Default)]
pub struct BindingMap {
    map: FxHashMap<IdentId, SmallVec<[Binding; 1]>>,
}

impl BindingMap {
    pub fn get(&self, ident: IdentId) -> &[Binding] {
        self.map.get(&ident).map_or(&[], |b| b.as_slice())
    }

    pub fn first(&self, ident: IdentId) -> Option<Binding> {
        self.get(ident).first().copied()
    }

    pub fn contains(&self, ident: IdentId) -> bool {
        self.map.contains_key(&ident)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn push(&mut self, ident: IdentId, binding: Binding) {
        self.map.entry(ident).or_default().push(binding);
    }

    pub(crate) fn replace(&mut self, ident: IdentId, bindings: &[Binding]) {
        self.map.insert(ident, bindings.iter().copied().collect());
    }
}
