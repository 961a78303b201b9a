//! Grammar productions, split by node family.

mod decl;
mod expr;
mod stmt;
