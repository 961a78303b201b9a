//! Static analysis of Lox programs.
//!
//! Two independent passes run over a parsed program:
//! - the [resolver](resolve_idents) binds every identifier use to the
//!   declarations it may refer to and reports scoping problems
//! - the [checker](check_semantics) enforces context rules such as `break`
//!   outside a loop or a setter without a getter
//!
//! [`analyse_program`] runs both and merges their diagnostics.

mod binding;
mod checker;
mod options;
mod resolver;

use lox_diagnostic::{Diagnostic, DiagnosticQueue};
use lox_ir::Program;

pub use binding::{Binding, BindingKind, BindingMap};
pub use checker::check_semantics;
pub use options::AnalysisOptions;
pub use resolver::{resolve_idents, ResolveOutput};

/// Result of analysing one program.
#[derive(Debug)]
pub struct Analysis {
    pub bindings: BindingMap,
    /// Diagnostics from both passes, ordered by position.
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }
}

/// Resolve identifiers and check semantics. `builtins` names the globals
/// provided by the runtime.
#[tracing::instrument(level = "debug", skip_all)]
pub fn analyse_program(program: &Program, builtins: &[&str], options: AnalysisOptions) -> Analysis {
    let resolved = resolve_idents(program, builtins, options);
    let mut queue = DiagnosticQueue::new();
    queue.extend(resolved.diagnostics);
    queue.extend(check_semantics(program, options));
    tracing::debug!(diagnostics = queue.len(), fatal = queue.has_fatal(), "analysed");
    Analysis {
        bindings: resolved.bindings,
        diagnostics: queue.into_sorted(),
    }
}

/// `'name'`, the form identifiers take in messages.
pub(crate) fn quoted(name: &str) -> String {
    format!("'{name}'")
}

#[cfg(test)]
mod tests;
