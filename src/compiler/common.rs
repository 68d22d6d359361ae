// src/compiler/common.rs
//! Shared state and text helpers for the code generators

use super::identity::SymbolIds;
use super::symbols::{ident, js};
use crate::graph::{Graph, NodeId};
use crate::{CompileError, CompileOption};

/// Writes JavaScript for one compilation into a single buffer.
///
/// The per-construct generators live in sibling modules as further
/// `impl CodeGenerator` blocks.
pub struct CodeGenerator<'a> {
    pub(super) graph: &'a Graph,
    pub(super) ids: &'a SymbolIds,
    pub(super) option: CompileOption,
    code: String,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(graph: &'a Graph, ids: &'a SymbolIds, option: CompileOption) -> Self {
        Self {
            graph,
            ids,
            option,
            code: String::with_capacity(4096),
        }
    }

    /// Identifier of a variable, temporary or loop counter
    pub fn var_name(&self, id: NodeId) -> Result<String, CompileError> {
        Ok(format!("{}{}", ident::VAR_PREFIX, self.ids.serial(id)?))
    }

    /// Identifier of a user-defined function or event handler
    pub fn func_name(&self, id: NodeId) -> Result<String, CompileError> {
        Ok(format!("{}{}", ident::FUNC_PREFIX, self.ids.serial(id)?))
    }

    pub fn lock_name(&self, id: NodeId) -> Result<String, CompileError> {
        Ok(format!("{}{}", ident::LOCK_PREFIX, self.ids.serial(id)?))
    }

    pub(super) fn emit_line(&mut self, depth: usize, text: &str) {
        self.code.push_str(&indent(depth));
        self.code.push_str(text);
        self.code.push('\n');
    }

    pub(super) fn emit_raw(&mut self, text: &str) {
        self.code.push_str(text);
    }

    /// `let <name> = <value>;`
    pub(super) fn emit_let(&mut self, depth: usize, name: &str, value: &str) {
        self.emit_line(depth, &format!("{}{name} = {value};", js::LET));
    }

    /// Opens a debug call-stack frame when debugging is enabled
    pub(super) fn emit_call_stack_push(&mut self, depth: usize, id: NodeId) -> Result<(), CompileError> {
        if self.option.is_debug {
            let serial = self.ids.serial(id)?;
            self.emit_line(depth, &format!("{}.push({serial});", ident::CALL_STACK));
        }
        Ok(())
    }

    pub(super) fn emit_call_stack_pop(&mut self, depth: usize) {
        if self.option.is_debug {
            self.emit_line(depth, &format!("{}.pop();", ident::CALL_STACK));
        }
    }

    pub fn finish(self) -> String {
        self.code
    }
}

pub fn indent(depth: usize) -> String {
    js::INDENT.repeat(depth)
}

/// `name(arg0, arg1, ...)`
pub fn assemble_call<S: AsRef<str>>(name: &str, args: &[S]) -> String {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    format!("{name}({})", args.join(", "))
}

/// Block comment that cannot terminate early
pub fn comment(text: &str) -> String {
    format!("/*{}*/", text.replace("*/", "* /"))
}
