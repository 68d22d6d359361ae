// src/compiler/mod.rs
//! Compiler that turns a program graph into one JavaScript file

pub mod common;
mod event;
mod expression;
mod func_def;
pub mod identity;
mod statement;
pub mod symbols;
mod var_decl;

pub use common::CodeGenerator;
pub use expression::str_literal;
pub use identity::SymbolIds;

use crate::graph::{Graph, NodeId, NodeState};
use crate::runtime::RuntimeLibrary;
use crate::{CompileError, CompileOption};
use tracing::debug;

/// Depth of code placed inside the wrapping function
const BODY_DEPTH: usize = 1;

/// Generate the complete program text.
///
/// Layout: an immediately invoked function containing the runtime library,
/// global declarations, function definitions, event handlers and finally the
/// statements of `run_node`.
pub fn generate(
    graph: &Graph,
    run_node: NodeId,
    compiled: &[NodeId],
    option: CompileOption,
    runtime: &RuntimeLibrary,
) -> Result<String, CompileError> {
    let run = graph.node(run_node)?;
    if run.state != NodeState::RootDirectlyUnderWorkspace {
        return Err(CompileError::NotExecutable {
            node: run_node,
            state: run.state,
        });
    }
    graph.statement(run_node)?;

    let ids = SymbolIds::assign(graph, run_node, compiled)?;
    let mut gen = CodeGenerator::new(graph, &ids, option);

    gen.emit_raw("(function(){\n");
    gen.emit_raw(&runtime.source(option.local));
    gen.gen_global_var_decls(compiled, BODY_DEPTH)?;
    gen.gen_func_defs(compiled, BODY_DEPTH)?;
    gen.gen_event_handlers(compiled, BODY_DEPTH)?;
    gen.gen_statements(run_node, BODY_DEPTH)?;
    gen.emit_raw("})();\n");

    let code = gen.finish();
    debug!(bytes = code.len(), nodes = ids.len(), "generated program");
    Ok(code)
}
