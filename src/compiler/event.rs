// src/compiler/event.rs
//! Event handler registration
//!
//! Each handler body runs under its own lock so that a handler never overlaps
//! with itself when its event fires again while it is still running.

use super::common::{assemble_call, CodeGenerator};
use super::expression::{num_literal, str_literal};
use super::symbols::{self, ident, js};
use crate::graph::{EventTrigger, NodeId, NodeKind};
use crate::CompileError;
use tracing::{debug, warn};

impl CodeGenerator<'_> {
    /// Emit a handler for every event node among `roots`
    pub fn gen_event_handlers(&mut self, roots: &[NodeId], depth: usize) -> Result<(), CompileError> {
        let graph = self.graph;
        for &root in roots {
            let NodeKind::Event(event) = &graph.node(root)?.kind else {
                continue;
            };
            let handler = self.func_name(root)?;
            let lock = self.lock_name(root)?;
            debug!(trigger = ?event.trigger, handler = %handler, "generating event handler");

            self.emit_let(depth, &lock, &assemble_call::<&str>(ident::GEN_LOCK_OBJ, &[]));
            self.emit_line(depth, &format!("{}{handler}() {{", js::FUNCTION));
            let try_lock = assemble_call(ident::TRY_LOCK, &[&lock]);
            self.emit_line(depth + 1, &format!("{}({try_lock}) {{", js::IF));
            self.emit_line(depth + 2, &format!("{}{{", js::TRY));

            if let EventTrigger::DelayedStart(delay) = &event.trigger {
                let delay = num_literal(root, delay)?;
                let sleep = assemble_call(ident::SLEEP, &[delay]);
                self.emit_line(depth + 3, &format!("{sleep};"));
            }
            self.gen_statements(event.body, depth + 3)?;

            self.emit_line(depth + 2, "}");
            self.emit_line(depth + 2, &format!("{}{{", js::FINALLY));
            let unlock = assemble_call(ident::UNLOCK, &[&lock]);
            self.emit_line(depth + 3, &format!("{unlock};"));
            self.emit_line(depth + 2, "}");
            self.emit_line(depth + 1, "}");
            self.emit_line(depth, "}");

            // A key with no runtime event keeps its handler but never fires
            match symbols::event_name(&event.trigger) {
                Some(event_name) => {
                    let register =
                        assemble_call(ident::ADD_EVENT, &[handler, str_literal(&event_name)]);
                    self.emit_line(depth, &format!("{register};"));
                }
                None => warn!(trigger = ?event.trigger, node = %root, "event is not registered"),
            }
        }
        Ok(())
    }
}
