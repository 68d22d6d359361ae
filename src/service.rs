// src/service.rs
//! Async front-end that runs one compile at a time

use crate::graph::{Graph, NodeId};
use crate::{CompileError, CompileOption, Compiler};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serializes compile requests coming from async code.
///
/// All compiles write the same output file, so a request waits until the
/// previous one has finished. The generation itself runs on the blocking pool.
#[derive(Clone)]
pub struct CompileService {
    compiler: Arc<Compiler>,
    in_flight: Arc<Mutex<()>>,
}

impl CompileService {
    pub fn new(compiler: Compiler) -> Self {
        Self {
            compiler: Arc::new(compiler),
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    pub async fn compile(
        &self,
        graph: Graph,
        run_node: NodeId,
        compiled: Vec<NodeId>,
        option: CompileOption,
    ) -> Result<PathBuf, CompileError> {
        let _guard = self.in_flight.lock().await;
        let compiler = Arc::clone(&self.compiler);
        tokio::task::spawn_blocking(move || compiler.compile(&graph, run_node, &compiled, option))
            .await
            .map_err(|e| CompileError::TaskFailed(e.to_string()))?
    }

    /// Whether a compile is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }
}
