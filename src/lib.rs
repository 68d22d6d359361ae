// src/lib.rs
//! # BunnyHop Compiler
//!
//! Turns a BunnyHop visual block program, handed over as a graph of typed
//! nodes, into one self-contained JavaScript file that a JavaScript engine
//! runs as is.
//!
//! ## Example
//!
//! ```rust
//! use bunnyhop_compiler::graph::{ArithOp, BinaryOp, ElemType, Graph, NodeState, StatKind, VarType};
//! use bunnyhop_compiler::{CompileOption, Compiler};
//!
//! let mut graph = Graph::new();
//! let decl = graph.push_decl(VarType::Var(ElemType::Num), "v");
//! let target = graph.var(decl);
//! let three = graph.num("3");
//! let four = graph.num("4");
//! let sum = graph.binary(BinaryOp::Arith(ArithOp::Add), three, four);
//! let run = graph.push_stat(StatKind::Assign { target, value: sum });
//! graph.set_state(run, NodeState::RootDirectlyUnderWorkspace).unwrap();
//!
//! let compiler = Compiler::default();
//! let code = compiler
//!     .generate(&graph, run, &[decl], CompileOption::default())
//!     .unwrap();
//! assert!(code.contains(" = 3 + 4;"));
//! ```

pub mod compiler;
pub mod config;
pub mod graph;
pub mod runtime;
#[cfg(feature = "tokio")]
pub mod service;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub use config::CompilerConfig;
pub use graph::{Graph, NodeId, NodeState};
pub use runtime::RuntimeLibrary;
#[cfg(feature = "tokio")]
pub use service::CompileService;

/// Errors that can occur during compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Node {node} is not executable: it is a {state} node")]
    NotExecutable { node: NodeId, state: NodeState },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed graph: {0}")]
    MalformedGraph(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Compile task failed: {0}")]
    TaskFailed(String),
}

/// Switches that change the generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOption {
    /// Run on the editor's machine rather than on a connected device
    pub local: bool,

    /// Record a call stack while the program runs
    pub is_debug: bool,

    /// Replace non-finite arithmetic results with the left operand
    pub handle_exception: bool,

    /// Annotate declarations with the names the user gave them
    pub with_comments: bool,
}

impl CompileOption {
    pub fn with_local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    pub fn with_debug(mut self, is_debug: bool) -> Self {
        self.is_debug = is_debug;
        self
    }

    pub fn with_handle_exception(mut self, handle_exception: bool) -> Self {
        self.handle_exception = handle_exception;
        self
    }

    pub fn with_comments(mut self, with_comments: bool) -> Self {
        self.with_comments = with_comments;
        self
    }
}

impl Default for CompileOption {
    fn default() -> Self {
        Self {
            local: true,
            is_debug: false,
            handle_exception: true,
            with_comments: false,
        }
    }
}

/// Main compiler instance
#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    runtime: Arc<RuntimeLibrary>,
}

impl Compiler {
    /// Create a compiler, loading the runtime library from
    /// `config.runtime_dir` when one is set
    pub fn new(config: CompilerConfig) -> Result<Self, CompileError> {
        let runtime = match &config.runtime_dir {
            Some(dir) => RuntimeLibrary::load(dir)?,
            None => RuntimeLibrary::builtin(),
        };
        Ok(Self {
            config,
            runtime: Arc::new(runtime),
        })
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Generate the program text without touching the file system
    pub fn generate(
        &self,
        graph: &Graph,
        run_node: NodeId,
        compiled: &[NodeId],
        option: CompileOption,
    ) -> Result<String, CompileError> {
        compiler::generate(graph, run_node, compiled, option, &self.runtime)
    }

    /// Compile `run_node` together with the declarations, functions and event
    /// handlers in `compiled` and write the program to the configured path.
    ///
    /// The file is written in one go after the whole program has been
    /// generated, so a failed compile leaves any previous output untouched.
    pub fn compile(
        &self,
        graph: &Graph,
        run_node: NodeId,
        compiled: &[NodeId],
        option: CompileOption,
    ) -> Result<PathBuf, CompileError> {
        let code = self.generate(graph, run_node, compiled, option)?;

        let path = self.config.output_path();
        fs::create_dir_all(&self.config.output_dir).map_err(|source| CompileError::Io {
            path: self.config.output_dir.clone(),
            source,
        })?;
        fs::write(&path, &code).map_err(|source| CompileError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = code.len(), "compiled program");
        Ok(path)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            config: CompilerConfig::default(),
            runtime: Arc::new(RuntimeLibrary::builtin()),
        }
    }
}
