// src/graph/mod.rs
//! Arena of program nodes handed over by the block editor

mod builder;
mod node;

pub use node::*;

use crate::CompileError;
use serde::{Deserialize, Serialize};

/// Program graph. Nodes are addressed by [`NodeId`] and never move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a graph exported by the editor as JSON
    pub fn from_json(json: &str) -> Result<Self, CompileError> {
        serde_json::from_str(json).map_err(|e| CompileError::MalformedGraph(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, CompileError> {
        serde_json::to_string_pretty(self).map_err(|e| CompileError::MalformedGraph(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind));
        id
    }

    /// Push a node that imitates `original`
    pub fn push_derivative(&mut self, kind: NodeKind, original: NodeId) -> NodeId {
        let id = self.push(kind);
        self.nodes[id.index()].original = Some(original);
        id
    }

    pub fn set_state(&mut self, id: NodeId, state: NodeState) -> Result<(), CompileError> {
        self.node_mut(id)?.state = state;
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, CompileError> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| CompileError::MalformedGraph(format!("node {id} does not exist")))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, CompileError> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| CompileError::MalformedGraph(format!("node {id} does not exist")))
    }

    /// Statement at `id`, or `None` at the end of a chain
    pub fn statement(&self, id: NodeId) -> Result<Option<&Statement>, CompileError> {
        match &self.node(id)?.kind {
            NodeKind::Statement(stat) => Ok(Some(stat)),
            NodeKind::VoidStat => Ok(None),
            other => Err(unexpected(id, "statement", other)),
        }
    }

    pub fn expression(&self, id: NodeId) -> Result<&Expression, CompileError> {
        match &self.node(id)?.kind {
            NodeKind::Expression(exp) => Ok(exp),
            other => Err(unexpected(id, "expression", other)),
        }
    }

    /// Declaration at `id`, or `None` at the end of a chain
    pub fn var_decl(&self, id: NodeId) -> Result<Option<&VarDecl>, CompileError> {
        match &self.node(id)?.kind {
            NodeKind::VarDecl(decl) => Ok(Some(decl)),
            NodeKind::VarDeclVoid => Ok(None),
            other => Err(unexpected(id, "variable declaration", other)),
        }
    }

    /// Argument at `id`, or `None` at the end of a chain
    pub fn arg(&self, id: NodeId) -> Result<Option<&Arg>, CompileError> {
        match &self.node(id)?.kind {
            NodeKind::Arg(arg) => Ok(Some(arg)),
            NodeKind::ArgVoid => Ok(None),
            other => Err(unexpected(id, "argument", other)),
        }
    }

    pub fn func_def_at(&self, id: NodeId) -> Result<&FuncDef, CompileError> {
        match &self.node(id)?.kind {
            NodeKind::FuncDef(def) => Ok(def),
            other => Err(unexpected(id, "function definition", other)),
        }
    }
}

fn unexpected(id: NodeId, expected: &str, found: &NodeKind) -> CompileError {
    CompileError::MalformedGraph(format!(
        "node {id} should be a {expected} but is a {}",
        found.label()
    ))
}
