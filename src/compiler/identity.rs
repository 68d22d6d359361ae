// src/compiler/identity.rs
//! Deterministic serial numbers for the nodes of one compilation
//!
//! Nodes are numbered in pre-order, starting at the run node and continuing
//! with each compiled root in list order. A derivative (variable read, call)
//! shares the serial of the non-derivative original it resolves to, so every
//! generated identifier depends only on the graph's structure.

use crate::graph::{Graph, NodeId};
use crate::CompileError;
use ahash::{HashMap, HashMapExt};
use tracing::debug;

#[derive(Debug, Default)]
pub struct SymbolIds {
    serials: HashMap<NodeId, u32>,
    /// Derivative -> non-derivative original
    aliases: HashMap<NodeId, NodeId>,
    next_serial: u32,
}

impl SymbolIds {
    pub fn assign(graph: &Graph, run_node: NodeId, roots: &[NodeId]) -> Result<Self, CompileError> {
        let mut ids = Self {
            serials: HashMap::with_capacity(graph.len()),
            aliases: HashMap::new(),
            next_serial: 1,
        };

        let mut order = Vec::with_capacity(graph.len());
        ids.number_tree(graph, run_node, &mut order)?;
        for &root in roots {
            ids.number_tree(graph, root, &mut order)?;
        }

        for &id in &order {
            if graph.node(id)?.original.is_some() {
                let original = resolve_original(graph, id)?;
                if !ids.serials.contains_key(&original) {
                    ids.issue(original);
                }
                ids.aliases.insert(id, original);
            }
        }

        debug!(
            nodes = ids.serials.len(),
            derivatives = ids.aliases.len(),
            "assigned node identities"
        );
        Ok(ids)
    }

    /// Pre-order walk of the tree under `root`.
    ///
    /// A root that is already numbered is skipped. A child reached twice means
    /// the graph shares a subtree or contains a cycle.
    fn number_tree(
        &mut self,
        graph: &Graph,
        root: NodeId,
        order: &mut Vec<NodeId>,
    ) -> Result<(), CompileError> {
        if self.serials.contains_key(&root) {
            return Ok(());
        }

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.serials.contains_key(&id) {
                return Err(CompileError::MalformedGraph(format!(
                    "node {id} is reachable from more than one parent"
                )));
            }
            self.issue(id);
            order.push(id);

            let children = graph.node(id)?.children();
            stack.extend(children.into_iter().rev());
        }
        Ok(())
    }

    fn issue(&mut self, id: NodeId) {
        self.serials.insert(id, self.next_serial);
        self.next_serial += 1;
    }

    /// The node whose serial `id` uses
    pub fn resolve(&self, id: NodeId) -> NodeId {
        self.aliases.get(&id).copied().unwrap_or(id)
    }

    pub fn serial(&self, id: NodeId) -> Result<u32, CompileError> {
        self.serials
            .get(&self.resolve(id))
            .copied()
            .ok_or_else(|| {
                CompileError::MalformedGraph(format!("node {id} is not part of the program"))
            })
    }

    pub fn len(&self) -> usize {
        self.serials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serials.is_empty()
    }
}

/// Follow `original` links until a node without one
fn resolve_original(graph: &Graph, id: NodeId) -> Result<NodeId, CompileError> {
    let mut current = id;
    for _ in 0..=graph.len() {
        match graph.node(current)?.original {
            Some(next) => current = next,
            None => return Ok(current),
        }
    }
    Err(CompileError::MalformedGraph(format!(
        "original links of node {id} form a cycle"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ElemType, Expression, NodeKind, StatKind, VarType};

    #[test]
    fn test_serials_follow_preorder() {
        let mut graph = Graph::new();
        let a = graph.num("1");
        let b = graph.num("2");
        let sum = graph.binary(
            crate::graph::BinaryOp::Arith(crate::graph::ArithOp::Add),
            a,
            b,
        );
        let ret = graph.push_stat(StatKind::Return { value: Some(sum) });

        let ids = SymbolIds::assign(&graph, ret, &[]).unwrap();
        assert_eq!(ids.serial(ret).unwrap(), 1);
        assert_eq!(ids.serial(sum).unwrap(), 2);
        assert_eq!(ids.serial(a).unwrap(), 3);
        assert_eq!(ids.serial(b).unwrap(), 4);
    }

    #[test]
    fn test_derivative_shares_original_serial() {
        let mut graph = Graph::new();
        let decl = graph.push_decl(VarType::Var(ElemType::Num), "x");
        let read = graph.var(decl);
        let ret = graph.push_stat(StatKind::Return { value: Some(read) });

        let ids = SymbolIds::assign(&graph, ret, &[decl]).unwrap();
        assert_eq!(ids.resolve(read), decl);
        assert_eq!(ids.serial(read).unwrap(), ids.serial(decl).unwrap());
    }

    #[test]
    fn test_derivative_chain_resolves_transitively() {
        let mut graph = Graph::new();
        let decl = graph.push_decl(VarType::Var(ElemType::Num), "x");
        let first = graph.var(decl);
        let second = graph.push_derivative(NodeKind::Expression(Expression::Var), first);
        let ret = graph.push_stat(StatKind::Return {
            value: Some(second),
        });

        let ids = SymbolIds::assign(&graph, ret, &[]).unwrap();
        assert_eq!(ids.resolve(second), decl);
    }

    #[test]
    fn test_original_cycle_is_rejected() {
        let mut graph = Graph::new();
        let a = graph.push(NodeKind::Expression(Expression::Var));
        let b = graph.push_derivative(NodeKind::Expression(Expression::Var), a);
        graph.node_mut(a).unwrap().original = Some(b);
        let ret = graph.push_stat(StatKind::Return { value: Some(a) });

        assert!(matches!(
            SymbolIds::assign(&graph, ret, &[]),
            Err(CompileError::MalformedGraph(_))
        ));
    }

    #[test]
    fn test_shared_subtree_is_rejected() {
        let mut graph = Graph::new();
        let one = graph.num("1");
        let sum = graph.binary(
            crate::graph::BinaryOp::Arith(crate::graph::ArithOp::Add),
            one,
            one,
        );
        let ret = graph.push_stat(StatKind::Return { value: Some(sum) });

        assert!(SymbolIds::assign(&graph, ret, &[]).is_err());
    }

    #[test]
    fn test_statement_chain_cycle_is_rejected() {
        let mut graph = Graph::new();
        let first = graph.push_stat(StatKind::Break);
        let second = graph.push_stat(StatKind::Continue);
        let head = graph.chain_stats(&[first, second]).unwrap();
        match &mut graph.node_mut(second).unwrap().kind {
            NodeKind::Statement(stat) => stat.next = first,
            other => panic!("expected a statement, got {}", other.label()),
        }

        let err = SymbolIds::assign(&graph, head, &[]).unwrap_err();
        assert!(matches!(err, CompileError::MalformedGraph(_)));
    }

    #[test]
    fn test_repeated_root_is_numbered_once() {
        let mut graph = Graph::new();
        let decl = graph.push_decl(VarType::Var(ElemType::Bool), "flag");
        let run = graph.void_stat();

        let ids = SymbolIds::assign(&graph, run, &[decl, decl]).unwrap();
        assert_eq!(ids.len(), 3);
    }
}
