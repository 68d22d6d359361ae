// src/graph/builder.rs
//! Helpers for assembling graphs in code (tests, demos, benchmarks)
//!
//! Statements and declarations are pushed with their own end-of-chain node and
//! linked afterwards with [`Graph::chain_stats`] / [`Graph::chain_decls`].

use super::*;

impl Graph {
    /// Push an end-of-statements node
    pub fn void_stat(&mut self) -> NodeId {
        self.push(NodeKind::VoidStat)
    }

    pub fn push_stat(&mut self, stat: StatKind) -> NodeId {
        let next = self.void_stat();
        self.push(NodeKind::Statement(Statement { stat, next }))
    }

    /// Push a call statement to the user function defined at `func_def`
    pub fn push_call_stat(&mut self, func_def: NodeId, args: &[NodeId]) -> NodeId {
        let args = self.arg_chain(args);
        let next = self.void_stat();
        self.push_derivative(
            NodeKind::Statement(Statement {
                stat: StatKind::FuncCall { args },
                next,
            }),
            func_def,
        )
    }

    pub fn push_decl(&mut self, ty: VarType, name: impl Into<String>) -> NodeId {
        let next = self.push(NodeKind::VarDeclVoid);
        self.push(NodeKind::VarDecl(VarDecl {
            ty,
            name: name.into(),
            next,
        }))
    }

    /// Link statements in order and return the chain head
    pub fn chain_stats(&mut self, stats: &[NodeId]) -> Result<NodeId, CompileError> {
        let Some((&last, rest)) = stats.split_last() else {
            return Ok(self.void_stat());
        };
        let mut next = last;
        self.statement(last)?;
        for &id in rest.iter().rev() {
            match &mut self.node_mut(id)?.kind {
                NodeKind::Statement(stat) => stat.next = next,
                other => return Err(not_chainable(id, other)),
            }
            next = id;
        }
        Ok(next)
    }

    /// Link declarations in order and return the chain head
    pub fn chain_decls(&mut self, decls: &[NodeId]) -> Result<NodeId, CompileError> {
        let Some((&last, rest)) = decls.split_last() else {
            return Ok(self.push(NodeKind::VarDeclVoid));
        };
        let mut next = last;
        self.var_decl(last)?;
        for &id in rest.iter().rev() {
            match &mut self.node_mut(id)?.kind {
                NodeKind::VarDecl(decl) => decl.next = next,
                other => return Err(not_chainable(id, other)),
            }
            next = id;
        }
        Ok(next)
    }

    pub fn arg_chain(&mut self, values: &[NodeId]) -> NodeId {
        let mut next = self.push(NodeKind::ArgVoid);
        for &value in values.iter().rev() {
            next = self.push(NodeKind::Arg(Arg { value, next }));
        }
        next
    }

    pub fn expr(&mut self, exp: Expression) -> NodeId {
        self.push(NodeKind::Expression(exp))
    }

    /// Read of the variable declared at `decl`
    pub fn var(&mut self, decl: NodeId) -> NodeId {
        self.push_derivative(NodeKind::Expression(Expression::Var), decl)
    }

    pub fn num(&mut self, text: impl Into<String>) -> NodeId {
        self.expr(Expression::Literal(Literal::Num(text.into())))
    }

    pub fn str_lit(&mut self, text: impl Into<String>) -> NodeId {
        self.expr(Expression::Literal(Literal::Str(text.into())))
    }

    pub fn bool_lit(&mut self, value: bool) -> NodeId {
        let text = if value { "true" } else { "false" };
        self.expr(Expression::Literal(Literal::Bool(text.to_string())))
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.expr(Expression::Binary { op, left, right })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.expr(Expression::Unary { op, operand })
    }

    pub fn predef_exp(
        &mut self,
        func: PreDefFunc,
        option: Option<FuncOption>,
        args: &[NodeId],
    ) -> NodeId {
        self.expr(Expression::PreDefCall(PreDefCall {
            func,
            option,
            args: args.to_vec(),
        }))
    }

    pub fn predef_stat(
        &mut self,
        func: PreDefFunc,
        option: Option<FuncOption>,
        args: &[NodeId],
    ) -> NodeId {
        self.push_stat(StatKind::PreDefCall(PreDefCall {
            func,
            option,
            args: args.to_vec(),
        }))
    }

    /// Call of the user function at `func_def` used as a value
    pub fn call_exp(&mut self, func_def: NodeId, args: &[NodeId]) -> NodeId {
        let args = self.arg_chain(args);
        self.push_derivative(
            NodeKind::Expression(Expression::FuncCall { args }),
            func_def,
        )
    }

    /// Push a function definition placed on the workspace
    pub fn func_def(
        &mut self,
        name: impl Into<String>,
        params: NodeId,
        body: NodeId,
        returns: Option<VarType>,
    ) -> NodeId {
        let id = self.push(NodeKind::FuncDef(FuncDef {
            name: name.into(),
            params,
            body,
            returns,
        }));
        self.nodes[id.index()].state = NodeState::RootDirectlyUnderWorkspace;
        id
    }

    /// Push an event handler placed on the workspace
    pub fn event(&mut self, trigger: EventTrigger, body: NodeId) -> NodeId {
        let id = self.push(NodeKind::Event(Event { trigger, body }));
        self.nodes[id.index()].state = NodeState::RootDirectlyUnderWorkspace;
        id
    }
}

fn not_chainable(id: NodeId, kind: &NodeKind) -> CompileError {
    CompileError::MalformedGraph(format!("node {id} ({}) cannot be chained", kind.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_stats_links_in_order() {
        let mut graph = Graph::new();
        let a = graph.push_stat(StatKind::Break);
        let b = graph.push_stat(StatKind::Continue);

        let head = graph.chain_stats(&[a, b]).unwrap();
        assert_eq!(head, a);
        assert_eq!(graph.statement(a).unwrap().unwrap().next, b);

        let tail = graph.statement(b).unwrap().unwrap().next;
        assert!(graph.statement(tail).unwrap().is_none());
    }

    #[test]
    fn test_empty_chain_is_a_sentinel() {
        let mut graph = Graph::new();
        let stats = graph.chain_stats(&[]).unwrap();
        let decls = graph.chain_decls(&[]).unwrap();

        assert!(graph.statement(stats).unwrap().is_none());
        assert!(graph.var_decl(decls).unwrap().is_none());
    }

    #[test]
    fn test_chain_rejects_wrong_kind() {
        let mut graph = Graph::new();
        let decl = graph.push_decl(VarType::Var(ElemType::Num), "x");
        let stat = graph.push_stat(StatKind::Break);

        assert!(graph.chain_stats(&[decl, stat]).is_err());
    }

    #[test]
    fn test_arg_chain_order() {
        let mut graph = Graph::new();
        let one = graph.num("1");
        let two = graph.num("2");
        let head = graph.arg_chain(&[one, two]);

        let first = graph.arg(head).unwrap().unwrap().clone();
        let second = graph.arg(first.next).unwrap().unwrap().clone();
        assert_eq!(first.value, one);
        assert_eq!(second.value, two);
        assert!(graph.arg(second.next).unwrap().is_none());
    }

    #[test]
    fn test_var_is_derivative() {
        let mut graph = Graph::new();
        let decl = graph.push_decl(VarType::Var(ElemType::Str), "name");
        let read = graph.var(decl);

        assert_eq!(graph.node(read).unwrap().original, Some(decl));
    }
}
