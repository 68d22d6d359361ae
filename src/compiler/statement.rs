// src/compiler/statement.rs
//! Statement generation

use super::common::{assemble_call, CodeGenerator};
use super::symbols::{ident, js};
use crate::graph::{Expression, NodeId, StatKind};
use crate::CompileError;

impl CodeGenerator<'_> {
    /// Emit every statement of the chain starting at `head`
    pub fn gen_statements(&mut self, head: NodeId, depth: usize) -> Result<(), CompileError> {
        let graph = self.graph;
        let mut current = head;
        while let Some(statement) = graph.statement(current)? {
            self.gen_statement(current, &statement.stat, depth)?;
            current = statement.next;
        }
        Ok(())
    }

    fn gen_statement(
        &mut self,
        id: NodeId,
        stat: &StatKind,
        depth: usize,
    ) -> Result<(), CompileError> {
        match stat {
            StatKind::Assign { target, value } => self.gen_assign(*target, *value, "=", depth),
            StatKind::AddAssign { target, value } => self.gen_assign(*target, *value, "+=", depth),
            StatKind::If {
                cond,
                then_stat,
                else_stat,
            } => self.gen_if(*cond, *then_stat, *else_stat, depth),
            StatKind::While { cond, body } => self.gen_while(*cond, *body, depth),
            StatKind::Repeat { count, body } => self.gen_repeat(id, *count, *body, depth),
            StatKind::Compound { locals, body } => {
                self.emit_line(depth, "{");
                self.gen_var_decls(*locals, depth + 1)?;
                self.gen_statements(*body, depth + 1)?;
                self.emit_line(depth, "}");
                Ok(())
            }
            StatKind::Break => {
                self.emit_line(depth, js::BREAK);
                Ok(())
            }
            StatKind::Continue => {
                self.emit_line(depth, js::CONTINUE);
                Ok(())
            }
            StatKind::Return { value } => {
                match value {
                    Some(value) => {
                        let value = self.gen_expression(*value, depth)?;
                        self.emit_line(depth, &format!("{} {value};", js::RETURN));
                    }
                    None => self.emit_line(depth, &format!("{};", js::RETURN)),
                }
                Ok(())
            }
            StatKind::PreDefCall(call) => self.gen_predef_call(id, call, depth, None),
            StatKind::FuncCall { args } => self.gen_func_call(id, *args, depth, None),
        }
    }

    fn gen_assign(
        &mut self,
        target: NodeId,
        value: NodeId,
        op: &str,
        depth: usize,
    ) -> Result<(), CompileError> {
        if !matches!(self.graph.expression(target)?, Expression::Var) {
            return Err(CompileError::MalformedGraph(format!(
                "assignment target at node {target} is not a variable"
            )));
        }
        let name = self.gen_var_read(target)?;
        let value = self.gen_expression(value, depth)?;
        self.emit_line(depth, &format!("{name} {op} {value};"));
        Ok(())
    }

    fn gen_if(
        &mut self,
        cond: NodeId,
        then_stat: NodeId,
        else_stat: Option<NodeId>,
        depth: usize,
    ) -> Result<(), CompileError> {
        let cond = self.gen_expression(cond, depth)?;
        self.emit_line(depth, &format!("{}({cond}) {{", js::IF));
        self.gen_statements(then_stat, depth + 1)?;
        self.emit_line(depth, "}");

        if let Some(else_stat) = else_stat {
            self.emit_line(depth, &format!("{}{{", js::ELSE));
            self.gen_statements(else_stat, depth + 1)?;
            self.emit_line(depth, "}");
        }
        Ok(())
    }

    /// The condition is re-evaluated at the top of every iteration
    fn gen_while(&mut self, cond: NodeId, body: NodeId, depth: usize) -> Result<(), CompileError> {
        self.emit_line(depth, &format!("{}({}) {{", js::WHILE, js::TRUE));
        let cond = self.gen_expression(cond, depth + 1)?;
        self.emit_line(depth + 1, &format!("{}(!{cond}) {{", js::IF));
        self.emit_line(depth + 2, js::BREAK);
        self.emit_line(depth + 1, "}");
        self.gen_statements(body, depth + 1)?;
        self.emit_line(depth, "}");
        Ok(())
    }

    /// The count is evaluated once, before the first iteration
    fn gen_repeat(
        &mut self,
        id: NodeId,
        count: NodeId,
        body: NodeId,
        depth: usize,
    ) -> Result<(), CompileError> {
        // Fractional counts run floor(count) times
        let count = assemble_call(ident::FLOOR, &[self.gen_expression(count, depth)?]);
        let counter = self.var_name(id)?;
        let limit = format!("_{counter}");
        self.emit_line(depth, &format!("{}{limit} = {count};", js::CONST));
        self.emit_line(
            depth,
            &format!(
                "{}({}{counter} = 0; {counter} < {limit}; ++{counter}) {{",
                js::FOR,
                js::LET
            ),
        );
        self.gen_statements(body, depth + 1)?;
        self.emit_line(depth, "}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::identity::SymbolIds;
    use crate::graph::{ElemType, Graph, Literal, VarType};
    use crate::CompileOption;

    fn generate(graph: &Graph, run: NodeId, roots: &[NodeId]) -> String {
        let ids = SymbolIds::assign(graph, run, roots).unwrap();
        let mut gen = CodeGenerator::new(graph, &ids, CompileOption::default());
        gen.gen_statements(run, 0).unwrap();
        gen.finish()
    }

    #[test]
    fn test_if_without_else() {
        let mut graph = Graph::new();
        let cond = graph.bool_lit(true);
        let body = graph.push_stat(StatKind::Break);
        let stat = graph.push_stat(StatKind::If {
            cond,
            then_stat: body,
            else_stat: None,
        });

        let code = generate(&graph, stat, &[]);
        assert_eq!(code, "if (true) {\n\tbreak;\n}\n");
    }

    #[test]
    fn test_if_with_else() {
        let mut graph = Graph::new();
        let cond = graph.bool_lit(false);
        let then_stat = graph.push_stat(StatKind::Break);
        let else_stat = graph.push_stat(StatKind::Continue);
        let stat = graph.push_stat(StatKind::If {
            cond,
            then_stat,
            else_stat: Some(else_stat),
        });

        let code = generate(&graph, stat, &[]);
        assert_eq!(code, "if (false) {\n\tbreak;\n}\nelse {\n\tcontinue;\n}\n");
    }

    #[test]
    fn test_while_reevaluates_condition_inside_loop() {
        let mut graph = Graph::new();
        let decl = graph.push_decl(VarType::Var(ElemType::Num), "i");
        let i = graph.var(decl);
        let ten = graph.num("10");
        let cond = graph.binary(
            crate::graph::BinaryOp::NumComp(crate::graph::CompOp::Lt),
            i,
            ten,
        );
        let target = graph.var(decl);
        let one = graph.num("1");
        let step = graph.push_stat(StatKind::AddAssign { target, value: one });
        let stat = graph.push_stat(StatKind::While { cond, body: step });

        let code = generate(&graph, stat, &[decl]);
        let lines: Vec<&str> = code.lines().collect();
        assert_eq!(lines[0], "while (true) {");
        assert!(lines[1].starts_with("\tlet ") && lines[1].ends_with(" < 10;"));
        assert!(lines[2].starts_with("\tif (!"));
        assert_eq!(lines[3], "\t\tbreak;");
        assert_eq!(lines[4], "\t}");
        assert!(lines[5].ends_with(" += 1;"));
        assert_eq!(lines[6], "}");
    }

    #[test]
    fn test_repeat_hoists_count() {
        let mut graph = Graph::new();
        let five = graph.num("5");
        let body = graph.push_stat(StatKind::Continue);
        let stat = graph.push_stat(StatKind::Repeat { count: five, body });

        let code = generate(&graph, stat, &[]);
        let ids = SymbolIds::assign(&graph, stat, &[]).unwrap();
        let n = ids.serial(stat).unwrap();
        assert_eq!(
            code,
            format!(
                "const __v{n} = Math.floor(5);\nfor (let _v{n} = 0; _v{n} < __v{n}; ++_v{n}) {{\n\tcontinue;\n}}\n"
            )
        );
    }

    #[test]
    fn test_repeat_floors_fractional_count() {
        let mut graph = Graph::new();
        let count = graph.num("2.5");
        let body = graph.push_stat(StatKind::Continue);
        let stat = graph.push_stat(StatKind::Repeat { count, body });

        let code = generate(&graph, stat, &[]);
        let n = SymbolIds::assign(&graph, stat, &[])
            .unwrap()
            .serial(stat)
            .unwrap();
        assert!(code.starts_with(&format!("const __v{n} = Math.floor(2.5);\n")));
    }

    #[test]
    fn test_compound_declares_locals() {
        let mut graph = Graph::new();
        let local = graph.push_decl(VarType::List(ElemType::Str), "names");
        let body = graph.void_stat();
        let stat = graph.push_stat(StatKind::Compound {
            locals: local,
            body,
        });

        let code = generate(&graph, stat, &[]);
        let lines: Vec<&str> = code.lines().collect();
        assert_eq!(lines[0], "{");
        assert!(lines[1].starts_with("\tlet _v") && lines[1].ends_with(" = [];"));
        assert_eq!(lines[2], "}");
    }

    #[test]
    fn test_assign_to_literal_is_rejected() {
        let mut graph = Graph::new();
        let target = graph.expr(Expression::Literal(Literal::LineFeed));
        let value = graph.num("1");
        let stat = graph.push_stat(StatKind::Assign { target, value });
        let ids = SymbolIds::assign(&graph, stat, &[]).unwrap();
        let mut gen = CodeGenerator::new(&graph, &ids, CompileOption::default());

        assert!(gen.gen_statements(stat, 0).is_err());
    }

    #[test]
    fn test_bare_return() {
        let mut graph = Graph::new();
        let stat = graph.push_stat(StatKind::Return { value: None });

        assert_eq!(generate(&graph, stat, &[]), "return;\n");
    }
}
