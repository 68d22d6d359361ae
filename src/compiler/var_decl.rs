// src/compiler/var_decl.rs
//! Variable declarations and parameter lists

use super::common::{comment, CodeGenerator};
use super::symbols::{self, js};
use crate::graph::{NodeId, NodeKind};
use crate::CompileError;
use ahash::{HashSet, HashSetExt};
use tracing::warn;

impl CodeGenerator<'_> {
    /// `let <name> = <default>;` for every declaration of the chain at `head`
    pub fn gen_var_decls(&mut self, head: NodeId, depth: usize) -> Result<(), CompileError> {
        let graph = self.graph;
        let mut current = head;
        while let Some(decl) = graph.var_decl(current)? {
            self.gen_var_decl(current, depth)?;
            current = decl.next;
        }
        Ok(())
    }

    /// Declarations of every declaration chain among `roots`, each node once
    pub fn gen_global_var_decls(
        &mut self,
        roots: &[NodeId],
        depth: usize,
    ) -> Result<(), CompileError> {
        let graph = self.graph;
        let mut declared = HashSet::new();
        for &root in roots {
            if !matches!(graph.node(root)?.kind, NodeKind::VarDecl(_)) {
                continue;
            }
            let mut current = root;
            while let Some(decl) = graph.var_decl(current)? {
                if declared.insert(current) {
                    self.gen_var_decl(current, depth)?;
                } else {
                    warn!(node = %current, name = %decl.name, "variable declared twice, skipping");
                }
                current = decl.next;
            }
        }
        Ok(())
    }

    fn gen_var_decl(&mut self, id: NodeId, depth: usize) -> Result<(), CompileError> {
        let graph = self.graph;
        let Some(decl) = graph.var_decl(id)? else {
            return Ok(());
        };
        let name = self.var_name(id)?;
        let mut line = format!("{}{name} = {};", js::LET, symbols::default_value(decl.ty));
        if self.option.with_comments {
            line.push(' ');
            line.push_str(&comment(&decl.name));
        }
        self.emit_line(depth, &line);
        Ok(())
    }

    /// Comma-separated parameter names of the chain at `head`
    pub fn gen_param_list(&self, head: NodeId) -> Result<String, CompileError> {
        let mut params = Vec::new();
        let mut current = head;
        while let Some(decl) = self.graph.var_decl(current)? {
            let mut param = self.var_name(current)?;
            if self.option.with_comments {
                param.push(' ');
                param.push_str(&comment(&decl.name));
            }
            params.push(param);
            current = decl.next;
        }
        Ok(params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::identity::SymbolIds;
    use crate::graph::{ElemType, Graph, VarType};
    use crate::CompileOption;

    #[test]
    fn test_global_decls_with_comments() {
        let mut graph = Graph::new();
        let count = graph.push_decl(VarType::Var(ElemType::Num), "count");
        let label = graph.push_decl(VarType::Var(ElemType::Str), "label");
        let head = graph.chain_decls(&[count, label]).unwrap();
        let run = graph.void_stat();

        let ids = SymbolIds::assign(&graph, run, &[head]).unwrap();
        let option = CompileOption::default().with_comments(true);
        let mut gen = CodeGenerator::new(&graph, &ids, option);
        gen.gen_global_var_decls(&[head], 1).unwrap();

        let count_name = gen.var_name(count).unwrap();
        let label_name = gen.var_name(label).unwrap();
        assert_eq!(
            gen.finish(),
            format!("\tlet {count_name} = 0; /*count*/\n\tlet {label_name} = ''; /*label*/\n")
        );
    }

    #[test]
    fn test_duplicate_roots_declared_once() {
        let mut graph = Graph::new();
        let flag = graph.push_decl(VarType::Var(ElemType::Bool), "flag");
        let run = graph.void_stat();

        let ids = SymbolIds::assign(&graph, run, &[flag]).unwrap();
        let mut gen = CodeGenerator::new(&graph, &ids, CompileOption::default());
        gen.gen_global_var_decls(&[flag, flag], 0).unwrap();

        assert_eq!(gen.finish().lines().count(), 1);
    }

    #[test]
    fn test_non_declaration_roots_are_ignored() {
        let mut graph = Graph::new();
        let run = graph.void_stat();
        let body = graph.void_stat();
        let params = graph.chain_decls(&[]).unwrap();
        let def = graph.func_def("f", params, body, None);

        let ids = SymbolIds::assign(&graph, run, &[def]).unwrap();
        let mut gen = CodeGenerator::new(&graph, &ids, CompileOption::default());
        gen.gen_global_var_decls(&[def], 0).unwrap();

        assert!(gen.finish().is_empty());
    }

    #[test]
    fn test_param_list() {
        let mut graph = Graph::new();
        let a = graph.push_decl(VarType::Var(ElemType::Num), "a");
        let b = graph.push_decl(VarType::Var(ElemType::Num), "b");
        let params = graph.chain_decls(&[a, b]).unwrap();
        let body = graph.void_stat();
        let def = graph.func_def("add", params, body, None);
        let run = graph.void_stat();

        let ids = SymbolIds::assign(&graph, run, &[def]).unwrap();
        let gen = CodeGenerator::new(&graph, &ids, CompileOption::default());
        let expected = format!(
            "{}, {}",
            gen.var_name(a).unwrap(),
            gen.var_name(b).unwrap()
        );
        assert_eq!(gen.gen_param_list(params).unwrap(), expected);
    }
}
