// src/compiler/func_def.rs
//! User-defined function definitions

use super::common::{comment, CodeGenerator};
use super::symbols::js;
use crate::graph::{NodeId, NodeKind};
use crate::CompileError;
use tracing::debug;

impl CodeGenerator<'_> {
    /// Emit a definition for every function among `roots`
    pub fn gen_func_defs(&mut self, roots: &[NodeId], depth: usize) -> Result<(), CompileError> {
        let graph = self.graph;
        for &root in roots {
            if let NodeKind::FuncDef(def) = &graph.node(root)?.kind {
                let name = self.func_name(root)?;
                debug!(function = %def.name, js_name = %name, "generating function");

                let params = self.gen_param_list(def.params)?;
                let mut header = format!("{}{name}({params}) {{", js::FUNCTION);
                if self.option.with_comments {
                    header.push(' ');
                    header.push_str(&comment(&def.name));
                }
                self.emit_line(depth, &header);
                self.gen_statements(def.body, depth + 1)?;
                self.emit_line(depth, "}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::identity::SymbolIds;
    use crate::graph::{ElemType, Graph, StatKind, VarType};
    use crate::CompileOption;

    #[test]
    fn test_function_with_return_value() {
        let mut graph = Graph::new();
        let x = graph.push_decl(VarType::Var(ElemType::Num), "x");
        let read = graph.var(x);
        let ret = graph.push_stat(StatKind::Return { value: Some(read) });
        let def = graph.func_def("identity", x, ret, Some(VarType::Var(ElemType::Num)));
        let run = graph.void_stat();

        let ids = SymbolIds::assign(&graph, run, &[def]).unwrap();
        let option = CompileOption::default().with_comments(true);
        let mut gen = CodeGenerator::new(&graph, &ids, option);
        gen.gen_func_defs(&[def], 0).unwrap();

        let f = gen.func_name(def).unwrap();
        let p = gen.var_name(x).unwrap();
        assert_eq!(
            gen.finish(),
            format!("function {f}({p} /*x*/) {{ /*identity*/\n\treturn {p};\n}}\n")
        );
    }
}
