// src/compiler/expression.rs
//! Expression generation
//!
//! Every generator emits the statements an expression needs and returns the
//! JavaScript text that denotes its value: a temporary, a variable name or a
//! literal.

use super::common::{assemble_call, CodeGenerator};
use super::symbols::{self, ident, js};
use crate::graph::{BinaryOp, Expression, Literal, NodeId, PreDefCall, UnaryOp};
use crate::CompileError;

impl CodeGenerator<'_> {
    pub fn gen_expression(&mut self, id: NodeId, depth: usize) -> Result<String, CompileError> {
        let graph = self.graph;
        match graph.expression(id)? {
            Expression::Binary { op, left, right } => {
                self.gen_binary_exp(id, *op, *left, *right, depth)
            }
            Expression::Unary { op, operand } => self.gen_unary_exp(id, *op, *operand, depth),
            Expression::Var => self.gen_var_read(id),
            Expression::Literal(literal) => self.gen_literal(id, literal, depth),
            Expression::PreDefCall(call) => {
                if !symbols::predef_returns_value(call.func) {
                    return Err(CompileError::MalformedGraph(format!(
                        "{:?} at node {id} has no value",
                        call.func
                    )));
                }
                let tmp = self.var_name(id)?;
                self.gen_predef_call(id, call, depth, Some(&tmp))?;
                Ok(tmp)
            }
            Expression::FuncCall { args } => {
                let tmp = self.var_name(id)?;
                self.gen_func_call(id, *args, depth, Some(&tmp))?;
                Ok(tmp)
            }
        }
    }

    fn gen_binary_exp(
        &mut self,
        id: NodeId,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
        depth: usize,
    ) -> Result<String, CompileError> {
        let left_code = self.gen_expression(left, depth)?;
        let right_code = self.gen_expression(right, depth)?;
        let tmp = self.var_name(id)?;
        let value = format!("{left_code}{}{right_code}", symbols::binary_operator(op));
        self.emit_let(depth, &tmp, &value);

        if self.option.handle_exception && symbols::is_arith_exception(op) {
            let finite = assemble_call(ident::IS_FINITE, &[&tmp]);
            self.emit_line(depth, &format!("{}(!{finite})", js::IF));
            self.emit_line(depth + 1, &format!("{tmp} = {left_code};"));
        }
        Ok(tmp)
    }

    fn gen_unary_exp(
        &mut self,
        id: NodeId,
        op: UnaryOp,
        operand: NodeId,
        depth: usize,
    ) -> Result<String, CompileError> {
        let operand_code = self.gen_expression(operand, depth)?;
        let tmp = self.var_name(id)?;
        let sep = if operand_code.starts_with('-') { " " } else { "" };
        let value = format!("{}{sep}{operand_code}", symbols::unary_operator(op));
        self.emit_let(depth, &tmp, &value);
        Ok(tmp)
    }

    /// Name of the declaration a variable read refers to
    pub(super) fn gen_var_read(&self, id: NodeId) -> Result<String, CompileError> {
        let original = self.ids.resolve(id);
        if self.graph.var_decl(original)?.is_none() {
            return Err(CompileError::MalformedGraph(format!(
                "variable at node {id} has no declaration"
            )));
        }
        self.var_name(id)
    }

    fn gen_literal(
        &mut self,
        id: NodeId,
        literal: &Literal,
        depth: usize,
    ) -> Result<String, CompileError> {
        match literal {
            Literal::Num(text) => num_literal(id, text),
            Literal::Str(text) => Ok(str_literal(text)),
            Literal::Bool(text) => symbols::bool_literal(text)
                .map(str::to_string)
                .ok_or_else(|| {
                    CompileError::MalformedGraph(format!(
                        "unknown boolean text '{text}' at node {id}"
                    ))
                }),
            Literal::LineFeed => Ok("'\\n'".to_string()),
            Literal::EmptyList(_) => Ok("[]".to_string()),
            Literal::NilSound => Ok(ident::NIL_SOUND.to_string()),
            Literal::FreqSound {
                frequency,
                duration,
            } => {
                let frequency = self.gen_expression(*frequency, depth)?;
                let duration = self.gen_expression(*duration, depth)?;
                let tmp = self.var_name(id)?;
                let sound = assemble_call(ident::CREATE_SOUND, &[frequency, duration]);
                self.emit_let(depth, &tmp, &sound);
                Ok(tmp)
            }
        }
    }

    /// Emit a runtime library call, storing its result in `ret` if given
    pub(super) fn gen_predef_call(
        &mut self,
        id: NodeId,
        call: &PreDefCall,
        depth: usize,
        ret: Option<&str>,
    ) -> Result<(), CompileError> {
        let name = symbols::predef_func_name(call.func, call.option).ok_or_else(|| {
            CompileError::MalformedGraph(format!(
                "no runtime function for {:?} with option {:?} at node {id}",
                call.func, call.option
            ))
        })?;
        let arity = symbols::predef_arity(call.func);
        if call.args.len() != arity {
            return Err(CompileError::MalformedGraph(format!(
                "{:?} at node {id} takes {arity} argument(s) but has {}",
                call.func,
                call.args.len()
            )));
        }

        let mut args = Vec::with_capacity(arity);
        for &arg in &call.args {
            args.push(self.gen_expression(arg, depth)?);
        }
        let call_code = assemble_call(name, &args);

        self.emit_call_stack_push(depth, id)?;
        match ret {
            Some(tmp) => self.emit_let(depth, tmp, &call_code),
            None => self.emit_line(depth, &format!("{call_code};")),
        }
        self.emit_call_stack_pop(depth);

        if let (Some(tmp), Some(substitute)) = (ret, symbols::undefined_substitute(call.func)) {
            self.emit_line(depth, &format!("{}({tmp} === {})", js::IF, js::UNDEFINED));
            self.emit_line(depth + 1, &format!("{tmp} = {substitute};"));
        }
        Ok(())
    }

    /// Emit a call of a user-defined function, storing its result in `ret` if given
    pub(super) fn gen_func_call(
        &mut self,
        id: NodeId,
        args_head: NodeId,
        depth: usize,
        ret: Option<&str>,
    ) -> Result<(), CompileError> {
        let graph = self.graph;
        let def = graph.func_def_at(self.ids.resolve(id))?;
        if ret.is_some() && def.returns.is_none() {
            return Err(CompileError::MalformedGraph(format!(
                "function '{}' called at node {id} returns no value",
                def.name
            )));
        }

        let mut args = Vec::new();
        let mut current = args_head;
        while let Some(arg) = graph.arg(current)? {
            args.push(self.gen_expression(arg.value, depth)?);
            current = arg.next;
        }
        let call_code = assemble_call(&self.func_name(id)?, &args);

        self.emit_call_stack_push(depth, id)?;
        match ret {
            Some(tmp) => self.emit_let(depth, tmp, &call_code),
            None => self.emit_line(depth, &format!("{call_code};")),
        }
        self.emit_call_stack_pop(depth);
        Ok(())
    }
}

pub(super) fn num_literal(id: NodeId, text: &str) -> Result<String, CompileError> {
    let text = text.trim();
    match text.parse::<f64>() {
        // Canonical form, so `0010` never reads as a legacy octal literal
        Ok(value) if value.is_finite() => Ok(value.to_string()),
        _ => Err(CompileError::MalformedGraph(format!(
            "'{text}' at node {id} is not a number"
        ))),
    }
}

/// Single-quoted JavaScript string literal
pub fn str_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
