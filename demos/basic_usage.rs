// demos/basic_usage.rs
//! Basic usage of the BunnyHop compiler

use bunnyhop_compiler::graph::{
    ArithOp, BinaryOp, CompOp, ElemType, EventTrigger, Graph, NodeState, PreDefFunc, StatKind,
    VarType,
};
use bunnyhop_compiler::{CompileOption, Compiler, CompilerConfig};

fn main() {
    println!("=== BunnyHop Compiler - Basic Usage ===\n");

    let mut graph = Graph::new();

    // Global: count = 0
    let count = graph.push_decl(VarType::Var(ElemType::Num), "count");

    // function greet(name) { print('hello ' + name); }
    let name = graph.push_decl(VarType::Var(ElemType::Str), "name");
    let hello = graph.str_lit("hello ");
    let name_read = graph.var(name);
    let greeting = graph.binary(BinaryOp::AppendStr, hello, name_read);
    let greet_body = graph.predef_stat(PreDefFunc::Print, None, &[greeting]);
    let greet = graph.func_def("greet", name, greet_body, None);

    // On key A: greet('bunny')
    let bunny = graph.str_lit("bunny");
    let on_key = graph.push_call_stat(greet, &[bunny]);
    let event = graph.event(EventTrigger::KeyPressed("A".to_string()), on_key);

    // repeat (3) { count += 1; }
    let three = graph.num("3");
    let target = graph.var(count);
    let one = graph.num("1");
    let step = graph.push_stat(StatKind::AddAssign { target, value: one });
    let repeat = graph.push_stat(StatKind::Repeat {
        count: three,
        body: step,
    });

    // while (count < 10) { count = count * 2; }
    let read = graph.var(count);
    let ten = graph.num("10");
    let cond = graph.binary(BinaryOp::NumComp(CompOp::Lt), read, ten);
    let target = graph.var(count);
    let lhs = graph.var(count);
    let two = graph.num("2");
    let doubled = graph.binary(BinaryOp::Arith(ArithOp::Mul), lhs, two);
    let body = graph.push_stat(StatKind::Assign {
        target,
        value: doubled,
    });
    let while_stat = graph.push_stat(StatKind::While { cond, body });

    let run = graph
        .chain_stats(&[repeat, while_stat])
        .expect("statements chain");
    graph
        .set_state(run, NodeState::RootDirectlyUnderWorkspace)
        .expect("run node exists");

    let option = CompileOption::default().with_comments(true);
    let compiled = [count, greet, event];

    let output_dir = std::env::temp_dir().join("bunnyhop-demo");
    let compiler = Compiler::new(CompilerConfig::new(&output_dir)).expect("built-in runtime");

    match compiler.compile(&graph, run, &compiled, option) {
        Ok(path) => {
            println!("Wrote {}\n", path.display());
            let code = std::fs::read_to_string(&path).expect("read compiled program");
            let start = code.find("\tlet ").unwrap_or(0);
            println!("{}", &code[start..]);
        }
        Err(e) => eprintln!("Compilation failed: {e}"),
    }

    println!("Graph as JSON:\n{}", graph.to_json().expect("graph serializes"));
}
