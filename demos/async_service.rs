// demos/async_service.rs
//! Compiling from async code through `CompileService`
//!
//! Run with: cargo run --example async_service --features tokio

use bunnyhop_compiler::graph::{Graph, NodeState, PreDefFunc};
use bunnyhop_compiler::{CompileOption, CompileService, Compiler, CompilerConfig};

fn hello(text: &str) -> (Graph, bunnyhop_compiler::NodeId) {
    let mut graph = Graph::new();
    let text = graph.str_lit(text);
    let run = graph.predef_stat(PreDefFunc::Print, None, &[text]);
    graph
        .set_state(run, NodeState::RootDirectlyUnderWorkspace)
        .expect("run node exists");
    (graph, run)
}

#[tokio::main]
async fn main() {
    println!("=== BunnyHop Compiler - Async Service ===\n");

    let output_dir = std::env::temp_dir().join("bunnyhop-async-demo");
    let compiler = Compiler::new(CompilerConfig::new(&output_dir)).expect("built-in runtime");
    let service = CompileService::new(compiler);

    let mut handles = Vec::new();
    for i in 0..3 {
        let service = service.clone();
        let (graph, run) = hello(&format!("request {i}"));
        handles.push(tokio::spawn(async move {
            let result = service
                .compile(graph, run, Vec::new(), CompileOption::default())
                .await;
            (i, result)
        }));
    }

    for handle in handles {
        match handle.await {
            Ok((i, Ok(path))) => println!("  request {i}: wrote {}", path.display()),
            Ok((i, Err(e))) => println!("  request {i}: failed: {e}"),
            Err(e) => println!("  task panicked: {e}"),
        }
    }
}
