use std::panic;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::backends::node::NodeBackend;
use crate::core::domain::Language;
use crate::core::engine::GradingEngine;
use crate::core::registry::BackendRegistry;
use crate::editor::CodeEditor;
use crate::report::{Category, render_submit};

mod backends;
mod constants;
mod core;
mod editor;
mod problems;
mod report;
mod stubs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    set_panic_hook();

    let node_path = std::env::var("NODE_BIN").unwrap_or_else(|_| "node".to_string());
    let work_dir = std::env::temp_dir().join("prisma-judge");

    let mut registry = BackendRegistry::new();
    registry.register(
        Language::Javascript,
        Arc::new(NodeBackend::new(&work_dir, &node_path)),
    );
    let engine = GradingEngine::new(
        registry,
        Duration::from_millis(constants::DEFAULT_BUDGET_MS),
    );

    let problem = problems::two_sum();
    let mut editor = CodeEditor::new(problem.clone(), Language::Javascript);
    if let Some(path) = std::env::args().nth(1) {
        editor.set_value(tokio::fs::read_to_string(&path).await?);
    }

    tracing::info!("Grading submission for problem {:?}", problem.id);
    let report = engine.run_all(&editor.submission(), &problem.suite).await;

    for line in render_submit(&report) {
        match line.category {
            Category::Error => eprintln!("{}", line.text),
            _ => println!("{}", line.text),
        }
    }

    Ok(())
}

fn set_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        tracing::error!(
            message = "panic occurred",
            panic = %panic_info
        );
    }));
}
