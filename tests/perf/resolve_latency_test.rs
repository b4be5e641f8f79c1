use std::time::Instant;

use crate::model::{CommandSource, PluginCommand};
use crate::plugin_registry::PluginRegistry;
use crate::query::QueryMode;
use crate::resolver::resolve;

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn warm_resolve_p95_under_5ms() {
    let mut commands: Vec<PluginCommand> = (0..5_000)
        .map(|i| {
            PluginCommand::new(
                &format!("Plugin Command {i:05}"),
                &format!("cmd{i:05}"),
                "synthetic descriptor",
                CommandSource::Plugin,
            )
        })
        .collect();
    commands.push(PluginCommand::new(
        "Search on Wikipedia",
        "wiki",
        "Open a Wikipedia article",
        CommandSource::Plugin,
    ));
    let registry = PluginRegistry::from_commands(commands);
    let mode = QueryMode::CommandPrefix("wiki".to_string());

    for _ in 0..30 {
        let _ = resolve(&mode, &registry);
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(80);
        for _ in 0..80 {
            let start = Instant::now();
            let _ = resolve(&mode, &registry);
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    assert!(
        median_p95 <= 5.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 5.0ms); batches={batch_p95:?}",
    );
}
