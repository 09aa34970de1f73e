use anyhow::Context;
use cms_rust::shell::Shell;
use cms_rust::tokens;
use cms_rust::{CountMinSketch, SketchConfig};
use std::fs::File;
use std::hash::BuildHasher;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::info;

/// Builds a sketch, optionally preloads it from `load`, then hands it to an
/// interactive shell on stdin/stdout.
pub fn run<S: BuildHasher + Default>(config: &SketchConfig, load: Option<&Path>) -> anyhow::Result<()> {
    let mut sketch: CountMinSketch<S> = CountMinSketch::with_config(config)?;
    info!(width = config.width, depth = config.depth, "sketch ready");

    if let Some(path) = load {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let start = std::time::Instant::now();
        let added = tokens::load_into(&mut sketch, BufReader::new(file))
            .with_context(|| format!("failed loading {}", path.display()))?;
        info!(
            items = added,
            path = %path.display(),
            elapsed = ?start.elapsed(),
            "loaded items"
        );
    }

    let stdin = io::stdin();
    let shell = Shell::new(sketch, stdin.lock(), io::stdout().lock());
    let sketch = shell.run()?;

    info!(total = sketch.total_count(), "session finished");
    Ok(())
}
