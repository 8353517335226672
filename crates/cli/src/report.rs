use levelcrawl_crawler::Traversal;
use std::fmt::Write;

/// Human-readable report: every node of every level, a per-level count, then the crawl time.
pub fn render_text(traversal: &Traversal) -> String {
    let mut out = String::new();
    for level in &traversal.levels {
        for node in level {
            let _ = writeln!(out, "- {node}");
        }
        let _ = writeln!(out, "{} nodes at this level", level.len());
    }
    let failures = traversal.total_failures();
    if failures > 0 {
        let _ = writeln!(out, "{failures} lookups failed (treated as no neighbors)");
    }
    let _ = writeln!(out, "Time to crawl: {:.3}s", traversal.elapsed.as_secs_f64());
    out
}
