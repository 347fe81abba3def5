//! Plain-text tables for the terminal.

use std::io::{self, Write};

use perftest_analysis::{History, KernelComparison};
use perftest_core::{RunResult, SeriesKey};

fn number(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.6}")
    }
}

pub fn write_run(out: &mut dyn Write, result: &RunResult) -> io::Result<()> {
    writeln!(out, "{} ({} {})", result.config, result.runtime.name, result.runtime.version)?;
    writeln!(out, "{:<36} {:>12} {:>12}", "kernel", "mean [s]", "stdev [s]")?;
    for kernel in &result.kernels {
        writeln!(
            out,
            "{:<36} {:>12} {:>12}",
            kernel.kernel,
            number(kernel.mean),
            number(kernel.stdev)
        )?;
    }
    Ok(())
}

pub fn write_comparison(out: &mut dyn Write, comparisons: &[&KernelComparison]) -> io::Result<()> {
    writeln!(
        out,
        "{:<36} {:<8} {:<9} {:>12} {:>12} {:>8} {:>22} {:>4}",
        "kernel", "backend", "precision", "before [s]", "after [s]", "speedup", "interval", "tag"
    )?;
    for c in comparisons {
        let interval = format!("[{:+.4}, {:+.4}]", c.interval.lower(), c.interval.upper());
        writeln!(
            out,
            "{:<36} {:<8} {:<9} {:>12} {:>12} {:>8.3} {:>22} {:>4}",
            c.key.kernel,
            c.key.backend.as_str(),
            c.key.precision.as_str(),
            number(c.before_median),
            number(c.after_median),
            c.speedup(),
            interval,
            c.classification.as_str()
        )?;
    }
    Ok(())
}

/// One block per configuration: time, then 5/50/95 percentiles.
pub fn write_history(out: &mut dyn Write, history: &History<SeriesKey>) -> io::Result<()> {
    for (key, series) in &history.series {
        writeln!(out, "{key}")?;
        for (i, timestamp) in history.timestamps.iter().enumerate() {
            let Some(p) = series.get(i) else { continue };
            writeln!(
                out,
                "  {}  {:>12} {:>12} {:>12}",
                timestamp.format("%Y-%m-%d %H:%M:%S"),
                number(p.lower),
                number(p.median),
                number(p.upper)
            )?;
        }
    }
    Ok(())
}
