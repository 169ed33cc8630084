//! Timing and Reporting
//!
//! Runs strategies under a stopwatch and the heap counters, and renders the
//! result tables and the performance comparison as plain text.

use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::extract::{Extraction, MaximaTable};
use crate::memory;
use crate::strategy::Strategy;

const RULE_WIDTH: usize = 40;

/// One timed strategy run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub strategy: Strategy,
    pub extraction: Extraction,
    pub elapsed: Duration,
    /// Heap high-water mark above the starting level; None when not tracked
    pub peak_heap: Option<usize>,
}

impl RunReport {
    pub fn title(&self) -> String {
        format!("GO Term Results by Ontology ({})", self.strategy.label())
    }
}

/// Run `strategy` over `path`, timing it and measuring its peak heap
pub fn run_timed(strategy: Strategy, path: &Path, config: &ExtractConfig) -> Result<RunReport> {
    let start = Instant::now();
    let (extraction, peak_heap) = memory::measure_peak(|| strategy.run(path, config));
    let elapsed = start.elapsed();
    let extraction = extraction?;

    info!(
        %strategy,
        elapsed_ms = elapsed.as_millis() as u64,
        peak_heap,
        live_heap = memory::current(),
        "run finished"
    );
    Ok(RunReport {
        strategy,
        extraction,
        elapsed,
        peak_heap: memory::TRACKING_ENABLED.then_some(peak_heap),
    })
}

/// Print one result block: a title, a rule, and every category's best term
pub fn write_results<W: Write>(out: &mut W, title: &str, table: &MaximaTable) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for (category, best) in table.iter() {
        writeln!(out, "Ontology        : {category}")?;
        writeln!(out, "Term Name       : {}", best.name)?;
        writeln!(out, "Term ID         : {}", best.identifier)?;
        writeln!(out, "Number of is_a  : {}", best.parent_count)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print times, peak heap, and which strategy won
pub fn write_comparison<W: Write>(out: &mut W, runs: &[RunReport]) -> io::Result<()> {
    writeln!(out, "[Performance Comparison]")?;
    for run in runs {
        writeln!(out, "{} Time: {:.3}s", run.strategy.label(), run.elapsed.as_secs_f64())?;
    }
    for run in runs {
        if let Some(bytes) = run.peak_heap {
            writeln!(out, "{} Peak Heap: {}", run.strategy.label(), format_bytes(bytes))?;
        }
    }
    if let [first, second] = runs {
        // Ties go to the second run
        let (fast, slow) = if first.elapsed < second.elapsed {
            (first, second)
        } else {
            (second, first)
        };
        writeln!(
            out,
            "{} is faster than {}",
            fast.strategy.label(),
            slow.strategy.label()
        )?;
    }
    Ok(())
}

/// Whether every run produced the same table
pub fn tables_agree(runs: &[RunReport]) -> bool {
    runs.windows(2)
        .all(|pair| pair[0].extraction.table == pair[1].extraction.table)
}

fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Category, CategoryBest};
    use pretty_assertions::assert_eq;

    fn report(strategy: Strategy, millis: u64, table: MaximaTable) -> RunReport {
        RunReport {
            strategy,
            extraction: Extraction {
                table,
                ..Extraction::default()
            },
            elapsed: Duration::from_millis(millis),
            peak_heap: None,
        }
    }

    #[test]
    fn test_write_results_layout() {
        let mut table = MaximaTable::new();
        table.fold(
            Category::CellularComponent,
            CategoryBest::new("cell wall", "GO:0005618", 7),
        );
        let mut out = Vec::new();
        write_results(&mut out, "GO Term Results by Ontology (SAX)", &table).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\nGO Term Results by Ontology (SAX)\n\
            ----------------------------------------\n\
            Ontology        : biological_process\n\
            Term Name       : \n\
            Term ID         : \n\
            Number of is_a  : 0\n\n\
            Ontology        : molecular_function\n\
            Term Name       : \n\
            Term ID         : \n\
            Number of is_a  : 0\n\n\
            Ontology        : cellular_component\n\
            Term Name       : cell wall\n\
            Term ID         : GO:0005618\n\
            Number of is_a  : 7\n\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_comparison_names_faster() {
        let runs = [
            report(Strategy::Tree, 1500, MaximaTable::new()),
            report(Strategy::Streaming, 250, MaximaTable::new()),
        ];
        let mut out = Vec::new();
        write_comparison(&mut out, &runs).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[Performance Comparison]\nDOM Time: 1.500s\nSAX Time: 0.250s\nSAX is faster than DOM\n"
        );
    }

    #[test]
    fn test_comparison_single_run() {
        let mut run = report(Strategy::Streaming, 12, MaximaTable::new());
        run.peak_heap = Some(3 * 1024 * 1024);
        let mut out = Vec::new();
        write_comparison(&mut out, &[run]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[Performance Comparison]\nSAX Time: 0.012s\nSAX Peak Heap: 3.0 MiB\n"
        );
    }

    #[test]
    fn test_tables_agree() {
        let mut other = MaximaTable::new();
        other.fold(Category::BiologicalProcess, CategoryBest::new("p", "GO:1", 1));
        let same = [
            report(Strategy::Tree, 1, MaximaTable::new()),
            report(Strategy::Streaming, 1, MaximaTable::new()),
        ];
        let different = [
            report(Strategy::Tree, 1, MaximaTable::new()),
            report(Strategy::Streaming, 1, other),
        ];
        assert!(tables_agree(&same));
        assert!(!tables_agree(&different));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
    }
}
