use std::path::PathBuf;

use crate::score_log::{self, ScoreEntry};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// Score log to read
    #[clap(long, default_value = "results.txt")]
    score_log: PathBuf,
    /// Number of results to show
    #[clap(long, default_value_t = 10)]
    top: usize,
}

pub(crate) fn run(arg: &ScoresArg) -> anyhow::Result<()> {
    let ScoresArg { score_log, top } = arg;

    let entries = score_log::read(score_log)?;
    if entries.is_empty() {
        println!("No games recorded in {}", score_log.display());
        return Ok(());
    }

    for (rank, entry) in best(entries, *top).iter().enumerate() {
        println!(
            "{:>3}. {:>8}  {}",
            rank + 1,
            entry.score,
            entry.recorded_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

/// Highest scores first; ties keep the older game first.
fn best(mut entries: Vec<ScoreEntry>, top: usize) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.recorded_at.cmp(&b.recorded_at))
    });
    entries.truncate(top);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_sorts_and_truncates() {
        let entries = score_log::parse_log(
            "2025-01-01 10:00:00  ---  300\n\
             2025-01-02 10:00:00  ---  1200\n\
             2025-01-03 10:00:00  ---  300\n\
             2025-01-04 10:00:00  ---  0\n",
        )
        .unwrap();
        let best = best(entries, 3);
        let scores: Vec<_> = best.iter().map(|e| e.score).collect();
        assert_eq!(scores, [1200, 300, 300]);
        assert_eq!(best[1].recorded_at.to_string(), "2025-01-01 10:00:00");
    }
}
