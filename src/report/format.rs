//! Formatted terminal output for the `qref` subcommands.
//!
//! We keep formatting code in one place so:
//! - the refinement code stays clean and testable
//! - output changes are localized

use std::path::Path;

use crate::domain::{Domain, Scheme};
use crate::refine::solve::WeightFit;

/// Outcome of refining one scheme file.
#[derive(Debug, Clone)]
pub enum RefineOutcome {
    Improved {
        name: String,
        points: usize,
        before: f64,
        after: f64,
        condition: f64,
        evals: usize,
        written: bool,
    },
    NoImprovement {
        name: String,
        before: f64,
        after: f64,
    },
}

/// Diagnostics of one scheme file as published.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: String,
    pub domain: Domain,
    pub degree: u32,
    pub points: usize,
    /// Residual of the stored weights, if the stored points expand finitely.
    pub stored_residual: Option<f64>,
    /// Moment fit of the stored node placement (weights re-solved).
    pub fit: WeightFit,
}

/// Format the result of `qref refine` for one file.
pub fn format_refine_outcome(path: &Path, outcome: &RefineOutcome) -> String {
    let mut out = String::new();
    match outcome {
        RefineOutcome::Improved {
            name,
            points,
            before,
            after,
            condition,
            evals,
            written,
        } => {
            out.push_str(&format!("{}: {} ({} points)\n", path.display(), name, points));
            out.push_str(&format!("  residual: {before:.6e} -> {after:.6e}\n"));
            out.push_str(&format!(
                "  condition: {condition:.3e} | evaluations: {evals}\n"
            ));
            if *written {
                out.push_str("  updated in place\n");
            } else {
                out.push_str("  dry run, file left untouched\n");
            }
        }
        RefineOutcome::NoImprovement {
            name,
            before,
            after,
        } => {
            out.push_str(&format!("{}: {}\n", path.display(), name));
            out.push_str(&format!(
                "  no improvement ({after:.6e} vs {before:.6e}); file left untouched\n"
            ));
        }
    }
    out
}

/// Format the result of `qref check` for one file.
pub fn format_check_outcome(path: &Path, outcome: &CheckOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}: {} | {} | degree {} | {} points\n",
        path.display(),
        outcome.name,
        outcome.domain.display_name(),
        outcome.degree,
        outcome.points,
    ));
    match outcome.stored_residual {
        Some(residual) => out.push_str(&format!("  stored weights residual: {residual:.6e}\n")),
        None => out.push_str("  stored parameters expand to non-finite points\n"),
    }
    match &outcome.fit {
        WeightFit::Solved {
            fitness, condition, ..
        } => {
            out.push_str(&format!(
                "  moment fit residual: {fitness:.6e} | condition: {condition:.3e}\n"
            ));
        }
        WeightFit::Degenerate => {
            out.push_str("  moment fit: degenerate placement (rank-deficient)\n");
        }
    }
    out
}

/// Format the result of `qref perturb`.
pub fn format_perturb(scheme: &Scheme, output: &Path, rel: f64, seed: u64) -> String {
    format!(
        "{}: jittered {} free parameter(s) by ~{:.1}% (seed {seed}) -> {}\n",
        scheme.name,
        scheme.orbits.iter().map(|o| o.kind.arity() * o.tuples()).sum::<usize>(),
        rel * 100.0,
        output.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn improved_outcome_mentions_both_residuals() {
        let outcome = RefineOutcome::Improved {
            name: "tyler_2".to_string(),
            points: 9,
            before: 1.25e-3,
            after: 3.5e-15,
            condition: 8.1,
            evals: 420,
            written: true,
        };
        let text = format_refine_outcome(&PathBuf::from("tyler_2.json"), &outcome);
        assert!(text.contains("1.250000e-3"));
        assert!(text.contains("3.500000e-15"));
        assert!(text.contains("updated in place"));
    }

    #[test]
    fn no_improvement_outcome_says_untouched() {
        let outcome = RefineOutcome::NoImprovement {
            name: "tyler_2".to_string(),
            before: 1e-15,
            after: 1e-15,
        };
        let text = format_refine_outcome(&PathBuf::from("tyler_2.json"), &outcome);
        assert!(text.contains("no improvement"));
        assert!(text.contains("untouched"));
    }
}
