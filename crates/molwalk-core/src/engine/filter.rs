use crate::core::models::ids::Identifier;
use crate::core::perception::{Candidate, family_name};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Whether a candidate may coexist with the given atom sets.
///
/// A candidate may overlap each set in at most one atom, except that a
/// single-atom candidate may not overlap anything at all.
fn is_admissible<'a>(
    candidate: &Candidate,
    established: impl IntoIterator<Item = &'a BTreeSet<Identifier>>,
) -> bool {
    let single = candidate.atoms.len() == 1;
    established.into_iter().all(|atoms| {
        let overlap = candidate.atoms.intersection(atoms).count();
        if single { overlap == 0 } else { overlap <= 1 }
    })
}

fn priority(a: (&str, &Candidate), b: (&str, &Candidate)) -> Ordering {
    let (family_a, family_b) = (family_name(a.0), family_name(b.0));
    b.1.atoms
        .len()
        .cmp(&a.1.atoms.len())
        .then_with(|| {
            family_a
                .split_whitespace()
                .count()
                .cmp(&family_b.split_whitespace().count())
        })
        .then_with(|| family_a.len().cmp(&family_b.len()))
        .then_with(|| a.0.cmp(b.0))
}

/// Reduces raw, possibly overlapping functional-group matches to a
/// non-overlapping subset.
///
/// Candidates admissible against the `existing` units are ranked larger
/// first, then by fewer words and a shorter family name. They are accepted in
/// that order as long as they stay admissible against the candidates accepted
/// before them.
pub fn filter_functional_groups(
    existing: &[BTreeSet<Identifier>],
    candidates: &BTreeMap<String, Candidate>,
) -> Vec<(String, Candidate)> {
    let mut working: Vec<(&str, &Candidate)> = candidates
        .iter()
        .filter(|(_, candidate)| is_admissible(candidate, existing))
        .map(|(name, candidate)| (name.as_str(), candidate))
        .collect();
    working.sort_by(|a, b| priority(*a, *b));

    let mut kept: Vec<(String, Candidate)> = Vec::new();
    for (name, candidate) in working {
        if is_admissible(candidate, kept.iter().map(|(_, c)| &c.atoms)) {
            kept.push((name.to_string(), candidate.clone()));
        } else {
            debug!("Functional group candidate '{}' overlaps a larger group.", name);
        }
    }
    debug!(
        "Kept {} of {} functional group candidate(s).",
        kept.len(),
        candidates.len()
    );
    kept
}
