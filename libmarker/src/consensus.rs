//! Pure helpers for multi-sample evaluation.
//!
//! Batch evaluators sample a model several times per question. Pass@k asks
//! whether any sample grades correct; self-consistency majority-votes among
//! the extracted answers and grades only the winner. Both reduce to pure
//! functions over strings, so they live here; everything around them
//! (sampling, checkpointing, reporting) stays outside the core.

use crate::grade::grade_answer;

/// Returns the most frequent answer, breaking ties by first appearance.
///
/// An empty iterator yields `None`.
pub fn majority_vote<'a, I>(answers: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for answer in answers {
        match counts.iter_mut().find(|(seen, _)| *seen == answer) {
            Some((_, count)) => *count += 1,
            None => counts.push((answer, 1)),
        }
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (answer, count)| {
            match best {
                // A later answer must strictly beat the incumbent, so ties
                // go to the earliest-seen answer.
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((answer, count)),
            }
        })
        .map(|(answer, _)| answer.to_string())
}

/// Whether any candidate grades as equivalent to `ground_truth`.
///
/// Short-circuits at the first correct candidate; this is the pass@k inner
/// loop.
pub fn any_correct<'a, I>(candidates: I, ground_truth: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .any(|candidate| grade_answer(Some(candidate), ground_truth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn votes_for_most_frequent() {
        assert_eq!(
            majority_vote(vec!["5", "4", "5"]),
            Some("5".to_string())
        );
    }

    #[test]
    fn breaks_ties_by_first_appearance() {
        assert_eq!(
            majority_vote(vec!["4", "5", "5", "4"]),
            Some("4".to_string())
        );
    }

    #[test]
    fn empty_vote_is_none() {
        assert_eq!(majority_vote(Vec::<&str>::new()), None);
    }

    #[test]
    fn any_correct_across_samples() {
        assert!(any_correct(vec!["3", "1/2"], "0.5"));
        assert!(!any_correct(vec!["3", "4"], "5"));
        assert!(!any_correct(Vec::<&str>::new(), "5"));
    }
}
