//! Scoring a guess against the secret.

use std::collections::HashMap;

use pixelwars_protocol::LetterFeedback;

/// Scores `guess` against `secret`, one label per position.
///
/// Two passes:
/// 1. Exact matches are `Correct` and consume that secret letter.
/// 2. Left to right, a remaining letter is `Misplaced` while unconsumed
///    copies of it are left in the secret, `Incorrect` otherwise.
///
/// A letter is therefore never marked more times than it occurs in the
/// secret, and `Correct` matches take priority. Both slices must have the
/// same length.
pub fn score_guess(
    secret: &[char],
    guess: &[char],
) -> Vec<LetterFeedback> {
    debug_assert_eq!(secret.len(), guess.len());

    let mut feedback = vec![LetterFeedback::Incorrect; guess.len()];
    // Secret letters not matched exactly, with their multiplicity.
    let mut unmatched: HashMap<char, usize> = HashMap::new();

    for (i, (g, s)) in guess.iter().zip(secret).enumerate() {
        if g == s {
            feedback[i] = LetterFeedback::Correct;
        } else {
            *unmatched.entry(*s).or_insert(0) += 1;
        }
    }

    for (i, g) in guess.iter().enumerate() {
        if feedback[i] == LetterFeedback::Correct {
            continue;
        }
        if let Some(count) = unmatched.get_mut(g) {
            if *count > 0 {
                feedback[i] = LetterFeedback::Misplaced;
                *count -= 1;
            }
        }
    }

    feedback
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterFeedback::{Correct as C, Incorrect as I, Misplaced as M};

    fn score(secret: &str, guess: &str) -> Vec<LetterFeedback> {
        let s: Vec<char> = secret.chars().collect();
        let g: Vec<char> = guess.chars().collect();
        score_guess(&s, &g)
    }

    #[test]
    fn test_score_exact_match_all_correct() {
        assert_eq!(score("CRANE", "CRANE"), vec![C, C, C, C, C]);
    }

    #[test]
    fn test_score_no_common_letters_all_incorrect() {
        assert_eq!(score("ABCD", "WXYZ"), vec![I, I, I, I]);
    }

    #[test]
    fn test_score_repeated_letters_already_matched_are_incorrect() {
        // Each of A and B occurs once and is used up by its exact match.
        assert_eq!(score("ABCD", "ABAB"), vec![C, C, I, I]);
    }

    #[test]
    fn test_score_duplicate_guess_letter_marked_once() {
        // One E left after exact matches: first spare E is misplaced,
        // the second is not.
        assert_eq!(score("ABIDE", "SPEED"), vec![I, I, M, I, M]);
    }

    #[test]
    fn test_score_correct_takes_priority_over_earlier_misplaced() {
        // The only L is matched exactly at position 3, so the L at
        // positions 0 and 2 get nothing even though they come first.
        assert_eq!(score("WORLD", "LOLLY"), vec![I, C, I, C, I]);
    }

    #[test]
    fn test_score_swapped_letters_are_misplaced() {
        assert_eq!(score("AB", "BA"), vec![M, M]);
    }

    #[test]
    fn test_score_accented_letters_compare_as_chars() {
        assert_eq!(score("ÉCOLE", "ÉLOCE"), vec![C, M, C, M, C]);
    }
}
