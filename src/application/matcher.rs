//! # Approximate Command Matching
//!
//! Decides whether an unmatched utterance is a probable mistype of a command
//! name. Lenient on purpose: it should rather suggest too much than stay silent.
//!
//! Two measures are combined:
//! - the number of characters that line up within a ±2 position window
//!   (fewer than three means there is nothing to recognise), and
//! - the optimal-string-alignment distance (edits plus adjacent
//!   transpositions) between the name and the best-fitting prefix of the
//!   utterance, which must fit a budget that grows with the name length.
//!   Trailing characters past the name (`helpme`, `help me`) cost nothing.

/// Longest tolerated surplus of the utterance over the command name.
const MAX_EXTRA_CHARS: usize = 4;
/// Longest tolerated shortfall of the utterance against the command name.
const MAX_MISSING_CHARS: usize = 3;
/// How far apart two characters may sit and still count as aligned.
const ALIGN_WINDOW: usize = 2;
const MIN_ALIGNED: usize = 3;

pub fn is_probable_match(utterance: &str, candidate: &str) -> bool {
    let typed: Vec<char> = utterance.trim().to_lowercase().chars().collect();
    let expected: Vec<char> = candidate.trim().to_lowercase().chars().collect();

    if expected.is_empty() {
        return false;
    }
    if typed == expected {
        return true;
    }
    if typed.len() > expected.len() + MAX_EXTRA_CHARS
        || expected.len() > typed.len() + MAX_MISSING_CHARS
    {
        return false;
    }
    if aligned_chars(&typed, &expected) < MIN_ALIGNED {
        return false;
    }

    prefix_distance(&typed, &expected) <= edit_budget(expected.len())
}

fn edit_budget(len: usize) -> usize {
    ((len + 1) / 3).max(1)
}

/// Longest common subsequence restricted to pairs at most `ALIGN_WINDOW` apart.
fn aligned_chars(a: &[char], b: &[char]) -> usize {
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let skip = dp[i - 1][j].max(dp[i][j - 1]);
            dp[i][j] = if a[i - 1] == b[j - 1] && i.abs_diff(j) <= ALIGN_WINDOW {
                skip.max(dp[i - 1][j - 1] + 1)
            } else {
                skip
            };
        }
    }
    dp[a.len()][b.len()]
}

/// Smallest OSA distance between `expected` and a prefix of `typed` whose
/// length is within `ALIGN_WINDOW` of the name (or all of `typed` when shorter).
fn prefix_distance(typed: &[char], expected: &[char]) -> usize {
    let name: String = expected.iter().collect();
    let hi = (expected.len() + ALIGN_WINDOW).min(typed.len());
    let lo = expected.len().saturating_sub(ALIGN_WINDOW).min(hi);

    (lo..=hi)
        .map(|len| {
            let prefix: String = typed[..len].iter().collect();
            strsim::osa_distance(&prefix, &name)
        })
        .min()
        .unwrap_or(usize::MAX)
}
