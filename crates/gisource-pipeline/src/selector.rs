//! Weighted-random row selection.
//!
//! The policy balances three buckets: an "urgent" posting (deadline cell is
//! the literal "Soon"), the posting with the nearest future deadline, and a
//! uniformly random future-dated posting. Urgent postings dominate with
//! weight 0.8; the other two split the remainder 0.1/0.1. When there is no
//! urgent posting the remaining pair is reweighted to the literal 0.9/0.1
//! split. Empty buckets are omitted and the weights renormalized.
//!
//! The RNG is a parameter so tests can drive a seeded generator.

use chrono::NaiveDate;
use gisource_core::types::{Deadline, Posting};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick exactly one posting from the eligible pool, or `None` when no
/// bucket can be formed.
///
/// Past-dated postings are tolerated by exclusion: upstream purging should
/// have removed them already, but a stale snapshot must not break the run.
/// "Soon" postings never enter the dated buckets.
pub fn select_posting<'a, R: Rng>(
    pool: &'a [Posting],
    today: NaiveDate,
    rng: &mut R,
) -> Option<&'a Posting> {
    let urgent: Vec<usize> = pool
        .iter()
        .enumerate()
        .filter(|(_, p)| p.deadline == Deadline::Soon)
        .map(|(i, _)| i)
        .collect();

    // Dated postings still ahead of (or on) today.
    let valid: Vec<(usize, NaiveDate)> = pool
        .iter()
        .enumerate()
        .filter_map(|(i, p)| match p.deadline {
            Deadline::Date(date) if date >= today => Some((i, date)),
            _ => None,
        })
        .collect();

    // Smallest future deadline; first occurrence wins ties.
    let nearest = valid
        .iter()
        .copied()
        .min_by_key(|&(i, date)| (date, i))
        .map(|(i, _)| i);

    let mut choices: Vec<(usize, f64)> = Vec::with_capacity(3);
    if let Some(&index) = urgent.choose(rng) {
        choices.push((index, 0.8));
    }
    if let Some(index) = nearest {
        choices.push((index, 0.1));
    }
    if let Some(&(index, _)) = valid.choose(rng) {
        choices.push((index, 0.1));
    }

    // No urgent bucket: the source policy pins the remaining pair at
    // 0.9/0.1 rather than rescaling 0.1/0.1 proportionally.
    if urgent.is_empty() && choices.len() == 2 {
        choices[0].1 = 0.9;
        choices[1].1 = 0.1;
    }

    if choices.is_empty() {
        return None;
    }

    let total: f64 = choices.iter().map(|(_, w)| w).sum();
    let mut draw = rng.gen_range(0.0..total);
    for &(index, weight) in &choices {
        if draw < weight {
            return Some(&pool[index]);
        }
        draw -= weight;
    }
    // Floating-point tail: fall back to the last bucket.
    choices.last().map(|&(index, _)| &pool[index])
}
