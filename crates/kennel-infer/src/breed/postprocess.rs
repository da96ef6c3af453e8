/// Index of the maximum score. Ties resolve to the lowest index.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }

    let mut best = 0;
    for (i, &v) in scores.iter().enumerate().skip(1) {
        if v > scores[best] {
            best = i;
        }
    }
    Some(best)
}

/// Scale a raw score to a percentage rounded to two decimals.
pub fn confidence_percent(score: f32) -> f32 {
    (score * 10_000.0).round() / 100.0
}
