//! Attendance percentages.

/// `round(count / total * 100)`, rounding halves up. Zero total reports 0.
///
/// Counts above `total` are clamped to 100.
pub fn percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let count = count.min(total) as u64;
    let total = total as u64;
    ((count * 200 + total) / (total * 2)) as u8
}
