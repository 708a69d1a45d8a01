//! The one rounding policy used for every reported percentage and average.
//!
//! Scalar metrics are rounded to one decimal with ties to even. Share tables
//! go through [`apportion_percent`], which works in exact integer tenths so a
//! table always sums to 100 within one tenth.

/// Round a metric to one decimal place, ties to even.
#[must_use]
pub fn round_percent(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Convert `counts` (which must sum to `total`) into one-decimal percentages.
///
/// Each share is first rounded on its own, ties to even. If the rounded table
/// then falls outside `100 ± 0.1`, the shares whose fractional tenths sit
/// closest to the rounding boundary are moved to their other neighbouring
/// tenth until it fits. Every share stays within one tenth of its exact value.
///
/// Returns all zeros when `total` is zero.
#[must_use]
pub fn apportion_percent(counts: &[usize], total: usize) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    debug_assert_eq!(counts.iter().sum::<usize>(), total);

    let total = total as u128;
    let mut shares: Vec<TenthShare> = counts
        .iter()
        .map(|&count| {
            let scaled = count as u128 * 1000;
            let floor = scaled / total;
            let remainder = scaled % total;
            let round_up =
                2 * remainder > total || (2 * remainder == total && floor % 2 == 1);
            TenthShare {
                floor,
                remainder,
                tenths: if round_up { floor + 1 } else { floor },
            }
        })
        .collect();

    let sum: u128 = shares.iter().map(|s| s.tenths).sum();

    if sum > 1001 {
        let mut rounded_up: Vec<usize> = (0..shares.len())
            .filter(|&i| shares[i].tenths > shares[i].floor)
            .collect();
        rounded_up.sort_by_key(|&i| shares[i].remainder);
        for &i in rounded_up.iter().take(excess(sum, 1001)) {
            shares[i].tenths -= 1;
        }
    } else if sum < 999 {
        let mut rounded_down: Vec<usize> = (0..shares.len())
            .filter(|&i| shares[i].tenths == shares[i].floor && shares[i].remainder > 0)
            .collect();
        rounded_down.sort_by_key(|&i| std::cmp::Reverse(shares[i].remainder));
        for &i in rounded_down.iter().take(excess(999, sum)) {
            shares[i].tenths += 1;
        }
    }

    shares.iter().map(|s| tenths_to_percent(s.tenths)).collect()
}

// Tenths never exceed 1001, well inside f64's exact integer range.
#[allow(clippy::cast_precision_loss)]
fn tenths_to_percent(tenths: u128) -> f64 {
    tenths as f64 / 10.0
}

struct TenthShare {
    floor: u128,
    remainder: u128,
    tenths: u128,
}

fn excess(high: u128, low: u128) -> usize {
    usize::try_from(high - low).unwrap_or(usize::MAX)
}
