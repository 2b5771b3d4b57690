//! Feature subset enumeration.
//!
//! Subsets are produced in lexicographic order by depth-first extension: at each
//! depth the next index is chosen from `start..n` and the recursion continues from
//! `index + 1`. A finished prefix is copied out, so emitted subsets are never
//! touched again by the recursion.

/// All `k`-subsets of `0..n`, each strictly increasing, in lexicographic order.
///
/// Returns an empty list when `k > n` and a single full subset when `k == n`.
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(binomial(n, k).min(1 << 20) as usize);
    let mut prefix = Vec::with_capacity(k);
    extend(0, n, k, &mut prefix, &mut out);
    out
}

fn extend(start: usize, n: usize, k: usize, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    if prefix.len() == k {
        out.push(prefix.clone());
        return;
    }

    // Leave room for the remaining picks.
    let remaining = k - prefix.len();
    for i in start..=(n - remaining) {
        prefix.push(i);
        extend(i + 1, n, k, prefix, out);
        prefix.pop();
    }
}

/// `C(n, k)`, saturating at `u64::MAX`.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    let mut acc: u64 = 1;
    for i in 0..k {
        // acc * (n - i) / (i + 1) stays integral at every step.
        acc = match acc.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return u64::MAX,
        };
    }
    acc
}
