//! Axis-label permutations.
//!
//! Pure helpers that turn two label orders (what the caller wants, what the
//! data has) into an axis reordering. All indices are 0-based.
//!
//! ```rust
//! use imgmeta_core::perm::{default_permutation, permutation};
//!
//! assert_eq!(permutation(&["x", "y"], &["y", "x"]), vec![Some(1), Some(0)]);
//! // "y" is unknown to the source, it gets the leftover slot
//! assert_eq!(default_permutation(&["x", "y"], &["a", "x"]), vec![1, 0]);
//! ```

use crate::{Error, Result};

/// Position of each `target` label within `source`, `None` when absent.
pub fn permutation<S, T>(target: &[S], source: &[T]) -> Vec<Option<usize>>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    target
        .iter()
        .map(|label| source.iter().position(|s| s.as_ref() == label.as_ref()))
        .collect()
}

/// Like [`permutation`], but fills unresolved slots.
///
/// The indices of `0..target.len()` not used by a resolved slot are handed out
/// in ascending order to the unresolved slots, left to right. The result is a
/// full permutation whenever `target.len() == source.len()`.
pub fn default_permutation<S, T>(target: &[S], source: &[T]) -> Vec<usize>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let raw = permutation(target, source);
    let n = target.len();
    let mut used = vec![false; n.max(source.len())];
    for &i in raw.iter().flatten() {
        used[i] = true;
    }
    let mut spare = (0..n).filter(|&i| !used[i]);
    raw.into_iter()
        .map(|slot| slot.or_else(|| spare.next()).unwrap_or(0))
        .collect()
}

/// Returns `true` if `perm` contains each of `0..perm.len()` exactly once.
pub fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    for &p in perm {
        if p >= perm.len() || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

/// Inverse permutation: `inv[perm[i]] == i`.
///
/// # Errors
///
/// [`Error::InvalidPermutation`] if `perm` is not a permutation.
pub fn invert_permutation(perm: &[usize]) -> Result<Vec<usize>> {
    if !is_permutation(perm) {
        return Err(Error::invalid_permutation(format!("{perm:?} is not a permutation")));
    }
    let mut inv = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inv[p] = i;
    }
    Ok(inv)
}
