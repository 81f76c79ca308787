//! Shared helpers for the in-crate test suites.

/// Installs the test logger; later calls are no-ops. Run the suite with
/// `RUST_LOG=debug` to see the search summaries.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Calls `visit` once for every permutation of `items` (Heap's
/// algorithm). Used by the search tests to show that results do not
/// depend on which participant names sort first.
pub(crate) fn for_each_permutation<F>(items: &mut [&'static str], visit: &mut F)
where
    F: FnMut(&[&'static str]),
{
    fn permute<F>(items: &mut [&'static str], k: usize, visit: &mut F)
    where
        F: FnMut(&[&'static str]),
    {
        if k <= 1 {
            visit(items);
            return;
        }
        for i in 0..k {
            permute(items, k - 1, visit);
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
        }
    }

    let len = items.len();
    permute(items, len, visit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn generates_every_permutation_once() {
        let mut items = ["a", "b", "c"];
        let mut seen: BTreeSet<Vec<&str>> = BTreeSet::new();
        let mut count = 0usize;

        for_each_permutation(&mut items, &mut |p| {
            seen.insert(p.to_vec());
            count += 1;
        });

        assert_eq!(count, 6);
        assert_eq!(seen.len(), 6);
    }
}
