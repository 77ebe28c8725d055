/// Sorted, de-duplicated group labels.
pub fn extract_unique_groups<L>(group_ids: &[L]) -> Vec<L>
where
    L: Ord + Clone,
{
    let mut unique_groups = group_ids.to_vec();
    unique_groups.sort();
    unique_groups.dedup();
    unique_groups
}

/// Split `values` into one sample per label in `unique_groups`, preserving input order.
pub fn group_values<L>(values: &[f64], group_ids: &[L], unique_groups: &[L]) -> Vec<Vec<f64>>
where
    L: PartialEq,
{
    unique_groups
        .iter()
        .map(|group| {
            values
                .iter()
                .zip(group_ids)
                .filter_map(|(&v, g)| if g == group { Some(v) } else { None })
                .collect()
        })
        .collect()
}
