use std::collections::BTreeMap;

/// Running total of one group: summed value and number of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupTotal {
    pub sum: f64,
    pub count: usize,
}

/// Group rows by key and sum a value per group.
///
/// Rows whose key is `None` are skipped. Groups come back ordered by key.
pub fn group_sum<'a, T, K, I, KF, VF>(rows: I, key: KF, value: VF) -> BTreeMap<K, GroupTotal>
where
    T: 'a,
    K: Ord,
    I: IntoIterator<Item = &'a T>,
    KF: Fn(&'a T) -> Option<K>,
    VF: Fn(&'a T) -> f64,
{
    let mut groups: BTreeMap<K, GroupTotal> = BTreeMap::new();
    for row in rows {
        let Some(k) = key(row) else {
            continue;
        };
        let total = groups.entry(k).or_default();
        total.sum += value(row);
        total.count += 1;
    }
    groups
}

/// Round to a number of decimal places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
