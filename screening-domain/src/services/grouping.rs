use std::collections::BTreeMap;

use crate::entities::Transaction;

/// Partitions `transactions` by `key`, each group sorted by timestamp.
///
/// The sort is stable, so rows sharing a timestamp keep their input order.
/// Only keys that occur in the input get a group.
pub fn group_by<'a, K, F>(transactions: &'a [Transaction], key: F) -> BTreeMap<K, Vec<&'a Transaction>>
where
    K: Ord,
    F: Fn(&'a Transaction) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a Transaction>> = BTreeMap::new();
    for transaction in transactions {
        groups.entry(key(transaction)).or_default().push(transaction);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|transaction| transaction.timestamp);
    }
    groups
}

pub fn by_user(transactions: &[Transaction]) -> BTreeMap<&str, Vec<&Transaction>> {
    group_by(transactions, |transaction| transaction.user_id.as_str())
}

pub fn by_user_and_merchant(
    transactions: &[Transaction],
) -> BTreeMap<(&str, &str), Vec<&Transaction>> {
    group_by(transactions, |transaction| {
        (transaction.user_id.as_str(), transaction.merchant_name.as_str())
    })
}
