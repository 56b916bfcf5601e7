use chrono::NaiveDate;
use std::collections::HashMap;

pub const UNKNOWN: &str = "Unknown";

/// Where a known bucket sits in its dimension's output order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderKey {
    Time(NaiveDate),
    Position(u8),
    Alpha(String),
    /// Insertion order; the stable sort leaves these where they were first seen.
    Seen,
}

/// Known buckets first, then "Unknown", then the mixed-parlay bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketOrder {
    Known(OrderKey),
    Unknown,
    Mixed,
}

/// A grouping key: the label shown to the user plus its sort position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub order: BucketOrder,
}

impl Bucket {
    pub fn known(label: impl Into<String>, key: OrderKey) -> Self {
        Self {
            label: label.into(),
            order: BucketOrder::Known(key),
        }
    }

    pub fn unknown() -> Self {
        Self {
            label: UNKNOWN.to_string(),
            order: BucketOrder::Unknown,
        }
    }

    pub fn mixed(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            order: BucketOrder::Mixed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Group<T> {
    pub bucket: Bucket,
    pub items: Vec<T>,
}

/// Partitions `items` by bucket and returns the groups in bucket order.
///
/// Groups are collected in first-seen order and then stably sorted, so buckets
/// with equal order keys keep their insertion order.
pub fn group_by<T, I, F>(items: I, key: F) -> Vec<Group<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Bucket,
{
    let mut groups: Vec<Group<T>> = Vec::new();
    // Keyed on order as well as label so a category literally named "Unknown"
    // never merges into the reserved bucket.
    let mut index: HashMap<(BucketOrder, String), usize> = HashMap::new();

    for item in items {
        let bucket = key(&item);
        let slot = (bucket.order.clone(), bucket.label.clone());
        match index.get(&slot) {
            Some(&i) => groups[i].items.push(item),
            None => {
                index.insert(slot, groups.len());
                groups.push(Group {
                    bucket,
                    items: vec![item],
                });
            }
        }
    }

    groups.sort_by(|a, b| a.bucket.order.cmp(&b.bucket.order));
    groups
}
