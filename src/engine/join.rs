//! Grouped full outer equi-join
//!
//! Groups records from two datasets by every distinct value of the join
//! field seen in either one. The result is a grouping structure, not
//! paired tuples, and neither dataset is mutated.

use std::collections::HashMap;

use serde_json::Value;

use crate::store::Record;

use super::result::{JoinGroup, JoinResult};

/// Joins two record sequences on a field.
///
/// Groups appear in first-seen order; records lacking the field group
/// under the null key.
pub fn join_records(current: &[Record], other: &[Record], field: &str) -> JoinResult {
    let mut groups: Vec<JoinGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut slot = |groups: &mut Vec<JoinGroup>, key: Value| -> usize {
        // Distinct values need a hashable identity; the serialized form is
        // canonical per value
        let canonical = key.to_string();
        match index.get(&canonical) {
            Some(&at) => at,
            None => {
                groups.push(JoinGroup {
                    key,
                    current: Vec::new(),
                    other: Vec::new(),
                });
                let at = groups.len() - 1;
                index.insert(canonical, at);
                at
            }
        }
    };

    for record in current {
        let key = record.get(field).cloned().unwrap_or(Value::Null);
        let at = slot(&mut groups, key);
        groups[at].current.push(record.clone());
    }

    for record in other {
        let key = record.get(field).cloned().unwrap_or(Value::Null);
        let at = slot(&mut groups, key);
        groups[at].other.push(record.clone());
    }

    JoinResult { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: serde_json::Value) -> Record {
        match pairs {
            serde_json::Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_groups_records_from_both_sides() {
        let current = vec![
            record(json!({"title": "Dune", "genre": "sci-fi"})),
            record(json!({"title": "Emma", "genre": "romance"})),
        ];
        let other = vec![record(json!({"title": "Hyperion", "genre": "sci-fi"}))];

        let joined = join_records(&current, &other, "genre");

        let scifi = joined.group(&json!("sci-fi")).unwrap();
        assert_eq!(scifi.current.len(), 1);
        assert_eq!(scifi.other.len(), 1);

        let romance = joined.group(&json!("romance")).unwrap();
        assert_eq!(romance.current.len(), 1);
        assert!(romance.other.is_empty());
    }

    #[test]
    fn test_key_only_in_other_still_groups() {
        let current = vec![record(json!({"genre": "sci-fi"}))];
        let other = vec![record(json!({"genre": "horror"}))];

        let joined = join_records(&current, &other, "genre");

        let horror = joined.group(&json!("horror")).unwrap();
        assert!(horror.current.is_empty());
        assert_eq!(horror.other.len(), 1);
    }

    #[test]
    fn test_missing_field_groups_under_null() {
        let current = vec![record(json!({"title": "Dune"}))];
        let other: Vec<Record> = Vec::new();

        let joined = join_records(&current, &other, "genre");

        let null_group = joined.group(&json!(null)).unwrap();
        assert_eq!(null_group.current.len(), 1);
    }

    #[test]
    fn test_first_seen_key_order() {
        let current = vec![
            record(json!({"genre": "b"})),
            record(json!({"genre": "a"})),
            record(json!({"genre": "b"})),
        ];
        let other = vec![record(json!({"genre": "c"}))];

        let joined = join_records(&current, &other, "genre");

        let keys: Vec<_> = joined.groups.iter().map(|g| g.key.clone()).collect();
        assert_eq!(keys, vec![json!("b"), json!("a"), json!("c")]);
        assert_eq!(joined.group(&json!("b")).unwrap().current.len(), 2);
    }

    #[test]
    fn test_numeric_and_text_keys_stay_distinct() {
        let current = vec![record(json!({"isbn": 1965}))];
        let other = vec![record(json!({"isbn": "1965"}))];

        let joined = join_records(&current, &other, "isbn");
        assert_eq!(joined.groups.len(), 2);
    }
}
