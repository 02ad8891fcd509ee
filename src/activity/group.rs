use std::collections::HashMap;

use crate::feed::Entry;

/// Entries keyed by author username.
///
/// Each group keeps feed order, and users iterate in order of first
/// appearance. Entries without a username live under `""`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedActivity {
    order: Vec<String>,
    groups: HashMap<String, Vec<Entry>>,
}

impl GroupedActivity {
    pub fn group_by_author(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut grouped = GroupedActivity::default();
        for entry in entries {
            grouped.push(entry);
        }
        grouped
    }

    fn push(&mut self, entry: Entry) {
        let key = entry.author.username.clone();
        match self.groups.get_mut(&key) {
            Some(group) => group.push(entry),
            None => {
                self.order.push(key.clone());
                self.groups.insert(key, vec![entry]);
            }
        }
    }

    pub fn get(&self, username: &str) -> &[Entry] {
        self.groups.get(username).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn take(&mut self, username: &str) -> Vec<Entry> {
        self.order.retain(|u| u != username);
        self.groups.remove(username).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Entry])> {
        self.order.iter().map(move |u| (u.as_str(), self.get(u)))
    }

    pub fn user_count(&self) -> usize { self.order.len() }

    pub fn total_entries(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::decode_feed;
    use crate::feed::types::Author;
    use crate::feed::fixtures::{entry_xml, feed_xml};

    fn entry(id: &str, username: &str) -> Entry {
        Entry {
            id: id.into(),
            author: Author { name: String::new(), username: username.into() },
            ..Entry::default()
        }
    }

    fn ids(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn groups_alice_bob_alice() {
        let grouped = GroupedActivity::group_by_author(vec![
            entry("e1", "alice"),
            entry("e2", "bob"),
            entry("e3", "alice"),
        ]);
        assert_eq!(ids(grouped.get("alice")), vec!["e1", "e3"]);
        assert_eq!(ids(grouped.get("bob")), vec!["e2"]);
        assert_eq!(grouped.iter().map(|(u, _)| u).collect::<Vec<_>>(), vec!["alice", "bob"]);
        assert!(grouped.get("carol").is_empty());
    }

    #[test]
    fn preserves_relative_order_per_user() {
        let input: Vec<Entry> = (0..20)
            .map(|i| entry(&format!("e{i}"), ["a", "b", "c"][i % 3]))
            .collect();
        let grouped = GroupedActivity::group_by_author(input.clone());
        for (user, group) in grouped.iter() {
            let expected: Vec<&str> = input
                .iter()
                .filter(|e| e.author.username == user)
                .map(|e| e.id.as_str())
                .collect();
            assert_eq!(ids(group), expected);
        }
    }

    #[test]
    fn empty_username_is_kept() {
        let grouped = GroupedActivity::group_by_author(vec![
            entry("e1", ""),
            entry("e2", "bob"),
            entry("e3", ""),
        ]);
        assert_eq!(ids(grouped.get("")), vec!["e1", "e3"]);
        assert_eq!(grouped.total_entries(), 3);
        assert_eq!(grouped.user_count(), 2);
    }

    #[test]
    fn take_removes_group() {
        let mut grouped = GroupedActivity::group_by_author(vec![entry("e1", "alice"), entry("e2", "bob")]);
        assert_eq!(ids(&grouped.take("alice")), vec!["e1"]);
        assert!(grouped.take("alice").is_empty());
        assert_eq!(grouped.iter().map(|(u, _)| u).collect::<Vec<_>>(), vec!["bob"]);
    }

    #[test]
    fn decode_then_group_is_deterministic() {
        let xml = feed_xml(&[
            entry_xml("1", "alice", "a"),
            entry_xml("2", "bob", "b"),
            entry_xml("3", "alice", "c"),
        ]);
        let first = GroupedActivity::group_by_author(decode_feed(&xml).unwrap().entries);
        let second = GroupedActivity::group_by_author(decode_feed(&xml).unwrap().entries);
        assert_eq!(first, second);
        assert_eq!(first.total_entries(), 3);
        assert_eq!(first.get("alice").len(), 2);
    }
}
