use serde::Serialize;

/// Separator used by the `friends_id` and `friend_request` columns.
pub const ID_DELIMITER: char = ',';

/// Decodes a stored id list. Absent and empty values are the empty list,
/// blank or non-numeric segments are skipped.
fn decode_ids(raw: Option<&str>) -> impl Iterator<Item = i64> + '_ {
    raw.unwrap_or_default()
        .split(ID_DELIMITER)
        .filter_map(|segment| segment.trim().parse().ok())
}

fn encode_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(const_str::to_str!(ID_DELIMITER))
}

/// Confirmed friends of one user, in the order they were added.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FriendList {
    owner_id: i64,
    friend_ids: Vec<i64>,
}

impl FriendList {
    pub fn decode(owner_id: i64, raw: Option<&str>) -> Self {
        let mut list = Self {
            owner_id,
            friend_ids: vec![],
        };
        for friend_id in decode_ids(raw) {
            list.insert(friend_id);
        }
        list
    }

    pub fn encode(&self) -> String {
        encode_ids(&self.friend_ids)
    }

    pub fn contains(&self, friend_id: i64) -> bool {
        self.friend_ids.contains(&friend_id)
    }

    /// Returns false if the id was already present or is the owner itself.
    pub fn insert(&mut self, friend_id: i64) -> bool {
        if friend_id == self.owner_id || self.contains(friend_id) {
            return false;
        }
        self.friend_ids.push(friend_id);
        true
    }

    pub fn remove(&mut self, friend_id: i64) -> bool {
        let len = self.friend_ids.len();
        self.friend_ids.retain(|id| *id != friend_id);
        self.friend_ids.len() != len
    }

    pub fn ids(&self) -> &[i64] {
        &self.friend_ids
    }

    pub fn len(&self) -> usize {
        self.friend_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friend_ids.is_empty()
    }
}

/// Inbound friend requests of one user, oldest first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FriendRequestQueue {
    sender_ids: Vec<i64>,
}

impl FriendRequestQueue {
    pub fn decode(raw: Option<&str>) -> Self {
        let mut queue = Self::default();
        for sender_id in decode_ids(raw) {
            queue.push(sender_id);
        }
        queue
    }

    pub fn encode(&self) -> String {
        encode_ids(&self.sender_ids)
    }

    pub fn contains(&self, sender_id: i64) -> bool {
        self.sender_ids.contains(&sender_id)
    }

    /// Appends a request unless one from the same sender is already pending.
    pub fn push(&mut self, sender_id: i64) -> bool {
        if self.contains(sender_id) {
            return false;
        }
        self.sender_ids.push(sender_id);
        true
    }

    pub fn remove(&mut self, sender_id: i64) -> bool {
        match self.sender_ids.iter().position(|id| *id == sender_id) {
            Some(index) => {
                self.sender_ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn ids(&self) -> &[i64] {
        &self.sender_ids
    }

    pub fn len(&self) -> usize {
        self.sender_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender_ids.is_empty()
    }
}

/// A display-ready row of the friend list or the pending request list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendEntry {
    pub user_id: i64,
    pub username: String,
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_columns_are_empty_lists() {
        assert!(FriendList::decode(1, None).is_empty());
        assert!(FriendList::decode(1, Some("")).is_empty());
        assert!(FriendRequestQueue::decode(None).is_empty());
        assert!(FriendRequestQueue::decode(Some(",,")).is_empty());
    }

    #[test]
    fn empty_list_encodes_to_empty_string() {
        let mut friends = FriendList::decode(1, Some("2"));
        assert!(friends.remove(2));
        assert_eq!(friends.encode(), "");
    }

    #[test]
    fn removal_matches_whole_ids_only() {
        let mut friends = FriendList::decode(5, Some("12,3"));
        assert!(!friends.contains(1));
        assert!(!friends.remove(1));
        assert_eq!(friends.encode(), "12,3");

        let mut queue = FriendRequestQueue::decode(Some("21,2"));
        assert!(queue.remove(2));
        assert_eq!(queue.encode(), "21");
    }

    #[test]
    fn friend_list_skips_duplicates_and_owner() {
        let mut friends = FriendList::decode(1, Some("2,1,2,3"));
        assert_eq!(friends.ids(), &[2, 3]);
        assert!(!friends.insert(1));
        assert!(!friends.insert(3));
        assert!(friends.insert(4));
        assert_eq!(friends.encode(), "2,3,4");
    }

    #[test]
    fn queue_keeps_insertion_order() {
        let mut queue = FriendRequestQueue::decode(Some("9,4"));
        assert!(queue.push(7));
        assert!(!queue.push(4));
        assert_eq!(queue.encode(), "9,4,7");
        assert!(queue.remove(4));
        assert_eq!(queue.ids(), &[9, 7]);
    }

    #[test]
    fn malformed_segments_are_ignored() {
        let queue = FriendRequestQueue::decode(Some("3, 4,None,,x5"));
        assert_eq!(queue.ids(), &[3, 4]);
    }
}
