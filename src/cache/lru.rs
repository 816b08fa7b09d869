//! LRU List Module
//!
//! Recency ordering for cache eviction, backed by an arena of nodes linked
//! by index. All operations are O(1).

/// Null link.
const NIL: usize = usize::MAX;

// == Handle ==
/// Stable position of a value inside an [`LruList`].
///
/// A handle stays valid until its value is removed. Slots are recycled after
/// removal, so a handle must not be used once its value is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug)]
struct Node<T> {
    value: Option<T>,
    prev: usize,
    next: usize,
}

// == LRU List ==
/// Doubly-linked list ordered by access time.
///
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
#[derive(Debug)]
pub struct LruList<T> {
    nodes: Vec<Node<T>>,
    /// Recycled slot indices
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty list with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a value as the most recently used and returns its handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let node = Node {
            value: Some(value),
            prev: NIL,
            next: NIL,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        Handle(idx)
    }

    // == Move To Front ==
    /// Marks a value as recently used.
    ///
    /// Returns false if the handle does not point at a live value.
    pub fn move_to_front(&mut self, handle: Handle) -> bool {
        if !self.is_live(handle.0) {
            return false;
        }
        if self.head != handle.0 {
            self.unlink(handle.0);
            self.link_front(handle.0);
        }
        true
    }

    // == Remove ==
    /// Removes a value from the list and returns it.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.is_live(handle.0) {
            return None;
        }
        self.unlink(handle.0);
        let value = self.nodes[handle.0].value.take();
        self.free.push(handle.0);
        self.len -= 1;
        value
    }

    // == Peek ==
    /// Returns the least recently used handle without removing it.
    pub fn back(&self) -> Option<Handle> {
        (self.tail != NIL).then_some(Handle(self.tail))
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.nodes.get(handle.0).and_then(|node| node.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.nodes
            .get_mut(handle.0)
            .and_then(|node| node.value.as_mut())
    }

    // == Length ==
    /// Returns the number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Clear ==
    /// Drops every value and releases the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    fn is_live(&self, idx: usize) -> bool {
        self.nodes
            .get(idx)
            .is_some_and(|node| node.value.is_some())
    }

    fn link_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;
        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over an [`LruList`], most recently used first.
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let list = self.list;
        let node = &list.nodes[self.cursor];
        let handle = Handle(self.cursor);
        self.cursor = node.next;
        node.value.as_ref().map(|value| (handle, value))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &LruList<&'static str>) -> Vec<&'static str> {
        list.iter().map(|(_, v)| *v).collect()
    }

    #[test]
    fn test_lru_new() {
        let list: LruList<u32> = LruList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = LruList::new();

        list.push_front("key1");
        list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.len(), 3);
        assert_eq!(order(&list), vec!["key3", "key2", "key1"]);
        // key1 is oldest (added first)
        assert_eq!(list.get(list.back().unwrap()), Some(&"key1"));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert!(list.move_to_front(a));

        assert_eq!(order(&list), vec!["a", "c", "b"]);
        assert_eq!(list.get(list.back().unwrap()), Some(&"b"));
    }

    #[test]
    fn test_move_head_is_noop() {
        let mut list = LruList::new();

        list.push_front("a");
        let b = list.push_front("b");

        assert!(list.move_to_front(b));
        assert_eq!(order(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_remove_middle_tail_and_head() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(order(&list), vec!["c", "a"]);

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.back(), Some(c));

        assert_eq!(list.remove(c), Some("c"));
        assert!(list.is_empty());
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_remove_twice_returns_none() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.remove(a), None);
        assert!(!list.move_to_front(a));
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        list.push_front("b");
        list.remove(a);
        let c = list.push_front("c");

        // The freed slot is reused
        assert_eq!(c, a);
        assert_eq!(order(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_order_after_multiple_touches() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        // Oldest to newest: a, c, b
        let mut evicted = Vec::new();
        while let Some(handle) = list.back() {
            evicted.push(list.remove(handle).unwrap());
        }
        assert_eq!(evicted, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_get_mut() {
        let mut list = LruList::new();

        let a = list.push_front(String::from("a"));
        list.get_mut(a).unwrap().push('!');

        assert_eq!(list.get(a).map(String::as_str), Some("a!"));
    }

    #[test]
    fn test_clear() {
        let mut list = LruList::new();

        list.push_front(1);
        list.push_front(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        assert_eq!(list.back(), None);
    }
}
