//! Singly-linked list of key-value nodes used as a bucket by `ChainingMap`

use std::fmt;

/// A node in a chain, owning the rest of the list
#[derive(Debug, Clone)]
pub struct Node<V> {
    /// The key stored in the node
    key: String,
    /// The value associated with the key
    value: V,
    /// The following node, if any
    next: Option<Box<Node<V>>>,
}

impl<V> Node<V> {
    /// Returns the node's key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the node's value
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }
}

/// An owned singly-linked list of key-value nodes in insertion order
#[derive(Debug, Clone)]
pub struct Chain<V> {
    /// First node of the list
    head: Option<Box<Node<V>>>,
    /// Number of nodes in the list
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of nodes in the chain
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain has no nodes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Finds the node holding `key`
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Node<V>> {
        self.iter().find(|node| node.key == key)
    }

    /// Finds the node holding `key` and returns its value for in-place mutation
    pub fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Appends a node at the tail of the chain.
    ///
    /// Does not check for an existing node with the same key.
    pub fn push_back(&mut self, key: String, value: V) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { key, value, next: None }));
        self.len = self.len.saturating_add(1);
    }

    /// Unlinks the node holding `key` and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let removed = cursor.take()?;
        let Node { value, next, .. } = *removed;
        *cursor = next;
        self.len = self.len.saturating_sub(1);
        Some(value)
    }

    /// Returns an iterator over the nodes in insertion order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // Unlink iteratively so long chains don't recurse through `Box` drops
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SLL [")?;
        for (position, node) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({}: {})", node.key, node.value)?;
        }
        f.write_str("]")
    }
}

impl<'a, V> IntoIterator for &'a Chain<V> {
    type Item = &'a Node<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

/// Borrowing iterator over the nodes of a chain
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The node to yield next
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node
        })
    }
}

/// Owning iterator that unlinks nodes from the head of a chain
#[derive(Debug)]
pub struct IntoIter<V> {
    /// The chain being drained
    chain: Chain<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.chain.head.take()?;
        let Node { key, value, next } = *head;
        self.chain.head = next;
        self.chain.len = self.chain.len.saturating_sub(1);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chain.len, Some(self.chain.len))
    }
}
