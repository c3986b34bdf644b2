//! Ordered symbol table backed by an unbalanced binary search tree whose nodes
//! cache the size of their subtree.
//!
//! The size cache turns the tree into an order-statistics tree: [`Bst::select`],
//! [`Bst::rank`] and [`Bst::size_of_range`] run in `O(height)` by trusting the
//! cached counts instead of walking subtrees. Every mutating operation keeps
//! `size = 1 + size(left) + size(right)` exact along the path it touched
//! before returning; a stale count would corrupt every order query silently.
//!
//! Nodes own their children through `Option<Box<_>>` and carry no parent
//! pointer. Removal detaches the search path into an owned stack, rewires the
//! bottom, and reattaches the path while refreshing sizes, so there is never
//! more than one owner of a node.
//!
//! No balancing is performed. Inserting keys in sorted order produces a
//! degenerate, list-shaped tree of height `n - 1`. Nothing here recurses, so
//! such a tree is as safe to build, query and drop as a balanced one.

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

type Link<K, V> = Option<Box<Node<K, V>>>;

/// Errors returned by [`Bst`] queries and removals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BstError {
    /// The operation needs at least one key but the table is empty.
    #[error("{op} called on an empty symbol table")]
    Underflow {
        /// Name of the rejected operation.
        op: &'static str,
    },
    /// A floor or ceiling argument lies outside the span of keys present.
    #[error("argument to {op} is outside the range of keys present")]
    OutOfRange {
        /// Name of the rejected operation.
        op: &'static str,
    },
    /// A select rank outside `[0, len)`.
    #[error("rank {rank} is invalid for a symbol table of {len} keys")]
    InvalidArgument {
        /// The rejected rank.
        rank: usize,
        /// Number of keys in the table.
        len: usize,
    },
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    /// Number of nodes in the subtree rooted here, this node included.
    size: usize,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            size: 1,
        })
    }

    fn refresh_size(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }
}

fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// An ordered symbol table with rank and select support.
///
/// Keys are unique; [`Bst::put`] on an existing key overwrites its value.
pub struct Bst<K, V> {
    root: Link<K, V>,
}

impl<K, V> Default for Bst<K, V> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<K: Ord, V> Bst<K, V> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of key-value pairs.
    pub fn len(&self) -> usize {
        size(&self.root)
    }

    /// Returns `true` if the table holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the value associated with `key`, or `None` if absent.
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key` with `value`, overwriting the value if `key` is present.
    pub fn put(&mut self, key: K, value: V) {
        // Sizes on the search path are bumped on the way down and walked back
        // if the key turns out to be present already.
        let mut link = &mut self.root;
        loop {
            let ord = match link.as_deref() {
                Some(node) => key.cmp(&node.key),
                None => break,
            };
            if ord == Ordering::Equal {
                break;
            }
            let Some(node) = link else {
                break;
            };
            node.size += 1;
            link = if ord == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        match link {
            Some(node) => node.value = value,
            None => {
                *link = Some(Node::leaf(key, value));
                trace!("put: table now holds {} keys", self.len());
                return;
            }
        }
        self.unbump_path(&key);
    }

    /// Decrements every size above `key`, which must be present.
    fn unbump_path(&mut self, key: &K) {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                Ordering::Less => {
                    node.size -= 1;
                    node.left.as_deref_mut()
                }
                Ordering::Greater => {
                    node.size -= 1;
                    node.right.as_deref_mut()
                }
                Ordering::Equal => None,
            };
        }
    }

    /// Inserts `Some(value)` like [`Bst::put`]; `None` deletes `key` instead.
    ///
    /// This is the "empty value means delete" entry point for callers that
    /// encode removal as an absent value. [`Bst::put`] never deletes.
    pub fn put_or_delete(&mut self, key: K, value: Option<V>) {
        match value {
            Some(value) => self.put(key, value),
            None => {
                self.delete(&key);
            }
        }
    }

    /// Removes `key` and returns its value. Absent keys are a silent no-op.
    ///
    /// Uses Hibbard deletion: a node with two children is replaced by the
    /// minimum of its right subtree, which inherits the removed node's left
    /// child.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let (root, removed) = delete_node(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            debug!("delete: removed one key, {} remain", self.len());
        }
        removed
    }

    /// Removes and returns the smallest key and its value.
    ///
    /// # Errors
    ///
    /// Returns [`BstError::Underflow`] if the table is empty.
    pub fn delete_min(&mut self) -> Result<(K, V), BstError> {
        let root = self
            .root
            .take()
            .ok_or(BstError::Underflow { op: "delete_min" })?;
        let (rest, min) = detach_min(root);
        self.root = rest;
        let Node { key, value, .. } = *min;
        Ok((key, value))
    }

    /// Removes and returns the largest key and its value.
    ///
    /// # Errors
    ///
    /// Returns [`BstError::Underflow`] if the table is empty.
    pub fn delete_max(&mut self) -> Result<(K, V), BstError> {
        let root = self
            .root
            .take()
            .ok_or(BstError::Underflow { op: "delete_max" })?;
        let (rest, max) = detach_max(root);
        self.root = rest;
        let Node { key, value, .. } = *max;
        Ok((key, value))
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`BstError::Underflow`] if the table is empty.
    pub fn min(&self) -> Result<&K, BstError> {
        let mut node = self
            .root
            .as_deref()
            .ok_or(BstError::Underflow { op: "min" })?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.key)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`BstError::Underflow`] if the table is empty.
    pub fn max(&self) -> Result<&K, BstError> {
        let mut node = self
            .root
            .as_deref()
            .ok_or(BstError::Underflow { op: "max" })?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.key)
    }

    /// Returns the largest key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`BstError::Underflow`] if the table is empty, and
    /// [`BstError::OutOfRange`] if every key is greater than `key`.
    pub fn floor(&self, key: &K) -> Result<&K, BstError> {
        if self.is_empty() {
            return Err(BstError::Underflow { op: "floor" });
        }
        floor_node(&self.root, key)
            .map(|node| &node.key)
            .ok_or(BstError::OutOfRange { op: "floor" })
    }

    /// Returns the smallest key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`BstError::Underflow`] if the table is empty, and
    /// [`BstError::OutOfRange`] if every key is less than `key`.
    pub fn ceiling(&self, key: &K) -> Result<&K, BstError> {
        if self.is_empty() {
            return Err(BstError::Underflow { op: "ceiling" });
        }
        ceiling_node(&self.root, key)
            .map(|node| &node.key)
            .ok_or(BstError::OutOfRange { op: "ceiling" })
    }

    /// Returns the key with exactly `rank` smaller keys in the table.
    ///
    /// # Errors
    ///
    /// Returns [`BstError::InvalidArgument`] unless `rank < self.len()`.
    pub fn select(&self, rank: usize) -> Result<&K, BstError> {
        let len = self.len();
        let invalid = BstError::InvalidArgument { rank, len };
        if rank >= len {
            return Err(invalid);
        }
        let mut remaining = rank;
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            let left_size = size(&node.left);
            match left_size.cmp(&remaining) {
                Ordering::Greater => cur = node.left.as_deref(),
                Ordering::Less => {
                    remaining -= left_size + 1;
                    cur = node.right.as_deref();
                }
                Ordering::Equal => return Ok(&node.key),
            }
        }
        Err(invalid)
    }

    /// Returns the number of keys strictly less than `key`.
    ///
    /// `key` need not be present.
    pub fn rank(&self, key: &K) -> usize {
        let mut acc = 0;
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => {
                    acc += 1 + size(&node.left);
                    cur = node.right.as_deref();
                }
                Ordering::Equal => return acc + size(&node.left),
            }
        }
        acc
    }

    /// Returns the keys in `[lo, hi]` in ascending order.
    pub fn keys_in_range(&self, lo: &K, hi: &K) -> Vec<&K> {
        let mut out = Vec::new();
        collect_range(&self.root, lo, hi, &mut out);
        out
    }

    /// Returns every key in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        if self.is_empty() {
            return Vec::new();
        }
        let (Ok(lo), Ok(hi)) = (self.min(), self.max()) else {
            return Vec::new();
        };
        self.keys_in_range(lo, hi)
    }

    /// Returns the number of keys in `[lo, hi]`; `0` when `lo > hi`.
    pub fn size_of_range(&self, lo: &K, hi: &K) -> usize {
        if lo > hi {
            return 0;
        }
        let below_hi = self.rank(hi);
        let below_lo = self.rank(lo);
        if self.contains_key(hi) {
            below_hi - below_lo + 1
        } else {
            below_hi - below_lo
        }
    }

    /// Returns the number of edges on the longest root-to-leaf path, or
    /// `None` for an empty table.
    pub fn height(&self) -> Option<usize> {
        self.root.as_deref().map(height)
    }

    /// Returns an in-order iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.push_left(self.root.as_deref());
        iter
    }
}

/// Which child of its parent a detached subtree came from.
#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Owned nodes from the root down to a detached subtree, each with the side
/// its child was taken from.
type Path<K, V> = Vec<(Box<Node<K, V>>, Side)>;

/// Hangs `subtree` back under the nodes of `path`, refreshing every size on
/// the way up, and returns the rebuilt root.
fn reattach<K, V>(mut path: Path<K, V>, mut subtree: Link<K, V>) -> Link<K, V> {
    while let Some((mut parent, side)) = path.pop() {
        match side {
            Side::Left => parent.left = subtree,
            Side::Right => parent.right = subtree,
        }
        parent.refresh_size();
        subtree = Some(parent);
    }
    subtree
}

/// Splits the minimum node off `node`, returning the remaining subtree and
/// the detached node.
fn detach_min<K, V>(node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    let mut path = Vec::new();
    let mut min = node;
    while let Some(left) = min.left.take() {
        path.push((min, Side::Left));
        min = left;
    }
    let rest = min.right.take();
    (reattach(path, rest), min)
}

fn detach_max<K, V>(node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    let mut path = Vec::new();
    let mut max = node;
    while let Some(right) = max.right.take() {
        path.push((max, Side::Right));
        max = right;
    }
    let rest = max.left.take();
    (reattach(path, rest), max)
}

fn delete_node<K: Ord, V>(root: Link<K, V>, key: &K) -> (Link<K, V>, Option<V>) {
    let mut path = Vec::new();
    let mut link = root;
    loop {
        let Some(mut node) = link else {
            return (reattach(path, None), None);
        };
        match key.cmp(&node.key) {
            Ordering::Less => {
                link = node.left.take();
                path.push((node, Side::Left));
            }
            Ordering::Greater => {
                link = node.right.take();
                path.push((node, Side::Right));
            }
            Ordering::Equal => {
                let Node {
                    value, left, right, ..
                } = *node;
                let replacement = match (left, right) {
                    (None, None) => None,
                    (Some(left), None) => Some(left),
                    (None, Some(right)) => Some(right),
                    (Some(left), Some(right)) => {
                        let (rest, mut successor) = detach_min(right);
                        successor.right = rest;
                        successor.left = Some(left);
                        successor.refresh_size();
                        Some(successor)
                    }
                };
                return (reattach(path, replacement), Some(value));
            }
        }
    }
}

fn floor_node<'a, K: Ord, V>(link: &'a Link<K, V>, key: &K) -> Option<&'a Node<K, V>> {
    let mut best = None;
    let mut cur = link.as_deref();
    while let Some(node) = cur {
        match key.cmp(&node.key) {
            Ordering::Equal => return Some(node),
            Ordering::Less => cur = node.left.as_deref(),
            Ordering::Greater => {
                best = Some(node);
                cur = node.right.as_deref();
            }
        }
    }
    best
}

fn ceiling_node<'a, K: Ord, V>(link: &'a Link<K, V>, key: &K) -> Option<&'a Node<K, V>> {
    let mut best = None;
    let mut cur = link.as_deref();
    while let Some(node) = cur {
        match key.cmp(&node.key) {
            Ordering::Equal => return Some(node),
            Ordering::Greater => cur = node.right.as_deref(),
            Ordering::Less => {
                best = Some(node);
                cur = node.left.as_deref();
            }
        }
    }
    best
}

/// In-order walk that skips subtrees lying wholly outside `[lo, hi]`.
fn collect_range<'a, K: Ord, V>(link: &'a Link<K, V>, lo: &K, hi: &K, out: &mut Vec<&'a K>) {
    let mut stack: Vec<&'a Node<K, V>> = Vec::new();
    let mut cur = link.as_deref();
    loop {
        while let Some(node) = cur {
            stack.push(node);
            cur = if *lo < node.key {
                node.left.as_deref()
            } else {
                None
            };
        }
        let Some(node) = stack.pop() else {
            return;
        };
        if *lo <= node.key && node.key <= *hi {
            out.push(&node.key);
        }
        // Everything still on the stack is larger than `node`.
        if node.key >= *hi {
            return;
        }
        cur = node.right.as_deref();
    }
}

fn height<K, V>(root: &Node<K, V>) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        for child in [node.left.as_deref(), node.right.as_deref()]
            .into_iter()
            .flatten()
        {
            stack.push((child, depth + 1));
        }
    }
    deepest
}

impl<K, V> Drop for Bst<K, V> {
    fn drop(&mut self) {
        // Unlink nodes one at a time so a list-shaped tree does not drop
        // through a chain of nested boxes.
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K: Ord + Clone, V: Clone> Clone for Bst<K, V> {
    fn clone(&self) -> Self {
        // Re-inserting in pre-order reproduces the same shape.
        let mut copy = Self::new();
        let mut stack: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            copy.put(node.key.clone(), node.value.clone());
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        copy
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for Bst<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// In-order iterator over a [`Bst`], created by [`Bst::iter`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut cur: Option<&'a Node<K, V>>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K: Ord, V> IntoIterator for &'a Bst<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> Extend<(K, V)> for Bst<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Bst<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
