//! A set iterable under several simultaneous total orders.
//!
//! The data lives in one arena of nodes; every configured order maintains
//! its own red-black tree over the same nodes, augmented with predecessor
//! and successor threading so that a full in-order walk costs O(n) without
//! building a sorted copy. Order 0 defines membership and performs the
//! uniqueness check on insertion; the remaining orders only re-sequence the
//! same elements and never dedup, so they must be total orders over the
//! stored values (ties are broken arbitrarily and only affect iteration
//! order).
//!
//! Nodes are addressed by index into the arena; index 0 is the sentinel.
//! The sentinel borders every root and leaf and also sits before the first
//! and after the last element of each threading. Parental linkage is only
//! meaningful from real nodes towards the sentinel; the sentinel's own
//! links get scribbled on during rebalancing and carry no invariant except
//! for its `pred`/`succ` threading ends.

use std::cmp::Ordering;

/// Comparison function defining one of the set's orders.
pub type OrderFn<E> = fn(&E, &E) -> Ordering;

const NIL: u32 = 0;

#[derive(Clone, Copy)]
struct Links {
    prnt: u32,
    left: u32,
    rght: u32,
    pred: u32,
    succ: u32,
    red: bool,
}

impl Links {
    fn detached(red: bool) -> Links {
        Links {
            prnt: NIL,
            left: NIL,
            rght: NIL,
            pred: NIL,
            succ: NIL,
            red,
        }
    }
}

struct Node<E> {
    /// `None` only for the sentinel and for freed arena slots.
    value: Option<E>,
    /// One linkage tuple per order.
    links: Box<[Links]>,
}

/// A set of elements maintained under N independent total orders at once.
pub struct MultiPrioritySet<E> {
    orders: Box<[OrderFn<E>]>,
    nodes: Vec<Node<E>>,
    /// Root node per order.
    root: Vec<u32>,
    /// Freed arena slots available for reuse.
    free: Vec<u32>,
    len: usize,
}

fn natural<E: Ord>(a: &E, b: &E) -> Ordering {
    a.cmp(b)
}

impl<E: Ord> MultiPrioritySet<E> {
    /// Creates a set ordered only by the element type's natural order.
    pub fn new() -> MultiPrioritySet<E> {
        MultiPrioritySet::with_orders(vec![natural::<E>])
    }
}

impl<E: Ord> Default for MultiPrioritySet<E> {
    fn default() -> Self {
        MultiPrioritySet::new()
    }
}

impl<E> MultiPrioritySet<E> {
    /// Creates a set navigated by the given comparison functions.
    ///
    /// The first function defines membership; the others only define
    /// additional iteration sequences.
    ///
    /// # Panics
    /// Panics if `orders` is empty.
    pub fn with_orders(orders: Vec<OrderFn<E>>) -> MultiPrioritySet<E> {
        assert!(!orders.is_empty(), "at least one order is required");
        let dims = orders.len();
        let sentinel = Node {
            value: None,
            links: vec![Links::detached(false); dims].into_boxed_slice(),
        };
        MultiPrioritySet {
            orders: orders.into_boxed_slice(),
            nodes: vec![sentinel],
            root: vec![NIL; dims],
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of orders maintained, equal to the number of internal trees.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.orders.len()
    }

    /// Number of elements stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root[0] == NIL
    }

    #[inline]
    fn link(&self, node: u32, c: usize) -> Links {
        self.nodes[node as usize].links[c]
    }

    #[inline]
    fn link_mut(&mut self, node: u32, c: usize) -> &mut Links {
        &mut self.nodes[node as usize].links[c]
    }

    #[inline]
    fn is_red(&self, node: u32, c: usize) -> bool {
        self.nodes[node as usize].links[c].red
    }

    fn value(&self, node: u32) -> &E {
        debug_assert_ne!(node, NIL, "the sentinel carries no value");
        self.nodes[node as usize]
            .value
            .as_ref()
            .expect("occupied arena slot")
    }

    fn cmp_nodes(&self, a: u32, b: u32, c: usize) -> Ordering {
        (self.orders[c])(self.value(a), self.value(b))
    }

    fn alloc(&mut self, value: E) -> u32 {
        let dims = self.dimensions();
        match self.free.pop() {
            Some(slot) => {
                let node = &mut self.nodes[slot as usize];
                node.value = Some(value);
                node.links.fill(Links::detached(true));
                slot
            }
            None => {
                self.nodes.push(Node {
                    value: Some(value),
                    links: vec![Links::detached(true); dims].into_boxed_slice(),
                });
                (self.nodes.len() - 1) as u32
            }
        }
    }

    fn release(&mut self, node: u32) -> E {
        let value = self.nodes[node as usize]
            .value
            .take()
            .expect("released slot was occupied");
        self.free.push(node);
        value
    }

    /// Adds the element if no structural duplicate (order 0) exists yet.
    ///
    /// On success the element is also inserted, without any uniqueness
    /// check, into every other order.
    ///
    /// # Returns
    /// `true` if the set did not formerly contain the element.
    pub fn add(&mut self, element: E) -> bool {
        let mut parent = NIL;
        let mut probe = self.root[0];
        while probe != NIL {
            parent = probe;
            probe = match (self.orders[0])(&element, self.value(probe)) {
                Ordering::Less => self.link(probe, 0).left,
                Ordering::Greater => self.link(probe, 0).rght,
                Ordering::Equal => return false,
            };
        }
        let node = self.alloc(element);
        self.insert_at(node, parent, 0);
        for c in 1..self.dimensions() {
            self.insert_forced(node, c);
        }
        self.len += 1;
        true
    }

    /// Looks up the element structurally equal to `element`; inserts the
    /// argument if none exists.
    ///
    /// This is how two search branches generating "the same" move end up
    /// sharing one canonical element.
    ///
    /// # Returns
    /// A reference to the element in the set corresponding to the one
    /// specified.
    pub fn integrate(&mut self, element: E) -> &E {
        let mut node = self.search(&element, 0);
        if node == NIL {
            node = self.alloc(element);
            for c in 0..self.dimensions() {
                self.insert_forced(node, c);
            }
            self.len += 1;
        }
        self.value(node)
    }

    /// Returns whether a structurally equal element is present.
    pub fn contains(&self, element: &E) -> bool {
        self.search(element, 0) != NIL
    }

    /// Removes the element structurally equal to `element` from every
    /// order.
    ///
    /// # Returns
    /// `true` if the set did formerly contain the element.
    pub fn remove(&mut self, element: &E) -> bool {
        let node = self.search(element, 0);
        if node == NIL {
            return false;
        }
        self.remove_node(node);
        true
    }

    /// Removes the element structurally equal to `element` and hands it
    /// back by value.
    pub fn take(&mut self, element: &E) -> Option<E> {
        let node = self.search(element, 0);
        if node == NIL {
            None
        } else {
            Some(self.remove_node(node))
        }
    }

    /// The first element of the given order, if any.
    ///
    /// # Panics
    /// Panics if `c` is not a configured order.
    pub fn first(&self, c: usize) -> Option<&E> {
        assert!(c < self.dimensions(), "order index out of range");
        let node = self.link(NIL, c).succ;
        if node == NIL { None } else { Some(self.value(node)) }
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        for links in self.nodes[0].links.iter_mut() {
            *links = Links::detached(false);
        }
        for root in self.root.iter_mut() {
            *root = NIL;
        }
        self.free.clear();
        self.len = 0;
    }

    /// Iterates the set in the sequence of the `c`-th order.
    ///
    /// The walk follows the successor threading, so a full pass is O(n).
    ///
    /// # Panics
    /// Panics if `c` is not a configured order.
    pub fn iter(&self, c: usize) -> Iter<'_, E> {
        assert!(c < self.dimensions(), "order index out of range");
        Iter {
            set: self,
            at: NIL,
            c,
        }
    }

    /// Opens a cursor over the `c`-th order that supports removing the
    /// element it currently rests on from every order.
    ///
    /// # Panics
    /// Panics if `c` is not a configured order.
    pub fn cursor(&mut self, c: usize) -> Cursor<'_, E> {
        assert!(c < self.dimensions(), "order index out of range");
        Cursor {
            set: self,
            at: NIL,
            c,
            removable: false,
        }
    }

    fn remove_node(&mut self, node: u32) -> E {
        for c in 0..self.dimensions() {
            self.discard(node, c);
        }
        self.len -= 1;
        self.release(node)
    }

    fn search(&self, element: &E, c: usize) -> u32 {
        let mut probe = self.root[c];
        while probe != NIL {
            probe = match (self.orders[c])(element, self.value(probe)) {
                Ordering::Equal => return probe,
                Ordering::Less => self.link(probe, c).left,
                Ordering::Greater => self.link(probe, c).rght,
            };
        }
        NIL
    }

    /// Inserts `node` into the `c`-th tree without any duplicate check;
    /// equal keys descend to the right.
    fn insert_forced(&mut self, node: u32, c: usize) {
        let mut parent = NIL;
        let mut probe = self.root[c];
        while probe != NIL {
            parent = probe;
            probe = if self.cmp_nodes(node, probe, c) == Ordering::Less {
                self.link(probe, c).left
            } else {
                self.link(probe, c).rght
            };
        }
        self.insert_at(node, parent, c);
    }

    /// Hangs `node` below `parent` in the `c`-th tree and rethreads the
    /// predecessor/successor chain around it.
    fn insert_at(&mut self, node: u32, parent: u32, c: usize) {
        self.link_mut(node, c).prnt = parent;
        if parent == NIL {
            self.root[c] = node;
            self.link_mut(node, c).pred = NIL;
            self.link_mut(node, c).succ = NIL;
        } else if self.cmp_nodes(node, parent, c) == Ordering::Less {
            self.link_mut(parent, c).left = node;
            let pred = self.link(parent, c).pred;
            self.link_mut(node, c).pred = pred;
            self.link_mut(node, c).succ = parent;
        } else {
            self.link_mut(parent, c).rght = node;
            let succ = self.link(parent, c).succ;
            self.link_mut(node, c).pred = parent;
            self.link_mut(node, c).succ = succ;
        }
        self.link_mut(node, c).left = NIL;
        self.link_mut(node, c).rght = NIL;
        let Links { pred, succ, .. } = self.link(node, c);
        self.link_mut(pred, c).succ = node;
        self.link_mut(succ, c).pred = node;
        self.link_mut(node, c).red = true;
        self.restore_insert(node, c);
    }

    /// Restores the red-black properties of the `c`-th tree after an
    /// insertion.
    fn restore_insert(&mut self, mut node: u32, c: usize) {
        while self.is_red(self.link(node, c).prnt, c) {
            let parent = self.link(node, c).prnt;
            let grand = self.link(parent, c).prnt;
            if parent == self.link(grand, c).left {
                let uncle = self.link(grand, c).rght;
                if self.is_red(uncle, c) {
                    self.link_mut(parent, c).red = false;
                    self.link_mut(uncle, c).red = false;
                    self.link_mut(grand, c).red = true;
                    node = grand;
                } else {
                    if node == self.link(parent, c).rght {
                        node = parent;
                        self.rotate_left(node, c);
                    }
                    let parent = self.link(node, c).prnt;
                    let grand = self.link(parent, c).prnt;
                    self.link_mut(parent, c).red = false;
                    self.link_mut(grand, c).red = true;
                    self.rotate_right(grand, c);
                }
            } else {
                let uncle = self.link(grand, c).left;
                if self.is_red(uncle, c) {
                    self.link_mut(parent, c).red = false;
                    self.link_mut(uncle, c).red = false;
                    self.link_mut(grand, c).red = true;
                    node = grand;
                } else {
                    if node == self.link(parent, c).left {
                        node = parent;
                        self.rotate_right(node, c);
                    }
                    let parent = self.link(node, c).prnt;
                    let grand = self.link(parent, c).prnt;
                    self.link_mut(parent, c).red = false;
                    self.link_mut(grand, c).red = true;
                    self.rotate_left(grand, c);
                }
            }
        }
        let root = self.root[c];
        self.link_mut(root, c).red = false;
    }

    /// Unlinks `node` from the `c`-th tree and its threading.
    fn discard(&mut self, node: u32, c: usize) {
        let Links { pred, succ, .. } = self.link(node, c);
        self.link_mut(pred, c).succ = succ;
        self.link_mut(succ, c).pred = pred;
        let fixup;
        let mut removed_red = self.is_red(node, c);
        if self.link(node, c).left == NIL {
            fixup = self.link(node, c).rght;
            self.transplant(node, fixup, c);
        } else if self.link(node, c).rght == NIL {
            fixup = self.link(node, c).left;
            self.transplant(node, fixup, c);
        } else {
            let heir = self.minimum(self.link(node, c).rght, c);
            fixup = self.link(heir, c).rght;
            removed_red = self.is_red(heir, c);
            if self.link(heir, c).prnt != node {
                self.transplant(heir, fixup, c);
                let rght = self.link(node, c).rght;
                self.link_mut(heir, c).rght = rght;
                self.link_mut(rght, c).prnt = heir;
            } else {
                self.link_mut(fixup, c).prnt = heir;
            }
            self.transplant(node, heir, c);
            let left = self.link(node, c).left;
            self.link_mut(heir, c).left = left;
            self.link_mut(left, c).prnt = heir;
            let red = self.is_red(node, c);
            self.link_mut(heir, c).red = red;
        }
        if !removed_red {
            self.restore_discard(fixup, c);
        }
    }

    /// Restores the red-black properties of the `c`-th tree after a
    /// discard, starting the fixup at `node`.
    fn restore_discard(&mut self, mut node: u32, c: usize) {
        while node != self.root[c] && !self.is_red(node, c) {
            let parent = self.link(node, c).prnt;
            if node == self.link(parent, c).left {
                let mut sibling = self.link(parent, c).rght;
                if self.is_red(sibling, c) {
                    self.link_mut(sibling, c).red = false;
                    self.link_mut(parent, c).red = true;
                    self.rotate_left(parent, c);
                    sibling = self.link(self.link(node, c).prnt, c).rght;
                }
                let sl = self.link(sibling, c).left;
                let sr = self.link(sibling, c).rght;
                if !self.is_red(sl, c) && !self.is_red(sr, c) {
                    self.link_mut(sibling, c).red = true;
                    node = self.link(node, c).prnt;
                } else {
                    if !self.is_red(sr, c) {
                        self.link_mut(sl, c).red = false;
                        self.link_mut(sibling, c).red = true;
                        self.rotate_right(sibling, c);
                        sibling = self.link(self.link(node, c).prnt, c).rght;
                    }
                    let parent = self.link(node, c).prnt;
                    let parent_red = self.is_red(parent, c);
                    self.link_mut(sibling, c).red = parent_red;
                    self.link_mut(parent, c).red = false;
                    let sr = self.link(sibling, c).rght;
                    self.link_mut(sr, c).red = false;
                    self.rotate_left(parent, c);
                    node = self.root[c];
                }
            } else {
                let mut sibling = self.link(parent, c).left;
                if self.is_red(sibling, c) {
                    self.link_mut(sibling, c).red = false;
                    self.link_mut(parent, c).red = true;
                    self.rotate_right(parent, c);
                    sibling = self.link(self.link(node, c).prnt, c).left;
                }
                let sl = self.link(sibling, c).left;
                let sr = self.link(sibling, c).rght;
                if !self.is_red(sl, c) && !self.is_red(sr, c) {
                    self.link_mut(sibling, c).red = true;
                    node = self.link(node, c).prnt;
                } else {
                    if !self.is_red(sl, c) {
                        let sr = self.link(sibling, c).rght;
                        self.link_mut(sr, c).red = false;
                        self.link_mut(sibling, c).red = true;
                        self.rotate_left(sibling, c);
                        sibling = self.link(self.link(node, c).prnt, c).left;
                    }
                    let parent = self.link(node, c).prnt;
                    let parent_red = self.is_red(parent, c);
                    self.link_mut(sibling, c).red = parent_red;
                    self.link_mut(parent, c).red = false;
                    let sl = self.link(sibling, c).left;
                    self.link_mut(sl, c).red = false;
                    self.rotate_right(parent, c);
                    node = self.root[c];
                }
            }
        }
        self.link_mut(node, c).red = false;
    }

    /// Replaces the subtree rooted at `from` by the one rooted at `to` in
    /// the eyes of `from`'s parent.
    fn transplant(&mut self, from: u32, to: u32, c: usize) {
        let parent = self.link(from, c).prnt;
        if parent == NIL {
            self.root[c] = to;
        } else if from == self.link(parent, c).left {
            self.link_mut(parent, c).left = to;
        } else {
            self.link_mut(parent, c).rght = to;
        }
        self.link_mut(to, c).prnt = parent;
    }

    fn rotate_left(&mut self, x: u32, c: usize) {
        let y = self.link(x, c).rght;
        debug_assert_ne!(y, NIL);
        let yl = self.link(y, c).left;
        self.link_mut(x, c).rght = yl;
        if yl != NIL {
            self.link_mut(yl, c).prnt = x;
        }
        let parent = self.link(x, c).prnt;
        self.link_mut(y, c).prnt = parent;
        if parent == NIL {
            self.root[c] = y;
        } else if x == self.link(parent, c).left {
            self.link_mut(parent, c).left = y;
        } else {
            self.link_mut(parent, c).rght = y;
        }
        self.link_mut(y, c).left = x;
        self.link_mut(x, c).prnt = y;
    }

    fn rotate_right(&mut self, x: u32, c: usize) {
        let y = self.link(x, c).left;
        debug_assert_ne!(y, NIL);
        let yr = self.link(y, c).rght;
        self.link_mut(x, c).left = yr;
        if yr != NIL {
            self.link_mut(yr, c).prnt = x;
        }
        let parent = self.link(x, c).prnt;
        self.link_mut(y, c).prnt = parent;
        if parent == NIL {
            self.root[c] = y;
        } else if x == self.link(parent, c).left {
            self.link_mut(parent, c).left = y;
        } else {
            self.link_mut(parent, c).rght = y;
        }
        self.link_mut(y, c).rght = x;
        self.link_mut(x, c).prnt = y;
    }

    fn minimum(&self, mut node: u32, c: usize) -> u32 {
        while self.link(node, c).left != NIL {
            node = self.link(node, c).left;
        }
        node
    }
}

/// A lazy walk over one order of a [`MultiPrioritySet`].
pub struct Iter<'a, E> {
    set: &'a MultiPrioritySet<E>,
    at: u32,
    c: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        let next = self.set.link(self.at, self.c).succ;
        if next == NIL {
            return None;
        }
        self.at = next;
        Some(self.set.value(next))
    }
}

/// A walk over one order that can remove the element it rests on.
///
/// Removal drops the element from every order; the cursor then steps back
/// to the predecessor so the walk continues seamlessly.
pub struct Cursor<'a, E> {
    set: &'a mut MultiPrioritySet<E>,
    at: u32,
    c: usize,
    removable: bool,
}

impl<E> Cursor<'_, E> {
    /// Advances to and returns the next element, or `None` at the end.
    pub fn next(&mut self) -> Option<&E> {
        let next = self.set.link(self.at, self.c).succ;
        if next == NIL {
            self.removable = false;
            return None;
        }
        self.at = next;
        self.removable = true;
        Some(self.set.value(next))
    }

    /// Removes the element last returned by [`next`](Cursor::next) from
    /// every order and hands it back.
    ///
    /// # Returns
    /// `None` if no element is currently removable (before the first
    /// `next`, after the end, or directly after a removal).
    pub fn remove(&mut self) -> Option<E> {
        if !self.removable {
            return None;
        }
        let node = self.at;
        self.at = self.set.link(node, self.c).pred;
        self.removable = false;
        Some(self.set.remove_node(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A keyed element whose weight drives the secondary order.
    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct Item {
        key: i32,
        weight: i32,
    }

    fn item(key: i32, weight: i32) -> Item {
        Item { key, weight }
    }

    fn by_weight_desc(a: &Item, b: &Item) -> Ordering {
        b.weight.cmp(&a.weight)
    }

    fn two_order_set() -> MultiPrioritySet<Item> {
        MultiPrioritySet::with_orders(vec![natural::<Item>, by_weight_desc])
    }

    fn keys(set: &MultiPrioritySet<Item>, c: usize) -> Vec<i32> {
        set.iter(c).map(|i| i.key).collect()
    }

    #[test]
    fn order_one_iterates_descending_by_weight() {
        let mut set = two_order_set();
        set.add(item(1, 1));
        set.add(item(5, 5));
        set.add(item(3, 3));
        assert_eq!(keys(&set, 0), vec![1, 3, 5]);
        assert_eq!(keys(&set, 1), vec![5, 3, 1]);
    }

    #[test]
    fn add_rejects_structural_duplicates() {
        let mut set = two_order_set();
        assert!(set.add(item(7, 1)));
        assert!(!set.add(item(7, 99)));
        assert_eq!(set.len(), 1);
        // The duplicate never reached the secondary order either.
        assert_eq!(set.iter(1).count(), 1);
        assert_eq!(set.first(1).unwrap().weight, 1);
    }

    #[test]
    fn integrate_returns_the_canonical_element() {
        let mut set = two_order_set();
        set.add(item(4, 11));
        assert_eq!(set.integrate(item(4, 0)).weight, 11);
        assert_eq!(set.len(), 1);
        assert_eq!(set.integrate(item(9, 2)).weight, 2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn take_hands_the_element_back() {
        let mut set = two_order_set();
        set.add(item(2, 20));
        set.add(item(8, 80));
        let taken = set.take(&item(2, 0)).unwrap();
        assert_eq!(taken.weight, 20);
        assert_eq!(set.len(), 1);
        assert!(!set.contains(&item(2, 0)));
        assert!(set.take(&item(2, 0)).is_none());
        assert_eq!(keys(&set, 1), vec![8]);
    }

    #[test]
    fn remove_drops_from_every_order() {
        let mut set = two_order_set();
        for k in [6, 2, 9, 4, 1] {
            set.add(item(k, k * 10));
        }
        assert!(set.remove(&item(9, 0)));
        assert!(!set.remove(&item(9, 0)));
        assert_eq!(keys(&set, 0), vec![1, 2, 4, 6]);
        assert_eq!(keys(&set, 1), vec![6, 4, 2, 1]);
    }

    /// A larger scripted churn to exercise rebalancing and threading on
    /// both trees.
    #[test]
    fn interleaved_churn_keeps_both_orders_sorted() {
        let mut set = two_order_set();
        let mut expected: Vec<i32> = Vec::new();
        for i in 0..200 {
            let k = (i * 37) % 199;
            if set.add(item(k, -k)) {
                expected.push(k);
            }
        }
        for i in 0..100 {
            let k = (i * 53) % 199;
            if set.remove(&item(k, 0)) {
                expected.retain(|&e| e != k);
            }
        }
        expected.sort_unstable();
        assert_eq!(set.len(), expected.len());
        assert_eq!(keys(&set, 0), expected);
        let mut reversed = expected.clone();
        reversed.reverse();
        assert_eq!(keys(&set, 1), reversed);
    }

    #[test]
    fn cursor_removal_steps_back_and_stays_consistent() {
        let mut set = two_order_set();
        for k in 1..=6 {
            set.add(item(k, k));
        }
        // Walk order 1 (6, 5, .., 1) and drop the even keys.
        let mut cursor = set.cursor(1);
        let mut seen = Vec::new();
        while let Some(it) = cursor.next() {
            let k = it.key;
            seen.push(k);
            if k % 2 == 0 {
                assert_eq!(cursor.remove().unwrap().key, k);
                // A second removal without advancing is refused.
                assert!(cursor.remove().is_none());
            }
        }
        assert_eq!(seen, vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(keys(&set, 0), vec![1, 3, 5]);
        assert_eq!(keys(&set, 1), vec![5, 3, 1]);
    }

    #[test]
    fn clear_resets_to_an_empty_set() {
        let mut set = two_order_set();
        for k in 0..20 {
            set.add(item(k, k));
        }
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter(0).count(), 0);
        assert_eq!(set.iter(1).count(), 0);
        set.add(item(3, 3));
        assert_eq!(keys(&set, 0), vec![3]);
    }

    #[test]
    fn equal_secondary_keys_keep_insertion_order() {
        // All weights equal: the killer order degenerates to FIFO.
        let mut set = two_order_set();
        set.add(item(5, 0));
        set.add(item(1, 0));
        set.add(item(3, 0));
        assert_eq!(keys(&set, 1), vec![5, 1, 3]);
    }

    #[test]
    fn single_order_set_uses_the_natural_order() {
        let mut set: MultiPrioritySet<i32> = MultiPrioritySet::new();
        for v in [4, 1, 3, 2] {
            set.add(v);
        }
        assert_eq!(set.dimensions(), 1);
        assert_eq!(set.iter(0).copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }
}
