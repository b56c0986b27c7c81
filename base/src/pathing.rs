use std::collections::VecDeque;

use crate::base::{Direction, HashMap, HashSet, Point};

//////////////////////////////////////////////////////////////////////////////

// Heap, used for A*

#[derive(Clone, Copy, Debug, Eq, PartialEq)] struct AStarHeapIndex(i32);
#[derive(Clone, Copy, Debug, Eq, PartialEq)] struct AStarNodeIndex(i32);

const NOT_IN_HEAP: AStarHeapIndex = AStarHeapIndex(-1);
const SOURCE_NODE: AStarNodeIndex = AStarNodeIndex(-1);

// Nodes live in a flat pool and refer to their parent by pool index, so the
// whole search tree is released at once when the heap is dropped.
struct AStarNode {
    distance: i32,
    heuristic: i32,
    index: AStarHeapIndex,
    parent: AStarNodeIndex,
    pos: Point,
}

#[derive(Default)]
struct AStarHeap {
    nodes: Vec<AStarNode>,
    heap: Vec<AStarNodeIndex>,
}

impl AStarNode {
    fn new(pos: Point, parent: AStarNodeIndex, distance: i32, heuristic: i32) -> Self {
        Self { distance, heuristic, index: NOT_IN_HEAP, parent, pos }
    }
}

impl AStarHeap {
    // Heap operations

    fn is_empty(&self) -> bool { self.heap.is_empty() }

    fn extract_min(&mut self) -> AStarNodeIndex {
        let mut index = AStarHeapIndex(0);
        let result = self.get_heap(index);
        self.mut_node(result).index = NOT_IN_HEAP;

        let Some(node) = self.heap.pop() else { return result; };
        if self.is_empty() { return result; }

        let limit = self.heap.len() as i32;
        let (mut c0, mut c1) = Self::children(index);

        while c0.0 < limit {
            let mut child_index = c0;
            if c1.0 < limit && self.less(self.get_heap(c1), self.get_heap(c0)) {
                child_index = c1;
            }
            if !self.less(self.get_heap(child_index), node) { break; }

            self.heap_move(child_index, index);
            (c0, c1) = Self::children(child_index);
            index = child_index;
        }

        self.mut_node(node).index = index;
        self.set_heap(index, node);
        result
    }

    fn heapify(&mut self, n: AStarNodeIndex) {
        let mut index = self.get_node(n).index;

        while index.0 > 0 {
            let parent_index = Self::parent(index);
            if !self.less(n, self.get_heap(parent_index)) { break; }

            self.heap_move(parent_index, index);
            index = parent_index;
        }

        self.mut_node(n).index = index;
        self.set_heap(index, n);
    }

    fn push(&mut self, mut node: AStarNode) -> AStarNodeIndex {
        assert!(node.index == NOT_IN_HEAP);
        node.index = AStarHeapIndex(self.heap.len() as i32);
        let result = AStarNodeIndex(self.nodes.len() as i32);
        self.nodes.push(node);
        self.heap.push(result);
        self.heapify(result);
        result
    }

    // Ordering: lowest f = g + h first. Ties go to the lower h (the node
    // nearer the goal), then to the node created first. Node indices are
    // unique, so this is a total order and extraction is deterministic.
    fn less(&self, a: AStarNodeIndex, b: AStarNodeIndex) -> bool {
        let (na, nb) = (self.get_node(a), self.get_node(b));
        let ka = (na.distance + na.heuristic, na.heuristic, a.0);
        let kb = (nb.distance + nb.heuristic, nb.heuristic, b.0);
        ka < kb
    }

    // Lower-level helpers

    fn heap_move(&mut self, from: AStarHeapIndex, to: AStarHeapIndex) {
        let node = self.get_heap(from);
        self.mut_node(node).index = to;
        self.set_heap(to, node);
    }

    fn get_heap(&self, h: AStarHeapIndex) -> AStarNodeIndex {
        self.heap[h.0 as usize]
    }

    fn set_heap(&mut self, h: AStarHeapIndex, n: AStarNodeIndex) {
        self.heap[h.0 as usize] = n;
    }

    fn get_node(&self, n: AStarNodeIndex) -> &AStarNode {
        &self.nodes[n.0 as usize]
    }

    fn mut_node(&mut self, n: AStarNodeIndex) -> &mut AStarNode {
        &mut self.nodes[n.0 as usize]
    }

    fn parent(h: AStarHeapIndex) -> AStarHeapIndex {
        AStarHeapIndex((h.0 - 1) / 2)
    }

    fn children(h: AStarHeapIndex) -> (AStarHeapIndex, AStarHeapIndex) {
        (AStarHeapIndex(2 * h.0 + 1), AStarHeapIndex(2 * h.0 + 2))
    }
}

//////////////////////////////////////////////////////////////////////////////

// A* for pathfinding to a known target

// Unit-cost, 4-connected A* with a Manhattan heuristic. Returns the path
// from source (exclusive) to target (inclusive): empty if source == target,
// None if target is unreachable. `check` reports whether a cell is passable;
// the source itself is never checked.
#[allow(non_snake_case)]
pub fn AStar<F: Fn(Point) -> bool>(
        source: Point, target: Point, check: F) -> Option<Vec<Point>> {
    let mut map = HashMap::default();
    let mut heap = AStarHeap::default();

    let node = AStarNode::new(source, SOURCE_NODE, 0, source.distance(target));
    map.insert(source, heap.push(node));

    while !heap.is_empty() {
        let prev = heap.extract_min();
        let prev_pos = heap.get_node(prev).pos;
        let prev_distance = heap.get_node(prev).distance;
        if prev_pos == target {
            let mut result = vec![];
            let mut current = heap.get_node(prev);
            while current.parent != SOURCE_NODE {
                result.push(current.pos);
                current = heap.get_node(current.parent);
            }
            result.reverse();
            return Some(result);
        }

        for dir in &Direction::CARDINAL {
            let next = prev_pos + dir.delta();
            if !check(next) { continue; }

            let distance = prev_distance + 1;
            map.entry(next).and_modify(|x| {
                // Extracted nodes (index == NOT_IN_HEAP) are closed. Manhattan
                // distance is consistent, so they never need reopening.
                let existing = heap.mut_node(*x);
                if existing.index != NOT_IN_HEAP && existing.distance > distance {
                    existing.distance = distance;
                    existing.parent = prev;
                    heap.heapify(*x);
                }
            }).or_insert_with(|| {
                let node = AStarNode::new(next, prev, distance, next.distance(target));
                heap.push(node)
            });
        }
    }

    None
}

//////////////////////////////////////////////////////////////////////////////

// BFS (breadth-first search)

// Searches outward from source, tagging every frontier cell with the first
// step taken out of source. The tag of the first dequeued cell satisfying
// `target` is returned: whichever initial branch reaches it first wins, in
// Direction::CARDINAL order on equal lengths.
#[allow(non_snake_case)]
pub fn BFS<F: Fn(Point) -> bool, G: Fn(Point) -> bool>(
        source: Point, target: F, check: G) -> Option<Direction> {
    let mut visited = HashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(source);

    for dir in Direction::CARDINAL {
        let next = source + dir.delta();
        if !check(next) || !visited.insert(next) { continue; }
        queue.push_back((next, dir));
    }

    while let Some((point, dir)) = queue.pop_front() {
        if target(point) { return Some(dir); }

        for step in &Direction::CARDINAL {
            let next = point + step.delta();
            if !check(next) || !visited.insert(next) { continue; }
            queue.push_back((next, dir));
        }
    }

    None
}

// Counts the cells reachable from source, including source itself.
#[allow(non_snake_case)]
pub fn FloodFill<F: Fn(Point) -> bool>(source: Point, check: F) -> usize {
    let mut visited = HashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(source);
    queue.push_back(source);

    while let Some(point) = queue.pop_front() {
        for dir in &Direction::CARDINAL {
            let next = point + dir.delta();
            if !check(next) || !visited.insert(next) { continue; }
            queue.push_back(next);
        }
    }

    visited.len()
}

//////////////////////////////////////////////////////////////////////////////
