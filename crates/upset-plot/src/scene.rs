//! Retained drawing surface.
//!
//! The chart is a tree of [`Node`]s that render passes update in place.
//! Children drawn from data carry an identity key and are reconciled with
//! [`Node::sync_keyed`], so a node keeps its [`NodeId`] for as long as its
//! item stays on screen, whatever its position.

use std::collections::{HashMap, HashSet};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// Hands out node ids unique within one surface.
#[derive(Debug, Default, Clone)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x
            && x <= self.x + self.width
            && y >= self.y
            && y <= self.y + self.height
    }
}

// -------------------------------------------------------------------
// Geometry and paint
// -------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

/// One line of a text block. `dy` is the offset from the previous line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub dy: f64,
    pub font_size: Option<f64>,
}

impl TextLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dy: 0.0,
            font_size: None,
        }
    }

    pub fn below(text: impl Into<String>, dy: f64) -> Self {
        Self {
            dy,
            ..Self::new(text)
        }
    }

    pub fn sized(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub anchor: Anchor,
    /// Vertically center lines on `y` instead of sitting on it.
    pub middle_baseline: bool,
    /// Rotation in degrees about the node origin.
    pub rotate: Option<f64>,
}

pub const DEFAULT_FONT_SIZE: f64 = 10.0;

impl TextBlock {
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self {
            lines,
            x: 0.0,
            y: 0.0,
            font_size: DEFAULT_FONT_SIZE,
            anchor: Anchor::Start,
            middle_baseline: false,
            rotate: None,
        }
    }

    pub fn single(text: impl Into<String>) -> Self {
        Self::new(vec![TextLine::new(text)])
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn sized(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn centered_vertically(mut self) -> Self {
        self.middle_baseline = true;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Plain text of every line, joined by newlines.
    pub fn content(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Vertical position and font size of each line, relative to the node.
    /// A vertically centered block is shifted so its lines straddle `y`.
    pub fn line_positions(&self) -> Vec<(f64, f64)> {
        let mut offset = 0.0;
        let mut positions: Vec<(f64, f64)> = self
            .lines
            .iter()
            .map(|line| {
                offset += line.dy;
                (self.y + offset, line.font_size.unwrap_or(self.font_size))
            })
            .collect();
        if self.middle_baseline {
            let shift = offset / 2.0;
            for (y, _) in &mut positions {
                *y -= shift;
            }
        }
        positions
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Group,
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Text(TextBlock),
}

impl Geometry {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Geometry::Rect {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            rx: 0.0,
        }
    }

    pub fn rounded_rect(width: f64, height: f64, rx: f64) -> Self {
        Geometry::Rect {
            x: 0.0,
            y: 0.0,
            width: width.max(0.0),
            height: height.max(0.0),
            rx,
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Geometry::Line { x1, y1, x2, y2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub fill_opacity: f64,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    /// Applies to the node and everything below it.
    pub opacity: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: None,
            fill_opacity: 1.0,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Self::default()
        }
    }

    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = fill_opacity;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }
}

// -------------------------------------------------------------------
// Node
// -------------------------------------------------------------------

/// Counts from one keyed reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    pub class: &'static str,
    /// Identity of the data item this node was drawn from.
    pub key: Option<String>,
    /// Address for direct lookup, see [`Node::find_by_dom_id`].
    pub dom_id: Option<String>,
    pub translate: (f64, f64),
    pub geometry: Geometry,
    pub paint: Paint,
    children: Vec<Node>,
}

impl Node {
    pub fn new(ids: &mut IdGen, class: &'static str, geometry: Geometry) -> Self {
        Self {
            id: ids.next_id(),
            class,
            key: None,
            dom_id: None,
            translate: (0.0, 0.0),
            geometry,
            paint: Paint::default(),
            children: Vec::new(),
        }
    }

    pub fn group(ids: &mut IdGen, class: &'static str) -> Self {
        Self::new(ids, class, Geometry::Group)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn text(&self) -> Option<&TextBlock> {
        match &self.geometry {
            Geometry::Text(block) => Some(block),
            _ => None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.paint.opacity <= 0.0
    }

    /// First unkeyed child with this class.
    pub fn child(&self, class: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.class == class && c.key.is_none())
    }

    pub fn child_mut(&mut self, class: &str) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .find(|c| c.class == class && c.key.is_none())
    }

    /// Follow a chain of unkeyed child classes.
    pub fn descendant(&self, path: &[&str]) -> Option<&Node> {
        path.iter().try_fold(self, |node, class| node.child(class))
    }

    pub fn descendant_mut(&mut self, path: &[&str]) -> Option<&mut Node> {
        let mut node = self;
        for class in path {
            node = node.child_mut(class)?;
        }
        Some(node)
    }

    /// Keyed children with this class, in drawing order.
    pub fn keyed<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.children
            .iter()
            .filter(move |c| c.class == class && c.key.is_some())
    }

    pub fn keyed_child(&self, class: &str, key: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.class == class && c.key.as_deref() == Some(key))
    }

    /// Return the unkeyed child with this class, creating it when missing,
    /// and set its geometry.
    pub fn ensure_child(
        &mut self,
        ids: &mut IdGen,
        class: &'static str,
        geometry: Geometry,
    ) -> &mut Node {
        let pos = self
            .children
            .iter()
            .position(|c| c.class == class && c.key.is_none());
        match pos {
            Some(i) => {
                let child = &mut self.children[i];
                child.geometry = geometry;
                child
            }
            None => {
                self.children.push(Node::new(ids, class, geometry));
                let last = self.children.len() - 1;
                &mut self.children[last]
            }
        }
    }

    pub fn ensure_group(
        &mut self,
        ids: &mut IdGen,
        class: &'static str,
    ) -> &mut Node {
        self.ensure_child(ids, class, Geometry::Group)
    }

    /// Remove unkeyed children with this class. Returns whether any existed.
    pub fn remove_child(&mut self, class: &str) -> bool {
        let before = self.children.len();
        self.children
            .retain(|c| !(c.class == class && c.key.is_none()));
        before != self.children.len()
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Reconcile the keyed children of `class` with `items`.
    ///
    /// Nodes whose key is still present are updated in place and keep their
    /// id, new keys get a fresh group, and nodes whose key disappeared are
    /// dropped. The keyed children end up in `items` order. `build` is
    /// called for every surviving or new node. Duplicate keys keep their
    /// first occurrence.
    pub fn sync_keyed<T, K, B>(
        &mut self,
        ids: &mut IdGen,
        class: &'static str,
        items: &[T],
        key_fn: K,
        mut build: B,
    ) -> SyncStats
    where
        K: Fn(&T) -> String,
        B: FnMut(&mut Node, &mut IdGen, &T, usize),
    {
        let mut old: HashMap<String, Node> = HashMap::new();
        let mut rest = Vec::with_capacity(self.children.len());
        let mut insert_at = None;

        for child in std::mem::take(&mut self.children) {
            if child.class == class && child.key.is_some() {
                insert_at.get_or_insert(rest.len());
                let key = child.key.clone().unwrap_or_default();
                old.insert(key, child);
            } else {
                rest.push(child);
            }
        }

        let mut stats = SyncStats::default();
        let mut seen = HashSet::new();
        let mut synced = Vec::with_capacity(items.len());

        for (i, item) in items.iter().enumerate() {
            let key = key_fn(item);
            if !seen.insert(key.clone()) {
                log::warn!("duplicate key `{key}` under `{class}`, skipped");
                continue;
            }
            let mut node = match old.remove(&key) {
                Some(node) => {
                    stats.updated += 1;
                    node
                }
                None => {
                    stats.entered += 1;
                    let mut node = Node::group(ids, class);
                    node.key = Some(key);
                    node
                }
            };
            build(&mut node, ids, item, i);
            synced.push(node);
        }
        stats.exited = old.len();

        let at = insert_at.unwrap_or(rest.len());
        let tail = rest.split_off(at);
        rest.extend(synced);
        rest.extend(tail);
        self.children = rest;

        log::trace!(
            "{class}: {} entered, {} updated, {} exited",
            stats.entered,
            stats.updated,
            stats.exited
        );
        stats
    }

    pub fn find_by_dom_id(&self, dom_id: &str) -> Option<&Node> {
        if self.dom_id.as_deref() == Some(dom_id) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|c| c.find_by_dom_id(dom_id))
    }

    pub fn find_by_dom_id_mut(&mut self, dom_id: &str) -> Option<&mut Node> {
        if self.dom_id.as_deref() == Some(dom_id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_by_dom_id_mut(dom_id))
    }

    /// Visit this node and all descendants, parents first.
    pub fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }

    /// Visit this node and all descendants with their absolute origin.
    pub fn walk(&self, origin: (f64, f64), f: &mut dyn FnMut(&Node, (f64, f64))) {
        let here = (origin.0 + self.translate.0, origin.1 + self.translate.1);
        f(self, here);
        for child in &self.children {
            child.walk(here, f);
        }
    }
}

// -------------------------------------------------------------------
// Surface
// -------------------------------------------------------------------

/// Root of the drawing plus its size.
#[derive(Debug, Clone)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    root: Node,
    ids: IdGen,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        let mut ids = IdGen::default();
        let root = Node::group(&mut ids, "svg");
        Self {
            width,
            height,
            root,
            ids,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The root together with the id generator, for passes that add nodes.
    pub fn parts_mut(&mut self) -> (&mut Node, &mut IdGen) {
        (&mut self.root, &mut self.ids)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync(parent: &mut Node, ids: &mut IdGen, keys: &[&str]) -> SyncStats {
        parent.sync_keyed(
            ids,
            "row",
            keys,
            |k| k.to_string(),
            |node, _, k, i| {
                node.translate = (0.0, i as f64 * 10.0);
                node.dom_id = Some(format!("row_{k}"));
            },
        )
    }

    fn ids_by_key(parent: &Node) -> HashMap<String, NodeId> {
        parent
            .keyed("row")
            .map(|n| (n.key.clone().unwrap(), n.id()))
            .collect()
    }

    #[test]
    fn reorder_keeps_node_identity() {
        let mut ids = IdGen::default();
        let mut parent = Node::group(&mut ids, "parent");
        sync(&mut parent, &mut ids, &["A", "B", "C"]);
        let before = ids_by_key(&parent);

        let stats = sync(&mut parent, &mut ids, &["C", "A", "B"]);
        assert_eq!(
            stats,
            SyncStats {
                entered: 0,
                updated: 3,
                exited: 0
            }
        );
        assert_eq!(ids_by_key(&parent), before);
        let order: Vec<&str> = parent
            .keyed("row")
            .map(|n| n.key.as_deref().unwrap())
            .collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        assert_eq!(parent.keyed_child("row", "C").unwrap().translate, (0.0, 0.0));
    }

    #[test]
    fn stale_nodes_removed_and_new_added() {
        let mut ids = IdGen::default();
        let mut parent = Node::group(&mut ids, "parent");
        sync(&mut parent, &mut ids, &["A", "B"]);
        let a = parent.keyed_child("row", "A").unwrap().id();

        let stats = sync(&mut parent, &mut ids, &["A", "D"]);
        assert_eq!(stats.entered, 1);
        assert_eq!(stats.exited, 1);
        assert_eq!(parent.keyed_child("row", "A").unwrap().id(), a);
        assert!(parent.keyed_child("row", "B").is_none());
    }

    #[test]
    fn duplicate_keys_keep_first() {
        let mut ids = IdGen::default();
        let mut parent = Node::group(&mut ids, "parent");
        sync(&mut parent, &mut ids, &["A", "A", "B"]);
        assert_eq!(parent.keyed("row").count(), 2);
        assert_eq!(parent.keyed_child("row", "A").unwrap().translate, (0.0, 0.0));
    }

    #[test]
    fn keyed_children_stay_in_place_among_unkeyed() {
        let mut ids = IdGen::default();
        let mut parent = Node::group(&mut ids, "parent");
        parent.ensure_group(&mut ids, "before");
        sync(&mut parent, &mut ids, &["A"]);
        parent.ensure_group(&mut ids, "after");
        sync(&mut parent, &mut ids, &["B", "A"]);

        let classes: Vec<&str> =
            parent.children().iter().map(|c| c.class).collect();
        assert_eq!(classes, vec!["before", "row", "row", "after"]);
    }

    #[test]
    fn ensure_child_is_idempotent() {
        let mut ids = IdGen::default();
        let mut parent = Node::group(&mut ids, "parent");
        let first = parent.ensure_group(&mut ids, "axis").id();
        let second = parent.ensure_group(&mut ids, "axis").id();
        assert_eq!(first, second);
        assert_eq!(parent.children().len(), 1);
        assert!(parent.remove_child("axis"));
        assert!(!parent.remove_child("axis"));
    }

    #[test]
    fn lookup_by_dom_id_and_absolute_walk() {
        let mut surface = Surface::new(100.0, 100.0);
        let (root, ids) = surface.parts_mut();
        let g = root.ensure_group(ids, "padding");
        g.translate = (5.0, 7.0);
        sync(g, ids, &["A", "B"]);

        assert!(surface.root().find_by_dom_id("row_B").is_some());
        assert!(surface.root().find_by_dom_id("row_Z").is_none());

        let mut origin = None;
        surface.root().walk((0.0, 0.0), &mut |node, at| {
            if node.dom_id.as_deref() == Some("row_B") {
                origin = Some(at);
            }
        });
        assert_eq!(origin, Some((5.0, 17.0)));
    }

    #[test]
    fn centered_block_straddles_anchor() {
        let block = TextBlock::new(vec![
            TextLine::new("one"),
            TextLine::below("two", 20.0).sized(12.0),
        ])
        .at(0.0, 50.0)
        .centered_vertically();
        assert_eq!(block.line_positions(), vec![(40.0, 10.0), (60.0, 12.0)]);
        assert_eq!(block.content(), "one\ntwo");
    }

    #[test]
    fn bounds_contain_edges() {
        let b = Bounds::new(10.0, 10.0, 5.0, 5.0);
        assert!(b.contains(10.0, 15.0));
        assert!(!b.contains(9.9, 12.0));
    }
}
