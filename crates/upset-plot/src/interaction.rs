//! Invisible hit regions over pattern rows and code columns.
//!
//! The regions are drawn into the surface so the highlight can address them
//! by id, and kept as a flat list in surface coordinates for hit testing.

use std::collections::HashMap;
use upset_scales::{MarginalCode, Pattern, Scales, Sizes};

use crate::actions::Action;
use crate::color::Color;
use crate::scene::{Bounds, Geometry, IdGen, Node, Paint};

pub const INTERACTION_BOX: &str = "interaction_box";
pub const PATTERN_ROW: &str = "pattern_row";
pub const CODE_COLUMN: &str = "code_col";

const BOX_OPACITY: f64 = 0.8;
const BOX_RADIUS: f64 = 5.0;
const HOVER_STROKE_WIDTH: f64 = 0.8;
const SELECTED_FILL_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Pattern,
    Code,
}

impl ItemKind {
    fn prefix(self) -> &'static str {
        match self {
            ItemKind::Pattern => "pattern",
            ItemKind::Code => "code",
        }
    }
}

/// Id of the region drawn for an item. Dots are stripped so the id stays a
/// valid selector.
pub fn make_id_string(kind: ItemKind, name: &str) -> String {
    format!("{}_{}", kind.prefix(), name.replace('.', ""))
}

#[derive(Debug, Clone, PartialEq)]
pub enum HitItem {
    Pattern(Pattern),
    Code(MarginalCode),
}

impl HitItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            HitItem::Pattern(_) => ItemKind::Pattern,
            HitItem::Code(_) => ItemKind::Code,
        }
    }

    /// Codes reported to the host when the item is highlighted.
    pub fn codes(&self) -> Vec<String> {
        match self {
            HitItem::Pattern(p) => p.code_list(),
            HitItem::Code(m) => vec![m.code.clone()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitTarget {
    pub item: HitItem,
    pub id: String,
}

impl HitTarget {
    pub fn pattern(pattern: &Pattern) -> Self {
        Self {
            id: make_id_string(ItemKind::Pattern, &pattern.pattern),
            item: HitItem::Pattern(pattern.clone()),
        }
    }

    pub fn code(marginal: &MarginalCode) -> Self {
        Self {
            id: make_id_string(ItemKind::Code, &marginal.code),
            item: HitItem::Code(marginal.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub bounds: Bounds,
    pub target: HitTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Enter,
    Leave,
    Click,
}

pub type Handler = fn(&HitTarget) -> Action;

/// Pointer event to action table applied to every region.
#[derive(Debug, Clone)]
pub struct EventBindings {
    handlers: HashMap<PointerKind, Handler>,
}

impl EventBindings {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn on(mut self, kind: PointerKind, handler: Handler) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    pub fn action(&self, kind: PointerKind, target: &HitTarget) -> Option<Action> {
        self.handlers.get(&kind).map(|handler| handler(target))
    }
}

impl Default for EventBindings {
    /// Hover shows the info panels, click toggles the highlight.
    fn default() -> Self {
        Self::empty()
            .on(PointerKind::Enter, |t| Action::HoverEnter { target: t.clone() })
            .on(PointerKind::Leave, |t| Action::HoverLeave { target: t.clone() })
            .on(PointerKind::Click, |t| Action::ToggleHighlight {
                target: t.clone(),
            })
    }
}

// -------------------------------------------------------------------
// Box styles
// -------------------------------------------------------------------

pub fn reset_style(border: Color) -> Paint {
    Paint {
        fill: None,
        fill_opacity: 0.0,
        stroke: Some(border),
        stroke_width: 0.0,
        opacity: BOX_OPACITY,
    }
}

pub fn set_hovered(paint: &mut Paint, hovered: bool) {
    paint.stroke_width = if hovered { HOVER_STROKE_WIDTH } else { 0.0 };
}

pub fn set_selected(paint: &mut Paint) {
    paint.fill = Some(Color::GREY);
    paint.fill_opacity = SELECTED_FILL_OPACITY;
}

// -------------------------------------------------------------------
// Layers
// -------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn add_region(
    g: &mut Node,
    ids: &mut IdGen,
    class: &'static str,
    target: HitTarget,
    translate: (f64, f64),
    size: (f64, f64),
    border: Color,
    origin: (f64, f64),
) -> HitRegion {
    let mut holder = Node::group(ids, class);
    holder.dom_id = Some(target.id.clone());
    holder.translate = translate;
    let rect = holder.ensure_child(
        ids,
        INTERACTION_BOX,
        Geometry::Rect {
            x: 0.0,
            y: 0.0,
            width: size.0.max(0.0),
            height: size.1.max(0.0),
            rx: BOX_RADIUS,
        },
    );
    rect.paint = reset_style(border);
    g.push_child(holder);

    HitRegion {
        bounds: Bounds::new(
            origin.0 + translate.0,
            origin.1 + translate.1,
            size.0.max(0.0),
            size.1.max(0.0),
        ),
        target,
    }
}

/// One row per pattern spanning the whole chart width plus padding.
/// `origin` is the absolute position of `g`.
pub fn pattern_layer(
    g: &mut Node,
    ids: &mut IdGen,
    patterns: &[Pattern],
    scales: &Scales,
    sizes: &Sizes,
    border: Color,
    origin: (f64, f64),
) -> Vec<HitRegion> {
    g.clear_children();
    patterns
        .iter()
        .enumerate()
        .map(|(i, pattern)| {
            add_region(
                g,
                ids,
                PATTERN_ROW,
                HitTarget::pattern(pattern),
                (-sizes.padding, scales.pattern_y.map(i as f64)),
                (sizes.w + 2.0 * sizes.padding, scales.row_height),
                border,
                origin,
            )
        })
        .collect()
}

/// One column per code from the top of the marginal bars to the bottom
/// margin.
pub fn code_layer(
    g: &mut Node,
    ids: &mut IdGen,
    marginals: &[MarginalCode],
    scales: &Scales,
    sizes: &Sizes,
    border: Color,
    origin: (f64, f64),
) -> Vec<HitRegion> {
    g.clear_children();
    marginals
        .iter()
        .map(|marginal| {
            add_region(
                g,
                ids,
                CODE_COLUMN,
                HitTarget::code(marginal),
                (
                    scales.code_x.position(&marginal.code).unwrap_or(0.0),
                    -sizes.padding,
                ),
                (
                    scales.column_width,
                    sizes.h + sizes.margin.bottom + sizes.padding,
                ),
                border,
                origin,
            )
        })
        .collect()
}

/// Hit testing and hover tracking over the current regions.
#[derive(Debug, Clone, Default)]
pub struct InteractionLayer {
    regions: Vec<HitRegion>,
    bindings: EventBindings,
    hovered: Option<HitTarget>,
}

impl InteractionLayer {
    pub fn new(bindings: EventBindings) -> Self {
        Self {
            regions: Vec::new(),
            bindings,
            hovered: None,
        }
    }

    /// Replace every region. The hovered item is forgotten since its
    /// region was redrawn without hover styling.
    pub fn set_regions(&mut self, regions: Vec<HitRegion>) {
        self.regions = regions;
        self.hovered = None;
    }

    pub fn clear(&mut self) {
        self.set_regions(Vec::new());
    }

    pub fn regions(&self) -> &[HitRegion] {
        &self.regions
    }

    pub fn hovered(&self) -> Option<&HitTarget> {
        self.hovered.as_ref()
    }

    /// Topmost region under the point. Later regions are drawn on top.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&HitRegion> {
        self.regions.iter().rev().find(|r| r.bounds.contains(x, y))
    }

    /// Leave and enter actions for a pointer move.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Vec<Action> {
        let under = self.hit_test(x, y).map(|r| r.target.clone());
        if under.as_ref().map(|t| &t.id) == self.hovered.as_ref().map(|t| &t.id) {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if let Some(previous) = self.hovered.take() {
            actions.extend(self.bindings.action(PointerKind::Leave, &previous));
        }
        if let Some(target) = under {
            actions.extend(self.bindings.action(PointerKind::Enter, &target));
            self.hovered = Some(target);
        }
        actions
    }

    pub fn pointer_left(&mut self) -> Vec<Action> {
        match self.hovered.take() {
            Some(previous) => self
                .bindings
                .action(PointerKind::Leave, &previous)
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn click(&self, x: f64, y: f64) -> Option<Action> {
        let region = self.hit_test(x, y)?;
        self.bindings.action(PointerKind::Click, &region.target)
    }
}
