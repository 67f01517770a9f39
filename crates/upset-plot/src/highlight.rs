use crate::color::Color;
use crate::interaction::{self, INTERACTION_BOX};
use crate::scene::Node;

/// The single selected pattern or code, addressed by region id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Unhighlighted,
    Highlighted(String),
}

/// What a transition means for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightChange {
    Selected { id: String, codes: Vec<String> },
    Cleared,
    Unchanged,
}

impl Highlight {
    pub fn id(&self) -> Option<&str> {
        match self {
            Highlight::Unhighlighted => None,
            Highlight::Highlighted(id) => Some(id),
        }
    }

    /// Click on an item: the same item toggles off, any other item takes
    /// over.
    pub fn click(&mut self, id: &str, codes: Vec<String>) -> HighlightChange {
        if self.id() == Some(id) {
            *self = Highlight::Unhighlighted;
            HighlightChange::Cleared
        } else {
            *self = Highlight::Highlighted(id.to_string());
            HighlightChange::Selected {
                id: id.to_string(),
                codes,
            }
        }
    }

    /// Check the highlight against a freshly drawn view. A highlight whose
    /// region disappeared is cleared.
    pub fn reapply(&mut self, exists: impl Fn(&str) -> bool) -> HighlightChange {
        let Some(id) = self.id() else {
            return HighlightChange::Unchanged;
        };
        if exists(id) {
            return HighlightChange::Unchanged;
        }
        log::debug!("highlighted `{id}` left the view");
        *self = Highlight::Unhighlighted;
        HighlightChange::Cleared
    }
}

/// Reset every interaction box below `root`, then mark the highlighted one.
/// Returns whether the highlighted region was found.
pub fn apply_styles(root: &mut Node, highlight: &Highlight, border: Color) -> bool {
    root.for_each_mut(&mut |node| {
        if node.class == INTERACTION_BOX {
            let hovered = node.paint.stroke_width > 0.0;
            node.paint = interaction::reset_style(border);
            interaction::set_hovered(&mut node.paint, hovered);
        }
    });

    let Some(id) = highlight.id() else {
        return false;
    };
    match root
        .find_by_dom_id_mut(id)
        .and_then(|holder| holder.child_mut(INTERACTION_BOX))
    {
        Some(rect) => {
            interaction::set_selected(&mut rect.paint);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::pattern_layer;
    use crate::render::fixtures::Fixture;
    use crate::scene::IdGen;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn click_same_item_twice_clears_once() {
        let mut h = Highlight::default();
        assert_eq!(
            h.click("pattern_A-B", codes(&["A", "B"])),
            HighlightChange::Selected {
                id: "pattern_A-B".into(),
                codes: codes(&["A", "B"])
            }
        );
        assert_eq!(h.click("pattern_A-B", codes(&["A", "B"])), HighlightChange::Cleared);
        assert_eq!(h, Highlight::Unhighlighted);
    }

    #[test]
    fn click_other_item_replaces() {
        let mut h = Highlight::Highlighted("code_A".into());
        let change = h.click("code_B", codes(&["B"]));
        assert!(matches!(change, HighlightChange::Selected { ref id, .. } if id == "code_B"));
        assert_eq!(h.id(), Some("code_B"));
    }

    #[test]
    fn reapply_clears_missing_highlight() {
        let mut h = Highlight::Highlighted("pattern_C".into());
        assert_eq!(h.reapply(|id| id == "pattern_C"), HighlightChange::Unchanged);
        assert_eq!(h.reapply(|_| false), HighlightChange::Cleared);
        assert_eq!(h.reapply(|_| false), HighlightChange::Unchanged);
    }

    #[test]
    fn styles_follow_highlight() {
        let f = Fixture::standard();
        let mut ids = IdGen::default();
        let mut root = Node::group(&mut ids, "svg");
        pattern_layer(
            root.ensure_group(&mut ids, "pattern_interaction_layer"),
            &mut ids,
            &f.patterns,
            &f.scales,
            &f.sizes,
            Color::GREY,
            (0.0, 0.0),
        );

        let selected = Highlight::Highlighted("pattern_B".into());
        assert!(apply_styles(&mut root, &selected, Color::GREY));
        let fill = |root: &Node, id: &str| {
            root.find_by_dom_id(id)
                .and_then(|h| h.child(INTERACTION_BOX))
                .map(|r| r.paint.fill_opacity)
                .unwrap()
        };
        assert_eq!(fill(&root, "pattern_B"), 0.5);
        assert_eq!(fill(&root, "pattern_A-C"), 0.0);

        assert!(!apply_styles(&mut root, &Highlight::Unhighlighted, Color::GREY));
        assert_eq!(fill(&root, "pattern_B"), 0.0);
        assert!(!apply_styles(
            &mut root,
            &Highlight::Highlighted("pattern_Z".into()),
            Color::GREY
        ));
    }
}
