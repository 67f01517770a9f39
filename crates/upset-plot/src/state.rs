use crate::actions::{self, Action};
use crate::cache::Cache;
use crate::chart;
use crate::effects::{self, Effect};
use crate::host::HostSink;
use crate::store::Store;

pub struct State {
    pub store: Store,
    pub cache: Cache,
    sink: Option<Box<dyn HostSink>>,
    action_queue: Vec<Action>,
    effect_queue: Vec<Effect>,
}

impl State {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            cache: Cache::new(),
            sink: None,
            action_queue: Vec::new(),
            effect_queue: Vec::new(),
        }
    }

    /// Route host notifications to `sink`. Without one they are dropped.
    pub fn with_sink(mut self, sink: impl HostSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    /// Reduce every queued action, then redraw once if anything asked for
    /// it.
    pub fn flush_actions(&mut self) {
        let actions = std::mem::take(&mut self.action_queue);
        for action in actions {
            let mut effects = actions::update(&mut self.store, action);
            self.effect_queue.append(&mut effects);
        }
        if self.store.needs_render {
            let mut effects = chart::draw_upset(&mut self.store, &mut self.cache);
            self.effect_queue.append(&mut effects);
        }
    }

    pub fn flush_effects(&mut self) {
        let effects = std::mem::take(&mut self.effect_queue);
        for effect in effects {
            effects::run(&mut self.store, &mut self.sink, effect);
        }
    }

    /// Dispatch one action and run everything it caused.
    pub fn apply(&mut self, action: Action) {
        self.dispatch(action);
        self.flush_actions();
        self.flush_effects();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{DATA_WARNING, PADDING, THRESHOLD_WARNING};
    use crate::highlight::Highlight;
    use crate::host::Notification;
    use crate::interaction::INTERACTION_BOX;
    use crate::options::Options;
    use crate::render::fixtures::{marginal, pattern};
    use crate::render::{MATRIX_CHART, RR_INTERVALS};
    use crate::scene::Bounds;
    use std::sync::mpsc::{self, Receiver};
    use upset_scales::Pattern;

    fn data() -> (Vec<Pattern>, Options) {
        let patterns = vec![
            pattern("A-B", 150, Some((0.9, 1.6))),
            pattern("C", 120, None),
            pattern("A-C", 60, Some((1.1, 2.4))),
            pattern("B", 20, Some((0.5, 1.2))),
        ];
        let options = Options {
            marginal_data: vec![marginal("A", 210), marginal("B", 170), marginal("C", 180)],
            min_set_size: 50.0,
            msg_loc: Some("upset_selection".into()),
            ..Options::default()
        };
        (patterns, options)
    }

    fn rendered() -> (State, Receiver<Notification>) {
        let (tx, rx) = mpsc::channel();
        let mut state = State::new(Store::new(900.0, 600.0)).with_sink(tx);
        let (data, options) = data();
        state.apply(Action::Render { data, options });
        (state, rx)
    }

    fn region(state: &State, id: &str) -> Bounds {
        state
            .store
            .interaction
            .regions()
            .iter()
            .find(|r| r.target.id == id)
            .map(|r| r.bounds)
            .unwrap()
    }

    fn center(b: Bounds) -> (f64, f64) {
        (b.x + b.width / 2.0, b.y + b.height / 2.0)
    }

    /// Click just inside the top of a region. Code columns run under the
    /// pattern rows, so their centers are not reachable.
    fn click(state: &mut State, id: &str) {
        let b = region(state, id);
        state.apply(Action::PointerClicked {
            x: b.x + b.width / 2.0,
            y: b.y + 1.0,
        });
    }

    fn shown_rows(state: &State) -> Vec<String> {
        state
            .store
            .surface
            .root()
            .descendant(&[PADDING, MATRIX_CHART])
            .map(|m| m.keyed("matrix_row").filter_map(|r| r.key.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn render_draws_rows_above_threshold() {
        let (state, rx) = rendered();
        assert_eq!(shown_rows(&state), vec!["A-B", "C", "A-C"]);
        assert_eq!(state.store.interaction.regions().len(), 6);
        assert!(state.store.surface.root().descendant(&[PADDING, RR_INTERVALS]).is_some());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn clicking_twice_clears_once() {
        let (mut state, rx) = rendered();
        click(&mut state, "pattern_A-C");
        let selected = rx.try_recv().unwrap();
        assert_eq!(selected.channel, "upset_selection");
        assert_eq!(selected.codes(), ["A".to_string(), "C".to_string()]);

        let holder = state.store.surface.root().find_by_dom_id("pattern_A-C").unwrap();
        assert_eq!(holder.child(INTERACTION_BOX).unwrap().paint.fill_opacity, 0.5);

        click(&mut state, "pattern_A-C");
        assert!(rx.try_recv().unwrap().is_cleared());
        assert!(rx.try_recv().is_err());
        assert_eq!(state.store.view.highlight, Highlight::Unhighlighted);
    }

    #[test]
    fn filtered_out_highlight_is_cleared() {
        let (mut state, rx) = rendered();
        click(&mut state, "pattern_A-C");
        rx.try_recv().unwrap();

        state.apply(Action::SetMinSize { min_size: 100.0 });
        assert_eq!(shown_rows(&state), vec!["A-B", "C"]);
        assert!(rx.try_recv().unwrap().is_cleared());
        assert_eq!(state.store.view.highlight, Highlight::Unhighlighted);
    }

    #[test]
    fn surviving_highlight_is_restored_after_resize() {
        let (mut state, rx) = rendered();
        click(&mut state, "code_B");
        rx.try_recv().unwrap();

        state.apply(Action::Resize { width: 700.0, height: 500.0 });
        assert!(rx.try_recv().is_err());
        let holder = state.store.surface.root().find_by_dom_id("code_B").unwrap();
        assert_eq!(holder.child(INTERACTION_BOX).unwrap().paint.fill_opacity, 0.5);
        assert_eq!(state.store.view.current_min_size, 50.0);
    }

    #[test]
    fn slider_drag_commits_threshold() {
        let (mut state, _rx) = rendered();
        let handle = state.store.slider.as_ref().unwrap().handle_bounds();
        let (x, y) = center(handle);
        state.apply(Action::DragStarted { x, y });
        assert!(state.store.slider.as_ref().unwrap().is_dragging());

        // far past the left end: the largest count
        state.apply(Action::Dragged { x: -1000.0 });
        state.apply(Action::DragEnded);
        assert_eq!(state.store.view.current_min_size, 150.0);
        assert_eq!(shown_rows(&state), vec!["A-B"]);
    }

    #[test]
    fn toggle_hides_singletons() {
        let (mut state, _rx) = rendered();
        let (x, y) = chart::toggle_origin(&state.store);
        state.apply(Action::PointerClicked { x: x + 5.0, y: y + 5.0 });
        assert!(state.store.view.filtering_singletons);
        assert_eq!(shown_rows(&state), vec!["A-B", "A-C"]);
    }

    #[test]
    fn empty_filter_shows_warning_and_keeps_controls() {
        let (mut state, _rx) = rendered();
        state.apply(Action::SetMinSize { min_size: 1000.0 });
        let root = state.store.surface.root();
        assert!(root.child(THRESHOLD_WARNING).is_some());
        assert!(root.descendant(&[PADDING, MATRIX_CHART]).is_none());
        assert!(root.descendant(&[PADDING, chart::SLIDER]).is_some());
        assert!(state.store.interaction.regions().is_empty());

        state.apply(Action::SetMinSize { min_size: 10.0 });
        assert!(state.store.surface.root().child(THRESHOLD_WARNING).is_none());
        assert_eq!(shown_rows(&state).len(), 4);
    }

    #[test]
    fn single_pattern_skips_chart() {
        let mut state = State::new(Store::new(900.0, 600.0));
        state.apply(Action::Render {
            data: vec![pattern("A", 10, None)],
            options: Options::default(),
        });
        let root = state.store.surface.root();
        let text = root.child(DATA_WARNING).and_then(|n| n.text()).unwrap();
        assert!(text.content().starts_with("Only one group meets"));
        assert!(root.child(PADDING).is_none());
        assert!(state.store.slider.is_none());
    }

    #[test]
    fn hover_fills_info_panels() {
        let (mut state, _rx) = rendered();
        let (x, y) = center(region(&state, "pattern_C"));
        state.apply(Action::PointerMoved { x, y });
        let root = state.store.surface.root();
        let panel = root
            .descendant(&[PADDING, chart::RIGHT_INFO_PANEL, "info"])
            .unwrap();
        assert!(!panel.is_hidden());
        assert_eq!(
            panel.child("text").and_then(|t| t.text()).unwrap().content(),
            "RR: 1.20\n(NA, NA)"
        );

        state.apply(Action::PointerLeft);
        let panel = state
            .store
            .surface
            .root()
            .descendant(&[PADDING, chart::RIGHT_INFO_PANEL, "info"])
            .unwrap();
        assert!(panel.is_hidden());
    }
}
