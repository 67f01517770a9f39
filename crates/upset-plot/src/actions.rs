use std::path::PathBuf;
use upset_scales::Pattern;

use crate::chart;
use crate::effects::{self, Effect};
use crate::highlight::{self, HighlightChange};
use crate::interaction::HitTarget;
use crate::options::Options;
use crate::store::Store;
use crate::toggle;

/// Actions that can be dispatched to modify the chart state
#[derive(Debug, Clone)]
pub enum Action {
    // Host lifecycle
    /// New data and options from the host
    Render { data: Vec<Pattern>, options: Options },
    /// Viewport size changed
    Resize { width: f64, height: f64 },

    // Raw pointer input, in surface coordinates
    PointerMoved { x: f64, y: f64 },
    PointerLeft,
    PointerClicked { x: f64, y: f64 },
    DragStarted { x: f64, y: f64 },
    Dragged { x: f64 },
    DragEnded,

    // Chart interactions
    /// Pointer entered a pattern row or code column
    HoverEnter { target: HitTarget },
    /// Pointer left a pattern row or code column
    HoverLeave { target: HitTarget },
    /// Click on a pattern row or code column
    ToggleHighlight { target: HitTarget },
    /// Start dragging the threshold handle
    SliderGrab,
    /// Commit a new minimum pattern size
    SetMinSize { min_size: f64 },
    /// Flip the single-code pattern filter
    ToggleSingletons,

    // File Operations
    /// Write the current drawing as SVG
    ExportSvg { path: PathBuf },
    /// Clear any error message
    ClearErrorMessage,
}

/// Apply a single action to modify the store state
pub fn update(store: &mut Store, action: Action) -> Vec<Effect> {
    match action {
        Action::Render { data, options } => {
            store.load_dataset(data, options);
            vec![]
        }
        Action::Resize { width, height } => {
            store.resize(width, height);
            vec![]
        }

        Action::PointerMoved { x, y } => {
            let follow_ups = store.interaction.pointer_moved(x, y);
            update_all(store, follow_ups)
        }
        Action::PointerLeft => {
            let follow_ups = store.interaction.pointer_left();
            update_all(store, follow_ups)
        }
        Action::PointerClicked { x, y } => {
            let (ox, oy) = chart::toggle_origin(store);
            // the toggle is drawn along with the slider
            if store.slider.is_some() && toggle::toggle_bounds().contains(x - ox, y - oy) {
                return update(store, Action::ToggleSingletons);
            }
            match store.interaction.click(x, y) {
                Some(follow_up) => update(store, follow_up),
                None => vec![],
            }
        }
        Action::DragStarted { x, y } => {
            let on_handle = store
                .slider
                .as_ref()
                .is_some_and(|s| s.handle_bounds().contains(x, y));
            if on_handle {
                update(store, Action::SliderGrab)
            } else {
                vec![]
            }
        }
        Action::Dragged { x } => {
            if let Some(slider) = store.slider.as_mut()
                && slider.is_dragging()
            {
                slider.drag_to(x - slider.origin.0);
                chart::redraw_slider(store);
            }
            vec![]
        }
        Action::DragEnded => {
            let committed = store.slider.as_mut().and_then(|s| s.release());
            chart::redraw_slider(store);
            match committed {
                Some(min_size) => update(store, Action::SetMinSize { min_size }),
                None => vec![],
            }
        }

        Action::HoverEnter { target } => {
            chart::show_hover(store, &target);
            vec![]
        }
        Action::HoverLeave { target } => {
            chart::hide_hover(store, &target);
            vec![]
        }
        Action::ToggleHighlight { target } => {
            let change = store.view.highlight.click(&target.id, target.item.codes());
            let border = store.palette.interaction_box_border;
            let (root, _) = store.surface.parts_mut();
            highlight::apply_styles(root, &store.view.highlight, border);
            match change {
                HighlightChange::Selected { codes, .. } => {
                    vec![effects::notify_highlight(store.channel(), codes)]
                }
                HighlightChange::Cleared => {
                    vec![effects::notify_highlight(store.channel(), Vec::new())]
                }
                HighlightChange::Unchanged => vec![],
            }
        }
        Action::SliderGrab => {
            if let Some(slider) = store.slider.as_mut() {
                slider.grab();
            }
            chart::redraw_slider(store);
            vec![]
        }
        Action::SetMinSize { min_size } => {
            if store.view.current_min_size != min_size {
                log::debug!("threshold set to {min_size}");
                store.view.current_min_size = min_size;
            }
            store.needs_render = true;
            vec![]
        }
        Action::ToggleSingletons => {
            store.view.filtering_singletons = !store.view.filtering_singletons;
            store.needs_render = true;
            vec![]
        }

        // File Operations
        Action::ExportSvg { path } => vec![Effect::WriteSvg { path }],
        Action::ClearErrorMessage => {
            store.error_message = None;
            vec![]
        }
    }
}

fn update_all(store: &mut Store, actions: Vec<Action>) -> Vec<Effect> {
    actions
        .into_iter()
        .flat_map(|action| update(store, action))
        .collect()
}
