use upset_scales::{Margins, Pattern, starting_min_size};

use crate::highlight::Highlight;
use crate::interaction::InteractionLayer;
use crate::options::{Options, Palette};
use crate::scene::Surface;
use crate::slider::Slider;
use crate::versioned::Versioned;

/// Host input: the patterns and the options they came with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub patterns: Vec<Pattern>,
    pub options: Options,
}

/// Filter and selection state changed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub current_min_size: f64,
    pub filtering_singletons: bool,
    pub highlight: Highlight,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_min_size: crate::options::DEFAULT_MIN_SET_SIZE,
            filtering_singletons: false,
            highlight: Highlight::Unhighlighted,
        }
    }
}

pub struct Store {
    pub dataset: Versioned<Dataset>,
    pub viewport: (f64, f64),
    pub margins: Margins,
    pub view: ViewState,
    pub palette: Palette,
    pub surface: Surface,
    pub interaction: InteractionLayer,
    /// Present while the chart body is drawn.
    pub slider: Option<Slider>,
    /// Set when data, size or filter state changed since the last draw.
    pub needs_render: bool,
    pub error_message: Option<String>,
}

impl Store {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            dataset: Versioned::new(Dataset::default()),
            viewport: (width, height),
            margins: Margins::default(),
            view: ViewState::default(),
            palette: Palette::default(),
            surface: Surface::new(width, height),
            interaction: InteractionLayer::default(),
            slider: None,
            needs_render: false,
            error_message: None,
        }
    }

    /// Take a new dataset. The threshold restarts from the options; the
    /// singleton filter and the highlight carry over.
    pub fn load_dataset(&mut self, patterns: Vec<Pattern>, options: Options) {
        self.view.current_min_size = starting_min_size(&patterns, options.min_set_size);
        self.palette = Palette::resolve(&options.colors);
        log::debug!(
            "new dataset: {} patterns, {} codes, starting threshold {}",
            patterns.len(),
            options.marginal_data.len(),
            self.view.current_min_size
        );
        self.dataset.set(Dataset { patterns, options });
        self.needs_render = true;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if self.viewport == (width, height) {
            return;
        }
        self.viewport = (width, height);
        self.surface.resize(width, height);
        self.needs_render = true;
    }

    /// Host channel for notifications.
    pub fn channel(&self) -> &str {
        self.dataset.get().options.channel()
    }

    /// Absolute position of the chart body group.
    pub fn body_origin(&self) -> (f64, f64) {
        (self.margins.left, self.margins.top)
    }
}
