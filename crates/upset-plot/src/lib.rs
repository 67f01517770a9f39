pub mod actions;
pub mod cache;
pub mod chart;
pub mod color;
pub mod demo;
pub mod effects;
pub mod export;
pub mod highlight;
pub mod host;
pub mod info_panel;
pub mod input;
pub mod interaction;
pub mod native;
pub mod options;
pub mod render;
pub mod scene;
pub mod slider;
pub mod state;
pub mod store;
pub mod toggle;
pub mod versioned;
pub mod viewer;

pub use actions::Action;
pub use input::{ChartInput, LoadError, load_input};
pub use state::State;
pub use store::Store;
