use std::path::PathBuf;
use upset_plot::{demo, load_input};

const DEMO_SEED: u64 = 2024;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let input = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match load_input(&path) {
            Ok(input) => input,
            Err(e) => {
                log::error!("{e}, showing the demo dataset instead");
                demo::dataset(DEMO_SEED)
            }
        },
        None => demo::dataset(DEMO_SEED),
    };

    upset_plot::native::run(input)
}
