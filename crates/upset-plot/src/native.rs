use crate::input::ChartInput;
use crate::viewer::create_app;

/// Entry point used by the native executable.
pub fn run(input: ChartInput) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Upset Plot",
        native_options,
        Box::new(|cc| Ok(Box::new(create_app(cc, input)))),
    )
}
