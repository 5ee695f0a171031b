use eframe::egui;
use polymask::app::PolymaskApp;
use polymask::config::{CliArgs, USAGE};

fn main() {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{USAGE}");
        return;
    }

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load configuration: {e}");
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.to_level_filter().as_str()),
    )
    .init();
    log::info!("{} images in the gallery", config.images.len());

    let title = "polymask";
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(title),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        title,
        options,
        Box::new(move |cc| Ok(Box::new(PolymaskApp::new(cc, config)))),
    ) {
        eprintln!("Application error: {e}");
        std::process::exit(1);
    }
}
