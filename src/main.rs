use SurfKin::Examples::surface_examples::surface_examples;
use SurfKin::Utils::logger::init_logger;
use SurfKin::settings::KineticsSettings;
use log::{LevelFilter, error};

/// usage: SurfKin [task] [settings.json]
pub fn main() {
    let mut args = std::env::args().skip(1);
    let task: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(2);
    let settings = match args.next() {
        Some(path) => match KineticsSettings::from_file(&path) {
            Ok(s) => s,
            Err(e) => {
                init_logger(LevelFilter::Info);
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => KineticsSettings::default(),
    };
    init_logger(settings.level_filter().unwrap_or(LevelFilter::Info));
    if let Err(e) = surface_examples(task, &settings.surface_solver) {
        error!("example {} failed: {}", task, e);
        std::process::exit(1);
    }
}
