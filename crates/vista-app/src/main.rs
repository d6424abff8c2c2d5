//! `vista [-h] [-w WIDTH HEIGHT] [--log-level L] [--config DIR] <model>`

use tracing::error;
use vista_config::{CliArgs, Config, default_config_dir, default_log_dir};

fn main() {
    let args = match CliArgs::from_env() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    if args.help {
        println!("{}", CliArgs::usage());
    }

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    vista_log::init_logging(
        Some(&default_log_dir(&config_dir)),
        cfg!(debug_assertions),
        Some(&config),
    );

    let result = vista_app::load_scene(&config).and_then(|scene| vista_app::run(config, scene));
    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
