use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use clap::Parser;
use springmass::cli::{self, Args};
use springmass::headless;
use springmass::{ChartPlugin, ControlsPlugin, ReadoutPlugin, SchematicPlugin, SimulationPlugin};

const WINDOW_TITLE: &str = "Spring-Mass-Damper System Simulation";

fn main() -> AppExit {
    let args = Args::parse();

    if args.list_integrators {
        cli::handle_list_integrators();
        return AppExit::Success;
    }

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    if let Err(e) = cli::validate_config(&config) {
        eprintln!("Error: {e}");
        return AppExit::error();
    }

    if let Some(path) = &args.write_config {
        return match cli::handle_write_config(&config, path) {
            Ok(()) => AppExit::Success,
            Err(e) => {
                eprintln!("Error: {e}");
                AppExit::error()
            }
        };
    }

    if args.headless {
        headless::init_logging(args.verbose);
        return match headless::run_headless(&config, args.output.as_deref()) {
            Ok(()) => AppExit::Success,
            Err(e) => {
                error!("{e}");
                AppExit::error()
            }
        };
    }

    let mut app = App::new();

    app.add_plugins((
        DefaultPlugins
            .set(LogPlugin {
                level: if args.verbose {
                    Level::DEBUG
                } else {
                    Level::INFO
                },
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: WINDOW_TITLE.to_string(),
                    resolution: WindowResolution::new(1200.0, 760.0),
                    ..default()
                }),
                ..default()
            }),
        SimulationPlugin::with_config(config).with_autostart(args.autostart),
        SchematicPlugin,
        ChartPlugin,
        ReadoutPlugin,
        ControlsPlugin,
    ));

    info!(
        "springmass {} (built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE")
    );

    app.run()
}
