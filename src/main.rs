//! Demonstration binary for the shelving model.
//!
//! Builds a library from `shelving.toml` (or the built-in defaults when no
//! file is present), registers the tracing-backed event logger, and prints
//! a report of the freshly constructed library. The exercise scenarios that
//! move books around live in the integration tests, not here.

use tracing::info;
use tracing_subscriber::EnvFilter;

use shelving::construct::Library;
use shelving::event::EventLogger;
use shelving::settings::Settings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    let plan = settings.plan();
    let mut library = match Library::new(&settings.library, &plan) {
        Ok(library) => library.with_policy(settings.policy),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    library.register_observer(Box::new(EventLogger));
    info!(
        library = %library.name(),
        shelves = library.shelf_count(),
        capacity = plan.capacity(),
        policy = ?library.policy(),
        "library constructed"
    );

    print!("{}", library.report());
}
