//! # brdmill
//!
//! Converts XML circuit board layouts into RML command streams for
//! Roland Modela style 2.5-axis desktop mills, so boards can be milled
//! instead of etched.
//!
//! ## Architecture
//!
//! brdmill is organized as a workspace with multiple crates:
//!
//! 1. **brdmill-core** - Board geometry model, units, error types
//! 2. **brdmill-parser** - Board document parsing and circle discretization
//! 3. **brdmill-camtools** - Tool state, RML commands, mill job compilation
//! 4. **brdmill-settings** - Machine and job configuration
//! 5. **brdmill** - Main binary: board discovery, layer menu, job sink

pub mod discovery;
pub mod menu;
pub mod report;
pub mod sink;

pub use brdmill_camtools::{MillJob, MillJobGenerator, MillJobParameters, MillJobStats};
pub use brdmill_core::{Board, DiscoveryError, Error, RangeError, Result};
pub use brdmill_parser::{parse_board, parse_board_str, ParseError};
pub use brdmill_settings::{Config, SettingsError};
pub use discovery::{find_board, open_board, Discovery};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Job parameters taken from the machine section of the configuration
pub fn job_parameters(config: &Config) -> MillJobParameters {
    MillJobParameters {
        travel_velocity: config.machine.travel_velocity,
        z_velocity: config.machine.z_velocity,
        pen_down_z: config.machine.pen_down_z,
        pen_up_z: config.machine.pen_up_z,
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout to command streams and reports
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
