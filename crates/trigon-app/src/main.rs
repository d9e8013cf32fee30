use std::path::{Path, PathBuf};

use anyhow::Result;

use trigon_engine::config::AppConfig;
use trigon_engine::logging::init_logging;
use trigon_engine::window::Runtime;

fn main() -> Result<()> {
    let mut config = AppConfig::default();
    config.shader.path = shader_path(&config.shader.path);

    init_logging(config.logging.clone());
    log::info!("shader artifact: {}", config.shader.path.display());

    Runtime::run(config)
}

/// Resolves the shader against the working directory first, then against the
/// crate directory so `cargo run` works from the workspace root.
fn shader_path(relative: &Path) -> PathBuf {
    if relative.exists() {
        return relative.to_path_buf();
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}
