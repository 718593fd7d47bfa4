use std::path::Path;

use anyhow::Result;

use transaction_logs::config::{GeneratorConfig, LOCAL_LOG_DIR};
use transaction_logs::generator;

fn main() -> Result<()> {
    env_logger::init();

    let config = GeneratorConfig::default();
    let mut rng = rand::thread_rng();
    generator::run(&mut rng, &config, Path::new(LOCAL_LOG_DIR))?;

    Ok(())
}
