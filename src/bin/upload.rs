use std::path::Path;

use anyhow::Result;
use log::info;

use transaction_logs::config::{LOCAL_LOG_DIR, SftpConfig};
use transaction_logs::uploader::{self, SftpTransport};

fn main() -> Result<()> {
    env_logger::init();

    let config = SftpConfig::from_env()?;
    let mut transport = SftpTransport::new(config);
    let reports = uploader::upload_tree(&mut transport, Path::new(LOCAL_LOG_DIR))?;

    let failed = reports.iter().filter(|r| r.outcome.is_err()).count();
    info!("{} files uploaded, {} failed", reports.len() - failed, failed);

    Ok(())
}
