use std::fs;
use std::io;
use std::net::TcpStream;
use std::path::{Path, PathBuf};

use log::{error, info};
use thiserror::Error;

use crate::config::SftpConfig;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("local file not found: {0}")]
    MissingLocalFile(PathBuf),
    #[error("cannot connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        source: io::Error,
    },
    #[error("SSH session failed: {0}")]
    Session(#[from] ssh2::Error),
    #[error("cannot read local file {path}: {source}")]
    ReadLocal { path: PathBuf, source: io::Error },
    #[error("transfer to {remote} failed: {source}")]
    Transfer { remote: String, source: io::Error },
}

#[derive(Debug, Error)]
#[error("cannot read local directory {path}: {source}")]
pub struct WalkError {
    path: PathBuf,
    source: io::Error,
}

/// Per-file transfer seam. The production implementation speaks SFTP; tests
/// substitute a recording fake.
pub trait Transport {
    fn upload(&mut self, local: &Path, remote: &str) -> Result<(), UploadError>;
}

/// SFTP transport matching the original workflow: one SSH session per file,
/// remote directory created on absence, no retry.
pub struct SftpTransport {
    config: SftpConfig,
}

impl SftpTransport {
    pub fn new(config: SftpConfig) -> Self {
        SftpTransport { config }
    }
}

impl Transport for SftpTransport {
    fn upload(&mut self, local: &Path, remote: &str) -> Result<(), UploadError> {
        if !local.exists() {
            return Err(UploadError::MissingLocalFile(local.to_path_buf()));
        }

        let tcp = TcpStream::connect((self.config.host.as_str(), self.config.port)).map_err(
            |source| UploadError::Connect {
                host: self.config.host.clone(),
                port: self.config.port,
                source,
            },
        )?;
        let mut session = ssh2::Session::new()?;
        session.set_tcp_stream(tcp);
        session.handshake()?;
        session.userauth_pubkey_file(&self.config.user, None, &self.config.private_key, None)?;
        let sftp = session.sftp()?;

        if let Some(parent) = Path::new(remote).parent() {
            if !parent.as_os_str().is_empty() && sftp.stat(parent).is_err() {
                sftp.mkdir(parent, 0o755)?;
            }
        }

        let mut local_file = fs::File::open(local).map_err(|source| UploadError::ReadLocal {
            path: local.to_path_buf(),
            source,
        })?;
        let mut remote_file = sftp.create(Path::new(remote))?;
        io::copy(&mut local_file, &mut remote_file).map_err(|source| UploadError::Transfer {
            remote: remote.to_string(),
            source,
        })?;

        Ok(())
        // session and sftp handles close on drop
    }
}

/// Outcome of one attempted upload.
#[derive(Debug)]
pub struct UploadReport {
    pub local: PathBuf,
    pub remote: String,
    pub outcome: Result<(), UploadError>,
}

/// Walks `base_dir` one level of client subdirectories deep and attempts to
/// upload every regular file to `logs/<clientId>/<filename>`. A failed upload
/// is logged and recorded; the walk continues with the next file.
pub fn upload_tree(
    transport: &mut impl Transport,
    base_dir: &Path,
) -> Result<Vec<UploadReport>, WalkError> {
    let mut reports = Vec::new();

    for client_dir in sorted_entries(base_dir)? {
        if !client_dir.is_dir() {
            continue;
        }
        let client_id = match client_dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };

        for path in sorted_entries(&client_dir)? {
            if !path.is_file() {
                continue;
            }
            let file_name = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };
            let remote = format!("logs/{}/{}", client_id, file_name);

            info!("uploading {} to {}", path.display(), remote);
            let outcome = transport.upload(&path, &remote);
            match &outcome {
                Ok(()) => info!("uploaded {}", remote),
                Err(err) => error!("upload failed for {}: {}", path.display(), err),
            }
            reports.push(UploadReport {
                local: path,
                remote,
                outcome,
            });
        }
    }

    Ok(reports)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, WalkError> {
    let entries = fs::read_dir(dir).map_err(|source| WalkError {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| WalkError {
            path: dir.to_path_buf(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
