use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::entry::EntryKind;
use crate::error::HfindError;
use crate::fs::{FileStatus, FileSystem};

// ---------------------------------------------------------------------------
// WebHdfsClient
// ---------------------------------------------------------------------------

/// Blocking client for the WebHDFS REST API.
///
/// One `GETFILESTATUS` / `LISTSTATUS` / `DELETE` round-trip per call, no
/// retries and no request timeout: a call either returns or the run fails.
/// The configured user is passed as the `user.name` query parameter on every
/// request.
pub struct WebHdfsClient {
    http: Client,
    base: Url,
    user: Option<String>,
}

impl WebHdfsClient {
    pub fn new(namenode_url: &str, user: Option<String>) -> Result<Self, HfindError> {
        let base = Url::parse(namenode_url)
            .map_err(|e| HfindError::Config(format!("bad namenode url {namenode_url}: {e}")))?;
        let http = Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| HfindError::Connection(e.to_string()))?;
        Ok(Self { http, base, user })
    }

    fn op_url(&self, path: &Path, op: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("/webhdfs/v1{}", path.to_string_lossy()));
        url.query_pairs_mut().append_pair("op", op);
        if let Some(user) = &self.user {
            url.query_pairs_mut().append_pair("user.name", user);
        }
        url
    }

    fn get(&self, path: &Path, op: &str) -> Result<Response, HfindError> {
        let response = self
            .http
            .get(self.op_url(path, op))
            .send()
            .map_err(connection_error)?;
        check(path, response)
    }
}

impl FileSystem for WebHdfsClient {
    fn stat(&self, path: &Path) -> Result<FileStatus, HfindError> {
        let envelope: FileStatusEnvelope = self
            .get(path, "GETFILESTATUS")?
            .json()
            .map_err(connection_error)?;
        Ok(envelope.file_status.into_status())
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>, HfindError> {
        let envelope: ListStatusEnvelope = self
            .get(path, "LISTSTATUS")?
            .json()
            .map_err(connection_error)?;
        let mut children: Vec<PathBuf> = envelope
            .file_statuses
            .file_status
            .into_iter()
            .map(|status| path.join(status.path_suffix))
            .collect();
        children.sort();
        Ok(children)
    }

    fn delete(&self, path: &Path) -> Result<(), HfindError> {
        let response = self
            .http
            .delete(self.op_url(path, "DELETE"))
            .send()
            .map_err(connection_error)?;
        let body: BooleanEnvelope = check(path, response)?.json().map_err(connection_error)?;
        if body.boolean {
            Ok(())
        } else {
            // The store answered but declined, e.g. a non-empty directory
            // without recursive delete. Soft failure.
            Err(HfindError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("delete refused by backing store"),
            })
        }
    }
}

fn connection_error(e: reqwest::Error) -> HfindError {
    HfindError::Connection(e.to_string())
}

/// Map HTTP failure statuses to the walker's error taxonomy: 404 and
/// 401/403 are per-entry conditions, everything else carries the remote
/// exception message.
fn check(path: &Path, response: Response) -> Result<Response, HfindError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::NOT_FOUND => Err(HfindError::NotFound(path.to_path_buf())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(HfindError::PermissionDenied(path.to_path_buf()))
        }
        _ => {
            let message = response
                .json::<RemoteExceptionEnvelope>()
                .map(|envelope| envelope.remote_exception.message)
                .unwrap_or_else(|_| status.to_string());
            Err(HfindError::Backend {
                status: status.as_u16(),
                message,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FileStatusEnvelope {
    file_status: StatusBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListStatusEnvelope {
    file_statuses: StatusList,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StatusList {
    file_status: Vec<StatusBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    length: u64,
    modification_time: i64,
    owner: String,
    group: String,
    /// Octal string, e.g. "644" or "1777".
    permission: String,
    #[serde(default)]
    path_suffix: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RemoteExceptionEnvelope {
    remote_exception: RemoteException,
}

#[derive(Debug, Deserialize)]
struct RemoteException {
    message: String,
}

#[derive(Debug, Deserialize)]
struct BooleanEnvelope {
    boolean: bool,
}

impl StatusBody {
    fn into_status(self) -> FileStatus {
        let kind = if self.kind == "DIRECTORY" {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        FileStatus {
            kind,
            size: self.length,
            modified: DateTime::from_timestamp_millis(self.modification_time)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            owner: self.owner,
            group: self.group,
            permissions: u32::from_str_radix(&self.permission, 8).unwrap_or(0) & 0o7777,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
