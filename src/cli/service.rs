//! Service selection flags and service ID resolution

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use crate::api::FastlyClient;
use crate::config::ENV_SERVICE_ID;
use crate::errors::{ErrorLog, UsageError};
use crate::manifest::{self, Source};
use crate::output;

pub const FLAG_SERVICE_ID: &str = "--service-id";
pub const FLAG_SERVICE_NAME: &str = "--service-name";

/// Flags shared by every command that targets a single service
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// Service ID (falls back to FASTLY_SERVICE_ID, then fastly.toml)
    #[arg(short, long)]
    pub service_id: Option<String>,

    /// The name of the service
    #[arg(long)]
    pub service_name: Option<String>,

    /// Render output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// A service ID together with where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedService {
    pub id: String,
    pub source: Source,
    pub flag: &'static str,
}

/// Work out which service a command targets.
///
/// Errors are recorded in `err_log` before being returned.
pub async fn service_id(
    args: &ServiceArgs,
    manifest: &manifest::Data,
    client: &FastlyClient,
    err_log: &dyn ErrorLog,
) -> Result<ResolvedService> {
    let resolved = resolve(args, manifest, client).await;
    if let Err(ref err) = resolved {
        err_log.add(err);
    }
    resolved
}

async fn resolve(
    args: &ServiceArgs,
    manifest: &manifest::Data,
    client: &FastlyClient,
) -> Result<ResolvedService> {
    let candidate = manifest.service_id(args.service_id.as_deref());

    if let Some(name) = args.service_name.as_deref() {
        if matches!(candidate, Some((_, Source::Flag))) {
            return Err(UsageError::ServiceIdAndName.into());
        }

        let id = client.service_id_by_name(name).await?;
        return Ok(ResolvedService {
            id,
            source: Source::Flag,
            flag: FLAG_SERVICE_NAME,
        });
    }

    let (id, source) = candidate.ok_or(UsageError::NoServiceId)?;
    Ok(ResolvedService {
        id,
        source,
        flag: FLAG_SERVICE_ID,
    })
}

/// Echo the resolved service ID and its origin
pub fn display_service_id<W: Write>(out: &mut W, service: &ResolvedService) -> io::Result<()> {
    let via = match service.source {
        Source::Flag => service.flag,
        Source::Env => ENV_SERVICE_ID,
        Source::File => manifest::FILENAME,
    };
    output::paragraph(out, &format!("Service ID (via {}): {}", via, service.id))
}
