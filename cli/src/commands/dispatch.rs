use anyhow::bail;
use colored::*;

use crate::mprint;
use crate::terminal::{colors, print};
use lanward_common::config::Config;
use lanward_common::success;
use lanward_core::actions::AdminCommand;
use lanward_core::api::AdminResponse;
use lanward_core::backend::{AdminBackend, HttpBackend};

pub fn backend(cfg: &Config) -> anyhow::Result<HttpBackend> {
    HttpBackend::new(cfg.clone())
}

/// Sends `cmd`, or prints it when running dry.
pub async fn submit(cmd: AdminCommand, cfg: &Config) -> anyhow::Result<()> {
    if cfg.dry_run {
        print_request(&cmd, cfg)?;
        return Ok(());
    }

    let backend: HttpBackend = backend(cfg)?;
    let resp: AdminResponse = submit_with(&backend, &cmd).await?;
    success!("{}", resp.text());
    Ok(())
}

/// A `success: false` answer becomes an error.
pub async fn submit_with<B>(backend: &B, cmd: &AdminCommand) -> anyhow::Result<AdminResponse>
where
    B: AdminBackend + ?Sized,
{
    let resp: AdminResponse = backend.send(cmd).await?;
    if !resp.success {
        bail!("{} '{}' rejected: {}", cmd.module, cmd.request.action, resp.text());
    }
    Ok(resp)
}

pub fn print_request(cmd: &AdminCommand, cfg: &Config) -> anyhow::Result<()> {
    print::header("dry run", cfg.quiet);
    print::aligned_line(
        "POST",
        cfg.url(&cmd.module.endpoint()).color(colors::ACCENT),
    );
    mprint!();
    print::json_block(&cmd.body()?);
    Ok(())
}
