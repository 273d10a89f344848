use std::path::Path;
use std::process::Command;
use std::process::Stdio;

use itertools::Itertools;
use log::info;

use crate::error::Error;
use crate::error::Result;
use crate::schema::FileFormat;
use crate::schema::Stream;

pub const DEFAULT_PLAYER: &str = "/usr/bin/mpv";

/// Looks up the stream file for `format` and hands the terminal to `player`
/// until it exits.
pub fn play_stream(stream: &Stream, format: FileFormat, player: &Path) -> Result<()> {
    let url = stream.url(format).ok_or_else(|| Error::FormatNotFound {
        format: format.to_string(),
        available: stream.urls().keys().join(", "),
    })?;

    info!("Running {player:?} {url:?}");
    let status = Command::new(player)
        .arg(url)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| Error::PlayerLaunch {
            player: player.display().to_string(),
            source,
        })?;
    if !status.success() {
        return Err(Error::PlayerExit(status));
    }
    Ok(())
}
