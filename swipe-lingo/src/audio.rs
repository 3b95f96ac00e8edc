use std::process::Stdio;

use tokio::process::Command;

/// Plays `url` with the configured player in the background. The outcome is
/// only logged; playback never affects the card.
pub fn play(player: &[String], url: &str) {
    let Some((program, args)) = player.split_first() else {
        tracing::warn!("no audio player configured");
        return;
    };
    let mut command = Command::new(program);
    command
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    let program = program.clone();
    let url = url.to_owned();
    tokio::spawn(async move {
        match command.status().await {
            Ok(status) if status.success() => tracing::debug!(%url, "pronunciation played"),
            Ok(status) => tracing::warn!(%program, %url, %status, "audio player failed"),
            Err(error) => tracing::warn!(%program, %error, "failed to start audio player"),
        }
    });
}
