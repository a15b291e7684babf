//! Adhan playback. Fire-and-forget: nothing here blocks the tick loop and
//! playback failures are only logged.
//!
//! Nothing is written to stdout, which carries the event stream.

use salah_core::storage::ChimeConfig;
use salah_core::Prayer;
use std::io::Write;

const BELL: &[u8] = b"\x07";

pub struct Chime {
    enabled: bool,
    command: Option<Vec<String>>,
}

impl Chime {
    pub fn from_config(config: &ChimeConfig) -> Self {
        let command = config
            .command
            .as_deref()
            .map(|c| c.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|argv| !argv.is_empty());
        Self {
            enabled: config.enabled,
            command,
        }
    }

    /// Must be called from inside a tokio runtime when a command is set.
    pub fn ring(&self, prayer: Prayer) {
        if !self.enabled {
            return;
        }

        let Some(argv) = self.command.clone() else {
            let mut out = std::io::stderr();
            if let Err(e) = out.write_all(BELL).and_then(|_| out.flush()) {
                tracing::warn!(%prayer, error = %e, "terminal bell failed");
            }
            return;
        };

        tokio::spawn(async move {
            let status = tokio::process::Command::new(&argv[0])
                .args(&argv[1..])
                .stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .status()
                .await;
            match status {
                Ok(s) if s.success() => tracing::debug!(%prayer, "adhan played"),
                Ok(s) => tracing::warn!(%prayer, status = %s, "adhan player exited with failure"),
                Err(e) => tracing::warn!(%prayer, error = %e, program = %argv[0], "adhan player failed to start"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_command_falls_back_to_bell() {
        let chime = Chime::from_config(&ChimeConfig {
            enabled: true,
            command: Some("   ".into()),
        });
        assert!(chime.command.is_none());
    }

    #[test]
    fn command_is_split_into_argv() {
        let chime = Chime::from_config(&ChimeConfig {
            enabled: true,
            command: Some("mpv --no-video azan.mp3".into()),
        });
        assert_eq!(
            chime.command.as_deref(),
            Some(&["mpv".to_string(), "--no-video".into(), "azan.mp3".into()][..])
        );
    }

    #[tokio::test]
    async fn missing_player_does_not_panic() {
        let chime = Chime::from_config(&ChimeConfig {
            enabled: true,
            command: Some("definitely-not-a-real-player-binary".into()),
        });
        chime.ring(Prayer::Fajr);
        tokio::task::yield_now().await;
    }
}
