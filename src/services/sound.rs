//! Alarm sound playback through an external player process

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::{
    process::{Child, Command},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::engine::{Playback, PlaybackError};

/// Plays a sound file on repeat by re-running a player command
#[derive(Debug)]
pub struct CommandPlayback {
    player: String,
    sound: PathBuf,
    task: Option<JoinHandle<()>>,
}

impl CommandPlayback {
    pub fn new(player: impl Into<String>, sound: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
            sound: sound.into(),
            task: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Playback for CommandPlayback {
    fn rewind(&mut self) {
        // Every player run starts at the top of the file
        debug!("Rewinding alarm sound {}", self.sound.display());
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.sound.exists() {
            return Err(PlaybackError::MissingSound(self.sound.clone()));
        }

        self.pause();
        let child = spawn_player(&self.player, &self.sound)?;
        self.task = Some(tokio::spawn(loop_player(child, self.player.clone(), self.sound.clone())));

        info!("Playing {} with {}", self.sound.display(), self.player);
        Ok(())
    }

    fn pause(&mut self) {
        // The player is killed once the runtime drops the aborted task and its child
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Alarm sound halted");
        }
    }
}

impl Drop for CommandPlayback {
    fn drop(&mut self) {
        self.pause();
    }
}

/// Spawn a single run of the player on the sound file
fn spawn_player(player: &str, sound: &Path) -> Result<Child, PlaybackError> {
    Command::new(player)
        .arg(sound)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| PlaybackError::Spawn {
            player: player.to_string(),
            reason: e.to_string(),
        })
}

/// Restart the player every time it finishes until aborted
async fn loop_player(mut child: Child, player: String, sound: PathBuf) {
    loop {
        match child.wait().await {
            Ok(status) if status.success() => {}
            Ok(status) => {
                warn!("Player {} exited with {}, giving up on alarm sound", player, status);
                return;
            }
            Err(e) => {
                warn!("Failed to wait on player {}: {}", player, e);
                return;
            }
        }

        child = match spawn_player(&player, &sound) {
            Ok(child) => child,
            Err(e) => {
                warn!("Alarm sound loop stopped: {}", e);
                return;
            }
        };
    }
}

/// Check that the alarm sound file is present
pub fn check_sound_available(sound: &Path) -> Result<(), String> {
    if !sound.is_file() {
        return Err(format!(
            "Alarm sound {} not found; the alarm will be silent",
            sound.display()
        ));
    }

    info!("Alarm sound found at {}", sound.display());
    Ok(())
}
