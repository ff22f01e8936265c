/*!
 * Embedded video player lifecycle.
 *
 * A player is created through an explicit handle: [`acquire`] waits for the
 * backend's readiness signal and then creates the player inside the given
 * container, [`release`] tears it down. Nothing is registered globally.
 */

use std::fmt::Debug;
use anyhow::{Result, anyhow};
use log::{debug, info};
use tokio::sync::watch;
use crate::video_ref;

/// Player creation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Canonical video identifier
    pub video_id: String,
    pub autoplay: bool,
    pub controls: bool,
    pub modest_branding: bool,
    /// Show related videos at the end
    pub related: bool,
}

impl PlayerConfig {
    /// Default player settings for a video
    pub fn for_video(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            autoplay: false,
            controls: true,
            modest_branding: true,
            related: false,
        }
    }

    /// Player variables as query parameters
    pub fn player_vars(&self) -> Vec<(&'static str, u8)> {
        vec![
            ("autoplay", self.autoplay as u8),
            ("controls", self.controls as u8),
            ("modestbranding", self.modest_branding as u8),
            ("rel", self.related as u8),
        ]
    }

    /// Embed URL including the player variables
    pub fn embed_url(&self) -> String {
        let vars = self.player_vars().iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", video_ref::embed_url(&self.video_id), vars)
    }
}

/// Backend-assigned identifier of a live player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerId(pub u64);

/// Something that can host players, such as a window or a terminal
pub trait PlayerBackend: Send + Sync + Debug {
    /// Create a player for `config` inside `container`
    fn create(&self, container: &str, config: &PlayerConfig) -> Result<PlayerId>;

    /// Destroy a player created by this backend
    fn destroy(&self, id: PlayerId) -> Result<()>;
}

/// Readiness signal raised by whatever loads the player backend
#[derive(Debug, Clone)]
pub struct ReadySignal {
    rx: watch::Receiver<bool>,
}

/// Sending side of a [`ReadySignal`]
#[derive(Debug)]
pub struct ReadyTrigger {
    tx: watch::Sender<bool>,
}

impl ReadySignal {
    /// Create a signal that starts out not ready
    pub fn channel() -> (ReadyTrigger, ReadySignal) {
        let (tx, rx) = watch::channel(false);
        (ReadyTrigger { tx }, ReadySignal { rx })
    }

    /// Signal that is already raised, for backends with nothing to load
    pub fn ready() -> ReadySignal {
        let (trigger, signal) = Self::channel();
        trigger.fire();
        signal
    }

    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until the signal is raised
    pub async fn wait(&mut self) -> Result<()> {
        self.rx.wait_for(|ready| *ready)
            .await
            .map(|_| ())
            .map_err(|_| anyhow!("Player backend went away before becoming ready"))
    }
}

impl ReadyTrigger {
    /// Raise the readiness signal
    pub fn fire(&self) {
        self.tx.send_replace(true);
    }
}

/// A live player; must be handed back to [`release`]
#[derive(Debug)]
#[must_use = "a player handle must be released"]
pub struct PlayerHandle {
    id: PlayerId,
    config: PlayerConfig,
}

impl PlayerHandle {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }
}

/// Wait for `ready`, then create a player for `config` in `container`
pub async fn acquire<B: PlayerBackend + ?Sized>(
    backend: &B,
    container: &str,
    config: PlayerConfig,
    mut ready: ReadySignal,
) -> Result<PlayerHandle> {
    if !ready.is_ready() {
        debug!("Waiting for player backend to become ready");
        ready.wait().await?;
    }

    let id = backend.create(container, &config)?;
    info!("Player ready for video {}", config.video_id);

    Ok(PlayerHandle { id, config })
}

/// Tear down a player created by [`acquire`]
pub fn release<B: PlayerBackend + ?Sized>(backend: &B, handle: PlayerHandle) -> Result<()> {
    debug!("Releasing player {:?}", handle.id);
    backend.destroy(handle.id)
}

/// Backend that "plays" by printing the embed URL
#[derive(Debug, Default)]
pub struct TerminalPlayer {
    next_id: std::sync::atomic::AtomicU64,
}

impl PlayerBackend for TerminalPlayer {
    fn create(&self, container: &str, config: &PlayerConfig) -> Result<PlayerId> {
        let id = self.next_id.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        println!("[{}] {}", container, config.embed_url());
        Ok(PlayerId(id))
    }

    fn destroy(&self, _id: PlayerId) -> Result<()> {
        Ok(())
    }
}
