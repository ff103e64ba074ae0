//! Tokio driver that feeds real elapsed time into a [`GameSession`].
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::journey::{Action, GameSession};
use crate::state::GameState;

/// A session shared between the clock task and whoever dispatches actions.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<GameSession>>,
}

impl SharedSession {
    #[must_use]
    pub fn new(session: GameSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn dispatch(&self, action: Action) -> GameState {
        let mut session = self.inner.lock().await;
        session.dispatch(action).clone()
    }

    pub async fn snapshot(&self) -> GameState {
        self.inner.lock().await.state().clone()
    }

    /// Run `f` with exclusive access to the session.
    pub async fn with_session<R>(&self, f: impl FnOnce(&mut GameSession) -> R) -> R {
        let mut session = self.inner.lock().await;
        f(&mut session)
    }

    /// Spawn a task that advances the session clock every `tick`.
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn_clock(&self, tick: Duration) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let started = Instant::now();
            let base_ms = inner.lock().await.now_ms();
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let since_start =
                    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                let mut session = inner.lock().await;
                let target = base_ms.saturating_add(since_start);
                let delta = target.saturating_sub(session.now_ms());
                if delta > 0 {
                    session.advance_clock(delta);
                }
            }
        })
    }
}
