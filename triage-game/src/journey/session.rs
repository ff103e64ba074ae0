use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::context::GameContext;
use crate::result::{ResultSummary, result_summary};
use crate::scheduler::{ScheduledTask, Scheduler, SessionId, TaskKind};
use crate::state::GameState;
use crate::transition::{TransitionPhase, advance_transition};

use super::action::{Action, reduce};
use super::tick_sla_decay;

/// Callback invoked with every new snapshot.
pub type Subscriber = Box<dyn FnMut(&GameState) + Send>;

/// Single source of truth for one player: owns the state, the timer queue and
/// the subscriber list.
///
/// Time only moves through [`GameSession::advance_clock`]; the session never
/// reads a wall clock.
pub struct GameSession {
    ctx: GameContext,
    state: GameState,
    scheduler: Scheduler,
    session_id: SessionId,
    rng: ChaCha20Rng,
    seed: u64,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("session_id", &self.session_id)
            .field("seed", &self.seed)
            .field("screen", &self.state.screen())
            .field("pending_tasks", &self.scheduler.len())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Start a session on a fresh playthrough. `seed` drives generation ids.
    #[must_use]
    pub fn new(ctx: GameContext, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let session_id = SessionId(rng.next_u64());
        let state = GameState::new(&ctx);
        log::debug!("session {session_id} created from seed {seed}");
        Self {
            ctx,
            state,
            scheduler: Scheduler::new(),
            session_id,
            rng,
            seed,
            subscribers: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn context(&self) -> &GameContext {
        &self.ctx
    }

    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    #[must_use]
    pub fn result(&self) -> ResultSummary {
        result_summary(&self.state, &self.ctx.catalog)
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameState) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Run `action` through the reducer and notify subscribers on change.
    pub fn dispatch(&mut self, action: Action) -> &GameState {
        let is_reset = matches!(action, Action::Reset);
        let before = self.state.clone();
        let mut current = std::mem::take(&mut self.state);
        current.set_clock(self.scheduler.now_ms());
        self.state = reduce(current, &self.ctx, action);
        if is_reset {
            self.begin_generation();
            self.state.set_clock(self.scheduler.now_ms());
        }
        self.sync_timers(&before);
        self.publish(&before);
        &self.state
    }

    /// Throw the playthrough away and start over under a new generation id.
    pub fn reset(&mut self) -> &GameState {
        self.dispatch(Action::Reset)
    }

    /// Move time forward by `delta_ms`, firing every task that falls due.
    pub fn advance_clock(&mut self, delta_ms: u64) -> &GameState {
        let target = self.scheduler.now_ms().saturating_add(delta_ms);
        while let Some(task) = self.scheduler.pop_due(target) {
            self.fire(task);
        }
        self.scheduler.advance_to(target);
        self.state.set_clock(target);
        &self.state
    }

    fn begin_generation(&mut self) {
        let previous = self.session_id;
        let mut next = SessionId(self.rng.next_u64());
        while next == previous {
            next = SessionId(self.rng.next_u64());
        }
        self.session_id = next;
        self.scheduler.cancel_all();
        log::info!("session reset: generation {previous} -> {next}");
    }

    fn fire(&mut self, task: ScheduledTask) {
        if task.session != self.session_id {
            log::debug!("dropping {:?} from stale generation {}", task.kind, task.session);
            return;
        }
        if !self.state.status().is_active() {
            log::debug!("dropping {:?}: run already over", task.kind);
            return;
        }
        let before = self.state.clone();
        let mut current = std::mem::take(&mut self.state);
        current.set_clock(task.due_ms);
        self.state = match task.kind {
            TaskKind::SlaDecay => {
                if current.decay_armed() {
                    tick_sla_decay(current, &self.ctx)
                } else {
                    log::debug!("decay fired while disarmed");
                    current
                }
            }
            TaskKind::TransitionStep { transition } => advance_transition(current, transition),
        };
        self.sync_timers(&before);
        self.publish(&before);
    }

    /// Arm or disarm decay, and queue the next step of a visible transition.
    /// A finished run keeps no timers at all.
    fn sync_timers(&mut self, before: &GameState) {
        let armed = self.state.decay_armed();
        if armed && !self.scheduler.has(TaskKind::SlaDecay) {
            self.scheduler.schedule(
                self.ctx.rules.decay.interval_ms,
                self.session_id,
                TaskKind::SlaDecay,
            );
        } else if !armed {
            self.scheduler.cancel(TaskKind::SlaDecay);
        }
        if !self.state.status().is_active() {
            self.scheduler.cancel_transitions();
            return;
        }

        if let Some(transition) = self.state.transition()
            && before.transition() != Some(transition)
        {
            let kind = TaskKind::TransitionStep {
                transition: transition.id,
            };
            let hold = transition.phase.hold_ms(&self.ctx.rules.transitions);
            if transition.phase == TransitionPhase::Title {
                log::debug!("scene {} opened", transition.visible_key());
            }
            self.scheduler.schedule(hold, self.session_id, kind);
        }
    }

    fn publish(&mut self, before: &GameState) {
        if *before == self.state {
            return;
        }
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
    }
}
