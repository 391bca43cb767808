use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use itertools::Itertools;
use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tracing::{debug, instrument, trace, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::model::*;
use crate::scheduler::{Scheduler, TaskHandle, TokioScheduler};
use crate::seed::{self, Seed};

/// Owns the competition lists and the notification flag.
///
/// `CompetitionStore` is a cheap, cloneable handle; clones share state.
/// Readers get snapshots or subscriptions, and [`join`](Self::join) is the
/// only way state changes.
///
/// # Examples
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> competition_store::Result<()> {
/// use competition_store::CompetitionStore;
///
/// let store = CompetitionStore::builder().sample_data().build()?;
/// let swimming = store.all_competitions()[3].id;
///
/// store.join(swimming);
/// assert!(store.is_notification_active());
/// assert_eq!(store.my_competitions().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CompetitionStore {
    shared: Arc<Shared>,
}

struct Shared {
    state: watch::Sender<StoreState>,
    events: broadcast::Sender<StoreEvent>,
    timer: Mutex<ResetTimer>,
    scheduler: Arc<dyn Scheduler>,
    notification_delay: Duration,
}

/// The pending notification reset. `generation` identifies the latest one so
/// a superseded reset that was already running cannot clear a newer flag.
#[derive(Default)]
struct ResetTimer {
    generation: u64,
    pending: Option<TaskHandle>,
}

impl CompetitionStore {
    /// Start configuring a store.
    pub fn builder() -> CompetitionStoreBuilder {
        CompetitionStoreBuilder::default()
    }

    /// Create a store over `competitions` with nothing joined and default
    /// settings. Must be called from within a Tokio runtime.
    pub fn new(competitions: Vec<CompetitionRecord>) -> Result<Self> {
        Self::builder().competitions(competitions).build()
    }

    /// Join a competition from the full list.
    ///
    /// Unknown and already-joined ids leave every piece of state untouched.
    /// On success the record is marked joined, appended to the joined list,
    /// and the notification is raised until one notification delay after the
    /// latest successful join.
    #[instrument(skip(self))]
    pub fn join(&self, id: CompetitionId) -> JoinOutcome {
        let mut outcome = JoinOutcome::UnknownCompetition;
        let mut joined = None;
        let mut join_count = 0;

        // Raising the flag and bumping the generation happen together so a
        // stale reset can never clear a newer notification.
        let generation = {
            let mut timer = self.shared.timer.lock();
            self.shared.state.send_if_modified(|state| {
                outcome = state.join(id);
                if !outcome.is_joined() {
                    return false;
                }
                joined = state.my_competitions.last().cloned();
                join_count = state.my_competitions.len();
                state.notification_active = true;
                true
            });
            if outcome.is_joined() {
                timer.generation += 1;
            }
            timer.generation
        };

        match outcome {
            JoinOutcome::Joined => {
                if let Some(record) = joined {
                    debug!(title = %record.title, joined = join_count, "joined competition");
                    self.emit(StoreEvent::Joined { record });
                }
                self.emit(StoreEvent::NotificationShown);
                self.schedule_reset(generation);
            }
            JoinOutcome::AlreadyJoined => trace!("competition already joined"),
            JoinOutcome::UnknownCompetition => warn!("join requested for unknown competition"),
        }
        outcome
    }

    /// Every competition, in display order.
    pub fn all_competitions(&self) -> Vec<CompetitionRecord> {
        self.shared.state.borrow().all_competitions.clone()
    }

    /// Joined competitions, in join order.
    pub fn my_competitions(&self) -> Vec<CompetitionRecord> {
        self.shared.state.borrow().my_competitions.clone()
    }

    /// Whether the "joined" notification should currently be shown.
    pub fn is_notification_active(&self) -> bool {
        self.shared.state.borrow().notification_active
    }

    /// All observable state, read in one go.
    pub fn snapshot(&self) -> StoreState {
        self.shared.state.borrow().clone()
    }

    /// Watch the whole state. The receiver wakes after every change; rapid
    /// changes may be coalesced into the latest value.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.shared.state.subscribe()
    }

    /// Receive one [`StoreEvent`] per change, starting from now.
    pub fn events(&self) -> broadcast::Receiver<StoreEvent> {
        self.shared.events.subscribe()
    }

    /// How long the notification stays up after a successful join.
    pub fn notification_delay(&self) -> Duration {
        self.shared.notification_delay
    }

    fn emit(&self, event: StoreEvent) {
        // No receivers is fine.
        let _ = self.shared.events.send(event);
    }

    /// Schedule the reset for `generation` with the timer lock released, then
    /// keep its handle only if no newer join got there first.
    fn schedule_reset(&self, generation: u64) {
        let shared = Arc::downgrade(&self.shared);
        let handle = self.shared.scheduler.schedule(
            self.shared.notification_delay,
            Box::new(move || clear_notification(&shared, generation)),
        );

        let mut timer = self.shared.timer.lock();
        if timer.generation != generation {
            trace!(generation, "dropping reset superseded while scheduling");
            handle.cancel();
            return;
        }
        if let Some(previous) = timer.pending.replace(handle) {
            trace!(generation, "cancelling superseded notification reset");
            previous.cancel();
        }
    }
}

fn clear_notification(shared: &Weak<Shared>, generation: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let mut timer = shared.timer.lock();
    if timer.generation != generation {
        trace!(
            generation,
            latest = timer.generation,
            "skipping stale notification reset"
        );
        return;
    }
    timer.pending = None;

    let cleared = shared
        .state
        .send_if_modified(|state| std::mem::replace(&mut state.notification_active, false));
    if cleared {
        debug!("notification cleared");
        let _ = shared.events.send(StoreEvent::NotificationCleared);
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(pending) = self.timer.get_mut().pending.take() {
            pending.cancel();
        }
    }
}

impl fmt::Debug for CompetitionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompetitionStore")
            .field("state", &*self.shared.state.borrow())
            .field("notification_delay", &self.shared.notification_delay)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`CompetitionStore`] from seed data and settings.
#[derive(Default)]
pub struct CompetitionStoreBuilder {
    seed: Seed,
    config: StoreConfig,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl CompetitionStoreBuilder {
    /// Append records to the full list, in display order.
    pub fn competitions(
        mut self,
        competitions: impl IntoIterator<Item = CompetitionRecord>,
    ) -> Self {
        self.seed.competitions.extend(competitions);
        self
    }

    /// Ids to join before the store is handed out. No notification is raised
    /// for these.
    pub fn joined(mut self, ids: impl IntoIterator<Item = CompetitionId>) -> Self {
        self.seed.joined.extend(ids);
        self
    }

    /// Append a whole [`Seed`].
    pub fn seed(self, seed: Seed) -> Self {
        self.competitions(seed.competitions).joined(seed.joined)
    }

    /// Load [`seed::sample`].
    pub fn sample_data(self) -> Self {
        self.seed(seed::sample())
    }

    /// Replace all tunables at once.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Override how long the notification stays up.
    pub fn notification_delay(mut self, delay: Duration) -> Self {
        self.config.notification_delay = delay;
        self
    }

    /// Run notification resets on `scheduler` instead of the current Tokio
    /// runtime.
    pub fn scheduler(mut self, scheduler: impl Scheduler) -> Self {
        self.scheduler = Some(Arc::new(scheduler));
        self
    }

    /// Validate the seed and create the store.
    ///
    /// Records already flagged as joined in the seed are joined first, in
    /// display order, followed by the explicit pre-joined ids.
    #[instrument(skip(self), fields(competitions = self.seed.competitions.len()))]
    pub fn build(self) -> Result<CompetitionStore> {
        self.config.validate()?;

        let Seed {
            competitions,
            joined,
        } = self.seed;

        if let Some(id) = competitions.iter().map(|c| c.id).duplicates().next() {
            return Err(StoreError::DuplicateCompetition { id });
        }

        let flagged = competitions
            .iter()
            .filter(|c| c.is_joined)
            .map(|c| c.id)
            .collect_vec();
        let mut state = StoreState {
            all_competitions: competitions,
            ..Default::default()
        };
        for id in flagged.into_iter().chain(joined) {
            if state.join(id) == JoinOutcome::UnknownCompetition {
                return Err(StoreError::UnknownCompetition { id });
            }
        }

        let scheduler = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(TokioScheduler::try_current()?),
        };

        debug!(joined = state.my_competitions.len(), "competition store ready");

        let (events, _) = broadcast::channel(self.config.event_capacity);
        Ok(CompetitionStore {
            shared: Arc::new(Shared {
                state: watch::Sender::new(state),
                events,
                timer: Mutex::new(ResetTimer::default()),
                scheduler,
                notification_delay: self.config.notification_delay,
            }),
        })
    }
}
