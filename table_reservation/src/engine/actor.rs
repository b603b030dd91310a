//! Serialization engine: the single task that owns and mutates the table pool
//! and the reservation ledger.

use super::{
    config::EngineConfig,
    messages::{ActionKind, EngineAction, EngineRequest, PoolSnapshot},
};
use crate::{
    reservation::{
        InMemoryReservationRepository, ReservationError, ReservationId, ReservationRepository,
        ReservationResult,
    },
    table::{AvailabilityGauge, InMemoryTableRepository, TableRepository},
};
use std::time::Instant;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, timeout},
};

/// Engine over the memory-resident pool and ledger
pub type InMemoryEngine = Engine<InMemoryTableRepository, InMemoryReservationRepository>;

/// Cloneable handle for sending requests to the engine
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<EngineRequest>,
    gauge: AvailabilityGauge,
    response_timeout: Duration,
}

impl EngineHandle {
    /// Enqueue a raw request. Waits while the inbound channel is full.
    pub async fn send(&self, request: EngineRequest) -> ReservationResult<()> {
        self.sender
            .send(request)
            .await
            .map_err(|_| ReservationError::EngineStopped)
    }

    /// Initialize the pool with `num_tables` tables
    pub async fn initialize(
        &self,
        request_id: impl Into<String>,
        num_tables: i64,
    ) -> ReservationResult<()> {
        self.call(request_id, |response| EngineAction::Initialize {
            num_tables,
            response,
        })
        .await?
    }

    /// Reserve `num_tables` tables, returning the new reservation id
    pub async fn reserve(
        &self,
        request_id: impl Into<String>,
        num_tables: i64,
    ) -> ReservationResult<ReservationId> {
        self.call(request_id, |response| EngineAction::Reserve {
            num_tables,
            response,
        })
        .await?
    }

    /// Cancel a reservation, returning the number of tables freed
    pub async fn cancel(
        &self,
        request_id: impl Into<String>,
        reservation_id: ReservationId,
    ) -> ReservationResult<i64> {
        self.call(request_id, |response| EngineAction::Cancel {
            reservation_id,
            response,
        })
        .await?
    }

    /// Consistent snapshot of the pool
    pub async fn snapshot(&self, request_id: impl Into<String>) -> ReservationResult<PoolSnapshot> {
        self.call(request_id, |response| EngineAction::Snapshot { response })
            .await
    }

    /// Available tables as of the last completed mutation.
    ///
    /// Bypasses the engine; see [`AvailabilityGauge`].
    pub fn available_tables(&self) -> i64 {
        self.gauge.get()
    }

    /// Whether the engine has stopped receiving requests
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }


    /// Send one request and wait for its single response, bounded by the
    /// response deadline.
    async fn call<T>(
        &self,
        request_id: impl Into<String>,
        action: impl FnOnce(oneshot::Sender<T>) -> EngineAction,
    ) -> ReservationResult<T> {
        let (tx, rx) = oneshot::channel();
        let request = EngineRequest::new(request_id, action(tx));

        let exchange = async {
            self.send(request).await?;
            // A dropped sender means the engine stopped with this request unread
            rx.await.map_err(|_| ReservationError::EngineStopped)
        };

        timeout(self.response_timeout, exchange)
            .await
            .map_err(|_| ReservationError::Timeout(self.response_timeout))?
    }
}

/// Serialization engine owning the table pool and the reservation ledger
pub struct Engine<T, R> {
    /// Table pool
    tables: T,

    /// Reservation ledger
    ledger: R,

    /// Request inbox
    inbox: mpsc::Receiver<EngineRequest>,

    /// Requests handled so far
    processed: u64,
}

impl InMemoryEngine {
    /// Create an engine over an empty memory-resident pool and ledger
    pub fn in_memory(config: &EngineConfig) -> (Self, EngineHandle) {
        Self::new(
            config,
            InMemoryTableRepository::new(),
            InMemoryReservationRepository::new(),
        )
    }
}

impl<T, R> Engine<T, R>
where
    T: TableRepository,
    R: ReservationRepository,
{
    /// Create a new engine
    ///
    /// # Arguments
    ///
    /// * `config` - Engine configuration
    /// * `tables` - Table pool, owned exclusively by the engine from here on
    /// * `ledger` - Reservation ledger, owned exclusively by the engine
    ///
    /// # Returns
    ///
    /// * `(Engine, EngineHandle)` - Engine and handle for sending requests
    pub fn new(config: &EngineConfig, tables: T, ledger: R) -> (Self, EngineHandle) {
        let (sender, inbox) = mpsc::channel(config.channel_capacity.max(1));

        let handle = EngineHandle {
            sender,
            gauge: tables.availability_gauge(),
            response_timeout: config.response_timeout,
        };

        let engine = Self {
            tables,
            ledger,
            inbox,
            processed: 0,
        };

        (engine, handle)
    }

    /// Run the engine until every handle is dropped
    pub async fn run(self) {
        self.run_until(std::future::pending()).await;
    }

    /// Run the engine until `shutdown` resolves or every handle is dropped.
    ///
    /// The stop signal takes priority over queued requests. Requests still
    /// queued when the engine stops are dropped unanswered; their callers
    /// observe [`ReservationError::EngineStopped`].
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        log::info!("Reservation engine starting");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    log::info!("Reservation engine received stop signal");
                    break;
                }

                request = self.inbox.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => {
                        log::info!("All engine handles dropped");
                        break;
                    }
                },
            }
        }

        self.inbox.close();
        log::info!(
            "Reservation engine stopped after {} requests",
            self.processed
        );
    }

    /// Handle one request to completion
    fn handle_request(&mut self, request: EngineRequest) {
        let started = Instant::now();
        let EngineRequest { id, action } = request;
        let kind = action.kind();

        log::info!("Incoming engine request {} action={}", id, kind);

        match action {
            EngineAction::Initialize {
                num_tables,
                response,
            } => {
                let result = self.handle_initialize(num_tables);
                respond(&id, kind, response, result);
            }

            EngineAction::Reserve {
                num_tables,
                response,
            } => {
                let result = self.handle_reserve(&id, num_tables);
                respond(&id, kind, response, result);
            }

            EngineAction::Cancel {
                reservation_id,
                response,
            } => {
                let result = self.handle_cancel(&reservation_id);
                respond(&id, kind, response, result);
            }

            EngineAction::Snapshot { response } => {
                if response.send(self.snapshot()).is_err() {
                    log::warn!("Caller for request {} went away before the snapshot", id);
                }
            }
        }

        self.processed += 1;
        log::info!(
            "Engine request {} action={} complete in {:.3} ms",
            id,
            kind,
            started.elapsed().as_secs_f64() * 1000.0
        );
    }

    fn handle_initialize(&mut self, num_tables: i64) -> ReservationResult<()> {
        // A repeated initialize reports AlreadyInitialized whatever its argument
        if self.tables.is_initialized() {
            return Err(ReservationError::AlreadyInitialized);
        }

        if num_tables <= 0 {
            return Err(ReservationError::InvalidArgument(format!(
                "number of tables must be greater than zero, got {}",
                num_tables
            )));
        }

        self.tables.initialize(num_tables)?;
        log::debug!("Table pool initialized with {} tables", num_tables);
        Ok(())
    }

    fn handle_reserve(
        &mut self,
        request_id: &str,
        num_tables: i64,
    ) -> ReservationResult<ReservationId> {
        if !self.tables.is_initialized() {
            return Err(ReservationError::NotInitialized);
        }

        if num_tables <= 0 {
            return Err(ReservationError::InvalidArgument(format!(
                "number of tables must be greater than zero, got {}",
                num_tables
            )));
        }

        let available = self.tables.available_tables();
        if num_tables > available {
            return Err(ReservationError::InsufficientCapacity {
                requested: num_tables,
                available,
            });
        }

        let reservation = self.ledger.create(num_tables);
        let reservation_id = reservation.id.clone();

        if let Err(e) = self.tables.reserve(reservation) {
            // Ledger and pool move together or not at all
            if let Err(undo) = self.ledger.cancel(&reservation_id) {
                log::error!(
                    "Request {}: ledger kept orphan reservation {} after pool rejected it: {}",
                    request_id,
                    reservation_id,
                    undo
                );
            }
            return Err(e);
        }

        log::debug!(
            "Reservation {} holds {} tables, {} available",
            reservation_id,
            num_tables,
            self.tables.available_tables()
        );
        Ok(reservation_id)
    }

    fn handle_cancel(&mut self, reservation_id: &ReservationId) -> ReservationResult<i64> {
        if !self.tables.is_initialized() {
            return Err(ReservationError::NotInitialized);
        }

        self.ledger.find_by_id(reservation_id)?;
        let reservation = self.ledger.cancel(reservation_id)?;

        if let Err(e) = self.tables.cancel_reserved(reservation_id) {
            self.ledger.restore(reservation);
            return Err(e);
        }

        log::debug!(
            "Reservation {} released {} tables, {} available",
            reservation_id,
            reservation.num_tables,
            self.tables.available_tables()
        );
        Ok(reservation.num_tables)
    }

    fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            total_tables: self.tables.total_tables(),
            available_tables: self.tables.available_tables(),
            reserved_tables: self.tables.reserved_tables(),
            reservations: self.tables.active_reservations(),
        }
    }
}

/// Deliver a result to its caller, logging business errors with the
/// correlation id
fn respond<V>(
    request_id: &str,
    kind: ActionKind,
    response: oneshot::Sender<ReservationResult<V>>,
    result: ReservationResult<V>,
) {
    if let Err(e) = &result {
        log::error!("Error processing {} request {}: {}", kind, request_id, e);
    }

    if response.send(result).is_err() {
        log::warn!(
            "Caller for request {} went away before the {} response",
            request_id,
            kind
        );
    }
}
