use crate::blinker::{BlinkSurface, Blinker, BlinkerState, ServiceTiming};
use crate::command::{BlinkerAction, BlinkerCommand};
use crate::config::{BlinkConfiguration, InvalidConfiguration};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::RenderState;

/// An identifier for an indicator within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorId(pub usize);

impl From<usize> for IndicatorId {
    fn from(id: usize) -> Self {
        IndicatorId(id)
    }
}

impl From<IndicatorId> for usize {
    fn from(id: IndicatorId) -> Self {
        id.0
    }
}

/// Errors that can occur during collection operations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollectionError {
    /// The specified ID does not exist in the collection.
    InvalidId(IndicatorId),

    /// Attempted to add an indicator with an ID that already exists.
    DuplicateId(IndicatorId),

    /// The ID exceeds the collection's capacity.
    IdOutOfBounds { id: IndicatorId, capacity: usize },

    /// The indicator's configuration was rejected.
    Configuration(InvalidConfiguration),
}

impl core::fmt::Display for CollectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CollectionError::InvalidId(id) => {
                write!(f, "indicator {} does not exist in collection", id.0)
            }
            CollectionError::DuplicateId(id) => {
                write!(f, "indicator {} already exists in collection", id.0)
            }
            CollectionError::IdOutOfBounds { id, capacity } => {
                write!(
                    f,
                    "indicator {} exceeds collection capacity of {}",
                    id.0, capacity
                )
            }
            CollectionError::Configuration(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CollectionError {}

impl From<InvalidConfiguration> for CollectionError {
    fn from(err: InvalidConfiguration) -> Self {
        CollectionError::Configuration(err)
    }
}

/// Several indicators driven from one time source and one service loop.
///
/// Indicators may share a configuration; each keeps its own step index and
/// render state. No heap allocation.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - Render surface type (same for all indicators in the collection)
/// * `T` - Time source implementation type
/// * `MAX` - Maximum number of indicators this collection can hold
pub struct BlinkerCollection<'t, I, S, T, const MAX: usize>
where
    I: TimeInstant,
    S: BlinkSurface,
    T: TimeSource<I>,
{
    blinkers: [Option<Blinker<'t, I, S, T>>; MAX],
    time_source: &'t T,
}

impl<'t, I, S, T, const MAX: usize> BlinkerCollection<'t, I, S, T, MAX>
where
    I: TimeInstant,
    S: BlinkSurface,
    T: TimeSource<I>,
{
    /// Creates a new empty collection.
    pub fn new(time_source: &'t T) -> Self {
        Self {
            blinkers: core::array::from_fn(|_| None),
            time_source,
        }
    }

    /// Creates an indicator for `config` on `surface` under `id`.
    ///
    /// The indicator starts unmounted; send [`BlinkerAction::Mount`] to start it.
    ///
    /// # Errors
    /// * `IdOutOfBounds` - The ID exceeds the collection's capacity
    /// * `DuplicateId` - An indicator with this ID already exists
    /// * `Configuration` - `config` failed validation
    pub fn add(
        &mut self,
        id: IndicatorId,
        config: &BlinkConfiguration,
        surface: S,
    ) -> Result<(), CollectionError> {
        let idx = id.0;

        if idx >= MAX {
            return Err(CollectionError::IdOutOfBounds { id, capacity: MAX });
        }

        if self.blinkers[idx].is_some() {
            return Err(CollectionError::DuplicateId(id));
        }

        self.blinkers[idx] = Some(Blinker::new(config, surface, self.time_source)?);
        Ok(())
    }

    /// Disposes the indicator and removes it, returning it to the caller.
    ///
    /// # Errors
    /// Returns `InvalidId` if the indicator does not exist.
    pub fn remove(&mut self, id: IndicatorId) -> Result<Blinker<'t, I, S, T>, CollectionError> {
        let mut blinker = self
            .blinkers
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(CollectionError::InvalidId(id))?;
        blinker.dispose();
        Ok(blinker)
    }

    /// Routes an action to the specified indicator.
    ///
    /// # Errors
    /// Returns `InvalidId` if the indicator does not exist.
    pub fn handle_command(
        &mut self,
        id: IndicatorId,
        action: BlinkerAction,
    ) -> Result<ServiceTiming<I::Duration>, CollectionError> {
        Ok(self.get_mut(id)?.handle_action(action))
    }

    /// Routes a [`BlinkerCommand`] to its indicator.
    pub fn dispatch(
        &mut self,
        command: BlinkerCommand<IndicatorId>,
    ) -> Result<ServiceTiming<I::Duration>, CollectionError> {
        self.handle_command(command.id, command.action)
    }

    /// Services every running indicator and merges their timing.
    ///
    /// # Returns
    /// * `Continuous` - At least one indicator is interpolating
    /// * `Delay(d)` - All running indicators hold; `d` is the shortest hold
    /// * `Inactive` - Nothing is running
    pub fn service_all(&mut self) -> ServiceTiming<I::Duration> {
        let mut min_delay: Option<I::Duration> = None;
        let mut continuous = false;

        for blinker in self.blinkers.iter_mut().flatten() {
            if blinker.state() != BlinkerState::Running {
                continue;
            }

            match blinker.service() {
                ServiceTiming::Continuous => continuous = true,
                ServiceTiming::Delay(delay) => {
                    min_delay = match min_delay {
                        Some(current) if current.as_millis() <= delay.as_millis() => Some(current),
                        _ => Some(delay),
                    };
                }
                ServiceTiming::Inactive => {}
            }
        }

        if continuous {
            ServiceTiming::Continuous
        } else {
            min_delay.map_or(ServiceTiming::Inactive, ServiceTiming::Delay)
        }
    }

    /// Disposes every indicator in the collection.
    pub fn dispose_all(&mut self) {
        for blinker in self.blinkers.iter_mut().flatten() {
            blinker.dispose();
        }
    }

    /// Returns the lifecycle state of the specified indicator.
    ///
    /// # Errors
    /// Returns `InvalidId` if the indicator does not exist.
    pub fn state(&self, id: IndicatorId) -> Result<BlinkerState, CollectionError> {
        Ok(self.get(id)?.state())
    }

    /// Returns what the specified indicator currently shows.
    ///
    /// # Errors
    /// Returns `InvalidId` if the indicator does not exist.
    pub fn render_state(&self, id: IndicatorId) -> Result<RenderState, CollectionError> {
        Ok(self.get(id)?.render_state())
    }

    /// Returns a reference to the specified indicator.
    ///
    /// # Errors
    /// Returns `InvalidId` if the indicator does not exist.
    pub fn get(&self, id: IndicatorId) -> Result<&Blinker<'t, I, S, T>, CollectionError> {
        self.blinkers
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(CollectionError::InvalidId(id))
    }

    fn get_mut(&mut self, id: IndicatorId) -> Result<&mut Blinker<'t, I, S, T>, CollectionError> {
        self.blinkers
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CollectionError::InvalidId(id))
    }

    /// Returns the number of indicators in the collection.
    pub fn len(&self) -> usize {
        self.blinkers.iter().filter(|b| b.is_some()).count()
    }

    /// Returns true if the collection holds no indicators.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the collection contains an indicator with the given ID.
    pub fn contains(&self, id: IndicatorId) -> bool {
        self.get(id).is_ok()
    }
}
