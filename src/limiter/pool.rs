// crates.io
use tokio::sync::Semaphore;
// self
use crate::{
	_prelude::*,
	error::{AcquireError, ConfigError},
	limiter::ThrottleConfig,
};

/// Counting admission gate bounded to a fixed capacity.
///
/// Granted permits are consumed, not returned; only [`PermitPool::refill`] puts capacity back.
/// Waiters queue in FIFO order, so a late arrival never overtakes a caller that has been
/// blocked longer.
#[derive(Debug)]
pub struct PermitPool {
	capacity: usize,
	semaphore: Semaphore,
	// Serializes refills so two of them can never both observe the same deficit.
	refill_guard: Mutex<()>,
}
impl PermitPool {
	/// Creates a full pool with `capacity` permits.
	pub fn new(capacity: u32) -> Result<Self, ConfigError> {
		if capacity == 0 {
			return Err(ConfigError::NonPositiveLimit { limit: 0 });
		}

		Ok(Self::with_capacity(capacity))
	}

	/// Creates a full pool sized to the config's limit.
	pub fn from_config(config: &ThrottleConfig) -> Self {
		Self::with_capacity(config.limit())
	}

	fn with_capacity(capacity: u32) -> Self {
		let capacity = capacity as usize;

		Self { capacity, semaphore: Semaphore::new(capacity), refill_guard: Mutex::new(()) }
	}

	/// Upper bound on permits held by the pool at any instant.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Permits that can be granted right now without waiting.
	pub fn available(&self) -> usize {
		self.semaphore.available_permits()
	}

	/// Returns `true` once [`PermitPool::close`] has been called.
	pub fn is_closed(&self) -> bool {
		self.semaphore.is_closed()
	}

	/// Waits, without a deadline, until a permit is granted and consumes it.
	///
	/// The only failure is [`AcquireError::Closed`], returned once the pool has been shut down.
	pub async fn acquire(&self) -> Result<(), AcquireError> {
		self.semaphore.acquire().await.map_err(|_| AcquireError::Closed)?.forget();

		Ok(())
	}

	/// Like [`PermitPool::acquire`] but gives up after `timeout`.
	///
	/// A caller that times out leaves the wait queue; nothing is consumed on its behalf.
	pub async fn acquire_timeout(&self, timeout: Duration) -> Result<(), AcquireError> {
		match tokio::time::timeout(timeout, self.acquire()).await {
			Ok(result) => result,
			Err(_) => Err(AcquireError::TimedOut { waited: timeout }),
		}
	}

	/// Like [`PermitPool::acquire`] but gives up as soon as `token` is cancelled.
	pub async fn acquire_cancellable(&self, token: &CancellationToken) -> Result<(), AcquireError> {
		tokio::select! {
			biased;
			_ = token.cancelled() => Err(AcquireError::Cancelled),
			result = self.acquire() => result,
		}
	}

	/// Restores the pool to full capacity and returns how many permits were added.
	///
	/// Waiters are released in queue order as the permits land. A second call with nothing
	/// granted in between adds zero.
	pub(crate) fn refill(&self) -> usize {
		let _guard = self.refill_guard.lock();
		// Concurrent acquisitions can only lower `available`, so the sum stays within capacity.
		let deficit = self.capacity.saturating_sub(self.semaphore.available_permits());

		if deficit > 0 {
			self.semaphore.add_permits(deficit);
		}

		deficit
	}

	/// Shuts the pool; current and future waiters fail with [`AcquireError::Closed`].
	pub fn close(&self) {
		self.semaphore.close();
	}
}
