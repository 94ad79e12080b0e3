//! Fixed-window admission control for outbound submissions.
//!
//! A [`PermitPool`] holds at most `limit` permits. Every acquisition consumes one permit for
//! good; nothing is handed back when a request finishes. A background refill task owned by
//! [`RateLimiter`] tops the pool back up to full capacity once per window.
//!
//! This is a fixed-window counter, not a sliding log or token bucket. Right after a refill up
//! to `limit` waiters are released in one burst, and a span straddling a window boundary can
//! see up to `2 * limit` grants. Waiters are served strictly in arrival order.

mod config;
mod pool;
mod refill;

pub use config::*;
pub use pool::*;
pub use refill::*;

// self
use crate::{_prelude::*, error::{AcquireError, ConfigError}};

/// A [`PermitPool`] bundled with the refill task that replenishes it.
///
/// Dropping the limiter cancels the refill task; [`RateLimiter::stop`] additionally closes the
/// pool and waits for the task to exit.
#[derive(Debug)]
pub struct RateLimiter {
	config: ThrottleConfig,
	pool: Arc<PermitPool>,
	refill: RefillHandle,
}
impl RateLimiter {
	/// Creates a full pool and starts its refill task on the current tokio runtime.
	pub fn start(config: ThrottleConfig) -> Result<Self, ConfigError> {
		let runtime =
			tokio::runtime::Handle::try_current().map_err(|_| ConfigError::MissingRuntime)?;
		let pool = Arc::new(PermitPool::from_config(&config));
		let refill = RefillHandle::spawn(&runtime, pool.clone(), config.window());

		Ok(Self { config, pool, refill })
	}

	/// Configuration the limiter was started with.
	pub fn config(&self) -> &ThrottleConfig {
		&self.config
	}

	/// Shared handle to the underlying pool.
	pub fn pool(&self) -> &Arc<PermitPool> {
		&self.pool
	}

	/// Maximum number of permits granted per window.
	pub fn capacity(&self) -> usize {
		self.pool.capacity()
	}

	/// Permits that can be granted right now without waiting.
	pub fn available(&self) -> usize {
		self.pool.available()
	}

	/// Returns `true` while the refill task is alive and [`RateLimiter::stop`] has not been
	/// called.
	pub fn is_running(&self) -> bool {
		self.refill.is_running()
	}

	/// See [`PermitPool::acquire`].
	pub async fn acquire(&self) -> Result<(), AcquireError> {
		self.pool.acquire().await
	}

	/// See [`PermitPool::acquire_timeout`].
	pub async fn acquire_timeout(&self, timeout: Duration) -> Result<(), AcquireError> {
		self.pool.acquire_timeout(timeout).await
	}

	/// See [`PermitPool::acquire_cancellable`].
	pub async fn acquire_cancellable(&self, token: &CancellationToken) -> Result<(), AcquireError> {
		self.pool.acquire_cancellable(token).await
	}

	/// Stops the refill task and closes the pool.
	///
	/// Blocked waiters are released with [`AcquireError::Closed`]. Calling `stop` more than once
	/// is harmless.
	pub async fn stop(&self) {
		self.pool.close();
		self.refill.shutdown().await;
	}
}
