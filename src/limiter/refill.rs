// crates.io
use tokio::{
	runtime::Handle,
	task::JoinHandle,
	time::{self, Instant, MissedTickBehavior},
};
// self
use crate::{_prelude::*, limiter::PermitPool, obs};

/// Owner of the background task that refills a [`PermitPool`] once per window.
///
/// The first refill lands one full window after the task starts; the pool is already full
/// before that. Dropping the handle cancels the task.
#[derive(Debug)]
pub struct RefillHandle {
	token: CancellationToken,
	task: Mutex<Option<JoinHandle<()>>>,
}
impl RefillHandle {
	/// Spawns the refill loop for `pool` on `runtime`.
	pub fn spawn(runtime: &Handle, pool: Arc<PermitPool>, window: Duration) -> Self {
		let token = CancellationToken::new();
		let task = runtime.spawn(run(pool, window, token.clone()));

		Self { token, task: Mutex::new(Some(task)) }
	}

	/// Returns `true` while the refill loop is alive and has not been asked to stop.
	///
	/// A loop that died unexpectedly reports `false`, so a starving pool can be detected.
	pub fn is_running(&self) -> bool {
		!self.token.is_cancelled()
			&& self.task.lock().as_ref().is_some_and(|task| !task.is_finished())
	}

	/// Cancels the refill loop and waits for it to exit.
	pub async fn shutdown(&self) {
		self.token.cancel();

		let task = self.task.lock().take();
		let Some(task) = task else {
			return;
		};

		if let Err(err) = task.await {
			obs::warn_refill_exit(&err);
		}
	}
}
impl Drop for RefillHandle {
	fn drop(&mut self) {
		self.token.cancel();
	}
}

async fn run(pool: Arc<PermitPool>, window: Duration, token: CancellationToken) {
	let mut ticker = time::interval_at(Instant::now() + window, window);

	ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

	loop {
		tokio::select! {
			biased;
			_ = token.cancelled() => break,
			_ = ticker.tick() => {
				let restored = pool.refill();

				obs::trace_refill(restored, pool.capacity());
			},
		}
	}
}
