use std::collections::HashMap;

use futures::future::{
	FutureExt,
	Shared,
};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{
	debug,
	warn,
};

/// Resolves with `Ok(())` once the client reconnected, or with an error if the signal was
/// retired without firing.
pub type ReconnectSignal = Shared<oneshot::Receiver<()>>;

struct PendingSignal {
	notifier: oneshot::Sender<()>,
	signal: ReconnectSignal,
}

/// Named single-fire notifications of a reconnect.
#[derive(Default)]
pub struct ReconnectRegistry {
	pending: Mutex<HashMap<String, PendingSignal>>,
}

impl ReconnectRegistry {
	pub fn new() -> Self {
		Self { pending: Mutex::new(HashMap::new()) }
	}

	/// Register a signal under `name`. While a signal with that name is pending, the same
	/// signal is returned again.
	pub fn register(&self, name: &str) -> ReconnectSignal {
		let mut pending = self.pending.lock();
		if let Some(existing) = pending.get(name) {
			warn!(message = "Reconnect notification registered twice", name = name);
			return existing.signal.clone()
		}

		let (notifier, receiver) = oneshot::channel();
		let signal = receiver.shared();
		pending.insert(name.to_owned(), PendingSignal { notifier, signal: signal.clone() });
		signal
	}

	/// Fire every pending signal and forget them. Returns the number of signals fired.
	pub fn notify_all(&self) -> usize {
		let mut pending = self.pending.lock();
		let count = pending.len();
		for (name, pending_signal) in pending.drain() {
			debug!(message = "Firing reconnect notification", name = name.as_str());
			let _ = pending_signal.notifier.send(());
		}
		count
	}

	/// Forget the signal registered under `name` without firing it.
	pub fn retire(&self, name: &str) -> bool {
		self.pending.lock().remove(name).is_some()
	}

	pub fn is_registered(&self, name: &str) -> bool {
		self.pending.lock().contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.pending.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.pending.lock().is_empty()
	}
}
