#![forbid(unsafe_code)]

//! Subscriptions: cancellable deferred event sources.
//!
//! A model declares what should be running via `Model::subscriptions()`.
//! After each update the driver reconciles by id:
//!
//! 1. ids that are new get a background thread
//! 2. ids that disappeared are signalled to stop
//! 3. ids present in both keep running untouched
//!
//! Dropping the [`SubscriptionManager`] stops everything, so a timer never
//! delivers into a model that has been torn down.

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use web_time::Instant;

/// Identity used to deduplicate subscriptions across updates.
pub type SubId = u64;

/// A source of messages running off the update thread.
pub trait Subscription<M: Send + 'static>: Send {
    /// Subscriptions with equal ids are considered the same subscription.
    fn id(&self) -> SubId;

    /// Produce messages until stopped or the receiver is gone.
    ///
    /// Runs on a background thread.
    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal);

    /// Delay and message of a single-shot timer.
    ///
    /// Virtual-clock drivers use this instead of spawning a thread. `None`
    /// for anything that is not a plain fire-once timer.
    fn timer(&self) -> Option<(Duration, M)> {
        None
    }
}

/// Stop flag observed by a running subscription.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a linked (signal, trigger) pair.
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until stopped or `duration` elapses.
    ///
    /// Returns `true` if stopped, `false` on timeout. Spurious wakeups are
    /// absorbed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let start = Instant::now();
        loop {
            if *stopped {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, duration - elapsed)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
        }
    }
}

/// Driver-side handle that stops a subscription.
pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

pub(crate) struct RunningSubscription {
    pub(crate) id: SubId,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningSubscription {
    /// Stop and join.
    pub(crate) fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RunningSubscription {
    fn drop(&mut self) {
        // Don't join in drop to avoid blocking
        self.trigger.stop();
    }
}

/// Starts and stops subscriptions to match the declared set.
pub(crate) struct SubscriptionManager<M: Send + 'static> {
    active: Vec<RunningSubscription>,
    sender: mpsc::Sender<M>,
    receiver: mpsc::Receiver<M>,
}

impl<M: Send + 'static> SubscriptionManager<M> {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            active: Vec::new(),
            sender,
            receiver,
        }
    }

    pub(crate) fn reconcile(&mut self, subscriptions: Vec<Box<dyn Subscription<M>>>) {
        let new_ids: HashSet<SubId> = subscriptions.iter().map(|s| s.id()).collect();
        let active_before = self.active.len();

        let mut remaining = Vec::new();
        for running in self.active.drain(..) {
            if new_ids.contains(&running.id) {
                remaining.push(running);
            } else {
                tracing::debug!(sub_id = running.id, "stopping subscription");
                running.stop();
            }
        }
        self.active = remaining;

        let mut active_ids: HashSet<SubId> = self.active.iter().map(|r| r.id).collect();
        for sub in subscriptions {
            let id = sub.id();
            if !active_ids.insert(id) {
                continue;
            }
            tracing::debug!(sub_id = id, "starting subscription");
            let (signal, trigger) = StopSignal::new();
            let sender = self.sender.clone();
            let thread = thread::spawn(move || {
                sub.run(sender, signal);
            });
            self.active.push(RunningSubscription {
                id,
                trigger,
                thread: Some(thread),
            });
        }

        tracing::trace!(
            active_before,
            active_after = self.active.len(),
            "subscription reconcile complete"
        );
    }

    /// Messages already delivered, without waiting.
    pub(crate) fn drain_messages(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }

    /// Wait up to `timeout` for the next message.
    pub(crate) fn recv_timeout(&self, timeout: Duration) -> Option<M> {
        self.receiver.recv_timeout(timeout).ok()
    }

    #[inline]
    pub(crate) fn active_count(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn stop_all(&mut self) {
        for running in self.active.drain(..) {
            running.stop();
        }
    }
}

impl<M: Send + 'static> Drop for SubscriptionManager<M> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

// --- Built-in subscriptions ---

/// Fire-once timer.
///
/// Sends its message once after `delay`, unless stopped first. Stopping
/// happens when the model no longer declares this id.
pub struct After<M: Send + 'static> {
    id: SubId,
    delay: Duration,
    make_msg: Box<dyn Fn() -> M + Send + Sync>,
}

impl<M: Send + 'static> After<M> {
    pub fn new(
        id: SubId,
        delay: Duration,
        make_msg: impl Fn() -> M + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            delay,
            make_msg: Box::new(make_msg),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<M: Send + 'static> Subscription<M> for After<M> {
    fn id(&self) -> SubId {
        self.id
    }

    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal) {
        if stop.wait_timeout(self.delay) {
            tracing::trace!(sub_id = self.id, "timer cancelled before firing");
            return;
        }
        if sender.send((self.make_msg)()).is_err() {
            tracing::trace!(sub_id = self.id, "timer fired after receiver closed");
        }
    }

    fn timer(&self) -> Option<(Duration, M)> {
        Some((self.delay, (self.make_msg)()))
    }
}
