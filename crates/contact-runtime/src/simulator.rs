#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` runs a [`Model`] on a virtual clock. Declared timers
//! never spawn threads; they fire when [`advance`](ProgramSimulator::advance)
//! moves the clock past their deadline, in deadline order.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use contact_runtime::form::{ContactForm, FormMsg};
//! use contact_runtime::simulator::ProgramSimulator;
//!
//! let mut sim = ProgramSimulator::new(ContactForm::default());
//! sim.init();
//! sim.send(FormMsg::Submit);
//! assert_eq!(sim.default_prevented(), 1);
//! assert_eq!(sim.model().fields().errors.len(), 6);
//!
//! sim.advance(Duration::from_secs(10));
//! assert_eq!(sim.pending_timers(), 0);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use crate::program::{Cmd, Model};
use crate::subscription::SubId;

/// Record of a command executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Batch of commands.
    Batch(usize),
    /// Message fed back into the model.
    Msg,
    /// Log line emitted.
    Log(String),
    /// Native submission suppressed.
    PreventDefault,
    /// A declared timer fired at the given virtual time.
    TimerFired { id: SubId, at: Duration },
}

/// Deterministic simulator for [`Model`] testing.
pub struct ProgramSimulator<M: Model> {
    model: M,
    /// Virtual time since the simulator was created.
    now: Duration,
    /// Declared timers. `None` once fired (or for non-timer subscriptions);
    /// the id stays until the model stops declaring it.
    timers: BTreeMap<SubId, Option<(Duration, M::Message)>>,
    command_log: Vec<CmdRecord>,
    logs: Vec<String>,
}

impl<M: Model> ProgramSimulator<M> {
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            now: Duration::ZERO,
            timers: BTreeMap::new(),
            command_log: Vec::new(),
            logs: Vec::new(),
        }
    }

    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.reconcile();
    }

    /// Dispatch a message through `Model::update()` and execute the result.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
        self.reconcile();
    }

    /// Move the clock forward, firing every timer that comes due.
    ///
    /// Timers declared by a fired timer's update are armed from the moment
    /// it fired, so chains resolve within a single call.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        while let Some((id, at)) = self.next_due(target) {
            self.now = at;
            let Some((_, msg)) = self.timers.get_mut(&id).and_then(Option::take) else {
                break;
            };
            self.command_log.push(CmdRecord::TimerFired { id, at });
            self.send(msg);
        }
        self.now = target;
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Timers armed and not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.timers.values().filter(|t| t.is_some()).count()
    }

    /// Virtual time at which the next timer fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().flatten().map(|(at, _)| *at).min()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    /// How many times the model asked to suppress native submission.
    pub fn default_prevented(&self) -> usize {
        self.command_log
            .iter()
            .filter(|r| matches!(r, CmdRecord::PreventDefault))
            .count()
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    fn next_due(&self, target: Duration) -> Option<(SubId, Duration)> {
        self.timers
            .iter()
            .filter_map(|(id, t)| t.as_ref().map(|(at, _)| (*id, *at)))
            .filter(|(_, at)| *at <= target)
            .min_by_key(|(id, at)| (*at, *id))
    }

    /// Arm newly declared timers and drop undeclared ones.
    fn reconcile(&mut self) {
        let declared = self.model.subscriptions();
        let ids: HashSet<SubId> = declared.iter().map(|s| s.id()).collect();
        self.timers.retain(|id, _| ids.contains(id));

        for sub in declared {
            let id = sub.id();
            if self.timers.contains_key(&id) {
                continue;
            }
            let now = self.now;
            self.timers.insert(id, sub.timer().map(|(delay, msg)| (now + delay, msg)));
        }
    }

    /// Execute a command without I/O.
    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Log(text) => {
                self.command_log.push(CmdRecord::Log(text.clone()));
                self.logs.push(text);
            }
            Cmd::PreventDefault => {
                self.command_log.push(CmdRecord::PreventDefault);
            }
        }
    }
}
