#![forbid(unsafe_code)]

//! Threaded driver for a [`Model`].
//!
//! `FormRuntime` owns the model and a subscription manager. Every message,
//! whether from the host or from a fired timer, goes through one
//! `update` call on the caller's thread; timers only ever deliver into the
//! channel. Subscriptions are reconciled after each update, and dropping
//! the runtime stops every timer still pending.
//!
//! [`FormRuntime::shutdown`] is terminal. Later messages still reach the
//! model, but no subscription is started again.

use std::time::Duration;

use web_time::Instant;

use crate::program::{Cmd, Model};
use crate::subscription::SubscriptionManager;

/// Effects observed while handling one message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The model asked to suppress native form submission.
    pub default_prevented: bool,
    /// Leaf commands executed, including those from chained messages.
    pub commands: usize,
}

/// Drives a model with real timers.
pub struct FormRuntime<M: Model> {
    model: M,
    subscriptions: SubscriptionManager<M::Message>,
    logs: Vec<String>,
    shut_down: bool,
}

impl<M: Model> FormRuntime<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            subscriptions: SubscriptionManager::new(),
            logs: Vec::new(),
            shut_down: false,
        }
    }

    /// Run `Model::init()` and start any declared subscriptions.
    pub fn init(&mut self) -> Dispatch {
        let mut dispatch = Dispatch::default();
        let cmd = self.model.init();
        self.execute(cmd, &mut dispatch);
        self.reconcile();
        dispatch
    }

    /// Handle one message to completion.
    pub fn dispatch(&mut self, msg: M::Message) -> Dispatch {
        let mut dispatch = Dispatch::default();
        let cmd = self.model.update(msg);
        self.execute(cmd, &mut dispatch);
        self.reconcile();
        dispatch
    }

    /// Handle timer messages that have already arrived. Returns how many.
    pub fn pump(&mut self) -> usize {
        let pending = self.subscriptions.drain_messages();
        let count = pending.len();
        for msg in pending {
            self.dispatch(msg);
        }
        count
    }

    /// Handle timer messages until `done` holds or `timeout` passes.
    ///
    /// Returns whether `done` held.
    pub fn pump_until(&mut self, mut done: impl FnMut(&M) -> bool, timeout: Duration) -> bool {
        let start = Instant::now();
        loop {
            if done(&self.model) {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return false;
            }
            if let Some(msg) = self.subscriptions.recv_timeout(timeout - elapsed) {
                self.dispatch(msg);
            }
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Log lines emitted via `Cmd::Log`.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Subscriptions currently running.
    pub fn active_timers(&self) -> usize {
        self.subscriptions.active_count()
    }

    /// Stop every timer now and never start another.
    pub fn shutdown(&mut self) {
        tracing::debug!(active = self.subscriptions.active_count(), "runtime shutdown");
        self.shut_down = true;
        self.subscriptions.stop_all();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    fn reconcile(&mut self) {
        if self.shut_down {
            return;
        }
        self.subscriptions.reconcile(self.model.subscriptions());
    }

    fn execute(&mut self, cmd: Cmd<M::Message>, dispatch: &mut Dispatch) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute(c, dispatch);
                }
            }
            Cmd::Msg(m) => {
                dispatch.commands += 1;
                let cmd = self.model.update(m);
                self.execute(cmd, dispatch);
            }
            Cmd::Log(text) => {
                dispatch.commands += 1;
                tracing::debug!(line = %text, "model log");
                self.logs.push(text);
            }
            Cmd::PreventDefault => {
                dispatch.commands += 1;
                dispatch.default_prevented = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::form::{ContactForm, FormMsg};
    use contact_core::{FieldEdit, QueryType};

    fn quick_form(delay_ms: u64) -> ContactForm {
        ContactForm::new(FormConfig {
            notice_delay: Duration::from_millis(delay_ms),
            ..FormConfig::default()
        })
    }

    fn fill(rt: &mut FormRuntime<ContactForm>) {
        for edit in [
            FieldEdit::FirstName("Ada".into()),
            FieldEdit::LastName("Lovelace".into()),
            FieldEdit::Email("ada@example.com".into()),
            FieldEdit::QueryType(Some(QueryType::General)),
            FieldEdit::Message("Hello".into()),
            FieldEdit::Consent(true),
        ] {
            rt.dispatch(FormMsg::Edit(edit));
        }
    }

    #[test]
    fn submit_reports_prevent_default() {
        let mut rt = FormRuntime::new(ContactForm::default());
        rt.init();
        let d = rt.dispatch(FormMsg::Submit);
        assert!(d.default_prevented);
        assert_eq!(d.commands, 2);
        assert_eq!(rt.logs().len(), 1);
    }

    #[test]
    fn edit_does_not_prevent_default() {
        let mut rt = FormRuntime::new(ContactForm::default());
        let d = rt.dispatch(FormMsg::Edit(FieldEdit::Consent(true)));
        assert_eq!(d, Dispatch::default());
    }

    #[test]
    fn accepted_submit_starts_one_timer() {
        let mut rt = FormRuntime::new(quick_form(60_000));
        fill(&mut rt);
        rt.dispatch(FormMsg::Submit);
        assert_eq!(rt.active_timers(), 1);
        rt.dispatch(FormMsg::DismissNotice);
        assert_eq!(rt.active_timers(), 0);
    }

    #[test]
    fn notice_hides_after_delay() {
        let mut rt = FormRuntime::new(quick_form(20));
        fill(&mut rt);
        rt.dispatch(FormMsg::Submit);
        assert!(rt.model().notice().is_visible());
        let hidden = rt.pump_until(|m| !m.notice().is_visible(), Duration::from_secs(5));
        assert!(hidden);
    }

    #[test]
    fn pump_until_times_out() {
        let mut rt = FormRuntime::new(quick_form(60_000));
        fill(&mut rt);
        rt.dispatch(FormMsg::Submit);
        let hidden = rt.pump_until(|m| !m.notice().is_visible(), Duration::from_millis(20));
        assert!(!hidden);
        assert_eq!(rt.pump(), 0);
    }

    #[test]
    fn shutdown_stops_timers() {
        let mut rt = FormRuntime::new(quick_form(60_000));
        fill(&mut rt);
        rt.dispatch(FormMsg::Submit);
        rt.shutdown();
        assert!(rt.is_shut_down());
        assert_eq!(rt.active_timers(), 0);
    }

    #[test]
    fn dispatch_after_shutdown_starts_no_timer() {
        let mut rt = FormRuntime::new(quick_form(60_000));
        fill(&mut rt);
        rt.dispatch(FormMsg::Submit);
        rt.shutdown();

        rt.dispatch(FormMsg::Edit(FieldEdit::FirstName("Grace".into())));
        assert_eq!(rt.model().fields().first_name, "Grace");
        assert_eq!(rt.active_timers(), 0);

        fill(&mut rt);
        let d = rt.dispatch(FormMsg::Submit);
        assert!(d.default_prevented);
        assert_eq!(rt.active_timers(), 0);
    }
}
