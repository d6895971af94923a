#![forbid(unsafe_code)]

//! Elm-style program contract.
//!
//! A [`Model`] owns all form state and reacts to one message at a time.
//! `update` never blocks: it changes state and returns a [`Cmd`] describing
//! follow-up effects. Timers are declared through
//! [`Model::subscriptions`]; the driver starts and cancels them as the
//! declared set changes.

use crate::subscription::Subscription;

/// Application state driven by discrete messages.
pub trait Model: Sized {
    /// Messages this model reacts to.
    type Message: Send + 'static;

    /// Called once before the first message.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Declare active subscriptions.
    ///
    /// Called after each `update()`. The driver compares the returned set
    /// (by `SubId`) against what is running and starts or stops as needed.
    /// Returning an empty vec stops everything.
    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        vec![]
    }
}

/// Effects requested by `update`.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Run several commands in order.
    Batch(Vec<Cmd<M>>),
    /// Feed a message straight back into `update`.
    Msg(M),
    /// Record a diagnostic line in the driver's log.
    Log(String),
    /// Ask a browser-like host to suppress the native form submission.
    PreventDefault,
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(text: impl Into<String>) -> Self {
        Self::Log(text.into())
    }

    /// Combine commands, dropping no-ops and flattening single entries.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Number of leaf commands (batches are expanded).
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }

    /// Short label for logs and command records.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Log(_) => "Log",
            Self::PreventDefault => "PreventDefault",
        }
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Log(s) => f.debug_tuple("Log").field(s).finish(),
            Self::PreventDefault => write!(f, "PreventDefault"),
        }
    }
}
