#![forbid(unsafe_code)]

//! Contact form runtime.
//!
//! Drives the pure state in `contact-core` as an Elm-style program.
//!
//! # Key Components
//!
//! - [`program`] - `Model` trait and `Cmd` effects
//! - [`form`] - the contact form model
//! - [`submission`] - validate-then-settle controller
//! - [`notice`] - confirmation notice with a cancellable auto-hide timer
//! - [`subscription`] - timer subscriptions reconciled by id
//! - [`runtime`] - threaded driver with real timers
//! - [`simulator`] - deterministic driver on a virtual clock
//! - [`config`] - defaults and environment overrides

pub mod config;
pub mod form;
pub mod notice;
pub mod program;
pub mod runtime;
pub mod simulator;
pub mod submission;
pub mod subscription;

pub use config::{ConfigError, FormConfig, FormConfigParse};
pub use form::{ContactForm, FormMsg};
pub use notice::{DEFAULT_NOTICE_DELAY, Notice, NoticeScheduler, NoticeToken};
pub use program::{Cmd, Model};
pub use runtime::{Dispatch, FormRuntime};
pub use simulator::{CmdRecord, ProgramSimulator};
pub use submission::{SubmitPhase, Submission, SubmissionController};
pub use subscription::{After, StopSignal, SubId, Subscription};
