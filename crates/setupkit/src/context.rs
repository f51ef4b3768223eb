//! Callback traits and run context
//!
//! These keep the engine free of terminal code: the binary supplies a
//! spinner and a prompt, tests supply no-ops.

use crate::types::TaskOutcome;
use crate::upgrade::PendingUpdate;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};

/// Progress updates emitted while a task runs
pub trait ProgressCallback {
    /// Task is about to be checked
    fn on_task_start(&mut self, id: &str, description: &str);

    /// Check said "not done"; mutation is starting
    fn on_apply_start(&mut self, id: &str, description: &str);

    /// Mutation finished, successfully or not
    ///
    /// Called before [`ProgressCallback::on_task_complete`], so anything
    /// animated can be torn down before the outcome is printed.
    fn on_apply_end(&mut self, id: &str);

    /// Terminal state reached
    fn on_task_complete(&mut self, outcome: &TaskOutcome);
}

/// Operator confirmation for the system upgrade task
pub trait ConfirmCallback {
    /// Show the pending updates and ask whether to proceed
    ///
    /// `updates` is advisory; it may be empty even when updates exist.
    fn confirm_upgrade(&mut self, description: &str, updates: &[PendingUpdate]) -> Result<bool>;
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_task_start(&mut self, _id: &str, _description: &str) {}
    fn on_apply_start(&mut self, _id: &str, _description: &str) {}
    fn on_apply_end(&mut self, _id: &str) {}
    fn on_task_complete(&mut self, _outcome: &TaskOutcome) {}
}

/// Auto-confirm callback (always returns true)
pub struct AutoConfirm;

impl ConfirmCallback for AutoConfirm {
    fn confirm_upgrade(&mut self, _description: &str, _updates: &[PendingUpdate]) -> Result<bool> {
        Ok(true)
    }
}

/// Auto-decline callback (always returns false)
pub struct AutoDecline;

impl ConfirmCallback for AutoDecline {
    fn confirm_upgrade(&mut self, _description: &str, _updates: &[PendingUpdate]) -> Result<bool> {
        Ok(false)
    }
}

static NEVER: AtomicBool = AtomicBool::new(false);

/// Read-only view of the process interrupt flag
///
/// The flag is a `'static` atomic so that a signal handler can set it.
#[derive(Debug, Clone, Copy)]
pub struct Interrupt {
    flag: &'static AtomicBool,
}

impl Interrupt {
    pub fn new(flag: &'static AtomicBool) -> Self {
        Self { flag }
    }

    /// A flag that is never raised
    pub fn never() -> Self {
        Self { flag: &NEVER }
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::never()
    }
}
