//! Thread-local context tracking for crash reports.
//!
//! Records which invocation phase is running and which dependency archive is
//! being extracted, so a panic report can say where it happened. Guards use
//! RAII to restore the previous context on drop.

use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<InvocationContext> = const { RefCell::new(InvocationContext::new()) };
}

/// Context snapshot for the running invocation.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Current invocation phase
    pub phase: Option<DcePhase>,
    /// Archive currently being extracted
    pub current_archive: Option<PathBuf>,
}

impl InvocationContext {
    /// Create a new empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_archive: None,
        }
    }
}

/// States of one DCE invocation.
///
/// `Idle -> Extracting -> Assembling -> Invoking -> {Done | Failed}`, with
/// `Cleanup` entered last from whichever state the invocation stopped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DcePhase {
    Idle,
    Extracting,
    Assembling,
    Invoking,
    Done,
    Failed,
    Cleanup,
}

impl DcePhase {
    /// Whether the state machine permits moving from `self` to `next`
    pub fn can_transition_to(self, next: DcePhase) -> bool {
        use DcePhase::*;
        matches!(
            (self, next),
            (Idle, Extracting)
                | (Extracting, Assembling)
                | (Assembling, Invoking)
                | (Invoking, Done)
                | (Idle | Extracting | Assembling | Invoking, Failed)
                | (Done | Failed, Cleanup)
        )
    }
}

impl fmt::Display for DcePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Extracting => "extracting",
            Self::Assembling => "assembling",
            Self::Invoking => "invoking",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// RAII guard for restoring invocation context on drop.
pub struct ContextGuard {
    previous: InvocationContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current phase without returning a guard.
///
/// Phase transitions inside one invocation are sequential, so the phase
/// persists until the next call.
pub fn set_phase_persistent(phase: DcePhase) {
    CURRENT_CONTEXT.with(|ctx| {
        ctx.borrow_mut().phase = Some(phase);
    });
}

/// Set the archive being extracted.
///
/// Returns a guard that restores the previous archive on drop.
#[must_use]
pub fn set_current_archive(path: impl Into<PathBuf>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_archive = Some(path.into());
        ContextGuard { previous }
    })
}

/// Get the current context snapshot.
#[must_use]
pub fn get_current_context() -> InvocationContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = InvocationContext::new();
    });
}
