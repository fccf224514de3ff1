//! Hand a list of choices to a selection surface and wait for the pick.
//!
//! The surface runs on its own schedule (a UI callback, an HTTP request).
//! [`ChoiceRendezvous::present`] gives it a [`ChoiceResponder`], the only
//! writer of the pending cell, and returns a [`ChoiceWaiter`], the only
//! reader. Resolving consumes the responder, so each cycle is written at most
//! once.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

use crate::error::RendezvousError;

pub const QUIT_LABEL: &str = "QUIT THIS COMMAND";
pub const KEEP_GOING_PREFIX: &str = "KEEP GOING WITH CURRENT WORD ";

/// One entry of a presented choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Abort the whole operation.
    Quit,
    /// Accept the current lookup result as final.
    KeepGoing { key: String },
    /// Retry with this key.
    Key(String),
}

impl Choice {
    /// Text shown on the selection surface.
    pub fn label(&self) -> String {
        match self {
            Self::Quit => QUIT_LABEL.to_string(),
            Self::KeepGoing { key } => format!("{KEEP_GOING_PREFIX}{key}"),
            Self::Key(key) => key.clone(),
        }
    }
}

/// Contents of the shared cell for one presentation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChoice {
    Unset,
    Resolved(Choice),
}

impl PendingChoice {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Displays choices and eventually resolves the responder it is given.
pub trait SelectionSurface: Send + Sync {
    fn show_choices(&self, choices: &[Choice], responder: ChoiceResponder);
}

/// A resolve attempt with a choice that was not offered.
#[derive(Debug, Error)]
#[error("choice {label:?} was not offered")]
pub struct Rejected {
    pub label: String,
    /// Handed back so a valid choice can still be made.
    pub responder: ChoiceResponder,
}

/// Write half of a pending choice.
#[derive(Debug)]
pub struct ChoiceResponder {
    offered: Vec<Choice>,
    cell: watch::Sender<PendingChoice>,
}

impl ChoiceResponder {
    pub fn labels(&self) -> Vec<String> {
        self.offered.iter().map(Choice::label).collect()
    }

    pub fn resolve(self, choice: Choice) -> Result<(), Rejected> {
        if !self.offered.contains(&choice) {
            return Err(Rejected {
                label: choice.label(),
                responder: self,
            });
        }
        self.cell.send_replace(PendingChoice::Resolved(choice));
        Ok(())
    }

    /// Resolve with the offered choice whose label is `label`.
    pub fn resolve_label(self, label: &str) -> Result<(), Rejected> {
        match self.offered.iter().find(|c| c.label() == label).cloned() {
            Some(choice) => self.resolve(choice),
            None => Err(Rejected {
                label: label.to_string(),
                responder: self,
            }),
        }
    }
}

/// Read half of a pending choice.
#[derive(Debug)]
pub struct ChoiceWaiter {
    cell: watch::Receiver<PendingChoice>,
    timeout: Option<Duration>,
}

impl ChoiceWaiter {
    /// Current cell contents without waiting.
    pub fn peek(&self) -> PendingChoice {
        self.cell.borrow().clone()
    }

    /// Suspend until the surface resolves the choice.
    pub async fn wait(mut self) -> Result<Choice, RendezvousError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, resolved(&mut self.cell))
                .await
                .map_err(|_| RendezvousError::TimedOut(limit))?,
            None => resolved(&mut self.cell).await,
        }
    }
}

async fn resolved(cell: &mut watch::Receiver<PendingChoice>) -> Result<Choice, RendezvousError> {
    let value = cell
        .wait_for(PendingChoice::is_resolved)
        .await
        .map_err(|_| RendezvousError::SurfaceClosed)?;
    match &*value {
        PendingChoice::Resolved(choice) => Ok(choice.clone()),
        PendingChoice::Unset => Err(RendezvousError::SurfaceClosed),
    }
}

/// Presents choice lists through a selection surface.
#[derive(Clone)]
pub struct ChoiceRendezvous {
    surface: Arc<dyn SelectionSurface>,
    timeout: Option<Duration>,
}

impl ChoiceRendezvous {
    pub fn new(surface: Arc<dyn SelectionSurface>) -> Self {
        Self {
            surface,
            timeout: None,
        }
    }

    /// Bound how long a single wait may take.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Show `choices` and return the waiter. Does not block.
    pub fn present(&self, choices: Vec<Choice>) -> ChoiceWaiter {
        let (tx, rx) = watch::channel(PendingChoice::Unset);
        let responder = ChoiceResponder {
            offered: choices.clone(),
            cell: tx,
        };
        self.surface.show_choices(&choices, responder);
        ChoiceWaiter {
            cell: rx,
            timeout: self.timeout,
        }
    }
}
