use crate::{Error, Result};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Form visible, results hidden.
    Input,
    /// Form hidden, spinner shown, request in flight.
    Loading,
    Result,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    ResponseSucceeded,
    ResponseFailed,
    /// The "generate again" control.
    Reset,
}

/// Which parts of a model panel are shown in a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub form: bool,
    pub spinner: bool,
    pub results: bool,
    pub generate_again: bool,
}

impl FormPhase {
    pub fn visibility(self) -> Visibility {
        match self {
            Self::Input => Visibility {
                form: true,
                spinner: false,
                results: false,
                generate_again: false,
            },
            Self::Loading => Visibility {
                form: false,
                spinner: true,
                results: false,
                generate_again: false,
            },
            Self::Result | Self::Error => Visibility {
                form: false,
                spinner: false,
                results: true,
                generate_again: true,
            },
        }
    }
}

/// Phase machine shared by the model panels. Only `Input` accepts a submit,
/// so a panel never has two requests in flight.
#[derive(Debug)]
pub struct FormStateMachine {
    name: &'static str,
    phase: FormPhase,
}

impl FormStateMachine {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            phase: FormPhase::Input,
        }
    }

    pub fn current_phase(&self) -> FormPhase {
        self.phase
    }

    fn next(&self, event: FormEvent) -> Option<FormPhase> {
        match (self.phase, event) {
            (FormPhase::Input, FormEvent::Submit) => Some(FormPhase::Loading),
            (FormPhase::Loading, FormEvent::ResponseSucceeded) => Some(FormPhase::Result),
            (FormPhase::Loading, FormEvent::ResponseFailed) => Some(FormPhase::Error),
            (FormPhase::Result | FormPhase::Error, FormEvent::Reset) => Some(FormPhase::Input),
            _ => None,
        }
    }

    /// Checks an event would be accepted without applying it.
    pub fn ensure_accepts(&self, event: FormEvent) -> Result<()> {
        match self.next(event) {
            Some(_) => Ok(()),
            None => Err(self.invalid(event)),
        }
    }

    pub fn transition(&mut self, event: FormEvent) -> Result<()> {
        let Some(new_phase) = self.next(event) else {
            warn!(
                "Invalid {} transition from {:?} with event {:?}",
                self.name, self.phase, event
            );
            return Err(self.invalid(event));
        };

        info!(
            "{} phase transition: {:?} -> {:?} (event: {:?})",
            self.name, self.phase, new_phase, event
        );
        self.phase = new_phase;
        debug!("{} now shows {:?}", self.name, self.phase.visibility());
        Ok(())
    }

    fn invalid(&self, event: FormEvent) -> Error {
        Error::InvalidTransition {
            current: format!("{:?}", self.phase),
            requested: format!("{:?}", event),
        }
    }
}
