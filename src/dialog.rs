//! USSD dialog state machine
//!
//! Each gateway request carries the whole `*`-joined input history; only the
//! last token is consumed and the stored [`Flow`] is the dialog's memory.
//! [`transition`] decides the next step without I/O, the [`DialogEngine`]
//! runs the side effects and keeps the session store in sync.

mod engine;
mod flow;
pub mod menus;
mod transition;

#[cfg(test)]
mod proptests;

pub use engine::{DialogEngine, DialogRequest};
pub use flow::Flow;
pub use transition::{last_input, transition, Step};

use std::fmt;

/// Response sent back to the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `CON`: the handset shows a prompt and the dialog continues
    Continue(String),
    /// `END`: the dialog is closed
    End(String),
}

impl Reply {
    pub fn is_end(&self) -> bool {
        matches!(self, Reply::End(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Continue(text) => write!(f, "CON {text}"),
            Reply::End(text) => write!(f, "END {text}"),
        }
    }
}
