//! The output sink for the model.
//!
//! Every construction, placement, removal, and report draws an [`Event`]
//! that is announced to the observers registered on a library. The wording
//! of an event is illustrative rather than a compatibility contract; what
//! matters is that each class of event is distinguishable. Announcements
//! are a side effect and never part of the functional contract of an
//! operation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::construct::{BookId, Report};
use crate::error::ShelvingError;

/// One line in the stream of things that happened to a library.
#[derive(Debug, Clone)]
pub enum Event {
    Created {
        book: BookId,
        name: String,
        at: DateTime<Utc>,
    },
    Shelved {
        book: BookId,
        name: String,
        shelf: String,
        library: String,
        at: DateTime<Utc>,
    },
    Unshelved {
        book: BookId,
        name: String,
        shelf: String,
        library: String,
        at: DateTime<Utc>,
    },
    Rejected {
        reason: String,
        at: DateTime<Utc>,
    },
    Reported {
        library: String,
        text: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub(crate) fn created(book: BookId, name: &str) -> Self {
        Self::Created {
            book,
            name: name.to_owned(),
            at: Utc::now(),
        }
    }
    pub(crate) fn shelved(book: BookId, name: &str, shelf: &str, library: &str) -> Self {
        Self::Shelved {
            book,
            name: name.to_owned(),
            shelf: shelf.to_owned(),
            library: library.to_owned(),
            at: Utc::now(),
        }
    }
    pub(crate) fn unshelved(book: BookId, name: &str, shelf: &str, library: &str) -> Self {
        Self::Unshelved {
            book,
            name: name.to_owned(),
            shelf: shelf.to_owned(),
            library: library.to_owned(),
            at: Utc::now(),
        }
    }
    pub(crate) fn rejected(error: &ShelvingError) -> Self {
        Self::Rejected {
            reason: error.to_string(),
            at: Utc::now(),
        }
    }
    pub(crate) fn reported(report: &Report) -> Self {
        Self::Reported {
            library: report.library().to_owned(),
            text: report.to_string(),
            at: Utc::now(),
        }
    }
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Created { at, .. }
            | Self::Shelved { at, .. }
            | Self::Unshelved { at, .. }
            | Self::Rejected { at, .. }
            | Self::Reported { at, .. } => *at,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Created { name, .. } => write!(f, "{name} created"),
            Self::Shelved {
                name,
                shelf,
                library,
                ..
            } => write!(f, "{name} added to {shelf} of {library}"),
            Self::Unshelved { name, .. } => {
                write!(f, "{name} unshelved and returned to storage")
            }
            Self::Rejected { reason, .. } => write!(f, "rejected: {reason}"),
            Self::Reported { library, .. } => write!(f, "report drawn for {library}"),
        }
    }
}

/// Trait for observing the event stream of a library.
pub trait Observer {
    /// Called once for every event, in the order the events happened.
    fn on_event(&self, event: &Event);
}

/// Logs all events through the tracing facade. This is the production
/// sink; wire a `tracing-subscriber` up in the binary to see the output.
#[derive(Debug)]
pub struct EventLogger;

impl Observer for EventLogger {
    fn on_event(&self, event: &Event) {
        match event {
            Event::Created { book, name, .. } => {
                info!(book = *book, name = %name, "created");
            }
            Event::Shelved {
                book,
                name,
                shelf,
                library,
                ..
            } => {
                info!(book = *book, name = %name, shelf = %shelf, library = %library, "shelved");
            }
            Event::Unshelved {
                book,
                name,
                shelf,
                library,
                ..
            } => {
                info!(book = *book, name = %name, shelf = %shelf, library = %library, "unshelved");
            }
            Event::Rejected { reason, .. } => {
                warn!(%reason, "operation rejected");
            }
            Event::Reported { library, .. } => {
                info!(library = %library, "report drawn");
            }
        }
    }
}

/// Captures the event stream in memory. Cloning a recorder yields a second
/// handle onto the same stream, so one clone can be registered with the
/// library while the other stays with the caller for inspection.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    seen: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn events(&self) -> Vec<Event> {
        self.seen.borrow().clone()
    }
    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }
    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }
}

impl Observer for Recorder {
    fn on_event(&self, event: &Event) {
        self.seen.borrow_mut().push(event.clone());
    }
}
