//! Shelving – an in-memory model of libraries, shelves, and books.
//!
//! The model is a strict containment hierarchy:
//! * A [`construct::Library`] owns a keyed, declaration-ordered collection
//!   of shelves and a storage pool for unshelved books.
//! * A [`construct::Shelf`] is a passive record: an identifier, a capacity,
//!   and the ordered sequence of books currently on it.
//! * A [`construct::Book`] is a unit record with a name and an optional
//!   [`construct::Placement`] back-reference (library name, shelf
//!   identifier) that is resolved by lookup at use time.
//!
//! Book records are owned and looked up by "keeper" structures (see the
//! `construct` module); shelves and storage hold only book identities, so
//! a book is in exactly one place at any time. All mutation goes through
//! the owning library, which upholds two invariants: every book is either
//! on exactly one shelf or in storage, and a shelf never holds more books
//! than its capacity.
//!
//! ## Modules
//! * [`construct`] – The core records, their keepers, and the operations
//!   (`add_book`, `shelve`, `unshelve`, `report`), plus the [`construct::Network`]
//!   keyed collection of libraries.
//! * [`error`] – The [`error::ShelvingError`] enum; failed operations are
//!   reported, never fatal, and leave the model unchanged.
//! * [`event`] – The output sink: an [`event::Observer`] seam with a
//!   tracing-backed logger and an in-memory recorder.
//! * [`settings`] – File/environment configuration for the binary.
//!
//! ## Re-shelving
//! Shelving an already shelved book is a policy decision, not a fixed
//! behavior: [`construct::ReshelvePolicy::Reject`] (the default) refuses
//! until the book is unshelved, [`construct::ReshelvePolicy::AutoTransfer`]
//! moves the book directly. Either way the capacity check applies to the
//! destination shelf's occupancy excluding the book being moved.
//!
//! ## Quick Start
//! ```
//! use shelving::construct::{Library, ShelfPlan};
//! let plan = ShelfPlan::labeled(3, 100, vec![
//!     "fiction_1".into(), "classics_1".into(), "science_1".into(),
//! ]);
//! let mut library = Library::new("Twelfth International Library", &plan).unwrap();
//! let book = library.add_book("A Tale of Two Cities");
//! library.shelve(book, "classics_1").unwrap();
//! let report = library.report();
//! assert_eq!(report.shelves()[1].1, vec!["A Tale of Two Cities"]);
//! ```
//!
//! The model is single-threaded by design: operations are synchronous,
//! call-and-return, and take `&mut self` on the library, so no locking
//! discipline exists anywhere in the crate.

pub mod construct;
pub mod error;
pub mod event;
pub mod settings;
