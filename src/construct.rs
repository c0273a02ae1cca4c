use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::hash_map::Entry;
use seahash::SeaHasher;

use serde::Deserialize;

// used to print out readable forms of a construct
use std::fmt;

// our own stuff that we need
use crate::error::{Result, ShelvingError};
use crate::event::{Event, Observer};

// ------------- Book identity -------------
pub type BookId = u64;

pub type IdHasher = BuildHasherDefault<SeaHasher>;
pub type KeyHasher = BuildHasherDefault<SeaHasher>;

pub const GENESIS: BookId = 0;

// Books are only ever created, never destroyed, so the generator
// just counts upwards from the genesis id.
#[derive(Debug)]
pub struct BookIdGenerator {
    lower_bound: BookId,
}

impl BookIdGenerator {
    pub fn new() -> Self {
        Self {
            lower_bound: GENESIS,
        }
    }
    pub fn generate(&mut self) -> BookId {
        self.lower_bound += 1;
        self.lower_bound
    }
}

impl Default for BookIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- Placement -------------
// A non-owning reference from a book back to its current location,
// resolved by lookup at use time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    library: String,
    shelf: String,
}

impl Placement {
    pub fn new(library: &str, shelf: &str) -> Self {
        Self {
            library: library.to_owned(),
            shelf: shelf.to_owned(),
        }
    }
    pub fn library(&self) -> &str {
        &self.library
    }
    pub fn shelf(&self) -> &str {
        &self.shelf
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} of {}", self.shelf, self.library)
    }
}

// ------------- Book -------------
#[derive(Debug)]
pub struct Book {
    book: BookId,
    name: String,
    placement: Option<Placement>,
}

impl Book {
    pub fn new(book: BookId, name: String) -> Self {
        Self {
            book,
            name,
            placement: None,
        }
    }
    // It's intentional to encapsulate the fields in the struct
    // and only expose them using getters, since all mutation has
    // to go through the owning library.
    pub fn book(&self) -> BookId {
        self.book
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }
    fn place(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }
    fn unplace(&mut self) {
        self.placement = None;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.placement {
            Some(placement) => write!(f, "{} on {}", self.name, placement),
            None => write!(f, "{} in storage", self.name),
        }
    }
}

// ------------- Shelf -------------
// A passive record: the sequence is only ever changed by the
// operations on the owning library.
#[derive(Debug)]
pub struct Shelf {
    identifier: String,
    capacity: usize,
    books: Vec<BookId>,
}

impl Shelf {
    pub fn new(identifier: String, capacity: usize) -> Self {
        Self {
            identifier,
            capacity,
            books: Vec::new(),
        }
    }
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn books(&self) -> &[BookId] {
        &self.books
    }
    pub fn occupancy(&self) -> usize {
        self.books.len()
    }
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
    fn push(&mut self, book: BookId) {
        self.books.push(book);
    }
    fn take(&mut self, book: BookId) -> Option<BookId> {
        let position = self.books.iter().position(|kept| *kept == book)?;
        Some(self.books.remove(position))
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}/{})",
            self.identifier,
            self.books.len(),
            self.capacity
        )
    }
}

#[derive(Debug)]
pub struct ShelfKeeper {
    kept: HashMap<String, Shelf, KeyHasher>,
    order: Vec<String>, // double indexing, but declaration order matters for reporting
}

impl ShelfKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
            order: Vec::new(),
        }
    }
    pub fn keep(&mut self, shelf: Shelf) -> bool {
        let keepsake = shelf.identifier().to_owned();
        let mut previously_kept = true;
        match self.kept.entry(keepsake.clone()) {
            Entry::Vacant(e) => {
                e.insert(shelf);
                previously_kept = false;
            }
            Entry::Occupied(_e) => (),
        };
        if !previously_kept {
            self.order.push(keepsake);
        }
        previously_kept
    }
    pub fn get(&self, identifier: &str) -> Option<&Shelf> {
        self.kept.get(identifier)
    }
    fn get_mut(&mut self, identifier: &str) -> Option<&mut Shelf> {
        self.kept.get_mut(identifier)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Shelf> {
        self.order
            .iter()
            .filter_map(|identifier| self.kept.get(identifier))
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl Default for ShelfKeeper {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct BookKeeper {
    kept: HashMap<BookId, Book, IdHasher>,
}

impl BookKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
    pub fn keep(&mut self, book: Book) {
        self.kept.insert(book.book(), book);
    }
    pub fn get(&self, book: BookId) -> Option<&Book> {
        self.kept.get(&book)
    }
    fn get_mut(&mut self, book: BookId) -> Option<&mut Book> {
        self.kept.get_mut(&book)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl Default for BookKeeper {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- Construction plan -------------
/// What happens when an already shelved book is shelved again.
///
/// `Reject` refuses the operation until the book has been unshelved,
/// `AutoTransfer` silently unshelves and reshelves it. The capacity
/// check on the destination always excludes the book being moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReshelvePolicy {
    #[default]
    Reject,
    AutoTransfer,
}

/// The shelf configuration a library is constructed from: a shelf count,
/// a uniform per-shelf capacity, and optionally explicit identifiers.
/// Without identifiers the shelves are labeled shelf_1, shelf_2, and so on.
#[derive(Debug, Clone)]
pub struct ShelfPlan {
    shelves: usize,
    capacity: usize,
    identifiers: Vec<String>,
}

impl ShelfPlan {
    pub fn uniform(shelves: usize, capacity: usize) -> Self {
        Self {
            shelves,
            capacity,
            identifiers: Vec::new(),
        }
    }
    pub fn labeled(shelves: usize, capacity: usize, identifiers: Vec<String>) -> Self {
        Self {
            shelves,
            capacity,
            identifiers,
        }
    }
    pub fn shelves(&self) -> usize {
        self.shelves
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    // Construction fails outright on a bad plan, so that no partially
    // configured library is ever observable.
    fn resolve(&self) -> Result<Vec<String>> {
        if self.shelves == 0 {
            return Err(ShelvingError::Config(String::from(
                "a library needs at least one shelf",
            )));
        }
        if self.capacity == 0 {
            return Err(ShelvingError::Config(String::from(
                "shelf capacity must be positive",
            )));
        }
        if self.identifiers.is_empty() {
            return Ok((1..=self.shelves).map(|n| format!("shelf_{n}")).collect());
        }
        if self.identifiers.len() != self.shelves {
            return Err(ShelvingError::ShelfCountMismatch {
                declared: self.shelves,
                supplied: self.identifiers.len(),
            });
        }
        let mut seen: HashSet<&str, KeyHasher> = HashSet::default();
        for identifier in &self.identifiers {
            if !seen.insert(identifier) {
                return Err(ShelvingError::Config(format!(
                    "duplicate shelf identifier: {identifier}"
                )));
            }
        }
        Ok(self.identifiers.clone())
    }
}

// ------------- Library -------------
// This sets up a library with the necessary structures: a generator for
// book identities, keepers for the shelves and the book records, and the
// storage sequence holding every unshelved book.
pub struct Library {
    name: String,
    policy: ReshelvePolicy,
    book_generator: BookIdGenerator,
    shelf_keeper: ShelfKeeper,
    book_keeper: BookKeeper,
    storage: Vec<BookId>,
    observers: Vec<Box<dyn Observer>>,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("shelf_keeper", &self.shelf_keeper)
            .field("book_keeper", &self.book_keeper)
            .field("storage", &self.storage)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Library {
    pub fn new(name: &str, plan: &ShelfPlan) -> Result<Self> {
        let identifiers = plan.resolve()?;
        let mut shelf_keeper = ShelfKeeper::new();
        for identifier in identifiers {
            shelf_keeper.keep(Shelf::new(identifier, plan.capacity()));
        }
        Ok(Self {
            name: name.to_owned(),
            policy: ReshelvePolicy::default(),
            book_generator: BookIdGenerator::new(),
            shelf_keeper,
            book_keeper: BookKeeper::new(),
            storage: Vec::new(),
            observers: Vec::new(),
        })
    }
    pub fn with_policy(mut self, policy: ReshelvePolicy) -> Self {
        self.policy = policy;
        self
    }
    pub fn register_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn policy(&self) -> ReshelvePolicy {
        self.policy
    }
    pub fn shelf(&self, identifier: &str) -> Option<&Shelf> {
        self.shelf_keeper.get(identifier)
    }
    pub fn shelves(&self) -> impl Iterator<Item = &Shelf> {
        self.shelf_keeper.iter()
    }
    pub fn shelf_count(&self) -> usize {
        self.shelf_keeper.len()
    }
    pub fn book(&self, book: BookId) -> Option<&Book> {
        self.book_keeper.get(book)
    }
    pub fn book_count(&self) -> usize {
        self.book_keeper.len()
    }
    pub fn storage(&self) -> &[BookId] {
        &self.storage
    }

    /// Creates a book in the unplaced state. New books always go into
    /// storage first and have to be shelved explicitly.
    pub fn add_book(&mut self, name: &str) -> BookId {
        let book = self.book_generator.generate();
        let kept = Book::new(book, name.to_owned());
        let event = Event::created(book, kept.name());
        self.book_keeper.keep(kept);
        self.storage.push(book);
        self.notify(&event);
        book
    }

    /// Places a book onto the named shelf, subject to capacity and to the
    /// configured [`ReshelvePolicy`] when the book is already shelved.
    /// A failed placement leaves the book wherever it was.
    pub fn shelve(&mut self, book: BookId, shelf: &str) -> Result<()> {
        match self.place_book(book, shelf) {
            Ok(event) => {
                self.notify(&event);
                Ok(())
            }
            Err(error) => {
                self.notify(&Event::rejected(&error));
                Err(error)
            }
        }
    }

    /// Returns a shelved book to storage. The shelf is located from the
    /// book's own placement reference, not from a caller-supplied one.
    pub fn unshelve(&mut self, book: BookId) -> Result<()> {
        match self.remove_book(book) {
            Ok(event) => {
                self.notify(&event);
                Ok(())
            }
            Err(error) => {
                self.notify(&Event::rejected(&error));
                Err(error)
            }
        }
    }

    fn place_book(&mut self, book: BookId, shelf: &str) -> Result<Event> {
        let placement = self
            .book_keeper
            .get(book)
            .ok_or(ShelvingError::UnknownBook { book })?
            .placement()
            .cloned();
        let (capacity, occupied) = {
            let target =
                self.shelf_keeper
                    .get(shelf)
                    .ok_or_else(|| ShelvingError::ShelfNotFound {
                        shelf: shelf.to_owned(),
                    })?;
            // the book being moved never counts towards its destination
            let occupied = target.books().iter().filter(|kept| **kept != book).count();
            (target.capacity(), occupied)
        };
        if let Some(current) = &placement {
            if self.policy == ReshelvePolicy::Reject {
                return Err(ShelvingError::AlreadyShelved {
                    book,
                    shelf: current.shelf().to_owned(),
                });
            }
        }
        if occupied >= capacity {
            return Err(ShelvingError::ShelfFull {
                shelf: shelf.to_owned(),
                capacity,
            });
        }
        // detach from the prior location before attaching; a failed detach
        // has not mutated anything yet
        match &placement {
            None => {
                let position = self
                    .storage
                    .iter()
                    .position(|kept| *kept == book)
                    .ok_or_else(|| {
                        ShelvingError::Invariant(format!(
                            "book {book} is unplaced but missing from storage"
                        ))
                    })?;
                self.storage.remove(position);
            }
            Some(current) => {
                let source = self.shelf_keeper.get_mut(current.shelf()).ok_or_else(|| {
                    ShelvingError::ShelfNotFound {
                        shelf: current.shelf().to_owned(),
                    }
                })?;
                source
                    .take(book)
                    .ok_or_else(|| ShelvingError::BookNotFound {
                        book,
                        shelf: current.shelf().to_owned(),
                    })?;
            }
        }
        let target =
            self.shelf_keeper
                .get_mut(shelf)
                .ok_or_else(|| ShelvingError::ShelfNotFound {
                    shelf: shelf.to_owned(),
                })?;
        target.push(book);
        let name = {
            let kept = self
                .book_keeper
                .get_mut(book)
                .ok_or(ShelvingError::UnknownBook { book })?;
            kept.place(Placement::new(&self.name, shelf));
            kept.name().to_owned()
        };
        Ok(Event::shelved(book, &name, shelf, &self.name))
    }

    fn remove_book(&mut self, book: BookId) -> Result<Event> {
        let placement = self
            .book_keeper
            .get(book)
            .ok_or(ShelvingError::UnknownBook { book })?
            .placement()
            .cloned()
            .ok_or(ShelvingError::NotShelved { book })?;
        let source = self
            .shelf_keeper
            .get_mut(placement.shelf())
            .ok_or_else(|| ShelvingError::ShelfNotFound {
                shelf: placement.shelf().to_owned(),
            })?;
        // defensive: the sequence has to agree with the placement reference
        source
            .take(book)
            .ok_or_else(|| ShelvingError::BookNotFound {
                book,
                shelf: placement.shelf().to_owned(),
            })?;
        let name = {
            let kept = self
                .book_keeper
                .get_mut(book)
                .ok_or(ShelvingError::UnknownBook { book })?;
            kept.unplace();
            kept.name().to_owned()
        };
        self.storage.push(book);
        Ok(Event::unshelved(book, &name, placement.shelf(), &self.name))
    }

    /// Draws up the current contents: each shelf in declaration order with
    /// its books in shelving order, then storage. A pure read; the rendered
    /// report is also announced through the registered observers.
    pub fn report(&self) -> Report {
        let shelves = self
            .shelf_keeper
            .iter()
            .map(|shelf| {
                let names = shelf
                    .books()
                    .iter()
                    .map(|book| self.book_name(*book))
                    .collect();
                (shelf.identifier().to_owned(), names)
            })
            .collect();
        let storage = self
            .storage
            .iter()
            .map(|book| self.book_name(*book))
            .collect();
        let report = Report {
            library: self.name.clone(),
            shelves,
            storage,
        };
        self.notify(&Event::reported(&report));
        report
    }

    fn book_name(&self, book: BookId) -> String {
        match self.book_keeper.get(book) {
            Some(kept) => kept.name().to_owned(),
            None => format!("book {book}"),
        }
    }

    fn notify(&self, event: &Event) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

// ------------- Report -------------
/// A deterministic listing of a library's contents at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    library: String,
    shelves: Vec<(String, Vec<String>)>,
    storage: Vec<String>,
}

impl Report {
    pub fn library(&self) -> &str {
        &self.library
    }
    pub fn shelves(&self) -> &[(String, Vec<String>)] {
        &self.shelves
    }
    pub fn storage(&self) -> &[String] {
        &self.storage
    }
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{} contains the following books:", self.library)];
        for (identifier, names) in &self.shelves {
            lines.push(format!("{identifier}:"));
            if names.is_empty() {
                lines.push(String::from("   empty"));
            } else {
                for name in names {
                    lines.push(format!("   {name}"));
                }
            }
        }
        lines.push(String::from("storage:"));
        if self.storage.is_empty() {
            lines.push(String::from("   empty"));
        } else {
            for name in &self.storage {
                lines.push(format!("   {name}"));
            }
        }
        lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// ------------- Network -------------
// A simple keyed collection of libraries. There is no coordination
// between them: a book belongs to exactly one library.
#[derive(Debug)]
pub struct Network {
    kept: HashMap<String, Library, KeyHasher>,
    order: Vec<String>,
}

impl Network {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
            order: Vec::new(),
        }
    }
    pub fn keep(&mut self, library: Library) -> bool {
        let keepsake = library.name().to_owned();
        let mut previously_kept = true;
        match self.kept.entry(keepsake.clone()) {
            Entry::Vacant(e) => {
                e.insert(library);
                previously_kept = false;
            }
            Entry::Occupied(_e) => (),
        };
        if !previously_kept {
            self.order.push(keepsake);
        }
        previously_kept
    }
    pub fn library(&self, name: &str) -> Option<&Library> {
        self.kept.get(name)
    }
    pub fn library_mut(&mut self, name: &str) -> Option<&mut Library> {
        self.kept.get_mut(name)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Library> {
        self.order.iter().filter_map(|name| self.kept.get(name))
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    pub fn report(&self) -> Vec<Report> {
        self.iter().map(Library::report).collect()
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
