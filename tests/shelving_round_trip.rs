use shelving::construct::{BookId, Library, ShelfPlan};
use shelving::error::ShelvingError;

fn setup() -> Library {
    let plan = ShelfPlan::labeled(
        3,
        100,
        vec!["fiction_1".into(), "classics_1".into(), "science_1".into()],
    );
    Library::new("Twelfth International Library", &plan).expect("construction ok")
}

// Every book is either in storage or on exactly one shelf, never both.
fn locations(library: &Library, book: BookId) -> usize {
    let on_shelves = library
        .shelves()
        .filter(|shelf| shelf.books().contains(&book))
        .count();
    on_shelves + usize::from(library.storage().contains(&book))
}

#[test]
fn new_books_start_in_storage() {
    let mut library = setup();
    let book = library.add_book("Cinderella");
    assert_eq!(library.storage(), &[book]);
    assert!(library.book(book).unwrap().placement().is_none());
    assert_eq!(locations(&library, book), 1);
}

#[test]
fn shelving_moves_a_book_out_of_storage() {
    let mut library = setup();
    let book = library.add_book("Cinderella");
    library.shelve(book, "fiction_1").expect("shelving ok");
    assert!(library.storage().is_empty());
    assert_eq!(library.shelf("fiction_1").unwrap().books(), &[book]);
    let placement = library.book(book).unwrap().placement().expect("placed");
    assert_eq!(placement.library(), "Twelfth International Library");
    assert_eq!(placement.shelf(), "fiction_1");
    assert_eq!(locations(&library, book), 1);
}

#[test]
fn unshelving_returns_a_book_to_storage() {
    let mut library = setup();
    let book = library.add_book("Cinderella");
    library.shelve(book, "fiction_1").expect("shelving ok");
    library.unshelve(book).expect("unshelving ok");
    assert_eq!(library.storage(), &[book]);
    assert!(library.shelf("fiction_1").unwrap().is_empty());
    assert!(library.book(book).unwrap().placement().is_none());
    assert_eq!(locations(&library, book), 1);
}

#[test]
fn place_remove_place_round_trip() {
    let mut library = setup();
    let book = library.add_book("Cinderella");
    library.shelve(book, "fiction_1").expect("shelving ok");
    let before = library.book(book).unwrap().placement().cloned();
    library.unshelve(book).expect("unshelving ok");
    library.shelve(book, "fiction_1").expect("reshelving ok");
    let after = library.book(book).unwrap().placement().cloned();
    assert_eq!(before, after);
    assert_eq!(library.shelf("fiction_1").unwrap().books(), &[book]);
}

#[test]
fn shelving_order_is_arrival_order() {
    let mut library = setup();
    let first = library.add_book("Cinderella");
    let second = library.add_book("John Carter of Mars");
    library.shelve(first, "fiction_1").expect("shelving ok");
    library.shelve(second, "fiction_1").expect("shelving ok");
    assert_eq!(library.shelf("fiction_1").unwrap().books(), &[first, second]);
}

#[test]
fn unknown_shelf_is_reported_and_nothing_moves() {
    let mut library = setup();
    let book = library.add_book("Cinderella");
    let error = library.shelve(book, "poetry_1").unwrap_err();
    assert!(matches!(error, ShelvingError::ShelfNotFound { .. }));
    assert_eq!(library.storage(), &[book]);
    assert!(library.book(book).unwrap().placement().is_none());
}

#[test]
fn unshelving_a_storage_book_is_reported() {
    let mut library = setup();
    let book = library.add_book("Cinderella");
    let error = library.unshelve(book).unwrap_err();
    assert!(matches!(error, ShelvingError::NotShelved { .. }));
    assert_eq!(library.storage(), &[book]);
}

#[test]
fn unknown_book_is_reported() {
    let mut library = setup();
    let error = library.shelve(42, "fiction_1").unwrap_err();
    assert!(matches!(error, ShelvingError::UnknownBook { book: 42 }));
    let error = library.unshelve(42).unwrap_err();
    assert!(matches!(error, ShelvingError::UnknownBook { book: 42 }));
}
