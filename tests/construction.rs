use shelving::construct::{Library, ShelfPlan};
use shelving::error::ShelvingError;

#[test]
fn auto_generated_identifiers() {
    let plan = ShelfPlan::uniform(3, 10);
    let library = Library::new("Local Branch", &plan).expect("construction ok");
    let identifiers: Vec<&str> = library.shelves().map(|shelf| shelf.identifier()).collect();
    assert_eq!(identifiers, vec!["shelf_1", "shelf_2", "shelf_3"]);
    for shelf in library.shelves() {
        assert_eq!(shelf.capacity(), 10);
        assert!(shelf.is_empty());
    }
    assert!(library.storage().is_empty());
}

#[test]
fn explicit_identifiers_keep_declaration_order() {
    let plan = ShelfPlan::labeled(
        3,
        100,
        vec![
            "fiction_1".into(),
            "history_2nd_floor".into(),
            "only_dragonball_z".into(),
        ],
    );
    let library = Library::new("Local Branch", &plan).expect("construction ok");
    let identifiers: Vec<&str> = library.shelves().map(|shelf| shelf.identifier()).collect();
    assert_eq!(
        identifiers,
        vec!["fiction_1", "history_2nd_floor", "only_dragonball_z"]
    );
}

#[test]
fn identifier_count_mismatch_fails_outright() {
    let plan = ShelfPlan::labeled(3, 100, vec!["fiction_1".into(), "classics_1".into()]);
    let error = Library::new("Local Branch", &plan).unwrap_err();
    assert!(matches!(
        error,
        ShelvingError::ShelfCountMismatch {
            declared: 3,
            supplied: 2
        }
    ));
    let msg = format!("{}", error);
    assert!(msg.contains("3 declared but 2 identifiers supplied"));
}

#[test]
fn zero_shelves_rejected() {
    let error = Library::new("Local Branch", &ShelfPlan::uniform(0, 10)).unwrap_err();
    assert!(matches!(error, ShelvingError::Config(_)));
}

#[test]
fn zero_capacity_rejected() {
    let error = Library::new("Local Branch", &ShelfPlan::uniform(3, 0)).unwrap_err();
    assert!(matches!(error, ShelvingError::Config(_)));
}

#[test]
fn duplicate_identifiers_rejected() {
    let plan = ShelfPlan::labeled(2, 10, vec!["fiction_1".into(), "fiction_1".into()]);
    let error = Library::new("Local Branch", &plan).unwrap_err();
    let msg = format!("{}", error);
    assert!(msg.contains("duplicate shelf identifier"));
}
