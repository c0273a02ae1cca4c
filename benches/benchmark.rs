use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shelving::construct::{Library, ShelfPlan};

// Shelve/unshelve churn against a shelf that already holds n books,
// since both operations scan the sequence linearly.
fn churn(library: &mut Library, book: u64) {
    library.shelve(black_box(book), "shelf_1").unwrap();
    library.unshelve(black_box(book)).unwrap();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut library = Library::new("Bench Branch", &ShelfPlan::uniform(1, 1_000_001)).unwrap();
    let book = library.add_book("churn");
    c.bench_function("churn 0", |b| b.iter(|| churn(&mut library, book)));
    for n in 0..1000 {
        let settled = library.add_book(&format!("settled {n}"));
        library.shelve(settled, "shelf_1").unwrap();
    }
    c.bench_function("churn 1k", |b| b.iter(|| churn(&mut library, book)));
    for n in 1000..100000 {
        let settled = library.add_book(&format!("settled {n}"));
        library.shelve(settled, "shelf_1").unwrap();
    }
    c.bench_function("churn 100k", |b| b.iter(|| churn(&mut library, book)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
