use criterion::{Criterion, black_box, criterion_group, criterion_main};

use combolist::listbox::typeahead::{filter_options, resolve_index};
use combolist::listbox::{Listbox, OptionStore, Timings, TodoList};
use combolist::options::default_options;

fn make_options(count: usize) -> Vec<String> {
    let words = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
    (0..count)
        .map(|i| format!("{} {i}", words[i % words.len()]))
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let options = make_options(10_000);

    c.bench_function("resolve_index prefix (10k options)", |b| {
        b.iter(|| resolve_index(black_box(&options), black_box("foxtrot 99"), 5_000))
    });

    c.bench_function("resolve_index repeated letter (10k options)", |b| {
        b.iter(|| resolve_index(black_box(&options), black_box("eee"), 5_000))
    });

    c.bench_function("filter_options (10k options)", |b| {
        b.iter(|| filter_options(black_box(&options), black_box("ch"), &[]))
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let options = make_options(2_000);
    let shuffled: Vec<String> = options.iter().rev().cloned().collect();

    c.bench_function("OptionStore reconcile (2k options)", |b| {
        b.iter(|| {
            let mut store = OptionStore::new(&options, Some("item"));
            store.reconcile(black_box(&shuffled));
            store
        })
    });

    c.bench_function("TodoList set_options (2k options)", |b| {
        let mut list = TodoList::new("Items", default_options(), None, Timings::default());
        b.iter(|| list.set_options(black_box(shuffled.clone())))
    });
}

criterion_group!(benches, bench_resolve, bench_reconcile);
criterion_main!(benches);
