use criterion::{Criterion, black_box, criterion_group, criterion_main};

use dynvar::var::Var;

fn filled_vector(n: i64) -> Var {
    let v = Var::vector();
    for i in 0..n {
        v.append(i).unwrap();
    }
    v
}

fn filled_map(n: i64) -> Var {
    let m = Var::map();
    for i in 0..n {
        m.insert(format!("key{i}"), i).unwrap();
    }
    m
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("append 1k", |b| {
        b.iter(|| {
            let v = Var::vector();
            for i in 0..1000 {
                v.append(black_box(i)).unwrap();
            }
            v
        })
    });

    let v = filled_vector(1000);
    c.bench_function("index 1k", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(&*v.index(black_box(i)).unwrap());
            }
        })
    });

    let m = filled_map(1000);
    c.bench_function("map lookup 1k", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(&*m.get(format!("key{i}")).unwrap());
            }
        })
    });

    for n in [10, 1000, 100000] {
        let v = filled_vector(n);
        c.bench_function(&format!("render {n}"), |b| {
            b.iter(|| {
                let mut out = Vec::new();
                v.render(&mut out).unwrap();
                out
            })
        });
    }

    let mut sortable: Vec<Var> = Vec::new();
    for i in 0..1000 {
        sortable.push(Var::from(999 - i));
        sortable.push(Var::from(format!("s{i}")));
        sortable.push(Var::from(i as f64 / 3.0));
    }
    c.bench_function("sort mixed 3k", |b| {
        b.iter(|| {
            let mut vars = sortable.clone();
            vars.sort();
            vars
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
