use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use codec::{parse_font_name, Session};
use schema::{Color, Font, ObjectId, Rectangle};

fn session_with_objects(n: usize) -> (Session, Vec<ObjectId>) {
    let mut session = Session::new();
    let ids: Vec<_> = (0..n).map(|i| ObjectId::new(format!("w{i}"))).collect();
    for id in &ids {
        session.register(id.clone()).unwrap();
    }
    // One committed cycle so later renders diff against baselines.
    run_cycle(&mut session, &ids, 0);
    (session, ids)
}

fn run_cycle(session: &mut Session, ids: &[ObjectId], shift: i32) -> usize {
    let font = Font::new("Segoe UI, \"Noto Sans\", sans-serif", 9);
    session.begin_cycle().unwrap();
    for (i, id) in ids.iter().enumerate() {
        let offset = i32::try_from(i).unwrap_or(i32::MAX);
        let bounds = Rectangle::new(offset + shift, 0, 80, 24);
        session
            .preserve(id)
            .unwrap()
            .preserve_bounds(Rectangle::new(offset, 0, 80, 24))
            .preserve_font(Some(&font))
            .preserve_enabled(true);
        session
            .render(id, |r| {
                r.render_bounds(&bounds)?;
                r.render_font(Some(&font))?;
                r.render_foreground(Some(&Color::new(0, 0, 0)))?;
                r.render_enabled(true)?;
                r.render_listener("selection", true, false)?;
                Ok(())
            })
            .unwrap();
    }
    session.commit().unwrap().operation_count()
}

fn bench_render_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_cycle");
    for &n in &[10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("unchanged", n), &n, |b, &n| {
            b.iter_batched(
                || session_with_objects(n),
                |(mut session, ids)| black_box(run_cycle(&mut session, &ids, 0)),
                BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("all_moved", n), &n, |b, &n| {
            b.iter_batched(
                || session_with_objects(n),
                |(mut session, ids)| black_box(run_cycle(&mut session, &ids, 1)),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_font_memo(c: &mut Criterion) {
    let raw = "Segoe UI, \"Noto Sans\", \\\"Helvetica\\\", sans-serif";
    let _ = parse_font_name(raw);
    c.bench_function("parse_font_name_cached", |b| {
        b.iter(|| black_box(parse_font_name(black_box(raw))));
    });
}

criterion_group!(benches, bench_render_cycle, bench_font_memo);
criterion_main!(benches);
