use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ridgeline::{
    clip::clip,
    generators::{concentric_circles, flat_rows},
    group::group_segments,
    scene::{assemble, SceneConfig},
    Point, Polyline, Segment,
};

fn stitching(c: &mut Criterion) {
    // Cut some circles back into pieces, shuffled a bit so the grouper can't
    // just follow the input order.
    let circles = concentric_circles(Point::new(0.0, 0.0), 1.0, 0.5, 100, 64);
    let mut segs: Vec<Segment> = circles.iter().flat_map(Polyline::segments).collect();
    let n = segs.len();
    for i in 0..n {
        segs.swap(i, (i * 7919) % n);
    }

    c.bench_function("group circle pieces", |b| {
        b.iter(|| group_segments(black_box(&segs), 1e-9))
    });

    // Without any occlusion, every row comes out in one piece.
    let scene = flat_rows(200, 200, -1.0).unwrap();
    let visible = assemble(&scene, &SceneConfig::default()).unwrap();
    let segs: Vec<Segment> = visible.into_iter().flat_map(|r| r.segments).collect();
    c.bench_function("group visible rows", |b| {
        b.iter(|| group_segments(black_box(&segs), 1e-9))
    });
}

fn clipping(c: &mut Criterion) {
    let circles = concentric_circles(Point::new(0.0, 0.0), 1.0, 0.5, 100, 64);
    let rect = kurbo::Rect::new(-20.0, -30.0, 25.0, 10.0);

    c.bench_function("clip circles", |b| b.iter(|| clip(black_box(&circles), rect)));
}

criterion_group!(benches, stitching, clipping);
criterion_main!(benches);
