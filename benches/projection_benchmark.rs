//! Per-frame cost of the preview pipeline: project, wrap, paint, diff.
//!
//! Projection runs on every tick, so it has to stay well under the 20 ms
//! default typing interval.

use codereel::render::diff::{render_diff, DiffState};
use codereel::render::{wrap, Grid, PreviewPane, Rect, RenderProjector};
use codereel::Theme;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SNIPPET: &str = r#"import React, { useState } from "react";

type Props = { items: string[]; onPick: (item: string) => void };

export function Picker({ items, onPick }: Props) {
  const [query, setQuery] = useState("");
  const visible = items.filter((item) => item.includes(query));
  return (
    <div className="picker">
      <input value={query} onChange={(e) => setQuery(e.target.value)} />
      <ul>
        {visible.map((item) => (
          <li key={item} onClick={() => onPick(item)}>{item}</li>
        ))}
      </ul>
    </div>
  );
}
"#;

fn project_prefixes(c: &mut Criterion) {
    let projector = RenderProjector::default();
    let mut group = c.benchmark_group("project");
    for fraction in [4, 2, 1] {
        let end = SNIPPET
            .char_indices()
            .nth(SNIPPET.chars().count() / fraction)
            .map_or(SNIPPET.len(), |(i, _)| i);
        let prefix = &SNIPPET[..end];
        group.bench_with_input(BenchmarkId::from_parameter(end), prefix, |b, text| {
            b.iter(|| projector.project(black_box(text), Theme::NightOwl));
        });
    }
    group.finish();
}

fn wrap_narrow(c: &mut Criterion) {
    let projection = RenderProjector::default().project(SNIPPET, Theme::Dracula);
    c.bench_function("wrap_40_columns", |b| {
        b.iter(|| wrap(black_box(&projection.lines), 40));
    });
}

fn paint_and_diff(c: &mut Criterion) {
    let projector = RenderProjector::default();
    let mut pane = PreviewPane::new();
    pane.layout(Rect::new(0, 0, 100, 30), 1);

    let half = SNIPPET.len() / 2;
    let mut previous = Grid::new(100, 30);
    pane.set_projection(projector.project(&SNIPPET[..half], Theme::VsDark));
    pane.paint(&mut previous, Theme::VsDark, None);

    c.bench_function("paint_diff_100x30", |b| {
        b.iter(|| {
            let mut next = Grid::new(100, 30);
            pane.paint(&mut next, Theme::VsDark, None);
            let mut out = Vec::with_capacity(4096);
            let mut state = DiffState::new();
            render_diff(black_box(&previous), &next, &mut out, &mut state)
        });
    });
}

criterion_group!(benches, project_prefixes, wrap_narrow, paint_and_diff);
criterion_main!(benches);
