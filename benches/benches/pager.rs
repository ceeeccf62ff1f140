// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_pager::{ContentProvider, PageHost, Pager, PagerConfig, SlotId};

const PAGE: f64 = 400.0;

struct Pages(usize);

impl ContentProvider for Pages {
    type Content = u64;

    fn content_for_page(&mut self, page: usize) -> Option<u64> {
        (page < self.0).then_some(page as u64)
    }

    fn page_count(&self) -> Option<usize> {
        Some(self.0)
    }
}

#[derive(Default)]
struct NullHost {
    placements: u64,
}

impl PageHost<u64> for NullHost {
    fn place_content(&mut self, content: &u64, _slot: SlotId, _frame: Rect) {
        self.placements = self.placements.wrapping_add(*content);
    }
    fn remove_content(&mut self, _content: &u64, _slot: SlotId) {}
    fn set_content_size(&mut self, _size: Size) {}
    fn scroll_to_frame(&mut self, _frame: Rect, _animated: bool) {}
}

fn pager(pages: usize) -> Pager<Pages, NullHost> {
    let mut pager = Pager::new(Pages(pages), PagerConfig::default());
    pager.attach_host(NullHost::default());
    pager.set_viewport_size(Size::new(PAGE, PAGE));
    pager
}

fn bench_continuous_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("pager/scroll");

    // One pass per 8px step across the whole sequence, as a drag would produce.
    for pages in [4usize, 64, 1_024] {
        let steps = (pages as f64 * PAGE / 8.0) as usize;
        group.bench_with_input(BenchmarkId::new("drag_through", pages), &pages, |b, &pages| {
            b.iter_batched(
                || pager(pages),
                |mut pager| {
                    for step in 0..steps {
                        let offset = step as f64 * 8.0;
                        black_box(pager.scrolled(Rect::new(offset, 0.0, offset + PAGE, PAGE)));
                    }
                    pager
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_jumps(c: &mut Criterion) {
    let mut group = c.benchmark_group("pager/goto");

    for pages in [64usize, 1_024] {
        group.bench_with_input(BenchmarkId::new("alternate_ends", pages), &pages, |b, &pages| {
            let mut pager = pager(pages);
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let target = if flip { pages - 1 } else { 0 };
                black_box(pager.goto_page(target, false).ok());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_continuous_scroll, bench_jumps);
criterion_main!(benches);
