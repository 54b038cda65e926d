#![no_main]

use arbitrary::Arbitrary;
use ftui_reorder::{
    CollisionOutcome, DragEffect, ItemRect, LayoutHost, Point, ReorderConfig, ReorderEngine,
    apply_reorder,
};
use libfuzzer_sys::fuzz_target;

const CELL: f32 = 16.0;

#[derive(Debug, Arbitrary)]
enum Op {
    Start { key: u8 },
    Move { key: u8, dx: i16, dy: i16 },
    Scroll { dy: i8 },
    End,
    Cancel,
    Sync { len: u8, rotate: u8 },
    Layout { key: u8 },
    Finish { key: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    len: u8,
    columns: u8,
    locked: Vec<u8>,
    ops: Vec<Op>,
}

struct Host {
    keys: Vec<u16>,
    columns: u16,
    scroll: Point,
}

impl Host {
    fn rect_at(&self, index: usize) -> ItemRect {
        let columns = usize::from(self.columns);
        ItemRect::new(
            (index % columns) as f32 * CELL,
            (index / columns) as f32 * CELL,
            CELL,
            CELL,
        )
    }
}

impl LayoutHost<u16> for Host {
    fn measure_item(&self, key: &u16) -> Option<ItemRect> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|index| self.rect_at(index))
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }
}

fuzz_target!(|input: Input| {
    let len = u16::from(input.len % 32) + 1;
    let mut host = Host {
        keys: (0..len).collect(),
        columns: u16::from(input.columns % 6) + 1,
        scroll: Point::ZERO,
    };
    let locked = input.locked.iter().map(|&slot| usize::from(slot % 32));
    let mut engine = ReorderEngine::with_config(ReorderConfig::new().locked_positions(locked));
    engine
        .sync_items(host.keys.iter().copied())
        .expect("keys are unique");
    engine.remeasure(&host);
    let mut skipped_slot = false;

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Start { key } => {
                if let Ok(transition) = engine.start_drag(&u16::from(key % 40), &host)
                    && matches!(transition.effect, DragEffect::Started { .. })
                {
                    skipped_slot = false;
                }
            }
            Op::Move { key, dx, dy } => {
                let delta = Point::new(f32::from(dx), f32::from(dy));
                let transition = engine.drag_move(&u16::from(key % 40), delta, &host);
                if let DragEffect::Collided {
                    outcome: CollisionOutcome::Shifted { skipped, .. },
                } = &transition.effect
                {
                    skipped_slot |= !skipped.is_empty();
                }
            }
            Op::Scroll { dy } => host.scroll = host.scroll + Point::new(0.0, f32::from(dy)),
            Op::End => {
                let was_dragging = engine.is_dragging();
                if let Some(event) = engine.end_drag().reorder() {
                    let mut replayed = host.keys.clone();
                    assert!(apply_reorder(&mut replayed, event));
                    if !skipped_slot {
                        assert_eq!(replayed, engine.registry().keys_by_order());
                    }
                }
                if was_dragging {
                    host.keys = engine.registry().keys_by_order();
                }
            }
            Op::Cancel => {
                engine.cancel_drag();
            }
            Op::Sync { len, rotate } => {
                let mut keys: Vec<u16> = (0..u16::from(len % 32) + 1).collect();
                let mid = usize::from(rotate) % keys.len();
                keys.rotate_left(mid);
                if engine.sync_items(keys.iter().copied()).is_ok() {
                    host.keys = keys;
                }
            }
            Op::Layout { key } => {
                let key = u16::from(key % 40);
                if let Some(rect) = host.measure_item(&key) {
                    engine.layout_completed(&key, rect);
                }
            }
            Op::Finish { key } => {
                engine.animation_finished(&u16::from(key % 40));
            }
        }

        assert!(engine.registry().has_contiguous_orders(), "orders lost contiguity");
        assert_eq!(engine.registry().len(), host.keys.len());
    }
});
