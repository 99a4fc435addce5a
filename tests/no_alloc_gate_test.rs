use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blockfall::core::{GameEngine, GameSnapshot};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::Command;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// One test per binary: the counter is process-wide.
#[test]
fn engine_and_view_hot_paths_do_not_allocate() {
    let mut engine = GameEngine::new(1);
    engine.start_game();

    let view = GameView::default();
    let viewport = Viewport::new(60, 30);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    // Warm-up.
    engine.apply(Command::Tick);
    engine.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            engine.apply(Command::Tick);
        }

        for _ in 0..50 {
            engine.apply(Command::MoveLeft);
            engine.apply(Command::MoveRight);
            engine.apply(Command::RotateCw);
            engine.apply(Command::RotateCcw);
        }

        // Lock, row clear and spawn paths.
        for _ in 0..25 {
            engine.apply(Command::HardDrop);
            let _ = engine.take_last_event();
            if engine.is_game_over() {
                let _ = engine.end_session();
                engine.start_game();
            }
        }

        for _ in 0..10 {
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
