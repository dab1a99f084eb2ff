use assert_no_alloc::*;
use bytemuck::Zeroable;
use rms_stage::{Accumulator, AccumulatorStore, Reading, RmsOptions, RmsStage, Stage};

#[cfg(debug_assertions)]
#[global_allocator]
static ALLOC: AllocDisabler = AllocDisabler;

#[test]
fn test_fold_no_alloc() {
    let mut acc = Accumulator::zeroed();

    assert_no_alloc(|| {
        for i in 0..1000 {
            acc.fold(i as f64);
        }
    });
    assert_eq!(acc.samples, 1000);
}

#[test]
fn test_summarize_and_reset_no_alloc() {
    let mut acc = Accumulator::zeroed();
    acc.fold(3.0);
    acc.fold(-4.0);

    let summary = assert_no_alloc(|| {
        let summary = acc.summarize(2);
        acc.reset();
        summary
    });
    assert_eq!(summary.peak_to_peak, 7.0);
    assert_eq!(acc, Accumulator::zeroed());
}

#[test]
fn test_store_lookup_no_alloc() {
    let mut store = AccumulatorStore::new();
    store.get_or_create("pump", "flow").fold(1.0);

    assert_no_alloc(|| {
        store.get_or_create("pump", "flow").fold(2.0);
        store.reset("pump", "flow");
        assert!(store.get("pump", "flow").is_some());
    });
    assert_eq!(store.len(), 1);
}

#[test]
fn test_stage_process_open_window_no_alloc() {
    let mut stage = RmsStage::new(RmsOptions {
        sample_size: 3,
        send_raw_data: true,
        enabled: true,
        ..Default::default()
    })
    .unwrap();
    let mut out: Vec<Reading> = Vec::with_capacity(4);

    // First sight of the key registers it
    stage.process(Reading::single("pump", 1, "flow", 1.0), &mut |r: Reading| {
        out.push(r)
    });
    let next = Reading::single("pump", 2, "flow", 2.0);

    assert_no_alloc(|| {
        stage.process(next, &mut |r: Reading| out.push(r));
    });

    assert_eq!(out.len(), 2);
    assert_eq!(stage.pending_samples("pump", "flow"), 2);
}
