use rms_stage::{
    Reading, RmsOptions, RmsStage, Stage, inspect, latency, pipe, progress,
};

fn stage(sample_size: u32, send_raw_data: bool) -> RmsStage {
    RmsStage::new(RmsOptions {
        sample_size,
        send_raw_data,
        enabled: true,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_rms_stage_in_pipeline() {
    let mut seen = 0usize;
    let mut p = pipe![
        progress::<Reading>("ingest", 2),
        stage(2, false),
        inspect(|_r: &Reading| seen += 1)
    ];

    let mut out = Vec::new();
    for ts in 0..6 {
        p.process(Reading::single("a", ts, "v", 2.0), &mut |r: Reading| out.push(r));
    }
    drop(p);

    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|r| r.asset == "a RMS"));
    assert_eq!(seen, 3);
}

#[test]
fn test_latency_wrapped_stage_can_be_reconfigured() {
    let mut p = latency("rms", 100, 1, stage(3, true));

    let mut out = Vec::new();
    p.process(Reading::single("a", 1, "v", 1.0), &mut |r: Reading| out.push(r));
    assert_eq!(p.inner().pending_samples("a", "v"), 1);

    p.inner_mut()
        .configure(RmsOptions {
            sample_size: 1,
            enabled: true,
            ..Default::default()
        })
        .unwrap();
    p.process(Reading::single("a", 2, "v", 1.0), &mut |r: Reading| out.push(r));

    assert_eq!(out.len(), 2);
    assert_eq!(out[1].asset, "a RMS");
    assert_eq!(p.measurer().get_stats().count, 2);
}

#[test]
fn test_pipeline_filters_before_rms() {
    let mut p = pipe![
        |r: Reading| if r.timestamp % 2 == 0 { Some(r) } else { None },
        stage(2, true)
    ];

    let mut out = Vec::new();
    for ts in 0..4 {
        p.process(Reading::single("a", ts, "v", 1.0), &mut |r: Reading| out.push(r));
    }

    let timestamps: Vec<u64> = out.iter().map(|r| r.timestamp).collect();
    // raw 0, raw 2, summary of 2
    assert_eq!(timestamps, vec![0, 2, 2]);
}
