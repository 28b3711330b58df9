#![no_main]
use libfuzzer_sys::fuzz_target;
use tea_core::{Sequencer, SimulationCfg, TeaLeaf};
use tea_traits::NullSink;

fuzz_target!(|data: &str| {
    // Parse errors and validation errors are both fine; panics are not.
    let Ok(cfg) = tea_config::load_toml(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }

    // Anything that validates must convert and build
    let sim = SimulationCfg::try_from(&cfg.simulation).expect("validated config converts");
    let initial = cfg.initial.as_ref().map(TeaLeaf::from).unwrap_or_default();
    let mut seq = Sequencer::builder()
        .with_config(&sim)
        .with_initial_leaf(initial)
        .build()
        .expect("validated config builds");

    // Keep iterations cheap
    if sim.durations.total() <= 600 {
        let summary = tea_core::run(&mut seq, sim.dt_seconds, &mut NullSink);
        assert!(summary.final_leaf.in_bounds());
        assert_eq!(summary.elapsed_seconds, sim.durations.total());
    }
});
