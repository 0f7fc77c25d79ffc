use proptest::prelude::*;
use proptest::sample::select;
use wbaxi_bridge::types::WbReq;
use wbaxi_bridge::{Config, Preset};
use wbaxi_sim::{MemoryConfig, Testbench, WbMaster};

fn request(data_bytes: usize) -> impl Strategy<Value = WbReq> {
    let sel_mask = u8::MAX >> (8 - data_bytes);
    let data_mask = wbaxi::mask_u64(data_bytes * 8);
    (any::<bool>(), 0..32u64, any::<u64>(), any::<u8>()).prop_map(move |(we, addr, data, sel)| {
        if we {
            WbReq::write(addr, data & data_mask, sel & sel_mask)
        } else {
            WbReq::read(addr)
        }
    })
}

fn case() -> impl Strategy<Value = (Preset, Vec<WbReq>, MemoryConfig, f64, Option<usize>, u64)> {
    select(Preset::ALL.to_vec()).prop_flat_map(|preset| {
        let data_bytes = Config::preset(preset).data_bytes();
        let memory = (0.2..=1.0f64, 0..6u64).prop_map(|(ready_probability, latency)| MemoryConfig {
            ready_probability,
            latency,
            ..Default::default()
        });
        (
            Just(preset),
            prop::collection::vec(request(data_bytes), 1..120),
            memory,
            0.0..0.5f64,
            prop::option::of(0..100usize),
            any::<u64>(),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn traffic_completes_consistently((preset, script, memory, gaps, abort, seed) in case()) {
        let len = script.len();
        let mut master = WbMaster::new(script).with_gaps(gaps, seed);
        if let Some(count) = abort {
            master = master.abort_after(count);
        }

        let mut tb = Testbench::new(Config::preset(preset), master, memory, seed);
        let report = tb.run(200_000).unwrap();

        prop_assert_eq!(report.errs, 0);
        match abort {
            Some(count) if count <= len => prop_assert!(report.acks <= count),
            _ => prop_assert_eq!(report.acks, len),
        }
        prop_assert!(report.max_pending <= Config::preset(preset).capacity());
        prop_assert!(tb.state().empty());
        prop_assert!(!tb.state().flushing());
    }
}
