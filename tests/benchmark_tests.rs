#[cfg(test)]
mod tests {
    use mesh_heal_bench::fixtures::{PROFILE_CURRENT, PROFILE_ISTIO, PROFILE_RAJANT, PROFILE_TARGET};
    use mesh_heal_bench::report::from_json;
    use mesh_heal_bench::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn synthetic_profile() -> Profile {
        Profile {
            name: "synthetic".to_string(),
            routing_style: "flat".to_string(),
            base_failover_ms: 10.0,
            jitter_ms: 0.0,
            packet_loss_base_pct: 0.0,
            distributed_weight: 0.0,
            multi_radio_factor: 1.0,
            control_plane_penalty_ms: 0.0,
            seed_offset: 0,
        }
    }

    fn synthetic_scenario() -> Scenario {
        Scenario {
            scenario_id: "synthetic".to_string(),
            failure_type: "none".to_string(),
            node_count: 0,
            concurrent_failures: 0,
            interference_level: 0.0,
            complexity_factor: 0.0,
            seed_offset: 0,
        }
    }

    // ========== Determinism ==========

    #[test]
    fn test_identical_inputs_identical_summaries() {
        let profiles = default_profiles();
        let scenarios = default_scenarios();
        let a = run_competitive_benchmark(&profiles, &scenarios, 120, 42).expect("run a");
        let b = run_competitive_benchmark(&profiles, &scenarios, 120, 42).expect("run b");

        assert_eq!(a.profiles, b.profiles);
        assert_eq!(a.ranking_by_p95_failover, b.ranking_by_p95_failover);
        for (pa, pb) in a.profiles.iter().zip(&b.profiles) {
            assert_eq!(pa.overall_p95_failover_ms.to_bits(), pb.overall_p95_failover_ms.to_bits());
            assert_eq!(pa.overall_mean_packet_loss_pct.to_bits(), pb.overall_mean_packet_loss_pct.to_bits());
        }
    }

    #[test]
    fn test_different_seed_changes_numbers() {
        let profiles = default_profiles();
        let scenarios = default_scenarios();
        let a = run_competitive_benchmark(&profiles, &scenarios, 50, 42).expect("run a");
        let b = run_competitive_benchmark(&profiles, &scenarios, 50, 43).expect("run b");
        assert_ne!(a.profiles, b.profiles);
    }

    #[test]
    fn test_profile_result_independent_of_companions() {
        // A profile's numbers depend on its own seed stream only.
        let scenarios = default_scenarios();
        let all = run_competitive_benchmark(&default_profiles(), &scenarios, 60, 11).expect("all");
        let alone = run_competitive_benchmark(
            &select_profiles(&[PROFILE_TARGET]).expect("known"),
            &scenarios,
            60,
            11,
        )
        .expect("alone");
        assert_eq!(all.profile(PROFILE_TARGET), alone.profile(PROFILE_TARGET));
    }

    // ========== Floors ==========

    #[test]
    fn test_floors_hold_for_every_sample() {
        let scenarios = default_scenarios();
        for profile in default_profiles() {
            for scenario in &scenarios {
                for i in 0..150u64 {
                    let seed = SeedStrategy::Additive.sample_seed(42, &profile, scenario, i);
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    let f = simulate_failover_ms(&profile, scenario, &mut rng);
                    let l = simulate_packet_loss_pct(&profile, scenario, f, &mut rng);
                    assert!(f >= 0.1, "{} / {}: failover {f}", profile.name, scenario.scenario_id);
                    assert!(l >= 0.01, "{} / {}: loss {l}", profile.name, scenario.scenario_id);
                }
            }
        }
    }

    #[test]
    fn test_floor_reached_by_extreme_profile() {
        let mut profile = synthetic_profile();
        profile.base_failover_ms = 0.0;
        profile.distributed_weight = 1.0;
        let report = run_competitive_benchmark(&[profile], &[synthetic_scenario()], 10, 42).expect("run");
        let p = &report.profiles[0];
        assert_eq!(p.overall_p95_failover_ms, 0.1);
        assert_eq!(p.overall_p95_packet_loss_pct, 0.01);
    }

    // ========== Percentile Boundaries ==========

    #[test]
    fn test_percentile_boundaries() {
        let xs = [0.5, 1.5, 2.5, 9.0];
        assert_eq!(percentile(&[], 42.0), 0.0);
        assert_eq!(percentile(&xs, 0.0), xs[0]);
        assert_eq!(percentile(&xs, 100.0), xs[xs.len() - 1]);
    }

    // ========== Ranking and Improvement ==========

    #[test]
    fn test_rajant_ranks_ahead_of_current() {
        let profiles = select_profiles(&[PROFILE_CURRENT, PROFILE_RAJANT]).expect("known");
        for iterations in [80, 120, 200] {
            let report = run_competitive_benchmark(&profiles, &default_scenarios(), iterations, 11)
                .expect("run");
            let rajant = report.rank_of(PROFILE_RAJANT).expect("rajant ranked");
            let current = report.rank_of(PROFILE_CURRENT).expect("current ranked");
            assert!(rajant < current, "iterations={iterations}: rajant {rajant} vs current {current}");
        }
    }

    #[test]
    fn test_target_improves_on_current() {
        let scenarios = default_scenarios();
        for seed in [11, 42, 1234] {
            let report = run_competitive_benchmark(&default_profiles(), &scenarios, 100, seed).expect("run");
            let current = report.profile(PROFILE_CURRENT).expect("current").overall_p95_failover_ms;
            let target = report.profile(PROFILE_TARGET).expect("target").overall_p95_failover_ms;
            assert!(target < current, "seed={seed}: target {target} >= current {current}");
        }
    }

    #[test]
    fn test_default_full_ranking() {
        let report = run_competitive_benchmark(&default_profiles(), &default_scenarios(), 200, 42).expect("run");
        assert_eq!(
            report.ranking_by_p95_failover,
            vec![PROFILE_RAJANT, PROFILE_TARGET, PROFILE_CURRENT, PROFILE_ISTIO]
        );
        let names: Vec<&str> = report.profiles.iter().map(|p| p.profile.as_str()).collect();
        assert_eq!(names, vec![PROFILE_CURRENT, PROFILE_TARGET, PROFILE_RAJANT, PROFILE_ISTIO]);
    }

    // ========== Preconditions ==========

    #[test]
    fn test_preconditions_raise_invalid_argument() {
        let profiles = default_profiles();
        let scenarios = default_scenarios();
        let cases = [
            run_competitive_benchmark(&profiles, &scenarios, 0, 42),
            run_competitive_benchmark(&[], &scenarios, 10, 42),
            run_competitive_benchmark(&profiles, &[], 10, 42),
        ];
        for result in cases {
            match result {
                Err(BenchError::InvalidArgument(msg)) => assert!(!msg.is_empty()),
                other => panic!("expected InvalidArgument, got {other:?}"),
            }
        }
    }

    // ========== Concrete Scenario ==========

    #[test]
    fn test_concrete_additive_formula() {
        let report = run_competitive_benchmark(&[synthetic_profile()], &[synthetic_scenario()], 1, 42)
            .expect("run");
        let p = &report.profiles[0];
        assert_eq!(p.scenarios[0].mean_failover_ms, 10.0);
        assert_eq!(p.scenarios[0].p95_failover_ms, 10.0);
        assert_eq!(p.scenarios[0].p99_failover_ms, 10.0);
        assert_eq!(p.overall_p95_failover_ms, 10.0);
        assert_eq!(p.total_samples, 1);
    }

    // ========== Report Round Trip ==========

    #[test]
    fn test_json_round_trip_is_exact() {
        let report = run_competitive_benchmark(&default_profiles(), &default_scenarios(), 75, 42).expect("run");
        let parsed = from_json(&to_json(&report).expect("serialize")).expect("parse");
        assert_eq!(parsed, report);
        for (a, b) in parsed.profiles.iter().zip(&report.profiles) {
            assert_eq!(a.profile, b.profile);
            for (sa, sb) in a.scenarios.iter().zip(&b.scenarios) {
                assert_eq!(sa.mean_failover_ms.to_bits(), sb.mean_failover_ms.to_bits());
                assert_eq!(sa.mean_packet_loss_pct.to_bits(), sb.mean_packet_loss_pct.to_bits());
            }
        }
    }

    #[test]
    fn test_save_report_writes_pair() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("nested").join("results");
        let report = run_competitive_benchmark(&default_profiles(), &default_scenarios(), 20, 42).expect("run");

        let (json_path, md_path) = save_report(&report, &out).expect("save");

        assert!(json_path.exists() && md_path.exists());
        let json_name = json_path.file_name().and_then(|n| n.to_str()).expect("utf8 name");
        assert!(json_name.starts_with("competitive_self_healing_"), "{json_name}");
        assert!(json_name.ends_with(".json"));
        // competitive_self_healing_YYYYMMDD_HHMMSS.json
        assert_eq!(json_name.len(), "competitive_self_healing_".len() + 15 + ".json".len());
        assert_eq!(json_path.with_extension("md"), md_path);

        assert_eq!(load_report(&json_path).expect("load"), report);
        let md = std::fs::read_to_string(&md_path).expect("read md");
        assert!(md.contains("## Ranking by p95 failover"));
    }

    #[test]
    fn test_save_report_into_file_path_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").expect("write blocker");
        let report = run_competitive_benchmark(&default_profiles(), &default_scenarios(), 2, 42).expect("run");
        assert!(matches!(save_report(&report, &blocker), Err(BenchError::Io(_))));
    }

    // ========== Seed Strategy ==========

    #[test]
    fn test_hashed_strategy_keeps_ordering() {
        let config = BenchConfig { seed_strategy: SeedStrategy::Hashed, ..BenchConfig::new(200, 42) };
        let report = run_competitive_benchmark_with(&default_profiles(), &default_scenarios(), &config)
            .expect("run");
        assert_eq!(report.seed_strategy, SeedStrategy::Hashed);
        assert_eq!(report.ranking_by_p95_failover[0], PROFILE_RAJANT);
        assert_eq!(report.ranking_by_p95_failover[3], PROFILE_ISTIO);
    }
    // ========== Gate ==========

    const GATE_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/competitive_gate.json");

    fn default_run() -> CompetitiveBenchmarkReport {
        run_competitive_benchmark(&default_profiles(), &default_scenarios(), 200, 42).expect("run")
    }

    #[test]
    fn test_shipped_gate_passes_default_run() {
        let cfg = GateConfig::load(GATE_CONFIG).expect("load shipped gate config");
        let verdict = evaluate_gate(&default_run(), &cfg);
        assert!(verdict.passed(), "violations: {:?}", verdict.violations);
        assert_eq!(verdict.summary_lines.len(), 4);
    }

    #[test]
    fn test_tightened_gate_fails_default_run() {
        let mut cfg = GateConfig::load(GATE_CONFIG).expect("load shipped gate config");
        cfg.profiles
            .get_mut(PROFILE_RAJANT)
            .expect("rajant threshold in shipped config")
            .max_p95_failover_ms = Some(5.0);

        let verdict = evaluate_gate(&default_run(), &cfg);

        assert_eq!(verdict.status(), "FAIL");
        assert_eq!(verdict.violations.len(), 1, "violations: {:?}", verdict.violations);
        let msg = &verdict.violations[0];
        assert!(msg.starts_with("rajant-like: p95 failover "), "{msg}");
        assert!(msg.ends_with("exceeds max 5.00ms"), "{msg}");
    }

    #[test]
    fn test_baseline_comparison_of_same_run_is_ok() {
        let baseline = default_run();
        let regressions = detect_regressions(&baseline, &default_run(), 10.0);
        assert_eq!(regressions.status, "OK");
        assert_eq!(regressions.total_regressions, 0);
        assert_eq!(regressions.total_improvements, 0);
    }

    #[test]
    fn test_baseline_comparison_tolerates_seed_noise() {
        // Fewer samples and a different seed move numbers, but stay well inside 50%.
        let baseline = default_run();
        let current = run_competitive_benchmark(&default_profiles(), &default_scenarios(), 150, 7).expect("run");
        let regressions = detect_regressions(&baseline, &current, 50.0);
        assert!(!regressions.has_regressions(), "{:?}", regressions.regressions);
    }

    #[test]
    fn test_regression_report_saved_with_stamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("regressions");
        let mut baseline = default_run();
        baseline.profiles.retain(|p| p.profile != PROFILE_ISTIO);
        let regressions = detect_regressions(&baseline, &default_run(), 10.0);

        let path = mesh_heal_bench::gate::save_regression_report(&regressions, &out).expect("save");

        let name = path.file_name().and_then(|n| n.to_str()).expect("utf8 name");
        assert!(name.starts_with("regression_report_") && name.ends_with(".json"), "{name}");
        let saved: RegressionReport =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(saved, regressions);
    }
}
