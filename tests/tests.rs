use threebody::simulation::states::{BodySpec, NVec3};
use threebody::simulation::params::Parameters;
use threebody::simulation::forces::{AccelSet, PairwiseGravity};
use threebody::simulation::scenario::{ScenarioSource, Simulation};
use threebody::{ScenarioConfig, SimError};

/// Spec for a body at rest
pub fn at_rest(x: [f64; 3], m: f64) -> BodySpec {
    BodySpec {
        x: NVec3::from(x),
        v: NVec3::zeros(),
        m,
    }
}

/// Two bodies at rest separated along the x-axis
pub fn two_body_specs(dist: f64, m1: f64, m2: f64) -> Vec<BodySpec> {
    vec![
        at_rest([-dist / 2.0, 0.0, 0.0], m1),
        at_rest([dist / 2.0, 0.0, 0.0], m2),
    ]
}

/// An asymmetric three-body setup with nonzero velocities
pub fn three_body_specs() -> Vec<BodySpec> {
    vec![
        BodySpec { x: NVec3::new(-40.0, 5.0, 1.0), v: NVec3::new(0.1, 0.7, 0.0), m: 300.0 },
        BodySpec { x: NVec3::new(35.0, -10.0, 4.0), v: NVec3::new(-0.2, -0.5, 0.3), m: 180.0 },
        BodySpec { x: NVec3::new(3.0, 60.0, -12.0), v: NVec3::new(-0.9, 0.0, 0.1), m: 45.5 },
    ]
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters::default()
}

pub fn simulation(specs: &[BodySpec]) -> Simulation {
    Simulation::from_specs(test_params(), specs).unwrap()
}

/// Straight-line rendition of one semi-implicit Euler step
fn reference_step(state: &mut [(NVec3, NVec3, f64)], p: &Parameters) {
    let n = state.len();
    let mut acc = vec![NVec3::zeros(); n];
    for a in 0..n {
        let mut total = NVec3::zeros();
        for b in 0..n {
            if a == b {
                continue;
            }
            let diff = state[b].0 - state[a].0;
            let dist_sq = diff.norm_squared();
            if dist_sq < p.min_distance_sq || dist_sq == 0.0 {
                continue;
            }
            let magnitude = p.G * state[a].2 * state[b].2 / dist_sq;
            total += (diff / dist_sq.sqrt()) * magnitude;
        }
        acc[a] = total / state[a].2;
    }
    for (s, a) in state.iter_mut().zip(acc.iter()) {
        s.1 += *a * p.dt;
    }
    for s in state.iter_mut() {
        s.0 += s.1 * p.dt;
    }
}

fn is_finite(v: &NVec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sim = simulation(&two_body_specs(10.0, 2.0, 3.0));
    let gravity = PairwiseGravity { G: 9.8, min_distance_sq: 1.0 };

    let f1 = gravity.total_force(0, sim.bodies());
    let f2 = gravity.total_force(1, sim.bodies());

    assert!((f1 + f2).norm() < 1e-12, "Net force not zero: {:?}", f1 + f2);
}

#[test]
fn gravity_points_toward_other_body() {
    let sim = simulation(&two_body_specs(20.0, 1.0, 1.0));
    let forces = AccelSet::new().with(PairwiseGravity { G: 9.8, min_distance_sq: 1.0 });

    let mut acc = vec![NVec3::zeros(); 2];
    forces.accumulate_accels(0.0, sim.bodies(), &mut acc);

    let dx = sim.bodies()[1].x - sim.bodies()[0].x;
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].dot(&dx) < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let sim_r = simulation(&two_body_specs(10.0, 1.0, 1.0));
    let sim_2r = simulation(&two_body_specs(20.0, 1.0, 1.0));
    let gravity = PairwiseGravity { G: 9.8, min_distance_sq: 1.0 };

    let ratio = gravity.total_force(0, sim_r.bodies()).norm()
        / gravity.total_force(0, sim_2r.bodies()).norm();

    assert!((ratio - 4.0).abs() < 1e-12, "Expected 4x, got {}", ratio);
}

#[test]
fn gravity_skips_pairs_inside_cutoff() {
    // 0.9 apart -> distance^2 = 0.81 < 1
    let sim = simulation(&two_body_specs(0.9, 300.0, 300.0));
    let gravity = PairwiseGravity { G: 9.8, min_distance_sq: 1.0 };

    assert_eq!(gravity.total_force(0, sim.bodies()), NVec3::zeros());
    assert_eq!(gravity.total_force(1, sim.bodies()), NVec3::zeros());

    // exactly at the cutoff the pair still counts
    let sim = simulation(&two_body_specs(1.0, 300.0, 300.0));
    assert!(gravity.total_force(0, sim.bodies()).x > 0.0);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn symmetric_pair_after_one_step() {
    let mut sim = simulation(&two_body_specs(100.0, 300.0, 300.0));
    sim.step();

    let b0 = &sim.bodies()[0];
    let b1 = &sim.bodies()[1];

    // |F| = G m m / d^2, a = F / m, v = a dt
    let magnitude = 9.8 * 300.0 * 300.0 / 10_000.0;
    let speed = magnitude / 300.0 * 0.1;

    assert!((b0.v.x - speed).abs() < 1e-12, "v0 = {:?}", b0.v);
    assert!((b1.v.x + speed).abs() < 1e-12, "v1 = {:?}", b1.v);
    assert_eq!(b0.v.x, -b1.v.x);
    assert_eq!(b0.v.y, 0.0);
    assert_eq!(b0.v.z, 0.0);

    // positions move with the already-updated velocity
    assert!((b0.x.x - (-50.0 + speed * 0.1)).abs() < 1e-12, "x0 = {:?}", b0.x);
    assert!((b1.x.x - (50.0 - speed * 0.1)).abs() < 1e-12, "x1 = {:?}", b1.x);
    assert_eq!(b0.x.y, 0.0);
}

#[test]
fn steps_match_reference_bit_for_bit() {
    let specs = three_body_specs();
    let p = test_params();
    let mut sim = simulation(&specs);
    let mut reference: Vec<(NVec3, NVec3, f64)> = specs.iter().map(|s| (s.x, s.v, s.m)).collect();

    for _ in 0..25 {
        sim.step();
        reference_step(&mut reference, &p);

        for (b, r) in sim.bodies().iter().zip(reference.iter()) {
            assert_eq!(b.x, r.0);
            assert_eq!(b.v, r.1);
        }
    }

    let p_ref = reference.iter().fold(NVec3::zeros(), |acc, r| acc + r.1 * r.2);
    assert_eq!(sim.total_momentum(), p_ref);
}

#[test]
fn momentum_drift_is_small() {
    let mut sim = simulation(&three_body_specs());
    let p0 = sim.total_momentum();
    sim.step();
    let p1 = sim.total_momentum();

    assert!((p1 - p0).norm() < 1e-9, "momentum moved by {:?}", p1 - p0);
}

#[test]
fn coincident_bodies_stay_finite() {
    let specs = vec![
        at_rest([5.0, 5.0, 5.0], 300.0),
        at_rest([5.0, 5.0, 5.0], 300.0),
    ];
    let mut sim = simulation(&specs);
    sim.step();

    for b in sim.bodies() {
        assert!(is_finite(&b.v) && is_finite(&b.x));
        assert_eq!(b.v, NVec3::zeros());
        assert_eq!(b.x, NVec3::new(5.0, 5.0, 5.0));
    }
}

#[test]
fn step_advances_clock() {
    let mut sim = simulation(&three_body_specs());
    for _ in 0..3 {
        sim.step();
    }
    assert_eq!(sim.steps(), 3);
    assert!((sim.time() - 0.3).abs() < 1e-12);
}

#[test]
fn empty_simulation_steps_without_bodies() {
    let mut sim = Simulation::new(test_params()).unwrap();
    sim.step();
    assert!(sim.bodies().is_empty());
    assert_eq!(sim.steps(), 0);
}

// ==================================================================================
// Trail tests
// ==================================================================================

#[test]
fn trail_round_trip_before_wrap() {
    let mut sim = simulation(&three_body_specs());
    let k = 40;
    let mut history: Vec<Vec<NVec3>> = vec![Vec::new(); 3];

    for _ in 0..k {
        sim.step();
        for (h, b) in history.iter_mut().zip(sim.bodies()) {
            h.push(b.x);
        }
    }

    for (h, b) in history.iter().zip(sim.bodies()) {
        let trail: Vec<NVec3> = b.trail().iter().collect();
        assert_eq!(trail.len(), k);
        assert_eq!(&trail, h);
    }
}

#[test]
fn trail_wraps_after_capacity() {
    let mut p = test_params();
    p.trail_capacity = 8;
    let mut sim = Simulation::from_specs(p, &three_body_specs()).unwrap();

    let m = 5;
    let mut history: Vec<NVec3> = Vec::new();
    for _ in 0..(8 + m) {
        sim.step();
        history.push(sim.bodies()[2].x);
    }

    let trail: Vec<NVec3> = sim.bodies()[2].trail().iter().collect();
    assert_eq!(trail.len(), 8);
    // oldest is step m+1, newest is step C+m (1-based)
    assert_eq!(trail[0], history[m]);
    assert_eq!(trail[7], history[8 + m - 1]);
    assert_eq!(&trail[..], &history[m..]);
}

#[test]
fn trail_read_is_idempotent() {
    let mut p = test_params();
    p.trail_capacity = 6;
    let mut sim = Simulation::from_specs(p, &three_body_specs()).unwrap();
    for _ in 0..10 {
        sim.step();
    }

    let trail = sim.bodies()[0].trail();
    let first: Vec<NVec3> = trail.iter().collect();
    let second: Vec<NVec3> = trail.iter().collect();
    assert_eq!(first, second);
    assert_eq!(trail.latest(), Some(sim.bodies()[0].x));
}

// ==================================================================================
// Registry tests
// ==================================================================================

#[test]
fn invalid_mass_is_rejected() {
    let mut specs = three_body_specs();
    specs[1].m = 0.0;

    match Simulation::from_specs(test_params(), &specs) {
        Err(SimError::InvalidMass { index, mass }) => {
            assert_eq!(index, 1);
            assert_eq!(mass, 0.0);
        }
        other => panic!("expected InvalidMass, got {:?}", other.err()),
    }

    specs[1].m = -3.0;
    assert!(Simulation::from_specs(test_params(), &specs).is_err());
    specs[1].m = f64::NAN;
    assert!(Simulation::from_specs(test_params(), &specs).is_err());
}

#[test]
fn failed_initialize_keeps_previous_bodies() {
    let mut sim = simulation(&three_body_specs());
    sim.step();
    let before: Vec<NVec3> = sim.bodies().iter().map(|b| b.x).collect();

    let bad = vec![at_rest([0.0, 0.0, 0.0], -1.0)];
    assert!(sim.initialize(&bad).is_err());

    let after: Vec<NVec3> = sim.bodies().iter().map(|b| b.x).collect();
    assert_eq!(before, after);
}

#[test]
fn initialize_replaces_bodies_and_clears_trails() {
    let mut sim = simulation(&three_body_specs());
    for _ in 0..5 {
        sim.step();
    }

    sim.initialize(&two_body_specs(100.0, 300.0, 300.0)).unwrap();

    assert_eq!(sim.bodies().len(), 2);
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.time(), 0.0);
    for b in sim.bodies() {
        assert!(b.trail().is_empty());
        assert_eq!(b.trail().capacity(), 800);
    }
}

#[test]
fn invalid_parameters_are_rejected() {
    let mut p = test_params();
    p.dt = 0.0;
    assert!(matches!(Simulation::new(p), Err(SimError::InvalidParameter(_))));

    let mut p = test_params();
    p.trail_capacity = 0;
    assert!(Simulation::new(p).is_err());

    let mut p = test_params();
    p.G = f64::INFINITY;
    assert!(Simulation::new(p).is_err());

    // the force cutoff must be a positive, finite squared distance
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let mut p = test_params();
        p.min_distance_sq = bad;
        assert!(
            matches!(Simulation::new(p), Err(SimError::InvalidParameter(_))),
            "min_distance_sq = {} was accepted",
            bad
        );
    }
}

#[test]
fn tiny_cutoff_still_skips_coincident_bodies() {
    let mut p = test_params();
    p.min_distance_sq = f64::MIN_POSITIVE;

    let specs = vec![
        at_rest([5.0, 5.0, 5.0], 300.0),
        at_rest([5.0, 5.0, 5.0], 300.0),
    ];
    let mut sim = Simulation::from_specs(p, &specs).unwrap();
    sim.step();

    for b in sim.bodies() {
        assert!(is_finite(&b.v) && is_finite(&b.x), "v = {:?}", b.v);
        assert_eq!(b.v, NVec3::zeros());
    }
}

#[test]
fn gravity_without_cutoff_ignores_coincident_pair() {
    let specs = vec![
        at_rest([5.0, 5.0, 5.0], 300.0),
        at_rest([5.0, 5.0, 5.0], 300.0),
        at_rest([25.0, 5.0, 5.0], 300.0),
    ];
    let sim = simulation(&specs);
    let gravity = PairwiseGravity { G: 9.8, min_distance_sq: 0.0 };

    // only the third body pulls on the first; the twin adds nothing
    let f = gravity.total_force(0, sim.bodies());
    let expected = 9.8 * 300.0 * 300.0 / 400.0;
    assert!(is_finite(&f));
    assert!((f.x - expected).abs() < 1e-9, "f = {:?}", f);
    assert_eq!(f.y, 0.0);
    assert_eq!(f.z, 0.0);
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn scenario_source_restart_and_reroll() {
    let yaml = r#"
parameters:
  trail_capacity: 32
bodies:
  - x: [-50.0, 0.0, 0.0]
    m: 300.0
  - {}
  - {}
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let mut source = ScenarioSource::new(cfg, Some(11));

    let sim = source.build().unwrap();
    assert_eq!(sim.bodies().len(), 3);
    assert_eq!(sim.parameters().trail_capacity, 32);
    assert_eq!(sim.bodies()[0].x, NVec3::new(-50.0, 0.0, 0.0));

    let first = source.initial().to_vec();
    let rolled = source.reroll().to_vec();

    // explicit fields survive a re-roll, random ones change
    assert_eq!(rolled[0].x, first[0].x);
    assert_eq!(rolled[0].m, 300.0);
    assert_ne!(rolled[1].x, first[1].x);
}

#[test]
fn same_seed_same_scenario() {
    let a = ScenarioSource::new(ScenarioConfig::default(), Some(5));
    let b = ScenarioSource::new(ScenarioConfig::default(), Some(5));
    assert_eq!(a.initial(), b.initial());
}

#[test]
fn bundled_scenario_loads() {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join("three_body.yaml");
    let cfg = ScenarioConfig::load(&path).unwrap();
    assert_eq!(cfg.bodies.len(), 3);

    let source = ScenarioSource::new(cfg, None);
    let mut sim = source.build().unwrap();
    for _ in 0..100 {
        sim.step();
    }
    assert!(sim.bodies().iter().all(|b| is_finite(&b.x)));
    assert!(sim.potential_energy() < 0.0);
    assert!(sim.kinetic_energy() > 0.0);
}
