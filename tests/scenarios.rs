//! Hand-checked runs with braking disabled

use nasch::{CarCount, InjectionPolicy, SimulationConfig, Simulator, SlowZone};

mod common;
use common::*;

#[test]
fn circular_ten_cells_three_cars() {
    let config = SimulationConfig::circular(10, 2, 0.0, CarCount::Exact(3))
        .with_initial_state(stopped_cars(10, &[0, 4, 8]));
    let trace = Simulator::new(config).unwrap().run(2).unwrap();

    assert_eq!(trace.len(), 3);
    assert_eq!(trace.get(1).unwrap().car_positions(), vec![1, 5, 9]);
    assert_eq!(velocities(trace.get(1).unwrap()), vec![1, 1, 1]);

    // The car on cell 9 sees the car on cell 1 two cells ahead (gap 1),
    // so it cannot reach speed 2 and lands on cell 0 behind the seam.
    assert_eq!(
        trace.get(2).unwrap().cells(),
        &[1, -1, -1, 2, -1, -1, -1, 2, -1, -1]
    );
}

#[test]
fn circular_evenly_spaced_platoon_reaches_limit() {
    let config = SimulationConfig::circular(12, 2, 0.0, CarCount::Exact(3))
        .with_initial_state(stopped_cars(12, &[0, 4, 8]));
    let trace = Simulator::new(config).unwrap().run(2).unwrap();

    assert_eq!(trace.get(1).unwrap().car_positions(), vec![1, 5, 9]);
    assert_eq!(velocities(trace.get(1).unwrap()), vec![1, 1, 1]);
    assert_eq!(trace.get(2).unwrap().car_positions(), vec![3, 7, 11]);
    assert_eq!(velocities(trace.get(2).unwrap()), vec![2, 2, 2]);
}

#[test]
fn bottleneck_fills_from_the_left() {
    let config = SimulationConfig::bottleneck(5, 1, 0.0, InjectionPolicy::Always);
    let rows = Simulator::new(config).unwrap().run(4).unwrap().rows();

    assert_eq!(rows[0], vec![-1, -1, -1, -1, -1]);
    assert_eq!(rows[1], vec![0, -1, -1, -1, -1]);
    assert_eq!(rows[2], vec![0, 1, -1, -1, -1]);
    // Entry cell still held by the car that could not move
    assert_eq!(rows[3], vec![0, -1, 1, -1, -1]);
    assert_eq!(rows[4], vec![0, 1, -1, 1, -1]);
}

#[test]
fn bottleneck_cars_leave_past_the_last_cell() {
    let config = SimulationConfig::bottleneck(4, 1, 0.0, InjectionPolicy::Probability(0.0))
        .with_initial_state(vec![-1, -1, 1, 1]);
    let trace = Simulator::new(config).unwrap().run(3).unwrap();

    // The follower is blocked for one step while the leader drives off
    assert_eq!(trace.occupied_counts(), vec![2, 1, 1, 0]);
    assert_eq!(trace.get(1).unwrap().cells(), &[-1, -1, 0, -1]);
    assert_eq!(trace.get(2).unwrap().cells(), &[-1, -1, -1, 1]);
}

#[test]
fn free_flow_reaches_and_holds_speed_limit() {
    let v_max = 5;
    let config = SimulationConfig::circular(100, v_max, 0.0, CarCount::Exact(3))
        .with_initial_state(stopped_cars(100, &[0, 33, 66]));
    let trace = Simulator::new(config).unwrap().run(30).unwrap();

    for (t, pair) in trace.frames().windows(2).enumerate() {
        let expected = ((t + 1) as i32).min(v_max);
        let (before, after) = (&pair[0], &pair[1]);
        assert_eq!(velocities(after), vec![expected; 3], "velocities at t={}", t + 1);

        let mut advanced: Vec<usize> = before
            .car_positions()
            .into_iter()
            .map(|idx| (idx + expected as usize) % 100)
            .collect();
        advanced.sort_unstable();
        assert_eq!(after.car_positions(), advanced, "positions at t={}", t + 1);
    }
}

#[test]
fn slow_zone_caps_acceleration_of_a_stopped_car() {
    let mut start = vec![-1; 10];
    start[5] = 0;
    let config = SimulationConfig::bottleneck(10, 5, 0.0, InjectionPolicy::Probability(0.0))
        .with_slow_zone(SlowZone::new(5, 9, 1))
        .with_initial_state(start);
    let trace = Simulator::new(config).unwrap().run(5).unwrap();

    for (t, cell) in (1..=4).zip(6..=9) {
        let lane = trace.get(t).unwrap();
        assert_eq!(lane.car_positions(), vec![cell], "t={}", t);
        assert_eq!(lane.velocity(cell), Some(1));
    }
    assert_eq!(trace.get(5).unwrap().car_count(), 0);
}

#[test]
fn fast_car_keeps_its_speed_through_the_slow_zone() {
    let mut start = vec![-1; 10];
    start[5] = 5;
    let config = SimulationConfig::bottleneck(10, 5, 0.0, InjectionPolicy::Probability(0.0))
        .with_slow_zone(SlowZone::new(5, 9, 1))
        .with_initial_state(start);
    let trace = Simulator::new(config).unwrap().run(1).unwrap();

    // Five cells from cell 5 is past the end of the lane
    assert_eq!(trace.occupied_counts(), vec![1, 0]);
}

#[test]
fn car_entering_the_slow_zone_is_not_slowed_on_entry() {
    let mut start = vec![-1; 12];
    start[2] = 3;
    let config = SimulationConfig::bottleneck(12, 3, 0.0, InjectionPolicy::Probability(0.0))
        .with_slow_zone(SlowZone::new(4, 11, 1))
        .with_initial_state(start);
    let trace = Simulator::new(config).unwrap().run(4).unwrap();

    assert_eq!(trace.get(1).unwrap().car_positions(), vec![5]);
    assert_eq!(trace.get(2).unwrap().car_positions(), vec![8]);
    assert_eq!(trace.get(3).unwrap().car_positions(), vec![11]);
    assert_eq!(velocities(trace.get(3).unwrap()), vec![3]);
    assert_eq!(trace.get(4).unwrap().car_count(), 0);
    assert_cells_in_range(&trace, 3);
}

#[test]
fn warmup_shifts_the_first_recorded_row() {
    let base = SimulationConfig::circular(40, 3, 0.4, CarCount::Density(0.25)).with_seed(8);
    let long = Simulator::new(base.clone()).unwrap().run(15).unwrap();
    let warmed = Simulator::new(base.with_warmup(10)).unwrap().run(5).unwrap();

    assert_eq!(warmed.len(), 6);
    assert_eq!(warmed.frames(), &long.frames()[10..]);
}

#[test]
fn stepping_matches_recorded_run() {
    let config = SimulationConfig::bottleneck(25, 4, 0.5, InjectionPolicy::Probability(0.6)).with_seed(3);
    let recorded = Simulator::new(config.clone()).unwrap().run(40).unwrap();

    let mut sim = Simulator::new(config).unwrap();
    for t in 1..=40 {
        let lane = sim.step().unwrap();
        assert_eq!(Some(lane), recorded.get(t));
    }
}
