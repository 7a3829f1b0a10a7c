use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use clinica_core::lanes::{assign_lanes, first_fit, lanes_used, max_concurrency, Interval};

fn random_intervals(rng: &mut StdRng, clinicians: &[&str], count: usize) -> Vec<Interval<i64>> {
    (0..count)
        .map(|_| {
            let clinician = clinicians[rng.gen_range(0..clinicians.len())];
            let start = rng.gen_range(0..500);
            let length = rng.gen_range(1..90);
            Interval::new(clinician, start, start + length)
        })
        .collect()
}

fn overlaps(a: &Interval<i64>, b: &Interval<i64>) -> bool {
    a.start < b.effective_end() && b.start < a.effective_end()
}

#[test]
fn first_fit_reuses_freed_lanes() {
    let mut ends = Vec::new();
    assert_eq!(first_fit(&mut ends, 0, 10), 0);
    assert_eq!(first_fit(&mut ends, 5, 15), 1);
    // lane 0 frees exactly at 10
    assert_eq!(first_fit(&mut ends, 10, 20), 0);
    assert_eq!(first_fit(&mut ends, 12, 14), 2);
    assert_eq!(first_fit(&mut ends, 16, 18), 1);
    assert_eq!(ends, vec![20, 18, 14]);
}

#[test]
fn lanes_are_per_clinician() {
    let intervals = vec![
        Interval::new("B", 0, 30),
        Interval::new("A", 0, 30),
        Interval::new("A", 10, 20),
        Interval::new("B", 40, 50),
        Interval::new("A", 25, 40),
    ];
    let lanes = assign_lanes(&intervals);
    assert_eq!(lanes, vec![0, 0, 1, 0, 1]);
}

#[test]
fn equal_starts_keep_input_order() {
    let intervals = vec![
        Interval::new("A", 5, 10),
        Interval::new("A", 5, 30),
        Interval::new("A", 5, 7),
    ];
    assert_eq!(assign_lanes(&intervals), vec![0, 1, 2]);
}

#[test]
fn reversed_interval_collapses_to_its_start() {
    let intervals = vec![Interval::new("A", 10, 4), Interval::new("A", 10, 20)];
    assert_eq!(intervals[0].effective_end(), 10);
    assert_eq!(assign_lanes(&intervals), vec![0, 0]);
}

#[test]
fn empty_input_uses_no_lanes() {
    let intervals: Vec<Interval<i64>> = Vec::new();
    let lanes = assign_lanes(&intervals);
    assert!(lanes.is_empty());
    assert_eq!(lanes_used(&lanes), 0);
    assert_eq!(max_concurrency(&intervals), 0);
}

#[test]
fn max_concurrency_treats_touching_intervals_as_disjoint() {
    let intervals = vec![
        Interval::new("A", 0, 10),
        Interval::new("A", 10, 20),
        Interval::new("A", 5, 15),
    ];
    assert_eq!(max_concurrency(&intervals), 2);
}

#[test]
fn no_two_intervals_on_a_lane_overlap() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let intervals = random_intervals(&mut rng, &["A", "B", "C"], 40);
        let lanes = assign_lanes(&intervals);
        for i in 0..intervals.len() {
            for j in (i + 1)..intervals.len() {
                if intervals[i].clinician == intervals[j].clinician && lanes[i] == lanes[j] {
                    assert!(
                        !overlaps(&intervals[i], &intervals[j]),
                        "{:?} and {:?} share lane {}",
                        intervals[i],
                        intervals[j],
                        lanes[i]
                    );
                }
            }
        }
    }
}

#[test]
fn lane_count_matches_peak_concurrency() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
        let count = rng.gen_range(1..60);
        let intervals = random_intervals(&mut rng, &["A"], count);
        let lanes = assign_lanes(&intervals);
        assert_eq!(lanes_used(&lanes), max_concurrency(&intervals));
    }
}

#[test]
fn lane_count_matches_peak_concurrency_per_clinician() {
    let mut rng = StdRng::seed_from_u64(99);
    let clinicians = ["A", "B", "C", "D"];
    for _ in 0..100 {
        let intervals = random_intervals(&mut rng, &clinicians, 80);
        let lanes = assign_lanes(&intervals);
        for clinician in clinicians {
            let (own, own_lanes): (Vec<Interval<i64>>, Vec<usize>) = intervals
                .iter()
                .zip(&lanes)
                .filter(|(interval, _)| interval.clinician == clinician)
                .map(|(interval, lane)| (interval.clone(), *lane))
                .unzip();
            assert_eq!(lanes_used(&own_lanes), max_concurrency(&own));
        }
    }
}

#[test]
fn assignment_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(2024);
    let intervals = random_intervals(&mut rng, &["A", "B"], 100);
    let first = assign_lanes(&intervals);
    for _ in 0..5 {
        assert_eq!(assign_lanes(&intervals), first);
    }
}
