//! The carried-forward index against a brute-force scan of every window.

use clearsky_calendar::{AcqDate, DoyMask};
use clearsky_window::{TemporalIndex, TimeRange, WindowSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn brute_force(windows: &WindowSet, dates: &[AcqDate], mask: &DoyMask) -> Vec<Option<TimeRange>> {
    windows
        .iter()
        .map(|window| {
            if !window.is_used() {
                return None;
            }
            let inside: Vec<usize> = dates
                .iter()
                .enumerate()
                .filter(|(_, d)| mask.allows(**d) && window.contains(**d))
                .map(|(t, _)| t)
                .collect();
            Some(TimeRange::new(*inside.first()?, *inside.last()?))
        })
        .collect()
}

fn random_dates(rng: &mut StdRng, start: AcqDate, n: usize) -> Vec<AcqDate> {
    let mut day = 0;
    (0..n)
        .map(|_| {
            day += rng.random_range(0..12);
            start.add_days(day).unwrap()
        })
        .collect()
}

#[test]
fn matches_brute_force() {
    let masks = [
        DoyMask::all(),
        DoyMask::from_range(121, 243).unwrap(),
        DoyMask::from_range(330, 40).unwrap(),
        DoyMask::from_allowed((1..=366).filter(|d| d % 3 != 0)).unwrap(),
    ];
    let mut rng = StdRng::seed_from_u64(17);
    let start = AcqDate::new(2015, 3, 14).unwrap();
    let end = AcqDate::new(2019, 8, 2).unwrap();

    for mask in &masks {
        for step in [1, 2, 5, 12] {
            // acquisitions start before and stop after the period
            let dates = random_dates(&mut rng, start.add_days(-40).unwrap(), 300);
            let windows = WindowSet::build(start, end, step, mask).unwrap();
            let index = TemporalIndex::build(&windows, &dates, mask);
            assert_eq!(index.ranges(), brute_force(&windows, &dates, mask).as_slice());
        }
    }
}

#[test]
fn narrowed_windows_stay_ordered() {
    let mask = DoyMask::from_range(200, 100).unwrap();
    let start = AcqDate::new(2010, 1, 1).unwrap();
    let end = AcqDate::new(2014, 1, 1).unwrap();
    for step in 1..=12 {
        let windows = WindowSet::build(start, end, step, &mask).unwrap();
        for window in &windows {
            assert!(window.start() <= window.end());
            assert_eq!(window.is_used(), window.start() < window.end());
            if window.is_used() {
                assert!(mask.allows(window.start()));
                assert!(mask.allows(window.end()));
            }
        }
        for pair in windows.windows().windows(2) {
            assert!(pair[0].end() <= pair[1].start());
            assert!(pair[0].nominal_start() < pair[1].nominal_start());
        }
    }
}
