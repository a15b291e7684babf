//! Property tests for next-prayer resolution.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use proptest::prelude::*;
use salah_core::{next_event, EventSchedule, Prayer, TimeOfDay};

fn arb_time() -> impl Strategy<Value = TimeOfDay> {
    (0u8..24, 0u8..60).prop_map(|(h, m)| TimeOfDay::new(h, m).unwrap())
}

/// Strictly increasing times, as a real day's timings are.
fn arb_ordered_schedule() -> impl Strategy<Value = EventSchedule> {
    prop::collection::btree_set(0u16..1440, 5).prop_map(|minutes| {
        let times: Vec<TimeOfDay> = minutes
            .into_iter()
            .map(|m| TimeOfDay::new((m / 60) as u8, (m % 60) as u8).unwrap())
            .collect();
        EventSchedule::new([times[0], times[1], times[2], times[3], times[4]])
    })
}

fn arb_now() -> impl Strategy<Value = NaiveDateTime> {
    (0u32..86_400_000).prop_map(|ms| {
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        date.and_time(NaiveTime::MIN) + TimeDelta::milliseconds(ms as i64)
    })
}

proptest! {
    #[test]
    fn result_is_the_minimum_positive_delta(
        times in prop::array::uniform5(arb_time()),
        now in arb_now(),
    ) {
        let schedule = EventSchedule::new(times);
        let next = next_event(&schedule, now);

        prop_assert!(next.target > now);
        prop_assert_eq!(
            next.remaining_ms,
            (next.target - now).num_milliseconds() as u64
        );

        let today: Vec<NaiveDateTime> = schedule
            .iter()
            .map(|(_, t)| t.on(now.date()))
            .filter(|t| *t > now)
            .collect();

        if let Some(min) = today.iter().min() {
            prop_assert!(!next.tomorrow);
            prop_assert_eq!(next.target, *min);
        } else {
            prop_assert!(next.tomorrow);
            prop_assert_eq!(next.prayer, Prayer::DAY_OPENING);
            prop_assert_eq!(next.target.date(), now.date().succ_opt().unwrap());
        }
    }

    #[test]
    fn remaining_never_exceeds_a_day_for_ordered_schedules(
        schedule in arb_ordered_schedule(),
        now in arb_now(),
    ) {
        let next = next_event(&schedule, now);
        prop_assert!(next.remaining_ms <= 24 * 3600 * 1000);
        prop_assert_eq!(
            next.countdown().total_secs(),
            next.remaining_ms / 1000
        );
    }
}

#[test]
fn reference_example_from_afternoon() {
    let schedule = EventSchedule::from_json(
        r#"{"Fajr":"06:00","Dhuhr":"12:00","Asr":"15:00","Maghrib":"17:30","Isha":"20:00"}"#,
    )
    .unwrap();
    let now = NaiveDateTime::parse_from_str("2026-06-15 13:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let next = next_event(&schedule, now);
    assert_eq!(next.prayer, Prayer::Asr);
    assert_eq!(next.remaining_ms, 2 * 3600 * 1000);
    assert_eq!(next.countdown().to_string(), "2h 0m 0s");
}
