use chrono::{Datelike, Days, NaiveDate, Weekday};
use skucal::calendar;
use speculate2::speculate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

speculate! {
    describe "weeks_in_month" {
        it "starts every week on Saturday and spans 7 consecutive days" {
            let weeks = calendar::weeks_in_month(date(2025, 6, 15));
            assert!(!weeks.is_empty());
            for week in &weeks {
                assert_eq!(week.start.weekday(), Weekday::Sat);
                assert_eq!(week.end, week.start + Days::new(6));
                assert_eq!(week.days.len(), 7);
                for (offset, day) in week.days.iter().enumerate() {
                    assert_eq!(*day, week.start + Days::new(offset as u64));
                }
            }
        }

        it "covers every day of the reference month" {
            for month in 1..=12 {
                let reference = date(2025, month, 10);
                let weeks = calendar::weeks_in_month(reference);
                let mut day = reference.with_day(1).expect("day 1 exists");
                while day.month() == month {
                    assert!(
                        weeks.iter().any(|week| week.days.contains(&day)),
                        "{} not covered by any week",
                        day
                    );
                    day = day.succ_opt().expect("next day exists");
                }
            }
        }

        it "includes the partial leading week" {
            // June 2025 starts on a Sunday; its first week starts May 31.
            let weeks = calendar::weeks_in_month(date(2025, 6, 1));
            assert_eq!(weeks[0].start, date(2025, 5, 31));
            assert_eq!(weeks[0].end, date(2025, 6, 6));
        }

        it "handles a month whose first day is the start weekday" {
            // November 2025 starts on a Saturday.
            let weeks = calendar::weeks_in_month(date(2025, 11, 20));
            assert_eq!(weeks[0].start, date(2025, 11, 1));
        }

        it "emits five rows for a short month and six for a long one" {
            // November 2025: 30 days, opening exactly on Saturday.
            assert_eq!(calendar::weeks_in_month(date(2025, 11, 5)).len(), 5);
            // August 2025: 31 days, opening on a Friday.
            assert_eq!(calendar::weeks_in_month(date(2025, 8, 5)).len(), 6);
        }

        it "never emits more than seven weeks" {
            for year in [2023, 2024, 2025, 2026] {
                for month in 1..=12 {
                    assert!(calendar::weeks_in_month(date(year, month, 1)).len() <= 7);
                }
            }
        }

        it "is recomputed fresh on every call" {
            let reference = date(2025, 6, 15);
            assert_eq!(
                calendar::weeks_in_month(reference),
                calendar::weeks_in_month(reference)
            );
        }
    }

    describe "week_number" {
        it "maps the baseline week start to 22" {
            assert_eq!(calendar::week_number(date(2025, 6, 28)), 22);
        }

        it "increments by exactly one per 7-day step" {
            let mut start = date(2024, 1, 6);
            for _ in 0..120 {
                let next = start + Days::new(7);
                assert_eq!(
                    calendar::week_number(next),
                    calendar::week_number(start) + 1
                );
                start = next;
            }
        }

        it "is monotonically non-decreasing as the start advances" {
            let base = date(2025, 1, 1);
            let mut previous = calendar::week_number(base);
            for offset in 1..400u64 {
                let number = calendar::week_number(base + Days::new(offset));
                assert!(number >= previous);
                previous = number;
            }
        }

        it "numbers weeks before the baseline" {
            assert_eq!(calendar::week_number(date(2025, 6, 21)), 21);
            assert_eq!(calendar::week_number(date(2025, 1, 4)), -3);
        }

        it "numbers the weeks of a displayed month consecutively" {
            let weeks = calendar::weeks_in_month(date(2025, 6, 15));
            let numbers: Vec<i64> = weeks
                .iter()
                .map(|week| calendar::week_number(week.start))
                .collect();
            assert_eq!(numbers, vec![18, 19, 20, 21, 22]);
        }
    }

    describe "step_month" {
        it "advances across a year boundary" {
            assert_eq!(
                calendar::step_month(date(2025, 12, 15), 1),
                date(2026, 1, 15)
            );
        }

        it "steps backwards across a year boundary" {
            assert_eq!(
                calendar::step_month(date(2025, 1, 15), -1),
                date(2024, 12, 15)
            );
        }

        it "round-trips on the month" {
            let start = date(2025, 1, 31);
            let back = calendar::step_month(calendar::step_month(start, 1), -1);
            assert_eq!(back.year(), 2025);
            assert_eq!(back.month(), 1);
        }

        it "clamps the day when the target month is shorter" {
            assert_eq!(calendar::step_month(date(2025, 1, 31), 1), date(2025, 2, 28));
        }
    }

    describe "labels" {
        it "formats a week range across a month boundary" {
            let weeks = calendar::weeks_in_month(date(2025, 6, 15));
            assert_eq!(calendar::format_week_range(&weeks[0]), "May 31 - Jun 6");
            assert_eq!(calendar::format_week_range(&weeks[1]), "Jun 7 - Jun 13");
        }

        it "formats a month title" {
            assert_eq!(calendar::format_month_title(date(2025, 6, 15)), "June 2025");
        }
    }

    describe "week_start_on_or_before" {
        it "maps a Saturday to itself" {
            assert_eq!(
                calendar::week_start_on_or_before(date(2025, 6, 28)),
                date(2025, 6, 28)
            );
        }

        it "maps every other weekday to the previous Saturday" {
            for offset in 1..7u64 {
                let day = date(2025, 6, 28) + Days::new(offset);
                assert_eq!(
                    calendar::week_start_on_or_before(day),
                    date(2025, 6, 28)
                );
            }
        }
    }
}
