//! Gatekeeper for event creation: one IN and one OUT per person per
//! organization per calendar day, and no OUT before a same-day IN.

use crate::core::time_window::TimeWindow;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{find_attendance, insert_attendance};
use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::models::event_kind::EventKind;
use crate::models::organization::Organization;
use crate::models::person::Person;
use chrono::{DateTime, NaiveDate, Utc};

pub struct Guard;

impl Guard {
    /// Record a check-in for today. Rejected with `AlreadyCheckedIn` when an
    /// IN already exists for (org, person) today: idempotent, no duplicate
    /// row. The append itself is optimistic: a row raced in by a concurrent
    /// caller between the check and the insert surfaces as a uniqueness
    /// rejection and maps to the same outcome.
    pub fn check_in(
        pool: &mut DbPool,
        tw: &TimeWindow,
        org: &Organization,
        person: &Person,
        now: DateTime<Utc>,
    ) -> AppResult<AttendanceEvent> {
        let today = tw.day_of(now);
        let bounds = tw.day_bounds(today);

        let existing = find_attendance(&pool.conn, org.id, person.id, EventKind::In, bounds)?;
        if existing.is_some() {
            return Err(AppError::AlreadyCheckedIn);
        }

        let ev = AttendanceEvent::new(org.id, person.id, EventKind::In, now, today, String::new());

        match insert_attendance(&pool.conn, &ev)? {
            Some(stored) => {
                audit(
                    &pool.conn,
                    "check_in",
                    &format!("{}/{}", org.external_id, person.external_id),
                    &format!("Checked in on {}", stored.day_str()),
                )?;
                Ok(stored)
            }
            None => Err(AppError::AlreadyCheckedIn),
        }
    }

    /// Record a checkout for `day` (already validated against the backdate
    /// window) with a mandatory work summary. The stored instant combines
    /// the backdated day with the current wall-clock time-of-day, so it
    /// reflects when the action was actually performed.
    pub fn check_out(
        pool: &mut DbPool,
        tw: &TimeWindow,
        org: &Organization,
        person: &Person,
        day: NaiveDate,
        note: &str,
        now: DateTime<Utc>,
    ) -> AppResult<AttendanceEvent> {
        let note = note.trim();
        if note.is_empty() {
            return Err(AppError::EmptyNote);
        }

        let bounds = tw.day_bounds(day);

        let check_in = find_attendance(&pool.conn, org.id, person.id, EventKind::In, bounds)?;
        if check_in.is_none() {
            return Err(AppError::NotCheckedIn);
        }

        let check_out = find_attendance(&pool.conn, org.id, person.id, EventKind::Out, bounds)?;
        if check_out.is_some() {
            return Err(AppError::AlreadyCheckedOut);
        }

        let occurred_at = tw.to_utc(day.and_time(tw.local(now).time()));
        let ev = AttendanceEvent::new(
            org.id,
            person.id,
            EventKind::Out,
            occurred_at,
            day,
            note.to_string(),
        );

        match insert_attendance(&pool.conn, &ev)? {
            Some(stored) => {
                audit(
                    &pool.conn,
                    "check_out",
                    &format!("{}/{}", org.external_id, person.external_id),
                    &format!("Checked out for {}", stored.day_str()),
                )?;
                Ok(stored)
            }
            None => Err(AppError::AlreadyCheckedOut),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::{find_or_create_organization, find_or_create_person};
    use chrono::{Duration, FixedOffset, TimeZone};

    fn tw() -> TimeWindow {
        TimeWindow::new(FixedOffset::east_opt(8 * 3600).unwrap(), 3)
    }

    fn setup() -> (DbPool, Organization, Person) {
        let pool = DbPool::new(":memory:").unwrap();
        init_db(&pool.conn).unwrap();
        let org = find_or_create_organization(&pool.conn, "acme", Some("Acme")).unwrap();
        let person = find_or_create_person(&pool.conn, "alice", Some("Alice"), false).unwrap();
        (pool, org, person)
    }

    fn attendance_rows(pool: &DbPool) -> i64 {
        pool.conn
            .query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))
            .unwrap()
    }

    fn instant(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        // Wall-clock at +08:00.
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn second_check_in_is_rejected_without_a_new_row() {
        let (mut pool, org, person) = setup();
        let now = instant(2024, 1, 10, 9, 0);

        Guard::check_in(&mut pool, &tw(), &org, &person, now).unwrap();
        assert_eq!(attendance_rows(&pool), 1);

        let err = Guard::check_in(&mut pool, &tw(), &org, &person, now + Duration::hours(1))
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyCheckedIn));
        assert_eq!(attendance_rows(&pool), 1);
    }

    #[test]
    fn check_out_requires_a_same_day_check_in() {
        let (mut pool, org, person) = setup();
        let now = instant(2024, 1, 10, 17, 0);
        let day = tw().day_of(now);

        let err =
            Guard::check_out(&mut pool, &tw(), &org, &person, day, "wrapped up", now).unwrap_err();
        assert!(matches!(err, AppError::NotCheckedIn));
        assert_eq!(attendance_rows(&pool), 0);
    }

    #[test]
    fn check_out_rejects_a_blank_note() {
        let (mut pool, org, person) = setup();
        let now = instant(2024, 1, 10, 17, 0);
        let day = tw().day_of(now);

        Guard::check_in(&mut pool, &tw(), &org, &person, instant(2024, 1, 10, 9, 0)).unwrap();

        let err = Guard::check_out(&mut pool, &tw(), &org, &person, day, "   ", now).unwrap_err();
        assert!(matches!(err, AppError::EmptyNote));
        assert_eq!(attendance_rows(&pool), 1);
    }

    #[test]
    fn full_day_flow_then_duplicate_check_out() {
        let (mut pool, org, person) = setup();
        let morning = instant(2024, 1, 10, 9, 0);
        let evening = instant(2024, 1, 10, 17, 0);
        let day = tw().day_of(morning);

        Guard::check_in(&mut pool, &tw(), &org, &person, morning).unwrap();
        let out = Guard::check_out(&mut pool, &tw(), &org, &person, day, "shipped X", evening)
            .unwrap();
        assert_eq!(out.day, day);
        assert_eq!(out.note, "shipped X");
        assert_eq!(attendance_rows(&pool), 2);

        let err = Guard::check_out(&mut pool, &tw(), &org, &person, day, "again", evening)
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyCheckedOut));
        assert_eq!(attendance_rows(&pool), 2);
    }

    #[test]
    fn backdated_check_out_keys_off_the_backdated_day() {
        let (mut pool, org, person) = setup();
        let w = tw();

        // IN recorded two days ago; the checkout is performed "now".
        let past_morning = instant(2024, 1, 8, 9, 0);
        let now = instant(2024, 1, 10, 10, 30);
        Guard::check_in(&mut pool, &w, &org, &person, past_morning).unwrap();

        let day = w.day_of(past_morning);
        let out = Guard::check_out(&mut pool, &w, &org, &person, day, "forgot to log", now)
            .unwrap();

        // The stored instant carries the backdated day with the current
        // wall-clock time-of-day.
        assert_eq!(out.day, day);
        assert_eq!(w.local(out.occurred_at).time(), w.local(now).time());
        assert_eq!(w.day_of(out.occurred_at), day);
    }

    #[test]
    fn events_for_different_people_do_not_interfere() {
        let (mut pool, org, person) = setup();
        let bob = find_or_create_person(&pool.conn, "bob", Some("Bob"), false).unwrap();
        let now = instant(2024, 1, 10, 9, 0);

        Guard::check_in(&mut pool, &tw(), &org, &person, now).unwrap();
        Guard::check_in(&mut pool, &tw(), &org, &bob, now).unwrap();
        assert_eq!(attendance_rows(&pool), 2);
    }

    #[test]
    fn raced_duplicate_append_is_rejected_by_the_ledger() {
        // The unique index is the backstop when two callers pass the
        // existence check simultaneously.
        let (pool, org, person) = setup();
        let now = instant(2024, 1, 10, 9, 0);
        let day = tw().day_of(now);

        let ev =
            AttendanceEvent::new(org.id, person.id, EventKind::In, now, day, String::new());
        assert!(insert_attendance(&pool.conn, &ev).unwrap().is_some());
        assert!(insert_attendance(&pool.conn, &ev).unwrap().is_none());
    }
}
