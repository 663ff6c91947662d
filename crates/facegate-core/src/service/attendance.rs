//! Attendance recording and monthly recap assembly.
//!
//! Events are classified against the configured work schedule at the
//! moment they are recorded. The recap walks every calendar day of a month
//! (clamped at "today") and pairs each employee with their first clock-in
//! and last clock-out per local day.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use std::collections::HashMap;

use facegate_types::attendance::{AttendanceId, AttendanceRecord, AttendanceStatus, RecapRow};
use facegate_types::config::ScheduleConfig;
use facegate_types::employee::Employee;
use facegate_types::error::{ReportError, RepositoryError};

use crate::repository::attendance::AttendanceRepository;

/// Service over the attendance event store plus the work schedule.
pub struct AttendanceService<A> {
    repo: A,
    schedule: ScheduleConfig,
}

impl<A: AttendanceRepository> AttendanceService<A> {
    pub fn new(repo: A, schedule: ScheduleConfig) -> Self {
        Self { repo, schedule }
    }

    /// Record an attendance event now, classified by the schedule.
    pub async fn record(
        &self,
        nip: &str,
        score: Option<f32>,
    ) -> Result<AttendanceRecord, RepositoryError> {
        self.record_at(nip, score, Utc::now()).await
    }

    /// Record an attendance event at an explicit instant (testable seam).
    pub async fn record_at(
        &self,
        nip: &str,
        score: Option<f32>,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, RepositoryError> {
        let status = classify(&self.schedule, now);
        let record = AttendanceRecord {
            id: AttendanceId::new(),
            employee_nip: nip.to_string(),
            recorded_at: now,
            status,
            score,
        };
        self.repo.insert(&record).await?;
        tracing::info!(%nip, %status, "attendance recorded");
        Ok(record)
    }

    /// Build the monthly recap for the given employees.
    pub async fn monthly_recap(
        &self,
        employees: &[Employee],
        year: i32,
        month: u32,
    ) -> Result<Vec<RecapRow>, ReportError> {
        self.monthly_recap_at(employees, year, month, Utc::now())
            .await
    }

    /// Recap with an explicit "now", so future days of the current month
    /// are excluded deterministically.
    pub async fn monthly_recap_at(
        &self,
        employees: &[Employee],
        year: i32,
        month: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<RecapRow>, ReportError> {
        let Some(window) = self.month_window(year, month, now)? else {
            return Ok(Vec::new());
        };
        let events = self
            .repo
            .list_between(window.start_utc, window.end_utc)
            .await?;
        Ok(self.assemble(employees, &events, &window))
    }

    /// Recap for a single employee, fetching only their events.
    pub async fn employee_recap(
        &self,
        employee: &Employee,
        year: i32,
        month: u32,
    ) -> Result<Vec<RecapRow>, ReportError> {
        self.employee_recap_at(employee, year, month, Utc::now())
            .await
    }

    pub async fn employee_recap_at(
        &self,
        employee: &Employee,
        year: i32,
        month: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<RecapRow>, ReportError> {
        let Some(window) = self.month_window(year, month, now)? else {
            return Ok(Vec::new());
        };
        let events = self
            .repo
            .list_for_employee(&employee.nip, window.start_utc, window.end_utc)
            .await?;
        Ok(self.assemble(std::slice::from_ref(employee), &events, &window))
    }

    pub async fn total_events(&self) -> Result<i64, RepositoryError> {
        self.repo.count().await
    }

    /// The UTC bounds and listable day range of a report month.
    ///
    /// `None` means the whole month is in the future.
    fn month_window(
        &self,
        year: i32,
        month: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<MonthWindow>, ReportError> {
        let offset = self.offset();
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ReportError::InvalidPeriod(format!("{year}-{month:02}")))?;
        let first_next = next_month(first);

        // Clamp the day range at today (local): the original recap never
        // lists future days of the running month.
        let today_local = now.with_timezone(&offset).date_naive();
        let last_listed = std::cmp::min(first_next.pred_opt().unwrap_or(first), today_local);
        if last_listed < first {
            return Ok(None);
        }

        Ok(Some(MonthWindow {
            first,
            last_listed,
            start_utc: local_midnight_to_utc(first, offset),
            end_utc: local_midnight_to_utc(first_next, offset),
        }))
    }

    fn assemble(
        &self,
        employees: &[Employee],
        events: &[AttendanceRecord],
        window: &MonthWindow,
    ) -> Vec<RecapRow> {
        let offset = self.offset();

        // (nip, local date) -> (first clock-in, last clock-out)
        let mut by_day: HashMap<(String, NaiveDate), (Option<String>, Option<String>)> =
            HashMap::new();
        for event in events {
            let local = event.recorded_at.with_timezone(&offset);
            let key = (event.employee_nip.clone(), local.date_naive());
            let entry = by_day.entry(key).or_default();
            let hhmm = local.format("%H:%M").to_string();
            match event.status {
                AttendanceStatus::OnTime | AttendanceStatus::Late => {
                    if entry.0.is_none() {
                        entry.0 = Some(hhmm);
                    }
                }
                AttendanceStatus::ClockOut => entry.1 = Some(hhmm),
            }
        }

        let mut rows = Vec::new();
        let mut date = window.first;
        while date <= window.last_listed {
            let workday = self.schedule.is_workday(date.weekday());
            for employee in employees {
                let times = by_day
                    .get(&(employee.nip.clone(), date))
                    .cloned()
                    .unwrap_or_default();
                rows.push(RecapRow {
                    date,
                    nip: employee.nip.clone(),
                    name: employee.name.clone(),
                    clock_in: times.0,
                    clock_out: times.1,
                    note: (!workday).then(|| "non-workday".to_string()),
                });
            }
            date += Duration::days(1);
        }

        rows
    }

    fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(i32::from(self.schedule.utc_offset_hours) * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap())
    }
}

/// UTC bounds of a report month plus the last local day to list.
struct MonthWindow {
    first: NaiveDate,
    last_listed: NaiveDate,
    start_utc: DateTime<Utc>,
    end_utc: DateTime<Utc>,
}

/// Classify an instant against the schedule, in local wall-clock time.
pub fn classify(schedule: &ScheduleConfig, now: DateTime<Utc>) -> AttendanceStatus {
    let offset = FixedOffset::east_opt(i32::from(schedule.utc_offset_hours) * 3600)
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
    let local_time = now.with_timezone(&offset).time();

    if local_time > schedule.clock_out_after_time() {
        AttendanceStatus::ClockOut
    } else if local_time > schedule.clock_in_deadline_time() {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::OnTime
    }
}

fn next_month(first: NaiveDate) -> NaiveDate {
    if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1).unwrap()
    }
}

fn local_midnight_to_utc(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(offset)
        .unwrap()
        .with_timezone(&Utc)
}
