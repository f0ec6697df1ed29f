use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use icalendar::{Alarm, Calendar, CalendarDateTime, Component, Event, EventLike};

use crate::{
	course::{CourseRecord, ScheduleEntry},
	settings::CalendarConfig,
	timeslot, Result,
};

/// Parses "2/9/2026 to 6/5/2026" into the first and last day of term.
#[must_use]
pub fn parse_date_range(dates: &str) -> Option<(NaiveDate, NaiveDate)> {
	let mut dates = dates.split(" to ");
	let start = NaiveDate::parse_from_str(dates.next()?.trim(), "%m/%d/%Y").ok()?;
	let end = NaiveDate::parse_from_str(dates.next()?.trim(), "%m/%d/%Y").ok()?;

	Some((start, end))
}

/// First date on or after `date` that falls on `weekday`.
fn first_weekday(date: NaiveDate, weekday: Weekday) -> NaiveDate {
	let current = date.weekday().num_days_from_monday();
	let target = weekday.num_days_from_monday();
	let days_to_add = (7 + target - current) % 7;

	date + chrono::Duration::days(i64::from(days_to_add))
}

fn event_uid(course: &CourseRecord, entry: &ScheduleEntry, domain: &str) -> String {
	let id = format!("{}-{}-{}", course.section, entry.day, entry.time)
		.chars()
		.filter(|c| c.is_ascii_alphanumeric() || *c == '-')
		.collect::<String>();

	format!("{id}@{domain}")
}

fn create_event(
	course: &CourseRecord,
	entry: &ScheduleEntry,
	term: (NaiveDate, NaiveDate),
	tz: Tz,
	config: &CalendarConfig,
) -> Option<Event> {
	let (start, end) = timeslot::parse_time_range(&entry.time)?;
	let weekday = chrono::Weekday::from(entry.day);
	let first = first_weekday(term.0, weekday);

	// recurrence ends on the last day of term, inclusive
	let until = tz
		.from_local_datetime(&term.1.and_time(NaiveTime::from_hms_opt(23, 59, 59)?))
		.earliest()?;

	let mut event = Event::new();

	event
		.uid(&event_uid(course, entry, &config.uid_domain))
		.summary(&course.title)
		.description(&format!(
			"Section: {}\nInstructor: {}",
			course.section, course.instructor
		))
		.location(&course.delivery_method)
		.starts(CalendarDateTime::WithTimezone {
			date_time: first.and_time(start),
			tzid: tz.name().to_string(),
		})
		.ends(CalendarDateTime::WithTimezone {
			date_time: first.and_time(end),
			tzid: tz.name().to_string(),
		})
		// repeat weekly
		.add_property(
			"RRULE",
			rrule::RRule::new(rrule::Frequency::Weekly)
				.by_weekday(vec![rrule::NWeekday::Every(weekday)])
				.until(until.with_timezone(&rrule::Tz::Tz(tz)))
				.to_string(),
		)
		.alarm(Alarm::display(
			&format!("Class starting in {} minutes", config.reminder_minutes),
			-chrono::Duration::minutes(i64::from(config.reminder_minutes)),
		));

	Some(event)
}

/// One weekly recurring event per schedule entry. Courses whose dates do not
/// parse and entries whose time does not parse are left out.
pub fn create_calendar(courses: &[CourseRecord], config: &CalendarConfig) -> Result<Calendar> {
	let tz = config.tz()?;
	let mut calendar = Calendar::new();

	calendar.name(&config.name);
	calendar.timezone(tz.name());

	for course in courses {
		let Some(term) = parse_date_range(&course.dates) else {
			tracing::debug!(section = %course.section, dates = %course.dates, "skipping course without term dates");
			continue;
		};

		for entry in &course.schedule {
			match create_event(course, entry, term, tz, config) {
				Some(event) => {
					calendar.push(event);
				}
				None => {
					tracing::debug!(section = %course.section, time = %entry.time, "skipping unparseable meeting");
				}
			}
		}
	}

	Ok(calendar)
}
