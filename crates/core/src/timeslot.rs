use std::{collections::BTreeMap, sync::OnceLock};

use chrono::NaiveTime;
use regex::Regex;

use crate::course::{CourseRecord, Day};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
	pub day: Day,
	pub start: NaiveTime,
	pub end: NaiveTime,
}

impl TimeSlot {
	/// Same-day slots overlap when each starts before the other ends, so
	/// back-to-back classes do not clash.
	#[must_use]
	pub fn overlaps(&self, other: &Self) -> bool {
		self.day == other.day && self.start < other.end && other.start < self.end
	}
}

fn range_pattern() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();

	RE.get_or_init(|| {
		Regex::new(
			r"(?i)(\d{1,2}):(\d{2})\s*(AM|PM)\s*(?:-|–|\bto\b)\s*(\d{1,2}):(\d{2})\s*(AM|PM)",
		)
		.expect("time range pattern is valid")
	})
}

fn to_time(hour: &str, minute: &str, period: &str) -> Option<NaiveTime> {
	let mut hour = hour.parse::<u32>().ok()?;
	let minute = minute.parse().ok()?;

	if hour == 0 || hour > 12 {
		return None;
	}

	if period.eq_ignore_ascii_case("PM") && hour != 12 {
		hour += 12;
	}

	if period.eq_ignore_ascii_case("AM") && hour == 12 {
		hour = 0;
	}

	NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parses "9:00AM- 12:00PM", "9:00AM to 10:15AM" or "1:30PM - 3:00PM" into
/// start and end clock times.
#[must_use]
pub fn parse_time_range(text: &str) -> Option<(NaiveTime, NaiveTime)> {
	let caps = range_pattern().captures(text)?;

	let start = to_time(&caps[1], &caps[2], &caps[3])?;
	let end = to_time(&caps[4], &caps[5], &caps[6])?;

	Some((start, end))
}

#[must_use]
pub fn courses_conflict(a: &CourseRecord, b: &CourseRecord) -> bool {
	let other = b.time_slots().collect::<Vec<_>>();

	a.time_slots()
		.any(|slot| other.iter().any(|o| slot.overlaps(o)))
}

/// Maps every course's section to the sections it clashes with, in input
/// order. Courses without clashes map to an empty list.
#[must_use]
pub fn find_conflicts(courses: &[CourseRecord]) -> BTreeMap<String, Vec<String>> {
	let mut conflicts = courses
		.iter()
		.map(|c| (c.section.clone(), Vec::new()))
		.collect::<BTreeMap<_, _>>();

	for (i, a) in courses.iter().enumerate() {
		for b in &courses[i + 1..] {
			if !courses_conflict(a, b) {
				continue;
			}

			if let Some(list) = conflicts.get_mut(&a.section) {
				list.push(b.section.clone());
			}

			if let Some(list) = conflicts.get_mut(&b.section) {
				list.push(a.section.clone());
			}
		}
	}

	conflicts
}

#[must_use]
pub fn total_credits(courses: &[CourseRecord]) -> f64 {
	courses.iter().filter_map(CourseRecord::credit_value).sum()
}
