use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timeslot::{self, TimeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
	Monday,
	Tuesday,
	Wednesday,
	Thursday,
	Friday,
	Saturday,
	Sunday,
}

impl Day {
	#[must_use]
	pub fn name(self) -> &'static str {
		match self {
			Self::Monday => "Monday",
			Self::Tuesday => "Tuesday",
			Self::Wednesday => "Wednesday",
			Self::Thursday => "Thursday",
			Self::Friday => "Friday",
			Self::Saturday => "Saturday",
			Self::Sunday => "Sunday",
		}
	}
}

impl fmt::Display for Day {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl From<Day> for chrono::Weekday {
	fn from(day: Day) -> Self {
		match day {
			Day::Monday => Self::Mon,
			Day::Tuesday => Self::Tue,
			Day::Wednesday => Self::Wed,
			Day::Thursday => Self::Thu,
			Day::Friday => Self::Fri,
			Day::Saturday => Self::Sat,
			Day::Sunday => Self::Sun,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
	pub day: Day,
	pub time: String,
}

impl ScheduleEntry {
	pub fn new(day: Day, time: impl Into<String>) -> Self {
		Self {
			day,
			time: time.into(),
		}
	}
}

/// One row of the course table. Field names double as the JSON keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
	#[serde(rename = "Course")]
	pub course: String,
	#[serde(rename = "Course Title")]
	pub title: String,
	#[serde(rename = "Section")]
	pub section: String,
	#[serde(rename = "Dates")]
	pub dates: String,
	#[serde(rename = "Credits")]
	pub credits: String,
	#[serde(rename = "Instructor")]
	pub instructor: String,
	#[serde(rename = "Delivery Method")]
	pub delivery_method: String,
	#[serde(rename = "Schedule", default)]
	pub schedule: Vec<ScheduleEntry>,
}

impl CourseRecord {
	/// Schedule entries whose time text parses into a clock range. Entries
	/// such as "TBA" are left out.
	pub fn time_slots(&self) -> impl Iterator<Item = TimeSlot> + '_ {
		self.schedule.iter().filter_map(|entry| {
			timeslot::parse_time_range(&entry.time).map(|(start, end)| TimeSlot {
				day: entry.day,
				start,
				end,
			})
		})
	}

	/// Credits as a number, or `None` when the column is not numeric.
	#[must_use]
	pub fn credit_value(&self) -> Option<f64> {
		self.credits.trim().parse().ok()
	}
}
