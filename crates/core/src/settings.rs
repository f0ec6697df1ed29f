use std::path::Path;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::{course::Day, Error, Result};

pub const ENV_PREFIX: &str = "COURSESCHED";

/// Every knob of the pipeline. All fields have defaults matching the course
/// registration export, so an empty source deserializes to a working setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub extract: ExtractConfig,
	pub normalize: NormalizeConfig,
	pub calendar: CalendarConfig,
}

impl Settings {
	/// Layers an optional TOML file and `COURSESCHED_*` environment variables
	/// over the defaults. Nested keys use `__`, e.g.
	/// `COURSESCHED_EXTRACT__TABLE_ID`.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let mut builder = config::Config::builder();

		if let Some(path) = path {
			builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
		}

		let settings = builder
			.add_source(
				config::Environment::with_prefix(ENV_PREFIX)
					.prefix_separator("_")
					.separator("__")
					.try_parsing(true),
			)
			.build()?;

		Ok(settings.try_deserialize()?)
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
	/// `id` attribute of the course table.
	pub table_id: String,
	/// Schedule cell text meaning the course has no meetings.
	pub no_meetings: String,
	pub detail: DetailElement,
	pub columns: Columns,
	pub day_codes: Vec<DayCode>,
}

impl Default for ExtractConfig {
	fn default() -> Self {
		Self {
			table_id: String::from("CourseList"),
			no_meetings: String::from("No scheduled meetings"),
			detail: DetailElement::default(),
			columns: Columns::default(),
			day_codes: DayCode::defaults(),
		}
	}
}

impl ExtractConfig {
	#[must_use]
	pub fn day(&self, code: char) -> Option<Day> {
		self.day_codes.iter().find(|d| d.code == code).map(|d| d.day)
	}
}

/// The element inside a schedule cell whose attribute holds the unabridged
/// schedule text.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetailElement {
	pub name: String,
	pub id: String,
	pub attr: String,
}

impl Default for DetailElement {
	fn default() -> Self {
		Self {
			name: String::from("span"),
			id: String::from("lnkDetails"),
			attr: String::from("title"),
		}
	}
}

/// Zero-based cell positions. Column 0 holds the row's expand control and is
/// never read.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Columns {
	pub course: usize,
	pub title: usize,
	pub section: usize,
	pub dates: usize,
	pub credits: usize,
	pub schedule: usize,
	pub instructor: usize,
	pub delivery_method: usize,
}

impl Default for Columns {
	fn default() -> Self {
		Self {
			course: 1,
			title: 2,
			section: 3,
			dates: 4,
			credits: 5,
			schedule: 6,
			instructor: 7,
			delivery_method: 8,
		}
	}
}

impl Columns {
	/// Number of cells a row needs for every column to be present.
	#[must_use]
	pub fn width(&self) -> usize {
		[
			self.course,
			self.title,
			self.section,
			self.dates,
			self.credits,
			self.schedule,
			self.instructor,
			self.delivery_method,
		]
		.into_iter()
		.max()
		.unwrap_or_default()
			+ 1
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DayCode {
	pub code: char,
	pub day: Day,
}

impl DayCode {
	fn defaults() -> Vec<Self> {
		[
			('M', Day::Monday),
			('T', Day::Tuesday),
			('W', Day::Wednesday),
			('H', Day::Thursday),
			('F', Day::Friday),
			('S', Day::Saturday),
			('U', Day::Sunday),
		]
		.into_iter()
		.map(|(code, day)| Self { code, day })
		.collect()
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
	/// Written between a range's start and end, e.g. "9:00AM- 9:50AM".
	pub range_separator: String,
	pub range_replacement: String,
	/// Joins several ranges inside one time string.
	pub list_separator: String,
}

impl Default for NormalizeConfig {
	fn default() -> Self {
		Self {
			range_separator: String::from("- "),
			range_replacement: String::from(" to "),
			list_separator: String::from(", "),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
	pub name: String,
	/// IANA name, e.g. `Asia/Ho_Chi_Minh`.
	pub timezone: String,
	pub reminder_minutes: u32,
	/// Suffix of every event UID.
	pub uid_domain: String,
}

impl Default for CalendarConfig {
	fn default() -> Self {
		Self {
			name: String::from("Course Schedule"),
			timezone: String::from("Asia/Ho_Chi_Minh"),
			reminder_minutes: 15,
			uid_domain: String::from("coursesched"),
		}
	}
}

impl CalendarConfig {
	pub fn tz(&self) -> Result<Tz> {
		self.timezone
			.parse()
			.map_err(|_| Error::Timezone(self.timezone.clone()))
	}
}
