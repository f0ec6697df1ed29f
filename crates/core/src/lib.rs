#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::path::Path;

pub mod calendar;
pub mod course;
mod error;
pub mod extract;
pub mod io;
pub mod normalize;
pub mod settings;
pub mod timeslot;

pub use course::{CourseRecord, Day, ScheduleEntry};
pub use error::{Error, Result};
pub use extract::Extractor;
pub use normalize::Normalizer;
pub use settings::Settings;

/// Extracts the course table from `html` and normalizes every schedule.
pub fn parse_from_str(html: &str, settings: &Settings) -> Result<Vec<CourseRecord>> {
	let courses = extract::extract_courses(html, &settings.extract)?;

	Ok(Normalizer::new(settings.normalize.clone()).normalize_records(courses))
}

/// Normalizes the course file at `input` and writes the result to `output`.
/// Nothing is written unless the whole input parses. Returns the number of
/// courses written.
pub fn normalize_file(
	input: impl AsRef<Path>,
	output: impl AsRef<Path>,
	settings: &Settings,
) -> Result<usize> {
	let courses: Vec<normalize::LooseCourse> = io::read_json(input)?;
	let courses = Normalizer::new(settings.normalize.clone()).normalize_loose(courses);

	io::write_json(output, &courses)?;

	Ok(courses.len())
}

/// Normalizes a JSON array of course objects given as text.
pub fn normalize_json(json: &str, settings: &Settings) -> Result<String> {
	let courses: Vec<normalize::LooseCourse> = serde_json::from_str(json)?;

	io::to_json(&Normalizer::new(settings.normalize.clone()).normalize_loose(courses))
}

/// Renders a JSON array of courses as an iCalendar document.
pub fn ics_from_json(json: &str, settings: &Settings) -> Result<String> {
	let courses: Vec<CourseRecord> = serde_json::from_str(json)?;

	Ok(calendar::create_calendar(&courses, &settings.calendar)?.to_string())
}
