use serde_json::{Map, Value};

use crate::{
	course::{CourseRecord, ScheduleEntry},
	settings::NormalizeConfig,
};

/// A course object as found in a JSON file. Only `Schedule` is interpreted;
/// every other key, and the key order, is carried through untouched.
pub type LooseCourse = Map<String, Value>;

pub const SCHEDULE_KEY: &str = "Schedule";

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
	config: NormalizeConfig,
}

impl Normalizer {
	#[must_use]
	pub fn new(config: NormalizeConfig) -> Self {
		Self { config }
	}

	/// Rewrites the range separator and splits on the list separator, so
	/// "9:00AM- 9:50AM, 1:00PM- 1:50PM" becomes two single ranges.
	#[must_use]
	pub fn normalize_time(&self, time: &str) -> Vec<String> {
		let NormalizeConfig {
			range_separator,
			range_replacement,
			list_separator,
		} = &self.config;

		let time = if range_separator.is_empty() {
			time.to_string()
		} else {
			time.replace(range_separator.as_str(), range_replacement)
		};

		if list_separator.is_empty() || !time.contains(list_separator.as_str()) {
			return vec![time];
		}

		time.split(list_separator.as_str()).map(String::from).collect()
	}

	#[must_use]
	pub fn normalize_schedule(&self, schedule: &[ScheduleEntry]) -> Vec<ScheduleEntry> {
		schedule
			.iter()
			.flat_map(|entry| {
				self.normalize_time(&entry.time)
					.into_iter()
					.map(|time| ScheduleEntry::new(entry.day, time))
			})
			.collect()
	}

	#[must_use]
	pub fn normalize_records(&self, mut courses: Vec<CourseRecord>) -> Vec<CourseRecord> {
		for course in &mut courses {
			if course.schedule.is_empty() {
				continue;
			}

			course.schedule = self.normalize_schedule(&course.schedule);
		}

		courses
	}

	/// Like [`Normalizer::normalize_records`] but for arbitrary course
	/// objects. Only a non-empty `Schedule` array is rewritten, in place; an
	/// absent, `null` or empty schedule is left exactly as it is.
	#[must_use]
	pub fn normalize_loose(&self, mut courses: Vec<LooseCourse>) -> Vec<LooseCourse> {
		for course in &mut courses {
			let Some(Value::Array(schedule)) = course.get_mut(SCHEDULE_KEY) else {
				continue;
			};

			if schedule.is_empty() {
				continue;
			}

			*schedule = schedule
				.iter()
				.flat_map(|entry| self.normalize_loose_entry(entry))
				.collect();
		}

		courses
	}

	/// Entries without a string `time` are dropped. A missing `day` becomes
	/// an empty string; any other `day` value, `null` included, is kept.
	fn normalize_loose_entry(&self, entry: &Value) -> Vec<Value> {
		let Some(time) = entry.get("time") else {
			return Vec::new();
		};

		let Some(time) = time.as_str() else {
			tracing::warn!(%time, "dropping schedule entry with non-text time");
			return Vec::new();
		};

		let day = entry
			.get("day")
			.cloned()
			.unwrap_or_else(|| Value::String(String::new()));

		self.normalize_time(time)
			.into_iter()
			.map(|time| {
				let mut out = Map::new();
				out.insert(String::from("day"), day.clone());
				out.insert(String::from("time"), Value::String(time));
				Value::Object(out)
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::course::Day;

	fn loose(json: &str) -> Vec<LooseCourse> {
		serde_json::from_str(json).unwrap()
	}

	fn normalized(json: &str) -> String {
		serde_json::to_string(&Normalizer::default().normalize_loose(loose(json))).unwrap()
	}

	#[test]
	fn replaces_hyphen_space_only() {
		let normalizer = Normalizer::default();

		assert_eq!(normalizer.normalize_time("9:00AM- 9:50AM"), vec!["9:00AM to 9:50AM"]);
		assert_eq!(normalizer.normalize_time("9:00AM-9:50AM"), vec!["9:00AM-9:50AM"]);
	}

	#[test]
	fn splits_combined_ranges() {
		let normalizer = Normalizer::default();

		assert_eq!(
			normalizer.normalize_time("9:00AM- 12:00PM, 3:30PM- 5:20PM"),
			vec!["9:00AM to 12:00PM", "3:30PM to 5:20PM"]
		);
	}

	#[test]
	fn typed_schedule_expands_in_order() {
		let normalizer = Normalizer::default();
		let courses = vec![CourseRecord {
			schedule: vec![
				ScheduleEntry::new(Day::Tuesday, "9:00AM to 9:50AM, 1:00PM to 1:50PM"),
				ScheduleEntry::new(Day::Monday, "9:00AM- 9:50AM"),
			],
			..CourseRecord::default()
		}];

		let courses = normalizer.normalize_records(courses);

		assert_eq!(courses[0].schedule, vec![
			ScheduleEntry::new(Day::Tuesday, "9:00AM to 9:50AM"),
			ScheduleEntry::new(Day::Tuesday, "1:00PM to 1:50PM"),
			ScheduleEntry::new(Day::Monday, "9:00AM to 9:50AM"),
		]);
	}

	#[test]
	fn second_pass_changes_nothing() {
		let normalizer = Normalizer::default();
		let courses = vec![CourseRecord {
			schedule: vec![
				ScheduleEntry::new(Day::Friday, "8:00AM- 9:15AM, 10:00AM- 11:15AM"),
				ScheduleEntry::new(Day::Friday, "1:00PM -2:00PM"),
			],
			..CourseRecord::default()
		}];

		let once = normalizer.normalize_records(courses);
		let twice = normalizer.normalize_records(once.clone());

		assert_eq!(once, twice);
	}

	#[test]
	fn loose_drops_entries_without_time() {
		let json = normalized(
			r#"[{"Course": "A", "Schedule": [
				{"day": "Monday"},
				{"day": "Monday", "time": null},
				{"time": "9:00AM- 9:50AM, 1:00PM- 1:50PM"},
				{"day": "Friday", "time": "2:00PM- 3:00PM"}
			]}]"#,
		);

		assert_eq!(
			json,
			r#"[{"Course":"A","Schedule":[{"day":"","time":"9:00AM to 9:50AM"},{"day":"","time":"1:00PM to 1:50PM"},{"day":"Friday","time":"2:00PM to 3:00PM"}]}]"#
		);
	}

	#[test]
	fn loose_leaves_absent_null_and_empty_schedules() {
		let json = normalized(r#"[{"Course": "A"}, {"Course": "B", "Schedule": []}, {"Course": "C", "Schedule": null}]"#);

		assert_eq!(
			json,
			r#"[{"Course":"A"},{"Course":"B","Schedule":[]},{"Course":"C","Schedule":null}]"#
		);
	}

	#[test]
	fn loose_keeps_null_day() {
		let json = normalized(r#"[{"Schedule": [{"day": null, "time": "9:00AM- 9:50AM"}]}]"#);

		assert_eq!(json, r#"[{"Schedule":[{"day":null,"time":"9:00AM to 9:50AM"}]}]"#);
	}

	#[test]
	fn loose_keeps_other_keys_in_order() {
		let json = normalized(
			r#"[{"Schedule": [{"day": "Monday", "time": "9:00AM- 9:50AM"}], "Course": "A", "Course Title": "Tiếng Việt", "Credits": "3.00"}]"#,
		);

		assert_eq!(
			json,
			r#"[{"Schedule":[{"day":"Monday","time":"9:00AM to 9:50AM"}],"Course":"A","Course Title":"Tiếng Việt","Credits":"3.00"}]"#
		);
	}

	#[test]
	fn custom_separators() {
		let normalizer = Normalizer::new(NormalizeConfig {
			range_separator: String::from(" - "),
			range_replacement: String::from("–"),
			list_separator: String::from(" / "),
		});

		assert_eq!(
			normalizer.normalize_time("9:00AM - 9:50AM / 1:00PM - 1:50PM"),
			vec!["9:00AM–9:50AM", "1:00PM–1:50PM"]
		);
	}
}
