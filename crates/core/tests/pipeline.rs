use coursesched_core::{
	calendar, extract, io,
	normalize::{LooseCourse, Normalizer},
	timeslot, CourseRecord, Day, ScheduleEntry, Settings,
};

const FIXTURE: &str = include_str!("fixtures/course_list.html");

fn entries(list: &[(Day, &str)]) -> Vec<ScheduleEntry> {
	list.iter()
		.map(|&(day, time)| ScheduleEntry::new(day, time))
		.collect()
}

#[test]
fn extracts_fixture_rows() {
	let settings = Settings::default();
	let courses = extract::extract_courses(FIXTURE, &settings.extract).unwrap();

	let codes = courses.iter().map(|c| c.course.as_str()).collect::<Vec<_>>();
	assert_eq!(codes, ["MANA1011", "COMP2020", "HIST1100"]);

	assert_eq!(courses[0].title, "Principles of Management");
	assert_eq!(courses[0].instructor, "Nguyễn Thị B");
	assert_eq!(
		courses[0].schedule,
		entries(&[
			(Day::Wednesday, "9:00AM- 9:50AM"),
			(Day::Friday, "9:00AM- 9:50AM"),
			(Day::Monday, "1:00PM- 1:50PM, 3:00PM- 3:50PM"),
		])
	);
	assert!(courses[1].schedule.is_empty());
	assert_eq!(
		courses[2].schedule,
		entries(&[
			(Day::Tuesday, "10:00AM- 11:15AM"),
			(Day::Thursday, "10:00AM- 11:15AM"),
		])
	);
}

#[test]
fn full_pipeline_normalizes_schedules() {
	let courses = coursesched_core::parse_from_str(FIXTURE, &Settings::default()).unwrap();

	assert_eq!(
		courses[0].schedule,
		entries(&[
			(Day::Wednesday, "9:00AM to 9:50AM"),
			(Day::Friday, "9:00AM to 9:50AM"),
			(Day::Monday, "1:00PM to 1:50PM"),
			(Day::Monday, "3:00PM to 3:50PM"),
		])
	);
	assert!(courses
		.iter()
		.flat_map(|c| &c.schedule)
		.all(|e| !e.time.contains("- ") && !e.time.contains(", ")));

	let conflicts = timeslot::find_conflicts(&courses);
	assert!(conflicts.values().all(Vec::is_empty));
	assert!((timeslot::total_credits(&courses) - 10.0).abs() < f64::EPSILON);

	let ics = calendar::create_calendar(&courses, &Settings::default().calendar)
		.unwrap()
		.to_string();
	assert_eq!(ics.matches("BEGIN:VEVENT").count(), 6);
}

#[test]
fn normalizing_a_file_twice_is_stable() {
	let settings = Settings::default();
	let dir = tempfile::tempdir().unwrap();
	let extracted = dir.path().join("courses.json");
	let once = dir.path().join("courses_modified.json");
	let twice = dir.path().join("courses_twice.json");

	let courses = extract::extract_courses(FIXTURE, &settings.extract).unwrap();
	io::write_json(&extracted, &courses).unwrap();

	assert_eq!(coursesched_core::normalize_file(&extracted, &once, &settings).unwrap(), 3);
	coursesched_core::normalize_file(&once, &twice, &settings).unwrap();

	let once = std::fs::read_to_string(once).unwrap();
	let twice = std::fs::read_to_string(twice).unwrap();
	assert_eq!(once, twice);
	assert!(once.contains("Nguyễn Thị B"));
	assert!(once.starts_with("[\n    {\n        \"Course\": \"MANA1011\""));

	let typed: Vec<CourseRecord> = serde_json::from_str(&once).unwrap();
	assert_eq!(typed[0].schedule.len(), 4);
}

#[test]
fn malformed_input_writes_nothing() {
	let dir = tempfile::tempdir().unwrap();
	let input = dir.path().join("courses.json");
	let output = dir.path().join("courses_modified.json");
	std::fs::write(&input, "[{\"Course\": \"A\", \"Schedule\": [").unwrap();

	assert!(coursesched_core::normalize_file(&input, &output, &Settings::default()).is_err());
	assert!(!output.exists());
}

#[test]
fn loose_and_typed_normalizers_agree() {
	let settings = Settings::default();
	let courses = extract::extract_courses(FIXTURE, &settings.extract).unwrap();
	let normalizer = Normalizer::new(settings.normalize.clone());

	let loose: Vec<LooseCourse> = serde_json::from_str(&io::to_json(&courses).unwrap()).unwrap();
	let loose = io::to_json(&normalizer.normalize_loose(loose)).unwrap();
	let typed = io::to_json(&normalizer.normalize_records(courses)).unwrap();

	assert_eq!(loose, typed);
}

#[test]
fn normalize_json_keeps_null_schedule() {
	let json = coursesched_core::normalize_json(
		r#"[{"Course":"A","Schedule":null},{"Course":"B","Schedule":[{"day":"Monday","time":"9:00AM- 9:50AM"}]}]"#,
		&Settings::default(),
	)
	.unwrap();

	let value: serde_json::Value = serde_json::from_str(&json).unwrap();
	assert_eq!(
		value,
		serde_json::json!([
			{ "Course": "A", "Schedule": null },
			{ "Course": "B", "Schedule": [{ "day": "Monday", "time": "9:00AM to 9:50AM" }] },
		])
	);
}

#[test]
fn invalid_day_codes_surface_as_error() {
	let mut settings = Settings::default();
	settings.extract.day_codes.clear();

	let result = coursesched_core::parse_from_str(FIXTURE, &settings);

	assert!(matches!(result, Err(coursesched_core::Error::Pattern(_))));
}
