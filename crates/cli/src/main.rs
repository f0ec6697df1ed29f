#![warn(clippy::pedantic)]

use std::{
	io::Write,
	path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use coursesched_core::{calendar, extract, io, timeslot, CourseRecord, Normalizer, Settings};

#[derive(Parser)]
#[command(name = "coursesched", about = "Extract and normalize course schedule tables")]
struct Args {
	/// TOML file overriding the default settings
	#[clap(long, global = true, value_hint = clap::ValueHint::FilePath)]
	config: Option<PathBuf>,
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Read the course table out of an HTML page
	Extract {
		/// HTML page (default: standard input)
		#[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
		path: Option<PathBuf>,
		/// Use `-` for standard output
		#[clap(short, long, default_value = "courses.json", value_hint = clap::ValueHint::FilePath)]
		output: PathBuf,
	},
	/// Rewrite schedule times of an extracted course file
	Normalize {
		#[clap(value_name = "FILE", default_value = "courses.json", value_hint = clap::ValueHint::FilePath)]
		input: PathBuf,
		#[clap(short, long, default_value = "courses_modified.json", value_hint = clap::ValueHint::FilePath)]
		output: PathBuf,
	},
	/// Extract and normalize in one pass
	Run {
		/// HTML page (default: standard input)
		#[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
		path: Option<PathBuf>,
		#[clap(short, long, default_value = "courses_modified.json", value_hint = clap::ValueHint::FilePath)]
		output: PathBuf,
	},
	/// Export a course file as an iCalendar document
	Ics {
		#[clap(value_name = "FILE", default_value = "courses_modified.json", value_hint = clap::ValueHint::FilePath)]
		input: PathBuf,
		/// Default: standard output
		#[clap(short, long, value_hint = clap::ValueHint::FilePath)]
		output: Option<PathBuf>,
		/// Export even when sections overlap
		#[clap(long)]
		force: bool,
	},
	/// List overlapping sections and the credit total
	Conflicts {
		#[clap(value_name = "FILE", default_value = "courses_modified.json", value_hint = clap::ValueHint::FilePath)]
		input: PathBuf,
	},
}

fn write_output(path: &Path, json: &str) -> anyhow::Result<()> {
	if path == Path::new("-") {
		writeln!(std::io::stdout(), "{json}")?;
	} else {
		std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
	}

	Ok(())
}

fn read_courses(settings: &Settings, path: Option<&Path>) -> anyhow::Result<Vec<CourseRecord>> {
	let html = io::read_source(path).context("failed to read html")?;

	Ok(extract::extract_courses(&html, &settings.extract)?)
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info".into()),
		)
		.init();

	let args = Args::parse();
	let settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;

	match args.command {
		Command::Extract { path, output } => {
			let courses = read_courses(&settings, path.as_deref())?;

			write_output(&output, &io::to_json(&courses)?)?;
		}
		Command::Normalize { input, output } => {
			let count = coursesched_core::normalize_file(&input, &output, &settings)
				.with_context(|| format!("failed to normalize {}", input.display()))?;

			tracing::info!(courses = count, "normalized course file");
			println!("Modified data written to {}", output.display());
		}
		Command::Run { path, output } => {
			let courses = read_courses(&settings, path.as_deref())?;
			let courses = Normalizer::new(settings.normalize.clone()).normalize_records(courses);

			write_output(&output, &io::to_json(&courses)?)?;

			if output != Path::new("-") {
				println!("Modified data written to {}", output.display());
			}
		}
		Command::Ics {
			input,
			output,
			force,
		} => {
			let courses: Vec<CourseRecord> = io::read_json(&input)?;
			let conflicts = timeslot::find_conflicts(&courses);

			if !force && conflicts.values().any(|c| !c.is_empty()) {
				bail!("selected sections overlap, run `coursesched conflicts` or pass --force");
			}

			let calendar = calendar::create_calendar(&courses, &settings.calendar)?;

			if let Some(output) = output {
				std::fs::write(&output, calendar.to_string())
					.with_context(|| format!("failed to write {}", output.display()))?;
			} else {
				write!(&mut std::io::stdout(), "{calendar}")?;
			}
		}
		Command::Conflicts { input } => {
			let courses: Vec<CourseRecord> = io::read_json(&input)?;
			let conflicts = timeslot::find_conflicts(&courses);
			let mut clashes = 0;

			for (section, with) in conflicts.iter().filter(|(_, with)| !with.is_empty()) {
				println!("{section}: {}", with.join(", "));
				clashes += 1;
			}

			if clashes == 0 {
				println!("No conflicts.");
			}

			println!(
				"{} sections, {} credits",
				courses.len(),
				timeslot::total_credits(&courses)
			);
		}
	}

	Ok(())
}
