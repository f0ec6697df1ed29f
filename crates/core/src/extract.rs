use regex::Regex;
use select::{
	document::Document,
	node::Node,
	predicate::{Attr, Name, Predicate},
};

use crate::{
	course::{CourseRecord, Day, ScheduleEntry},
	settings::ExtractConfig,
	Result,
};

/// One `;`/newline separated piece of a schedule cell, e.g. "WF 9:00AM-9:50AM".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBlock {
	pub days: Vec<Day>,
	pub time: String,
}

impl ScheduleBlock {
	fn into_entries(self) -> impl Iterator<Item = ScheduleEntry> {
		let time = self.time;

		self.days
			.into_iter()
			.map(move |day| ScheduleEntry::new(day, time.clone()))
	}
}

pub struct Extractor {
	config: ExtractConfig,
	block: Regex,
}

/// Text of every descendant text node, each trimmed, empty ones dropped and
/// the rest joined without a separator.
fn stripped_text(node: Node) -> String {
	node.descendants()
		.filter_map(|n| n.as_text())
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.collect()
}

impl Extractor {
	pub fn new(config: ExtractConfig) -> Result<Self> {
		let codes = config
			.day_codes
			.iter()
			.map(|d| regex::escape(&d.code.to_string()))
			.collect::<String>();
		let block = Regex::new(&format!(r"^([{codes}]+)\s+(.*)$"))?;

		Ok(Self { config, block })
	}

	/// Reads every data row of the configured table. A document without the
	/// table yields no records.
	#[must_use]
	pub fn extract(&self, html: &str) -> Vec<CourseRecord> {
		let document = Document::from(html);
		let table_id = self.config.table_id.as_str();

		let Some(table) = document
			.find(Name("table").and(Attr("id", table_id)))
			.next()
		else {
			tracing::info!(table_id, "course table not found");
			return Vec::new();
		};

		let headers = table
			.find(Name("thead").descendant(Name("th")))
			.map(stripped_text)
			.collect::<Vec<_>>();

		tracing::debug!(?headers, "course table header");

		let rows = match table.find(Name("tbody")).next() {
			Some(body) => body.find(Name("tr")).collect::<Vec<_>>(),
			None => table.find(Name("tr")).collect(),
		};

		let width = self.config.columns.width();
		let mut courses = Vec::new();

		for (index, row) in rows.into_iter().enumerate() {
			let cells = row.find(Name("td")).collect::<Vec<_>>();

			if cells.is_empty() {
				continue;
			}

			if cells.len() < width {
				tracing::warn!(
					row = index,
					cells = cells.len(),
					expected = width,
					"skipping short row"
				);
				continue;
			}

			courses.push(self.parse_row(&cells));
		}

		tracing::info!(courses = courses.len(), "extracted course table");

		courses
	}

	/// Maps a full-width row to a record. `cells` must hold at least
	/// `Columns::width` entries.
	fn parse_row(&self, cells: &[Node]) -> CourseRecord {
		let columns = &self.config.columns;
		let text = |index: usize| stripped_text(cells[index]);

		CourseRecord {
			course: text(columns.course),
			title: text(columns.title),
			section: text(columns.section),
			dates: text(columns.dates),
			credits: text(columns.credits),
			instructor: text(columns.instructor),
			delivery_method: text(columns.delivery_method),
			schedule: self.parse_schedule(&self.schedule_text(cells[columns.schedule])),
		}
	}

	/// The detail element's full-text attribute when present, since its
	/// visible text may be abbreviated.
	fn schedule_text(&self, cell: Node) -> String {
		let detail = &self.config.detail;

		match cell
			.find(Name(detail.name.as_str()).and(Attr("id", detail.id.as_str())))
			.next()
		{
			Some(node) => node
				.attr(detail.attr.as_str())
				.map_or_else(|| stripped_text(node), String::from),
			None => stripped_text(cell),
		}
	}

	#[must_use]
	pub fn parse_schedule(&self, raw: &str) -> Vec<ScheduleEntry> {
		let raw = raw.trim();

		if raw.is_empty() || raw == self.config.no_meetings {
			return Vec::new();
		}

		raw.split(|c: char| c == ';' || c == '\n')
			.map(str::trim)
			.filter(|part| !part.is_empty())
			.filter_map(|part| self.parse_block(part))
			.flat_map(ScheduleBlock::into_entries)
			.collect()
	}

	/// Splits a block into its leading day-code run and time text. Blocks
	/// without a day-code run ("TBA", "ARR") give `None`.
	#[must_use]
	pub fn parse_block(&self, block: &str) -> Option<ScheduleBlock> {
		let Some(caps) = self.block.captures(block) else {
			tracing::debug!(block, "dropping schedule block without day codes");
			return None;
		};

		let days = caps[1]
			.chars()
			.filter_map(|code| self.config.day(code))
			.collect();

		Some(ScheduleBlock {
			days,
			time: caps[2].trim().to_string(),
		})
	}
}

/// Builds an extractor for `config` and runs it over `html`.
pub fn extract_courses(html: &str, config: &ExtractConfig) -> Result<Vec<CourseRecord>> {
	Ok(Extractor::new(config.clone())?.extract(html))
}
