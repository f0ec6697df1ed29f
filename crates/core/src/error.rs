use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to read {}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to read standard input")]
	Stdin(#[source] std::io::Error),
	#[error("failed to write {}", .path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("malformed course json")]
	Json(#[from] serde_json::Error),
	#[error("invalid configuration")]
	Config(#[from] config::ConfigError),
	#[error("invalid day code pattern")]
	Pattern(#[from] regex::Error),
	#[error("unknown timezone `{0}`")]
	Timezone(String),
}
