use std::{
	fs,
	io::{self, Read},
	path::Path,
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{Error, Result};

/// Reads a whole document from `path`, or from standard input when no path
/// is given.
pub fn read_source<P: AsRef<Path>>(path: Option<P>) -> Result<String> {
	if let Some(path) = path {
		let path = path.as_ref();

		return fs::read_to_string(path).map_err(|source| Error::Read {
			path: path.to_path_buf(),
			source,
		});
	}

	let mut buf = String::new();
	io::stdin().read_to_string(&mut buf).map_err(Error::Stdin)?;

	Ok(buf)
}

pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
	let text = read_source(Some(path))?;

	Ok(serde_json::from_str(&text)?)
}

/// Pretty JSON with four-space indentation. Non-ASCII text is written as is.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
	let mut buf = Vec::new();
	let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));

	value.serialize(&mut serializer)?;

	// serde_json only ever emits valid utf-8
	Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Renders `value` in full before touching `path`, so a failure never leaves
/// a truncated file behind.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
	let path = path.as_ref();
	let json = to_json(value)?;

	fs::write(path, json).map_err(|source| Error::Write {
		path: path.to_path_buf(),
		source,
	})
}
