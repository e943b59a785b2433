//! Raw dependency records as served by the assessment data store.

use serde::Deserialize;
use serde_json::Value;

use super::error::DataShapeError;

/// One tracked entity together with the names it depends on.
#[derive(Clone, Debug, Deserialize)]
pub struct DependencyRecord {
	/// Unique entity name. Doubles as the node identifier in the graph.
	pub name: String,
	/// Names of the entities this record depends on.
	pub dependencies: Vec<String>,
}

impl DependencyRecord {
	/// Validate one loosely typed JSON value against the record shape.
	///
	/// JSON syntax problems are caught earlier, at fetch time; this is the
	/// stricter per-record check that turns a well-formed but wrongly shaped
	/// value into a [`DataShapeError`]. `index` is the record's position in
	/// the fetched array, reported back in the error.
	pub fn from_value(index: usize, value: &Value) -> Result<Self, DataShapeError> {
		let record = value
			.as_object()
			.ok_or_else(|| DataShapeError::new(index, "record is not an object"))?;
		let name = record
			.get("name")
			.and_then(Value::as_str)
			.ok_or_else(|| DataShapeError::new(index, "missing or non-string `name`"))?;
		let entries = record
			.get("dependencies")
			.and_then(Value::as_array)
			.ok_or_else(|| DataShapeError::new(index, "missing or non-array `dependencies`"))?;

		let mut dependencies = Vec::with_capacity(entries.len());
		for entry in entries {
			let dep = entry.as_str().ok_or_else(|| {
				DataShapeError::new(index, "non-string entry in `dependencies`")
			})?;
			dependencies.push(dep.to_string());
		}

		Ok(Self {
			name: name.to_string(),
			dependencies,
		})
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn accepts_well_formed_record() {
		let value = json!({"name": "A", "dependencies": ["B", "C"]});
		let record = DependencyRecord::from_value(0, &value).unwrap();
		assert_eq!(record.name, "A");
		assert_eq!(record.dependencies, vec!["B", "C"]);
	}

	#[test]
	fn rejects_missing_dependencies() {
		let value = json!({"name": "A"});
		let err = DependencyRecord::from_value(3, &value).unwrap_err();
		assert_eq!(err.index, 3);
		assert!(err.to_string().contains("dependencies"));
	}

	#[test]
	fn rejects_non_array_dependencies() {
		let value = json!({"name": "A", "dependencies": "B"});
		assert!(DependencyRecord::from_value(0, &value).is_err());
	}

	#[test]
	fn rejects_non_string_dependency_entry() {
		let value = json!({"name": "A", "dependencies": ["B", 7]});
		assert!(DependencyRecord::from_value(0, &value).is_err());
	}

	#[test]
	fn rejects_non_object_record() {
		assert!(DependencyRecord::from_value(0, &json!("A")).is_err());
	}
}
