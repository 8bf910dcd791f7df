//! Desired-payload parser: two accepted JSON shapes, one canonical output.
//!
//! Shapes:
//! - Flat: `{ "rows": [ { projectName|project, taskName|task,
//!   hourTypeName|hourType, hours: [..] } ] }`, or a bare array of the same
//!   row objects. Hours arrays are taken positionally.
//! - Nested: `{ "days": [ { projects: [ { projectName, tasks: [ { taskName,
//!   hourTypes: [ { hourTypeName, hours } ] } ] } ] } ] }`, index-aligned to
//!   weekdays.
//!
//! Parsing is deliberately tolerant at the leaf level (string-typed numbers
//! coerce, missing fields default to blank) and strict at the shape level:
//! anything that is neither shape is [`PayloadError::Invalid`]. Entries
//! missing a project, task, or hour-type after trimming are silently
//! dropped. Duplicate combos merge by elementwise summation, first-seen
//! order preserved.

use std::collections::HashMap;

use serde_json::Value;

use crate::{ComboKey, DesiredItem, PayloadError, DAY_SLOTS, SOURCE_DAY_SLOTS};

/// Parse and normalize a raw desired payload.
pub fn parse_desired_items(raw: &str) -> Result<Vec<DesiredItem>, PayloadError> {
    let doc: Value =
        serde_json::from_str(raw).map_err(|err| PayloadError::Invalid(err.to_string()))?;

    let items = match &doc {
        Value::Array(rows) => flatten_row_entries(rows),
        Value::Object(obj) => match (obj.get("rows"), obj.get("days")) {
            (Some(Value::Array(rows)), _) => flatten_row_entries(rows),
            (_, Some(Value::Array(days))) => flatten_day_tree(days),
            _ => {
                return Err(PayloadError::Invalid(
                    "expected a rows[] list or a days[] tree".to_string(),
                ))
            }
        },
        _ => {
            return Err(PayloadError::Invalid(
                "expected a JSON object or array".to_string(),
            ))
        }
    };

    if items.is_empty() {
        return Err(PayloadError::Empty);
    }
    Ok(items)
}

// ---------------------------------------------------------------------------
// Accumulation
// ---------------------------------------------------------------------------

/// Merge accumulator: 7 internal day slots, truncated to the canonical 5 on
/// output. First-seen order of keys is preserved.
struct Accumulator {
    order: Vec<PartialItem>,
    index_by_key: HashMap<ComboKey, usize>,
}

struct PartialItem {
    key: ComboKey,
    project_name: String,
    task_name: String,
    hour_type_name: String,
    hours: [f64; SOURCE_DAY_SLOTS],
}

impl Accumulator {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            index_by_key: HashMap::new(),
        }
    }

    fn slot(&mut self, project_name: &str, task_name: &str, hour_type_name: &str) -> &mut PartialItem {
        let key = ComboKey::new(project_name, task_name, hour_type_name);
        let index = match self.index_by_key.get(&key) {
            Some(&index) => index,
            None => {
                let index = self.order.len();
                self.order.push(PartialItem {
                    key: key.clone(),
                    project_name: project_name.to_string(),
                    task_name: task_name.to_string(),
                    hour_type_name: hour_type_name.to_string(),
                    hours: [0.0; SOURCE_DAY_SLOTS],
                });
                self.index_by_key.insert(key, index);
                index
            }
        };
        &mut self.order[index]
    }

    fn finish(self) -> Vec<DesiredItem> {
        self.order
            .into_iter()
            .map(|partial| {
                let mut hours = [0.0; DAY_SLOTS];
                hours.copy_from_slice(&partial.hours[..DAY_SLOTS]);
                DesiredItem {
                    key: partial.key,
                    project_name: partial.project_name,
                    task_name: partial.task_name,
                    hour_type_name: partial.hour_type_name,
                    hours,
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Shape (a): flat row list
// ---------------------------------------------------------------------------

fn flatten_row_entries(rows: &[Value]) -> Vec<DesiredItem> {
    let mut acc = Accumulator::new();

    for entry in rows {
        let project_name = text_field(entry, &["projectName", "project"]);
        let task_name = text_field(entry, &["taskName", "task"]);
        let hour_type_name = text_field(entry, &["hourTypeName", "hourType"]);
        if project_name.is_empty() || task_name.is_empty() || hour_type_name.is_empty() {
            continue;
        }

        let hours = hour_array(entry.get("hours"));
        let item = acc.slot(&project_name, &task_name, &hour_type_name);
        for (day_index, hour) in hours.iter().enumerate() {
            item.hours[day_index] += hour;
        }
    }

    acc.finish()
}

// ---------------------------------------------------------------------------
// Shape (b): nested day tree
// ---------------------------------------------------------------------------

fn flatten_day_tree(days: &[Value]) -> Vec<DesiredItem> {
    let mut acc = Accumulator::new();

    for (day_index, day_node) in days.iter().enumerate().take(SOURCE_DAY_SLOTS) {
        let Some(projects) = day_node.get("projects").and_then(Value::as_array) else {
            continue;
        };
        for project_node in projects {
            let Some(tasks) = project_node.get("tasks").and_then(Value::as_array) else {
                continue;
            };
            let project_name = text_field(project_node, &["projectName"]);
            for task_node in tasks {
                let Some(hour_types) = task_node.get("hourTypes").and_then(Value::as_array) else {
                    continue;
                };
                let task_name = text_field(task_node, &["taskName"]);
                for hour_type_node in hour_types {
                    let hour_type_name = text_field(hour_type_node, &["hourTypeName"]);
                    if project_name.is_empty() || task_name.is_empty() || hour_type_name.is_empty()
                    {
                        continue;
                    }

                    let item = acc.slot(&project_name, &task_name, &hour_type_name);
                    item.hours[day_index] += hour_value(hour_type_node.get("hours"));
                }
            }
        }
    }

    acc.finish()
}

// ---------------------------------------------------------------------------
// Leaf coercion
// ---------------------------------------------------------------------------

/// First present alias wins; strings trim, numbers render, everything else
/// is blank.
fn text_field(entry: &Value, aliases: &[&str]) -> String {
    for name in aliases {
        match entry.get(*name) {
            Some(Value::String(s)) => return s.trim().to_string(),
            Some(Value::Number(n)) => return n.to_string(),
            Some(_) | None => continue,
        }
    }
    String::new()
}

/// Coerce one hours leaf: numbers pass, numeric strings parse, everything
/// else (and non-finite values) is zero.
fn hour_value(value: Option<&Value>) -> f64 {
    let numeric = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if numeric.is_finite() {
        numeric
    } else {
        0.0
    }
}

/// Positional hours array, zero-padded/truncated to the 7 source slots.
fn hour_array(value: Option<&Value>) -> [f64; SOURCE_DAY_SLOTS] {
    let mut hours = [0.0; SOURCE_DAY_SLOTS];
    if let Some(Value::Array(values)) = value {
        for (day_index, slot) in hours.iter_mut().enumerate() {
            *slot = hour_value(values.get(day_index));
        }
    }
    hours
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
