use std::io::{Result, Write};

use serde_json::{Map, Value};

use crate::color::Theme;

/// A column of a [`CommandOutput::Table`].
#[derive(Clone, Copy, Debug)]
pub struct Column {
    /// Key of the column in JSON output.
    pub key: &'static str,
    pub title: &'static str,
    /// Minimum width the column is padded to. Ignored for the last column.
    pub width: usize,
    /// Spaces between this column and the next.
    pub gap: usize,
}

impl Column {
    pub const fn new(key: &'static str, title: &'static str, width: usize) -> Self {
        Self {
            key,
            title,
            width,
            gap: 1,
        }
    }

    pub const fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }
}

#[derive(Clone, Debug)]
pub enum CommandOutput {
    Message(String),
    Result {
        fields: Vec<(&'static str, String)>,
        tty_template: String,
        non_tty_template: String,
    },
    Table {
        columns: Vec<Column>,
        rows: Vec<Vec<String>>,
    },
    Document(Value),
}

impl CommandOutput {
    pub fn message(message: &str) -> Self {
        Self::Message(message.into())
    }

    pub fn result() -> Self {
        Self::Result {
            fields: vec![],
            tty_template: String::default(),
            non_tty_template: String::default(),
        }
    }

    pub fn table(columns: Vec<Column>) -> Self {
        Self::Table {
            columns,
            rows: vec![],
        }
    }

    /// A JSON document. Object keys are sorted at every level.
    pub fn document(value: Value) -> Self {
        Self::Document(sort_keys(value))
    }

    pub fn with_field(mut self, key: &'static str, value: String) -> Self {
        if let Self::Result { fields, .. } = &mut self {
            fields.push((key, value));
        }
        self
    }

    pub fn with_tty_template(mut self, template: &'static str) -> Self {
        if let Self::Result { tty_template, .. } = &mut self {
            *tty_template = template.into();
        }
        self
    }

    pub fn with_non_tty_template(mut self, template: &'static str) -> Self {
        if let Self::Result {
            non_tty_template, ..
        } = &mut self
        {
            *non_tty_template = template.into();
        }
        self
    }

    pub fn with_row(mut self, row: Vec<String>) -> Self {
        if let Self::Table { rows, .. } = &mut self {
            rows.push(row);
        }
        self
    }

    fn to_json_value(&self) -> Value {
        match &self {
            Self::Message(message) => {
                let mut obj = Map::new();
                obj.insert("message".to_string(), Value::from(message.as_str()));
                Value::Object(obj)
            }
            Self::Result { fields, .. } => Value::Object(
                fields
                    .iter()
                    .map(|(key, field)| ((*key).to_string(), Value::from(field.as_str())))
                    .collect(),
            ),
            Self::Table { columns, rows } => Value::Array(
                rows.iter()
                    .map(|row| {
                        Value::Object(
                            columns
                                .iter()
                                .zip(row)
                                .map(|(column, cell)| {
                                    (column.key.to_string(), Value::from(cell.as_str()))
                                })
                                .collect(),
                        )
                    })
                    .collect(),
            ),
            Self::Document(value) => value.clone(),
        }
    }

    fn to_json(&self, is_tty: bool) -> Result<String> {
        let value = self.to_json_value();

        let s = if is_tty {
            let mut buffer = Vec::new();

            colored_json::write_colored_json(&value, &mut buffer)?;

            String::from_utf8_lossy(&buffer).to_string()
        } else {
            serde_json::to_string_pretty(&value)?
        };

        Ok(s)
    }

    fn safe_write_line(output_stream: &mut dyn Write, line: &str) -> Result<()> {
        match writeln!(output_stream, "{line}") {
            Ok(()) => Ok(()),
            Err(e) => {
                if e.kind() == std::io::ErrorKind::BrokenPipe {
                    Ok(())
                } else {
                    Err(e)
                }
            }
        }
    }

    pub fn write_json(&self, output_stream: &mut dyn Write, is_tty: bool) -> Result<()> {
        let out = self.to_json(is_tty)?;

        Self::safe_write_line(output_stream, &out)
    }

    pub fn write(
        &self,
        output_stream: &mut dyn Write,
        theme: Option<&Theme>,
        is_tty: bool,
    ) -> Result<()> {
        match &self {
            Self::Message(message) => {
                let styled_msg = if let Some(t) = theme {
                    t.info_msg(message).to_string()
                } else {
                    message.to_string()
                };
                Self::safe_write_line(output_stream, &styled_msg)
            }
            Self::Result {
                fields,
                tty_template,
                non_tty_template,
            } => {
                let mut output = if is_tty {
                    tty_template.clone()
                } else {
                    non_tty_template.clone()
                };

                for (key, value) in fields {
                    let placeholder = format!("{{{key}}}");
                    let formatted_value = if let Some(t) = theme {
                        t.field(value).to_string()
                    } else {
                        value.clone()
                    };
                    output = output.replace(&placeholder, &formatted_value);
                }

                let final_line = if let Some(t) = theme {
                    t.result_msg(&output).to_string()
                } else {
                    output
                };
                Self::safe_write_line(output_stream, &final_line)
            }
            Self::Table { columns, rows } => {
                let titles: Vec<String> = columns.iter().map(|c| c.title.to_string()).collect();
                let header = format_row(columns, &titles);
                let header = if let Some(t) = theme {
                    t.header(&header).to_string()
                } else {
                    header
                };
                Self::safe_write_line(output_stream, &header)?;

                for row in rows {
                    Self::safe_write_line(output_stream, &format_row(columns, row))?;
                }

                Ok(())
            }
            Self::Document(value) => {
                Self::safe_write_line(output_stream, &to_indented_json(value)?)
            }
        }
    }
}

fn format_row(columns: &[Column], cells: &[String]) -> String {
    let mut line = String::new();
    let last = columns.len().saturating_sub(1);

    for (i, (column, cell)) in columns.iter().zip(cells).enumerate() {
        if i == last {
            line.push_str(cell);
        } else {
            line.push_str(&format!("{cell:<width$}", width = column.width));
            line.push_str(&" ".repeat(column.gap));
        }
    }

    line
}

/// Pretty-prints JSON with four-space indentation.
fn to_indented_json(value: &Value) -> Result<String> {
    use serde::Serialize as _;

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buffer).to_string())
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut entries: Vec<_> = obj.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        value => value,
    }
}
