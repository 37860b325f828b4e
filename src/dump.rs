use std::fmt::Debug;

/// Renders a value as nested, indented source-like text.
///
/// Uses the alternate `Debug` form, which keeps struct names, field
/// names, map keys and quoted strings, so the shape and element types of
/// composite values survive in the log line.
pub fn dump(value: &dyn Debug) -> String {
    format!("{value:#?}")
}
