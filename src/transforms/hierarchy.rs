use crate::charts::Figure;
use crate::error::DashError;
use crate::models::Table;
use crate::schema::{CATEGORY, LEVEL, SENTINEL, SUBCATEGORY};

/// Indented plain-text outline of the solution hierarchy.
///
/// A category sits at `2 * (level - 1)` spaces, its subcategory one step
/// deeper. The `-` sentinel suppresses a field; row order is kept.
pub fn solution_outline(table: &Table) -> Result<Figure, DashError> {
    let level_idx = table.column_index(LEVEL)?;
    let cat_idx = table.column_index(CATEGORY)?;
    let sub_idx = table.column_index(SUBCATEGORY)?;

    let mut lines: Vec<String> = Vec::new();
    for (i, r) in table.rows().enumerate() {
        let level = r[level_idx]
            .as_i32()
            .filter(|l| *l >= 1)
            .ok_or_else(|| {
                DashError::schema(
                    table.name(),
                    format!("row {}: `{LEVEL}` must be a positive integer", i + 1),
                )
            })?;
        let indent = "  ".repeat((level - 1) as usize);
        if let Some(category) = present(r[cat_idx].label()) {
            lines.push(format!("{indent}{category}"));
        }
        if let Some(subcategory) = present(r[sub_idx].label()) {
            lines.push(format!("{indent}  {subcategory}"));
        }
    }
    Ok(Figure::Outline {
        text: lines.join("\n"),
    })
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|f| f != SENTINEL)
}
