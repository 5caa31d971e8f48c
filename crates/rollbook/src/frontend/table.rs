//! Plain-text table rendering for record listings.

use std::fmt::Write;

use crate::student::{Student, StudentId};

const HEADERS: [&str; 5] = ["#", "STUDENT ID", "FULL NAME", "AGE", "DEPARTMENT"];

/// Render records as an aligned table.
///
/// Rows are numbered from 1 so the form view can select them. The row whose
/// ID equals `selected` is marked with `>`.
#[must_use]
pub fn render(rows: &[(StudentId, Student)], selected: Option<&StudentId>) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .enumerate()
        .map(|(index, (id, student))| {
            [
                (index + 1).to_string(),
                id.to_string(),
                student.name.clone(),
                student.age.to_string(),
                student.department.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, ' ', &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "  {}", rule.join("-+-"));

    for (row, (id, _)) in cells.iter().zip(rows) {
        let marker = if selected == Some(id) { '>' } else { ' ' };
        push_row(&mut out, marker, row, &widths);
    }

    if rows.is_empty() {
        let _ = writeln!(out, "  (no student records)");
    }
    out
}

fn push_row(out: &mut String, marker: char, row: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{marker} {}", padded.join(" | ").trim_end());
}
