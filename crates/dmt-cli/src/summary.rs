use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dmt_cli::types::{BuildRequest, PartRequest, RunResult};
use dmt_model::{CategoryOptions, FileRole, ImportType, PartDetails};

/// Prints the answers of a build run for confirmation.
pub fn print_build_plan(request: &BuildRequest) {
    let mut table = plan_table();
    table.add_row(vec![field_cell("Operation"), Cell::new(request.operation)]);
    let files: Vec<String> = request
        .inputs
        .iter()
        .map(|input| format!("{} ({})", input.path.display(), role_label(input.role)))
        .collect();
    table.add_row(vec![field_cell("File(s)"), Cell::new(files.join("\n"))]);
    table.add_row(vec![
        field_cell("Type"),
        Cell::new(request.params.import_type),
    ]);
    let include: Vec<&str> = request.include.iter().map(|t| t.file_suffix()).collect();
    table.add_row(vec![
        field_cell("Include Tables"),
        Cell::new(include.join(", ")),
    ]);
    if let Some(sort) = &request.params.sort {
        let ranks = if sort.is_empty() {
            "automatic".to_string()
        } else {
            sort.iter()
                .map(|(value, rank)| format!("{value}={rank}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![field_cell("UD09 Sort"), Cell::new(ranks)]);
    }
    if request.params.import_type == ImportType::Variant {
        let part = request.params.part.as_ref();
        table.add_row(vec![field_cell("Create Part?"), yes_no(part.is_some())]);
        if let Some(part) = part {
            table.add_row(vec![field_cell("Variant Parent"), Cell::new(&part.parent_part)]);
            table.add_row(vec![field_cell("Part Website"), Cell::new(&part.website)]);
            add_new_part_rows(&mut table, part.new_part.as_ref());
        }
        add_category_rows(&mut table, request.params.categories.as_ref());
    }
    print_plan(&table);
}

/// Prints the answers of a single-part run for confirmation.
pub fn print_part_plan(request: &PartRequest) {
    let mut table = plan_table();
    table.add_row(vec![field_cell("Mode"), Cell::new("New Part")]);
    table.add_row(vec![field_cell("Part ID"), Cell::new(&request.part_id)]);
    table.add_row(vec![field_cell("Company"), Cell::new(&request.company)]);
    add_new_part_rows(&mut table, request.details.as_ref());
    table.add_row(vec![field_cell("Website"), Cell::new(&request.website)]);
    add_category_rows(&mut table, request.categories.as_ref());
    table.add_row(vec![
        field_cell("Output"),
        Cell::new(request.output_dir.display()),
    ]);
    print_plan(&table);
}

/// Prints written files, the playlist and placeholder reminders.
pub fn print_result(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Role"),
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for file in &result.files {
        for written in &file.written {
            table.add_row(vec![
                Cell::new(&file.stem)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                role_cell(file.role),
                Cell::new(written.table),
                Cell::new(written.rows),
                dim_cell(written.path.display()),
            ]);
        }
    }
    println!("{table}");
    for file in &result.files {
        println!("Output: {}", file.output_dir.display());
    }
    println!(
        "Playlist: {} ({} entries)",
        result.playlist.display(),
        result.playlist_entries
    );

    let placeholders = result.copy_needed();
    if !placeholders.is_empty() {
        eprintln!();
        eprintln!("WARNING: replace every 'COPY NEEDED' value before importing:");
        for written in placeholders {
            eprintln!("- {}", written.path.display());
        }
    }
    if result.has_part() {
        eprintln!(
            "WARNING: review Part fields (PartDescription, ClassID, ProdCode) before importing."
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn plan_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    table
}

fn print_plan(table: &Table) {
    println!("Please confirm:");
    println!("{table}");
}

fn add_new_part_rows(table: &mut Table, details: Option<&PartDetails>) {
    table.add_row(vec![field_cell("New part?"), yes_no(details.is_some())]);
    if let Some(details) = details {
        table.add_row(vec![
            field_cell("PartDescription"),
            or_none(&details.part_description),
        ]);
        table.add_row(vec![field_cell("ProdCode"), or_none(&details.prod_code)]);
        table.add_row(vec![field_cell("ClassID"), Cell::new(&details.class_id)]);
    }
}

fn add_category_rows(table: &mut Table, categories: Option<&CategoryOptions>) {
    table.add_row(vec![field_cell("Category?"), yes_no(categories.is_some())]);
    let Some(categories) = categories else {
        return;
    };
    let kind = if categories.create_definitions {
        "New (UD08 + UD11)"
    } else {
        "Existing (UD11 only)"
    };
    table.add_row(vec![field_cell("Category Type"), Cell::new(kind)]);
    table.add_row(vec![
        field_cell("Category Website"),
        Cell::new(&categories.website),
    ]);
    let listed = match categories.categories.as_slice() {
        [] => "(none)".to_string(),
        [single] => single.clone(),
        many => format!("{} categories", many.len()),
    };
    table.add_row(vec![field_cell("Categories"), Cell::new(listed)]);
    table.add_row(vec![
        field_cell("Category Parent"),
        Cell::new(&categories.parent_part),
    ]);
}

fn role_label(role: FileRole) -> &'static str {
    match role {
        FileRole::Add => "add",
        FileRole::Delete => "delete",
    }
}

fn role_cell(role: FileRole) -> Cell {
    match role {
        FileRole::Add => Cell::new("ADD").fg(Color::Green),
        FileRole::Delete => Cell::new("DEL").fg(Color::Red),
    }
}

fn yes_no(value: bool) -> Cell {
    if value {
        Cell::new("Yes").fg(Color::Green)
    } else {
        dim_cell("No")
    }
}

fn or_none(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("(none)")
    } else {
        Cell::new(value)
    }
}

fn field_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
