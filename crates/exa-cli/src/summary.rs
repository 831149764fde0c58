use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use exa_model::{
    ChartConfigurationResult, ColumnProfile, IssueSeverity, PreprocessingResult, Suitability,
};

pub fn print_profile(profiles: &[ColumnProfile]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Role"),
        header_cell("Quality"),
        header_cell("Complete"),
        header_cell("Unique"),
        header_cell("Mode"),
    ]);
    apply_table_style(&mut table);
    for index in 3..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for profile in profiles {
        table.add_row(vec![
            Cell::new(&profile.name).add_attribute(Attribute::Bold),
            Cell::new(profile.column_type),
            Cell::new(profile.role),
            ratio_cell(profile.quality),
            Cell::new(percent(profile.completeness)),
            Cell::new(profile.unique_count),
            profile
                .mode
                .as_ref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

pub fn print_preprocess(result: &PreprocessingResult) {
    println!(
        "Rows: {} -> {}",
        result.original_count, result.processed_count
    );

    let mut stats = Table::new();
    stats.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_table_style(&mut stats);
    align_column(&mut stats, 1, CellAlignment::Right);
    for (label, count) in [
        ("Rows processed", result.stats.rows_processed),
        ("Missing values filled", result.stats.missing_values_handled),
        ("Duplicates removed", result.stats.duplicates_removed),
        ("Values normalized", result.stats.data_types_normalized),
        ("Outliers treated", result.stats.outliers_treated),
    ] {
        stats.add_row(vec![Cell::new(label), count_cell(count)]);
    }
    println!("{stats}");

    let mut quality = Table::new();
    quality.set_header(vec![
        header_cell("Score"),
        header_cell("Completeness"),
        header_cell("Consistency"),
    ]);
    apply_table_style(&mut quality);
    quality.add_row(vec![
        Cell::new(format!("{:.2}", result.quality.score)).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}%", result.quality.completeness)),
        Cell::new(format!("{:.2}%", result.quality.consistency)),
    ]);
    println!("{quality}");

    if result.validation.issues.is_empty() {
        return;
    }
    let mut issues = Table::new();
    issues.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut issues);
    align_column(&mut issues, 3, CellAlignment::Right);
    for issue in &result.validation.issues {
        issues.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            issue.column.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
            issue.count.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{issues}");
}

pub fn print_chart(result: &ChartConfigurationResult) {
    println!(
        "Rows: {}  Columns: {}  Quality: {}  Confidence: {}",
        result.metadata.data_size,
        result.metadata.column_count,
        percent(result.metadata.data_quality_score),
        percent(result.metadata.confidence_score)
    );

    let mut recommendations = Table::new();
    recommendations.set_header(vec![
        header_cell("Rank"),
        header_cell("Chart"),
        header_cell("Weight"),
        header_cell("Confidence"),
        header_cell("Suitability"),
    ]);
    apply_table_style(&mut recommendations);
    align_column(&mut recommendations, 0, CellAlignment::Right);
    align_column(&mut recommendations, 2, CellAlignment::Right);
    align_column(&mut recommendations, 3, CellAlignment::Right);
    for rec in &result.recommendations {
        recommendations.add_row(vec![
            Cell::new(rec.rank),
            Cell::new(&rec.title).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", rec.weight)),
            Cell::new(format!("{:.2}", rec.confidence)),
            suitability_cell(rec.suitability),
        ]);
    }
    println!("{recommendations}");

    if result.configurations.is_empty() {
        println!("No chart could be configured for these columns.");
        return;
    }
    let mut configurations = Table::new();
    configurations.set_header(vec![
        header_cell("Chart"),
        header_cell("Title"),
        header_cell("X"),
        header_cell("Y"),
        header_cell("Group"),
        header_cell("Details"),
    ]);
    apply_table_style(&mut configurations);
    for config in &result.configurations {
        let details = if let Some(bins) = config.bins {
            format!("{bins} bins")
        } else if config.dimensions.is_empty() {
            "-".to_string()
        } else {
            config.dimensions.join(", ")
        };
        configurations.add_row(vec![
            Cell::new(config.chart_type.as_str()).fg(Color::Blue),
            Cell::new(&config.title),
            optional_cell(config.x_axis.as_deref()),
            optional_cell(config.y_axis.as_deref()),
            optional_cell(config.group_by.as_deref()),
            Cell::new(details),
        ]);
    }
    println!();
    println!("Configurations:");
    println!("{configurations}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn ratio_cell(ratio: f64) -> Cell {
    let color = if ratio >= 0.8 {
        Color::Green
    } else if ratio >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{ratio:.2}")).fg(color)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn suitability_cell(suitability: Suitability) -> Cell {
    match suitability {
        Suitability::Excellent => Cell::new("excellent")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Suitability::Good => Cell::new("good").fg(Color::Green),
        Suitability::Fair => Cell::new("fair").fg(Color::Yellow),
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
