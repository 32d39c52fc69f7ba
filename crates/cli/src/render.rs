use agrotrack_core::domain::product::Product;
use agrotrack_core::domain::vehicle::Vehicle;
use agrotrack_core::matching::assess;

pub fn products_table(products: &[Product]) -> String {
    let rows = products
        .iter()
        .map(|product| {
            vec![
                product.id.to_string(),
                product.name.clone(),
                product.quantity.to_string(),
                product.origin.clone(),
                product.destination.clone(),
                temperature(product.min_temperature),
                temperature(product.max_temperature),
                yes_no(product.requires_ventilation).to_string(),
                yes_no(product.requires_sun_protection).to_string(),
            ]
        })
        .collect();

    render_table(
        &[
            "id",
            "product",
            "quantity",
            "origin",
            "destination",
            "min temp",
            "max temp",
            "ventilation",
            "sun protection",
        ],
        rows,
    )
}

pub fn vehicles_table(vehicles: &[Vehicle]) -> String {
    let rows = vehicles
        .iter()
        .map(|vehicle| {
            vec![
                vehicle.id.to_string(),
                vehicle.capacity.to_string(),
                temperature(vehicle.temperature),
                yes_no(vehicle.has_ventilation).to_string(),
                yes_no(vehicle.has_sun_protection).to_string(),
            ]
        })
        .collect();

    render_table(&["id", "capacity", "temperature", "ventilation", "sun protection"], rows)
}

/// Describes why `vehicle` suits `product`, one line per check.
pub fn compatibility_summary(product: &Product, vehicle: &Vehicle) -> String {
    let report = assess(product, vehicle);
    let mark = |ok: bool| if ok { "ok" } else { "FAIL" };

    [
        format!("Vehicle {} is available and meets every condition:", vehicle.id),
        format!(
            "  - Capacity: {} (product: {}) [{}]",
            vehicle.capacity,
            product.quantity,
            mark(report.capacity_ok)
        ),
        format!(
            "  - Temperature: {} (min: {}, max: {}) [{}]",
            temperature(vehicle.temperature),
            temperature(product.min_temperature),
            temperature(product.max_temperature),
            mark(report.temperature_ok)
        ),
        format!(
            "  - Ventilation: {} [{}]",
            yes_no(vehicle.has_ventilation),
            mark(report.ventilation_ok)
        ),
        format!(
            "  - Sun protection: {} [{}]",
            yes_no(vehicle.has_sun_protection),
            mark(report.sun_protection_ok)
        ),
    ]
    .join("\n")
}

fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headers.to_vec()));
    lines.push(widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<_>>().join("  "));
    for row in &rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(fill))
}

fn temperature(value: f64) -> String {
    format!("{value:.1}")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
