use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use swelter_core::{
    budget::AllocationOrder,
    model::{CityAnalysis, GridCell, RiskLevel},
};

use crate::app::{App, PLAN_FIELDS, PlanField, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new("swelter – urban heat & cooling planner")
        .block(Block::default().borders(Borders::ALL).title("Swelter"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::CitySelect => draw_city_select(frame, app, *content_area),
        Screen::PlanSetup => draw_plan_setup(frame, app, *content_area),
        Screen::Results => draw_results(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::CitySelect => "↑/↓ move · Enter/Space select city · q/Ctrl-C quit",
        Screen::PlanSetup => {
            "↑/↓ move · ←/→ adjust · Space toggle · Enter run analysis · Esc back · q/Ctrl-C quit"
        }
        Screen::Results => "Esc/←/b back to plan · Enter/r re-run · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Analyzing… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_city_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = app
        .cities
        .iter()
        .enumerate()
        .map(|(idx, meta)| {
            let prefix = if idx == app.city_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{prefix}{}", meta.name))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select city (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.cities.is_empty() {
        state.select(Some(app.city_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_plan_setup(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let city_name = app
        .selected_city
        .as_ref()
        .map_or("<no city>", |meta| meta.name.as_str());

    let items = PLAN_FIELDS
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let prefix = if idx == app.plan_cursor { "> " } else { "  " };
            ListItem::new(format!("{prefix}{}", field_label(app, *field)))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Cooling plan for {city_name} (↑/↓ move, ←/→ adjust, Enter to analyze)"
        )))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(app.plan_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn field_label(app: &App, field: PlanField) -> String {
    match field {
        PlanField::GreenCover => {
            format!("Green cover increase      {:>3.0} %", app.plan.green_cover_pct)
        }
        PlanField::CoolRoof => format!("{} Cool roofs", checkbox(app.plan.cool_roof)),
        PlanField::GreenRoof => format!("{} Green roofs", checkbox(app.plan.green_roof)),
        PlanField::WaterBodies => {
            format!("{} Restore water bodies", checkbox(app.plan.water_bodies))
        }
        PlanField::CoolPavement => {
            format!("{} Cool pavements", checkbox(app.plan.cool_pavement))
        }
        PlanField::Budget => format!("Budget cap                ₹{:.1} crore", app.plan.budget_cap),
        PlanField::Order => format!("Allocation order          {}", order_label(app.order)),
    }
}

fn checkbox(enabled: bool) -> &'static str {
    if enabled { "[x]" } else { "[ ]" }
}

fn order_label(order: AllocationOrder) -> &'static str {
    match order {
        AllocationOrder::Declaration => "declaration (first fit)",
        AllocationOrder::ImpactPerCost => "impact per cost",
    }
}

fn draw_results(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(analysis) = app.analysis.as_ref() else {
        let paragraph = Paragraph::new(if app.is_loading {
            "Running analysis…"
        } else {
            "No analysis yet. Press Esc to go back and press Enter on the plan."
        })
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),  // summary
            Constraint::Min(0),     // hotspots
            Constraint::Length(9),  // budget selection
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [summary_area, hotspot_area, selection_area] = chunks else {
        return;
    };

    draw_summary(frame, analysis, *summary_area);
    draw_hotspots(frame, analysis, *hotspot_area);
    draw_selection(frame, app, analysis, *selection_area);
}

fn draw_summary(frame: &mut Frame<'_>, analysis: &CityAnalysis, area: Rect) {
    let summary = &analysis.summary;

    let window_line = analysis.window.map_or_else(
        || String::from("latest snapshot"),
        |window| format!("{} – {}", window.start, window.end),
    );

    let air_line = summary.air_quality.map_or_else(
        || String::from("AQI unavailable (scored without pollution term)"),
        |air| {
            format!(
                "AQI {:.0} ({}) · PM2.5 {:.0} µg/m³",
                air.reading.aqi, air.category, air.reading.pm25
            )
        },
    );

    let cooling_line = summary.mean_temp_change.map_or_else(
        || String::from("not simulated"),
        |change| format!("{change:.2} °C mean projected reduction"),
    );

    let text = vec![
        Line::from(format!(
            "{} · {} cells · window {window_line}",
            analysis.city.name, summary.cell_count
        )),
        Line::from(format!(
            "Mean surface temp {:.1} °C · {:.1} % of cells at high heat risk",
            summary.mean_surface_temp,
            summary.high_risk_share * 100.0
        )),
        Line::from(air_line),
        Line::from(format!(
            "Selected measures: {cooling_line} · ₹{:.1} crore committed",
            analysis.selection.used_budget
        )),
        Line::from(format!(
            "Expected cooling from budget: ~{:.1} °C",
            analysis.selection.total_impact
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Summary"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_hotspots(frame: &mut Frame<'_>, analysis: &CityAnalysis, area: Rect) {
    let mut cells: Vec<&GridCell> = analysis.cells.iter().collect();
    cells.sort_by(|lhs, rhs| rhs.heat_risk.total_cmp(&lhs.heat_risk));

    let visible = usize::from(area.height.saturating_sub(3)).max(1);

    let rows = cells.into_iter().take(visible).map(|cell| {
        let (after, change, sdg) = cell.outcome.map_or_else(
            || (String::from("–"), String::from("–"), String::from("–")),
            |outcome| {
                (
                    format!("{:.1}", outcome.temp_after),
                    format!("{:.2}", outcome.temp_change),
                    outcome.sdg_impact.to_string(),
                )
            },
        );

        Row::new(vec![
            Cell::from(format!("{:.3}", cell.latitude)),
            Cell::from(format!("{:.3}", cell.longitude)),
            Cell::from(format!("{:.1}", cell.surface_temp)),
            Cell::from(format!("{:.2}", cell.heat_risk)),
            Cell::from(cell.risk_level.to_string()),
            Cell::from(cell.health_risk_level.to_string()),
            Cell::from(after),
            Cell::from(change),
            Cell::from(sdg),
        ])
        .style(Style::default().fg(risk_color(cell.risk_level)))
    });

    let column_widths = [
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Min(8),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec![
                "Lat", "Lon", "°C", "Heat", "Level", "Health", "After", "Δ°C", "SDG",
            ])
            .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Hotspots (hottest first)"),
        )
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn draw_selection(frame: &mut Frame<'_>, app: &App, analysis: &CityAnalysis, area: Rect) {
    let title = format!(
        "Interventions within ₹{:.1} crore",
        analysis.selection.used_budget
    );

    if analysis.selection.chosen.is_empty() {
        let paragraph = Paragraph::new(
            "Nothing fits the current budget. Raise the cap or enable cheaper measures.",
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let cost_model = &app.service.config().cost_model;
    let rows = analysis.selection.chosen.iter().filter_map(|id| {
        let option = cost_model.iter().find(|entry| entry.id == *id)?;
        Some(Row::new(vec![
            Cell::from(option.label.clone()),
            Cell::from(format!("₹{:.1} crore", option.cost)),
            Cell::from(format!("{:.1} °C", option.impact)),
        ]))
    });

    let column_widths = [
        Constraint::Min(30),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Intervention", "Cost", "Cooling"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Moderate => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}
