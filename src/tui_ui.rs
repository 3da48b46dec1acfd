use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, TableState, Wrap,
    },
};

use crate::tui_app::{App, InputMode, View};
use modelcat_core::format::{
    NOT_APPLICABLE, grouped_text, or_not_applicable, parameter_count_text,
};
use modelcat_core::{CatalogPage, ModelRecord, RangeField, RangeSlider, SortColumn};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // filters
            Constraint::Min(10),   // main view
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    draw_header(frame, app, outer[0]);
    draw_filter_bar(frame, app, outer[1]);

    match app.view {
        View::Table => match &app.catalog {
            Ok(page) => draw_table(frame, page, app.selected_row, outer[2]),
            Err(e) => draw_message(
                frame,
                " Models ",
                e.message(modelcat_core::Panel::Catalog),
                e.is_empty(),
                outer[2],
            ),
        },
        View::Detail => draw_detail(frame, app, outer[2]),
        View::Compare => draw_compare(frame, app, outer[2]),
    }

    draw_status_bar(frame, app, outer[3]);

    // Draw provider popup on top if active
    if app.input_mode == InputMode::ProviderPopup {
        draw_provider_popup(frame, app);
    }
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn bordered(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(dim())
        .title(title)
        .title_style(dim())
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let summary = match &app.catalog {
        Ok(page) => format!(
            "{} models  │  {} providers  │  {} licenses",
            page.all_models().len(),
            page.domains().providers.len(),
            page.domains().licenses.len()
        ),
        Err(e) => e.message(modelcat_core::Panel::Catalog).to_string(),
    };
    let mark = app
        .compare_mark
        .map(|id| format!("  │  comparing #{} with…", id))
        .unwrap_or_default();

    let text = Line::from(vec![
        Span::styled(format!(" {}", summary), Style::default().fg(Color::White)),
        Span::styled(mark, Style::default().fg(Color::Yellow)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(dim())
        .title(" modelcat ")
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn slider_text(field: RangeField, slider: Option<&RangeSlider>) -> String {
    let Some(slider) = slider else {
        return NOT_APPLICABLE.to_string();
    };
    let [low, high] = slider.get();
    match field {
        RangeField::ParameterCount => format!(
            "{} - {}",
            parameter_count_text(Some(low)),
            parameter_count_text(Some(high))
        ),
        RangeField::ContextSize => {
            format!("{} - {}", grouped_text(Some(low)), grouped_text(Some(high)))
        }
    }
}

fn draw_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // providers
            Constraint::Length(22), // license
            Constraint::Min(22),    // params slider
            Constraint::Min(24),    // context slider
            Constraint::Length(16), // sort
        ])
        .split(area);

    let Ok(page) = &app.catalog else {
        for chunk in chunks.iter() {
            frame.render_widget(bordered(String::new()), *chunk);
        }
        return;
    };
    let state = page.filter_state();

    let provider_total = page.domains().providers.len();
    let (provider_text, provider_color) = if state.providers.is_empty() {
        ("All".to_string(), Color::Green)
    } else {
        (
            format!("{}/{}", state.providers.len(), provider_total),
            Color::Yellow,
        )
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", provider_text),
            Style::default().fg(provider_color),
        ))
        .block(bordered(" Providers [p] ".to_string())),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", state.license.label()),
            Style::default().fg(Color::White),
        ))
        .block(bordered(" License [L] ".to_string())),
        chunks[1],
    );

    for (field, chunk) in [
        (RangeField::ParameterCount, chunks[2]),
        (RangeField::ContextSize, chunks[3]),
    ] {
        let slider = page.slider(field);
        let focused = app.focused_range == field;
        let narrowed = slider.is_some_and(|s| !s.is_full());
        let title_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            dim()
        };
        let value_color = if narrowed { Color::Yellow } else { Color::Cyan };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(title_style)
            .title(format!(" {} [Tab </>/-/+] ", field.label()))
            .title_style(title_style);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", slider_text(field, slider)),
                Style::default().fg(value_color),
            ))
            .block(block),
            chunk,
        );
    }

    let sort_label = page.sort_column().map_or("—", |c| c.label());
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", sort_label),
            Style::default().fg(Color::Cyan),
        ))
        .block(bordered(" Sort [s] ".to_string())),
        chunks[4],
    );
}

fn na_cell(text: String) -> Cell<'static> {
    let style = if text == NOT_APPLICABLE {
        dim()
    } else {
        Style::default().fg(Color::White)
    };
    Cell::from(text).style(style)
}

fn draw_table(frame: &mut Frame, page: &CatalogPage, selected_row: usize, area: Rect) {
    let sort_col = page.sort_column();
    let header_cells = SortColumn::ALL.iter().map(|column| {
        if sort_col == Some(*column) {
            Cell::from(format!("{} ▲", column.label())).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Cell::from(column.label().to_string()).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        }
    });
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = page
        .visible_models()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.name.clone()).style(Style::default().fg(Color::White)),
                Cell::from(m.provider_name.clone()).style(dim()),
                na_cell(or_not_applicable(m.release_date.as_deref())),
                na_cell(parameter_count_text(m.parameter_count)),
                na_cell(grouped_text(m.context_size)),
                na_cell(or_not_applicable(m.license.as_deref())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(24),    // name
        Constraint::Length(16), // provider
        Constraint::Length(12), // release date
        Constraint::Length(9),  // params
        Constraint::Length(11), // context
        Constraint::Min(14),    // license
    ];

    let count_text = format!(
        " Models ({}/{}) ",
        page.visible_len(),
        page.all_models().len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(dim())
                .title(count_text)
                .title_style(Style::default().fg(Color::White)),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 40, 70))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if page.visible_len() > 0 {
        state.select(Some(selected_row));
    }

    frame.render_stateful_widget(table, area, &mut state);

    if page.visible_len() == 0 {
        let inner = Rect::new(area.x + 2, area.y + 2, area.width.saturating_sub(4), 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No models match the selected filters.",
                Style::default().fg(Color::Yellow),
            )),
            inner,
        );
    }

    // Scrollbar
    if page.visible_len() > (area.height as usize).saturating_sub(3) {
        let mut scrollbar_state = ScrollbarState::new(page.visible_len()).position(selected_row);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓")),
            area,
            &mut scrollbar_state,
        );
    }
}

/// Render a message in place of a panel's content.
fn draw_message(frame: &mut Frame, title: &str, message: &str, benign: bool, area: Rect) {
    let color = if benign { Color::Yellow } else { Color::Red };
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", message), Style::default().fg(color))),
    ])
    .block(bordered(title.to_string()));
    frame.render_widget(paragraph, area);
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<20}", format!("{}:", label)), dim()),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn model_lines(m: &ModelRecord) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", m.name), Style::default().fg(Color::White).bold())),
        Line::from(""),
        field_line("Provider", m.provider_name.clone()),
        field_line("Website", or_not_applicable(m.provider_website.as_deref())),
        field_line("Developer", or_not_applicable(m.developer.as_deref())),
        field_line("Release Date", or_not_applicable(m.release_date.as_deref())),
        field_line("Parameter Count", grouped_text(m.parameter_count)),
        field_line("Context Size", grouped_text(m.context_size)),
        field_line("Architecture Type", or_not_applicable(m.architecture_type.as_deref())),
        field_line("Training Data Size", or_not_applicable(m.training_data_size.as_deref())),
        field_line("License", or_not_applicable(m.license.as_deref())),
        field_line("Description", or_not_applicable(m.description.as_deref())),
        field_line("Use Cases", or_not_applicable(m.use_cases.as_deref())),
    ]
}

fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let page = match &app.detail {
        Some(Ok(page)) => page,
        Some(Err(e)) => {
            draw_message(frame, " Model ", e.message(modelcat_core::Panel::Details), false, area);
            return;
        }
        None => {
            frame.render_widget(bordered(" No model selected ".to_string()), area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(16), Constraint::Percentage(40)])
        .split(area);

    match &page.model {
        Ok(model) => {
            let details = Paragraph::new(model_lines(model))
                .wrap(Wrap { trim: false })
                .block(bordered(format!(" Model #{} ", page.id)));
            frame.render_widget(details, chunks[0]);
        }
        Err(_) => draw_message(
            frame,
            " Model ",
            page.model_message().unwrap_or_default(),
            false,
            chunks[0],
        ),
    }

    match &page.performance {
        Ok(records) => {
            let header = Row::new(["Benchmark", "Score", "Dataset"].map(|h| {
                Cell::from(h).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            }));
            let rows: Vec<Row> = records
                .iter()
                .map(|r| {
                    Row::new(vec![
                        Cell::from(r.benchmark_name.clone()),
                        Cell::from(format!("{}", r.score)).style(Style::default().fg(Color::Green)),
                        na_cell(or_not_applicable(r.dataset_details.as_deref())),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Min(20),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .block(bordered(" Performance ".to_string()));
            frame.render_widget(table, chunks[1]);
        }
        Err(e) => draw_message(
            frame,
            " Performance ",
            page.performance_message().unwrap_or_default(),
            e.is_empty(),
            chunks[1],
        ),
    }
}

fn draw_compare(frame: &mut Frame, app: &App, area: Rect) {
    let page = match &app.compare {
        Some(Ok(page)) => page,
        Some(Err(e)) => {
            draw_message(
                frame,
                " Comparison ",
                e.message(modelcat_core::Panel::Comparison),
                e.is_empty(),
                area,
            );
            return;
        }
        None => {
            draw_message(
                frame,
                " Comparison ",
                "Please select two models to compare.",
                true,
                area,
            );
            return;
        }
    };

    let fields: [(&str, fn(&ModelRecord) -> String); 10] = [
        ("Provider", |m| m.provider_name.clone()),
        ("Developer", |m| or_not_applicable(m.developer.as_deref())),
        ("Release Date", |m| or_not_applicable(m.release_date.as_deref())),
        ("Parameter Count", |m| grouped_text(m.parameter_count)),
        ("Context Size", |m| grouped_text(m.context_size)),
        ("Architecture Type", |m| or_not_applicable(m.architecture_type.as_deref())),
        ("Training Data Size", |m| or_not_applicable(m.training_data_size.as_deref())),
        ("License", |m| or_not_applicable(m.license.as_deref())),
        ("Description", |m| or_not_applicable(m.description.as_deref())),
        ("Use Cases", |m| or_not_applicable(m.use_cases.as_deref())),
    ];

    let mut header_cells = vec![Cell::from("")];
    header_cells.extend(page.models.iter().map(|m| {
        Cell::from(m.name.clone()).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    }));

    let rows: Vec<Row> = fields
        .iter()
        .map(|(label, value)| {
            let mut cells = vec![Cell::from(label.to_string()).style(dim())];
            cells.extend(page.models.iter().map(|m| na_cell(value(m))));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(20)];
    widths.extend(page.models.iter().map(|_| Constraint::Fill(1)));

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells))
        .block(bordered(" Comparison ".to_string()));
    frame.render_widget(table, area);
}

fn draw_provider_popup(frame: &mut Frame, app: &App) {
    let Ok(page) = &app.catalog else {
        return;
    };
    let providers = &page.domains().providers;
    let area = frame.area();

    // Size the popup: width fits longest provider name, height fits up to 20 rows
    let max_name_len = providers.iter().map(|p| p.name.len()).max().unwrap_or(10);
    let popup_width = (max_name_len as u16 + 10).min(area.width.saturating_sub(4));
    let popup_height = (providers.len() as u16 + 2).min(area.height.saturating_sub(4));

    // Center the popup
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let inner_height = popup_height.saturating_sub(2) as usize;

    // Scroll so the cursor is always visible
    let scroll_offset = if app.provider_cursor >= inner_height {
        app.provider_cursor - inner_height + 1
    } else {
        0
    };

    let lines: Vec<Line> = providers
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(inner_height)
        .map(|(i, provider)| {
            let selected = page.is_provider_selected(&provider.name);
            let checkbox = if selected { "[x]" } else { "[ ]" };
            let mut style = if selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            if i == app.provider_cursor {
                style = style.add_modifier(Modifier::BOLD).bg(Color::DarkGray);
            }
            Line::from(Span::styled(format!(" {} {}", checkbox, provider.name), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Providers ")
        .title_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (keys, mode_text) = match (app.input_mode, app.view) {
        (InputMode::ProviderPopup, _) => (
            "  ↑↓/jk:navigate  Space:toggle  a:all  Esc:close".to_string(),
            "PROVIDERS",
        ),
        (InputMode::Normal, View::Table) => (
            " ↑↓/jk:nav  Enter:detail  c:compare  s:sort  p:providers  L:license  Tab:range  x:reset  r:reload  q:quit"
                .to_string(),
            "TABLE",
        ),
        (InputMode::Normal, View::Detail) => (" q/Esc:back".to_string(), "DETAIL"),
        (InputMode::Normal, View::Compare) => (" q/Esc:back".to_string(), "COMPARE"),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode_text),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, dim()),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("  │ {}", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
