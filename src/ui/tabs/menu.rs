use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, LoadPhase};
use crate::pager::Pager;
use crate::ui::styles;
use crate::utils::{format_price, truncate_string};

/// Render the Menu tab: browsable menu on the left, selected item detail
/// and cart on the right.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_menu_table(frame, app, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_item_detail(frame, app, right[0]);
    render_cart(frame, app, right[1]);
}

fn render_menu_table(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Category"),
        Cell::from(format!(
            "Price {}",
            if app.sort_ascending { "▲" } else { "▼" }
        )),
        Cell::from("Avail"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app
        .menu_items
        .iter()
        .map(|item| {
            let avail = if item.available { "yes" } else { "no" };
            Row::new(vec![
                Cell::from(item.name.clone()),
                Cell::from(item.category.clone()),
                Cell::from(format_price(&item.price)),
                Cell::from(avail),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(42),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(5),
    ];

    let search_label = if app.search_query.is_empty() {
        String::new()
    } else {
        format!(" \"{}\"", app.search_query)
    };
    let loading = match app.menu_phase {
        LoadPhase::Loading => " loading...",
        LoadPhase::Loaded => "",
    };
    let title = format!(
        " Menu ({}) - {}{}{} ",
        app.menu_pager.total(),
        app.category_filter.label(),
        search_label,
        loading,
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !app.menu_items.is_empty() {
        state.select(Some(app.menu_selection));
    }

    frame.render_stateful_widget(table, chunks[0], &mut state);

    render_pagination(frame, &app.menu_pager, chunks[1]);
}

/// One label per page; the current page is bracketed like a disabled
/// button.
pub fn page_labels(pager: &Pager) -> Vec<String> {
    (1..=pager.page_count())
        .map(|n| {
            if n == pager.page() {
                format!("[{}]", n)
            } else {
                n.to_string()
            }
        })
        .collect()
}

fn render_pagination(frame: &mut Frame, pager: &Pager, area: Rect) {
    let mut spans = vec![Span::styled(" Page: ", styles::muted_style())];
    for (i, label) in page_labels(pager).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let current = label.starts_with('[');
        spans.push(Span::styled(
            label,
            if current {
                styles::highlight_style()
            } else {
                styles::muted_style()
            },
        ));
    }
    spans.push(Span::styled("  [ prev  ] next", styles::muted_style()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_item_detail(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_menu_item() {
        Some(item) => {
            let mut lines = vec![
                Line::from(Span::styled(item.name.clone(), styles::title_style())),
                Line::from(vec![
                    Span::styled("Price:     ", styles::muted_style()),
                    Span::raw(format_price(&item.price)),
                ]),
                Line::from(vec![
                    Span::styled("Category:  ", styles::muted_style()),
                    Span::raw(item.category.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Available: ", styles::muted_style()),
                    if item.available {
                        Span::styled("yes", styles::success_style())
                    } else {
                        Span::styled("no", styles::error_style())
                    },
                ]),
                Line::from(""),
            ];
            if !item.description.is_empty() {
                lines.push(Line::from(item.description.clone()));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "No item selected",
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Dish ")
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        );
    frame.render_widget(paragraph, area);
}

fn render_cart(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = app
        .cart
        .items()
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::raw(truncate_string(&item.name, area.width.saturating_sub(14) as usize)),
                Span::raw(" "),
                Span::styled(format_price(&item.price), styles::muted_style()),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Cart is empty",
            styles::muted_style(),
        )));
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Total: ", styles::muted_style()),
            Span::styled(format_price(&app.cart.total()), styles::title_style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] add  [o] checkout",
        styles::muted_style(),
    )));

    let title = format!(" Cart ({}) ", app.cart.len());
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_labels_marks_current() {
        // total 12, size 5 -> three buttons, page 1 disabled
        let mut pager = Pager::new(5);
        pager.set_total(12);
        assert_eq!(page_labels(&pager), vec!["[1]", "2", "3"]);

        pager.next_page();
        assert_eq!(page_labels(&pager), vec!["1", "[2]", "3"]);
    }

    #[test]
    fn test_page_labels_empty_list() {
        let pager = Pager::new(5);
        assert_eq!(page_labels(&pager), vec!["[1]"]);
    }
}
