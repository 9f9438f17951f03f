use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{AdminView, App, LoadPhase};
use crate::ui::styles;
use crate::ui::tabs::orders::{list_title, render_orders_split};
use crate::utils::format_price;

/// Render the Admin tab: order management or menu management, toggled
/// with [v]. Every mutation is followed by a full reload of the list.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    match app.admin_view {
        AdminView::Orders => {
            let title = list_title(
                "All Orders",
                &app.admin_orders_pager,
                app.admin_orders_phase,
            );
            render_orders_split(
                frame,
                chunks[0],
                app.visible_admin_orders(),
                app.admin_orders_selection,
                &app.admin_catalog,
                &title,
            );
            render_hints(
                frame,
                chunks[1],
                "[s] set status  [d] delete  [ ] page  [v] manage menu",
            );
        }
        AdminView::Menu => {
            render_menu_table(frame, app, chunks[0]);
            render_hints(
                frame,
                chunks[1],
                "[n] new item  [e] edit  [d] delete  [v] manage orders",
            );
        }
    }
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &str) {
    let line = Line::from(Span::styled(format!(" {}", hints), styles::muted_style()));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_menu_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Category"),
        Cell::from("Price"),
        Cell::from("Avail"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app
        .admin_menu
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
        Constraint::Percentage(45),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(5),
    ];

    let loading = match app.admin_menu_phase {
        LoadPhase::Loading => " loading...",
        LoadPhase::Loaded => "",
    };
    let title = format!(" Manage Menu ({}){} ", app.admin_menu.len(), loading);

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
    if !app.admin_menu.is_empty() {
        state.select(Some(app.admin_menu_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
