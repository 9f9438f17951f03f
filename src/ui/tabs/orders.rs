use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, LoadPhase};
use crate::catalog::Catalog;
use crate::models::Order;
use crate::pager::Pager;
use crate::ui::styles;
use crate::utils::{format_date, format_price, truncate_string};

/// Render the Orders tab: the user's own order history.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = list_title("My Orders", &app.orders_pager, app.orders_phase);
    render_orders_split(
        frame,
        area,
        app.visible_orders(),
        app.orders_selection,
        &app.catalog,
        &title,
    );
}

pub(crate) fn list_title(label: &str, pager: &Pager, phase: LoadPhase) -> String {
    let loading = match phase {
        LoadPhase::Loading => " loading...",
        LoadPhase::Loaded => "",
    };
    format!(
        " {} ({}) - Page {}/{}{} ",
        label,
        pager.total(),
        pager.page(),
        pager.page_count(),
        loading,
    )
}

/// Shared order list + detail rendering, used by both the user history
/// and the admin order view.
pub(crate) fn render_orders_split(
    frame: &mut Frame,
    area: Rect,
    visible: &[Order],
    selection: usize,
    catalog: &Catalog,
    title: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    render_order_table(frame, chunks[0], visible, selection, title);
    render_order_detail(frame, chunks[1], visible.get(selection), catalog);
}

fn render_order_table(
    frame: &mut Frame,
    area: Rect,
    visible: &[Order],
    selection: usize,
    title: &str,
) {
    let header = Row::new([
        Cell::from("Order"),
        Cell::from("Status"),
        Cell::from("Total"),
        Cell::from("Date"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .map(|order| {
            Row::new(vec![
                Cell::from(truncate_string(&order.id, 12)),
                Cell::from(order.status.clone()),
                Cell::from(format_price(&order.total_price)),
                Cell::from(format_date(order.created_at.as_deref())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(13),
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Length(19),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title.to_string())
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !visible.is_empty() {
        state.select(Some(selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_order_detail(
    frame: &mut Frame,
    area: Rect,
    order: Option<&Order>,
    catalog: &Catalog,
) {
    let content = match order {
        Some(order) => vec![
            Line::from(Span::styled(
                format!("Order {}", order.id),
                styles::title_style(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Status: ", styles::muted_style()),
                Span::raw(order.status.clone()),
            ]),
            Line::from(vec![
                Span::styled("Total:  ", styles::muted_style()),
                Span::raw(format_price(&order.total_price)),
            ]),
            Line::from(vec![
                Span::styled("Date:   ", styles::muted_style()),
                Span::raw(format_date(order.created_at.as_deref())),
            ]),
            Line::from(""),
            Line::from(Span::styled("Items", styles::highlight_style())),
            Line::from(catalog.item_names(&order.item_ids)),
        ],
        None => vec![Line::from(Span::styled(
            "No orders found.",
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Details ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(paragraph, area);
}
