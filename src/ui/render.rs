use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, AuthFocus, AuthMode, MenuFormFocus, Tab};
use crate::utils::format_price;

use super::styles;
use super::tabs::{admin, menu, orders, profile};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::LoggingIn => render_auth_overlay(frame, app),
        AppState::ConfirmingCheckout => render_checkout_overlay(frame, app),
        AppState::ConfirmingDeleteOrder => render_confirm_overlay(
            frame,
            " Delete Order ",
            "Are you sure you want to delete this order?",
        ),
        AppState::ConfirmingDeleteMenuItem => {
            render_confirm_overlay(frame, " Delete Menu Item ", "Delete this menu item?")
        }
        AppState::EditingStatus => render_status_input_overlay(frame, app),
        AppState::EditingMenuItem => render_menu_form_overlay(frame, app),
        AppState::ConfirmingQuit => {
            render_confirm_overlay(frame, " Quit ", "Quit Foodcourt?")
        }
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, _app: &App, area: Rect) {
    let title = "  Foodcourt";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut tabs = vec![Tab::Menu, Tab::Orders, Tab::Profile];
    if app.profile.is_admin() {
        tabs.push(Tab::Admin);
    }

    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let label = format!("[{}] {}", i + 1, tab.title());
        if *tab == app.current_tab {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Menu => menu::render(frame, app, area),
        Tab::Orders => orders::render(frame, app, area),
        Tab::Profile => profile::render(frame, app, area),
        Tab::Admin => admin::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if matches!(app.state, AppState::Searching) {
        format!(" Search: {}_ ", app.search_query)
    } else if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        String::from(" Ready ")
    };

    let right_text = " [/] search | [u] reload | [q] quit ";

    let width = area.width as usize;
    let padding = width
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let left_style = if matches!(app.state, AppState::Searching) {
        styles::highlight_style()
    } else {
        styles::muted_style()
    };

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

// ============================================================================
// Overlays
// ============================================================================

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(56, 25, frame.area());
    frame.render_widget(Clear, area);

    let key = styles::help_key_style;
    let desc = styles::help_desc_style;

    let help_text = vec![
        Line::from(Span::styled(
            format!("  Foodcourt v{}", env!("CARGO_PKG_VERSION")),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        Line::from(vec![Span::styled("  1-4       ", key()), Span::styled("Switch tabs", desc())]),
        Line::from(vec![Span::styled("  ←/→       ", key()), Span::styled("Prev/next tab", desc())]),
        Line::from(vec![Span::styled("  ↑/↓       ", key()), Span::styled("Navigate list", desc())]),
        Line::from(vec![Span::styled("  [/]       ", key()), Span::styled("Prev/next page", desc())]),
        Line::from(""),
        Line::from(Span::styled(" Menu", styles::highlight_style())),
        Line::from(vec![Span::styled("  /         ", key()), Span::styled("Search", desc())]),
        Line::from(vec![Span::styled("  c         ", key()), Span::styled("Cycle category filter", desc())]),
        Line::from(vec![Span::styled("  s         ", key()), Span::styled("Toggle price sort", desc())]),
        Line::from(vec![Span::styled("  Enter     ", key()), Span::styled("Add dish to cart", desc())]),
        Line::from(vec![Span::styled("  o         ", key()), Span::styled("Checkout", desc())]),
        Line::from(""),
        Line::from(Span::styled(" Admin", styles::highlight_style())),
        Line::from(vec![Span::styled("  v         ", key()), Span::styled("Toggle orders/menu view", desc())]),
        Line::from(vec![Span::styled("  n e d s   ", key()), Span::styled("New/edit/delete/status", desc())]),
        Line::from(""),
        Line::from(vec![Span::styled("  u         ", key()), Span::styled("Reload current view", desc())]),
        Line::from(vec![Span::styled("  l         ", key()), Span::styled("Log out (Profile tab)", desc())]),
        Line::from(""),
        Line::from(Span::styled("  Press Esc to close", styles::muted_style())),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );
    frame.render_widget(paragraph, area);
}

fn auth_field_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("  {:<10}", label), styles::muted_style()),
        Span::styled(format!("{}{}", value, cursor), styles::input_style(focused)),
    ])
}

fn render_auth_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(52, 16, frame.area());
    frame.render_widget(Clear, area);

    let (title, submit_label) = match app.auth_mode {
        AuthMode::Login => (" Log In ", "[ Log In ]"),
        AuthMode::Register => (" Register ", "[ Register ]"),
    };

    let masked = |s: &str| "*".repeat(s.chars().count());

    let mut lines = vec![Line::from("")];

    if app.auth_mode == AuthMode::Register {
        lines.push(auth_field_line(
            "Name:",
            app.auth_name.clone(),
            app.auth_focus == AuthFocus::Name,
        ));
    }
    lines.push(auth_field_line(
        "Email:",
        app.auth_email.clone(),
        app.auth_focus == AuthFocus::Email,
    ));
    lines.push(auth_field_line(
        "Password:",
        masked(&app.auth_password),
        app.auth_focus == AuthFocus::Password,
    ));
    if app.auth_mode == AuthMode::Register {
        lines.push(auth_field_line(
            "Confirm:",
            masked(&app.auth_confirm),
            app.auth_focus == AuthFocus::Confirm,
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", submit_label),
        styles::input_style(app.auth_focus == AuthFocus::Submit),
    )));
    lines.push(Line::from(""));

    if let Some(ref error) = app.auth_error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
    } else if let Some(ref msg) = app.status_message {
        lines.push(Line::from(Span::styled(
            format!("  {}", msg),
            styles::success_style(),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    let switch_hint = match app.auth_mode {
        AuthMode::Login => "  [F2] Register instead   [Tab] Next field",
        AuthMode::Register => "  [F2] Log in instead    [Tab] Next field",
    };
    lines.push(Line::from(Span::styled(switch_hint, styles::muted_style())));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );
    frame.render_widget(paragraph, area);
}

fn render_checkout_overlay(frame: &mut Frame, app: &App) {
    let height = (app.cart.len() as u16 + 8).min(frame.area().height.saturating_sub(2));
    let area = centered_rect_fixed(48, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for item in app.cart.items() {
        lines.push(Line::from(vec![
            Span::raw(format!("  {} - ", item.name)),
            Span::styled(format_price(&item.price), styles::muted_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Total: ", styles::muted_style()),
        Span::styled(format_price(&app.cart.total()), styles::title_style()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [y] Place order   [n] Cancel",
        styles::muted_style(),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Checkout ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );
    frame.render_widget(paragraph, area);
}

fn render_confirm_overlay(frame: &mut Frame, title: &str, question: &str) {
    let area = centered_rect_fixed(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(format!("  {}", question)),
        Line::from(""),
        Line::from(Span::styled("  [y] Yes   [n] No", styles::muted_style())),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title.to_string())
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );
    frame.render_widget(paragraph, area);
}

fn render_status_input_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(50, 8, frame.area());
    frame.render_widget(Clear, area);

    let order = app.pending_status_order.as_deref().unwrap_or("-");
    let lines = vec![
        Line::from(""),
        Line::from(format!("  Order {}", order)),
        Line::from(vec![
            Span::styled("  New status: ", styles::muted_style()),
            Span::styled(format!("{}_", app.status_input), styles::input_style(true)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [Enter] Save   [Esc] Cancel",
            styles::muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Update Status ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );
    frame.render_widget(paragraph, area);
}

fn render_menu_form_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(58, 16, frame.area());
    frame.render_widget(Clear, area);

    let form = &app.menu_form;
    let title = if form.id.is_some() {
        " Edit Menu Item "
    } else {
        " New Menu Item "
    };

    let focus = form.focus;
    let mut lines = vec![
        Line::from(""),
        auth_field_line("Name:", form.name.clone(), focus == MenuFormFocus::Name),
        auth_field_line("Price:", form.price.clone(), focus == MenuFormFocus::Price),
        auth_field_line(
            "Category:",
            form.category.clone(),
            focus == MenuFormFocus::Category,
        ),
        auth_field_line(
            "Descr:",
            form.description.clone(),
            focus == MenuFormFocus::Description,
        ),
        auth_field_line(
            "Image:",
            form.image_url.clone(),
            focus == MenuFormFocus::ImageUrl,
        ),
        Line::from(vec![
            Span::styled("  Available ", styles::muted_style()),
            Span::styled(
                if form.available { "[x]" } else { "[ ]" },
                styles::input_style(focus == MenuFormFocus::Available),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [ Save ]",
            styles::input_style(focus == MenuFormFocus::Submit),
        )),
        Line::from(""),
    ];

    if let Some(ref error) = form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  [Tab] Next   [Space] Toggle   [Esc] Cancel",
        styles::muted_style(),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );
    frame.render_widget(paragraph, area);
}

/// Center a fixed-size rect within the given area, clamped to fit.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
