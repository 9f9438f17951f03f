use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

/// Render the Profile tab.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let placeholder = "-";
    let field = |value: &str| {
        if value.is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        }
    };

    let mut lines = vec![
        Line::from(Span::styled("Account", styles::title_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Name:  ", styles::muted_style()),
            Span::raw(field(&app.profile.username)),
        ]),
        Line::from(vec![
            Span::styled("Email: ", styles::muted_style()),
            Span::raw(field(&app.profile.email)),
        ]),
        Line::from(vec![
            Span::styled("Phone: ", styles::muted_style()),
            Span::raw(field(&app.profile.phone)),
        ]),
        Line::from(vec![
            Span::styled("Role:  ", styles::muted_style()),
            Span::raw(field(&app.profile.role)),
        ]),
        Line::from(""),
    ];

    if app.profile.is_admin() {
        lines.push(Line::from(Span::styled(
            "Admin panel available on tab [4]",
            styles::highlight_style(),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "[l] log out",
        styles::muted_style(),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Profile ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );
    frame.render_widget(paragraph, area);
}
