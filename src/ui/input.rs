//! Keyboard input handling for the TUI.
//!
//! Translates key events into application state changes. Overlay states
//! are handled first; anything else falls through to the global keys and
//! then the per-tab keys.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{AdminView, App, AppState, AuthFocus, AuthMode, MenuFormFocus, Tab};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::LoggingIn => return handle_auth_input(app, key).await,
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingCheckout => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.submit_order(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    // Cart stays as it was
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingDeleteOrder => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.confirm_delete_order()
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.decline_pending_delete()
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingDeleteMenuItem => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.confirm_delete_menu_item()
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.decline_pending_delete()
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::EditingStatus => {
            match key.code {
                KeyCode::Enter => app.submit_status_update(),
                KeyCode::Esc => {
                    app.pending_status_order = None;
                    app.state = AppState::Normal;
                }
                KeyCode::Backspace => app.pop_input_char(),
                KeyCode::Char(c) => app.push_input_char(c),
                _ => {}
            }
            return Ok(false);
        }
        AppState::EditingMenuItem => {
            handle_menu_form_input(app, key);
            return Ok(false);
        }
        AppState::Searching => {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => app.state = AppState::Normal,
                KeyCode::Backspace => app.pop_input_char(),
                KeyCode::Char(c) => app.push_input_char(c),
                _ => {}
            }
            return Ok(false);
        }
        AppState::Normal | AppState::Quitting => {}
    }

    // Global keys
    let is_admin = app.profile.is_admin();
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('1') => switch_tab(app, Tab::Menu),
        KeyCode::Char('2') => switch_tab(app, Tab::Orders),
        KeyCode::Char('3') => switch_tab(app, Tab::Profile),
        KeyCode::Char('4') if is_admin => switch_tab(app, Tab::Admin),
        KeyCode::Left => {
            let prev = app.current_tab.prev(is_admin);
            switch_tab(app, prev);
        }
        KeyCode::Right => {
            let next = app.current_tab.next(is_admin);
            switch_tab(app, next);
        }
        KeyCode::Char('u') => app.on_tab_entered(),
        KeyCode::Up => move_selection(app, -1),
        KeyCode::Down => move_selection(app, 1),
        KeyCode::Char('[') => page_back(app),
        KeyCode::Char(']') => page_forward(app),
        _ => handle_tab_key(app, key),
    }

    Ok(false)
}

fn switch_tab(app: &mut App, tab: Tab) {
    app.current_tab = tab;
    app.on_tab_entered();
}

/// Move the selection within the list the current tab shows.
fn move_selection(app: &mut App, delta: i64) {
    let (selection, len) = match app.current_tab {
        Tab::Menu => (&mut app.menu_selection, app.menu_items.len()),
        Tab::Orders => {
            let len = app.orders_pager.visible_slice(&app.orders).len();
            (&mut app.orders_selection, len)
        }
        Tab::Profile => return,
        Tab::Admin => match app.admin_view {
            AdminView::Orders => {
                let len = app.admin_orders_pager.visible_slice(&app.admin_orders).len();
                (&mut app.admin_orders_selection, len)
            }
            AdminView::Menu => (&mut app.admin_menu_selection, app.admin_menu.len()),
        },
    };

    if len == 0 {
        *selection = 0;
        return;
    }
    let max = len - 1;
    if delta < 0 {
        *selection = selection.saturating_sub(delta.unsigned_abs() as usize);
    } else {
        *selection = (*selection + delta as usize).min(max);
    }
}

fn page_back(app: &mut App) {
    match app.current_tab {
        Tab::Menu => {
            if app.menu_pager.prev_page() {
                app.menu_selection = 0;
                app.load_menu();
            }
        }
        Tab::Orders => {
            if app.orders_pager.prev_page() {
                app.orders_selection = 0;
            }
        }
        Tab::Admin => {
            if app.admin_view == AdminView::Orders && app.admin_orders_pager.prev_page() {
                app.admin_orders_selection = 0;
            }
        }
        Tab::Profile => {}
    }
}

fn page_forward(app: &mut App) {
    match app.current_tab {
        Tab::Menu => {
            if app.menu_pager.next_page() {
                app.menu_selection = 0;
                app.load_menu();
            }
        }
        Tab::Orders => {
            if app.orders_pager.next_page() {
                app.orders_selection = 0;
            }
        }
        Tab::Admin => {
            if app.admin_view == AdminView::Orders && app.admin_orders_pager.next_page() {
                app.admin_orders_selection = 0;
            }
        }
        Tab::Profile => {}
    }
}

/// Keys specific to the current tab.
fn handle_tab_key(app: &mut App, key: KeyEvent) {
    match app.current_tab {
        Tab::Menu => match key.code {
            KeyCode::Char('/') => {
                app.state = AppState::Searching;
            }
            KeyCode::Char('c') => {
                app.category_filter = app.category_filter.next();
                app.menu_pager.reset();
                app.menu_selection = 0;
                app.load_menu();
            }
            KeyCode::Char('C') => {
                app.category_filter = app.category_filter.prev();
                app.menu_pager.reset();
                app.menu_selection = 0;
                app.load_menu();
            }
            KeyCode::Char('s') => {
                app.sort_ascending = !app.sort_ascending;
                app.menu_pager.reset();
                app.menu_selection = 0;
                app.load_menu();
            }
            KeyCode::Enter | KeyCode::Char('a') => app.add_selected_to_cart(),
            KeyCode::Char('o') => app.start_checkout(),
            _ => {}
        },
        Tab::Orders => {}
        Tab::Profile => {
            if key.code == KeyCode::Char('l') {
                app.logout();
            }
        }
        Tab::Admin => match key.code {
            KeyCode::Char('v') => {
                app.admin_view = app.admin_view.toggle();
                app.on_tab_entered();
            }
            KeyCode::Char('s') if app.admin_view == AdminView::Orders => {
                app.start_status_update();
            }
            KeyCode::Char('d') if app.admin_view == AdminView::Orders => {
                app.request_delete_order();
            }
            KeyCode::Char('n') if app.admin_view == AdminView::Menu => {
                app.start_create_menu_item();
            }
            KeyCode::Char('e') if app.admin_view == AdminView::Menu => {
                app.start_edit_menu_item();
            }
            KeyCode::Char('d') if app.admin_view == AdminView::Menu => {
                app.request_delete_menu_item();
            }
            _ => {}
        },
    }
}

async fn handle_auth_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // With no session there is nothing behind the overlay
            if app.is_authenticated() {
                app.state = AppState::Normal;
            } else {
                app.state = AppState::ConfirmingQuit;
            }
        }
        KeyCode::F(2) => {
            app.auth_mode = match app.auth_mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            };
            app.auth_focus = match app.auth_mode {
                AuthMode::Login => AuthFocus::Email,
                AuthMode::Register => AuthFocus::Name,
            };
            app.auth_error = None;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.auth_focus = app.auth_focus.next(app.auth_mode);
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.auth_focus = app.auth_focus.prev(app.auth_mode);
        }
        KeyCode::Enter => {
            if app.auth_focus == AuthFocus::Submit {
                match app.auth_mode {
                    AuthMode::Login => app.attempt_login().await,
                    AuthMode::Register => app.attempt_register().await,
                }
            } else {
                app.auth_focus = app.auth_focus.next(app.auth_mode);
            }
        }
        KeyCode::Backspace => app.auth_pop_char(),
        KeyCode::Char(c) => app.auth_push_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_menu_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.menu_form.focus = app.menu_form.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.menu_form.focus = app.menu_form.focus.prev();
        }
        KeyCode::Enter => {
            if app.menu_form.focus == MenuFormFocus::Submit {
                app.submit_menu_form();
            } else {
                app.menu_form.focus = app.menu_form.focus.next();
            }
        }
        KeyCode::Char(' ') if app.menu_form.focus == MenuFormFocus::Available => {
            app.menu_form.available = !app.menu_form.available;
        }
        KeyCode::Backspace => app.pop_input_char(),
        KeyCode::Char(c) => app.push_input_char(c),
        _ => {}
    }
}
