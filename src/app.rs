//! Application state management for Foodcourt.
//!
//! This module contains the core `App` struct that owns all page-scoped
//! state: the session, the API client, the cart, the menu catalog, and the
//! pager/selection state of every list view. Network calls run as spawned
//! tasks and report back through an MPSC channel so the UI never blocks.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::{CredentialStore, Session, SessionData};
use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::{CategoryFilter, MenuItem, MenuQuery, NewMenuItem, Order, UserProfile};
use crate::pager::Pager;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Menu grid page size (server-side paging).
pub const MENU_PAGE_SIZE: u64 = 5;

/// Order history page size (client-side slicing).
pub const ORDERS_PAGE_SIZE: u64 = 4;

/// Admin order list page size (client-side slicing).
pub const ADMIN_ORDERS_PAGE_SIZE: u64 = 5;

/// Maximum length for text inputs in forms.
const MAX_INPUT_LENGTH: usize = 128;

/// Maximum length for the search box.
const MAX_SEARCH_LENGTH: usize = 50;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Menu,
    Orders,
    Profile,
    Admin,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Menu => "Menu",
            Tab::Orders => "Orders",
            Tab::Profile => "Profile",
            Tab::Admin => "Admin",
        }
    }

    /// Get the next tab, wrapping around. The admin tab is skipped for
    /// non-admin accounts.
    pub fn next(&self, is_admin: bool) -> Self {
        match self {
            Tab::Menu => Tab::Orders,
            Tab::Orders => Tab::Profile,
            Tab::Profile => {
                if is_admin {
                    Tab::Admin
                } else {
                    Tab::Menu
                }
            }
            Tab::Admin => Tab::Menu,
        }
    }

    /// Get the previous tab, wrapping around.
    pub fn prev(&self, is_admin: bool) -> Self {
        match self {
            Tab::Menu => {
                if is_admin {
                    Tab::Admin
                } else {
                    Tab::Profile
                }
            }
            Tab::Orders => Tab::Menu,
            Tab::Profile => Tab::Orders,
            Tab::Admin => Tab::Profile,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    LoggingIn,
    ConfirmingCheckout,
    ConfirmingDeleteOrder,
    ConfirmingDeleteMenuItem,
    EditingStatus,
    EditingMenuItem,
    ConfirmingQuit,
    Quitting,
}

/// Which auth form the login overlay shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Auth form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    Name,
    Email,
    Password,
    Confirm,
    Submit,
}

impl AuthFocus {
    /// Cycle forward through the fields the current mode shows.
    pub fn next(&self, mode: AuthMode) -> Self {
        match mode {
            AuthMode::Login => match self {
                AuthFocus::Email => AuthFocus::Password,
                AuthFocus::Password => AuthFocus::Submit,
                _ => AuthFocus::Email,
            },
            AuthMode::Register => match self {
                AuthFocus::Name => AuthFocus::Email,
                AuthFocus::Email => AuthFocus::Password,
                AuthFocus::Password => AuthFocus::Confirm,
                AuthFocus::Confirm => AuthFocus::Submit,
                AuthFocus::Submit => AuthFocus::Name,
            },
        }
    }

    /// Cycle backward through the fields the current mode shows.
    pub fn prev(&self, mode: AuthMode) -> Self {
        match mode {
            AuthMode::Login => match self {
                AuthFocus::Password => AuthFocus::Email,
                AuthFocus::Submit => AuthFocus::Password,
                _ => AuthFocus::Submit,
            },
            AuthMode::Register => match self {
                AuthFocus::Name => AuthFocus::Submit,
                AuthFocus::Email => AuthFocus::Name,
                AuthFocus::Password => AuthFocus::Email,
                AuthFocus::Confirm => AuthFocus::Password,
                AuthFocus::Submit => AuthFocus::Confirm,
            },
        }
    }
}

/// Admin panel sub-view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminView {
    Orders,
    Menu,
}

impl AdminView {
    pub fn toggle(&self) -> Self {
        match self {
            AdminView::Orders => AdminView::Menu,
            AdminView::Menu => AdminView::Orders,
        }
    }
}

/// Observable state of a list view. A failed fetch returns to `Loaded`
/// with the previous data intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    Loading,
    #[default]
    Loaded,
}

/// Menu item form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuFormFocus {
    #[default]
    Name,
    Price,
    Category,
    Description,
    ImageUrl,
    Available,
    Submit,
}

impl MenuFormFocus {
    pub fn next(&self) -> Self {
        match self {
            MenuFormFocus::Name => MenuFormFocus::Price,
            MenuFormFocus::Price => MenuFormFocus::Category,
            MenuFormFocus::Category => MenuFormFocus::Description,
            MenuFormFocus::Description => MenuFormFocus::ImageUrl,
            MenuFormFocus::ImageUrl => MenuFormFocus::Available,
            MenuFormFocus::Available => MenuFormFocus::Submit,
            MenuFormFocus::Submit => MenuFormFocus::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            MenuFormFocus::Name => MenuFormFocus::Submit,
            MenuFormFocus::Price => MenuFormFocus::Name,
            MenuFormFocus::Category => MenuFormFocus::Price,
            MenuFormFocus::Description => MenuFormFocus::Category,
            MenuFormFocus::ImageUrl => MenuFormFocus::Description,
            MenuFormFocus::Available => MenuFormFocus::ImageUrl,
            MenuFormFocus::Submit => MenuFormFocus::Available,
        }
    }
}

/// The admin create/edit menu item form. Fields are raw text until
/// submission; validation is limited to required-field presence and
/// decimal parsing of the price.
#[derive(Debug, Clone, Default)]
pub struct MenuForm {
    /// `Some(id)` when editing an existing item, `None` when creating.
    pub id: Option<String>,
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    pub available: bool,
    pub focus: MenuFormFocus,
    pub error: Option<String>,
}

impl MenuForm {
    pub fn for_new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    pub fn for_edit(item: &MenuItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            price: item.price.to_string(),
            category: item.category.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            available: item.available,
            focus: MenuFormFocus::default(),
            error: None,
        }
    }

    /// The text field currently focused, if any.
    pub fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            MenuFormFocus::Name => Some(&mut self.name),
            MenuFormFocus::Price => Some(&mut self.price),
            MenuFormFocus::Category => Some(&mut self.category),
            MenuFormFocus::Description => Some(&mut self.description),
            MenuFormFocus::ImageUrl => Some(&mut self.image_url),
            MenuFormFocus::Available | MenuFormFocus::Submit => None,
        }
    }

    /// Validate and build the submission payload.
    pub fn validate(&self) -> Result<NewMenuItem, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.price.trim().is_empty() {
            return Err("Price is required".to_string());
        }
        let price = self
            .price
            .trim()
            .parse()
            .map_err(|_| "Price must be a number".to_string())?;
        if self.category.trim().is_empty() {
            return Err("Category is required".to_string());
        }

        Ok(NewMenuItem {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            category: self.category.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            available: self.available,
        })
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from background fetch tasks back to the main loop.
///
/// List results carry the sequence number of the request that produced
/// them; a result whose sequence has been superseded is discarded so the
/// render always reflects the latest user intent.
enum FetchResult {
    MenuPage {
        seq: u64,
        items: Vec<MenuItem>,
        total: u64,
    },
    Orders {
        seq: u64,
        orders: Vec<Order>,
        items: Vec<MenuItem>,
    },
    AdminOrders {
        seq: u64,
        orders: Vec<Order>,
        items: Vec<MenuItem>,
    },
    AdminMenu {
        seq: u64,
        items: Vec<MenuItem>,
    },
    Profile(UserProfile),
    OrderPlaced {
        order_id: String,
    },
    /// A menu mutation succeeded; reload the admin menu list.
    MenuMutated {
        message: String,
    },
    /// An order mutation succeeded; reload the admin order list.
    OrderMutated {
        message: String,
    },
    /// The backend rejected the token.
    AuthExpired,
    /// Any other failure; prior view state is retained.
    Error(String),
}

/// Collect the distinct menu item ids referenced by a batch of orders,
/// preserving first-seen order.
fn unique_item_ids(orders: &[Order]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut ids = Vec::new();
    for order in orders {
        for id in &order.item_ids {
            if seen.insert(id.clone()) {
                ids.push(id.clone());
            }
        }
    }
    ids
}

/// Map a request error to the result the main loop should see.
fn error_result(err: anyhow::Error) -> FetchResult {
    if err
        .downcast_ref::<ApiError>()
        .map(ApiError::is_auth)
        .unwrap_or(false)
    {
        FetchResult::AuthExpired
    } else {
        FetchResult::Error(err.to_string())
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container. Constructed once at startup; all
/// page-scoped state lives here rather than in globals.
pub struct App {
    // Core services
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,

    // UI state
    pub state: AppState,
    pub current_tab: Tab,
    pub status_message: Option<String>,

    // Auth form state
    pub auth_mode: AuthMode,
    pub auth_focus: AuthFocus,
    pub auth_name: String,
    pub auth_email: String,
    pub auth_password: String,
    pub auth_confirm: String,
    pub auth_error: Option<String>,

    // Profile
    pub profile: UserProfile,

    // Menu tab
    pub menu_items: Vec<MenuItem>,
    pub menu_pager: Pager,
    pub menu_phase: LoadPhase,
    pub menu_selection: usize,
    pub search_query: String,
    pub category_filter: CategoryFilter,
    pub sort_ascending: bool,
    menu_seq: u64,

    // Cart
    pub cart: Cart,

    // Orders tab (own history)
    pub orders: Vec<Order>,
    pub orders_pager: Pager,
    pub orders_phase: LoadPhase,
    pub orders_selection: usize,
    pub catalog: Catalog,
    orders_seq: u64,

    // Admin tab
    pub admin_view: AdminView,
    pub admin_orders: Vec<Order>,
    pub admin_orders_pager: Pager,
    pub admin_orders_phase: LoadPhase,
    pub admin_orders_selection: usize,
    pub admin_catalog: Catalog,
    admin_orders_seq: u64,
    pub admin_menu: Vec<MenuItem>,
    pub admin_menu_phase: LoadPhase,
    pub admin_menu_selection: usize,
    admin_menu_seq: u64,

    // Forms and pending confirmations
    pub menu_form: MenuForm,
    pub status_input: String,
    pub pending_status_order: Option<String>,
    pub pending_delete_order: Option<String>,
    pub pending_delete_item: Option<String>,

    // Background task channel
    fetch_rx: mpsc::Receiver<FetchResult>,
    fetch_tx: mpsc::Sender<FetchResult>,
}

impl App {
    /// Create a new application instance, loading any saved session.
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = config
            .data_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("./data"));

        let mut session = Session::new(data_dir);
        if let Err(e) = session.load() {
            warn!(error = %e, "Failed to load session, starting logged out");
        }

        let mut api = ApiClient::new(config.base_url.clone())?;
        if let Some(token) = session.token() {
            api.set_token(token.to_string());
            debug!("Token restored from saved session");
        }

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Prefill the login form from env vars, the config, or the keychain
        let auth_email = std::env::var("FOODCOURT_EMAIL")
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();

        let auth_password = std::env::var("FOODCOURT_PASSWORD")
            .ok()
            .or_else(|| {
                if auth_email.is_empty() {
                    None
                } else {
                    CredentialStore::get_password(&auth_email).ok()
                }
            })
            .unwrap_or_default();

        Ok(Self {
            config,
            session,
            api,

            state: AppState::Normal,
            current_tab: Tab::Menu,
            status_message: None,

            auth_mode: AuthMode::Login,
            auth_focus: AuthFocus::Email,
            auth_name: String::new(),
            auth_email,
            auth_password,
            auth_confirm: String::new(),
            auth_error: None,

            profile: UserProfile::default(),

            menu_items: Vec::new(),
            menu_pager: Pager::new(MENU_PAGE_SIZE),
            menu_phase: LoadPhase::default(),
            menu_selection: 0,
            search_query: String::new(),
            category_filter: CategoryFilter::default(),
            sort_ascending: true,
            menu_seq: 0,

            cart: Cart::new(),

            orders: Vec::new(),
            orders_pager: Pager::new(ORDERS_PAGE_SIZE),
            orders_phase: LoadPhase::default(),
            orders_selection: 0,
            catalog: Catalog::new(),
            orders_seq: 0,

            admin_view: AdminView::Orders,
            admin_orders: Vec::new(),
            admin_orders_pager: Pager::new(ADMIN_ORDERS_PAGE_SIZE),
            admin_orders_phase: LoadPhase::default(),
            admin_orders_selection: 0,
            admin_catalog: Catalog::new(),
            admin_orders_seq: 0,
            admin_menu: Vec::new(),
            admin_menu_phase: LoadPhase::default(),
            admin_menu_selection: 0,
            admin_menu_seq: 0,

            menu_form: MenuForm::default(),
            status_input: String::new(),
            pending_status_order: None,
            pending_delete_order: None,
            pending_delete_item: None,

            fetch_rx: rx,
            fetch_tx: tx,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_valid()
    }

    /// Show the login overlay.
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.auth_mode = AuthMode::Login;
        self.auth_focus = if self.auth_email.is_empty() {
            AuthFocus::Email
        } else {
            AuthFocus::Password
        };
        self.auth_error = None;
    }

    /// Attempt login with the credentials from the auth form.
    pub async fn attempt_login(&mut self) {
        let email = self.auth_email.trim().to_string();
        let password = self.auth_password.clone();

        if email.is_empty() || password.is_empty() {
            self.auth_error = Some("Email and password required".to_string());
            return;
        }

        self.auth_error = None;

        match self.api.login(&email, &password).await {
            Ok(response) => {
                if let Err(e) = CredentialStore::store(&email, &password) {
                    warn!(error = %e, "Failed to store credentials");
                }

                self.config.last_email = Some(email.clone());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.session.update(SessionData {
                    token: response.token.clone(),
                    user_id: response.user_id,
                    email,
                });
                if let Err(e) = self.session.save() {
                    warn!(error = %e, "Failed to save session");
                }

                self.api.set_token(response.token);
                self.auth_password.clear();
                self.state = AppState::Normal;
                info!("Login successful");
                self.bootstrap();
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.auth_error = Some(format!("Login failed: {}", e));
            }
        }
    }

    /// Attempt registration with the fields from the auth form. On success
    /// the overlay flips back to login with the email kept.
    pub async fn attempt_register(&mut self) {
        let name = self.auth_name.trim().to_string();
        let email = self.auth_email.trim().to_string();
        let password = self.auth_password.clone();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            self.auth_error = Some("All fields are required".to_string());
            return;
        }
        if password != self.auth_confirm {
            self.auth_error = Some("Passwords do not match".to_string());
            return;
        }

        self.auth_error = None;

        match self.api.register(&name, &email, &password).await {
            Ok(_) => {
                info!("Registration successful");
                self.auth_mode = AuthMode::Login;
                self.auth_focus = AuthFocus::Password;
                self.auth_confirm.clear();
                self.status_message =
                    Some("Registration successful! Please log in.".to_string());
            }
            Err(e) => {
                error!(error = %e, "Registration failed");
                self.auth_error = Some(format!("Registration failed: {}", e));
            }
        }
    }

    /// Log out: drop the session and all account-scoped state, then show
    /// the login overlay.
    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session file");
        }
        self.api.clear_token();
        self.cart.clear();
        self.orders.clear();
        self.admin_orders.clear();
        self.admin_menu.clear();
        self.profile = UserProfile::default();
        self.current_tab = Tab::Menu;
        self.status_message = None;
        self.start_login();
        info!("Logged out");
    }

    /// Initial loads after startup or login.
    pub fn bootstrap(&mut self) {
        self.fetch_profile_background();
        self.load_menu();
    }

    /// Reload the data behind a tab when the user switches to it. Lists
    /// are repopulated per visit; the staleness window is one page view.
    pub fn on_tab_entered(&mut self) {
        match self.current_tab {
            Tab::Menu => self.load_menu(),
            Tab::Orders => self.load_orders(),
            Tab::Profile => self.fetch_profile_background(),
            Tab::Admin => match self.admin_view {
                AdminView::Orders => self.load_admin_orders(),
                AdminView::Menu => self.load_admin_menu(),
            },
        }
    }

    // =========================================================================
    // Background Loads
    // =========================================================================

    async fn send(tx: &mpsc::Sender<FetchResult>, result: FetchResult) {
        if tx.send(result).await.is_err() {
            error!("Failed to send fetch result - channel closed");
        }
    }

    fn fetch_profile_background(&self) {
        let Some(user_id) = self.session.user_id().map(String::from) else {
            return;
        };
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            match api.fetch_profile(&user_id).await {
                Ok(profile) => Self::send(&tx, FetchResult::Profile(profile)).await,
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    /// Issue a menu search for the current page, search term, category,
    /// and sort direction.
    pub fn load_menu(&mut self) {
        self.menu_seq += 1;
        let seq = self.menu_seq;
        self.menu_phase = LoadPhase::Loading;

        let query = MenuQuery {
            limit: self.menu_pager.page_size(),
            skip: self.menu_pager.skip(),
            search: self.search_query.trim().to_string(),
            category: self.category_filter.as_str().to_string(),
            sort_by: "price".to_string(),
            sort_asc: self.sort_ascending,
        };

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            match api.search_menu(&query).await {
                Ok(page) => {
                    Self::send(
                        &tx,
                        FetchResult::MenuPage {
                            seq,
                            items: page.items,
                            total: page.total_count,
                        },
                    )
                    .await
                }
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    /// Fetch the user's order history plus the catalog entries its item
    /// ids reference. A failed batch lookup degrades to an empty catalog;
    /// rendering falls back to raw ids.
    pub fn load_orders(&mut self) {
        let Some(user_id) = self.session.user_id().map(String::from) else {
            return;
        };

        self.orders_seq += 1;
        let seq = self.orders_seq;
        self.orders_phase = LoadPhase::Loading;

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            match api.list_user_orders(&user_id).await {
                Ok(orders) => {
                    let ids = unique_item_ids(&orders);
                    let items = match api.fetch_menu_items(&ids).await {
                        Ok(items) => items,
                        Err(e) => {
                            warn!(error = %e, "Batch item lookup failed, showing raw ids");
                            Vec::new()
                        }
                    };
                    Self::send(&tx, FetchResult::Orders { seq, orders, items }).await;
                }
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    /// Fetch every order in the system (admin).
    pub fn load_admin_orders(&mut self) {
        self.admin_orders_seq += 1;
        let seq = self.admin_orders_seq;
        self.admin_orders_phase = LoadPhase::Loading;

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            match api.list_orders().await {
                Ok(orders) => {
                    let ids = unique_item_ids(&orders);
                    let items = match api.fetch_menu_items(&ids).await {
                        Ok(items) => items,
                        Err(e) => {
                            warn!(error = %e, "Batch item lookup failed, showing raw ids");
                            Vec::new()
                        }
                    };
                    Self::send(&tx, FetchResult::AdminOrders { seq, orders, items }).await;
                }
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    /// Fetch the full menu list (admin).
    pub fn load_admin_menu(&mut self) {
        self.admin_menu_seq += 1;
        let seq = self.admin_menu_seq;
        self.admin_menu_phase = LoadPhase::Loading;

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            match api.list_menu().await {
                Ok(items) => Self::send(&tx, FetchResult::AdminMenu { seq, items }).await,
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    // =========================================================================
    // Cart & Checkout
    // =========================================================================

    /// Add the currently selected menu item to the cart.
    pub fn add_selected_to_cart(&mut self) {
        if let Some(item) = self.menu_items.get(self.menu_selection) {
            let name = item.name.clone();
            self.cart.add(item.clone());
            self.status_message = Some(format!("Added {} to cart", name));
        }
    }

    /// Open the checkout confirmation if there is anything to order.
    pub fn start_checkout(&mut self) {
        if self.cart.is_empty() {
            self.status_message = Some("Cart is empty.".to_string());
        } else {
            self.state = AppState::ConfirmingCheckout;
        }
    }

    /// Submit the cart as an order. Only item ids are sent; the cart is
    /// cleared when (and only when) the backend confirms, so a failure
    /// leaves it intact for retry.
    pub fn submit_order(&mut self) {
        let Some(user_id) = self.session.user_id().map(String::from) else {
            self.status_message = Some("Not logged in.".to_string());
            return;
        };

        let item_ids = self.cart.item_ids();
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        self.state = AppState::Normal;
        self.status_message = Some("Placing order...".to_string());

        tokio::spawn(async move {
            match api.place_order(&user_id, item_ids).await {
                Ok(order_id) => Self::send(&tx, FetchResult::OrderPlaced { order_id }).await,
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    // =========================================================================
    // Admin Mutations
    // =========================================================================

    /// Open the create form.
    pub fn start_create_menu_item(&mut self) {
        self.menu_form = MenuForm::for_new();
        self.state = AppState::EditingMenuItem;
    }

    /// Open the edit form for the selected admin menu item.
    pub fn start_edit_menu_item(&mut self) {
        if let Some(item) = self.admin_menu.get(self.admin_menu_selection) {
            self.menu_form = MenuForm::for_edit(item);
            self.state = AppState::EditingMenuItem;
        }
    }

    /// Validate and submit the menu item form. A validation failure stays
    /// inline in the form; nothing is sent.
    pub fn submit_menu_form(&mut self) {
        let payload = match self.menu_form.validate() {
            Ok(payload) => payload,
            Err(msg) => {
                self.menu_form.error = Some(msg);
                return;
            }
        };

        let id = self.menu_form.id.clone();
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        self.state = AppState::Normal;
        self.status_message = Some("Saving menu item...".to_string());

        tokio::spawn(async move {
            let result = match id {
                Some(id) => api
                    .update_menu_item(&id, &payload)
                    .await
                    .map(|_| "Menu item updated".to_string()),
                None => api
                    .create_menu_item(&payload)
                    .await
                    .map(|_| "Menu item added".to_string()),
            };
            match result {
                Ok(message) => Self::send(&tx, FetchResult::MenuMutated { message }).await,
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    /// Ask for confirmation before deleting the selected menu item.
    pub fn request_delete_menu_item(&mut self) {
        if let Some(item) = self.admin_menu.get(self.admin_menu_selection) {
            self.pending_delete_item = Some(item.id.clone());
            self.state = AppState::ConfirmingDeleteMenuItem;
        }
    }

    /// Confirmation accepted: issue the delete.
    pub fn confirm_delete_menu_item(&mut self) {
        let Some(id) = self.pending_delete_item.take() else {
            self.state = AppState::Normal;
            return;
        };
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        self.state = AppState::Normal;

        tokio::spawn(async move {
            match api.delete_menu_item(&id).await {
                Ok(()) => {
                    Self::send(
                        &tx,
                        FetchResult::MenuMutated {
                            message: "Menu item deleted".to_string(),
                        },
                    )
                    .await
                }
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    /// Confirmation declined: no request is sent.
    pub fn decline_pending_delete(&mut self) {
        self.pending_delete_item = None;
        self.pending_delete_order = None;
        self.state = AppState::Normal;
    }

    /// Ask for confirmation before deleting the selected order.
    pub fn request_delete_order(&mut self) {
        let id = self.selected_admin_order().map(|order| order.id.clone());
        if let Some(id) = id {
            self.pending_delete_order = Some(id);
            self.state = AppState::ConfirmingDeleteOrder;
        }
    }

    /// Confirmation accepted: issue the delete.
    pub fn confirm_delete_order(&mut self) {
        let Some(id) = self.pending_delete_order.take() else {
            self.state = AppState::Normal;
            return;
        };
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        self.state = AppState::Normal;

        tokio::spawn(async move {
            match api.delete_order(&id).await {
                Ok(()) => {
                    Self::send(
                        &tx,
                        FetchResult::OrderMutated {
                            message: "Order deleted".to_string(),
                        },
                    )
                    .await
                }
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    /// Open the status input for the selected order, prefilled like the
    /// original prompt. The status is free text; the server contract is
    /// the authority on accepted values.
    pub fn start_status_update(&mut self) {
        let id = self.selected_admin_order().map(|order| order.id.clone());
        if let Some(id) = id {
            self.pending_status_order = Some(id);
            self.status_input = "Pending".to_string();
            self.state = AppState::EditingStatus;
        }
    }

    /// Submit the status input. An empty input cancels without a request.
    pub fn submit_status_update(&mut self) {
        let Some(id) = self.pending_status_order.take() else {
            self.state = AppState::Normal;
            return;
        };
        let status = self.status_input.trim().to_string();
        self.state = AppState::Normal;
        if status.is_empty() {
            return;
        }

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            match api.update_order_status(&id, &status).await {
                Ok(()) => {
                    Self::send(
                        &tx,
                        FetchResult::OrderMutated {
                            message: "Order updated".to_string(),
                        },
                    )
                    .await
                }
                Err(e) => Self::send(&tx, error_result(e)).await,
            }
        });
    }

    // =========================================================================
    // Selection & Slicing Helpers
    // =========================================================================

    pub fn selected_menu_item(&self) -> Option<&MenuItem> {
        self.menu_items.get(self.menu_selection)
    }

    pub fn visible_orders(&self) -> &[Order] {
        self.orders_pager.visible_slice(&self.orders)
    }

    pub fn visible_admin_orders(&self) -> &[Order] {
        self.admin_orders_pager.visible_slice(&self.admin_orders)
    }

    pub fn selected_admin_order(&self) -> Option<&Order> {
        self.visible_admin_orders().get(self.admin_orders_selection)
    }

    /// The auth form field currently focused, if it is a text field.
    pub fn auth_field_mut(&mut self) -> Option<&mut String> {
        match self.auth_focus {
            AuthFocus::Name => Some(&mut self.auth_name),
            AuthFocus::Email => Some(&mut self.auth_email),
            AuthFocus::Password => Some(&mut self.auth_password),
            AuthFocus::Confirm => Some(&mut self.auth_confirm),
            AuthFocus::Submit => None,
        }
    }

    /// Push a character into the focused auth form field.
    pub fn auth_push_char(&mut self, c: char) {
        if let Some(field) = self.auth_field_mut() {
            if field.len() < MAX_INPUT_LENGTH {
                field.push(c);
            }
        }
    }

    /// Remove the last character from the focused auth form field.
    pub fn auth_pop_char(&mut self) {
        if let Some(field) = self.auth_field_mut() {
            field.pop();
        }
    }

    /// Push a character into whatever text input currently has focus.
    pub fn push_input_char(&mut self, c: char) {
        match self.state {
            AppState::Searching => {
                if self.search_query.len() < MAX_SEARCH_LENGTH {
                    self.search_query.push(c);
                    self.menu_pager.reset();
                    self.load_menu();
                }
            }
            AppState::EditingStatus => {
                if self.status_input.len() < MAX_INPUT_LENGTH {
                    self.status_input.push(c);
                }
            }
            AppState::EditingMenuItem => {
                if let Some(field) = self.menu_form.focused_field_mut() {
                    if field.len() < MAX_INPUT_LENGTH {
                        field.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    /// Remove the last character from the focused text input.
    pub fn pop_input_char(&mut self) {
        match self.state {
            AppState::Searching => {
                if self.search_query.pop().is_some() {
                    self.menu_pager.reset();
                    self.load_menu();
                }
            }
            AppState::EditingStatus => {
                self.status_input.pop();
            }
            AppState::EditingMenuItem => {
                if let Some(field) = self.menu_form.focused_field_mut() {
                    field.pop();
                }
            }
            _ => {}
        }
    }

    // =========================================================================
    // Background Task Processing
    // =========================================================================

    /// Drain and apply all pending background results.
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.fetch_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.apply_fetch_result(result);
        }
    }

    fn apply_fetch_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::MenuPage { seq, items, total } => {
                if seq != self.menu_seq {
                    debug!(seq, latest = self.menu_seq, "Discarding stale menu response");
                    return;
                }
                self.menu_pager.set_total(total);
                self.menu_items = items;
                self.menu_selection = self
                    .menu_selection
                    .min(self.menu_items.len().saturating_sub(1));
                self.menu_phase = LoadPhase::Loaded;
            }
            FetchResult::Orders { seq, orders, items } => {
                if seq != self.orders_seq {
                    debug!(seq, latest = self.orders_seq, "Discarding stale orders response");
                    return;
                }
                self.catalog.rebuild(items);
                self.orders_pager.set_total(orders.len() as u64);
                self.orders = orders;
                self.orders_selection = 0;
                self.orders_phase = LoadPhase::Loaded;
            }
            FetchResult::AdminOrders { seq, orders, items } => {
                if seq != self.admin_orders_seq {
                    debug!(seq, latest = self.admin_orders_seq, "Discarding stale admin orders response");
                    return;
                }
                self.admin_catalog.rebuild(items);
                self.admin_orders_pager.set_total(orders.len() as u64);
                self.admin_orders = orders;
                self.admin_orders_selection = 0;
                self.admin_orders_phase = LoadPhase::Loaded;
            }
            FetchResult::AdminMenu { seq, items } => {
                if seq != self.admin_menu_seq {
                    debug!(seq, latest = self.admin_menu_seq, "Discarding stale admin menu response");
                    return;
                }
                self.admin_menu = items;
                self.admin_menu_selection = self
                    .admin_menu_selection
                    .min(self.admin_menu.len().saturating_sub(1));
                self.admin_menu_phase = LoadPhase::Loaded;
            }
            FetchResult::Profile(profile) => {
                debug!(username = %profile.username, role = %profile.role, "Profile loaded");
                if !profile.is_admin() && self.current_tab == Tab::Admin {
                    self.current_tab = Tab::Menu;
                }
                self.profile = profile;
            }
            FetchResult::OrderPlaced { order_id } => {
                self.cart.clear();
                self.status_message = Some(format!("Order placed! Order ID: {}", order_id));
            }
            FetchResult::MenuMutated { message } => {
                self.status_message = Some(message);
                self.load_admin_menu();
            }
            FetchResult::OrderMutated { message } => {
                self.status_message = Some(message);
                self.load_admin_orders();
            }
            FetchResult::AuthExpired => {
                warn!("Backend rejected the session token");
                if let Err(e) = self.session.clear() {
                    warn!(error = %e, "Failed to clear session file");
                }
                self.api.clear_token();
                self.start_login();
                self.auth_error = Some("Session expired. Please log in again.".to_string());
            }
            FetchResult::Error(message) => {
                error!(error = %message, "Background task error");
                // Prior view state is retained; just surface the alert
                self.status_message = Some(format!("Error: {}", message));
                self.menu_phase = LoadPhase::Loaded;
                self.orders_phase = LoadPhase::Loaded;
                self.admin_orders_phase = LoadPhase::Loaded;
                self.admin_menu_phase = LoadPhase::Loaded;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, item_ids: &[&str]) -> Order {
        serde_json::from_str(&format!(
            r#"{{"id":"{}","item_ids":[{}]}}"#,
            id,
            item_ids
                .iter()
                .map(|i| format!(r#""{}""#, i))
                .collect::<Vec<_>>()
                .join(",")
        ))
        .unwrap()
    }

    #[test]
    fn test_unique_item_ids_dedupes_preserving_order() {
        let orders = vec![order("o1", &["m-2", "m-1"]), order("o2", &["m-1", "m-3"])];
        assert_eq!(unique_item_ids(&orders), vec!["m-2", "m-1", "m-3"]);
    }

    #[test]
    fn test_unique_item_ids_empty() {
        assert!(unique_item_ids(&[]).is_empty());
    }

    #[test]
    fn test_menu_form_validation() {
        let mut form = MenuForm::for_new();
        assert_eq!(form.validate().unwrap_err(), "Name is required");

        form.name = "Tiramisu".to_string();
        assert_eq!(form.validate().unwrap_err(), "Price is required");

        form.price = "abc".to_string();
        assert_eq!(form.validate().unwrap_err(), "Price must be a number");

        form.price = "6.50".to_string();
        assert_eq!(form.validate().unwrap_err(), "Category is required");

        form.category = "desserts".to_string();
        let payload = form.validate().unwrap();
        assert_eq!(payload.name, "Tiramisu");
        assert_eq!(payload.price, "6.50".parse::<rust_decimal::Decimal>().unwrap());
        assert!(payload.available);
    }

    #[test]
    fn test_tab_cycle_skips_admin_for_non_admins() {
        assert_eq!(Tab::Profile.next(false), Tab::Menu);
        assert_eq!(Tab::Profile.next(true), Tab::Admin);
        assert_eq!(Tab::Menu.prev(false), Tab::Profile);
        assert_eq!(Tab::Menu.prev(true), Tab::Admin);
    }

    #[test]
    fn test_auth_focus_cycle_per_mode() {
        // Login mode never lands on the register-only fields
        let mut focus = AuthFocus::Email;
        for _ in 0..6 {
            focus = focus.next(AuthMode::Login);
            assert!(!matches!(focus, AuthFocus::Name | AuthFocus::Confirm));
        }

        // Register mode cycles through all five stops
        let mut focus = AuthFocus::Name;
        for _ in 0..5 {
            focus = focus.next(AuthMode::Register);
        }
        assert_eq!(focus, AuthFocus::Name);
    }
}
