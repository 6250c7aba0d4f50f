//! The page shell: nav, home form, auth forms, history table.
//!
//! All markup is static in index.html; this module toggles sections by id,
//! fills text, and runs the async mock-API flows. State lives in one
//! `AppState` behind an `Rc<RefCell<_>>` shared by every handler.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use shortlink_core::{
    AttemptWindow, Credentials, QrMatrix, RegisterData, ShortenedUrl, User,
};

use crate::api;
use crate::dom::{self, Listener};
use crate::render;
use crate::storage;

const QR_CANVAS_PX: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    History,
    NotFound,
}

impl View {
    fn section_id(self) -> &'static str {
        match self {
            View::Home => "view-home",
            View::Login => "view-login",
            View::History => "view-history",
            View::NotFound => "view-404",
        }
    }

    const ALL: [View; 4] = [View::Home, View::Login, View::History, View::NotFound];
}

pub struct AppState {
    pub user: Option<User>,
    pub attempts: AttemptWindow,
    pub history: Vec<ShortenedUrl>,
    pub result: Option<ShortenedUrl>,
    pub view: View,
    pub busy: bool,
    pub show_qr: bool,
}

impl AppState {
    /// Restore the persisted user and attempt counter.
    pub fn load(now_ms: f64) -> Self {
        Self {
            user: storage::load_user(),
            attempts: storage::load_attempts(now_ms),
            history: Vec::new(),
            result: None,
            view: View::Home,
            busy: false,
            show_qr: false,
        }
    }
}

#[derive(Clone)]
pub struct UiContext {
    pub document: web::Document,
    pub state: Rc<RefCell<AppState>>,
}

/// Re-render everything derived from state: visible section, nav, home
/// widgets, button labels. Runs after every state change.
pub fn apply(ctx: &UiContext) {
    let state = ctx.state.borrow();
    let doc = &ctx.document;

    for view in View::ALL {
        dom::set_visible(doc, view.section_id(), state.view == view);
    }

    // Nav: History link and the user chip only exist when signed in.
    let signed_in = state.user.is_some();
    dom::set_visible(doc, "nav-history", signed_in);
    dom::set_visible(doc, "nav-user", signed_in);
    dom::set_visible(doc, "nav-logout", signed_in);
    dom::set_visible(doc, "nav-login", !signed_in);
    if let Some(user) = &state.user {
        dom::set_text(doc, "nav-user-name", &user.name);
    }

    // Home form.
    dom::set_text(
        doc,
        "shorten-btn",
        if state.busy { "Shortening..." } else { "Shorten" },
    );
    if signed_in {
        dom::hide(doc, "attempts-line");
    } else {
        dom::show(doc, "attempts-line");
        let remaining = state.attempts.remaining();
        let text = match remaining {
            0 => "Please login to continue shortening URLs".to_owned(),
            1 => "1 free attempt remaining".to_owned(),
            n => format!("{n} free attempts remaining"),
        };
        dom::set_text(doc, "attempts-line", &text);
    }

    // Result card with the QR badge.
    if let Some(result) = &state.result {
        dom::show(doc, "result-card");
        dom::set_link(doc, "short-url-link", &result.short_url);
        dom::set_text(
            doc,
            "qr-btn",
            if state.show_qr { "Hide QR Code" } else { "Show QR Code" },
        );
        dom::set_visible(doc, "qr-panel", state.show_qr);
        if state.show_qr {
            if let Some(canvas) = doc
                .get_element_by_id("qr-canvas")
                .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
            {
                render::draw_qr(&canvas, &QrMatrix::generate(&result.short_url), QR_CANVAS_PX);
            }
        }
    } else {
        dom::hide(doc, "result-card");
    }

    // Auth buttons.
    dom::set_text(
        doc,
        "login-btn",
        if state.busy { "Signing in..." } else { "Login" },
    );
    dom::set_text(
        doc,
        "register-btn",
        if state.busy { "Creating account..." } else { "Register" },
    );
}

fn set_view(ctx: &UiContext, view: View) {
    ctx.state.borrow_mut().view = view;
    apply(ctx);
}

/// Hook up every interactive element. Returned listeners own their
/// closures; dropping them detaches the UI.
pub fn wire(ctx: UiContext) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let doc = ctx.document.clone();

    let on_click = |listeners: &mut Vec<Listener>,
                    id: &str,
                    handler: Box<dyn FnMut(web::Event)>| {
        if let Some(el) = dom::element(&doc, id) {
            listeners.push(Listener::new(&el, "click", handler));
        } else {
            log::error!("[ui] missing element #{id}");
        }
    };

    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "nav-home", Box::new(move |_| set_view(&ctx, View::Home)));
    }
    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "nav-login", Box::new(move |_| set_view(&ctx, View::Login)));
    }
    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "nav-history", Box::new(move |_| open_history(&ctx)));
    }
    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "nav-logout", Box::new(move |_| logout(&ctx)));
    }
    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "go-home-btn", Box::new(move |_| set_view(&ctx, View::Home)));
    }
    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "shorten-btn", Box::new(move |_| submit_shorten(&ctx)));
    }
    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "copy-btn", Box::new(move |_| copy_short_url(&ctx)));
    }
    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "qr-btn", Box::new(move |_| toggle_qr(&ctx)));
    }
    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "login-btn", Box::new(move |_| submit_login(&ctx)));
    }
    {
        let ctx = ctx.clone();
        on_click(&mut listeners, "register-btn", Box::new(move |_| submit_register(&ctx)));
    }

    // Enter in the URL field submits like the button.
    if let Some(el) = dom::element(&doc, "url-input") {
        let ctx = ctx.clone();
        listeners.push(Listener::new(&el, "keydown", move |ev| {
            if let Some(key_ev) = ev.dyn_ref::<web::KeyboardEvent>() {
                if key_ev.key() == "Enter" {
                    submit_shorten(&ctx);
                }
            }
        }));
    }

    listeners
}

fn submit_shorten(ctx: &UiContext) {
    let url = dom::input_value(&ctx.document, "url-input");
    if url.trim().is_empty() {
        return;
    }
    dom::hide(&ctx.document, "url-error");

    {
        let mut state = ctx.state.borrow_mut();
        if state.busy {
            return;
        }
        // Anonymous usage burns an attempt whether or not the call succeeds.
        if state.user.is_none() {
            state.attempts = state.attempts.record(js_sys::Date::now());
            storage::save_attempts(&state.attempts);
            if state.attempts.exhausted() {
                log::info!("[limit] free attempts exhausted, routing to login");
                state.view = View::Login;
                drop(state);
                apply(ctx);
                return;
            }
        }
        state.busy = true;
    }
    apply(ctx);

    let ctx = ctx.clone();
    spawn_local(async move {
        match api::shorten_url(url).await {
            Ok(entry) => {
                {
                    let mut state = ctx.state.borrow_mut();
                    if state.user.is_some() {
                        state.history.insert(0, entry.clone());
                    }
                    state.result = Some(entry);
                    state.show_qr = false;
                    state.busy = false;
                }
                dom::set_input_value(&ctx.document, "url-input", "");
            }
            Err(e) => {
                log::error!("[api] shorten failed: {e}");
                ctx.state.borrow_mut().busy = false;
                dom::set_text(&ctx.document, "url-error", &e.to_string());
                dom::show(&ctx.document, "url-error");
            }
        }
        apply(&ctx);
    });
}

fn copy_short_url(ctx: &UiContext) {
    let Some(short_url) = ctx.state.borrow().result.as_ref().map(|r| r.short_url.clone())
    else {
        return;
    };
    let Some(window) = web::window() else {
        return;
    };
    let clipboard = window.navigator().clipboard();
    let ctx = ctx.clone();
    spawn_local(async move {
        match wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&short_url)).await {
            Ok(_) => {
                dom::set_text(&ctx.document, "copy-btn", "Copied!");
                api::sleep_ms(2000).await;
                dom::set_text(&ctx.document, "copy-btn", "Copy");
            }
            Err(e) => log::error!("[clipboard] copy failed: {e:?}"),
        }
    });
}

fn toggle_qr(ctx: &UiContext) {
    {
        let mut state = ctx.state.borrow_mut();
        state.show_qr = !state.show_qr;
    }
    apply(ctx);
}

fn open_history(ctx: &UiContext) {
    if ctx.state.borrow().user.is_none() {
        set_view(ctx, View::Login);
        return;
    }
    {
        let mut state = ctx.state.borrow_mut();
        state.view = View::History;
        state.busy = true;
    }
    apply(ctx);
    dom::show(&ctx.document, "history-loading");
    dom::hide(&ctx.document, "history-empty");

    let ctx = ctx.clone();
    spawn_local(async move {
        let rows = api::get_url_history().await;
        {
            // Session-local entries stay on top of the fetched rows.
            let mut state = ctx.state.borrow_mut();
            let mut merged: Vec<_> = state
                .history
                .iter()
                .filter(|e| !rows.iter().any(|r| r.short_code == e.short_code))
                .cloned()
                .collect();
            merged.extend(rows);
            state.history = merged;
            state.busy = false;
        }
        dom::hide(&ctx.document, "history-loading");
        render_history(&ctx);
        apply(&ctx);
    });
}

/// Rebuild the history table body from state.
fn render_history(ctx: &UiContext) {
    let doc = &ctx.document;
    let Some(tbody) = dom::element(doc, "history-rows") else {
        return;
    };
    tbody.set_inner_html("");

    let state = ctx.state.borrow();
    dom::set_visible(doc, "history-empty", state.history.is_empty());
    for entry in &state.history {
        if let Err(e) = append_history_row(doc, &tbody, entry) {
            log::error!("[ui] history row failed: {e:?}");
        }
    }
}

fn append_history_row(
    doc: &web::Document,
    tbody: &web::Element,
    entry: &ShortenedUrl,
) -> Result<(), JsValue> {
    let row = doc.create_element("tr")?;

    let short_cell = doc.create_element("td")?;
    let anchor = doc
        .create_element("a")?
        .dyn_into::<web::HtmlAnchorElement>()?;
    anchor.set_href(&entry.short_url);
    anchor.set_target("_blank");
    anchor.set_rel("noopener noreferrer");
    anchor.set_text_content(Some(&entry.short_url));
    short_cell.append_child(&anchor)?;
    row.append_child(&short_cell)?;

    let original_cell = doc.create_element("td")?;
    original_cell.set_text_content(Some(&entry.original_url));
    row.append_child(&original_cell)?;

    let created_cell = doc.create_element("td")?;
    let created = js_sys::Date::new(&JsValue::from_f64(entry.created_at_ms));
    created_cell.set_text_content(Some(&String::from(created.to_locale_date_string(
        "en-US",
        &JsValue::UNDEFINED,
    ))));
    row.append_child(&created_cell)?;

    let clicks_cell = doc.create_element("td")?;
    clicks_cell.set_text_content(Some(&entry.clicks.to_string()));
    row.append_child(&clicks_cell)?;

    tbody.append_child(&row)?;
    Ok(())
}

fn submit_login(ctx: &UiContext) {
    if ctx.state.borrow().busy {
        return;
    }
    let credentials = Credentials {
        email: dom::input_value(&ctx.document, "login-email"),
        password: dom::input_value(&ctx.document, "login-password"),
    };
    ctx.state.borrow_mut().busy = true;
    apply(ctx);
    dom::hide(&ctx.document, "auth-error");

    let ctx = ctx.clone();
    spawn_local(async move {
        match api::login(credentials).await {
            Ok(response) => finish_sign_in(&ctx, response.user),
            Err(e) => {
                log::error!("[auth] login failed: {e}");
                ctx.state.borrow_mut().busy = false;
                dom::set_text(&ctx.document, "auth-error", &e.to_string());
                dom::show(&ctx.document, "auth-error");
                apply(&ctx);
            }
        }
    });
}

fn submit_register(ctx: &UiContext) {
    if ctx.state.borrow().busy {
        return;
    }
    let data = RegisterData {
        name: dom::input_value(&ctx.document, "register-name"),
        email: dom::input_value(&ctx.document, "register-email"),
        password: dom::input_value(&ctx.document, "register-password"),
    };
    ctx.state.borrow_mut().busy = true;
    apply(ctx);
    dom::hide(&ctx.document, "auth-error");

    let ctx = ctx.clone();
    spawn_local(async move {
        match api::register(data).await {
            Ok(response) => finish_sign_in(&ctx, response.user),
            Err(e) => {
                log::error!("[auth] register failed: {e}");
                ctx.state.borrow_mut().busy = false;
                dom::set_text(&ctx.document, "auth-error", &e.to_string());
                dom::show(&ctx.document, "auth-error");
                apply(&ctx);
            }
        }
    });
}

/// Shared tail of login/register: persist the user, reset the anonymous
/// counter, and land on the home view.
fn finish_sign_in(ctx: &UiContext, user: User) {
    storage::save_user(&user);
    storage::clear_attempts();
    {
        let mut state = ctx.state.borrow_mut();
        state.user = Some(user);
        state.attempts = AttemptWindow::start(js_sys::Date::now());
        state.busy = false;
        state.view = View::Home;
    }
    for id in ["login-email", "login-password", "register-name", "register-email", "register-password"] {
        dom::set_input_value(&ctx.document, id, "");
    }
    apply(ctx);
}

fn logout(ctx: &UiContext) {
    storage::clear_user();
    {
        let mut state = ctx.state.borrow_mut();
        state.user = None;
        state.history.clear();
        state.view = View::Home;
    }
    log::info!("[auth] signed out");
    apply(ctx);
}
