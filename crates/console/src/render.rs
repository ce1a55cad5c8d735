//! Plain-text rendering of the console screen.

use std::fmt::Write as _;

use common::types::MenuItem;

use crate::draft::CURRENCY_PRESETS;
use crate::state::{Screen, Tab, Workspace};

pub fn render(screen: &Screen) -> String {
    match screen {
        Screen::LoggedOut { login_error } => {
            let mut out = String::from("== Restaurant Admin Login ==\n");
            if let Some(err) = login_error {
                let _ = writeln!(out, "! {err}");
            }
            out.push_str("login <username> <password>\n");
            out
        }
        Screen::LoggedIn(ws) => render_workspace(ws),
    }
}

fn image_marker(data: &Option<String>) -> &'static str {
    if data.is_some() { "[image]" } else { "[no image]" }
}

fn render_item(out: &mut String, position: usize, item: &MenuItem) {
    let _ = writeln!(
        out,
        "{position:>3}. {}  {} {}  {}",
        item.title,
        item.price,
        item.currency,
        image_marker(&item.image_data)
    );
    if !item.description.is_empty() {
        let _ = writeln!(out, "     {}", item.description);
    }
    if !item.ingredients.is_empty() {
        let _ = writeln!(out, "     Ingredients: {}", item.ingredients);
    }
}

fn render_workspace(ws: &Workspace) -> String {
    let mut out = String::new();
    let (name, logo) = ws
        .cache
        .settings()
        .map(|s| (s.name.as_str(), image_marker(&s.logo_data)))
        .unwrap_or(("", "[no logo]"));
    let title = if name.is_empty() { "Restaurant Admin" } else { name };
    let _ = writeln!(out, "== {title} == {logo}  (logged in as {})", ws.username);

    let add_label = if ws.editing.is_some() { "Editing Item" } else { "Add New Item" };
    let (menu_mark, add_mark) = match ws.tab {
        Tab::Menu => ("*", " "),
        Tab::Add => (" ", "*"),
    };
    let _ = writeln!(out, "[{menu_mark}] Existing Menu   [{add_mark}] {add_label}");

    if let Some(notice) = &ws.notice {
        let _ = writeln!(out, "! {notice}");
    }
    if let Some(message) = &ws.message {
        let _ = writeln!(out, "> {message}");
    }

    match ws.tab {
        Tab::Menu => match ws.cache.menu() {
            None => out.push_str("(menu not loaded; try `refresh`)\n"),
            Some([]) => out.push_str("(no menu items yet)\n"),
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    render_item(&mut out, i + 1, item);
                }
            }
        },
        Tab::Add => {
            let d = &ws.draft;
            let _ = writeln!(out, "  title:       {}", d.title);
            let _ = writeln!(out, "  description: {}", d.description);
            let _ = writeln!(out, "  ingredients: {}", d.ingredients);
            let _ = writeln!(out, "  price:       {}", d.price);
            let _ = writeln!(out, "  currency:    {}  ({})", d.currency, CURRENCY_PRESETS.join("/"));
            let _ = writeln!(out, "  image:       {}", image_marker(&d.image_data));
            let action = if ws.editing.is_some() { "Update Item" } else { "Add Item" };
            let _ = writeln!(out, "`submit` to {action}, `cancel-edit` to clear");
        }
    }

    if let Some(id) = ws.pending_delete {
        let title = ws
            .cache
            .menu()
            .and_then(|items| items.iter().find(|i| i.id == id))
            .map(|i| i.title.as_str())
            .unwrap_or("this item");
        let _ = writeln!(out, "? Delete \"{title}\"? `confirm` or `cancel`");
    }
    out
}
