//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{CategorySummary, Secret, SecretSummary};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// "1 item is saved in the vault" / "3 items are saved in the vault"
pub fn secret_count_message(count: usize) -> String {
    if count == 1 {
        "1 item is saved in the vault".to_string()
    } else {
        format!("{count} items are saved in the vault")
    }
}

/// Print a table of secrets (Item, Category, Name / URL, Login).
pub fn print_secrets_table(secrets: &[SecretSummary]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Category", "Name / URL", "Login"]);

    for s in secrets {
        table.add_row(vec![
            s.index.to_string(),
            s.category.clone(),
            s.name.clone(),
            s.login.clone(),
        ]);
    }

    println!("{table}");
}

/// Print a table of active categories (Item, Category name).
pub fn print_categories_table(categories: &[CategorySummary]) {
    if categories.is_empty() {
        info("There are no categories yet.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Category name"]);

    for c in categories {
        table.add_row(vec![c.index.to_string(), c.name.clone()]);
    }

    println!("{table}");
}

/// Print one secret's fields.  The password is only shown when asked.
pub fn print_secret(secret: &Secret, category: &str, show_password: bool) {
    println!("* Category: {category}");
    println!("* Name / URL: {}", secret.name);
    println!("* Login: {}", secret.login);
    println!("* Notes: {}", secret.notes);
    if show_password {
        println!("* Password: {}", secret.password);
    }
}
