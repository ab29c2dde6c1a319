use anyhow::Result;
use console::{Term, style};
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};

pub enum MenuChoice {
    Back,
    Index(usize),
}

/// Clears the screen and shows a selectable list. Esc or `q` goes back.
pub fn prompt_menu(prompt: &str, items: &[String], header: Option<&str>) -> Result<MenuChoice> {
    let term = Term::stdout();
    let _ = term.clear_screen();
    if let Some(h) = header {
        println!("{}", style(h).bold());
    }
    if items.is_empty() {
        println!("{prompt}");
        println!("(nothing here yet)");
        pause()?;
        return Ok(MenuChoice::Back);
    }

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{prompt} (Esc/q = back)"))
        .items(items)
        .default(0)
        .max_length(term_rows(&term))
        .interact_opt()?;
    Ok(match choice {
        Some(i) => MenuChoice::Index(i),
        None => MenuChoice::Back,
    })
}

/// Reads one non-empty line.
pub fn prompt_text(prompt: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_owned())
}

pub fn prompt_password(prompt: &str) -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?)
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

pub fn notify(message: &str) -> Result<()> {
    println!("{}", style(message).green());
    pause()
}

pub fn show_error(message: &str) -> Result<()> {
    println!("{}", style(message).red().bold());
    pause()
}

fn pause() -> Result<()> {
    println!("{}", style("Press any key to continue").dim());
    Term::stdout().read_key()?;
    Ok(())
}

fn term_rows(term: &Term) -> usize {
    let (rows, _cols) = term.size();
    // header + prompt + some breathing room
    usize::from(rows).saturating_sub(4).max(3)
}
