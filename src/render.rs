use console::style;
use snooze::{Story, User};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::util::sanitize::sanitize_for_terminal;

const TITLE_CHARS: usize = 120;
const META_CHARS: usize = 40;

/// One menu line for a story: star, title, host, author, poster and age.
///
/// The star only appears for logged-in users; favorites get a filled one.
pub fn story_label(story: &Story, user: Option<&User>, now: OffsetDateTime) -> String {
    let star = match user {
        Some(u) if u.is_favorite(story) => format!("{} ", style("★").yellow()),
        Some(_) => "☆ ".to_owned(),
        None => String::new(),
    };
    let host = story
        .hostname()
        .map(|h| sanitize_for_terminal(&h, META_CHARS))
        .unwrap_or_else(|_| "unknown host".to_owned());
    let mut label = format!(
        "{star}{} {}",
        sanitize_for_terminal(&story.title, TITLE_CHARS),
        style(format!("({host})")).dim(),
    );
    label.push_str(&format!(
        " by {} · posted by {}",
        sanitize_for_terminal(&story.author, META_CHARS),
        sanitize_for_terminal(&story.username, META_CHARS),
    ));
    if let Some(age) = posted_age(&story.created_at, now) {
        label.push_str(&format!(" · {}", style(age).dim()));
    }
    label
}

/// Relative age for recent timestamps, a plain date for older ones.
/// `None` when the timestamp is not RFC 3339.
pub fn posted_age(created_at: &str, now: OffsetDateTime) -> Option<String> {
    let created = OffsetDateTime::parse(created_at, &Rfc3339).ok()?;
    let elapsed = now - created;
    let text = if elapsed < Duration::minutes(1) {
        "just now".to_owned()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.whole_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.whole_hours())
    } else if elapsed < Duration::days(30) {
        format!("{}d ago", elapsed.whole_days())
    } else {
        created
            .format(format_description!("[year]-[month]-[day]"))
            .ok()?
    };
    Some(text)
}

/// Logout entry naming the account, with its signup date when the server
/// sent a readable one.
pub fn logout_label(username: &str, created_at: &str) -> String {
    let username = sanitize_for_terminal(username, META_CHARS);
    let joined = OffsetDateTime::parse(created_at, &Rfc3339)
        .ok()
        .and_then(|at| at.format(format_description!("[year]-[month]-[day]")).ok());
    match joined {
        Some(date) => format!("Log out {username} {}", style(format!("(member since {date})")).dim()),
        None => format!("Log out {username}"),
    }
}
