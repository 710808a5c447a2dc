//! One-shot account commands: `signup` and `history`.

use std::fmt::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use gymtrack_core::api::{ApiClient, HistoryDay};
use gymtrack_core::config::Config;
use gymtrack_core::core::interrupt;
use gymtrack_core::core::session::SessionHolder;
use gymtrack_core::forms::{SignInDraft, SignUpDraft};

const EMPTY_HISTORY: &str = "No exercises registered yet.";

/// Creates the account, then signs in to confirm the credentials work.
pub async fn signup(config: &Config, name: &str, email: &str, password: &str) -> Result<()> {
    let draft = SignUpDraft {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
        password_confirm: password.to_string(),
    };
    draft.validate()?;

    let api = ApiClient::from_config(config)?;
    interrupt::cancellable(async {
        api.create_user(&draft.name, &draft.email, &draft.password)
            .await
            .context("create account")
    })
    .await?;

    let session = SessionHolder::new(Arc::new(api));
    let user = interrupt::cancellable(async {
        session
            .sign_in(&draft.email, &draft.password)
            .await
            .context("sign in")
    })
    .await?;

    println!("Account created. Welcome, {}!", user.name);
    Ok(())
}

/// Signs in and prints the workout history, one section per day.
pub async fn history(config: &Config, email: &str, password: &str) -> Result<()> {
    let draft = SignInDraft {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    draft.validate()?;

    let api = ApiClient::from_config(config)?;
    let session = SessionHolder::new(Arc::new(api.clone()));
    interrupt::cancellable(async {
        session
            .sign_in(&draft.email, &draft.password)
            .await
            .context("sign in")
    })
    .await?;

    let token = session
        .token()
        .context("session ended before the history was loaded")?;
    let days = interrupt::cancellable(async {
        api.history(&token).await.context("load history")
    })
    .await?;

    print!("{}", format_history(&days));
    Ok(())
}

fn format_history(days: &[HistoryDay]) -> String {
    if days.iter().all(|day| day.data.is_empty()) {
        return format!("{EMPTY_HISTORY}\n");
    }

    let mut out = String::new();
    for day in days.iter().filter(|day| !day.data.is_empty()) {
        out.push_str(&day.title);
        out.push('\n');
        for entry in &day.data {
            let _ = writeln!(out, "  {:<5}  {} ({})", entry.hour, entry.name, entry.group);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use gymtrack_core::api::HistoryEntry;

    use super::*;

    #[test]
    fn test_format_history_empty() {
        assert_eq!(format_history(&[]), "No exercises registered yet.\n");
    }

    #[test]
    fn test_format_history_sections() {
        let days = vec![HistoryDay {
            title: "22.07.24".into(),
            data: vec![HistoryEntry {
                id: "1".into(),
                name: "Front pulldown".into(),
                group: "back".into(),
                hour: "08:10".into(),
                created_at: String::new(),
            }],
        }];
        assert_eq!(
            format_history(&days),
            "22.07.24\n  08:10  Front pulldown (back)\n"
        );
    }
}
