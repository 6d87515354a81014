//! Doctor command - verify configuration and API access.

use crate::cli::Output;
use crate::config::{Settings, ENV_API_KEY, ENV_API_URL, ENV_ALLOWED_DIR};
use crate::files::list_media_files;
use crate::workflow::TranscriptionWorkflow;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("mocoVoice Doctor");
    println!();
    println!("Checking configuration and API access...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let api_checks = vec![check_api_key(settings), check_api_url(settings)];
    for check in &api_checks {
        check.print();
    }
    checks.extend(api_checks);

    println!();

    println!("{}", style("Files").bold());
    let dir_check = check_allowed_dir(settings);
    dir_check.print();
    checks.push(dir_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    let config_errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    if config_errors == 0 {
        println!("{}", style("Connectivity").bold());
        let connectivity = check_connectivity(settings).await;
        connectivity.print();
        checks.push(connectivity);
        println!();
    }

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using mocoVoice.",
            errors
        ));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! mocoVoice is ready to use.");
    }

    Ok(())
}

fn check_api_key(settings: &Settings) -> CheckResult {
    let hint = format!("Set with: export {}='...'", ENV_API_KEY);
    if settings.api.has_key() {
        CheckResult::ok("API key", &format!("configured ({})", mask_key(&settings.api.key)))
    } else {
        CheckResult::error("API key", "not set", &hint)
    }
}

fn check_api_url(settings: &Settings) -> CheckResult {
    let hint = format!("Set with: export {}='https://...'", ENV_API_URL);
    match settings.api.base_url() {
        Ok(url) if matches!(url.scheme(), "http" | "https") => CheckResult::ok("API URL", url.as_str()),
        Ok(url) => CheckResult::error(
            "API URL",
            &format!("unsupported scheme '{}'", url.scheme()),
            &hint,
        ),
        Err(e) => CheckResult::error("API URL", &e.to_string(), &hint),
    }
}

fn check_allowed_dir(settings: &Settings) -> CheckResult {
    let dir = settings.allowed_dir();
    let hint = format!("Set with: export {}=/path/to/media", ENV_ALLOWED_DIR);
    if !dir.is_dir() {
        return CheckResult::warning(
            "Allowed directory",
            &format!("{} (not found)", dir.display()),
            &hint,
        );
    }

    let count: usize = dir
        .canonicalize()
        .map(|root| list_media_files(&root).values().map(Vec::len).sum())
        .unwrap_or(0);
    CheckResult::ok(
        "Allowed directory",
        &format!("{} ({} supported file(s))", dir.display(), count),
    )
}

fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults and environment",
            &format!("Create {} to persist settings", config_path.display()),
        )
    }
}

async fn check_connectivity(settings: &Settings) -> CheckResult {
    let workflow = TranscriptionWorkflow::new(settings);

    match workflow.list(1).await {
        Ok(jobs) => CheckResult::ok("mocoVoice API", &format!("reachable ({} job(s) on page 1)", jobs.len())),
        Err(e) => CheckResult::error(
            "mocoVoice API",
            &e.to_string(),
            "Check the API key, the API URL and your network",
        ),
    }
}

/// Show only the ends of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.trim().chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
