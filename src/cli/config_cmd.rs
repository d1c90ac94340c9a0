use anyhow::Result;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::core::config::AppConfig;

pub fn init(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        eprintln!("Remove it first if you want to regenerate.");
        return Ok(());
    }

    match AppConfig::default().save() {
        Ok(path) => {
            println!("Generated config at {}", path.display());
            println!("  Set [settings] chart_endpoint to enable metric charts.");
        }
        Err(e) => {
            eprintln!("Failed to generate config: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn check(opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if !path.exists() {
        eprintln!("No config file found at {}", path.display());
        eprintln!("Run `bobo-stats config init` to create one.");
        return Ok(());
    }

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let issues = config.validate();
    if opts.format == OutputFormat::Json {
        let report = serde_json::json!({
            "path": path.display().to_string(),
            "valid": issues.is_empty(),
            "issues": issues,
        });
        let json = if opts.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{}", json);
        if !issues.is_empty() {
            std::process::exit(1);
        }
        return Ok(());
    }

    if issues.is_empty() {
        println!("Config is valid: {}", path.display());
        println!(
            "  Language: {}, max_border: sqs {} / dynamodb {}, {} billed service(s)",
            config.settings.lang,
            config.sqs.max_border,
            config.dynamodb.max_border,
            config.cost.services.len()
        );
        match config.default_chart_endpoint() {
            Some(url) => println!("  Chart endpoint: {}", url),
            None => println!("  No chart endpoint configured."),
        }
    } else {
        eprintln!("Config issues found in {}:", path.display());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        std::process::exit(1);
    }
    Ok(())
}
