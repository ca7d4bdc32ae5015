mod tracing_init;

use std::process;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Parser, Subcommand};
use larklog::{
    Button, ButtonStyle, ClientConfig, EnvConfig, FieldValue, Fields, LogLevel, Logger,
    LoggerConfig, MessageBody, WebhookClient,
};
use tracing::debug;

use crate::tracing_init::init_tracing;

#[derive(Parser)]
#[command(name = "larklog", version)]
#[command(about = "Send log cards and text messages to a Lark webhook", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a log card.
    Send {
        #[arg(long, default_value = "info")]
        level: LogLevel,
        #[arg(long, short)]
        message: String,
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        service: Option<String>,
        #[arg(long = "env")]
        environment: Option<String>,
        #[arg(long)]
        hostname: Option<String>,
        #[arg(long)]
        show_config: bool,
        #[arg(long)]
        emoji_subtitle: bool,
        #[arg(long = "button", value_name = "LABEL=URL[,confirm]")]
        buttons: Vec<String>,
        #[command(flatten)]
        delivery: DeliveryArgs,
    },
    /// Send a plain text message.
    Text {
        message: String,
        #[command(flatten)]
        delivery: DeliveryArgs,
    },
}

#[derive(clap::Args)]
struct DeliveryArgs {
    /// Print the payload instead of posting it.
    #[arg(long)]
    dry_run: bool,
    #[arg(long, default_value_t = 3)]
    retries: u32,
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    timeout: u64,
}

impl DeliveryArgs {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_retry(self.retries, ClientConfig::default().retry_delay)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let env = EnvConfig::from_env();
    match cli.command {
        Command::Send {
            level,
            message,
            fields,
            title,
            service,
            environment,
            hostname,
            show_config,
            emoji_subtitle,
            buttons,
            delivery,
        } => {
            let mut config = LoggerConfig::default()
                .with_show_config(show_config)
                .with_emoji_subtitle(emoji_subtitle);
            if let Some(title) = title {
                config = config.with_title(title);
            }
            if let Some(service) = service {
                config = config.with_service(service);
            }
            if let Some(environment) = environment {
                config = config.with_environment(environment);
            }
            if let Some(hostname) = hostname {
                config = config.with_hostname(hostname);
            }
            for raw in &buttons {
                config = config.with_button(parse_button(raw)?);
            }
            config.validate().context("invalid logger configuration")?;
            let fields = parse_fields(&fields)?;

            let logger = Logger::new(env.webhook_url.clone(), delivery.client_config(), config);
            if delivery.dry_run || env.test_mode {
                let card = logger.card(level, &message, &fields);
                return print_payload(&MessageBody::card(&card));
            }
            debug!(target: "larklog", url = %env.webhook_url, "sending log card");
            logger
                .try_log(level, &message, fields)
                .context("failed to deliver log card")
        }
        Command::Text { message, delivery } => {
            if delivery.dry_run || env.test_mode {
                return print_payload(&MessageBody::text(&message));
            }
            WebhookClient::new(env.webhook_url, delivery.client_config())
                .send_text(&message)
                .context("failed to deliver text message")
        }
    }
}

fn print_payload(body: &MessageBody<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(body).context("failed to encode payload")?;
    println!("{json}");
    Ok(())
}

fn parse_fields(raw: &[String]) -> Result<Fields> {
    let mut fields = Fields::new();
    for entry in raw {
        let (key, value) = entry
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("invalid field '{entry}', expected 'key=value'"))?;
        fields.insert(key.trim(), parse_field_value(value));
    }
    Ok(fields)
}

/// Integers, floats and booleans keep their type; anything else is text.
fn parse_field_value(raw: &str) -> FieldValue {
    if let Ok(value) = raw.parse::<i64>() {
        return FieldValue::Int(value);
    }
    if let Ok(value) = raw.parse::<bool>() {
        return FieldValue::Bool(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && raw.contains('.') => FieldValue::Float(value),
        _ => FieldValue::from(raw),
    }
}

/// `label=url` followed by optional comma separated flags: `confirm` and a
/// style name (`primary`, `secondary`, `danger`).
fn parse_button(raw: &str) -> Result<Button> {
    let Some((label, rest)) = raw.split_once('=') else {
        bail!("invalid button '{raw}', expected 'label=url[,confirm]'");
    };
    let mut parts = rest.split(',');
    let url = parts.next().unwrap_or_default().trim();
    let mut button = Button::new(label.trim(), url);
    for flag in parts {
        button = match flag.trim() {
            "confirm" => button.with_confirm(true),
            "primary" => button.with_style(ButtonStyle::Primary),
            "secondary" => button.with_style(ButtonStyle::Secondary),
            "danger" => button.with_style(ButtonStyle::Danger),
            other => bail!("unknown button flag '{other}' in '{raw}'"),
        };
    }
    Ok(button)
}
