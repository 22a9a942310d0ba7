//! CEJUSC intake command line.
//!
//! - `requirements`: list a service's field rules
//! - `validate`: check a filled form and print the result as JSON
//! - `submit`: validate, then post to the spreadsheet endpoint

use std::path::PathBuf;
use std::process::ExitCode;

use cejusc_intake::form::booking_range;
use cejusc_intake::submission::SheetsClient;
use cejusc_intake::{
    Config, FieldSet, FormValidator, IntakeForm, ScheduleWindow, ServiceCategory, SubmitOutcome,
};
use chrono::{Local, NaiveDate, Weekday};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cejusc-intake", version, about = "CEJUSC mediation intake form")]
struct Cli {
    /// JSON configuration file.
    #[arg(long, env = "CEJUSC_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the field rules for a service category.
    Requirements {
        #[arg(long)]
        category: ServiceCategory,
    },
    /// Validate a form and print the result.
    Validate(FormArgs),
    /// Validate a form and send it to the spreadsheet endpoint.
    Submit(FormArgs),
}

#[derive(Args, Debug)]
struct FormArgs {
    /// Service tag: divorcio, srp, casamento or pensao.
    #[arg(long)]
    category: String,

    /// Field value as `id=value`; repeatable.
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Preferred date, `YYYY-MM-DD`.
    #[arg(long, default_value = "")]
    date: String,

    /// Preferred time, `HH:MM`.
    #[arg(long, default_value = "")]
    time: String,

    /// Reference date for the past-date check (defaults to the local date).
    #[arg(long)]
    today: Option<NaiveDate>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected id=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Initialize observability
    cejusc_intake::observability::init_tracing(&config.observability);

    let validator = FormValidator::new(config.schedule.clone());

    match cli.command {
        Command::Requirements { category } => {
            let requirement = category.requirement();
            let (min, max) = booking_range(Local::now().date_naive());
            println!("{} ({})", category.label(), category.tag());
            for rule in requirement.rules {
                let mut tags = vec![if rule.required { "obrigatório" } else { "opcional" }];
                if rule.requires_email_format {
                    tags.push("e-mail");
                }
                println!("  {:<34} {}", rule.id, tags.join(", "));
            }
            println!(
                "Datas disponíveis: {} a {}",
                min.format("%d/%m/%Y"),
                max.format("%d/%m/%Y")
            );
            println!("Horário de atendimento:");
            let hours = validator.hours();
            for (label, day) in [
                ("Seg-Sex", Weekday::Mon),
                ("Sábado", Weekday::Sat),
                ("Domingo", Weekday::Sun),
            ] {
                match hours.hours_for(day) {
                    Some(w) => {
                        println!("  {label}: {:02}:00 às {:02}:00", w.open_hour, w.close_hour)
                    }
                    None => println!("  {label}: fechado"),
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate(args) => {
            let today = args.today.unwrap_or_else(|| Local::now().date_naive());
            let fields: FieldSet = args.fields.into_iter().collect();
            let schedule = ScheduleWindow::from_raw(&args.date, &args.time);

            let result = validator.validate_tagged(&args.category, &fields, &schedule, today);
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(if result.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Submit(args) => {
            let category: ServiceCategory = args.category.parse()?;
            let mut form = IntakeForm::new();
            form.select(category);
            for (id, value) in args.fields {
                form.set_field(id, value);
            }
            form.set_schedule_raw(&args.date, &args.time);

            let client = SheetsClient::new(config.submission.clone())?;
            let mut now = Local::now().naive_local();
            if let Some(today) = args.today {
                now = today.and_time(now.time());
            }

            match form.submit(&validator, &client, now).await {
                Ok(SubmitOutcome::Submitted(payload)) => {
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                    println!("Solicitação enviada com sucesso!");
                    Ok(ExitCode::SUCCESS)
                }
                Ok(SubmitOutcome::Rejected(result)) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    Ok(ExitCode::FAILURE)
                }
                Err(err) => {
                    tracing::error!(error = %err, "submission failed");
                    eprintln!("{}", err.user_message());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
