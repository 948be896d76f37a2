// ==========================================
// Roteiro PCP - command-line entry point
// ==========================================
// Usage:
//   roteiro-pcp <file> [--generation A|B] [--data-dir DIR] [--json]
//   roteiro-pcp --history [--data-dir DIR]
//   roteiro-pcp --delete <id> [--data-dir DIR]
// ==========================================

use anyhow::{anyhow, bail, Context};
use roteiro_pcp::api::{ProcessUploadResponse, RoutingApi};
use roteiro_pcp::config::{AppPaths, RoutingConfigReader, DEFAULT_LOCALE};
use roteiro_pcp::domain::RulesetGeneration;
use roteiro_pcp::i18n::{set_locale, t, t_with_args};
use std::path::PathBuf;
use std::process::ExitCode;

enum Command {
    Process {
        file: PathBuf,
        generation: Option<RulesetGeneration>,
        json: bool,
    },
    History,
    Delete(String),
}

struct CliArgs {
    command: Command,
    data_dir: Option<PathBuf>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> anyhow::Result<CliArgs> {
    let mut file = None;
    let mut generation = None;
    let mut data_dir = None;
    let mut json = false;
    let mut history = false;
    let mut delete = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--generation" | "-g" => {
                let value = args.next().ok_or_else(|| anyhow!("--generation requer A ou B"))?;
                generation = Some(value.parse::<RulesetGeneration>().map_err(|e| anyhow!(e))?);
            }
            "--data-dir" => {
                let value = args.next().ok_or_else(|| anyhow!("--data-dir requer um diretório"))?;
                data_dir = Some(PathBuf::from(value));
            }
            "--history" => history = true,
            "--delete" => {
                delete = Some(args.next().ok_or_else(|| anyhow!("--delete requer um id"))?);
            }
            "--json" => json = true,
            flag if flag.starts_with('-') => bail!("opção desconhecida: {}", flag),
            path => file = Some(PathBuf::from(path)),
        }
    }

    let command = match (history, delete, file) {
        (true, None, None) => Command::History,
        (false, Some(id), None) => Command::Delete(id),
        (false, None, Some(file)) => Command::Process {
            file,
            generation,
            json,
        },
        _ => bail!("{}", t("cli.usage")),
    };

    Ok(CliArgs { command, data_dir })
}

fn print_response(response: &ProcessUploadResponse, api: &RoutingApi) {
    println!(
        "{}",
        t_with_args(
            "cli.processed",
            &[("id", &response.job_id), ("total", &response.total.to_string())]
        )
    );
    let report = api.paths().outputs_dir().join(&response.artifact);
    println!(
        "{}",
        t_with_args("cli.report", &[("path", &report.display().to_string())])
    );

    println!("\n{}", t("cli.preview_header"));
    for row in &response.preview {
        println!(
            "  {:<30} | {:<20} | {}",
            row.piece_description, row.location, row.route
        );
    }

    println!("\n{}", t("cli.summary_header"));
    for entry in &response.summary {
        println!("  {:>5}  {}", entry.count, entry.route);
    }

    println!("\n{}", t("cli.legend_header"));
    for entry in api.legend(response.generation) {
        println!(
            "  {:<5} {:<22} {}",
            entry.sector.code(),
            entry.name(),
            entry.criterion
        );
    }
}

fn run(cli: CliArgs) -> anyhow::Result<()> {
    let paths = AppPaths::resolve(cli.data_dir.as_deref());
    let api = RoutingApi::open(paths)?;

    match cli.command {
        Command::Process {
            file,
            generation,
            json,
        } => {
            let raw = std::fs::read(&file)
                .with_context(|| format!("falha ao ler {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            let mut options = api.config().load_pipeline_options()?;
            if let Some(generation) = generation {
                options.generation = generation;
            }

            let response = api
                .process_upload_with(&file_name, &raw, &options)
                .map_err(|e| anyhow!(e.user_message()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_response(&response, &api);
            }
        }
        Command::History => {
            let jobs = api.list_history()?;
            if jobs.is_empty() {
                println!("{}", t("cli.history_empty"));
            } else {
                println!("{}", t("cli.history_header"));
                for job in jobs {
                    println!(
                        "  {}  {}  {:>5}  {}",
                        job.id, job.date, job.piece_count, job.name
                    );
                }
            }
        }
        Command::Delete(id) => {
            let key = if api.delete_job(&id)? {
                "cli.deleted"
            } else {
                "cli.not_deleted"
            };
            println!("{}", t_with_args(key, &[("id", &id)]));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    roteiro_pcp::logging::init();
    set_locale(DEFAULT_LOCALE);

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "falha na execução");
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
