//! cv-tailor: CV tailoring and data exploration from the command line

use clap::Parser;
use cv_tailor::cli::{self, Cli, Commands, ConfigAction};
use cv_tailor::config::{Config, OutputFormat};
use cv_tailor::error::{CvTailorError, Result};
use cv_tailor::explorer::dataset::DatasetLoader;
use cv_tailor::explorer::suggest::QuerySuggester;
use cv_tailor::input::InputManager;
use cv_tailor::output::formatter::{report_path, save_artifacts, save_report_to_file, ReportGenerator};
use cv_tailor::output::report::{ApplicationPackage, ExplorationReport};
use cv_tailor::processing::document::CvSections;
use cv_tailor::processing::tailor::{Tailor, TailoringRequest};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Config::load_from(path),
        Some(path) => {
            info!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
        None => Config::load(),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn resolve_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(value) => cli::parse_output_format(value).map_err(CvTailorError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn run_command(command: Commands, config: Config, config_override: Option<PathBuf>) -> Result<()> {
    let generator = ReportGenerator::with_options(config.output.color_output, true, true, true);

    match command {
        Commands::Tailor {
            cv,
            title,
            company,
            job,
            job_text,
            output,
            save,
            hide_original,
        } => {
            cli::validate_file_extension(&cv, cli::CV_EXTENSIONS)
                .map_err(|e| CvTailorError::InvalidInput(format!("CV file: {}", e)))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, cli::JOB_EXTENSIONS)
                    .map_err(|e| CvTailorError::InvalidInput(format!("Job description file: {}", e)))?;
            }
            let format = resolve_format(output.as_deref(), &config)?;

            let mut input_manager = InputManager::new();
            let cv_text = input_manager.extract_text(&cv).await?;
            let job_description = match (job, job_text) {
                (Some(path), _) => input_manager.extract_text(&path).await?,
                (None, Some(text)) => text,
                (None, None) => {
                    return Err(CvTailorError::InvalidInput(
                        "Provide a job description with --job or --job-text".to_string(),
                    ))
                }
            };

            let request = TailoringRequest {
                cv_text,
                job_title: title,
                company,
                job_description,
            };
            request.validate()?;

            let progress = spinner("Generating tailored content...");
            let tailor = Tailor::with_settings(config.tailor.clone())?;
            let mut package = ApplicationPackage::generate(&tailor, &request, &cv.to_string_lossy());
            progress.finish_and_clear();

            if hide_original {
                package.original_sections = CvSections::default();
            }

            println!("{}", generator.render_package(&package, &format)?);

            if let Some(dir) = save {
                let written = save_artifacts(&package, &dir)?;
                println!("💾 Saved {} files to {}", written.len(), dir.display());
            }
        }

        Commands::Explore {
            files,
            question,
            output,
            preview_rows,
            save,
        } => {
            for file in &files {
                cli::validate_file_extension(file, cli::DATASET_EXTENSIONS)
                    .map_err(|e| CvTailorError::InvalidInput(format!("{}: {}", file.display(), e)))?;
            }
            let format = resolve_format(output.as_deref(), &config)?;

            let progress = spinner("Loading datasets...");
            let datasets = DatasetLoader::load_all(&files).await;
            progress.finish_and_clear();
            let datasets = datasets?;

            let suggester = QuerySuggester::new()?;
            let report = ExplorationReport::generate(
                &datasets,
                question.as_deref(),
                &suggester,
                preview_rows.unwrap_or(config.explorer.preview_rows),
            );
            let rendered = generator.render_exploration(&report, &format)?;

            match save {
                Some(target) => {
                    let path = report_path(&target, &format, "exploration_report");
                    save_report_to_file(&rendered, &path)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => {
            let path = config_override.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("Tailoring:");
                    println!("  Max skills: {}", config.tailor.max_skills);
                    println!("  Max summary technologies: {}", config.tailor.max_summary_technologies);
                    println!("  Cover letter excerpt: {} chars", config.tailor.excerpt_chars);
                    println!("  Fallback focus: {}", config.tailor.fallback_focus);
                    println!("Explorer:");
                    println!("  Preview rows: {}", config.explorer.preview_rows);
                    println!("Output:");
                    println!("  Format: {:?}", config.output.format);
                    println!("  Colors: {}", config.output.color_output);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}
