//! coldmail-match: resume and job posting match scoring

use clap::Parser;
use coldmail_match::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use coldmail_match::config::Config;
use coldmail_match::input::manager::InputManager;
use coldmail_match::llm::prompts::{GenerationKind, GenerationRequest, PromptTemplates, Tone};
use coldmail_match::output::formatter::formatter_for;
use coldmail_match::processing::analyzer::{MatchEngine, MatchReport};
use coldmail_match::processing::embedding_manager::EmbeddingModelManager;
use coldmail_match::processing::keywords::KeywordExtractor;
use coldmail_match::processing::text_normalizer::TextNormalizer;
use coldmail_match::{MatchError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

const RESUME_EXTENSIONS: [&str; 4] = ["pdf", "txt", "md", "markdown"];
const JOB_EXTENSIONS: [&str; 5] = ["txt", "md", "markdown", "html", "htm"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            lexical_only,
            output,
            detailed,
            save,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatchError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let (resume_text, job_text) = load_pair(&resume, &job, &config).await?;
            let engine = MatchEngine::from_config(&config);

            let report = if lexical_only {
                engine.analyze_lexical_only(&resume_text, &job_text)
            } else {
                score_with_fallback(&engine, &resume_text, &job_text).await?
            };

            let use_colors = config.output.color_output && save.is_none();
            let rendered = formatter_for(output_format, use_colors, detailed).format_report(&report)?;

            match save {
                Some(path) => {
                    tokio::fs::write(&path, rendered).await?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Keywords { file, limit } => {
            let mut input_manager = InputManager::new();
            let text = input_manager.extract_text(&file).await?;

            let tokens = TextNormalizer::new().normalize(&text);
            let keywords = KeywordExtractor::with_limit(limit).extract(&tokens);

            if keywords.is_empty() {
                println!("No keywords found in {}", file.display());
            }
            for (i, keyword) in keywords.entries().iter().enumerate() {
                println!("{:>3}. {} ({})", i + 1, keyword.term, keyword.count);
            }
        }

        Commands::Prompt {
            resume,
            job,
            cover_letter,
            tone,
            word_limit,
            recipient,
            position,
            company,
            message,
            linkedin,
            github,
            portfolio,
        } => {
            let kind = if cover_letter {
                GenerationKind::CoverLetter
            } else {
                GenerationKind::ColdEmail
            };
            let tone = match tone {
                Some(tone) => tone.parse::<Tone>()?,
                None => config.generation.tone,
            };
            let word_limit = word_limit.unwrap_or(config.generation.word_limit);

            let mut request = GenerationRequest::new(kind, tone, word_limit);
            request.recipient_name = recipient;
            request.recipient_position = position;
            request.company_name = company;
            request.custom_message = message;
            request.linkedin = linkedin;
            request.github = github;
            request.portfolio = portfolio;

            let (resume_text, job_text) = load_pair(&resume, &job, &config).await?;
            let engine = MatchEngine::from_config(&config);
            let matching = engine.keywords(&job_text).matching(&engine.keywords(&resume_text));

            let prompt = PromptTemplates::default().render(&request, &resume_text, &job_text, &matching)?;
            println!("[system]\n{}\n\n[human]\n{}", prompt.system, prompt.human);
        }

        Commands::Models { action } => {
            let mut manager = EmbeddingModelManager::new(&config).await?;

            match action {
                ModelAction::List => {
                    println!("Embedding Models\n");
                    for model in manager.list_available_models() {
                        let status = if manager.is_model_downloaded(&model.name) {
                            "downloaded"
                        } else {
                            "available"
                        };
                        let default_marker = if model.name == config.models.embedding_model {
                            " (default)"
                        } else {
                            ""
                        };
                        println!(
                            "  • {}{} ({}) - {} MB, {} dims [{}]",
                            model.name, default_marker, model.repo_id, model.size_mb, model.dimensions, status
                        );
                        println!("    {}", model.description);
                    }
                }

                ModelAction::Download { model, force } => {
                    let model_id = manager
                        .resolve_model_id(&model)
                        .ok_or_else(|| MatchError::ModelNotFound(model.clone()))?;

                    let spinner = spinner(&format!("Downloading {}", model_id));
                    let result = manager.download_model(&model_id, force).await;
                    spinner.finish_and_clear();

                    let model_path = result?;
                    println!("Model '{}' is available at {}", model_id, model_path.display());
                }

                ModelAction::Info { model } => {
                    let model_id = manager
                        .resolve_model_id(&model)
                        .ok_or_else(|| MatchError::ModelNotFound(model.clone()))?;
                    let info = manager
                        .get_model_info(&model_id)
                        .ok_or_else(|| MatchError::ModelNotFound(model_id.clone()))?;

                    println!("Name: {}", info.name);
                    println!("Repository: {}", info.repo_id);
                    println!("Size: {} MB", info.size_mb);
                    println!("Dimensions: {}", info.dimensions);
                    println!("Description: {}", info.description);
                    match manager.get_model_path(&model_id) {
                        Some(path) => println!("Location: {}", path.display()),
                        None => println!("Status: not downloaded (coldmail-match models download {})", model_id),
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration file: {}", config_path.display());
                println!("Models directory: {}", config.models_dir().display());
                println!("Embedding model: {}", config.models.embedding_model);
                println!("Job text limit: {} characters", config.input.max_job_chars);
                println!("Default tone: {}", config.generation.tone);
                println!("Default word limit: {}", config.generation.word_limit);
                println!("Output format: {:?}", config.output.format);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn load_pair(resume: &Path, job: &Path, config: &Config) -> Result<(String, String)> {
    cli::validate_file_extension(resume, &RESUME_EXTENSIONS)
        .map_err(|e| MatchError::InvalidInput(format!("Resume file: {}", e)))?;
    cli::validate_file_extension(job, &JOB_EXTENSIONS)
        .map_err(|e| MatchError::InvalidInput(format!("Job description file: {}", e)))?;

    let mut input_manager = InputManager::new();
    let resume_text = input_manager.extract_resume(resume).await?;
    let job_text = input_manager.extract_job(job, config.input.max_job_chars).await?;

    if resume_text.is_empty() {
        warn!("Resume text is empty; scores will be zero");
    }
    info!(
        "Loaded resume ({} chars) and job description ({} chars)",
        resume_text.chars().count(),
        job_text.chars().count()
    );

    Ok((resume_text, job_text))
}

/// Full scoring, degrading to the ATS score when no embedding model can be loaded
async fn score_with_fallback(engine: &MatchEngine, resume_text: &str, job_text: &str) -> Result<MatchReport> {
    let spinner = spinner(&format!("Loading embedding model {}", engine.embedder().label()));
    let warm_up = engine.embedder().warm_up().await;
    spinner.finish_and_clear();

    match warm_up {
        Ok(()) => engine.analyze(resume_text, job_text).await,
        Err(e) if e.is_model_unavailable() => {
            warn!("Embedding model unavailable, reporting ATS score only: {}", e);
            Ok(engine.analyze_lexical_only(resume_text, job_text))
        }
        Err(e) => Err(e),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
