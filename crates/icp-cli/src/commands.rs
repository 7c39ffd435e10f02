use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use icp_grade::{GradeItem, InMemoryGradeStore};
use icp_library::{ContentLibraryResolver, InMemoryLibraryRegistry, LibraryError};
use icp_package::{PackageValidator, StagingArea};
use icp_store::{DraftFile, InMemoryFileStore};
use icp_submit::{
    ContentSubmission, ControllerConfig, Evaluation, ExistingContent, SubmissionController,
    SubmissionOutcome,
};
use icp_types::CourseId;
use serde_json::json;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Validate(args) => cmd_validate(args, config, cli.format),
        Command::Defaults(args) => cmd_defaults(args, config, cli.format),
        Command::ParseLibrary(args) => cmd_parse_library(args, cli.format),
        Command::InspectPackage(args) => cmd_inspect_package(args, config, cli.format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ControllerConfig> {
    let Some(path) = path else {
        return Ok(ControllerConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<InMemoryLibraryRegistry> {
    let Some(path) = path else {
        return Ok(InMemoryLibraryRegistry::new());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading registry {}", path.display()))?;
    let registry = InMemoryLibraryRegistry::from_json(&text)
        .with_context(|| format!("parsing registry {}", path.display()))?;
    debug!(libraries = registry.len(), "registry loaded");
    Ok(registry)
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_validate(
    args: ValidateArgs,
    mut config: ControllerConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if let Some(dir) = args.staging_dir {
        config.staging_root = dir;
    }
    let text = fs::read_to_string(&args.submission)
        .with_context(|| format!("reading submission {}", args.submission.display()))?;
    let mut submission: ContentSubmission =
        serde_json::from_str(&text).context("parsing submission")?;

    let files = Arc::new(InMemoryFileStore::new());
    if let Some(package) = &args.package {
        let bytes =
            fs::read(package).with_context(|| format!("reading package {}", package.display()))?;
        let filename = package
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package.h5p".into());
        let draft = files.create_draft()?;
        files.attach(&draft, DraftFile::new(filename, bytes))?;
        submission.package_file = Some(draft);
    }

    let registry = load_registry(args.registry.as_deref())?;
    let controller = SubmissionController::new(
        config,
        Arc::new(registry),
        files,
        Arc::new(InMemoryGradeStore::new()),
    );
    let evaluation = controller.evaluate(&submission)?;

    match format {
        OutputFormat::Json => print_json(&evaluation_json(&evaluation)),
        OutputFormat::Text => {
            print_evaluation(&evaluation);
            Ok(())
        }
    }
}

fn evaluation_json(evaluation: &Evaluation) -> serde_json::Value {
    let mut value = json!({
        "mode": evaluation.mode,
        "accepted": evaluation.is_accepted(),
        "trail": evaluation.trail,
        "elapsedMicros": u64::try_from(evaluation.elapsed.as_micros()).unwrap_or(u64::MAX),
    });
    match &evaluation.outcome {
        SubmissionOutcome::Accepted(record) => value["record"] = json!(record),
        SubmissionOutcome::Rejected(errors) => value["errors"] = json!(errors),
    }
    value
}

fn print_evaluation(evaluation: &Evaluation) {
    match &evaluation.outcome {
        SubmissionOutcome::Accepted(record) => {
            println!("{} Submission accepted ({} mode)", "✓".green().bold(), evaluation.mode);
            println!("  Name: {}", record.name.bold());
            println!("  Maximum grade: {}", record.maximum_grade);
            if let Some(library) = &record.library {
                println!("  Library: {}", library.to_string().cyan());
            }
            if let Some(staged) = &record.staging {
                println!("  Staged: {}", staged.path.display().to_string().yellow());
                println!("  Digest: {}", staged.digest.dimmed());
            }
            println!("  Disable mask: {}", record.disable);
        }
        SubmissionOutcome::Rejected(errors) => {
            println!("{} Submission rejected ({} mode)", "✗".red().bold(), evaluation.mode);
            for (field, error) in errors.iter() {
                let mut lines = error.message.lines();
                println!("  {}: {}", field.to_string().yellow(), lines.next().unwrap_or(""));
                for line in lines {
                    println!("    {line}");
                }
            }
        }
    }
    let trail: Vec<String> = evaluation.trail.iter().map(|s| s.to_string()).collect();
    println!("  Trail: {}", trail.join(" → ").dimmed());
}

fn cmd_defaults(
    args: DefaultsArgs,
    config: ControllerConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let existing: Option<ExistingContent> = match &args.existing {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading content {}", path.display()))?;
            Some(serde_json::from_str(&text).context("parsing existing content")?)
        }
        None => None,
    };

    let course_id = CourseId(args.course);
    let grades = InMemoryGradeStore::new();
    if let (Some(existing), Some(max_grade)) = (&existing, args.max_grade) {
        grades.insert(GradeItem {
            course_id,
            module_type: config.module_type.clone(),
            instance_id: existing.id,
            max_grade: Some(max_grade),
        })?;
    }

    let registry = load_registry(args.registry.as_deref())?;
    let controller = SubmissionController::new(
        config,
        Arc::new(registry),
        Arc::new(InMemoryFileStore::new()),
        Arc::new(grades),
    );
    let defaults = controller.defaults(existing.as_ref(), course_id)?;

    match format {
        OutputFormat::Json => print_json(&json!(defaults)),
        OutputFormat::Text => {
            println!("Action: {}", defaults.action.to_string().cyan());
            println!("Maximum grade: {}", defaults.maximum_grade);
            if !defaults.library_reference.is_empty() {
                println!("Library: {}", defaults.library_reference.bold());
            }
            println!("Parameters: {}", defaults.parameters.dimmed());
            let opts = defaults.display_options;
            println!(
                "Display: frame={} download={} copyright={}",
                opts.frame, opts.download, opts.copyright
            );
            Ok(())
        }
    }
}

fn cmd_parse_library(args: ParseLibraryArgs, format: OutputFormat) -> anyhow::Result<()> {
    let registry = load_registry(args.registry.as_deref())?;
    let resolver = ContentLibraryResolver::new(Arc::new(registry));

    let reference = match resolver.parse(&args.reference) {
        Ok(reference) => reference,
        Err(e) => {
            return match format {
                OutputFormat::Json => print_json(&json!({
                    "input": args.reference,
                    "valid": false,
                    "error": e.to_string(),
                })),
                OutputFormat::Text => {
                    println!("{} {}", "✗".red().bold(), e);
                    Ok(())
                }
            };
        }
    };

    let resolved = if args.registry.is_some() {
        match resolver.resolve(&reference) {
            Ok(resolved) => Some(Ok(resolved)),
            Err(e @ LibraryError::NotFound { .. }) => Some(Err(e)),
            Err(e) => return Err(e.into()),
        }
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let mut value = json!({
                "input": args.reference,
                "valid": true,
                "reference": reference,
            });
            match &resolved {
                Some(Ok(library)) => value["libraryId"] = json!(library.library_id),
                Some(Err(e)) => value["error"] = json!(e.to_string()),
                None => {}
            }
            print_json(&value)
        }
        OutputFormat::Text => {
            println!("{} {}", "✓".green().bold(), reference.to_string().bold());
            println!("  Machine name: {}", reference.machine_name);
            println!(
                "  Version: {}.{}",
                reference.major_version, reference.minor_version
            );
            match &resolved {
                Some(Ok(library)) => println!("  Installed: {}", library.library_id.to_string().green()),
                Some(Err(_)) => println!("  Installed: {}", "no".red()),
                None => {}
            }
            Ok(())
        }
    }
}

fn cmd_inspect_package(
    args: InspectPackageArgs,
    config: ControllerConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let bytes = fs::read(&args.package)
        .with_context(|| format!("reading package {}", args.package.display()))?;
    let registry = load_registry(args.registry.as_deref())?;
    let staging_root = args.staging_dir.unwrap_or(config.staging_root);
    let validator = PackageValidator::new(Arc::new(registry), StagingArea::new(staging_root));

    let report = validator.validate(&bytes, &config.package_policy)?;
    if let (Some(staged), false) = (&report.staging, args.keep) {
        validator.staging().discard(staged)?;
    }

    match format {
        OutputFormat::Json => print_json(&json!({
            "valid": report.is_valid(),
            "errors": report.errors,
            "info": report.info,
            "manifest": report.manifest,
            "staging": if args.keep { json!(report.staging) } else { json!(null) },
        })),
        OutputFormat::Text => {
            if report.is_valid() {
                println!("{} Package is valid", "✓".green().bold());
            } else {
                println!("{} Package is invalid", "✗".red().bold());
            }
            if let Some(manifest) = &report.manifest {
                println!("  Title: {}", manifest.title.bold());
                println!("  Main library: {}", manifest.main_library.cyan());
            }
            for error in &report.errors {
                println!("  {} {}", "error:".red(), error);
            }
            for note in &report.info {
                println!("  {} {}", "info:".blue(), note);
            }
            if let (Some(staged), true) = (&report.staging, args.keep) {
                println!("  Staged: {}", staged.path.display().to_string().yellow());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_config_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.max_name_length, 255);
    }

    #[test]
    fn config_loads_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "hub_enabled = true\nlocale = \"fr\"\n\n[package_policy]\nmax_entries = 50\n"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert!(config.hub_enabled);
        assert_eq!(config.locale, "fr");
        assert_eq!(config.package_policy.max_entries, 50);
        assert_eq!(config.default_maximum_grade, 10.0);
    }

    #[test]
    fn registry_loads_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 3, "machineName": "H5P.Blanks", "majorVersion": 1, "minorVersion": 14, "runnable": true}}]"#
        )
        .unwrap();

        let registry = load_registry(Some(file.path())).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejected_evaluation_json_lists_errors() {
        let config = ControllerConfig::default();
        let controller = SubmissionController::new(
            config,
            Arc::new(InMemoryLibraryRegistry::new()),
            Arc::new(InMemoryFileStore::new()),
            Arc::new(InMemoryGradeStore::new()),
        );
        let submission = ContentSubmission::create("Quiz", "H5P.Blanks 1.14", "{}");
        let evaluation = controller.evaluate(&submission).unwrap();

        let value = evaluation_json(&evaluation);
        assert_eq!(value["accepted"], false);
        assert_eq!(value["mode"], "create");
        assert_eq!(value["errors"]["editor"]["kind"], "libraryNotFound");
        assert_eq!(value["trail"][0], "initial");
        assert!(value["elapsedMicros"].is_u64());
    }
}
