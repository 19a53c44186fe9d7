//! Subcommand handlers: gather answers, confirm, run.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use dmt_cli::pipeline;
use dmt_cli::settings::{LoadedSettings, Settings};
use dmt_cli::types::{BuildRequest, InputFile, PartRequest, RunResult};
use dmt_ingest::{detect_import_type, read_source};
use dmt_model::{
    CategoryOptions, DerivationParams, FileRole, ImportType, Operation, PartDetails, PartOptions,
    SortAssignment, SourceRow, TableName,
};

use crate::cli::{BuildArgs, CategoryArgs, NewPartArgs, PartArgs};
use crate::prompts::Prompter;
use crate::summary::{print_build_plan, print_part_plan};

/// Runs `dmt build`. `Ok(None)` means the operator cancelled.
pub fn run_build(args: &BuildArgs, settings: &Settings) -> Result<Option<RunResult>> {
    let prompter = Prompter::new(!args.no_input);

    let first = match args
        .input
        .clone()
        .or_else(|| args.delete_file.clone())
        .or_else(|| args.add_file.clone())
    {
        Some(path) => path,
        None => required_path(&prompter, "Source file")?,
    };
    let first_rows = read_source(&first)
        .with_context(|| format!("read source {}", first.display()))?
        .rows;

    let detected = detect_import_type(&first_rows);
    let import_type = match args.import_type {
        Some(choice) => choice.into(),
        None => prompt_import_type(&prompter, detected)?,
    };
    debug!(%detected, %import_type, "import type");

    let operation = match args.operation {
        Some(choice) => choice.into(),
        None if args.delete_file.is_some() && args.add_file.is_some() => Operation::Both,
        None => prompt_operation(&prompter)?,
    };
    let inputs = resolve_inputs(args, operation, &first, &prompter)?;
    let include = resolve_tables(&args.tables, import_type, &prompter)?;

    let mut params = DerivationParams {
        import_type,
        ..DerivationParams::default()
    };
    if operation != Operation::Delete {
        let sort_rows = match inputs.iter().find(|input| input.role == FileRole::Add) {
            Some(add) if add.path != first => read_source(&add.path)
                .with_context(|| format!("read source {}", add.path.display()))?
                .rows,
            _ => first_rows,
        };
        params.sort = Some(resolve_sort(args, import_type, &sort_rows, &prompter)?);
        if import_type == ImportType::Variant {
            params.part = resolve_part(args, settings, &prompter)?;
            let default_parent = params
                .part
                .as_ref()
                .map(|part| part.parent_part.clone());
            params.categories = resolve_categories(
                &args.categories,
                default_parent,
                true,
                settings,
                &prompter,
            )?;
        }
    }

    let request = BuildRequest {
        operation,
        inputs,
        include,
        params,
        output_dir: args.output_dir.clone(),
    };
    print_build_plan(&request);
    if !args.yes && !prompter.confirm("Proceed?", true)? {
        return Ok(None);
    }

    let progress = progress_bar(request.inputs.len() as u64 * 3)?;
    let result = pipeline::run_build(&request, &progress);
    progress.finish_and_clear();
    let result = result?;
    info!(playlist = %result.playlist.display(), "build complete");
    Ok(Some(result))
}

/// Runs `dmt part`. `Ok(None)` means the operator cancelled.
pub fn run_part(args: &PartArgs, settings: &Settings) -> Result<Option<RunResult>> {
    let prompter = Prompter::new(!args.no_input);

    let part_id = match &args.part_id {
        Some(id) => id.trim().to_string(),
        None => prompter.text("Part ID", "")?,
    };
    if part_id.is_empty() {
        bail!("no part id given");
    }
    let details = resolve_new_part(&args.new_part, settings, &prompter)?;
    let website = resolve_website(
        args.website.as_deref(),
        "Website",
        &settings.part_websites,
        settings.default_part_website(),
        &prompter,
    )?;
    let categories = resolve_categories(
        &args.categories,
        Some(part_id.clone()),
        false,
        settings,
        &prompter,
    )?;
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => PathBuf::from(prompter.text("Output folder", ".")?),
    };

    let request = PartRequest {
        company: settings.company.clone(),
        part_id,
        website,
        details,
        categories,
        output_dir,
    };
    print_part_plan(&request);
    if !args.yes && !prompter.confirm("Proceed?", true)? {
        return Ok(None);
    }
    let result = pipeline::run_part(&request)?;
    info!(playlist = %result.playlist.display(), "part build complete");
    Ok(Some(result))
}

/// Runs `dmt config`.
pub fn run_config(loaded: &LoadedSettings) -> Result<()> {
    match &loaded.path {
        Some(path) if loaded.from_file => println!("Settings: {}", path.display()),
        Some(path) => println!("Settings: {} (not found, using defaults)", path.display()),
        None => println!("Settings: (no config directory, using defaults)"),
    }
    let text = toml::to_string_pretty(&loaded.settings).context("serialize settings")?;
    println!();
    print!("{text}");
    Ok(())
}

fn progress_bar(steps: u64) -> Result<ProgressBar> {
    let progress = ProgressBar::new(steps);
    progress.set_style(
        ProgressStyle::with_template("{spinner} Building tables [{bar:30}] {pos}/{len} {msg}")
            .context("progress template")?
            .progress_chars("=> "),
    );
    progress.enable_steady_tick(Duration::from_millis(120));
    Ok(progress)
}

fn required_path(prompter: &Prompter, label: &str) -> Result<PathBuf> {
    if !prompter.is_interactive() {
        bail!("{label} is required; pass it on the command line");
    }
    let text = prompter.text(label, "")?;
    if text.is_empty() {
        bail!("no {} selected", label.to_lowercase());
    }
    Ok(PathBuf::from(text.trim_matches('"')))
}

fn prompt_import_type(prompter: &Prompter, detected: ImportType) -> Result<ImportType> {
    let choices = [ImportType::Variant, ImportType::Attribute];
    let labels: Vec<String> = choices.iter().map(ToString::to_string).collect();
    let default = choices.iter().position(|c| *c == detected).unwrap_or(0);
    let index = prompter.select(
        &format!("Detected type: {detected}. Confirm or override"),
        &labels,
        default,
    )?;
    Ok(choices.get(index).copied().unwrap_or(detected))
}

fn prompt_operation(prompter: &Prompter) -> Result<Operation> {
    let choices = [Operation::Add, Operation::Delete, Operation::Both];
    let labels: Vec<String> = choices.iter().map(ToString::to_string).collect();
    let index = prompter.select("Select operation", &labels, 0)?;
    Ok(choices.get(index).copied().unwrap_or_default())
}

/// Inputs in processing order: the delete file first in a delete-and-add run.
fn resolve_inputs(
    args: &BuildArgs,
    operation: Operation,
    first: &Path,
    prompter: &Prompter,
) -> Result<Vec<InputFile>> {
    let input = |path: PathBuf, role| InputFile { path, role };
    match operation {
        Operation::Add => Ok(vec![input(first.to_path_buf(), FileRole::Add)]),
        Operation::Delete => Ok(vec![input(first.to_path_buf(), FileRole::Delete)]),
        Operation::Both => {
            let mut delete = args.delete_file.clone();
            let mut add = args.add_file.clone();
            if let Some(path) = &args.input {
                match (&delete, &add) {
                    (None, Some(_)) => delete = Some(path.clone()),
                    (Some(_), None) => add = Some(path.clone()),
                    (None, None) => {
                        let roles = vec![
                            "Use as DELETE file".to_string(),
                            "Use as ADD file".to_string(),
                        ];
                        if prompter.select("How should the selected file be used?", &roles, 0)?
                            == 0
                        {
                            delete = Some(path.clone());
                        } else {
                            add = Some(path.clone());
                        }
                    }
                    (Some(_), Some(_)) => {}
                }
            }
            let delete = match delete {
                Some(path) => path,
                None => required_path(prompter, "DELETE source file")?,
            };
            let add = match add {
                Some(path) => path,
                None => required_path(prompter, "ADD source file")?,
            };
            Ok(vec![
                input(delete, FileRole::Delete),
                input(add, FileRole::Add),
            ])
        }
    }
}

fn resolve_tables(
    requested: &[TableName],
    import_type: ImportType,
    prompter: &Prompter,
) -> Result<BTreeSet<TableName>> {
    let available: Vec<TableName> = TableName::UD_TABLES
        .into_iter()
        .filter(|table| import_type == ImportType::Variant || *table != TableName::Ud08)
        .collect();
    if !requested.is_empty() {
        return Ok(requested
            .iter()
            .copied()
            .filter(|table| available.contains(table))
            .collect());
    }
    let labels: Vec<String> = available.iter().map(ToString::to_string).collect();
    let defaults = vec![true; available.len()];
    let checked = prompter.multi_select(
        "Select tables to include in playlist",
        &labels,
        &defaults,
    )?;
    Ok(checked
        .into_iter()
        .filter_map(|index| available.get(index).copied())
        .collect())
}

/// Dropdown values ranked in UD09: `Key3` for Variant, `Key2` for Attribute.
///
/// Values are kept exactly as in the source so ranks match during derivation;
/// whitespace-only values are skipped.
fn sort_values(rows: &[SourceRow], import_type: ImportType) -> Vec<String> {
    let values: BTreeSet<&str> = rows
        .iter()
        .map(|row| match import_type {
            ImportType::Variant => row.key3.as_str(),
            ImportType::Attribute => row.key2.as_str(),
        })
        .filter(|value| !value.trim().is_empty())
        .collect();
    values.into_iter().map(str::to_string).collect()
}

fn resolve_sort(
    args: &BuildArgs,
    import_type: ImportType,
    rows: &[SourceRow],
    prompter: &Prompter,
) -> Result<SortAssignment> {
    if !args.sort.is_empty() || !prompter.is_interactive() {
        return Ok(args
            .sort
            .iter()
            .map(|entry| (entry.value.clone(), entry.rank))
            .collect());
    }
    let values = sort_values(rows, import_type);
    let mut assignment = SortAssignment::new();
    if values.is_empty() {
        return Ok(assignment);
    }
    println!("Configure UD09 sort order (Number01); leave blank to number automatically.");
    for value in values {
        if let Some(rank) = prompter.rank(&format!("Order for '{value}'"))? {
            assignment.assign(value, rank);
        }
    }
    Ok(assignment)
}

fn resolve_part(
    args: &BuildArgs,
    settings: &Settings,
    prompter: &Prompter,
) -> Result<Option<PartOptions>> {
    let parent_part = match &args.part {
        Some(parent) => parent.trim().to_string(),
        None if !prompter.is_interactive() => return Ok(None),
        None => {
            if !prompter.confirm("Create Part file?", true)? {
                return Ok(None);
            }
            prompter.text("Variant Parent Part ID", "")?
        }
    };
    if parent_part.is_empty() {
        bail!("a Part file needs a variant parent part id");
    }
    let new_part = resolve_new_part(&args.new_part, settings, prompter)?;
    let website = resolve_website(
        args.website.as_deref(),
        "Website",
        &settings.part_websites,
        settings.default_part_website(),
        prompter,
    )?;
    Ok(Some(PartOptions {
        parent_part,
        website,
        new_part,
    }))
}

fn resolve_new_part(
    args: &NewPartArgs,
    settings: &Settings,
    prompter: &Prompter,
) -> Result<Option<PartDetails>> {
    let is_new = args.new_part
        || (prompter.is_interactive() && prompter.confirm("Is this a new part number?", true)?);
    if !is_new {
        return Ok(None);
    }
    let description = match &args.description {
        Some(text) => text.clone(),
        None => prompter.text("PartDescription", "")?,
    };
    let prod_code = match &args.prod_code {
        Some(code) => code.clone(),
        None => prompter.text("ProdCode", "")?,
    };
    Ok(Some(
        PartDetails::new(description, prod_code)
            .with_class_id(&settings.class_id)
            .with_lifecycle_stage(&settings.lifecycle_stage),
    ))
}

fn resolve_website(
    given: Option<&str>,
    prompt: &str,
    choices: &[String],
    default: &str,
    prompter: &Prompter,
) -> Result<String> {
    if let Some(website) = given {
        return Ok(website.to_string());
    }
    if choices.is_empty() {
        return Ok(default.to_string());
    }
    let index = choices.iter().position(|c| c == default).unwrap_or(0);
    prompter.choose(prompt, choices, index)
}

fn resolve_categories(
    args: &CategoryArgs,
    default_parent: Option<String>,
    ask_by_default: bool,
    settings: &Settings,
    prompter: &Prompter,
) -> Result<Option<CategoryOptions>> {
    let mut categories: Vec<String> = args
        .categories
        .iter()
        .map(|category| category.trim().to_string())
        .filter(|category| !category.is_empty())
        .collect();
    let create_definitions = if categories.is_empty() {
        if !prompter.confirm("Work with categories?", ask_by_default)? {
            return Ok(None);
        }
        let kinds = vec![
            "New category (create UD08 + UD11)".to_string(),
            "Existing category (UD11 only)".to_string(),
        ];
        let default_kind = if args.new_category { 0 } else { 1 };
        prompter.select("Category type", &kinds, default_kind)? == 0
    } else {
        args.new_category
    };
    let website = resolve_website(
        args.website.as_deref(),
        "Website for category",
        &settings.category_websites,
        settings.default_category_website(),
        prompter,
    )?;
    if categories.is_empty() {
        categories = prompter.lines("Category string")?;
    }
    if categories.is_empty() {
        return Ok(None);
    }
    let parent_part = match args.parent.clone().or(default_parent) {
        Some(parent) => parent,
        None => prompter.text("Parent Part ID for category", "")?,
    };
    if parent_part.trim().is_empty() {
        bail!("categories need a parent part id (--category-parent)");
    }
    Ok(Some(CategoryOptions {
        website,
        categories,
        create_definitions,
        parent_part,
    }))
}
