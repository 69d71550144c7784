//! Add-all command implementation
//!
//! Bulk import: lists every markdown file under a GitHub source and registers
//! one rule per file. Rule names are the listing paths relative to the source
//! path with the `.md` suffix stripped; the rule source strings are rebuilt
//! from the original (pre-resolution) source so alias indirection survives.

use std::path::PathBuf;

use crate::cli::AddAllArgs;
use crate::commands::workspace_paths;
use crate::config;
use crate::error::{Result, RuleshareError};
use crate::lister::{self, ListedFile};
use crate::naming;
use crate::resolver::{self, ResolvedSource};

pub fn run(workspace: Option<PathBuf>, args: AddAllArgs) -> Result<()> {
    let paths = workspace_paths(workspace)?;
    let mut config = config::read_config(&paths)?.unwrap_or_default();

    let outcome = resolver::resolve(&args.source, &config)?;
    let ResolvedSource::GitHub {
        owner,
        repo,
        path,
        git_ref,
    } = &outcome.resolved
    else {
        return Err(RuleshareError::NotAGitHubSource);
    };

    let files = lister::list_files(owner, repo, path, git_ref.as_deref())?;
    let plan = plan_rules(&files, path, &outcome.original_source);

    for (name, reason) in &plan.skipped {
        eprintln!("  skipping \"{}\": {}", name, reason);
    }

    if plan.added.is_empty() {
        println!("No .md files found in source");
        return Ok(());
    }

    for (name, source) in &plan.added {
        config.rules.insert(name.clone(), source.clone());
    }
    config::write_config(&paths, &config)?;

    println!("Added {} rules:", plan.added.len());
    for (name, _) in &plan.added {
        println!("  {}", name);
    }

    Ok(())
}

/// Planned bulk import: rules to add and candidates skipped with a reason
#[derive(Debug, Default)]
pub struct ImportPlan {
    pub added: Vec<(String, String)>,
    pub skipped: Vec<(String, String)>,
}

/// Derive rule names and source strings from a listing
///
/// Keeps `.md` blobs except readme.md (case-insensitive base name); invalid
/// rule names are skipped, not fatal.
fn plan_rules(files: &[ListedFile], base_path: &str, original_source: &str) -> ImportPlan {
    let mut plan = ImportPlan::default();

    for file in files {
        let Some(relative) = relative_markdown_path(&file.path, base_path) else {
            continue;
        };

        let name = relative.trim_end_matches(".md").to_string();
        match naming::validate_rule_name(&name) {
            Ok(()) => {
                let source = resolver::combine_source_and_path(original_source, relative);
                plan.added.push((name, source));
            }
            Err(e) => plan.skipped.push((name, e.to_string())),
        }
    }

    plan
}

/// Listing path relative to the base, when it is an importable markdown file
fn relative_markdown_path<'a>(path: &'a str, base_path: &str) -> Option<&'a str> {
    let relative = if base_path.is_empty() {
        path
    } else {
        path.strip_prefix(base_path)?.strip_prefix('/')?
    };

    if !relative.ends_with(".md") {
        return None;
    }

    let base_name = relative.rsplit('/').next().unwrap_or(relative);
    if base_name.eq_ignore_ascii_case("readme.md") {
        return None;
    }

    Some(relative)
}
