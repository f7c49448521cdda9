//! Code generation orchestration
//!
//! Prepares the output directory and writes one repository file per model.
//! Models are processed strictly in order and the first failure aborts the
//! run; files already written stay on disk.

use crate::dmmf::Model;
use crate::error::GeneratorError;
use crate::options::GeneratorOptions;
use crate::repository;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a successful run
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// Written files, in model order
    pub files: Vec<PathBuf>,
}

/// Run a generation request from the host compiler
pub fn generate(options: &GeneratorOptions) -> Result<GenerationSummary, GeneratorError> {
    let output_dir = options.output_dir()?;

    // The host already applied the client's preview features when it built the DMMF
    match options.client_generator() {
        Some(client) => info!(
            generator = %client.name,
            preview_features = ?client.preview_features,
            "using client generator"
        ),
        None => debug!("no {} generator declared", crate::options::CLIENT_PROVIDER),
    }

    // Extract before touching the file system so a bad schema writes nothing
    let document = options.document()?;

    generate_models(&document.datamodel.models, &output_dir)
}

/// Write repositories for `models` into `output_dir`, replacing earlier output
pub fn generate_models(
    models: &[Model],
    output_dir: &Path,
) -> Result<GenerationSummary, GeneratorError> {
    fs::create_dir_all(output_dir).map_err(|e| GeneratorError::io(output_dir, e))?;
    clear_dir(output_dir)?;

    info!(
        output = %output_dir.display(),
        models = models.len(),
        "generating repositories"
    );

    let mut summary = GenerationSummary::default();

    for model in models {
        let plan = repository::plan(model);
        debug!(
            model = %model.name,
            methods = ?plan.method_names(),
            alias = %plan.alias_type,
            "planned repository"
        );

        let path = output_dir.join(plan.relative_path());
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| GeneratorError::io(dir, e))?;
        }

        fs::write(&path, repository::render(&plan)).map_err(|e| GeneratorError::io(&path, e))?;
        info!(path = %path.display(), "wrote repository");

        summary.files.push(path);
    }

    Ok(summary)
}

/// Remove everything inside `dir`, keeping `dir` itself
fn clear_dir(dir: &Path) -> Result<(), GeneratorError> {
    let entries = fs::read_dir(dir).map_err(|e| GeneratorError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| GeneratorError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| GeneratorError::io(&path, e))?;

        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| GeneratorError::io(&path, e))?;
    }

    Ok(())
}
