//! `/build problem-interview`: write an interview script for a persona.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use minijinja::context;

use super::commit_generated;
use crate::ai::PromptTemplate;
use crate::app::AppContext;
use crate::core::create_or_update_file;
use crate::ui::Prompter;

const PERSONA_PREFIX: &str = "customer-segment-";

/// Directory that receives interview scripts.
pub(crate) const DISCOVERY_DIR: &str = "customer-discovery";

/// The most recently modified `customer-segment-*.md` in `dir`.
pub(crate) fn latest_persona_file(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(PERSONA_PREFIX) && name.ends_with(".md")
        })
        .filter_map(|entry| {
            let meta = entry.metadata().ok()?;
            meta.is_file().then(|| (meta.modified().unwrap_or(SystemTime::UNIX_EPOCH), entry.path()))
        })
        .max()
        .map(|(_, path)| path)
}

/// Persona slug taken from a persona file name.
pub(crate) fn persona_slug(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .and_then(|stem| stem.strip_prefix(PERSONA_PREFIX).map(String::from))
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| "persona".to_string())
}

pub(crate) async fn run(ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<Option<PathBuf>> {
    println!("\n🎤 Problem Interview Script");

    let Some(persona_path) = latest_persona_file(&ctx.working_dir) else {
        println!("❌ No customer segment found. Run /build customer-segment first.");
        return Ok(None);
    };
    let persona_content = fs::read_to_string(&persona_path)
        .with_context(|| format!("Failed to read {}", persona_path.display()))?;
    let slug = persona_slug(&persona_path);
    println!("👤 Using persona from {}\n", persona_path.display());

    let definition = ui.input_required(
        "Provide a high-level definition of the customers you will interview:",
        "Please provide a customer definition",
    )?;
    let refinement = ui.input("Anything specific you want to validate? (optional):")?;

    println!("\n🤖 Writing interview script...");
    let prompt = ctx.prompts()?.render(
        PromptTemplate::ProblemInterview,
        context! {
            persona_content => &persona_content,
            high_level_definition => &definition,
            additional_refinement => &refinement,
        },
    )?;
    let script = ctx.generate_document(prompt).await?;

    let relative = Path::new(DISCOVERY_DIR).join(format!("interview-script-{slug}.md"));
    let path = create_or_update_file(&ctx.working_dir, &relative, &script)?;
    println!("📄 Created {}", relative.display());

    commit_generated(ctx, &[path.clone()], &format!("Add problem interview script for {slug}"), "interview script");

    println!("\n✅ Interview script ready!");
    println!("🗣️  Record each interview under customer-discovery/interviews/ to track your progress.");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_no_persona_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "# Acme").unwrap();
        assert_eq!(latest_persona_file(temp.path()), None);
    }

    #[test]
    fn test_latest_persona_wins() {
        let temp = TempDir::new().unwrap();
        let older = temp.path().join("customer-segment-sarah-johnson.md");
        let newer = temp.path().join("customer-segment-marcus-lee.md");
        fs::write(&older, "old").unwrap();
        fs::write(&newer, "new").unwrap();

        let past = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options().write(true).open(&older).unwrap().set_modified(past).unwrap();

        assert_eq!(latest_persona_file(temp.path()), Some(newer));
    }

    #[test]
    fn test_directories_and_other_files_ignored() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("customer-segment-dir.md")).unwrap();
        fs::write(temp.path().join("customer-segment-notes.txt"), "x").unwrap();
        assert_eq!(latest_persona_file(temp.path()), None);
    }

    #[test]
    fn test_persona_slug() {
        assert_eq!(persona_slug(Path::new("/p/customer-segment-sarah-johnson.md")), "sarah-johnson");
        assert_eq!(persona_slug(Path::new("customer-segment-.md")), "persona");
    }
}
