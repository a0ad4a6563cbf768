//! Prompt templates.
//!
//! Built-in templates are compiled into the binary. A project can replace any
//! of them by placing `prompts/<name>.txt` in its working directory; override
//! files use the same minijinja syntax and variables as the built-ins.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use minijinja::Environment;
use serde::Serialize;
use tracing::debug;

const SYSTEM_TEMPLATE: &str = include_str!("prompts/system.md");
const CUSTOMER_PERSONA_TEMPLATE: &str = include_str!("prompts/customer_persona.md");
const PROBLEM_DESCRIPTION_TEMPLATE: &str = include_str!("prompts/problem_description.md");
const PROBLEM_INTERVIEW_TEMPLATE: &str = include_str!("prompts/problem_interview.md");
const PROBLEM_ANALYSIS_TEMPLATE: &str = include_str!("prompts/problem_analysis.md");
const MARKET_ANALYSIS_TEMPLATE: &str = include_str!("prompts/market_analysis.md");

/// Directory checked for project-level overrides.
pub const OVERRIDE_DIR: &str = "prompts";

/// The prompts the CLI knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Startup-coach persona; variables: `context`, optional `project_name`, `current_date`
    System,
    /// Variables: `high_level_definition`, `additional_refinement`
    CustomerPersona,
    /// Variables: `problem_description`
    ProblemDescription,
    /// Variables: `persona_content`, `high_level_definition`, `additional_refinement`
    ProblemInterview,
    /// Variables: `product_idea`, `target_customer`, `initial_problems`, `additional_context`
    ProblemAnalysis,
    /// Variables: `product_description`, `target_market`, `additional_context`
    MarketAnalysis,
}

impl PromptTemplate {
    pub const ALL: [Self; 6] = [
        Self::System,
        Self::CustomerPersona,
        Self::ProblemDescription,
        Self::ProblemInterview,
        Self::ProblemAnalysis,
        Self::MarketAnalysis,
    ];

    /// Template name, also the override file stem.
    pub const fn name(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::CustomerPersona => "customer-persona",
            Self::ProblemDescription => "problem-description",
            Self::ProblemInterview => "problem-interview",
            Self::ProblemAnalysis => "problem-analysis",
            Self::MarketAnalysis => "market-analysis",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::System => SYSTEM_TEMPLATE,
            Self::CustomerPersona => CUSTOMER_PERSONA_TEMPLATE,
            Self::ProblemDescription => PROBLEM_DESCRIPTION_TEMPLATE,
            Self::ProblemInterview => PROBLEM_INTERVIEW_TEMPLATE,
            Self::ProblemAnalysis => PROBLEM_ANALYSIS_TEMPLATE,
            Self::MarketAnalysis => MARKET_ANALYSIS_TEMPLATE,
        }
    }
}

/// Template engine wrapper around minijinja.
pub struct PromptLibrary {
    env: Environment<'static>,
    override_dir: Option<PathBuf>,
}

impl PromptLibrary {
    /// Load the built-in templates.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for template in PromptTemplate::ALL {
            env.add_template(template.name(), template.source())
                .with_context(|| format!("Invalid built-in template '{}'", template.name()))?;
        }
        Ok(Self { env, override_dir: None })
    }

    /// Built-in templates plus overrides from `<project_dir>/prompts`.
    pub fn for_project(project_dir: &Path) -> Result<Self> {
        let mut library = Self::new()?;
        library.override_dir = Some(project_dir.join(OVERRIDE_DIR));
        Ok(library)
    }

    /// Path of the override file for a template, if overrides are enabled.
    pub fn override_path(&self, template: PromptTemplate) -> Option<PathBuf> {
        self.override_dir.as_ref().map(|dir| dir.join(format!("{}.txt", template.name())))
    }

    /// Render a template with the given variables.
    pub fn render<S: Serialize>(&self, template: PromptTemplate, vars: S) -> Result<String> {
        if let Some(path) = self.override_path(template).filter(|p| p.is_file()) {
            debug!(path = %path.display(), "Using prompt override");
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return self
                .env
                .render_str(&source, vars)
                .with_context(|| format!("Failed to render {}", path.display()));
        }

        let rendered = self.env.get_template(template.name())?.render(vars)?;
        Ok(rendered)
    }
}
