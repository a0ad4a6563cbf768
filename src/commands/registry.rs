//! Command registry and input parsing.
//!
//! Every slash command is described once in [`COMMANDS`]. Parsing maps user
//! input onto a typed [`Command`]; dispatch lives in the parent module.

use std::fmt;

use once_cell::sync::Lazy;

/// A resolved command ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init,
    /// Build menu, or a specific step
    Build(Option<BuildStep>),
    /// Problem analysis, optionally with the statement inline
    Problem(Option<String>),
    Cofounder,
    Model,
    Status,
    Clear,
    Help,
    Exit,
}

/// Steps offered by `/build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    CustomerSegment,
    ProblemAnalysis,
    ProblemInterview,
    MarketAnalysis,
    ValueProposition,
    BusinessModel,
    GoToMarket,
}

impl BuildStep {
    pub const ALL: [Self; 7] = [
        Self::CustomerSegment,
        Self::ProblemAnalysis,
        Self::ProblemInterview,
        Self::MarketAnalysis,
        Self::ValueProposition,
        Self::BusinessModel,
        Self::GoToMarket,
    ];

    /// Subcommand name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CustomerSegment => "customer-segment",
            Self::ProblemAnalysis => "problem-analysis",
            Self::ProblemInterview => "problem-interview",
            Self::MarketAnalysis => "market-analysis",
            Self::ValueProposition => "value-proposition",
            Self::BusinessModel => "business-model",
            Self::GoToMarket => "go-to-market",
        }
    }

    /// Short description for help output.
    pub const fn description(self) -> &'static str {
        match self {
            Self::CustomerSegment => "Create customer personas",
            Self::ProblemAnalysis => "Identify top problems",
            Self::ProblemInterview => "Write a problem interview script",
            Self::MarketAnalysis => "Analyze market opportunity",
            Self::ValueProposition => "Define your unique value",
            Self::BusinessModel => "Design your business model",
            Self::GoToMarket => "Plan your launch",
        }
    }

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CustomerSegment => "🎯 Customer Segment - Create detailed customer personas",
            Self::ProblemAnalysis => "🔍 Problem Analysis - Prioritize the top problems",
            Self::ProblemInterview => "🎤 Problem Interview - Script your customer interviews",
            Self::MarketAnalysis => "📊 Market Analysis - Analyze your market opportunity",
            Self::ValueProposition => "💡 Value Proposition - Define your unique value",
            Self::BusinessModel => "🛣️  Business Model - Design your business model",
            Self::GoToMarket => "📈 Go-to-Market Strategy - Plan your launch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|step| step.name() == name)
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Command category for organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandCategory {
    Core,
    Build,
    System,
}

impl CommandCategory {
    pub const ALL: [Self; 3] = [Self::Core, Self::Build, Self::System];

    /// Get display name for the category.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Core => "Core",
            Self::Build => "Build",
            Self::System => "System",
        }
    }
}

/// A subcommand listed under its parent in help output.
#[derive(Debug, Clone)]
pub struct SubCommand {
    pub name: &'static str,
    pub description: &'static str,
}

/// A slash command.
#[derive(Debug, Clone)]
pub struct CommandDefinition {
    /// Name typed after the slash
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: CommandCategory,
    pub subcommands: Vec<SubCommand>,
    resolve: fn(Option<&str>) -> Option<Command>,
}

impl CommandDefinition {
    /// Map arguments onto a command; `None` when they name no subcommand.
    pub fn resolve(&self, args: Option<&str>) -> Option<Command> {
        (self.resolve)(args)
    }
}

/// All available slash commands.
pub static COMMANDS: Lazy<Vec<CommandDefinition>> = Lazy::new(|| {
    vec![
        CommandDefinition {
            name: "init",
            description: "Initialize a new startup project",
            icon: "🎯",
            category: CommandCategory::Core,
            subcommands: Vec::new(),
            resolve: |_| Some(Command::Init),
        },
        CommandDefinition {
            name: "problem",
            description: "Analyze your problem definition (problem/problem.md)",
            icon: "🔍",
            category: CommandCategory::Core,
            subcommands: Vec::new(),
            resolve: |args| Some(Command::Problem(args.map(String::from))),
        },
        CommandDefinition {
            name: "cofounder",
            description: "Run the co-founder alignment questionnaire",
            icon: "🤝",
            category: CommandCategory::Core,
            subcommands: Vec::new(),
            resolve: |_| Some(Command::Cofounder),
        },
        CommandDefinition {
            name: "build",
            description: "Build startup components (problem-analysis, customer-segment, etc.)",
            icon: "🚀",
            category: CommandCategory::Build,
            subcommands: BuildStep::ALL
                .iter()
                .map(|step| SubCommand { name: step.name(), description: step.description() })
                .collect(),
            resolve: |args| match args {
                None => Some(Command::Build(None)),
                Some(name) => BuildStep::from_name(name).map(|step| Command::Build(Some(step))),
            },
        },
        CommandDefinition {
            name: "model",
            description: "Configure the AI provider and API key",
            icon: "🧠",
            category: CommandCategory::System,
            subcommands: Vec::new(),
            resolve: |_| Some(Command::Model),
        },
        CommandDefinition {
            name: "status",
            description: "Show goals, progress and AI status",
            icon: "📊",
            category: CommandCategory::System,
            subcommands: Vec::new(),
            resolve: |_| Some(Command::Status),
        },
        CommandDefinition {
            name: "clear",
            description: "Clear the conversation history",
            icon: "🧹",
            category: CommandCategory::System,
            subcommands: Vec::new(),
            resolve: |_| Some(Command::Clear),
        },
        CommandDefinition {
            name: "help",
            description: "Show this help information",
            icon: "ℹ️",
            category: CommandCategory::System,
            subcommands: Vec::new(),
            resolve: |_| Some(Command::Help),
        },
        CommandDefinition {
            name: "exit",
            description: "Exit the application",
            icon: "👋",
            category: CommandCategory::System,
            subcommands: Vec::new(),
            resolve: |_| Some(Command::Exit),
        },
    ]
});

/// Look up a command by name (case-insensitive).
pub fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    let name = name.to_lowercase();
    COMMANDS.iter().find(|c| c.name == name)
}

/// Commands in a category, in registry order.
pub fn commands_by_category(category: CommandCategory) -> impl Iterator<Item = &'static CommandDefinition> {
    COMMANDS.iter().filter(move |c| c.category == category)
}

/// Every command name, prefixed with a slash.
pub fn command_names() -> Vec<String> {
    COMMANDS.iter().map(|c| format!("/{}", c.name)).collect()
}

/// What a line of user input means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A recognised slash command
    Command(Command),
    /// A slash command that matched nothing; holds the text after the slash
    Unknown(String),
    /// Free text for the LLM
    Text(String),
    /// Blank line
    Empty,
}

/// Classify a line of input.
pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(body) = line.strip_prefix('/') else {
        return Input::Text(line.to_string());
    };

    let (name, args) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim()).filter(|r| !r.is_empty())),
        None => (body, None),
    };

    match find_command(name).and_then(|def| def.resolve(args)) {
        Some(command) => Input::Command(command),
        None => Input::Unknown(body.to_string()),
    }
}

/// Parse a direct CLI invocation such as `startup build customer-segment`.
///
/// A leading slash on the first word is optional.
pub fn parse_cli_command(words: &[String]) -> Input {
    let joined = words.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if trimmed.starts_with('/') {
        parse_input(trimmed)
    } else {
        parse_input(&format!("/{trimmed}"))
    }
}

/// Help text listing every command.
pub fn help_text() -> String {
    let mut lines: Vec<String> = vec!["\n📖 Available Slash Commands:".to_string()];

    for category in CommandCategory::ALL {
        lines.push(format!("\n  {}:", category.display_name()));
        for command in commands_by_category(category) {
            lines.push(format!("  {} /{}  - {}", command.icon, command.name, command.description));
            for sub in &command.subcommands {
                lines.push(format!("    • /{} {} - {}", command.name, sub.name, sub.description));
            }
        }
    }

    lines.push("\nInteractive Input:".to_string());
    lines.push("  📝 <text> - Chat with your AI startup coach".to_string());
    lines.push("  💬 Use slash commands (/) for explicit commands".to_string());

    lines.push("\nCLI Options:".to_string());
    lines.push("  -d, --directory <dir>  Specify working directory (default: current directory)".to_string());
    lines.push("  -v, --verbose         Show debug logging".to_string());
    lines.push("  -h, --help            Show help information".to_string());

    lines.push("\nUsage:".to_string());
    lines.push("  startup                            # Interactive mode in current directory".to_string());
    lines.push("  startup <command>                  # Direct command execution (without /)".to_string());
    lines.push("  startup -d /path/to/dir            # Interactive mode in custom directory".to_string());
    lines.push("  startup -d /path/to/dir <command>  # Direct command in custom directory".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_unique() {
        let mut names: Vec<&str> = COMMANDS.iter().map(|c| c.name).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_input("/init"), Input::Command(Command::Init));
        assert_eq!(parse_input("/STATUS"), Input::Command(Command::Status));
        assert_eq!(parse_input("  /help  "), Input::Command(Command::Help));
        assert_eq!(parse_input("/exit"), Input::Command(Command::Exit));
        assert_eq!(parse_input("/clear"), Input::Command(Command::Clear));
        assert_eq!(parse_input("/cofounder"), Input::Command(Command::Cofounder));
        assert_eq!(parse_input("/model"), Input::Command(Command::Model));
    }

    #[test]
    fn test_parse_build_steps() {
        assert_eq!(parse_input("/build"), Input::Command(Command::Build(None)));
        assert_eq!(
            parse_input("/build customer-segment"),
            Input::Command(Command::Build(Some(BuildStep::CustomerSegment)))
        );
        assert_eq!(
            parse_input("/Build Market-Analysis"),
            Input::Command(Command::Build(Some(BuildStep::MarketAnalysis)))
        );
        assert_eq!(parse_input("/build rocket"), Input::Unknown("build rocket".to_string()));
    }

    #[test]
    fn test_parse_problem_keeps_text_case() {
        assert_eq!(parse_input("/problem"), Input::Command(Command::Problem(None)));
        assert_eq!(
            parse_input("/problem SaaS founders   waste hours"),
            Input::Command(Command::Problem(Some("SaaS founders   waste hours".to_string())))
        );
    }

    #[test]
    fn test_parse_unknown_and_text() {
        assert_eq!(parse_input("/deploy"), Input::Unknown("deploy".to_string()));
        assert_eq!(parse_input("How do I find customers?"), Input::Text("How do I find customers?".to_string()));
        assert_eq!(parse_input("   "), Input::Empty);
    }

    #[test]
    fn test_parse_cli_command() {
        let words = |s: &str| s.split(' ').map(String::from).collect::<Vec<_>>();
        assert_eq!(parse_cli_command(&words("status")), Input::Command(Command::Status));
        assert_eq!(parse_cli_command(&words("/status")), Input::Command(Command::Status));
        assert_eq!(
            parse_cli_command(&words("build problem-interview")),
            Input::Command(Command::Build(Some(BuildStep::ProblemInterview)))
        );
        assert_eq!(parse_cli_command(&words("launch")), Input::Unknown("launch".to_string()));
        assert_eq!(parse_cli_command(&[]), Input::Empty);
    }

    #[test]
    fn test_build_step_roundtrip_names() {
        for step in BuildStep::ALL {
            assert_eq!(BuildStep::from_name(step.name()), Some(step));
        }
        assert_eq!(BuildStep::from_name("nope"), None);
    }

    #[test]
    fn test_help_lists_everything() {
        let help = help_text();
        for command in COMMANDS.iter() {
            assert!(help.contains(&format!("/{}", command.name)), "missing /{}", command.name);
        }
        for step in BuildStep::ALL {
            assert!(help.contains(&format!("/build {}", step.name())));
        }
        assert!(help.contains("--directory"));
        assert!(help.contains("\n  Build:\n  🚀 /build"));
    }

    #[test]
    fn test_categories_cover_registry() {
        let total: usize = CommandCategory::ALL.iter().map(|c| commands_by_category(*c).count()).sum();
        assert_eq!(total, COMMANDS.len());
    }
}
