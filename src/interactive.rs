//! Interactive mode.
//!
//! Reads lines until `/exit`, Ctrl+C or end of input. Slash commands are
//! dispatched to [`crate::commands`]; anything else is a chat message for
//! the startup coach.

use minijinja::context;

use crate::ai::{chat_tools, run_tool_call, ChatMessage, CompletionRequest, PromptTemplate, ToolCall, WorkspaceContext};
use crate::app::AppContext;
use crate::commands::{self, command_names, parse_input, status_report, Command, Flow, Input};
use crate::core::{format_llm_response, log_command, Role};
use crate::ui::{PromptError, Prompter};

/// Exit cleanly on Ctrl+C while blocked on input.
pub fn install_interrupt_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        println!("\n👋 Goodbye!");
        std::process::exit(0);
    })?;
    Ok(())
}

/// Run the read-dispatch loop until the user leaves.
pub async fn run(ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<()> {
    print_welcome(ctx);

    loop {
        let line = match ui.input(">") {
            Ok(line) => line,
            Err(PromptError::Closed) => {
                println!("\n👋 Goodbye!");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if handle_line(&line, ctx, ui).await == Flow::Exit {
            return Ok(());
        }
    }
}

/// Handle one line of input. Errors are reported, never returned.
pub async fn handle_line(line: &str, ctx: &mut AppContext, ui: &mut dyn Prompter) -> Flow {
    match parse_input(line) {
        Input::Empty => {
            ui.notice("Please enter a command or message");
            Flow::Continue
        }
        Input::Command(command) => run_command(line.trim(), &command, ctx, ui).await,
        Input::Unknown(body) => {
            println!("{}", ctx.theme.error(format!("❌ Unknown command: /{body}")));
            println!("Available slash commands: {}", command_names().join(", "));
            println!("Type /help to see all available commands.");
            Flow::Continue
        }
        Input::Text(text) => {
            match chat(&text, ctx).await {
                Ok(response) => println!("\n{}\n", format_llm_response(&response)),
                Err(e) => {
                    println!("{}", ctx.theme.error(format!("❌ {e:#}")));
                    println!("💡 Slash commands still work: {}", command_names().join(", "));
                }
            }
            Flow::Continue
        }
    }
}

async fn run_command(text: &str, command: &Command, ctx: &mut AppContext, ui: &mut dyn Prompter) -> Flow {
    if let Err(e) = log_command(&ctx.working_dir, text) {
        tracing::warn!("Could not write command log: {e:#}");
    }
    remember(ctx, Role::User, text);
    println!("🚀 Executing command: {text}");

    let flow = match commands::execute(command, ctx, ui).await {
        Ok(flow) => flow,
        Err(e) => {
            println!("{}", ctx.theme.error(format!("❌ Error: {e:#}")));
            Flow::Continue
        }
    };

    if *command != Command::Clear {
        remember(ctx, Role::Assistant, format!("Executed command: {}", text.trim_start_matches('/')));
    }
    flow
}

/// Send a chat message with workspace context and recent history.
///
/// The coach may answer with file writes; those run before the reply is
/// returned. Both turns are stored only once the request has succeeded.
async fn chat(text: &str, ctx: &mut AppContext) -> anyhow::Result<String> {
    let workspace = WorkspaceContext::gather(&ctx.working_dir, ctx.config.ai.context_max_chars);
    tracing::debug!("{}", workspace.summarize());

    let system = ctx.prompts()?.render(
        PromptTemplate::System,
        context! {
            context => workspace.render(),
            project_name => &workspace.project_name,
            current_date => &workspace.current_date,
        },
    )?;

    let mut messages: Vec<ChatMessage> = ctx
        .history
        .recent(ctx.config.ai.history_messages)
        .iter()
        .map(|m| ChatMessage { role: m.role, content: m.content.clone() })
        .collect();
    messages.push(ChatMessage::user(text));

    let mut request = CompletionRequest::prompt(text).with_system(system).with_tools(chat_tools());
    request.messages = messages;

    let completion = ctx.complete(request).await?;
    let saved = run_tool_calls(ctx, &completion.tool_calls);

    let response = if completion.text.trim().is_empty() && !saved.is_empty() {
        format!("Saved {}", saved.join(", "))
    } else {
        completion.text
    };

    remember(ctx, Role::User, text);
    remember(ctx, Role::Assistant, &response);
    Ok(response)
}

/// Execute tool calls from the coach. Failures are reported and skipped.
///
/// Returns the project-relative paths that were written.
fn run_tool_calls(ctx: &AppContext, calls: &[ToolCall]) -> Vec<String> {
    let mut saved = Vec::new();
    for call in calls {
        match run_tool_call(&ctx.working_dir, call) {
            Ok(path) => {
                let shown = path.strip_prefix(&ctx.working_dir).unwrap_or(&path).display().to_string();
                println!("{}", ctx.theme.success(format!("💾 Saved {shown}")));
                saved.push(shown);
            }
            Err(e) => {
                tracing::warn!(tool = %call.name, "Tool call failed: {e}");
                println!("{}", ctx.theme.warning(format!("⚠️  {}: {e}", call.name)));
            }
        }
    }
    saved
}

fn remember(ctx: &mut AppContext, role: Role, content: impl Into<String>) {
    if let Err(e) = ctx.history.add(role, content) {
        tracing::warn!("Could not save conversation history: {e:#}");
    }
}

fn print_welcome(ctx: &AppContext) {
    let theme = &ctx.theme;
    println!("{}", theme.heading(format!("🚀 Startup CLI v{}", crate::VERSION)));
    println!("{}", theme.dim(format!("📁 Working directory: {}", ctx.working_dir.display())));
    println!();
    status_report(ctx).print(theme);
    println!();
    println!("Commands: {}", theme.command(command_names().join(" ")));
    println!("{}", theme.dim("Type a message to chat with your startup coach, or /help for details."));
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::ai::{AIProvider, Completion, Usage};
    use crate::core::{command_log, Config};
    use crate::ui::ScriptedPrompter;

    #[derive(Clone, Default)]
    struct RecordingProvider {
        requests: Arc<Mutex<Vec<CompletionRequest>>>,
        tool_calls: Vec<ToolCall>,
        fail: bool,
    }

    impl RecordingProvider {
        fn calling(tool_calls: Vec<ToolCall>) -> Self {
            Self { tool_calls, ..Self::default() }
        }
    }

    #[async_trait]
    impl AIProvider for RecordingProvider {
        async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<Completion> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                anyhow::bail!("rate limited");
            }
            if !self.tool_calls.is_empty() {
                return Ok(Completion { tool_calls: self.tool_calls.clone(), ..Completion::default() });
            }
            Ok(Completion {
                text: "Talk to ten customers.".into(),
                usage: Usage { prompt_tokens: 7, completion_tokens: 3 },
                tool_calls: Vec::new(),
            })
        }

        fn name(&self) -> &str {
            "recording"
        }

        fn model(&self) -> &str {
            "recording-1"
        }
    }

    fn context_with(provider: &RecordingProvider) -> (TempDir, AppContext) {
        let temp = TempDir::new().unwrap();
        let ctx = AppContext::new(temp.path().to_path_buf(), Config::default()).with_provider(Box::new(provider.clone()));
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_chat_sends_system_prompt_and_history() {
        let provider = RecordingProvider::default();
        let (temp, mut ctx) = context_with(&provider);
        std::fs::write(temp.path().join("README.md"), "# Acme\nDog walking marketplace").unwrap();
        let mut ui = ScriptedPrompter::default();

        handle_line("How do I find customers?", &mut ctx, &mut ui).await;
        handle_line("And then?", &mut ctx, &mut ui).await;

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].system.as_deref().unwrap().contains("Dog walking marketplace"));
        assert_eq!(requests[0].messages, vec![ChatMessage::user("How do I find customers?")]);
        assert_eq!(
            requests[1].messages,
            vec![
                ChatMessage::user("How do I find customers?"),
                ChatMessage::assistant("Talk to ten customers."),
                ChatMessage::user("And then?"),
            ]
        );
        assert_eq!(ctx.history.len(), 4);
        assert_eq!(ctx.tokens.sent, 14);
    }

    #[tokio::test]
    async fn test_chat_runs_file_tool_calls() {
        let provider = RecordingProvider::calling(vec![ToolCall::new(
            crate::ai::CREATE_OR_UPDATE_FILE,
            serde_json::json!({"path": "notes/pricing.md", "content": "# Pricing\nFreemium"}),
        )]);
        let (temp, mut ctx) = context_with(&provider);
        let mut ui = ScriptedPrompter::default();

        handle_line("Write my pricing notes to a file", &mut ctx, &mut ui).await;

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].tools, chat_tools());
        assert_eq!(std::fs::read_to_string(temp.path().join("notes/pricing.md")).unwrap(), "# Pricing\nFreemium");
        let contents: Vec<&str> = ctx.history.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["Write my pricing notes to a file", "Saved notes/pricing.md"]);
    }

    #[tokio::test]
    async fn test_chat_skips_writes_outside_project() {
        let provider = RecordingProvider::calling(vec![
            ToolCall::new(crate::ai::CREATE_OR_UPDATE_FILE, serde_json::json!({"path": "../outside.md", "content": "x"})),
            ToolCall::new(crate::ai::CREATE_OR_UPDATE_FILE, serde_json::json!({"path": "inside.md", "content": "y"})),
        ]);
        let (temp, mut ctx) = context_with(&provider);
        let mut ui = ScriptedPrompter::default();

        assert_eq!(handle_line("save both", &mut ctx, &mut ui).await, Flow::Continue);

        assert!(!temp.path().parent().unwrap().join("outside.md").exists());
        assert_eq!(std::fs::read_to_string(temp.path().join("inside.md")).unwrap(), "y");
        assert_eq!(ctx.history.messages()[1].content, "Saved inside.md");
    }

    #[tokio::test]
    async fn test_failed_chat_leaves_history_untouched() {
        let failing = RecordingProvider { fail: true, ..RecordingProvider::default() };
        let (_temp, mut ctx) = context_with(&failing);
        let mut ui = ScriptedPrompter::default();

        assert_eq!(handle_line("Is this idea any good?", &mut ctx, &mut ui).await, Flow::Continue);
        assert!(ctx.history.is_empty());

        // The next request carries no orphaned user turn.
        handle_line("Hello again", &mut ctx, &mut ui).await;
        let requests = failing.requests.lock().unwrap();
        assert_eq!(requests[1].messages, vec![ChatMessage::user("Hello again")]);
    }

    #[tokio::test]
    async fn test_history_window_is_limited() {
        let provider = RecordingProvider::default();
        let (_temp, mut ctx) = context_with(&provider);
        ctx.config.ai.history_messages = 1;
        let mut ui = ScriptedPrompter::default();

        handle_line("first", &mut ctx, &mut ui).await;
        handle_line("second", &mut ctx, &mut ui).await;

        let requests = provider.requests.lock().unwrap();
        assert_eq!(
            requests[1].messages,
            vec![ChatMessage::assistant("Talk to ten customers."), ChatMessage::user("second")]
        );
    }

    #[tokio::test]
    async fn test_slash_command_is_logged() {
        let provider = RecordingProvider::default();
        let (temp, mut ctx) = context_with(&provider);
        let mut ui = ScriptedPrompter::default();

        assert_eq!(handle_line("/help", &mut ctx, &mut ui).await, Flow::Continue);

        let log = command_log(temp.path());
        assert_eq!(log.len(), 1);
        assert!(log[0].ends_with(" - /help"));
        let contents: Vec<&str> = ctx.history.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["/help", "Executed command: help"]);
        assert!(provider.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_and_empty_input_continue() {
        let provider = RecordingProvider::default();
        let (_temp, mut ctx) = context_with(&provider);
        let mut ui = ScriptedPrompter::default();

        assert_eq!(handle_line("/launch-rocket", &mut ctx, &mut ui).await, Flow::Continue);
        assert_eq!(handle_line("   ", &mut ctx, &mut ui).await, Flow::Continue);
        assert_eq!(ui.notices(), ["Please enter a command or message"]);
        assert!(ctx.history.is_empty());
    }

    #[tokio::test]
    async fn test_exit_and_end_of_input_stop_loop() {
        let provider = RecordingProvider::default();
        let (_temp, mut ctx) = context_with(&provider);

        let mut ui = ScriptedPrompter::new(["/exit", "never read"]);
        run(&mut ctx, &mut ui).await.unwrap();
        assert_eq!(ui.remaining(), 1);

        let mut ui = ScriptedPrompter::new(["/status"]);
        run(&mut ctx, &mut ui).await.unwrap();
        assert_eq!(ui.remaining(), 0);
    }

    #[tokio::test]
    async fn test_command_errors_do_not_stop_loop() {
        let provider = RecordingProvider::default();
        let (_temp, mut ctx) = context_with(&provider);
        // Input closes in the middle of /cofounder.
        let mut ui = ScriptedPrompter::new(["Impact"]);

        assert_eq!(handle_line("/cofounder", &mut ctx, &mut ui).await, Flow::Continue);
    }
}
