//! Interactive chat session

use super::ChatArgs;
use crossterm::style::Stylize;
use inquire::{InquireError, Text};

/// Run the interactive chat loop
pub async fn run(args: ChatArgs) -> anyhow::Result<()> {
    println!("\n{}\n", "Metis — chat agent".blue().bold());

    let mut agent = super::build_agent(
        args.model,
        args.temperature,
        args.system,
        !args.no_tools,
        args.mcp_config.as_ref(),
    )?;

    let model = if agent.config().model.is_empty() {
        "provider default".to_string()
    } else {
        agent.config().model.clone()
    };
    println!("{}", format!("Model: {model}").dark_grey());
    println!(
        "{}",
        format!("Tools: {} available", agent.registry().len()).dark_grey()
    );
    println!(
        "\n{}\n",
        "Type your message, 'reset' to clear the conversation, 'exit' to quit".yellow()
    );

    loop {
        let line = match Text::new("You:").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let input = line.trim();

        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        if input.eq_ignore_ascii_case("reset") {
            agent.reset_conversation();
            println!("\n{}\n", "✓ Conversation reset".yellow());
            continue;
        }

        if input.is_empty() {
            continue;
        }

        match agent.send(input).await {
            Ok(answer) => {
                println!("\n{} {}\n", "Assistant:".green().bold(), answer);
            }
            Err(e) => {
                // Model/tool-loop failures end the turn, not the session
                eprintln!("\n{} {}\n", "Error:".red().bold(), e);
            }
        }
    }

    println!("\n{}\n", "Goodbye!".blue());
    Ok(())
}
