// UI layer: provides the interactive menu using `dialoguer`.
// The functions are small and synchronous to make the flow easy to follow.

use crate::config::{Config, TOPIC_IDEAS};
use crate::generator::{ContentGenerator, ContentType};
use crate::storage::ContentStore;
use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const RULE_WIDTH: usize = 60;

/// Blog posts are previewed rather than dumped in full.
const BLOG_PREVIEW_CHARS: usize = 1000;

/// Main interactive menu. Runs a select loop until the user chooses "Exit".
///
/// Note: `Select::interact()` is keyboard-driven: arrow keys and Enter
/// choose an option. Errors inside one iteration are printed and the loop
/// continues; only terminal-level failures end the loop.
pub fn main_menu(config: &Config, generator: &ContentGenerator, store: &ContentStore) -> Result<()> {
    banner(config);
    loop {
        let items = vec![
            "Generate Twitter thread",
            "Generate LinkedIn post",
            "Generate blog post",
            "Content ideas",
            "View saved content",
            "Exit",
        ];
        println!();
        let selection = Select::new().items(&items).default(0).interact()?;
        let step = match selection {
            0 => handle_generate(generator, store, ContentType::TwitterThread),
            1 => handle_generate(generator, store, ContentType::LinkedinPost),
            2 => handle_generate(generator, store, ContentType::BlogPost),
            3 => {
                show_ideas();
                Ok(())
            }
            4 => show_saved(store),
            5 => break,
            _ => Ok(()),
        };
        if let Err(e) = step {
            println!("Error: {e:#}");
        }
    }
    println!("Thanks for using the content system!");
    Ok(())
}

fn banner(config: &Config) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("    AI CONTENT CREATION SYSTEM");
    println!("    Company: {}", config.company.name);
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Prompt for a topic, run one generation with a spinner, then display and
/// save the result. A blank topic returns to the menu without a request.
fn handle_generate(
    generator: &ContentGenerator,
    store: &ContentStore,
    content_type: ContentType,
) -> Result<()> {
    let topic: String = Input::new()
        .with_prompt(format!("Enter {} topic", content_type.display_name()))
        .allow_empty(true)
        .interact_text()?;
    if topic.trim().is_empty() {
        println!("No topic entered.");
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(format!(
        "Generating {}: {}",
        content_type.display_name(),
        topic.trim()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = generator.generate(&topic, content_type);
    spinner.finish_and_clear();

    match result.content() {
        Some(content) => {
            println!("\n{} generated:", content_type.display_name());
            println!("{}", "=".repeat(RULE_WIDTH));
            println!("{}", preview_text(content, content_type));
            println!("{}", "=".repeat(RULE_WIDTH));
            let path = store.save(&result)?;
            println!("Content saved to: {}", path.display());
        }
        None => {
            println!(
                "Generation failed: {}",
                result.error_message().unwrap_or("unknown error")
            );
        }
    }
    Ok(())
}

fn show_ideas() {
    println!("\nContent topic ideas:");
    for (i, topic) in TOPIC_IDEAS.iter().enumerate() {
        println!("{:2}. {}", i + 1, topic);
    }
}

fn show_saved(store: &ContentStore) -> Result<()> {
    let files = store.list_recent()?;
    if files.is_empty() {
        println!("\nNo saved content found.");
        return Ok(());
    }
    println!("\nMost recent saved content:");
    for (i, name) in files.iter().enumerate() {
        println!("{:2}. {}", i + 1, name);
    }
    Ok(())
}

/// Blog posts get a bounded preview; shorter formats print in full.
fn preview_text(content: &str, content_type: ContentType) -> String {
    if content_type == ContentType::BlogPost && content.chars().count() > BLOG_PREVIEW_CHARS {
        let cut: String = content.chars().take(BLOG_PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        content.to_string()
    }
}
