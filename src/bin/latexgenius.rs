//! Interactive terminal front end.
//!
//! Describe a document and press Enter to generate it; keep typing to refine it. End a
//! line with `\` to continue the request on the next line.
//!
//! Requires GEMINI_API_KEY (or API_KEY), read from the environment or a `.env` file.

use anyhow::Context;
use latexgenius::app::{
    AppController, BrowserLauncher, GenerationOutcome, GenerationStatus, SystemClipboard,
};
use latexgenius::latex::LatexGenerator;
use latexgenius::LatexGeniusError;
use std::io::Write;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::error;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  /new    start a new document
  /copy   copy the LaTeX to the clipboard
  /open   open the LaTeX in Overleaf
  /show   print the current LaTeX again
  /help   show this help
  /quit   exit
End a line with \\ to add another line to your request.";

struct InFlight {
    generation: u64,
    handle: JoinHandle<GenerationOutcome>,
}

async fn wait_for(in_flight: &mut Option<InFlight>) -> GenerationOutcome {
    match in_flight {
        Some(request) => match (&mut request.handle).await {
            Ok(outcome) => outcome,
            Err(e) => GenerationOutcome::new(
                request.generation,
                Err(LatexGeniusError::GenerationFailed(format!("request task failed: {}", e))),
            ),
        },
        None => std::future::pending().await,
    }
}

fn prompt(controller: &AppController) {
    if controller.state().status == GenerationStatus::Idle {
        println!("{}", controller.prompt_hint());
    }
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn render(controller: &AppController) {
    let state = controller.state();
    match state.status {
        GenerationStatus::Success => {
            if let Some(preview) = controller.preview() {
                println!("\nDocument Ready!\n");
                println!("{}\n", preview.latex());
                println!(
                    "[/copy] {}   [/open] Open in Overleaf   [/new] New Document\n",
                    preview.copy_label_at(Instant::now())
                );
            }
        }
        GenerationStatus::Error => {
            println!("\nGeneration Failed");
            println!("  {}\n", state.error.as_deref().unwrap_or_default());
        }
        _ => {}
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let generator = LatexGenerator::from_env().context("LatexGenius cannot start")?;

    println!("LatexGenius ({})", generator.model());
    println!("What do you want to write?");
    println!("Type /help for commands.\n");

    let mut controller = AppController::new(generator);
    let mut clipboard = SystemClipboard::default();
    let launcher = BrowserLauncher::default();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<InFlight> = None;
    let mut continuing = false;

    prompt(&controller);

    loop {
        tokio::select! {
            outcome = wait_for(&mut in_flight) => {
                in_flight = None;
                if controller.complete(outcome) {
                    render(&controller);
                    prompt(&controller);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                if !continuing && line.trim_start().starts_with('/') {
                    match line.trim() {
                        "/quit" | "/exit" => break,
                        "/help" => println!("{}", HELP),
                        "/new" => {
                            controller.reset();
                            println!("Started a new document.");
                        }
                        "/show" => match controller.state().latex.as_deref() {
                            Some(latex) => println!("{}", latex),
                            None => println!("No document yet."),
                        },
                        "/copy" => match controller.preview_mut() {
                            Some(preview) => {
                                if preview.copy(&mut clipboard) {
                                    println!("Copied");
                                }
                            }
                            None => println!("No document ready to copy."),
                        },
                        "/open" => match controller.preview() {
                            Some(preview) => {
                                if let Err(e) = preview.open_in_editor(&launcher) {
                                    error!("Could not open the editor: {}", e);
                                    println!("Could not open the editor: {}", e);
                                }
                            }
                            None => println!("No document ready to open."),
                        },
                        other => println!("Unknown command {}. Type /help for commands.", other),
                    }
                    prompt(&controller);
                    continue;
                }

                if controller.state().is_loading() {
                    println!("{} Please wait for the current request.", controller.action_label());
                    continue;
                }

                let (text, modified) = match line.strip_suffix('\\') {
                    Some(text) => (text, true),
                    None => (line.as_str(), false),
                };
                if continuing {
                    controller.append_input(text);
                } else {
                    controller.set_input(text);
                }
                continuing = modified;

                match controller.on_enter(modified) {
                    Some(pending) => {
                        println!("{}", controller.action_label());
                        in_flight = Some(InFlight {
                            generation: pending.generation(),
                            handle: tokio::spawn(pending.run()),
                        });
                    }
                    None if modified => {
                        print!(". ");
                        let _ = std::io::stdout().flush();
                    }
                    None => prompt(&controller),
                }
            }
        }
    }

    Ok(())
}
