// Descent: step-through recursive descent parser for Jack-like token streams

mod cli;

use std::fs;
use std::io;
use std::path::Path;

use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use cli::Cli;
use descent::parser::parse::Parser;
use descent::parser::token::read_token_list;
use descent::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !Path::new(&cli.tokens).exists() {
        eprintln!("Error: File '{}' not found", cli.tokens);
        std::process::exit(1);
    }

    // Read the token list
    let text = fs::read_to_string(&cli.tokens)?;
    let tokens = match read_token_list(&text) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Token list error: {}", e);
            std::process::exit(1);
        }
    };

    let options = cli.options();
    if !cli.quiet {
        eprintln!(
            "Parsing {} ({} tokens) as {} in {} mode...",
            cli.tokens,
            tokens.len(),
            cli.production,
            options.mode.name()
        );
    }

    let mut parser = Parser::with_options(&tokens, options);
    let result = parser.parse(cli.production);

    if cli.print {
        match result {
            Ok(tree) => {
                print!("{}", tree);
                return Ok(());
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }

    if !cli.quiet {
        match &result {
            Ok(tree) => eprintln!(
                "Parsed successfully. Tree has {} nodes, {} tokens consumed.",
                tree.node_count(),
                parser.cursor().position()
            ),
            Err(e) => {
                eprintln!("Parser error: {}", e);
                eprintln!("Entering TUI with partial parse trace...");
            }
        }
    }

    let Some(trace) = parser.take_trace() else {
        eprintln!("Error: no parse trace was recorded");
        std::process::exit(1);
    };
    if trace.is_truncated() && !cli.quiet {
        eprintln!("Warning: trace truncated at the snapshot memory limit");
    }
    let history = trace.into_history();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(history, tokens);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
