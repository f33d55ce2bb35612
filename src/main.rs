use clap::{Parser as ClapParser, Subcommand};
use cexpr_lang::{Lexer, Token, output, parser};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "cexpr")]
#[command(about = "Parse dataset constraint expressions and dump the token stream or AST")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a constraint expression and print its AST as JSON
    Check {
        /// The constraint expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the token stream a constraint expression scans to
    Tokens {
        /// The constraint expression (reads from stdin if not provided)
        expression: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { expression, pretty } => run_check(expression, pretty),
        Commands::Tokens { expression } => run_tokens(expression),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_expression(expression: Option<String>) -> Result<String, String> {
    match expression {
        Some(text) => Ok(text),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("IO error: {}", e))?;
            Ok(buffer.trim_end().to_string())
        }
        None => Err("No expression provided. Pass one or pipe it to stdin.".to_string()),
    }
}

fn run_check(expression: Option<String>, pretty: bool) -> Result<(), String> {
    let text = read_expression(expression)?;
    let constraint = parser::parse(&text).map_err(|e| format!("Parse error: {}", e))?;
    if pretty {
        println!("{}", output::to_json_pretty(&constraint));
    } else {
        println!("{}", output::to_json_string(&constraint));
    }
    Ok(())
}

fn run_tokens(expression: Option<String>) -> Result<(), String> {
    let text = read_expression(expression)?;
    let mut lexer = Lexer::new(&text);
    loop {
        let token = lexer.next_token().map_err(|e| format!("Lex error: {}", e))?;
        if token == Token::Eof {
            return Ok(());
        }
        println!("{:?}", token);
    }
}
