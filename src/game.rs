use std::io::Write;
use std::str::FromStr;

use rand::rngs::StdRng;
use thiserror::Error;
use tracing::debug;

use crate::{Dollar, Quantity, market::Market, portfolio::Portfolio};

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Invalid command. Type 'help' for options.")]
    Unrecognized,
    #[error("Invalid amount: '{0}'")]
    BadAmount(String),
}

/// One parsed line of player input.
#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Buy { asset: String, amount: Quantity },
    Sell { asset: String, amount: Quantity },
    Help,
    Empty,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let Some(action) = parts.first() else {
            return Ok(Command::Empty);
        };
        match (action.to_lowercase().as_str(), parts.len()) {
            ("quit" | "q" | "exit", _) => Ok(Command::Quit),
            ("help", _) => Ok(Command::Help),
            ("buy", 3) => Ok(Command::Buy {
                asset: parts[1].to_string(),
                amount: parse_amount(parts[2])?,
            }),
            ("sell", 3) => Ok(Command::Sell {
                asset: parts[1].to_string(),
                amount: parse_amount(parts[2])?,
            }),
            _ => Err(CommandError::Unrecognized),
        }
    }
}

fn parse_amount(token: &str) -> Result<Quantity, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::BadAmount(token.to_string()))
}

/// What the loop should do after a line has been handled.
#[derive(Debug, PartialEq)]
enum Turn {
    Quit,
    /// Step the market and increment the day.
    Advance,
    /// Re-prompt without advancing. Only empty input does this.
    Hold,
}

pub struct Game {
    pub market: Market,
    pub portfolio: Portfolio,
    pub day: u64,
    rng: StdRng,
}

impl Game {
    pub fn new(market: Market, cash: Dollar, rng: StdRng) -> Self {
        Self {
            market,
            portfolio: Portfolio::new(cash),
            day: 1,
            rng,
        }
    }

    fn display_status(&self) {
        println!("\nDay {}", self.day);
        for asset in self.market.assets() {
            println!("{:>6}: ${:8.2}", asset.name, asset.price);
        }
        println!("Cash : ${:8.2}", self.portfolio.cash);
        println!("Value: ${:8.2}", self.portfolio.value(&self.market));
    }

    fn process_command(&mut self, line: &str) -> Turn {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                return Turn::Advance;
            }
        };
        debug!(?command, "parsed command");
        match command {
            Command::Quit => Turn::Quit,
            Command::Empty => Turn::Hold,
            Command::Help => {
                println!("Commands: buy <asset> <amt>, sell <asset> <amt>, help, quit");
                Turn::Advance
            }
            Command::Buy { asset, amount } => {
                if let Err(err) = self.portfolio.buy(&self.market, &asset, amount) {
                    println!("{err}");
                }
                Turn::Advance
            }
            Command::Sell { asset, amount } => {
                if let Err(err) = self.portfolio.sell(&self.market, &asset, amount) {
                    println!("{err}");
                }
                Turn::Advance
            }
        }
    }

    /// Handle one line of input. Returns false once the player quits.
    pub fn step(&mut self, line: &str) -> bool {
        match self.process_command(line) {
            Turn::Quit => false,
            Turn::Hold => true,
            Turn::Advance => {
                self.market.update(&mut self.rng);
                self.day += 1;
                true
            }
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("Welcome to the Infinite Investing Simulator!");
        println!("Type 'help' for a list of commands.");
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            self.display_status();
            print!("> ");
            std::io::stdout().flush()?;
            line.clear();
            // EOF ends the game the same way quit does.
            if stdin.read_line(&mut line)? == 0 {
                break;
            }
            if !self.step(&line) {
                break;
            }
        }
        println!("Thanks for playing!");
        Ok(())
    }
}
