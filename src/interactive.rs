//! The interactive prompt loop.
//!
//! A small state machine driven by user text input. Malformed input never
//! terminates the session; it loops back to the same prompt with an error
//! message. The session is generic over its input and output streams so
//! tests can drive it with scripted text.

use crate::matcher::UserIngredients;
use crate::pipeline::{RankedRecipe, RecipeFinder};
use crate::presenter::{render_detail, render_ranked_list};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    CollectPrimaryIngredient,
    CollectSecondaryIngredients,
    SearchAndRank,
    PresentResults,
    AwaitSelection,
    ShowDetail(usize),
    AwaitNextAction,
    Terminated,
}

/// Outcome of parsing the recipe-selection prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Index(usize),
    NewSearch,
    Invalid,
}

fn parse_selection(input: &str, list_len: usize) -> Selection {
    let input = input.trim();
    if input.eq_ignore_ascii_case("new") {
        return Selection::NewSearch;
    }
    match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= list_len => Selection::Index(n - 1),
        _ => Selection::Invalid,
    }
}

/// One interactive session over the given streams
pub struct Session<R, W> {
    finder: RecipeFinder,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(finder: RecipeFinder, input: R, out: W) -> Self {
        Self { finder, input, out }
    }

    /// Runs the loop until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        let rule = "=".repeat(50);
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "     Welcome to the Smart Recipe Finder!")?;
        writeln!(self.out, "   Your personal guide to fighting food waste.")?;
        writeln!(self.out, "{rule}")?;

        let mut state = State::CollectPrimaryIngredient;
        let mut primary = String::new();
        let mut ingredients = UserIngredients::default();
        let mut ranked: Vec<RankedRecipe> = Vec::new();

        while state != State::Terminated {
            state = match state {
                State::CollectPrimaryIngredient => {
                    writeln!(self.out, "\nWhat is your main ingredient?")?;
                    match self.prompt()? {
                        None => State::Terminated,
                        Some(line) => {
                            primary = crate::matcher::normalize(&line);
                            if primary.is_empty() {
                                writeln!(self.out, "Please enter a main ingredient.")?;
                                State::CollectPrimaryIngredient
                            } else {
                                State::CollectSecondaryIngredients
                            }
                        }
                    }
                }

                State::CollectSecondaryIngredients => {
                    writeln!(
                        self.out,
                        "\nWhat other ingredients do you have available? (optional, separate with a comma)"
                    )?;
                    match self.prompt()? {
                        None => State::Terminated,
                        Some(line) => {
                            ingredients = UserIngredients::parse_list(&line);
                            ingredients.insert(&primary);
                            State::SearchAndRank
                        }
                    }
                }

                State::SearchAndRank => {
                    writeln!(
                        self.out,
                        "\n--- Searching for recipes with '{primary}' as a main ingredient... ---"
                    )?;
                    ranked = match self.finder.search_and_rank(&primary, &ingredients) {
                        Ok(ranked) => ranked,
                        Err(err) => {
                            writeln!(self.out, "Error connecting to the recipe API: {err}")?;
                            Vec::new()
                        }
                    };
                    if ranked.is_empty() {
                        writeln!(
                            self.out,
                            "\nSorry, couldn't find any recipes for those ingredients."
                        )?;
                        writeln!(
                            self.out,
                            "Try adding more ingredients you have, or starting with a different main ingredient."
                        )?;
                        State::AwaitNextAction
                    } else {
                        State::PresentResults
                    }
                }

                State::PresentResults => {
                    writeln!(self.out, "\nHere are the best recipes you can make right now:\n")?;
                    write!(self.out, "{}", render_ranked_list(&ranked, ingredients.len()))?;
                    State::AwaitSelection
                }

                State::AwaitSelection => {
                    writeln!(
                        self.out,
                        "\nEnter the number of the recipe you want to see, or type 'new' to start over."
                    )?;
                    match self.prompt()? {
                        None => State::Terminated,
                        Some(line) => match parse_selection(&line, ranked.len()) {
                            Selection::Index(i) => State::ShowDetail(i),
                            Selection::NewSearch => State::CollectPrimaryIngredient,
                            Selection::Invalid => {
                                writeln!(
                                    self.out,
                                    "Invalid input. Please enter a number from the list or 'new'."
                                )?;
                                State::AwaitSelection
                            }
                        },
                    }
                }

                State::ShowDetail(index) => {
                    write!(self.out, "{}", render_detail(&ranked[index].detail))?;
                    State::AwaitNextAction
                }

                State::AwaitNextAction => {
                    writeln!(self.out, "\nWhat would you like to do next?")?;
                    writeln!(self.out, "1. Search with new ingredients")?;
                    writeln!(self.out, "2. Exit")?;
                    match self.prompt()? {
                        None => State::Terminated,
                        Some(line) => match line.trim() {
                            "1" => State::CollectPrimaryIngredient,
                            "2" => State::Terminated,
                            _ => {
                                writeln!(self.out, "Please choose 1 or 2.")?;
                                State::AwaitNextAction
                            }
                        },
                    }
                }

                State::Terminated => State::Terminated,
            };
        }

        writeln!(self.out, "\nHappy cooking! Thanks for fighting food waste.")?;
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<Option<String>> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // EOF counts as an exit request
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
