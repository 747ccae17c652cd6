//! Interactive dashboard loop.

use std::sync::Arc;

use inquire::{
    CustomUserError, InquireError, Text,
    autocompletion::{Autocomplete, Replacement},
    validator::Validation,
};
use wxdash_core::{SearchOutcome, WeatherSession, validate_city};

use crate::render;

const COMMANDS: &[&str] = &[":unit", ":clear", ":history", ":quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input<'a> {
    Search(&'a str),
    ToggleUnit,
    ClearHistory,
    ShowHistory,
    Quit,
    Unknown(&'a str),
}

fn parse_input(raw: &str) -> Input<'_> {
    let trimmed = raw.trim();
    match trimmed {
        ":unit" | ":u" => Input::ToggleUnit,
        ":clear" | ":c" => Input::ClearHistory,
        ":history" | ":h" => Input::ShowHistory,
        ":quit" | ":q" => Input::Quit,
        cmd if cmd.starts_with(':') => Input::Unknown(cmd),
        city => Input::Search(city),
    }
}

/// Feeds inquire's autocomplete from the session.
#[derive(Debug, Clone)]
struct CitySuggester {
    session: Arc<WeatherSession>,
}

impl Autocomplete for CitySuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        if input.starts_with(':') {
            return Ok(COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(input))
                .map(|cmd| cmd.to_string())
                .collect());
        }

        Ok(self.session.suggest(input))
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

fn validate_input(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().starts_with(':') {
        return Ok(Validation::Valid);
    }

    Ok(match validate_city(input) {
        Ok(_) => Validation::Valid,
        Err(err) => Validation::Invalid(err.to_string().into()),
    })
}

async fn search(session: &WeatherSession, city: &str) {
    println!("Searching {city}...");

    let outcome = session.search(city).await;
    if outcome == SearchOutcome::Superseded {
        return;
    }

    println!("\n{}", render::state(&session.state()));
}

pub async fn run(session: WeatherSession) -> anyhow::Result<()> {
    let session = Arc::new(session);
    println!("{}", render::state(&session.state()));

    loop {
        let answer = Text::new("City:")
            .with_autocomplete(CitySuggester { session: Arc::clone(&session) })
            .with_validator(validate_input)
            .with_help_message(":unit toggles °C/°F, :history, :clear, :quit")
            .prompt();

        let raw = match answer {
            Ok(raw) => raw,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match parse_input(&raw) {
            Input::Search(city) => search(&session, city).await,
            Input::ToggleUnit => {
                let unit = session.toggle_unit();
                tracing::debug!(%unit, "unit toggled from prompt");
                println!("{}", render::state(&session.state()));
            }
            Input::ClearHistory => {
                session.clear_history();
                println!("Search history cleared.");
            }
            Input::ShowHistory => println!("{}", render::history(&session.history())),
            Input::Quit => break,
            Input::Unknown(cmd) => println!("Unknown command {cmd}. Try {}.", COMMANDS.join(", ")),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_cities() {
        assert_eq!(parse_input(" :unit "), Input::ToggleUnit);
        assert_eq!(parse_input(":q"), Input::Quit);
        assert_eq!(parse_input(":history"), Input::ShowHistory);
        assert_eq!(parse_input(":clear"), Input::ClearHistory);
        assert_eq!(parse_input(":nope"), Input::Unknown(":nope"));
        assert_eq!(parse_input("  New York "), Input::Search("New York"));
    }

    #[test]
    fn validator_accepts_commands_and_bounded_cities() {
        assert!(matches!(validate_input(":unit").unwrap(), Validation::Valid));
        assert!(matches!(validate_input("Rome").unwrap(), Validation::Valid));
        assert!(matches!(validate_input("R").unwrap(), Validation::Invalid(_)));
        assert!(matches!(validate_input(&"x".repeat(51)).unwrap(), Validation::Invalid(_)));
    }
}
