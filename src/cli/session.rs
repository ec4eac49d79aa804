//! The menu-driven command loop.
//!
//! A [`Session`] reads one answer per line from its input, writes prompts and
//! confirmations to its output, and applies each command to an in-memory
//! [`Catalog`]. End of input at any prompt ends the session.

use std::io::{self, BufRead, Write};

use catalog::{Catalog, Config, Level, MemberId, validate};
use thiserror::Error;
use tracing::{debug, instrument};

use super::{
    render::{self, OutputFormat},
    terminal::{Tone, banner, banner_width},
};

const MENU: &str = "\
Library Management System Menu:
1. Add Member
2. Edit Member
3. Show Members
4. Delete Member
5. Add Book
6. Show Books
7. Borrow Book
8. Return Book
9. Exit";

const START_OVER: &str = "Invalid entry. Please start over.";
const BUDGET_SPENT: &str = "Invalid choice. Please start over.";
const NAME_HINT: &str = "Please enter a name with at least three letters.";
const TITLE_HINT: &str = "Please enter a book title with at least three letters or numbers.";
const AUTHOR_HINT: &str = "Please enter at least one letter or number for the author.";
const EMAIL_HINT: &str = "Please enter a valid email with at least three characters.";
const LEVEL_HINT: &str = "Please enter your level from within the choices available.";

/// An entry in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    AddMember,
    EditMember,
    ShowMembers,
    DeleteMember,
    AddBook,
    ShowBooks,
    BorrowBook,
    ReturnBook,
    Exit,
}

impl Choice {
    fn from_menu(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddMember),
            "2" => Some(Self::EditMember),
            "3" => Some(Self::ShowMembers),
            "4" => Some(Self::DeleteMember),
            "5" => Some(Self::AddBook),
            "6" => Some(Self::ShowBooks),
            "7" => Some(Self::BorrowBook),
            "8" => Some(Self::ReturnBook),
            "9" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Why a command stopped before completing.
#[derive(Debug, Error)]
enum Interrupt {
    /// The user gave up on the command (bad input, retry budget spent).
    #[error("command abandoned")]
    Abandoned,
    /// Input reached end of file.
    #[error("input closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Whether a re-prompted field ended up with a usable value.
enum Answer {
    Given(String),
    Exhausted,
}

/// An interactive session over a catalog.
#[derive(Debug)]
pub struct Session<R, W> {
    input: R,
    output: W,
    catalog: Catalog,
    config: Config,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over an empty catalog.
    pub fn new(input: R, output: W, config: Config, format: OutputFormat) -> Self {
        Self {
            input,
            output,
            catalog: Catalog::new(),
            config,
            format,
        }
    }

    /// The catalog as modified so far.
    #[cfg(test)]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Runs the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Only reading or writing the terminal can fail; catalog failures are
    /// reported to the user and the loop carries on.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "{}",
            banner(" Welcome to the Library System ", banner_width())
        )?;

        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(line) = self.read_answer("Enter your choice: ")? else {
                break;
            };

            let Some(choice) = Choice::from_menu(&line) else {
                self.warn("Invalid choice. Please enter a valid option.")?;
                continue;
            };

            if choice == Choice::Exit {
                writeln!(self.output, "Exiting the program.")?;
                break;
            }

            match self.dispatch(choice) {
                Ok(()) | Err(Interrupt::Abandoned) => {}
                Err(Interrupt::Closed) => break,
                Err(Interrupt::Io(e)) => return Err(e.into()),
            }
        }

        self.output.flush()?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn dispatch(&mut self, choice: Choice) -> Result<(), Interrupt> {
        match choice {
            Choice::AddMember => self.add_member(),
            Choice::EditMember => self.edit_member(),
            Choice::ShowMembers => self.show_members(),
            Choice::DeleteMember => self.delete_member(),
            Choice::AddBook => self.add_book(),
            Choice::ShowBooks => self.show_books(),
            Choice::BorrowBook => self.borrow_book(),
            Choice::ReturnBook => self.return_book(),
            Choice::Exit => Ok(()),
        }
    }

    fn add_member(&mut self) -> Result<(), Interrupt> {
        let name = self.ask_once("Enter member's name: ", validate::member_name, NAME_HINT)?;
        let email = self.ask_required("Enter member's email: ", validate::email, EMAIL_HINT)?;
        let level = self.ask_level("Enter member's level (A/B/C): ")?;

        let id = self.catalog.add_member(&name, &email, level).id();
        self.success(&format!("Member added successfully with ID {id}."))?;
        Ok(())
    }

    fn edit_member(&mut self) -> Result<(), Interrupt> {
        let id = self.ask_member_id("Enter member ID to edit: ")?;
        let name = self.ask_once("Enter new name: ", validate::member_name, NAME_HINT)?;
        let email = self.ask_required("Enter new email: ", validate::email, EMAIL_HINT)?;
        let level = self.ask_level("Enter new level (A/B/C): ")?;

        match self.catalog.edit_member(id, &name, &email, level) {
            Ok(_) => self.success("Member information updated successfully.")?,
            Err(e) => {
                debug!(%e, "edit failed");
                self.warn("Member not found.")?;
            }
        }
        Ok(())
    }

    fn show_members(&mut self) -> Result<(), Interrupt> {
        render::members(&self.catalog, self.format, &mut self.output)?;
        Ok(())
    }

    fn delete_member(&mut self) -> Result<(), Interrupt> {
        let id = self.ask_member_id("Enter member ID to delete: ")?;
        let release = self.config.release_loans_on_delete;

        let result = if release {
            self.catalog.delete_member_and_release(id)
        } else {
            self.catalog.delete_member(id)
        };
        let Ok(member) = result else {
            self.warn("Member not found.")?;
            return Ok(());
        };

        self.success("Member deleted successfully.")?;
        if member.borrowed().is_empty() {
            return Ok(());
        }

        let titles = member
            .borrowed()
            .iter()
            .filter_map(|book| self.catalog.book(*book))
            .map(|book| format!("'{}'", book.title()))
            .collect::<Vec<_>>()
            .join(", ");
        if release {
            self.aside(&format!("Returned to the shelf: {titles}."))?;
        } else {
            self.warn(&format!(
                "{} still held {titles}; these remain unavailable.",
                member.name()
            ))?;
        }
        Ok(())
    }

    fn add_book(&mut self) -> Result<(), Interrupt> {
        let title = self.ask_once("Enter book title: ", validate::book_title, TITLE_HINT)?;
        let author = match self.ask("Enter book author: ", validate::author, AUTHOR_HINT)? {
            Answer::Given(author) => author,
            Answer::Exhausted => {
                let fallback = self.config.fallback_author().to_string();
                self.aside(&format!("Recording the author as '{fallback}'."))?;
                fallback
            }
        };
        let level = self.ask_level("Enter book level (A/B/C): ")?;

        self.catalog.add_book(&title, &author, level);
        self.success("Book added successfully.")?;
        self.show_books()
    }

    fn show_books(&mut self) -> Result<(), Interrupt> {
        render::books(&self.catalog, self.format, &mut self.output)?;
        Ok(())
    }

    fn borrow_book(&mut self) -> Result<(), Interrupt> {
        let id = self.ask_member_id("Enter member ID: ")?;
        let title = self.read_required("Enter book title: ")?;

        let message = match self.catalog.borrow(id, &title) {
            Ok(book) => Ok(book.title().to_string()),
            Err(e) => Err(format!("Cannot borrow: {e}.")),
        };
        match message {
            Ok(title) => {
                let name = self.member_name(id);
                self.success(&format!("{name} has borrowed '{title}'."))?;
            }
            Err(message) => self.warn(&message)?,
        }
        Ok(())
    }

    fn return_book(&mut self) -> Result<(), Interrupt> {
        let id = self.ask_member_id("Enter member ID: ")?;
        let title = self.read_required("Enter book title: ")?;

        let message = match self.catalog.return_book(id, &title) {
            Ok(book) => Ok(book.title().to_string()),
            Err(e) => Err(format!("Cannot return: {e}.")),
        };
        match message {
            Ok(title) => {
                let name = self.member_name(id);
                self.success(&format!("{name} has returned '{title}'."))?;
            }
            Err(message) => self.warn(&message)?,
        }
        Ok(())
    }

    fn member_name(&self, id: MemberId) -> String {
        self.catalog
            .find_member_by_id(id)
            .map_or_else(|| format!("Member {id}"), |member| member.name().to_string())
    }

    /// Prompts for a field that gets a single chance.
    fn ask_once(
        &mut self,
        prompt: &str,
        is_valid: fn(&str) -> bool,
        hint: &str,
    ) -> Result<String, Interrupt> {
        let value = self.read_required(prompt)?;
        if is_valid(&value) {
            return Ok(value);
        }
        self.warn(hint)?;
        self.warn(START_OVER)?;
        Err(Interrupt::Abandoned)
    }

    /// Prompts for a field, abandoning the command once the retry budget is
    /// spent.
    fn ask_required(
        &mut self,
        prompt: &str,
        is_valid: fn(&str) -> bool,
        hint: &str,
    ) -> Result<String, Interrupt> {
        match self.ask(prompt, is_valid, hint)? {
            Answer::Given(value) => Ok(value),
            Answer::Exhausted => {
                self.warn(BUDGET_SPENT)?;
                Err(Interrupt::Abandoned)
            }
        }
    }

    fn ask_level(&mut self, prompt: &str) -> Result<Level, Interrupt> {
        let answer = self.ask_required(prompt, validate::level, LEVEL_HINT)?;
        answer.parse().map_err(|_| Interrupt::Abandoned)
    }

    fn ask_member_id(&mut self, prompt: &str) -> Result<MemberId, Interrupt> {
        let answer = self.read_required(prompt)?;
        match answer.parse() {
            Ok(id) => Ok(id),
            Err(e) => {
                debug!(%e, "rejected member id");
                self.warn("Please enter a positive member ID.")?;
                Err(Interrupt::Abandoned)
            }
        }
    }

    /// Prompts up to the configured number of attempts.
    fn ask(
        &mut self,
        prompt: &str,
        is_valid: fn(&str) -> bool,
        hint: &str,
    ) -> Result<Answer, Interrupt> {
        for _ in 0..self.config.attempts() {
            let value = self.read_required(prompt)?;
            if is_valid(&value) {
                return Ok(Answer::Given(value));
            }
            self.warn(hint)?;
        }
        Ok(Answer::Exhausted)
    }

    fn read_required(&mut self, prompt: &str) -> Result<String, Interrupt> {
        self.read_answer(prompt)?.ok_or(Interrupt::Closed)
    }

    /// Writes `prompt` and reads one line, without its line ending.
    ///
    /// Returns `None` at end of input.
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", Tone::Done.paint(message))
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", Tone::Refused.paint(message))
    }

    fn aside(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", Tone::Aside.paint(message))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Runs a session over the scripted answers, returning it with its output.
    fn run_with(config: Config, answers: &[&str]) -> (Session<Cursor<String>, Vec<u8>>, String) {
        let script = answers.iter().map(|a| format!("{a}\n")).collect::<String>();
        let mut session = Session::new(
            Cursor::new(script),
            Vec::new(),
            config,
            OutputFormat::Table,
        );
        session.run().unwrap();
        let output = String::from_utf8(session.output.clone()).unwrap();
        (session, output)
    }

    fn run(answers: &[&str]) -> (Session<Cursor<String>, Vec<u8>>, String) {
        run_with(Config::default(), answers)
    }

    #[test]
    fn prints_banner_and_menu() {
        let (_, output) = run(&["9"]);
        assert!(output.contains(" Welcome to the Library System "));
        assert!(output.contains("Library Management System Menu:"));
        assert!(output.contains("Exiting the program."));
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let (_, output) = run(&[]);
        assert!(!output.contains("Exiting the program."));

        // mid-command as well
        let (session, _) = run(&["1", "Ann"]);
        assert!(session.catalog().members().is_empty());
    }

    #[test]
    fn unknown_choice_is_reported() {
        let (_, output) = run(&["42", "9"]);
        assert!(output.contains("Invalid choice. Please enter a valid option."));
    }

    #[test]
    fn adds_a_member() {
        let (session, output) = run(&["1", "Ann", "ann@x.com", "a", "9"]);

        assert!(output.contains("Member added successfully with ID 1."));
        let member = &session.catalog().members()[0];
        assert_eq!(member.name(), "Ann");
        assert_eq!(member.level(), Level::A);
    }

    #[test]
    fn short_name_abandons_add_member_immediately() {
        let (session, output) = run(&["1", "Al", "9"]);

        assert!(output.contains(NAME_HINT));
        assert!(output.contains(START_OVER));
        assert!(session.catalog().members().is_empty());
    }

    #[test]
    fn email_is_retried_within_budget() {
        let (session, output) = run(&["1", "Ann", "x", "y", "ann@x.com", "B", "9"]);

        assert_eq!(output.matches(EMAIL_HINT).count(), 2);
        assert_eq!(session.catalog().members()[0].email(), "ann@x.com");
    }

    #[test]
    fn spent_level_budget_abandons_the_command() {
        let (session, output) = run(&["1", "Ann", "ann@x.com", "D", "E", "F", "9"]);

        assert_eq!(output.matches(LEVEL_HINT).count(), 3);
        assert!(output.contains(BUDGET_SPENT));
        assert!(session.catalog().members().is_empty());
        // the menu is shown again and "9" is read as a choice
        assert!(output.contains("Exiting the program."));
    }

    #[test]
    fn retry_budget_follows_configuration() {
        let mut config = Config::default();
        config.set_attempts(1);

        let (session, output) = run_with(config, &["1", "Ann", "x", "9"]);

        assert!(output.contains(BUDGET_SPENT));
        assert!(session.catalog().members().is_empty());
    }

    #[test]
    fn adds_a_book_and_lists_the_catalog() {
        let (session, output) = run(&["5", "Dune", "Herbert", "a", "9"]);

        assert!(output.contains("Book added successfully."));
        assert!(output.contains("Dune"));
        assert!(output.contains("Available"));
        assert_eq!(session.catalog().books()[0].author(), "Herbert");
    }

    #[test]
    fn invalid_title_abandons_add_book() {
        let (session, output) = run(&["5", "The Hobbit", "9"]);

        assert!(output.contains(TITLE_HINT));
        assert!(session.catalog().books().is_empty());
    }

    #[test]
    fn spent_author_budget_falls_back_to_unknown() {
        let (session, output) = run(&["5", "Dune", "", "...", "-", "C", "9"]);

        assert_eq!(output.matches(AUTHOR_HINT).count(), 3);
        assert!(output.contains("Recording the author as 'Unknown'."));
        assert_eq!(session.catalog().books()[0].author(), "Unknown");
        assert_eq!(session.catalog().books()[0].level(), Level::C);
    }

    #[test]
    fn show_empty_collections() {
        let (_, output) = run(&["3", "6", "9"]);
        assert!(output.contains("No members in the library."));
        assert!(output.contains("No books in the library."));
    }

    #[test]
    fn edits_a_member() {
        let (session, output) = run(&[
            "1", "Ann", "ann@x.com", "A", //
            "2", "1", "Anne", "anne@y.org", "c", //
            "9",
        ]);

        assert!(output.contains("Member information updated successfully."));
        let member = &session.catalog().members()[0];
        assert_eq!(member.name(), "Anne");
        assert_eq!(member.level(), Level::C);
    }

    #[test]
    fn editing_a_missing_member_is_reported() {
        let (session, output) = run(&[
            "1", "Ann", "ann@x.com", "A", //
            "2", "7", "Zed", "zed@x.com", "B", //
            "9",
        ]);

        assert!(output.contains("Member not found."));
        assert_eq!(session.catalog().members()[0].name(), "Ann");
    }

    #[test]
    fn non_numeric_member_id_is_rejected() {
        let (_, output) = run(&["2", "one", "9"]);
        assert!(output.contains("Please enter a positive member ID."));
    }

    #[test]
    fn zero_member_id_is_rejected_as_not_positive() {
        let (session, output) = run(&[
            "1", "Ann", "ann@x.com", "A", //
            "4", "0", //
            "9",
        ]);

        assert!(output.contains("Please enter a positive member ID."));
        assert!(!output.contains("numeric"));
        assert_eq!(session.catalog().members().len(), 1);
    }

    #[test]
    fn deletes_a_member() {
        let (session, output) = run(&[
            "1", "Ann", "ann@x.com", "A", //
            "1", "Bob", "bob@x.com", "B", //
            "4", "1", //
            "4", "1", //
            "9",
        ]);

        assert!(output.contains("Member deleted successfully."));
        assert!(output.contains("Member not found."));
        let names: Vec<&str> = session
            .catalog()
            .members()
            .iter()
            .map(catalog::Member::name)
            .collect();
        assert_eq!(names, ["Bob"]);
    }

    #[test]
    fn borrow_and_return_round_trip() {
        let (session, output) = run(&[
            "5", "Dune", "Herbert", "A", //
            "1", "Ann", "ann@x.com", "A", //
            "1", "Bob", "bob@x.com", "B", //
            "7", "1", "Dune", //
            "7", "2", "Dune", //
            "8", "1", "Dune", //
            "9",
        ]);

        assert!(output.contains("Ann has borrowed 'Dune'."));
        assert!(output.contains("Cannot borrow: a level B member cannot borrow a level A book."));
        assert!(output.contains("Ann has returned 'Dune'."));
        assert!(session.catalog().books()[0].is_available());
    }

    #[test]
    fn borrow_reports_missing_records() {
        let (_, output) = run(&["7", "3", "Dune", "9"]);
        assert!(output.contains("Cannot borrow: member 3 not found."));
    }

    #[test]
    fn returning_an_unborrowed_book_is_reported() {
        let (_, output) = run(&[
            "5", "Dune", "Herbert", "A", //
            "1", "Ann", "ann@x.com", "A", //
            "8", "1", "Dune", //
            "9",
        ]);
        assert!(output.contains("Cannot return: book 1 is not borrowed by this member."));
    }

    #[test]
    fn deleting_a_borrower_warns_about_stranded_books() {
        let (session, output) = run(&[
            "5", "Dune", "Herbert", "A", //
            "1", "Ann", "ann@x.com", "A", //
            "7", "1", "Dune", //
            "4", "1", //
            "9",
        ]);

        assert!(output.contains("Ann still held 'Dune'; these remain unavailable."));
        assert!(!session.catalog().books()[0].is_available());
    }

    #[test]
    fn deleting_a_borrower_can_release_their_books() {
        let mut config = Config::default();
        config.release_loans_on_delete = true;
        let (session, output) = run_with(
            config,
            &[
                "5", "Dune", "Herbert", "A", //
                "1", "Ann", "ann@x.com", "A", //
                "7", "1", "Dune", //
                "4", "1", //
                "9",
            ],
        );

        assert!(output.contains("Returned to the shelf: 'Dune'."));
        assert!(session.catalog().books()[0].is_available());
    }

    #[test]
    fn json_format_lists_records_as_json() {
        let mut session = Session::new(
            Cursor::new("5\nDune\nHerbert\nA\n9\n".to_string()),
            Vec::new(),
            Config::default(),
            OutputFormat::Json,
        );
        session.run().unwrap();
        let output = String::from_utf8(session.output).unwrap();

        assert!(output.contains("\"title\": \"Dune\""));
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let mut session = Session::new(
            Cursor::new("1\r\nAnn\r\nann@x.com\r\nA\r\n9\r\n".to_string()),
            Vec::new(),
            Config::default(),
            OutputFormat::Table,
        );
        session.run().unwrap();

        assert_eq!(session.catalog().members()[0].email(), "ann@x.com");
    }
}
