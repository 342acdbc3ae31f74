//! Typed commands executed against a `DataBook`.
//!
//! # Responsibility
//! - Turn already-parsed user intent into exactly one book mutation or query.
//! - Check preconditions through query methods before mutating.
//! - Produce a human-readable feedback line per command.
//!
//! # Invariants
//! - Module commands always address the active semester.
//! - A failed command leaves the book unchanged.
//! - Instructor commands require the instructor to be a tracked person; the
//!   store itself does not enforce this.

use crate::book::DataBook;
use crate::collection::StoreError;
use crate::model::module::{Module, ModuleCode};
use crate::model::person::{Name, Person};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One parsed user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddPerson(Person),
    EditPerson { target: Name, edited: Person },
    DeletePerson { name: Name },
    ClearContacts,
    AddModule(Module),
    EditModule { code: ModuleCode, edited: Module },
    DeleteModule { code: ModuleCode },
    ClearModules,
    Assign { name: Name, code: ModuleCode },
    Unassign { name: Name, code: ModuleCode },
    UnassignAll,
    Switch,
}

/// Feedback returned to the caller after a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
}

impl CommandResult {
    fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
        }
    }
}

/// Command-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Store(StoreError),
    PersonNotFound(Name),
    ModuleNotFound(ModuleCode),
    AlreadyAssigned { name: Name, code: ModuleCode },
    NotAssigned { name: Name, code: ModuleCode },
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::PersonNotFound(name) => write!(f, "no person named {name} in the contact list"),
            Self::ModuleNotFound(code) => {
                write!(f, "module {code} is not in the current semester")
            }
            Self::AlreadyAssigned { name, code } => {
                write!(f, "{name} is already an instructor of {code}")
            }
            Self::NotAssigned { name, code } => write!(f, "{name} is not an instructor of {code}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl Command {
    /// Stable command word, used in logs.
    pub fn word(&self) -> &'static str {
        match self {
            Self::AddPerson(_) => "add",
            Self::EditPerson { .. } => "edit",
            Self::DeletePerson { .. } => "delete",
            Self::ClearContacts => "clear",
            Self::AddModule(_) => "addmod",
            Self::EditModule { .. } => "editmod",
            Self::DeleteModule { .. } => "deletemod",
            Self::ClearModules => "clearmod",
            Self::Assign { .. } => "assign",
            Self::Unassign { .. } => "unassign",
            Self::UnassignAll => "unassignall",
            Self::Switch => "switch",
        }
    }

    /// Runs this command against `book`.
    pub fn execute(&self, book: &mut DataBook) -> Result<CommandResult, CommandError> {
        let result = self.apply(book);
        match &result {
            Ok(_) => info!(
                "event=command_execute module=command status=ok command={} active_semester={}",
                self.word(),
                book.active_semester().index()
            ),
            Err(err) => warn!(
                "event=command_execute module=command status=error command={} error={}",
                self.word(),
                err
            ),
        }
        result
    }

    fn apply(&self, book: &mut DataBook) -> Result<CommandResult, CommandError> {
        let semester = book.active_semester();
        match self {
            Self::AddPerson(person) => {
                book.add_person(person.clone())?;
                Ok(CommandResult::new(format!("New person added: {}", person.name)))
            }
            Self::EditPerson { target, edited } => {
                let current = require_person(book, target)?;
                book.set_person(&current, edited.clone())?;
                Ok(CommandResult::new(format!("Edited person: {}", edited.name)))
            }
            Self::DeletePerson { name } => {
                let current = require_person(book, name)?;
                let removed = book.remove_person(&current)?;
                Ok(CommandResult::new(format!("Deleted person: {}", removed.name)))
            }
            Self::ClearContacts => {
                book.clear_contacts();
                Ok(CommandResult::new("Contact list has been cleared!"))
            }
            Self::AddModule(module) => {
                book.add_module(module.clone(), semester)?;
                Ok(CommandResult::new(format!(
                    "New module added to {semester}: {}",
                    module.code
                )))
            }
            Self::EditModule { code, edited } => {
                let current = require_module(book, code)?;
                book.set_module(&current, edited.clone(), semester)?;
                Ok(CommandResult::new(format!("Edited module: {}", edited.code)))
            }
            Self::DeleteModule { code } => {
                require_module(book, code)?;
                let removed = book.remove_module_with_code(code, semester)?;
                Ok(CommandResult::new(format!("Deleted module: {}", removed.code)))
            }
            Self::ClearModules => {
                book.clear_modules(semester);
                Ok(CommandResult::new(format!(
                    "Module list of {semester} has been cleared!"
                )))
            }
            Self::Assign { name, code } => {
                let person = require_person(book, name)?;
                require_module(book, code)?;
                if book.module_code_has_instructor(code, &person, semester)? {
                    return Err(CommandError::AlreadyAssigned {
                        name: person.name,
                        code: code.clone(),
                    });
                }
                book.assign_instructor(&person, code, semester)?;
                Ok(CommandResult::new(format!(
                    "Assigned {} to {code}",
                    person.name
                )))
            }
            Self::Unassign { name, code } => {
                let person = require_person(book, name)?;
                require_module(book, code)?;
                if !book.module_code_has_instructor(code, &person, semester)? {
                    return Err(CommandError::NotAssigned {
                        name: person.name,
                        code: code.clone(),
                    });
                }
                book.unassign_instructor(&person, code, semester)?;
                Ok(CommandResult::new(format!(
                    "Unassigned {} from {code}",
                    person.name
                )))
            }
            Self::UnassignAll => {
                book.unassign_all_instructors(semester);
                Ok(CommandResult::new(format!(
                    "Unassigned all instructors in {semester}"
                )))
            }
            Self::Switch => {
                let next = book.switch_semester();
                Ok(CommandResult::new(format!("Switched module list to {next}")))
            }
        }
    }
}

fn require_person(book: &DataBook, name: &Name) -> Result<Person, CommandError> {
    book.find_person(name)
        .cloned()
        .ok_or_else(|| CommandError::PersonNotFound(name.clone()))
}

fn require_module(book: &DataBook, code: &ModuleCode) -> Result<Module, CommandError> {
    book.find_module(code, book.active_semester())
        .cloned()
        .ok_or_else(|| CommandError::ModuleNotFound(code.clone()))
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandError};
    use crate::book::DataBook;
    use crate::collection::StoreError;
    use crate::model::module::{Module, ModuleCode, Semester};
    use crate::model::person::{Name, Person};

    fn name(value: &str) -> Name {
        Name::parse(value).unwrap()
    }

    fn code(value: &str) -> ModuleCode {
        ModuleCode::parse(value).unwrap()
    }

    fn seeded_book() -> DataBook {
        let mut book = DataBook::new();
        Command::AddPerson(Person::new(name("Alex Yeoh")))
            .execute(&mut book)
            .unwrap();
        Command::AddModule(Module::new(code("CS2103T"), "Software Engineering"))
            .execute(&mut book)
            .unwrap();
        book
    }

    #[test]
    fn assign_requires_tracked_person_and_rejects_repeats() {
        let mut book = seeded_book();
        let assign = Command::Assign {
            name: name("alex yeoh"),
            code: code("cs2103t"),
        };

        let result = assign.execute(&mut book).unwrap();
        assert_eq!(result.feedback, "Assigned Alex Yeoh to CS2103T");
        assert_eq!(
            assign.execute(&mut book).unwrap_err(),
            CommandError::AlreadyAssigned {
                name: name("Alex Yeoh"),
                code: code("CS2103T"),
            }
        );

        let stranger = Command::Assign {
            name: name("Bernice Yu"),
            code: code("CS2103T"),
        };
        assert_eq!(
            stranger.execute(&mut book).unwrap_err(),
            CommandError::PersonNotFound(name("Bernice Yu"))
        );
    }

    #[test]
    fn module_commands_follow_active_semester() {
        let mut book = seeded_book();
        let feedback = Command::Switch.execute(&mut book).unwrap().feedback;
        assert_eq!(feedback, "Switched module list to semester 2");

        Command::AddModule(Module::new(code("CS2103T"), ""))
            .execute(&mut book)
            .unwrap();
        assert_eq!(book.module_list(Semester::Second).len(), 1);

        Command::ClearModules.execute(&mut book).unwrap();
        assert!(book.module_list(Semester::Second).is_empty());
        assert_eq!(book.module_list(Semester::First).len(), 1);
    }

    #[test]
    fn failed_commands_leave_book_unchanged() {
        let mut book = seeded_book();
        let before = book.clone();

        let err = Command::AddPerson(Person::new(name("ALEX YEOH")))
            .execute(&mut book)
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Store(StoreError::DuplicateEntity { .. })
        ));
        assert_eq!(
            Command::DeleteModule { code: code("CS9999") }
                .execute(&mut book)
                .unwrap_err(),
            CommandError::ModuleNotFound(code("CS9999"))
        );
        assert_eq!(
            Command::Unassign {
                name: name("Alex Yeoh"),
                code: code("CS2103T"),
            }
            .execute(&mut book)
            .unwrap_err(),
            CommandError::NotAssigned {
                name: name("Alex Yeoh"),
                code: code("CS2103T"),
            }
        );
        assert_eq!(book, before);
    }

    #[test]
    fn edit_person_keeps_position() {
        let mut book = seeded_book();
        Command::AddPerson(Person::new(name("Bernice Yu")))
            .execute(&mut book)
            .unwrap();

        let edited = Person::new(name("Alexander Yeoh"));
        Command::EditPerson {
            target: name("Alex Yeoh"),
            edited: edited.clone(),
        }
        .execute(&mut book)
        .unwrap();

        assert_eq!(book.person_list().as_slice()[0], edited);
    }
}
