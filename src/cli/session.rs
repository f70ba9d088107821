//! Interactive course planner menu
//!
//! Reads menu choices line by line from any `BufRead` and writes to any
//! `Write`, so whole sessions can be scripted in tests.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, CatalogService};
use crate::domain::Course;
use crate::infrastructure::{InfraError, InfraResult};

const NO_DATA: &str = "No data loaded. Please load data first.";
const LOAD_FAILED: &str = "Load failed. Previous data preserved.";

/// Multi-line description of a course: header line plus prerequisites.
pub fn course_detail(course: &Course) -> String {
    let prerequisites = if course.has_prerequisites() {
        course.prerequisites().iter().join(", ")
    } else {
        "None".to_string()
    };
    format!("{}\nPrerequisites: {}", course, prerequisites)
}

/// One interactive session over a catalog service.
pub struct MenuSession<'a, R, W> {
    service: &'a mut CatalogService,
    default_catalog: PathBuf,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> MenuSession<'a, R, W> {
    pub fn new(
        service: &'a mut CatalogService,
        default_catalog: PathBuf,
        input: R,
        out: W,
    ) -> Self {
        Self {
            service,
            default_catalog,
            input,
            out,
        }
    }

    /// Run the menu until the user exits or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> InfraResult<()> {
        self.say("Welcome to the course planner.\n")?;

        loop {
            self.show_menu()?;
            let Some(line) = self.read_line()? else {
                debug!("input closed, leaving menu");
                return Ok(());
            };

            // Anything that is not a number counts as choice 0
            let choice: i64 = line.parse().unwrap_or(0);
            match choice {
                1 => self.load_menu()?,
                2 => self.print_course_list()?,
                3 => self.print_course()?,
                9 => {
                    self.say("Thank you for using the course planner!")?;
                    return Ok(());
                }
                other => self.say(&format!("{} is not a valid option.\n", other))?,
            }
        }
    }

    fn show_menu(&mut self) -> InfraResult<()> {
        self.say("1. Load Data Structure.")?;
        self.say("2. Print Course List.")?;
        self.say("3. Print Course.")?;
        self.say("9. Exit")?;
        self.ask("What would you like to do?")
    }

    fn load_menu(&mut self) -> InfraResult<()> {
        self.say("")?;
        self.say("Load Options:")?;
        let default_line = format!("  1. Load \"{}\"", self.default_catalog.display());
        self.say(&default_line)?;
        self.say("  2. Enter custom file name")?;
        self.say("  3. Cancel")?;
        self.ask("Select an option:")?;

        match self.read_line()?.as_deref() {
            Some("1") => {
                let path = self.default_catalog.clone();
                self.load(&path)?;
            }
            Some("2") => {
                self.ask("Enter the file name:")?;
                match self.read_line()? {
                    Some(name) if !name.is_empty() => self.load(Path::new(&name))?,
                    _ => self.say("Invalid input.")?,
                }
            }
            Some("3") => self.say("Load cancelled.")?,
            _ => self.say("Invalid option.")?,
        }
        self.say("")
    }

    fn load(&mut self, path: &Path) -> InfraResult<()> {
        self.say(&format!("Loading {}...", path.display()))?;

        let report = match self.service.load_file(path) {
            Ok(report) => report,
            Err(ApplicationError::SourceUnavailable { .. }) => {
                let msg = format!("Error: Could not open file {}", path.display());
                self.say(&msg.red().to_string())?;
                return self.say(LOAD_FAILED);
            }
            Err(e) => return Err(e.into()),
        };

        for diagnostic in &report.diagnostics {
            let msg = format!("Warning: {}", diagnostic);
            self.say(&msg.yellow().to_string())?;
        }
        self.say(&format!("{} courses loaded.", report.loaded))?;
        if !report.accepted {
            self.say(LOAD_FAILED)?;
        }
        Ok(())
    }

    fn print_course_list(&mut self) -> InfraResult<()> {
        if !self.service.is_loaded() {
            return self.say(&format!("{}\n", NO_DATA));
        }
        let lines: Vec<String> = self
            .service
            .list_all()
            .into_iter()
            .map(|(id, name)| format!("{}, {}", id, name))
            .collect();

        self.say("Here is a sample schedule:\n")?;
        for line in &lines {
            self.say(line)?;
        }
        self.say("")
    }

    fn print_course(&mut self) -> InfraResult<()> {
        if !self.service.is_loaded() {
            return self.say(&format!("{}\n", NO_DATA));
        }
        self.ask("What course do you want to know about?")?;
        let query = self.read_line()?.unwrap_or_default();

        let text = match self.service.lookup(&query) {
            Some(course) => course_detail(course),
            None => format!("Course {} not found.", query),
        };
        self.say(&format!("{}\n", text))
    }

    /// Next input line, trimmed; `None` at end of input.
    fn read_line(&mut self) -> InfraResult<Option<String>> {
        let mut buf = String::new();
        let n = self
            .input
            .read_line(&mut buf)
            .map_err(|e| InfraError::terminal("read menu input", e))?;
        Ok((n > 0).then(|| buf.trim().to_string()))
    }

    fn say(&mut self, line: &str) -> InfraResult<()> {
        writeln!(self.out, "{}", line).map_err(|e| InfraError::terminal("write menu output", e))
    }

    fn ask(&mut self, prompt: &str) -> InfraResult<()> {
        write!(self.out, "{} ", prompt)
            .and_then(|_| self.out.flush())
            .map_err(|e| InfraError::terminal("write menu prompt", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_course_with_prerequisites_when_describing_then_lists_them() {
        let course = Course::new("CS300", "Algorithms", ["CS200", "MATH201"]);
        assert_eq!(
            course_detail(&course),
            "CS300, Algorithms\nPrerequisites: CS200, MATH201"
        );
    }

    #[test]
    fn given_course_without_prerequisites_when_describing_then_says_none() {
        let course = Course::new("CS100", "Intro", Vec::<String>::new());
        assert_eq!(course_detail(&course), "CS100, Intro\nPrerequisites: None");
    }
}
