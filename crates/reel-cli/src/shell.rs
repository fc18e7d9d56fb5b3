//! The numbered-menu loop driving catalog searches and analytics.

use std::{
    io::{self, BufRead, Write},
    ops::RangeInclusive,
};

use anyhow::Result;
use log::debug;
use reel_core::{Catalog, ErrorClassifier, Outcome, ResultSet, SearchType};

use crate::{prompt::Prompter, renderer::TerminalRenderer};

pub const GOODBYE: &str = "Thank you for using the Movie Database. Goodbye!";

/// Rows shown before asking whether to show the rest.
const PAGE_SIZE: usize = 10;

/// Release years accepted by the year searches.
const YEARS: RangeInclusive<i64> = 1980..=2023;

const MAIN_MENU: &str = "\
Main Menu:
1. Search Queries
2. Analytical Queries
3. Exit";

const SEARCH_MENU: &str = "\
Search Queries:
1. Search by Category
2. Search by Actor
3. Search by Title
4. Search by Year
5. Search by Category and Year
6. Search by Keyword
7. Back to Main Menu";

const ANALYTICS_MENU: &str = "\
Analytical Queries:
1. Popular Search Types
2. Popular Search Terms
3. Popular Searches Today
4. Popular Searches This Month
5. Back to Main Menu";

const FILM_HEADERS: [&str; 3] = ["Title", "Release Year", "Description"];
const CATEGORY_HEADERS: [&str; 2] = ["Category ID", "Name"];
const TERM_HEADERS: [&str; 2] = ["Search Term", "Usage Count"];

/// What the loop does after handling a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Stay,
    Back,
    Exit,
}

/// Interactive menu shell over any line input and output.
///
/// Store failures pass through the [`ErrorClassifier`]: recoverable ones
/// print its message and return to the menu, a fatal one ends [`run`]
/// with an error.
///
/// [`run`]: Shell::run
pub struct Shell<'s, R, W> {
    catalog: Catalog<'s>,
    classifier: &'s ErrorClassifier,
    renderer: TerminalRenderer,
    prompt: Prompter<R, W>,
}

impl<'s, R: BufRead, W: Write> Shell<'s, R, W> {
    pub fn new(
        catalog: Catalog<'s>,
        classifier: &'s ErrorClassifier,
        renderer: TerminalRenderer,
        prompt: Prompter<R, W>,
    ) -> Self {
        Self {
            catalog,
            classifier,
            renderer,
            prompt,
        }
    }

    /// Runs the main menu until the user exits or input ends.
    ///
    /// A terminal I/O failure is reported to the operator log and ends the
    /// session without an error.
    ///
    /// # Errors
    ///
    /// Returns the store error that ended the session if one was fatal.
    pub fn run(&mut self) -> Result<()> {
        match self.session() {
            Ok(()) => Ok(()),
            Err(err) => match err.downcast::<io::Error>() {
                Ok(io_err) => {
                    let class = self.classifier.report_unexpected("shell", &io_err);
                    // The output may be the stream that failed.
                    let _ = writeln!(self.prompt.out(), "\n{}\n{GOODBYE}", class.user_message());
                    Ok(())
                }
                Err(err) => Err(err),
            },
        }
    }

    fn session(&mut self) -> Result<()> {
        while self.main_menu()? != Flow::Exit {}

        writeln!(self.prompt.out(), "\n{GOODBYE}")?;
        self.prompt.out().flush()?;
        Ok(())
    }

    fn main_menu(&mut self) -> Result<Flow> {
        writeln!(self.prompt.out(), "\n{MAIN_MENU}")?;
        let Some(choice) = self
            .prompt
            .choice("Select an option: ", |c| (1..=3).contains(&c))?
        else {
            return Ok(Flow::Exit);
        };

        match choice {
            1 => self.submenu(SEARCH_MENU, "Select a search option: ", 7, Self::search),
            2 => self.submenu(
                ANALYTICS_MENU,
                "Select an analytical option: ",
                5,
                Self::analytics,
            ),
            _ => Ok(Flow::Exit),
        }
    }

    /// Shows `menu` until its last entry (Back) is picked.
    fn submenu(
        &mut self,
        menu: &str,
        prompt: &str,
        back: i64,
        handle: fn(&mut Self, i64) -> Result<Flow>,
    ) -> Result<Flow> {
        loop {
            writeln!(self.prompt.out(), "\n{menu}")?;
            let Some(choice) = self.prompt.choice(prompt, |c| (1..=back).contains(&c))? else {
                return Ok(Flow::Exit);
            };
            if choice == back {
                return Ok(Flow::Back);
            }
            if handle(self, choice)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    fn search(&mut self, choice: i64) -> Result<Flow> {
        let catalog = self.catalog;
        match choice {
            1 => self.search_by_category(),
            2 => {
                let Some(actor) = self.prompt.text("Enter the actor's name: ")? else {
                    return Ok(Flow::Exit);
                };
                let result = catalog.movies_by_actor(&actor);
                self.show_search(SearchType::Actor, &actor, result, &["Title", "Actor"])
            }
            3 => {
                let Some(title) = self.prompt.text("Enter the movie title: ")? else {
                    return Ok(Flow::Exit);
                };
                let result = catalog.movies_by_title(&title);
                self.show_search(SearchType::Title, &title, result, &["Title", "Description"])
            }
            4 => {
                let Some(year) = self.ask_year()? else {
                    return Ok(Flow::Exit);
                };
                let result = catalog.movies_by_year(year);
                self.show_search(SearchType::Year, &year.to_string(), result, &FILM_HEADERS)
            }
            5 => self.search_by_category_and_year(),
            6 => {
                let Some(keyword) = self.prompt.text("Enter a keyword to search: ")? else {
                    return Ok(Flow::Exit);
                };
                let result = catalog.movies_by_keyword(&keyword);
                self.show_search(
                    SearchType::Keyword,
                    &keyword,
                    result,
                    &["Title", "Actors", "Description"],
                )
            }
            _ => Ok(Flow::Stay),
        }
    }

    fn search_by_category(&mut self) -> Result<Flow> {
        let catalog = self.catalog;
        let Some(categories) = self.guard("list_categories", catalog.list_categories())? else {
            return Ok(Flow::Stay);
        };
        self.renderer
            .table(self.prompt.out(), &CATEGORY_HEADERS, &categories.rows)?;
        if categories.is_empty() {
            return Ok(Flow::Stay);
        }

        let ids: Vec<i64> = categories.first_column().filter_map(|v| v.as_i64()).collect();
        let Some(category_id) = self
            .prompt
            .choice("Enter the category ID: ", |c| ids.contains(&c))?
        else {
            return Ok(Flow::Exit);
        };

        let Some(films) =
            self.guard("movies_by_category", catalog.movies_by_category(category_id))?
        else {
            return Ok(Flow::Stay);
        };
        self.show_paged(&films, &FILM_HEADERS)?;

        // Category searches are logged by name.
        if let Some(Some(name)) = self.guard("category_name", catalog.category_name(category_id))? {
            self.record(SearchType::Category, &name)?;
        }
        Ok(Flow::Stay)
    }

    fn search_by_category_and_year(&mut self) -> Result<Flow> {
        let catalog = self.catalog;
        if let Some(categories) = self.guard("list_categories", catalog.list_categories())? {
            self.renderer
                .table(self.prompt.out(), &CATEGORY_HEADERS, &categories.rows)?;
        }

        let Some(category) = self.prompt.text("Enter the category name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = self.ask_year()? else {
            return Ok(Flow::Exit);
        };

        let result = catalog.movies_by_category_and_year(&category, year);
        self.show_search(
            SearchType::CategoryYear,
            &format!("{category}, {year}"),
            result,
            &["Title", "Release Year", "Category", "Description"],
        )
    }

    fn analytics(&mut self, choice: i64) -> Result<Flow> {
        let catalog = self.catalog;
        let (operation, result, headers) = match choice {
            1 => (
                "popular_search_types",
                catalog.popular_search_types(),
                ["Search Type", "Usage Count"],
            ),
            2 => ("popular_search_terms", catalog.popular_search_terms(), TERM_HEADERS),
            3 => ("popular_searches_today", catalog.popular_searches_today(), TERM_HEADERS),
            4 => (
                "popular_searches_this_month",
                catalog.popular_searches_this_month(),
                TERM_HEADERS,
            ),
            _ => return Ok(Flow::Stay),
        };

        if let Some(rows) = self.guard(operation, result)? {
            self.renderer.table(self.prompt.out(), &headers, &rows.rows)?;
        }
        Ok(Flow::Stay)
    }

    fn ask_year(&mut self) -> io::Result<Option<i64>> {
        self.prompt
            .choice("Enter the release year: ", |y| YEARS.contains(&y))
    }

    /// Shows a search result and records the search once it succeeded.
    fn show_search(
        &mut self,
        search_type: SearchType,
        term: &str,
        result: reel_core::Result<ResultSet>,
        headers: &[&str],
    ) -> Result<Flow> {
        let Some(films) = self.guard(search_type.as_str(), result)? else {
            return Ok(Flow::Stay);
        };
        self.show_paged(&films, headers)?;
        self.record(search_type, term)?;
        Ok(Flow::Stay)
    }

    fn record(&mut self, search_type: SearchType, term: &str) -> Result<()> {
        let catalog = self.catalog;
        if self
            .guard("log_query", catalog.log_query(search_type, term))?
            .is_some()
        {
            debug!("Logged {search_type} for '{term}'");
        }
        Ok(())
    }

    /// Shows the first page of `result` and offers the rest.
    fn show_paged(&mut self, result: &ResultSet, headers: &[&str]) -> io::Result<()> {
        let (first, rest) = result.split_at(PAGE_SIZE);

        self.renderer.banner(
            self.prompt.out(),
            &format!("Showing the first {} of {} results", first.len(), result.len()),
        )?;
        self.renderer.table(self.prompt.out(), headers, first)?;

        if rest.is_empty()
            || !self
                .prompt
                .confirm("\nDo you want to see all remaining results? (y/n): ")?
        {
            return Ok(());
        }

        self.renderer.banner(
            self.prompt.out(),
            &format!("Showing all {} remaining results", rest.len()),
        )?;
        self.renderer.table(self.prompt.out(), headers, rest)
    }

    /// Applies the recovery policy to `result`.
    ///
    /// A recovered failure prints the classifier's message and yields
    /// `None`; a fatal one becomes the error that ends the session.
    fn guard<T>(&mut self, operation: &str, result: reel_core::Result<T>) -> Result<Option<T>> {
        match self.classifier.guard(operation, result) {
            Outcome::Value(value) => Ok(Some(value)),
            Outcome::Recovered(message) => {
                writeln!(self.prompt.out(), "{message}")?;
                Ok(None)
            }
            Outcome::Terminate(err) => Err(err.into()),
        }
    }
}
