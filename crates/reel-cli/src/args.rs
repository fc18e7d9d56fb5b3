use clap::Parser;

/// Interactive movie catalog search
///
/// Reel presents numbered menus for searching a movie catalog by category,
/// actor, title, year, category and year, or keyword, and for viewing which
/// searches are most popular. Both stores are configured through the
/// environment:
///
///   catalog:    DB_HOST, DB_USER, DB_PASSWORD, DB_NAME
///   search log: DBQ_HOST, DBQ_USER, DBQ_PASSWORD, DBQ_NAME
///
/// A .env file in the working directory or one of its parents is read
/// first; variables already set in the environment win.
///
/// Errors are appended to $REEL_LOG_FILE, or to
/// $XDG_STATE_HOME/reel/reel.log when it is not set.
#[derive(Parser)]
#[command(version, about, long_about, name = "reel")]
pub struct Args {}
