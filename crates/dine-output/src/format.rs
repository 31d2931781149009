//! Fixed-width text for the header and the per-change status lines.
//!
//! Every column is `seats + 9` characters wide, plus the column delimiter:
//!
//! ```text
//! "| " + one char per fork + " Eat   " / " Think " / "       "
//! ```
//!
//! A fork position shows `fork % 10` when this philosopher holds it and
//! [`PLACEHOLDER`] otherwise.

use std::fmt::Write;

use dine_core::{Activity, ForkId, PhilosopherId};
use dine_table::Snapshot;

pub const COLUMN_DELIMITER: char = '|';
pub const PLACEHOLDER: char = '-';
pub const BORDER: char = '=';

/// Width of the activity field, including its surrounding spaces.
pub const ACTIVITY_WIDTH: usize = 7;

/// Characters in one column, excluding the trailing delimiter.
#[inline]
pub fn column_width(seats: usize) -> usize {
    1 + 1 + seats + ACTIVITY_WIDTH
}

/// Characters in one rendered line, excluding the newline.
#[inline]
pub fn line_width(seats: usize) -> usize {
    seats * column_width(seats) + 1
}

/// The three header lines, each terminated by `\n`.
pub fn header(seats: usize) -> String {
    let border = border(seats);
    let mut out = String::with_capacity(3 * (line_width(seats) + 1));
    out.push_str(&border);
    out.push_str(&names_row(seats));
    out.push_str(&border);
    out
}

fn border(seats: usize) -> String {
    let mut line = String::with_capacity(line_width(seats) + 1);
    for _ in 0..seats {
        line.push(COLUMN_DELIMITER);
        line.extend(std::iter::repeat_n(BORDER, column_width(seats) - 1));
    }
    line.push(COLUMN_DELIMITER);
    line.push('\n');
    line
}

/// Philosopher labels, roughly centred above their forks.
fn names_row(seats: usize) -> String {
    let lead = seats / 2 + seats % 2;
    let trail = seats / 2;
    let mut line = String::with_capacity(line_width(seats) + 1);
    for i in 0..seats {
        let label = PhilosopherId(i as u32).label();
        line.push(COLUMN_DELIMITER);
        let _ = write!(line, "{:lead$}   {label}    {:trail$}", "", "");
    }
    line.push(COLUMN_DELIMITER);
    line.push('\n');
    line
}

/// One status line for `snapshot`, terminated by `\n`.
pub fn snapshot_line(snapshot: &Snapshot) -> String {
    let seats = snapshot.seats();
    let mut line = String::with_capacity(line_width(seats) + 1);
    for i in 0..seats {
        let who = PhilosopherId(i as u32);
        line.push(COLUMN_DELIMITER);
        line.push(' ');
        for (f, holder) in snapshot.holders.iter().enumerate() {
            line.push(if *holder == Some(who) { fork_digit(ForkId(f as u32)) } else { PLACEHOLDER });
        }
        line.push_str(activity_field(snapshot.activities[i]));
    }
    line.push(COLUMN_DELIMITER);
    line.push('\n');
    line
}

#[inline]
fn fork_digit(fork: ForkId) -> char {
    char::from_digit(fork.0 % 10, 10).unwrap_or(PLACEHOLDER)
}

/// The fixed-width activity field.
pub fn activity_field(activity: Activity) -> &'static str {
    match activity {
        Activity::Eating        => " Eat   ",
        Activity::Thinking      => " Think ",
        Activity::Transitioning => "       ",
    }
}
