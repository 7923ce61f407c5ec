//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use blameline_core::{Author, Commit, Hunk, Person, RenderOptions};
use chrono::{DateTime, Utc};

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().unwrap()
}

pub fn now() -> DateTime<Utc> {
    at("2018-12-01T21:52:45Z")
}

pub fn hunk(start_line: u32, end_line: u32, name: &str, date: &str, rev: &str, message: &str, url: &str) -> Hunk {
    Hunk {
        start_line,
        end_line,
        author: Author {
            person: Person { display_name: name.to_owned() },
            date: at(date),
        },
        rev: rev.to_owned(),
        message: message.to_owned(),
        commit: Commit { url: url.to_owned() },
    }
}

pub fn hunk_1() -> Hunk {
    hunk(1, 2, "a", "2018-09-10T21:52:45Z", "b", "c", "d")
}

pub fn hunk_2() -> Hunk {
    hunk(2, 3, "e", "2018-11-10T21:52:45Z", "f", "g", "h")
}

pub fn hunk_3() -> Hunk {
    hunk(3, 4, "i", "2018-10-10T21:52:45Z", "j", "k", "l")
}

pub fn three_hunks() -> Vec<Hunk> {
    vec![hunk_1(), hunk_2(), hunk_3()]
}

pub fn options() -> RenderOptions {
    RenderOptions::with_base_url("https://sourcegraph.test".parse().unwrap())
}
